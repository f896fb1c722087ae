use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Schema formats supported by the adapter family
///
/// The registry client reads this tag off the transported descriptor and uses
/// it to select the format adapter. Documents never carry the tag themselves.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum SchemaFormat {
    /// Apache Avro schema format
    Avro,
    /// JSON Schema format
    JsonSchema,
    /// Protocol Buffers schema format
    Protobuf,
}

impl SchemaFormat {
    /// Convert to string representation for API calls
    pub fn as_str(&self) -> &'static str {
        match self {
            SchemaFormat::Avro => "avro",
            SchemaFormat::JsonSchema => "json_schema",
            SchemaFormat::Protobuf => "protobuf",
        }
    }
}

impl fmt::Display for SchemaFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SchemaFormat {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.to_lowercase().as_str() {
            "avro" => Ok(SchemaFormat::Avro),
            "json_schema" | "jsonschema" | "json" => Ok(SchemaFormat::JsonSchema),
            "protobuf" | "proto" => Ok(SchemaFormat::Protobuf),
            other => Err(format!("unknown schema format: '{}'", other)),
        }
    }
}

impl TryFrom<String> for SchemaFormat {
    type Error = String;

    fn try_from(s: String) -> std::result::Result<Self, Self::Error> {
        s.parse()
    }
}

impl From<SchemaFormat> for String {
    fn from(format: SchemaFormat) -> Self {
        format.as_str().to_string()
    }
}
