use crate::types::SchemaFormat;
use sha2::{Digest, Sha256};

/// Compiled in-memory schema, one variant per format
///
/// Opaque to the registry client except for the name used during validation;
/// the client retains a handle for later encode/decode against the registry.
#[derive(Debug, Clone)]
pub enum ParsedSchema {
    Avro(AvroParsedSchema),
    JsonSchema(JsonParsedSchema),
    Protobuf(ProtobufParsedSchema),
}

impl ParsedSchema {
    pub fn format(&self) -> SchemaFormat {
        match self {
            ParsedSchema::Avro(_) => SchemaFormat::Avro,
            ParsedSchema::JsonSchema(_) => SchemaFormat::JsonSchema,
            ParsedSchema::Protobuf(_) => SchemaFormat::Protobuf,
        }
    }

    /// Name the registry validates against, when the schema carries one
    pub fn name(&self) -> Option<&str> {
        match self {
            ParsedSchema::Avro(schema) => schema.name.as_deref(),
            ParsedSchema::JsonSchema(schema) => schema.name.as_deref(),
            ParsedSchema::Protobuf(schema) => schema.message_name.as_deref(),
        }
    }

    /// SHA-256 fingerprint of the canonical schema body
    pub fn fingerprint(&self) -> &str {
        match self {
            ParsedSchema::Avro(schema) => &schema.fingerprint,
            ParsedSchema::JsonSchema(schema) => &schema.fingerprint,
            ParsedSchema::Protobuf(schema) => &schema.fingerprint,
        }
    }

    /// Canonical schema body the handle was compiled from
    pub fn raw_schema(&self) -> &str {
        match self {
            ParsedSchema::Avro(schema) => &schema.raw_schema,
            ParsedSchema::JsonSchema(schema) => &schema.raw_schema,
            ParsedSchema::Protobuf(schema) => &schema.raw_proto,
        }
    }
}

/// Compiled Avro schema
#[derive(Debug, Clone)]
pub struct AvroParsedSchema {
    /// The compiled schema, usable for encode/decode
    pub schema: apache_avro::Schema,
    /// Full name of the top-level named type, if the schema has one
    pub name: Option<String>,
    /// Canonical (compact) JSON the schema compiled from
    pub raw_schema: String,
    pub fingerprint: String,
}

/// Compiled JSON Schema
///
/// The jsonschema validator is not retained here; it is rebuilt on demand by
/// whoever validates payloads against this schema.
#[derive(Debug, Clone)]
pub struct JsonParsedSchema {
    /// The schema's `title`, if present
    pub name: Option<String>,
    /// Canonical (compact) JSON Schema body
    pub raw_schema: String,
    pub fingerprint: String,
}

/// Parsed Protocol Buffers schema
#[derive(Debug, Clone)]
pub struct ProtobufParsedSchema {
    /// First `message` declaration in the schema, if any
    pub message_name: Option<String>,
    /// The schema's `package` declaration, if any
    pub package: Option<String>,
    /// Raw .proto text
    pub raw_proto: String,
    pub fingerprint: String,
}

/// SHA-256 fingerprint over a canonical schema body, `sha256:` prefixed
pub(crate) fn sha256_fingerprint(canonical: &str) -> String {
    let mut hasher = Sha256::new();
    hasher.update(canonical.as_bytes());
    let result = hasher.finalize();
    format!("sha256:{}", hex::encode(result))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fingerprint_consistency() {
        let body = r#"{"type":"record","name":"User","fields":[]}"#;
        assert_eq!(sha256_fingerprint(body), sha256_fingerprint(body));
        assert!(sha256_fingerprint(body).starts_with("sha256:"));
    }

    #[test]
    fn test_different_bodies_have_different_fingerprints() {
        let fp1 = sha256_fingerprint(r#"{"name":"A"}"#);
        let fp2 = sha256_fingerprint(r#"{"name":"B"}"#);
        assert_ne!(fp1, fp2);
    }

    #[test]
    fn test_handle_accessors_dispatch_by_variant() {
        let handle = ParsedSchema::JsonSchema(JsonParsedSchema {
            name: Some("User".to_string()),
            raw_schema: "{}".to_string(),
            fingerprint: "sha256:00".to_string(),
        });
        assert_eq!(handle.format(), SchemaFormat::JsonSchema);
        assert_eq!(handle.name(), Some("User"));
        assert_eq!(handle.fingerprint(), "sha256:00");
        assert_eq!(handle.raw_schema(), "{}");
    }
}
