use crate::errors::{Result, SchemaError};
use crate::types::SchemaFormat;
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Registry-transport wrapper around a schema payload
///
/// Wire shape: `{ "type": <format tag>, "schema": <string | object> }`. The
/// format tag selects the adapter; the payload holds exactly one of the two
/// schema representations.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SchemaDescriptor {
    #[serde(rename = "type")]
    pub format: SchemaFormat,
    #[serde(rename = "schema")]
    pub payload: SchemaPayload,
}

impl SchemaDescriptor {
    /// Descriptor carrying a string-encoded schema body
    pub fn serialized(format: SchemaFormat, schema: impl Into<String>) -> Self {
        Self {
            format,
            payload: SchemaPayload::Serialized(schema.into()),
        }
    }

    /// Descriptor carrying an already-structured schema document
    pub fn document(format: SchemaFormat, document: Value) -> Self {
        Self {
            format,
            payload: SchemaPayload::Document(document),
        }
    }

    /// Resolve the transported payload into a structured schema document
    pub fn decode(&self) -> Result<Value> {
        self.payload.decode()
    }
}

/// The two transport representations of a schema body
///
/// Untagged on the wire: a JSON string is the serialized form, anything else
/// is taken as the structured document itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum SchemaPayload {
    Serialized(String),
    Document(Value),
}

impl SchemaPayload {
    pub fn decode(&self) -> Result<Value> {
        match self {
            SchemaPayload::Serialized(s) => serde_json::from_str(s)
                .map_err(|e| SchemaError::MalformedPayload(e.to_string())),
            SchemaPayload::Document(v) => Ok(v.clone()),
        }
    }
}

/// What a format adapter's `parse` accepts: a registry descriptor, or a bare
/// structured document that skipped the transport wrapper
#[derive(Debug, Clone)]
pub enum SchemaInput {
    Descriptor(SchemaDescriptor),
    Document(Value),
}

impl From<SchemaDescriptor> for SchemaInput {
    fn from(descriptor: SchemaDescriptor) -> Self {
        SchemaInput::Descriptor(descriptor)
    }
}

impl From<Value> for SchemaInput {
    fn from(document: Value) -> Self {
        SchemaInput::Document(document)
    }
}

/// Whether a bare document is an already-raw schema
///
/// The discrimination rule is structural: both `name` and `type` must be
/// present and non-null. A document missing either field falls through to the
/// descriptor-decoding path instead, even if the other is present.
pub fn is_raw_document(document: &Value) -> bool {
    let non_null = |key: &str| document.get(key).is_some_and(|v| !v.is_null());
    non_null("name") && non_null("type")
}

/// Descriptor-decoding path for a bare document that failed the raw check:
/// the document is treated as a descriptor-shaped wrapper and its embedded
/// `schema` field is decoded.
pub(crate) fn decode_embedded(wrapper: &Value) -> Result<Value> {
    match wrapper.get("schema") {
        Some(Value::String(s)) => {
            serde_json::from_str(s).map_err(|e| SchemaError::MalformedPayload(e.to_string()))
        }
        Some(document) if !document.is_null() => Ok(document.clone()),
        _ => Err(SchemaError::MalformedPayload(
            "no schema payload present".to_string(),
        )),
    }
}

/// Canonical registry key for a schema, derived from its namespace and name
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Subject {
    pub name: String,
}
