use crate::adapter::{ParseOptions, SchemaAdapter};
use crate::descriptor::{SchemaDescriptor, SchemaInput, Subject};
use crate::errors::{Result, SchemaError};
use crate::handle::{sha256_fingerprint, JsonParsedSchema, ParsedSchema};
use crate::types::SchemaFormat;
use serde_json::Value;
use tracing::debug;

/// Options handed to the JSON Schema compiler
#[derive(Debug, Clone, Default, PartialEq)]
pub struct JsonParseOptions {
    /// Enforce `format` keyword assertions instead of treating them as
    /// annotations
    pub validate_formats: bool,
}

/// Adapter for JSON Schemas
#[derive(Debug, Default)]
pub struct JsonSchemaAdapter;

impl JsonSchemaAdapter {
    /// JSON Schema documents carry no name/type pair to discriminate on, so
    /// a bare document is always the raw schema itself.
    fn raw_document(input: &SchemaInput) -> Result<Value> {
        match input {
            SchemaInput::Document(document) => Ok(document.clone()),
            SchemaInput::Descriptor(descriptor) => descriptor.decode(),
        }
    }

    fn options_copy(options: Option<&ParseOptions>) -> Result<JsonParseOptions> {
        match options {
            None => Ok(JsonParseOptions::default()),
            Some(ParseOptions::JsonSchema(opts)) => Ok(opts.clone()),
            Some(_) => Err(SchemaError::FormatMismatch {
                expected: SchemaFormat::JsonSchema,
            }),
        }
    }
}

impl SchemaAdapter for JsonSchemaAdapter {
    fn parse(&self, input: &SchemaInput, options: Option<&ParseOptions>) -> Result<ParsedSchema> {
        let raw = Self::raw_document(input)?;
        let opts = Self::options_copy(options)?;

        // Compile the validator to prove the schema is structurally valid;
        // it is rebuilt on demand by payload validation, not retained here.
        jsonschema::options()
            .should_validate_formats(opts.validate_formats)
            .build(&raw)
            .map_err(|e| SchemaError::Compilation(e.to_string()))?;

        let canonical = serde_json::to_string(&raw)
            .map_err(|e| SchemaError::Compilation(e.to_string()))?;
        let name = raw
            .get("title")
            .and_then(Value::as_str)
            .map(str::to_string);
        let fingerprint = sha256_fingerprint(&canonical);
        debug!(name = ?name, fingerprint = %fingerprint, "compiled json schema");

        Ok(ParsedSchema::JsonSchema(JsonParsedSchema {
            name,
            raw_schema: canonical,
            fingerprint,
        }))
    }

    fn validate(&self, parsed: &ParsedSchema) -> Result<()> {
        match parsed {
            ParsedSchema::JsonSchema(schema) => match schema.name.as_deref() {
                Some(name) if !name.is_empty() => Ok(()),
                _ => Err(SchemaError::InvalidName(schema.name.clone())),
            },
            _ => Err(SchemaError::FormatMismatch {
                expected: SchemaFormat::JsonSchema,
            }),
        }
    }

    fn subject(
        &self,
        descriptor: &SchemaDescriptor,
        _parsed: &ParsedSchema,
        separator: &str,
    ) -> Result<Subject> {
        let raw = descriptor.decode()?;

        match raw.get("$id").and_then(Value::as_str) {
            Some(id) if !id.is_empty() => {
                let name = raw.get("title").and_then(Value::as_str).unwrap_or_default();
                Ok(Subject {
                    name: format!("{}{}{}", id, separator, name),
                })
            }
            id => Err(SchemaError::InvalidNamespace(id.map(str::to_string))),
        }
    }

    fn format(&self) -> SchemaFormat {
        SchemaFormat::JsonSchema
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    const USER_SCHEMA: &str = r#"{
        "$id": "com.example",
        "title": "User",
        "type": "object",
        "properties": {
            "name": {"type": "string"},
            "age": {"type": "integer", "minimum": 0}
        },
        "required": ["name"]
    }"#;

    fn descriptor() -> SchemaDescriptor {
        SchemaDescriptor::serialized(SchemaFormat::JsonSchema, USER_SCHEMA)
    }

    #[test]
    fn test_parse_serialized_descriptor() {
        let adapter = JsonSchemaAdapter;
        let parsed = adapter.parse(&descriptor().into(), None).unwrap();
        assert_eq!(parsed.name(), Some("User"));
        assert!(parsed.fingerprint().starts_with("sha256:"));
    }

    #[test]
    fn test_parse_bare_document() {
        let adapter = JsonSchemaAdapter;
        let document = json!({"title": "Event", "type": "object"});
        let parsed = adapter.parse(&document.into(), None).unwrap();
        assert_eq!(parsed.name(), Some("Event"));
    }

    #[test]
    fn test_parse_malformed_payload() {
        let adapter = JsonSchemaAdapter;
        let input = SchemaDescriptor::serialized(SchemaFormat::JsonSchema, "{broken").into();
        let err = adapter.parse(&input, None).unwrap_err();
        assert!(matches!(err, SchemaError::MalformedPayload(_)));
    }

    #[test]
    fn test_parse_invalid_schema_surfaces_compiler_error() {
        let adapter = JsonSchemaAdapter;
        // `type` must be a string or array of strings in JSON Schema.
        let document = json!({"type": 12});
        let err = adapter.parse(&document.into(), None).unwrap_err();
        assert!(matches!(err, SchemaError::Compilation(_)));
    }

    #[test]
    fn test_fingerprint_ignores_formatting_differences() {
        let adapter = JsonSchemaAdapter;
        let pretty = SchemaDescriptor::serialized(
            SchemaFormat::JsonSchema,
            "{\n  \"title\": \"User\",\n  \"type\": \"object\"\n}",
        );
        let compact = SchemaDescriptor::serialized(
            SchemaFormat::JsonSchema,
            r#"{"title":"User","type":"object"}"#,
        );
        let fp1 = adapter.parse(&pretty.into(), None).unwrap();
        let fp2 = adapter.parse(&compact.into(), None).unwrap();
        assert_eq!(fp1.fingerprint(), fp2.fingerprint());
    }

    #[test]
    fn test_validate_untitled_schema_fails() {
        let adapter = JsonSchemaAdapter;
        let parsed = adapter
            .parse(&json!({"type": "object"}).into(), None)
            .unwrap();
        let err = adapter.validate(&parsed).unwrap_err();
        assert!(matches!(err, SchemaError::InvalidName(None)));
    }

    #[test]
    fn test_subject_joins_id_and_title() {
        let adapter = JsonSchemaAdapter;
        let parsed = adapter.parse(&descriptor().into(), None).unwrap();
        let subject = adapter.subject(&descriptor(), &parsed, ".").unwrap();
        assert_eq!(subject.name, "com.example.User");
    }

    #[test]
    fn test_subject_without_id_fails() {
        let adapter = JsonSchemaAdapter;
        let plain = SchemaDescriptor::document(
            SchemaFormat::JsonSchema,
            json!({"title": "User", "type": "object"}),
        );
        let parsed = adapter.parse(&plain.clone().into(), None).unwrap();
        let err = adapter.subject(&plain, &parsed, ".").unwrap_err();
        assert!(matches!(err, SchemaError::InvalidNamespace(None)));
    }
}
