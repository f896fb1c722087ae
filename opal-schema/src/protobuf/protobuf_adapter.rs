use crate::adapter::{ParseOptions, SchemaAdapter};
use crate::descriptor::{SchemaDescriptor, SchemaInput, SchemaPayload, Subject};
use crate::errors::{Result, SchemaError};
use crate::handle::{sha256_fingerprint, ParsedSchema, ProtobufParsedSchema};
use crate::types::SchemaFormat;
use tracing::debug;

/// Adapter for Protocol Buffers schemas
#[derive(Debug, Default)]
pub struct ProtobufAdapter;

impl ProtobufAdapter {
    /// Protobuf schemas are transported as .proto text; a structured JSON
    /// document cannot carry one.
    fn raw_proto(input: &SchemaInput) -> Result<String> {
        match input {
            SchemaInput::Descriptor(SchemaDescriptor {
                payload: SchemaPayload::Serialized(text),
                ..
            }) => Ok(text.clone()),
            _ => Err(SchemaError::MalformedPayload(
                "protobuf schemas are transported as text, not structured documents".to_string(),
            )),
        }
    }
}

impl SchemaAdapter for ProtobufAdapter {
    fn parse(&self, input: &SchemaInput, options: Option<&ParseOptions>) -> Result<ParsedSchema> {
        if options.is_some() {
            // No protobuf options bag exists; anything handed in belongs to
            // another format.
            return Err(SchemaError::FormatMismatch {
                expected: SchemaFormat::Protobuf,
            });
        }

        let raw_proto = Self::raw_proto(input)?;
        if raw_proto.trim().is_empty() {
            return Err(SchemaError::Compilation("empty protobuf schema".to_string()));
        }

        let (package, message_name) = scan_declarations(&raw_proto);
        let fingerprint = sha256_fingerprint(&raw_proto);
        debug!(message = ?message_name, package = ?package, "parsed protobuf schema");

        Ok(ParsedSchema::Protobuf(ProtobufParsedSchema {
            message_name,
            package,
            raw_proto,
            fingerprint,
        }))
    }

    fn validate(&self, parsed: &ParsedSchema) -> Result<()> {
        match parsed {
            ParsedSchema::Protobuf(schema) => match schema.message_name.as_deref() {
                Some(name) if !name.is_empty() => Ok(()),
                _ => Err(SchemaError::InvalidName(schema.message_name.clone())),
            },
            _ => Err(SchemaError::FormatMismatch {
                expected: SchemaFormat::Protobuf,
            }),
        }
    }

    fn subject(
        &self,
        descriptor: &SchemaDescriptor,
        _parsed: &ParsedSchema,
        separator: &str,
    ) -> Result<Subject> {
        let raw_proto = Self::raw_proto(&SchemaInput::Descriptor(descriptor.clone()))?;
        let (package, message_name) = scan_declarations(&raw_proto);

        match package {
            Some(package) if !package.is_empty() => {
                let name = message_name.unwrap_or_default();
                Ok(Subject {
                    name: format!("{}{}{}", package, separator, name),
                })
            }
            package => Err(SchemaError::InvalidNamespace(package)),
        }
    }

    fn format(&self) -> SchemaFormat {
        SchemaFormat::Protobuf
    }
}

/// Pull the `package` and first `message` declarations out of proto text
fn scan_declarations(raw_proto: &str) -> (Option<String>, Option<String>) {
    let mut package = None;
    let mut message = None;

    for line in raw_proto.lines() {
        let line = line.trim();
        if let Some(rest) = line.strip_prefix("package ") {
            if package.is_none() {
                let name = rest.trim().trim_end_matches(';').trim();
                if !name.is_empty() {
                    package = Some(name.to_string());
                }
            }
        } else if let Some(rest) = line.strip_prefix("message ") {
            if message.is_none() {
                let name = rest
                    .split(|c: char| c == '{' || c.is_whitespace())
                    .next()
                    .unwrap_or_default();
                if !name.is_empty() {
                    message = Some(name.to_string());
                }
            }
        }
    }

    (package, message)
}
