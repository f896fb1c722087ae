use crate::adapter::{ParseOptions, SchemaAdapter};
use crate::avro::compiler::{self, AvroParseOptions};
use crate::descriptor::{
    decode_embedded, is_raw_document, SchemaDescriptor, SchemaInput, Subject,
};
use crate::errors::{Result, SchemaError};
use crate::handle::{AvroParsedSchema, ParsedSchema};
use crate::types::SchemaFormat;
use serde_json::Value;

/// Adapter for Avro schemas
#[derive(Debug, Default)]
pub struct AvroAdapter;

impl AvroAdapter {
    /// Resolve any accepted input into the raw structured document
    ///
    /// A bare document passing the name/type presence check is taken as-is;
    /// everything else goes through the descriptor-decoding path.
    fn raw_document(input: &SchemaInput) -> Result<Value> {
        match input {
            SchemaInput::Document(document) if is_raw_document(document) => Ok(document.clone()),
            SchemaInput::Document(document) => decode_embedded(document),
            SchemaInput::Descriptor(descriptor) => descriptor.decode(),
        }
    }

    fn options_copy(options: Option<&ParseOptions>) -> Result<AvroParseOptions> {
        match options {
            None => Ok(AvroParseOptions::default()),
            Some(ParseOptions::Avro(opts)) => Ok(opts.clone()),
            Some(_) => Err(SchemaError::FormatMismatch {
                expected: SchemaFormat::Avro,
            }),
        }
    }
}

impl SchemaAdapter for AvroAdapter {
    fn parse(&self, input: &SchemaInput, options: Option<&ParseOptions>) -> Result<ParsedSchema> {
        let raw = Self::raw_document(input)?;

        // The compiler mutates the options bag it is handed. Always give it a
        // fresh copy so state cannot bleed between calls sharing one bag.
        let mut opts = Self::options_copy(options)?;
        let compiled = compiler::compile(&raw, &mut opts)?;

        Ok(ParsedSchema::Avro(AvroParsedSchema {
            schema: compiled.schema,
            name: compiled.name,
            raw_schema: compiled.canonical,
            fingerprint: compiled.fingerprint,
        }))
    }

    fn validate(&self, parsed: &ParsedSchema) -> Result<()> {
        match parsed {
            ParsedSchema::Avro(schema) => match schema.name.as_deref() {
                Some(name) if !name.is_empty() => Ok(()),
                _ => Err(SchemaError::InvalidName(schema.name.clone())),
            },
            _ => Err(SchemaError::FormatMismatch {
                expected: SchemaFormat::Avro,
            }),
        }
    }

    fn subject(
        &self,
        descriptor: &SchemaDescriptor,
        _parsed: &ParsedSchema,
        separator: &str,
    ) -> Result<Subject> {
        // The namespace is read off the transported document, never off the
        // compiled handle: a raw namespace does not survive compilation
        // uniformly for every schema shape.
        let raw = descriptor.decode()?;

        match raw.get("namespace").and_then(Value::as_str) {
            Some(namespace) if !namespace.is_empty() => {
                let name = raw.get("name").and_then(Value::as_str).unwrap_or_default();
                Ok(Subject {
                    name: format!("{}{}{}", namespace, separator, name),
                })
            }
            namespace => Err(SchemaError::InvalidNamespace(
                namespace.map(str::to_string),
            )),
        }
    }

    fn format(&self) -> SchemaFormat {
        SchemaFormat::Avro
    }
}
