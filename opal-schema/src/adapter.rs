use crate::avro::{AvroAdapter, AvroParseOptions};
use crate::descriptor::{SchemaDescriptor, SchemaInput, Subject};
use crate::errors::Result;
use crate::handle::ParsedSchema;
use crate::json::{JsonParseOptions, JsonSchemaAdapter};
use crate::protobuf::ProtobufAdapter;
use crate::types::SchemaFormat;
use std::fmt;

/// Per-format parser configuration
///
/// Adapters treat the inner bag as opaque: fields are copied through to the
/// format compiler, never interpreted or validated here.
#[derive(Debug, Clone, PartialEq)]
pub enum ParseOptions {
    Avro(AvroParseOptions),
    JsonSchema(JsonParseOptions),
}

/// Capability set shared by all format adapters
///
/// The registry client selects an adapter by the descriptor's format tag and
/// drives it through this interface. Adapters hold no state; every operation
/// is a pure, synchronous transformation, safe to call from concurrent sites
/// without coordination.
pub trait SchemaAdapter: Send + Sync + fmt::Debug {
    /// Compile a schema input into a parsed handle
    ///
    /// The caller's `options` bag is cloned before it reaches the format
    /// compiler and the clone is discarded afterwards, so the original is
    /// observably unchanged no matter how many calls share it.
    fn parse(&self, input: &SchemaInput, options: Option<&ParseOptions>) -> Result<ParsedSchema>;

    /// Check that the handle carries the name the registry requires
    fn validate(&self, parsed: &ParsedSchema) -> Result<()>;

    /// Derive the registry subject for a schema
    ///
    /// The raw document is always re-derived from the descriptor; the handle
    /// is accepted for interface symmetry with the other adapters, but its
    /// metadata is not trusted for naming.
    fn subject(
        &self,
        descriptor: &SchemaDescriptor,
        parsed: &ParsedSchema,
        separator: &str,
    ) -> Result<Subject>;

    /// The format this adapter handles
    fn format(&self) -> SchemaFormat;
}

/// Factory selecting the adapter for a format tag
pub struct AdapterFactory;

impl AdapterFactory {
    pub fn create(format: SchemaFormat) -> Box<dyn SchemaAdapter> {
        match format {
            SchemaFormat::Avro => Box::new(AvroAdapter),
            SchemaFormat::JsonSchema => Box::new(JsonSchemaAdapter),
            SchemaFormat::Protobuf => Box::new(ProtobufAdapter),
        }
    }
}
