//! Opal-Schema
//!
//! Schema format adapters for the Opal schema registry client. An adapter
//! normalizes a registry-transported schema descriptor into a compiled schema
//! handle, checks the naming invariants the registry requires, and derives
//! the canonical subject a schema is registered or looked up under.
//!
//! Fetching, caching and registering schemas live in the registry client;
//! this crate only parses, validates and names them.

mod adapter;
pub use adapter::{AdapterFactory, ParseOptions, SchemaAdapter};

mod descriptor;
pub use descriptor::{is_raw_document, SchemaDescriptor, SchemaInput, SchemaPayload, Subject};

pub mod errors;
pub use errors::{Result, SchemaError};

mod handle;
pub use handle::{AvroParsedSchema, JsonParsedSchema, ParsedSchema, ProtobufParsedSchema};

mod types;
pub use types::SchemaFormat;

mod avro;
pub use avro::{AvroAdapter, AvroParseOptions};

mod json;
pub use json::{JsonParseOptions, JsonSchemaAdapter};

mod protobuf;
pub use protobuf::ProtobufAdapter;
