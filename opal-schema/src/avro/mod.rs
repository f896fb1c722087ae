//! Avro Format Adapter
//!
//! This module contains all Avro-specific functionality for the adapter
//! family:
//! - Descriptor normalization, validation and subject naming (avro_adapter)
//! - Schema compilation with named-type registry handling (compiler)
//!
//! Apache Avro is a data serialization system with rich schema evolution
//! support.

mod avro_adapter;
mod compiler;

pub use avro_adapter::AvroAdapter;
pub use compiler::AvroParseOptions;
