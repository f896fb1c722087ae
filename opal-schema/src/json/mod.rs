//! JSON Schema Format Adapter
//!
//! This module contains all JSON Schema-specific functionality for the
//! adapter family:
//! - Descriptor normalization, validation and subject naming (json_adapter)
//!
//! JSON Schema is a vocabulary for annotating and validating JSON documents.
//! Its registry name is the `title` keyword and its namespace is the `$id`
//! keyword.

mod json_adapter;

pub use json_adapter::{JsonParseOptions, JsonSchemaAdapter};
