//! Protobuf Format Adapter
//!
//! This module contains all Protocol Buffers-specific functionality for the
//! adapter family:
//! - Descriptor normalization, validation and subject naming (protobuf_adapter)
//!
//! Protocol Buffers schemas travel as .proto text, not JSON. The registry
//! name is the first `message` declaration and the namespace is the `package`
//! declaration. Compilation is structural only; full descriptor-set
//! compilation belongs to the encode/decode layer.

mod protobuf_adapter;

pub use protobuf_adapter::ProtobufAdapter;
