use crate::types::SchemaFormat;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, SchemaError>;

#[derive(Debug, Error)]
pub enum SchemaError {
    /// The parsed schema does not carry the name the registry requires
    #[error("invalid schema name: {0:?}")]
    InvalidName(Option<String>),

    /// The raw schema document does not carry a usable namespace
    #[error("invalid schema namespace: {0:?}")]
    InvalidNamespace(Option<String>),

    /// A string-encoded schema payload could not be decoded into a document
    #[error("malformed schema payload: {0}")]
    MalformedPayload(String),

    /// The format compiler rejected the schema; the message is the compiler's
    /// own and is not reinterpreted here
    #[error("schema compilation failed: {0}")]
    Compilation(String),

    /// A parse-options bag or parsed handle of another format was handed to
    /// this adapter
    #[error("schema input does not match the {expected} adapter")]
    FormatMismatch { expected: SchemaFormat },
}
