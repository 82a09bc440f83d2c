//! Error types for the byte codec.

use thiserror::Error;

/// Errors raised while encoding or decoding wire bytes.
///
/// Every decode error is terminal for the current call: no partial values
/// are ever returned.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum XdrError {
    /// A read needed more bytes than remain in the input.
    #[error("unexpected end of data: needed {needed} bytes, {remaining} remaining")]
    UnexpectedEof { needed: usize, remaining: usize },

    /// A boolean was encoded as something other than 0 or 1.
    #[error("invalid boolean encoding: {0}")]
    InvalidBool(u32),

    /// A variable-length value exceeds its declared maximum.
    #[error("length {len} exceeds maximum {max}")]
    LengthExceeded { len: usize, max: usize },

    /// A union discriminant has no known arm.
    #[error("unknown {type_name} discriminant: {value}")]
    UnknownDiscriminant { type_name: &'static str, value: i32 },

    /// A string field did not contain valid UTF-8.
    #[error("string is not valid utf-8")]
    InvalidUtf8,

    /// An integer does not fit the wire width.
    #[error("integer out of range: {0}")]
    IntegerOutOfRange(String),

    /// A field that must be set before encoding was left unset.
    #[error("required field not set: {0}")]
    MissingField(&'static str),

    /// A value violates a wire-level constraint.
    #[error("invalid value: {0}")]
    InvalidValue(String),

    /// Base64 transport text could not be decoded.
    #[error("base64 decode failed: {0}")]
    Base64(String),
}

/// Result type for codec operations.
pub type Result<T> = std::result::Result<T, XdrError>;
