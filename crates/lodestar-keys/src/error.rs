//! Error types for key handling and derivation.

use lodestar_xdr::XdrError;
use thiserror::Error;

use crate::strkey::KeyRole;

/// Errors raised by key text, keypairs and signatures.
///
/// A key of the wrong role ([`KeyError::WrongKeyRole`]) is always reported
/// separately from corrupted text ([`KeyError::InvalidChecksum`]).
#[derive(Debug, Error)]
pub enum KeyError {
    #[error("key text is not valid base32")]
    InvalidEncoding,

    #[error("decoded key has {actual} bytes, expected {expected}")]
    InvalidLength { expected: usize, actual: usize },

    #[error("key checksum mismatch")]
    InvalidChecksum,

    #[error("expected {expected} key, found {actual} key")]
    WrongKeyRole { expected: KeyRole, actual: KeyRole },

    #[error("unknown version byte: {0:#04x}")]
    UnknownVersionByte(u8),

    /// Signing was attempted on a public-only keypair.
    #[error("keypair has no secret seed and cannot sign")]
    SigningUnavailable,

    #[error("invalid public key")]
    InvalidPublicKey,

    #[error("invalid signature")]
    InvalidSignature,

    #[error("derivation error: {0}")]
    Derivation(#[from] DerivationError),

    #[error("codec error: {0}")]
    Xdr(#[from] XdrError),
}

/// Errors raised by mnemonic decoding and hierarchical derivation.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum DerivationError {
    #[error("mnemonic word count {0} is not a positive multiple of 3")]
    InvalidWordCount(usize),

    #[error("word not in word list: {0}")]
    UnknownWord(String),

    #[error("mnemonic checksum mismatch")]
    ChecksumMismatch,

    #[error("word list must contain 2048 unique words, got {0}")]
    InvalidWordList(usize),

    #[error("invalid entropy length: {0} bytes")]
    InvalidEntropyLength(usize),

    #[error("invalid derivation path: {0}")]
    InvalidPath(String),

    #[error("index {0} is outside the hardenable range")]
    IndexOutOfRange(u32),

    #[error("seed stretching failed: {0}")]
    SeedStretch(String),
}

/// Result type for key operations.
pub type Result<T> = std::result::Result<T, KeyError>;
