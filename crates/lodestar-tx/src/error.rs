//! Error types for transaction construction and signing.

use lodestar_keys::KeyError;
use lodestar_xdr::XdrError;
use thiserror::Error;

/// Errors raised while building, encoding or signing transactions.
///
/// Network-reported failures are not errors; they decode into
/// [`crate::OperationResult`] and [`crate::TransactionResult`] values.
#[derive(Debug, Error)]
pub enum TxError {
    #[error("invalid amount: {0}")]
    InvalidAmount(String),

    #[error("invalid price: {0}")]
    InvalidPrice(String),

    #[error("invalid asset code: {0:?}")]
    InvalidAssetCode(String),

    #[error("{field} is {len} bytes, maximum is {max}")]
    ValueTooLong {
        field: &'static str,
        len: usize,
        max: usize,
    },

    #[error("path payments allow at most 5 intermediate assets")]
    TooManyPathAssets,

    #[error("weight {0} is outside 0..=255")]
    InvalidSignerWeight(u32),

    #[error("transactions allow at most 100 operations, got {0}")]
    TooManyOperations(usize),

    #[error("transaction has no operations")]
    NoOperations,

    #[error("envelopes allow at most 20 signatures")]
    TooManySignatures,

    #[error("fee overflows u32: base fee {base_fee} x {operations} operations")]
    FeeOverflow { base_fee: u32, operations: usize },

    #[error("signer unavailable: {0}")]
    SignerUnavailable(String),

    #[error("signer failed: {0}")]
    SignerFailed(String),

    #[error("external signer timed out: {0}")]
    SignerTimeout(String),

    #[error("codec error: {0}")]
    Xdr(#[from] XdrError),

    #[error("key error: {0}")]
    Key(#[from] KeyError),
}

/// Result type for transaction operations.
pub type Result<T> = std::result::Result<T, TxError>;
