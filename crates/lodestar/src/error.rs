//! Unified error type.

use lodestar_keys::{DerivationError, KeyError};
use lodestar_tx::TxError;
use lodestar_xdr::XdrError;
use thiserror::Error;

/// Errors from any Lodestar component.
#[derive(Debug, Error)]
pub enum Error {
    /// Malformed or unencodable wire data.
    #[error("codec error: {0}")]
    Xdr(#[from] XdrError),

    /// Key text, keypair or signature error.
    #[error("key error: {0}")]
    Key(#[from] KeyError),

    /// Mnemonic or derivation path error.
    #[error("derivation error: {0}")]
    Derivation(#[from] DerivationError),

    /// Transaction construction or signing error.
    #[error("transaction error: {0}")]
    Tx(#[from] TxError),

    /// Invalid configuration.
    #[error("config error: {0}")]
    Config(String),

    /// I/O error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

/// Result type for Lodestar operations.
pub type Result<T> = std::result::Result<T, Error>;
