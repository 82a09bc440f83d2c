//! # Lodestar
//!
//! Client-side transaction codec and signing engine for a Stellar-style
//! payment network: byte-exact encoding, checksummed key text, ed25519
//! signing, deterministic wallets, and typed decoding of network results.
//!
//! ## Usage
//!
//! ```rust
//! use lodestar::{Amount, Asset, ClientConfig, Keypair, Operation, SequenceNumber};
//!
//! let config = ClientConfig::default();
//! let source = Keypair::random();
//! let destination = Keypair::random().account_id();
//!
//! let amount: Amount = "12.5".parse().unwrap();
//! let envelope = config
//!     .transaction_builder(source.account_id(), SequenceNumber::from(1))
//!     .add_operation(Operation::payment(destination, Asset::native(), amount))
//!     .unwrap()
//!     .sign(&[&source], &config.network)
//!     .unwrap();
//!
//! let wire = envelope.to_base64().unwrap();
//! assert!(!wire.is_empty());
//! assert!(envelope.verify_signature(&source, &config.network).unwrap());
//! ```
//!
//! ## Re-exports
//!
//! - `lodestar::xdr` - Byte codec, CRC16 and SHA-256
//! - `lodestar::keys` - Key text, keypairs, mnemonics and derivation
//! - `lodestar::tx` - Operations, transactions, envelopes and results

pub mod config;
pub mod error;

pub use lodestar_keys as keys;
pub use lodestar_tx as tx;
pub use lodestar_xdr as xdr;

pub use config::{ClientConfig, CommandSignerConfig, Network};
pub use error::{Error, Result};

pub use lodestar_keys::{
    AccountId, DecoratedSignature, HdNode, KeyRole, Keypair, Signature, SignerKey, WordList,
};
pub use lodestar_tx::{
    Amount, Asset, Memo, Operation, OperationResult, Price, SequenceNumber, TimeBounds,
    Transaction, TransactionBuilder, TransactionEnvelope, TransactionResult, TransactionSigner,
};
pub use lodestar_xdr::{Sha256Hash, XdrDecode, XdrEncode};
