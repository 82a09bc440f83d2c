//! # Lodestar Transactions
//!
//! Builds, encodes, signs and inspects transactions.
//!
//! ## Flow
//!
//! ```text
//! TransactionBuilder ─build─▶ Transaction ─hash(network)─▶ signing hash
//!         │                                                   │
//!         └──sign(signers)──▶ TransactionEnvelope ◀── DecoratedSignature
//! ```
//!
//! The network's reply decodes into [`TransactionResult`] /
//! [`OperationResult`]; failure codes are values, not errors.
//!
//! ## Example
//!
//! ```rust
//! use lodestar_keys::Keypair;
//! use lodestar_tx::{Asset, Network, Operation, SequenceNumber, TransactionBuilder};
//!
//! let source = Keypair::random();
//! let destination = Keypair::random().account_id();
//! let envelope = TransactionBuilder::new(source.account_id(), SequenceNumber::from(1))
//!     .add_operation(Operation::payment(destination, Asset::native(), "10".parse().unwrap()))
//!     .unwrap()
//!     .sign(&[&source], &Network::testnet())
//!     .unwrap();
//! assert_eq!(envelope.signatures.len(), 1);
//! ```

pub mod asset;
pub mod envelope;
pub mod error;
pub mod memo;
pub mod network;
pub mod operation;
pub mod result;
pub mod signer;
pub mod transaction;
pub mod types;

pub use asset::{Asset, AssetCode};
pub use envelope::{TransactionEnvelope, MAX_SIGNATURES};
pub use error::{Result, TxError};
pub use memo::Memo;
pub use network::{Network, PUBLIC_PASSPHRASE, TESTNET_PASSPHRASE};
pub use operation::{
    AllowTrustOp, BumpSequenceOp, ChangeTrustOp, CreateAccountOp, CreatePassiveOfferOp,
    ManageDataOp, ManageOfferOp, Operation, OperationBody, OperationType, PathPaymentOp,
    PaymentOp, SetOptionsOp, Signer,
};
pub use result::{
    AccountMergeResult, ClaimOfferAtom, InflationPayout, InflationResult, ManageOfferEffect,
    ManageOfferResult, OfferEntry, OperationInnerResult, OperationResult, PathPaymentResult,
    SimplePaymentResult, TransactionResult, TransactionResultCode,
};
pub use signer::{CommandSigner, KeypairSigner, TransactionSigner, DEFAULT_SIGNER_TIMEOUT};
pub use transaction::{Transaction, TransactionBuilder, BASE_FEE, MAX_OPERATIONS};
pub use types::{Amount, Price, SequenceNumber, TimeBounds, STROOPS_PER_UNIT};
