//! # Lodestar Keys
//!
//! Everything that touches key material: the checksummed base-32 text
//! forms ("strkeys"), ed25519 keypairs and signatures, and deterministic
//! wallet derivation from mnemonic phrases.
//!
//! ## Key Types
//!
//! - [`KeyRole`] - Version byte selecting account / seed / pre-auth / hash-x text
//! - [`Keypair`] - Seed plus public key; public-only keypairs verify but never sign
//! - [`AccountId`] - A 32-byte ed25519 public key as it appears on the wire
//! - [`DecoratedSignature`] - Signature plus 4-byte signer hint
//! - [`WordList`] - Explicitly owned mnemonic context (no global state)
//! - [`HdNode`] - Hardened-only hierarchical derivation node
//!
//! ## Derivation
//!
//! ```rust
//! use lodestar_keys::{HdNode, Keypair, WordList};
//!
//! let words = WordList::english();
//! let phrase = "abandon abandon abandon abandon abandon abandon \
//!               abandon abandon abandon abandon abandon about";
//! let keypair = Keypair::from_mnemonic(&words, phrase, "", 0).unwrap();
//! assert!(keypair.address().starts_with('G'));
//! ```

pub mod account;
pub mod crypto;
pub mod error;
pub mod hd;
pub mod mnemonic;
pub mod strkey;

pub use account::{AccountId, SignerKey};
pub use crypto::{DecoratedSignature, Keypair, Signature, SignatureHint};
pub use error::{DerivationError, KeyError, Result};
pub use hd::{parse_path, HdNode, HARDENED_OFFSET};
pub use mnemonic::WordList;
pub use strkey::{decode_any, decode_check, encode_check, is_valid, KeyRole};
