//! # Lodestar Testkit
//!
//! Testing utilities for lodestar.
//!
//! ## Overview
//!
//! This crate provides:
//!
//! - **Golden vectors**: Known key text and derivation outputs for cross-implementation checks
//! - **Generators**: Proptest strategies for every wire type
//! - **Fixtures**: Deterministic accounts for building and signing transactions
//!
//! ## Golden Vectors
//!
//! ```rust
//! use lodestar_testkit::vectors::verify_all_vectors;
//!
//! for (name, matches, actual) in verify_all_vectors() {
//!     assert!(matches, "{name}: got {actual}");
//! }
//! ```
//!
//! ## Property Testing
//!
//! ```rust,ignore
//! use proptest::prelude::*;
//! use lodestar_testkit::generators::TransactionParams;
//!
//! proptest! {
//!     #[test]
//!     fn hash_is_deterministic(params: TransactionParams) {
//!         let tx = params.build();
//!         prop_assert_eq!(tx.hash(&params.network).unwrap(), tx.hash(&params.network).unwrap());
//!     }
//! }
//! ```
//!
//! ## Test Fixtures
//!
//! ```rust
//! use lodestar_testkit::fixtures::TestFixture;
//!
//! let alice = TestFixture::with_seed([1; 32]);
//! let bob = TestFixture::with_seed([2; 32]);
//! let envelope = alice.make_payment(1, &bob, 10);
//! assert_eq!(envelope.signatures.len(), 1);
//! ```

pub mod fixtures;
pub mod generators;
pub mod vectors;

pub use fixtures::{multi_party_fixtures, sign_by_all, TestFixture};
pub use generators::TransactionParams;
pub use vectors::{
    all_derivation_vectors, all_result_vectors, all_strkey_vectors, verify_all_vectors,
    DerivationVector, ResultVector, StrkeyVector,
};
