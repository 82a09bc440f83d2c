//! Hardened-only hierarchical derivation for ed25519 keys.
//!
//! The master node is `HMAC-SHA512("ed25519 seed", seed)` split into
//! private key and chain code. Each child is
//! `HMAC-SHA512(chain_code, 0x00 ‖ key ‖ BE32(index + 2^31))`.
//! Ed25519 has no public-only derivation, so every index is hardened.

use hmac::{Hmac, Mac};
use sha2::Sha512;
use zeroize::{Zeroize, ZeroizeOnDrop};

use crate::crypto::Keypair;
use crate::error::DerivationError;

type Result<T> = std::result::Result<T, DerivationError>;

/// Offset applied to every path index.
pub const HARDENED_OFFSET: u32 = 0x8000_0000;

const MASTER_KEY: &[u8] = b"ed25519 seed";
const MIN_SEED_LEN: usize = 16;

/// A node in the derivation tree.
#[derive(Clone, Zeroize, ZeroizeOnDrop)]
pub struct HdNode {
    private_key: [u8; 32],
    chain_code: [u8; 32],
}

impl HdNode {
    /// Master node from a wallet seed (at least 16 bytes).
    pub fn new_master_node(seed: &[u8]) -> Result<Self> {
        if seed.len() < MIN_SEED_LEN {
            return Err(DerivationError::InvalidEntropyLength(seed.len()));
        }
        Ok(Self::from_hmac(MASTER_KEY, &[seed]))
    }

    /// Hardened child at `index`, which must be below 2^31.
    pub fn derive(&self, index: u32) -> Result<Self> {
        if index >= HARDENED_OFFSET {
            return Err(DerivationError::IndexOutOfRange(index));
        }
        let hardened = (index + HARDENED_OFFSET).to_be_bytes();
        Ok(Self::from_hmac(
            &self.chain_code,
            &[&[0u8], &self.private_key, &hardened],
        ))
    }

    /// Walk a path such as `m/44'/148'/0'`.
    pub fn derive_path(&self, path: &str) -> Result<Self> {
        parse_path(path)?
            .into_iter()
            .try_fold(self.clone(), |node, index| node.derive(index))
    }

    pub fn private_key(&self) -> &[u8; 32] {
        &self.private_key
    }

    pub fn chain_code(&self) -> &[u8; 32] {
        &self.chain_code
    }

    /// Keypair seeded with this node's private key.
    pub fn to_keypair(&self) -> Keypair {
        Keypair::from_raw_seed(&self.private_key)
    }

    fn from_hmac(key: &[u8], parts: &[&[u8]]) -> Self {
        let mut mac =
            Hmac::<Sha512>::new_from_slice(key).expect("HMAC accepts keys of any length");
        for part in parts {
            mac.update(part);
        }
        let mut out = mac.finalize().into_bytes();

        let mut private_key = [0u8; 32];
        let mut chain_code = [0u8; 32];
        private_key.copy_from_slice(&out[..32]);
        chain_code.copy_from_slice(&out[32..]);
        out.as_mut_slice().zeroize();
        Self {
            private_key,
            chain_code,
        }
    }
}

impl std::fmt::Debug for HdNode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("HdNode")
            .field("public_key", &hex::encode(self.to_keypair().public_key()))
            .finish()
    }
}

/// Parse `m/a'/b'/...` into unhardened indexes.
///
/// Every segment must carry the `'` marker; a bare `m` is the empty path.
pub fn parse_path(path: &str) -> Result<Vec<u32>> {
    let invalid = || DerivationError::InvalidPath(path.to_string());

    let mut segments = path.split('/');
    if segments.next() != Some("m") {
        return Err(invalid());
    }

    segments
        .map(|segment| {
            let digits = segment.strip_suffix('\'').ok_or_else(invalid)?;
            if digits.is_empty() || !digits.bytes().all(|b| b.is_ascii_digit()) {
                return Err(invalid());
            }
            let index: u32 = digits.parse().map_err(|_| invalid())?;
            if index >= HARDENED_OFFSET {
                return Err(DerivationError::IndexOutOfRange(index));
            }
            Ok(index)
        })
        .collect()
}
