//! Network identity: the passphrase that domain-separates signatures.

use lodestar_xdr::Sha256Hash;
use serde::{Deserialize, Serialize};

/// Passphrase of the production network.
pub const PUBLIC_PASSPHRASE: &str = "Public Global Stellar Network ; September 2015";

/// Passphrase of the test network.
pub const TESTNET_PASSPHRASE: &str = "Test SDF Network ; September 2015";

/// A network, identified by its passphrase.
///
/// A signature made for one network never verifies on another because the
/// passphrase hash is the first component of every signing payload.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Network {
    pub passphrase: String,
}

impl Network {
    pub fn public() -> Self {
        Self::custom(PUBLIC_PASSPHRASE)
    }

    pub fn testnet() -> Self {
        Self::custom(TESTNET_PASSPHRASE)
    }

    pub fn custom(passphrase: impl Into<String>) -> Self {
        Self {
            passphrase: passphrase.into(),
        }
    }

    /// `SHA256(passphrase)`.
    pub fn network_id(&self) -> Sha256Hash {
        Sha256Hash::hash(self.passphrase.as_bytes())
    }
}

impl Default for Network {
    fn default() -> Self {
        Self::testnet()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_network_ids_differ() {
        assert_ne!(Network::public().network_id(), Network::testnet().network_id());
    }

    #[test]
    fn test_public_network_id() {
        assert_eq!(
            Network::public().network_id().to_hex(),
            "7ac33997544e3175d266bd022439b22cdb16508c01163f26e5cb2a3e1045a979"
        );
    }
}
