//! Account identifiers and signer keys as they appear on the wire.

use lodestar_xdr::{Result as XdrResult, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::crypto::SignatureHint;
use crate::error::{KeyError, Result};
use crate::strkey::{decode_any, decode_check, encode_check, KeyRole};

/// Wire tag for ed25519 public keys; the only key type accounts use.
const PUBLIC_KEY_TYPE_ED25519: i32 = 0;

/// A 32-byte ed25519 public key identifying an account.
///
/// Text form is the `G...` key; wire form is a one-armed union
/// (`0 ‖ 32 bytes`).
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct AccountId([u8; 32]);

impl AccountId {
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Parse `G...` text.
    pub fn from_address(address: &str) -> Result<Self> {
        decode_check(KeyRole::AccountId, address).map(Self)
    }

    pub fn to_address(&self) -> String {
        encode_check(KeyRole::AccountId, &self.0)
    }

    /// Last four bytes of the key, used to tag signatures.
    pub fn hint(&self) -> SignatureHint {
        SignatureHint::from_public_key(&self.0)
    }
}

impl fmt::Debug for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "AccountId({})", self.to_address())
    }
}

impl fmt::Display for AccountId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_address())
    }
}

impl FromStr for AccountId {
    type Err = KeyError;

    fn from_str(s: &str) -> Result<Self> {
        Self::from_address(s)
    }
}

impl From<[u8; 32]> for AccountId {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl AsRef<[u8]> for AccountId {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl Serialize for AccountId {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_address())
    }
}

impl<'de> Deserialize<'de> for AccountId {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        Self::from_address(&text).map_err(serde::de::Error::custom)
    }
}

impl XdrEncode for AccountId {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_i32(PUBLIC_KEY_TYPE_ED25519);
        w.write_fixed_opaque(&self.0);
        Ok(())
    }
}

impl XdrDecode for AccountId {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_i32()? {
            PUBLIC_KEY_TYPE_ED25519 => Ok(Self(r.read_array::<32>()?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "PublicKeyType",
                value,
            }),
        }
    }
}

/// A key that may be attached to an account as an additional signer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SignerKey {
    /// An ed25519 public key.
    Ed25519([u8; 32]),
    /// Hash of a transaction that is authorized in advance.
    PreAuthTx([u8; 32]),
    /// SHA-256 of a preimage whose reveal counts as a signature.
    HashX([u8; 32]),
}

impl SignerKey {
    const ED25519: i32 = 0;
    const PRE_AUTH_TX: i32 = 1;
    const HASH_X: i32 = 2;

    /// Parse `G...`, `T...` or `X...` text. Seeds are rejected.
    pub fn from_strkey(text: &str) -> Result<Self> {
        match decode_any(text)? {
            (KeyRole::AccountId, key) => Ok(Self::Ed25519(key)),
            (KeyRole::PreAuthTx, key) => Ok(Self::PreAuthTx(key)),
            (KeyRole::HashX, key) => Ok(Self::HashX(key)),
            (actual, _) => Err(KeyError::WrongKeyRole {
                expected: KeyRole::AccountId,
                actual,
            }),
        }
    }

    pub fn to_strkey(&self) -> String {
        match self {
            Self::Ed25519(key) => encode_check(KeyRole::AccountId, key),
            Self::PreAuthTx(key) => encode_check(KeyRole::PreAuthTx, key),
            Self::HashX(key) => encode_check(KeyRole::HashX, key),
        }
    }

    pub fn key_bytes(&self) -> &[u8; 32] {
        match self {
            Self::Ed25519(key) | Self::PreAuthTx(key) | Self::HashX(key) => key,
        }
    }
}

impl From<AccountId> for SignerKey {
    fn from(account: AccountId) -> Self {
        Self::Ed25519(*account.as_bytes())
    }
}

impl fmt::Display for SignerKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_strkey())
    }
}

impl XdrEncode for SignerKey {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        let tag = match self {
            Self::Ed25519(_) => Self::ED25519,
            Self::PreAuthTx(_) => Self::PRE_AUTH_TX,
            Self::HashX(_) => Self::HASH_X,
        };
        w.write_i32(tag);
        w.write_fixed_opaque(self.key_bytes());
        Ok(())
    }
}

impl XdrDecode for SignerKey {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_i32()? {
            Self::ED25519 => Ok(Self::Ed25519(r.read_array::<32>()?)),
            Self::PRE_AUTH_TX => Ok(Self::PreAuthTx(r.read_array::<32>()?)),
            Self::HASH_X => Ok(Self::HashX(r.read_array::<32>()?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "SignerKeyType",
                value,
            }),
        }
    }
}
