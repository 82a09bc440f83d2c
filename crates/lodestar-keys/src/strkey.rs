//! Checksummed base-32 key text.
//!
//! Layout before encoding: `version byte ‖ 32-byte payload ‖ CRC16 (LE)`,
//! rendered as unpadded RFC 4648 base32. The version byte fixes the first
//! character of the text (`G`, `S`, `T`, `X`).

use data_encoding::BASE32_NOPAD;
use lodestar_xdr::crc16_xmodem;
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{KeyError, Result};

const PAYLOAD_LEN: usize = 32;
const DECODED_LEN: usize = 1 + PAYLOAD_LEN + 2;

/// What a piece of key text refers to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(u8)]
pub enum KeyRole {
    /// Ed25519 public key (`G...`).
    AccountId = 6 << 3,
    /// Ed25519 secret seed (`S...`).
    Seed = 18 << 3,
    /// Hash of a pre-authorized transaction (`T...`).
    PreAuthTx = 19 << 3,
    /// SHA-256 hash of a signing preimage (`X...`).
    HashX = 23 << 3,
}

impl KeyRole {
    pub const fn version_byte(self) -> u8 {
        self as u8
    }

    pub fn from_version_byte(byte: u8) -> Option<Self> {
        match byte {
            b if b == Self::AccountId as u8 => Some(Self::AccountId),
            b if b == Self::Seed as u8 => Some(Self::Seed),
            b if b == Self::PreAuthTx as u8 => Some(Self::PreAuthTx),
            b if b == Self::HashX as u8 => Some(Self::HashX),
            _ => None,
        }
    }

    /// Leading character of every text key with this role.
    pub const fn prefix(self) -> char {
        match self {
            Self::AccountId => 'G',
            Self::Seed => 'S',
            Self::PreAuthTx => 'T',
            Self::HashX => 'X',
        }
    }
}

impl fmt::Display for KeyRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Self::AccountId => "account id",
            Self::Seed => "secret seed",
            Self::PreAuthTx => "pre-auth tx",
            Self::HashX => "hash-x",
        };
        f.write_str(name)
    }
}

/// Encode a 32-byte payload as text for the given role.
pub fn encode_check(role: KeyRole, payload: &[u8; 32]) -> String {
    let mut raw = Vec::with_capacity(DECODED_LEN);
    raw.push(role.version_byte());
    raw.extend_from_slice(payload);
    let crc = crc16_xmodem(&raw);
    raw.extend_from_slice(&crc.to_le_bytes());
    BASE32_NOPAD.encode(&raw)
}

/// Decode key text of any known role.
///
/// The checksum is verified before the version byte is interpreted, so a
/// corrupted key never reports a role.
pub fn decode_any(text: &str) -> Result<(KeyRole, [u8; 32])> {
    let raw = BASE32_NOPAD
        .decode(text.as_bytes())
        .map_err(|_| KeyError::InvalidEncoding)?;
    if raw.len() != DECODED_LEN {
        return Err(KeyError::InvalidLength {
            expected: DECODED_LEN,
            actual: raw.len(),
        });
    }

    let (body, checksum) = raw.split_at(1 + PAYLOAD_LEN);
    let expected = crc16_xmodem(body);
    if checksum != expected.to_le_bytes() {
        return Err(KeyError::InvalidChecksum);
    }

    let role = KeyRole::from_version_byte(body[0]).ok_or(KeyError::UnknownVersionByte(body[0]))?;
    let mut payload = [0u8; PAYLOAD_LEN];
    payload.copy_from_slice(&body[1..]);
    Ok((role, payload))
}

/// Decode key text that must carry the given role.
pub fn decode_check(expected: KeyRole, text: &str) -> Result<[u8; 32]> {
    let (actual, payload) = decode_any(text)?;
    if actual != expected {
        return Err(KeyError::WrongKeyRole { expected, actual });
    }
    Ok(payload)
}

/// True when `text` decodes cleanly as a key of the given role.
pub fn is_valid(role: KeyRole, text: &str) -> bool {
    decode_check(role, text).is_ok()
}
