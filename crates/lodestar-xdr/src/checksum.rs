//! Checksums and hashes: CRC16 for key text, SHA-256 for transactions.

use sha2::{Digest, Sha256};
use std::fmt;

use crate::codec::{XdrDecode, XdrEncode};
use crate::error::Result;
use crate::reader::XdrReader;
use crate::writer::XdrWriter;

/// CRC-16/XMODEM: polynomial 0x1021, initial register 0x0000, no reflection.
pub fn crc16_xmodem(data: &[u8]) -> u16 {
    let mut crc: u16 = 0;
    for byte in data {
        crc ^= (*byte as u16) << 8;
        for _ in 0..8 {
            if crc & 0x8000 != 0 {
                crc = (crc << 1) ^ 0x1021;
            } else {
                crc <<= 1;
            }
        }
    }
    crc
}

/// A 32-byte SHA-256 hash.
#[derive(Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct Sha256Hash(pub [u8; 32]);

impl Sha256Hash {
    /// Compute the SHA-256 hash of data.
    pub fn hash(data: &[u8]) -> Self {
        let mut hasher = Sha256::new();
        hasher.update(data);
        Self(hasher.finalize().into())
    }

    /// Hash the concatenation of several slices without joining them first.
    pub fn hash_parts(parts: &[&[u8]]) -> Self {
        let mut hasher = Sha256::new();
        for part in parts {
            hasher.update(part);
        }
        Self(hasher.finalize().into())
    }

    /// Create from raw bytes.
    pub const fn from_bytes(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }

    /// Get raw bytes.
    pub const fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    /// Convert to hex string.
    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// The zero hash.
    pub const ZERO: Self = Self([0u8; 32]);
}

impl fmt::Debug for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "SHA256({}...)", &self.to_hex()[..8])
    }
}

impl fmt::Display for Sha256Hash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.to_hex())
    }
}

impl AsRef<[u8]> for Sha256Hash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 32]> for Sha256Hash {
    fn from(bytes: [u8; 32]) -> Self {
        Self(bytes)
    }
}

impl XdrEncode for Sha256Hash {
    fn encode(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_fixed_opaque(&self.0);
        Ok(())
    }
}

impl XdrDecode for Sha256Hash {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self> {
        Ok(Self(r.read_array::<32>()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_crc16_check_value() {
        // Standard CRC-16/XMODEM check value
        assert_eq!(crc16_xmodem(b"123456789"), 0x31c3);
        assert_eq!(crc16_xmodem(b""), 0x0000);
    }

    #[test]
    fn test_sha256_known_vector() {
        let h = Sha256Hash::hash(b"abc");
        assert_eq!(
            h.to_hex(),
            "ba7816bf8f01cfea414140de5dae2223b00361a396177a9cb410ff61f20015ad"
        );
    }

    #[test]
    fn test_hash_parts_matches_concatenation() {
        let joined = Sha256Hash::hash(b"helloworld");
        let parts = Sha256Hash::hash_parts(&[b"hello", b"world"]);
        assert_eq!(joined, parts);
    }

    #[test]
    fn test_hash_xdr_is_raw_32_bytes() {
        let h = Sha256Hash::from_bytes([0xab; 32]);
        let bytes = h.to_xdr().unwrap();
        assert_eq!(bytes, vec![0xab; 32]);
        assert_eq!(Sha256Hash::from_xdr(&bytes).unwrap(), h);
    }
}
