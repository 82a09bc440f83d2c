//! Encode/decode traits shared by every wire type.

use base64::engine::general_purpose::{STANDARD, STANDARD_NO_PAD};
use base64::Engine as _;

use crate::error::{Result, XdrError};
use crate::reader::XdrReader;
use crate::writer::XdrWriter;

/// A value with a canonical wire encoding.
pub trait XdrEncode {
    /// Append this value's encoding to the writer.
    fn encode(&self, w: &mut XdrWriter) -> Result<()>;

    /// Encode to a fresh byte vector.
    fn to_xdr(&self) -> Result<Vec<u8>> {
        let mut w = XdrWriter::new();
        self.encode(&mut w)?;
        Ok(w.into_bytes())
    }

    /// Encode to standard base64 (the text form used by transports).
    fn to_xdr_base64(&self) -> Result<String> {
        Ok(encode_base64(&self.to_xdr()?))
    }
}

/// A value that can be parsed from its wire encoding.
pub trait XdrDecode: Sized {
    /// Read one value from the cursor.
    fn decode(r: &mut XdrReader<'_>) -> Result<Self>;

    /// Decode from the start of `bytes`.
    ///
    /// Trailing bytes after the value are ignored; use [`XdrDecode::from_xdr_exact`]
    /// when the input must contain exactly one value.
    fn from_xdr(bytes: &[u8]) -> Result<Self> {
        let mut r = XdrReader::new(bytes);
        Self::decode(&mut r)
    }

    /// Decode and require that every input byte was consumed.
    fn from_xdr_exact(bytes: &[u8]) -> Result<Self> {
        let mut r = XdrReader::new(bytes);
        let value = Self::decode(&mut r)?;
        r.finish()?;
        Ok(value)
    }

    /// Decode from base64 text.
    fn from_xdr_base64(text: &str) -> Result<Self> {
        Self::from_xdr(&decode_base64(text)?)
    }
}

/// Number of zero bytes needed to align `len` to a 4-byte boundary.
pub const fn padding_for(len: usize) -> usize {
    (4 - (len % 4)) % 4
}

/// Encode bytes as standard, padded base64.
pub fn encode_base64(bytes: &[u8]) -> String {
    STANDARD.encode(bytes)
}

/// Decode base64, tolerating missing or surplus trailing `=` padding.
///
/// Some gateways append a stray `=` to otherwise aligned payloads, so the
/// padding is stripped and the remainder decoded without it.
pub fn decode_base64(text: &str) -> Result<Vec<u8>> {
    let trimmed = text.trim().trim_end_matches('=');
    STANDARD_NO_PAD
        .decode(trimmed)
        .map_err(|e| XdrError::Base64(e.to_string()))
}

impl XdrEncode for u32 {
    fn encode(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_u32(*self);
        Ok(())
    }
}

impl XdrDecode for u32 {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self> {
        r.read_u32()
    }
}

impl XdrEncode for i32 {
    fn encode(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i32(*self);
        Ok(())
    }
}

impl XdrDecode for i32 {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self> {
        r.read_i32()
    }
}

impl XdrEncode for u64 {
    fn encode(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_u64(*self);
        Ok(())
    }
}

impl XdrDecode for u64 {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self> {
        r.read_u64()
    }
}

impl XdrEncode for i64 {
    fn encode(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_i64(*self);
        Ok(())
    }
}

impl XdrDecode for i64 {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self> {
        r.read_i64()
    }
}

impl XdrEncode for bool {
    fn encode(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_bool(*self);
        Ok(())
    }
}

impl XdrDecode for bool {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self> {
        r.read_bool()
    }
}

impl<T: XdrEncode> XdrEncode for Option<T> {
    fn encode(&self, w: &mut XdrWriter) -> Result<()> {
        w.write_optional(self.as_ref())
    }
}

impl<T: XdrDecode> XdrDecode for Option<T> {
    fn decode(r: &mut XdrReader<'_>) -> Result<Self> {
        r.read_optional()
    }
}
