//! Append-only encoder.

use num_bigint::{BigInt, Sign};

use crate::codec::{padding_for, XdrEncode};
use crate::error::{Result, XdrError};

/// Accumulates the canonical encoding of a value.
///
/// Scalar writes cannot fail. Writes that carry a length bound return an
/// error before touching the buffer when the bound is violated.
#[derive(Debug, Default, Clone)]
pub struct XdrWriter {
    buf: Vec<u8>,
}

impl XdrWriter {
    /// Create an empty writer.
    pub fn new() -> Self {
        Self { buf: Vec::new() }
    }

    /// Create a writer with preallocated capacity.
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            buf: Vec::with_capacity(capacity),
        }
    }

    /// Number of bytes written so far.
    pub fn len(&self) -> usize {
        self.buf.len()
    }

    /// True if nothing has been written.
    pub fn is_empty(&self) -> bool {
        self.buf.is_empty()
    }

    /// Borrow the encoded bytes.
    pub fn as_bytes(&self) -> &[u8] {
        &self.buf
    }

    /// Consume the writer and return the encoded bytes.
    pub fn into_bytes(self) -> Vec<u8> {
        self.buf
    }

    pub fn write_u32(&mut self, value: u32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i32(&mut self, value: i32) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_u64(&mut self, value: u64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    pub fn write_i64(&mut self, value: i64) {
        self.buf.extend_from_slice(&value.to_be_bytes());
    }

    /// Write a signed 64-bit value held as an arbitrary-precision integer.
    ///
    /// The minimal two's-complement bytes are sign-extended to 8 bytes
    /// (0xff fill for negatives). Values outside the i64 range are rejected.
    pub fn write_bigint_i64(&mut self, value: &BigInt) -> Result<()> {
        let magnitude = value.to_signed_bytes_be();
        if magnitude.len() > 8 {
            return Err(XdrError::IntegerOutOfRange(format!(
                "{} does not fit in a signed 64-bit integer",
                value
            )));
        }

        let fill = if value.sign() == Sign::Minus { 0xff } else { 0x00 };
        let mut out = [fill; 8];
        out[8 - magnitude.len()..].copy_from_slice(&magnitude);
        self.buf.extend_from_slice(&out);
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) {
        self.write_u32(u32::from(value));
    }

    /// Write fixed-length opaque data followed by zero padding to 4 bytes.
    pub fn write_fixed_opaque(&mut self, data: &[u8]) {
        self.buf.extend_from_slice(data);
        self.write_padding(data.len());
    }

    /// Write `data` as a fixed field of `size` bytes: NUL-filled up to
    /// `size`, then aligned to 4 bytes.
    pub fn write_fixed_opaque_padded(&mut self, data: &[u8], size: usize) -> Result<()> {
        if data.len() > size {
            return Err(XdrError::LengthExceeded {
                len: data.len(),
                max: size,
            });
        }
        self.buf.extend_from_slice(data);
        self.buf.resize(self.buf.len() + (size - data.len()), 0);
        self.write_padding(size);
        Ok(())
    }

    /// Write variable-length opaque data: length prefix, bytes, padding.
    pub fn write_var_opaque(&mut self, data: &[u8], max: Option<usize>) -> Result<()> {
        let len = Self::checked_len(data.len(), max)?;
        self.write_u32(len);
        self.write_fixed_opaque(data);
        Ok(())
    }

    /// Write a string; the length prefix counts bytes, not characters.
    pub fn write_string(&mut self, value: &str, max: Option<usize>) -> Result<()> {
        self.write_var_opaque(value.as_bytes(), max)
    }

    /// Write a presence flag followed by the value when present.
    pub fn write_optional<T: XdrEncode + ?Sized>(&mut self, value: Option<&T>) -> Result<()> {
        match value {
            Some(v) => {
                self.write_bool(true);
                v.encode(self)
            }
            None => {
                self.write_bool(false);
                Ok(())
            }
        }
    }

    /// Write a variable-length array: element count, then each element.
    ///
    /// Elements are already aligned, so no padding goes between them. If
    /// an element fails to encode, the buffer is restored to its length
    /// before the call.
    pub fn write_array<T: XdrEncode>(&mut self, items: &[T], max: Option<usize>) -> Result<()> {
        let count = Self::checked_len(items.len(), max)?;
        let start = self.buf.len();
        self.write_u32(count);
        for item in items {
            if let Err(e) = item.encode(self) {
                self.buf.truncate(start);
                return Err(e);
            }
        }
        Ok(())
    }

    fn write_padding(&mut self, len: usize) {
        let pad = padding_for(len);
        self.buf.resize(self.buf.len() + pad, 0);
    }

    fn checked_len(len: usize, max: Option<usize>) -> Result<u32> {
        if let Some(max) = max {
            if len > max {
                return Err(XdrError::LengthExceeded { len, max });
            }
        }
        u32::try_from(len).map_err(|_| XdrError::LengthExceeded {
            len,
            max: u32::MAX as usize,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_integers_big_endian() {
        let mut w = XdrWriter::new();
        w.write_u32(1);
        w.write_i32(-1);
        w.write_u64(0x0102030405060708);
        assert_eq!(
            w.as_bytes(),
            &[0, 0, 0, 1, 0xff, 0xff, 0xff, 0xff, 1, 2, 3, 4, 5, 6, 7, 8]
        );
    }

    #[test]
    fn test_bigint_i64_sign_extension() {
        let cases: [(i64, [u8; 8]); 5] = [
            (0, [0; 8]),
            (1, [0, 0, 0, 0, 0, 0, 0, 1]),
            (-1, [0xff; 8]),
            (i64::MAX, [0x7f, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff, 0xff]),
            (i64::MIN, [0x80, 0, 0, 0, 0, 0, 0, 0]),
        ];

        for (value, expected) in cases {
            let mut w = XdrWriter::new();
            w.write_bigint_i64(&BigInt::from(value)).unwrap();
            assert_eq!(w.as_bytes(), &expected, "encoding of {}", value);

            let mut native = XdrWriter::new();
            native.write_i64(value);
            assert_eq!(w.as_bytes(), native.as_bytes());
        }
    }

    #[test]
    fn test_bigint_i64_out_of_range() {
        let mut w = XdrWriter::new();
        let too_big = BigInt::from(i64::MAX) + BigInt::from(1);
        assert!(matches!(
            w.write_bigint_i64(&too_big),
            Err(XdrError::IntegerOutOfRange(_))
        ));

        let too_small = BigInt::from(i64::MIN) - BigInt::from(1);
        assert!(w.write_bigint_i64(&too_small).is_err());
        assert!(w.is_empty());
    }

    #[test]
    fn test_bool_encoding() {
        let mut w = XdrWriter::new();
        w.write_bool(true);
        w.write_bool(false);
        assert_eq!(w.as_bytes(), &[0, 0, 0, 1, 0, 0, 0, 0]);
    }

    #[test]
    fn test_fixed_opaque_padding() {
        let mut w = XdrWriter::new();
        w.write_fixed_opaque(&[1, 2, 3, 4, 5]);
        assert_eq!(w.as_bytes(), &[1, 2, 3, 4, 5, 0, 0, 0]);
    }

    #[test]
    fn test_fixed_opaque_padded_to_size() {
        let mut w = XdrWriter::new();
        w.write_fixed_opaque_padded(b"USD", 4).unwrap();
        assert_eq!(w.as_bytes(), b"USD\0");

        let mut w = XdrWriter::new();
        w.write_fixed_opaque_padded(b"LONGCODE", 12).unwrap();
        assert_eq!(w.as_bytes(), b"LONGCODE\0\0\0\0");

        let mut w = XdrWriter::new();
        assert!(w.write_fixed_opaque_padded(b"TOOLONG", 4).is_err());
    }

    #[test]
    fn test_var_opaque_prefix_is_unpadded_length() {
        let mut w = XdrWriter::new();
        w.write_var_opaque(&[0xaa, 0xbb, 0xcc], None).unwrap();
        assert_eq!(w.as_bytes(), &[0, 0, 0, 3, 0xaa, 0xbb, 0xcc, 0]);
    }

    #[test]
    fn test_string_max_enforced() {
        let mut w = XdrWriter::new();
        w.write_string("hello", Some(5)).unwrap();
        assert_eq!(w.len(), 12);

        let err = w.write_string("hello!", Some(5)).unwrap_err();
        assert_eq!(err, XdrError::LengthExceeded { len: 6, max: 5 });
        assert_eq!(w.len(), 12, "failed write must not touch the buffer");
    }

    #[test]
    fn test_array_encoding() {
        let mut w = XdrWriter::new();
        w.write_array(&[1u32, 2u32], None).unwrap();
        assert_eq!(w.as_bytes(), &[0, 0, 0, 2, 0, 0, 0, 1, 0, 0, 0, 2]);

        assert!(w.write_array(&[1u32, 2, 3], Some(2)).is_err());
    }

    /// Encodes as a string bounded to four bytes.
    struct Short(&'static str);

    impl XdrEncode for Short {
        fn encode(&self, w: &mut XdrWriter) -> Result<()> {
            w.write_string(self.0, Some(4))
        }
    }

    #[test]
    fn test_array_failure_restores_buffer() {
        let mut w = XdrWriter::new();
        w.write_u32(7);

        let items = [Short("ok"), Short("fine"), Short("too long")];
        assert_eq!(
            w.write_array(&items, None),
            Err(XdrError::LengthExceeded { len: 8, max: 4 })
        );
        assert_eq!(w.as_bytes(), &[0, 0, 0, 7]);

        w.write_array(&items[..2], None).unwrap();
        assert_eq!(w.len(), 4 + 4 + 8 + 8);
    }
}
