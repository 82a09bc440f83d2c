//! Bounds-checked decode cursor.

use num_bigint::BigInt;

use crate::codec::{padding_for, XdrDecode};
use crate::error::{Result, XdrError};

/// A read cursor over encoded bytes.
///
/// Every read checks that enough input remains before touching it, so a
/// truncated or hostile buffer fails with [`XdrError::UnexpectedEof`]
/// instead of panicking.
#[derive(Debug, Clone)]
pub struct XdrReader<'a> {
    data: &'a [u8],
    pos: usize,
}

impl<'a> XdrReader<'a> {
    /// Start reading at the beginning of `data`.
    pub fn new(data: &'a [u8]) -> Self {
        Self { data, pos: 0 }
    }

    /// Current offset into the input.
    pub fn position(&self) -> usize {
        self.pos
    }

    /// Bytes not yet consumed.
    pub fn remaining(&self) -> usize {
        self.data.len() - self.pos
    }

    /// True once every byte has been consumed.
    pub fn is_empty(&self) -> bool {
        self.remaining() == 0
    }

    /// Fail if any input is left over.
    pub fn finish(&self) -> Result<()> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(XdrError::InvalidValue(format!(
                "{} trailing bytes after value",
                self.remaining()
            )))
        }
    }

    fn take(&mut self, n: usize) -> Result<&'a [u8]> {
        if n > self.remaining() {
            return Err(XdrError::UnexpectedEof {
                needed: n,
                remaining: self.remaining(),
            });
        }
        let slice = &self.data[self.pos..self.pos + n];
        self.pos += n;
        Ok(slice)
    }

    fn skip_padding(&mut self, len: usize) -> Result<()> {
        self.take(padding_for(len)).map(|_| ())
    }

    pub fn read_u32(&mut self) -> Result<u32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(u32::from_be_bytes(buf))
    }

    pub fn read_i32(&mut self) -> Result<i32> {
        let mut buf = [0u8; 4];
        buf.copy_from_slice(self.take(4)?);
        Ok(i32::from_be_bytes(buf))
    }

    pub fn read_u64(&mut self) -> Result<u64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(u64::from_be_bytes(buf))
    }

    pub fn read_i64(&mut self) -> Result<i64> {
        let mut buf = [0u8; 8];
        buf.copy_from_slice(self.take(8)?);
        Ok(i64::from_be_bytes(buf))
    }

    /// Read a signed 64-bit value into an arbitrary-precision integer.
    pub fn read_bigint_i64(&mut self) -> Result<BigInt> {
        Ok(BigInt::from_signed_bytes_be(self.take(8)?))
    }

    /// Read a boolean; anything other than 0 or 1 is an error.
    pub fn read_bool(&mut self) -> Result<bool> {
        match self.read_u32()? {
            0 => Ok(false),
            1 => Ok(true),
            other => Err(XdrError::InvalidBool(other)),
        }
    }

    /// Read `size` bytes of fixed opaque data and its padding.
    pub fn read_fixed_opaque(&mut self, size: usize) -> Result<Vec<u8>> {
        let bytes = self.take(size)?.to_vec();
        self.skip_padding(size)?;
        Ok(bytes)
    }

    /// Read a fixed-size byte array and its padding.
    pub fn read_array<const N: usize>(&mut self) -> Result<[u8; N]> {
        let mut out = [0u8; N];
        out.copy_from_slice(self.take(N)?);
        self.skip_padding(N)?;
        Ok(out)
    }

    /// Read a fixed-size text field, dropping trailing NUL fill.
    pub fn read_fixed_string(&mut self, size: usize) -> Result<String> {
        let mut bytes = self.read_fixed_opaque(size)?;
        while bytes.last() == Some(&0) {
            bytes.pop();
        }
        String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8)
    }

    /// Read variable-length opaque data, enforcing `max` when given.
    pub fn read_var_opaque(&mut self, max: Option<usize>) -> Result<Vec<u8>> {
        let len = self.read_u32()? as usize;
        if let Some(max) = max {
            if len > max {
                return Err(XdrError::LengthExceeded { len, max });
            }
        }
        self.read_fixed_opaque(len)
    }

    /// Read a length-prefixed UTF-8 string.
    pub fn read_string(&mut self, max: Option<usize>) -> Result<String> {
        let bytes = self.read_var_opaque(max)?;
        String::from_utf8(bytes).map_err(|_| XdrError::InvalidUtf8)
    }

    /// Read a presence flag and the value when present.
    pub fn read_optional<T: XdrDecode>(&mut self) -> Result<Option<T>> {
        if self.read_bool()? {
            Ok(Some(T::decode(self)?))
        } else {
            Ok(None)
        }
    }

    /// Read a counted array of values.
    pub fn read_vec<T: XdrDecode>(&mut self, max: Option<usize>) -> Result<Vec<T>> {
        let count = self.read_u32()? as usize;
        if let Some(max) = max {
            if count > max {
                return Err(XdrError::LengthExceeded { len: count, max });
            }
        }

        // Every element is at least 4 bytes, which bounds a hostile count.
        let mut items = Vec::with_capacity(count.min(self.remaining() / 4));
        for _ in 0..count {
            items.push(T::decode(self)?);
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::writer::XdrWriter;

    #[test]
    fn test_truncated_input() {
        let mut r = XdrReader::new(&[0, 0, 1]);
        assert_eq!(
            r.read_u32(),
            Err(XdrError::UnexpectedEof {
                needed: 4,
                remaining: 3
            })
        );
    }

    #[test]
    fn test_invalid_bool() {
        let mut r = XdrReader::new(&[0, 0, 0, 2]);
        assert_eq!(r.read_bool(), Err(XdrError::InvalidBool(2)));
    }

    #[test]
    fn test_bigint_i64_min_roundtrip() {
        let mut w = XdrWriter::new();
        w.write_i64(i64::MIN);
        let bytes = w.into_bytes();

        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_bigint_i64().unwrap(), BigInt::from(i64::MIN));
        assert!(r.is_empty());
    }

    #[test]
    fn test_var_opaque_consumes_padding() {
        let bytes = [0, 0, 0, 3, 0xaa, 0xbb, 0xcc, 0, 0, 0, 0, 9];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_var_opaque(None).unwrap(), vec![0xaa, 0xbb, 0xcc]);
        assert_eq!(r.position(), 8);
        assert_eq!(r.read_u32().unwrap(), 9);
    }

    #[test]
    fn test_var_opaque_max_is_hard_error() {
        let bytes = [0, 0, 0, 5, 1, 2, 3, 4, 5, 0, 0, 0];
        let mut r = XdrReader::new(&bytes);
        assert_eq!(
            r.read_var_opaque(Some(4)),
            Err(XdrError::LengthExceeded { len: 5, max: 4 })
        );
    }

    #[test]
    fn test_declared_length_beyond_input() {
        let bytes = [0, 0, 0, 64, 1, 2];
        let mut r = XdrReader::new(&bytes);
        assert!(matches!(
            r.read_var_opaque(None),
            Err(XdrError::UnexpectedEof { needed: 64, .. })
        ));
    }

    #[test]
    fn test_fixed_string_strips_nul() {
        let mut r = XdrReader::new(b"USD\0");
        assert_eq!(r.read_fixed_string(4).unwrap(), "USD");

        let mut r = XdrReader::new(b"ABCDEFGH\0\0\0\0");
        assert_eq!(r.read_fixed_string(12).unwrap(), "ABCDEFGH");
    }

    #[test]
    fn test_hostile_array_count() {
        // Claims u32::MAX elements but holds only one.
        let bytes = [0xff, 0xff, 0xff, 0xff, 0, 0, 0, 1];
        let mut r = XdrReader::new(&bytes);
        assert!(matches!(
            r.read_vec::<u32>(None),
            Err(XdrError::UnexpectedEof { .. })
        ));
    }

    #[test]
    fn test_string_roundtrip() {
        let mut w = XdrWriter::new();
        w.write_string("lodestar", Some(32)).unwrap();
        let bytes = w.into_bytes();

        let mut r = XdrReader::new(&bytes);
        assert_eq!(r.read_string(Some(32)).unwrap(), "lodestar");
        r.finish().unwrap();
    }

    mod props {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn var_opaque_roundtrip(data in prop::collection::vec(any::<u8>(), 0..200)) {
                let mut w = XdrWriter::new();
                w.write_var_opaque(&data, None).unwrap();
                let bytes = w.into_bytes();
                prop_assert_eq!(bytes.len() % 4, 0);

                let mut r = XdrReader::new(&bytes);
                prop_assert_eq!(r.read_var_opaque(None).unwrap(), data);
                prop_assert!(r.is_empty());
            }

            #[test]
            fn i64_paths_agree(value in any::<i64>()) {
                let mut w = XdrWriter::new();
                w.write_bigint_i64(&BigInt::from(value)).unwrap();
                let bytes = w.into_bytes();

                let mut r = XdrReader::new(&bytes);
                prop_assert_eq!(r.read_i64().unwrap(), value);

                let mut r = XdrReader::new(&bytes);
                prop_assert_eq!(r.read_bigint_i64().unwrap(), BigInt::from(value));
            }

            #[test]
            fn truncation_never_panics(data in prop::collection::vec(any::<u8>(), 0..64), cut in 0usize..64) {
                let mut w = XdrWriter::new();
                w.write_var_opaque(&data, None).unwrap();
                let bytes = w.into_bytes();
                let cut = cut.min(bytes.len());

                let mut r = XdrReader::new(&bytes[..cut]);
                let result = r.read_var_opaque(None);
                if cut < bytes.len() {
                    prop_assert!(result.is_err());
                }
            }
        }
    }
}
