//! Transaction memos.

use lodestar_xdr::{Result as XdrResult, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};

use crate::error::{Result, TxError};

/// Longest text memo, in bytes.
pub const MAX_MEMO_TEXT_LEN: usize = 28;

/// A memo attached to a transaction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub enum Memo {
    #[default]
    None,
    Text(String),
    Id(u64),
    Hash([u8; 32]),
    Return([u8; 32]),
}

impl Memo {
    const NONE: i32 = 0;
    const TEXT: i32 = 1;
    const ID: i32 = 2;
    const HASH: i32 = 3;
    const RETURN: i32 = 4;

    /// A text memo of at most 28 bytes.
    pub fn text(text: impl Into<String>) -> Result<Self> {
        let text = text.into();
        if text.len() > MAX_MEMO_TEXT_LEN {
            return Err(TxError::ValueTooLong {
                field: "memo text",
                len: text.len(),
                max: MAX_MEMO_TEXT_LEN,
            });
        }
        Ok(Self::Text(text))
    }

    pub fn id(id: u64) -> Self {
        Self::Id(id)
    }

    pub fn hash(hash: [u8; 32]) -> Self {
        Self::Hash(hash)
    }

    pub fn return_hash(hash: [u8; 32]) -> Self {
        Self::Return(hash)
    }

    pub fn is_none(&self) -> bool {
        matches!(self, Self::None)
    }
}

impl XdrEncode for Memo {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            Self::None => w.write_i32(Self::NONE),
            Self::Text(text) => {
                w.write_i32(Self::TEXT);
                w.write_string(text, Some(MAX_MEMO_TEXT_LEN))?;
            }
            Self::Id(id) => {
                w.write_i32(Self::ID);
                w.write_u64(*id);
            }
            Self::Hash(hash) => {
                w.write_i32(Self::HASH);
                w.write_fixed_opaque(hash);
            }
            Self::Return(hash) => {
                w.write_i32(Self::RETURN);
                w.write_fixed_opaque(hash);
            }
        }
        Ok(())
    }
}

impl XdrDecode for Memo {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_i32()? {
            Self::NONE => Ok(Self::None),
            Self::TEXT => Ok(Self::Text(r.read_string(Some(MAX_MEMO_TEXT_LEN))?)),
            Self::ID => Ok(Self::Id(r.read_u64()?)),
            Self::HASH => Ok(Self::Hash(r.read_array::<32>()?)),
            Self::RETURN => Ok(Self::Return(r.read_array::<32>()?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "MemoType",
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_variants_roundtrip() {
        let memos = [
            Memo::None,
            Memo::text("hello").unwrap(),
            Memo::id(u64::MAX),
            Memo::hash([7u8; 32]),
            Memo::return_hash([8u8; 32]),
        ];
        for memo in memos {
            let bytes = memo.to_xdr().unwrap();
            assert_eq!(bytes.len() % 4, 0);
            assert_eq!(Memo::from_xdr(&bytes).unwrap(), memo);
        }
    }

    #[test]
    fn test_text_limit_counts_bytes() {
        assert!(Memo::text("a".repeat(28)).is_ok());
        assert!(matches!(
            Memo::text("a".repeat(29)),
            Err(TxError::ValueTooLong { len: 29, max: 28, .. })
        ));
        // 10 three-byte characters
        assert!(Memo::text("€".repeat(10)).is_err());
    }

    #[test]
    fn test_text_wire_form() {
        let bytes = Memo::text("hi").unwrap().to_xdr().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 1, 0, 0, 0, 2, b'h', b'i', 0, 0]);
    }

    #[test]
    fn test_decode_rejects_long_text() {
        let mut w = XdrWriter::new();
        w.write_i32(1);
        w.write_string(&"x".repeat(29), None).unwrap();
        assert!(matches!(
            Memo::from_xdr(w.as_bytes()),
            Err(XdrError::LengthExceeded { len: 29, max: 28 })
        ));
    }
}
