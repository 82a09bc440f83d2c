//! Assets: the native asset or a code issued by an account.

use lodestar_keys::AccountId;
use lodestar_xdr::{Result as XdrResult, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};
use serde::{Deserialize, Serialize};
use std::fmt;

use crate::error::{Result, TxError};

const ASSET_TYPE_NATIVE: i32 = 0;
const ASSET_TYPE_ALPHANUM4: i32 = 1;
const ASSET_TYPE_ALPHANUM12: i32 = 2;

const SHORT_CODE_LEN: usize = 4;
const LONG_CODE_LEN: usize = 12;

/// An asset. Codes of 1–4 characters are `AlphaNum4`, 5–12 `AlphaNum12`.
///
/// Deserialized assets go through [`Asset::new`]'s code checks.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "AssetRepr", into = "AssetRepr")]
pub enum Asset {
    Native,
    AlphaNum4 { code: String, issuer: AccountId },
    AlphaNum12 { code: String, issuer: AccountId },
}

impl Asset {
    pub fn native() -> Self {
        Self::Native
    }

    /// An issued asset; the code length picks the variant.
    pub fn new(code: &str, issuer: AccountId) -> Result<Self> {
        validate_code(code)?;
        let code = code.to_string();
        if code.len() <= SHORT_CODE_LEN {
            Ok(Self::AlphaNum4 { code, issuer })
        } else {
            Ok(Self::AlphaNum12 { code, issuer })
        }
    }

    pub fn is_native(&self) -> bool {
        matches!(self, Self::Native)
    }

    pub fn code(&self) -> Option<&str> {
        match self {
            Self::Native => None,
            Self::AlphaNum4 { code, .. } | Self::AlphaNum12 { code, .. } => Some(code),
        }
    }

    pub fn issuer(&self) -> Option<&AccountId> {
        match self {
            Self::Native => None,
            Self::AlphaNum4 { issuer, .. } | Self::AlphaNum12 { issuer, .. } => Some(issuer),
        }
    }
}

impl fmt::Display for Asset {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Native => f.write_str("native"),
            Self::AlphaNum4 { code, issuer } | Self::AlphaNum12 { code, issuer } => {
                write!(f, "{code}:{issuer}")
            }
        }
    }
}

#[derive(Clone, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
enum AssetRepr {
    Native,
    AlphaNum4 { code: String, issuer: AccountId },
    AlphaNum12 { code: String, issuer: AccountId },
}

impl TryFrom<AssetRepr> for Asset {
    type Error = TxError;

    fn try_from(repr: AssetRepr) -> Result<Self> {
        match repr {
            AssetRepr::Native => Ok(Self::Native),
            AssetRepr::AlphaNum4 { code, issuer } | AssetRepr::AlphaNum12 { code, issuer } => {
                Self::new(&code, issuer)
            }
        }
    }
}

impl From<Asset> for AssetRepr {
    fn from(asset: Asset) -> Self {
        match asset {
            Asset::Native => Self::Native,
            Asset::AlphaNum4 { code, issuer } => Self::AlphaNum4 { code, issuer },
            Asset::AlphaNum12 { code, issuer } => Self::AlphaNum12 { code, issuer },
        }
    }
}

fn validate_code(code: &str) -> Result<()> {
    if code.is_empty()
        || code.len() > LONG_CODE_LEN
        || !code.bytes().all(|b| b.is_ascii_alphanumeric())
    {
        return Err(TxError::InvalidAssetCode(code.to_string()));
    }
    Ok(())
}

/// Encode-time check: a valid code that fits the variant's field.
fn check_encoded_code(code: &str, width: usize) -> XdrResult<()> {
    if validate_code(code).is_err() || code.len() > width {
        return Err(XdrError::InvalidValue(format!("invalid asset code {code:?}")));
    }
    Ok(())
}

impl XdrEncode for Asset {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            Self::Native => w.write_i32(ASSET_TYPE_NATIVE),
            Self::AlphaNum4 { code, issuer } => {
                check_encoded_code(code, SHORT_CODE_LEN)?;
                w.write_i32(ASSET_TYPE_ALPHANUM4);
                w.write_fixed_opaque_padded(code.as_bytes(), SHORT_CODE_LEN)?;
                issuer.encode(w)?;
            }
            Self::AlphaNum12 { code, issuer } => {
                check_encoded_code(code, LONG_CODE_LEN)?;
                w.write_i32(ASSET_TYPE_ALPHANUM12);
                w.write_fixed_opaque_padded(code.as_bytes(), LONG_CODE_LEN)?;
                issuer.encode(w)?;
            }
        }
        Ok(())
    }
}

impl XdrDecode for Asset {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_i32()? {
            ASSET_TYPE_NATIVE => Ok(Self::Native),
            ASSET_TYPE_ALPHANUM4 => Ok(Self::AlphaNum4 {
                code: r.read_fixed_string(SHORT_CODE_LEN)?,
                issuer: AccountId::decode(r)?,
            }),
            ASSET_TYPE_ALPHANUM12 => Ok(Self::AlphaNum12 {
                code: r.read_fixed_string(LONG_CODE_LEN)?,
                issuer: AccountId::decode(r)?,
            }),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "AssetType",
                value,
            }),
        }
    }
}

/// Issuer-less asset code, as named by an allow-trust operation.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum AssetCode {
    AlphaNum4(String),
    AlphaNum12(String),
}

impl AssetCode {
    pub fn new(code: &str) -> Result<Self> {
        validate_code(code)?;
        if code.len() <= SHORT_CODE_LEN {
            Ok(Self::AlphaNum4(code.to_string()))
        } else {
            Ok(Self::AlphaNum12(code.to_string()))
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Self::AlphaNum4(code) | Self::AlphaNum12(code) => code,
        }
    }
}

impl TryFrom<String> for AssetCode {
    type Error = TxError;

    fn try_from(code: String) -> Result<Self> {
        Self::new(&code)
    }
}

impl From<AssetCode> for String {
    fn from(code: AssetCode) -> Self {
        match code {
            AssetCode::AlphaNum4(code) | AssetCode::AlphaNum12(code) => code,
        }
    }
}

impl XdrEncode for AssetCode {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        match self {
            Self::AlphaNum4(code) => {
                check_encoded_code(code, SHORT_CODE_LEN)?;
                w.write_i32(ASSET_TYPE_ALPHANUM4);
                w.write_fixed_opaque_padded(code.as_bytes(), SHORT_CODE_LEN)
            }
            Self::AlphaNum12(code) => {
                check_encoded_code(code, LONG_CODE_LEN)?;
                w.write_i32(ASSET_TYPE_ALPHANUM12);
                w.write_fixed_opaque_padded(code.as_bytes(), LONG_CODE_LEN)
            }
        }
    }
}

impl XdrDecode for AssetCode {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_i32()? {
            ASSET_TYPE_ALPHANUM4 => Ok(Self::AlphaNum4(r.read_fixed_string(SHORT_CODE_LEN)?)),
            ASSET_TYPE_ALPHANUM12 => Ok(Self::AlphaNum12(r.read_fixed_string(LONG_CODE_LEN)?)),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "AllowTrustAssetType",
                value,
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn issuer() -> AccountId {
        AccountId::from_bytes([0x11; 32])
    }

    #[test]
    fn test_code_length_selects_variant() {
        assert!(matches!(
            Asset::new("USD", issuer()).unwrap(),
            Asset::AlphaNum4 { .. }
        ));
        assert!(matches!(
            Asset::new("ABCD", issuer()).unwrap(),
            Asset::AlphaNum4 { .. }
        ));
        assert!(matches!(
            Asset::new("ABCDE", issuer()).unwrap(),
            Asset::AlphaNum12 { .. }
        ));
        assert!(matches!(
            Asset::new("ABCDEFGHIJKL", issuer()).unwrap(),
            Asset::AlphaNum12 { .. }
        ));
    }

    #[test]
    fn test_invalid_codes() {
        for code in ["", "ABCDEFGHIJKLM", "US D", "US$"] {
            assert!(
                matches!(Asset::new(code, issuer()), Err(TxError::InvalidAssetCode(_))),
                "{code:?}"
            );
        }
    }

    #[test]
    fn test_native_wire_form() {
        assert_eq!(Asset::Native.to_xdr().unwrap(), vec![0, 0, 0, 0]);
        assert!(Asset::Native.issuer().is_none());
    }

    #[test]
    fn test_alphanum_wire_forms() {
        let short = Asset::new("USD", issuer()).unwrap();
        let bytes = short.to_xdr().unwrap();
        assert_eq!(bytes.len(), 4 + 4 + 36);
        assert_eq!(&bytes[4..8], b"USD\0");
        assert_eq!(Asset::from_xdr(&bytes).unwrap(), short);

        let long = Asset::new("LONGCODE", issuer()).unwrap();
        let bytes = long.to_xdr().unwrap();
        assert_eq!(bytes.len(), 4 + 12 + 36);
        assert_eq!(&bytes[4..16], b"LONGCODE\0\0\0\0");
        assert_eq!(Asset::from_xdr(&bytes).unwrap(), long);
        assert_eq!(long.code(), Some("LONGCODE"));
    }

    #[test]
    fn test_unknown_asset_type() {
        assert!(matches!(
            Asset::from_xdr(&[0, 0, 0, 9]),
            Err(XdrError::UnknownDiscriminant { value: 9, .. })
        ));
    }

    #[test]
    fn test_asset_code_union() {
        let code = AssetCode::new("EUR").unwrap();
        let bytes = code.to_xdr().unwrap();
        assert_eq!(bytes, vec![0, 0, 0, 1, b'E', b'U', b'R', 0]);
        assert_eq!(AssetCode::from_xdr(&bytes).unwrap(), code);
        assert!(AssetCode::from_xdr(&[0, 0, 0, 0]).is_err());
    }

    #[test]
    fn test_malformed_codes_never_encode() {
        for code in ["", "a-b!"] {
            let asset = Asset::AlphaNum4 {
                code: code.to_string(),
                issuer: issuer(),
            };
            assert!(
                matches!(asset.to_xdr(), Err(XdrError::InvalidValue(_))),
                "{code:?}"
            );
            assert!(AssetCode::AlphaNum4(code.to_string()).to_xdr().is_err());
        }

        let overlong = Asset::AlphaNum4 {
            code: "TOOLONG".to_string(),
            issuer: issuer(),
        };
        assert!(overlong.to_xdr().is_err());
    }

    #[test]
    fn test_deserialize_validates_code() {
        let address = issuer().to_address();
        for code in ["", "a-b!"] {
            let json = format!(r#"{{"type":"alpha_num4","code":"{code}","issuer":"{address}"}}"#);
            assert!(serde_json::from_str::<Asset>(&json).is_err(), "{code:?}");
            assert!(serde_json::from_str::<AssetCode>(&format!("\"{code}\"")).is_err());
        }

        let json = format!(r#"{{"type":"alpha_num4","code":"USD","issuer":"{address}"}}"#);
        let asset: Asset = serde_json::from_str(&json).unwrap();
        assert_eq!(asset, Asset::new("USD", issuer()).unwrap());
        assert_eq!(serde_json::to_string(&asset).unwrap(), json);

        // The code length picks the variant, whatever tag the input used.
        let json = format!(r#"{{"type":"alpha_num12","code":"USD","issuer":"{address}"}}"#);
        assert!(matches!(
            serde_json::from_str::<Asset>(&json).unwrap(),
            Asset::AlphaNum4 { .. }
        ));

        let native: Asset = serde_json::from_str(r#"{"type":"native"}"#).unwrap();
        assert_eq!(native, Asset::Native);

        let code: AssetCode = serde_json::from_str("\"LONGCODE\"").unwrap();
        assert_eq!(code, AssetCode::new("LONGCODE").unwrap());
    }
}
