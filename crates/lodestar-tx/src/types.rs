//! Scalar domain values: amounts, prices, time bounds, sequence numbers.

use lodestar_xdr::{Result as XdrResult, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};
use num_bigint::{BigInt, BigUint, Sign};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::str::FromStr;

use crate::error::{Result, TxError};

/// Stroops per whole unit.
pub const STROOPS_PER_UNIT: i64 = 10_000_000;

const FRACTION_DIGITS: usize = 7;

// ───────────────────────────────────────────────────────────────────────────
// Amount
// ───────────────────────────────────────────────────────────────────────────

/// A non-negative count of stroops (1 unit = 10,000,000 stroops).
///
/// Text form is a decimal with up to seven fractional digits, e.g.
/// `"922337203685.4775807"` for [`Amount::MAX`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Default)]
pub struct Amount(i64);

impl Amount {
    pub const ZERO: Self = Self(0);
    pub const MAX: Self = Self(i64::MAX);

    pub fn from_stroops(stroops: i64) -> Result<Self> {
        if stroops < 0 {
            return Err(TxError::InvalidAmount(format!("{stroops} stroops is negative")));
        }
        Ok(Self(stroops))
    }

    /// Whole units, checked against the range.
    pub fn from_units(units: i64) -> Result<Self> {
        units
            .checked_mul(STROOPS_PER_UNIT)
            .ok_or_else(|| TxError::InvalidAmount(format!("{units} units overflows")))
            .and_then(Self::from_stroops)
    }

    pub const fn stroops(self) -> i64 {
        self.0
    }
}

impl FromStr for Amount {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        let invalid = || TxError::InvalidAmount(s.to_string());

        let (whole, fraction) = match s.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        if whole.is_empty()
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        // Digits past the seventh are only accepted when they are zeros.
        let significant = fraction.trim_end_matches('0');
        if significant.len() > FRACTION_DIGITS {
            return Err(TxError::InvalidAmount(format!(
                "{s} has more than {FRACTION_DIGITS} fractional digits"
            )));
        }
        let scaled_fraction = format!("{significant:0<width$}", width = FRACTION_DIGITS);

        let whole = BigInt::parse_bytes(whole.as_bytes(), 10).ok_or_else(invalid)?;
        let fraction = BigInt::parse_bytes(scaled_fraction.as_bytes(), 10).ok_or_else(invalid)?;
        let stroops = whole * BigInt::from(STROOPS_PER_UNIT) + fraction;

        i64::try_from(&stroops)
            .map(Self)
            .map_err(|_| TxError::InvalidAmount(format!("{s} exceeds the maximum amount")))
    }
}

impl fmt::Display for Amount {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}.{:07}",
            self.0 / STROOPS_PER_UNIT,
            self.0 % STROOPS_PER_UNIT
        )
    }
}

impl Serialize for Amount {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for Amount {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl XdrEncode for Amount {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_i64(self.0);
        Ok(())
    }
}

impl XdrDecode for Amount {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let stroops = r.read_i64()?;
        if stroops < 0 {
            return Err(XdrError::InvalidValue(format!("negative amount {stroops}")));
        }
        Ok(Self(stroops))
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Price
// ───────────────────────────────────────────────────────────────────────────

/// Price of the selling asset in units of the buying asset, as `n / d`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Price {
    pub n: u32,
    pub d: u32,
}

const MAX_PRICE_FRACTION_DIGITS: usize = 30;

impl Price {
    pub const fn new(n: u32, d: u32) -> Self {
        Self { n, d }
    }

    /// Exact fraction for a decimal such as `"1.25"` (→ 5/4).
    ///
    /// The fraction is reduced; either side exceeding `i32::MAX` after
    /// reduction is an error.
    pub fn from_decimal_str(s: &str) -> Result<Self> {
        let invalid = || TxError::InvalidPrice(s.to_string());

        let (whole, fraction) = match s.split_once('.') {
            Some((_, "")) => return Err(invalid()),
            Some((whole, fraction)) => (whole, fraction),
            None => (s, ""),
        };
        if whole.is_empty()
            || !whole.bytes().all(|b| b.is_ascii_digit())
            || !fraction.bytes().all(|b| b.is_ascii_digit())
        {
            return Err(invalid());
        }

        // A reduced denominator for k significant fractional digits is at
        // least 2^k, so anything past 30 digits can never fit.
        let fraction = fraction.trim_end_matches('0');
        if fraction.len() > MAX_PRICE_FRACTION_DIGITS {
            return Err(TxError::InvalidPrice(format!(
                "{s} has more than {MAX_PRICE_FRACTION_DIGITS} significant fractional digits"
            )));
        }

        let digits = format!("{whole}{fraction}");
        let mut n = BigUint::parse_bytes(digits.as_bytes(), 10).ok_or_else(invalid)?;
        let mut d = BigUint::from(10u32).pow(fraction.len() as u32);
        if n == BigUint::from(0u32) {
            return Err(invalid());
        }

        let divisor = gcd(n.clone(), d.clone());
        n /= &divisor;
        d /= &divisor;

        let limit = BigUint::from(i32::MAX as u32);
        if n > limit || d > limit {
            return Err(TxError::InvalidPrice(format!(
                "{s} cannot be expressed within 32-bit numerator and denominator"
            )));
        }
        let n = u32::try_from(&n).map_err(|_| invalid())?;
        let d = u32::try_from(&d).map_err(|_| invalid())?;
        Ok(Self { n, d })
    }
}

fn gcd(mut a: BigUint, mut b: BigUint) -> BigUint {
    let zero = BigUint::from(0u32);
    while b != zero {
        let r = &a % &b;
        a = b;
        b = r;
    }
    a
}

impl fmt::Display for Price {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}/{}", self.n, self.d)
    }
}

impl XdrEncode for Price {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_u32(self.n);
        w.write_u32(self.d);
        Ok(())
    }
}

impl XdrDecode for Price {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            n: r.read_u32()?,
            d: r.read_u32()?,
        })
    }
}

// ───────────────────────────────────────────────────────────────────────────
// TimeBounds
// ───────────────────────────────────────────────────────────────────────────

/// Validity window in unix seconds. A zero `max_time` means no upper bound.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TimeBounds {
    pub min_time: u64,
    pub max_time: u64,
}

impl TimeBounds {
    pub const fn new(min_time: u64, max_time: u64) -> Self {
        Self { min_time, max_time }
    }
}

impl XdrEncode for TimeBounds {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_u64(self.min_time);
        w.write_u64(self.max_time);
        Ok(())
    }
}

impl XdrDecode for TimeBounds {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            min_time: r.read_u64()?,
            max_time: r.read_u64()?,
        })
    }
}

// ───────────────────────────────────────────────────────────────────────────
// SequenceNumber
// ───────────────────────────────────────────────────────────────────────────

/// An account sequence number, held as an arbitrary-precision integer and
/// range-checked to i64 on construction.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct SequenceNumber(BigInt);

impl SequenceNumber {
    pub fn new(value: impl Into<BigInt>) -> Result<Self> {
        let value = value.into();
        if value < BigInt::from(i64::MIN) || value > BigInt::from(i64::MAX) {
            return Err(TxError::Xdr(XdrError::IntegerOutOfRange(format!(
                "sequence number {value} does not fit in a signed 64-bit integer"
            ))));
        }
        Ok(Self(value))
    }

    pub fn value(&self) -> &BigInt {
        &self.0
    }

    /// The following sequence number, as used by an account's next transaction.
    pub fn next(&self) -> Result<Self> {
        Self::new(&self.0 + 1)
    }

    pub fn is_negative(&self) -> bool {
        self.0.sign() == Sign::Minus
    }
}

impl From<i64> for SequenceNumber {
    fn from(value: i64) -> Self {
        Self(BigInt::from(value))
    }
}

impl FromStr for SequenceNumber {
    type Err = TxError;

    fn from_str(s: &str) -> Result<Self> {
        let value = BigInt::parse_bytes(s.as_bytes(), 10).ok_or_else(|| {
            TxError::Xdr(XdrError::InvalidValue(format!("invalid sequence number {s:?}")))
        })?;
        Self::new(value)
    }
}

impl fmt::Display for SequenceNumber {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.0, f)
    }
}

impl Serialize for SequenceNumber {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.0.to_string())
    }
}

impl<'de> Deserialize<'de> for SequenceNumber {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        text.parse().map_err(serde::de::Error::custom)
    }
}

impl XdrEncode for SequenceNumber {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_bigint_i64(&self.0)
    }
}

impl XdrDecode for SequenceNumber {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self(r.read_bigint_i64()?))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_amount_bounds() {
        let max: Amount = "922337203685.4775807".parse().unwrap();
        assert_eq!(max, Amount::MAX);
        assert_eq!(max.stroops(), i64::MAX);
        assert_eq!(max.to_string(), "922337203685.4775807");

        assert!("922337203686".parse::<Amount>().is_err());
        assert!("922337203685.4775808".parse::<Amount>().is_err());
        assert!("-1".parse::<Amount>().is_err());
    }

    #[test]
    fn test_amount_parsing() {
        assert_eq!("0".parse::<Amount>().unwrap(), Amount::ZERO);
        assert_eq!("0.0000001".parse::<Amount>().unwrap().stroops(), 1);
        assert_eq!("10".parse::<Amount>().unwrap().stroops(), 100_000_000);
        assert_eq!("1.5".parse::<Amount>().unwrap().stroops(), 15_000_000);
        assert_eq!("1.50000000".parse::<Amount>().unwrap().stroops(), 15_000_000);

        for bad in ["", ".5", "1.", "1.00000001", "1e5", "1,5", " 1", "+1", "1.2.3"] {
            assert!(bad.parse::<Amount>().is_err(), "{bad:?}");
        }
    }

    #[test]
    fn test_amount_display() {
        assert_eq!(Amount::ZERO.to_string(), "0.0000000");
        assert_eq!(Amount::from_stroops(1).unwrap().to_string(), "0.0000001");
        assert_eq!(Amount::from_units(25).unwrap().to_string(), "25.0000000");
        assert!(Amount::from_stroops(-1).is_err());
        assert!(Amount::from_units(i64::MAX).is_err());
    }

    #[test]
    fn test_amount_wire() {
        for amount in [Amount::ZERO, Amount::from_stroops(1).unwrap(), Amount::MAX] {
            let bytes = amount.to_xdr().unwrap();
            assert_eq!(bytes.len(), 8);
            assert_eq!(Amount::from_xdr(&bytes).unwrap(), amount);
        }
        let negative = (-5i64).to_xdr().unwrap();
        assert!(Amount::from_xdr(&negative).is_err());
    }

    #[test]
    fn test_amount_serde() {
        let amount: Amount = "12.5".parse().unwrap();
        let json = serde_json::to_string(&amount).unwrap();
        assert_eq!(json, "\"12.5000000\"");
        assert_eq!(serde_json::from_str::<Amount>(&json).unwrap(), amount);
    }

    #[test]
    fn test_price_from_decimal() {
        assert_eq!(Price::from_decimal_str("1.25").unwrap(), Price::new(5, 4));
        assert_eq!(Price::from_decimal_str("2").unwrap(), Price::new(2, 1));
        assert_eq!(Price::from_decimal_str("0.1").unwrap(), Price::new(1, 10));
        assert_eq!(
            Price::from_decimal_str("0.0000001").unwrap(),
            Price::new(1, 10_000_000)
        );
        assert!(Price::from_decimal_str("0").is_err());
        assert!(Price::from_decimal_str("-1").is_err());
        assert!(Price::from_decimal_str("3000000000").is_err());
        assert!(Price::from_decimal_str("0.00000000001").is_err());
    }

    #[test]
    fn test_price_decimal_edge_forms() {
        assert!(matches!(
            Price::from_decimal_str("1."),
            Err(TxError::InvalidPrice(_))
        ));
        assert!(Price::from_decimal_str(".5").is_err());
        assert_eq!(Price::from_decimal_str("1.5000").unwrap(), Price::new(3, 2));

        let long = format!("1.{}", "1".repeat(100_000));
        assert!(matches!(
            Price::from_decimal_str(&long),
            Err(TxError::InvalidPrice(_))
        ));
        let padded = format!("2.5{}", "0".repeat(100_000));
        assert_eq!(Price::from_decimal_str(&padded).unwrap(), Price::new(5, 2));
    }

    #[test]
    fn test_price_wire() {
        let price = Price::new(5, 4);
        assert_eq!(price.to_xdr().unwrap(), vec![0, 0, 0, 5, 0, 0, 0, 4]);
        assert_eq!(Price::from_xdr(&price.to_xdr().unwrap()).unwrap(), price);
    }

    #[test]
    fn test_sequence_number_extremes() {
        for value in [i64::MIN, -1, 0, 1, i64::MAX] {
            let seq = SequenceNumber::from(value);
            let bytes = seq.to_xdr().unwrap();
            assert_eq!(bytes, value.to_be_bytes().to_vec());
            assert_eq!(SequenceNumber::from_xdr(&bytes).unwrap(), seq);
        }
        assert!(SequenceNumber::from(i64::MIN).is_negative());
    }

    #[test]
    fn test_sequence_number_range() {
        assert!(SequenceNumber::new(BigInt::from(i64::MAX) + 1).is_err());
        assert!(SequenceNumber::from(i64::MAX).next().is_err());
        assert_eq!(
            SequenceNumber::from(41).next().unwrap(),
            SequenceNumber::from(42)
        );
        assert_eq!(
            "9223372036854775807".parse::<SequenceNumber>().unwrap(),
            SequenceNumber::from(i64::MAX)
        );
        assert!("abc".parse::<SequenceNumber>().is_err());
    }

    #[test]
    fn test_time_bounds_optional_forms_differ() {
        let some = Some(TimeBounds::new(0, 0)).to_xdr().unwrap();
        let none = Option::<TimeBounds>::None.to_xdr().unwrap();
        assert_eq!(none, vec![0, 0, 0, 0]);
        assert_eq!(some.len(), 20);
        assert_eq!(&some[..4], &[0, 0, 0, 1]);
    }
}
