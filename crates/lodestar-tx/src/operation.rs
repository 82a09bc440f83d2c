//! Operations: a shared header plus one of twelve typed bodies.
//!
//! Wire form of every operation is `optional source ‖ type ‖ body`.

use bytes::Bytes;
use lodestar_keys::{AccountId, SignerKey};
use lodestar_xdr::{Result as XdrResult, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter};
use serde::{Deserialize, Serialize};

use crate::asset::{Asset, AssetCode};
use crate::error::{Result, TxError};
use crate::types::{Amount, Price, SequenceNumber};

/// Most intermediate assets a path payment may route through.
pub const MAX_PATH_LEN: usize = 5;
/// Longest home domain, in bytes.
pub const MAX_HOME_DOMAIN_LEN: usize = 32;
/// Longest data entry name, in bytes.
pub const MAX_DATA_NAME_LEN: usize = 64;
/// Longest data entry value, in bytes.
pub const MAX_DATA_VALUE_LEN: usize = 64;
/// Largest signer weight or threshold.
pub const MAX_WEIGHT: u32 = 255;

/// Account flag: trustlines need issuer authorization.
pub const AUTH_REQUIRED_FLAG: u32 = 0x1;
/// Account flag: the issuer may revoke authorization.
pub const AUTH_REVOCABLE_FLAG: u32 = 0x2;
/// Account flag: no auth flag may change and the account cannot be merged.
pub const AUTH_IMMUTABLE_FLAG: u32 = 0x4;

/// Operation type discriminant, shared by operations and their results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[repr(i32)]
pub enum OperationType {
    CreateAccount = 0,
    Payment = 1,
    PathPayment = 2,
    ManageOffer = 3,
    CreatePassiveOffer = 4,
    SetOptions = 5,
    ChangeTrust = 6,
    AllowTrust = 7,
    AccountMerge = 8,
    Inflation = 9,
    ManageData = 10,
    BumpSequence = 11,
}

impl OperationType {
    pub fn from_i32(value: i32) -> Option<Self> {
        use OperationType::*;
        Some(match value {
            0 => CreateAccount,
            1 => Payment,
            2 => PathPayment,
            3 => ManageOffer,
            4 => CreatePassiveOffer,
            5 => SetOptions,
            6 => ChangeTrust,
            7 => AllowTrust,
            8 => AccountMerge,
            9 => Inflation,
            10 => ManageData,
            11 => BumpSequence,
            _ => return None,
        })
    }
}

impl XdrEncode for OperationType {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_i32(*self as i32);
        Ok(())
    }
}

impl XdrDecode for OperationType {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let value = r.read_i32()?;
        Self::from_i32(value).ok_or(XdrError::UnknownDiscriminant {
            type_name: "OperationType",
            value,
        })
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Operation bodies
// ───────────────────────────────────────────────────────────────────────────

/// Create and fund a new account.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreateAccountOp {
    pub destination: AccountId,
    pub starting_balance: Amount,
}

impl XdrEncode for CreateAccountOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.destination.encode(w)?;
        self.starting_balance.encode(w)
    }
}

impl XdrDecode for CreateAccountOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            destination: AccountId::decode(r)?,
            starting_balance: Amount::decode(r)?,
        })
    }
}

/// Send an amount of one asset.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PaymentOp {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: Amount,
}

impl XdrEncode for PaymentOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.destination.encode(w)?;
        self.asset.encode(w)?;
        self.amount.encode(w)
    }
}

impl XdrDecode for PaymentOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            destination: AccountId::decode(r)?,
            asset: Asset::decode(r)?,
            amount: Amount::decode(r)?,
        })
    }
}

/// Send one asset, deliver another, converting through the order book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PathPaymentOp {
    pub send_asset: Asset,
    pub send_max: Amount,
    pub destination: AccountId,
    pub dest_asset: Asset,
    pub dest_amount: Amount,
    pub path: Vec<Asset>,
}

impl PathPaymentOp {
    pub fn new(
        send_asset: Asset,
        send_max: Amount,
        destination: AccountId,
        dest_asset: Asset,
        dest_amount: Amount,
    ) -> Self {
        Self {
            send_asset,
            send_max,
            destination,
            dest_asset,
            dest_amount,
            path: Vec::new(),
        }
    }

    /// Append an intermediate asset; a sixth is rejected.
    pub fn add_path(mut self, asset: Asset) -> Result<Self> {
        if self.path.len() >= MAX_PATH_LEN {
            return Err(TxError::TooManyPathAssets);
        }
        self.path.push(asset);
        Ok(self)
    }
}

impl XdrEncode for PathPaymentOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.send_asset.encode(w)?;
        self.send_max.encode(w)?;
        self.destination.encode(w)?;
        self.dest_asset.encode(w)?;
        self.dest_amount.encode(w)?;
        w.write_array(&self.path, Some(MAX_PATH_LEN))
    }
}

impl XdrDecode for PathPaymentOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            send_asset: Asset::decode(r)?,
            send_max: Amount::decode(r)?,
            destination: AccountId::decode(r)?,
            dest_asset: Asset::decode(r)?,
            dest_amount: Amount::decode(r)?,
            path: r.read_vec(Some(MAX_PATH_LEN))?,
        })
    }
}

/// Create, update or (with a zero amount) delete an offer.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: Amount,
    pub price: Price,
    /// Zero creates a new offer.
    pub offer_id: u64,
}

impl ManageOfferOp {
    pub fn new(selling: Asset, buying: Asset, amount: Amount, price: Price) -> Self {
        Self {
            selling,
            buying,
            amount,
            price,
            offer_id: 0,
        }
    }

    pub fn with_offer_id(mut self, offer_id: u64) -> Self {
        self.offer_id = offer_id;
        self
    }
}

impl XdrEncode for ManageOfferOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.selling.encode(w)?;
        self.buying.encode(w)?;
        self.amount.encode(w)?;
        self.price.encode(w)?;
        w.write_u64(self.offer_id);
        Ok(())
    }
}

impl XdrDecode for ManageOfferOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            selling: Asset::decode(r)?,
            buying: Asset::decode(r)?,
            amount: Amount::decode(r)?,
            price: Price::decode(r)?,
            offer_id: r.read_u64()?,
        })
    }
}

/// An offer that does not take offers at exactly its own price.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CreatePassiveOfferOp {
    pub selling: Asset,
    pub buying: Asset,
    pub amount: Amount,
    pub price: Price,
}

impl XdrEncode for CreatePassiveOfferOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.selling.encode(w)?;
        self.buying.encode(w)?;
        self.amount.encode(w)?;
        self.price.encode(w)
    }
}

impl XdrDecode for CreatePassiveOfferOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            selling: Asset::decode(r)?,
            buying: Asset::decode(r)?,
            amount: Amount::decode(r)?,
            price: Price::decode(r)?,
        })
    }
}

/// An additional account signer and its weight.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Signer {
    pub key: SignerKey,
    pub weight: u32,
}

impl Signer {
    /// Weight zero removes the signer.
    pub fn new(key: SignerKey, weight: u32) -> Result<Self> {
        check_weight(weight)?;
        Ok(Self { key, weight })
    }
}

impl XdrEncode for Signer {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.key.encode(w)?;
        encode_weight(w, self.weight)
    }
}

impl XdrDecode for Signer {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            key: SignerKey::decode(r)?,
            weight: decode_weight(r)?,
        })
    }
}

fn check_weight(weight: u32) -> Result<()> {
    if weight > MAX_WEIGHT {
        return Err(TxError::InvalidSignerWeight(weight));
    }
    Ok(())
}

fn encode_weight(w: &mut XdrWriter, weight: u32) -> XdrResult<()> {
    if weight > MAX_WEIGHT {
        return Err(XdrError::InvalidValue(format!("weight {weight} exceeds {MAX_WEIGHT}")));
    }
    w.write_u32(weight);
    Ok(())
}

fn decode_weight(r: &mut XdrReader<'_>) -> XdrResult<u32> {
    let weight = r.read_u32()?;
    if weight > MAX_WEIGHT {
        return Err(XdrError::InvalidValue(format!("weight {weight} exceeds {MAX_WEIGHT}")));
    }
    Ok(weight)
}

fn encode_optional_weight(w: &mut XdrWriter, weight: Option<u32>) -> XdrResult<()> {
    match weight {
        Some(weight) => {
            w.write_bool(true);
            encode_weight(w, weight)
        }
        None => {
            w.write_bool(false);
            Ok(())
        }
    }
}

fn decode_optional_weight(r: &mut XdrReader<'_>) -> XdrResult<Option<u32>> {
    if r.read_bool()? {
        Ok(Some(decode_weight(r)?))
    } else {
        Ok(None)
    }
}

/// Change account settings. Every field is independently optional.
///
/// A flags value of zero is the same as leaving the field unset.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct SetOptionsOp {
    pub inflation_dest: Option<AccountId>,
    pub clear_flags: Option<u32>,
    pub set_flags: Option<u32>,
    pub master_weight: Option<u32>,
    pub low_threshold: Option<u32>,
    pub med_threshold: Option<u32>,
    pub high_threshold: Option<u32>,
    pub home_domain: Option<String>,
    pub signer: Option<Signer>,
}

impl SetOptionsOp {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn inflation_destination(mut self, account: AccountId) -> Self {
        self.inflation_dest = Some(account);
        self
    }

    pub fn set_flags(mut self, flags: u32) -> Self {
        self.set_flags = Some(flags).filter(|f| *f != 0);
        self
    }

    pub fn clear_flags(mut self, flags: u32) -> Self {
        self.clear_flags = Some(flags).filter(|f| *f != 0);
        self
    }

    pub fn master_weight(mut self, weight: u32) -> Result<Self> {
        check_weight(weight)?;
        self.master_weight = Some(weight);
        Ok(self)
    }

    pub fn thresholds(mut self, low: u32, medium: u32, high: u32) -> Result<Self> {
        for weight in [low, medium, high] {
            check_weight(weight)?;
        }
        self.low_threshold = Some(low);
        self.med_threshold = Some(medium);
        self.high_threshold = Some(high);
        Ok(self)
    }

    pub fn set_home_domain(mut self, domain: &str) -> Result<Self> {
        if domain.len() > MAX_HOME_DOMAIN_LEN {
            return Err(TxError::ValueTooLong {
                field: "home domain",
                len: domain.len(),
                max: MAX_HOME_DOMAIN_LEN,
            });
        }
        self.home_domain = Some(domain.to_string());
        Ok(self)
    }

    pub fn signer(mut self, signer: Signer) -> Self {
        self.signer = Some(signer);
        self
    }
}

impl XdrEncode for SetOptionsOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_optional(self.inflation_dest.as_ref())?;
        w.write_optional(self.clear_flags.filter(|f| *f != 0).as_ref())?;
        w.write_optional(self.set_flags.filter(|f| *f != 0).as_ref())?;
        encode_optional_weight(w, self.master_weight)?;
        encode_optional_weight(w, self.low_threshold)?;
        encode_optional_weight(w, self.med_threshold)?;
        encode_optional_weight(w, self.high_threshold)?;
        match &self.home_domain {
            Some(domain) => {
                w.write_bool(true);
                w.write_string(domain, Some(MAX_HOME_DOMAIN_LEN))?;
            }
            None => w.write_bool(false),
        }
        w.write_optional(self.signer.as_ref())
    }
}

impl XdrDecode for SetOptionsOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            inflation_dest: r.read_optional()?,
            clear_flags: r.read_optional::<u32>()?.filter(|f| *f != 0),
            set_flags: r.read_optional::<u32>()?.filter(|f| *f != 0),
            master_weight: decode_optional_weight(r)?,
            low_threshold: decode_optional_weight(r)?,
            med_threshold: decode_optional_weight(r)?,
            high_threshold: decode_optional_weight(r)?,
            home_domain: if r.read_bool()? {
                Some(r.read_string(Some(MAX_HOME_DOMAIN_LEN))?)
            } else {
                None
            },
            signer: r.read_optional()?,
        })
    }
}

/// Create, update or (with a zero limit) remove a trustline.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChangeTrustOp {
    pub line: Asset,
    pub limit: Amount,
}

impl ChangeTrustOp {
    /// Trust `line` up to `limit`, or the maximum amount when `None`.
    pub fn new(line: Asset, limit: Option<Amount>) -> Self {
        Self {
            line,
            limit: limit.unwrap_or(Amount::MAX),
        }
    }
}

impl XdrEncode for ChangeTrustOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.line.encode(w)?;
        self.limit.encode(w)
    }
}

impl XdrDecode for ChangeTrustOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            line: Asset::decode(r)?,
            limit: Amount::decode(r)?,
        })
    }
}

/// Issuer grants or revokes a trustor's authorization to hold an asset.
///
/// The authorization flag has no default: encoding fails until
/// [`AllowTrustOp::authorize`] is called.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AllowTrustOp {
    pub trustor: AccountId,
    pub asset: AssetCode,
    pub authorize: Option<bool>,
}

impl AllowTrustOp {
    pub fn new(trustor: AccountId, asset: AssetCode) -> Self {
        Self {
            trustor,
            asset,
            authorize: None,
        }
    }

    pub fn authorize(mut self, authorize: bool) -> Self {
        self.authorize = Some(authorize);
        self
    }
}

impl XdrEncode for AllowTrustOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        let authorize = self.authorize.ok_or(XdrError::MissingField("authorize"))?;
        self.trustor.encode(w)?;
        self.asset.encode(w)?;
        w.write_bool(authorize);
        Ok(())
    }
}

impl XdrDecode for AllowTrustOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            trustor: AccountId::decode(r)?,
            asset: AssetCode::decode(r)?,
            authorize: Some(r.read_bool()?),
        })
    }
}

/// Set, modify or (with no value) delete a named data entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ManageDataOp {
    pub name: String,
    pub value: Option<Bytes>,
}

impl ManageDataOp {
    pub fn new(name: &str, value: impl Into<Bytes>) -> Result<Self> {
        let value = value.into();
        check_len("data name", name.len(), MAX_DATA_NAME_LEN)?;
        check_len("data value", value.len(), MAX_DATA_VALUE_LEN)?;
        Ok(Self {
            name: name.to_string(),
            value: Some(value),
        })
    }

    /// Delete the entry called `name`.
    pub fn clear(name: &str) -> Result<Self> {
        check_len("data name", name.len(), MAX_DATA_NAME_LEN)?;
        Ok(Self {
            name: name.to_string(),
            value: None,
        })
    }
}

fn check_len(field: &'static str, len: usize, max: usize) -> Result<()> {
    if len > max {
        return Err(TxError::ValueTooLong { field, len, max });
    }
    Ok(())
}

impl XdrEncode for ManageDataOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_string(&self.name, Some(MAX_DATA_NAME_LEN))?;
        match &self.value {
            Some(value) => {
                w.write_bool(true);
                w.write_var_opaque(value, Some(MAX_DATA_VALUE_LEN))
            }
            None => {
                w.write_bool(false);
                Ok(())
            }
        }
    }
}

impl XdrDecode for ManageDataOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let name = r.read_string(Some(MAX_DATA_NAME_LEN))?;
        let value = if r.read_bool()? {
            Some(Bytes::from(r.read_var_opaque(Some(MAX_DATA_VALUE_LEN))?))
        } else {
            None
        };
        Ok(Self { name, value })
    }
}

/// Raise the source account's sequence number.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BumpSequenceOp {
    pub bump_to: SequenceNumber,
}

impl XdrEncode for BumpSequenceOp {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.bump_to.encode(w)
    }
}

impl XdrDecode for BumpSequenceOp {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            bump_to: SequenceNumber::decode(r)?,
        })
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Operation
// ───────────────────────────────────────────────────────────────────────────

/// The typed body of an operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationBody {
    CreateAccount(CreateAccountOp),
    Payment(PaymentOp),
    PathPayment(PathPaymentOp),
    ManageOffer(ManageOfferOp),
    CreatePassiveOffer(CreatePassiveOfferOp),
    SetOptions(SetOptionsOp),
    ChangeTrust(ChangeTrustOp),
    AllowTrust(AllowTrustOp),
    AccountMerge(AccountId),
    Inflation,
    ManageData(ManageDataOp),
    BumpSequence(BumpSequenceOp),
}

impl OperationBody {
    pub fn operation_type(&self) -> OperationType {
        match self {
            Self::CreateAccount(_) => OperationType::CreateAccount,
            Self::Payment(_) => OperationType::Payment,
            Self::PathPayment(_) => OperationType::PathPayment,
            Self::ManageOffer(_) => OperationType::ManageOffer,
            Self::CreatePassiveOffer(_) => OperationType::CreatePassiveOffer,
            Self::SetOptions(_) => OperationType::SetOptions,
            Self::ChangeTrust(_) => OperationType::ChangeTrust,
            Self::AllowTrust(_) => OperationType::AllowTrust,
            Self::AccountMerge(_) => OperationType::AccountMerge,
            Self::Inflation => OperationType::Inflation,
            Self::ManageData(_) => OperationType::ManageData,
            Self::BumpSequence(_) => OperationType::BumpSequence,
        }
    }
}

macro_rules! impl_body_from {
    ($($op:ident => $variant:ident),+ $(,)?) => {
        $(
            impl From<$op> for OperationBody {
                fn from(op: $op) -> Self {
                    Self::$variant(op)
                }
            }
        )+
    };
}

impl_body_from! {
    CreateAccountOp => CreateAccount,
    PaymentOp => Payment,
    PathPaymentOp => PathPayment,
    ManageOfferOp => ManageOffer,
    CreatePassiveOfferOp => CreatePassiveOffer,
    SetOptionsOp => SetOptions,
    ChangeTrustOp => ChangeTrust,
    AllowTrustOp => AllowTrust,
    ManageDataOp => ManageData,
    BumpSequenceOp => BumpSequence,
}

impl XdrEncode for OperationBody {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.operation_type().encode(w)?;
        match self {
            Self::CreateAccount(op) => op.encode(w),
            Self::Payment(op) => op.encode(w),
            Self::PathPayment(op) => op.encode(w),
            Self::ManageOffer(op) => op.encode(w),
            Self::CreatePassiveOffer(op) => op.encode(w),
            Self::SetOptions(op) => op.encode(w),
            Self::ChangeTrust(op) => op.encode(w),
            Self::AllowTrust(op) => op.encode(w),
            Self::AccountMerge(destination) => destination.encode(w),
            Self::Inflation => Ok(()),
            Self::ManageData(op) => op.encode(w),
            Self::BumpSequence(op) => op.encode(w),
        }
    }
}

impl XdrDecode for OperationBody {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match OperationType::decode(r)? {
            OperationType::CreateAccount => Self::CreateAccount(CreateAccountOp::decode(r)?),
            OperationType::Payment => Self::Payment(PaymentOp::decode(r)?),
            OperationType::PathPayment => Self::PathPayment(PathPaymentOp::decode(r)?),
            OperationType::ManageOffer => Self::ManageOffer(ManageOfferOp::decode(r)?),
            OperationType::CreatePassiveOffer => {
                Self::CreatePassiveOffer(CreatePassiveOfferOp::decode(r)?)
            }
            OperationType::SetOptions => Self::SetOptions(SetOptionsOp::decode(r)?),
            OperationType::ChangeTrust => Self::ChangeTrust(ChangeTrustOp::decode(r)?),
            OperationType::AllowTrust => Self::AllowTrust(AllowTrustOp::decode(r)?),
            OperationType::AccountMerge => Self::AccountMerge(AccountId::decode(r)?),
            OperationType::Inflation => Self::Inflation,
            OperationType::ManageData => Self::ManageData(ManageDataOp::decode(r)?),
            OperationType::BumpSequence => Self::BumpSequence(BumpSequenceOp::decode(r)?),
        })
    }
}

/// An operation: optional source account override plus body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Operation {
    pub source_account: Option<AccountId>,
    pub body: OperationBody,
}

impl Operation {
    pub fn new(body: impl Into<OperationBody>) -> Self {
        Self {
            source_account: None,
            body: body.into(),
        }
    }

    /// Run this operation as `source` instead of the transaction source.
    pub fn with_source(mut self, source: AccountId) -> Self {
        self.source_account = Some(source);
        self
    }

    pub fn operation_type(&self) -> OperationType {
        self.body.operation_type()
    }

    pub fn create_account(destination: AccountId, starting_balance: Amount) -> Self {
        Self::new(CreateAccountOp {
            destination,
            starting_balance,
        })
    }

    pub fn payment(destination: AccountId, asset: Asset, amount: Amount) -> Self {
        Self::new(PaymentOp {
            destination,
            asset,
            amount,
        })
    }

    pub fn change_trust(line: Asset, limit: Option<Amount>) -> Self {
        Self::new(ChangeTrustOp::new(line, limit))
    }

    pub fn account_merge(destination: AccountId) -> Self {
        Self::new(OperationBody::AccountMerge(destination))
    }

    pub fn inflation() -> Self {
        Self::new(OperationBody::Inflation)
    }

    pub fn manage_data(name: &str, value: Option<&[u8]>) -> Result<Self> {
        let op = match value {
            Some(value) => ManageDataOp::new(name, Bytes::copy_from_slice(value))?,
            None => ManageDataOp::clear(name)?,
        };
        Ok(Self::new(op))
    }

    pub fn bump_sequence(bump_to: SequenceNumber) -> Self {
        Self::new(BumpSequenceOp { bump_to })
    }
}

impl XdrEncode for Operation {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_optional(self.source_account.as_ref())?;
        self.body.encode(w)
    }
}

impl XdrDecode for Operation {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            source_account: r.read_optional()?,
            body: OperationBody::decode(r)?,
        })
    }
}
