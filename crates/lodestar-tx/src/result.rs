//! Decoding of network-reported operation and transaction results.
//!
//! A failure code here is data, not an error: decoding succeeds and the
//! caller inspects which operation failed and why. Only malformed bytes
//! produce an `Err`.

use lodestar_keys::AccountId;
use lodestar_xdr::{decode_base64, Result as XdrResult, XdrDecode, XdrError, XdrReader};
use tracing::trace;

use crate::asset::Asset;
use crate::error::Result;
use crate::operation::OperationType;
use crate::transaction::MAX_OPERATIONS;
use crate::types::{Amount, Price};

macro_rules! result_code {
    (
        $(#[$meta:meta])*
        $name:ident : $type_name:literal {
            $($(#[$vmeta:meta])* $variant:ident = $code:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
        pub enum $name {
            $($(#[$vmeta])* $variant),+
        }

        impl $name {
            pub fn code(self) -> i32 {
                match self {
                    $(Self::$variant => $code),+
                }
            }

            pub fn from_code(code: i32) -> Option<Self> {
                match code {
                    $($code => Some(Self::$variant),)+
                    _ => None,
                }
            }

            pub fn is_success(self) -> bool {
                self.code() == 0
            }
        }

        impl XdrDecode for $name {
            fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
                let value = r.read_i32()?;
                Self::from_code(value).ok_or(XdrError::UnknownDiscriminant {
                    type_name: $type_name,
                    value,
                })
            }
        }
    };
}

result_code! {
    CreateAccountResultCode: "CreateAccountResultCode" {
        Success = 0,
        Malformed = -1,
        Underfunded = -2,
        LowReserve = -3,
        AlreadyExist = -4,
    }
}

result_code! {
    PaymentResultCode: "PaymentResultCode" {
        Success = 0,
        Malformed = -1,
        Underfunded = -2,
        SrcNoTrust = -3,
        SrcNotAuthorized = -4,
        NoDestination = -5,
        NoTrust = -6,
        NotAuthorized = -7,
        LineFull = -8,
        NoIssuer = -9,
    }
}

result_code! {
    PathPaymentResultCode: "PathPaymentResultCode" {
        Success = 0,
        Malformed = -1,
        Underfunded = -2,
        SrcNoTrust = -3,
        SrcNotAuthorized = -4,
        NoDestination = -5,
        NoTrust = -6,
        NotAuthorized = -7,
        LineFull = -8,
        NoIssuer = -9,
        TooFewOffers = -10,
        OfferCrossSelf = -11,
        OverSendmax = -12,
    }
}

result_code! {
    /// Shared by manage-offer and create-passive-offer.
    ManageOfferResultCode: "ManageOfferResultCode" {
        Success = 0,
        Malformed = -1,
        SellNoTrust = -2,
        BuyNoTrust = -3,
        SellNotAuthorized = -4,
        BuyNotAuthorized = -5,
        LineFull = -6,
        Underfunded = -7,
        CrossSelf = -8,
        SellNoIssuer = -9,
        BuyNoIssuer = -10,
        NotFound = -11,
        LowReserve = -12,
    }
}

result_code! {
    SetOptionsResultCode: "SetOptionsResultCode" {
        Success = 0,
        LowReserve = -1,
        TooManySigners = -2,
        BadFlags = -3,
        InvalidInflation = -4,
        CantChange = -5,
        UnknownFlag = -6,
        ThresholdOutOfRange = -7,
        BadSigner = -8,
        InvalidHomeDomain = -9,
    }
}

result_code! {
    ChangeTrustResultCode: "ChangeTrustResultCode" {
        Success = 0,
        Malformed = -1,
        NoIssuer = -2,
        InvalidLimit = -3,
        LowReserve = -4,
        SelfNotAllowed = -5,
    }
}

result_code! {
    AllowTrustResultCode: "AllowTrustResultCode" {
        Success = 0,
        Malformed = -1,
        NoTrustLine = -2,
        TrustNotRequired = -3,
        CantRevoke = -4,
        SelfNotAllowed = -5,
    }
}

result_code! {
    AccountMergeResultCode: "AccountMergeResultCode" {
        Success = 0,
        Malformed = -1,
        NoAccount = -2,
        ImmutableSet = -3,
        HasSubEntries = -4,
        SeqnumTooFar = -5,
        DestFull = -6,
    }
}

result_code! {
    InflationResultCode: "InflationResultCode" {
        Success = 0,
        NotTime = -1,
    }
}

result_code! {
    ManageDataResultCode: "ManageDataResultCode" {
        Success = 0,
        NotSupportedYet = -1,
        NameNotFound = -2,
        LowReserve = -3,
        InvalidName = -4,
    }
}

result_code! {
    BumpSequenceResultCode: "BumpSequenceResultCode" {
        Success = 0,
        BadSeq = -1,
    }
}

result_code! {
    TransactionResultCode: "TransactionResultCode" {
        /// All operations succeeded.
        Success = 0,
        /// One or more operations failed.
        Failed = -1,
        TooEarly = -2,
        TooLate = -3,
        MissingOperation = -4,
        BadSeq = -5,
        BadAuth = -6,
        InsufficientBalance = -7,
        NoAccount = -8,
        InsufficientFee = -9,
        BadAuthExtra = -10,
        InternalError = -11,
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Payload records
// ───────────────────────────────────────────────────────────────────────────

/// An offer taken while crossing the order book.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimOfferAtom {
    pub seller_id: AccountId,
    pub offer_id: u64,
    pub asset_sold: Asset,
    pub amount_sold: Amount,
    pub asset_bought: Asset,
    pub amount_bought: Amount,
}

impl XdrDecode for ClaimOfferAtom {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            seller_id: AccountId::decode(r)?,
            offer_id: r.read_u64()?,
            asset_sold: Asset::decode(r)?,
            amount_sold: Amount::decode(r)?,
            asset_bought: Asset::decode(r)?,
            amount_bought: Amount::decode(r)?,
        })
    }
}

/// What a path payment finally delivered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SimplePaymentResult {
    pub destination: AccountId,
    pub asset: Asset,
    pub amount: Amount,
}

impl XdrDecode for SimplePaymentResult {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            destination: AccountId::decode(r)?,
            asset: Asset::decode(r)?,
            amount: Amount::decode(r)?,
        })
    }
}

/// An offer as stored in the ledger.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OfferEntry {
    pub seller_id: AccountId,
    pub offer_id: u64,
    pub selling: Asset,
    pub buying: Asset,
    pub amount: Amount,
    pub price: Price,
    pub flags: u32,
}

impl XdrDecode for OfferEntry {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let entry = Self {
            seller_id: AccountId::decode(r)?,
            offer_id: r.read_u64()?,
            selling: Asset::decode(r)?,
            buying: Asset::decode(r)?,
            amount: Amount::decode(r)?,
            price: Price::decode(r)?,
            flags: r.read_u32()?,
        };
        read_empty_ext(r, "OfferEntryExt")?;
        Ok(entry)
    }
}

/// The offer left on the book after a manage-offer operation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageOfferEffect {
    Created(OfferEntry),
    Updated(OfferEntry),
    Deleted,
}

impl XdrDecode for ManageOfferEffect {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        match r.read_i32()? {
            0 => Ok(Self::Created(OfferEntry::decode(r)?)),
            1 => Ok(Self::Updated(OfferEntry::decode(r)?)),
            2 => Ok(Self::Deleted),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "ManageOfferEffect",
                value,
            }),
        }
    }
}

/// One inflation winner.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InflationPayout {
    pub destination: AccountId,
    pub amount: Amount,
}

impl XdrDecode for InflationPayout {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            destination: AccountId::decode(r)?,
            amount: Amount::decode(r)?,
        })
    }
}

fn read_empty_ext(r: &mut XdrReader<'_>, type_name: &'static str) -> XdrResult<()> {
    match r.read_i32()? {
        0 => Ok(()),
        value => Err(XdrError::UnknownDiscriminant { type_name, value }),
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Per-operation results with payloads
// ───────────────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PathPaymentResult {
    Success {
        offers: Vec<ClaimOfferAtom>,
        last: SimplePaymentResult,
    },
    /// The issuer of this asset does not exist.
    NoIssuer(Asset),
    Failed(PathPaymentResultCode),
}

impl PathPaymentResult {
    pub fn code(&self) -> PathPaymentResultCode {
        match self {
            Self::Success { .. } => PathPaymentResultCode::Success,
            Self::NoIssuer(_) => PathPaymentResultCode::NoIssuer,
            Self::Failed(code) => *code,
        }
    }
}

impl XdrDecode for PathPaymentResult {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match PathPaymentResultCode::decode(r)? {
            PathPaymentResultCode::Success => Self::Success {
                offers: r.read_vec(None)?,
                last: SimplePaymentResult::decode(r)?,
            },
            PathPaymentResultCode::NoIssuer => Self::NoIssuer(Asset::decode(r)?),
            code => Self::Failed(code),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManageOfferResult {
    Success {
        offers_claimed: Vec<ClaimOfferAtom>,
        offer: ManageOfferEffect,
    },
    Failed(ManageOfferResultCode),
}

impl ManageOfferResult {
    pub fn code(&self) -> ManageOfferResultCode {
        match self {
            Self::Success { .. } => ManageOfferResultCode::Success,
            Self::Failed(code) => *code,
        }
    }
}

impl XdrDecode for ManageOfferResult {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match ManageOfferResultCode::decode(r)? {
            ManageOfferResultCode::Success => Self::Success {
                offers_claimed: r.read_vec(None)?,
                offer: ManageOfferEffect::decode(r)?,
            },
            code => Self::Failed(code),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AccountMergeResult {
    /// Balance transferred from the merged account.
    Success { source_balance: Amount },
    Failed(AccountMergeResultCode),
}

impl AccountMergeResult {
    pub fn code(&self) -> AccountMergeResultCode {
        match self {
            Self::Success { .. } => AccountMergeResultCode::Success,
            Self::Failed(code) => *code,
        }
    }
}

impl XdrDecode for AccountMergeResult {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match AccountMergeResultCode::decode(r)? {
            AccountMergeResultCode::Success => Self::Success {
                source_balance: Amount::decode(r)?,
            },
            code => Self::Failed(code),
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InflationResult {
    Success { payouts: Vec<InflationPayout> },
    Failed(InflationResultCode),
}

impl InflationResult {
    pub fn code(&self) -> InflationResultCode {
        match self {
            Self::Success { .. } => InflationResultCode::Success,
            Self::Failed(code) => *code,
        }
    }
}

impl XdrDecode for InflationResult {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(match InflationResultCode::decode(r)? {
            InflationResultCode::Success => Self::Success {
                payouts: r.read_vec(None)?,
            },
            code => Self::Failed(code),
        })
    }
}

// ───────────────────────────────────────────────────────────────────────────
// Operation and transaction results
// ───────────────────────────────────────────────────────────────────────────

/// The type-specific result of an operation that was applied.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationInnerResult {
    CreateAccount(CreateAccountResultCode),
    Payment(PaymentResultCode),
    PathPayment(PathPaymentResult),
    ManageOffer(ManageOfferResult),
    CreatePassiveOffer(ManageOfferResult),
    SetOptions(SetOptionsResultCode),
    ChangeTrust(ChangeTrustResultCode),
    AllowTrust(AllowTrustResultCode),
    AccountMerge(AccountMergeResult),
    Inflation(InflationResult),
    ManageData(ManageDataResultCode),
    BumpSequence(BumpSequenceResultCode),
}

impl OperationInnerResult {
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
            Self::Inflation(_) => OperationType::Inflation,
            Self::ManageData(_) => OperationType::ManageData,
            Self::BumpSequence(_) => OperationType::BumpSequence,
        }
    }

    /// The type-specific result code; zero is success.
    pub fn code(&self) -> i32 {
        match self {
            Self::CreateAccount(code) => code.code(),
            Self::Payment(code) => code.code(),
            Self::PathPayment(result) => result.code().code(),
            Self::ManageOffer(result) | Self::CreatePassiveOffer(result) => result.code().code(),
            Self::SetOptions(code) => code.code(),
            Self::ChangeTrust(code) => code.code(),
            Self::AllowTrust(code) => code.code(),
            Self::AccountMerge(result) => result.code().code(),
            Self::Inflation(result) => result.code().code(),
            Self::ManageData(code) => code.code(),
            Self::BumpSequence(code) => code.code(),
        }
    }

    pub fn is_success(&self) -> bool {
        self.code() == 0
    }
}

impl XdrDecode for OperationInnerResult {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let op_type = OperationType::decode(r)?;
        trace!(?op_type, "decoding operation result body");
        Ok(match op_type {
            OperationType::CreateAccount => Self::CreateAccount(XdrDecode::decode(r)?),
            OperationType::Payment => Self::Payment(XdrDecode::decode(r)?),
            OperationType::PathPayment => Self::PathPayment(XdrDecode::decode(r)?),
            OperationType::ManageOffer => Self::ManageOffer(XdrDecode::decode(r)?),
            OperationType::CreatePassiveOffer => Self::CreatePassiveOffer(XdrDecode::decode(r)?),
            OperationType::SetOptions => Self::SetOptions(XdrDecode::decode(r)?),
            OperationType::ChangeTrust => Self::ChangeTrust(XdrDecode::decode(r)?),
            OperationType::AllowTrust => Self::AllowTrust(XdrDecode::decode(r)?),
            OperationType::AccountMerge => Self::AccountMerge(XdrDecode::decode(r)?),
            OperationType::Inflation => Self::Inflation(XdrDecode::decode(r)?),
            OperationType::ManageData => Self::ManageData(XdrDecode::decode(r)?),
            OperationType::BumpSequence => Self::BumpSequence(XdrDecode::decode(r)?),
        })
    }
}

/// Outcome of one operation.
///
/// `BadAuth` and `NoAccount` short-circuit before any type-specific body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum OperationResult {
    Inner(OperationInnerResult),
    /// Too few valid signatures, or the transaction was not authorized.
    BadAuth,
    /// The operation's source account does not exist.
    NoAccount,
}

impl OperationResult {
    const INNER: i32 = 0;
    const BAD_AUTH: i32 = -1;
    const NO_ACCOUNT: i32 = -2;

    /// Decode from the start of `bytes`; trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_xdr(bytes)?)
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        Self::from_bytes(&decode_base64(text)?)
    }

    pub fn is_success(&self) -> bool {
        matches!(self, Self::Inner(inner) if inner.is_success())
    }

    pub fn operation_type(&self) -> Option<OperationType> {
        match self {
            Self::Inner(inner) => Some(inner.operation_type()),
            _ => None,
        }
    }

    pub fn inner(&self) -> Option<&OperationInnerResult> {
        match self {
            Self::Inner(inner) => Some(inner),
            _ => None,
        }
    }

    /// `None` on success; otherwise the type-specific code, or the outer
    /// code for `BadAuth` (-1) and `NoAccount` (-2).
    pub fn error_code(&self) -> Option<i32> {
        match self {
            Self::Inner(inner) if inner.is_success() => None,
            Self::Inner(inner) => Some(inner.code()),
            Self::BadAuth => Some(Self::BAD_AUTH),
            Self::NoAccount => Some(Self::NO_ACCOUNT),
        }
    }
}

impl XdrDecode for OperationResult {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let value = r.read_i32()?;
        trace!(code = value, "decoding operation result");
        match value {
            Self::INNER => Ok(Self::Inner(OperationInnerResult::decode(r)?)),
            Self::BAD_AUTH => Ok(Self::BadAuth),
            Self::NO_ACCOUNT => Ok(Self::NoAccount),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "OperationResultCode",
                value,
            }),
        }
    }
}

/// Outcome of a submitted transaction.
///
/// Per-operation results are present only when the code is `Success` or
/// `Failed`, in the transaction's operation order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionResult {
    /// Fee actually charged, in stroops.
    pub fee_charged: i64,
    pub code: TransactionResultCode,
    pub results: Vec<OperationResult>,
}

impl TransactionResult {
    /// Decode from the start of `bytes`; trailing bytes are ignored.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_xdr(bytes)?)
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        Self::from_bytes(&decode_base64(text)?)
    }

    pub fn is_success(&self) -> bool {
        self.code.is_success()
    }

    /// Index and result of every operation that did not succeed.
    pub fn failed_operations(&self) -> Vec<(usize, &OperationResult)> {
        self.results
            .iter()
            .enumerate()
            .filter(|(_, result)| !result.is_success())
            .collect()
    }
}

impl XdrDecode for TransactionResult {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let fee_charged = r.read_i64()?;
        let code = TransactionResultCode::decode(r)?;
        trace!(fee_charged, ?code, "decoding transaction result");
        let results = match code {
            TransactionResultCode::Success | TransactionResultCode::Failed => {
                r.read_vec(Some(MAX_OPERATIONS))?
            }
            _ => Vec::new(),
        };
        read_empty_ext(r, "TransactionResultExt")?;
        Ok(Self {
            fee_charged,
            code,
            results,
        })
    }
}
