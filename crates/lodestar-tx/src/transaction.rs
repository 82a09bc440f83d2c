//! Transactions and the builder that assembles them.

use lodestar_keys::AccountId;
use lodestar_xdr::{
    Result as XdrResult, Sha256Hash, XdrDecode, XdrEncode, XdrError, XdrReader, XdrWriter,
};
use tracing::debug;

use crate::envelope::TransactionEnvelope;
use crate::error::{Result, TxError};
use crate::memo::Memo;
use crate::network::Network;
use crate::operation::Operation;
use crate::signer::TransactionSigner;
use crate::types::{SequenceNumber, TimeBounds};

/// Default fee per operation, in stroops.
pub const BASE_FEE: u32 = 100;

/// Most operations one transaction may carry.
pub const MAX_OPERATIONS: usize = 100;

/// Envelope type tag mixed into every transaction signing payload.
pub const ENVELOPE_TYPE_TX: u32 = 2;

/// A transaction: source, fee, sequence, optional time bounds, memo and
/// an ordered list of operations.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Transaction {
    pub source_account: AccountId,
    pub fee: u32,
    pub seq_num: SequenceNumber,
    pub time_bounds: Option<TimeBounds>,
    pub memo: Memo,
    pub operations: Vec<Operation>,
}

impl Transaction {
    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_xdr()?)
    }

    /// `SHA256(passphrase) ‖ u32(ENVELOPE_TYPE_TX) ‖ transaction bytes`.
    pub fn signature_base(&self, network: &Network) -> Result<Vec<u8>> {
        let tx_bytes = self.to_xdr()?;
        let mut w = XdrWriter::with_capacity(32 + 4 + tx_bytes.len());
        w.write_fixed_opaque(network.network_id().as_bytes());
        w.write_u32(ENVELOPE_TYPE_TX);
        w.write_fixed_opaque(&tx_bytes);
        Ok(w.into_bytes())
    }

    /// The signing hash: `SHA256(signature_base)`.
    pub fn hash(&self, network: &Network) -> Result<Sha256Hash> {
        let hash = Sha256Hash::hash(&self.signature_base(network)?);
        debug!(hash = %hash.to_hex(), operations = self.operations.len(), "hashed transaction");
        Ok(hash)
    }
}

impl XdrEncode for Transaction {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.source_account.encode(w)?;
        w.write_u32(self.fee);
        self.seq_num.encode(w)?;
        w.write_optional(self.time_bounds.as_ref())?;
        self.memo.encode(w)?;
        w.write_array(&self.operations, Some(MAX_OPERATIONS))?;
        // reserved extension
        w.write_i32(0);
        Ok(())
    }
}

impl XdrDecode for Transaction {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let tx = Self {
            source_account: AccountId::decode(r)?,
            fee: r.read_u32()?,
            seq_num: SequenceNumber::decode(r)?,
            time_bounds: r.read_optional()?,
            memo: Memo::decode(r)?,
            operations: r.read_vec(Some(MAX_OPERATIONS))?,
        };
        match r.read_i32()? {
            0 => Ok(tx),
            value => Err(XdrError::UnknownDiscriminant {
                type_name: "TransactionExt",
                value,
            }),
        }
    }
}

/// Assembles a [`Transaction`].
///
/// The sequence number is used as given; callers fetch the account's
/// current value and pass the next one. Unless overridden with
/// [`TransactionBuilder::fee`], the fee is `base_fee × operation count`.
#[derive(Debug, Clone)]
pub struct TransactionBuilder {
    source: AccountId,
    sequence: SequenceNumber,
    base_fee: u32,
    fee: Option<u32>,
    memo: Memo,
    time_bounds: Option<TimeBounds>,
    operations: Vec<Operation>,
}

impl TransactionBuilder {
    pub fn new(source: AccountId, sequence: SequenceNumber) -> Self {
        Self {
            source,
            sequence,
            base_fee: BASE_FEE,
            fee: None,
            memo: Memo::None,
            time_bounds: None,
            operations: Vec::new(),
        }
    }

    /// Fee per operation used when no explicit fee is set.
    pub fn with_base_fee(mut self, base_fee: u32) -> Self {
        self.base_fee = base_fee;
        self
    }

    /// Explicit total fee, regardless of operation count.
    pub fn fee(mut self, fee: u32) -> Self {
        self.fee = Some(fee);
        self
    }

    pub fn memo(mut self, memo: Memo) -> Self {
        self.memo = memo;
        self
    }

    pub fn time_bounds(mut self, time_bounds: TimeBounds) -> Self {
        self.time_bounds = Some(time_bounds);
        self
    }

    pub fn add_operation(mut self, operation: Operation) -> Result<Self> {
        if self.operations.len() >= MAX_OPERATIONS {
            return Err(TxError::TooManyOperations(self.operations.len() + 1));
        }
        self.operations.push(operation);
        Ok(self)
    }

    pub fn operation_count(&self) -> usize {
        self.operations.len()
    }

    /// Snapshot the transaction. At least one operation is required.
    pub fn build(&self) -> Result<Transaction> {
        if self.operations.is_empty() {
            return Err(TxError::NoOperations);
        }
        let fee = match self.fee {
            Some(fee) => fee,
            None => u32::try_from(u64::from(self.base_fee) * self.operations.len() as u64)
                .map_err(|_| TxError::FeeOverflow {
                    base_fee: self.base_fee,
                    operations: self.operations.len(),
                })?,
        };
        Ok(Transaction {
            source_account: self.source,
            fee,
            seq_num: self.sequence.clone(),
            time_bounds: self.time_bounds,
            memo: self.memo.clone(),
            operations: self.operations.clone(),
        })
    }

    pub fn hash(&self, network: &Network) -> Result<Sha256Hash> {
        self.build()?.hash(network)
    }

    /// Sign with each signer in order and return the envelope.
    pub fn sign(
        self,
        signers: &[&dyn TransactionSigner],
        network: &Network,
    ) -> Result<TransactionEnvelope> {
        let mut envelope = self.get_envelope()?;
        for signer in signers {
            envelope.sign_with(*signer, network)?;
        }
        Ok(envelope)
    }

    /// An unsigned envelope around the built transaction.
    pub fn get_envelope(self) -> Result<TransactionEnvelope> {
        Ok(TransactionEnvelope::new(self.build()?))
    }
}
