//! Transaction envelopes: a transaction plus its accumulated signatures.

use lodestar_keys::{DecoratedSignature, Keypair};
use lodestar_xdr::{
    encode_base64, Result as XdrResult, Sha256Hash, XdrDecode, XdrEncode, XdrReader, XdrWriter,
};
use tracing::debug;

use crate::error::{Result, TxError};
use crate::network::Network;
use crate::signer::TransactionSigner;
use crate::transaction::Transaction;

/// Most signatures one envelope may carry.
pub const MAX_SIGNATURES: usize = 20;

/// The unit handed to transport.
///
/// Signatures are kept in the order they were added; duplicates are not
/// removed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TransactionEnvelope {
    pub tx: Transaction,
    pub signatures: Vec<DecoratedSignature>,
}

impl TransactionEnvelope {
    pub fn new(tx: Transaction) -> Self {
        Self {
            tx,
            signatures: Vec::new(),
        }
    }

    pub fn add_signature(&mut self, signature: DecoratedSignature) -> Result<()> {
        if self.signatures.len() >= MAX_SIGNATURES {
            return Err(TxError::TooManySignatures);
        }
        debug!(
            hint = %hex::encode(signature.hint.as_bytes()),
            count = self.signatures.len() + 1,
            "appended signature"
        );
        self.signatures.push(signature);
        Ok(())
    }

    /// Ask `signer` for a signature over this envelope's transaction.
    pub fn sign_with(&mut self, signer: &dyn TransactionSigner, network: &Network) -> Result<()> {
        let signature = signer.sign_transaction(&self.tx, network)?;
        self.add_signature(signature)
    }

    pub fn hash(&self, network: &Network) -> Result<Sha256Hash> {
        self.tx.hash(network)
    }

    /// True when some signature carries `keypair`'s hint and verifies.
    pub fn verify_signature(&self, keypair: &Keypair, network: &Network) -> Result<bool> {
        let hash = self.hash(network)?;
        Ok(self
            .signatures
            .iter()
            .any(|sig| keypair.verify_decorated(hash.as_bytes(), sig)))
    }

    pub fn to_bytes(&self) -> Result<Vec<u8>> {
        Ok(self.to_xdr()?)
    }

    pub fn to_base64(&self) -> Result<String> {
        Ok(encode_base64(&self.to_bytes()?))
    }

    /// Decode an envelope; trailing bytes are rejected.
    pub fn from_bytes(bytes: &[u8]) -> Result<Self> {
        Ok(Self::from_xdr_exact(bytes)?)
    }

    pub fn from_base64(text: &str) -> Result<Self> {
        Self::from_bytes(&lodestar_xdr::decode_base64(text)?)
    }
}

impl XdrEncode for TransactionEnvelope {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        self.tx.encode(w)?;
        w.write_array(&self.signatures, Some(MAX_SIGNATURES))
    }
}

impl XdrDecode for TransactionEnvelope {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        Ok(Self {
            tx: Transaction::decode(r)?,
            signatures: r.read_vec(Some(MAX_SIGNATURES))?,
        })
    }
}
