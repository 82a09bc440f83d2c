//! Ed25519 keypairs and the signature types attached to envelopes.

use bytes::Bytes;
use ed25519_dalek::{Signature as DalekSignature, Signer, SigningKey, Verifier, VerifyingKey};
use lodestar_xdr::{Result as XdrResult, Sha256Hash, XdrDecode, XdrEncode, XdrReader, XdrWriter};
use std::fmt;
use zeroize::Zeroizing;

use crate::account::AccountId;
use crate::error::{KeyError, Result};
use crate::hd::HdNode;
use crate::mnemonic::WordList;
use crate::strkey::{decode_check, encode_check, KeyRole};

/// Largest signature blob an envelope accepts.
pub const MAX_SIGNATURE_LEN: usize = 64;

/// A 64-byte Ed25519 signature.
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct Signature(pub [u8; 64]);

impl Signature {
    pub const fn from_bytes(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }

    pub const fn as_bytes(&self) -> &[u8; 64] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex::encode(self.0)
    }

    /// Accept exactly 64 bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self> {
        let arr: [u8; 64] = bytes.try_into().map_err(|_| KeyError::InvalidSignature)?;
        Ok(Self(arr))
    }
}

impl fmt::Debug for Signature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Sig({}...)", &self.to_hex()[..8])
    }
}

impl AsRef<[u8]> for Signature {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl From<[u8; 64]> for Signature {
    fn from(bytes: [u8; 64]) -> Self {
        Self(bytes)
    }
}

/// Last four bytes of a signer's key; lets verifiers pick the right key.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct SignatureHint(pub [u8; 4]);

impl SignatureHint {
    pub fn from_public_key(key: &[u8; 32]) -> Self {
        Self([key[28], key[29], key[30], key[31]])
    }

    pub const fn as_bytes(&self) -> &[u8; 4] {
        &self.0
    }
}

impl fmt::Debug for SignatureHint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Hint({})", hex::encode(self.0))
    }
}

/// A signature tagged with its signer's hint, as carried in an envelope.
///
/// The blob is usually a 64-byte ed25519 signature, but hash-x signers
/// reveal a preimage of up to 64 bytes in the same slot.
#[derive(Clone, PartialEq, Eq)]
pub struct DecoratedSignature {
    pub hint: SignatureHint,
    pub signature: Bytes,
}

impl DecoratedSignature {
    pub fn new(hint: SignatureHint, signature: Signature) -> Self {
        Self {
            hint,
            signature: Bytes::copy_from_slice(signature.as_bytes()),
        }
    }

    /// Reveal a hash-x preimage. The hint is taken from `SHA256(preimage)`.
    pub fn hash_x(preimage: &[u8]) -> Result<Self> {
        if preimage.len() > MAX_SIGNATURE_LEN {
            return Err(KeyError::InvalidSignature);
        }
        let hash = Sha256Hash::hash(preimage);
        Ok(Self {
            hint: SignatureHint::from_public_key(hash.as_bytes()),
            signature: Bytes::copy_from_slice(preimage),
        })
    }

    /// The blob as an ed25519 signature, if it has the right length.
    pub fn ed25519(&self) -> Option<Signature> {
        Signature::from_slice(&self.signature).ok()
    }
}

impl fmt::Debug for DecoratedSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DecoratedSignature")
            .field("hint", &self.hint)
            .field("len", &self.signature.len())
            .finish()
    }
}

impl XdrEncode for DecoratedSignature {
    fn encode(&self, w: &mut XdrWriter) -> XdrResult<()> {
        w.write_fixed_opaque(&self.hint.0);
        w.write_var_opaque(&self.signature, Some(MAX_SIGNATURE_LEN))
    }
}

impl XdrDecode for DecoratedSignature {
    fn decode(r: &mut XdrReader<'_>) -> XdrResult<Self> {
        let hint = SignatureHint(r.read_array::<4>()?);
        let signature = Bytes::from(r.read_var_opaque(Some(MAX_SIGNATURE_LEN))?);
        Ok(Self { hint, signature })
    }
}

/// An ed25519 keypair.
///
/// Keypairs built from a public key or address alone can verify but every
/// signing call fails with [`KeyError::SigningUnavailable`].
#[derive(Clone)]
pub struct Keypair {
    signing_key: Option<SigningKey>,
    verifying_key: VerifyingKey,
}

impl Keypair {
    /// Generate a keypair from the OS random source.
    pub fn random() -> Self {
        let signing_key = SigningKey::generate(&mut rand::rngs::OsRng);
        Self::from_signing_key(signing_key)
    }

    /// Create from a 32-byte raw seed.
    pub fn from_raw_seed(seed: &[u8; 32]) -> Self {
        Self::from_signing_key(SigningKey::from_bytes(seed))
    }

    /// Create from `S...` seed text.
    pub fn from_seed(secret: &str) -> Result<Self> {
        let seed = Zeroizing::new(decode_check(KeyRole::Seed, secret)?);
        Ok(Self::from_raw_seed(&seed))
    }

    /// Public-only keypair from raw key bytes.
    pub fn from_public_key(key: &[u8; 32]) -> Result<Self> {
        let verifying_key = VerifyingKey::from_bytes(key).map_err(|_| KeyError::InvalidPublicKey)?;
        Ok(Self {
            signing_key: None,
            verifying_key,
        })
    }

    /// Public-only keypair from `G...` text.
    pub fn from_address(address: &str) -> Result<Self> {
        Self::from_public_key(&decode_check(KeyRole::AccountId, address)?)
    }

    /// Derive the wallet account at `m/44'/148'/index'` from a mnemonic.
    pub fn from_mnemonic(
        words: &WordList,
        mnemonic: &str,
        passphrase: &str,
        index: u32,
    ) -> Result<Self> {
        let seed = Zeroizing::new(words.mnemonic_to_seed_with_passphrase(mnemonic, passphrase)?);
        let node = HdNode::new_master_node(seed.as_ref())?
            .derive_path(&format!("m/44'/148'/{index}'"))?;
        Ok(node.to_keypair())
    }

    fn from_signing_key(signing_key: SigningKey) -> Self {
        let verifying_key = signing_key.verifying_key();
        Self {
            signing_key: Some(signing_key),
            verifying_key,
        }
    }

    pub fn can_sign(&self) -> bool {
        self.signing_key.is_some()
    }

    pub fn public_key(&self) -> [u8; 32] {
        self.verifying_key.to_bytes()
    }

    pub fn account_id(&self) -> AccountId {
        AccountId::from_bytes(self.public_key())
    }

    /// `G...` text for the public key.
    pub fn address(&self) -> String {
        encode_check(KeyRole::AccountId, &self.public_key())
    }

    /// `S...` text for the seed, if this keypair holds one.
    pub fn secret_seed(&self) -> Option<String> {
        self.signing_key
            .as_ref()
            .map(|key| encode_check(KeyRole::Seed, &key.to_bytes()))
    }

    pub fn raw_seed(&self) -> Option<Zeroizing<[u8; 32]>> {
        self.signing_key
            .as_ref()
            .map(|key| Zeroizing::new(key.to_bytes()))
    }

    pub fn hint(&self) -> SignatureHint {
        SignatureHint::from_public_key(&self.public_key())
    }

    pub fn sign(&self, message: &[u8]) -> Result<Signature> {
        let key = self
            .signing_key
            .as_ref()
            .ok_or(KeyError::SigningUnavailable)?;
        Ok(Signature(key.sign(message).to_bytes()))
    }

    pub fn sign_decorated(&self, message: &[u8]) -> Result<DecoratedSignature> {
        Ok(DecoratedSignature::new(self.hint(), self.sign(message)?))
    }

    /// Check a signature over `message`. Malformed input simply fails.
    pub fn verify(&self, message: &[u8], signature: &Signature) -> bool {
        let sig = DalekSignature::from_bytes(&signature.0);
        self.verifying_key.verify(message, &sig).is_ok()
    }

    /// Check a decorated signature: hint must match and the blob must verify.
    pub fn verify_decorated(&self, message: &[u8], signature: &DecoratedSignature) -> bool {
        signature.hint == self.hint()
            && signature
                .ed25519()
                .is_some_and(|sig| self.verify(message, &sig))
    }
}

impl fmt::Debug for Keypair {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Keypair")
            .field("address", &self.address())
            .field("can_sign", &self.can_sign())
            .finish()
    }
}

impl PartialEq for Keypair {
    fn eq(&self, other: &Self) -> bool {
        self.verifying_key == other.verifying_key && self.can_sign() == other.can_sign()
    }
}

impl Eq for Keypair {}
