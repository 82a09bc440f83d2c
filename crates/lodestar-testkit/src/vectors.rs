//! Golden test vectors for deterministic verification.
//!
//! Key text, derivation and result decoding must agree byte for byte
//! with every other implementation of the network's wire format.

use lodestar_keys::{encode_check, KeyRole, Keypair, WordList};
use lodestar_tx::{OperationResult, OperationType, TransactionResult};
use serde::Serialize;

/// Fixed key material and the text it must encode to.
#[derive(Debug, Clone, Serialize)]
pub struct StrkeyVector {
    pub name: &'static str,
    pub role: KeyRole,
    /// 32-byte payload (hex).
    pub payload: &'static str,
    pub expected: &'static str,
}

/// A mnemonic, passphrase and account index with the expected account.
#[derive(Debug, Clone, Serialize)]
pub struct DerivationVector {
    pub name: &'static str,
    pub mnemonic: &'static str,
    pub passphrase: &'static str,
    pub index: u32,
    pub expected_address: &'static str,
    pub expected_seed: &'static str,
}

/// Which result type a payload holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum ResultKind {
    Operation,
    Transaction,
}

/// A base64 result payload and its decoded outcome.
#[derive(Debug, Clone, Serialize)]
pub struct ResultVector {
    pub name: &'static str,
    pub kind: ResultKind,
    pub base64: &'static str,
    pub success: bool,
    /// Fee charged; transaction results only.
    pub fee_charged: Option<i64>,
    /// Operation types of the per-operation results, in order.
    pub operations: &'static [OperationType],
}

const ILLNESS: &str = "illness spike retreat truth genius clock brain pass fit cave bargain toe";
const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                       abandon abandon abandon abandon abandon about";

pub fn all_strkey_vectors() -> Vec<StrkeyVector> {
    vec![
        StrkeyVector {
            name: "zero account",
            role: KeyRole::AccountId,
            payload: "0000000000000000000000000000000000000000000000000000000000000000",
            expected: "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
        },
        StrkeyVector {
            name: "wallet account 0 public key",
            role: KeyRole::AccountId,
            payload: "e3726830a0b60cb5f52c844cffcd4eed65eba5c155e89b26411562724e71e544",
            expected: "GDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6",
        },
    ]
}

pub fn all_derivation_vectors() -> Vec<DerivationVector> {
    vec![
        DerivationVector {
            name: "wallet account 0",
            mnemonic: ILLNESS,
            passphrase: "",
            index: 0,
            expected_address: "GDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6",
            expected_seed: "SBGWSG6BTNCKCOB3DIFBGCVMUPQFYPA2G4O34RMTB343OYPXU5DJDVMN",
        },
        DerivationVector {
            name: "wallet account 1",
            mnemonic: ILLNESS,
            passphrase: "",
            index: 1,
            expected_address: "GBAW5XGWORWVFE2XTJYDTLDHXTY2Q2MO73HYCGB3XMFMQ562Q2W2GJQX",
            expected_seed: "SCEPFFWGAG5P2VX5DHIYK3XEMZYLTYWIPWYEKXFHSK25RVMIUNJ7CTIS",
        },
        DerivationVector {
            name: "wallet account 2",
            mnemonic: ILLNESS,
            passphrase: "",
            index: 2,
            expected_address: "GAY5PRAHJ2HIYBYCLZXTHID6SPVELOOYH2LBPH3LD4RUMXUW3DOYTLXW",
            expected_seed: "SDAILLEZCSA67DUEP3XUPZJ7NYG7KGVRM46XA7K5QWWUIGADUZCZWTJP",
        },
        DerivationVector {
            name: "all-zero entropy account 0",
            mnemonic: ABANDON,
            passphrase: "",
            index: 0,
            expected_address: "GB3JDWCQJCWMJ3IILWIGDTQJJC5567PGVEVXSCVPEQOTDN64VJBDQBYX",
            expected_seed: "SBUV3MRWKNS6AYKZ6E6MOUVF2OYMON3MIUASWL3JLY5E3ISDJFELYBRZ",
        },
    ]
}

pub fn all_result_vectors() -> Vec<ResultVector> {
    vec![
        ResultVector {
            name: "successful payment",
            kind: ResultKind::Operation,
            base64: "AAAAAAAAAAEAAAAAAAAAAQAAAAAAAAAA",
            success: true,
            fee_charged: None,
            operations: &[OperationType::Payment],
        },
        ResultVector {
            name: "transaction with one payment",
            kind: ResultKind::Transaction,
            base64: "AAAAAAAAAGQAAAAAAAAAAQAAAAAAAAABAAAAAAAAAAA=",
            success: true,
            fee_charged: Some(100),
            operations: &[OperationType::Payment],
        },
    ]
}

fn check_strkey(v: &StrkeyVector) -> (bool, String) {
    let payload = match hex::decode(v.payload) {
        Ok(payload) => payload,
        Err(e) => return (false, e.to_string()),
    };
    let actual = match <[u8; 32]>::try_from(payload.as_slice()) {
        Ok(payload) => encode_check(v.role, &payload),
        Err(e) => return (false, e.to_string()),
    };
    (actual == v.expected, actual)
}

fn check_derivation(words: &WordList, v: &DerivationVector) -> (bool, String) {
    match Keypair::from_mnemonic(words, v.mnemonic, v.passphrase, v.index) {
        Ok(keypair) => {
            let address = keypair.address();
            let seed = keypair.secret_seed().unwrap_or_default();
            (
                address == v.expected_address && seed == v.expected_seed,
                address,
            )
        }
        Err(e) => (false, e.to_string()),
    }
}

fn check_result(v: &ResultVector) -> (bool, String) {
    match v.kind {
        ResultKind::Operation => match OperationResult::from_base64(v.base64) {
            Ok(result) => {
                let types: Vec<_> = result.operation_type().into_iter().collect();
                (
                    result.is_success() == v.success && types == v.operations,
                    format!("{result:?}"),
                )
            }
            Err(e) => (false, e.to_string()),
        },
        ResultKind::Transaction => match TransactionResult::from_base64(v.base64) {
            Ok(result) => {
                let types: Vec<_> = result
                    .results
                    .iter()
                    .filter_map(OperationResult::operation_type)
                    .collect();
                (
                    result.is_success() == v.success
                        && Some(result.fee_charged) == v.fee_charged
                        && types == v.operations,
                    format!("{result:?}"),
                )
            }
            Err(e) => (false, e.to_string()),
        },
    }
}

/// Check every vector; returns `(name, matches, actual)` per vector.
pub fn verify_all_vectors() -> Vec<(String, bool, String)> {
    let words = WordList::english();
    let strkeys = all_strkey_vectors().into_iter().map(|v| {
        let (ok, actual) = check_strkey(&v);
        (v.name.to_string(), ok, actual)
    });
    let derivations = all_derivation_vectors().into_iter().map(|v| {
        let (ok, actual) = check_derivation(&words, &v);
        (v.name.to_string(), ok, actual)
    });
    let results = all_result_vectors().into_iter().map(|v| {
        let (ok, actual) = check_result(&v);
        (v.name.to_string(), ok, actual)
    });
    strkeys.chain(derivations).chain(results).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_all_vectors_match() {
        for (name, matches, actual) in verify_all_vectors() {
            assert!(matches, "vector '{name}' produced {actual}");
        }
    }

    #[test]
    fn test_strkey_payload_length_checked() {
        let short = StrkeyVector {
            name: "short payload",
            role: KeyRole::AccountId,
            payload: "00",
            expected: "",
        };
        assert!(!check_strkey(&short).0);

        let zero = &all_strkey_vectors()[0];
        assert_eq!(check_strkey(zero), (true, zero.expected.to_string()));
    }

    #[test]
    fn test_derivation_is_deterministic() {
        let words = WordList::english();
        for v in all_derivation_vectors() {
            let a = Keypair::from_mnemonic(&words, v.mnemonic, v.passphrase, v.index).unwrap();
            let b = Keypair::from_mnemonic(&words, v.mnemonic, v.passphrase, v.index).unwrap();
            assert_eq!(a, b, "vector '{}'", v.name);
        }
    }

    #[test]
    fn test_passphrase_changes_account() {
        let words = WordList::english();
        let plain = Keypair::from_mnemonic(&words, ABANDON, "", 0).unwrap();
        let salted = Keypair::from_mnemonic(&words, ABANDON, "TREZOR", 0).unwrap();
        assert_ne!(plain.address(), salted.address());
    }

    #[test]
    fn test_vectors_serialize() {
        let json = serde_json::to_string(&all_derivation_vectors()).unwrap();
        assert!(json.contains("GDRXE2BQUC3AZNPVFSCEZ76NJ3WWL25FYFK6RGZGIEKWE4SOOHSUJUJ6"));
    }
}
