//! Mnemonic phrases: entropy ↔ words, and words → 64-byte wallet seed.
//!
//! Each word carries 11 bits. A phrase of `n` words holds `n * 32 / 3`
//! bits of entropy followed by the first `entropy_bits / 32` bits of
//! `SHA256(entropy)` as a checksum.

use hmac::Hmac;
use rand::RngCore;
use sha2::{Digest, Sha256, Sha512};
use std::collections::HashMap;
use zeroize::Zeroizing;

use crate::error::DerivationError;

type Result<T> = std::result::Result<T, DerivationError>;

const WORD_COUNT: usize = 2048;
const BITS_PER_WORD: usize = 11;
const SEED_ROUNDS: u32 = 2048;
const SALT_PREFIX: &str = "mnemonic";

/// An owned 2048-word list used to encode and decode phrases.
///
/// Callers hold the list explicitly; nothing here is cached globally.
#[derive(Debug, Clone)]
pub struct WordList {
    words: Vec<String>,
    index: HashMap<String, u16>,
}

impl WordList {
    /// The standard English list.
    pub fn english() -> Self {
        let words: Vec<String> = bip39::Language::English
            .word_list()
            .iter()
            .map(|w| (*w).to_string())
            .collect();
        let index = words
            .iter()
            .enumerate()
            .map(|(i, w)| (w.clone(), i as u16))
            .collect();
        Self { words, index }
    }

    /// Build from a custom list of exactly 2048 distinct words.
    pub fn from_words<I, S>(words: I) -> Result<Self>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let words: Vec<String> = words.into_iter().map(Into::into).collect();
        if words.len() != WORD_COUNT {
            return Err(DerivationError::InvalidWordList(words.len()));
        }
        let mut index = HashMap::with_capacity(WORD_COUNT);
        for (i, word) in words.iter().enumerate() {
            if index.insert(word.clone(), i as u16).is_some() {
                return Err(DerivationError::InvalidWordList(words.len()));
            }
        }
        Ok(Self { words, index })
    }

    pub fn word(&self, index: u16) -> Option<&str> {
        self.words.get(index as usize).map(String::as_str)
    }

    pub fn index_of(&self, word: &str) -> Option<u16> {
        self.index.get(word).copied()
    }

    /// Encode 16..=32 bytes (a multiple of 4) of entropy as a phrase.
    pub fn entropy_to_mnemonic(&self, entropy: &[u8]) -> Result<String> {
        if !(16..=32).contains(&entropy.len()) || entropy.len() % 4 != 0 {
            return Err(DerivationError::InvalidEntropyLength(entropy.len()));
        }

        let checksum_bits = entropy.len() * 8 / 32;
        let digest = Sha256::digest(entropy);
        let mut bits = to_bits(entropy);
        bits.extend(to_bits(&digest).into_iter().take(checksum_bits));

        let phrase: Vec<&str> = bits
            .chunks(BITS_PER_WORD)
            .map(|chunk| {
                let idx = chunk.iter().fold(0usize, |acc, &bit| (acc << 1) | bit as usize);
                self.words[idx].as_str()
            })
            .collect();
        Ok(phrase.join(" "))
    }

    /// Fresh phrase from `entropy_bits` (128..=256, multiple of 32) of OS randomness.
    pub fn generate_mnemonic(&self, entropy_bits: usize) -> Result<String> {
        if entropy_bits % 8 != 0 {
            return Err(DerivationError::InvalidEntropyLength(entropy_bits / 8));
        }
        let mut entropy = Zeroizing::new(vec![0u8; entropy_bits / 8]);
        rand::rngs::OsRng.fill_bytes(&mut entropy);
        self.entropy_to_mnemonic(&entropy)
    }

    /// Decode a phrase back to its entropy, verifying the checksum.
    pub fn mnemonic_to_entropy(&self, mnemonic: &str) -> Result<Vec<u8>> {
        let words: Vec<&str> = mnemonic.split_whitespace().collect();
        if words.is_empty() || words.len() % 3 != 0 {
            return Err(DerivationError::InvalidWordCount(words.len()));
        }

        let mut bits = Vec::with_capacity(words.len() * BITS_PER_WORD);
        for word in &words {
            let idx = self
                .index_of(word)
                .ok_or_else(|| DerivationError::UnknownWord((*word).to_string()))?;
            bits.extend((0..BITS_PER_WORD).rev().map(|shift| (idx >> shift) & 1 == 1));
        }

        let checksum_bits = bits.len() / 33;
        let entropy_bits = bits.len() - checksum_bits;
        let entropy: Vec<u8> = bits[..entropy_bits]
            .chunks(8)
            .map(|byte| byte.iter().fold(0u8, |acc, &bit| (acc << 1) | bit as u8))
            .collect();

        let digest = Sha256::digest(&entropy);
        let expected = to_bits(&digest);
        if bits[entropy_bits..] != expected[..checksum_bits] {
            return Err(DerivationError::ChecksumMismatch);
        }
        Ok(entropy)
    }

    pub fn mnemonic_to_seed(&self, mnemonic: &str) -> Result<[u8; 64]> {
        self.mnemonic_to_seed_with_passphrase(mnemonic, "")
    }

    /// PBKDF2-HMAC-SHA512 over the phrase, salted with `"mnemonic" + passphrase`.
    ///
    /// The phrase must decode cleanly first; whitespace is normalized to
    /// single spaces.
    pub fn mnemonic_to_seed_with_passphrase(
        &self,
        mnemonic: &str,
        passphrase: &str,
    ) -> Result<[u8; 64]> {
        self.mnemonic_to_entropy(mnemonic)?;
        let normalized = Zeroizing::new(mnemonic.split_whitespace().collect::<Vec<_>>().join(" "));
        let salt = Zeroizing::new(format!("{SALT_PREFIX}{passphrase}"));

        stretch_seed(normalized.as_bytes(), salt.as_bytes())
    }
}

fn stretch_seed(password: &[u8], salt: &[u8]) -> Result<[u8; 64]> {
    let mut seed = [0u8; 64];
    pbkdf2::pbkdf2::<Hmac<Sha512>>(password, salt, SEED_ROUNDS, &mut seed)
        .map_err(|e| DerivationError::SeedStretch(e.to_string()))?;
    Ok(seed)
}

fn to_bits(bytes: &[u8]) -> Vec<bool> {
    bytes
        .iter()
        .flat_map(|byte| (0..8).rev().map(move |shift| (byte >> shift) & 1 == 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    const ABANDON: &str = "abandon abandon abandon abandon abandon abandon \
                           abandon abandon abandon abandon abandon about";

    #[test]
    fn test_english_list() {
        let words = WordList::english();
        assert_eq!(words.word(0), Some("abandon"));
        assert_eq!(words.word(2047), Some("zoo"));
        assert_eq!(words.index_of("about"), Some(3));
        assert_eq!(words.word(2048), None);
    }

    #[test]
    fn test_entropy_vectors() {
        let words = WordList::english();
        assert_eq!(words.entropy_to_mnemonic(&[0u8; 16]).unwrap(), ABANDON);
        assert_eq!(
            words.entropy_to_mnemonic(&[0x7f; 16]).unwrap(),
            "legal winner thank year wave sausage worth useful legal winner thank yellow"
        );
        assert_eq!(
            words.entropy_to_mnemonic(&[0xff; 16]).unwrap(),
            "zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo zoo wrong"
        );
    }

    #[test]
    fn test_entropy_roundtrip_all_lengths() {
        let words = WordList::english();
        for len in [16usize, 20, 24, 28, 32] {
            let entropy: Vec<u8> = (0..len as u8).map(|b| b.wrapping_mul(37)).collect();
            let phrase = words.entropy_to_mnemonic(&entropy).unwrap();
            assert_eq!(phrase.split(' ').count(), len * 8 * 33 / 32 / 11);
            assert_eq!(words.mnemonic_to_entropy(&phrase).unwrap(), entropy);
        }
    }

    #[test]
    fn test_bad_entropy_length() {
        let words = WordList::english();
        assert!(matches!(
            words.entropy_to_mnemonic(&[0u8; 15]),
            Err(DerivationError::InvalidEntropyLength(15))
        ));
        assert!(matches!(
            words.entropy_to_mnemonic(&[0u8; 36]),
            Err(DerivationError::InvalidEntropyLength(36))
        ));
    }

    #[test]
    fn test_bad_phrases() {
        let words = WordList::english();
        assert!(matches!(
            words.mnemonic_to_entropy("abandon abandon"),
            Err(DerivationError::InvalidWordCount(2))
        ));
        assert!(matches!(
            words.mnemonic_to_entropy(""),
            Err(DerivationError::InvalidWordCount(0))
        ));
        assert!(matches!(
            words.mnemonic_to_entropy(&ABANDON.replace("about", "aboot")),
            Err(DerivationError::UnknownWord(w)) if w == "aboot"
        ));
        assert!(matches!(
            words.mnemonic_to_entropy(&ABANDON.replace("about", "abandon")),
            Err(DerivationError::ChecksumMismatch)
        ));
    }

    #[test]
    fn test_seed_vectors() {
        let words = WordList::english();
        assert_eq!(
            hex::encode(words.mnemonic_to_seed(ABANDON).unwrap()),
            "5eb00bbddcf069084889a8ab9155568165f5c453ccb85e70811aaed6f6da5fc1\
             9a5ac40b389cd370d086206dec8aa6c43daea6690f20ad3d8d48b2d2ce9e38e4"
        );
        assert_eq!(
            hex::encode(words.mnemonic_to_seed_with_passphrase(ABANDON, "TREZOR").unwrap()),
            "c55257c360c07c72029aebc1b53c05ed0362ada38ead3e3e9efa3708e5349553\
             1f09a6987599d18264c1e1c92f2cf141630c7a3c4ab7c81b2f001698e7463b04"
        );
    }

    #[test]
    fn test_stretch_seed_has_own_error() {
        let seed = stretch_seed(ABANDON.as_bytes(), b"mnemonicTREZOR").unwrap();
        assert_eq!(&hex::encode(seed)[..8], "c55257c3");

        let err = DerivationError::SeedStretch("invalid length".to_string());
        assert_ne!(err, DerivationError::InvalidEntropyLength(64));
        assert_eq!(err.to_string(), "seed stretching failed: invalid length");
    }

    #[test]
    fn test_seed_ignores_extra_whitespace() {
        let words = WordList::english();
        let spaced = format!("  {}  ", ABANDON.replace(' ', "\n "));
        assert_eq!(
            words.mnemonic_to_seed(&spaced).unwrap(),
            words.mnemonic_to_seed(ABANDON).unwrap()
        );
    }

    #[test]
    fn test_generate() {
        let words = WordList::english();
        let phrase = words.generate_mnemonic(256).unwrap();
        assert_eq!(phrase.split(' ').count(), 24);
        assert_eq!(words.mnemonic_to_entropy(&phrase).unwrap().len(), 32);
        assert!(words.generate_mnemonic(100).is_err());
    }

    #[test]
    fn test_custom_word_list() {
        let custom: Vec<String> = (0..2048).map(|i| format!("w{i}")).collect();
        let words = WordList::from_words(custom).unwrap();
        let phrase = words.entropy_to_mnemonic(&[0u8; 16]).unwrap();
        assert!(phrase.starts_with("w0 w0"));
        assert_eq!(words.mnemonic_to_entropy(&phrase).unwrap(), vec![0u8; 16]);

        assert!(matches!(
            WordList::from_words(["a", "b"]),
            Err(DerivationError::InvalidWordList(2))
        ));
        let dupes: Vec<String> = (0..2048).map(|i| format!("w{}", i % 2047)).collect();
        assert!(WordList::from_words(dupes).is_err());
    }
}
