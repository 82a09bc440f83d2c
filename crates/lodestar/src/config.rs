//! Client configuration: which network to sign for, the base fee, and an
//! optional external signer.
//!
//! ```json
//! {
//!   "network": { "passphrase": "Test SDF Network ; September 2015" },
//!   "base_fee": 200,
//!   "external_signer": {
//!     "program": "/usr/local/bin/ledger-sign",
//!     "args": ["--account", "0"],
//!     "account": "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF",
//!     "timeout_secs": 60
//!   }
//! }
//! ```

use lodestar_keys::AccountId;
use lodestar_tx::{
    CommandSigner, SequenceNumber, TransactionBuilder, BASE_FEE, DEFAULT_SIGNER_TIMEOUT,
};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

use crate::error::{Error, Result};

pub use lodestar_tx::{Network, PUBLIC_PASSPHRASE, TESTNET_PASSPHRASE};

/// How to reach an out-of-process signer.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandSignerConfig {
    /// Program to run.
    pub program: PathBuf,
    /// Arguments placed before the signing hash.
    #[serde(default)]
    pub args: Vec<String>,
    /// Account whose key the program holds.
    pub account: AccountId,
    /// Seconds before the program is killed; `null` waits indefinitely.
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: Option<u64>,
}

fn default_timeout_secs() -> Option<u64> {
    Some(DEFAULT_SIGNER_TIMEOUT.as_secs())
}

impl CommandSignerConfig {
    pub fn build(&self) -> CommandSigner {
        CommandSigner::new(self.program.clone(), self.args.clone(), self.account)
            .with_timeout(self.timeout_secs.map(Duration::from_secs))
    }
}

/// Client configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Network whose passphrase is mixed into every signature.
    pub network: Network,
    /// Fee per operation, in stroops.
    pub base_fee: u32,
    /// Signer to use instead of a local keypair.
    pub external_signer: Option<CommandSignerConfig>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            network: Network::testnet(),
            base_fee: BASE_FEE,
            external_signer: None,
        }
    }
}

impl ClientConfig {
    pub fn from_json_str(json: &str) -> Result<Self> {
        let config: Self =
            serde_json::from_str(json).map_err(|e| Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Read and validate a JSON config file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        debug!(path = %path.display(), passphrase = %config.network.passphrase, "loaded config");
        Ok(config)
    }

    pub fn validate(&self) -> Result<()> {
        if self.network.passphrase.is_empty() {
            return Err(Error::Config("network passphrase is empty".to_string()));
        }
        if self.base_fee == 0 {
            return Err(Error::Config("base fee must be positive".to_string()));
        }
        if let Some(signer) = &self.external_signer {
            if signer.timeout_secs == Some(0) {
                return Err(Error::Config("signer timeout must be positive".to_string()));
            }
        }
        Ok(())
    }

    /// A builder that charges this config's base fee.
    pub fn transaction_builder(
        &self,
        source: AccountId,
        sequence: SequenceNumber,
    ) -> TransactionBuilder {
        TransactionBuilder::new(source, sequence).with_base_fee(self.base_fee)
    }

    pub fn external_signer(&self) -> Option<CommandSigner> {
        self.external_signer.as_ref().map(CommandSignerConfig::build)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const ZERO_ADDRESS: &str = "GAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAAWHF";

    #[test]
    fn test_defaults() {
        let config = ClientConfig::default();
        assert_eq!(config.network, Network::testnet());
        assert_eq!(config.base_fee, 100);
        assert!(config.external_signer().is_none());
    }

    #[test]
    fn test_partial_json_uses_defaults() {
        let config = ClientConfig::from_json_str(r#"{ "base_fee": 250 }"#).unwrap();
        assert_eq!(config.base_fee, 250);
        assert_eq!(config.network.passphrase, TESTNET_PASSPHRASE);
    }

    #[test]
    fn test_full_json() {
        let json = format!(
            r#"{{
                "network": {{ "passphrase": "{PUBLIC_PASSPHRASE}" }},
                "external_signer": {{ "program": "/bin/signer", "account": "{ZERO_ADDRESS}" }}
            }}"#
        );
        let config = ClientConfig::from_json_str(&json).unwrap();
        assert_eq!(config.network, Network::public());
        let signer = config.external_signer.as_ref().unwrap();
        assert!(signer.args.is_empty());
        assert_eq!(signer.account.to_address(), ZERO_ADDRESS);
        assert!(config.external_signer().is_some());
    }

    #[test]
    fn test_invalid_config() {
        assert!(matches!(
            ClientConfig::from_json_str(r#"{ "base_fee": 0 }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_json_str(r#"{ "network": { "passphrase": "" } }"#),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_json_str(
                r#"{ "external_signer": { "program": "x", "account": "GBAD" } }"#
            ),
            Err(Error::Config(_))
        ));
        assert!(matches!(
            ClientConfig::from_json_str("not json"),
            Err(Error::Config(_))
        ));
    }

    #[test]
    fn test_load_from_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, r#"{{ "base_fee": 300 }}"#).unwrap();
        let config = ClientConfig::load(file.path()).unwrap();
        assert_eq!(config.base_fee, 300);

        let missing = file.path().with_extension("missing");
        assert!(matches!(ClientConfig::load(missing), Err(Error::Io(_))));
    }

    #[test]
    fn test_builder_uses_base_fee() {
        let config = ClientConfig {
            base_fee: 500,
            ..ClientConfig::default()
        };
        let tx = config
            .transaction_builder(AccountId::from_bytes([0; 32]), SequenceNumber::from(1))
            .add_operation(lodestar_tx::Operation::inflation())
            .unwrap()
            .build()
            .unwrap();
        assert_eq!(tx.fee, 500);
    }

    #[test]
    fn test_config_json_roundtrip() {
        let config = ClientConfig {
            network: Network::public(),
            base_fee: 1000,
            external_signer: Some(CommandSignerConfig {
                program: PathBuf::from("/bin/signer"),
                args: vec!["--fast".to_string()],
                account: AccountId::from_bytes([0; 32]),
                timeout_secs: None,
            }),
        };
        let json = serde_json::to_string(&config).unwrap();
        assert_eq!(ClientConfig::from_json_str(&json).unwrap(), config);
    }

    #[test]
    fn test_signer_timeout() {
        let json = format!(
            r#"{{ "external_signer": {{ "program": "x", "account": "{ZERO_ADDRESS}" }} }}"#
        );
        let signer = ClientConfig::from_json_str(&json).unwrap().external_signer().unwrap();
        assert_eq!(signer.timeout(), Some(DEFAULT_SIGNER_TIMEOUT));

        let json = format!(
            r#"{{ "external_signer": {{ "program": "x", "account": "{ZERO_ADDRESS}", "timeout_secs": 5 }} }}"#
        );
        let signer = ClientConfig::from_json_str(&json).unwrap().external_signer().unwrap();
        assert_eq!(signer.timeout(), Some(Duration::from_secs(5)));

        let json = format!(
            r#"{{ "external_signer": {{ "program": "x", "account": "{ZERO_ADDRESS}", "timeout_secs": null }} }}"#
        );
        let signer = ClientConfig::from_json_str(&json).unwrap().external_signer().unwrap();
        assert_eq!(signer.timeout(), None);

        let json = format!(
            r#"{{ "external_signer": {{ "program": "x", "account": "{ZERO_ADDRESS}", "timeout_secs": 0 }} }}"#
        );
        assert!(matches!(ClientConfig::from_json_str(&json), Err(Error::Config(_))));
    }
}
