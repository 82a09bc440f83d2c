//! Signing capability: anything that can produce a decorated signature for
//! a transaction on a given network.

use lodestar_keys::{AccountId, DecoratedSignature, Keypair, Signature};
use std::io::Read;
use std::path::PathBuf;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread::{self, JoinHandle};
use std::time::{Duration, Instant};
use tracing::{debug, warn};

use crate::error::{Result, TxError};
use crate::network::Network;
use crate::transaction::Transaction;

/// Produces signatures over a transaction's signing hash.
pub trait TransactionSigner {
    fn sign_transaction(&self, tx: &Transaction, network: &Network) -> Result<DecoratedSignature>;
}

impl TransactionSigner for Keypair {
    fn sign_transaction(&self, tx: &Transaction, network: &Network) -> Result<DecoratedSignature> {
        let hash = tx.hash(network)?;
        Ok(self.sign_decorated(hash.as_bytes())?)
    }
}

/// In-process signer backed by a keypair.
#[derive(Debug, Clone)]
pub struct KeypairSigner {
    keypair: Keypair,
}

impl KeypairSigner {
    pub fn new(keypair: Keypair) -> Self {
        Self { keypair }
    }

    pub fn keypair(&self) -> &Keypair {
        &self.keypair
    }
}

impl From<Keypair> for KeypairSigner {
    fn from(keypair: Keypair) -> Self {
        Self::new(keypair)
    }
}

impl TransactionSigner for KeypairSigner {
    fn sign_transaction(&self, tx: &Transaction, network: &Network) -> Result<DecoratedSignature> {
        self.keypair.sign_transaction(tx, network)
    }
}

/// How long an external signer may run before it is killed.
pub const DEFAULT_SIGNER_TIMEOUT: Duration = Duration::from_secs(120);

const POLL_INTERVAL: Duration = Duration::from_millis(20);

/// Out-of-process signer: runs a program (for example a hardware wallet
/// bridge) with the hex signing hash as its last argument and reads the
/// signature from stdout, as hex or base64.
///
/// The program is killed once the timeout elapses; `None` waits for it
/// indefinitely.
#[derive(Debug, Clone)]
pub struct CommandSigner {
    program: PathBuf,
    args: Vec<String>,
    account: AccountId,
    timeout: Option<Duration>,
}

impl CommandSigner {
    pub fn new(program: impl Into<PathBuf>, args: Vec<String>, account: AccountId) -> Self {
        Self {
            program: program.into(),
            args,
            account,
            timeout: Some(DEFAULT_SIGNER_TIMEOUT),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn account(&self) -> &AccountId {
        &self.account
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.timeout
    }

    fn wait(&self, child: &mut Child) -> Result<ExitStatus> {
        let deadline = self.timeout.map(|timeout| Instant::now() + timeout);
        loop {
            let polled = child
                .try_wait()
                .map_err(|e| TxError::SignerFailed(format!("failed to poll signer: {e}")))?;
            if let Some(status) = polled {
                return Ok(status);
            }

            if deadline.is_some_and(|deadline| Instant::now() >= deadline) {
                let _ = child.kill();
                let _ = child.wait();
                warn!(program = %self.program.display(), "external signer timed out");
                return Err(TxError::SignerTimeout(format!(
                    "{} did not exit within {:?}",
                    self.program.display(),
                    self.timeout.unwrap_or_default()
                )));
            }

            thread::sleep(POLL_INTERVAL);
        }
    }

    fn parse_signature(stdout: &[u8]) -> Result<Signature> {
        let text = std::str::from_utf8(stdout)
            .map_err(|_| TxError::SignerFailed("signer output is not utf-8".to_string()))?
            .trim();
        let bytes = match hex::decode(text) {
            Ok(bytes) => bytes,
            Err(_) => lodestar_xdr::decode_base64(text).map_err(|_| {
                TxError::SignerFailed("signer output is neither hex nor base64".to_string())
            })?,
        };
        Signature::from_slice(&bytes).map_err(|_| {
            TxError::SignerFailed(format!("expected 64 signature bytes, got {}", bytes.len()))
        })
    }
}

impl TransactionSigner for CommandSigner {
    fn sign_transaction(&self, tx: &Transaction, network: &Network) -> Result<DecoratedSignature> {
        let hash = tx.hash(network)?;
        debug!(program = %self.program.display(), hash = %hash.to_hex(), "invoking external signer");

        let mut child = Command::new(&self.program)
            .args(&self.args)
            .arg(hash.to_hex())
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| TxError::SignerUnavailable(format!("{}: {e}", self.program.display())))?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());
        let status = self.wait(&mut child)?;
        let stdout = stdout.join().unwrap_or_default();
        let stderr = stderr.join().unwrap_or_default();

        if !status.success() {
            let stderr = String::from_utf8_lossy(&stderr).trim().to_string();
            warn!(program = %self.program.display(), status = %status, "external signer failed");
            return Err(TxError::SignerFailed(format!("{status}: {stderr}")));
        }

        let signature = Self::parse_signature(&stdout)?;
        let verifier = Keypair::from_public_key(self.account.as_bytes())?;
        if !verifier.verify(hash.as_bytes(), &signature) {
            warn!(account = %self.account, "external signature does not verify");
            return Err(TxError::SignerFailed(
                "signature does not verify for the configured account".to_string(),
            ));
        }
        Ok(DecoratedSignature::new(self.account.hint(), signature))
    }
}

/// Read a child pipe to the end on its own thread.
fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> JoinHandle<Vec<u8>> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        buf
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::operation::Operation;
    use crate::transaction::TransactionBuilder;
    use crate::types::SequenceNumber;

    fn transaction(source: AccountId) -> Transaction {
        TransactionBuilder::new(source, SequenceNumber::from(1))
            .add_operation(Operation::inflation())
            .unwrap()
            .build()
            .unwrap()
    }

    #[test]
    fn test_keypair_signer_matches_direct_signing() {
        let keypair = Keypair::random();
        let network = Network::testnet();
        let tx = transaction(keypair.account_id());
        let signer = KeypairSigner::from(keypair.clone());
        let sig = signer.sign_transaction(&tx, &network).unwrap();
        let hash = tx.hash(&network).unwrap();
        assert_eq!(sig, keypair.sign_decorated(hash.as_bytes()).unwrap());
    }

    #[test]
    fn test_public_only_keypair_cannot_sign() {
        let keypair = Keypair::random();
        let public = Keypair::from_address(&keypair.address()).unwrap();
        let tx = transaction(keypair.account_id());
        assert!(matches!(
            public.sign_transaction(&tx, &Network::testnet()),
            Err(TxError::Key(lodestar_keys::KeyError::SigningUnavailable))
        ));
    }

    #[test]
    fn test_parse_signature_formats() {
        let raw = [0xabu8; 64];
        let hex_text = format!("{}\n", hex::encode(raw));
        assert_eq!(CommandSigner::parse_signature(hex_text.as_bytes()).unwrap().0, raw);

        let b64 = lodestar_xdr::encode_base64(&raw);
        assert_eq!(CommandSigner::parse_signature(b64.as_bytes()).unwrap().0, raw);

        assert!(CommandSigner::parse_signature(b"abcd").is_err());
        assert!(CommandSigner::parse_signature(b"!!").is_err());
    }

    #[test]
    fn test_missing_program_is_unavailable() {
        let account = Keypair::random().account_id();
        let signer = CommandSigner::new("/nonexistent/lodestar-signer", Vec::new(), account);
        assert!(matches!(
            signer.sign_transaction(&transaction(account), &Network::testnet()),
            Err(TxError::SignerUnavailable(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_failing_program_reports_failure() {
        let account = Keypair::random().account_id();
        let signer = CommandSigner::new("false", Vec::new(), account);
        assert!(matches!(
            signer.sign_transaction(&transaction(account), &Network::testnet()),
            Err(TxError::SignerFailed(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_program_signature_is_decorated_with_account_hint() {
        let keypair = Keypair::random();
        let account = keypair.account_id();
        let network = Network::testnet();
        let tx = transaction(account);
        let expected = keypair.sign(tx.hash(&network).unwrap().as_bytes()).unwrap();

        // `sh -c script name hash`: the appended hash lands in $1 and is ignored
        let script = format!("echo {}", expected.to_hex());
        let signer = CommandSigner::new(
            "sh",
            vec!["-c".to_string(), script, "signer".to_string()],
            account,
        );
        let sig = signer.sign_transaction(&tx, &network).unwrap();
        assert_eq!(sig.hint, account.hint());
        assert_eq!(sig.ed25519(), Some(expected));
    }

    #[cfg(unix)]
    #[test]
    fn test_unverifiable_output_rejected() {
        let account = Keypair::random().account_id();
        // echo prints its arguments: the hash is 32 bytes, not a signature
        let signer = CommandSigner::new("echo", vec![hex::encode([0u8; 32])], account);
        assert!(matches!(
            signer.sign_transaction(&transaction(account), &Network::testnet()),
            Err(TxError::SignerFailed(_))
        ));
    }

    #[cfg(unix)]
    #[test]
    fn test_hung_program_is_killed_after_timeout() {
        let account = Keypair::random().account_id();
        let signer = CommandSigner::new(
            "sh",
            vec!["-c".to_string(), "sleep 30".to_string(), "signer".to_string()],
            account,
        )
        .with_timeout(Some(Duration::from_millis(200)));

        let started = Instant::now();
        let result = signer.sign_transaction(&transaction(account), &Network::testnet());
        assert!(matches!(result, Err(TxError::SignerTimeout(_))));
        assert!(started.elapsed() < Duration::from_secs(10));
    }

    #[test]
    fn test_default_timeout() {
        let account = Keypair::random().account_id();
        let signer = CommandSigner::new("signer", Vec::new(), account);
        assert_eq!(signer.timeout(), Some(DEFAULT_SIGNER_TIMEOUT));
        assert_eq!(signer.with_timeout(None).timeout(), None);
    }
}
