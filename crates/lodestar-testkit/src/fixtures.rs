//! Test fixtures and helpers.
//!
//! Deterministic accounts for integration tests.

use lodestar_keys::{AccountId, Keypair};
use lodestar_tx::{
    Amount, Asset, Network, Operation, SequenceNumber, TransactionBuilder, TransactionEnvelope,
    TransactionSigner,
};

/// A signing account on a fixed network.
pub struct TestFixture {
    pub keypair: Keypair,
    pub network: Network,
}

impl TestFixture {
    /// Create a new test fixture with a random keypair on testnet.
    pub fn new() -> Self {
        Self {
            keypair: Keypair::random(),
            network: Network::testnet(),
        }
    }

    /// Create with a deterministic keypair from seed.
    pub fn with_seed(seed: [u8; 32]) -> Self {
        Self {
            keypair: Keypair::from_raw_seed(&seed),
            network: Network::testnet(),
        }
    }

    pub fn on_network(mut self, network: Network) -> Self {
        self.network = network;
        self
    }

    pub fn account_id(&self) -> AccountId {
        self.keypair.account_id()
    }

    pub fn address(&self) -> String {
        self.keypair.address()
    }

    /// A builder with this account as source.
    pub fn builder(&self, seq: i64) -> TransactionBuilder {
        TransactionBuilder::new(self.account_id(), SequenceNumber::from(seq))
    }

    /// A signed native payment of `units` lumens to `to`.
    pub fn make_payment(&self, seq: i64, to: &TestFixture, units: i64) -> TransactionEnvelope {
        let amount = Amount::from_units(units).expect("fixture amount in range");
        self.builder(seq)
            .add_operation(Operation::payment(to.account_id(), Asset::Native, amount))
            .expect("single operation")
            .sign(&[&self.keypair], &self.network)
            .expect("fixture keypair can sign")
    }

    /// A signed transaction funding a new account.
    pub fn make_create_account(
        &self,
        seq: i64,
        destination: &TestFixture,
        units: i64,
    ) -> TransactionEnvelope {
        let amount = Amount::from_units(units).expect("fixture amount in range");
        self.builder(seq)
            .add_operation(Operation::create_account(destination.account_id(), amount))
            .expect("single operation")
            .sign(&[&self.keypair], &self.network)
            .expect("fixture keypair can sign")
    }
}

impl Default for TestFixture {
    fn default() -> Self {
        Self::new()
    }
}

/// Create multiple test fixtures for multi-party tests.
pub fn multi_party_fixtures(count: usize) -> Vec<TestFixture> {
    (0..count)
        .map(|i| {
            let mut seed = [0u8; 32];
            seed[0] = i as u8;
            seed[31] = 0xff;
            TestFixture::with_seed(seed)
        })
        .collect()
}

/// Sign `builder` with every fixture, in order.
pub fn sign_by_all(
    builder: TransactionBuilder,
    parties: &[TestFixture],
    network: &Network,
) -> TransactionEnvelope {
    let signers: Vec<&dyn TransactionSigner> = parties
        .iter()
        .map(|p| &p.keypair as &dyn TransactionSigner)
        .collect();
    builder.sign(&signers, network).expect("fixture keypairs can sign")
}
