//! Proptest generators for property-based testing.

use proptest::prelude::*;

use lodestar_keys::{AccountId, DecoratedSignature, Keypair, SignerKey};
use lodestar_tx::{
    AllowTrustOp, Amount, Asset, AssetCode, ChangeTrustOp, CreatePassiveOfferOp, ManageDataOp,
    ManageOfferOp, Memo, Network, Operation, PathPaymentOp, Price, SequenceNumber, SetOptionsOp,
    Signer, TimeBounds, Transaction, TransactionBuilder, TransactionEnvelope,
};

/// Generate a keypair able to sign.
pub fn keypair() -> impl Strategy<Value = Keypair> {
    any::<[u8; 32]>().prop_map(|seed| Keypair::from_raw_seed(&seed))
}

pub fn account_id() -> impl Strategy<Value = AccountId> {
    any::<[u8; 32]>().prop_map(AccountId::from_bytes)
}

pub fn signer_key() -> impl Strategy<Value = SignerKey> {
    prop_oneof![
        account_id().prop_map(SignerKey::from),
        any::<[u8; 32]>().prop_map(SignerKey::PreAuthTx),
        any::<[u8; 32]>().prop_map(SignerKey::HashX),
    ]
}

/// Any representable amount, zero included.
pub fn amount() -> impl Strategy<Value = Amount> {
    (0i64..=i64::MAX).prop_map(|stroops| Amount::from_stroops(stroops).unwrap())
}

/// A strictly positive amount.
pub fn positive_amount() -> impl Strategy<Value = Amount> {
    (1i64..=i64::MAX).prop_map(|stroops| Amount::from_stroops(stroops).unwrap())
}

pub fn price() -> impl Strategy<Value = Price> {
    (1u32..=i32::MAX as u32, 1u32..=i32::MAX as u32).prop_map(|(n, d)| Price::new(n, d))
}

pub fn asset_code() -> impl Strategy<Value = String> {
    "[A-Z0-9]{1,12}".prop_map(String::from)
}

pub fn asset() -> impl Strategy<Value = Asset> {
    prop_oneof![
        1 => Just(Asset::Native),
        3 => (asset_code(), account_id())
            .prop_map(|(code, issuer)| Asset::new(&code, issuer).unwrap()),
    ]
}

pub fn memo() -> impl Strategy<Value = Memo> {
    prop_oneof![
        Just(Memo::None),
        "[ -~]{0,28}".prop_map(|text| Memo::text(text).unwrap()),
        any::<u64>().prop_map(Memo::id),
        any::<[u8; 32]>().prop_map(Memo::hash),
        any::<[u8; 32]>().prop_map(Memo::return_hash),
    ]
}

pub fn time_bounds() -> impl Strategy<Value = TimeBounds> {
    (any::<u64>(), any::<u64>()).prop_map(|(a, b)| TimeBounds::new(a.min(b), a.max(b)))
}

pub fn sequence_number() -> impl Strategy<Value = SequenceNumber> {
    any::<i64>().prop_map(SequenceNumber::from)
}

fn weight() -> impl Strategy<Value = u32> {
    0u32..=255
}

fn set_options() -> impl Strategy<Value = SetOptionsOp> {
    (
        proptest::option::of(account_id()),
        proptest::option::of(1u32..=7),
        proptest::option::of(1u32..=7),
        proptest::option::of(weight()),
        proptest::option::of((weight(), weight(), weight())),
        proptest::option::of("[a-z.]{0,32}"),
        proptest::option::of((signer_key(), weight())),
    )
        .prop_map(|(inflation, clear, set, master, thresholds, domain, signer)| {
            let (low, med, high) = match thresholds {
                Some((l, m, h)) => (Some(l), Some(m), Some(h)),
                None => (None, None, None),
            };
            SetOptionsOp {
                inflation_dest: inflation,
                clear_flags: clear,
                set_flags: set,
                master_weight: master,
                low_threshold: low,
                med_threshold: med,
                high_threshold: high,
                home_domain: domain,
                signer: signer.map(|(key, weight)| Signer::new(key, weight).unwrap()),
            }
        })
}

fn path_payment() -> impl Strategy<Value = PathPaymentOp> {
    (
        asset(),
        amount(),
        account_id(),
        asset(),
        amount(),
        prop::collection::vec(asset(), 0..=5),
    )
        .prop_map(|(send, send_max, dest, dest_asset, dest_amount, path)| {
            path.into_iter()
                .try_fold(
                    PathPaymentOp::new(send, send_max, dest, dest_asset, dest_amount),
                    PathPaymentOp::add_path,
                )
                .unwrap()
        })
}

/// One operation of any type, with or without a source override.
pub fn operation() -> impl Strategy<Value = Operation> {
    let body = prop_oneof![
        (account_id(), amount()).prop_map(|(d, a)| Operation::create_account(d, a)),
        (account_id(), asset(), amount()).prop_map(|(d, s, a)| Operation::payment(d, s, a)),
        path_payment().prop_map(Operation::new),
        (asset(), asset(), amount(), price(), any::<u64>()).prop_map(|(s, b, a, p, id)| {
            Operation::new(ManageOfferOp::new(s, b, a, p).with_offer_id(id))
        }),
        (asset(), asset(), amount(), price()).prop_map(|(selling, buying, amount, price)| {
            Operation::new(CreatePassiveOfferOp {
                selling,
                buying,
                amount,
                price,
            })
        }),
        set_options().prop_map(Operation::new),
        (asset(), proptest::option::of(amount()))
            .prop_map(|(line, limit)| Operation::new(ChangeTrustOp::new(line, limit))),
        (account_id(), asset_code(), any::<bool>()).prop_map(|(trustor, code, auth)| {
            Operation::new(AllowTrustOp::new(trustor, AssetCode::new(&code).unwrap()).authorize(auth))
        }),
        account_id().prop_map(Operation::account_merge),
        Just(Operation::inflation()),
        (
            "[a-z0-9_]{1,64}",
            proptest::option::of(prop::collection::vec(any::<u8>(), 0..=64))
        )
            .prop_map(|(name, value)| {
                let op = match value {
                    Some(value) => ManageDataOp::new(&name, value),
                    None => ManageDataOp::clear(&name),
                };
                Operation::new(op.unwrap())
            }),
        sequence_number().prop_map(Operation::bump_sequence),
    ];
    (proptest::option::of(account_id()), body).prop_map(|(source, op)| match source {
        Some(source) => op.with_source(source),
        None => op,
    })
}

pub fn network() -> impl Strategy<Value = Network> {
    prop_oneof![
        Just(Network::public()),
        Just(Network::testnet()),
        "[ -~]{1,64}".prop_map(Network::custom),
    ]
}

/// Parameters for building a transaction.
#[derive(Debug, Clone)]
pub struct TransactionParams {
    pub source: Keypair,
    pub sequence: SequenceNumber,
    pub base_fee: u32,
    pub memo: Memo,
    pub time_bounds: Option<TimeBounds>,
    pub operations: Vec<Operation>,
    pub network: Network,
}

impl TransactionParams {
    pub fn builder(&self) -> TransactionBuilder {
        let mut builder = TransactionBuilder::new(self.source.account_id(), self.sequence.clone())
            .with_base_fee(self.base_fee)
            .memo(self.memo.clone());
        if let Some(bounds) = self.time_bounds {
            builder = builder.time_bounds(bounds);
        }
        for op in &self.operations {
            builder = builder.add_operation(op.clone()).unwrap();
        }
        builder
    }

    pub fn build(&self) -> Transaction {
        self.builder().build().unwrap()
    }

    /// The transaction signed by the source account.
    pub fn signed(&self) -> TransactionEnvelope {
        self.builder().sign(&[&self.source], &self.network).unwrap()
    }
}

impl Arbitrary for TransactionParams {
    type Parameters = ();
    type Strategy = BoxedStrategy<Self>;

    fn arbitrary_with(_: Self::Parameters) -> Self::Strategy {
        (
            keypair(),
            sequence_number(),
            1u32..=10_000,
            memo(),
            proptest::option::of(time_bounds()),
            prop::collection::vec(operation(), 1..=5),
            network(),
        )
            .prop_map(
                |(source, sequence, base_fee, memo, time_bounds, operations, network)| {
                    TransactionParams {
                        source,
                        sequence,
                        base_fee,
                        memo,
                        time_bounds,
                        operations,
                        network,
                    }
                },
            )
            .boxed()
    }
}

/// An envelope with between zero and three signatures.
pub fn envelope() -> impl Strategy<Value = TransactionEnvelope> {
    (any::<TransactionParams>(), prop::collection::vec(keypair(), 0..=3)).prop_map(
        |(params, signers)| {
            let mut envelope = params.builder().get_envelope().unwrap();
            for signer in &signers {
                envelope.sign_with(signer, &params.network).unwrap();
            }
            envelope
        },
    )
}

/// A hash-x signature over an arbitrary preimage.
pub fn hash_x_signature() -> impl Strategy<Value = DecoratedSignature> {
    prop::collection::vec(any::<u8>(), 0..=64)
        .prop_map(|preimage| DecoratedSignature::hash_x(&preimage).unwrap())
}
