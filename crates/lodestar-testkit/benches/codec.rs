use criterion::{black_box, criterion_group, criterion_main, Criterion};

use lodestar_keys::{AccountId, Keypair, WordList};
use lodestar_testkit::fixtures::{multi_party_fixtures, sign_by_all};
use lodestar_tx::{Network, Operation, TransactionEnvelope, TransactionResult};

fn sample_envelope() -> TransactionEnvelope {
    let parties = multi_party_fixtures(2);
    let mut builder = parties[0].builder(42);
    for i in 0..10u8 {
        builder = builder
            .add_operation(Operation::account_merge(AccountId::from_bytes([i; 32])))
            .unwrap();
    }
    sign_by_all(builder, &parties, &Network::testnet())
}

fn bench_envelope(c: &mut Criterion) {
    let envelope = sample_envelope();
    let bytes = envelope.to_bytes().unwrap();
    let network = Network::testnet();

    c.bench_function("envelope_encode", |b| {
        b.iter(|| black_box(&envelope).to_bytes().unwrap())
    });
    c.bench_function("envelope_decode", |b| {
        b.iter(|| TransactionEnvelope::from_bytes(black_box(&bytes)).unwrap())
    });
    c.bench_function("transaction_hash", |b| {
        b.iter(|| black_box(&envelope.tx).hash(&network).unwrap())
    });
}

fn bench_keys(c: &mut Criterion) {
    let keypair = Keypair::from_raw_seed(&[7; 32]);
    let address = keypair.address();
    let message = [0u8; 32];
    let signature = keypair.sign(&message).unwrap();

    c.bench_function("address_decode", |b| {
        b.iter(|| AccountId::from_address(black_box(&address)).unwrap())
    });
    c.bench_function("sign", |b| b.iter(|| keypair.sign(black_box(&message)).unwrap()));
    c.bench_function("verify", |b| {
        b.iter(|| keypair.verify(black_box(&message), &signature))
    });

    let words = WordList::english();
    let mnemonic = "illness spike retreat truth genius clock brain pass fit cave bargain toe";
    c.bench_function("mnemonic_account", |b| {
        b.iter(|| Keypair::from_mnemonic(&words, black_box(mnemonic), "", 0).unwrap())
    });
}

fn bench_results(c: &mut Criterion) {
    c.bench_function("transaction_result_decode", |b| {
        b.iter(|| {
            TransactionResult::from_base64(black_box(
                "AAAAAAAAAGQAAAAAAAAAAQAAAAAAAAABAAAAAAAAAAA=",
            ))
            .unwrap()
        })
    });
}

criterion_group!(benches, bench_envelope, bench_keys, bench_results);
criterion_main!(benches);
