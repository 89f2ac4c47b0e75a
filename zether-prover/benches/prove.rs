//! Criterion benchmarks for proof generation
//!
//! Run with: cargo bench -p zether-prover

use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use rand::SeedableRng;
use rand_chacha::ChaCha20Rng;
use std::hint::black_box;
use zether_prover::{
    bench_vectors::{demo_redeem, demo_transfer},
    redeem, transfer,
};

fn bench_prove_redeem(c: &mut Criterion) {
    let (st, wit) = demo_redeem(1_000, 300, 1);
    let mut group = c.benchmark_group("prove_redeem");
    group.throughput(Throughput::Elements(1));

    group.bench_function(BenchmarkId::from_parameter("single"), |b| {
        let mut rng = ChaCha20Rng::from_seed([1; 32]);
        b.iter(|| {
            let proof = redeem::prove(black_box(&st), black_box(&wit), &mut rng).expect("prove");
            black_box(proof);
        });
    });

    group.finish();
}

/// Cost growth with the anonymity set
fn bench_prove_transfer(c: &mut Criterion) {
    let mut group = c.benchmark_group("prove_transfer");
    group.throughput(Throughput::Elements(1));
    group.sample_size(20);

    for ring in [2usize, 4, 8, 16, 32] {
        let (st, wit) = demo_transfer(ring, (0, ring - 1), 1_000, 250, 1).expect("statement");
        group.bench_function(BenchmarkId::from_parameter(ring), |b| {
            let mut rng = ChaCha20Rng::from_seed([2; 32]);
            b.iter(|| {
                let proof =
                    transfer::prove(black_box(&st), black_box(&wit), &mut rng).expect("prove");
                black_box(proof);
            });
        });
    }

    group.finish();
}

criterion_group!(benches, bench_prove_redeem, bench_prove_transfer);
criterion_main!(benches);
