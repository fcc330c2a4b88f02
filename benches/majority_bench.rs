//! Benchmarks for BHV algebra, distance and majority

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use bhv::{
    Hypervector, MajorityEngine, MajorityStrategy, Packed64Bhv, Packed8Bhv, RandomSource,
    UnpackedBhv,
};

fn random_vectors<V: Hypervector>(count: usize, seed: u64) -> Vec<V> {
    let mut rng = RandomSource::from_seed(seed);
    (0..count).map(|_| V::rand(&mut rng)).collect()
}

/// Benchmark bitwise algebra on each encoding
fn bench_algebra(c: &mut Criterion) {
    let mut group = c.benchmark_group("algebra");
    group.throughput(Throughput::Elements(1));

    let v64 = random_vectors::<Packed64Bhv>(3, 1);
    group.bench_function("xor_packed64", |bencher| {
        bencher.iter(|| black_box(&v64[0]).xor(black_box(&v64[1])));
    });
    group.bench_function("select_packed64", |bencher| {
        bencher.iter(|| black_box(&v64[0]).select(black_box(&v64[1]), black_box(&v64[2])));
    });

    let v8 = random_vectors::<Packed8Bhv>(2, 1);
    group.bench_function("xor_packed8", |bencher| {
        bencher.iter(|| black_box(&v8[0]).xor(black_box(&v8[1])));
    });

    let vb = random_vectors::<UnpackedBhv>(2, 1);
    group.bench_function("xor_unpacked", |bencher| {
        bencher.iter(|| black_box(&vb[0]).xor(black_box(&vb[1])));
    });

    group.finish();
}

/// Benchmark Hamming distance
fn bench_hamming(c: &mut Criterion) {
    let v64 = random_vectors::<Packed64Bhv>(2, 2);
    let v8 = random_vectors::<Packed8Bhv>(2, 2);

    let mut group = c.benchmark_group("hamming");
    group.throughput(Throughput::Elements(1));

    group.bench_function("packed64", |bencher| {
        bencher.iter(|| black_box(&v64[0]).hamming(black_box(&v64[1])));
    });
    group.bench_function("packed8", |bencher| {
        bencher.iter(|| black_box(&v8[0]).hamming(black_box(&v8[1])));
    });

    group.finish();
}

/// Circuit vs counting majority for growing N
fn bench_majority(c: &mut Criterion) {
    let mut group = c.benchmark_group("majority");
    let circuit = MajorityEngine::with_strategy(MajorityStrategy::Circuit);
    let counting = MajorityEngine::with_strategy(MajorityStrategy::Counting);

    for n in [3usize, 7, 9, 33] {
        let vectors = random_vectors::<Packed64Bhv>(n, 3);
        let refs: Vec<&Packed64Bhv> = vectors.iter().collect();
        group.throughput(Throughput::Elements(n as u64));

        group.bench_with_input(BenchmarkId::new("circuit", n), &refs, |bencher, refs| {
            let mut rng = RandomSource::from_seed(4);
            bencher.iter(|| circuit.majority(black_box(refs), &mut rng));
        });

        group.bench_with_input(BenchmarkId::new("counting", n), &refs, |bencher, refs| {
            let mut rng = RandomSource::from_seed(4);
            bencher.iter(|| counting.majority(black_box(refs), &mut rng));
        });
    }

    group.finish();
}

/// Even N pays for one random vector
fn bench_even_majority(c: &mut Criterion) {
    let vectors = random_vectors::<Packed64Bhv>(8, 5);
    let refs: Vec<&Packed64Bhv> = vectors.iter().collect();
    let mut rng = RandomSource::from_seed(6);

    c.bench_function("majority_even_8", |bencher| {
        bencher.iter(|| Packed64Bhv::majority(black_box(&refs), &mut rng));
    });
}

criterion_group!(
    benches,
    bench_algebra,
    bench_hamming,
    bench_majority,
    bench_even_majority,
);

criterion_main!(benches);
