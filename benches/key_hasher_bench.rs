use chained_hashmap::{Fnv1a, KeyHasher, PolynomialRollingHash, StdHasher};
use criterion::{black_box, criterion_group, criterion_main, Criterion};
use std::collections::hash_map::RandomState;

const SAMPLES: [&str; 4] = [
    "217.60.239.0/24",
    "10.0.0.0/8",
    "malware.example.invalid",
    "a-much-longer-hostname.cdn.tracking.example.invalid",
];

fn bench_hashers(c: &mut Criterion) {
    let mut group = c.benchmark_group("key_hasher");
    group.bench_function("fnv1a", |b| {
        b.iter(|| {
            for s in SAMPLES {
                black_box(Fnv1a.hash_key(black_box(s)));
            }
        })
    });
    group.bench_function("polynomial_rolling", |b| {
        b.iter(|| {
            for s in SAMPLES {
                black_box(PolynomialRollingHash.hash_key(black_box(s)));
            }
        })
    });
    let std = StdHasher::<RandomState>::default();
    group.bench_function("std_sip", |b| {
        b.iter(|| {
            for s in SAMPLES {
                black_box(std.hash_key(black_box(s)));
            }
        })
    });
    group.finish();
}

criterion_group!(benches, bench_hashers);
criterion_main!(benches);
