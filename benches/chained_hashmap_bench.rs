use chained_hashmap::{Builder, ChainedHashMap, Fnv1a};
use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use std::time::Duration;

fn lcg(mut s: u64) -> impl Iterator<Item = u64> {
    std::iter::from_fn(move || {
        s = s.wrapping_mul(6364136223846793005).wrapping_add(1);
        Some(s)
    })
}

fn key(n: u64) -> String {
    format!("k{:016x}", n)
}

// Sized for a 0.75 load factor, like a blocklist loader would.
fn filled(n: usize, seed: u64) -> (ChainedHashMap<String, u64, Fnv1a>, Vec<String>) {
    let mut m = Builder::new(n * 4 / 3).hasher(Fnv1a).build();
    let keys: Vec<_> = lcg(seed).take(n).map(key).collect();
    for (i, k) in keys.iter().enumerate() {
        m.insert(k.clone(), i as u64);
    }
    (m, keys)
}

fn bench_insert(c: &mut Criterion) {
    c.bench_function("chained_hashmap_insert_10k", |b| {
        b.iter_batched(
            || Builder::new(13_334).hasher(Fnv1a).build::<String, u64>(),
            |mut m| {
                for (i, x) in lcg(1).take(10_000).enumerate() {
                    m.insert(key(x), i as u64);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_find_hit(c: &mut Criterion) {
    c.bench_function("chained_hashmap_find_hit", |b| {
        let (m, keys) = filled(20_000, 7);
        let mut it = keys.iter().cycle();
        b.iter(|| {
            let k = it.next().unwrap();
            black_box(m.get(k.as_str()));
        })
    });
}

fn bench_find_miss(c: &mut Criterion) {
    c.bench_function("chained_hashmap_find_miss", |b| {
        let (m, _) = filled(10_000, 11);
        let mut miss = lcg(0xdead_beef);
        b.iter(|| {
            let k = key(miss.next().unwrap());
            black_box(m.contains_key(k.as_str()));
        })
    });
}

fn bench_iterate(c: &mut Criterion) {
    c.bench_function("chained_hashmap_iterate_10k", |b| {
        let (m, _) = filled(10_000, 3);
        b.iter(|| black_box(m.values().sum::<u64>()))
    });
}

fn bench_erase_at_drain(c: &mut Criterion) {
    c.bench_function("chained_hashmap_erase_at_drain_10k", |b| {
        b.iter_batched(
            || filled(10_000, 5).0,
            |mut m| {
                let mut cursor = m.first();
                while let Some(h) = cursor {
                    cursor = m.erase_at(h);
                }
                black_box(m)
            },
            BatchSize::SmallInput,
        )
    });
}

fn bench_config() -> Criterion {
    Criterion::default()
        .sample_size(50)
        .measurement_time(Duration::from_secs(8))
        .warm_up_time(Duration::from_secs(2))
}

criterion_group! {
    name = benches;
    config = bench_config();
    targets = bench_insert, bench_find_hit, bench_find_miss, bench_iterate, bench_erase_at_drain
}
criterion_main!(benches);
