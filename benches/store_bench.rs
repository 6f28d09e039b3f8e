//! Benchmarks for psstore store operations

use criterion::{black_box, criterion_group, criterion_main, BatchSize, Criterion};
use psstore::store::{InsertRequest, Store};

fn batch(n: usize, prefix: &str) -> Vec<InsertRequest<i32>> {
    (0..n)
        .map(|i| InsertRequest::new(format!("{}{}", prefix, i), i as i32))
        .collect()
}

fn store_benchmarks(c: &mut Criterion) {
    c.bench_function("add_1000", |b| {
        b.iter_batched(
            Store::<i32>::new,
            |store| {
                for i in 0..1000 {
                    store.add(&format!("key{}", i), i).unwrap();
                }
                store
            },
            BatchSize::SmallInput,
        )
    });

    c.bench_function("bulk_add_1000_half_rejected", |b| {
        b.iter_batched(
            || {
                let store = Store::new();
                store.bulk_add(batch(500, "key"));
                (store, batch(1000, "key"))
            },
            |(store, entries)| black_box(store.bulk_add(entries)),
            BatchSize::SmallInput,
        )
    });

    let store = Store::new();
    store.bulk_add(batch(10_000, "key"));
    c.bench_function("get_hit", |b| {
        b.iter(|| black_box(store.get(black_box("key5000")).unwrap()))
    });
}

criterion_group!(benches, store_benchmarks);
criterion_main!(benches);
