//! Benchmarks for hugearray access paths

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use hugearray::storage::AnonymousMap;
use hugearray::{ArrayConfig, HugeArray, MappedHugeArray, MemoryArray};

const LEN: u64 = 1 << 20;

fn config() -> ArrayConfig {
    ArrayConfig::builder().segment_capacity(1 << 16).build()
}

fn array_benchmarks(c: &mut Criterion) {
    let mut mapped = MappedHugeArray::<u64, AnonymousMap>::anonymous(LEN, &config()).unwrap();
    let mut memory = MemoryArray::<u64>::new(LEN).unwrap();

    c.bench_function("mapped_sequential_write", |b| {
        b.iter(|| {
            for index in 0..LEN {
                mapped.set(index, index).unwrap();
            }
        })
    });

    c.bench_function("mapped_sequential_read", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for index in 0..LEN {
                sum = sum.wrapping_add(mapped.get(index).unwrap());
            }
            black_box(sum)
        })
    });

    c.bench_function("mapped_strided_read", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for step in 0..LEN {
                let index = step.wrapping_mul(4099) % LEN;
                sum = sum.wrapping_add(mapped.get(index).unwrap());
            }
            black_box(sum)
        })
    });

    c.bench_function("memory_sequential_read", |b| {
        b.iter(|| {
            let mut sum = 0u64;
            for index in 0..LEN {
                sum = sum.wrapping_add(memory.get(index).unwrap());
            }
            black_box(sum)
        })
    });
}

criterion_group!(benches, array_benchmarks);
criterion_main!(benches);
