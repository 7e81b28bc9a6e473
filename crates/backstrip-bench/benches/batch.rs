//! Criterion benchmarks for sequential and parallel batch runs.

use std::hint::black_box;

use backstrip_bench::{bench_config, reference_batch, stress_batch};
use backstrip_engine::ColumnBatch;
use criterion::{criterion_group, criterion_main, Criterion};

fn bench_reference_sequential(c: &mut Criterion) {
    let batch = ColumnBatch::new(reference_batch(42), bench_config(None)).unwrap();
    c.bench_function("batch_64_sequential", |b| {
        b.iter(|| {
            let result = batch.run().unwrap();
            black_box(&result);
        });
    });
}

fn bench_reference_parallel(c: &mut Criterion) {
    let batch = ColumnBatch::new(reference_batch(42), bench_config(None)).unwrap();
    c.bench_function("batch_64_parallel", |b| {
        b.iter(|| {
            let result = batch.run_parallel().unwrap();
            black_box(&result);
        });
    });
}

fn bench_stress_parallel(c: &mut Criterion) {
    let batch = ColumnBatch::new(stress_batch(42), bench_config(None)).unwrap();
    let mut group = c.benchmark_group("stress");
    group.sample_size(10);
    group.bench_function("batch_1024_parallel", |b| {
        b.iter(|| {
            let result = batch.run_parallel().unwrap();
            black_box(&result);
        });
    });
    group.finish();
}

criterion_group!(
    benches,
    bench_reference_sequential,
    bench_reference_parallel,
    bench_stress_parallel
);
criterion_main!(benches);
