//! Benchmarks for sparse compression, reconstruction, and batch framing.
//!
//! Run with: `cargo bench -p seere-sparse`

use bytes::Bytes;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion, Throughput};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use seere_core::QuantizationFilter;
use seere_sparse::{SparseCodec, SparseFilter};

const CLIP: f64 = 1.0;
const ELEMENTS: usize = 64 * 1024;

/// Generate a gradient-like f32 buffer where roughly `density` of the
/// elements exceed the clip threshold.
fn generate_gradient_data(elements: usize, density: f64, seed: u64) -> Bytes {
    let mut rng = StdRng::seed_from_u64(seed);
    let mut out = Vec::with_capacity(elements * 4);
    for _ in 0..elements {
        let value: f32 = if rng.gen_bool(density) {
            let magnitude = rng.gen_range(1.5f32..10.0);
            if rng.gen_bool(0.5) {
                magnitude
            } else {
                -magnitude
            }
        } else {
            rng.gen_range(-0.5f32..0.5)
        };
        out.extend_from_slice(&value.to_le_bytes());
    }
    Bytes::from(out)
}

fn bench_compress(c: &mut Criterion) {
    let codec = SparseCodec::<f32, u32>::new(CLIP).unwrap();
    let mut group = c.benchmark_group("sparse_compress");

    for density in [0.01, 0.05, 0.2] {
        let data = generate_gradient_data(ELEMENTS, density, 42);
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("density_{density}")),
            &data,
            |b, data| b.iter(|| codec.try_compress(black_box(data)).unwrap()),
        );
    }

    // Dense enough that the cutoff rejects; measures the bare scan.
    let dense = generate_gradient_data(ELEMENTS, 0.8, 42);
    group.throughput(Throughput::Bytes(dense.len() as u64));
    group.bench_with_input(
        BenchmarkId::from_parameter("density_0.8_rejected"),
        &dense,
        |b, data| b.iter(|| codec.try_compress(black_box(data)).unwrap()),
    );
    group.finish();
}

fn bench_decompress(c: &mut Criterion) {
    let codec = SparseCodec::<f32, u32>::new(CLIP).unwrap();
    let mut group = c.benchmark_group("sparse_decompress");

    for density in [0.01, 0.05, 0.2] {
        let data = generate_gradient_data(ELEMENTS, density, 42);
        let encoded = codec.try_compress(&data).unwrap().unwrap();
        group.throughput(Throughput::Bytes(data.len() as u64));
        group.bench_with_input(
            BenchmarkId::from_parameter(format!("density_{density}")),
            &encoded,
            |b, encoded| b.iter(|| codec.decompress(black_box(encoded), data.len()).unwrap()),
        );
    }
    group.finish();
}

fn bench_batch_filter(c: &mut Criterion) {
    let filter = SparseFilter::<f32, u32>::new(CLIP).unwrap();
    let batch: Vec<Bytes> = (0..8)
        .map(|i| generate_gradient_data(ELEMENTS, 0.05, 42 + i))
        .collect();
    let total: u64 = batch.iter().map(|b| b.len() as u64).sum();

    let mut group = c.benchmark_group("sparse_batch");
    group.throughput(Throughput::Bytes(total));
    group.bench_function("filter_in", |b| {
        b.iter(|| filter.filter_in(black_box(&batch)).unwrap())
    });

    let framed = filter.filter_in(&batch).unwrap();
    group.bench_function("filter_out", |b| {
        b.iter(|| filter.filter_out(black_box(&framed)).unwrap())
    });
    group.finish();
}

criterion_group!(benches, bench_compress, bench_decompress, bench_batch_filter);
criterion_main!(benches);
