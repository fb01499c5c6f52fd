//! Filter bank benchmarks
//!
//! Measures the per-frame cost of the bandpass transform.

use criterion::{black_box, criterion_group, criterion_main, Criterion, Throughput};
use cortex_core::{BandpassConfig, BandpassTransform, Frame};

fn benchmark_sample_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("sample_frames");

    for channels in [4, 8, 16, 64] {
        let mut transform = BandpassTransform::new(BandpassConfig::new(channels)).unwrap();
        let frame = Frame::from_samples((0..channels).map(|i| i as f64 * 0.1).collect())
            .with_field("timestamp", 0);

        group.throughput(Throughput::Elements(channels as u64));
        group.bench_function(format!("apply_{}_channels", channels), |b| {
            b.iter(|| black_box(transform.apply(black_box(frame.clone())).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_chunk_frames(c: &mut Criterion) {
    let mut group = c.benchmark_group("chunk_frames");

    // Typical EEG chunk sizes
    for chunk_size in [12, 32, 125, 256] {
        let channels = 8;
        let mut transform = BandpassTransform::new(BandpassConfig::new(channels)).unwrap();
        let chunks: Vec<Vec<f64>> = (0..channels)
            .map(|ch| {
                (0..chunk_size)
                    .map(|i| ((i + ch) as f64 * 0.05).sin())
                    .collect()
            })
            .collect();
        let frame = Frame::from_chunks(chunks);

        group.throughput(Throughput::Elements((chunk_size * channels) as u64));
        group.bench_function(format!("apply_8x{}", chunk_size), |b| {
            b.iter(|| black_box(transform.apply(black_box(frame.clone())).unwrap()))
        });
    }

    group.finish();
}

fn benchmark_construction(c: &mut Criterion) {
    c.bench_function("transform_new_64_channels", |b| {
        b.iter(|| BandpassTransform::new(black_box(BandpassConfig::new(64).with_order(4))).unwrap())
    });
}

criterion_group!(
    benches,
    benchmark_sample_frames,
    benchmark_chunk_frames,
    benchmark_construction
);
criterion_main!(benches);
