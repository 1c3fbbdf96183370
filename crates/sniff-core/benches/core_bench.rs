//! Benchmarks for mark detection.

use std::hint::black_box;

use criterion::{criterion_group, criterion_main, Criterion};

use sniff_core::{detect, strip_bom, Encoding};

fn bench_detect(c: &mut Criterion) {
    let mut group = c.benchmark_group("Detect");

    for encoding in Encoding::ALL {
        let mut bytes = encoding.mark().to_vec();
        bytes.extend_from_slice(b"body");
        group.bench_function(encoding.name(), |b| {
            b.iter(|| black_box(detect(black_box(&bytes))))
        });
    }

    group.bench_function("no_mark", |b| {
        b.iter(|| black_box(detect(black_box(b"Test"))))
    });

    group.bench_function("truncated", |b| {
        b.iter(|| black_box(detect(black_box(&[0xFFu8]))))
    });

    group.finish();
}

fn bench_strip(c: &mut Criterion) {
    let mut bytes = Encoding::Utf8.mark().to_vec();
    bytes.extend(std::iter::repeat(b'a').take(64 * 1024));

    c.bench_function("strip_bom_64k", |b| {
        b.iter(|| black_box(strip_bom(black_box(&bytes))))
    });
}

criterion_group!(benches, bench_detect, bench_strip);
criterion_main!(benches);
