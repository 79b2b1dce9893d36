//! CAS validation benchmarks.
//!
//! Measures single-number validation and whole-column filtering.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use chemenrich::{find_invalid, validate, DataTable};

/// Sample CAS numbers, valid and not.
const CAS_SAMPLES: &[&str] = &[
    "7732-18-5",
    "80-05-7",
    "50-00-0",
    "64-17-5",
    "1333-74-0",
    "123-45-6",
    "7732185",
    "3380-34-5",
    "25013-16-5",
    "9002-86-2",
    "not-a-cas",
    "",
    "10043-35-3",
    "71-43-2",
    "108-88-3",
];

/// Benchmark single validations.
fn bench_validate(c: &mut Criterion) {
    let mut group = c.benchmark_group("cas_validate");

    group.bench_function("single", |b| {
        b.iter(|| validate(black_box("7732-18-5")))
    });

    group.bench_function("mixed_samples", |b| {
        b.iter(|| {
            for cas in CAS_SAMPLES {
                let _ = validate(black_box(cas));
            }
        })
    });

    group.finish();
}

/// Benchmark filtering tables of increasing size.
fn bench_find_invalid(c: &mut Criterion) {
    let mut group = c.benchmark_group("cas_find_invalid");

    for size in [100usize, 1_000, 10_000] {
        let rows = (0..size)
            .map(|i| {
                vec![
                    CAS_SAMPLES[i % CAS_SAMPLES.len()].to_string(),
                    format!("chemical_{}", i),
                ]
            })
            .collect();
        let table = DataTable::new(vec!["cas".into(), "name".into()], rows, b',');

        group.bench_with_input(BenchmarkId::from_parameter(size), &table, |b, table| {
            b.iter(|| find_invalid(black_box(table), "cas"))
        });
    }

    group.finish();
}

criterion_group!(benches, bench_validate, bench_find_invalid);
criterion_main!(benches);
