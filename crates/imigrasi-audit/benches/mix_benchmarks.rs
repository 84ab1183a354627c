//! Criterion benchmarks for batch generation and mixing.

use chrono::NaiveDate;
use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use imigrasi_audit::prelude::*;

fn bench_generate_batch(c: &mut Criterion) {
    let tables = ReferenceTables::builtin();
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();

    let mut group = c.benchmark_group("generate_batch");
    for count in [6usize, 60, 600] {
        group.bench_with_input(BenchmarkId::from_parameter(count), &count, |b, &count| {
            let mut rng = DeskRng::seeded(42);
            b.iter(|| {
                black_box(generate_batch(
                    count,
                    &mut rng,
                    &tables,
                    now,
                    MixPolicy::WithReplacement,
                ))
            });
        });
    }
    group.finish();
}

fn bench_validity(c: &mut Criterion) {
    let tables = ReferenceTables::builtin();
    let now = NaiveDate::from_ymd_opt(2026, 10, 19)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap();
    let mut rng = DeskRng::seeded(7);
    let report = generate_batch(600, &mut rng, &tables, now, MixPolicy::WithReplacement);

    c.bench_function("violations_600_sets", |b| {
        b.iter(|| {
            report
                .sets
                .iter()
                .map(|set| violations(black_box(set), now.date()).len())
                .sum::<usize>()
        });
    });
}

criterion_group!(benches, bench_generate_batch, bench_validity);
criterion_main!(benches);
