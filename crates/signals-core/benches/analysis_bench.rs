//! Benchmarks for the analysis engine.

#![allow(clippy::unwrap_used)]

use criterion::{Criterion, criterion_group, criterion_main};
use signals_core::{Catalogue, CourseCatalogue, FieldWeights, GradeInput, Phase, analyze};
use std::hint::black_box;

fn full_transcript(catalogue: &Catalogue) -> Vec<GradeInput> {
    catalogue
        .list()
        .iter()
        .enumerate()
        .map(|(i, c)| GradeInput::new(c.name.clone(), 8.0 + (i % 12) as f64))
        .collect()
}

fn bench_analyze(c: &mut Criterion) {
    let catalogue = Catalogue::builtin();
    let fields = FieldWeights::builtin();
    let transcript = full_transcript(&catalogue);

    c.bench_function("analyze_full_transcript_phase_3", |b| {
        b.iter(|| {
            analyze(
                black_box(Phase::THIRD),
                black_box(&transcript),
                &catalogue,
                &fields,
            )
        });
    });

    let empty: Vec<GradeInput> = Vec::new();
    c.bench_function("analyze_empty_phase_1", |b| {
        b.iter(|| analyze(black_box(Phase::FIRST), black_box(&empty), &catalogue, &fields));
    });
}

criterion_group!(benches, bench_analyze);
criterion_main!(benches);
