//! Benchmarks for the interaction reducer and media resolution.

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use rowscroll_core::{apply, Interaction, MediaSource, Point, ViewState};

fn sweep(rows: usize) -> Vec<Interaction> {
    let mut out = Vec::with_capacity(rows * 4);
    for i in 0..rows {
        out.push(Interaction::Enter(i));
        out.push(Interaction::Move(Point::new(i as f32, i as f32 * 56.0)));
        out.push(Interaction::Click(i));
        out.push(Interaction::Leave(i));
    }
    out
}

// =============================================================================
// Reducer
// =============================================================================

fn bench_apply_sweep(c: &mut Criterion) {
    let mut group = c.benchmark_group("apply_sweep");

    for rows in [10, 100, 1000].iter() {
        let interactions = sweep(*rows);

        group.bench_with_input(BenchmarkId::from_parameter(rows), &interactions, |b, seq| {
            b.iter(|| {
                seq.iter()
                    .cloned()
                    .fold(ViewState::default(), |s, i| apply(s, black_box(i)))
            });
        });
    }

    group.finish();
}

// =============================================================================
// Media
// =============================================================================

fn bench_media_resolve(c: &mut Criterion) {
    c.bench_function("media_resolve_watch", |b| {
        b.iter(|| MediaSource::resolve(black_box("https://www.youtube.com/watch?v=MMNICLfHE3M"), None));
    });

    let source = MediaSource::resolve("https://www.youtube.com/watch?v=MMNICLfHE3M", None);
    c.bench_function("media_embed_url", |b| {
        b.iter(|| black_box(&source).embed_url(true));
    });
}

criterion_group!(benches, bench_apply_sweep, bench_media_resolve);
criterion_main!(benches);
