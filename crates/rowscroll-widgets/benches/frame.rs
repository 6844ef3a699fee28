//! Benchmarks for the per-frame path: tick, layout and paint.

use criterion::{black_box, criterion_group, criterion_main, Criterion};
use rowscroll_core::{Event, Point, RecordingCanvas, Widget};
use rowscroll_widgets::RowList;
use rowscroll_yaml::Manifest;

fn builtin_list() -> RowList {
    let config = Manifest::builtin()
        .and_then(Manifest::into_config)
        .expect("builtin manifest");
    let mut list = RowList::from_config(config);
    list.handle(&Event::Resize {
        width: 1280.0,
        height: 720.0,
    });
    list
}

fn bench_tick(c: &mut Criterion) {
    let mut list = builtin_list();
    c.bench_function("row_list_tick", |b| {
        b.iter(|| list.tick(black_box(1.0 / 60.0)))
    });
}

fn bench_pointer_sweep(c: &mut Criterion) {
    let mut list = builtin_list();
    c.bench_function("row_list_pointer_sweep", |b| {
        b.iter(|| {
            for y in (120..720).step_by(8) {
                list.handle(&Event::MouseMove {
                    position: Point::new(640.0, y as f32),
                });
                list.tick(1.0 / 60.0);
            }
        })
    });
}

fn bench_paint(c: &mut Criterion) {
    let mut list = builtin_list();
    let p = list.rows()[3].bounds().center();
    list.handle(&Event::MouseMove { position: p });
    while list.tick(1.0 / 60.0) {}

    c.bench_function("row_list_paint", |b| {
        b.iter(|| {
            let mut canvas = RecordingCanvas::new();
            black_box(&list).paint(&mut canvas);
            canvas.finish()
        })
    });
}

criterion_group!(benches, bench_tick, bench_pointer_sweep, bench_paint);
criterion_main!(benches);
