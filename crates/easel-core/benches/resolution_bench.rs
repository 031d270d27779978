//! Criterion benchmarks for the closest-resolution search and the display
//! registry's event path.
//!
//! Run with:
//! ```bash
//! cargo bench --package easel-core --bench resolution_bench
//! ```

use criterion::{black_box, criterion_group, criterion_main, BenchmarkId, Criterion};
use easel_core::{
    closest_resolution_index, Area, DisplayEvent, DisplayId, DisplayRegistry, Resolution,
    ScreenRecord,
};

fn modes(n: usize) -> Vec<Resolution> {
    (0..n as i32)
        .map(|i| Resolution::new(640 + i * 64, 480 + i * 36))
        .collect()
}

fn bench_closest_resolution(c: &mut Criterion) {
    let mut group = c.benchmark_group("closest_resolution_index");
    for n in [4usize, 16, 64] {
        let list = modes(n);
        group.bench_with_input(BenchmarkId::from_parameter(n), &list, |b, list| {
            let requested = Resolution::new(1920, 1080);
            b.iter(|| closest_resolution_index(black_box(list), black_box(requested)))
        });
    }
    group.finish();
}

fn bench_main_display_swap(c: &mut Criterion) {
    let records: Vec<ScreenRecord> = (0..8u32)
        .map(|i| {
            let x = i as i32 * 1920;
            ScreenRecord::with_default_metrics(DisplayId(i), Area::new(x, 0, x + 1920, 1080))
        })
        .collect();

    c.bench_function("registry_set_main_round_trip", |b| {
        let mut registry = DisplayRegistry::new();
        registry.populate(records.clone());
        b.iter(|| {
            for id in [7u32, 0] {
                let bounds = registry.find(DisplayId(id)).map(|d| d.bounds()).unwrap_or_default();
                registry.apply(black_box(DisplayEvent::Moved {
                    id: DisplayId(id),
                    bounds,
                    set_main: true,
                }));
            }
        })
    });
}

criterion_group!(benches, bench_closest_resolution, bench_main_display_swap);
criterion_main!(benches);
