// Copyright 2025 the Strata Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Size};
use strata_select::drag::{DragMachine, PointerButton};
use strata_select::{OccupancySample, Selection, grab};
use strata_view::{Column, View, ViewConfig, transform};

#[derive(Clone)]
struct Rng(u64);

impl Rng {
    fn new(seed: u64) -> Self {
        Self(seed)
    }
    fn next_u64(&mut self) -> u64 {
        let mut x = self.0;
        x ^= x << 13;
        x ^= x >> 7;
        x ^= x << 17;
        self.0 = x;
        x
    }
    fn next_f64(&mut self) -> f64 {
        let v = self.next_u64() >> 11;
        (v as f64) / ((1u64 << 53) as f64)
    }
}

fn gen_points(count: usize, size: Size) -> Vec<Point> {
    let mut rng = Rng::new(0xCAFE_F00D_DEAD_BEEF);
    (0..count)
        .map(|_| Point::new(rng.next_f64() * size.width, rng.next_f64() * size.height))
        .collect()
}

fn view_at(scale: f64) -> View {
    let mut view = View::new(&ViewConfig::default(), Size::new(1024.0, 768.0));
    view.center = Point::new(-317.25, 1204.5);
    view.set_scale(scale);
    view
}

fn bench_transform(c: &mut Criterion) {
    let mut group = c.benchmark_group("transform");
    let points = gen_points(4096, Size::new(1024.0, 768.0));
    group.throughput(Throughput::Elements(points.len() as u64));
    for scale in [1.0, 3.5, 40.0] {
        let view = view_at(scale);
        group.bench_function(format!("screen_to_column_scale{scale}"), |b| {
            b.iter(|| {
                for p in &points {
                    black_box(transform::screen_to_column(black_box(*p), &view));
                }
            });
        });
        group.bench_function(format!("column_round_trip_scale{scale}"), |b| {
            b.iter(|| {
                for p in &points {
                    let col = transform::screen_to_column(*p, &view);
                    black_box(transform::world_to_screen(col, &view));
                }
            });
        });
    }
    group.finish();
}

fn bench_grab(c: &mut Criterion) {
    let mut group = c.benchmark_group("grab");
    let selection = Selection::from_corners(Column::new(-400, 900), Column::new(-200, 1400), 40, 90);
    let view = view_at(2.0);
    let columns: Vec<Column> = gen_points(4096, Size::new(1024.0, 768.0))
        .into_iter()
        .map(|p| transform::screen_to_column(p, &view))
        .collect();
    group.throughput(Throughput::Elements(columns.len() as u64));
    group.bench_function("classify", |b| {
        b.iter(|| {
            for col in &columns {
                black_box(grab::classify(*col, &selection, 2.5));
            }
        });
    });
    group.finish();
}

fn bench_drag(c: &mut Criterion) {
    let mut group = c.benchmark_group("drag");
    let path = gen_points(1024, Size::new(1024.0, 768.0));
    group.throughput(Throughput::Elements(path.len() as u64));
    group.bench_function("select_new_motion", |b| {
        b.iter_batched(
            || (DragMachine::new(), view_at(4.0), Selection::inactive()),
            |(mut drag, mut view, mut selection)| {
                drag.press(PointerButton::Secondary, Point::new(512.0, 384.0), &view, &mut selection);
                for p in &path {
                    black_box(drag.motion(*p, &mut view, &mut selection));
                }
                drag.release(PointerButton::Secondary, &mut selection)
            },
            BatchSize::SmallInput,
        );
    });
    group.bench_function("pan_motion", |b| {
        b.iter_batched(
            || (DragMachine::new(), view_at(4.0), Selection::inactive()),
            |(mut drag, mut view, mut selection)| {
                drag.press(PointerButton::Primary, Point::new(512.0, 384.0), &view, &mut selection);
                for p in &path {
                    black_box(drag.motion(*p, &mut view, &mut selection));
                }
                view.center
            },
            BatchSize::SmallInput,
        );
    });
    group.finish();
}

fn bench_occupancy(c: &mut Criterion) {
    let mut group = c.benchmark_group("occupancy");
    let mut rng = Rng::new(0x5EED);
    let heights: Vec<i32> = (0..65_536).map(|_| (rng.next_u64() % 256) as i32).collect();
    group.throughput(Throughput::Elements(heights.len() as u64));
    group.bench_function("record_256x256", |b| {
        b.iter(|| {
            let mut sample = OccupancySample::default();
            for h in &heights {
                sample.record(*h, (62, 120));
            }
            black_box(sample)
        });
    });
    group.finish();
}

criterion_group!(benches, bench_transform, bench_grab, bench_drag, bench_occupancy);
criterion_main!(benches);
