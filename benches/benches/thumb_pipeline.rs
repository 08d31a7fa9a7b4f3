// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BenchmarkId, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_thumb::middleware::{
    BoxedMiddleware, axis_lock, chain, compose, limit, offset_by_reference,
};
use understory_thumb::{
    Axis, BoundingBox, Direction, DragPayload, Limit, MouseInput, PointerInput, PointerTracker,
    PositionOptions, PositionStore, TrackerOptions, buttons,
};

#[derive(Clone, Debug)]
struct Handle;

impl BoundingBox for Handle {
    fn bounding_box(&self) -> Rect {
        Rect::new(0.0, 0.0, 16.0, 16.0)
    }
}

fn mouse(p: Point) -> PointerInput<'static> {
    PointerInput::Mouse(MouseInput {
        button: buttons::PRIMARY,
        client: p,
        default_prevented: false,
    })
}

/// A zig-zag path that keeps crossing the clamp bounds.
fn path(len: usize) -> Vec<Point> {
    (0..len)
        .map(|i| {
            let t = i as f64;
            Point::new((t * 7.0) % 400.0 - 100.0, (t * 3.0) % 300.0 - 50.0)
        })
        .collect()
}

fn bench_store(c: &mut Criterion) {
    let mut group = c.benchmark_group("thumb/store_move_to");
    let options = PositionOptions::default()
        .with_direction(Direction::Omnidirectional)
        .with_min(Limit::Uniform(0.0))
        .with_max(Limit::Uniform(200.0));

    for len in [64usize, 1_024] {
        let points = path(len);
        group.throughput(Throughput::Elements(len as u64));
        group.bench_with_input(BenchmarkId::from_parameter(len), &points, |b, points| {
            b.iter(|| {
                let mut store = PositionStore::with_options(Point::ZERO, options);
                for &p in points {
                    black_box(store.move_to(p));
                }
                store.terminate_move();
                black_box(store.position())
            });
        });
    }
    group.finish();
}

fn bench_session(c: &mut Criterion) {
    let mut group = c.benchmark_group("thumb/session");
    let points = path(1_024);
    group.throughput(Throughput::Elements(points.len() as u64));

    group.bench_function("static_chain", |b| {
        b.iter(|| {
            let mut tracker = PointerTracker::<Handle, ()>::new(
                Point::ZERO,
                TrackerOptions::default().with_direction(Direction::Omnidirectional),
            );
            tracker.set_element(Some(Handle));
            tracker.set_middleware(chain(
                offset_by_reference(),
                chain(
                    limit(Some(Limit::Uniform(0.0)), Some(Limit::Uniform(200.0))),
                    axis_lock(Axis::X),
                ),
            ));
            run_session(&mut tracker, &points)
        });
    });

    group.bench_function("composed", |b| {
        b.iter(|| {
            let mut tracker = PointerTracker::<Handle, ()>::new(
                Point::ZERO,
                TrackerOptions::default().with_direction(Direction::Omnidirectional),
            );
            tracker.set_element(Some(Handle));
            let stages: Vec<BoxedMiddleware<'static, DragPayload<Handle>>> = vec![
                Box::new(offset_by_reference()),
                Box::new(limit(Some(Limit::Uniform(0.0)), Some(Limit::Uniform(200.0)))),
                Box::new(axis_lock(Axis::X)),
            ];
            tracker.set_middleware(compose(stages));
            run_session(&mut tracker, &points)
        });
    });
    group.finish();
}

fn run_session(tracker: &mut PointerTracker<Handle, ()>, points: &[Point]) -> Point {
    tracker.press(&(), mouse(Point::new(8.0, 8.0)));
    for &p in points {
        black_box(tracker.track(&(), mouse(p)));
    }
    tracker.release(&(), mouse(Point::new(8.0, 8.0)));
    tracker.position()
}

criterion_group!(benches, bench_store, bench_session);
criterion_main!(benches);
