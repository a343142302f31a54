// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use criterion::{BatchSize, Criterion, Throughput, black_box, criterion_group, criterion_main};
use kurbo::{Point, Rect};
use understory_dispatch::{OrderedHierarchy, PointerKind};
use understory_widget_tree::{
    Axis, Color, Parent, PointerEvent, RecordingSurface, WidgetId, WidgetTree,
};
use understory_widgets::{Panel, SequentialList};

/// A vertical list of `rows` horizontal lists, each holding `cols` panels of 20×20.
fn build_grid(rows: usize, cols: usize) -> (WidgetTree, WidgetId) {
    let mut tree = WidgetTree::new();
    let area = Rect::new(0.0, 0.0, 800.0, 600.0);
    tree.set_root_bounds(area);
    let outer = tree.insert_with(Parent::Root, |cx| SequentialList::new(cx, Axis::Vertical));
    tree.set_bounds(outer, area);
    for _ in 0..rows {
        let row = tree.insert_with(Parent::Widget(outer), |cx| {
            SequentialList::new(cx, Axis::Horizontal)
        });
        let cells: Vec<_> = (0..cols)
            .map(|_| tree.insert(Parent::Widget(row), Panel::new(Color::gray(220))))
            .collect();
        tree.with::<SequentialList, _>(row, |list, cx| list.extend(cx, 20.0, &cells))
            .expect("row is a list")
            .expect("cell size is valid");
        tree.with::<SequentialList, _>(outer, |list, cx| list.push_sized(cx, 20.0, Some(row)))
            .expect("outer is a list")
            .expect("row size is valid");
    }
    (tree, outer)
}

/// One vertical list of `n` panels, 20 px each, under its own hierarchy.
fn build_wide(n: usize) -> (WidgetTree, WidgetId, OrderedHierarchy) {
    let mut tree = WidgetTree::new();
    let area = Rect::new(0.0, 0.0, 400.0, 600.0);
    tree.set_root_bounds(area);
    let list = tree.insert_with(Parent::Root, |cx| SequentialList::new(cx, Axis::Vertical));
    tree.set_bounds(list, area);
    let cells: Vec<_> = (0..n)
        .map(|_| tree.insert(Parent::Widget(list), Panel::new(Color::gray(220))))
        .collect();
    tree.with::<SequentialList, _>(list, |l, cx| l.extend(cx, 20.0, &cells))
        .expect("list is a list")
        .expect("cell size is valid");
    let hierarchy = OrderedHierarchy::new(&mut tree, list);
    (tree, list, hierarchy)
}

fn bench_wide(c: &mut Criterion) {
    let mut group = c.benchmark_group("wide_list");
    group.sample_size(20);
    for &n in &[2000usize, 8000] {
        group.throughput(Throughput::Elements(n as u64));
        let (mut tree, _, mut hierarchy) = build_wide(n);
        let down = PointerEvent::left(Point::new(100.0, 100.0));
        group.bench_function(format!("down_n{}", n), |b| {
            b.iter(|| black_box(hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &down)))
        });
        group.bench_function(format!("build_n{}", n), |b| {
            b.iter(|| black_box(build_wide(n).0.len()))
        });
        group.bench_function(format!("clear_n{}", n), |b| {
            b.iter_batched(
                || build_wide(n),
                |(mut tree, list, _)| {
                    tree.with::<SequentialList, _>(list, |l, cx| l.clear(cx))
                        .expect("list is a list");
                    black_box(tree.len());
                },
                BatchSize::LargeInput,
            )
        });
    }
    group.finish();
}

fn bench_rebuild(c: &mut Criterion) {
    let mut group = c.benchmark_group("rebuild");
    for &n in &[16usize, 32, 64] {
        let (mut tree, root) = build_grid(n, n);
        let mut hierarchy = OrderedHierarchy::new(&mut tree, root);
        group.throughput(Throughput::Elements(hierarchy.order().len() as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                hierarchy.rebuild(&tree);
                black_box(hierarchy.order().len());
            })
        });
    }
    group.finish();
}

fn bench_pointer(c: &mut Criterion) {
    let mut group = c.benchmark_group("pointer");
    for &n in &[16usize, 32, 64] {
        let (mut tree, root) = build_grid(n, n);
        let mut hierarchy = OrderedHierarchy::new(&mut tree, root);
        let down = PointerEvent::left(Point::new(105.0, 105.0));
        group.throughput(Throughput::Elements(hierarchy.order().len() as u64));
        group.bench_function(format!("down_up_n{}", n), |b| {
            b.iter(|| {
                let consumed = hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &down);
                hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &down);
                black_box(consumed);
            })
        });
        let wheel = PointerEvent::new(Point::new(400.0, 300.0)).with_wheel(1.0);
        group.bench_function(format!("wheel_n{}", n), |b| {
            b.iter(|| {
                black_box(hierarchy.dispatch_pointer(&mut tree, PointerKind::Wheel, &wheel));
            })
        });
    }
    group.finish();
}

fn bench_draw(c: &mut Criterion) {
    let mut group = c.benchmark_group("draw");
    for &n in &[16usize, 32, 64] {
        let (mut tree, root) = build_grid(n, n);
        let mut hierarchy = OrderedHierarchy::new(&mut tree, root);
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter_batched(
                RecordingSurface::new,
                |mut surface| {
                    let drawn = hierarchy.draw(&mut tree, &mut surface);
                    black_box((drawn, surface.ops.len()));
                },
                BatchSize::SmallInput,
            )
        });
    }
    group.finish();
}

fn bench_build(c: &mut Criterion) {
    let mut group = c.benchmark_group("build");
    for &n in &[16usize, 32] {
        group.throughput(Throughput::Elements((n * n) as u64));
        group.bench_function(format!("grid_n{}", n), |b| {
            b.iter(|| {
                let (tree, _) = build_grid(n, n);
                black_box(tree.len());
            })
        });
    }
    group.finish();
}

criterion_group!(
    benches,
    bench_rebuild,
    bench_pointer,
    bench_draw,
    bench_build,
    bench_wide
);
criterion_main!(benches);
