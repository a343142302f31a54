// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scrolling list of labels: wheel scrolling, dragging the bar, and clipped drawing.
//!
//! Run:
//! - `cargo run -p understory_demos --example scrolling_list`

use kurbo::{Point, Rect};
use understory_dispatch::{OrderedHierarchy, PointerKind};
use understory_widget_tree::{Axis, Parent, PointerEvent, RecordingSurface, WidgetTree};
use understory_widgets::{Label, ScrollbarConfig, SequentialList};

fn main() {
    understory_demos::init_logging();

    let mut tree = WidgetTree::new();
    let area = Rect::new(0.0, 0.0, 240.0, 120.0);
    tree.set_root_bounds(area);

    let list = tree.insert_with(Parent::Root, |cx| {
        SequentialList::with_config(cx, Axis::Vertical, ScrollbarConfig::default(), true)
    });
    tree.set_bounds(list, area);

    let rows: Vec<_> = ["Cafe", "Bakery", "Diner", "Bistro", "Noodle bar", "Tea room"]
        .into_iter()
        .map(|name| tree.insert(Parent::Widget(list), Label::new(name)))
        .collect();
    tree.with::<SequentialList, _>(list, |l, cx| l.extend(cx, 40.0, &rows))
        .expect("list is a SequentialList")
        .expect("row height is valid");

    let mut hierarchy = OrderedHierarchy::new(&mut tree, list);
    let mut surface = RecordingSurface::new();
    let drawn = hierarchy.draw(&mut tree, &mut surface);
    println!("initial frame, {drawn} widgets drawn:");
    understory_demos::print_ops(&surface);

    let wheel = PointerEvent::new(Point::new(100.0, 60.0)).with_wheel(20.0);
    hierarchy.dispatch_pointer(&mut tree, PointerKind::Wheel, &wheel);
    println!("after wheel: first row at {:?}", tree.bounds(rows[0]));

    // Grab the bar at its top and drag it to the bottom of the track.
    let bar = tree
        .get::<SequentialList>(list)
        .map(|l| l.scroll().bar())
        .filter(|&bar| tree.is_attached(bar));
    if let Some(bar_rect) = bar.and_then(|bar| tree.bounds(bar)) {
        let x = bar_rect.center().x;
        let grab = PointerEvent::left(Point::new(x, bar_rect.y0 + 1.0));
        let drop = PointerEvent::left(Point::new(x, bar_rect.y1));
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &grab);
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Drag, &drop);
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &drop);
    }
    println!("after drag: last row at {:?}", tree.bounds(rows[rows.len() - 1]));

    surface.clear();
    let drawn = hierarchy.draw(&mut tree, &mut surface);
    println!("scrolled frame, {drawn} widgets drawn:");
    understory_demos::print_ops(&surface);
}
