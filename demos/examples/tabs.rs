// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A tab controller switched by clicks, with a stack of pages behind one tab.
//!
//! Run:
//! - `cargo run -p understory_demos --example tabs`

use kurbo::{Point, Rect};
use understory_dispatch::{KeyKind, OrderedHierarchy, PointerKind};
use understory_widget_tree::{
    Axis, Color, KeyEvent, Parent, PointerEvent, RecordingSurface, Signals, WidgetTree,
};
use understory_widgets::{Button, Label, Panel, TabController, TopOfStack};

fn click(tree: &mut WidgetTree, hierarchy: &mut OrderedHierarchy, at: Point) -> bool {
    let event = PointerEvent::left(at);
    hierarchy.dispatch_pointer(tree, PointerKind::Down, &event);
    hierarchy.dispatch_pointer(tree, PointerKind::Up, &event)
}

fn main() {
    understory_demos::init_logging();

    let mut tree = WidgetTree::new();
    let area = Rect::new(0.0, 0.0, 480.0, 320.0);
    tree.set_root_bounds(area);

    let tabs = match TabController::insert(&mut tree, Parent::Root, Axis::Vertical, 0.15) {
        Ok(tabs) => tabs,
        Err(err) => {
            log::error!("cannot build tabs: {err}");
            return;
        }
    };
    tree.set_bounds(tabs, area);

    let overview = tree.insert(Parent::Root, Panel::new(Color::gray(245)));
    let pages = tree.insert(Parent::Root, TopOfStack::new());
    let first = tree.insert(Parent::Widget(pages), Label::from_optional(Some("Reviews")));
    let second = tree.insert(Parent::Widget(pages), Label::from_optional(None));
    tree.with::<TopOfStack, _>(pages, |stack, cx| {
        stack.push(cx, first);
        stack.push(cx, second);
    })
    .expect("pages is a TopOfStack");

    tree.with::<TabController, _>(tabs, |t, cx| {
        t.on_select(|cx, change| {
            println!(
                "{:?}: left tab {:?}",
                cx.id(),
                change.previous_name.as_deref().unwrap_or("-")
            );
        });
        t.add_tab(cx, "Overview", overview);
        t.add_tab(cx, "Pages", pages);
    })
    .expect("tabs is a TabController");

    let mut hierarchy = OrderedHierarchy::new(&mut tree, tabs);

    // The second tab button sits 150..300 along the strip.
    let clicked = click(&mut tree, &mut hierarchy, Point::new(200.0, 20.0));
    println!("click consumed: {clicked}");
    if let Some(t) = tree.get::<TabController>(tabs) {
        println!("selected: {:?}", t.selected_name());
    }
    println!(
        "hierarchy changed: {}",
        tree.take_signal(Signals::HIERARCHY_CHANGED)
    );

    let popped = tree
        .with::<TopOfStack, _>(pages, |stack, cx| stack.pop(cx))
        .expect("pages is a TopOfStack");
    println!("popped a page: {popped}");
    println!("after pop, first page attached: {}", tree.is_attached(first));

    let focused = tree.focused();
    let keyed = hierarchy.dispatch_key(&mut tree, KeyKind::Typed, &KeyEvent::typed('x'));
    println!("focus on {focused:?}, key delivered to {keyed} widget(s)");
    if let Some(button) = focused.and_then(|id| tree.get::<Button>(id)) {
        println!("focused button reads {:?}", button.label().text());
    }

    let mut surface = RecordingSurface::new();
    hierarchy.draw(&mut tree, &mut surface);
    understory_demos::print_ops(&surface);
}
