// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_dispatch --heading-base-level=0

//! Understory Dispatch: z-ordered draw and input passes over a widget tree.
//!
//! ## Overview
//!
//! [`OrderedHierarchy`] flattens the attached subtree under a root widget into a snapshot sorted
//! by [`ZOrder`](understory_widget_tree::ZOrder). The snapshot is rebuilt wholesale, and only when
//! the tree raised [`Signals::HIERARCHY_CHANGED`](understory_widget_tree::Signals::HIERARCHY_CHANGED)
//! since the last pass. Bounds changes alone never trigger a rebuild.
//!
//! ## Passes
//!
//! - Draw: ascending order. Widgets with an empty visible area are skipped entirely. Everyone
//!   else draws with the surface clipped to its visible bounds.
//! - Pointer: descending order. Every widget is told; only the first one whose visible bounds
//!   contain the pointer, and that nobody above consumed, sees `in_bounds == true`.
//!   Pointer-down latches that flag per widget so a later pointer-up can tell a click from a
//!   drag-off.
//! - Keys: no z-order. The root widget gets the event if it holds focus, then every focused
//!   descendant does.
//!
//! ## Example
//!
//! ```
//! use kurbo::{Point, Rect};
//! use understory_dispatch::{OrderedHierarchy, PointerKind};
//! use understory_widget_tree::{
//!     Parent, PointerEvent, RecordingSurface, Widget, WidgetCx, WidgetTree,
//! };
//!
//! struct Swallow;
//! impl Widget for Swallow {
//!     fn on_mouse_down(&mut self, _: &mut WidgetCx<'_>, _: &PointerEvent, in_bounds: bool) -> bool {
//!         in_bounds
//!     }
//! }
//!
//! let mut tree = WidgetTree::new();
//! let area = Rect::new(0.0, 0.0, 100.0, 100.0);
//! tree.set_root_bounds(area);
//! let root = tree.insert(Parent::Root, Swallow);
//! tree.set_bounds(root, area);
//! let button = tree.insert(Parent::Widget(root), Swallow);
//! tree.add_child(root, button);
//! tree.set_bounds(button, Rect::new(10.0, 10.0, 30.0, 30.0));
//!
//! let mut hierarchy = OrderedHierarchy::new(&mut tree, root);
//! assert_eq!(hierarchy.order(), &[root, button]);
//!
//! let down = PointerEvent::left(Point::new(15.0, 15.0));
//! assert!(hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &down));
//! assert!(tree.was_mouse_down_in_bounds(button));
//! assert!(!tree.was_mouse_down_in_bounds(root), "consumed above");
//!
//! let mut surface = RecordingSurface::new();
//! assert_eq!(hierarchy.draw(&mut tree, &mut surface), 2);
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod hierarchy;
pub mod types;

pub use hierarchy::OrderedHierarchy;
pub use types::{KeyKind, PointerKind};
