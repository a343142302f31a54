// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_widgets --heading-base-level=0

//! Understory Widgets: layout containers, scrolling, and basic widgets.
//!
//! Every type here is a [`Widget`](understory_widget_tree::Widget) living in a
//! [`WidgetTree`](understory_widget_tree::WidgetTree). Containers position their items by
//! setting item bounds from their own `on_bounds_change`, so a single
//! [`set_bounds`](understory_widget_tree::WidgetTree::set_bounds) on the outermost widget lays out
//! the whole subtree.
//!
//! ## Containers
//!
//! - [`FractionalGroup`]: splits one axis by fractions in `[0, 1]`. Bad fractions are rejected
//!   with [`LayoutError::InvalidFraction`]; a sum above `1` is only logged.
//! - [`SequentialList`]: items of independent sizes back to back, scrolled by a [`Scrollbar`]
//!   that appears only while the content overflows.
//! - [`TopOfStack`]: push and pop; only the top item is attached.
//!
//! ## Scrolling
//!
//! [`Scrollbar`] owns the viewport position and reports every change as a
//! [`Notice::Scrolled`](understory_widget_tree::Notice::Scrolled). [`Scrollable`] is the piece a
//! scrolling widget embeds to turn that position into a content rectangle.
//!
//! ## Leaves
//!
//! [`Panel`], [`Label`], [`Button`], the editable [`TextField`], and the composite
//! [`TabController`].
//!
//! ## Example
//!
//! ```
//! use kurbo::Rect;
//! use understory_widget_tree::{Axis, Color, Parent, WidgetTree};
//! use understory_widgets::{FractionalGroup, Panel};
//!
//! let mut tree = WidgetTree::new();
//! let area = Rect::new(0.0, 0.0, 300.0, 200.0);
//! tree.set_root_bounds(area);
//!
//! let group = tree.insert(Parent::Root, FractionalGroup::new(Axis::Horizontal));
//! let left = tree.insert(Parent::Widget(group), Panel::new(Color::gray(240)));
//! let right = tree.insert(Parent::Widget(group), Panel::new(Color::WHITE));
//! tree.with::<FractionalGroup, _>(group, |g, cx| {
//!     g.add_item(cx, 1.0 / 3.0, Some(left))?;
//!     g.add_item(cx, 2.0 / 3.0, Some(right))
//! })
//! .unwrap()
//! .unwrap();
//!
//! tree.set_bounds(group, area);
//! assert_eq!(tree.bounds(left), Some(Rect::new(0.0, 0.0, 100.0, 200.0)));
//! assert_eq!(tree.bounds(right).map(|r| r.x0), Some(100.0));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod button;
pub mod error;
pub mod group;
pub mod label;
pub mod list;
pub mod panel;
pub mod scrollable;
pub mod scrollbar;
pub mod stack;
pub mod tabs;
pub mod text_field;

pub use button::Button;
pub use error::LayoutError;
pub use group::{Fraction, FractionalGroup, GroupLayout};
pub use label::{AlignX, AlignY, DEFAULT_PADDING, FALLBACK_TEXT, Label};
pub use list::SequentialList;
pub use panel::Panel;
pub use scrollable::Scrollable;
pub use scrollbar::{Scrollbar, ScrollbarConfig};
pub use stack::TopOfStack;
pub use tabs::{TabChange, TabController};
pub use text_field::TextField;
