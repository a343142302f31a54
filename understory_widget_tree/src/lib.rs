// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

// After you edit the crate's doc comment, run this command, then check README.md for any missing links
// cargo rdme --workspace-project=understory_widget_tree --heading-base-level=0

//! Understory Widget Tree: a Kurbo-native retained widget tree.
//!
//! The tree is the interaction/state layer of a small retained-mode toolkit. It owns widgets in
//! a generational arena and tracks, per widget:
//!
//! - bounds and visible bounds (bounds clipped by every ancestor and the root),
//! - a non-owning back-reference to the parent ([`Parent`]),
//! - a children set that may be mutated from inside any hook,
//! - focus and the pointer-down latch used for click semantics.
//!
//! Behavior lives in the [`Widget`] trait. Hooks receive a [`WidgetCx`] with mutable access to
//! the whole tree, so a click handler can remove its own widget or rebuild a sibling list while a
//! dispatcher is still walking a snapshot of the tree.
//!
//! ## Where this fits
//!
//! - Widget tree: structure, bounds, focus, notices (this crate).
//! - Dispatcher: z-ordered draw and input passes (`understory_dispatch`).
//! - Widgets: layout containers and the scroll system (`understory_widgets`).
//!
//! The host supplies a [`Surface`] for drawing and feeds [`PointerEvent`]s and [`KeyEvent`]s to the
//! dispatcher. The tree raises [`Signals`] upward so the host knows when to rebuild its z-ordered
//! snapshot or react to a focus change.
//!
//! ## Attachment
//!
//! Creating a widget gives it a back-reference but no membership. A widget is *attached* when
//! every link of its back-reference chain is also a children-set membership, ending at
//! [`Parent::Root`]. Detached widgets keep their state but are not drawn, receive no events, and
//! may not take focus. Containers use this to hide items without destroying them.
//!
//! ## Minimal usage
//!
//! ```
//! use kurbo::Rect;
//! use understory_widget_tree::{Parent, Signals, Widget, WidgetTree};
//!
//! struct Blank;
//! impl Widget for Blank {}
//!
//! let mut tree = WidgetTree::new();
//! tree.set_root_bounds(Rect::new(0.0, 0.0, 200.0, 100.0));
//!
//! let root = tree.insert(Parent::Root, Blank);
//! tree.set_bounds(root, Rect::new(0.0, 0.0, 200.0, 100.0));
//!
//! let child = tree.insert(Parent::Widget(root), Blank);
//! tree.add_child(root, child);
//! tree.set_bounds(child, Rect::new(150.0, 50.0, 250.0, 150.0));
//!
//! // Clipped by the root widget.
//! assert_eq!(tree.visible_bounds(child), Some(Rect::new(150.0, 50.0, 200.0, 100.0)));
//! assert_eq!(tree.z_index(child), Some(2));
//!
//! // Membership changed under the root, so any z-ordered snapshot is stale.
//! assert!(tree.take_signal(Signals::HIERARCHY_CHANGED));
//!
//! assert!(tree.request_focus(child));
//! assert_eq!(tree.find_focus(root), Some(child));
//! ```
//!
//! This crate is `no_std` and uses `alloc`.

#![no_std]

extern crate alloc;

pub mod event;
mod focus;
pub mod geometry;
pub mod surface;
pub mod tree;
pub mod types;
pub mod widget;

pub use event::{KeyCode, KeyEvent, Modifiers, MouseButton, PointerEvent};
pub use geometry::{Axis, has_area};
pub use surface::{Color, DrawOp, FontId, RecordingSurface, Surface, TextStyle};
pub use tree::WidgetTree;
pub use types::{Notice, Parent, Signals, WidgetId, ZOrder};
pub use widget::{Widget, WidgetCx};

/// Z-index of the root capability. A widget directly under the root sits one above it.
pub const ROOT_Z_INDEX: u32 = 0;
