// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Public types for the widget tree: identifiers, parent capabilities, z-order keys, root
//! signals, and widget notices.

use alloc::string::String;

use crate::event::MouseButton;

/// Identifier for a widget in the tree.
///
/// This is a small, copyable handle that stays stable across updates but becomes
/// invalid when the underlying slot is reused.
/// It consists of a slot index and a generation counter.
///
/// ## Semantics
///
/// - On insert, a fresh slot is allocated with generation `1`.
/// - On remove, the slot is freed; any existing `WidgetId` that pointed to that slot is now stale.
/// - On reuse of a freed slot, its generation is incremented, producing a new, distinct `WidgetId`.
///
/// Use [`WidgetTree::is_alive`](crate::WidgetTree::is_alive) to check whether a `WidgetId` still
/// refers to a live widget. Stale ids never alias a different live widget because the generation
/// must match.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct WidgetId(pub(crate) u32, pub(crate) u32);

impl WidgetId {
    pub(crate) const fn new(idx: u32, generation: u32) -> Self {
        Self(idx, generation)
    }

    pub(crate) const fn idx(self) -> usize {
        self.0 as usize
    }
}

/// Upward capability of a widget.
///
/// Every widget names exactly one parent: either another widget or the application root.
/// The link never owns anything; it is used for visible-bounds clipping, z-index derivation,
/// and focus lookups.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Parent {
    /// The host application. Its bounds are the surface bounds and its z-index is
    /// [`ROOT_Z_INDEX`](crate::ROOT_Z_INDEX).
    Root,
    /// Another widget.
    Widget(WidgetId),
}

impl Parent {
    /// The parent widget, if this is not the root.
    pub const fn widget(self) -> Option<WidgetId> {
        match self {
            Self::Root => None,
            Self::Widget(id) => Some(id),
        }
    }
}

/// Total draw/dispatch order of a widget.
///
/// Widgets compare first by z-index (tree depth) and then by creation sequence, so two siblings
/// sharing a z-index never compare equal: the newer widget sorts later, draws on top, and sees
/// pointer events first.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Ord, PartialOrd, Hash)]
pub struct ZOrder {
    /// Depth in the tree. The root capability sits at `0`, so its widget child sits at `1`.
    pub z_index: u32,
    /// Monotonic creation sequence used as the tie-break.
    pub sequence: u64,
}

bitflags::bitflags! {
    /// Upward notifications the tree raises for the host.
    ///
    /// Read and clear with [`WidgetTree::take_signal`](crate::WidgetTree::take_signal).
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Signals: u8 {
        /// Children membership changed somewhere in the attached tree; any z-ordered snapshot
        /// must be rebuilt before the next pass.
        const HIERARCHY_CHANGED = 0b0000_0001;
        /// The focused widget changed.
        const FOCUS_CHANGED     = 0b0000_0010;
    }
}

/// A message from one widget to a listening widget.
///
/// Delivered through [`WidgetTree::notify`](crate::WidgetTree::notify) to
/// [`Widget::on_notice`](crate::Widget::on_notice).
#[derive(Clone, Debug, PartialEq)]
pub enum Notice {
    /// A scrollbar changed its viewport position.
    Scrolled {
        /// The scrollbar that moved.
        source: WidgetId,
        /// The new viewport position, in content units.
        position: f64,
    },
    /// A clickable widget saw a press and release on itself.
    Clicked {
        /// The widget that was clicked.
        source: WidgetId,
        /// Button that completed the click.
        button: MouseButton,
    },
    /// A selection model told one of its members whether it is now the selected one.
    Selected {
        /// The model that changed.
        source: WidgetId,
        /// Whether the receiver is the selected member.
        selected: bool,
    },
    /// A text field changed its text.
    Edited {
        /// The field that changed.
        source: WidgetId,
        /// Text before the edit.
        previous: String,
    },
    /// A text field was submitted with Enter.
    Submitted {
        /// The field that was submitted.
        source: WidgetId,
        /// Text at the time of submission.
        text: String,
    },
}

impl Notice {
    /// The widget that raised this notice.
    pub const fn source(&self) -> WidgetId {
        match self {
            Self::Scrolled { source, .. }
            | Self::Clicked { source, .. }
            | Self::Selected { source, .. }
            | Self::Edited { source, .. }
            | Self::Submitted { source, .. } => *source,
        }
    }
}
