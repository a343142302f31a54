// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Event kinds routed by the [`OrderedHierarchy`](crate::OrderedHierarchy).

/// Pointer event kinds, each mapped to one [`Widget`](understory_widget_tree::Widget) hook.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum PointerKind {
    /// Button pressed. Latches `was_mouse_down_in_bounds` on every widget.
    Down,
    /// Button released. Clears the latch after the hook ran.
    Up,
    /// Pointer moved with a button held.
    Drag,
    /// Wheel motion.
    Wheel,
}

/// Keyboard event kinds.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeyKind {
    /// Key pressed.
    Down,
    /// Key released.
    Up,
    /// Character typed.
    Typed,
}
