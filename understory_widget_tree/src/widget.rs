// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The widget hook trait and the context handed to every hook.

use alloc::vec::Vec;
use core::any::Any;

use kurbo::{Point, Rect};

use crate::event::{KeyEvent, PointerEvent};
use crate::surface::Surface;
use crate::tree::WidgetTree;
use crate::types::{Notice, Parent, WidgetId};

/// Behavior attached to a node of the [`WidgetTree`].
///
/// Every hook has a no-op default. Pointer hooks return `true` to consume the event; the
/// dispatcher then reports `in_bounds == false` to every lower widget for the same event.
///
/// While a hook runs, the widget is moved out of its slot and the [`WidgetCx`] grants mutable
/// access to the whole tree. A hook may restructure the tree freely, including removing its
/// own widget. Hooks are never re-entered: tree changes that would call back into a widget
/// whose hook is already running skip that widget, and notices sent to it are queued until
/// the running hook returns.
pub trait Widget: Any {
    /// Draw into `surface`, which is already clipped to this widget's visible bounds.
    fn draw(&mut self, _cx: &mut WidgetCx<'_>, _surface: &mut dyn Surface) {}

    /// Bounds changed from `_old`.
    fn on_bounds_change(&mut self, _cx: &mut WidgetCx<'_>, _old: Rect) {}

    /// Location changed from `_old`.
    fn on_move(&mut self, _cx: &mut WidgetCx<'_>, _old: Point) {}

    /// Size changed; `_old` holds the previous bounds.
    fn on_resize(&mut self, _cx: &mut WidgetCx<'_>, _old: Rect) {}

    /// The parent capability was rebound (or refreshed by an ancestor's rebinding).
    fn on_parent_change(&mut self, _cx: &mut WidgetCx<'_>, _old: Parent) {}

    /// This widget became the focus holder.
    fn on_gain_focus(&mut self, _cx: &mut WidgetCx<'_>) {}

    /// This widget stopped being the focus holder in favor of `_new_focus`.
    fn on_lose_focus(&mut self, _cx: &mut WidgetCx<'_>, _new_focus: WidgetId) {}

    /// Pointer pressed.
    fn on_mouse_down(
        &mut self,
        _cx: &mut WidgetCx<'_>,
        _event: &PointerEvent,
        _in_bounds: bool,
    ) -> bool {
        false
    }

    /// Pointer released.
    fn on_mouse_up(
        &mut self,
        _cx: &mut WidgetCx<'_>,
        _event: &PointerEvent,
        _in_bounds: bool,
    ) -> bool {
        false
    }

    /// Pointer moved with a button held.
    fn on_mouse_drag(
        &mut self,
        _cx: &mut WidgetCx<'_>,
        _event: &PointerEvent,
        _in_bounds: bool,
    ) -> bool {
        false
    }

    /// Wheel motion; the notch count is in [`PointerEvent::wheel`].
    fn on_mouse_wheel(
        &mut self,
        _cx: &mut WidgetCx<'_>,
        _event: &PointerEvent,
        _in_bounds: bool,
    ) -> bool {
        false
    }

    /// Key pressed while this widget holds focus.
    fn on_key_down(&mut self, _cx: &mut WidgetCx<'_>, _event: &KeyEvent) {}

    /// Key released while this widget holds focus.
    fn on_key_up(&mut self, _cx: &mut WidgetCx<'_>, _event: &KeyEvent) {}

    /// Character typed while this widget holds focus.
    fn on_key_typed(&mut self, _cx: &mut WidgetCx<'_>, _event: &KeyEvent) {}

    /// A notice from a widget this one listens to.
    fn on_notice(&mut self, _cx: &mut WidgetCx<'_>, _notice: &Notice) {}
}

/// Context for the widget whose hook is running.
///
/// Shortcuts operate on the widget itself; [`WidgetCx::tree_mut`] reaches everything else.
pub struct WidgetCx<'a> {
    pub(crate) tree: &'a mut WidgetTree,
    pub(crate) id: WidgetId,
}

impl core::fmt::Debug for WidgetCx<'_> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("WidgetCx")
            .field("id", &self.id)
            .finish_non_exhaustive()
    }
}

impl<'a> WidgetCx<'a> {
    pub(crate) fn new(tree: &'a mut WidgetTree, id: WidgetId) -> Self {
        Self { tree, id }
    }

    /// The widget this context belongs to.
    pub fn id(&self) -> WidgetId {
        self.id
    }

    /// The whole tree.
    pub fn tree(&self) -> &WidgetTree {
        self.tree
    }

    /// The whole tree, mutably.
    pub fn tree_mut(&mut self) -> &mut WidgetTree {
        self.tree
    }

    /// This widget's parent capability.
    pub fn parent(&self) -> Parent {
        self.tree.parent(self.id).unwrap_or(Parent::Root)
    }

    /// This widget's bounds.
    pub fn bounds(&self) -> Rect {
        self.tree.bounds(self.id).unwrap_or(Rect::ZERO)
    }

    /// This widget's location.
    pub fn location(&self) -> Point {
        self.bounds().origin()
    }

    /// This widget's bounds clipped by every ancestor.
    pub fn visible_bounds(&self) -> Rect {
        self.tree.visible_bounds(self.id).unwrap_or(Rect::ZERO)
    }

    /// This widget's depth.
    pub fn z_index(&self) -> u32 {
        self.tree.z_index(self.id).unwrap_or(0)
    }

    /// Whether this widget holds focus.
    pub fn has_focus(&self) -> bool {
        self.tree.has_focus(self.id)
    }

    /// Take focus. No-op when the widget is not attached to the root.
    pub fn request_focus(&mut self) -> bool {
        self.tree.request_focus(self.id)
    }

    /// Whether the last pointer-down landed on this widget.
    pub fn was_mouse_down_in_bounds(&self) -> bool {
        self.tree.was_mouse_down_in_bounds(self.id)
    }

    /// Create a widget whose parent capability is this widget.
    ///
    /// The new widget is not a child until it is added with [`WidgetCx::add_child`].
    pub fn insert<W: Widget>(&mut self, widget: W) -> WidgetId {
        self.tree.insert(Parent::Widget(self.id), widget)
    }

    /// Adopt `child` into this widget's children.
    pub fn add_child(&mut self, child: WidgetId) -> bool {
        self.tree.add_child(self.id, child)
    }

    /// Drop `child` from this widget's children.
    pub fn remove_child(&mut self, child: WidgetId) -> bool {
        self.tree.remove_child(self.id, child)
    }

    /// Adopt several children with a single hierarchy notification.
    pub fn add_children(&mut self, children: &[WidgetId]) -> bool {
        self.tree.add_children(self.id, children)
    }

    /// Drop several children with a single hierarchy notification.
    pub fn remove_children(&mut self, children: &[WidgetId]) -> bool {
        self.tree.remove_children(self.id, children)
    }

    /// Whether `child` is in this widget's children.
    pub fn has_child(&self, child: WidgetId) -> bool {
        self.tree.has_child(self.id, child)
    }

    /// Number of children.
    pub fn child_count(&self) -> usize {
        self.tree.child_count(self.id)
    }

    /// A snapshot of the children, safe to hold while mutating the tree.
    pub fn children(&self) -> Vec<WidgetId> {
        self.tree.children(self.id).to_vec()
    }

    /// Send `notice` to `target`.
    pub fn notify(&mut self, target: WidgetId, notice: Notice) {
        self.tree.notify(target, notice);
    }
}
