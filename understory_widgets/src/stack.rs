// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A stack of widgets where only the top one is shown.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_widget_tree::{Widget, WidgetCx, WidgetId};

/// Shows the top of a stack of widgets, sized to its own bounds.
///
/// Items below the top stay alive but detached, so they keep their state for when they are
/// uncovered again. Only the top item follows the stack's bounds.
#[derive(Clone, Debug, Default)]
pub struct TopOfStack {
    items: Vec<WidgetId>,
}

impl TopOfStack {
    /// An empty stack.
    pub fn new() -> Self {
        Self::default()
    }

    /// Depth of the stack.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when nothing is pushed.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The visible item.
    pub fn top(&self) -> Option<WidgetId> {
        self.items.last().copied()
    }

    /// Hide the current top and show `widget` over the stack's bounds.
    pub fn push(&mut self, cx: &mut WidgetCx<'_>, widget: WidgetId) {
        if let Some(top) = self.top() {
            cx.remove_child(top);
        }
        let bounds = cx.bounds();
        cx.tree_mut().set_bounds(widget, bounds);
        cx.add_child(widget);
        self.items.push(widget);
    }

    /// Destroy the top item and show the one below it.
    ///
    /// Returns `false` when the stack is empty.
    pub fn pop(&mut self, cx: &mut WidgetCx<'_>) -> bool {
        let Some(top) = self.items.pop() else {
            return false;
        };
        cx.tree_mut().remove(top);
        if let Some(next) = self.top() {
            let bounds = cx.bounds();
            cx.tree_mut().set_bounds(next, bounds);
            cx.add_child(next);
        }
        true
    }
}

impl Widget for TopOfStack {
    fn on_bounds_change(&mut self, cx: &mut WidgetCx<'_>, _old: Rect) {
        if let Some(top) = self.top() {
            let bounds = cx.bounds();
            cx.tree_mut().set_bounds(top, bounds);
        }
    }
}
