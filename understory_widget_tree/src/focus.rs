// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Focus chain: a single focus holder, broadcast on change.
//!
//! The tree keeps one focus pointer. A change walks every attached widget, flipping per-widget
//! flags only on transitions, so each widget sees at most one `on_lose_focus` or
//! `on_gain_focus` per change. Losses are delivered before the gain.

use crate::tree::{Deferred, WidgetTree};
use crate::types::{Signals, WidgetId};

impl WidgetTree {
    /// Move focus to `id`.
    ///
    /// Returns `false` and changes nothing when `id` is stale or not attached to the root.
    /// Requesting focus for the current holder succeeds without notifications.
    pub fn request_focus(&mut self, id: WidgetId) -> bool {
        if !self.is_attached(id) {
            return false;
        }
        if self.focused == Some(id) {
            return true;
        }
        let old = self.focused.replace(id);

        // Everything outside the branch that is becoming focused.
        for root in self.root_widgets() {
            self.broadcast_focus(root, id, Some(id));
        }
        // Then the new holder's own descendants.
        for child in self.children(id).to_vec() {
            self.broadcast_focus(child, id, None);
        }
        // The old holder may have been detached; it still loses exactly once.
        if let Some(old) = old {
            self.apply_focus(old, id);
        }
        // A lose hook may have moved focus elsewhere already.
        if self.focused != Some(id) {
            return false;
        }
        self.apply_focus(id, id);
        self.raise(Signals::FOCUS_CHANGED);
        log::debug!("focus moved from {old:?} to {id:?}");
        true
    }

    fn broadcast_focus(&mut self, node: WidgetId, new_focus: WidgetId, skip: Option<WidgetId>) {
        if Some(node) == skip {
            return;
        }
        self.apply_focus(node, new_focus);
        for child in self.children(node).to_vec() {
            self.broadcast_focus(child, new_focus, skip);
        }
    }

    /// Flip the flag of `node` if it disagrees with `new_focus`, firing the edge hook.
    fn apply_focus(&mut self, node: WidgetId, new_focus: WidgetId) {
        let should = node == new_focus;
        let Some(n) = self.node_opt_mut(node) else {
            return;
        };
        if n.focus == should {
            return;
        }
        n.focus = should;
        let edge = if should {
            Deferred::GainFocus
        } else {
            Deferred::LoseFocus(new_focus)
        };
        self.deliver(node, edge);
    }

    /// Whether `id` holds focus.
    pub fn has_focus(&self, id: WidgetId) -> bool {
        self.node_opt(id).is_some_and(|n| n.focus)
    }

    /// The focus holder, as known to the root capability.
    pub fn focused(&self) -> Option<WidgetId> {
        self.focused
    }

    /// Resolve who owns keyboard input, starting from `from`.
    ///
    /// Checks `from`, then its descendants, then asks the parent chain; the root capability
    /// answers with [`WidgetTree::focused`].
    pub fn find_focus(&self, from: WidgetId) -> Option<WidgetId> {
        let node = self.node_opt(from)?;
        if node.focus {
            return Some(from);
        }
        if let Some(found) = self.find_focus_below(from) {
            return Some(found);
        }
        match node.parent.widget() {
            Some(parent) => self.find_focus(parent),
            None => self.focused(),
        }
    }

    fn find_focus_below(&self, id: WidgetId) -> Option<WidgetId> {
        self.children(id).iter().find_map(|&child| {
            if self.has_focus(child) {
                Some(child)
            } else {
                self.find_focus_below(child)
            }
        })
    }
}
