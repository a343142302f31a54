// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Z-ordered snapshot and the passes that walk it.
//!
//! ## Ordering
//!
//! Widgets are ranked by [`ZOrder`]: depth first, then creation sequence. Draw walks the
//! snapshot in ascending order, so deeper and newer widgets paint on top. Pointer dispatch walks
//! it in descending order, so the widget painted on top sees the event first.
//!
//! ## Consumption
//!
//! Every widget in the snapshot sees every pointer event. Once a hook returns `true`, lower
//! widgets still get their hook called, with `in_bounds == false`. This lets them reset state
//! (for example a pressed look) without reacting to a click that was meant for someone else.
//!
//! ## Churn
//!
//! Hooks may restructure the tree while a pass runs. Widgets destroyed or detached mid-pass are
//! skipped; widgets created mid-pass are picked up when the next pass syncs the snapshot.

use alloc::vec::Vec;

use understory_widget_tree::{
    KeyEvent, PointerEvent, Signals, Surface, WidgetId, WidgetTree, ZOrder, has_area,
};

use crate::types::{KeyKind, PointerKind};

/// A z-ordered view of one attached subtree, rebuilt wholesale on demand.
pub struct OrderedHierarchy {
    root: WidgetId,
    // Ascending z-order.
    order: Vec<WidgetId>,
    rebuilds: u64,
}

impl core::fmt::Debug for OrderedHierarchy {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("OrderedHierarchy")
            .field("root", &self.root)
            .field("len", &self.order.len())
            .field("rebuilds", &self.rebuilds)
            .finish_non_exhaustive()
    }
}

impl OrderedHierarchy {
    /// Snapshot the subtree under `root`.
    ///
    /// Any pending hierarchy signal is consumed, since the snapshot is fresh.
    pub fn new(tree: &mut WidgetTree, root: WidgetId) -> Self {
        let mut hierarchy = Self {
            root,
            order: Vec::new(),
            rebuilds: 0,
        };
        tree.take_signal(Signals::HIERARCHY_CHANGED);
        hierarchy.rebuild(tree);
        hierarchy
    }

    /// The widget this hierarchy starts from.
    pub fn root(&self) -> WidgetId {
        self.root
    }

    /// The current snapshot, lowest first.
    pub fn order(&self) -> &[WidgetId] {
        &self.order
    }

    /// How many times the snapshot has been rebuilt.
    pub fn rebuild_count(&self) -> u64 {
        self.rebuilds
    }

    /// Rebuild the snapshot from the tree's children sets.
    pub fn rebuild(&mut self, tree: &WidgetTree) {
        self.order.clear();
        self.rebuilds += 1;
        let Some(root_z) = tree.z_index(self.root) else {
            return;
        };
        if !tree.is_attached(self.root) {
            return;
        }
        let mut ranked: Vec<(ZOrder, WidgetId)> = Vec::new();
        let mut stack = Vec::from([(self.root, root_z)]);
        while let Some((id, z_index)) = stack.pop() {
            let Some(sequence) = tree.sequence(id) else {
                continue;
            };
            ranked.push((ZOrder { z_index, sequence }, id));
            stack.extend(tree.children(id).iter().map(|&c| (c, z_index + 1)));
        }
        ranked.sort_unstable_by_key(|(z, _)| *z);
        self.order.extend(ranked.into_iter().map(|(_, id)| id));
        log::debug!(
            "rebuilt z-order under {:?}: {} widgets",
            self.root,
            self.order.len()
        );
    }

    /// Rebuild if the tree signalled a hierarchy change since the last sync.
    ///
    /// Returns whether a rebuild happened.
    pub fn sync(&mut self, tree: &mut WidgetTree) -> bool {
        if tree.take_signal(Signals::HIERARCHY_CHANGED) {
            self.rebuild(tree);
            true
        } else {
            false
        }
    }

    /// Draw every attached widget with a non-empty visible area, lowest first.
    ///
    /// Each widget is drawn with `surface` clipped to its visible bounds; the clip is cleared
    /// when the pass ends. Returns the number of widgets drawn.
    pub fn draw(&mut self, tree: &mut WidgetTree, surface: &mut dyn Surface) -> usize {
        self.sync(tree);
        let mut drawn = 0;
        for &id in &self.order {
            if !tree.is_attached(id) {
                continue;
            }
            let Some(visible) = tree.visible_bounds(id) else {
                continue;
            };
            if !has_area(visible) {
                continue;
            }
            surface.clip(visible);
            if tree
                .with_widget(id, |w, cx| w.draw(cx, &mut *surface))
                .is_some()
            {
                drawn += 1;
            }
        }
        surface.no_clip();
        drawn
    }

    /// Deliver a pointer event to every attached widget, topmost first.
    ///
    /// `in_bounds` is true for a widget only if no higher widget consumed the event and the
    /// pointer lies inside its visible bounds. Returns whether any widget consumed the event.
    pub fn dispatch_pointer(
        &mut self,
        tree: &mut WidgetTree,
        kind: PointerKind,
        event: &PointerEvent,
    ) -> bool {
        self.sync(tree);
        let mut handled = false;
        for &id in self.order.iter().rev() {
            if !tree.is_attached(id) {
                continue;
            }
            let Some(visible) = tree.visible_bounds(id) else {
                continue;
            };
            let in_bounds = !handled && visible.contains(event.position);
            let consumed = match kind {
                PointerKind::Down => {
                    tree.set_mouse_down_in_bounds(id, in_bounds);
                    tree.with_widget(id, |w, cx| w.on_mouse_down(cx, event, in_bounds))
                }
                PointerKind::Up => {
                    let consumed =
                        tree.with_widget(id, |w, cx| w.on_mouse_up(cx, event, in_bounds));
                    tree.set_mouse_down_in_bounds(id, false);
                    consumed
                }
                PointerKind::Drag => {
                    tree.with_widget(id, |w, cx| w.on_mouse_drag(cx, event, in_bounds))
                }
                PointerKind::Wheel => {
                    tree.with_widget(id, |w, cx| w.on_mouse_wheel(cx, event, in_bounds))
                }
            };
            handled |= consumed.unwrap_or(false);
        }
        handled
    }

    /// Deliver a key event to the focused widgets under the root.
    ///
    /// The root gets the event directly when it holds focus; then the subtree is walked and every
    /// focused descendant gets it too. Key events ignore z-order. Returns the number of widgets
    /// that received the event.
    pub fn dispatch_key(
        &mut self,
        tree: &mut WidgetTree,
        kind: KeyKind,
        event: &KeyEvent,
    ) -> usize {
        self.sync(tree);
        let mut delivered = 0;
        if !tree.is_attached(self.root) {
            return delivered;
        }
        let mut stack = Vec::from([self.root]);
        while let Some(id) = stack.pop() {
            if tree.has_focus(id) {
                let seen = tree.with_widget(id, |w, cx| match kind {
                    KeyKind::Down => w.on_key_down(cx, event),
                    KeyKind::Up => w.on_key_up(cx, event),
                    KeyKind::Typed => w.on_key_typed(cx, event),
                });
                if seen.is_some() {
                    delivered += 1;
                }
            }
            stack.extend(tree.children(id).iter().rev().copied());
        }
        delivered
    }
}
