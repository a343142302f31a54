// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Core tree implementation: arena, structure, bounds, notices.

use alloc::boxed::Box;
use alloc::vec::Vec;
use core::any::Any;

use kurbo::{Point, Rect, Size};

use crate::ROOT_Z_INDEX;
use crate::geometry::collapsed;
use crate::types::{Notice, Parent, Signals, WidgetId, ZOrder};
use crate::widget::{Widget, WidgetCx};

impl Default for WidgetTree {
    fn default() -> Self {
        Self::new()
    }
}

/// Arena of widgets plus the root capability.
///
/// The tree owns every widget. Containers own their items only in the sense that they decide
/// when to [`remove`](WidgetTree::remove) them; the arena is the single place memory lives.
pub struct WidgetTree {
    nodes: Vec<Option<Node>>, // slots
    generations: Vec<u32>,    // last generation per slot (persists across frees)
    free_list: Vec<usize>,
    next_sequence: u64,
    root_bounds: Rect,
    pub(crate) focused: Option<WidgetId>,
    signals: Signals,
    pending: Vec<(WidgetId, Deferred)>,
}

impl core::fmt::Debug for WidgetTree {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        let total = self.nodes.len();
        let alive = self.nodes.iter().filter(|n| n.is_some()).count();
        f.debug_struct("WidgetTree")
            .field("nodes_total", &total)
            .field("nodes_alive", &alive)
            .field("free_list", &self.free_list.len())
            .field("root_bounds", &self.root_bounds)
            .field("focused", &self.focused)
            .field("signals", &self.signals)
            .field("pending", &self.pending.len())
            .finish_non_exhaustive()
    }
}

pub(crate) struct Node {
    generation: u32,
    sequence: u64,
    pub(crate) parent: Parent,
    pub(crate) children: Vec<WidgetId>,
    // Index into the parent's `children` while this widget is a member.
    member_slot: Option<usize>,
    // Every widget whose back-reference names this one, member or not.
    dependents: Vec<WidgetId>,
    // Index into the parent's `dependents`.
    dependent_slot: usize,
    bounds: Rect,
    visible_bounds: Rect,
    pub(crate) focus: bool,
    mouse_down_in_bounds: bool,
    // `None` while the widget is checked out to one of its own hooks.
    widget: Option<Box<dyn Widget>>,
}

impl Node {
    fn new(generation: u32, sequence: u64, parent: Parent) -> Self {
        Self {
            generation,
            sequence,
            parent,
            children: Vec::new(),
            member_slot: None,
            dependents: Vec::new(),
            dependent_slot: 0,
            bounds: Rect::ZERO,
            visible_bounds: Rect::ZERO,
            focus: false,
            mouse_down_in_bounds: false,
            widget: None,
        }
    }
}

/// Callbacks addressed to a widget that was checked out when they were raised.
#[derive(Clone, Debug)]
pub(crate) enum Deferred {
    Notice(Notice),
    GainFocus,
    LoseFocus(WidgetId),
}

impl WidgetTree {
    /// Create an empty tree with zero-size root bounds.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            generations: Vec::new(),
            free_list: Vec::new(),
            next_sequence: 0,
            root_bounds: Rect::ZERO,
            focused: None,
            signals: Signals::empty(),
            pending: Vec::new(),
        }
    }

    // --- creation and destruction ---

    /// Create a widget whose back-reference is `parent`.
    ///
    /// The widget is not added to any children set; use [`WidgetTree::add_child`] for that.
    /// A widget created directly under [`Parent::Root`] is a root widget and is attached at once.
    pub fn insert<W: Widget>(&mut self, parent: Parent, widget: W) -> WidgetId {
        self.insert_with(parent, |_| widget)
    }

    /// Create a widget that needs its own id while it is being built.
    ///
    /// `build` runs with a context for the new widget, so a composite can create and adopt owned
    /// children before it exists as a value. Notices sent to the new widget during `build` are
    /// delivered once it is stored.
    pub fn insert_with<W: Widget>(
        &mut self,
        parent: Parent,
        build: impl FnOnce(&mut WidgetCx<'_>) -> W,
    ) -> WidgetId {
        let id = self.alloc(parent);
        let widget = build(&mut WidgetCx::new(self, id));
        if let Some(node) = self.node_opt_mut(id) {
            node.widget = Some(Box::new(widget));
            self.flush_pending(id);
        }
        id
    }

    fn alloc(&mut self, parent: Parent) -> WidgetId {
        let sequence = self.next_sequence;
        self.next_sequence += 1;
        let (idx, generation) = if let Some(idx) = self.free_list.pop() {
            let generation = self.generations[idx].saturating_add(1);
            self.generations[idx] = generation;
            self.nodes[idx] = Some(Node::new(generation, sequence, parent));
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId uses 32-bit indices by design."
            )]
            (idx as u32, generation)
        } else {
            let generation = 1_u32;
            self.nodes.push(Some(Node::new(generation, sequence, parent)));
            self.generations.push(generation);
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId uses 32-bit indices by design."
            )]
            ((self.nodes.len() - 1) as u32, generation)
        };
        let id = WidgetId::new(idx, generation);
        match parent {
            Parent::Root => self.signals |= Signals::HIERARCHY_CHANGED,
            Parent::Widget(p) => self.push_dependent(p, id),
        }
        self.refresh_visible_bounds(id);
        id
    }

    /// Destroy a widget and everything whose back-reference chain leads to it.
    ///
    /// The widget is unlinked from its parent's children first. Focus is dropped if the focused
    /// widget dies and queued notices for destroyed widgets are discarded. Removing a widget from
    /// inside its own hook is allowed; the hook finishes and the widget is then dropped.
    pub fn remove(&mut self, id: WidgetId) {
        let Some(parent) = self.parent(id) else {
            return;
        };
        match parent {
            Parent::Root => self.signals |= Signals::HIERARCHY_CHANGED,
            Parent::Widget(parent) => {
                self.remove_child(parent, id);
                self.drop_dependent(parent, id);
            }
        }
        self.destroy(id);
    }

    fn destroy(&mut self, id: WidgetId) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        for child in core::mem::take(&mut node.dependents) {
            self.destroy(child);
        }
        if self.focused == Some(id) {
            self.focused = None;
            self.signals |= Signals::FOCUS_CHANGED;
        }
        self.pending.retain(|(target, _)| *target != id);
        self.nodes[id.idx()] = None;
        self.free_list.push(id.idx());
    }

    // --- structure ---

    /// Rebind the back-reference of `id`.
    ///
    /// The widget leaves its old parent's children set, its visible bounds are recomputed, and
    /// `on_parent_change` fires on it and then on every descendant. Returns `false` for stale
    /// ids and for rebinding that would make `id` its own ancestor.
    pub fn set_parent(&mut self, id: WidgetId, parent: Parent) -> bool {
        let Some(old) = self.parent(id) else {
            return false;
        };
        if let Parent::Widget(p) = parent {
            if !self.is_alive(p) {
                return false;
            }
            if p == id || self.is_ancestor(id, p) {
                log::warn!("refusing to make {id:?} a descendant of itself through {p:?}");
                return false;
            }
        }
        if old == parent {
            return true;
        }
        match old {
            Parent::Root => self.signals |= Signals::HIERARCHY_CHANGED,
            Parent::Widget(p) => {
                self.remove_child(p, id);
                self.drop_dependent(p, id);
            }
        }
        if let Some(node) = self.node_opt_mut(id) {
            node.parent = parent;
        }
        match parent {
            Parent::Root => self.signals |= Signals::HIERARCHY_CHANGED,
            Parent::Widget(p) => self.push_dependent(p, id),
        }
        self.refresh_visible_bounds(id);
        self.with_widget(id, |w, cx| w.on_parent_change(cx, old));
        for child in self.children(id).to_vec() {
            self.rebind(child);
        }
        true
    }

    fn rebind(&mut self, id: WidgetId) {
        let Some(old) = self.parent(id) else {
            return;
        };
        self.with_widget(id, |w, cx| w.on_parent_change(cx, old));
        for child in self.children(id).to_vec() {
            self.rebind(child);
        }
    }

    /// Add `child` to the children of `parent`.
    ///
    /// The child's back-reference is rebound to `parent` first when needed. Returns `false` if
    /// either id is stale, `child` is already a child, or `child` is an ancestor of `parent`.
    pub fn add_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let changed = self.link_child(parent, child);
        if changed && self.is_attached(parent) {
            self.signals |= Signals::HIERARCHY_CHANGED;
        }
        changed
    }

    /// Add several children, signalling a hierarchy change at most once.
    pub fn add_children(&mut self, parent: WidgetId, children: &[WidgetId]) -> bool {
        let mut changed = false;
        for &child in children {
            changed |= self.link_child(parent, child);
        }
        if changed && self.is_attached(parent) {
            self.signals |= Signals::HIERARCHY_CHANGED;
        }
        changed
    }

    fn link_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if parent == child || !self.is_alive(parent) || !self.is_alive(child) {
            return false;
        }
        if self.has_child(parent, child) {
            return false;
        }
        if self.is_ancestor(child, parent) {
            log::warn!("refusing to adopt ancestor {child:?} into {parent:?}");
            return false;
        }
        if self.parent(child) != Some(Parent::Widget(parent))
            && !self.set_parent(child, Parent::Widget(parent))
        {
            return false;
        }
        // A hook fired by the rebinding may have destroyed, moved or adopted either side.
        if self.parent(child) != Some(Parent::Widget(parent)) || self.has_child(parent, child) {
            return false;
        }
        let Some(node) = self.node_opt_mut(parent) else {
            return false;
        };
        let slot = node.children.len();
        node.children.push(child);
        if let Some(node) = self.node_opt_mut(child) {
            node.member_slot = Some(slot);
        }
        self.refresh_visible_bounds(child);
        true
    }

    /// Drop `child` from the children of `parent`.
    ///
    /// The child keeps its back-reference, so it is detached but alive.
    pub fn remove_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        let changed = self.unlink_child(parent, child);
        if changed && self.is_attached(parent) {
            self.signals |= Signals::HIERARCHY_CHANGED;
        }
        changed
    }

    /// Drop several children, signalling a hierarchy change at most once.
    pub fn remove_children(&mut self, parent: WidgetId, children: &[WidgetId]) -> bool {
        let mut changed = false;
        for &child in children {
            changed |= self.unlink_child(parent, child);
        }
        if changed && self.is_attached(parent) {
            self.signals |= Signals::HIERARCHY_CHANGED;
        }
        changed
    }

    fn unlink_child(&mut self, parent: WidgetId, child: WidgetId) -> bool {
        if !self.has_child(parent, child) {
            return false;
        }
        let Some(slot) = self.node_opt_mut(child).and_then(|n| n.member_slot.take()) else {
            return false;
        };
        let Some(node) = self.node_opt_mut(parent) else {
            return false;
        };
        if node.children.get(slot) != Some(&child) {
            return false;
        }
        node.children.swap_remove(slot);
        let moved = node.children.get(slot).copied();
        if let Some(moved) = moved.and_then(|m| self.node_opt_mut(m)) {
            moved.member_slot = Some(slot);
        }
        true
    }

    fn push_dependent(&mut self, parent: WidgetId, id: WidgetId) {
        let Some(node) = self.node_opt_mut(parent) else {
            return;
        };
        let slot = node.dependents.len();
        node.dependents.push(id);
        if let Some(node) = self.node_opt_mut(id) {
            node.dependent_slot = slot;
        }
    }

    fn drop_dependent(&mut self, parent: WidgetId, id: WidgetId) {
        let Some(slot) = self.node_opt(id).map(|n| n.dependent_slot) else {
            return;
        };
        let Some(node) = self.node_opt_mut(parent) else {
            return;
        };
        if node.dependents.get(slot) != Some(&id) {
            return;
        }
        node.dependents.swap_remove(slot);
        let moved = node.dependents.get(slot).copied();
        if let Some(moved) = moved.and_then(|m| self.node_opt_mut(m)) {
            moved.dependent_slot = slot;
        }
    }

    /// Whether `child` is in the children set of `parent`.
    ///
    /// Constant time: membership is recorded on the child.
    pub fn has_child(&self, parent: WidgetId, child: WidgetId) -> bool {
        self.is_alive(parent)
            && self
                .node_opt(child)
                .is_some_and(|n| n.parent == Parent::Widget(parent) && n.member_slot.is_some())
    }

    /// Number of children of `id`; `0` when stale.
    pub fn child_count(&self, id: WidgetId) -> usize {
        self.node_opt(id).map_or(0, |n| n.children.len())
    }

    /// The children of `id`; empty when stale.
    ///
    /// Children are kept in insertion order until one is removed, which moves the last child
    /// into the freed position. Copy the slice (`to_vec`) before calling hooks that may change membership.
    pub fn children(&self, id: WidgetId) -> &[WidgetId] {
        self.node_opt(id)
            .map(|n| n.children.as_slice())
            .unwrap_or_default()
    }

    /// The back-reference of `id`.
    pub fn parent(&self, id: WidgetId) -> Option<Parent> {
        self.node_opt(id).map(|n| n.parent)
    }

    /// Whether `ancestor` lies on the back-reference chain of `id`.
    pub fn is_ancestor(&self, ancestor: WidgetId, id: WidgetId) -> bool {
        let mut current = self.parent(id);
        while let Some(Parent::Widget(p)) = current {
            if p == ancestor {
                return true;
            }
            current = self.parent(p);
        }
        false
    }

    /// Whether `id` is reachable from the root through children sets.
    ///
    /// Costs one step per ancestor. Only attached widgets are drawn, receive events, or may take focus.
    pub fn is_attached(&self, id: WidgetId) -> bool {
        let mut current = id;
        loop {
            match self.parent(current) {
                None => return false,
                Some(Parent::Root) => return true,
                Some(Parent::Widget(p)) => {
                    if !self.has_child(p, current) {
                        return false;
                    }
                    current = p;
                }
            }
        }
    }

    /// Live widgets created directly under [`Parent::Root`], oldest first.
    pub fn root_widgets(&self) -> Vec<WidgetId> {
        let mut roots: Vec<(u64, WidgetId)> = self
            .live()
            .filter(|(_, n)| n.parent == Parent::Root)
            .map(|(id, n)| (n.sequence, id))
            .collect();
        roots.sort_unstable_by_key(|(sequence, _)| *sequence);
        roots.into_iter().map(|(_, id)| id).collect()
    }

    // --- geometry ---

    /// Replace the bounds of `id`.
    ///
    /// Visible bounds of `id` and its attached descendants are recomputed. Then
    /// `on_bounds_change` fires if the rectangle changed, `on_move` if the origin changed, and
    /// `on_resize` if the size changed. A widget changing its own bounds from inside one of its
    /// hooks does not see these hooks again.
    pub fn set_bounds(&mut self, id: WidgetId, bounds: Rect) {
        let Some(node) = self.node_opt_mut(id) else {
            return;
        };
        let old = node.bounds;
        if old == bounds {
            return;
        }
        node.bounds = bounds;
        self.refresh_visible_bounds(id);
        self.with_widget(id, |w, cx| {
            w.on_bounds_change(cx, old);
            if old.origin() != bounds.origin() {
                w.on_move(cx, old.origin());
            }
            if old.size() != bounds.size() {
                w.on_resize(cx, old);
            }
        });
    }

    /// Move `id` without resizing it.
    pub fn set_location(&mut self, id: WidgetId, location: Point) {
        if let Some(bounds) = self.bounds(id) {
            self.set_bounds(id, bounds.with_origin(location));
        }
    }

    /// Resize `id` without moving it.
    pub fn set_size(&mut self, id: WidgetId, size: Size) {
        if let Some(bounds) = self.bounds(id) {
            self.set_bounds(id, bounds.with_size(size));
        }
    }

    /// Bounds of `id`.
    pub fn bounds(&self, id: WidgetId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.bounds)
    }

    /// Bounds of `id` clipped by every ancestor and the root.
    pub fn visible_bounds(&self, id: WidgetId) -> Option<Rect> {
        self.node_opt(id).map(|n| n.visible_bounds)
    }

    /// Depth of `id`: one more than its parent, where the root capability is
    /// [`ROOT_Z_INDEX`].
    pub fn z_index(&self, id: WidgetId) -> Option<u32> {
        let mut node = self.node_opt(id)?;
        let mut depth = ROOT_Z_INDEX + 1;
        while let Parent::Widget(p) = node.parent {
            let Some(parent) = self.node_opt(p) else {
                break;
            };
            depth += 1;
            node = parent;
        }
        Some(depth)
    }

    /// Draw and dispatch key of `id`.
    pub fn z_order(&self, id: WidgetId) -> Option<ZOrder> {
        let sequence = self.node_opt(id)?.sequence;
        Some(ZOrder {
            z_index: self.z_index(id)?,
            sequence,
        })
    }

    /// Creation sequence of `id`, the tie-break of [`ZOrder`].
    pub fn sequence(&self, id: WidgetId) -> Option<u64> {
        self.node_opt(id).map(|n| n.sequence)
    }

    /// Set the bounds of the root capability (the host surface).
    pub fn set_root_bounds(&mut self, bounds: Rect) {
        self.root_bounds = bounds;
        for root in self.root_widgets() {
            self.refresh_visible_bounds(root);
        }
    }

    /// Bounds of the root capability.
    pub fn root_bounds(&self) -> Rect {
        self.root_bounds
    }

    /// Visible bounds of the root capability; the root is never clipped further.
    pub fn root_visible_bounds(&self) -> Rect {
        self.root_bounds
    }

    fn refresh_visible_bounds(&mut self, id: WidgetId) {
        let Some(node) = self.node_opt(id) else {
            return;
        };
        let parent_visible = match node.parent {
            Parent::Root => Some(self.root_bounds),
            Parent::Widget(p) => self.visible_bounds(p),
        };
        let visible = match parent_visible {
            Some(clip) => node.bounds.intersect(clip),
            None => collapsed(node.bounds),
        };
        let children = node.children.clone();
        if let Some(node) = self.node_opt_mut(id) {
            node.visible_bounds = visible;
        }
        for child in children {
            self.refresh_visible_bounds(child);
        }
    }

    // --- per-widget state ---

    /// Whether the most recent pointer-down was inside the visible bounds of `id` and not
    /// consumed by a higher widget.
    pub fn was_mouse_down_in_bounds(&self, id: WidgetId) -> bool {
        self.node_opt(id).is_some_and(|n| n.mouse_down_in_bounds)
    }

    /// Latch the pointer-down state of `id`. Called by the dispatcher.
    pub fn set_mouse_down_in_bounds(&mut self, id: WidgetId, value: bool) {
        if let Some(n) = self.node_opt_mut(id) {
            n.mouse_down_in_bounds = value;
        }
    }

    /// Accumulated upward notifications.
    pub fn signals(&self) -> Signals {
        self.signals
    }

    /// Clear `signal` and report whether any of it was raised.
    pub fn take_signal(&mut self, signal: Signals) -> bool {
        let raised = self.signals.intersects(signal);
        self.signals.remove(signal);
        raised
    }

    pub(crate) fn raise(&mut self, signal: Signals) {
        self.signals |= signal;
    }

    // --- widget access ---

    /// Run `f` with the widget of `id` checked out of its slot.
    ///
    /// Returns `None` for stale ids and for widgets whose hook is already running.
    pub fn with_widget<R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut dyn Widget, &mut WidgetCx<'_>) -> R,
    ) -> Option<R> {
        let mut widget = self.checkout(id)?;
        let out = f(widget.as_mut(), &mut WidgetCx::new(self, id));
        self.checkin(id, widget);
        Some(out)
    }

    /// Like [`WidgetTree::with_widget`] with the widget downcast to `T`.
    ///
    /// Returns `None` when the widget is not a `T`.
    pub fn with<T: Widget, R>(
        &mut self,
        id: WidgetId,
        f: impl FnOnce(&mut T, &mut WidgetCx<'_>) -> R,
    ) -> Option<R> {
        let mut widget = self.checkout(id)?;
        let any: &mut dyn Any = widget.as_mut();
        let out = any
            .downcast_mut::<T>()
            .map(|typed| f(typed, &mut WidgetCx::new(self, id)));
        self.checkin(id, widget);
        out
    }

    /// Borrow the widget of `id` as a `T` without running any hook.
    pub fn get<T: Widget>(&self, id: WidgetId) -> Option<&T> {
        let widget: &dyn Any = self.node_opt(id)?.widget.as_deref()?;
        widget.downcast_ref::<T>()
    }

    /// Mutably borrow the widget of `id` as a `T` without running any hook.
    pub fn get_mut<T: Widget>(&mut self, id: WidgetId) -> Option<&mut T> {
        let widget: &mut dyn Any = self.node_opt_mut(id)?.widget.as_deref_mut()?;
        widget.downcast_mut::<T>()
    }

    fn checkout(&mut self, id: WidgetId) -> Option<Box<dyn Widget>> {
        self.node_opt_mut(id)?.widget.take()
    }

    fn checkin(&mut self, id: WidgetId, widget: Box<dyn Widget>) {
        // The slot is gone (or reused) if the hook removed its own widget.
        if let Some(node) = self.node_opt_mut(id) {
            node.widget = Some(widget);
            self.flush_pending(id);
        }
    }

    // --- notices ---

    /// Deliver `notice` to `target`'s [`Widget::on_notice`].
    ///
    /// If `target` is running a hook, the notice waits until that hook returns. Notices to
    /// stale ids are dropped.
    pub fn notify(&mut self, target: WidgetId, notice: Notice) {
        self.deliver(target, Deferred::Notice(notice));
    }

    pub(crate) fn deliver(&mut self, target: WidgetId, deferred: Deferred) {
        let Some(node) = self.node_opt(target) else {
            log::trace!("dropping {deferred:?} for dead widget {target:?}");
            return;
        };
        if node.widget.is_none() {
            self.pending.push((target, deferred));
            return;
        }
        self.with_widget(target, |w, cx| match deferred {
            Deferred::Notice(notice) => w.on_notice(cx, &notice),
            Deferred::GainFocus => w.on_gain_focus(cx),
            Deferred::LoseFocus(new_focus) => w.on_lose_focus(cx, new_focus),
        });
    }

    fn flush_pending(&mut self, id: WidgetId) {
        while let Some(pos) = self.pending.iter().position(|(target, _)| *target == id) {
            let (_, deferred) = self.pending.remove(pos);
            self.deliver(id, deferred);
        }
    }

    // --- internals ---

    /// Returns true if `id` refers to a live widget.
    ///
    /// A `WidgetId` is live if its slot exists and its generation matches the generation stored
    /// in that slot. See [`WidgetId`] for the generational semantics.
    pub fn is_alive(&self, id: WidgetId) -> bool {
        self.node_opt(id).is_some()
    }

    /// Number of live widgets.
    pub fn len(&self) -> usize {
        self.nodes.iter().filter(|n| n.is_some()).count()
    }

    /// True when no widget is alive.
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn node_opt(&self, id: WidgetId) -> Option<&Node> {
        let n = self.nodes.get(id.idx())?.as_ref()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    pub(crate) fn node_opt_mut(&mut self, id: WidgetId) -> Option<&mut Node> {
        let n = self.nodes.get_mut(id.idx())?.as_mut()?;
        if n.generation != id.1 {
            return None;
        }
        Some(n)
    }

    fn live(&self) -> impl Iterator<Item = (WidgetId, &Node)> + '_ {
        self.nodes.iter().enumerate().filter_map(|(i, slot)| {
            let node = slot.as_ref()?;
            #[allow(
                clippy::cast_possible_truncation,
                reason = "WidgetId uses 32-bit indices by design."
            )]
            Some((WidgetId::new(i as u32, node.generation), node))
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use alloc::string::String;
    use alloc::vec;
    use core::cell::RefCell;

    type Log = Rc<RefCell<Vec<String>>>;

    /// Records every hook it sees, prefixed with its name.
    struct Recorder {
        name: &'static str,
        log: Log,
    }

    impl Recorder {
        fn new(name: &'static str, log: &Log) -> Self {
            Self {
                name,
                log: log.clone(),
            }
        }

        fn push(&self, what: &str) {
            self.log.borrow_mut().push(alloc::format!("{}:{what}", self.name));
        }
    }

    impl Widget for Recorder {
        fn on_bounds_change(&mut self, _cx: &mut WidgetCx<'_>, _old: Rect) {
            self.push("bounds");
        }

        fn on_move(&mut self, _cx: &mut WidgetCx<'_>, _old: Point) {
            self.push("move");
        }

        fn on_resize(&mut self, _cx: &mut WidgetCx<'_>, _old: Rect) {
            self.push("resize");
        }

        fn on_parent_change(&mut self, _cx: &mut WidgetCx<'_>, _old: Parent) {
            self.push("parent");
        }

        fn on_notice(&mut self, _cx: &mut WidgetCx<'_>, notice: &Notice) {
            if let Notice::Scrolled { position, .. } = notice {
                self.push(&alloc::format!("scrolled {position}"));
            }
        }
    }

    struct Blank;

    impl Widget for Blank {}

    fn root_with(tree: &mut WidgetTree, bounds: Rect) -> WidgetId {
        tree.set_root_bounds(bounds);
        let root = tree.insert(Parent::Root, Blank);
        tree.set_bounds(root, bounds);
        root
    }

    #[test]
    fn stale_ids_are_rejected() {
        let mut tree = WidgetTree::new();
        let a = tree.insert(Parent::Root, Blank);
        tree.remove(a);
        assert!(!tree.is_alive(a));
        let b = tree.insert(Parent::Root, Blank);
        assert_eq!(a.idx(), b.idx(), "slot is reused");
        assert_ne!(a, b, "generation differs");
        assert_eq!(tree.bounds(a), None);
        assert!(!tree.add_child(b, a));
        tree.set_bounds(a, Rect::new(0.0, 0.0, 1.0, 1.0));
        assert_eq!(tree.bounds(b), Some(Rect::ZERO));
    }

    #[test]
    fn visible_bounds_follow_parent_chain() {
        let mut tree = WidgetTree::new();
        let root = root_with(&mut tree, Rect::new(0.0, 0.0, 100.0, 100.0));
        let panel = tree.insert(Parent::Widget(root), Blank);
        tree.add_child(root, panel);
        tree.set_bounds(panel, Rect::new(50.0, 50.0, 150.0, 150.0));
        let leaf = tree.insert(Parent::Widget(panel), Blank);
        tree.add_child(panel, leaf);
        tree.set_bounds(leaf, Rect::new(40.0, 60.0, 90.0, 200.0));
        assert_eq!(
            tree.visible_bounds(panel),
            Some(Rect::new(50.0, 50.0, 100.0, 100.0))
        );
        assert_eq!(
            tree.visible_bounds(leaf),
            Some(Rect::new(50.0, 60.0, 90.0, 100.0))
        );

        // Moving the middle node refreshes the leaf even though nobody relaid it out.
        tree.set_bounds(panel, Rect::new(200.0, 200.0, 300.0, 300.0));
        let leaf_vb = tree.visible_bounds(leaf).unwrap();
        assert_eq!(leaf_vb.width(), 0.0);
        assert_eq!(leaf_vb.height(), 0.0);

        // So does the root.
        tree.set_bounds(panel, Rect::new(0.0, 0.0, 100.0, 100.0));
        tree.set_root_bounds(Rect::new(0.0, 0.0, 70.0, 70.0));
        assert_eq!(
            tree.visible_bounds(leaf),
            Some(Rect::new(40.0, 60.0, 70.0, 70.0))
        );
    }

    #[test]
    fn bounds_hooks_fire_independently() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let w = tree.insert(Parent::Root, Recorder::new("w", &log));

        tree.set_bounds(w, Rect::new(0.0, 0.0, 10.0, 10.0));
        assert_eq!(*log.borrow(), vec!["w:bounds", "w:resize"]);
        log.borrow_mut().clear();

        tree.set_location(w, Point::new(5.0, 5.0));
        assert_eq!(*log.borrow(), vec!["w:bounds", "w:move"]);
        log.borrow_mut().clear();

        tree.set_bounds(w, Rect::new(1.0, 1.0, 3.0, 3.0));
        assert_eq!(*log.borrow(), vec!["w:bounds", "w:move", "w:resize"]);
        log.borrow_mut().clear();

        tree.set_bounds(w, Rect::new(1.0, 1.0, 3.0, 3.0));
        assert!(log.borrow().is_empty(), "unchanged bounds fire nothing");
    }

    #[test]
    fn z_index_derives_from_depth() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Parent::Root, Blank);
        let a = tree.insert(Parent::Widget(root), Blank);
        let b = tree.insert(Parent::Widget(a), Blank);
        assert_eq!(tree.z_index(root), Some(ROOT_Z_INDEX + 1));
        assert_eq!(tree.z_index(a), Some(2));
        assert_eq!(tree.z_index(b), Some(3));
        let sibling = tree.insert(Parent::Widget(root), Blank);
        assert!(tree.z_order(a).unwrap() < tree.z_order(sibling).unwrap());
    }

    #[test]
    fn hierarchy_signal_only_for_attached_membership() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Parent::Root, Blank);
        assert!(tree.take_signal(Signals::HIERARCHY_CHANGED), "root insert");

        let loose = tree.insert(Parent::Root, Blank);
        tree.take_signal(Signals::HIERARCHY_CHANGED);
        tree.remove(loose);
        assert!(tree.take_signal(Signals::HIERARCHY_CHANGED), "root removal");

        let detached = tree.insert(Parent::Widget(root), Blank);
        let inner = tree.insert(Parent::Widget(detached), Blank);
        assert!(!tree.take_signal(Signals::HIERARCHY_CHANGED));
        assert!(tree.add_child(detached, inner));
        assert!(
            !tree.take_signal(Signals::HIERARCHY_CHANGED),
            "membership below a detached widget is invisible"
        );
        assert!(!tree.is_attached(inner));

        assert!(tree.add_child(root, detached));
        assert!(tree.take_signal(Signals::HIERARCHY_CHANGED));
        assert!(tree.is_attached(inner));
        assert!(!tree.add_child(root, detached), "duplicate membership");
        assert!(!tree.take_signal(Signals::HIERARCHY_CHANGED));
    }

    #[test]
    fn bulk_membership_changes_signal_once() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Parent::Root, Blank);
        let kids: Vec<WidgetId> = (0..3)
            .map(|_| tree.insert(Parent::Widget(root), Blank))
            .collect();
        tree.take_signal(Signals::all());
        assert!(tree.add_children(root, &kids));
        assert!(tree.take_signal(Signals::HIERARCHY_CHANGED));
        assert_eq!(tree.child_count(root), 3);
        assert!(tree.remove_children(root, &kids[..2]));
        assert_eq!(tree.children(root), &kids[2..]);
        assert!(!tree.remove_children(root, &kids[..2]));
    }

    #[test]
    fn add_child_rebinds_and_refuses_cycles() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let a = tree.insert(Parent::Root, Blank);
        let b = tree.insert(Parent::Widget(a), Blank);
        tree.add_child(a, b);
        let c = tree.insert(Parent::Widget(b), Recorder::new("c", &log));
        tree.add_child(b, c);
        let d = tree.insert(Parent::Widget(c), Recorder::new("d", &log));
        tree.add_child(c, d);

        assert!(!tree.add_child(c, a), "ancestor cannot become a child");
        assert!(!tree.set_parent(a, Parent::Widget(d)));

        // Adopt `c` directly under `a`: it leaves `b` and its subtree is told.
        assert!(tree.add_child(a, c));
        assert!(!tree.has_child(b, c));
        assert_eq!(tree.parent(c), Some(Parent::Widget(a)));
        assert_eq!(*log.borrow(), vec!["c:parent", "d:parent"]);
        assert_eq!(tree.z_index(d), Some(3));
    }

    #[test]
    fn remove_destroys_subtree_and_non_member_dependents() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Parent::Root, Blank);
        let stack = tree.insert(Parent::Widget(root), Blank);
        tree.add_child(root, stack);
        let shown = tree.insert(Parent::Widget(stack), Blank);
        tree.add_child(stack, shown);
        let hidden = tree.insert(Parent::Widget(stack), Blank);
        let grandchild = tree.insert(Parent::Widget(hidden), Blank);

        tree.remove(stack);
        for id in [stack, shown, hidden, grandchild] {
            assert!(!tree.is_alive(id));
        }
        assert_eq!(tree.child_count(root), 0);
        assert_eq!(tree.len(), 1);
    }

    /// Removes itself whenever it is notified.
    struct SelfDestruct;

    impl Widget for SelfDestruct {
        fn on_notice(&mut self, cx: &mut WidgetCx<'_>, _notice: &Notice) {
            let id = cx.id();
            cx.tree_mut().remove(id);
        }
    }

    #[test]
    fn widget_may_remove_itself_from_its_hook() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Parent::Root, Blank);
        let doomed = tree.insert(Parent::Widget(root), SelfDestruct);
        tree.add_child(root, doomed);
        tree.notify(
            doomed,
            Notice::Scrolled {
                source: root,
                position: 0.0,
            },
        );
        assert!(!tree.is_alive(doomed));
        assert_eq!(tree.child_count(root), 0);
        // A replacement in the same slot is a distinct widget.
        let fresh = tree.insert(Parent::Widget(root), Blank);
        assert!(tree.get::<Blank>(fresh).is_some());
    }

    /// Notifies a target from inside its own notice hook.
    struct Relay {
        target: WidgetId,
    }

    impl Widget for Relay {
        fn on_notice(&mut self, cx: &mut WidgetCx<'_>, notice: &Notice) {
            let me = cx.id();
            cx.notify(
                self.target,
                Notice::Scrolled {
                    source: me,
                    position: 7.0,
                },
            );
            // Echo back to ourselves; must be queued, not re-entered.
            if notice.source() != me {
                cx.notify(
                    me,
                    Notice::Scrolled {
                        source: me,
                        position: 1.0,
                    },
                );
            }
        }
    }

    #[test]
    fn notices_to_running_widget_are_deferred() {
        let log = Log::default();
        let mut tree = WidgetTree::new();
        let recorder = tree.insert(Parent::Root, Recorder::new("p", &log));
        let relay = tree.insert(Parent::Root, Relay { target: recorder });
        tree.notify(
            relay,
            Notice::Scrolled {
                source: recorder,
                position: 0.0,
            },
        );
        // First pass plus the deferred echo, each forwarding once.
        assert_eq!(*log.borrow(), vec!["p:scrolled 7", "p:scrolled 7"]);
        // Dead targets are ignored.
        tree.remove(recorder);
        tree.notify(
            recorder,
            Notice::Scrolled {
                source: relay,
                position: 3.0,
            },
        );
        assert_eq!(log.borrow().len(), 2);
    }

    struct Counter(u32);

    impl Widget for Counter {}

    #[test]
    fn typed_access_downcasts() {
        let mut tree = WidgetTree::new();
        let id = tree.insert(Parent::Root, Counter(1));
        assert!(tree.get::<Blank>(id).is_none());
        tree.get_mut::<Counter>(id).unwrap().0 += 1;
        let seen = tree.with(id, |c: &mut Counter, cx| {
            c.0 += 1;
            cx.id()
        });
        assert_eq!(seen, Some(id));
        assert_eq!(tree.get::<Counter>(id).unwrap().0, 3);
        assert_eq!(tree.with(id, |_: &mut Blank, _| ()), None);
    }

    #[test]
    fn wide_membership_survives_churn() {
        const N: usize = 10_000;
        let mut tree = WidgetTree::new();
        let root = tree.insert(Parent::Root, Blank);
        let kids: Vec<WidgetId> = (0..N)
            .map(|_| tree.insert(Parent::Widget(root), Blank))
            .collect();
        assert!(tree.add_children(root, &kids));
        assert!(!tree.add_children(root, &kids), "all already members");

        // Give every tenth child a detached dependent of its own.
        let hidden: Vec<WidgetId> = kids
            .iter()
            .step_by(10)
            .map(|&k| tree.insert(Parent::Widget(k), Blank))
            .collect();

        // Drop every third child from membership and destroy every fifth.
        for (i, &kid) in kids.iter().enumerate() {
            if i % 5 == 0 {
                tree.remove(kid);
            } else if i % 3 == 0 {
                assert!(tree.remove_child(root, kid));
            }
        }

        let mut members = 0;
        for (i, &kid) in kids.iter().enumerate() {
            let member = i % 5 != 0 && i % 3 != 0;
            assert_eq!(tree.is_alive(kid), i % 5 != 0, "child {i} liveness");
            assert_eq!(tree.has_child(root, kid), member, "child {i} membership");
            assert_eq!(tree.is_attached(kid), member, "child {i} attachment");
            members += usize::from(member);
        }
        assert_eq!(tree.child_count(root), members);
        assert!(
            tree.children(root).iter().all(|&c| tree.has_child(root, c)),
            "the children slice agrees with per-child membership"
        );
        for (j, &h) in hidden.iter().enumerate() {
            // Index of the owning child is `j * 10`, always a multiple of five.
            assert!(!tree.is_alive(h), "dependent {j} died with its parent");
        }
        assert_eq!(tree.len(), 1 + N - N / 5);

        // Re-adding a dropped child works and is counted once.
        let dropped = kids[3];
        assert!(tree.add_child(root, dropped));
        assert!(!tree.add_child(root, dropped));
        assert_eq!(tree.child_count(root), members + 1);

        tree.remove(root);
        assert!(tree.is_empty(), "the whole subtree went with the root");
    }

    #[test]
    fn insert_with_builds_owned_children() {
        let mut tree = WidgetTree::new();
        let root = tree.insert(Parent::Root, Blank);
        let mut inner = None;
        let outer = tree.insert_with(Parent::Widget(root), |cx| {
            let child = cx.insert(Blank);
            assert!(cx.add_child(child));
            inner = Some(child);
            Counter(0)
        });
        let inner = inner.unwrap();
        assert_eq!(tree.children(outer), &[inner]);
        assert_eq!(tree.parent(inner), Some(Parent::Widget(outer)));
        assert!(tree.get::<Counter>(outer).is_some());
    }
}
