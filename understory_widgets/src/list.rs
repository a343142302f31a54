// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Items laid out back to back inside a scrolling viewport.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_widget_tree::{Axis, Notice, Parent, PointerEvent, Widget, WidgetCx, WidgetId};

use crate::error::{LayoutError, check_size};
use crate::scrollable::Scrollable;
use crate::scrollbar::ScrollbarConfig;

#[derive(Copy, Clone, Debug)]
struct ListItem {
    widget: Option<WidgetId>,
    size: f64,
}

/// A scrolling run of items, each with its own primary-axis size.
///
/// The content size is the sum of item sizes. Items are placed one after another from the
/// scrolled content origin and span the content's cross extent. When the list has no items, an
/// optional placeholder fills the viewport instead.
///
/// Build one inside [`WidgetTree::insert_with`](understory_widget_tree::WidgetTree::insert_with),
/// since the list creates its scrollbar as it is constructed:
///
/// ```
/// use kurbo::Rect;
/// use understory_widget_tree::{Axis, Parent, WidgetTree};
/// use understory_widgets::SequentialList;
///
/// let mut tree = WidgetTree::new();
/// tree.set_root_bounds(Rect::new(0.0, 0.0, 100.0, 100.0));
/// let list = tree.insert_with(Parent::Root, |cx| SequentialList::new(cx, Axis::Vertical));
/// tree.set_bounds(list, Rect::new(0.0, 0.0, 100.0, 100.0));
///
/// tree.with::<SequentialList, _>(list, |list, cx| {
///     list.push_sized(cx, 250.0, None).unwrap();
///     assert_eq!(list.content_size(), 250.0);
///     assert!(list.scroll().is_bar_visible());
/// });
/// ```
#[derive(Clone, Debug)]
pub struct SequentialList {
    scroll: Scrollable,
    items: Vec<ListItem>,
    placeholder: Option<WidgetId>,
}

impl SequentialList {
    /// A list along `axis` with the default scrollbar that only scrolls from the bar itself.
    pub fn new(cx: &mut WidgetCx<'_>, axis: Axis) -> Self {
        Self::with_config(cx, axis, ScrollbarConfig::default(), false)
    }

    /// A list along `axis` with a custom scrollbar.
    pub fn with_config(
        cx: &mut WidgetCx<'_>,
        axis: Axis,
        config: ScrollbarConfig,
        global_scroll: bool,
    ) -> Self {
        Self {
            scroll: Scrollable::new(cx, axis, global_scroll, config),
            items: Vec::new(),
            placeholder: None,
        }
    }

    /// Scroll state.
    pub fn scroll(&self) -> &Scrollable {
        &self.scroll
    }

    /// Scroll state, mutably.
    pub fn scroll_mut(&mut self) -> &mut Scrollable {
        &mut self.scroll
    }

    /// Number of items, empty slots included.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the list has no items.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Widget of item `index`.
    pub fn item(&self, index: usize) -> Option<WidgetId> {
        self.items.get(index).and_then(|item| item.widget)
    }

    /// Primary-axis size of item `index`.
    pub fn item_size(&self, index: usize) -> Option<f64> {
        self.items.get(index).map(|item| item.size)
    }

    /// Sum of every item's size.
    pub fn content_size(&self) -> f64 {
        self.items.iter().map(|item| item.size).sum()
    }

    /// The widget shown while the list is empty.
    pub fn placeholder(&self) -> Option<WidgetId> {
        self.placeholder
    }

    /// Append `widget`, sized by its current extent along the list axis.
    pub fn push(&mut self, cx: &mut WidgetCx<'_>, widget: WidgetId) -> usize {
        let size = cx
            .tree()
            .bounds(widget)
            .map_or(0.0, |b| self.scroll.axis().main_extent(b.size()));
        self.push_item(cx, size, Some(widget))
    }

    /// Append an item of primary-axis `size`. `None` reserves space without drawing.
    pub fn push_sized(
        &mut self,
        cx: &mut WidgetCx<'_>,
        size: f64,
        widget: Option<WidgetId>,
    ) -> Result<usize, LayoutError> {
        let size = check_size(size)?;
        Ok(self.push_item(cx, size, widget))
    }

    pub(crate) fn push_item(
        &mut self,
        cx: &mut WidgetCx<'_>,
        size: f64,
        widget: Option<WidgetId>,
    ) -> usize {
        self.items.push(ListItem { widget, size });
        if let Some(widget) = widget {
            cx.add_child(widget);
        }
        self.refresh(cx);
        self.items.len() - 1
    }

    /// Append several widgets of the same `size` with one hierarchy change.
    pub fn extend(
        &mut self,
        cx: &mut WidgetCx<'_>,
        size: f64,
        widgets: &[WidgetId],
    ) -> Result<(), LayoutError> {
        let size = check_size(size)?;
        self.items.extend(widgets.iter().map(|&widget| ListItem {
            widget: Some(widget),
            size,
        }));
        cx.add_children(widgets);
        self.refresh(cx);
        Ok(())
    }

    /// Resize item `index`.
    pub fn set_item_size(
        &mut self,
        cx: &mut WidgetCx<'_>,
        index: usize,
        size: f64,
    ) -> Result<(), LayoutError> {
        let size = check_size(size)?;
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(LayoutError::IndexOutOfRange { index, len })?;
        item.size = size;
        self.refresh(cx);
        Ok(())
    }

    /// Resize the item holding `widget`.
    pub fn set_item_size_of(
        &mut self,
        cx: &mut WidgetCx<'_>,
        widget: WidgetId,
        size: f64,
    ) -> Result<(), LayoutError> {
        let index = self
            .items
            .iter()
            .position(|item| item.widget == Some(widget))
            .ok_or(LayoutError::NotAnItem(widget))?;
        self.set_item_size(cx, index, size)
    }

    /// Destroy every item.
    pub fn clear(&mut self, cx: &mut WidgetCx<'_>) {
        for item in core::mem::take(&mut self.items) {
            if let Some(widget) = item.widget {
                cx.tree_mut().remove(widget);
            }
        }
        self.refresh(cx);
    }

    /// Show `placeholder` while the list is empty, destroying the previous one.
    pub fn set_placeholder(&mut self, cx: &mut WidgetCx<'_>, placeholder: Option<WidgetId>) {
        if self.placeholder == placeholder {
            return;
        }
        if let Some(old) = core::mem::replace(&mut self.placeholder, placeholder) {
            cx.tree_mut().remove(old);
        }
        if let Some(new) = placeholder {
            let owner = Parent::Widget(cx.id());
            cx.tree_mut().set_parent(new, owner);
        }
        self.refresh(cx);
    }

    /// Move the viewport to `position` and relayout.
    pub fn scroll_to(&mut self, cx: &mut WidgetCx<'_>, position: f64) {
        self.scroll.scroll_to(cx, position);
        self.layout_items(cx);
    }

    /// Recompute the scroll state and lay everything out.
    pub fn refresh(&mut self, cx: &mut WidgetCx<'_>) {
        self.scroll.update(cx, self.content_size());
        self.layout_items(cx);
        self.sync_placeholder(cx);
    }

    fn layout_items(&self, cx: &mut WidgetCx<'_>) {
        let axis = self.scroll.axis();
        let content = self.scroll.content_bounds();
        let cross_start = axis.cross_coord(content.origin());
        let cross_len = axis.cross_extent(content.size());
        let mut cursor = axis.main_coord(content.origin());
        for item in &self.items {
            if let Some(widget) = item.widget {
                let rect = axis.rect(cursor, item.size, cross_start, cross_len);
                cx.tree_mut().set_bounds(widget, rect);
            }
            cursor += item.size;
        }
    }

    fn sync_placeholder(&self, cx: &mut WidgetCx<'_>) {
        let Some(placeholder) = self.placeholder else {
            return;
        };
        if self.items.is_empty() {
            let viewport = self.scroll.viewport_bounds(cx.bounds());
            cx.tree_mut().set_bounds(placeholder, viewport);
            cx.add_child(placeholder);
        } else {
            cx.remove_child(placeholder);
        }
    }
}

impl Widget for SequentialList {
    fn on_bounds_change(&mut self, cx: &mut WidgetCx<'_>, _old: Rect) {
        self.refresh(cx);
    }

    fn on_notice(&mut self, cx: &mut WidgetCx<'_>, notice: &Notice) {
        if let Notice::Scrolled { source, position } = *notice {
            if source == self.scroll.bar() && self.scroll.on_scrolled(cx, position) {
                self.layout_items(cx);
            }
        }
    }

    fn on_mouse_wheel(
        &mut self,
        cx: &mut WidgetCx<'_>,
        event: &PointerEvent,
        in_bounds: bool,
    ) -> bool {
        let consumed = self.scroll.handle_wheel(cx, event, in_bounds);
        if consumed {
            self.layout_items(cx);
        }
        consumed
    }
}
