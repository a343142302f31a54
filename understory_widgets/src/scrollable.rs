// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content-to-viewport bookkeeping shared by scrolling widgets.

use kurbo::{Point, Rect};
use understory_widget_tree::{Axis, PointerEvent, WidgetCx, WidgetId, WidgetTree};

use crate::scrollbar::{Scrollbar, ScrollbarConfig};

/// A scrollbar owned by a widget, plus the content rectangle it implies.
///
/// Embed this in a widget that shows more content than fits its bounds. The owner reports its
/// content length through [`Scrollable::update`] whenever its bounds or content change, and
/// forwards [`Notice::Scrolled`](understory_widget_tree::Notice::Scrolled) from
/// [`Scrollable::bar`] to [`Scrollable::on_scrolled`].
///
/// The content origin is the owner's origin moved back by the viewport position along the
/// scroll axis. Across the axis the content spans the owner minus the bar's width while the bar
/// is shown. The bar is a child of the owner only while the content overflows.
#[derive(Clone, Debug)]
pub struct Scrollable {
    axis: Axis,
    bar: WidgetId,
    bar_width: f64,
    global_scroll: bool,
    content_size: f64,
    position: f64,
    bar_visible: bool,
    content_bounds: Rect,
}

impl Scrollable {
    /// Create the scrollbar under the widget of `cx` and listen to it.
    pub fn new(
        cx: &mut WidgetCx<'_>,
        axis: Axis,
        global_scroll: bool,
        config: ScrollbarConfig,
    ) -> Self {
        let mut bar = Scrollbar::with_config(axis, config);
        bar.add_listener(cx.id());
        let bar = cx.insert(bar);
        Self {
            axis,
            bar,
            bar_width: config.width,
            global_scroll,
            content_size: 0.0,
            position: 0.0,
            bar_visible: false,
            content_bounds: Rect::ZERO,
        }
    }

    /// The scroll axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The owned scrollbar, whether or not it is shown.
    pub fn bar(&self) -> WidgetId {
        self.bar
    }

    /// True while the content overflows and the bar is a child of the owner.
    pub fn is_bar_visible(&self) -> bool {
        self.bar_visible
    }

    /// Whether wheel motion anywhere over the owner scrolls it.
    pub fn global_scroll(&self) -> bool {
        self.global_scroll
    }

    /// Let wheel motion anywhere over the owner scroll it, not only over the bar.
    pub fn set_global_scroll(&mut self, global_scroll: bool) {
        self.global_scroll = global_scroll;
    }

    /// Content length along the scroll axis, as last reported.
    pub fn content_size(&self) -> f64 {
        self.content_size
    }

    /// Current viewport position.
    pub fn viewport_position(&self) -> f64 {
        self.position
    }

    /// Where the content currently sits.
    pub fn content_bounds(&self) -> Rect {
        self.content_bounds
    }

    /// Origin of [`Scrollable::content_bounds`].
    pub fn content_location(&self) -> Point {
        self.content_bounds.origin()
    }

    /// The owner's bounds minus the bar strip.
    pub fn viewport_bounds(&self, bounds: Rect) -> Rect {
        let size = bounds.size();
        self.axis.rect(
            self.axis.main_coord(bounds.origin()),
            self.axis.main_extent(size),
            self.axis.cross_coord(bounds.origin()),
            self.cross_len(bounds),
        )
    }

    /// Sync the bar with the owner's bounds and `content_size`, then recompute the content
    /// rectangle.
    pub fn update(&mut self, cx: &mut WidgetCx<'_>, content_size: f64) {
        self.content_size = content_size;
        let bounds = cx.bounds();
        let viewport = self.axis.main_extent(bounds.size());
        let strip = self.strip(bounds);
        let bar = self.bar;

        let tree = cx.tree_mut();
        tree.set_bounds(bar, strip);
        let position = tree.with::<Scrollbar, _>(bar, |sb, cx| {
            sb.set_sizes(cx, content_size, viewport);
            sb.viewport_position()
        });
        match position {
            Some(position) => self.position = position,
            None => log::trace!("scrollbar {bar:?} is busy; keeping position {}", self.position),
        }

        let visible = content_size > viewport;
        if visible != self.bar_visible {
            if visible {
                cx.add_child(bar);
            } else {
                cx.remove_child(bar);
            }
            log::debug!(
                "scrollbar of {:?} {}",
                cx.id(),
                if visible { "shown" } else { "hidden" }
            );
            self.bar_visible = visible;
        }
        self.content_bounds = self.content_rect(bounds);
    }

    /// The bar moved to `position`; only the content origin changes.
    ///
    /// Returns `false` when `position` is already the cached one, which is the case for the
    /// deferred notice that follows [`Scrollable::scroll_to`] or [`Scrollable::handle_wheel`].
    pub fn on_scrolled(&mut self, cx: &WidgetCx<'_>, position: f64) -> bool {
        if position == self.position {
            return false;
        }
        self.position = position;
        self.content_bounds = self.content_rect(cx.bounds());
        true
    }

    /// Move the viewport to `position`, clamped by the bar.
    pub fn scroll_to(&mut self, cx: &mut WidgetCx<'_>, position: f64) {
        let moved = cx.tree_mut().with::<Scrollbar, _>(self.bar, |sb, cx| {
            sb.set_viewport_position(cx, position);
            sb.viewport_position()
        });
        if let Some(position) = moved {
            self.on_scrolled(cx, position);
        }
    }

    /// Forward wheel motion over the owner to the bar.
    ///
    /// Consumes the event only when global scrolling is on, the pointer is over the owner, and
    /// the bar is shown.
    pub fn handle_wheel(
        &mut self,
        cx: &mut WidgetCx<'_>,
        event: &PointerEvent,
        in_bounds: bool,
    ) -> bool {
        if !(in_bounds && self.global_scroll && self.bar_visible) {
            return false;
        }
        let moved = cx.tree_mut().with::<Scrollbar, _>(self.bar, |sb, cx| {
            sb.scroll_by_wheel(cx, event.wheel);
            sb.viewport_position()
        });
        if let Some(position) = moved {
            self.on_scrolled(cx, position);
        }
        true
    }

    /// Viewport position of the bar as stored in `tree`.
    pub fn bar_position(&self, tree: &WidgetTree) -> Option<f64> {
        tree.get::<Scrollbar>(self.bar).map(Scrollbar::viewport_position)
    }

    fn visible_bar_width(&self) -> f64 {
        if self.bar_visible { self.bar_width } else { 0.0 }
    }

    fn cross_len(&self, bounds: Rect) -> f64 {
        (self.axis.cross_extent(bounds.size()) - self.visible_bar_width()).max(0.0)
    }

    fn strip(&self, bounds: Rect) -> Rect {
        let size = bounds.size();
        let width = self.bar_width.min(self.axis.cross_extent(size));
        self.axis.rect(
            self.axis.main_coord(bounds.origin()),
            self.axis.main_extent(size),
            self.axis.cross_coord(bounds.origin()) + self.axis.cross_extent(size) - width,
            width,
        )
    }

    fn content_rect(&self, bounds: Rect) -> Rect {
        self.axis.rect(
            self.axis.main_coord(bounds.origin()) - self.position,
            self.content_size,
            self.axis.cross_coord(bounds.origin()),
            self.cross_len(bounds),
        )
    }
}
