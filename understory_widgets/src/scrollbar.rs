// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A scrollbar: viewport position state plus the bar that drags it.

use alloc::vec::Vec;

use kurbo::Rect;
use understory_widget_tree::{
    Axis, Color, Notice, PointerEvent, Surface, Widget, WidgetCx, WidgetId,
};

/// Scrollbar metrics and colors.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct ScrollbarConfig {
    /// Thickness of the bar across its axis.
    pub width: f64,
    /// Smallest track, bar, content and viewport length.
    pub min_length: f64,
    /// Base wheel speed, scaled by how much content is hidden.
    pub speed: f64,
    /// Track fill.
    pub track_color: Color,
    /// Bar fill.
    pub bar_color: Color,
}

impl Default for ScrollbarConfig {
    fn default() -> Self {
        Self {
            width: 16.0,
            min_length: 16.0,
            speed: 0.002,
            track_color: Color::gray(235),
            bar_color: Color::gray(200),
        }
    }
}

/// Content size, viewport size and viewport position along one axis.
///
/// The viewport position is the source of truth and always lies in
/// `[0, content_size - viewport_size]` (or is `0` when the content fits). Bar length, bar
/// position and wheel speed are derived from it whenever anything changes.
///
/// The widget's own bounds are the track. Every change of the viewport position is sent as
/// [`Notice::Scrolled`] to each registered listener.
#[derive(Clone, Debug)]
pub struct Scrollbar {
    axis: Axis,
    config: ScrollbarConfig,
    content_size: f64,
    viewport_size: f64,
    position: f64,
    track_length: f64,
    bar_length: f64,
    bar_position: f64,
    bar_range: f64,
    speed: f64,
    // Pointer offset from the bar start while dragging.
    drag_anchor: Option<f64>,
    listeners: Vec<WidgetId>,
}

impl Scrollbar {
    /// A scrollbar along `axis` with the default config.
    pub fn new(axis: Axis) -> Self {
        Self::with_config(axis, ScrollbarConfig::default())
    }

    /// A scrollbar along `axis`.
    pub fn with_config(axis: Axis, config: ScrollbarConfig) -> Self {
        let mut bar = Self {
            axis,
            config,
            content_size: config.min_length,
            viewport_size: config.min_length,
            position: 0.0,
            track_length: 0.0,
            bar_length: 0.0,
            bar_position: 0.0,
            bar_range: 0.0,
            speed: config.speed,
            drag_anchor: None,
            listeners: Vec::new(),
        };
        bar.recompute();
        bar
    }

    /// The scroll axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// The config this bar was built with.
    pub fn config(&self) -> &ScrollbarConfig {
        &self.config
    }

    /// Total content length.
    pub fn content_size(&self) -> f64 {
        self.content_size
    }

    /// Visible length.
    pub fn viewport_size(&self) -> f64 {
        self.viewport_size
    }

    /// Offset of the viewport into the content.
    pub fn viewport_position(&self) -> f64 {
        self.position
    }

    /// Largest valid viewport position.
    pub fn max_position(&self) -> f64 {
        (self.content_size - self.viewport_size).max(0.0)
    }

    /// True when the content is longer than the viewport.
    pub fn overflows(&self) -> bool {
        self.content_size > self.viewport_size
    }

    /// Bar length in pixels.
    pub fn bar_length(&self) -> f64 {
        self.bar_length
    }

    /// Bar offset from the track start in pixels.
    pub fn bar_position(&self) -> f64 {
        self.bar_position
    }

    /// Wheel speed for the current bar length.
    pub fn speed(&self) -> f64 {
        self.speed
    }

    /// Register `listener` for [`Notice::Scrolled`].
    pub fn add_listener(&mut self, listener: WidgetId) {
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    /// Unregister `listener`.
    pub fn remove_listener(&mut self, listener: WidgetId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| *l != listener);
        self.listeners.len() != before
    }

    /// Set the content length. Lengths below the config minimum are raised to it.
    pub fn set_content_size(&mut self, cx: &mut WidgetCx<'_>, content_size: f64) {
        let old = self.position;
        self.content_size = self.clamp_length(content_size);
        self.commit(cx, old);
    }

    /// Set the viewport length. Lengths below the config minimum are raised to it.
    pub fn set_viewport_size(&mut self, cx: &mut WidgetCx<'_>, viewport_size: f64) {
        let old = self.position;
        self.viewport_size = self.clamp_length(viewport_size);
        self.commit(cx, old);
    }

    /// Set both lengths with a single notification.
    pub fn set_sizes(&mut self, cx: &mut WidgetCx<'_>, content_size: f64, viewport_size: f64) {
        let old = self.position;
        self.content_size = self.clamp_length(content_size);
        self.viewport_size = self.clamp_length(viewport_size);
        self.commit(cx, old);
    }

    /// Move the viewport. The position is clamped into range.
    pub fn set_viewport_position(&mut self, cx: &mut WidgetCx<'_>, position: f64) {
        let old = self.position;
        self.position = position;
        self.commit(cx, old);
    }

    /// Scroll by `motion` wheel notches.
    ///
    /// One notch moves `content_size × speed`, and speed grows as the bar shrinks, so long
    /// content scrolls faster per notch.
    pub fn scroll_by_wheel(&mut self, cx: &mut WidgetCx<'_>, motion: f64) {
        let position = self.position + motion * self.content_size * self.speed;
        self.set_viewport_position(cx, position);
    }

    /// The full-thickness strip along the far edge of `bounds` the bar slides in.
    pub fn track_rect(&self, bounds: Rect) -> Rect {
        let size = bounds.size();
        let cross_len = self.config.width.min(self.axis.cross_extent(size));
        let cross_start =
            self.axis.cross_coord(bounds.origin()) + self.axis.cross_extent(size) - cross_len;
        self.axis.rect(
            self.axis.main_coord(bounds.origin()),
            self.axis.main_extent(size),
            cross_start,
            cross_len,
        )
    }

    /// The bar inside [`Scrollbar::track_rect`].
    pub fn bar_rect(&self, bounds: Rect) -> Rect {
        let track = self.track_rect(bounds);
        self.axis.rect(
            self.axis.main_coord(track.origin()) + self.bar_position,
            self.bar_length,
            self.axis.cross_coord(track.origin()),
            self.axis.cross_extent(track.size()),
        )
    }

    fn clamp_length(&self, length: f64) -> f64 {
        if length < self.config.min_length {
            self.config.min_length
        } else {
            length
        }
    }

    fn commit(&mut self, cx: &mut WidgetCx<'_>, old_position: f64) {
        self.recompute();
        if self.position != old_position {
            let source = cx.id();
            for listener in self.listeners.clone() {
                cx.notify(
                    listener,
                    Notice::Scrolled {
                        source,
                        position: self.position,
                    },
                );
            }
        }
    }

    fn recompute(&mut self) {
        let max = self.max_position();
        self.position = if self.position.is_nan() {
            0.0
        } else {
            self.position.clamp(0.0, max)
        };

        let track = self.track_length;
        self.bar_length = (track * self.viewport_size / self.content_size)
            .max(self.config.min_length)
            .min(track);
        self.speed = if self.bar_length > 0.0 {
            track / self.bar_length * self.config.speed
        } else {
            self.config.speed
        };
        self.bar_range = track - self.bar_length;
        self.bar_position = if self.bar_range > 0.0 && max > 0.0 {
            self.position / max * self.bar_range
        } else {
            0.0
        };
    }
}

impl Widget for Scrollbar {
    fn on_bounds_change(&mut self, cx: &mut WidgetCx<'_>, _old: Rect) {
        let mut bounds = cx.bounds();
        let length = self.axis.main_extent(bounds.size());
        if length < self.config.min_length {
            bounds = self.axis.rect(
                self.axis.main_coord(bounds.origin()),
                self.config.min_length,
                self.axis.cross_coord(bounds.origin()),
                self.axis.cross_extent(bounds.size()),
            );
            let id = cx.id();
            cx.tree_mut().set_bounds(id, bounds);
        }
        let old = self.position;
        self.track_length = self.axis.main_extent(bounds.size());
        self.commit(cx, old);
    }

    fn on_mouse_down(
        &mut self,
        cx: &mut WidgetCx<'_>,
        event: &PointerEvent,
        in_bounds: bool,
    ) -> bool {
        if !in_bounds {
            return false;
        }
        let bounds = cx.bounds();
        let bar = self.bar_rect(bounds);
        let pointer = self.axis.main_coord(event.position);
        let bar_start = self.axis.main_coord(bar.origin());
        if bar.contains(event.position) {
            self.drag_anchor = Some(pointer - bar_start);
        } else if self.track_rect(bounds).contains(event.position) {
            if pointer >= bar_start + self.bar_length {
                self.set_viewport_position(cx, self.position + self.viewport_size);
            } else if pointer < bar_start {
                self.set_viewport_position(cx, self.position - self.viewport_size);
            }
        }
        true
    }

    fn on_mouse_up(
        &mut self,
        _cx: &mut WidgetCx<'_>,
        _event: &PointerEvent,
        _in_bounds: bool,
    ) -> bool {
        self.drag_anchor = None;
        false
    }

    fn on_mouse_drag(
        &mut self,
        cx: &mut WidgetCx<'_>,
        event: &PointerEvent,
        _in_bounds: bool,
    ) -> bool {
        let latched = cx.was_mouse_down_in_bounds();
        let Some(anchor) = self.drag_anchor.filter(|_| latched) else {
            return latched;
        };
        let track_start = self.axis.main_coord(cx.bounds().origin());
        let target = (self.axis.main_coord(event.position) - track_start - anchor)
            .clamp(0.0, self.bar_range.max(0.0));
        let position = if self.bar_range > 0.0 {
            target / self.bar_range * self.max_position()
        } else {
            0.0
        };
        self.set_viewport_position(cx, position);
        true
    }

    fn on_mouse_wheel(
        &mut self,
        cx: &mut WidgetCx<'_>,
        event: &PointerEvent,
        in_bounds: bool,
    ) -> bool {
        if !in_bounds {
            return false;
        }
        self.scroll_by_wheel(cx, event.wheel);
        true
    }

    fn draw(&mut self, cx: &mut WidgetCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        surface.fill_rect(self.track_rect(bounds), self.config.track_color);
        surface.fill_rect(self.bar_rect(bounds), self.config.bar_color);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use understory_dispatch::{OrderedHierarchy, PointerKind};
    use understory_widget_tree::{DrawOp, Parent, RecordingSurface, WidgetTree};

    /// Remembers every scrolled notice it receives.
    #[derive(Default)]
    struct Log(Vec<f64>);
    impl Widget for Log {
        fn on_notice(&mut self, _cx: &mut WidgetCx<'_>, notice: &Notice) {
            if let Notice::Scrolled { position, .. } = notice {
                self.0.push(*position);
            }
        }
    }

    /// A vertical bar of track 100 over content 400 and viewport 100.
    fn setup() -> (WidgetTree, WidgetId, WidgetId) {
        let mut tree = WidgetTree::new();
        tree.set_root_bounds(Rect::new(0.0, 0.0, 500.0, 500.0));
        let log = tree.insert(Parent::Root, Log::default());
        let mut bar = Scrollbar::new(Axis::Vertical);
        bar.add_listener(log);
        let bar = tree.insert(Parent::Root, bar);
        tree.set_bounds(bar, Rect::new(0.0, 0.0, 16.0, 100.0));
        tree.with::<Scrollbar, _>(bar, |b, cx| b.set_sizes(cx, 400.0, 100.0))
            .unwrap();
        (tree, bar, log)
    }

    fn position(tree: &WidgetTree, bar: WidgetId) -> f64 {
        tree.get::<Scrollbar>(bar).unwrap().viewport_position()
    }

    fn set(tree: &mut WidgetTree, bar: WidgetId, value: f64) -> f64 {
        tree.with::<Scrollbar, _>(bar, |b, cx| {
            b.set_viewport_position(cx, value);
            b.viewport_position()
        })
        .unwrap()
    }

    #[test]
    fn position_reads_back_clamped() {
        let (mut tree, bar, _) = setup();
        let cases = [
            (-20.0, 0.0),
            (0.0, 0.0),
            (120.0, 120.0),
            (300.0, 300.0),
            (900.0, 300.0),
        ];
        for (value, expected) in cases {
            assert_eq!(set(&mut tree, bar, value), expected, "set {value}");
        }
    }

    #[test]
    fn content_that_fits_pins_to_zero() {
        let (mut tree, bar, _) = setup();
        set(&mut tree, bar, 200.0);
        tree.with::<Scrollbar, _>(bar, |b, cx| b.set_content_size(cx, 80.0))
            .unwrap();
        let b = tree.get::<Scrollbar>(bar).unwrap();
        assert_eq!(b.viewport_position(), 0.0);
        assert!(!b.overflows());
        assert_eq!(b.bar_length(), 100.0, "bar fills the track");
    }

    #[test]
    fn bar_metrics_follow_the_ratio() {
        let (mut tree, bar, _) = setup();
        let b = tree.get::<Scrollbar>(bar).unwrap();
        assert_eq!(b.bar_length(), 25.0);
        assert_eq!(b.speed(), 0.008, "a quarter-length bar scrolls four times faster");
        set(&mut tree, bar, 150.0);
        let b = tree.get::<Scrollbar>(bar).unwrap();
        assert_eq!(b.bar_position(), 37.5);
        assert_eq!(
            b.bar_rect(Rect::new(0.0, 0.0, 16.0, 100.0)),
            Rect::new(0.0, 37.5, 16.0, 62.5)
        );
    }

    #[test]
    fn tiny_bounds_are_enlarged() {
        let (mut tree, bar, _) = setup();
        tree.set_bounds(bar, Rect::new(0.0, 0.0, 16.0, 4.0));
        assert_eq!(tree.bounds(bar), Some(Rect::new(0.0, 0.0, 16.0, 16.0)));
    }

    #[test]
    fn listeners_hear_every_change_once() {
        let (mut tree, bar, log) = setup();
        set(&mut tree, bar, 50.0);
        set(&mut tree, bar, 50.0);
        set(&mut tree, bar, 1000.0);
        assert_eq!(tree.get::<Log>(log).unwrap().0, [50.0, 300.0]);
    }

    #[test]
    fn track_clicks_page_and_wheel_scrolls() {
        let (mut tree, bar, _) = setup();
        let mut hierarchy = OrderedHierarchy::new(&mut tree, bar);

        // Below the bar: page down one viewport.
        let below = PointerEvent::left(kurbo::Point::new(8.0, 90.0));
        assert!(hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &below));
        assert_eq!(position(&tree, bar), 100.0);
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &below);

        // Above the bar: page back up.
        let above = PointerEvent::left(kurbo::Point::new(8.0, 1.0));
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &above);
        assert_eq!(position(&tree, bar), 0.0);
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &above);

        let wheel = PointerEvent::new(kurbo::Point::new(8.0, 50.0)).with_wheel(10.0);
        assert!(hierarchy.dispatch_pointer(&mut tree, PointerKind::Wheel, &wheel));
        assert!((position(&tree, bar) - 32.0).abs() < 1e-9, "10 × 400 × 0.008");
    }

    #[test]
    fn dragging_the_bar_keeps_the_grab_offset() {
        let (mut tree, bar, _) = setup();
        let mut hierarchy = OrderedHierarchy::new(&mut tree, bar);

        // Grab the 25px bar 5px below its top, then drag 15px down.
        let grab = PointerEvent::left(kurbo::Point::new(8.0, 5.0));
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &grab);
        let drag = PointerEvent::left(kurbo::Point::new(8.0, 20.0));
        assert!(hierarchy.dispatch_pointer(&mut tree, PointerKind::Drag, &drag));
        let moved = tree.get::<Scrollbar>(bar).unwrap().bar_position();
        assert!((moved - 15.0).abs() < 1e-9, "bar top follows the pointer");
        assert!((position(&tree, bar) - 60.0).abs() < 1e-9, "15 of 75 px is 60 of 300");

        // Dragging far past the end pins the bar.
        let far = PointerEvent::left(kurbo::Point::new(8.0, 400.0));
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Drag, &far);
        assert_eq!(position(&tree, bar), 300.0);

        hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &far);
        let after = PointerEvent::left(kurbo::Point::new(8.0, 10.0));
        assert!(
            !hierarchy.dispatch_pointer(&mut tree, PointerKind::Drag, &after),
            "no drag without a press"
        );
        assert_eq!(position(&tree, bar), 300.0);
    }

    #[test]
    fn horizontal_bar_runs_along_the_bottom() {
        let mut tree = WidgetTree::new();
        tree.set_root_bounds(Rect::new(0.0, 0.0, 500.0, 500.0));
        let bar = tree.insert(Parent::Root, Scrollbar::new(Axis::Horizontal));
        let bounds = Rect::new(0.0, 80.0, 100.0, 120.0);
        tree.set_bounds(bar, bounds);
        tree.with::<Scrollbar, _>(bar, |b, cx| b.set_sizes(cx, 400.0, 100.0))
            .unwrap();
        let mut hierarchy = OrderedHierarchy::new(&mut tree, bar);

        let b = tree.get::<Scrollbar>(bar).unwrap();
        assert_eq!(b.track_rect(bounds), Rect::new(0.0, 104.0, 100.0, 120.0));
        assert_eq!(b.bar_rect(bounds), Rect::new(0.0, 104.0, 25.0, 120.0));

        // Inside the bounds but above the track strip: consumed, nothing moves.
        let above_track = PointerEvent::left(kurbo::Point::new(80.0, 90.0));
        assert!(hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &above_track));
        assert_eq!(position(&tree, bar), 0.0);
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &above_track);

        // Right of the bar pages forward, left of it pages back.
        let right = PointerEvent::left(kurbo::Point::new(80.0, 112.0));
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &right);
        assert_eq!(position(&tree, bar), 100.0);
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &right);
        assert_eq!(
            tree.get::<Scrollbar>(bar).unwrap().bar_rect(bounds),
            Rect::new(25.0, 104.0, 50.0, 120.0)
        );
        let left = PointerEvent::left(kurbo::Point::new(10.0, 112.0));
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &left);
        assert_eq!(position(&tree, bar), 0.0);
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &left);

        // Grab 5px into the bar and drag 15px right; vertical motion is ignored.
        let grab = PointerEvent::left(kurbo::Point::new(5.0, 112.0));
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &grab);
        let drag = PointerEvent::left(kurbo::Point::new(20.0, 60.0));
        assert!(hierarchy.dispatch_pointer(&mut tree, PointerKind::Drag, &drag));
        assert!((position(&tree, bar) - 60.0).abs() < 1e-9, "15 of 75 px is 60 of 300");
        let moved = tree.get::<Scrollbar>(bar).unwrap().bar_rect(bounds);
        assert!((moved.x0 - 15.0).abs() < 1e-9);
        assert_eq!((moved.y0, moved.y1), (104.0, 120.0));
    }

    #[test]
    fn draws_track_then_bar() {
        let (mut tree, bar, _) = setup();
        let mut hierarchy = OrderedHierarchy::new(&mut tree, bar);
        let mut surface = RecordingSurface::new();
        hierarchy.draw(&mut tree, &mut surface);
        let fills: Vec<_> = surface
            .ops
            .iter()
            .filter_map(|op| match op {
                DrawOp::Fill(rect, color) => Some((*rect, *color)),
                _ => None,
            })
            .collect();
        assert_eq!(
            fills,
            [
                (Rect::new(0.0, 0.0, 16.0, 100.0), Color::gray(235)),
                (Rect::new(0.0, 0.0, 16.0, 25.0), Color::gray(200)),
            ]
        );
    }
}
