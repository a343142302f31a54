// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A clickable label.

use alloc::boxed::Box;
use alloc::vec::Vec;

use understory_widget_tree::{
    Color, MouseButton, Notice, PointerEvent, Surface, Widget, WidgetCx, WidgetId,
};

use crate::label::Label;

type ClickHandler = Box<dyn FnMut(&mut WidgetCx<'_>, &PointerEvent)>;

/// A [`Label`] that reports clicks.
///
/// A click is a left-button press and release that both landed on this button. On a click the
/// button takes focus, runs its handlers in registration order, then sends
/// [`Notice::Clicked`] to every listener widget.
///
/// A button can also be a member of a selection. [`Notice::Selected`] toggles whether it is drawn
/// with the highlight color.
pub struct Button {
    label: Label,
    listeners: Vec<WidgetId>,
    handlers: Vec<ClickHandler>,
    selected: bool,
    highlight: Color,
}

impl core::fmt::Debug for Button {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("Button")
            .field("label", &self.label)
            .field("listeners", &self.listeners)
            .field("handlers", &self.handlers.len())
            .field("selected", &self.selected)
            .field("highlight", &self.highlight)
            .finish()
    }
}

impl Button {
    /// A button showing `label`.
    pub fn new(label: Label) -> Self {
        Self {
            label,
            listeners: Vec::new(),
            handlers: Vec::new(),
            selected: false,
            highlight: Color::BLUE,
        }
    }

    /// Builder: color of the text while selected.
    pub fn with_highlight(mut self, highlight: Color) -> Self {
        self.highlight = highlight;
        self
    }

    /// The label.
    pub fn label(&self) -> &Label {
        &self.label
    }

    /// The label, mutably.
    pub fn label_mut(&mut self) -> &mut Label {
        &mut self.label
    }

    /// Whether the last selection notice picked this button.
    pub fn is_selected(&self) -> bool {
        self.selected
    }

    /// Send [`Notice::Clicked`] to `listener` on every click.
    pub fn add_listener(&mut self, listener: WidgetId) {
        if !self.listeners.contains(&listener) {
            self.listeners.push(listener);
        }
    }

    /// Stop notifying `listener`.
    pub fn remove_listener(&mut self, listener: WidgetId) -> bool {
        let before = self.listeners.len();
        self.listeners.retain(|l| *l != listener);
        self.listeners.len() != before
    }

    /// Run `handler` on every click.
    pub fn on_click(
        &mut self,
        handler: impl FnMut(&mut WidgetCx<'_>, &PointerEvent) + 'static,
    ) {
        self.handlers.push(Box::new(handler));
    }
}

impl Widget for Button {
    fn draw(&mut self, cx: &mut WidgetCx<'_>, surface: &mut dyn Surface) {
        let color = if self.selected {
            self.highlight
        } else {
            self.label.style().color
        };
        self.label.paint(surface, cx.bounds(), color);
    }

    fn on_mouse_down(
        &mut self,
        _cx: &mut WidgetCx<'_>,
        _event: &PointerEvent,
        in_bounds: bool,
    ) -> bool {
        in_bounds
    }

    fn on_mouse_up(
        &mut self,
        cx: &mut WidgetCx<'_>,
        event: &PointerEvent,
        in_bounds: bool,
    ) -> bool {
        let button = MouseButton::Left;
        if !(in_bounds && cx.was_mouse_down_in_bounds() && event.button == Some(button)) {
            return false;
        }
        if !cx.has_focus() {
            cx.request_focus();
        }
        for handler in &mut self.handlers {
            handler(cx, event);
        }
        let source = cx.id();
        for &listener in &self.listeners {
            cx.notify(listener, Notice::Clicked { source, button });
        }
        true
    }

    fn on_notice(&mut self, _cx: &mut WidgetCx<'_>, notice: &Notice) {
        if let Notice::Selected { selected, .. } = *notice {
            self.selected = selected;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::rc::Rc;
    use core::cell::Cell;
    use kurbo::{Point, Rect};
    use understory_dispatch::{OrderedHierarchy, PointerKind};
    use understory_widget_tree::{DrawOp, Parent, RecordingSurface, WidgetTree};

    #[derive(Default)]
    struct Clicks(usize);
    impl Widget for Clicks {
        fn on_notice(&mut self, _cx: &mut WidgetCx<'_>, notice: &Notice) {
            if matches!(notice, Notice::Clicked { .. }) {
                self.0 += 1;
            }
        }
    }

    fn setup() -> (WidgetTree, OrderedHierarchy, WidgetId, WidgetId, Rc<Cell<usize>>) {
        let mut tree = WidgetTree::new();
        tree.set_root_bounds(Rect::new(0.0, 0.0, 200.0, 200.0));
        let counter = tree.insert(Parent::Root, Clicks::default());
        let handled = Rc::new(Cell::new(0));
        let mut button = Button::new(Label::new("OK"));
        button.add_listener(counter);
        let seen = Rc::clone(&handled);
        button.on_click(move |_, _| seen.set(seen.get() + 1));
        let button = tree.insert(Parent::Root, button);
        tree.set_bounds(button, Rect::new(10.0, 10.0, 60.0, 40.0));
        let hierarchy = OrderedHierarchy::new(&mut tree, button);
        (tree, hierarchy, button, counter, handled)
    }

    #[test]
    fn press_and_release_on_the_button_clicks() {
        let (mut tree, mut hierarchy, button, counter, handled) = setup();
        let inside = PointerEvent::left(Point::new(20.0, 20.0));
        assert!(hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &inside));
        assert!(hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &inside));
        assert_eq!(handled.get(), 1);
        assert_eq!(tree.get::<Clicks>(counter).unwrap().0, 1);
        assert!(tree.has_focus(button), "a click takes focus");
    }

    #[test]
    fn drag_off_and_release_does_not_click() {
        let (mut tree, mut hierarchy, _, counter, handled) = setup();
        let outside = PointerEvent::left(Point::new(150.0, 150.0));
        let inside = PointerEvent::left(Point::new(20.0, 20.0));

        // Pressed elsewhere, released here.
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &outside);
        assert!(!hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &inside));

        // Pressed here, released elsewhere.
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &inside);
        assert!(!hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &outside));

        // Right button.
        let right = PointerEvent::new(Point::new(20.0, 20.0)).with_button(MouseButton::Right);
        hierarchy.dispatch_pointer(&mut tree, PointerKind::Down, &right);
        assert!(!hierarchy.dispatch_pointer(&mut tree, PointerKind::Up, &right));

        assert_eq!(handled.get(), 0);
        assert_eq!(tree.get::<Clicks>(counter).unwrap().0, 0);
    }

    #[test]
    fn selection_switches_text_color() {
        let (mut tree, mut hierarchy, button, _, _) = setup();
        let color = |surface: &RecordingSurface| {
            surface.ops.iter().find_map(|op| match op {
                DrawOp::Text { style, .. } => Some(style.color),
                _ => None,
            })
        };

        let mut surface = RecordingSurface::new();
        hierarchy.draw(&mut tree, &mut surface);
        assert_eq!(color(&surface), Some(Color::BLACK));

        let selected = Notice::Selected {
            source: button,
            selected: true,
        };
        tree.notify(button, selected);
        surface.clear();
        hierarchy.draw(&mut tree, &mut surface);
        assert_eq!(color(&surface), Some(Color::BLUE));
        assert!(tree.get::<Button>(button).unwrap().is_selected());
    }
}
