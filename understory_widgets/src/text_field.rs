// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A single-line editable text box.

use alloc::string::String;
use alloc::vec::Vec;

use kurbo::{Point, Rect};
use understory_widget_tree::{
    Color, KeyCode, KeyEvent, Modifiers, MouseButton, Notice, PointerEvent, Surface, TextStyle,
    Widget, WidgetCx, WidgetId,
};

/// Space between the box outline and the text.
pub const FIELD_PADDING: f64 = 6.0;

/// Width of the insertion cursor.
pub const CURSOR_WIDTH: f64 = 1.0;

/// Gap between the last character and the cursor.
pub const CURSOR_PADDING: f64 = 1.0;

/// Appended to text cut short while the field is not focused.
pub const ELLIPSIS: &str = "…";

/// A one-line text box edited from the keyboard.
///
/// Clicking the field takes focus. While focused, typed characters are appended and Backspace
/// removes the last one; Enter, Delete and Tab are ignored, as is anything typed with Ctrl held.
/// Each edit sends [`Notice::Edited`] to the listeners. Releasing Enter sends
/// [`Notice::Submitted`].
///
/// Text that does not fit is cut: the focused field shows the end of the text next to the
/// cursor, the unfocused one shows the beginning followed by [`ELLIPSIS`].
#[derive(Clone, Debug, PartialEq)]
pub struct TextField {
    text: String,
    style: TextStyle,
    padding: f64,
    outline: Color,
    listeners: Vec<WidgetId>,
}

impl Default for TextField {
    fn default() -> Self {
        Self::new("")
    }
}

impl TextField {
    /// A field holding `text`.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
            padding: FIELD_PADDING,
            outline: Color::BLACK,
            listeners: Vec::new(),
        }
    }

    /// Builder: set the text style.
    pub fn with_style(mut self, style: TextStyle) -> Self {
        self.style = style;
        self
    }

    /// Builder: set the padding.
    pub fn with_padding(mut self, padding: f64) -> Self {
        self.padding = padding;
        self
    }

    /// The current text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text without notifying listeners.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Height of the box for the current style.
    pub fn preferred_height(&self) -> f64 {
        self.style.size + 2.0 * self.padding
    }

    /// Send edits and submissions to `listener`.
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

    /// Send [`Notice::Submitted`] with the current text to every listener.
    pub fn submit(&self, cx: &mut WidgetCx<'_>) {
        let source = cx.id();
        log::debug!("{source:?} submitted {} chars", self.text.chars().count());
        for &listener in &self.listeners {
            let text = self.text.clone();
            cx.notify(listener, Notice::Submitted { source, text });
        }
    }

    /// The part of the text shown in a box `width` wide.
    pub fn visible_text(&self, surface: &dyn Surface, width: f64, focused: bool) -> String {
        let measure = |s: &str| surface.text_width(s, &self.style);
        let mut available = width - 2.0 * self.padding;
        if focused {
            available -= CURSOR_PADDING + CURSOR_WIDTH;
        }
        if measure(&self.text) <= available {
            return self.text.clone();
        }

        if focused {
            let mut start = self.text.len();
            for (i, _) in self.text.char_indices().rev() {
                if measure(&self.text[i..]) >= available {
                    break;
                }
                start = i;
            }
            return String::from(&self.text[start..]);
        }

        let ellipsis = measure(ELLIPSIS);
        let mut end = 0;
        for (i, ch) in self.text.char_indices() {
            let next = i + ch.len_utf8();
            if measure(&self.text[..next]) + ellipsis >= available {
                break;
            }
            end = next;
        }
        let mut shown = String::from(&self.text[..end]);
        shown.push_str(ELLIPSIS);
        shown
    }

    fn field_rect(&self, bounds: Rect) -> Rect {
        Rect::new(
            bounds.x0,
            bounds.y0,
            bounds.x1,
            bounds.y0 + self.preferred_height(),
        )
    }

    fn edited(&self, cx: &mut WidgetCx<'_>, previous: &str) {
        let source = cx.id();
        for &listener in &self.listeners {
            let previous = String::from(previous);
            cx.notify(listener, Notice::Edited { source, previous });
        }
    }
}

impl Widget for TextField {
    fn draw(&mut self, cx: &mut WidgetCx<'_>, surface: &mut dyn Surface) {
        let focused = cx.has_focus();
        let field = self.field_rect(cx.bounds());
        surface.stroke_rect(field, self.outline, 1.0);

        let shown = self.visible_text(surface, field.width(), focused);
        let origin = Point::new(field.x0 + self.padding, field.y0 + self.padding);
        surface.text(&shown, origin, &self.style);
        if focused {
            let x = origin.x + surface.text_width(&shown, &self.style) + CURSOR_PADDING;
            let cursor = Rect::new(x, origin.y, x + CURSOR_WIDTH, origin.y + self.style.size);
            surface.fill_rect(cursor, self.style.color);
        }
    }

    fn on_mouse_up(
        &mut self,
        cx: &mut WidgetCx<'_>,
        event: &PointerEvent,
        in_bounds: bool,
    ) -> bool {
        if !(in_bounds
            && cx.was_mouse_down_in_bounds()
            && event.button == Some(MouseButton::Left))
            || cx.has_focus()
        {
            return false;
        }
        cx.request_focus()
    }

    fn on_key_typed(&mut self, cx: &mut WidgetCx<'_>, event: &KeyEvent) {
        if event.modifiers.contains(Modifiers::CTRL)
            || matches!(event.code, KeyCode::Enter | KeyCode::Delete | KeyCode::Tab)
        {
            return;
        }
        let previous = self.text.clone();
        if event.code == KeyCode::Backspace {
            if self.text.pop().is_none() {
                return;
            }
        } else {
            match event.text {
                Some(ch) if !ch.is_control() => self.text.push(ch),
                _ => return,
            }
        }
        self.edited(cx, &previous);
    }

    fn on_key_up(&mut self, cx: &mut WidgetCx<'_>, event: &KeyEvent) {
        if event.code == KeyCode::Enter {
            self.submit(cx);
        }
    }
}
