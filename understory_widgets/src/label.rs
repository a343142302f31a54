// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Single-line text.

use alloc::string::String;

use kurbo::{Point, Rect};
use understory_widget_tree::{Color, Surface, TextStyle, Widget, WidgetCx};

/// Text shown when a label is built from a missing value.
pub const FALLBACK_TEXT: &str = "N/A";

/// Space between the bounds and the text.
pub const DEFAULT_PADDING: f64 = 4.0;

/// Horizontal placement of text.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AlignX {
    /// Against the left padding.
    #[default]
    Left,
    /// Centered.
    Center,
    /// Against the right padding.
    Right,
}

/// Vertical placement of text.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub enum AlignY {
    /// Against the top padding.
    #[default]
    Top,
    /// Centered.
    Center,
    /// Against the bottom padding.
    Bottom,
}

/// A line of text aligned inside its bounds.
#[derive(Clone, Debug, PartialEq)]
pub struct Label {
    text: String,
    style: TextStyle,
    align_x: AlignX,
    align_y: AlignY,
    padding: f64,
}

impl Label {
    /// A top-left aligned label with the default style.
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            style: TextStyle::default(),
            align_x: AlignX::Left,
            align_y: AlignY::Top,
            padding: DEFAULT_PADDING,
        }
    }

    /// A label for a value that may not be loaded yet; `None` shows [`FALLBACK_TEXT`].
    pub fn from_optional(text: Option<&str>) -> Self {
        Self::new(text.unwrap_or(FALLBACK_TEXT))
    }

    /// Builder: set both alignments.
    pub fn with_alignment(mut self, align_x: AlignX, align_y: AlignY) -> Self {
        self.align_x = align_x;
        self.align_y = align_y;
        self
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

    /// The text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Replace the text.
    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// The text style.
    pub fn style(&self) -> &TextStyle {
        &self.style
    }

    /// Change the text color.
    pub fn set_color(&mut self, color: Color) {
        self.style.color = color;
    }

    /// Draw the text inside `bounds` in `color`, ignoring the style's own color.
    pub fn paint(&self, surface: &mut dyn Surface, bounds: Rect, color: Color) {
        let style = TextStyle { color, ..self.style };
        let width = surface.text_width(&self.text, &style);
        let height = style.size;
        let x = match self.align_x {
            AlignX::Left => bounds.x0 + self.padding,
            AlignX::Center => bounds.x0 + (bounds.width() - width) / 2.0,
            AlignX::Right => bounds.x1 - self.padding - width,
        };
        let y = match self.align_y {
            AlignY::Top => bounds.y0 + self.padding,
            AlignY::Center => bounds.y0 + (bounds.height() - height) / 2.0,
            AlignY::Bottom => bounds.y1 - self.padding - height,
        };
        surface.text(&self.text, Point::new(x, y), &style);
    }
}

impl Widget for Label {
    fn draw(&mut self, cx: &mut WidgetCx<'_>, surface: &mut dyn Surface) {
        self.paint(surface, cx.bounds(), self.style.color);
    }
}
