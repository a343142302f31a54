// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! A filled rectangle.

use understory_widget_tree::{Color, Surface, Widget, WidgetCx};

/// Fills its bounds with a color and optionally outlines them.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Panel {
    fill: Color,
    stroke: Option<(Color, f64)>,
}

impl Panel {
    /// A panel filled with `fill` and no outline.
    pub fn new(fill: Color) -> Self {
        Self { fill, stroke: None }
    }

    /// Builder: outline with `color` at `width`.
    pub fn with_stroke(mut self, color: Color, width: f64) -> Self {
        self.stroke = Some((color, width));
        self
    }

    /// Fill color.
    pub fn fill(&self) -> Color {
        self.fill
    }

    /// Change the fill color.
    pub fn set_fill(&mut self, fill: Color) {
        self.fill = fill;
    }
}

impl Widget for Panel {
    fn draw(&mut self, cx: &mut WidgetCx<'_>, surface: &mut dyn Surface) {
        let bounds = cx.bounds();
        surface.fill_rect(bounds, self.fill);
        if let Some((color, width)) = self.stroke {
            surface.stroke_rect(bounds, color, width);
        }
    }
}
