// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The host drawing capability.
//!
//! The tree never owns a drawing surface. The host hands one to the draw pass, which clips it to
//! each widget's visible bounds before calling [`Widget::draw`](crate::Widget::draw).

use alloc::string::String;
use alloc::vec::Vec;
use kurbo::{Point, Rect};

/// An 8-bit RGBA color.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub struct Color {
    /// Red.
    pub r: u8,
    /// Green.
    pub g: u8,
    /// Blue.
    pub b: u8,
    /// Alpha.
    pub a: u8,
}

impl Color {
    /// Opaque black.
    pub const BLACK: Self = Self::rgba(0, 0, 0, 255);
    /// Opaque white.
    pub const WHITE: Self = Self::rgba(255, 255, 255, 255);
    /// Opaque blue.
    pub const BLUE: Self = Self::rgba(0, 0, 255, 255);

    /// A color from components.
    pub const fn rgba(r: u8, g: u8, b: u8, a: u8) -> Self {
        Self { r, g, b, a }
    }

    /// An opaque gray.
    pub const fn gray(v: u8) -> Self {
        Self::rgba(v, v, v, 255)
    }
}

/// Host font handle.
#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash)]
pub struct FontId(pub u32);

/// Font, size and color for a text run.
#[derive(Copy, Clone, Debug, PartialEq)]
pub struct TextStyle {
    /// Font to draw with.
    pub font: FontId,
    /// Size in pixels.
    pub size: f64,
    /// Fill color.
    pub color: Color,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font: FontId::default(),
            size: 16.0,
            color: Color::BLACK,
        }
    }
}

/// Immediate-mode drawing and text measurement supplied by the host.
pub trait Surface {
    /// Restrict subsequent drawing to `rect`.
    fn clip(&mut self, rect: Rect);
    /// Remove any clip.
    fn no_clip(&mut self);
    /// Fill `rect` with `color`.
    fn fill_rect(&mut self, rect: Rect, color: Color);
    /// Outline `rect`.
    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64);
    /// Draw `text` with its top-left corner at `origin`.
    fn text(&mut self, text: &str, origin: Point, style: &TextStyle);
    /// Width `text` would occupy when drawn with `style`.
    fn text_width(&self, text: &str, style: &TextStyle) -> f64;
}

/// A primitive recorded by [`RecordingSurface`].
#[derive(Clone, Debug, PartialEq)]
pub enum DrawOp {
    /// [`Surface::clip`].
    Clip(Rect),
    /// [`Surface::no_clip`].
    NoClip,
    /// [`Surface::fill_rect`].
    Fill(Rect, Color),
    /// [`Surface::stroke_rect`].
    Stroke(Rect, Color, f64),
    /// [`Surface::text`].
    Text {
        /// The text.
        text: String,
        /// Top-left corner.
        origin: Point,
        /// Style used.
        style: TextStyle,
    },
}

/// A headless surface that records every call.
///
/// Text is measured as monospace: each character advances `advance × style.size`.
#[derive(Clone, Debug)]
pub struct RecordingSurface {
    /// Recorded operations, oldest first.
    pub ops: Vec<DrawOp>,
    /// Horizontal advance per character, relative to the font size.
    pub advance: f64,
}

impl Default for RecordingSurface {
    fn default() -> Self {
        Self::new()
    }
}

impl RecordingSurface {
    /// An empty recorder with a half-em advance.
    pub fn new() -> Self {
        Self {
            ops: Vec::new(),
            advance: 0.5,
        }
    }

    /// Forget everything recorded so far.
    pub fn clear(&mut self) {
        self.ops.clear();
    }

    /// The recorded clip rectangles, in order.
    pub fn clips(&self) -> impl Iterator<Item = Rect> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Clip(r) => Some(*r),
            _ => None,
        })
    }

    /// The recorded text runs, in order.
    pub fn texts(&self) -> impl Iterator<Item = &str> + '_ {
        self.ops.iter().filter_map(|op| match op {
            DrawOp::Text { text, .. } => Some(text.as_str()),
            _ => None,
        })
    }
}

impl Surface for RecordingSurface {
    fn clip(&mut self, rect: Rect) {
        self.ops.push(DrawOp::Clip(rect));
    }

    fn no_clip(&mut self) {
        self.ops.push(DrawOp::NoClip);
    }

    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.ops.push(DrawOp::Fill(rect, color));
    }

    fn stroke_rect(&mut self, rect: Rect, color: Color, width: f64) {
        self.ops.push(DrawOp::Stroke(rect, color, width));
    }

    fn text(&mut self, text: &str, origin: Point, style: &TextStyle) {
        self.ops.push(DrawOp::Text {
            text: String::from(text),
            origin,
            style: *style,
        });
    }

    fn text_width(&self, text: &str, style: &TextStyle) -> f64 {
        #[allow(
            clippy::cast_precision_loss,
            reason = "Character counts of UI strings are far below 2^52."
        )]
        let chars = text.chars().count() as f64;
        chars * style.size * self.advance
    }
}
