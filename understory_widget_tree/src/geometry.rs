// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Axis-aware helpers over Kurbo geometry.
//!
//! Widgets use Kurbo's [`Point`], [`Size`], and [`Rect`] directly. `Rect::intersect` already
//! clamps disjoint results to a zero-size rectangle, and `Rect::contains` is half-open, which is
//! exactly what visible-bounds clipping and hit testing need. This module only adds the notion of
//! a primary layout [`Axis`].

use kurbo::{Point, Rect, Size};

/// Primary axis of a container or scrollbar.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum Axis {
    /// Items stack top to bottom; scrolling moves content vertically.
    Vertical,
    /// Items stack left to right; scrolling moves content horizontally.
    Horizontal,
}

impl Axis {
    /// The other axis.
    pub const fn cross(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Extent of `size` along this axis.
    pub fn main_extent(self, size: Size) -> f64 {
        match self {
            Self::Vertical => size.height,
            Self::Horizontal => size.width,
        }
    }

    /// Extent of `size` across this axis.
    pub fn cross_extent(self, size: Size) -> f64 {
        self.cross().main_extent(size)
    }

    /// Coordinate of `point` along this axis.
    pub fn main_coord(self, point: Point) -> f64 {
        match self {
            Self::Vertical => point.y,
            Self::Horizontal => point.x,
        }
    }

    /// Coordinate of `point` across this axis.
    pub fn cross_coord(self, point: Point) -> f64 {
        self.cross().main_coord(point)
    }

    /// Build a rectangle from spans along and across this axis.
    pub fn rect(self, main_start: f64, main_len: f64, cross_start: f64, cross_len: f64) -> Rect {
        match self {
            Self::Vertical => Rect::from_origin_size(
                Point::new(cross_start, main_start),
                Size::new(cross_len, main_len),
            ),
            Self::Horizontal => Rect::from_origin_size(
                Point::new(main_start, cross_start),
                Size::new(main_len, cross_len),
            ),
        }
    }

    /// Translate `point` along this axis by `delta`.
    pub fn offset(self, point: Point, delta: f64) -> Point {
        match self {
            Self::Vertical => Point::new(point.x, point.y + delta),
            Self::Horizontal => Point::new(point.x + delta, point.y),
        }
    }
}

/// True when `rect` covers a strictly positive area.
///
/// Zero-area widgets are skipped by the draw pass.
pub fn has_area(rect: Rect) -> bool {
    rect.width() > 0.0 && rect.height() > 0.0
}

/// A zero-size rectangle anchored at the origin of `rect`.
pub(crate) fn collapsed(rect: Rect) -> Rect {
    Rect::from_origin_size(rect.origin(), Size::ZERO)
}
