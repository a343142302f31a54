// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Proportional split of a fixed axis.

use alloc::vec::Vec;
use core::mem;

use kurbo::Rect;
use understory_widget_tree::{Axis, Widget, WidgetCx, WidgetId};

use crate::error::LayoutError;

/// Slack above `1.0` a group's fractions may sum to before it reports overflow.
const OVERFLOW_TOLERANCE: f64 = 1e-9;

/// A share of a group's primary-axis length, always in `[0, 1]`.
#[derive(Copy, Clone, Debug, PartialEq, PartialOrd)]
pub struct Fraction(f64);

impl Fraction {
    /// No space at all.
    pub const ZERO: Self = Self(0.0);
    /// The whole length.
    pub const ONE: Self = Self(1.0);

    /// Validate `value`. Values outside `[0, 1]` (and NaN) are rejected, never clamped.
    pub fn new(value: f64) -> Result<Self, LayoutError> {
        if (0.0..=1.0).contains(&value) {
            Ok(Self(value))
        } else {
            Err(LayoutError::InvalidFraction(value))
        }
    }

    /// The raw share.
    pub const fn get(self) -> f64 {
        self.0
    }

    /// What is left of the whole after this share.
    pub fn complement(self) -> Self {
        Self((1.0 - self.0).clamp(0.0, 1.0))
    }
}

impl TryFrom<f64> for Fraction {
    type Error = LayoutError;

    fn try_from(value: f64) -> Result<Self, Self::Error> {
        Self::new(value)
    }
}

/// Outcome of a [`FractionalGroup::layout`] pass.
#[derive(Copy, Clone, Debug, Default, PartialEq)]
pub struct GroupLayout {
    /// Sum of every item's fraction.
    pub total_fraction: f64,
    /// The fractions sum above `1`, so trailing items spill past the group's bounds.
    pub overflow: bool,
}

#[derive(Copy, Clone, Debug)]
struct GroupItem {
    widget: Option<WidgetId>,
    fraction: Fraction,
}

/// Splits its bounds along one axis into `(fraction, widget)` slots.
///
/// Each slot gets `fraction × length` along the primary axis and the full cross extent. Slots
/// are placed back to back in insertion order. A slot without a widget reserves its space and
/// draws nothing.
#[derive(Clone, Debug)]
pub struct FractionalGroup {
    axis: Axis,
    items: Vec<GroupItem>,
    last_layout: GroupLayout,
}

impl FractionalGroup {
    /// An empty group splitting along `axis`.
    pub fn new(axis: Axis) -> Self {
        Self {
            axis,
            items: Vec::new(),
            last_layout: GroupLayout::default(),
        }
    }

    /// The primary axis.
    pub fn axis(&self) -> Axis {
        self.axis
    }

    /// Number of slots.
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the group has no slots.
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// The widget in slot `index`, if the slot exists and is occupied.
    pub fn item(&self, index: usize) -> Option<WidgetId> {
        self.items.get(index).and_then(|item| item.widget)
    }

    /// The fraction of slot `index`.
    pub fn fraction(&self, index: usize) -> Option<Fraction> {
        self.items.get(index).map(|item| item.fraction)
    }

    /// Slot holding `widget`.
    pub fn index_of(&self, widget: WidgetId) -> Option<usize> {
        self.items.iter().position(|item| item.widget == Some(widget))
    }

    /// Result of the most recent layout pass.
    pub fn last_layout(&self) -> GroupLayout {
        self.last_layout
    }

    /// Append a slot, validating `fraction` first. Returns the slot index.
    pub fn add_item(
        &mut self,
        cx: &mut WidgetCx<'_>,
        fraction: f64,
        widget: Option<WidgetId>,
    ) -> Result<usize, LayoutError> {
        let fraction = Fraction::new(fraction)?;
        Ok(self.push_item(cx, fraction, widget))
    }

    /// Append a slot with an already validated fraction. Returns the slot index.
    pub fn push_item(
        &mut self,
        cx: &mut WidgetCx<'_>,
        fraction: Fraction,
        widget: Option<WidgetId>,
    ) -> usize {
        self.items.push(GroupItem { widget, fraction });
        adopt(cx, widget);
        self.layout(cx);
        self.items.len() - 1
    }

    /// Insert a slot before `index`.
    pub fn insert_item(
        &mut self,
        cx: &mut WidgetCx<'_>,
        index: usize,
        fraction: f64,
        widget: Option<WidgetId>,
    ) -> Result<(), LayoutError> {
        let fraction = Fraction::new(fraction)?;
        if index > self.items.len() {
            return Err(self.out_of_range(index));
        }
        self.items.insert(index, GroupItem { widget, fraction });
        adopt(cx, widget);
        self.layout(cx);
        Ok(())
    }

    /// Change the fraction of slot `index`.
    pub fn set_item_fraction(
        &mut self,
        cx: &mut WidgetCx<'_>,
        index: usize,
        fraction: f64,
    ) -> Result<(), LayoutError> {
        let fraction = Fraction::new(fraction)?;
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(LayoutError::IndexOutOfRange { index, len })?;
        item.fraction = fraction;
        self.layout(cx);
        Ok(())
    }

    /// Change the fraction of the slot holding `widget`.
    pub fn set_item_fraction_of(
        &mut self,
        cx: &mut WidgetCx<'_>,
        widget: WidgetId,
        fraction: f64,
    ) -> Result<(), LayoutError> {
        let index = self
            .index_of(widget)
            .ok_or(LayoutError::NotAnItem(widget))?;
        self.set_item_fraction(cx, index, fraction)
    }

    /// Put `widget` into slot `index`, destroying the widget it held.
    pub fn set_item(
        &mut self,
        cx: &mut WidgetCx<'_>,
        index: usize,
        widget: Option<WidgetId>,
    ) -> Result<(), LayoutError> {
        if let Some(old) = self.swap(cx, index, widget)? {
            cx.tree_mut().remove(old);
        }
        Ok(())
    }

    /// Put `widget` into slot `index` and hand back the previous occupant.
    ///
    /// The previous widget is detached but stays alive with this group as its parent, so it can
    /// be put back later.
    pub fn replace_item(
        &mut self,
        cx: &mut WidgetCx<'_>,
        index: usize,
        widget: Option<WidgetId>,
    ) -> Result<Option<WidgetId>, LayoutError> {
        let old = self.swap(cx, index, widget)?;
        if let Some(old) = old {
            cx.remove_child(old);
        }
        Ok(old)
    }

    fn swap(
        &mut self,
        cx: &mut WidgetCx<'_>,
        index: usize,
        widget: Option<WidgetId>,
    ) -> Result<Option<WidgetId>, LayoutError> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(LayoutError::IndexOutOfRange { index, len })?;
        let old = mem::replace(&mut item.widget, widget);
        if old == widget {
            return Ok(None);
        }
        adopt(cx, widget);
        self.layout(cx);
        Ok(old)
    }

    /// Assign every occupied slot its rectangle.
    ///
    /// Logs a warning when the fractions sum above `1`; the layout still happens.
    pub fn layout(&mut self, cx: &mut WidgetCx<'_>) -> GroupLayout {
        let bounds = cx.bounds();
        let size = bounds.size();
        let base = self.axis.main_extent(size);
        let cross_start = self.axis.cross_coord(bounds.origin());
        let cross_len = self.axis.cross_extent(size);

        let mut cursor = self.axis.main_coord(bounds.origin());
        let mut total = 0.0;
        for item in &self.items {
            let len = item.fraction.get() * base;
            if let Some(widget) = item.widget {
                let rect: Rect = self.axis.rect(cursor, len, cross_start, cross_len);
                cx.tree_mut().set_bounds(widget, rect);
            }
            cursor += len;
            total += item.fraction.get();
        }

        let overflow = total > 1.0 + OVERFLOW_TOLERANCE;
        if overflow {
            log::warn!(
                "fractional group {:?} sums to {total}; trailing items overflow",
                cx.id()
            );
        }
        self.last_layout = GroupLayout {
            total_fraction: total,
            overflow,
        };
        self.last_layout
    }

    fn out_of_range(&self, index: usize) -> LayoutError {
        LayoutError::IndexOutOfRange {
            index,
            len: self.items.len(),
        }
    }
}

fn adopt(cx: &mut WidgetCx<'_>, widget: Option<WidgetId>) {
    if let Some(widget) = widget {
        cx.add_child(widget);
    }
}

impl Widget for FractionalGroup {
    fn on_bounds_change(&mut self, cx: &mut WidgetCx<'_>, _old: Rect) {
        self.layout(cx);
    }
}
