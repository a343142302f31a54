// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Content switching through a strip of tab buttons.

use alloc::boxed::Box;
use alloc::string::String;
use alloc::vec::Vec;

use kurbo::Rect;
use understory_widget_tree::{Axis, Notice, Parent, Widget, WidgetCx, WidgetId, WidgetTree};

use crate::button::Button;
use crate::error::LayoutError;
use crate::group::{Fraction, FractionalGroup};
use crate::label::{AlignX, AlignY, Label};
use crate::list::SequentialList;

/// Tab button length along a horizontal strip.
pub const HORIZONTAL_STRIP_BUTTON: f64 = 150.0;
/// Tab button length along a vertical strip.
pub const VERTICAL_STRIP_BUTTON: f64 = 60.0;

const STRIP_SLOT: usize = 0;
const CONTENT_SLOT: usize = 1;

/// What was shown before a selection changed.
#[derive(Clone, Debug, PartialEq)]
pub struct TabChange {
    /// Name of the previously selected tab.
    pub previous_name: Option<String>,
    /// Content of the previously selected tab.
    pub previous_content: Option<WidgetId>,
}

type SelectHandler = Box<dyn FnMut(&mut WidgetCx<'_>, &TabChange)>;

#[derive(Clone, Debug)]
struct Tab {
    name: String,
    button: WidgetId,
    content: WidgetId,
}

/// A strip of tab buttons next to a content slot showing the selected tab.
///
/// Along `axis`, the strip takes `tab_size` of the controller and the content the rest. The
/// strip is a [`SequentialList`] running across `axis`, so a vertical controller has a
/// horizontal row of tabs on top. Switching tabs detaches the previous content without
/// destroying it.
pub struct TabController {
    group: FractionalGroup,
    strip: WidgetId,
    tabs: Vec<Tab>,
    selected: Option<usize>,
    button_length: f64,
    handlers: Vec<SelectHandler>,
}

impl core::fmt::Debug for TabController {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("TabController")
            .field("group", &self.group)
            .field("strip", &self.strip)
            .field("tabs", &self.tabs)
            .field("selected", &self.selected)
            .field("button_length", &self.button_length)
            .field("handlers", &self.handlers.len())
            .finish()
    }
}

impl TabController {
    /// Create a controller under `parent` whose strip takes `tab_size` of its length.
    pub fn insert(
        tree: &mut WidgetTree,
        parent: Parent,
        axis: Axis,
        tab_size: f64,
    ) -> Result<WidgetId, LayoutError> {
        let tab_size = Fraction::new(tab_size)?;
        Ok(tree.insert_with(parent, |cx| Self::build(cx, axis, tab_size)))
    }

    fn build(cx: &mut WidgetCx<'_>, axis: Axis, tab_size: Fraction) -> Self {
        let strip_axis = axis.cross();
        let owner = Parent::Widget(cx.id());
        let strip = cx
            .tree_mut()
            .insert_with(owner, |cx| SequentialList::new(cx, strip_axis));
        let mut group = FractionalGroup::new(axis);
        group.push_item(cx, tab_size, Some(strip));
        group.push_item(cx, tab_size.complement(), None);
        let button_length = match strip_axis {
            Axis::Horizontal => HORIZONTAL_STRIP_BUTTON,
            Axis::Vertical => VERTICAL_STRIP_BUTTON,
        };
        Self {
            group,
            strip,
            tabs: Vec::new(),
            selected: None,
            button_length,
            handlers: Vec::new(),
        }
    }

    /// The list holding the tab buttons.
    pub fn strip(&self) -> WidgetId {
        self.strip
    }

    /// Share of the controller's length taken by the strip.
    pub fn tab_size(&self) -> Fraction {
        self.group.fraction(STRIP_SLOT).unwrap_or(Fraction::ZERO)
    }

    /// Number of tabs.
    pub fn tab_count(&self) -> usize {
        self.tabs.len()
    }

    /// Button of tab `index`.
    pub fn tab_button(&self, index: usize) -> Option<WidgetId> {
        self.tabs.get(index).map(|tab| tab.button)
    }

    /// Index of the selected tab.
    pub fn selected_index(&self) -> Option<usize> {
        self.selected
    }

    /// Name of the selected tab.
    pub fn selected_name(&self) -> Option<&str> {
        self.selected_tab().map(|tab| tab.name.as_str())
    }

    /// Content of the selected tab.
    pub fn selected_content(&self) -> Option<WidgetId> {
        self.selected_tab().map(|tab| tab.content)
    }

    fn selected_tab(&self) -> Option<&Tab> {
        self.selected.and_then(|index| self.tabs.get(index))
    }

    /// Run `handler` after every selection change.
    pub fn on_select(&mut self, handler: impl FnMut(&mut WidgetCx<'_>, &TabChange) + 'static) {
        self.handlers.push(Box::new(handler));
    }

    /// Add a tab named `name` showing `content`. The first tab added is selected.
    ///
    /// Returns the new tab button.
    pub fn add_tab(
        &mut self,
        cx: &mut WidgetCx<'_>,
        name: impl Into<String>,
        content: WidgetId,
    ) -> WidgetId {
        let name = name.into();
        let controller = cx.id();
        let mut button = Button::new(
            Label::new(name.clone()).with_alignment(AlignX::Center, AlignY::Center),
        );
        button.add_listener(controller);

        let length = self.button_length;
        let tree = cx.tree_mut();
        let button = tree.insert(Parent::Widget(self.strip), button);
        tree.with::<SequentialList, _>(self.strip, |list, cx| {
            list.push_item(cx, length, Some(button));
        });
        tree.set_parent(content, Parent::Widget(controller));

        self.tabs.push(Tab {
            name,
            button,
            content,
        });
        if self.tabs.len() == 1 {
            self.switch(cx, 0);
        } else {
            cx.notify(
                button,
                Notice::Selected {
                    source: controller,
                    selected: false,
                },
            );
        }
        button
    }

    /// Select tab `index`. Returns `false` if it was already selected.
    pub fn select(&mut self, cx: &mut WidgetCx<'_>, index: usize) -> Result<bool, LayoutError> {
        if index >= self.tabs.len() {
            return Err(LayoutError::IndexOutOfRange {
                index,
                len: self.tabs.len(),
            });
        }
        Ok(self.switch(cx, index))
    }

    /// Select the tab showing `content`.
    pub fn set_selected(
        &mut self,
        cx: &mut WidgetCx<'_>,
        content: WidgetId,
    ) -> Result<bool, LayoutError> {
        let index = self
            .tabs
            .iter()
            .position(|tab| tab.content == content)
            .ok_or(LayoutError::NotAnItem(content))?;
        Ok(self.switch(cx, index))
    }

    fn switch(&mut self, cx: &mut WidgetCx<'_>, index: usize) -> bool {
        if self.selected == Some(index) {
            return false;
        }
        let Some(content) = self.tabs.get(index).map(|tab| tab.content) else {
            return false;
        };
        let change = TabChange {
            previous_name: self.selected_name().map(String::from),
            previous_content: self.selected_content(),
        };
        if let Err(err) = self.group.replace_item(cx, CONTENT_SLOT, Some(content)) {
            log::error!("tab controller {:?} has no content slot: {err}", cx.id());
            return false;
        }
        self.selected = Some(index);
        log::debug!(
            "tab controller {:?} selected {:?}",
            cx.id(),
            self.selected_name()
        );

        let source = cx.id();
        for (i, tab) in self.tabs.iter().enumerate() {
            let selected = i == index;
            cx.notify(tab.button, Notice::Selected { source, selected });
        }
        for handler in &mut self.handlers {
            handler(cx, &change);
        }
        true
    }
}

impl Widget for TabController {
    fn on_bounds_change(&mut self, cx: &mut WidgetCx<'_>, _old: Rect) {
        self.group.layout(cx);
    }

    fn on_notice(&mut self, cx: &mut WidgetCx<'_>, notice: &Notice) {
        if let Notice::Clicked { source, .. } = *notice {
            if let Some(index) = self.tabs.iter().position(|tab| tab.button == source) {
                self.switch(cx, index);
            }
        }
    }
}
