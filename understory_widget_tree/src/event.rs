// Copyright 2025 the Understory Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input events supplied by the host surface.

use kurbo::Point;

/// A mouse button.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum MouseButton {
    /// Primary button.
    Left,
    /// Secondary button.
    Right,
    /// Wheel button.
    Middle,
}

bitflags::bitflags! {
    /// Keyboard modifiers held while an event was generated.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct Modifiers: u8 {
        /// Shift.
        const SHIFT = 0b0000_0001;
        /// Control.
        const CTRL  = 0b0000_0010;
        /// Alt / Option.
        const ALT   = 0b0000_0100;
        /// Super / Command.
        const META  = 0b0000_1000;
    }
}

/// A pointer event in surface coordinates.
///
/// `wheel` is the number of wheel notches, positive when scrolling towards the end of the
/// content. Drags carry only the current position; handlers anchor against where the drag began.
#[derive(Clone, Debug, PartialEq)]
pub struct PointerEvent {
    /// Current pointer position.
    pub position: Point,
    /// Button involved in the event, if any.
    pub button: Option<MouseButton>,
    /// Wheel motion in notches.
    pub wheel: f64,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl PointerEvent {
    /// An event at `position` with no motion, button, or wheel.
    pub fn new(position: Point) -> Self {
        Self {
            position,
            button: None,
            wheel: 0.0,
            modifiers: Modifiers::empty(),
        }
    }

    /// Builder: a left-button event at `position`.
    pub fn left(position: Point) -> Self {
        Self::new(position).with_button(MouseButton::Left)
    }

    /// Builder: set the button.
    pub fn with_button(mut self, button: MouseButton) -> Self {
        self.button = Some(button);
        self
    }

    /// Builder: set the wheel motion.
    pub fn with_wheel(mut self, wheel: f64) -> Self {
        self.wheel = wheel;
        self
    }

    /// Builder: set held modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}

/// Identity of a key, independent of the text it produces.
#[derive(Copy, Clone, Debug, Eq, PartialEq, Hash)]
pub enum KeyCode {
    /// A key that produces a character.
    Character(char),
    /// Return / Enter.
    Enter,
    /// Escape.
    Escape,
    /// Backspace.
    Backspace,
    /// Forward delete.
    Delete,
    /// Tab.
    Tab,
    /// Left arrow.
    ArrowLeft,
    /// Right arrow.
    ArrowRight,
    /// Up arrow.
    ArrowUp,
    /// Down arrow.
    ArrowDown,
    /// Home.
    Home,
    /// End.
    End,
    /// Page up.
    PageUp,
    /// Page down.
    PageDown,
    /// Function key `F1..=F24`.
    Function(u8),
    /// Anything else, as the host's raw key code.
    Other(u32),
}

/// A keyboard event.
#[derive(Clone, Debug, PartialEq)]
pub struct KeyEvent {
    /// Which key.
    pub code: KeyCode,
    /// Text produced by the key, for typed events.
    pub text: Option<char>,
    /// Held modifiers.
    pub modifiers: Modifiers,
}

impl KeyEvent {
    /// A key event with no text and no modifiers.
    pub fn new(code: KeyCode) -> Self {
        Self {
            code,
            text: None,
            modifiers: Modifiers::empty(),
        }
    }

    /// A typed character.
    pub fn typed(ch: char) -> Self {
        Self {
            code: KeyCode::Character(ch),
            text: Some(ch),
            modifiers: Modifiers::empty(),
        }
    }

    /// Builder: set held modifiers.
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }
}
