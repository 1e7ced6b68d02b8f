// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Toolkit-neutral pointer and keyboard events.
//!
//! Hosts translate their native events into [`InputEvent`]s. Positions are in
//! view-local coordinates (origin at the top-left of the viewing area); the
//! screen position is only consulted by window moves.

use core::time::Duration;

use kurbo::Point;

use crate::chord::{InputChord, Modifiers, MouseButtons};

/// A pointer sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct PointerEvent {
    /// Position in view-local coordinates.
    pub position: Point,
    /// Position in screen coordinates.
    pub screen_position: Point,
    /// Buttons held *after* this event was applied.
    pub buttons: MouseButtons,
    /// Buttons that went down or up with this event (empty for moves).
    pub changed: MouseButtons,
    /// Modifiers held during the event.
    pub modifiers: Modifiers,
    /// Timestamp since the host's epoch.
    pub time: Duration,
}

impl PointerEvent {
    /// Creates a sample at `position` with no buttons, no modifiers, the
    /// screen position equal to the view position, and time zero.
    #[must_use]
    pub fn new(position: Point) -> Self {
        Self {
            position,
            screen_position: position,
            buttons: MouseButtons::empty(),
            changed: MouseButtons::empty(),
            modifiers: Modifiers::empty(),
            time: Duration::ZERO,
        }
    }

    /// Sets the held buttons.
    #[must_use]
    pub fn with_buttons(mut self, buttons: MouseButtons) -> Self {
        self.buttons = buttons;
        self
    }

    /// Sets the buttons that changed with this event.
    #[must_use]
    pub fn with_changed(mut self, changed: MouseButtons) -> Self {
        self.changed = changed;
        self
    }

    /// Sets the held modifiers.
    #[must_use]
    pub fn with_modifiers(mut self, modifiers: Modifiers) -> Self {
        self.modifiers = modifiers;
        self
    }

    /// Sets the screen position.
    #[must_use]
    pub fn with_screen_position(mut self, screen_position: Point) -> Self {
        self.screen_position = screen_position;
        self
    }

    /// Sets the timestamp.
    #[must_use]
    pub fn at(mut self, time: Duration) -> Self {
        self.time = time;
        self
    }

    /// The chord formed by the held buttons and modifiers.
    #[must_use]
    pub fn chord(&self) -> InputChord {
        InputChord::new(self.buttons, self.modifiers)
    }
}

/// A wheel sample.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct WheelEvent {
    /// Pointer state at the time of the wheel event.
    pub pointer: PointerEvent,
    /// Wheel travel in notches; positive rolls away from the user.
    pub delta: f64,
}

/// Keys the interaction core cares about.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Key {
    /// Escape: cancels the active mode.
    Escape,
    /// A modifier key; the new modifier state is in [`KeyEvent::modifiers`].
    Modifier,
    /// Anything else.
    Other,
}

/// A keyboard sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyEvent {
    /// Which key.
    pub key: Key,
    /// `true` for key down, `false` for key up.
    pub pressed: bool,
    /// Modifiers held after this event was applied.
    pub modifiers: Modifiers,
    /// Timestamp since the host's epoch.
    pub time: Duration,
}

/// Raw input fed to the interaction coordinator.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum InputEvent {
    /// A button went down.
    PointerDown(PointerEvent),
    /// A button went up.
    PointerUp(PointerEvent),
    /// The pointer moved.
    PointerMove(PointerEvent),
    /// The wheel turned.
    Wheel(WheelEvent),
    /// A key changed state.
    Key(KeyEvent),
}

impl InputEvent {
    /// Timestamp of the event.
    #[must_use]
    pub fn time(&self) -> Duration {
        match self {
            Self::PointerDown(p) | Self::PointerUp(p) | Self::PointerMove(p) => p.time,
            Self::Wheel(w) => w.pointer.time,
            Self::Key(k) => k.time,
        }
    }
}
