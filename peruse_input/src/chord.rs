// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Input chords: a pressed-button combination plus modifier keys.
//!
//! Chords are the lookup key of the drag action table. They have a compact
//! textual form used by persisted settings:
//!
//! ```
//! use peruse_input::chord::{ChordSet, InputChord, Modifiers, MouseButtons};
//!
//! let chord: InputChord = "Ctrl+LeftButton".parse().unwrap();
//! assert_eq!(chord, InputChord::new(MouseButtons::PRIMARY, Modifiers::CONTROL));
//! assert_eq!(chord.to_string(), "Ctrl+LeftButton");
//!
//! // Alternatives for one binding are separated by commas.
//! let set: ChordSet = "MiddleButton, Shift+RightButton".parse().unwrap();
//! assert_eq!(set.len(), 2);
//! assert_eq!(set.to_string(), "MiddleButton,Shift+RightButton");
//! ```

use core::fmt;
use core::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;

bitflags::bitflags! {
    /// Pointer buttons that can take part in a chord.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct MouseButtons: u8 {
        /// Primary (usually left) button.
        const PRIMARY   = 0b0000_0001;
        /// Middle button / wheel press.
        const MIDDLE    = 0b0000_0010;
        /// Secondary (usually right) button.
        const SECONDARY = 0b0000_0100;
        /// First extra ("back") button.
        const EXTRA1    = 0b0000_1000;
        /// Second extra ("forward") button.
        const EXTRA2    = 0b0001_0000;
    }
}

impl Default for MouseButtons {
    fn default() -> Self {
        Self::empty()
    }
}

bitflags::bitflags! {
    /// Keyboard modifiers that can take part in a chord.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
    pub struct Modifiers: u8 {
        /// Shift key.
        const SHIFT   = 0b0000_0001;
        /// Control key.
        const CONTROL = 0b0000_0010;
        /// Alt / Option key.
        const ALT     = 0b0000_0100;
    }
}

impl Default for Modifiers {
    fn default() -> Self {
        Self::empty()
    }
}

// Canonical token order: modifiers first, then buttons.
const MODIFIER_TOKENS: [(Modifiers, &str); 3] = [
    (Modifiers::CONTROL, "Ctrl"),
    (Modifiers::SHIFT, "Shift"),
    (Modifiers::ALT, "Alt"),
];

const BUTTON_TOKENS: [(MouseButtons, &str); 5] = [
    (MouseButtons::PRIMARY, "LeftButton"),
    (MouseButtons::MIDDLE, "MiddleButton"),
    (MouseButtons::SECONDARY, "RightButton"),
    (MouseButtons::EXTRA1, "XButton1"),
    (MouseButtons::EXTRA2, "XButton2"),
];

/// Errors produced while parsing a chord or chord set string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum ChordParseError {
    /// Two separators with nothing between them, or a trailing separator.
    #[error("empty token in chord `{0}`")]
    EmptyToken(String),
    /// A token that is neither a modifier nor a button name.
    #[error("unknown chord token `{0}`")]
    UnknownToken(String),
    /// Only modifiers were given; a chord needs at least one button.
    #[error("chord `{0}` names no mouse button")]
    MissingButton(String),
}

/// A pressed-button combination plus modifier keys.
///
/// A chord with no buttons is *invalid*: it is what an idle pointer produces
/// and never matches a binding.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct InputChord {
    buttons: MouseButtons,
    modifiers: Modifiers,
}

impl InputChord {
    /// Creates a chord from buttons and modifiers.
    #[must_use]
    pub const fn new(buttons: MouseButtons, modifiers: Modifiers) -> Self {
        Self { buttons, modifiers }
    }

    /// Creates a chord with no modifiers.
    #[must_use]
    pub const fn buttons_only(buttons: MouseButtons) -> Self {
        Self::new(buttons, Modifiers::empty())
    }

    /// Pressed buttons.
    #[must_use]
    pub const fn buttons(self) -> MouseButtons {
        self.buttons
    }

    /// Held modifiers.
    #[must_use]
    pub const fn modifiers(self) -> Modifiers {
        self.modifiers
    }

    /// Returns `true` if at least one button is part of the chord.
    #[must_use]
    pub const fn is_valid(self) -> bool {
        !self.buttons.is_empty()
    }
}

impl fmt::Display for InputChord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut first = true;
        let modifiers = MODIFIER_TOKENS
            .iter()
            .filter(|(m, _)| self.modifiers.contains(*m))
            .map(|(_, name)| *name);
        let buttons = BUTTON_TOKENS
            .iter()
            .filter(|(b, _)| self.buttons.contains(*b))
            .map(|(_, name)| *name);
        for name in modifiers.chain(buttons) {
            if !first {
                f.write_str("+")?;
            }
            f.write_str(name)?;
            first = false;
        }
        Ok(())
    }
}

impl FromStr for InputChord {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut buttons = MouseButtons::empty();
        let mut modifiers = Modifiers::empty();
        for token in s.split('+').map(str::trim) {
            if token.is_empty() {
                return Err(ChordParseError::EmptyToken(s.to_string()));
            }
            if token.eq_ignore_ascii_case("Control") {
                modifiers |= Modifiers::CONTROL;
            } else if let Some((m, _)) = MODIFIER_TOKENS
                .iter()
                .find(|(_, name)| name.eq_ignore_ascii_case(token))
            {
                modifiers |= *m;
            } else if let Some((b, _)) = BUTTON_TOKENS
                .iter()
                .find(|(_, name)| name.eq_ignore_ascii_case(token))
            {
                buttons |= *b;
            } else {
                return Err(ChordParseError::UnknownToken(token.to_string()));
            }
        }
        if buttons.is_empty() {
            return Err(ChordParseError::MissingButton(s.to_string()));
        }
        Ok(Self::new(buttons, modifiers))
    }
}

impl Serialize for InputChord {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for InputChord {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}

/// Alternative chords bound to one action.
///
/// Order is preserved and duplicates are dropped on insertion.
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash)]
pub struct ChordSet {
    chords: SmallVec<[InputChord; 2]>,
}

impl ChordSet {
    /// Creates an empty (unbound) set.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Creates a set holding a single chord.
    #[must_use]
    pub fn single(chord: InputChord) -> Self {
        let mut set = Self::new();
        set.insert(chord);
        set
    }

    /// Adds `chord` unless already present.
    pub fn insert(&mut self, chord: InputChord) {
        if !self.chords.contains(&chord) {
            self.chords.push(chord);
        }
    }

    /// Removes `chord`, returning whether it was present.
    pub fn remove(&mut self, chord: InputChord) -> bool {
        let before = self.chords.len();
        self.chords.retain(|c| *c != chord);
        before != self.chords.len()
    }

    /// Returns `true` if `chord` is one of the alternatives.
    #[must_use]
    pub fn contains(&self, chord: InputChord) -> bool {
        self.chords.contains(&chord)
    }

    /// Number of alternatives.
    #[must_use]
    pub fn len(&self) -> usize {
        self.chords.len()
    }

    /// Returns `true` when nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.chords.is_empty()
    }

    /// Iterates the alternatives in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = InputChord> + '_ {
        self.chords.iter().copied()
    }

    /// Returns the alternatives as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[InputChord] {
        &self.chords
    }
}

impl FromIterator<InputChord> for ChordSet {
    fn from_iter<I: IntoIterator<Item = InputChord>>(iter: I) -> Self {
        let mut set = Self::new();
        for chord in iter {
            set.insert(chord);
        }
        set
    }
}

impl From<InputChord> for ChordSet {
    fn from(chord: InputChord) -> Self {
        Self::single(chord)
    }
}

impl fmt::Display for ChordSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, chord) in self.chords.iter().enumerate() {
            if i > 0 {
                f.write_str(",")?;
            }
            write!(f, "{chord}")?;
        }
        Ok(())
    }
}

impl FromStr for ChordSet {
    type Err = ChordParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.trim().is_empty() {
            return Ok(Self::new());
        }
        s.split(',')
            .map(|item| item.trim().parse::<InputChord>())
            .collect()
    }
}

impl Serialize for ChordSet {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for ChordSet {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
