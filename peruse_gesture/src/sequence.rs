// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Direction tokens and gesture sequences.

use core::fmt;
use core::str::FromStr;

use kurbo::Vec2;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use smallvec::SmallVec;
use thiserror::Error;

/// One token of a gesture.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Direction {
    /// Toward the top of the screen.
    Up,
    /// Toward the right.
    Right,
    /// Toward the bottom of the screen.
    Down,
    /// Toward the left.
    Left,
    /// The button was released.
    Click,
}

impl Direction {
    /// The four movement directions, in classification priority order.
    pub const CARDINALS: [Self; 4] = [Self::Up, Self::Right, Self::Down, Self::Left];

    /// Single-letter form used in serialized sequences.
    #[must_use]
    pub const fn letter(self) -> char {
        match self {
            Self::Up => 'U',
            Self::Right => 'R',
            Self::Down => 'D',
            Self::Left => 'L',
            Self::Click => 'C',
        }
    }

    /// Long form, for display to users.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Up => "Up",
            Self::Right => "Right",
            Self::Down => "Down",
            Self::Left => "Left",
            Self::Click => "Click",
        }
    }

    /// Parses a letter; matching is case-sensitive.
    #[must_use]
    pub const fn from_letter(c: char) -> Option<Self> {
        match c {
            'U' => Some(Self::Up),
            'R' => Some(Self::Right),
            'D' => Some(Self::Down),
            'L' => Some(Self::Left),
            'C' => Some(Self::Click),
            _ => None,
        }
    }

    /// Unit vector in y-down view coordinates, `None` for [`Direction::Click`].
    #[must_use]
    pub const fn unit(self) -> Option<Vec2> {
        match self {
            Self::Up => Some(Vec2::new(0.0, -1.0)),
            Self::Right => Some(Vec2::new(1.0, 0.0)),
            Self::Down => Some(Vec2::new(0.0, 1.0)),
            Self::Left => Some(Vec2::new(-1.0, 0.0)),
            Self::Click => None,
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Error parsing a gesture sequence string.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum GestureParseError {
    /// A character that is not one of `U R D L C`.
    #[error("invalid gesture token `{token}` at {index} in `{input}`")]
    InvalidToken {
        /// Full input.
        input: String,
        /// Offending character.
        token: char,
        /// Character index of the offending token.
        index: usize,
    },
}

/// An ordered list of gesture tokens, e.g. `Down, Click` (`"DC"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct GestureSequence {
    tokens: SmallVec<[Direction; 8]>,
}

impl GestureSequence {
    /// Creates an empty sequence.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Appends a token.
    pub fn push(&mut self, token: Direction) {
        self.tokens.push(token);
    }

    /// Last token, if any.
    #[must_use]
    pub fn last(&self) -> Option<Direction> {
        self.tokens.last().copied()
    }

    /// Removes every token.
    pub fn clear(&mut self) {
        self.tokens.clear();
    }

    /// Number of tokens.
    #[must_use]
    pub fn len(&self) -> usize {
        self.tokens.len()
    }

    /// Returns `true` if there are no tokens.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.tokens.is_empty()
    }

    /// Tokens as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[Direction] {
        &self.tokens
    }

    /// Iterates the tokens.
    pub fn iter(&self) -> impl Iterator<Item = Direction> + '_ {
        self.tokens.iter().copied()
    }
}

impl FromIterator<Direction> for GestureSequence {
    fn from_iter<I: IntoIterator<Item = Direction>>(iter: I) -> Self {
        Self {
            tokens: iter.into_iter().collect(),
        }
    }
}

impl fmt::Display for GestureSequence {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for token in &self.tokens {
            write!(f, "{}", token.letter())?;
        }
        Ok(())
    }
}

impl FromStr for GestureSequence {
    type Err = GestureParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.chars()
            .enumerate()
            .map(|(index, token)| {
                Direction::from_letter(token).ok_or_else(|| GestureParseError::InvalidToken {
                    input: s.to_string(),
                    token,
                    index,
                })
            })
            .collect()
    }
}

impl Serialize for GestureSequence {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> Deserialize<'de> for GestureSequence {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = String::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
