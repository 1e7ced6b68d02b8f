// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peruse Gesture: directional mouse gestures.
//!
//! While the gesture button is held, the pointer path is reduced to a short
//! list of cardinal strokes. Releasing the button appends a final `Click`
//! token and the resulting sequence is looked up in a command table.
//!
//! - [`Direction`] and [`GestureSequence`]: tokens and their compact letter
//!   form (`"DC"` is "down, then release").
//! - [`GestureClassifier`]: incremental classification with a dead zone and
//!   direction hysteresis.
//! - [`GestureTable`]: exact-match map from sequence to [`CommandId`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use peruse_gesture::{Direction, GestureClassifier, GestureTable};
//!
//! let mut table = GestureTable::new();
//! table.insert("DC".parse().unwrap(), "NextPage");
//!
//! let mut classifier = GestureClassifier::new(30.0, 30.0);
//! classifier.reset(Point::new(100.0, 100.0));
//! assert_eq!(classifier.feed(Point::new(100.0, 160.0)), Some(Direction::Down));
//!
//! let sequence = classifier.finish().unwrap();
//! assert_eq!(sequence.to_string(), "DC");
//! assert_eq!(table.lookup(&sequence).map(|c| c.as_str()), Some("NextPage"));
//! ```

mod classifier;
mod sequence;
mod table;

pub use classifier::GestureClassifier;
pub use sequence::{Direction, GestureParseError, GestureSequence};
pub use table::{CommandId, GestureTable};
