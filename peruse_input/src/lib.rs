// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peruse Input: chords, input events, and drag action bindings.
//!
//! This crate holds the vocabulary shared by the rest of the interaction core:
//!
//! - [`chord`]: [`InputChord`] (buttons + modifiers) and [`ChordSet`], with the
//!   compact textual form used by persisted settings (`"Ctrl+LeftButton"`).
//! - [`event`]: toolkit-neutral [`PointerEvent`], [`WheelEvent`], and
//!   [`KeyEvent`] that hosts translate their native events into.
//! - [`binding`]: the [`ActionBindingTable`] that maps a chord to the drag
//!   action it starts, with rebinding and export/import of user overrides.
//!
//! Nothing here knows about view geometry or timing; those live in
//! `peruse_view` and `peruse_timing`.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::Point;
//! use peruse_input::{ActionBindingTable, DragActionId, Modifiers, MouseButtons, PointerEvent};
//!
//! let table = ActionBindingTable::new();
//! let press = PointerEvent::new(Point::new(10.0, 10.0))
//!     .with_buttons(MouseButtons::PRIMARY)
//!     .with_changed(MouseButtons::PRIMARY)
//!     .with_modifiers(Modifiers::SHIFT);
//!
//! let action = table.resolve(press.chord()).map(|a| a.id());
//! assert_eq!(action, Some(DragActionId::Rotate));
//! ```

pub mod binding;
pub mod chord;
pub mod event;

pub use binding::{
    ActionBindingTable, ActionGroup, BindingError, BindingImportError, DragAction, DragActionId,
    ExportedBindings,
};
pub use chord::{ChordParseError, ChordSet, InputChord, Modifiers, MouseButtons};
pub use event::{InputEvent, Key, KeyEvent, PointerEvent, WheelEvent};
