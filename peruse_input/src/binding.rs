// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag action binding table: which chord starts which drag action.
//!
//! ## Usage
//!
//! 1) Build the table with [`ActionBindingTable::new`] (default bindings).
//! 2) Resolve the chord of the pressed buttons with [`ActionBindingTable::resolve`].
//! 3) Let users change bindings with [`ActionBindingTable::rebind`].
//! 4) Persist [`ActionBindingTable::export_bindings`] and feed it back through
//!    [`ActionBindingTable::import_bindings`] on the next start.
//!
//! ## Minimal example
//!
//! ```
//! use peruse_input::binding::{ActionBindingTable, BindingError, DragActionId};
//! use peruse_input::chord::{InputChord, MouseButtons};
//!
//! let mut table = ActionBindingTable::new();
//! let left = InputChord::buttons_only(MouseButtons::PRIMARY);
//! assert_eq!(table.resolve(left).map(|a| a.id()), Some(DragActionId::Pan));
//!
//! // Give the left button to rotation; panning loses it.
//! table.rebind(DragActionId::Rotate, left.into()).unwrap();
//! assert_eq!(table.resolve(left).map(|a| a.id()), Some(DragActionId::Rotate));
//! assert!(table.get(DragActionId::Pan).chords().is_empty());
//!
//! // The gesture trigger is locked.
//! let err = table.rebind(DragActionId::Gesture, left.into()).unwrap_err();
//! assert_eq!(err, BindingError::Locked(DragActionId::Gesture));
//! ```

use core::fmt;
use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::chord::{ChordParseError, ChordSet, InputChord, Modifiers, MouseButtons};

/// The drag actions a chord can be bound to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum DragActionId {
    /// Starts a mouse gesture instead of a drag. Locked.
    Gesture,
    /// Moves the content with the pointer.
    Pan,
    /// Moves the content faster when it is much larger than the view.
    ScaledPan,
    /// Rotates by the angle swept around the rotation center.
    Rotate,
    /// Rotates proportionally to horizontal travel.
    RotateSlider,
    /// Scales by the distance ratio from the scale center.
    Scale,
    /// Scales exponentially with horizontal travel.
    ScaleSlider,
    /// Mirrors the content horizontally.
    FlipHorizontal,
    /// Mirrors the content vertically.
    FlipVertical,
    /// Moves the host window.
    WindowMove,
}

impl DragActionId {
    /// Every action, in table order.
    pub const ALL: [Self; 10] = [
        Self::Gesture,
        Self::Pan,
        Self::ScaledPan,
        Self::Rotate,
        Self::RotateSlider,
        Self::Scale,
        Self::ScaleSlider,
        Self::FlipHorizontal,
        Self::FlipVertical,
        Self::WindowMove,
    ];

    /// Stable name used in settings and logs.
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::Gesture => "Gesture",
            Self::Pan => "Pan",
            Self::ScaledPan => "ScaledPan",
            Self::Rotate => "Rotate",
            Self::RotateSlider => "RotateSlider",
            Self::Scale => "Scale",
            Self::ScaleSlider => "ScaleSlider",
            Self::FlipHorizontal => "FlipHorizontal",
            Self::FlipVertical => "FlipVertical",
            Self::WindowMove => "WindowMove",
        }
    }

    /// Handoff group of the action.
    #[must_use]
    pub const fn group(self) -> ActionGroup {
        match self {
            Self::Pan | Self::ScaledPan => ActionGroup::Move,
            _ => ActionGroup::None,
        }
    }

    /// Locked actions cannot be rebound.
    #[must_use]
    pub const fn is_locked(self) -> bool {
        matches!(self, Self::Gesture)
    }

    /// Bindings of a freshly created table.
    #[must_use]
    pub fn default_chords(self) -> ChordSet {
        let chord = |buttons, modifiers| ChordSet::single(InputChord::new(buttons, modifiers));
        match self {
            Self::Gesture => chord(MouseButtons::SECONDARY, Modifiers::empty()),
            Self::Pan => chord(MouseButtons::PRIMARY, Modifiers::empty()),
            Self::Rotate => chord(MouseButtons::PRIMARY, Modifiers::SHIFT),
            Self::Scale => chord(MouseButtons::PRIMARY, Modifiers::CONTROL),
            Self::FlipHorizontal => chord(MouseButtons::PRIMARY, Modifiers::ALT),
            Self::WindowMove => chord(MouseButtons::MIDDLE, Modifiers::empty()),
            Self::ScaledPan | Self::RotateSlider | Self::ScaleSlider | Self::FlipVertical => {
                ChordSet::new()
            }
        }
    }
}

impl fmt::Display for DragActionId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Handoff group of a drag action.
///
/// Switching between two actions of the same non-`None` group mid-drag keeps
/// the drag session alive (see [`DragAction::is_group_compatible`]).
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Default)]
pub enum ActionGroup {
    /// Not part of any group.
    #[default]
    None,
    /// Content moving actions.
    Move,
}

/// A drag action and the chords bound to it.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct DragAction {
    id: DragActionId,
    chords: ChordSet,
}

impl DragAction {
    fn with_defaults(id: DragActionId) -> Self {
        Self {
            id,
            chords: id.default_chords(),
        }
    }

    /// Action id.
    #[must_use]
    pub fn id(&self) -> DragActionId {
        self.id
    }

    /// Chords that trigger the action.
    #[must_use]
    pub fn chords(&self) -> &ChordSet {
        &self.chords
    }

    /// Handoff group.
    #[must_use]
    pub fn group(&self) -> ActionGroup {
        self.id.group()
    }

    /// Returns `true` if the action cannot be rebound.
    #[must_use]
    pub fn is_locked(&self) -> bool {
        self.id.is_locked()
    }

    /// Returns `true` if `chord` triggers this action.
    #[must_use]
    pub fn matches(&self, chord: InputChord) -> bool {
        chord.is_valid() && self.chords.contains(chord)
    }

    /// Both actions share a non-`None` group.
    #[must_use]
    pub fn is_group_compatible(&self, other: &Self) -> bool {
        self.group() != ActionGroup::None && self.group() == other.group()
    }
}

/// Errors from [`ActionBindingTable::rebind`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BindingError {
    /// The action is locked.
    #[error("drag action `{0}` is locked and cannot be rebound")]
    Locked(DragActionId),
    /// One of the requested chords belongs to a locked action.
    #[error("chord `{chord}` is held by locked action `{holder}`")]
    ChordTaken {
        /// The contested chord.
        chord: InputChord,
        /// The locked action holding it.
        holder: DragActionId,
    },
    /// One of the requested chords has no button.
    #[error("chord `{0}` has no mouse button")]
    InvalidChord(InputChord),
}

/// Problems found by [`ActionBindingTable::import_bindings`].
///
/// None of these abort the import; they are reported so the caller can tell
/// the user which bindings were dropped.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum BindingImportError {
    /// The stored chord string is malformed; the action was left unbound.
    #[error("binding for `{id}` could not be parsed")]
    Parse {
        /// Affected action.
        id: DragActionId,
        /// Parse failure.
        #[source]
        source: ChordParseError,
    },
    /// The stored binding was refused; the action keeps its previous chords.
    #[error("binding for `{id}` was rejected")]
    Rejected {
        /// Affected action.
        id: DragActionId,
        /// Why it was refused.
        #[source]
        source: BindingError,
    },
}

/// Non-default bindings in their persisted form: action name to chord-set
/// string (for example `"Rotate": "Shift+LeftButton,XButton1"`).
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ExportedBindings {
    entries: BTreeMap<DragActionId, String>,
}

impl ExportedBindings {
    /// Creates an empty set of overrides.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the stored string for `id`.
    pub fn insert(&mut self, id: DragActionId, chords: impl Into<String>) {
        self.entries.insert(id, chords.into());
    }

    /// Stored string for `id`, if overridden.
    #[must_use]
    pub fn get(&self, id: DragActionId) -> Option<&str> {
        self.entries.get(&id).map(String::as_str)
    }

    /// Iterates the overrides in action order.
    pub fn iter(&self) -> impl Iterator<Item = (DragActionId, &str)> + '_ {
        self.entries.iter().map(|(id, s)| (*id, s.as_str()))
    }

    /// Number of overrides.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing differs from the defaults.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

/// Chord to drag action table.
///
/// Every [`DragActionId`] has exactly one entry; an entry with an empty chord
/// set is unbound. A chord is bound to at most one action, so resolution is a
/// plain linear scan with no tie breaking.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ActionBindingTable {
    actions: Vec<DragAction>,
}

impl Default for ActionBindingTable {
    fn default() -> Self {
        Self::new()
    }
}

impl ActionBindingTable {
    /// Creates a table with the default bindings.
    #[must_use]
    pub fn new() -> Self {
        Self {
            actions: DragActionId::ALL
                .iter()
                .map(|&id| DragAction::with_defaults(id))
                .collect(),
        }
    }

    /// Restores every default binding.
    pub fn reset(&mut self) {
        *self = Self::new();
    }

    /// Entry for `id`.
    #[must_use]
    pub fn get(&self, id: DragActionId) -> &DragAction {
        // `actions` is built from `DragActionId::ALL`, in the same order.
        &self.actions[Self::index(id)]
    }

    /// Iterates every entry in table order.
    pub fn iter(&self) -> impl Iterator<Item = &DragAction> + '_ {
        self.actions.iter()
    }

    /// Finds the action bound to `chord`.
    ///
    /// Invalid chords and unbound chords resolve to `None`.
    #[must_use]
    pub fn resolve(&self, chord: InputChord) -> Option<&DragAction> {
        if !chord.is_valid() {
            return None;
        }
        self.actions.iter().find(|action| action.matches(chord))
    }

    /// Replaces the chords of `id`.
    ///
    /// Chords currently held by other unlocked actions move to `id`.
    ///
    /// # Errors
    ///
    /// - [`BindingError::Locked`] if `id` is locked.
    /// - [`BindingError::InvalidChord`] if a chord has no button.
    /// - [`BindingError::ChordTaken`] if a chord belongs to a locked action.
    ///
    /// The table is unchanged when an error is returned.
    pub fn rebind(&mut self, id: DragActionId, chords: ChordSet) -> Result<(), BindingError> {
        if id.is_locked() {
            return Err(BindingError::Locked(id));
        }
        for chord in chords.iter() {
            if !chord.is_valid() {
                return Err(BindingError::InvalidChord(chord));
            }
            if let Some(holder) = self
                .actions
                .iter()
                .find(|a| a.id != id && a.chords.contains(chord))
                && holder.is_locked()
            {
                return Err(BindingError::ChordTaken {
                    chord,
                    holder: holder.id,
                });
            }
        }
        for chord in chords.iter() {
            for other in self.actions.iter_mut().filter(|a| a.id != id) {
                if other.chords.remove(chord) {
                    tracing::debug!(chord = %chord, from = %other.id, to = %id, "chord reassigned");
                }
            }
        }
        self.actions[Self::index(id)].chords = chords;
        Ok(())
    }

    /// Removes every chord of `id`.
    ///
    /// # Errors
    ///
    /// [`BindingError::Locked`] if `id` is locked.
    pub fn unbind(&mut self, id: DragActionId) -> Result<(), BindingError> {
        self.rebind(id, ChordSet::new())
    }

    /// Every binding that differs from its default.
    #[must_use]
    pub fn export_bindings(&self) -> ExportedBindings {
        let mut out = ExportedBindings::new();
        for action in &self.actions {
            if action.chords != action.id.default_chords() {
                out.insert(action.id, action.chords.to_string());
            }
        }
        out
    }

    /// Resets to the defaults, then applies `bindings`.
    ///
    /// Malformed entries leave their action unbound and refused entries keep
    /// the previous chords; both are reported in the returned list.
    pub fn import_bindings(&mut self, bindings: &ExportedBindings) -> Vec<BindingImportError> {
        self.reset();
        let mut errors = Vec::new();
        for (id, text) in bindings.iter() {
            let result = match text.parse::<ChordSet>() {
                Ok(chords) if &chords == self.get(id).chords() => Ok(()),
                Ok(chords) => self
                    .rebind(id, chords)
                    .map_err(|source| BindingImportError::Rejected { id, source }),
                Err(source) => {
                    if !id.is_locked() {
                        self.actions[Self::index(id)].chords = ChordSet::new();
                    }
                    Err(BindingImportError::Parse { id, source })
                }
            };
            if let Err(err) = result {
                tracing::warn!(action = %id, binding = text, error = %err, "dropping stored binding");
                errors.push(err);
            }
        }
        errors
    }

    fn index(id: DragActionId) -> usize {
        id as usize
    }
}
