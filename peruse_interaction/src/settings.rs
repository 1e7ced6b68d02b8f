// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Persisted interaction settings.

use std::collections::BTreeMap;

use peruse_gesture::{GestureParseError, GestureTable};
use peruse_input::{BindingImportError, ExportedBindings};
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::config::InteractionConfig;
use crate::coordinator::Coordinator;

/// Everything a viewer persists about pointer interaction.
///
/// Bindings are stored as chord strings per action (`"Ctrl+LeftButton"`,
/// alternatives separated by `,`); gestures as letter sequences mapped to
/// command names (`"DC" -> "NextPage"`).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionSettings {
    /// Tunables.
    pub config: InteractionConfig,
    /// Drag action bindings.
    pub bindings: ExportedBindings,
    /// Gesture table entries.
    pub gestures: BTreeMap<String, String>,
}

/// A settings entry that could not be applied.
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum SettingsError {
    /// A binding entry was rejected; the action keeps its default.
    #[error(transparent)]
    Binding(#[from] BindingImportError),
    /// A gesture key did not parse; the entry was skipped.
    #[error(transparent)]
    Gesture(#[from] GestureParseError),
}

impl Coordinator {
    /// Captures the current configuration, bindings and gestures.
    #[must_use]
    pub fn export_settings(&self) -> InteractionSettings {
        InteractionSettings {
            config: *self.config(),
            bindings: self.bindings().export_bindings(),
            gestures: self.gestures().to_entries(),
        }
    }

    /// Applies persisted settings.
    ///
    /// Bad entries are skipped and returned; everything else is applied.
    pub fn import_settings(&mut self, settings: &InteractionSettings) -> Vec<SettingsError> {
        self.set_config(settings.config);
        let mut errors: Vec<SettingsError> = self
            .bindings_mut()
            .import_bindings(&settings.bindings)
            .into_iter()
            .map(SettingsError::from)
            .collect();
        let (gestures, gesture_errors) = GestureTable::from_entries(&settings.gestures);
        *self.gestures_mut() = gestures;
        errors.extend(gesture_errors.into_iter().map(SettingsError::from));
        if !errors.is_empty() {
            tracing::warn!(count = errors.len(), "some settings were not applied");
        }
        errors
    }
}
