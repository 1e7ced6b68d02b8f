// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Gesture sequence to command table.

use core::fmt;
use std::collections::BTreeMap;

use hashbrown::HashMap;
use serde::{Deserialize, Serialize};

use crate::sequence::{GestureParseError, GestureSequence};

/// Name of a host command, resolved by the host's command catalog.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CommandId(String);

impl CommandId {
    /// Creates a command id.
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    /// The command name.
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CommandId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for CommandId {
    fn from(name: &str) -> Self {
        Self::new(name)
    }
}

/// Exact-match table from gesture sequence to command.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct GestureTable {
    entries: HashMap<GestureSequence, CommandId>,
}

impl GestureTable {
    /// Creates an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Binds `sequence` to `command`, returning the previous command.
    pub fn insert(
        &mut self,
        sequence: GestureSequence,
        command: impl Into<CommandId>,
    ) -> Option<CommandId> {
        self.entries.insert(sequence, command.into())
    }

    /// Removes the binding of `sequence`.
    pub fn remove(&mut self, sequence: &GestureSequence) -> Option<CommandId> {
        self.entries.remove(sequence)
    }

    /// Command bound to exactly `sequence`.
    #[must_use]
    pub fn lookup(&self, sequence: &GestureSequence) -> Option<&CommandId> {
        self.entries.get(sequence)
    }

    /// Number of bindings.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns `true` if nothing is bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterates the bindings in unspecified order.
    pub fn iter(&self) -> impl Iterator<Item = (&GestureSequence, &CommandId)> + '_ {
        self.entries.iter()
    }

    /// Bindings in their persisted form, ordered by sequence string.
    #[must_use]
    pub fn to_entries(&self) -> BTreeMap<String, String> {
        self.entries
            .iter()
            .map(|(seq, cmd)| (seq.to_string(), cmd.as_str().to_string()))
            .collect()
    }

    /// Builds a table from persisted entries.
    ///
    /// Entries whose key does not parse are skipped and reported; an empty
    /// key is skipped silently since it can never be produced by a gesture.
    pub fn from_entries<'a, I>(entries: I) -> (Self, Vec<GestureParseError>)
    where
        I: IntoIterator<Item = (&'a String, &'a String)>,
    {
        let mut table = Self::new();
        let mut errors = Vec::new();
        for (key, command) in entries {
            match key.parse::<GestureSequence>() {
                Ok(sequence) if sequence.is_empty() => {}
                Ok(sequence) => {
                    table.insert(sequence, CommandId::new(command.as_str()));
                }
                Err(err) => {
                    tracing::warn!(gesture = key.as_str(), error = %err, "skipping gesture binding");
                    errors.push(err);
                }
            }
        }
        (table, errors)
    }
}

impl FromIterator<(GestureSequence, CommandId)> for GestureTable {
    fn from_iter<I: IntoIterator<Item = (GestureSequence, CommandId)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn seq(s: &str) -> GestureSequence {
        s.parse().unwrap()
    }

    #[test]
    fn lookup_is_exact() {
        let mut table = GestureTable::new();
        table.insert(seq("DC"), "NextPage");
        assert_eq!(table.lookup(&seq("DC")).map(CommandId::as_str), Some("NextPage"));
        assert_eq!(table.lookup(&seq("D")), None);
        assert_eq!(table.lookup(&seq("DRC")), None);
    }

    #[test]
    fn entries_round_trip_and_skip_bad_keys() {
        let mut stored = BTreeMap::new();
        stored.insert("LC".to_string(), "PrevPage".to_string());
        stored.insert("RC".to_string(), "NextPage".to_string());
        stored.insert("XC".to_string(), "Bogus".to_string());

        let (table, errors) = GestureTable::from_entries(&stored);
        assert_eq!(table.len(), 2);
        assert_eq!(errors.len(), 1);

        stored.remove("XC");
        assert_eq!(table.to_entries(), stored);
    }
}
