//! Chord mappings and the key-code index built from them.

use std::collections::HashMap;

use serde::{Deserialize, Serialize};

use super::config::null_as_default;
use super::event::KeyCode;
use super::modifiers::ModifierSet;

/// Stable identifier of a [`ChordMapping`].
pub type MappingId = u32;

/// A relay board output channel, `1..=num_relays`.  `0` means unassigned.
pub type RelayChannel = u16;

/// A configured binding from a keyboard chord to a relay channel.
///
/// Field names follow the on-disk JSON format (`Id`, `Key`, `RelayNumber`,
/// `Toggle`, `Modifiers`).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct ChordMapping {
    /// Unique, stable across edits.
    pub id: MappingId,
    /// Trigger key.
    #[serde(default)]
    pub key: KeyCode,
    /// Target channel; `0` when not yet assigned.
    #[serde(default)]
    pub relay_number: RelayChannel,
    /// `true`: each press flips the relay.  `false`: the relay follows the key.
    #[serde(default)]
    pub toggle: bool,
    /// Exact modifier state required for the chord to fire.
    #[serde(default, deserialize_with = "null_as_default")]
    pub modifiers: ModifierSet,
}

impl ChordMapping {
    /// Creates an unassigned mapping, as produced by the UI's "Add" button.
    pub fn blank(id: MappingId) -> Self {
        Self {
            id,
            key: 0,
            relay_number: 0,
            toggle: false,
            modifiers: ModifierSet::new(),
        }
    }

    /// Returns `true` when `live` matches the required modifiers exactly.
    pub fn matches_modifiers(&self, live: &ModifierSet) -> bool {
        self.modifiers == *live
    }
}

/// Returns the identifier for a new mapping: one past the highest existing
/// identifier, or `0` for an empty list.
pub fn next_mapping_id(mappings: &[ChordMapping]) -> MappingId {
    mappings
        .iter()
        .map(|m| m.id)
        .max()
        .map_or(0, |max| max.saturating_add(1))
}

/// Lookup from trigger key to the mappings it triggers.
///
/// The index is derived data: it is rebuilt from the full mapping list every
/// time that list changes and never edited in place.  Mappings sharing a key
/// keep the order they have in the source list.
#[derive(Debug, Default, Clone)]
pub struct MappingIndex {
    by_key: HashMap<KeyCode, Vec<ChordMapping>>,
}

impl MappingIndex {
    /// Builds the index from the configured mappings.
    pub fn build(mappings: &[ChordMapping]) -> Self {
        let mut by_key: HashMap<KeyCode, Vec<ChordMapping>> = HashMap::new();
        for mapping in mappings {
            by_key.entry(mapping.key).or_default().push(mapping.clone());
        }
        Self { by_key }
    }

    /// Returns the mappings triggered by `key`, empty if none.
    pub fn lookup(&self, key: KeyCode) -> &[ChordMapping] {
        self.by_key.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Number of distinct trigger keys.
    pub fn key_count(&self) -> usize {
        self.by_key.len()
    }
}
