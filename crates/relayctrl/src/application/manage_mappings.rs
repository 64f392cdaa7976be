//! ManageMappingsUseCase: the single mutation entry point for the
//! configuration.
//!
//! Every edit goes through the same pipeline:
//!
//! ```text
//! ConfigEdit ──apply──▶ candidate AppConfig ──save──▶ ConfigStore
//!                                                   │ ok
//!                        swap config, rebuild MappingIndex,
//!                        reconfigure board endpoint, resync once
//! ```
//!
//! A failed save stops the pipeline: the caller gets the error and the
//! running configuration, index and relay cache stay exactly as they were.

use std::collections::HashMap;
use std::path::PathBuf;
use std::sync::Arc;

use relayctrl_core::{
    next_mapping_id, AppConfig, BoardEndpoint, ChordMapping, KeyCode, MappingId, MappingIndex,
    ModifierSet, RelayChannel,
};
use thiserror::Error;
use tracing::{info, warn};

use super::context::EngineContext;
use super::resync::resync;

/// Errors from configuration persistence.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// A file system I/O error occurred.
    #[error("I/O error accessing config at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The stored JSON could not be parsed.
    #[error("failed to parse config JSON: {0}")]
    Parse(#[source] serde_json::Error),

    /// The config could not be serialized to JSON.
    #[error("failed to serialize config: {0}")]
    Serialize(#[source] serde_json::Error),
}

/// Port to wherever the configuration is persisted.
pub trait ConfigStore: Send + Sync {
    /// Reads the stored configuration.
    fn load(&self) -> Result<AppConfig, ConfigError>;

    /// Replaces the stored configuration.
    fn save(&self, config: &AppConfig) -> Result<(), ConfigError>;
}

/// Errors returned by [`apply_edit`].
#[derive(Debug, Error)]
pub enum EditError {
    #[error("could not save configuration: {0}")]
    Save(#[from] ConfigError),
}

/// Values submitted for one mapping row of the configuration form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MappingRow {
    pub key: KeyCode,
    pub relay_number: RelayChannel,
    pub toggle: bool,
    pub modifiers: ModifierSet,
}

/// A whole-form submission.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormUpdate {
    /// New board address.
    pub board_address: String,
    /// Submitted rows keyed by mapping id.
    pub rows: HashMap<MappingId, MappingRow>,
}

/// A change requested through the configuration UI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigEdit {
    /// Append an unassigned mapping with the next free id.
    AddBlank,
    /// Remove the mapping with this id, if any.
    Delete { id: MappingId },
    /// Overwrite the board address and every existing mapping from the form.
    ReplaceAll(FormUpdate),
}

impl ConfigEdit {
    /// Applies the edit to `config` in memory.
    pub fn apply_to(&self, config: &mut AppConfig) {
        match self {
            ConfigEdit::AddBlank => {
                let id = next_mapping_id(&config.mappings);
                config.mappings.push(ChordMapping::blank(id));
            }
            ConfigEdit::Delete { id } => {
                config.mappings.retain(|m| m.id != *id);
            }
            ConfigEdit::ReplaceAll(form) => {
                config.api = form.board_address.clone();
                for mapping in &mut config.mappings {
                    let row = form.rows.get(&mapping.id).cloned().unwrap_or_default();
                    mapping.key = row.key;
                    mapping.relay_number = row.relay_number;
                    mapping.toggle = row.toggle;
                    mapping.modifiers = row.modifiers;
                }
            }
        }
    }
}

/// Applies `edit`, persists the result and, once saved, makes it live.
///
/// A resync failure after a successful save is not an error for the caller:
/// the edit is already persisted and the failure shows up in the remote
/// status.
pub async fn apply_edit(ctx: &EngineContext, edit: ConfigEdit) -> Result<(), EditError> {
    let mut config = ctx.config.lock().await;
    let mut candidate = config.clone();
    edit.apply_to(&mut candidate);

    if let Err(e) = ctx.store.save(&candidate) {
        warn!(error = %e, ?edit, "configuration save failed");
        return Err(EditError::Save(e));
    }

    let index = MappingIndex::build(&candidate.mappings);
    let keys = index.key_count();
    *ctx.index.write().await = Arc::new(index);
    ctx.board.reconfigure(BoardEndpoint::from(&candidate));
    info!(
        mappings = candidate.mappings.len(),
        keys,
        api = %candidate.api,
        "configuration saved"
    );
    *config = candidate;
    drop(config);

    if let Err(e) = resync(ctx).await {
        warn!(error = %e, "resync after save failed");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use relayctrl_core::ModifierKey;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::application::relay_state::RemoteStatus;
    use crate::application::test_support::{MemoryConfigStore, RecordingBoard};

    fn config_with_ids(ids: &[MappingId]) -> AppConfig {
        AppConfig {
            mappings: ids
                .iter()
                .map(|&id| ChordMapping {
                    key: 0x41 + id as KeyCode,
                    relay_number: 1,
                    ..ChordMapping::blank(id)
                })
                .collect(),
            num_relays: 3,
            ..AppConfig::default()
        }
    }

    fn context(
        config: AppConfig,
        board: Arc<RecordingBoard>,
        store: Arc<MemoryConfigStore>,
    ) -> EngineContext {
        EngineContext::new(config, board, store)
    }

    #[test]
    fn test_add_blank_uses_next_id() {
        let mut cfg = config_with_ids(&[0, 4, 2]);

        ConfigEdit::AddBlank.apply_to(&mut cfg);

        let added = cfg.mappings.last().unwrap();
        assert_eq!(*added, ChordMapping::blank(5));
    }

    #[test]
    fn test_add_blank_on_empty_list_starts_at_zero() {
        let mut cfg = AppConfig::default();
        ConfigEdit::AddBlank.apply_to(&mut cfg);
        assert_eq!(cfg.mappings, vec![ChordMapping::blank(0)]);
    }

    #[test]
    fn test_delete_unknown_id_leaves_list_unchanged() {
        let mut cfg = config_with_ids(&[1, 2]);
        let before = cfg.clone();

        ConfigEdit::Delete { id: 9 }.apply_to(&mut cfg);

        assert_eq!(cfg, before);
    }

    #[test]
    fn test_replace_all_updates_existing_rows_and_ignores_unknown_ids() {
        // Arrange
        let mut cfg = config_with_ids(&[1, 2]);
        let mut rows = HashMap::new();
        rows.insert(
            1,
            MappingRow {
                key: 0x70,
                relay_number: 3,
                toggle: true,
                modifiers: ModifierSet::new().with(ModifierKey::LeftCtrl, true),
            },
        );
        rows.insert(
            42,
            MappingRow {
                key: 0x71,
                ..MappingRow::default()
            },
        );
        let edit = ConfigEdit::ReplaceAll(FormUpdate {
            board_address: "10.0.0.5:8080".to_string(),
            rows,
        });

        // Act
        edit.apply_to(&mut cfg);

        // Assert
        assert_eq!(cfg.api, "10.0.0.5:8080");
        assert_eq!(cfg.mappings.len(), 2, "rows for unknown ids add nothing");
        let first = &cfg.mappings[0];
        assert_eq!((first.key, first.relay_number, first.toggle), (0x70, 3, true));
        assert!(first.modifiers.is_held(ModifierKey::LeftCtrl));
        // Id 2 had no row: reset to zero values.
        assert_eq!(cfg.mappings[1], ChordMapping::blank(2));
    }

    #[tokio::test]
    async fn test_delete_persists_and_resyncs_exactly_once() {
        // Arrange
        let board = Arc::new(RecordingBoard::new().with_state(vec![1, 0, 1]));
        let store = Arc::new(MemoryConfigStore::new());
        let ctx = context(config_with_ids(&[1, 2, 3]), Arc::clone(&board), Arc::clone(&store));

        // Act
        let result = apply_edit(&ctx, ConfigEdit::Delete { id: 3 }).await;

        // Assert
        assert_ok!(result);
        let saved = store.saved();
        assert_eq!(saved.len(), 1);
        let ids: Vec<MappingId> = saved[0].mappings.iter().map(|m| m.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(board.fetch_count(), 1);
        assert_eq!(ctx.status().get(), RemoteStatus::Ok);
        assert_eq!(ctx.relay_states().get(3).await, Some(1));
    }

    #[tokio::test]
    async fn test_save_rebuilds_index_and_reconfigures_board() {
        let board = Arc::new(RecordingBoard::new());
        let store = Arc::new(MemoryConfigStore::new());
        let ctx = context(config_with_ids(&[0]), Arc::clone(&board), store);
        let form = FormUpdate {
            board_address: "relay.local".to_string(),
            rows: HashMap::from([(
                0,
                MappingRow {
                    key: 0x7B,
                    relay_number: 2,
                    ..MappingRow::default()
                },
            )]),
        };

        assert_ok!(apply_edit(&ctx, ConfigEdit::ReplaceAll(form)).await);

        let index = ctx.mapping_index().await;
        assert_eq!(index.lookup(0x7B).len(), 1);
        assert!(index.lookup(0x41).is_empty(), "old key no longer indexed");
        let endpoints = board.endpoints();
        assert_eq!(endpoints.len(), 1);
        assert_eq!(endpoints[0].address, "relay.local");
        assert_eq!(ctx.config().await.api, "relay.local");
    }

    #[tokio::test]
    async fn test_failed_save_returns_error_and_changes_nothing() {
        // Arrange
        let board = Arc::new(RecordingBoard::new().with_state(vec![1, 1, 1]));
        let store = Arc::new(MemoryConfigStore::failing());
        let original = config_with_ids(&[1, 2, 3]);
        let ctx = context(original.clone(), Arc::clone(&board), store);

        // Act
        let result = apply_edit(&ctx, ConfigEdit::Delete { id: 3 }).await;

        // Assert
        let err = assert_err!(result);
        assert!(matches!(err, EditError::Save(ConfigError::Io { .. })));
        assert_eq!(ctx.config().await, original);
        assert_eq!(ctx.mapping_index().await.lookup(0x44).len(), 1);
        assert_eq!(board.fetch_count(), 0, "no resync after a failed save");
        assert!(board.endpoints().is_empty());
        assert_eq!(ctx.relay_states().get(1).await, Some(0));
    }

    #[tokio::test]
    async fn test_resync_failure_after_save_still_reports_success() {
        let board = Arc::new(RecordingBoard::failing("timed out"));
        let store = Arc::new(MemoryConfigStore::new());
        let ctx = context(config_with_ids(&[1]), Arc::clone(&board), Arc::clone(&store));

        let result = apply_edit(&ctx, ConfigEdit::AddBlank).await;

        assert_ok!(result);
        assert_eq!(store.saved().len(), 1);
        assert_eq!(ctx.status().get(), RemoteStatus::Error("timed out".to_string()));
    }
}
