//! Shared engine state.
//!
//! Everything the dispatch loop, the command tasks, the editor and the UI
//! bridge need to share is owned by one [`EngineContext`], handed around as
//! `Arc<EngineContext>`.  The live modifier set is the exception: only the
//! dispatch loop ever touches it, so it lives there.

use std::sync::Arc;

use relayctrl_core::{AppConfig, MappingIndex};
use tokio::sync::{Mutex, RwLock};

use super::manage_mappings::ConfigStore;
use super::relay_command::{RelayBoard, RelayCommandEngine};
use super::relay_state::{RelayStateCache, RemoteStatusCell};

/// State shared by the dispatch loop, command tasks, editor and UI bridge.
pub struct EngineContext {
    /// Running configuration; also serializes edits.
    pub(crate) config: Mutex<AppConfig>,
    /// Swapped whole after every successful save.
    pub(crate) index: RwLock<Arc<MappingIndex>>,
    relay_states: Arc<RelayStateCache>,
    status: Arc<RemoteStatusCell>,
    pub(crate) board: Arc<dyn RelayBoard>,
    pub(crate) store: Arc<dyn ConfigStore>,
}

impl EngineContext {
    /// Builds the context for `config`.  The relay cache is sized from
    /// `config.num_relays` and starts with every channel off; the remote
    /// status starts as `Connecting`.
    pub fn new(
        config: AppConfig,
        board: Arc<dyn RelayBoard>,
        store: Arc<dyn ConfigStore>,
    ) -> Self {
        let index = MappingIndex::build(&config.mappings);
        let relay_states = Arc::new(RelayStateCache::new(config.num_relays));
        Self {
            config: Mutex::new(config),
            index: RwLock::new(Arc::new(index)),
            relay_states,
            status: Arc::new(RemoteStatusCell::new()),
            board,
            store,
        }
    }

    /// Returns a command engine wired to this context's cache, status and
    /// board.
    pub fn engine(&self) -> RelayCommandEngine {
        RelayCommandEngine::new(
            Arc::clone(&self.relay_states),
            Arc::clone(&self.status),
            Arc::clone(&self.board),
        )
    }

    /// Returns the current mapping index.
    pub async fn mapping_index(&self) -> Arc<MappingIndex> {
        Arc::clone(&*self.index.read().await)
    }

    /// Returns a copy of the running configuration.
    pub async fn config(&self) -> AppConfig {
        self.config.lock().await.clone()
    }

    /// Believed relay states.
    pub fn relay_states(&self) -> &RelayStateCache {
        &self.relay_states
    }

    /// Connectivity with the board.
    pub fn status(&self) -> &RemoteStatusCell {
        &self.status
    }
}
