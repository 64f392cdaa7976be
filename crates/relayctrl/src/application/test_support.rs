//! Recording test doubles shared by the application-layer unit tests.

use std::path::PathBuf;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;
use std::time::Duration;

use async_trait::async_trait;
use relayctrl_core::{AppConfig, BoardEndpoint, RelayChannel};

use super::manage_mappings::{ConfigError, ConfigStore};
use super::relay_command::{BoardError, RelayBoard};

/// Board double that records every call.
pub(crate) struct RecordingBoard {
    set_calls: Mutex<Vec<(RelayChannel, bool)>>,
    fetch_count: AtomicUsize,
    endpoints: Mutex<Vec<BoardEndpoint>>,
    state: Vec<u8>,
    failure: Option<String>,
    delay: Option<Duration>,
}

impl RecordingBoard {
    pub(crate) fn new() -> Self {
        Self {
            set_calls: Mutex::new(Vec::new()),
            fetch_count: AtomicUsize::new(0),
            endpoints: Mutex::new(Vec::new()),
            state: Vec::new(),
            failure: None,
            delay: None,
        }
    }

    /// Every request fails with a transport error carrying `detail`.
    pub(crate) fn failing(detail: &str) -> Self {
        Self {
            failure: Some(detail.to_string()),
            ..Self::new()
        }
    }

    pub(crate) fn with_state(mut self, state: Vec<u8>) -> Self {
        self.state = state;
        self
    }

    pub(crate) fn with_delay(mut self, delay: Duration) -> Self {
        self.delay = Some(delay);
        self
    }

    pub(crate) fn set_calls(&self) -> Vec<(RelayChannel, bool)> {
        self.set_calls.lock().unwrap().clone()
    }

    pub(crate) fn fetch_count(&self) -> usize {
        self.fetch_count.load(Ordering::SeqCst)
    }

    pub(crate) fn endpoints(&self) -> Vec<BoardEndpoint> {
        self.endpoints.lock().unwrap().clone()
    }
}

#[async_trait]
impl RelayBoard for RecordingBoard {
    async fn set_channel(&self, channel: RelayChannel, on: bool) -> Result<(), BoardError> {
        self.set_calls.lock().unwrap().push((channel, on));
        if let Some(delay) = self.delay {
            tokio::time::sleep(delay).await;
        }
        match &self.failure {
            Some(detail) => Err(BoardError::Transport(detail.clone())),
            None => Ok(()),
        }
    }

    async fn fetch_state(&self) -> Result<Vec<u8>, BoardError> {
        self.fetch_count.fetch_add(1, Ordering::SeqCst);
        match &self.failure {
            Some(detail) => Err(BoardError::Transport(detail.clone())),
            None => Ok(self.state.clone()),
        }
    }

    fn reconfigure(&self, endpoint: BoardEndpoint) {
        self.endpoints.lock().unwrap().push(endpoint);
    }
}

/// In-memory config store that records every save.
pub(crate) struct MemoryConfigStore {
    saved: Mutex<Vec<AppConfig>>,
    fail_saves: bool,
}

impl MemoryConfigStore {
    pub(crate) fn new() -> Self {
        Self {
            saved: Mutex::new(Vec::new()),
            fail_saves: false,
        }
    }

    pub(crate) fn failing() -> Self {
        Self {
            fail_saves: true,
            ..Self::new()
        }
    }

    pub(crate) fn saved(&self) -> Vec<AppConfig> {
        self.saved.lock().unwrap().clone()
    }
}

impl ConfigStore for MemoryConfigStore {
    fn load(&self) -> Result<AppConfig, ConfigError> {
        Ok(self.saved().last().cloned().unwrap_or_default())
    }

    fn save(&self, config: &AppConfig) -> Result<(), ConfigError> {
        if self.fail_saves {
            return Err(ConfigError::Io {
                path: PathBuf::from("config.json"),
                source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "read-only"),
            });
        }
        self.saved.lock().unwrap().push(config.clone());
        Ok(())
    }
}
