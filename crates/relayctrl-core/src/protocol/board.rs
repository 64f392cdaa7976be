//! HTTP query format and state snapshot of the networked relay board.
//!
//! The board exposes a single endpoint, `/current_state.json`:
//!
//! ```text
//! GET /current_state.json?pw=<password>                 → state snapshot
//! GET /current_state.json?pw=<password>&Relay<N>=<0|1>  → switch channel N
//! ```
//!
//! The snapshot body looks like
//! `{"CurrentState":{"Output":[{"Name":"Relay1","Value":"0"}, ...]}}`.
//! `Value` is a quoted integer, not a JSON number; it is read and written in
//! that form.  Query strings are formatted verbatim, exactly as the boards
//! in the field expect them.

use std::time::Duration;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::config::AppConfig;
use crate::domain::mapping::RelayChannel;

/// Path of the board's only endpoint.
pub const STATE_PATH: &str = "/current_state.json";

/// Errors decoding a board response body.
#[derive(Debug, Error)]
pub enum ProtocolError {
    /// The body is not a valid state snapshot.
    #[error("malformed relay board response: {0}")]
    Malformed(#[from] serde_json::Error),
}

/// Where and how to reach the relay board.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BoardEndpoint {
    /// `host` or `host:port`, without scheme.
    pub address: String,
    /// Shared password.
    pub password: String,
    /// Upper bound for each request.
    pub timeout: Duration,
}

impl BoardEndpoint {
    /// URL that fetches the state snapshot.
    pub fn state_url(&self) -> String {
        format!("http://{}{}?pw={}", self.address, STATE_PATH, self.password)
    }

    /// URL that switches `channel` on or off.
    pub fn set_relay_url(&self, channel: RelayChannel, on: bool) -> String {
        format!(
            "{}&Relay{}={}",
            self.state_url(),
            channel,
            u8::from(on)
        )
    }
}

impl From<&AppConfig> for BoardEndpoint {
    fn from(cfg: &AppConfig) -> Self {
        Self {
            address: cfg.api.clone(),
            password: cfg.password.clone(),
            timeout: cfg.timeout,
        }
    }
}

/// Top-level state snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentStateResponse {
    pub current_state: CurrentState,
}

/// Output list inside the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct CurrentState {
    #[serde(default)]
    pub output: Vec<RelayOutput>,
}

/// One relay output; position in the list determines the channel number.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "PascalCase")]
pub struct RelayOutput {
    #[serde(default)]
    pub name: String,
    /// `0` (off) or `1` (on); any other integer the board reports reads as on.
    #[serde(with = "quoted_state")]
    pub value: u8,
}

impl CurrentStateResponse {
    /// Decodes a response body.
    ///
    /// # Errors
    ///
    /// Returns [`ProtocolError::Malformed`] if the body is not valid JSON of
    /// the expected shape, or if a `Value` is not a quoted integer.  Any
    /// nonzero integer is read as on.
    pub fn decode(body: &[u8]) -> Result<Self, ProtocolError> {
        Ok(serde_json::from_slice(body)?)
    }

    /// Channel states in board order (index 0 is channel 1), each `0` or `1`.
    pub fn relay_values(&self) -> Vec<u8> {
        self.current_state
            .output
            .iter()
            .map(|o| u8::from(o.value != 0))
            .collect()
    }
}

/// (De)serializes a relay state carried as a quoted integer (`"1"`).
mod quoted_state {
    use serde::{de::Error, Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &u8, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&value.to_string())
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.trim()
            .parse::<i64>()
            .map(|v| u8::from(v != 0))
            .map_err(|e| D::Error::custom(format!("invalid relay value {raw:?}: {e}")))
    }
}
