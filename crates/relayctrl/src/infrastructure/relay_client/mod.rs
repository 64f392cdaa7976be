//! HTTP client for the networked relay board.
//!
//! The board exposes a single resource, `/current_state.json`.  Reading it
//! returns the state snapshot; adding `Relay<N>=<0|1>` to the query switches
//! a channel.  Both requests carry the password as `pw` and are bounded by
//! the configured timeout.
//!
//! URLs are built by [`BoardEndpoint`] and sent as-is: deployed boards expect
//! the query exactly as written, without percent-encoding.

use std::sync::{PoisonError, RwLock};

use async_trait::async_trait;
use relayctrl_core::{BoardEndpoint, CurrentStateResponse, RelayChannel};
use reqwest::StatusCode;
use tracing::{debug, info};

use crate::application::relay_command::{BoardError, RelayBoard};

/// [`RelayBoard`] implementation speaking the board's HTTP protocol.
pub struct HttpRelayClient {
    http: reqwest::Client,
    endpoint: RwLock<BoardEndpoint>,
}

impl HttpRelayClient {
    /// Creates a client sending requests to `endpoint`.
    pub fn new(endpoint: BoardEndpoint) -> Self {
        Self {
            http: reqwest::Client::new(),
            endpoint: RwLock::new(endpoint),
        }
    }

    /// Returns the endpoint requests currently go to.
    pub fn endpoint(&self) -> BoardEndpoint {
        self.endpoint
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Sends a GET and returns the body of a `200 OK` response.
    async fn get(&self, url: String, endpoint: &BoardEndpoint) -> Result<Vec<u8>, BoardError> {
        debug!(address = %endpoint.address, "relay board request");
        let response = self
            .http
            .get(url)
            .timeout(endpoint.timeout)
            .send()
            .await
            .map_err(|e| BoardError::Transport(e.to_string()))?;

        let status = response.status();
        if status != StatusCode::OK {
            return Err(BoardError::Status(status.to_string()));
        }

        let body = response
            .bytes()
            .await
            .map_err(|e| BoardError::Transport(e.to_string()))?;
        Ok(body.to_vec())
    }
}

#[async_trait]
impl RelayBoard for HttpRelayClient {
    async fn set_channel(&self, channel: RelayChannel, on: bool) -> Result<(), BoardError> {
        let endpoint = self.endpoint();
        self.get(endpoint.set_relay_url(channel, on), &endpoint)
            .await
            .map(|_| ())
    }

    async fn fetch_state(&self) -> Result<Vec<u8>, BoardError> {
        let endpoint = self.endpoint();
        let body = self.get(endpoint.state_url(), &endpoint).await?;
        let state = CurrentStateResponse::decode(&body)?;
        Ok(state.relay_values())
    }

    fn reconfigure(&self, endpoint: BoardEndpoint) {
        info!(address = %endpoint.address, "relay board endpoint updated");
        *self.endpoint.write().unwrap_or_else(PoisonError::into_inner) = endpoint;
    }
}
