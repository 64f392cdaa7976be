//! RelayCommandEngine: turns one (mapping, key event) pair into at most one
//! board command.
//!
//! The decision itself is the pure [`resolve_action`] from `relayctrl-core`.
//! This use case adds what the pure function cannot do: it locks the target
//! channel in the [`RelayStateCache`], talks to the board through the
//! [`RelayBoard`] port, and records the outcome in the cache and the
//! [`RemoteStatusCell`].
//!
//! There is no retry.  A failed command leaves the cache untouched and puts
//! the failure text in the remote status; the next qualifying key event
//! simply tries again.

use std::sync::Arc;

use async_trait::async_trait;
use relayctrl_core::{
    resolve_action, BoardEndpoint, ChordMapping, KeyNames, ModifierSet, ProtocolError,
    RelayAction, RelayChannel, SkipReason,
};
use thiserror::Error;
use tracing::{debug, info, warn};

use super::relay_state::{RelayStateCache, RemoteStatus, RemoteStatusCell};

/// Errors from a relay board request.
#[derive(Debug, Error)]
pub enum BoardError {
    /// The request never produced a response (connect failure, timeout...).
    #[error("{0}")]
    Transport(String),
    /// The board answered with something other than `200 OK`.
    #[error("Got {0} response. Is this a relay board?")]
    Status(String),
    /// The state snapshot could not be decoded.
    #[error(transparent)]
    Malformed(#[from] ProtocolError),
}

/// Port to the networked relay board.
///
/// The infrastructure implementation speaks HTTP; tests use a recording
/// double.
#[async_trait]
pub trait RelayBoard: Send + Sync {
    /// Switches `channel` on or off.
    async fn set_channel(&self, channel: RelayChannel, on: bool) -> Result<(), BoardError>;

    /// Fetches the state of every channel, index 0 being channel 1.
    async fn fetch_state(&self) -> Result<Vec<u8>, BoardError>;

    /// Points subsequent requests at a new endpoint.
    fn reconfigure(&self, endpoint: BoardEndpoint);
}

/// What a single evaluation did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandOutcome {
    /// No command was needed.
    Skipped(SkipReason),
    /// The mapping targets channel 0 or a channel the board does not have.
    ChannelUnavailable(RelayChannel),
    /// The board accepted the command and the cache was updated.
    Switched { channel: RelayChannel, on: bool },
    /// The board call failed; the cache was left alone.
    Failed {
        channel: RelayChannel,
        on: bool,
        detail: String,
    },
}

/// Evaluates mappings against key events and drives the board.
///
/// Cheap to clone: every field is shared.
#[derive(Clone)]
pub struct RelayCommandEngine {
    cache: Arc<RelayStateCache>,
    status: Arc<RemoteStatusCell>,
    board: Arc<dyn RelayBoard>,
}

impl RelayCommandEngine {
    /// Creates an engine over the shared cache, status and board.
    pub fn new(
        cache: Arc<RelayStateCache>,
        status: Arc<RemoteStatusCell>,
        board: Arc<dyn RelayBoard>,
    ) -> Self {
        Self {
            cache,
            status,
            board,
        }
    }

    /// Evaluates `mapping` for an event with `flags`, given the modifier
    /// state captured when the event was dispatched.
    ///
    /// The target channel stays locked from the cache read until the cache
    /// write, so evaluations for the same channel run one after another.
    pub async fn evaluate(
        &self,
        mapping: &ChordMapping,
        live: &ModifierSet,
        flags: u32,
    ) -> CommandOutcome {
        if !mapping.matches_modifiers(live) {
            debug!(
                mapping = mapping.id,
                key = %KeyNames::display(mapping.key),
                differing = ?mapping.modifiers.differences(live),
                "modifiers do not match"
            );
            return CommandOutcome::Skipped(SkipReason::ModifierMismatch);
        }

        let channel = mapping.relay_number;
        let Some(mut cached) = self.cache.lock_channel(channel).await else {
            if channel == 0 {
                debug!(mapping = mapping.id, "mapping has no relay assigned");
            } else {
                warn!(
                    mapping = mapping.id,
                    channel,
                    num_relays = self.cache.num_relays(),
                    "mapping targets a relay the board does not have"
                );
            }
            return CommandOutcome::ChannelUnavailable(channel);
        };

        let on = match resolve_action(mapping, live, flags, *cached) {
            RelayAction::Skip(reason) => {
                debug!(mapping = mapping.id, channel, ?reason, "no command needed");
                return CommandOutcome::Skipped(reason);
            }
            RelayAction::Switch(on) => on,
        };

        match self.board.set_channel(channel, on).await {
            Ok(()) => {
                *cached = u8::from(on);
                self.status.set(RemoteStatus::Ok);
                info!(mapping = mapping.id, channel, on, "relay switched");
                CommandOutcome::Switched { channel, on }
            }
            Err(e) => {
                let detail = e.to_string();
                warn!(mapping = mapping.id, channel, on, error = %detail, "relay command failed");
                self.status.set(RemoteStatus::Error(detail.clone()));
                CommandOutcome::Failed {
                    channel,
                    on,
                    detail,
                }
            }
        }
    }
}
