//! Full overwrite of the relay state cache from the board's snapshot.
//!
//! Runs once at startup, before any key event is processed, and once after
//! every successful configuration save.  Nothing else ever polls the board.

use tracing::{info, warn};

use super::context::EngineContext;
use super::relay_command::BoardError;
use super::relay_state::RemoteStatus;

/// Re-reads every channel's state from the board.
///
/// On failure the cache is left as it was and the error is both recorded in
/// the remote status and returned.
pub async fn resync(ctx: &EngineContext) -> Result<(), BoardError> {
    ctx.status().set(RemoteStatus::Connecting);

    match ctx.board.fetch_state().await {
        Ok(values) => {
            ctx.relay_states().overwrite_from(&values).await;
            ctx.status().set(RemoteStatus::Ok);
            info!(
                reported = values.len(),
                tracked = ctx.relay_states().num_relays(),
                "relay state resynchronized"
            );
            Ok(())
        }
        Err(e) => {
            warn!(error = %e, "could not read relay state from board");
            ctx.status().set(RemoteStatus::Error(e.to_string()));
            Err(e)
        }
    }
}

#[cfg(test)]
mod tests {
    use std::collections::BTreeMap;
    use std::sync::Arc;

    use relayctrl_core::AppConfig;
    use tokio_test::{assert_err, assert_ok};

    use super::*;
    use crate::application::test_support::{MemoryConfigStore, RecordingBoard};

    fn context(board: RecordingBoard, num_relays: u16) -> EngineContext {
        let config = AppConfig {
            num_relays,
            ..AppConfig::default()
        };
        EngineContext::new(config, Arc::new(board), Arc::new(MemoryConfigStore::new()))
    }

    #[tokio::test]
    async fn test_resync_overwrites_cache_and_reports_ok() {
        // Arrange
        let ctx = context(RecordingBoard::new().with_state(vec![1, 0, 1]), 3);

        // Act
        let result = resync(&ctx).await;

        // Assert
        assert_ok!(result);
        assert_eq!(
            ctx.relay_states().snapshot().await,
            BTreeMap::from([(1, 1), (2, 0), (3, 1)])
        );
        assert_eq!(ctx.status().get(), RemoteStatus::Ok);
    }

    #[tokio::test]
    async fn test_resync_failure_keeps_cache_and_records_cause() {
        // Arrange: channel 2 believed on from an earlier command
        let ctx = context(RecordingBoard::failing("connection refused"), 3);
        *ctx.relay_states().lock_channel(2).await.unwrap() = 1;

        // Act
        let result = resync(&ctx).await;

        // Assert
        assert_err!(result);
        assert_eq!(
            ctx.relay_states().snapshot().await,
            BTreeMap::from([(1, 0), (2, 1), (3, 0)])
        );
        assert_eq!(
            ctx.status().get(),
            RemoteStatus::Error("connection refused".to_string())
        );
    }
}
