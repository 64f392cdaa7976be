//! Relay state cache and remote connectivity status.
//!
//! # Per-channel serialization
//!
//! Each channel's believed state sits behind its own async mutex.  The
//! command engine holds a channel's lock from the moment it reads the cached
//! value until it has written the result of the board call back, so two
//! commands for the same channel never interleave: a toggle fired twice in
//! quick succession switches the relay on and then off again, instead of
//! both tasks reading `0` and both sending `on`.  Commands for different
//! channels still run concurrently.
//!
//! A resync overwrites the channels one lock at a time, so it is ordered with
//! respect to in-flight commands on each channel as well.

use std::collections::BTreeMap;

use relayctrl_core::RelayChannel;
use tokio::sync::{watch, Mutex, MutexGuard};

/// Believed on/off state of every relay channel.
///
/// The cache is optimistic: after startup it only changes when this process
/// issues a successful command or resyncs.  Changes made on the board by
/// other means are not noticed until the next resync.
pub struct RelayStateCache {
    /// Index 0 holds channel 1.
    channels: Vec<Mutex<u8>>,
}

impl RelayStateCache {
    /// Creates a cache for channels `1..=num_relays`, all believed off.
    pub fn new(num_relays: RelayChannel) -> Self {
        Self {
            channels: (0..num_relays).map(|_| Mutex::new(0)).collect(),
        }
    }

    /// Number of channels tracked.
    pub fn num_relays(&self) -> usize {
        self.channels.len()
    }

    /// Locks `channel` for a read-modify-write cycle.
    ///
    /// Returns `None` for channel `0` (unassigned) and for channels beyond
    /// the board's relay count.
    pub async fn lock_channel(&self, channel: RelayChannel) -> Option<MutexGuard<'_, u8>> {
        let slot = self.slot(channel)?;
        Some(slot.lock().await)
    }

    /// Returns the believed state of `channel`, `None` if out of range.
    pub async fn get(&self, channel: RelayChannel) -> Option<u8> {
        Some(*self.slot(channel)?.lock().await)
    }

    /// Overwrites channels from a board snapshot (`values[i]` is channel
    /// `i + 1`).  Values past the relay count are ignored; channels missing
    /// from `values` keep their current state.
    pub async fn overwrite_from(&self, values: &[u8]) {
        for (slot, value) in self.channels.iter().zip(values) {
            *slot.lock().await = u8::from(*value != 0);
        }
    }

    /// Returns a snapshot of every channel's believed state.
    pub async fn snapshot(&self) -> BTreeMap<RelayChannel, u8> {
        let mut out = BTreeMap::new();
        for (idx, slot) in self.channels.iter().enumerate() {
            let channel = RelayChannel::try_from(idx + 1).unwrap_or(RelayChannel::MAX);
            out.insert(channel, *slot.lock().await);
        }
        out
    }

    fn slot(&self, channel: RelayChannel) -> Option<&Mutex<u8>> {
        let idx = usize::from(channel).checked_sub(1)?;
        self.channels.get(idx)
    }
}

/// Connectivity with the relay board, as of the last interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RemoteStatus {
    /// A resync is in flight.
    Connecting,
    /// The last interaction succeeded.
    Ok,
    /// The last interaction failed; carries the cause.
    Error(String),
}

/// Shared holder of the latest [`RemoteStatus`].
///
/// Backed by a `watch` channel so the UI side can either read the current
/// value or wait for changes.
pub struct RemoteStatusCell {
    tx: watch::Sender<RemoteStatus>,
}

impl RemoteStatusCell {
    /// Starts in [`RemoteStatus::Connecting`].
    pub fn new() -> Self {
        let (tx, _rx) = watch::channel(RemoteStatus::Connecting);
        Self { tx }
    }

    /// Returns the current status.
    pub fn get(&self) -> RemoteStatus {
        self.tx.borrow().clone()
    }

    /// Replaces the current status.
    pub fn set(&self, status: RemoteStatus) {
        self.tx.send_replace(status);
    }
}

impl Default for RemoteStatusCell {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_new_cache_believes_every_channel_off() {
        let cache = RelayStateCache::new(4);
        let snap = cache.snapshot().await;
        assert_eq!(snap.len(), 4);
        assert!(snap.values().all(|&v| v == 0));
        assert_eq!(snap.keys().copied().collect::<Vec<_>>(), vec![1, 2, 3, 4]);
    }

    #[tokio::test]
    async fn test_channel_zero_and_out_of_range_are_rejected() {
        let cache = RelayStateCache::new(3);
        assert!(cache.lock_channel(0).await.is_none());
        assert!(cache.lock_channel(4).await.is_none());
        assert!(cache.lock_channel(3).await.is_some());
    }

    #[tokio::test]
    async fn test_overwrite_ignores_extra_values_and_keeps_missing_channels() {
        // Arrange: channel 4 was on before the resync
        let cache = RelayStateCache::new(4);
        *cache.lock_channel(4).await.unwrap() = 1;

        // Act: snapshot only reports 3 channels... plus a 5th beyond range
        cache.overwrite_from(&[1, 0, 1]).await;
        let short = cache.snapshot().await;
        cache.overwrite_from(&[0, 0, 0, 0, 1]).await;
        let long = cache.snapshot().await;

        // Assert
        assert_eq!(short.get(&1), Some(&1));
        assert_eq!(short.get(&3), Some(&1));
        assert_eq!(short.get(&4), Some(&1), "missing channel keeps its value");
        assert_eq!(long.len(), 4);
        assert!(long.values().all(|&v| v == 0));
    }

    #[tokio::test]
    async fn test_channel_lock_serializes_writers() {
        let cache = std::sync::Arc::new(RelayStateCache::new(1));
        let guard = cache.lock_channel(1).await.unwrap();

        let c2 = std::sync::Arc::clone(&cache);
        let waiter = tokio::spawn(async move { c2.get(1).await });
        tokio::task::yield_now().await;
        assert!(!waiter.is_finished(), "reader must wait for the writer");

        drop(guard);
        assert_eq!(waiter.await.unwrap(), Some(0));
    }

    #[test]
    fn test_status_cell_starts_connecting_and_updates() {
        let cell = RemoteStatusCell::new();
        assert_eq!(cell.get(), RemoteStatus::Connecting);

        cell.set(RemoteStatus::Error("timed out".to_string()));

        assert_eq!(cell.get(), RemoteStatus::Error("timed out".to_string()));
    }
}
