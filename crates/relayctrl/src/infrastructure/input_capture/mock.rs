//! Mock key event source for testing.
//!
//! Allows tests to inject synthetic [`KeyEvent`]s without requiring a running
//! Windows message loop or OS hooks.

use std::sync::{Mutex, PoisonError};

use relayctrl_core::KeyEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};

use super::{CaptureError, KeyEventSource};

/// A mock implementation of [`KeyEventSource`] that lets tests inject events.
#[derive(Default)]
pub struct MockKeyEventSource {
    sender: Mutex<Option<UnboundedSender<KeyEvent>>>,
}

impl MockKeyEventSource {
    pub fn new() -> Self {
        Self::default()
    }

    /// Injects a synthetic event, as if captured from hardware.
    ///
    /// Returns `false` if the source is not started or the receiver is gone.
    pub fn inject_event(&self, event: KeyEvent) -> bool {
        let guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        match guard.as_ref() {
            Some(sender) => sender.send(event).is_ok(),
            None => false,
        }
    }

    /// Returns `true` between `start` and `stop`.
    pub fn is_running(&self) -> bool {
        self.sender
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl KeyEventSource for MockKeyEventSource {
    fn start(&self) -> Result<UnboundedReceiver<KeyEvent>, CaptureError> {
        let mut guard = self.sender.lock().unwrap_or_else(PoisonError::into_inner);
        if guard.is_some() {
            return Err(CaptureError::AlreadyStarted);
        }
        let (tx, rx) = mpsc::unbounded_channel();
        *guard = Some(tx);
        Ok(rx)
    }

    fn stop(&self) {
        // Dropping the sender closes the channel
        *self.sender.lock().unwrap_or_else(PoisonError::into_inner) = None;
    }
}
