//! Keyboard capture infrastructure.
//!
//! On Windows this installs a low-level keyboard hook (WH_KEYBOARD_LL) on a
//! dedicated Win32 message loop thread.  Each key transition is pushed into a
//! tokio unbounded channel and consumed by the event dispatch loop.
//!
//! # Windows-Specific Implementation
//!
//! The hook callback must complete within ~300ms or Windows will remove the
//! hook.  The callback therefore only forwards the event; all processing
//! happens on the async side.  Events are observed, never swallowed: every
//! key still reaches the focused application.
//!
//! # Testability
//!
//! The [`KeyEventSource`] trait allows tests to inject synthetic events
//! without requiring Windows hooks.

use relayctrl_core::KeyEvent;
use tokio::sync::mpsc::UnboundedReceiver;

pub mod mock;

#[cfg(target_os = "windows")]
pub mod windows;

/// Error type for input capture operations.
#[derive(Debug, thiserror::Error)]
pub enum CaptureError {
    #[error("failed to install keyboard hook: {0}")]
    HookInstallFailed(String),
    #[error("keyboard capture is already running")]
    AlreadyStarted,
    #[error("platform not supported: {0}")]
    UnsupportedPlatform(String),
}

/// Trait abstracting key event production.
///
/// The production implementation uses a Windows hook; tests use
/// [`mock::MockKeyEventSource`].
pub trait KeyEventSource: Send + Sync {
    /// Starts capturing and returns the receiver for captured events.
    fn start(&self) -> Result<UnboundedReceiver<KeyEvent>, CaptureError>;
    /// Stops capturing and releases all OS resources.  The receiver returned
    /// by `start` sees the stream close.
    fn stop(&self);
}

/// Returns the key event source for the current platform.
#[cfg(target_os = "windows")]
pub fn platform_source() -> Result<Box<dyn KeyEventSource>, CaptureError> {
    Ok(Box::new(windows::WindowsKeyboardHook::new()))
}

/// Returns the key event source for the current platform.
#[cfg(not(target_os = "windows"))]
pub fn platform_source() -> Result<Box<dyn KeyEventSource>, CaptureError> {
    Err(CaptureError::UnsupportedPlatform(
        std::env::consts::OS.to_string(),
    ))
}
