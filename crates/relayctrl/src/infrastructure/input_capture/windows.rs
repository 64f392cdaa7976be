//! Windows low-level keyboard hook implementation.
//!
//! This module installs a WH_KEYBOARD_LL hook using the Windows API on a
//! dedicated Win32 message-loop thread.  The hook callback forwards every
//! key transition as a [`KeyEvent`] carrying the virtual-key code and the raw
//! `KBDLLHOOKSTRUCT` flags, then passes the event down the hook chain.
//!
//! # Safety
//!
//! This module uses `unsafe` code exclusively for Windows API FFI calls.
//! All `unsafe` blocks are annotated with `// SAFETY:` comments.

#![cfg(target_os = "windows")]

use std::sync::atomic::{AtomicU32, Ordering};
use std::sync::mpsc as std_mpsc;
use std::sync::{Mutex, PoisonError};
use std::thread;

use relayctrl_core::KeyEvent;
use tokio::sync::mpsc::{self, UnboundedReceiver, UnboundedSender};
use tracing::{debug, info, warn};
use windows::Win32::Foundation::{LPARAM, LRESULT, WPARAM};
use windows::Win32::System::Threading::GetCurrentThreadId;
use windows::Win32::UI::WindowsAndMessaging::{
    CallNextHookEx, DispatchMessageW, GetMessageW, PostThreadMessageW, SetWindowsHookExW,
    UnhookWindowsHookEx, HC_ACTION, KBDLLHOOKSTRUCT, MSG, WH_KEYBOARD_LL, WM_QUIT,
};

use super::{CaptureError, KeyEventSource};

/// Sender used by the hook callback to deliver events to the async runtime.
/// `Some` while a hook is installed.
static EVENT_SENDER: Mutex<Option<UnboundedSender<KeyEvent>>> = Mutex::new(None);

/// Windows low-level keyboard capture.
///
/// Only one instance can be running at a time: the hook callback has no
/// per-instance context and reaches the channel through a global.
pub struct WindowsKeyboardHook {
    /// Win32 id of the message-loop thread, `0` when not running.
    thread_id: AtomicU32,
}

impl WindowsKeyboardHook {
    pub fn new() -> Self {
        Self {
            thread_id: AtomicU32::new(0),
        }
    }
}

impl Default for WindowsKeyboardHook {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyEventSource for WindowsKeyboardHook {
    fn start(&self) -> Result<UnboundedReceiver<KeyEvent>, CaptureError> {
        let (tx, rx) = mpsc::unbounded_channel();
        {
            let mut sender = EVENT_SENDER.lock().unwrap_or_else(PoisonError::into_inner);
            if sender.is_some() {
                return Err(CaptureError::AlreadyStarted);
            }
            *sender = Some(tx);
        }

        // The loop thread reports whether the hook went in, and its thread id.
        let (ready_tx, ready_rx) = std_mpsc::channel::<Result<u32, String>>();
        let spawned = thread::Builder::new()
            .name("relayctrl-hook-loop".to_string())
            .spawn(move || run_hook_message_loop(ready_tx));
        if let Err(e) = spawned {
            clear_sender();
            return Err(CaptureError::HookInstallFailed(e.to_string()));
        }

        match ready_rx.recv() {
            Ok(Ok(thread_id)) => {
                self.thread_id.store(thread_id, Ordering::SeqCst);
                info!("keyboard hook installed");
                Ok(rx)
            }
            Ok(Err(reason)) => {
                clear_sender();
                Err(CaptureError::HookInstallFailed(reason))
            }
            Err(_) => {
                clear_sender();
                Err(CaptureError::HookInstallFailed(
                    "hook thread exited before reporting".to_string(),
                ))
            }
        }
    }

    fn stop(&self) {
        let thread_id = self.thread_id.swap(0, Ordering::SeqCst);
        if thread_id == 0 {
            return;
        }
        // SAFETY: Posting WM_QUIT to a thread id we obtained from that thread.
        if let Err(e) = unsafe { PostThreadMessageW(thread_id, WM_QUIT, WPARAM(0), LPARAM(0)) } {
            warn!(error = %e, "could not signal hook thread to exit");
        }
        clear_sender();
        info!("keyboard hook stopped");
    }
}

fn clear_sender() {
    *EVENT_SENDER.lock().unwrap_or_else(PoisonError::into_inner) = None;
}

/// Entry point for the dedicated Win32 message loop thread.
fn run_hook_message_loop(ready: std_mpsc::Sender<Result<u32, String>>) {
    // SAFETY: The hook is installed on this thread, which then runs the
    // message loop the hook requires.
    let hook = match unsafe { SetWindowsHookExW(WH_KEYBOARD_LL, Some(keyboard_hook_proc), None, 0) } {
        Ok(hook) => hook,
        Err(e) => {
            let _ = ready.send(Err(e.to_string()));
            return;
        }
    };
    // SAFETY: Trivial query of the calling thread's id.
    let thread_id = unsafe { GetCurrentThreadId() };
    let _ = ready.send(Ok(thread_id));

    // Win32 message loop – blocks until WM_QUIT is posted
    let mut msg = MSG::default();
    // SAFETY: Standard Win32 GetMessage/DispatchMessage loop pattern.
    unsafe {
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            DispatchMessageW(&msg);
        }
        if let Err(e) = UnhookWindowsHookEx(hook) {
            warn!(error = %e, "UnhookWindowsHookEx failed");
        }
    }
    debug!("hook message loop exited");
}

/// Low-level keyboard hook callback.
///
/// # Safety
///
/// This function is called by Windows from the hook message loop thread.
/// It must return quickly (< ~300ms) to avoid hook removal by the OS.
unsafe extern "system" fn keyboard_hook_proc(
    n_code: i32,
    w_param: WPARAM,
    l_param: LPARAM,
) -> LRESULT {
    if n_code == HC_ACTION as i32 {
        // SAFETY: l_param points to a KBDLLHOOKSTRUCT when n_code == HC_ACTION.
        let kbs = &*(l_param.0 as *const KBDLLHOOKSTRUCT);
        let event = KeyEvent {
            key_code: kbs.vkCode as u8,
            flags: kbs.flags.0,
        };

        let sender = EVENT_SENDER.lock().unwrap_or_else(PoisonError::into_inner);
        if let Some(tx) = sender.as_ref() {
            // Ignore send errors (receiver dropped during shutdown).
            let _ = tx.send(event);
        }
    }

    // SAFETY: Forward the event to the next hook in the chain.
    CallNextHookEx(None, n_code, w_param, l_param)
}
