//! EventDispatchLoop: the single consumer of captured key events.
//!
//! For every event the loop:
//!
//! 1. drops it if it is identical (key code and flags) to the previous one,
//!    which filters out auto-repeat;
//! 2. updates the live modifier set if the key is a tracked modifier;
//! 3. looks the key up in the mapping index and spawns one evaluation task
//!    per mapping, each with a copy of the modifier set as it is right now.
//!
//! The loop never waits for the tasks it spawns, so a slow board never
//! delays the processing of the next key event.

use std::future::Future;
use std::sync::Arc;

use relayctrl_core::{KeyEvent, KeyNames, ModifierSet};
use tokio::sync::mpsc::UnboundedReceiver;
use tokio::task::JoinHandle;
use tracing::{debug, info, trace};

use super::context::EngineContext;
use super::relay_command::CommandOutcome;

/// Turns captured key events into relay command evaluations.
pub struct EventDispatchLoop {
    ctx: Arc<EngineContext>,
    modifiers: ModifierSet,
    last_event: Option<KeyEvent>,
}

impl EventDispatchLoop {
    /// Creates a loop with every modifier released and no previous event.
    pub fn new(ctx: Arc<EngineContext>) -> Self {
        Self {
            ctx,
            modifiers: ModifierSet::new(),
            last_event: None,
        }
    }

    /// Live modifier state as tracked from the event stream.
    pub fn modifiers(&self) -> ModifierSet {
        self.modifiers
    }

    /// Processes one event and returns the handles of the evaluations it
    /// spawned.  Callers other than tests may drop the handles.
    pub async fn handle_event(&mut self, event: KeyEvent) -> Vec<JoinHandle<CommandOutcome>> {
        if self.last_event == Some(event) {
            trace!(key = event.key_code, flags = event.flags, "duplicate event dropped");
            return Vec::new();
        }

        if self.modifiers.update(event.key_code, event.is_press()) {
            debug!(
                key = %KeyNames::display(event.key_code),
                held = event.is_press(),
                "modifier state changed"
            );
        }

        let index = self.ctx.mapping_index().await;
        let matches = index.lookup(event.key_code);
        let live = self.modifiers;
        let handles = if matches.is_empty() {
            Vec::new()
        } else {
            debug!(
                key = %KeyNames::display(event.key_code),
                press = event.is_press(),
                mappings = matches.len(),
                "dispatching key event"
            );
            let engine = self.ctx.engine();
            matches
                .iter()
                .cloned()
                .map(|mapping| {
                    let engine = engine.clone();
                    tokio::spawn(async move { engine.evaluate(&mapping, &live, event.flags).await })
                })
                .collect()
        };

        self.last_event = Some(event);
        handles
    }

    /// Consumes `events` until `shutdown` resolves or the stream closes.
    ///
    /// In-flight evaluations are not awaited.
    pub async fn run<F>(mut self, mut events: UnboundedReceiver<KeyEvent>, shutdown: F)
    where
        F: Future<Output = ()>,
    {
        tokio::pin!(shutdown);
        info!("event dispatch loop started");

        loop {
            tokio::select! {
                _ = &mut shutdown => {
                    info!("shutdown requested, stopping event dispatch");
                    break;
                }
                next = events.recv() => match next {
                    Some(event) => {
                        self.handle_event(event).await;
                    }
                    None => {
                        info!("key event stream closed");
                        break;
                    }
                },
            }
        }
    }
}
