//! Decides what a key event should do to one mapping's relay.
//!
//! ```text
//!                      press              release
//! toggle mode     on = !cached           (ignored)
//! momentary mode  on = true              on = false
//! ```
//!
//! The result is then compared with the cached channel state: a desired
//! state equal to the cached one needs no command.

use super::event;
use super::mapping::ChordMapping;
use super::modifiers::ModifierSet;

/// Why an evaluation produced no relay command.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// The live modifiers differ from the mapping's requirement.
    ModifierMismatch,
    /// A release event on a toggle mapping.
    ReleaseIgnored,
    /// The relay is already in the desired state.
    AlreadyInState,
}

/// Outcome of resolving a key event against one mapping.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelayAction {
    /// Nothing to send.
    Skip(SkipReason),
    /// Switch the channel on (`true`) or off (`false`).
    Switch(bool),
}

/// Resolves the relay action for `mapping` given the live modifiers, the
/// event flags and the cached channel state (`0` or `1`).
pub fn resolve_action(
    mapping: &ChordMapping,
    live: &ModifierSet,
    flags: u32,
    cached: u8,
) -> RelayAction {
    if !mapping.matches_modifiers(live) {
        return RelayAction::Skip(SkipReason::ModifierMismatch);
    }

    let pressed = event::is_press(flags);
    let on = if mapping.toggle {
        if !pressed {
            return RelayAction::Skip(SkipReason::ReleaseIgnored);
        }
        cached == 0
    } else {
        pressed
    };

    if u8::from(on) == cached {
        RelayAction::Skip(SkipReason::AlreadyInState)
    } else {
        RelayAction::Switch(on)
    }
}
