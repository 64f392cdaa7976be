//! Domain entities for RelayCtrl.
//!
//! This module contains pure business logic with no infrastructure dependencies.
//!
//! # What is "domain" in Clean Architecture? (for beginners)
//!
//! The innermost layer of the application is the **domain**.  Domain code
//! contains the core rules of the system, has no imports from OS APIs,
//! network libraries or UI frameworks, and can be tested on any platform.
//!
//! For RelayCtrl the rules are small but easy to get subtly wrong:
//!
//! - a chord fires only when the live modifier set matches the mapping's
//!   requirement *exactly* (unrequired modifiers must be released);
//! - toggle mappings flip on press and ignore releases, momentary mappings
//!   follow the key;
//! - a command is only needed when the desired state differs from the
//!   cached one.

/// Relay action resolution for a key event against one mapping.
pub mod action;

/// Persisted configuration schema.
pub mod config;

/// Raw key events as produced by the keyboard hook.
pub mod event;

/// Chord mappings and the key-code index.
pub mod mapping;

/// The four tracked modifier keys.
pub mod modifiers;
