//! # relayctrl-core
//!
//! Shared library for RelayCtrl containing the domain entities, the Windows
//! virtual-key name table, and the relay board wire protocol.
//!
//! It has zero dependencies on OS APIs, async runtimes, or network sockets.
//!
//! # Architecture overview (for beginners)
//!
//! RelayCtrl binds keyboard chords (a key plus an exact set of held modifier
//! keys) to the output channels of a networked relay board.  Pressing a bound
//! chord switches the relay on, off, or flips it, depending on the mapping.
//!
//! This crate (`relayctrl-core`) is the shared foundation.  It defines:
//!
//! - **`domain`** – Pure business logic: the modifier set, chord mappings, the
//!   key-code index used on every key event, the action-resolution rules and
//!   the persisted configuration schema.
//!
//! - **`keymap`** – Display names for Windows Virtual Key codes, used in logs
//!   and in the configuration UI.
//!
//! - **`protocol`** – The relay board's HTTP query format and its JSON state
//!   snapshot.

pub mod domain;
pub mod keymap;
pub mod protocol;

pub use domain::action::{resolve_action, RelayAction, SkipReason};
pub use domain::config::AppConfig;
pub use domain::event::{KeyCode, KeyEvent, RELEASE_FLAG};
pub use domain::mapping::{next_mapping_id, ChordMapping, MappingId, MappingIndex, RelayChannel};
pub use domain::modifiers::{ModifierKey, ModifierSet};
pub use keymap::KeyNames;
pub use protocol::board::{BoardEndpoint, CurrentStateResponse, ProtocolError};
