//! Application layer use cases.
//!
//! # What is the "application" layer? (for beginners)
//!
//! In Clean Architecture the *application* layer sits between the domain
//! (pure business rules in `relayctrl-core`) and the infrastructure
//! (keyboard hook, HTTP, file system).
//!
//! Use cases in this layer:
//!
//! - **Orchestrate** domain objects to fulfil a user goal (e.g., "switch
//!   relay 3 when Ctrl+F1 is pressed").
//! - **Depend on abstractions** (the [`relay_command::RelayBoard`] and
//!   [`manage_mappings::ConfigStore`] traits) rather than concrete
//!   implementations, so tests can substitute recording doubles.
//! - **Contain no OS calls, no network I/O, no file system access**.
//!
//! # Sub-modules
//!
//! - **`dispatch`** – Consumes key events, tracks modifiers, and spawns one
//!   evaluation per matching mapping.  Runs on every keystroke.
//!
//! - **`relay_command`** – Evaluates one mapping against one event and sends
//!   at most one command to the board.
//!
//! - **`resync`** – Reloads the relay state cache from the board.
//!
//! - **`manage_mappings`** – Add / delete / replace-all edits, persisted and
//!   then applied.
//!
//! - **`relay_state`** / **`context`** – The shared state these use cases
//!   operate on.

pub mod context;
pub mod dispatch;
pub mod manage_mappings;
pub mod relay_command;
pub mod relay_state;
pub mod resync;

#[cfg(test)]
pub(crate) mod test_support;
