//! Configuration UI bridge: exposes engine state and the mapping editor to
//! whatever front end renders the settings page.
//!
//! The bridge has two halves:
//!
//! - **Reads** return Data Transfer Objects (DTOs): plain serialisable
//!   structs shaped for display (`MappingDto` carries the key's name as well
//!   as its code, `StatusDto` flattens [`RemoteStatus`] into a label plus an
//!   optional detail).
//! - **The one mutation**, [`submit_form`], takes the submitted form fields
//!   as a name → value map, turns them into a [`ConfigEdit`] and runs it
//!   through the editor.
//!
//! # Form field names
//!
//! | Field              | Meaning                                            |
//! |--------------------|----------------------------------------------------|
//! | `add`              | non-empty: append a blank mapping                  |
//! | `delete`, `id`     | non-empty `delete`: remove mapping `id`            |
//! | `api`              | board address                                      |
//! | `key<N>`           | key code for mapping `N`                           |
//! | `relay<N>`         | relay channel for mapping `N`                      |
//! | `toggle<N>`        | non-empty: toggle mode                             |
//! | `lshift<N>` ...    | `"1"`: modifier required (`rshift`, `lctrl`, `rctrl`) |
//!
//! # `CommandResult<T>` wrapper
//!
//! Every bridge function returns `CommandResult<T>` rather than
//! `Result<T, E>`, so every response has the same shape:
//! `{ success: bool, data: T | null, error: string | null }`.

use std::collections::HashMap;

use relayctrl_core::{KeyCode, KeyNames, MappingId, ModifierKey, RelayChannel};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::application::context::EngineContext;
use crate::application::manage_mappings::{apply_edit, ConfigEdit, FormUpdate, MappingRow};
use crate::application::relay_state::RemoteStatus;

// ── Data Transfer Objects ─────────────────────────────────────────────────────

/// Connectivity with the board, for the status line.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatusDto {
    /// `"connecting"`, `"ok"` or `"error"`.
    pub state: String,
    /// Failure text when `state == "error"`.
    pub detail: Option<String>,
    /// Board address from the running configuration.
    pub board_address: String,
}

/// Believed state of one relay channel.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RelayStateDto {
    pub channel: RelayChannel,
    pub on: bool,
}

/// One mapping row, as shown in the editor table.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MappingDto {
    pub id: MappingId,
    pub key: KeyCode,
    pub key_name: String,
    pub relay_number: RelayChannel,
    pub toggle: bool,
    pub lshift: bool,
    pub rshift: bool,
    pub lctrl: bool,
    pub rctrl: bool,
}

/// An entry of the key drop-down.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct KeyOptionDto {
    pub code: KeyCode,
    pub name: String,
}

/// Unified response wrapper.
#[derive(Debug, Serialize, Deserialize)]
pub struct CommandResult<T: Serialize> {
    pub success: bool,
    pub data: Option<T>,
    pub error: Option<String>,
}

impl<T: Serialize> CommandResult<T> {
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }
    pub fn err(msg: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(msg.into()),
        }
    }
}

// ── Reads ─────────────────────────────────────────────────────────────────────

/// Returns the board connectivity status and address.
pub async fn get_status(ctx: &EngineContext) -> CommandResult<StatusDto> {
    let (state, detail) = match ctx.status().get() {
        RemoteStatus::Connecting => ("connecting", None),
        RemoteStatus::Ok => ("ok", None),
        RemoteStatus::Error(detail) => ("error", Some(detail)),
    };
    CommandResult::ok(StatusDto {
        state: state.to_string(),
        detail,
        board_address: ctx.config().await.api,
    })
}

/// Returns the believed state of every channel, in channel order.
pub async fn get_relay_states(ctx: &EngineContext) -> CommandResult<Vec<RelayStateDto>> {
    let dtos = ctx
        .relay_states()
        .snapshot()
        .await
        .into_iter()
        .map(|(channel, value)| RelayStateDto {
            channel,
            on: value != 0,
        })
        .collect();
    CommandResult::ok(dtos)
}

/// Returns the configured mappings in list order.
pub async fn get_mappings(ctx: &EngineContext) -> CommandResult<Vec<MappingDto>> {
    let config = ctx.config().await;
    let dtos = config
        .mappings
        .iter()
        .map(|m| MappingDto {
            id: m.id,
            key: m.key,
            key_name: KeyNames::display(m.key),
            relay_number: m.relay_number,
            toggle: m.toggle,
            lshift: m.modifiers.is_held(ModifierKey::LeftShift),
            rshift: m.modifiers.is_held(ModifierKey::RightShift),
            lctrl: m.modifiers.is_held(ModifierKey::LeftCtrl),
            rctrl: m.modifiers.is_held(ModifierKey::RightCtrl),
        })
        .collect();
    CommandResult::ok(dtos)
}

/// Returns every key the editor offers, in code order.
pub fn get_key_options() -> CommandResult<Vec<KeyOptionDto>> {
    let options = KeyNames::selectable()
        .map(|(code, name)| KeyOptionDto { code, name })
        .collect();
    CommandResult::ok(options)
}

// ── Mutation ──────────────────────────────────────────────────────────────────

/// Applies a submitted form.  On success the new configuration is already
/// persisted and live.
pub async fn submit_form(
    ctx: &EngineContext,
    fields: &HashMap<String, String>,
) -> CommandResult<()> {
    let edit = parse_form(fields);
    debug!(?edit, "form submitted");
    match apply_edit(ctx, edit).await {
        Ok(()) => CommandResult::ok(()),
        Err(e) => CommandResult::err(e.to_string()),
    }
}

/// Turns submitted form fields into an edit command.
pub fn parse_form(fields: &HashMap<String, String>) -> ConfigEdit {
    let field = |name: &str| fields.get(name).map(String::as_str).unwrap_or("");

    if !field("add").is_empty() {
        return ConfigEdit::AddBlank;
    }
    if !field("delete").is_empty() {
        return ConfigEdit::Delete {
            id: field("id").trim().parse().unwrap_or(0),
        };
    }

    let mut rows: HashMap<MappingId, MappingRow> = HashMap::new();
    for (name, value) in fields {
        let Some((prefix, id)) = split_row_field(name) else {
            continue;
        };
        let row = rows.entry(id).or_default();
        match prefix {
            "key" => row.key = value.trim().parse().unwrap_or(0),
            "relay" => row.relay_number = value.trim().parse().unwrap_or(0),
            "toggle" => row.toggle = !value.is_empty(),
            modifier => {
                if let Some(key) = modifier_for_prefix(modifier) {
                    row.modifiers.set(key, value == "1");
                }
            }
        }
    }

    ConfigEdit::ReplaceAll(FormUpdate {
        board_address: field("api").to_string(),
        rows,
    })
}

const ROW_PREFIXES: [&str; 7] = ["key", "relay", "toggle", "lshift", "rshift", "lctrl", "rctrl"];

/// Splits `relay12` into `("relay", 12)`.
fn split_row_field(name: &str) -> Option<(&'static str, MappingId)> {
    ROW_PREFIXES.iter().find_map(|&prefix| {
        let id = name.strip_prefix(prefix)?.parse().ok()?;
        Some((prefix, id))
    })
}

fn modifier_for_prefix(prefix: &str) -> Option<ModifierKey> {
    match prefix {
        "lshift" => Some(ModifierKey::LeftShift),
        "rshift" => Some(ModifierKey::RightShift),
        "lctrl" => Some(ModifierKey::LeftCtrl),
        "rctrl" => Some(ModifierKey::RightCtrl),
        _ => None,
    }
}

// ── Tests ─────────────────────────────────────────────────────────────────────
