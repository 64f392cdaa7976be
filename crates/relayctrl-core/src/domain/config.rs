//! Configuration schema persisted by the config store.
//!
//! The JSON layout is kept compatible with existing `config.json` files:
//!
//! ```json
//! {
//!   "Mappings": [
//!     { "Id": 0, "Key": 65, "RelayNumber": 3, "Toggle": true,
//!       "Modifiers": { "160": false, "161": false, "162": true, "163": false } }
//!   ],
//!   "Api": "192.168.1.100",
//!   "Password": "admin",
//!   "Timeout": 250000000,
//!   "NumRelays": 16
//! }
//! ```
//!
//! `Timeout` is stored in nanoseconds.
//!
//! # Serde default values
//!
//! Fields annotated with `#[serde(default = "some_fn")]` use the return value
//! of `some_fn()` when the field is absent, so partial or older files still
//! load.  Files written by earlier releases may also carry an explicit `null`
//! for an empty mapping list or modifier map; `null_as_default` reads
//! those as empty.

use std::time::Duration;

use serde::{Deserialize, Deserializer, Serialize};

use super::mapping::{ChordMapping, RelayChannel};

/// Top-level application configuration stored on disk.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "PascalCase")]
pub struct AppConfig {
    /// Ordered chord mappings.
    #[serde(default, deserialize_with = "null_as_default")]
    pub mappings: Vec<ChordMapping>,
    /// Relay board address, `host` or `host:port`.
    #[serde(default = "default_api")]
    pub api: String,
    /// Shared password sent as the `pw` query parameter.
    #[serde(default = "default_password")]
    pub password: String,
    /// Per-request timeout for board calls.
    #[serde(default = "default_timeout", with = "duration_nanos")]
    pub timeout: Duration,
    /// Number of relay channels on the board.
    #[serde(default = "default_num_relays")]
    pub num_relays: RelayChannel,
}

fn default_api() -> String {
    "192.168.1.100".to_string()
}
fn default_password() -> String {
    "admin".to_string()
}
fn default_timeout() -> Duration {
    Duration::from_millis(250)
}
fn default_num_relays() -> RelayChannel {
    16
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            mappings: Vec::new(),
            api: default_api(),
            password: default_password(),
            timeout: default_timeout(),
            num_relays: default_num_relays(),
        }
    }
}

/// Deserializes `null` as `T::default()`.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// (De)serializes a [`Duration`] as an integer count of nanoseconds.
mod duration_nanos {
    use std::time::Duration;

    use serde::{Deserialize, Deserializer, Serializer};

    pub fn serialize<S: Serializer>(value: &Duration, serializer: S) -> Result<S::Ok, S::Error> {
        let nanos = u64::try_from(value.as_nanos()).unwrap_or(u64::MAX);
        serializer.serialize_u64(nanos)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Duration, D::Error> {
        u64::deserialize(deserializer).map(Duration::from_nanos)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::modifiers::{ModifierKey, ModifierSet};

    #[test]
    fn test_default_config_values() {
        let cfg = AppConfig::default();
        assert!(cfg.mappings.is_empty());
        assert_eq!(cfg.api, "192.168.1.100");
        assert_eq!(cfg.password, "admin");
        assert_eq!(cfg.timeout, Duration::from_millis(250));
        assert_eq!(cfg.num_relays, 16);
    }

    #[test]
    fn test_existing_config_file_format_parses() {
        // Arrange: a file as written by earlier releases
        let json = r#"{"Mappings":[{"Id":0,"Key":65,"RelayNumber":3,"Toggle":true,
            "Modifiers":{"160":false,"161":false,"162":true,"163":false}}],
            "Api":"10.0.0.5:8080","Password":"s3cret","Timeout":500000000,"NumRelays":8}"#;

        // Act
        let cfg: AppConfig = serde_json::from_str(json).expect("deserialize");

        // Assert
        assert_eq!(cfg.api, "10.0.0.5:8080");
        assert_eq!(cfg.password, "s3cret");
        assert_eq!(cfg.timeout, Duration::from_millis(500));
        assert_eq!(cfg.num_relays, 8);
        assert_eq!(cfg.mappings.len(), 1);
        let m = &cfg.mappings[0];
        assert_eq!(m.key, 0x41);
        assert_eq!(m.relay_number, 3);
        assert!(m.toggle);
        assert_eq!(m.modifiers, ModifierSet::new().with(ModifierKey::LeftCtrl, true));
    }

    #[test]
    fn test_timeout_serializes_as_nanoseconds() {
        let cfg = AppConfig::default();

        let value = serde_json::to_value(&cfg).expect("serialize");

        assert_eq!(value["Timeout"], 250_000_000u64);
        assert_eq!(value["NumRelays"], 16);
        assert!(value["Mappings"].as_array().is_some());
    }

    #[test]
    fn test_empty_object_uses_defaults() {
        let cfg: AppConfig = serde_json::from_str("{}").expect("deserialize");
        assert_eq!(cfg, AppConfig::default());
    }

    #[test]
    fn test_null_mappings_and_modifiers_load_as_empty() {
        // Arrange: nil slices and maps are written as `null` by earlier releases
        let with_null_modifiers = r#"{"Mappings":[{"Id":3,"Key":65,"RelayNumber":2,
            "Toggle":false,"Modifiers":null}],"Api":"10.9.9.9","Password":"pw",
            "Timeout":250000000,"NumRelays":4}"#;
        let with_null_mappings = r#"{"Mappings":null,"Api":"10.9.9.9","Password":"pw",
            "Timeout":250000000,"NumRelays":4}"#;

        // Act
        let cfg: AppConfig = serde_json::from_str(with_null_modifiers).expect("null modifiers");
        let empty: AppConfig = serde_json::from_str(with_null_mappings).expect("null mappings");

        // Assert
        assert_eq!(cfg.api, "10.9.9.9");
        assert_eq!(cfg.mappings.len(), 1);
        assert_eq!(cfg.mappings[0].id, 3);
        assert_eq!(cfg.mappings[0].modifiers, ModifierSet::new());
        assert!(empty.mappings.is_empty());
        assert_eq!(empty.num_relays, 4);
    }

    #[test]
    fn test_invalid_json_is_rejected() {
        let result: Result<AppConfig, _> = serde_json::from_str("{ not json");
        assert!(result.is_err());
    }
}
