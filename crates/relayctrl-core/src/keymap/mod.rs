//! Key code naming for logs and the configuration UI.
//!
//! RelayCtrl works directly in Windows Virtual Key code space: the hook
//! reports VK codes, mappings store VK codes, and the UI offers VK codes
//! `1..=254` in its key selector.  This module only adds human-readable names.

pub mod windows_vk;

use crate::domain::event::KeyCode;

/// Lowest key code offered by the configuration UI.
pub const FIRST_SELECTABLE_KEY: KeyCode = 1;

/// Highest key code offered by the configuration UI.
pub const LAST_SELECTABLE_KEY: KeyCode = 254;

/// Unified key naming front-end.
pub struct KeyNames;

impl KeyNames {
    /// Returns the `VK_*` name of `vk`, e.g. `"VK_LSHIFT"`.
    ///
    /// Returns `None` for reserved or unassigned codes.
    pub fn name(vk: KeyCode) -> Option<&'static str> {
        windows_vk::vk_name(vk)
    }

    /// Returns the name of `vk`, or its hexadecimal value when it has none.
    pub fn display(vk: KeyCode) -> String {
        match Self::name(vk) {
            Some(name) => name.to_string(),
            None => format!("0x{vk:02X}"),
        }
    }

    /// Every key the configuration UI offers, with its display name.
    pub fn selectable() -> impl Iterator<Item = (KeyCode, String)> {
        (FIRST_SELECTABLE_KEY..=LAST_SELECTABLE_KEY).map(|vk| (vk, Self::display(vk)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_falls_back_to_hex_for_unnamed_codes() {
        assert_eq!(KeyNames::display(0x41), "VK_A");
        assert_eq!(KeyNames::display(0x07), "0x07");
    }

    #[test]
    fn test_selectable_covers_1_to_254() {
        let keys: Vec<KeyCode> = KeyNames::selectable().map(|(vk, _)| vk).collect();
        assert_eq!(keys.first(), Some(&1));
        assert_eq!(keys.last(), Some(&254));
        assert_eq!(keys.len(), 254);
    }

    #[test]
    fn test_name_is_none_for_unassigned_codes() {
        assert_eq!(KeyNames::name(0xA3), Some("VK_RCONTROL"));
        assert_eq!(KeyNames::name(0xFF), None);
    }
}
