//! The modifier keys tracked for chord matching.
//!
//! Only the left/right Shift and left/right Control keys take part in chord
//! matching.  Alt and the Windows keys are ordinary trigger keys as far as
//! RelayCtrl is concerned.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::event::KeyCode;

/// One of the four tracked modifier keys, identified by its Windows VK code.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
#[repr(u8)]
pub enum ModifierKey {
    /// `VK_LSHIFT`
    LeftShift = 0xA0,
    /// `VK_RSHIFT`
    RightShift = 0xA1,
    /// `VK_LCONTROL`
    LeftCtrl = 0xA2,
    /// `VK_RCONTROL`
    RightCtrl = 0xA3,
}

impl ModifierKey {
    /// All tracked modifiers, in VK code order.
    pub const ALL: [ModifierKey; 4] = [
        ModifierKey::LeftShift,
        ModifierKey::RightShift,
        ModifierKey::LeftCtrl,
        ModifierKey::RightCtrl,
    ];

    /// The Windows VK code of this modifier.
    pub fn vk_code(self) -> KeyCode {
        self as KeyCode
    }
}

impl TryFrom<KeyCode> for ModifierKey {
    type Error = ();

    fn try_from(value: KeyCode) -> Result<Self, ()> {
        match value {
            0xA0 => Ok(ModifierKey::LeftShift),
            0xA1 => Ok(ModifierKey::RightShift),
            0xA2 => Ok(ModifierKey::LeftCtrl),
            0xA3 => Ok(ModifierKey::RightCtrl),
            _ => Err(()),
        }
    }
}

/// Held/released state of every tracked modifier.
///
/// Used both for the live keyboard state and for a mapping's requirement.
/// Two sets are compared with `==`: a chord fires only on an exact match.
///
/// On disk the set is a JSON object keyed by VK code (`{"160": false, ...}`).
/// Missing keys deserialize as released and unknown keys are dropped, so a
/// deserialized set always covers all four modifiers.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "BTreeMap<KeyCode, bool>", into = "BTreeMap<KeyCode, bool>")]
pub struct ModifierSet {
    left_shift: bool,
    right_shift: bool,
    left_ctrl: bool,
    right_ctrl: bool,
}

impl ModifierSet {
    /// Creates a set with every modifier released.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns whether `key` is held.
    pub fn is_held(&self, key: ModifierKey) -> bool {
        match key {
            ModifierKey::LeftShift => self.left_shift,
            ModifierKey::RightShift => self.right_shift,
            ModifierKey::LeftCtrl => self.left_ctrl,
            ModifierKey::RightCtrl => self.right_ctrl,
        }
    }

    /// Sets the held state of `key`.
    pub fn set(&mut self, key: ModifierKey, held: bool) {
        match key {
            ModifierKey::LeftShift => self.left_shift = held,
            ModifierKey::RightShift => self.right_shift = held,
            ModifierKey::LeftCtrl => self.left_ctrl = held,
            ModifierKey::RightCtrl => self.right_ctrl = held,
        }
    }

    /// Builder-style variant of [`set`](Self::set).
    pub fn with(mut self, key: ModifierKey, held: bool) -> Self {
        self.set(key, held);
        self
    }

    /// Applies a key transition.  Returns `true` if `key_code` is a tracked
    /// modifier (whether or not its state actually changed).
    pub fn update(&mut self, key_code: KeyCode, is_press: bool) -> bool {
        match ModifierKey::try_from(key_code) {
            Ok(key) => {
                self.set(key, is_press);
                true
            }
            Err(()) => false,
        }
    }

    /// Returns the modifiers whose state differs between `self` and `other`.
    pub fn differences(&self, other: &ModifierSet) -> Vec<ModifierKey> {
        ModifierKey::ALL
            .into_iter()
            .filter(|&k| self.is_held(k) != other.is_held(k))
            .collect()
    }
}

impl From<BTreeMap<KeyCode, bool>> for ModifierSet {
    fn from(map: BTreeMap<KeyCode, bool>) -> Self {
        let mut set = ModifierSet::new();
        for (code, held) in map {
            if let Ok(key) = ModifierKey::try_from(code) {
                set.set(key, held);
            }
        }
        set
    }
}

impl From<ModifierSet> for BTreeMap<KeyCode, bool> {
    fn from(set: ModifierSet) -> Self {
        ModifierKey::ALL
            .into_iter()
            .map(|k| (k.vk_code(), set.is_held(k)))
            .collect()
    }
}
