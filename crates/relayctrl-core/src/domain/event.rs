//! Raw key transitions as delivered by the keyboard hook.

/// A Windows Virtual Key code.
pub type KeyCode = u8;

/// Bit in [`KeyEvent::flags`] that marks a key release (`LLKHF_UP`).
pub const RELEASE_FLAG: u32 = 0x80;

/// A single key press or release.
///
/// `flags` is passed through from the hook untouched; only bit 7 carries
/// meaning for RelayCtrl, but the whole value takes part in duplicate
/// suppression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    /// Virtual key code of the key that changed state.
    pub key_code: KeyCode,
    /// Low-level hook flags.
    pub flags: u32,
}

impl KeyEvent {
    /// Creates a press event with no other flags set.
    pub fn press(key_code: KeyCode) -> Self {
        Self { key_code, flags: 0 }
    }

    /// Creates a release event with no other flags set.
    pub fn release(key_code: KeyCode) -> Self {
        Self {
            key_code,
            flags: RELEASE_FLAG,
        }
    }

    /// Returns `true` for a key press.
    pub fn is_press(&self) -> bool {
        is_press(self.flags)
    }
}

/// Returns `true` when `flags` describe a key press.
pub fn is_press(flags: u32) -> bool {
    flags & RELEASE_FLAG == 0
}
