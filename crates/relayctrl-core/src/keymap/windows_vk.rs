//! Windows Virtual Key (VK) code name table.
//!
//! Reference: Windows Virtual-Key Codes (winuser.h).
//! Windows VK codes range from 0x00 to 0xFF.
//!
//! # What is a Windows Virtual Key (VK) code? (for beginners)
//!
//! Windows assigns each keyboard key a number called a "Virtual Key code".
//! These are defined in `<winuser.h>` and named `VK_*` (e.g., `VK_RETURN = 0x0D`,
//! `VK_SPACE = 0x20`).  They are "virtual" because they represent *logical* keys
//! rather than physical scan codes: pressing the letter A on any keyboard layout
//! always produces `VK_A = 0x41`.
//!
//! # How this table works
//!
//! `VK_NAME_TABLE` is a compile-time constant array of 256 optional names,
//! indexed by VK code.  Codes that are reserved or unassigned hold `None`.

use crate::domain::event::KeyCode;

/// Returns the `VK_*` name for `vk`, or `None` if the code is unassigned.
pub fn vk_name(vk: KeyCode) -> Option<&'static str> {
    VK_NAME_TABLE[vk as usize]
}

/// Complete VK → name table indexed by VK code (0x00–0xFF).
///
/// Reference: https://learn.microsoft.com/windows/win32/inputdev/virtual-key-codes
const VK_NAME_TABLE: [Option<&str>; 256] = {
    let mut t: [Option<&str>; 256] = [None; 256];

    // ── Mouse buttons ─────────────────────────────────────────────────────────
    t[0x01] = Some("VK_LBUTTON");
    t[0x02] = Some("VK_RBUTTON");
    t[0x03] = Some("VK_CANCEL");
    t[0x04] = Some("VK_MBUTTON");
    t[0x05] = Some("VK_XBUTTON1");
    t[0x06] = Some("VK_XBUTTON2");

    // ── Control keys ─────────────────────────────────────────────────────────
    t[0x08] = Some("VK_BACK");
    t[0x09] = Some("VK_TAB");
    t[0x0C] = Some("VK_CLEAR");
    t[0x0D] = Some("VK_RETURN");
    t[0x10] = Some("VK_SHIFT");
    t[0x11] = Some("VK_CONTROL");
    t[0x12] = Some("VK_MENU");
    t[0x13] = Some("VK_PAUSE");
    t[0x14] = Some("VK_CAPITAL");
    t[0x15] = Some("VK_KANA");
    t[0x17] = Some("VK_JUNJA");
    t[0x18] = Some("VK_FINAL");
    t[0x19] = Some("VK_KANJI");
    t[0x1B] = Some("VK_ESCAPE");
    t[0x1C] = Some("VK_CONVERT");
    t[0x1D] = Some("VK_NONCONVERT");
    t[0x1E] = Some("VK_ACCEPT");
    t[0x1F] = Some("VK_MODECHANGE");
    t[0x20] = Some("VK_SPACE");

    // ── Navigation ────────────────────────────────────────────────────────────
    t[0x21] = Some("VK_PRIOR");
    t[0x22] = Some("VK_NEXT");
    t[0x23] = Some("VK_END");
    t[0x24] = Some("VK_HOME");
    t[0x25] = Some("VK_LEFT");
    t[0x26] = Some("VK_UP");
    t[0x27] = Some("VK_RIGHT");
    t[0x28] = Some("VK_DOWN");
    t[0x29] = Some("VK_SELECT");
    t[0x2A] = Some("VK_PRINT");
    t[0x2B] = Some("VK_EXECUTE");
    t[0x2C] = Some("VK_SNAPSHOT");
    t[0x2D] = Some("VK_INSERT");
    t[0x2E] = Some("VK_DELETE");
    t[0x2F] = Some("VK_HELP");

    // ── Digit row (VK_0=0x30 … VK_9=0x39) ───────────────────────────────────
    t[0x30] = Some("VK_0");
    t[0x31] = Some("VK_1");
    t[0x32] = Some("VK_2");
    t[0x33] = Some("VK_3");
    t[0x34] = Some("VK_4");
    t[0x35] = Some("VK_5");
    t[0x36] = Some("VK_6");
    t[0x37] = Some("VK_7");
    t[0x38] = Some("VK_8");
    t[0x39] = Some("VK_9");

    // ── Alphabet keys (VK_A=0x41 … VK_Z=0x5A) ────────────────────────────────
    t[0x41] = Some("VK_A");
    t[0x42] = Some("VK_B");
    t[0x43] = Some("VK_C");
    t[0x44] = Some("VK_D");
    t[0x45] = Some("VK_E");
    t[0x46] = Some("VK_F");
    t[0x47] = Some("VK_G");
    t[0x48] = Some("VK_H");
    t[0x49] = Some("VK_I");
    t[0x4A] = Some("VK_J");
    t[0x4B] = Some("VK_K");
    t[0x4C] = Some("VK_L");
    t[0x4D] = Some("VK_M");
    t[0x4E] = Some("VK_N");
    t[0x4F] = Some("VK_O");
    t[0x50] = Some("VK_P");
    t[0x51] = Some("VK_Q");
    t[0x52] = Some("VK_R");
    t[0x53] = Some("VK_S");
    t[0x54] = Some("VK_T");
    t[0x55] = Some("VK_U");
    t[0x56] = Some("VK_V");
    t[0x57] = Some("VK_W");
    t[0x58] = Some("VK_X");
    t[0x59] = Some("VK_Y");
    t[0x5A] = Some("VK_Z");

    // ── Windows keys ──────────────────────────────────────────────────────────
    t[0x5B] = Some("VK_LWIN");
    t[0x5C] = Some("VK_RWIN");
    t[0x5D] = Some("VK_APPS");
    t[0x5F] = Some("VK_SLEEP");

    // ── Numpad (VK_NUMPAD0=0x60 … VK_NUMPAD9=0x69) ───────────────────────────
    t[0x60] = Some("VK_NUMPAD0");
    t[0x61] = Some("VK_NUMPAD1");
    t[0x62] = Some("VK_NUMPAD2");
    t[0x63] = Some("VK_NUMPAD3");
    t[0x64] = Some("VK_NUMPAD4");
    t[0x65] = Some("VK_NUMPAD5");
    t[0x66] = Some("VK_NUMPAD6");
    t[0x67] = Some("VK_NUMPAD7");
    t[0x68] = Some("VK_NUMPAD8");
    t[0x69] = Some("VK_NUMPAD9");
    t[0x6A] = Some("VK_MULTIPLY");
    t[0x6B] = Some("VK_ADD");
    t[0x6C] = Some("VK_SEPARATOR");
    t[0x6D] = Some("VK_SUBTRACT");
    t[0x6E] = Some("VK_DECIMAL");
    t[0x6F] = Some("VK_DIVIDE");

    // ── Function keys (VK_F1=0x70 … VK_F24=0x87) ─────────────────────────────
    t[0x70] = Some("VK_F1");
    t[0x71] = Some("VK_F2");
    t[0x72] = Some("VK_F3");
    t[0x73] = Some("VK_F4");
    t[0x74] = Some("VK_F5");
    t[0x75] = Some("VK_F6");
    t[0x76] = Some("VK_F7");
    t[0x77] = Some("VK_F8");
    t[0x78] = Some("VK_F9");
    t[0x79] = Some("VK_F10");
    t[0x7A] = Some("VK_F11");
    t[0x7B] = Some("VK_F12");
    t[0x7C] = Some("VK_F13");
    t[0x7D] = Some("VK_F14");
    t[0x7E] = Some("VK_F15");
    t[0x7F] = Some("VK_F16");
    t[0x80] = Some("VK_F17");
    t[0x81] = Some("VK_F18");
    t[0x82] = Some("VK_F19");
    t[0x83] = Some("VK_F20");
    t[0x84] = Some("VK_F21");
    t[0x85] = Some("VK_F22");
    t[0x86] = Some("VK_F23");
    t[0x87] = Some("VK_F24");

    // ── Locks ─────────────────────────────────────────────────────────────────
    t[0x90] = Some("VK_NUMLOCK");
    t[0x91] = Some("VK_SCROLL");

    // ── Left/right modifiers ──────────────────────────────────────────────────
    t[0xA0] = Some("VK_LSHIFT");
    t[0xA1] = Some("VK_RSHIFT");
    t[0xA2] = Some("VK_LCONTROL");
    t[0xA3] = Some("VK_RCONTROL");
    t[0xA4] = Some("VK_LMENU");
    t[0xA5] = Some("VK_RMENU");

    // ── Browser / media keys ──────────────────────────────────────────────────
    t[0xA6] = Some("VK_BROWSER_BACK");
    t[0xA7] = Some("VK_BROWSER_FORWARD");
    t[0xA8] = Some("VK_BROWSER_REFRESH");
    t[0xA9] = Some("VK_BROWSER_STOP");
    t[0xAA] = Some("VK_BROWSER_SEARCH");
    t[0xAB] = Some("VK_BROWSER_FAVORITES");
    t[0xAC] = Some("VK_BROWSER_HOME");
    t[0xAD] = Some("VK_VOLUME_MUTE");
    t[0xAE] = Some("VK_VOLUME_DOWN");
    t[0xAF] = Some("VK_VOLUME_UP");
    t[0xB0] = Some("VK_MEDIA_NEXT_TRACK");
    t[0xB1] = Some("VK_MEDIA_PREV_TRACK");
    t[0xB2] = Some("VK_MEDIA_STOP");
    t[0xB3] = Some("VK_MEDIA_PLAY_PAUSE");
    t[0xB4] = Some("VK_LAUNCH_MAIL");
    t[0xB5] = Some("VK_LAUNCH_MEDIA_SELECT");
    t[0xB6] = Some("VK_LAUNCH_APP1");
    t[0xB7] = Some("VK_LAUNCH_APP2");

    // ── Punctuation / symbols ─────────────────────────────────────────────────
    t[0xBA] = Some("VK_OEM_1");      // ; :
    t[0xBB] = Some("VK_OEM_PLUS");   // = +
    t[0xBC] = Some("VK_OEM_COMMA");  // , <
    t[0xBD] = Some("VK_OEM_MINUS");  // - _
    t[0xBE] = Some("VK_OEM_PERIOD"); // . >
    t[0xBF] = Some("VK_OEM_2");      // / ?
    t[0xC0] = Some("VK_OEM_3");      // ` ~
    t[0xDB] = Some("VK_OEM_4");      // [ {
    t[0xDC] = Some("VK_OEM_5");      // \ |
    t[0xDD] = Some("VK_OEM_6");      // ] }
    t[0xDE] = Some("VK_OEM_7");      // ' "
    t[0xDF] = Some("VK_OEM_8");
    t[0xE2] = Some("VK_OEM_102");

    // ── Misc ──────────────────────────────────────────────────────────────────
    t[0xE5] = Some("VK_PROCESSKEY");
    t[0xE7] = Some("VK_PACKET");
    t[0xF6] = Some("VK_ATTN");
    t[0xF7] = Some("VK_CRSEL");
    t[0xF8] = Some("VK_EXSEL");
    t[0xF9] = Some("VK_EREOF");
    t[0xFA] = Some("VK_PLAY");
    t[0xFB] = Some("VK_ZOOM");
    t[0xFC] = Some("VK_NONAME");
    t[0xFD] = Some("VK_PA1");
    t[0xFE] = Some("VK_OEM_CLEAR");

    t
};
