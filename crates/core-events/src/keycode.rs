//! HID keycode vocabulary shared by every layer of the engine.
//!
//! Values follow the USB HID keyboard usage page (the same numbering the
//! firmware keymap uses), extended with a handful of firmware-level codes:
//! shifted symbols encoded as `0x0200 | base`, the `TO(base layer)` key, and a
//! user range for keys that only exist for the command layer (`VIM_ESC`,
//! `VIM_NUM`).

use std::fmt;
use std::str::FromStr;

use crate::KeyModifiers;

/// Raw firmware keycode.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct KeyCode(pub u16);

/// Failure to resolve a textual key name (simulator scripts, config).
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ParseKeyError {
    #[error("empty key name")]
    Empty,
    #[error("unknown key name `{0}`")]
    Unknown(String),
}

const SHIFTED_FLAG: u16 = 0x0200;
const USER_RANGE: u16 = 0x7E00;

impl KeyCode {
    pub const NO: KeyCode = KeyCode(0x00);

    pub const A: KeyCode = KeyCode(0x04);
    pub const B: KeyCode = KeyCode(0x05);
    pub const C: KeyCode = KeyCode(0x06);
    pub const D: KeyCode = KeyCode(0x07);
    pub const E: KeyCode = KeyCode(0x08);
    pub const F: KeyCode = KeyCode(0x09);
    pub const G: KeyCode = KeyCode(0x0A);
    pub const H: KeyCode = KeyCode(0x0B);
    pub const I: KeyCode = KeyCode(0x0C);
    pub const J: KeyCode = KeyCode(0x0D);
    pub const K: KeyCode = KeyCode(0x0E);
    pub const L: KeyCode = KeyCode(0x0F);
    pub const M: KeyCode = KeyCode(0x10);
    pub const N: KeyCode = KeyCode(0x11);
    pub const O: KeyCode = KeyCode(0x12);
    pub const P: KeyCode = KeyCode(0x13);
    pub const Q: KeyCode = KeyCode(0x14);
    pub const R: KeyCode = KeyCode(0x15);
    pub const S: KeyCode = KeyCode(0x16);
    pub const T: KeyCode = KeyCode(0x17);
    pub const U: KeyCode = KeyCode(0x18);
    pub const V: KeyCode = KeyCode(0x19);
    pub const W: KeyCode = KeyCode(0x1A);
    pub const X: KeyCode = KeyCode(0x1B);
    pub const Y: KeyCode = KeyCode(0x1C);
    pub const Z: KeyCode = KeyCode(0x1D);

    pub const N1: KeyCode = KeyCode(0x1E);
    pub const N2: KeyCode = KeyCode(0x1F);
    pub const N3: KeyCode = KeyCode(0x20);
    pub const N4: KeyCode = KeyCode(0x21);
    pub const N5: KeyCode = KeyCode(0x22);
    pub const N6: KeyCode = KeyCode(0x23);
    pub const N7: KeyCode = KeyCode(0x24);
    pub const N8: KeyCode = KeyCode(0x25);
    pub const N9: KeyCode = KeyCode(0x26);
    pub const N0: KeyCode = KeyCode(0x27);

    pub const ENTER: KeyCode = KeyCode(0x28);
    pub const ESCAPE: KeyCode = KeyCode(0x29);
    pub const BACKSPACE: KeyCode = KeyCode(0x2A);
    pub const TAB: KeyCode = KeyCode(0x2B);
    pub const SPACE: KeyCode = KeyCode(0x2C);
    pub const MINUS: KeyCode = KeyCode(0x2D);
    pub const EQUAL: KeyCode = KeyCode(0x2E);
    pub const LEFT_BRACKET: KeyCode = KeyCode(0x2F);
    pub const RIGHT_BRACKET: KeyCode = KeyCode(0x30);
    pub const BACKSLASH: KeyCode = KeyCode(0x31);
    pub const NONUS_HASH: KeyCode = KeyCode(0x32);
    pub const SEMICOLON: KeyCode = KeyCode(0x33);
    pub const QUOTE: KeyCode = KeyCode(0x34);
    pub const GRAVE: KeyCode = KeyCode(0x35);
    pub const COMMA: KeyCode = KeyCode(0x36);
    pub const DOT: KeyCode = KeyCode(0x37);
    pub const SLASH: KeyCode = KeyCode(0x38);

    pub const HOME: KeyCode = KeyCode(0x4A);
    pub const PAGE_UP: KeyCode = KeyCode(0x4B);
    pub const DELETE: KeyCode = KeyCode(0x4C);
    pub const END: KeyCode = KeyCode(0x4D);
    pub const PAGE_DOWN: KeyCode = KeyCode(0x4E);
    pub const RIGHT: KeyCode = KeyCode(0x4F);
    pub const LEFT: KeyCode = KeyCode(0x50);
    pub const DOWN: KeyCode = KeyCode(0x51);
    pub const UP: KeyCode = KeyCode(0x52);

    pub const LCTRL: KeyCode = KeyCode(0xE0);
    pub const LSHIFT: KeyCode = KeyCode(0xE1);
    pub const LALT: KeyCode = KeyCode(0xE2);
    pub const LGUI: KeyCode = KeyCode(0xE3);
    pub const RCTRL: KeyCode = KeyCode(0xE4);
    pub const RSHIFT: KeyCode = KeyCode(0xE5);
    pub const RALT: KeyCode = KeyCode(0xE6);
    pub const RGUI: KeyCode = KeyCode(0xE7);

    /// `$` as a dedicated key (shift + 4).
    pub const DOLLAR: KeyCode = KeyCode(SHIFTED_FLAG | 0x21);
    /// `^` as a dedicated key (shift + 6).
    pub const CIRCUMFLEX: KeyCode = KeyCode(SHIFTED_FLAG | 0x23);

    /// Jump back to the base layer (`TO(0)` in the keymap).
    pub const TO_BASE: KeyCode = KeyCode(0x5010);
    /// Momentary number layer while in command mode.
    pub const VIM_NUM: KeyCode = KeyCode(USER_RANGE | 0x01);
    /// Leave insert mode and (re)enter command mode.
    pub const VIM_ESC: KeyCode = KeyCode(USER_RANGE | 0x02);

    /// Inclusive bounds of the printable block the command alphabet and the
    /// insertion recorder operate on.
    pub const TRACKABLE_FIRST: KeyCode = KeyCode::A;
    pub const TRACKABLE_LAST: KeyCode = KeyCode::SLASH;

    /// Keys whose taps can be recorded and replayed verbatim.
    pub fn is_trackable(self) -> bool {
        (Self::TRACKABLE_FIRST..=Self::TRACKABLE_LAST).contains(&self)
    }

    pub fn is_modifier(self) -> bool {
        self.modifier_bit().is_some()
    }

    /// Modifier bit driven by this key, if it is one of the eight modifier keys.
    pub fn modifier_bit(self) -> Option<KeyModifiers> {
        match self {
            Self::LCTRL => Some(KeyModifiers::LCTRL),
            Self::LSHIFT => Some(KeyModifiers::LSHIFT),
            Self::LALT => Some(KeyModifiers::LALT),
            Self::LGUI => Some(KeyModifiers::LGUI),
            Self::RCTRL => Some(KeyModifiers::RCTRL),
            Self::RSHIFT => Some(KeyModifiers::RSHIFT),
            Self::RALT => Some(KeyModifiers::RALT),
            Self::RGUI => Some(KeyModifiers::RGUI),
            _ => None,
        }
    }

    /// Key (and shift state) a US layout uses to produce `ch`. Used by the
    /// simulator to expand `type` script lines into key events.
    pub fn for_char(ch: char) -> Option<(KeyCode, bool)> {
        if ch.is_ascii_lowercase() {
            return Some((KeyCode(Self::A.0 + (ch as u16 - 'a' as u16)), false));
        }
        if ch.is_ascii_uppercase() {
            return Some((KeyCode(Self::A.0 + (ch as u16 - 'A' as u16)), true));
        }
        if ch == '0' {
            return Some((Self::N0, false));
        }
        if let Some(d) = ch.to_digit(10) {
            return Some((KeyCode(Self::N1.0 + d as u16 - 1), false));
        }
        let mapped = match ch {
            ' ' => (Self::SPACE, false),
            '\n' => (Self::ENTER, false),
            '\t' => (Self::TAB, false),
            '-' => (Self::MINUS, false),
            '=' => (Self::EQUAL, false),
            '[' => (Self::LEFT_BRACKET, false),
            ']' => (Self::RIGHT_BRACKET, false),
            '\\' => (Self::BACKSLASH, false),
            ';' => (Self::SEMICOLON, false),
            '\'' => (Self::QUOTE, false),
            '`' => (Self::GRAVE, false),
            ',' => (Self::COMMA, false),
            '.' => (Self::DOT, false),
            '/' => (Self::SLASH, false),
            '!' => (Self::N1, true),
            '@' => (Self::N2, true),
            '#' => (Self::N3, true),
            '$' => (Self::N4, true),
            '%' => (Self::N5, true),
            '^' => (Self::N6, true),
            '&' => (Self::N7, true),
            '*' => (Self::N8, true),
            '(' => (Self::N9, true),
            ')' => (Self::N0, true),
            '_' => (Self::MINUS, true),
            '+' => (Self::EQUAL, true),
            '{' => (Self::LEFT_BRACKET, true),
            '}' => (Self::RIGHT_BRACKET, true),
            '|' => (Self::BACKSLASH, true),
            ':' => (Self::SEMICOLON, true),
            '"' => (Self::QUOTE, true),
            '~' => (Self::GRAVE, true),
            '<' => (Self::COMMA, true),
            '>' => (Self::DOT, true),
            '?' => (Self::SLASH, true),
            _ => return None,
        };
        Some(mapped)
    }

    fn named(self) -> Option<&'static str> {
        NAMES
            .iter()
            .find(|(_, code)| *code == self)
            .map(|(name, _)| *name)
    }
}

// Names accepted by `FromStr` (case-insensitive) and used by `Display`.
// Single letters and digits are handled separately.
const NAMES: &[(&str, KeyCode)] = &[
    ("enter", KeyCode::ENTER),
    ("esc", KeyCode::ESCAPE),
    ("bspc", KeyCode::BACKSPACE),
    ("tab", KeyCode::TAB),
    ("space", KeyCode::SPACE),
    ("minus", KeyCode::MINUS),
    ("equal", KeyCode::EQUAL),
    ("lbrc", KeyCode::LEFT_BRACKET),
    ("rbrc", KeyCode::RIGHT_BRACKET),
    ("bsls", KeyCode::BACKSLASH),
    ("nuhs", KeyCode::NONUS_HASH),
    ("scln", KeyCode::SEMICOLON),
    ("quot", KeyCode::QUOTE),
    ("grv", KeyCode::GRAVE),
    ("comm", KeyCode::COMMA),
    ("dot", KeyCode::DOT),
    ("slsh", KeyCode::SLASH),
    ("home", KeyCode::HOME),
    ("pgup", KeyCode::PAGE_UP),
    ("del", KeyCode::DELETE),
    ("end", KeyCode::END),
    ("pgdn", KeyCode::PAGE_DOWN),
    ("right", KeyCode::RIGHT),
    ("left", KeyCode::LEFT),
    ("down", KeyCode::DOWN),
    ("up", KeyCode::UP),
    ("lctrl", KeyCode::LCTRL),
    ("lshift", KeyCode::LSHIFT),
    ("lalt", KeyCode::LALT),
    ("lgui", KeyCode::LGUI),
    ("rctrl", KeyCode::RCTRL),
    ("rshift", KeyCode::RSHIFT),
    ("ralt", KeyCode::RALT),
    ("rgui", KeyCode::RGUI),
    ("dlr", KeyCode::DOLLAR),
    ("circ", KeyCode::CIRCUMFLEX),
    ("to_base", KeyCode::TO_BASE),
    ("vim_num", KeyCode::VIM_NUM),
    ("vim_esc", KeyCode::VIM_ESC),
];

impl FromStr for KeyCode {
    type Err = ParseKeyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.is_empty() {
            return Err(ParseKeyError::Empty);
        }
        let mut chars = s.chars();
        if let (Some(ch), None) = (chars.next(), chars.next())
            && ch.is_ascii_alphanumeric()
            && let Some((code, _)) = KeyCode::for_char(ch.to_ascii_lowercase())
        {
            return Ok(code);
        }
        let lower = s.to_ascii_lowercase();
        NAMES
            .iter()
            .find(|(name, _)| *name == lower)
            .map(|(_, code)| *code)
            .ok_or_else(|| ParseKeyError::Unknown(s.to_string()))
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if (Self::A..=Self::Z).contains(self) {
            let ch = (b'a' + (self.0 - Self::A.0) as u8) as char;
            return write!(f, "{ch}");
        }
        if (Self::N1..=Self::N9).contains(self) {
            return write!(f, "{}", self.0 - Self::N1.0 + 1);
        }
        if *self == Self::N0 {
            return f.write_str("0");
        }
        match self.named() {
            Some(name) => f.write_str(name),
            None => write!(f, "0x{:04x}", self.0),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn trackable_block_is_letters_through_slash() {
        assert!(KeyCode::A.is_trackable());
        assert!(KeyCode::N3.is_trackable());
        assert!(KeyCode::ENTER.is_trackable());
        assert!(KeyCode::SLASH.is_trackable());
        assert!(!KeyCode::NO.is_trackable());
        assert!(!KeyCode::LEFT.is_trackable());
        assert!(!KeyCode::LSHIFT.is_trackable());
        assert!(!KeyCode::VIM_ESC.is_trackable());
    }

    #[test]
    fn modifier_keys_map_to_their_bit() {
        assert_eq!(KeyCode::RSHIFT.modifier_bit(), Some(KeyModifiers::RSHIFT));
        assert_eq!(KeyCode::LGUI.modifier_bit(), Some(KeyModifiers::LGUI));
        assert_eq!(KeyCode::A.modifier_bit(), None);
    }

    #[test]
    fn for_char_covers_shifted_symbols() {
        assert_eq!(KeyCode::for_char('q'), Some((KeyCode::Q, false)));
        assert_eq!(KeyCode::for_char('Q'), Some((KeyCode::Q, true)));
        assert_eq!(KeyCode::for_char('0'), Some((KeyCode::N0, false)));
        assert_eq!(KeyCode::for_char('7'), Some((KeyCode::N7, false)));
        assert_eq!(KeyCode::for_char(':'), Some((KeyCode::SEMICOLON, true)));
        assert_eq!(KeyCode::for_char('é'), None);
    }

    #[test]
    fn parse_names_case_insensitive() {
        assert_eq!("a".parse::<KeyCode>(), Ok(KeyCode::A));
        assert_eq!("Z".parse::<KeyCode>(), Ok(KeyCode::Z));
        assert_eq!("9".parse::<KeyCode>(), Ok(KeyCode::N9));
        assert_eq!("VIM_ESC".parse::<KeyCode>(), Ok(KeyCode::VIM_ESC));
        assert_eq!(" lshift ".parse::<KeyCode>(), Ok(KeyCode::LSHIFT));
        assert_eq!("".parse::<KeyCode>(), Err(ParseKeyError::Empty));
        assert_eq!(
            "hyper".parse::<KeyCode>(),
            Err(ParseKeyError::Unknown("hyper".into()))
        );
    }

    #[test]
    fn display_round_trips_through_parse() {
        for code in [KeyCode::A, KeyCode::N0, KeyCode::N5, KeyCode::DELETE, KeyCode::VIM_NUM] {
            assert_eq!(code.to_string().parse::<KeyCode>(), Ok(code));
        }
        assert_eq!(KeyCode(0x1234).to_string(), "0x1234");
    }
}
