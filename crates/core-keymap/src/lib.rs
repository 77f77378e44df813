//! core-keymap: static key tables for command mode.
//!
//! Design principles:
//! - Pure and deterministic: every lookup depends only on the keycode and the
//!   shift state handed in by the caller.
//! - Three tables live here: the command alphabet (keycode -> char), the
//!   control chords checked before the alphabet, and the motions that may be
//!   held down directly when no command is being typed.
//! - No side effects: logging only at TRACE.

use core_events::KeyCode;
use tracing::trace;

// -------------------------------------------------------------------------------------------------
// Command alphabet
// -------------------------------------------------------------------------------------------------
const TABLE_LEN: usize = KeyCode::TRACKABLE_LAST.0 as usize + 1;

const fn ch(c: char) -> Option<char> {
    Some(c)
}

const NO: Option<char> = None;

#[rustfmt::skip]
static UNSHIFTED: [Option<char>; TABLE_LEN] = [
    NO, NO, NO, NO,
    // a .. z
    ch('a'), ch('b'), ch('c'), ch('d'), ch('e'), NO, ch('g'), ch('h'), ch('i'), ch('j'),
    ch('k'), ch('l'), NO, ch('n'), ch('o'), ch('p'), ch('q'), ch('r'), NO, NO,
    ch('u'), ch('v'), ch('w'), ch('x'), ch('y'), NO,
    // 1 .. 0
    ch('1'), ch('2'), ch('3'), ch('4'), ch('5'), ch('6'), ch('7'), ch('8'), ch('9'), ch('0'),
    // enter esc bspc tab space minus equal lbrc rbrc bsls
    ch('$'), ch('^'), NO, NO, ch(' '), NO, NO, NO, NO, ch('\\'),
    // nuhs scln quot grv comm dot slsh
    NO, ch(';'), NO, NO, NO, ch('.'), ch('/'),
];

#[rustfmt::skip]
static SHIFTED: [Option<char>; TABLE_LEN] = [
    NO, NO, NO, NO,
    // A .. Z
    ch('A'), NO, ch('C'), ch('D'), NO, NO, ch('G'), NO, ch('I'), NO,
    NO, NO, NO, NO, ch('O'), ch('P'), NO, NO, NO, NO,
    ch('U'), ch('V'), NO, ch('X'), NO, NO,
    // ! @ # $ % ^ & * ( )
    NO, NO, NO, ch('$'), NO, ch('^'), NO, NO, NO, NO,
    NO, NO, NO, NO, NO, NO, NO, NO, NO, ch('|'),
    NO, ch(':'), NO, NO, NO, NO, NO,
];

/// Map a keycode to the command-mode character it stands for, or `None` when
/// the key is not part of the command alphabet.
///
/// The dedicated `$` and `^` keys map unconditionally; everything else goes
/// through the shifted or unshifted table.
pub fn translate(code: KeyCode, shift_held: bool) -> Option<char> {
    let out = match code {
        KeyCode::DOLLAR => Some('$'),
        KeyCode::CIRCUMFLEX => Some('^'),
        _ if code < KeyCode::TRACKABLE_FIRST || code > KeyCode::TRACKABLE_LAST => None,
        _ if shift_held => SHIFTED[code.0 as usize],
        _ => UNSHIFTED[code.0 as usize],
    };
    trace!(target: "vim.keymap", %code, shift_held, ch = ?out, "translate");
    out
}

// -------------------------------------------------------------------------------------------------
// Control chords
// -------------------------------------------------------------------------------------------------
/// Actions bound to a letter pressed while Control is held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChordAction {
    /// `<C-r>`
    Redo,
    /// `<C-d>`
    PageDown,
    /// `<C-u>`
    PageUp,
}

pub fn ctrl_chord(code: KeyCode) -> Option<ChordAction> {
    match code {
        KeyCode::R => Some(ChordAction::Redo),
        KeyCode::D => Some(ChordAction::PageDown),
        KeyCode::U => Some(ChordAction::PageUp),
        _ => None,
    }
}

// -------------------------------------------------------------------------------------------------
// Held motions
// -------------------------------------------------------------------------------------------------
/// A motion key that, on an empty command buffer, holds the host arrow key
/// for as long as the physical key is down (so host auto-repeat applies).
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldMotionSpec {
    pub arrow: KeyCode,
    /// Word motion: Control is held along with the arrow.
    pub word: bool,
    /// Tap Ctrl+Right once more on release (`w` lands on the next word start).
    pub trailing_word_tap: bool,
}

pub fn held_motion(code: KeyCode) -> Option<HeldMotionSpec> {
    let spec = |arrow, word, trailing_word_tap| HeldMotionSpec {
        arrow,
        word,
        trailing_word_tap,
    };
    match code {
        KeyCode::H => Some(spec(KeyCode::LEFT, false, false)),
        KeyCode::J => Some(spec(KeyCode::DOWN, false, false)),
        KeyCode::K => Some(spec(KeyCode::UP, false, false)),
        KeyCode::L => Some(spec(KeyCode::RIGHT, false, false)),
        KeyCode::W => Some(spec(KeyCode::RIGHT, true, true)),
        KeyCode::E => Some(spec(KeyCode::RIGHT, true, false)),
        KeyCode::B => Some(spec(KeyCode::LEFT, true, false)),
        _ => None,
    }
}

// -------------------------------------------------------------------------------------------------
// Tests
// -------------------------------------------------------------------------------------------------
#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn alphabet(shift: bool) -> String {
        (KeyCode::TRACKABLE_FIRST.0..=KeyCode::TRACKABLE_LAST.0)
            .filter_map(|c| translate(KeyCode(c), shift))
            .collect()
    }

    #[test]
    fn unshifted_alphabet() {
        assert_eq!(alphabet(false), "abcdeghijklnopqruvwxy1234567890$^ \\;./");
    }

    #[test]
    fn shifted_alphabet() {
        assert_eq!(alphabet(true), "ACDGIOPUVX$^|:");
    }

    #[test]
    fn letters_and_digits() {
        assert_eq!(translate(KeyCode::D, false), Some('d'));
        assert_eq!(translate(KeyCode::D, true), Some('D'));
        assert_eq!(translate(KeyCode::N0, false), Some('0'));
        assert_eq!(translate(KeyCode::N4, true), Some('$'));
        assert_eq!(translate(KeyCode::N4, false), Some('4'));
        assert_eq!(translate(KeyCode::SEMICOLON, false), Some(';'));
    }

    #[test]
    fn keys_outside_alphabet_yield_none() {
        assert_eq!(translate(KeyCode::F, false), None);
        assert_eq!(translate(KeyCode::Z, true), None);
        assert_eq!(translate(KeyCode::COMMA, false), None);
    }

    #[test]
    fn out_of_range_yields_none_for_both_shift_states() {
        for code in [
            KeyCode::NO,
            KeyCode(0x03),
            KeyCode(0x39),
            KeyCode::LEFT,
            KeyCode::LSHIFT,
            KeyCode::VIM_ESC,
            KeyCode::TO_BASE,
        ] {
            assert_eq!(translate(code, false), None, "{code} unshifted");
            assert_eq!(translate(code, true), None, "{code} shifted");
        }
    }

    #[test]
    fn dedicated_dollar_and_caret_ignore_shift() {
        for shift in [false, true] {
            assert_eq!(translate(KeyCode::DOLLAR, shift), Some('$'));
            assert_eq!(translate(KeyCode::CIRCUMFLEX, shift), Some('^'));
        }
    }

    #[test]
    fn ctrl_chords() {
        assert_eq!(ctrl_chord(KeyCode::R), Some(ChordAction::Redo));
        assert_eq!(ctrl_chord(KeyCode::D), Some(ChordAction::PageDown));
        assert_eq!(ctrl_chord(KeyCode::U), Some(ChordAction::PageUp));
        assert_eq!(ctrl_chord(KeyCode::C), None);
    }

    #[test]
    fn held_motion_table() {
        let w = held_motion(KeyCode::W).unwrap();
        assert_eq!(w.arrow, KeyCode::RIGHT);
        assert!(w.word && w.trailing_word_tap);
        let e = held_motion(KeyCode::E).unwrap();
        assert!(e.word && !e.trailing_word_tap);
        assert_eq!(held_motion(KeyCode::J).unwrap().arrow, KeyCode::DOWN);
        assert!(!held_motion(KeyCode::H).unwrap().word);
        assert_eq!(held_motion(KeyCode::X), None);
    }
}
