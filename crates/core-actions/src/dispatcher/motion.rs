//! Cursor motions.
//!
//! A bare motion taps the matching host navigation key `count` times, with
//! Shift held while a visual selection is active so the host extends it.
//! Behind an operator the motion becomes "select, then act": Shift (and Ctrl
//! for word motions) is held over the movement and the operator is applied to
//! the resulting host selection.

use super::operator::apply_to_selection;
use super::{DispatchResult, Interpreter, ParsedCommand};
use crate::{HostKeyboard, KeystrokeEmitter};
use core_events::{KeyCode, KeyModifiers};

pub(crate) fn handle_arrow<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    let arrow = match cmd.last {
        'h' => KeyCode::LEFT,
        'j' => KeyCode::DOWN,
        'k' => KeyCode::UP,
        _ => KeyCode::RIGHT,
    };
    let n = cmd.repeat();
    match cmd.operator() {
        Some(op) => {
            it.host.mod_tap_n(KeyModifiers::LSHIFT, arrow, n);
            apply_to_selection(it, op, &[KeyCode::LEFT, KeyCode::RIGHT]);
        }
        None => {
            let visual = it.state.visual;
            it.host.shifted_if(visual, |h| h.tap_n(arrow, n));
        }
    }
    DispatchResult::complete()
}

/// `w`/`e` (word right) and `b` (word left).
pub(crate) fn handle_word<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    let (arrow, collapse) = if cmd.last == 'b' {
        (KeyCode::LEFT, [KeyCode::RIGHT, KeyCode::LEFT])
    } else {
        (KeyCode::RIGHT, [KeyCode::LEFT, KeyCode::RIGHT])
    };
    let n = cmd.repeat();
    match cmd.operator() {
        Some(op) => {
            it.host
                .mod_tap_n(KeyModifiers::LCTRL | KeyModifiers::LSHIFT, arrow, n);
            apply_to_selection(it, op, &collapse);
        }
        None => {
            let visual = it.state.visual;
            it.host
                .shifted_if(visual, |h| h.mod_tap_n(KeyModifiers::LCTRL, arrow, n));
        }
    }
    DispatchResult::complete()
}

/// `0` / `^`: line start, only as the sole buffered character. A `0` after
/// other characters is part of a count (or an unsupported `d0`) and stays
/// pending.
pub(crate) fn handle_line_start<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    if cmd.len != 1 {
        return DispatchResult::pending();
    }
    let visual = it.state.visual;
    it.host.shifted_if(visual, |h| h.tap(KeyCode::HOME));
    DispatchResult::complete()
}
