//! Operators (`d c y`) and the targets they compose with beyond plain motions.
//!
//! The host has no notion of an operator, so every operator is expressed as a
//! shift-selection followed by an action on the selection:
//! * delete: `Del`
//! * change: `Del`, then enter insert
//! * yank: `Ctrl+C`, then arrow taps that collapse the selection without
//!   moving the text cursor past where vim would leave it.

use super::mode::enter_insert;
use super::{DispatchResult, Interpreter, Operator, ParsedCommand};
use crate::{HostKeyboard, KeystrokeEmitter};
use core_events::{KeyCode, KeyModifiers};
use tracing::trace;

/// Act on the host's current selection. `collapse` is tapped after a yank.
pub(crate) fn apply_to_selection<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    op: Operator,
    collapse: &[KeyCode],
) {
    trace!(target: "vim.dispatch", ?op, "apply_operator");
    match op {
        Operator::Yank => {
            it.host.mod_tap(KeyModifiers::LCTRL, KeyCode::C);
            for &code in collapse {
                it.host.tap(code);
            }
        }
        Operator::Delete => it.host.tap(KeyCode::DELETE),
        Operator::Change => {
            it.host.tap(KeyCode::DELETE);
            enter_insert(it);
        }
    }
}

/// Select `lines` whole lines starting at the cursor line.
fn select_lines<H: HostKeyboard>(host: &mut H, lines: u32) {
    host.tap(KeyCode::HOME);
    host.with_mods(KeyModifiers::LSHIFT, |h| {
        h.tap_n(KeyCode::DOWN, lines.saturating_sub(1));
        h.tap(KeyCode::END);
    });
}

/// The operator keys themselves: doubled forms (`dd cc yy`) act on whole
/// lines, a single key acts on an active visual selection, and otherwise the
/// operator waits for its motion.
pub(crate) fn handle_operator_key<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    let Some(op) = Operator::from_char(cmd.last) else {
        return DispatchResult::pending();
    };
    if cmd.prev == Some(cmd.last) {
        select_lines(it.host, cmd.repeat());
        apply_to_selection(it, op, &[KeyCode::RIGHT, KeyCode::LEFT]);
        return DispatchResult::complete();
    }
    if !it.state.visual {
        return DispatchResult::pending();
    }
    match op {
        // A yank consumes the selection whatever precedes it.
        Operator::Yank => {
            it.state.visual = false;
            apply_to_selection(it, op, &[KeyCode::LEFT]);
            DispatchResult::complete()
        }
        Operator::Delete | Operator::Change if cmd.prev.is_none() => {
            it.state.visual = false;
            apply_to_selection(it, op, &[]);
            DispatchResult::complete()
        }
        _ => DispatchResult::pending(),
    }
}

/// `$`: line end, or select to line end under an operator.
pub(crate) fn handle_line_end<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    match cmd.operator() {
        Some(op) => {
            it.host.mod_tap(KeyModifiers::LSHIFT, KeyCode::END);
            apply_to_selection(it, op, &[KeyCode::LEFT, KeyCode::RIGHT, KeyCode::LEFT]);
            if op == Operator::Yank {
                it.state.visual = false;
            }
        }
        None => {
            let visual = it.state.visual;
            it.host.shifted_if(visual, |h| h.tap(KeyCode::END));
        }
    }
    DispatchResult::complete()
}

/// `D` / `C`: delete to line end (then insert for `C`).
pub(crate) fn handle_rest_of_line<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    let op = if cmd.last == 'C' {
        Operator::Change
    } else {
        Operator::Delete
    };
    it.host.mod_tap(KeyModifiers::LSHIFT, KeyCode::END);
    apply_to_selection(it, op, &[]);
    DispatchResult::complete()
}

/// `G`: document end.
pub(crate) fn handle_document_end<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    jump(it, cmd.operator(), KeyCode::END, &[KeyCode::LEFT, KeyCode::RIGHT]);
    DispatchResult::complete()
}

/// `gg`: document start. The operator, if any, sits in front of the first `g`.
/// A single `g` waits for its pair.
pub(crate) fn handle_document_start<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    if cmd.prev != Some('g') {
        return DispatchResult::pending();
    }
    let op = cmd.second_prev.and_then(Operator::from_char);
    jump(it, op, KeyCode::HOME, &[KeyCode::RIGHT, KeyCode::LEFT]);
    DispatchResult::complete()
}

fn jump<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    op: Option<Operator>,
    target: KeyCode,
    collapse: &[KeyCode],
) {
    match op {
        Some(op) => {
            it.host
                .mod_tap(KeyModifiers::LCTRL | KeyModifiers::LSHIFT, target);
            apply_to_selection(it, op, collapse);
        }
        None => {
            let visual = it.state.visual;
            it.host
                .shifted_if(visual, |h| h.mod_tap(KeyModifiers::LCTRL, target));
        }
    }
}
