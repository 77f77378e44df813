//! Single-shot edits and host shortcuts.

use super::{DispatchResult, Interpreter, ParsedCommand};
use crate::{HostKeyboard, KeystrokeEmitter};
use core_events::{KeyCode, KeyModifiers};
use core_state::Mode;

/// `x` / `X`: delete forward / backward. An active selection is deleted once,
/// whatever the count.
pub(crate) fn handle_delete_char<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    let key = if cmd.last == 'X' {
        KeyCode::BACKSPACE
    } else {
        KeyCode::DELETE
    };
    let n = if it.state.visual {
        it.state.visual = false;
        1
    } else {
        cmd.repeat()
    };
    it.host.tap_n(key, n);
    DispatchResult::complete()
}

/// Commands that map straight onto a host shortcut.
pub(crate) fn handle_shortcut<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    let host = &mut *it.host;
    match cmd.last {
        'u' => host.mod_tap(KeyModifiers::LCTRL, KeyCode::Z),
        'p' => host.mod_tap(KeyModifiers::LCTRL, KeyCode::V),
        'n' => host.mod_tap(KeyModifiers::LCTRL, KeyCode::G),
        // Linewise paste: the host cannot tell register kinds apart, so `\`
        // opens a fresh line at the document end and pastes there.
        '\\' => {
            host.mod_tap(KeyModifiers::LCTRL, KeyCode::END);
            host.tap(KeyCode::ENTER);
            host.mod_tap(KeyModifiers::LCTRL, KeyCode::V);
        }
        _ => return DispatchResult::pending(),
    }
    DispatchResult::complete()
}

/// `r`: delete the character under the cursor and let the next physical key
/// through verbatim.
pub(crate) fn handle_replace<H: HostKeyboard>(it: &mut Interpreter<'_, H>) -> DispatchResult {
    it.host.tap(KeyCode::DELETE);
    it.state.buffer.clear();
    it.state.visual = false;
    it.state.set_mode(Mode::ReplaceInit);
    DispatchResult::complete()
}
