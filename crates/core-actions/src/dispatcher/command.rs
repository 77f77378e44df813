//! Ex-style commands typed as `;` + letter (the layout's stand-in for `:`).

use super::{DispatchResult, Interpreter, ParsedCommand};
use crate::{HostKeyboard, KeystrokeEmitter};
use core_events::{KeyCode, KeyModifiers};
use tracing::debug;

/// `;w` saves, `;q` quits. Any count other than one, or a `q` without the `;`
/// prefix, is swallowed without effect.
pub(crate) fn handle_ex<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    if !cmd.ex_prefix || cmd.repeat() != 1 {
        debug!(target: "vim.dispatch", cmd = %cmd.last, count = cmd.count, "ex_command_ignored");
        return DispatchResult::complete();
    }
    let key = if cmd.last == 'w' {
        KeyCode::S
    } else {
        KeyCode::Q
    };
    it.host.mod_tap(KeyModifiers::LCTRL, key);
    DispatchResult::complete()
}
