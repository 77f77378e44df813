//! Mode transitions driven by commands: insert entry, visual toggle and the
//! `.` repeat.
//!
//! Insert entry is shared by every insert-entering command. Outside a repeat
//! it snapshots the pending command (so `.` can run it again) and starts a
//! fresh insertion recording. During a repeat it replays the recorded
//! insertion instead and drops back to command mode.

use super::{DispatchResult, Interpreter, ParsedCommand};
use crate::{HostKeyboard, KeystrokeEmitter};
use core_events::{KeyCode, KeyModifiers};
use core_state::Mode;
use tracing::debug;

pub(crate) fn enter_insert<H: HostKeyboard>(it: &mut Interpreter<'_, H>) {
    if it.state.mode == Mode::Repeat {
        debug!(target: "vim.repeat", keys = it.state.log.len(), "replay_insertion");
        for key in it.state.log.iter() {
            let mods = if key.shifted {
                KeyModifiers::LSHIFT
            } else {
                KeyModifiers::empty()
            };
            it.host.with_mods(mods, |h| h.tap(key.code));
        }
        it.state.set_mode(Mode::Command);
        return;
    }
    it.state.begin_capture();
    it.host.request_layer(it.config.layers().insert);
}

pub(crate) fn handle_insert_entry<H: HostKeyboard>(
    it: &mut Interpreter<'_, H>,
    cmd: &ParsedCommand,
) -> DispatchResult {
    let host = &mut *it.host;
    match cmd.last {
        'a' => host.tap(KeyCode::RIGHT),
        '/' => host.mod_tap(KeyModifiers::LCTRL, KeyCode::F),
        'o' => {
            host.tap(KeyCode::END);
            host.tap(KeyCode::ENTER);
        }
        'O' => {
            host.tap(KeyCode::UP);
            host.tap(KeyCode::END);
            host.tap(KeyCode::ENTER);
        }
        'I' => host.tap(KeyCode::HOME),
        'A' => host.tap(KeyCode::END),
        _ => {}
    }
    enter_insert(it);
    DispatchResult::complete()
}

pub(crate) fn handle_visual_toggle<H: HostKeyboard>(it: &mut Interpreter<'_, H>) -> DispatchResult {
    if it.state.visual {
        it.state.visual = false;
        // Collapse the host selection.
        it.host.tap(KeyCode::RIGHT);
        it.host.tap(KeyCode::LEFT);
    } else {
        it.state.visual = true;
    }
    DispatchResult::complete()
}

/// `.`: run the saved command again with the mode forced to `Repeat`, which
/// turns its insert entry into a replay of the recorded insertion.
///
/// The recorded insertion is replayed as-is even if it belongs to an older
/// change than the saved command.
pub(crate) fn handle_repeat<H: HostKeyboard>(it: &mut Interpreter<'_, H>) -> DispatchResult {
    if it.state.saved.is_empty() || it.state.mode == Mode::Repeat {
        return DispatchResult::complete();
    }
    debug!(target: "vim.repeat", saved = %it.state.saved, "repeat_begin");
    it.state.set_mode(Mode::Repeat);
    it.state.buffer.copy_from(&it.state.saved);
    it.run();
    it.state.buffer.clear();
    if it.state.mode == Mode::Repeat {
        it.state.set_mode(Mode::Command);
    }
    DispatchResult::complete()
}
