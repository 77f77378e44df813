//! Command interpreter: turns the buffered command into host keystrokes.
//!
//! The interpreter re-parses the whole command buffer after every appended
//! character and dispatches on the final character. Each command family lives
//! in its own sub-module:
//! * `motion`   - cursor motions (`h j k l w e b 0 ^`)
//! * `operator` - operator keys and operator-composable targets (`d c y $ G g D C`)
//! * `edit`     - single-shot edits (`x X u p n \ r`)
//! * `mode`     - insert entry, visual toggle, `.` repeat
//! * `command`  - ex-style commands (`;w`, `;q`)
//!
//! A handler reports whether the command is complete. Complete commands clear
//! the buffer; pending ones leave it intact so the next keystroke can extend
//! it (`d` waiting for its motion).
//!
//! Held Shift keys are released for the duration of a pass so synthesized
//! keystrokes are never accidentally shifted, then restored.

use crate::HostKeyboard;
use core_config::Config;
use core_state::VimState;
use tracing::debug;

mod command;
mod command_parser;
mod edit;
mod mode;
mod motion;
mod operator;

pub use command_parser::{Operator, ParsedCommand};

/// Result of interpreting the command buffer once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatchResult {
    /// The buffered command was recognized and executed.
    pub complete: bool,
}

impl DispatchResult {
    pub fn complete() -> Self {
        Self { complete: true }
    }
    pub fn pending() -> Self {
        Self { complete: false }
    }
}

/// One interpretation pass over borrowed engine state.
pub struct Interpreter<'a, H: HostKeyboard> {
    pub(crate) state: &'a mut VimState,
    pub(crate) host: &'a mut H,
    pub(crate) config: &'a Config,
}

impl<'a, H: HostKeyboard> Interpreter<'a, H> {
    pub fn new(state: &'a mut VimState, host: &'a mut H, config: &'a Config) -> Self {
        Self {
            state,
            host,
            config,
        }
    }

    /// Interpret the current buffer. Clears it when the command completes.
    pub fn run(&mut self) -> DispatchResult {
        let Some(cmd) = ParsedCommand::parse(&self.state.buffer, self.config.buffers().max_count)
        else {
            return DispatchResult::pending();
        };

        let shift = self.host.modifiers() & core_events::KeyModifiers::SHIFT;
        if !shift.is_empty() {
            self.host.release_mods(shift);
        }

        let result = self.dispatch(&cmd);
        debug!(
            target: "vim.dispatch",
            buffer = %self.state.buffer,
            cmd = %cmd.last,
            count = cmd.count,
            complete = result.complete,
            "dispatch"
        );
        if result.complete {
            self.state.buffer.clear();
        }

        if !shift.is_empty() {
            self.host.hold_mods(shift);
        }
        result
    }

    /// Shared insert-entry path (also used by the engine for `TO(0)`, GUI and
    /// control pass-through).
    pub fn enter_insert(&mut self) {
        mode::enter_insert(self);
    }

    fn dispatch(&mut self, cmd: &ParsedCommand) -> DispatchResult {
        match cmd.last {
            'q' => command::handle_ex(self, cmd),
            'w' if cmd.ex_prefix => command::handle_ex(self, cmd),
            'h' | 'j' | 'k' | 'l' => motion::handle_arrow(self, cmd),
            'w' | 'e' | 'b' => motion::handle_word(self, cmd),
            '0' | '^' => motion::handle_line_start(self, cmd),
            '$' => operator::handle_line_end(self, cmd),
            'G' => operator::handle_document_end(self, cmd),
            'g' => operator::handle_document_start(self, cmd),
            'd' | 'c' | 'y' => operator::handle_operator_key(self, cmd),
            'D' | 'C' => operator::handle_rest_of_line(self, cmd),
            'x' | 'X' => edit::handle_delete_char(self, cmd),
            'u' | 'p' | 'n' | '\\' => edit::handle_shortcut(self, cmd),
            'r' => edit::handle_replace(self),
            'v' => mode::handle_visual_toggle(self),
            'a' | 'i' | '/' | 'o' | 'O' | 'I' | 'A' => mode::handle_insert_entry(self, cmd),
            '.' => mode::handle_repeat(self),
            _ => DispatchResult::pending(),
        }
    }
}
