//! Engine state: mode, command buffers, visual flag, insertion log.
//!
//! Everything the interpreter mutates lives in one `VimState` owned by a single
//! engine instance and handed by exclusive reference into each event. There is
//! no global state, so tests build isolated instances freely.
//!
//! Mode lifecycle:
//! - Boot: `Insert`.
//! - `Insert`/`InsertCapturing` -> `Command` on the escape key or when the
//!   command layer becomes active.
//! - `Command` -> `InsertCapturing` through any insert-entering command; the
//!   pending command is snapshotted into `saved` so `.` can replay it.
//! - `InsertCapturing` -> `Insert` when the recording can no longer reproduce
//!   the insertion (log full or an untrackable key).
//! - `Command` -> `ReplaceInit` -> `Replace` -> `Command` for `r`.
//! - `Command` -> `Repeat` -> `Command` inside a single `.` dispatch.

use core_events::{KeyCode, KeyModifiers};
use tracing::debug;

pub mod buffer;
pub mod insertion;

pub use buffer::{CommandBuffer, INLINE_CAPACITY, PushOutcome};
pub use insertion::{InsertionLog, RecordedKey};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Mode {
    /// Keys pass through to the host untouched.
    #[default]
    Insert,
    /// Insert mode while recording typed keys for a later `.`.
    InsertCapturing,
    /// Keys are interpreted as commands.
    Command,
    /// `r` was dispatched; waiting for the trailing release of `r`.
    ReplaceInit,
    /// The next key goes to the host verbatim; its release returns to `Command`.
    Replace,
    /// Replaying the saved command (only observable during a `.` dispatch).
    Repeat,
}

impl Mode {
    pub fn is_insert(self) -> bool {
        matches!(self, Mode::Insert | Mode::InsertCapturing)
    }
}

/// Physical motion key currently mapped to a held host arrow key.
///
/// Records exactly what was pressed on the way down so the release undoes
/// it, regardless of what happened to the visual flag or the buffer meanwhile.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HeldMotion {
    pub trigger: KeyCode,
    pub arrow: KeyCode,
    pub mods: KeyModifiers,
    pub trailing_word_tap: bool,
}

#[derive(Debug, Clone)]
pub struct VimState {
    pub mode: Mode,
    pub buffer: CommandBuffer,
    /// Command that started the most recent capturing insert.
    pub saved: CommandBuffer,
    pub visual: bool,
    pub log: InsertionLog,
    /// Layer most recently reported active by the layer callback.
    pub last_layer_on: u8,
    pub held_motion: Option<HeldMotion>,
}

impl Default for VimState {
    fn default() -> Self {
        Self::new(INLINE_CAPACITY, 16, 0)
    }
}

impl VimState {
    pub fn new(command_capacity: usize, insertion_capacity: usize, base_layer: u8) -> Self {
        Self {
            mode: Mode::Insert,
            buffer: CommandBuffer::with_capacity(command_capacity),
            saved: CommandBuffer::with_capacity(command_capacity),
            visual: false,
            log: InsertionLog::with_capacity(insertion_capacity),
            last_layer_on: base_layer,
            held_motion: None,
        }
    }

    pub fn set_mode(&mut self, mode: Mode) {
        if self.mode != mode {
            debug!(target: "vim.mode", from = ?self.mode, to = ?mode, "mode_transition");
            self.mode = mode;
        }
    }

    /// Enter a capturing insert: snapshot the pending command for `.`, start a
    /// fresh log.
    pub fn begin_capture(&mut self) {
        self.saved.copy_from(&self.buffer);
        self.buffer.clear();
        self.log.clear();
        self.visual = false;
        debug!(target: "vim.capture", saved = %self.saved, "capture_begin");
        self.set_mode(Mode::InsertCapturing);
    }

    /// Drop the in-progress recording; `.` becomes a no-op until the next change.
    pub fn abandon_capture(&mut self) {
        debug!(target: "vim.capture", recorded = self.log.len(), "capture_abandoned");
        self.saved.clear();
        self.log.clear();
        self.set_mode(Mode::Insert);
    }

    /// Escape into command mode with a clean slate.
    pub fn reset_to_command(&mut self) {
        self.visual = false;
        self.buffer.clear();
        self.set_mode(Mode::Command);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn boots_in_insert() {
        let st = VimState::default();
        assert_eq!(st.mode, Mode::Insert);
        assert!(st.buffer.is_empty() && st.saved.is_empty() && st.log.is_empty());
        assert!(!st.visual);
    }

    #[test]
    fn begin_capture_snapshots_buffer() {
        let mut st = VimState::default();
        st.set_mode(Mode::Command);
        st.visual = true;
        st.buffer.push('3');
        st.buffer.push('c');
        st.buffer.push('w');
        st.log.push(KeyCode::Z, false);
        st.begin_capture();
        assert_eq!(st.mode, Mode::InsertCapturing);
        assert_eq!(st.saved.to_string(), "3cw");
        assert!(st.buffer.is_empty());
        assert!(st.log.is_empty());
        assert!(!st.visual);
    }

    #[test]
    fn abandon_capture_forgets_saved_command() {
        let mut st = VimState::default();
        st.buffer.push('i');
        st.begin_capture();
        st.log.push(KeyCode::A, false);
        st.abandon_capture();
        assert_eq!(st.mode, Mode::Insert);
        assert!(st.saved.is_empty());
        assert!(st.log.is_empty());
    }

    #[test]
    fn reset_to_command_clears_pending_state() {
        let mut st = VimState::default();
        st.buffer.push('d');
        st.visual = true;
        st.reset_to_command();
        assert_eq!(st.mode, Mode::Command);
        assert!(st.buffer.is_empty());
        assert!(!st.visual);
    }

    #[test]
    fn insert_modes() {
        assert!(Mode::Insert.is_insert());
        assert!(Mode::InsertCapturing.is_insert());
        assert!(!Mode::Command.is_insert());
        assert!(!Mode::Replace.is_insert());
    }
}
