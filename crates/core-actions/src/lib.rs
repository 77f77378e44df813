//! core-actions: the modal command engine.
//!
//! * `host`       - the firmware seam (`HostKeyboard`) and an in-memory recorder
//! * `emitter`    - composite keystrokes over the host primitives
//! * `dispatcher` - the command interpreter
//! * `engine`     - the per-event mode state machine
//!
//! Everything is synchronous: one call runs to completion before the next
//! event is delivered, and all state lives in the `VimEngine` passed in.

pub mod dispatcher;
mod emitter;
mod engine;
mod host;

pub use dispatcher::{DispatchResult, Interpreter, Operator, ParsedCommand};
pub use emitter::KeystrokeEmitter;
pub use engine::VimEngine;
pub use host::{Chord, HostKeyboard, HostOp, RecordingHost};
