//! Simulated firmware: feeds events to the engine the way the keyboard
//! firmware would and reports the keystrokes that reach the host.

use core_actions::{HostKeyboard, HostOp, RecordingHost, VimEngine};
use core_config::Config;
use core_events::{Event, KeyEvent, LayerMask};
use core_state::Mode;
use tracing::trace;

/// Outcome of one simulated event.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Step {
    pub event: Event,
    pub consumed: bool,
    pub mode: Mode,
    pub buffer: String,
    pub ops: Vec<HostOp>,
}

pub struct Simulator {
    engine: VimEngine,
    host: RecordingHost,
}

impl Simulator {
    pub fn new(config: Config) -> Self {
        Self {
            engine: VimEngine::new(config),
            host: RecordingHost::new(),
        }
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn apply(&mut self, event: Event) -> Step {
        let consumed = match event {
            Event::Key(key) => self.key(key),
            Event::Modifiers { mods, held } => {
                if held {
                    self.host.hold_mods(mods);
                } else {
                    self.host.release_mods(mods);
                }
                false
            }
            Event::Layer(mask) => {
                self.engine.on_layer_change(&mut self.host, mask);
                false
            }
            Event::Shutdown => false,
        };
        let state = self.engine.state();
        let step = Step {
            event,
            consumed,
            mode: state.mode,
            buffer: state.buffer.to_string(),
            ops: self.host.take_ops(),
        };
        trace!(target: "sim", consumed, mode = ?step.mode, ops = step.ops.len(), "step");
        step
    }

    fn key(&mut self, key: KeyEvent) -> bool {
        let consumed = self.engine.on_key_event(&mut self.host, key);
        if !consumed {
            if key.pressed {
                self.host.press(key.code);
            } else {
                self.host.release(key.code);
            }
        }
        // The firmware reports a layer switch back through the layer hook.
        for layer in self.host.drain_layer_requests() {
            self.engine
                .on_layer_change(&mut self.host, LayerMask::single(layer));
        }
        consumed
    }
}
