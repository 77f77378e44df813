#![allow(dead_code)] // Shared across many integration tests; each test binary uses a subset of helpers.

use core_actions::{Chord, HostKeyboard, HostOp, RecordingHost, VimEngine};
use core_config::Config;
use core_events::{KeyCode, KeyEvent, KeyModifiers, LayerMask};
use core_state::Mode;

/// Engine plus recording host wired the way firmware wires them: keys the
/// engine does not consume reach the host, and layer requests come back
/// through the layer callback.
pub struct Harness {
    pub engine: VimEngine,
    pub host: RecordingHost,
}

impl Harness {
    pub fn new() -> Self {
        Self::with_config(Config::default())
    }

    pub fn with_config(config: Config) -> Self {
        Self {
            engine: VimEngine::new(config),
            host: RecordingHost::new(),
        }
    }

    /// Fresh engine already escaped into command mode, host log cleared.
    pub fn command() -> Self {
        let mut h = Self::new();
        h.tap(KeyCode::VIM_ESC);
        assert_eq!(h.mode(), Mode::Command);
        h.host.clear();
        h
    }

    pub fn send(&mut self, event: KeyEvent) -> bool {
        let consumed = self.engine.on_key_event(&mut self.host, event);
        if !consumed {
            if event.pressed {
                self.host.press(event.code);
            } else {
                self.host.release(event.code);
            }
        }
        for layer in self.host.drain_layer_requests() {
            self.engine
                .on_layer_change(&mut self.host, LayerMask::single(layer));
        }
        consumed
    }

    pub fn down(&mut self, code: KeyCode) -> bool {
        self.send(KeyEvent::down(code))
    }

    pub fn up(&mut self, code: KeyCode) -> bool {
        self.send(KeyEvent::up(code))
    }

    /// Press and release; returns whether the press was consumed.
    pub fn tap(&mut self, code: KeyCode) -> bool {
        let consumed = self.down(code);
        self.up(code);
        consumed
    }

    /// Type `text` key by key, holding left Shift for characters that need it.
    pub fn type_str(&mut self, text: &str) {
        for ch in text.chars() {
            let (code, shifted) = KeyCode::for_char(ch).expect("typeable character");
            if shifted {
                self.down(KeyCode::LSHIFT);
            }
            self.tap(code);
            if shifted {
                self.up(KeyCode::LSHIFT);
            }
        }
    }

    pub fn mode(&self) -> Mode {
        self.engine.mode()
    }

    pub fn buffer(&self) -> String {
        self.engine.state().buffer.to_string()
    }

    pub fn visual(&self) -> bool {
        self.engine.state().visual
    }

    pub fn taps(&self) -> Vec<Chord> {
        self.host.taps()
    }

    pub fn ops(&self) -> &[HostOp] {
        self.host.ops()
    }

    pub fn clear(&mut self) {
        self.host.clear();
    }
}

pub fn plain(code: KeyCode) -> Chord {
    (KeyModifiers::empty(), code)
}

pub fn shift(code: KeyCode) -> Chord {
    (KeyModifiers::LSHIFT, code)
}

pub fn ctrl(code: KeyCode) -> Chord {
    (KeyModifiers::LCTRL, code)
}

pub fn ctrl_shift(code: KeyCode) -> Chord {
    (KeyModifiers::LCTRL | KeyModifiers::LSHIFT, code)
}

pub fn repeated(chord: Chord, n: usize) -> Vec<Chord> {
    vec![chord; n]
}
