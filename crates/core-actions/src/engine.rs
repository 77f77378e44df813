//! Mode state machine: the per-event entry point called by the firmware.
//!
//! `on_key_event` decides the disposition of every physical key transition
//! and returns whether the engine consumed it (`true` suppresses the host's
//! default handling). `on_layer_change` keeps the mode in step with the layer
//! the firmware reports active, and drives the indicator color.
//!
//! Order of checks for one event:
//! 1. Release of a held motion key; then command mode shortcuts that bypass
//!    the buffer: pass-through keys, the number layer key, return-to-base,
//!    held motions on an empty buffer.
//! 2. Replace sub-states.
//! 3. Releases (consumed outside insert modes).
//! 4. Escape into command mode.
//! 5. Insert modes (pass through, recording while capturing).
//! 6. GUI / Ctrl chords.
//! 7. Translate, append, interpret.

use crate::dispatcher::Interpreter;
use crate::{HostKeyboard, KeystrokeEmitter};
use core_config::Config;
use core_events::{KeyCode, KeyEvent, KeyModifiers, LayerMask};
use core_keymap::ChordAction;
use core_state::{HeldMotion, Mode, PushOutcome, VimState};
use tracing::{debug, trace};

pub struct VimEngine {
    state: VimState,
    config: Config,
}

impl Default for VimEngine {
    fn default() -> Self {
        Self::new(Config::default())
    }
}

impl VimEngine {
    pub fn new(config: Config) -> Self {
        let buffers = config.buffers();
        let state = VimState::new(
            buffers.command_capacity,
            buffers.insertion_capacity,
            config.layers().insert,
        );
        Self { state, config }
    }

    pub fn state(&self) -> &VimState {
        &self.state
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn mode(&self) -> Mode {
        self.state.mode
    }

    fn interpreter<'a, H: HostKeyboard>(&'a mut self, host: &'a mut H) -> Interpreter<'a, H> {
        Interpreter::new(&mut self.state, host, &self.config)
    }

    pub fn on_key_event<H: HostKeyboard>(&mut self, host: &mut H, event: KeyEvent) -> bool {
        let KeyEvent { code, pressed } = event;
        trace!(target: "vim.dispatch", %event, mode = ?self.state.mode, "key_event");

        if !pressed && self.release_held_motion(host, code) {
            return true;
        }

        if self.state.mode == Mode::Command {
            if code.is_modifier() || code == KeyCode::ESCAPE {
                return false;
            }
            if code == KeyCode::VIM_NUM {
                let layers = self.config.layers();
                let target = if pressed {
                    layers.number
                } else {
                    layers.command
                };
                host.request_layer(target);
                self.state.last_layer_on = target;
                return false;
            }
            if code == KeyCode::TO_BASE {
                self.interpreter(host).enter_insert();
                return true;
            }
            if pressed && self.press_held_motion(host, code) {
                return true;
            }
        }

        match self.state.mode {
            Mode::ReplaceInit => {
                self.state.set_mode(Mode::Replace);
                return true;
            }
            Mode::Replace => {
                if !pressed {
                    self.state.set_mode(Mode::Command);
                }
                return false;
            }
            _ => {}
        }

        if !pressed {
            return !self.state.mode.is_insert();
        }

        if code == KeyCode::VIM_ESC {
            self.state.reset_to_command();
            host.request_layer(self.config.layers().command);
        }

        match self.state.mode {
            Mode::InsertCapturing => {
                self.record_insertion(host, code);
                return false;
            }
            Mode::Insert => return false,
            _ => {}
        }

        let mods = host.modifiers();
        if mods.gui_held() {
            self.interpreter(host).enter_insert();
            return false;
        }
        if mods.ctrl_held() {
            return self.ctrl_chord(host, code);
        }

        let Some(ch) = core_keymap::translate(code, mods.shift_held()) else {
            return true;
        };
        match self.state.buffer.push(ch) {
            PushOutcome::Appended => {
                self.interpreter(host).run();
            }
            PushOutcome::LimitReached => self.flush_overflow(host),
        }
        true
    }

    /// Resynchronize with the firmware's active layer set. Returns the mask
    /// unchanged.
    pub fn on_layer_change<H: HostKeyboard>(&mut self, host: &mut H, mask: LayerMask) -> LayerMask {
        let layers = self.config.layers();
        let mut tracked: Vec<u8> = self
            .config
            .file
            .indicators
            .iter()
            .map(|i| i.layer)
            .chain([layers.insert, layers.command])
            .collect();
        tracked.sort_unstable();
        tracked.dedup();

        for layer in tracked {
            if !mask.is_active(layer) || layer == self.state.last_layer_on {
                continue;
            }
            debug!(target: "vim.layer", layer, from = self.state.last_layer_on, "layer_activated");
            if let Some(rgb) = self.config.indicator_for(layer) {
                host.set_indicator(rgb.into());
            }
            self.state.last_layer_on = layer;
            if layer == layers.insert && self.state.mode != Mode::InsertCapturing {
                self.state.set_mode(Mode::Insert);
            }
            if layer == layers.command {
                self.state.set_mode(Mode::Command);
            }
        }
        mask
    }

    /// Hold the host arrow key for a motion key pressed on an empty buffer.
    fn press_held_motion<H: HostKeyboard>(&mut self, host: &mut H, code: KeyCode) -> bool {
        if !self.state.buffer.is_empty() || self.state.held_motion.is_some() {
            return false;
        }
        let Some(spec) = core_keymap::held_motion(code) else {
            return false;
        };
        let mut mods = KeyModifiers::empty();
        if spec.word {
            mods |= KeyModifiers::LCTRL;
        }
        if self.state.visual {
            mods |= KeyModifiers::LSHIFT;
        }
        if !mods.is_empty() {
            host.hold_mods(mods);
        }
        host.press(spec.arrow);
        self.state.held_motion = Some(HeldMotion {
            trigger: code,
            arrow: spec.arrow,
            mods,
            trailing_word_tap: spec.trailing_word_tap,
        });
        trace!(target: "vim.dispatch", %code, arrow = %spec.arrow, "held_motion_pressed");
        true
    }

    /// Undo exactly what `press_held_motion` did, whatever happened since.
    fn release_held_motion<H: HostKeyboard>(&mut self, host: &mut H, code: KeyCode) -> bool {
        let Some(held) = self.state.held_motion.filter(|h| h.trigger == code) else {
            return false;
        };
        self.state.held_motion = None;
        host.release(held.arrow);
        if held.trailing_word_tap {
            host.tap(held.arrow);
        }
        if !held.mods.is_empty() {
            host.release_mods(held.mods);
        }
        trace!(target: "vim.dispatch", %code, "held_motion_released");
        true
    }

    fn record_insertion<H: HostKeyboard>(&mut self, host: &mut H, code: KeyCode) {
        if code.is_modifier() {
            return;
        }
        let shifted = host.modifiers().shift_held();
        if !code.is_trackable() || !self.state.log.push(code, shifted) {
            self.state.abandon_capture();
        }
    }

    fn ctrl_chord<H: HostKeyboard>(&mut self, host: &mut H, code: KeyCode) -> bool {
        let ctrl = host.modifiers() & KeyModifiers::CTRL;
        match core_keymap::ctrl_chord(code) {
            Some(ChordAction::Redo) => {
                host.hold_mods(KeyModifiers::LSHIFT);
                host.release_mods(ctrl);
                host.mod_tap(KeyModifiers::LCTRL, KeyCode::Z);
                host.hold_mods(ctrl);
                host.release_mods(KeyModifiers::LSHIFT);
                true
            }
            Some(action @ (ChordAction::PageDown | ChordAction::PageUp)) => {
                let key = if action == ChordAction::PageDown {
                    KeyCode::PAGE_DOWN
                } else {
                    KeyCode::PAGE_UP
                };
                host.release_mods(ctrl);
                host.tap(key);
                host.hold_mods(ctrl);
                true
            }
            None => {
                self.interpreter(host).enter_insert();
                false
            }
        }
    }

    /// The buffer hit its limit without completing a command: give up on it
    /// and resume literal typing.
    fn flush_overflow<H: HostKeyboard>(&mut self, host: &mut H) {
        debug!(target: "vim.buffer", buffer = %self.state.buffer, "buffer_overflow_flush");
        self.state.buffer.clear();
        self.state.visual = false;
        self.state.set_mode(Mode::Insert);
        host.request_layer(self.config.layers().insert);
    }
}
