//! Keystroke emitter: composite keystroke helpers over the primitive host calls.

use crate::HostKeyboard;
use core_events::{KeyCode, KeyModifiers};

pub trait KeystrokeEmitter: HostKeyboard {
    fn tap_n(&mut self, code: KeyCode, n: u32) {
        for _ in 0..n {
            self.tap(code);
        }
    }

    /// Hold `mods`, tap `code` `n` times, release `mods`.
    fn mod_tap_n(&mut self, mods: KeyModifiers, code: KeyCode, n: u32) {
        self.hold_mods(mods);
        self.tap_n(code, n);
        self.release_mods(mods);
    }

    fn mod_tap(&mut self, mods: KeyModifiers, code: KeyCode) {
        self.mod_tap_n(mods, code, 1);
    }

    /// Run `f` with `mods` held. An empty set is a plain call.
    fn with_mods<R>(&mut self, mods: KeyModifiers, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        if mods.is_empty() {
            return f(self);
        }
        self.hold_mods(mods);
        let out = f(self);
        self.release_mods(mods);
        out
    }

    /// Run `f` with Shift held when `extend` is set (visual selection).
    fn shifted_if<R>(&mut self, extend: bool, f: impl FnOnce(&mut Self) -> R) -> R
    where
        Self: Sized,
    {
        let mods = if extend {
            KeyModifiers::LSHIFT
        } else {
            KeyModifiers::empty()
        };
        self.with_mods(mods, f)
    }
}

impl<H: HostKeyboard + ?Sized> KeystrokeEmitter for H {}
