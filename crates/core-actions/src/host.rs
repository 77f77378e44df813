//! Host firmware seam.
//!
//! `HostKeyboard` is everything the engine needs from the firmware: keystroke
//! synthesis, the live modifier byte, layer switching and the indicator LED.
//! `RecordingHost` is an in-memory implementation that logs every primitive
//! together with the modifier state at the time, so a synthesized sequence can
//! be asserted (tests) or printed (simulator).

use core_events::{KeyCode, KeyModifiers, Rgb};
use std::fmt;

pub trait HostKeyboard {
    /// Press and release `code` with whatever modifiers are currently held.
    fn tap(&mut self, code: KeyCode);
    fn press(&mut self, code: KeyCode);
    fn release(&mut self, code: KeyCode);
    fn hold_mods(&mut self, mods: KeyModifiers);
    fn release_mods(&mut self, mods: KeyModifiers);
    /// Live modifier state (physical keys plus synthesized holds).
    fn modifiers(&self) -> KeyModifiers;
    fn request_layer(&mut self, layer: u8);
    fn set_indicator(&mut self, _color: Rgb) {}
}

/// One primitive host operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HostOp {
    Tap { code: KeyCode, mods: KeyModifiers },
    Press { code: KeyCode, mods: KeyModifiers },
    Release { code: KeyCode, mods: KeyModifiers },
    HoldMods(KeyModifiers),
    ReleaseMods(KeyModifiers),
    Layer(u8),
    Indicator(Rgb),
}

/// A tapped key and the modifiers held while it was tapped.
pub type Chord = (KeyModifiers, KeyCode);

fn write_mods(f: &mut fmt::Formatter<'_>, mods: KeyModifiers) -> fmt::Result {
    for (held, name) in [
        (mods.ctrl_held(), "ctrl"),
        (mods.shift_held(), "shift"),
        (mods.intersects(KeyModifiers::ALT), "alt"),
        (mods.gui_held(), "gui"),
    ] {
        if held {
            write!(f, "{name}+")?;
        }
    }
    Ok(())
}

fn write_mod_names(f: &mut fmt::Formatter<'_>, mods: KeyModifiers) -> fmt::Result {
    let names: Vec<_> = mods.iter_names().map(|(n, _)| n.to_ascii_lowercase()).collect();
    f.write_str(&names.join("|"))
}

impl fmt::Display for HostOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match *self {
            HostOp::Tap { code, mods } => {
                f.write_str("tap     ")?;
                write_mods(f, mods)?;
                write!(f, "{code}")
            }
            HostOp::Press { code, mods } => {
                f.write_str("press   ")?;
                write_mods(f, mods)?;
                write!(f, "{code}")
            }
            HostOp::Release { code, .. } => write!(f, "release {code}"),
            HostOp::HoldMods(mods) => {
                f.write_str("hold    ")?;
                write_mod_names(f, mods)
            }
            HostOp::ReleaseMods(mods) => {
                f.write_str("unhold  ")?;
                write_mod_names(f, mods)
            }
            HostOp::Layer(layer) => write!(f, "layer   {layer}"),
            HostOp::Indicator(rgb) => write!(f, "rgb     {rgb}"),
        }
    }
}

/// In-memory host that records every operation.
#[derive(Debug, Default, Clone)]
pub struct RecordingHost {
    ops: Vec<HostOp>,
    mods: KeyModifiers,
    layer_requests: Vec<u8>,
}

impl RecordingHost {
    pub fn new() -> Self {
        Self::default()
    }

    /// Overwrite the modifier state without recording anything, as if the
    /// user pressed or released physical modifier keys.
    pub fn set_physical_mods(&mut self, mods: KeyModifiers) {
        self.mods = mods;
    }

    pub fn ops(&self) -> &[HostOp] {
        &self.ops
    }

    pub fn take_ops(&mut self) -> Vec<HostOp> {
        std::mem::take(&mut self.ops)
    }

    pub fn clear(&mut self) {
        self.ops.clear();
        self.layer_requests.clear();
    }

    /// Every tap so far, with the modifiers held at that moment.
    pub fn taps(&self) -> Vec<Chord> {
        self.ops
            .iter()
            .filter_map(|op| match *op {
                HostOp::Tap { code, mods } => Some((mods, code)),
                _ => None,
            })
            .collect()
    }

    /// Layer switches requested since the last drain, oldest first.
    pub fn drain_layer_requests(&mut self) -> Vec<u8> {
        std::mem::take(&mut self.layer_requests)
    }
}

impl HostKeyboard for RecordingHost {
    fn tap(&mut self, code: KeyCode) {
        self.ops.push(HostOp::Tap {
            code,
            mods: self.mods,
        });
    }

    fn press(&mut self, code: KeyCode) {
        self.ops.push(HostOp::Press {
            code,
            mods: self.mods,
        });
        if let Some(bit) = code.modifier_bit() {
            self.mods.insert(bit);
        }
    }

    fn release(&mut self, code: KeyCode) {
        if let Some(bit) = code.modifier_bit() {
            self.mods.remove(bit);
        }
        self.ops.push(HostOp::Release {
            code,
            mods: self.mods,
        });
    }

    fn hold_mods(&mut self, mods: KeyModifiers) {
        self.mods.insert(mods);
        self.ops.push(HostOp::HoldMods(mods));
    }

    fn release_mods(&mut self, mods: KeyModifiers) {
        self.mods.remove(mods);
        self.ops.push(HostOp::ReleaseMods(mods));
    }

    fn modifiers(&self) -> KeyModifiers {
        self.mods
    }

    fn request_layer(&mut self, layer: u8) {
        self.ops.push(HostOp::Layer(layer));
        self.layer_requests.push(layer);
    }

    fn set_indicator(&mut self, color: Rgb) {
        self.ops.push(HostOp::Indicator(color));
    }
}
