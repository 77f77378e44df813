//! Core event types for the keyboard-side modal editing engine.
//!
//! The firmware delivers normalized key transitions (`KeyEvent`) and layer
//! changes (`LayerMask`); the engine answers with synthesized keystrokes. This
//! crate only defines the shared vocabulary, it performs no I/O.

use std::fmt;

mod keycode;

pub use keycode::{KeyCode, ParseKeyError};

// -------------------------------------------------------------------------------------------------
// Channel Policy
// -------------------------------------------------------------------------------------------------
// The simulator feeds events through a bounded mpsc channel sized by `EVENT_CHANNEL_CAP`. The single
// producer (script reader) awaits on a full channel rather than dropping events: key ordering is the
// whole point of the replay, so backpressure is preferred over loss.
// -------------------------------------------------------------------------------------------------
pub const EVENT_CHANNEL_CAP: usize = 256;

/// Top-level event enum consumed by a host event loop.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Event {
    /// Physical key transition.
    Key(KeyEvent),
    /// Physical modifier state changed outside of a key transition (script `hold` / `release`).
    Modifiers { mods: KeyModifiers, held: bool },
    /// The firmware switched its active layer set.
    Layer(LayerMask),
    Shutdown,
}

bitflags::bitflags! {
    /// Modifier byte in HID report order.
    #[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
    pub struct KeyModifiers: u8 {
        const LCTRL  = 0b0000_0001;
        const LSHIFT = 0b0000_0010;
        const LALT   = 0b0000_0100;
        const LGUI   = 0b0000_1000;
        const RCTRL  = 0b0001_0000;
        const RSHIFT = 0b0010_0000;
        const RALT   = 0b0100_0000;
        const RGUI   = 0b1000_0000;

        const CTRL  = Self::LCTRL.bits() | Self::RCTRL.bits();
        const SHIFT = Self::LSHIFT.bits() | Self::RSHIFT.bits();
        const ALT   = Self::LALT.bits() | Self::RALT.bits();
        const GUI   = Self::LGUI.bits() | Self::RGUI.bits();
    }
}

impl KeyModifiers {
    pub fn shift_held(self) -> bool {
        self.intersects(Self::SHIFT)
    }

    pub fn ctrl_held(self) -> bool {
        self.intersects(Self::CTRL)
    }

    pub fn gui_held(self) -> bool {
        self.intersects(Self::GUI)
    }
}

/// One physical key transition.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct KeyEvent {
    pub code: KeyCode,
    pub pressed: bool,
}

impl KeyEvent {
    pub fn down(code: KeyCode) -> Self {
        Self {
            code,
            pressed: true,
        }
    }

    pub fn up(code: KeyCode) -> Self {
        Self {
            code,
            pressed: false,
        }
    }
}

impl fmt::Display for KeyEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let edge = if self.pressed { "down" } else { "up" };
        write!(f, "{edge} {}", self.code)
    }
}

/// Active layer set, one bit per layer.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct LayerMask(pub u32);

impl LayerMask {
    pub const MAX_LAYERS: u8 = 32;

    pub fn single(layer: u8) -> Self {
        Self(1u32.checked_shl(u32::from(layer)).unwrap_or(0))
    }

    pub fn with(self, layer: u8) -> Self {
        Self(self.0 | Self::single(layer).0)
    }

    /// Whether `layer` counts as active. An empty mask means only the base
    /// layer (0) is on.
    pub fn is_active(self, layer: u8) -> bool {
        if self.0 == 0 {
            return layer == 0;
        }
        self.0 & Self::single(layer).0 != 0
    }
}

/// Indicator LED color.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct Rgb {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Rgb {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }
}

impl From<[u8; 3]> for Rgb {
    fn from([r, g, b]: [u8; 3]) -> Self {
        Self { r, g, b }
    }
}

impl fmt::Display for Rgb {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{:02x}{:02x}{:02x}", self.r, self.g, self.b)
    }
}
