#![forbid(unsafe_code)]

//! Gamepad button state.
//!
//! The console reports the pad as a 64-bit button mask. Stick deflections
//! past the digital threshold are reported as pseudo-buttons alongside the
//! physical ones, which lets the input reconciler treat sticks as extra
//! direction pads.

use bitflags::bitflags;

bitflags! {
    /// Buttons of the standard controller, including stick-direction
    /// pseudo-buttons.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct Buttons: u64 {
        const A             = 1 << 0;
        const B             = 1 << 1;
        const X             = 1 << 2;
        const Y             = 1 << 3;
        const STICK_L       = 1 << 4;
        const STICK_R       = 1 << 5;
        const L             = 1 << 6;
        const R             = 1 << 7;
        const ZL            = 1 << 8;
        const ZR            = 1 << 9;
        const PLUS          = 1 << 10;
        const MINUS         = 1 << 11;
        const DPAD_LEFT     = 1 << 12;
        const DPAD_UP       = 1 << 13;
        const DPAD_RIGHT    = 1 << 14;
        const DPAD_DOWN     = 1 << 15;
        const STICK_L_LEFT  = 1 << 16;
        const STICK_L_UP    = 1 << 17;
        const STICK_L_RIGHT = 1 << 18;
        const STICK_L_DOWN  = 1 << 19;
        const STICK_R_LEFT  = 1 << 20;
        const STICK_R_UP    = 1 << 21;
        const STICK_R_RIGHT = 1 << 22;
        const STICK_R_DOWN  = 1 << 23;
    }
}

impl Default for Buttons {
    fn default() -> Self {
        Self::empty()
    }
}

/// One frame's pad reading.
///
/// `pressed` carries the buttons that went down since the previous reading
/// (edge detection performed by the pad driver), `held` the full current
/// mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct PadSnapshot {
    /// Buttons currently held.
    pub held: Buttons,
    /// Buttons that transitioned to held since the last pad update.
    pub pressed: Buttons,
}

impl PadSnapshot {
    /// Create a snapshot from held/pressed masks.
    #[must_use]
    pub const fn new(held: Buttons, pressed: Buttons) -> Self {
        Self { held, pressed }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_snapshot_is_empty() {
        let snapshot = PadSnapshot::default();
        assert!(snapshot.held.is_empty());
        assert!(snapshot.pressed.is_empty());
    }

    #[test]
    fn button_bits_are_distinct() {
        let all = Buttons::all();
        assert_eq!(all.bits().count_ones(), 24);
    }
}
