#![forbid(unsafe_code)]

//! Input reconciler.
//!
//! Once per frame, merges the three input sources (committed soft-keyboard
//! text, gamepad buttons, touch samples) into the key-state table,
//! touch list, and derived mouse fields. Edge detection works off the
//! previous/current double buffer snapshotted at the top of the refresh.

use padframe_core::geometry::{Size, Viewport};
use padframe_core::key::{Key, KeyTable};
use padframe_core::pad::Buttons;
use padframe_core::platform::Platform;
use padframe_core::touch::{MAX_TOUCH_POINTS, MouseState, TouchList, TouchPoint, TouchSample};

use crate::keyboard::SoftKeyboardBridge;

/// Fixed button→key mapping, applied in table order with plain assignment.
///
/// The table intentionally binds `L` twice: shoulder L first, then
/// left-stick-right, so the later stick entry overwrites the shoulder
/// state, exactly as the platform has always behaved. Clients that need the
/// left shoulder reliably should read `ZL` (`Z`).
const BUTTON_MAPPING: [(Key, Buttons); 23] = [
    (Key::char('A'), Buttons::A),
    (Key::char('B'), Buttons::B),
    (Key::char('X'), Buttons::X),
    (Key::char('Y'), Buttons::Y),
    (Key::char('L'), Buttons::L),
    (Key::char('R'), Buttons::R),
    (Key::char('Z'), Buttons::ZL),
    (Key::char('Q'), Buttons::ZR),
    (Key::char('C'), Buttons::STICK_L),
    (Key::char('T'), Buttons::STICK_R),
    (Key::ESCAPE, Buttons::MINUS),
    (Key::LEFT, Buttons::DPAD_LEFT),
    (Key::RIGHT, Buttons::DPAD_RIGHT),
    (Key::UP, Buttons::DPAD_UP),
    (Key::DOWN, Buttons::DPAD_DOWN),
    (Key::char('J'), Buttons::STICK_L_LEFT),
    (Key::char('L'), Buttons::STICK_L_RIGHT),
    (Key::char('I'), Buttons::STICK_L_UP),
    (Key::char('K'), Buttons::STICK_L_DOWN),
    (Key::PAD4, Buttons::STICK_R_LEFT),
    (Key::PAD6, Buttons::STICK_R_RIGHT),
    (Key::PAD8, Buttons::STICK_R_UP),
    (Key::PAD2, Buttons::STICK_R_DOWN),
];

/// What the refresh decided about the window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReconcileOutcome {
    /// Keep running.
    Open,
    /// The window should close (debug quick-exit).
    Closed,
}

/// Per-frame input state: key table, touch list, and derived mouse fields.
#[derive(Debug, Default)]
pub struct InputReconciler {
    keys: KeyTable,
    touch: TouchList,
    mouse: MouseState,
}

impl InputReconciler {
    /// Create an empty reconciler.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Merge all sources into the current frame's snapshot.
    ///
    /// `screen` is the current physical resolution and `viewport` the
    /// surface manager's current scale/position mapping.
    pub fn refresh<P: Platform>(
        &mut self,
        platform: &mut P,
        bridge: &mut SoftKeyboardBridge<P::Keyboard>,
        screen: Size,
        viewport: Viewport,
    ) -> ReconcileOutcome {
        // 1. Snapshot for edge detection, before any source writes.
        self.keys.snapshot();

        // 2. Keyboard bridge: service the overlay, replay one committed
        //    byte as a key press.
        bridge.pump();
        if let Some(byte) = bridge.next_char() {
            self.keys.press_char(byte);
        }

        // 3. Gamepad.
        let pad = platform.update_pad();

        #[cfg(debug_assertions)]
        if pad.pressed.contains(Buttons::MINUS) {
            tracing::debug!("debug quick-exit via MINUS");
            return ReconcileOutcome::Closed;
        }

        if pad.pressed.contains(Buttons::PLUS) && !bridge.is_open() {
            bridge.show();
        }

        if bridge.is_open() {
            // The overlay owns input focus: release all fingers and report
            // every hardware-mapped key unheld so edge detection sees zero.
            for &(key, _) in BUTTON_MAPPING.iter() {
                self.keys.set(key, false);
            }
            self.touch.clear();
            self.mouse.buttons = 0;
            self.keys.combine_modifiers();
            return ReconcileOutcome::Open;
        }

        // 4. Button→key mapping.
        for &(key, button) in BUTTON_MAPPING.iter() {
            self.keys.set(key, pad.held.contains(button));
        }

        // 5. Touch: rescale panel samples to the physical screen, then map
        //    into logical coordinates through the viewport.
        let mut samples = [TouchSample::default(); MAX_TOUCH_POINTS];
        let reported = platform.sample_touch(&mut samples);
        let count = reported.min(MAX_TOUCH_POINTS);
        self.touch.clear();
        for sample in &samples[..count] {
            let physical = sample.to_physical(screen);
            self.touch.push(viewport.to_logical(physical).into());
        }

        // 6. Legacy mouse fields from the primary touch.
        self.mouse.buttons = self.touch.len() as u32;
        if let Some(primary) = self.touch.first() {
            self.mouse.x = primary.x;
            self.mouse.y = primary.y;
        }

        // 7. Combined modifiers from the already-written key states.
        self.keys.combine_modifiers();

        ReconcileOutcome::Open
    }

    /// Whether the key went down this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.keys.pressed(key)
    }

    /// Whether the key is held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.keys.held(key)
    }

    /// Drain the one-slot last-character buffer. 0 when empty.
    pub fn read_char(&mut self) -> u8 {
        self.keys.take_last_char()
    }

    /// The derived mouse state.
    #[must_use]
    pub fn mouse(&self) -> MouseState {
        self.mouse
    }

    /// Bounded copy of the active touch points.
    pub fn touch(&self, out: &mut [TouchPoint]) -> usize {
        self.touch.copy_to(out)
    }

    /// Number of active touch points.
    #[must_use]
    pub fn touch_count(&self) -> usize {
        self.touch.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn each_button_is_mapped_at_most_once() {
        let mut seen = Buttons::empty();
        for &(_, button) in BUTTON_MAPPING.iter() {
            assert!(!seen.contains(button), "button {button:?} mapped twice");
            seen |= button;
        }
        // PLUS opens the keyboard instead of mapping to a key.
        assert!(!seen.contains(Buttons::PLUS));
    }

    #[test]
    fn l_key_is_bound_twice_in_order() {
        let l_entries: Vec<usize> = BUTTON_MAPPING
            .iter()
            .enumerate()
            .filter(|(_, (key, _))| *key == Key::char('L'))
            .map(|(i, _)| i)
            .collect();
        assert_eq!(l_entries.len(), 2);
        assert_eq!(BUTTON_MAPPING[l_entries[0]].1, Buttons::L);
        assert_eq!(BUTTON_MAPPING[l_entries[1]].1, Buttons::STICK_L_RIGHT);
    }
}
