#![forbid(unsafe_code)]

//! Key codes and the per-frame key-state table.
//!
//! Key state is a pair of fixed 256-entry boolean arrays indexed by key
//! code: `current` holds this frame's state, `previous` the state exactly
//! one frame ago. "Pressed this frame" is `current && !previous`; "held" is
//! `current`. The copy from `current` to `previous` happens exactly once per
//! frame, before any input source writes new values.
//!
//! Printable ASCII codes index themselves, so a byte of committed soft
//! keyboard text can be injected directly as a key press. Named keys occupy
//! a contiguous block starting at 128.

use std::mem;

/// Number of entries in the key-state table.
pub const KEY_TABLE_SIZE: usize = 256;

/// A key code in `[0, 256)`.
///
/// Use the associated constants for named keys and [`Key::char`] (or a byte
/// literal) for printable ASCII.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Key(pub u8);

impl Key {
    pub const PAD0: Key = Key(128);
    pub const PAD1: Key = Key(129);
    pub const PAD2: Key = Key(130);
    pub const PAD3: Key = Key(131);
    pub const PAD4: Key = Key(132);
    pub const PAD5: Key = Key(133);
    pub const PAD6: Key = Key(134);
    pub const PAD7: Key = Key(135);
    pub const PAD8: Key = Key(136);
    pub const PAD9: Key = Key(137);
    pub const BACKSPACE: Key = Key(138);
    pub const TAB: Key = Key(139);
    pub const RETURN: Key = Key(140);
    pub const SHIFT: Key = Key(141);
    pub const CONTROL: Key = Key(142);
    pub const ALT: Key = Key(143);
    pub const ESCAPE: Key = Key(144);
    pub const LEFT: Key = Key(145);
    pub const UP: Key = Key(146);
    pub const RIGHT: Key = Key(147);
    pub const DOWN: Key = Key(148);
    pub const LSHIFT: Key = Key(149);
    pub const RSHIFT: Key = Key(150);
    pub const LCONTROL: Key = Key(151);
    pub const RCONTROL: Key = Key(152);
    pub const LALT: Key = Key(153);
    pub const RALT: Key = Key(154);

    /// Key for a printable ASCII character. Letters use their uppercase
    /// code, matching what the pad mapping and keyboard injection produce.
    #[must_use]
    pub const fn char(c: char) -> Key {
        Key(c as u8)
    }

    /// Index into the key-state table.
    #[inline]
    #[must_use]
    pub const fn index(self) -> usize {
        self.0 as usize
    }
}

impl From<u8> for Key {
    fn from(code: u8) -> Self {
        Key(code)
    }
}

/// Double-buffered key state plus the one-slot "last produced character".
#[derive(Debug, Clone)]
pub struct KeyTable {
    current: [bool; KEY_TABLE_SIZE],
    previous: [bool; KEY_TABLE_SIZE],
    last_char: u8,
}

impl Default for KeyTable {
    fn default() -> Self {
        Self::new()
    }
}

impl KeyTable {
    /// Create an empty table: nothing held, nothing pressed, no pending
    /// character.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            current: [false; KEY_TABLE_SIZE],
            previous: [false; KEY_TABLE_SIZE],
            last_char: 0,
        }
    }

    /// Snapshot `current` into `previous` for edge detection.
    ///
    /// Call exactly once per frame, before any source writes new state.
    pub fn snapshot(&mut self) {
        self.previous = self.current;
    }

    /// Set the held state for a key.
    pub fn set(&mut self, key: Key, held: bool) {
        self.current[key.index()] = held;
    }

    /// Inject a character byte: marks its key code held and overwrites the
    /// one-slot last-character buffer.
    pub fn press_char(&mut self, byte: u8) {
        self.current[byte as usize] = true;
        self.last_char = byte;
    }

    /// Whether the key is currently held.
    #[must_use]
    pub fn held(&self, key: Key) -> bool {
        self.current[key.index()]
    }

    /// Whether the key went down this frame (held now, not held one frame
    /// ago).
    #[must_use]
    pub fn pressed(&self, key: Key) -> bool {
        self.current[key.index()] && !self.previous[key.index()]
    }

    /// Drain the one-slot character buffer. Returns 0 when empty.
    pub fn take_last_char(&mut self) -> u8 {
        mem::take(&mut self.last_char)
    }

    /// Recompute the combined modifier keys from their left/right variants.
    pub fn combine_modifiers(&mut self) {
        self.current[Key::SHIFT.index()] =
            self.current[Key::LSHIFT.index()] || self.current[Key::RSHIFT.index()];
        self.current[Key::CONTROL.index()] =
            self.current[Key::LCONTROL.index()] || self.current[Key::RCONTROL.index()];
        self.current[Key::ALT.index()] =
            self.current[Key::LALT.index()] || self.current[Key::RALT.index()];
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- Edge detection ---

    #[test]
    fn pressed_fires_exactly_once_while_held() {
        let mut table = KeyTable::new();

        table.snapshot();
        table.set(Key::char('A'), true);
        assert!(table.pressed(Key::char('A')));
        assert!(table.held(Key::char('A')));

        // Still held the next frame: edge gone, held remains.
        table.snapshot();
        table.set(Key::char('A'), true);
        assert!(!table.pressed(Key::char('A')));
        assert!(table.held(Key::char('A')));
    }

    #[test]
    fn release_and_repress_fires_again() {
        let mut table = KeyTable::new();

        table.snapshot();
        table.set(Key::ESCAPE, true);
        assert!(table.pressed(Key::ESCAPE));

        table.snapshot();
        table.set(Key::ESCAPE, false);
        assert!(!table.pressed(Key::ESCAPE));
        assert!(!table.held(Key::ESCAPE));

        table.snapshot();
        table.set(Key::ESCAPE, true);
        assert!(table.pressed(Key::ESCAPE));
    }

    // --- Character injection ---

    #[test]
    fn press_char_sets_key_and_last_char() {
        let mut table = KeyTable::new();
        table.snapshot();
        table.press_char(b'h');
        assert!(table.held(Key(b'h')));
        assert!(table.pressed(Key(b'h')));
        assert_eq!(table.take_last_char(), b'h');
        assert_eq!(table.take_last_char(), 0);
    }

    #[test]
    fn last_char_is_overwritten_not_queued() {
        let mut table = KeyTable::new();
        table.press_char(b'a');
        table.press_char(b'b');
        assert_eq!(table.take_last_char(), b'b');
        assert_eq!(table.take_last_char(), 0);
    }

    // --- Modifiers ---

    #[test]
    fn combined_modifiers_follow_either_variant() {
        let mut table = KeyTable::new();
        table.set(Key::RSHIFT, true);
        table.set(Key::LALT, true);
        table.combine_modifiers();
        assert!(table.held(Key::SHIFT));
        assert!(table.held(Key::ALT));
        assert!(!table.held(Key::CONTROL));

        table.set(Key::RSHIFT, false);
        table.combine_modifiers();
        assert!(!table.held(Key::SHIFT));
    }

    #[test]
    fn named_keys_stay_clear_of_ascii() {
        assert!(Key::PAD0.index() >= 128);
        assert!(Key::RALT.index() < KEY_TABLE_SIZE);
    }
}
