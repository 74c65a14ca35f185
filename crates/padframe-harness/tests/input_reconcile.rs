//! Input reconciliation: key edges, button mapping, and overlay focus.

use padframe_core::flags::WindowFlags;
use padframe_core::key::Key;
use padframe_core::pad::Buttons;
use padframe_harness::{Op, open_scripted};

#[test]
fn button_press_fires_key_edge_exactly_once() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    script.press(Buttons::A);
    window.pump();
    assert!(window.key_pressed(Key::char('A')));
    assert!(window.key_held(Key::char('A')));

    // Held into the next frame: edge gone, held remains.
    window.pump();
    assert!(!window.key_pressed(Key::char('A')));
    assert!(window.key_held(Key::char('A')));

    // Release, then press again: a new edge.
    script.release(Buttons::A);
    window.pump();
    assert!(!window.key_held(Key::char('A')));
    script.press(Buttons::A);
    window.pump();
    assert!(window.key_pressed(Key::char('A')));
}

#[test]
fn dpad_and_triggers_map_to_their_keys() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    script.press(Buttons::DPAD_LEFT | Buttons::DPAD_DOWN | Buttons::ZL | Buttons::ZR);
    window.pump();

    assert!(window.key_held(Key::LEFT));
    assert!(window.key_held(Key::DOWN));
    assert!(window.key_held(Key::char('Z')));
    assert!(window.key_held(Key::char('Q')));
    assert!(!window.key_held(Key::RIGHT));
}

#[cfg(not(debug_assertions))]
#[test]
fn minus_maps_to_escape_in_release_builds() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    script.press(Buttons::MINUS);
    window.pump();
    assert!(window.key_pressed(Key::ESCAPE));
    assert!(!window.closed());
}

#[test]
fn shoulder_l_is_shadowed_by_stick_right_binding() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    // The mapping table binds 'L' to the shoulder first and to
    // left-stick-right second; the later entry wins.
    script.press(Buttons::L);
    window.pump();
    assert!(!window.key_held(Key::char('L')));

    script.release(Buttons::L);
    script.press(Buttons::STICK_L_RIGHT);
    window.pump();
    assert!(window.key_held(Key::char('L')));
}

#[test]
fn stick_directions_emulate_keys() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    script.press(Buttons::STICK_L_UP | Buttons::STICK_R_DOWN);
    window.pump();
    assert!(window.key_held(Key::char('I')));
    assert!(window.key_held(Key::PAD2));
}

#[test]
fn plus_edge_opens_the_keyboard_overlay() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    script.press(Buttons::PLUS);
    window.pump();
    let ops = script.ops();
    assert!(ops.contains(&Op::KeyboardAppear));

    // Held PLUS produces no second appear; the overlay is already open.
    script.take_ops();
    window.pump();
    assert!(!script.ops().contains(&Op::KeyboardAppear));
}

#[test]
fn open_overlay_suppresses_hardware_keys_and_touch() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    // Establish a held key, then open the overlay.
    script.press(Buttons::A);
    window.pump();
    assert!(window.key_held(Key::char('A')));

    window.show_keyboard(true);
    script.set_touches(&[(640, 360)]);
    window.pump();

    // Physical button still held, but every mapped key reads unheld and
    // no touch survives while the overlay owns focus.
    assert!(!window.key_held(Key::char('A')));
    assert!(!window.key_pressed(Key::char('A')));
    let (_, _, buttons) = window.mouse();
    assert_eq!(buttons, 0);

    // Closing the overlay restores hardware input with a fresh edge.
    window.show_keyboard(false);
    window.pump();
    assert!(window.key_held(Key::char('A')));
    assert!(window.key_pressed(Key::char('A')));
}

#[cfg(debug_assertions)]
#[test]
fn minus_quick_exit_closes_the_window() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    script.press(Buttons::MINUS);
    window.pump();
    assert!(window.closed());

    // Latched: further pumps change nothing.
    let presents = script.presents().len();
    window.pump();
    assert!(window.closed());
    assert_eq!(script.presents().len(), presents);
}

