//! Soft keyboard bridge: committed-text replay, cancellation, and the
//! permanent-disable failure policy.

use padframe_core::flags::WindowFlags;
use padframe_core::key::Key;
use padframe_harness::{Op, open_scripted};

#[test]
fn committed_text_drains_one_char_per_pump() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    window.show_keyboard(true);
    script.commit_text("hi!");

    window.pump();
    assert_eq!(window.read_char(), b'h');
    assert!(window.key_pressed(Key(b'h')));

    window.pump();
    assert_eq!(window.read_char(), b'i');

    window.pump();
    assert_eq!(window.read_char(), b'!');

    // Buffer drained: the one-slot char reads 0 from here on.
    window.pump();
    assert_eq!(window.read_char(), 0);
}

#[test]
fn read_char_drains_the_slot_within_a_frame() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    window.show_keyboard(true);
    script.commit_text("a");
    window.pump();

    assert_eq!(window.read_char(), b'a');
    assert_eq!(window.read_char(), 0);
}

#[test]
fn commit_closes_the_overlay() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    window.show_keyboard(true);
    script.commit_text("ok");
    script.take_ops();
    window.pump();

    // Hardware mapping resumed the same frame the commit landed: the
    // overlay no longer owns focus, so a second show is accepted.
    window.show_keyboard(true);
    assert!(script.ops().contains(&Op::KeyboardAppear));
}

#[test]
fn cancel_closes_without_text() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    window.show_keyboard(true);
    script.cancel_keyboard();
    window.pump();
    assert_eq!(window.read_char(), 0);
}

#[test]
fn overlong_commit_is_truncated_to_the_overlay_limit() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    window.show_keyboard(true);
    let long = "x".repeat(64);
    script.commit_text(&long);

    let mut drained = 0;
    for _ in 0..64 {
        window.pump();
        if window.read_char() == 0 {
            break;
        }
        drained += 1;
    }
    // Configured maximum 32, minus one for the terminator slot.
    assert_eq!(drained, 31);
}

#[test]
fn update_failure_disables_the_bridge_for_the_session() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    script.fail_keyboard_updates();
    window.pump();
    assert!(script.ops().contains(&Op::KeyboardDisappear));

    // show/hide are no-ops for the rest of the session; no retry, no crash.
    script.take_ops();
    window.show_keyboard(true);
    window.show_keyboard(false);
    window.pump();
    let ops = script.ops();
    assert!(!ops.contains(&Op::KeyboardAppear));
    assert!(!ops.contains(&Op::KeyboardUpdate));
}

#[test]
fn unsupported_keyboard_degrades_to_no_ops() {
    let (platform, script) = padframe_harness::ScriptedPlatform::new();
    script.set_keyboard_supported(false);
    let mut window = padframe_runtime::Window::try_open(
        platform,
        640,
        360,
        "scripted",
        WindowFlags::empty(),
    )
    .expect("open");

    window.show_keyboard(true);
    window.pump();
    assert!(!script.ops().contains(&Op::KeyboardCreate));
    assert!(!script.ops().contains(&Op::KeyboardAppear));
    assert_eq!(window.read_char(), 0);
}
