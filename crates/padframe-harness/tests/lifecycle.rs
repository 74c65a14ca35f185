//! Lifecycle: focus transitions, background short-circuit, the closed
//! latch, and elapsed-time resets.

use std::time::Duration;

use padframe_core::event::{DisplayMode, FocusHandling, FocusState, LifecycleNotice};
use padframe_core::flags::WindowFlags;
use padframe_core::key::Key;
use padframe_core::pad::Buttons;
use padframe_harness::open_scripted;

#[test]
fn exit_request_latches_closed() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());
    window.pump();
    assert!(!window.closed());

    script.notify(LifecycleNotice::ExitRequested);
    window.pump();
    assert!(window.closed());

    // Latched: no later notice reopens the window.
    script.notify(LifecycleNotice::Resumed);
    window.pump();
    assert!(window.closed());
}

#[test]
fn main_loop_end_forces_closed() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());
    window.pump();

    script.end_main_loop();
    window.pump();
    assert!(window.closed());
}

#[test]
fn backgrounded_pump_short_circuits() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    script.press(Buttons::A);
    window.pump();
    assert!(window.key_pressed(Key::char('A')));
    let presents_before = script.presents().len();

    script.notify(LifecycleNotice::FocusChanged(FocusState::OutOfFocus));
    script.press(Buttons::B);
    window.pump();

    // No present, no input change: the snapshot is exactly as it was.
    assert_eq!(script.presents().len(), presents_before);
    assert!(window.key_pressed(Key::char('A')));
    assert!(!window.key_held(Key::char('B')));
    assert_eq!(
        script.last_focus_handling(),
        Some(FocusHandling::SuspendHomeSleepNotify)
    );
}

#[test]
fn focus_regain_resumes_input_and_presentation() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());
    window.pump();

    script.notify(LifecycleNotice::FocusChanged(FocusState::OutOfFocus));
    window.pump();
    let presents_before = script.presents().len();

    script.notify(LifecycleNotice::FocusChanged(FocusState::InFocus));
    script.press(Buttons::B);
    window.pump();

    assert!(window.key_held(Key::char('B')));
    assert_eq!(script.presents().len(), presents_before + 1);
    assert_eq!(script.last_focus_handling(), Some(FocusHandling::NoSuspend));
}

#[test]
fn elapsed_time_skips_suspended_duration() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

    // First call establishes the reference and reports zero.
    assert_eq!(window.time(), 0.0);
    script.advance(Duration::from_millis(250));
    assert!((window.time() - 0.25).abs() < 1e-6);

    // A long suspension elapses, then a resume notice resets the clock.
    script.advance(Duration::from_secs(3600));
    script.notify(LifecycleNotice::Resumed);
    window.pump();
    assert_eq!(window.time(), 0.0);

    script.advance(Duration::from_millis(16));
    assert!((window.time() - 0.016).abs() < 1e-4);
}

#[test]
fn mode_notice_updates_screen_before_the_next_frame() {
    let (mut window, script) = open_scripted(640, 360, WindowFlags::AUTO);
    window.pump();
    assert_eq!(window.framebuffer().width(), 1280);

    script.change_display_mode(DisplayMode::Docked);
    window.pump();
    assert_eq!(window.framebuffer().width(), 1920);
    assert_eq!(window.framebuffer().height(), 1080);
}
