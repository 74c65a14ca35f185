#![forbid(unsafe_code)]

//! Illustrative Padframe client.
//!
//! Drives a scripted platform through a short session: a touch on the
//! bottom strip opens the soft keyboard, committed text is read back one
//! character per frame, a mid-session dock switches the display mode, and
//! the session ends when the scripted OS main loop stops.
//!
//! Run with `RUST_LOG=debug` for the runtime's own tracing output.

use std::time::Duration;

use padframe::prelude::*;
use padframe_harness::ScriptedPlatform;
use tracing_subscriber::EnvFilter;

fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .init();

    let (platform, script) = ScriptedPlatform::new();
    let mut window = Window::open(
        platform,
        640,
        360,
        "Hello",
        WindowFlags::AUTO | WindowFlags::SCALE_3X,
    );

    let mut typed = String::new();
    let mut live_time = 0.0f32;
    let mut touch_points = [TouchPoint::default(); 3];

    for frame in 0u32.. {
        if window.closed() {
            break;
        }

        // Script this frame's platform activity.
        script.advance(Duration::from_millis(16));
        match frame {
            2 => script.set_touches(&[(640, 690)]),
            3 => script.clear_touches(),
            5 => script.commit_text("hello"),
            12 => script.change_display_mode(DisplayMode::Docked),
            16 => script.press(Buttons::A),
            18 => script.release(Buttons::A),
            24 => script.end_main_loop(),
            _ => {}
        }

        live_time += window.time();

        let (mouse_x, mouse_y, mouse_buttons) = window.mouse();
        let touches = window.touch(&mut touch_points);

        // A touch on the bottom tenth of the window summons the keyboard.
        let height = window.framebuffer().height();
        if touches > 0 && mouse_y > height - height / 10 {
            window.show_keyboard(true);
        }
        if window.key_pressed(Key::RETURN) {
            window.show_keyboard(false);
        }
        if window.key_pressed(Key::ESCAPE) {
            break;
        }

        let ch = window.read_char();
        if ch != 0 {
            typed.push(ch as char);
        }

        tracing::info!(
            frame,
            mouse_x,
            mouse_y,
            mouse_buttons,
            touches,
            held_a = window.key_held(Key::char('A')),
            scale = window.scale(),
            width = window.framebuffer().width(),
            height = window.framebuffer().height(),
            "frame"
        );

        window.pump();
    }

    tracing::info!(live_time = f64::from(live_time), typed = %typed, "session over");
}
