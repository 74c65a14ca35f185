#![forbid(unsafe_code)]

//! Fatal-error reporter.
//!
//! The only user-visible error surface: format a message, switch the
//! platform to its minimal text console, block until the confirm button is
//! pressed, then terminate the process with a non-zero status. Callers are
//! responsible for tearing down the window/graphics stack first.

use std::process;

use padframe_core::pad::Buttons;
use padframe_core::platform::Platform;

/// Show the message on the text console and wait for the A button.
///
/// This is [`report`] minus the process exit, split out so the interaction
/// loop can be driven by a scripted platform in tests.
pub fn interact<P: Platform>(platform: &mut P, message: &str) {
    tracing::error!(message, "fatal error");

    platform.enter_console();
    platform.console_print(&format!("padframe fatal error: {message}\n"));
    platform.console_print("\nPress A to exit.\n");
    platform.console_flush();

    platform.configure_pad();
    while platform.main_loop() {
        let pad = platform.update_pad();
        if pad.pressed.contains(Buttons::A) {
            break;
        }
    }
    platform.exit_console();
}

/// Report a fatal error and terminate the process with status 1.
pub fn report<P: Platform>(platform: &mut P, message: &str) -> ! {
    interact(platform, message);
    process::exit(1);
}
