#![forbid(unsafe_code)]

//! Deterministic test harness for Padframe.
//!
//! Provides [`ScriptedPlatform`], an in-memory implementation of every
//! platform seam, so the real runtime can be driven frame by frame without
//! console hardware. Tests move the platform half into a
//! [`Window`](padframe_runtime::Window) and keep the [`ScriptHandle`] to
//! script inputs and inspect the recorded operations.

pub mod platform;

pub use platform::{Op, PresentRecord, ScriptError, ScriptHandle, ScriptedKeyboard, ScriptedPlatform};

use padframe_core::flags::WindowFlags;
use padframe_core::platform::Platform;
use padframe_runtime::Window;

/// Open a window on a fresh scripted platform.
///
/// Panics on surface failure; failure-injection tests use
/// [`Window::try_open`] directly.
pub fn open_scripted(
    width: i32,
    height: i32,
    flags: WindowFlags,
) -> (Window<ScriptedPlatform>, ScriptHandle) {
    let (platform, script) = ScriptedPlatform::new();
    let window = Window::try_open(platform, width, height, "scripted", flags)
        .expect("scripted platform refused to open a window");
    (window, script)
}

/// Pump the window `frames` times.
pub fn pump_n<P: Platform>(window: &mut Window<P>, frames: usize) {
    for _ in 0..frames {
        window.pump();
    }
}
