#![forbid(unsafe_code)]

//! Canonical platform event types.
//!
//! The console delivers lifecycle changes and keyboard-overlay completions
//! through callbacks registered with the OS. Padframe models each callback
//! family as a message enum carried over a single-writer mailbox channel,
//! drained synchronously once per frame pump. All events derive `Clone` and
//! `PartialEq` for use in tests and pattern matching.

use crate::geometry::Size;

/// The display/performance mode the console is currently operating in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum DisplayMode {
    /// Handheld mode: the built-in 1280x720 panel.
    Handheld,

    /// Docked mode: external output at 1920x1080.
    Docked,
}

impl DisplayMode {
    /// Physical screen size for this mode, in pixels.
    #[must_use]
    pub const fn screen_size(self) -> Size {
        match self {
            DisplayMode::Handheld => Size::new(1280, 720),
            DisplayMode::Docked => Size::new(1920, 1080),
        }
    }
}

/// Whether the application currently holds input focus.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusState {
    /// The application is foregrounded and receiving input.
    InFocus,

    /// Another applet (home menu, overlay) holds focus.
    OutOfFocus,
}

/// How the OS should treat the application when it loses focus.
///
/// Requested by the lifecycle monitor on focus transitions and restored to
/// the default on window close.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FocusHandling {
    /// Keep running in the background (requested while foregrounded).
    NoSuspend,

    /// Suspend on home/sleep and deliver a notification (requested while
    /// backgrounded).
    SuspendHomeSleepNotify,

    /// The platform default: suspend on home/sleep.
    SuspendHomeSleep,
}

/// An asynchronous lifecycle notification from the OS.
///
/// Notices are produced by platform callbacks outside the frame pump's call
/// stack and consumed by the lifecycle monitor at the start of the next pump.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleNotice {
    /// The user or OS requested the application exit (home-menu close).
    ///
    /// Terminal: once observed, the window reports closed forever.
    ExitRequested,

    /// The application resumed from a suspended state.
    Resumed,

    /// Input focus was gained or lost.
    FocusChanged(FocusState),

    /// The console switched between handheld and docked output.
    OperationModeChanged(DisplayMode),
}

/// Completion delivered by the soft-keyboard overlay session.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum KeyboardReply {
    /// The user confirmed the entered text.
    Submitted(String),

    /// The user dismissed the overlay without submitting.
    Cancelled,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_mode_screen_sizes() {
        assert_eq!(DisplayMode::Handheld.screen_size().width, 1280);
        assert_eq!(DisplayMode::Handheld.screen_size().height, 720);
        assert_eq!(DisplayMode::Docked.screen_size().width, 1920);
        assert_eq!(DisplayMode::Docked.screen_size().height, 1080);
    }
}
