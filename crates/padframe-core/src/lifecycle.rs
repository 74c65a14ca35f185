#![forbid(unsafe_code)]

//! Process lifecycle flags.
//!
//! [`LifecycleState`] is the pure state machine behind the lifecycle
//! monitor: two states (`Foreground`, `Backgrounded`) plus a latched
//! terminal `closed` flag, alongside the screen dimensions reported by the
//! active display mode. It is owned per window rather than process-global so
//! independent instances can coexist in tests.

use crate::event::DisplayMode;
use crate::geometry::Size;

/// Lifecycle flags mutated by the monitor and read by the frame pump.
#[derive(Debug, Clone)]
pub struct LifecycleState {
    closed: bool,
    backgrounded: bool,
    needs_resize: bool,
    screen: Size,
}

impl LifecycleState {
    /// Create state seeded from the current display mode.
    ///
    /// `needs_resize` starts raised so the first pump configures the surface
    /// crop for the seeded mode.
    #[must_use]
    pub fn new(mode: DisplayMode) -> Self {
        Self {
            closed: false,
            backgrounded: false,
            needs_resize: true,
            screen: mode.screen_size(),
        }
    }

    /// Latch the terminal closed flag. Never reverts.
    pub fn close(&mut self) {
        self.closed = true;
    }

    /// Whether the session has been closed. Latched.
    #[must_use]
    pub const fn closed(&self) -> bool {
        self.closed
    }

    /// Enter or leave the backgrounded state.
    pub fn set_backgrounded(&mut self, backgrounded: bool) {
        self.backgrounded = backgrounded;
    }

    /// Whether the application is currently backgrounded.
    #[must_use]
    pub const fn backgrounded(&self) -> bool {
        self.backgrounded
    }

    /// Record a display-mode change: new screen dimensions plus a pending
    /// resize for the surface manager.
    pub fn display_mode_changed(&mut self, mode: DisplayMode) {
        self.screen = mode.screen_size();
        self.needs_resize = true;
    }

    /// Whether a surface reconfiguration is pending.
    #[must_use]
    pub const fn needs_resize(&self) -> bool {
        self.needs_resize
    }

    /// Clear the pending-resize flag after the surface applied it.
    pub fn acknowledge_resize(&mut self) {
        self.needs_resize = false;
    }

    /// Current physical screen dimensions.
    #[must_use]
    pub const fn screen(&self) -> Size {
        self.screen
    }
}
