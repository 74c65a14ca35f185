#![forbid(unsafe_code)]

//! Lifecycle/focus monitor.
//!
//! Subscribes to the OS lifecycle notices and folds them into
//! [`LifecycleState`] flags once per pump. Notices are written by platform
//! callbacks between pumps and drained here, so no component ever observes a
//! half-applied transition.

use std::sync::mpsc::Receiver;

use padframe_core::event::{DisplayMode, FocusHandling, FocusState, LifecycleNotice};
use padframe_core::geometry::Size;
use padframe_core::lifecycle::LifecycleState;
use padframe_core::platform::Platform;

use crate::clock::FrameClock;

/// Per-window lifecycle monitor.
#[derive(Debug)]
pub struct LifecycleMonitor {
    notices: Receiver<LifecycleNotice>,
    state: LifecycleState,
}

impl LifecycleMonitor {
    /// Create a monitor draining `notices`, seeded from the display mode
    /// observed at window-open time.
    #[must_use]
    pub fn new(notices: Receiver<LifecycleNotice>, mode: DisplayMode) -> Self {
        Self {
            notices,
            state: LifecycleState::new(mode),
        }
    }

    /// Drain pending notices, then evaluate the should-run predicate: the
    /// OS main-loop signal going false forces the closed latch; otherwise
    /// the window runs until a notice closed it.
    pub fn poll<P: Platform>(&mut self, platform: &mut P, clock: &mut FrameClock) -> bool {
        self.drain(platform, clock);
        if !platform.main_loop() {
            tracing::debug!("platform main loop ended");
            self.state.close();
        }
        !self.state.closed()
    }

    fn drain<P: Platform>(&mut self, platform: &mut P, clock: &mut FrameClock) {
        while let Ok(notice) = self.notices.try_recv() {
            tracing::debug!(?notice, "lifecycle notice");
            match notice {
                LifecycleNotice::ExitRequested => self.state.close(),
                LifecycleNotice::Resumed => {
                    self.state.set_backgrounded(false);
                    clock.reset();
                    platform.set_focus_handling(FocusHandling::NoSuspend);
                }
                LifecycleNotice::FocusChanged(FocusState::InFocus) => {
                    self.state.set_backgrounded(false);
                    clock.reset();
                    platform.set_focus_handling(FocusHandling::NoSuspend);
                }
                LifecycleNotice::FocusChanged(FocusState::OutOfFocus) => {
                    self.state.set_backgrounded(true);
                    platform.set_focus_handling(FocusHandling::SuspendHomeSleepNotify);
                }
                LifecycleNotice::OperationModeChanged(mode) => {
                    self.state.display_mode_changed(mode);
                }
            }
        }
    }

    /// The lifecycle flags.
    #[must_use]
    pub fn state(&self) -> &LifecycleState {
        &self.state
    }

    /// Mutable access for the surface manager's resize acknowledgement.
    pub fn state_mut(&mut self) -> &mut LifecycleState {
        &mut self.state
    }

    /// Current physical screen dimensions.
    #[must_use]
    pub fn screen(&self) -> Size {
        self.state.screen()
    }
}
