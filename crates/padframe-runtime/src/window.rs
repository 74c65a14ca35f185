#![forbid(unsafe_code)]

//! The window orchestrator and frame pump.
//!
//! [`Window`] owns the platform backend and the four components (lifecycle
//! monitor, soft keyboard bridge, input reconciler, surface manager) and
//! advances them in fixed order once per client loop iteration. All public
//! queries read the snapshot produced by the most recent [`pump`]
//! (Window::pump).

use padframe_core::event::FocusHandling;
use padframe_core::flags::WindowFlags;
use padframe_core::framebuffer::Framebuffer;
use padframe_core::geometry::{Size, enforce_scale};
use padframe_core::key::Key;
use padframe_core::platform::{KeyboardConfig, Platform};
use padframe_core::touch::TouchPoint;

use crate::clock::FrameClock;
use crate::fatal;
use crate::input::{InputReconciler, ReconcileOutcome};
use crate::keyboard::SoftKeyboardBridge;
use crate::monitor::LifecycleMonitor;
use crate::surface::{SurfaceError, SurfaceManager};

/// A console window with its per-frame input and lifecycle snapshot.
pub struct Window<P: Platform> {
    platform: P,
    framebuffer: Framebuffer,
    monitor: LifecycleMonitor,
    clock: FrameClock,
    input: InputReconciler,
    bridge: SoftKeyboardBridge<P::Keyboard>,
    surface: SurfaceManager,
    closed: bool,
    released: bool,
}

impl<P: Platform> Window<P> {
    /// Open a window, routing any surface failure through the fatal-error
    /// reporter (console message, wait for confirm, process exit).
    pub fn open(mut platform: P, width: i32, height: i32, title: &str, flags: WindowFlags) -> Self {
        match Self::open_parts(&mut platform, width, height, flags) {
            Ok(parts) => Self::assemble(platform, width, height, title, flags, parts),
            Err(err) => fatal::report(&mut platform, &format!("could not open window: {err}")),
        }
    }

    /// Open a window, surfacing failures as a `Result` instead of the
    /// fatal path. Intended for embedders and tests.
    pub fn try_open(
        mut platform: P,
        width: i32,
        height: i32,
        title: &str,
        flags: WindowFlags,
    ) -> Result<Self, SurfaceError> {
        let parts = Self::open_parts(&mut platform, width, height, flags)?;
        Ok(Self::assemble(platform, width, height, title, flags, parts))
    }

    fn open_parts(
        platform: &mut P,
        width: i32,
        height: i32,
        flags: WindowFlags,
    ) -> Result<Parts<P>, SurfaceError> {
        let mode = platform.operation_mode();
        let notices = platform.hook_lifecycle();
        let monitor = LifecycleMonitor::new(notices, mode);

        let surface = match SurfaceManager::open(
            platform,
            Size::new(width, height),
            monitor.screen(),
            flags,
        ) {
            Ok(surface) => surface,
            Err(err) => {
                platform.unhook_lifecycle();
                return Err(err);
            }
        };

        platform.set_focus_handling(FocusHandling::NoSuspend);
        platform.configure_pad();
        platform.init_touch();
        let bridge = SoftKeyboardBridge::new(platform, KeyboardConfig::default());
        platform.lock_exit();

        Ok(Parts {
            monitor,
            surface,
            bridge,
        })
    }

    fn assemble(
        platform: P,
        width: i32,
        height: i32,
        title: &str,
        flags: WindowFlags,
        parts: Parts<P>,
    ) -> Self {
        tracing::info!(width, height, ?flags, "window open");
        Self {
            platform,
            framebuffer: Framebuffer::new(width, height, title, flags),
            monitor: parts.monitor,
            clock: FrameClock::new(),
            input: InputReconciler::new(),
            bridge: parts.bridge,
            surface: parts.surface,
            closed: false,
            released: false,
        }
    }

    /// Advance one frame: lifecycle, input, pending resize, presentation.
    ///
    /// Backgrounded frames short-circuit: no input change, no present.
    /// After the closed flag latches, pumping is a no-op.
    pub fn pump(&mut self) {
        if self.closed {
            return;
        }
        if !self.monitor.poll(&mut self.platform, &mut self.clock) {
            self.closed = true;
            return;
        }
        if self.monitor.state().backgrounded() {
            return;
        }

        let screen = self.monitor.screen();
        let viewport = self.surface.viewport();
        let outcome = self
            .input
            .refresh(&mut self.platform, &mut self.bridge, screen, viewport);
        if outcome == ReconcileOutcome::Closed {
            self.closed = true;
            return;
        }

        self.surface
            .apply_pending_resize(&mut self.platform, self.monitor.state_mut());

        let flags = self.framebuffer.flags();
        if flags.contains(WindowFlags::AUTO) {
            // AUTO: 1:1 pixels (raised only by an explicit scale flag); the
            // logical buffer tracks the screen, so no letterboxing remains.
            let scale = enforce_scale(1, flags);
            self.surface.set_scale(scale);
            self.framebuffer
                .resize(screen.width / scale, screen.height / scale);
        } else {
            self.surface
                .recompute_scale(self.framebuffer.size(), screen, flags);
        }
        self.surface.reposition(self.framebuffer.size(), screen);

        self.surface
            .present(&mut self.platform, &self.framebuffer, screen);
    }

    /// Whether the window has closed. Latched once true.
    #[must_use]
    pub fn closed(&self) -> bool {
        self.closed
    }

    /// Whether the key went down this frame.
    #[must_use]
    pub fn key_pressed(&self, key: Key) -> bool {
        self.input.key_pressed(key)
    }

    /// Whether the key is held.
    #[must_use]
    pub fn key_held(&self, key: Key) -> bool {
        self.input.key_held(key)
    }

    /// Drain the one-slot character buffer. Returns 0 when empty.
    pub fn read_char(&mut self) -> u8 {
        self.input.read_char()
    }

    /// Pointer position and button mask, derived from the primary touch.
    #[must_use]
    pub fn mouse(&self) -> (i32, i32, u32) {
        let mouse = self.input.mouse();
        (mouse.x, mouse.y, mouse.buttons)
    }

    /// Scroll deltas. The console has no wheel; always `(0.0, 0.0)`.
    #[must_use]
    pub fn mouse_wheel(&self) -> (f32, f32) {
        (0.0, 0.0)
    }

    /// Bounded copy of active touch points: writes
    /// `min(out.len(), active)` entries and returns the count.
    pub fn touch(&self, out: &mut [TouchPoint]) -> usize {
        self.input.touch(out)
    }

    /// Show or hide the soft keyboard overlay. Silently ignored when the
    /// subsystem is unsupported or disabled.
    pub fn show_keyboard(&mut self, show: bool) {
        if show {
            self.bridge.show();
        } else {
            self.bridge.hide();
        }
    }

    /// Seconds elapsed since the previous call; 0 on the first call after
    /// open or resume.
    pub fn time(&mut self) -> f32 {
        let now = self.platform.now();
        self.clock.elapsed(now)
    }

    /// Logical framebuffer metadata.
    #[must_use]
    pub fn framebuffer(&self) -> &Framebuffer {
        &self.framebuffer
    }

    /// Current integer upscale factor.
    #[must_use]
    pub fn scale(&self) -> i32 {
        self.surface.viewport().scale
    }

    /// The platform backend (scripted platforms expose their handles here).
    #[must_use]
    pub fn platform(&self) -> &P {
        &self.platform
    }

    /// Mutable access to the platform backend.
    pub fn platform_mut(&mut self) -> &mut P {
        &mut self.platform
    }

    /// Report a fatal error: tear down the stack, show the console
    /// message, wait for confirm, exit with status 1.
    pub fn fatal(&mut self, message: &str) -> ! {
        self.release();
        fatal::report(&mut self.platform, message)
    }

    /// Close the window and release every owned resource. Dropping the
    /// window does the same; calling both is safe.
    pub fn close(mut self) {
        self.release();
    }

    fn release(&mut self) {
        if self.released {
            return;
        }
        tracing::info!("window closing");
        self.surface.close(&mut self.platform);
        self.platform.unhook_lifecycle();
        self.platform.set_focus_handling(FocusHandling::SuspendHomeSleep);
        self.bridge.shutdown();
        self.platform.unlock_exit();
        self.released = true;
        self.closed = true;
    }
}

impl<P: Platform> Drop for Window<P> {
    fn drop(&mut self) {
        self.release();
    }
}

struct Parts<P: Platform> {
    monitor: LifecycleMonitor,
    surface: SurfaceManager,
    bridge: SoftKeyboardBridge<P::Keyboard>,
}
