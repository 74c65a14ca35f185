#![forbid(unsafe_code)]

//! Platform seams.
//!
//! The runtime is written against these traits instead of the console's
//! native APIs, so the reconciliation layer can be driven deterministically
//! by a scripted implementation in tests. Real backends wrap the OS applet,
//! pad/touch, keyboard-overlay, and GPU subsystems.
//!
//! # Callback model
//!
//! The OS delivers lifecycle and keyboard completions via registered
//! callbacks that run outside the frame pump's call stack. A conforming
//! implementation never hands the runtime a callback; it writes each
//! completion into the mpsc channel returned at registration, and the
//! runtime drains those mailboxes once per pump. Callbacks fire only between
//! pump calls (inside the platform's own event-pump step), so a value
//! written before a pump is observed by that pump and never torn.

use std::fmt;
use std::sync::mpsc::Receiver;
use std::time::Duration;

use crate::event::{DisplayMode, FocusHandling, KeyboardReply, LifecycleNotice};
use crate::framebuffer::Framebuffer;
use crate::geometry::{Size, Viewport};
use crate::pad::PadSnapshot;
use crate::touch::{MAX_TOUCH_POINTS, TouchSample};

/// Color/depth attributes of one framebuffer configuration offered by the
/// display driver.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConfigAttribs {
    pub red_bits: u8,
    pub green_bits: u8,
    pub blue_bits: u8,
    pub depth_bits: u8,
}

impl ConfigAttribs {
    /// Describe a configuration.
    #[must_use]
    pub const fn new(red_bits: u8, green_bits: u8, blue_bits: u8, depth_bits: u8) -> Self {
        Self {
            red_bits,
            green_bits,
            blue_bits,
            depth_bits,
        }
    }
}

/// Soft-keyboard overlay appearance parameters.
///
/// Passed to [`KeyboardOverlay::appear`] each time the overlay is shown.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct KeyboardConfig {
    /// Maximum text length the overlay accepts. Committed text longer than
    /// `max_text_len - 1` is truncated by the bridge.
    pub max_text_len: usize,
    /// Label on the overlay's confirm button.
    pub ok_label: String,
    /// Offer dictionary/predictive suggestions.
    pub predictive: bool,
    /// Show the return key.
    pub return_key: bool,
}

impl Default for KeyboardConfig {
    fn default() -> Self {
        Self {
            max_text_len: 32,
            ok_label: "Submit".to_owned(),
            predictive: true,
            return_key: true,
        }
    }
}

impl KeyboardConfig {
    /// Set the maximum accepted text length.
    #[must_use]
    pub fn with_max_text_len(mut self, max_text_len: usize) -> Self {
        self.max_text_len = max_text_len;
        self
    }

    /// Set the confirm-button label.
    #[must_use]
    pub fn with_ok_label(mut self, label: &str) -> Self {
        self.ok_label = label.to_owned();
        self
    }
}

/// GPU presentation backend.
///
/// The runtime only needs surface lifecycle, a current-context toggle, and
/// "the client's pixel buffer is on screen after present + swap". Pixel
/// contents never cross this seam; [`Framebuffer`] is metadata.
///
/// `swap_buffers` may block until the display's sync interval elapses (a
/// bounded wait); nothing else blocks.
pub trait Gpu {
    /// Driver error, surfaced in fatal diagnostics.
    type Error: fmt::Display;

    /// Acquire the default native window.
    fn acquire_window(&mut self) -> Result<(), Self::Error>;

    /// Set the native window's backing dimensions.
    fn set_window_dimensions(&mut self, size: Size);

    /// Crop the native window to the visible output dimensions.
    fn set_window_crop(&mut self, size: Size);

    /// Initialize the display connection.
    fn initialize_display(&mut self) -> Result<(), Self::Error>;

    /// Enumerate available framebuffer configurations. Valid after
    /// `initialize_display`.
    fn choose_configs(&mut self) -> Result<Vec<ConfigAttribs>, Self::Error>;

    /// Create the window surface using the config at `config` (an index
    /// into the last `choose_configs` result).
    fn create_window_surface(&mut self, config: usize) -> Result<(), Self::Error>;

    /// Create the rendering context for the same config.
    fn create_context(&mut self, config: usize) -> Result<(), Self::Error>;

    /// Bind surface and context current.
    fn make_current(&mut self) -> Result<(), Self::Error>;

    /// Unbind the current surface and context.
    fn release_current(&mut self);

    /// Blit the client framebuffer through the viewport onto a target of
    /// the given physical dimensions.
    fn present(&mut self, frame: &Framebuffer, viewport: Viewport, target: Size);

    /// Swap front and back buffers. May wait for the sync interval.
    fn swap_buffers(&mut self);

    /// Destroy the window surface.
    fn destroy_surface(&mut self);

    /// Destroy the rendering context.
    fn destroy_context(&mut self);

    /// Tear down the display connection.
    fn terminate_display(&mut self);
}

/// One soft-keyboard overlay session.
///
/// The overlay runs on its own channel inside the OS; `update` lets it
/// advance its animation/state once per frame. Completions arrive on the
/// [`KeyboardReply`] mailbox handed out at creation.
pub trait KeyboardOverlay {
    /// Overlay subsystem error. Any `update` failure permanently disables
    /// the bridge.
    type Error: fmt::Display;

    /// Pump the overlay once. Called every frame while the bridge is alive.
    fn update(&mut self) -> Result<(), Self::Error>;

    /// Replace the overlay's current input text.
    fn set_input_text(&mut self, text: &str);

    /// Move the overlay's input cursor.
    fn set_cursor(&mut self, position: usize);

    /// Start the appear transition.
    fn appear(&mut self, config: &KeyboardConfig);

    /// Start the disappear transition.
    fn disappear(&mut self);
}

/// The console OS surface the runtime runs against.
///
/// Combines applet lifecycle, pad/touch input, the keyboard overlay
/// factory, a monotonic clock, and the fallback text console used by the
/// fatal-error reporter. GPU presentation is a supertrait so one backend
/// value serves both seams.
pub trait Platform: Gpu {
    /// Keyboard overlay session type.
    type Keyboard: KeyboardOverlay;

    /// Register for lifecycle notices. The returned mailbox is drained once
    /// per pump; the platform writes notices from its callback context.
    fn hook_lifecycle(&mut self) -> Receiver<LifecycleNotice>;

    /// Unregister the lifecycle hook.
    fn unhook_lifecycle(&mut self);

    /// The OS's cooperative main-loop continuation signal. `false` means
    /// the process must wind down now.
    fn main_loop(&mut self) -> bool;

    /// The current display/performance mode.
    fn operation_mode(&mut self) -> DisplayMode;

    /// Request a focus-handling policy from the OS.
    fn set_focus_handling(&mut self, mode: FocusHandling);

    /// Hold the exit lock: the OS defers exit requests to the application.
    fn lock_exit(&mut self);

    /// Release the exit lock.
    fn unlock_exit(&mut self);

    /// Configure and initialize the standard pad.
    fn configure_pad(&mut self);

    /// Read the pad: current held mask plus the pressed edges since the
    /// previous read.
    fn update_pad(&mut self) -> PadSnapshot;

    /// Initialize the touch screen.
    fn init_touch(&mut self);

    /// Sample the touch screen. Writes up to [`MAX_TOUCH_POINTS`] samples
    /// in panel-native coordinates and returns the count the hardware
    /// reported, which may exceed what was written.
    fn sample_touch(&mut self, out: &mut [TouchSample; MAX_TOUCH_POINTS]) -> usize;

    /// Create a keyboard overlay session and its completion mailbox.
    /// `None` when the subsystem is unsupported; the bridge then degrades
    /// to no-ops.
    fn create_keyboard(&mut self) -> Option<(Self::Keyboard, Receiver<KeyboardReply>)>;

    /// Monotonic clock reading.
    fn now(&self) -> Duration;

    /// Switch to the minimal text console (fatal-error path).
    fn enter_console(&mut self);

    /// Write text to the console.
    fn console_print(&mut self, text: &str);

    /// Flush pending console output to the screen.
    fn console_flush(&mut self);

    /// Leave the text console.
    fn exit_console(&mut self);
}
