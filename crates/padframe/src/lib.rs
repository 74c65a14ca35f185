#![forbid(unsafe_code)]

//! Padframe public facade crate.
//!
//! This crate provides the stable, ergonomic surface area for users. It
//! re-exports the common types from the internal crates and offers a
//! lightweight prelude for day-to-day usage.

use std::fmt;

// --- Core re-exports -------------------------------------------------------

pub use padframe_core::event::{
    DisplayMode, FocusHandling, FocusState, KeyboardReply, LifecycleNotice,
};
pub use padframe_core::flags::WindowFlags;
pub use padframe_core::framebuffer::Framebuffer;
pub use padframe_core::geometry::{Point, Size, Viewport};
pub use padframe_core::key::{KEY_TABLE_SIZE, Key, KeyTable};
pub use padframe_core::pad::{Buttons, PadSnapshot};
pub use padframe_core::platform::{ConfigAttribs, Gpu, KeyboardConfig, KeyboardOverlay, Platform};
pub use padframe_core::touch::{MAX_TOUCH_POINTS, MouseState, TouchPoint, TouchSample};

// --- Runtime re-exports ----------------------------------------------------

pub use padframe_runtime::{
    FrameClock, InputReconciler, LifecycleMonitor, SoftKeyboardBridge, SurfaceManager, Window,
    fatal,
};

// --- Errors ---------------------------------------------------------------

pub use padframe_runtime::SurfaceError;

/// Top-level error type for padframe apps.
#[derive(Debug)]
pub enum Error {
    /// Surface configuration or creation failed.
    Surface(SurfaceError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Surface(err) => write!(f, "{err}"),
        }
    }
}

impl std::error::Error for Error {}

impl From<SurfaceError> for Error {
    fn from(err: SurfaceError) -> Self {
        Self::Surface(err)
    }
}

/// Standard result type for padframe APIs.
pub type Result<T> = std::result::Result<T, Error>;

// --- Prelude --------------------------------------------------------------

pub mod prelude {
    pub use crate::{
        Buttons, DisplayMode, Error, Key, KeyboardConfig, Platform, Result, TouchPoint, Window,
        WindowFlags,
    };

    pub use crate::{core, runtime};
}

pub use padframe_core as core;
pub use padframe_runtime as runtime;
