#![forbid(unsafe_code)]

//! Window open-time option flags.

use bitflags::bitflags;

bitflags! {
    /// Options accepted by `Window::open`.
    ///
    /// The scale flags set a minimum upscale factor; without them the scale
    /// is whatever lets the logical buffer fit the physical screen.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
    pub struct WindowFlags: u32 {
        /// Track the physical screen: the scale is pinned to 1 (raised only
        /// by an explicit scale flag) and the logical framebuffer is resized
        /// each frame to cover the screen at that scale. No letterboxing.
        const AUTO     = 0b0001;
        /// Never display below 2x upscale.
        const SCALE_2X = 0b0010;
        /// Never display below 3x upscale.
        const SCALE_3X = 0b0100;
        /// Never display below 4x upscale.
        const SCALE_4X = 0b1000;
    }
}

impl Default for WindowFlags {
    fn default() -> Self {
        Self::empty()
    }
}
