#![forbid(unsafe_code)]

//! Geometric primitives and the logical/physical scale math.
//!
//! The client draws into a logical framebuffer; the console displays physical
//! pixels. An integer `scale` and a centering `position` offset relate the
//! two: the logical buffer is upscaled by `scale` and letterboxed at
//! `position` inside the physical screen. [`Viewport`] maps pointer/touch
//! coordinates back from physical to logical space.

use crate::flags::WindowFlags;

/// A point in pixel space. Logical or physical depending on context.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Point {
    pub x: i32,
    pub y: i32,
}

impl Point {
    /// Create a new point.
    #[inline]
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

/// A size in pixels.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Size {
    /// Width in pixels.
    pub width: i32,
    /// Height in pixels.
    pub height: i32,
}

impl Size {
    /// Create a new size.
    #[inline]
    #[must_use]
    pub const fn new(width: i32, height: i32) -> Self {
        Self { width, height }
    }

    /// Check whether either dimension is zero or negative.
    #[inline]
    #[must_use]
    pub const fn is_degenerate(&self) -> bool {
        self.width <= 0 || self.height <= 0
    }
}

/// Largest integer scale at which `logical` still fits inside `physical`.
///
/// Never returns less than 1, even when the logical buffer is larger than
/// the screen. Degenerate logical sizes scale at 1.
#[must_use]
pub const fn calc_scale(logical: Size, physical: Size) -> i32 {
    if logical.is_degenerate() {
        return 1;
    }
    let mut scale = 2;
    while logical.width * scale <= physical.width && logical.height * scale <= physical.height {
        scale += 1;
    }
    scale - 1
}

/// Clamp a computed scale to the minimum the window flags demand.
///
/// `SCALE_4X` wins over `SCALE_3X` wins over `SCALE_2X`; the result is
/// always at least 1.
#[must_use]
pub const fn enforce_scale(scale: i32, flags: WindowFlags) -> i32 {
    let scale = if flags.contains(WindowFlags::SCALE_4X) && scale < 4 {
        4
    } else if flags.contains(WindowFlags::SCALE_3X) && scale < 3 {
        3
    } else if flags.contains(WindowFlags::SCALE_2X) && scale < 2 {
        2
    } else {
        scale
    };
    if scale >= 1 { scale } else { 1 }
}

/// Centering offset for a `logical` buffer upscaled by `scale` inside
/// `physical`: `(physical - logical * scale) / 2` per axis.
#[must_use]
pub const fn letterbox(logical: Size, scale: i32, physical: Size) -> Point {
    Point::new(
        (physical.width - logical.width * scale) / 2,
        (physical.height - logical.height * scale) / 2,
    )
}

/// The active logical-to-physical mapping: integer scale plus letterbox
/// offset. Owned by the surface manager and consulted by the input
/// reconciler when mapping touch coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Viewport {
    /// Integer logical-to-physical pixel ratio.
    pub scale: i32,
    /// Top-left corner of the scaled logical buffer in physical space.
    pub position: Point,
}

impl Default for Viewport {
    fn default() -> Self {
        Self {
            scale: 1,
            position: Point::default(),
        }
    }
}

impl Viewport {
    /// Create a viewport from a scale and letterbox offset.
    #[inline]
    #[must_use]
    pub const fn new(scale: i32, position: Point) -> Self {
        Self { scale, position }
    }

    /// Map a physical-space point into logical coordinates.
    #[inline]
    #[must_use]
    pub const fn to_logical(&self, physical: Point) -> Point {
        Point::new(
            (physical.x - self.position.x) / self.scale,
            (physical.y - self.position.y) / self.scale,
        )
    }

    /// Map a logical-space point into physical coordinates.
    #[inline]
    #[must_use]
    pub const fn to_physical(&self, logical: Point) -> Point {
        Point::new(
            logical.x * self.scale + self.position.x,
            logical.y * self.scale + self.position.y,
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- calc_scale ---

    #[test]
    fn calc_scale_exact_fit() {
        assert_eq!(calc_scale(Size::new(640, 360), Size::new(1280, 720)), 2);
        assert_eq!(calc_scale(Size::new(640, 360), Size::new(1920, 1080)), 3);
    }

    #[test]
    fn calc_scale_never_below_one() {
        assert_eq!(calc_scale(Size::new(1920, 1080), Size::new(1280, 720)), 1);
    }

    #[test]
    fn calc_scale_limited_by_tighter_axis() {
        // Width would allow 4x, height only 2x.
        assert_eq!(calc_scale(Size::new(320, 360), Size::new(1280, 720)), 2);
    }

    #[test]
    fn calc_scale_degenerate_logical_is_one() {
        assert_eq!(calc_scale(Size::new(0, 360), Size::new(1280, 720)), 1);
        assert_eq!(calc_scale(Size::new(640, -1), Size::new(1280, 720)), 1);
    }

    // --- enforce_scale ---

    #[test]
    fn enforce_scale_applies_flag_minimums() {
        assert_eq!(enforce_scale(1, WindowFlags::SCALE_2X), 2);
        assert_eq!(enforce_scale(1, WindowFlags::SCALE_3X), 3);
        assert_eq!(enforce_scale(1, WindowFlags::SCALE_4X), 4);
    }

    #[test]
    fn enforce_scale_keeps_larger_scales() {
        assert_eq!(enforce_scale(5, WindowFlags::SCALE_2X), 5);
        assert_eq!(enforce_scale(3, WindowFlags::empty()), 3);
    }

    #[test]
    fn enforce_scale_highest_flag_wins() {
        let flags = WindowFlags::SCALE_2X | WindowFlags::SCALE_4X;
        assert_eq!(enforce_scale(1, flags), 4);
    }

    #[test]
    fn enforce_scale_floors_at_one() {
        assert_eq!(enforce_scale(0, WindowFlags::empty()), 1);
        assert_eq!(enforce_scale(-3, WindowFlags::empty()), 1);
    }

    // --- letterbox / Viewport ---

    #[test]
    fn letterbox_centers() {
        let pos = letterbox(Size::new(640, 360), 1, Size::new(1280, 720));
        assert_eq!(pos, Point::new(320, 180));
    }

    #[test]
    fn letterbox_zero_when_buffer_fills_screen() {
        let pos = letterbox(Size::new(640, 360), 2, Size::new(1280, 720));
        assert_eq!(pos, Point::new(0, 0));
    }

    #[test]
    fn viewport_roundtrip_without_letterbox() {
        let viewport = Viewport::default();
        let center = Point::new(640, 360);
        assert_eq!(viewport.to_logical(center), center);
        assert_eq!(viewport.to_physical(center), center);
    }

    #[test]
    fn viewport_maps_through_scale_and_offset() {
        let viewport = Viewport::new(2, Point::new(320, 180));
        assert_eq!(viewport.to_logical(Point::new(320, 180)), Point::new(0, 0));
        assert_eq!(
            viewport.to_logical(Point::new(960, 540)),
            Point::new(320, 180)
        );
        assert_eq!(
            viewport.to_physical(Point::new(320, 180)),
            Point::new(960, 540)
        );
    }
}
