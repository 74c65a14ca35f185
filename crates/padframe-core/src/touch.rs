#![forbid(unsafe_code)]

//! Touch samples, the bounded touch-point list, and the derived
//! single-pointer mouse state.

use crate::geometry::{Point, Size};

/// Maximum number of touch points tracked per frame. The hardware may
/// report more; extras are silently truncated.
pub const MAX_TOUCH_POINTS: usize = 3;

/// Native resolution of the touch panel. Samples arrive in this coordinate
/// space regardless of the active display mode.
pub const TOUCH_PANEL_SIZE: Size = Size::new(1280, 720);

/// A raw touch sample in touch-panel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchSample {
    pub x: i32,
    pub y: i32,
}

impl TouchSample {
    /// Create a sample at panel coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }

    /// Rescale from panel-native coordinates to the given physical screen
    /// resolution.
    #[must_use]
    pub fn to_physical(self, screen: Size) -> Point {
        Point::new(
            (self.x as f32 * screen.width as f32 / TOUCH_PANEL_SIZE.width as f32) as i32,
            (self.y as f32 * screen.height as f32 / TOUCH_PANEL_SIZE.height as f32) as i32,
        )
    }
}

/// A touch point in logical-pixel coordinates.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct TouchPoint {
    pub x: i32,
    pub y: i32,
}

impl TouchPoint {
    /// Create a touch point at logical coordinates.
    #[must_use]
    pub const fn new(x: i32, y: i32) -> Self {
        Self { x, y }
    }
}

impl From<Point> for TouchPoint {
    fn from(point: Point) -> Self {
        Self::new(point.x, point.y)
    }
}

/// Fixed-capacity list of touch points.
///
/// Holds at most [`MAX_TOUCH_POINTS`] entries; pushes beyond capacity are
/// dropped rather than erroring, matching the platform contract.
#[derive(Debug, Clone, Default)]
pub struct TouchList {
    points: [TouchPoint; MAX_TOUCH_POINTS],
    len: usize,
}

impl TouchList {
    /// Create an empty list.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            points: [TouchPoint::new(0, 0); MAX_TOUCH_POINTS],
            len: 0,
        }
    }

    /// Remove all points.
    pub fn clear(&mut self) {
        self.len = 0;
    }

    /// Append a point; silently dropped when the list is full.
    pub fn push(&mut self, point: TouchPoint) {
        if self.len < MAX_TOUCH_POINTS {
            self.points[self.len] = point;
            self.len += 1;
        }
    }

    /// Number of active touch points.
    #[must_use]
    pub const fn len(&self) -> usize {
        self.len
    }

    /// Whether no touches are active.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.len == 0
    }

    /// The first (primary) touch point, if any.
    #[must_use]
    pub fn first(&self) -> Option<&TouchPoint> {
        self.as_slice().first()
    }

    /// Active points as a slice.
    #[must_use]
    pub fn as_slice(&self) -> &[TouchPoint] {
        &self.points[..self.len]
    }

    /// Bounded copy into `out`: writes `min(out.len(), self.len())` points
    /// and returns that count.
    pub fn copy_to(&self, out: &mut [TouchPoint]) -> usize {
        let count = out.len().min(self.len);
        out[..count].copy_from_slice(&self.points[..count]);
        count
    }
}

/// Legacy single-pointer mouse state, derived from the primary touch point.
///
/// `buttons` is the active touch count; the position is the last primary
/// touch location and keeps its value when all fingers lift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct MouseState {
    pub x: i32,
    pub y: i32,
    pub buttons: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    // --- TouchSample rescale ---

    #[test]
    fn sample_identity_on_panel_resolution() {
        let sample = TouchSample::new(640, 360);
        assert_eq!(sample.to_physical(Size::new(1280, 720)), Point::new(640, 360));
    }

    #[test]
    fn sample_rescales_to_docked_resolution() {
        let sample = TouchSample::new(640, 360);
        assert_eq!(
            sample.to_physical(Size::new(1920, 1080)),
            Point::new(960, 540)
        );
    }

    // --- TouchList bounds ---

    #[test]
    fn push_truncates_at_capacity() {
        let mut list = TouchList::new();
        for i in 0..5 {
            list.push(TouchPoint::new(i, i));
        }
        assert_eq!(list.len(), MAX_TOUCH_POINTS);
        assert_eq!(list.as_slice()[2], TouchPoint::new(2, 2));
    }

    #[test]
    fn copy_to_is_bounded_by_both_sides() {
        let mut list = TouchList::new();
        list.push(TouchPoint::new(1, 1));
        list.push(TouchPoint::new(2, 2));

        let mut small = [TouchPoint::default(); 1];
        assert_eq!(list.copy_to(&mut small), 1);
        assert_eq!(small[0], TouchPoint::new(1, 1));

        let mut large = [TouchPoint::default(); 8];
        assert_eq!(list.copy_to(&mut large), 2);
        assert_eq!(large[1], TouchPoint::new(2, 2));
    }

    #[test]
    fn clear_resets_length() {
        let mut list = TouchList::new();
        list.push(TouchPoint::new(1, 1));
        list.clear();
        assert!(list.is_empty());
        assert_eq!(list.first(), None);
    }
}
