//! Property-based invariants for the full pump path, driven through the
//! scripted platform.
//!
//! 1. Reported touch counts are clamped to the fixed maximum, and the
//!    bounded copy respects the caller's capacity.
//! 2. Committed keyboard text always drains to `min(len, limit)` bytes,
//!    one per pump, and the one-slot character reads 0 afterwards.

use padframe_core::flags::WindowFlags;
use padframe_core::touch::{MAX_TOUCH_POINTS, TouchPoint};
use padframe_harness::open_scripted;
use proptest::prelude::*;

proptest! {
    #![proptest_config(ProptestConfig::with_cases(64))]

    #[test]
    fn touch_counts_clamp_through_the_pump(
        count in 0usize..8,
        capacity in 0usize..6,
    ) {
        let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

        let samples: Vec<(i32, i32)> = (0..count).map(|i| (i as i32 * 10, 360)).collect();
        script.set_touches(&samples);
        window.pump();

        let stored = count.min(MAX_TOUCH_POINTS);
        let (_, _, buttons) = window.mouse();
        prop_assert_eq!(buttons as usize, stored);

        let mut out = vec![TouchPoint::default(); capacity];
        prop_assert_eq!(window.touch(&mut out), capacity.min(stored));
    }

    #[test]
    fn committed_text_drains_to_the_limit(len in 0usize..64) {
        let (mut window, script) = open_scripted(640, 360, WindowFlags::empty());

        window.show_keyboard(true);
        let text = "q".repeat(len);
        script.commit_text(&text);

        let mut drained = 0usize;
        for _ in 0..=64 {
            window.pump();
            if window.read_char() == 0 {
                break;
            }
            drained += 1;
        }

        prop_assert_eq!(drained, len.min(31));
        prop_assert_eq!(window.read_char(), 0);
    }
}
