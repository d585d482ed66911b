//! Assertion utilities for robot testing
//!
//! Helpers for the invariants every gesture script should leave intact.

use swipemenu::{Openable, Side, SwipeMenuList};

/// Assert that a value is within an expected range.
pub fn assert_approx_eq(actual: f32, expected: f32, tolerance: f32, msg: &str) {
    let diff = (actual - expected).abs();
    assert!(
        diff <= tolerance,
        "{}: expected {} (±{}), got {} (diff: {})",
        msg,
        expected,
        tolerance,
        actual,
        diff
    );
}

/// Assert the offset of content row `position`, treating unbound rows as 0.
pub fn assert_offset(list: &SwipeMenuList, position: usize, expected: i32, msg: &str) {
    let actual = list.panel(position).map_or(0, |panel| panel.offset());
    assert_eq!(
        actual, expected,
        "{}: row {} expected offset {}, got {}",
        msg, position, expected, actual
    );
}

/// Assert that no more than one bound row has a nonzero offset.
pub fn assert_at_most_one_open(list: &SwipeMenuList, msg: &str) {
    let open: Vec<(usize, i32)> = list
        .registry()
        .iter()
        .filter(|(_, panel)| panel.offset() != 0)
        .map(|(raw, panel)| (raw, panel.offset()))
        .collect();
    assert!(
        open.len() <= 1,
        "{}: more than one row is open (raw, offset): {:?}",
        msg,
        open
    );
}

/// Assert that every bound row's offset lies within its menu widths.
pub fn assert_offsets_clamped(list: &SwipeMenuList, msg: &str) {
    for (raw, panel) in list.registry().iter() {
        let low = panel.metrics(Side::Left).map_or(0, |m| m.open_offset());
        let high = panel.metrics(Side::Right).map_or(0, |m| m.open_offset());
        let offset = panel.offset();
        assert!(
            (low..=high).contains(&offset),
            "{}: row {} offset {} outside [{}, {}]",
            msg,
            raw,
            offset,
            low,
            high
        );
    }
}
