//! Shared gesture constants for consistent touch/pointer handling.
//!
//! The list coordinator and every row panel use the same thresholds, so a
//! gesture can never be claimed as a scroll by one and a tap by the other.
//!
//! All values are in logical pixels (or logical pixels per second).

/// Drag threshold in logical pixels.
///
/// Once the pointer moves further than this from the press position on an
/// axis, the gesture is claimed (horizontal swipe or vertical scroll) and a
/// release no longer counts as a tap.
///
/// Matches Android's `ViewConfiguration.TOUCH_SLOP` of 8dp.
pub const DRAG_THRESHOLD: f32 = 8.0;

/// Minimum release velocity, in logical pixels per second, for a release to
/// count as a fling.
///
/// Below this the open/close decision falls back to the drag fraction.
pub const MIN_FLING_VELOCITY: f32 = 50.0;

/// Maximum fling velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
