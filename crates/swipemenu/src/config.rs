//! Tunable gesture and animation parameters.

use swipemenu_animation::Easing;
use swipemenu_foundation::{DRAG_THRESHOLD, MAX_FLING_VELOCITY, MIN_FLING_VELOCITY};

/// Default cap, in milliseconds, for every open/close animation.
pub const DEFAULT_ANIMATION_DURATION_MILLIS: u64 = 200;

/// Default fraction of the menu width past which a slow release opens.
pub const DEFAULT_OPEN_PERCENT: f32 = 0.5;

/// Gesture configuration shared by the list and all of its panels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SwipeConfig {
    /// Movement, in logical pixels, before a gesture is claimed.
    pub touch_slop: f32,
    /// Release speed (px/s) above which the release is treated as a fling.
    pub min_fling_velocity: f32,
    /// Release speeds are clamped to this (px/s).
    pub max_fling_velocity: f32,
    /// Drag fraction in `[0, 1]` at or above which a slow release opens.
    pub open_percent: f32,
    /// Default and maximum duration of open/close animations.
    pub animation_duration_millis: u64,
    pub easing: Easing,
}

impl Default for SwipeConfig {
    fn default() -> Self {
        Self {
            touch_slop: DRAG_THRESHOLD,
            min_fling_velocity: MIN_FLING_VELOCITY,
            max_fling_velocity: MAX_FLING_VELOCITY,
            open_percent: DEFAULT_OPEN_PERCENT,
            animation_duration_millis: DEFAULT_ANIMATION_DURATION_MILLIS,
            easing: Easing::SineOut,
        }
    }
}

impl SwipeConfig {
    pub fn with_touch_slop(mut self, touch_slop: f32) -> Self {
        self.touch_slop = touch_slop;
        self
    }

    pub fn with_open_percent(mut self, open_percent: f32) -> Self {
        self.open_percent = open_percent;
        self
    }

    pub fn with_animation_duration(mut self, millis: u64) -> Self {
        self.animation_duration_millis = millis;
        self
    }

    pub fn with_fling_velocity(mut self, min: f32, max: f32) -> Self {
        self.min_fling_velocity = min;
        self.max_fling_velocity = max;
        self
    }

    pub fn with_easing(mut self, easing: Easing) -> Self {
        self.easing = easing;
        self
    }

    /// Returns a copy with every out-of-range field clamped to the nearest
    /// valid value. Each adjustment is logged as a warning.
    pub fn sanitized(self) -> Self {
        let defaults = Self::default();
        let mut config = self;

        if !config.touch_slop.is_finite() || config.touch_slop < 0.0 {
            log::warn!(
                "touch_slop {} is invalid; using {}",
                config.touch_slop,
                defaults.touch_slop
            );
            config.touch_slop = defaults.touch_slop;
        }
        if !config.min_fling_velocity.is_finite() || config.min_fling_velocity < 0.0 {
            log::warn!(
                "min_fling_velocity {} is invalid; using 0",
                config.min_fling_velocity
            );
            config.min_fling_velocity = 0.0;
        }
        if config.max_fling_velocity.is_nan() || config.max_fling_velocity < config.min_fling_velocity
        {
            log::warn!(
                "max_fling_velocity {} is below min_fling_velocity {}; clamping",
                config.max_fling_velocity,
                config.min_fling_velocity
            );
            config.max_fling_velocity = config.min_fling_velocity;
        }
        config.open_percent = sanitize_open_percent(config.open_percent);
        config.animation_duration_millis =
            sanitize_animation_duration(config.animation_duration_millis);
        config
    }
}

/// Clamps an open-percent threshold into `[0, 1]`; NaN becomes the default.
pub(crate) fn sanitize_open_percent(open_percent: f32) -> f32 {
    if open_percent.is_nan() {
        log::warn!("open_percent is NaN; using {DEFAULT_OPEN_PERCENT}");
        return DEFAULT_OPEN_PERCENT;
    }
    let clamped = open_percent.clamp(0.0, 1.0);
    if clamped != open_percent {
        log::warn!("open_percent {open_percent} clamped to {clamped}");
    }
    clamped
}

/// Animations need at least one millisecond; 0 is raised to 1.
pub(crate) fn sanitize_animation_duration(millis: u64) -> u64 {
    if millis == 0 {
        log::warn!("animation_duration_millis 0 is invalid; using 1");
        return 1;
    }
    millis
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_platform_conventions() {
        let config = SwipeConfig::default();
        assert_eq!(config.touch_slop, 8.0);
        assert_eq!(config.open_percent, 0.5);
        assert_eq!(config.animation_duration_millis, 200);
        assert_eq!(config.easing, Easing::SineOut);
    }

    #[test]
    fn sanitized_clamps_to_nearest_valid_value() {
        let config = SwipeConfig::default()
            .with_open_percent(1.7)
            .with_touch_slop(-3.0)
            .with_fling_velocity(-10.0, f32::NAN)
            .sanitized();
        assert_eq!(config.open_percent, 1.0);
        assert_eq!(config.touch_slop, DRAG_THRESHOLD);
        assert_eq!(config.min_fling_velocity, 0.0);
        assert_eq!(config.max_fling_velocity, 0.0);

        let config = SwipeConfig::default().with_open_percent(-0.2).sanitized();
        assert_eq!(config.open_percent, 0.0);
    }

    #[test]
    fn zero_animation_duration_is_raised_to_one_millisecond() {
        let config = SwipeConfig::default().with_animation_duration(0).sanitized();
        assert_eq!(config.animation_duration_millis, 1);

        let config = SwipeConfig::default().with_animation_duration(350).sanitized();
        assert_eq!(config.animation_duration_millis, 350);
    }

    #[test]
    fn valid_config_is_unchanged() {
        let config = SwipeConfig::default().with_open_percent(0.3);
        assert_eq!(config.sanitized(), config);
    }
}
