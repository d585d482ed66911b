//! Time-based tween animation with easing curves.
//!
//! A [`Tween`] moves a value from a start to a target over a fixed duration.
//! It is driven by [`Tween::advance`] with monotonically increasing frame
//! timestamps in nanoseconds; the first timestamp anchors the animation.

/// Trait for types that can be linearly interpolated.
pub trait Lerp {
    fn lerp(&self, target: &Self, fraction: f32) -> Self;
}

impl Lerp for f32 {
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        self + (target - self) * fraction
    }
}

impl Lerp for i32 {
    /// Rounds to the nearest integer. Rounding keeps the interpolation
    /// monotonic as long as `fraction` is.
    fn lerp(&self, target: &Self, fraction: f32) -> Self {
        let start = *self as f64;
        let delta = (*target as f64) - start;
        (start + delta * fraction as f64).round() as i32
    }
}

/// Easing functions for animations.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Easing {
    /// Linear interpolation (no easing).
    LinearEasing,
    /// Quarter sine wave: starts at full speed and decelerates to rest.
    SineOut,
    /// Android `Scroller`'s default viscous-fluid curve.
    ViscousFluid,
}

impl Easing {
    /// Apply the easing function to a linear fraction [0, 1].
    ///
    /// Every curve is monotonic, maps 0 to 0 and 1 to exactly 1.
    pub fn transform(&self, fraction: f32) -> f32 {
        if fraction <= 0.0 {
            return 0.0;
        }
        if fraction >= 1.0 {
            return 1.0;
        }
        match self {
            Easing::LinearEasing => fraction,
            Easing::SineOut => (fraction * std::f32::consts::FRAC_PI_2).sin(),
            Easing::ViscousFluid => viscous_fluid_normalized(fraction),
        }
    }
}

const VISCOUS_FLUID_SCALE: f32 = 8.0;

fn viscous_fluid(x: f32) -> f32 {
    let x = x * VISCOUS_FLUID_SCALE;
    if x < 1.0 {
        x - (1.0 - (-x).exp())
    } else {
        // exp(-1)
        let start = 0.367_879_44_f32;
        let x = 1.0 - (1.0 - x).exp();
        start + x * (1.0 - start)
    }
}

fn viscous_fluid_normalized(fraction: f32) -> f32 {
    let normalize = 1.0 / viscous_fluid(1.0);
    (normalize * viscous_fluid(fraction)).clamp(0.0, 1.0)
}

/// Animation specification combining duration and easing.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AnimationSpec {
    /// Duration in milliseconds.
    pub duration_millis: u64,
    /// Easing function to apply.
    pub easing: Easing,
}

impl AnimationSpec {
    /// Create a tween animation with duration and easing.
    pub fn tween(duration_millis: u64, easing: Easing) -> Self {
        Self {
            duration_millis,
            easing,
        }
    }

    /// Create a linear tween animation.
    pub fn linear(duration_millis: u64) -> Self {
        Self::tween(duration_millis, Easing::LinearEasing)
    }
}

impl Default for AnimationSpec {
    fn default() -> Self {
        Self::tween(200, Easing::SineOut)
    }
}

/// A value animating from `start` to `target`.
///
/// The first call to [`advance`](Tween::advance) records the start time, so
/// a tween armed between frames begins on the next frame rather than
/// jumping ahead.
#[derive(Debug, Clone)]
pub struct Tween<T: Lerp + Clone> {
    start: T,
    target: T,
    current: T,
    spec: AnimationSpec,
    start_time_nanos: Option<u64>,
    finished: bool,
}

impl<T: Lerp + Clone> Tween<T> {
    pub fn new(start: T, target: T, spec: AnimationSpec) -> Self {
        Self {
            current: start.clone(),
            start,
            target,
            spec,
            start_time_nanos: None,
            finished: false,
        }
    }

    pub fn start(&self) -> &T {
        &self.start
    }

    pub fn target(&self) -> &T {
        &self.target
    }

    pub fn spec(&self) -> AnimationSpec {
        self.spec
    }

    /// The last value produced by [`advance`](Tween::advance).
    pub fn value(&self) -> T {
        self.current.clone()
    }

    pub fn is_finished(&self) -> bool {
        self.finished
    }

    /// Step the animation to `frame_time_nanos` and return the new value.
    ///
    /// Once the elapsed time reaches the duration the value is exactly the
    /// target and the tween reports finished.
    pub fn advance(&mut self, frame_time_nanos: u64) -> T {
        if self.finished {
            return self.current.clone();
        }

        let start_time = *self.start_time_nanos.get_or_insert(frame_time_nanos);
        let elapsed_nanos = frame_time_nanos.saturating_sub(start_time);
        let duration_nanos = (self.spec.duration_millis * 1_000_000).max(1);
        let linear_progress = (elapsed_nanos as f64 / duration_nanos as f64).min(1.0) as f32;

        if linear_progress >= 1.0 || self.spec.duration_millis == 0 {
            self.current = self.target.clone();
            self.finished = true;
        } else {
            let progress = self.spec.easing.transform(linear_progress);
            self.current = self.start.lerp(&self.target, progress);
        }
        self.current.clone()
    }
}

#[cfg(test)]
#[path = "tests/animation_tests.rs"]
mod tests;
