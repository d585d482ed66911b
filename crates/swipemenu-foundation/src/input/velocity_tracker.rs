//! Release-velocity estimation for horizontal swipes.
//!
//! Uses the impulse strategy: each pair of consecutive samples contributes
//! kinetic energy, and the accumulated energy is converted back into a
//! velocity. Compared to a least-squares fit this reacts faster to the last
//! few milliseconds of a fling, which is what decides open vs close.

/// Ring buffer size.
const HISTORY_SIZE: usize = 20;

/// Samples older than this, relative to the newest, are ignored.
const HORIZON_MS: i64 = 100;

/// A gap this long between samples means the pointer stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

#[derive(Clone, Copy, Debug)]
struct Sample {
    time_ms: i64,
    position: f32,
}

/// Tracks positions along one axis and estimates the velocity at release.
///
/// ```ignore
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_data_point(event.uptime_millis, event.position.x);
/// let px_per_sec = tracker.calculate_velocity_with_max(MAX_FLING_VELOCITY);
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    samples: [Option<Sample>; HISTORY_SIZE],
    newest: usize,
}

impl Default for VelocityTracker1D {
    fn default() -> Self {
        Self::new()
    }
}

impl VelocityTracker1D {
    pub fn new() -> Self {
        Self {
            samples: [None; HISTORY_SIZE],
            newest: 0,
        }
    }

    /// Records the absolute `position` observed at `time_ms`.
    pub fn add_data_point(&mut self, time_ms: i64, position: f32) {
        self.newest = (self.newest + 1) % HISTORY_SIZE;
        self.samples[self.newest] = Some(Sample { time_ms, position });
    }

    /// Velocity in units per second; 0.0 with fewer than two usable samples.
    pub fn calculate_velocity(&self) -> f32 {
        let Some(newest) = self.samples[self.newest] else {
            return 0.0;
        };

        // Walk backwards from the newest sample, collecting positions and
        // their (non-positive) age relative to it.
        let mut positions = [0.0f32; HISTORY_SIZE];
        let mut ages = [0.0f32; HISTORY_SIZE];
        let mut count = 0;
        let mut cursor = self.newest;
        let mut later_time = newest.time_ms;

        while let Some(sample) = self.samples[cursor] {
            let age = newest.time_ms - sample.time_ms;
            let gap = (later_time - sample.time_ms).abs();
            if age > HORIZON_MS || gap > ASSUME_STOPPED_MS {
                break;
            }
            later_time = sample.time_ms;

            positions[count] = sample.position;
            ages[count] = -(age as f32);
            count += 1;
            if count == HISTORY_SIZE {
                break;
            }
            cursor = cursor.checked_sub(1).unwrap_or(HISTORY_SIZE - 1);
        }

        if count < 2 {
            return 0.0;
        }

        impulse_velocity(&positions[..count], &ages[..count]) * 1000.0
    }

    /// Like [`calculate_velocity`](Self::calculate_velocity), clamped to
    /// `±max_velocity`. A non-positive or non-finite cap yields 0.0.
    pub fn calculate_velocity_with_max(&self, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        let velocity = self.calculate_velocity();
        if velocity.is_nan() {
            return 0.0;
        }
        velocity.clamp(-max_velocity, max_velocity)
    }
}

/// `positions[0]`/`ages[0]` is the newest sample; ages are in milliseconds.
/// Returns units per millisecond.
fn impulse_velocity(positions: &[f32], ages: &[f32]) -> f32 {
    let oldest = positions.len() - 1;
    let mut work = 0.0f32;

    for i in (1..=oldest).rev() {
        let dt = ages[i] - ages[i - 1];
        if dt == 0.0 {
            continue;
        }
        let v_curr = (positions[i] - positions[i - 1]) / dt;
        let v_prev = energy_to_velocity(work);
        work += (v_curr - v_prev) * v_curr.abs();
        if i == oldest {
            work *= 0.5;
        }
    }

    energy_to_velocity(work)
}

/// E = ½·v² with unit mass.
#[inline]
fn energy_to_velocity(energy: f32) -> f32 {
    energy.signum() * (2.0 * energy.abs()).sqrt()
}
