//! Release velocity for drag gestures.
//!
//! The snap decision wants the "flick" intent at the moment of release, not
//! an average over the whole gesture. The tracker therefore reports the slope
//! between the two most recent distinct samples, and zero when the pointer
//! rested before it was lifted.

/// Ring buffer size for velocity tracking samples.
const HISTORY_SIZE: usize = 20;

/// If no movement for this duration, assume the pointer has stopped.
pub const ASSUME_STOPPED_MS: i64 = 40;

/// A data point with timestamp.
#[derive(Clone, Copy, Debug, Default)]
struct DataPointAtTime {
    time_ms: i64,
    data_point: f32,
}

/// 1D instantaneous velocity tracker.
///
/// # Usage
/// ```
/// use snapkit_foundation::VelocityTracker1D;
///
/// let mut tracker = VelocityTracker1D::new();
/// tracker.add_data_point(0, 0.0);
/// tracker.add_data_point(10, 10.0);
/// let velocity = tracker.velocity_at(12); // px/sec
/// assert!((velocity - 1000.0).abs() < 1.0);
/// ```
#[derive(Clone, Debug)]
pub struct VelocityTracker1D {
    /// Ring buffer of samples.
    samples: [Option<DataPointAtTime>; HISTORY_SIZE],
    /// Current write index in ring buffer.
    index: usize,
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
            index: 0,
        }
    }

    /// Adds a position sample at the given time (milliseconds).
    pub fn add_data_point(&mut self, time_ms: i64, data_point: f32) {
        self.index = (self.index + 1) % HISTORY_SIZE;
        self.samples[self.index] = Some(DataPointAtTime {
            time_ms,
            data_point,
        });
    }

    /// Velocity in units/second for a release happening at `release_time_ms`.
    ///
    /// Returns 0.0 with fewer than two samples, or when the pointer sat still
    /// for more than [`ASSUME_STOPPED_MS`] before the release.
    pub fn velocity_at(&self, release_time_ms: i64) -> f32 {
        let Some(newest) = self.samples[self.index] else {
            return 0.0;
        };
        if release_time_ms - newest.time_ms > ASSUME_STOPPED_MS {
            return 0.0;
        }

        let mut current_index = self.index;
        for _ in 1..HISTORY_SIZE {
            current_index = if current_index == 0 {
                HISTORY_SIZE - 1
            } else {
                current_index - 1
            };
            let Some(sample) = self.samples[current_index] else {
                break;
            };
            let dt = newest.time_ms - sample.time_ms;
            if dt > ASSUME_STOPPED_MS {
                break;
            }
            if dt > 0 {
                let velocity = (newest.data_point - sample.data_point) / dt as f32 * 1000.0;
                return if velocity.is_finite() { velocity } else { 0.0 };
            }
        }
        0.0
    }

    /// Velocity at release, capped to `max_velocity`.
    pub fn velocity_at_with_max(&self, release_time_ms: i64, max_velocity: f32) -> f32 {
        if !max_velocity.is_finite() || max_velocity <= 0.0 {
            return 0.0;
        }
        self.velocity_at(release_time_ms)
            .clamp(-max_velocity, max_velocity)
    }

    /// Clears all tracked data.
    pub fn reset(&mut self) {
        self.samples = [None; HISTORY_SIZE];
        self.index = 0;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_tracker_returns_zero() {
        let tracker = VelocityTracker1D::new();
        assert_eq!(tracker.velocity_at(0), 0.0);
    }

    #[test]
    fn test_single_point_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 100.0);
        assert_eq!(tracker.velocity_at(0), 0.0);
    }

    #[test]
    fn velocity_reflects_the_final_flick() {
        let mut tracker = VelocityTracker1D::new();
        // Slow drag...
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(16, 2.0);
        tracker.add_data_point(32, 4.0);
        // ...then a fast flick.
        tracker.add_data_point(48, 40.0);

        let velocity = tracker.velocity_at(48);
        assert!(
            (velocity - 2250.0).abs() < 1.0,
            "expected the last segment's slope, got {}",
            velocity
        );
    }

    #[test]
    fn test_negative_velocity() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 300.0);
        tracker.add_data_point(10, 200.0);
        tracker.add_data_point(20, 100.0);

        let velocity = tracker.velocity_at(20);
        assert!(
            (velocity + 10_000.0).abs() < 1.0,
            "Expected -10000, got {}",
            velocity
        );
    }

    #[test]
    fn duplicate_timestamps_look_further_back() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 50.0);
        tracker.add_data_point(10, 60.0);

        let velocity = tracker.velocity_at(10);
        assert!((velocity - 6000.0).abs() < 1.0, "got {}", velocity);
    }

    #[test]
    fn pause_before_release_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);

        assert!(tracker.velocity_at(10) > 0.0);
        assert_eq!(tracker.velocity_at(10 + ASSUME_STOPPED_MS + 1), 0.0);
    }

    #[test]
    fn test_gap_over_stopped_threshold_returns_zero() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(ASSUME_STOPPED_MS + 1, 100.0);

        assert_eq!(tracker.velocity_at(ASSUME_STOPPED_MS + 1), 0.0);
    }

    #[test]
    fn test_velocity_capped() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(1, 10_000.0);
        assert_eq!(tracker.velocity_at_with_max(1, 8_000.0), 8_000.0);

        tracker.reset();
        tracker.add_data_point(0, 10_000.0);
        tracker.add_data_point(1, 0.0);
        assert_eq!(tracker.velocity_at_with_max(1, 8_000.0), -8_000.0);
        assert_eq!(tracker.velocity_at_with_max(1, f32::NAN), 0.0);
    }

    #[test]
    fn test_reset() {
        let mut tracker = VelocityTracker1D::new();
        tracker.add_data_point(0, 0.0);
        tracker.add_data_point(10, 100.0);
        tracker.reset();
        assert_eq!(tracker.velocity_at(10), 0.0);
        assert!(tracker.samples.iter().all(Option::is_none));
    }
}
