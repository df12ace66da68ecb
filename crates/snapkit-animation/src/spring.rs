//! Damped spring configuration and integration.

/// Longest simulated interval per integration sub-step, in seconds.
///
/// Frames longer than this are split so the integrator stays stable when the
/// host stalls or steps with large `dt`.
pub const MAX_SUBSTEP_SECONDS: f32 = 0.001;

/// Longest interval simulated by one call to [`SpringSpec::integrate`].
///
/// A frame that arrives after a long stall is treated as this long. Every
/// preset has come to rest well before it.
pub const MAX_SIMULATED_SECONDS: f32 = 1.0;

/// Spring animation configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SpringSpec {
    /// Damping ratio. 1.0 = critically damped, < 1.0 = under-damped (bouncy), > 1.0 = over-damped.
    pub damping_ratio: f32,
    /// Stiffness constant. Higher values = faster animation.
    pub stiffness: f32,
    /// Mass of the simulated body.
    pub mass: f32,
    /// Velocity (px/s) below which the spring may come to rest.
    pub velocity_threshold: f32,
    /// Distance (px) from the target below which the spring may come to rest.
    pub position_threshold: f32,
}

impl SpringSpec {
    const VELOCITY_THRESHOLD: f32 = 1.0;
    const POSITION_THRESHOLD: f32 = 0.1;

    /// Critically damped spring with the given stiffness and mass.
    pub fn critical(stiffness: f32, mass: f32) -> Self {
        Self {
            damping_ratio: 1.0,
            stiffness,
            mass,
            velocity_threshold: Self::VELOCITY_THRESHOLD,
            position_threshold: Self::POSITION_THRESHOLD,
        }
    }

    /// Spring used when a surface first animates in. Fastest of the presets.
    pub fn open() -> Self {
        Self::critical(400.0, 0.8)
    }

    /// Spring used between resting snap points.
    pub fn snap() -> Self {
        Self::critical(300.0, 0.8)
    }

    /// Spring used for the exit animation. Softest of the presets.
    pub fn dismiss() -> Self {
        Self::critical(200.0, 0.8)
    }

    /// Builds a spec from raw `stiffness / damping / mass` coefficients, the
    /// way web motion libraries express springs (e.g. `300 / 25 / 0.8`).
    pub fn from_coefficients(stiffness: f32, damping: f32, mass: f32) -> Self {
        let critical = 2.0 * (stiffness * mass).sqrt();
        let damping_ratio = if critical > 0.0 {
            damping / critical
        } else {
            1.0
        };
        Self {
            damping_ratio,
            ..Self::critical(stiffness, mass)
        }
    }

    /// Absolute damping coefficient derived from the ratio.
    pub fn damping(&self) -> f32 {
        2.0 * self.damping_ratio * (self.stiffness * self.mass).sqrt()
    }

    /// Whether a body at `value` moving at `velocity` counts as resting on `target`.
    pub fn is_at_rest(&self, value: f32, velocity: f32, target: f32) -> bool {
        velocity.abs() < self.velocity_threshold
            && (value - target).abs() < self.position_threshold
    }

    /// Advances `(value, velocity)` toward `target` by `dt` seconds.
    ///
    /// Semi-implicit Euler in equal sub-steps of at most
    /// [`MAX_SUBSTEP_SECONDS`]. `dt` is capped at [`MAX_SIMULATED_SECONDS`]
    /// and integration stops early once the body is at rest.
    pub fn integrate(&self, value: f32, velocity: f32, target: f32, dt: f32) -> (f32, f32) {
        if !dt.is_finite() || dt <= 0.0 {
            return (value, velocity);
        }
        let dt = dt.min(MAX_SIMULATED_SECONDS);
        let steps = (dt / MAX_SUBSTEP_SECONDS).ceil().max(1.0) as u32;
        let step = dt / steps as f32;
        let mass = self.mass.max(f32::EPSILON);
        let damping = self.damping();
        let mut value = value;
        let mut velocity = velocity;

        for _ in 0..steps {
            // F = -k * x - c * v
            let displacement = value - target;
            let force = -self.stiffness * displacement - damping * velocity;
            velocity += force / mass * step;
            value += velocity * step;

            if self.is_at_rest(value, velocity, target) {
                break;
            }
        }

        (value, velocity)
    }
}

impl Default for SpringSpec {
    fn default() -> Self {
        Self::snap()
    }
}
