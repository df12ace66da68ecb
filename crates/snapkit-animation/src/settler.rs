//! Drives one scalar toward a target with a damped spring.
//!
//! The settler owns no clock. Each call to [`MotionSettler::step`] advances
//! the simulation by the supplied `dt`, which keeps the physics deterministic
//! under test and lets hosts drive it from any frame source.

use crate::spring::SpringSpec;

/// Identifies one `animate_to` request so completion can be matched to it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AnimationId(u64);

/// Outcome of a single [`MotionSettler::step`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SettleStatus {
    /// Nothing is animating.
    Idle,
    /// The spring is still moving.
    Running,
    /// The animation reached its target during this step. Reported once.
    Completed(AnimationId),
}

#[derive(Debug, Clone, Copy)]
struct ActiveAnimation {
    id: AnimationId,
    target: f32,
    spec: SpringSpec,
}

/// Spring-driven scalar with interruptible targets.
#[derive(Debug, Clone)]
pub struct MotionSettler {
    value: f32,
    velocity: f32,
    active: Option<ActiveAnimation>,
    last_spec: SpringSpec,
    next_id: u64,
}

impl MotionSettler {
    /// Creates a settler resting at `initial`.
    pub fn new(initial: f32) -> Self {
        Self {
            value: initial,
            velocity: 0.0,
            active: None,
            last_spec: SpringSpec::default(),
            next_id: 1,
        }
    }

    pub fn value(&self) -> f32 {
        self.value
    }

    pub fn velocity(&self) -> f32 {
        self.velocity
    }

    pub fn is_animating(&self) -> bool {
        self.active.is_some()
    }

    pub fn current_animation(&self) -> Option<AnimationId> {
        self.active.map(|anim| anim.id)
    }

    /// Starts animating toward `target`.
    ///
    /// With `continuing_velocity` the spring starts from that velocity (for
    /// example the release velocity of a drag). Without it the in-flight
    /// velocity carries over, so replacing a running animation never causes a
    /// jump in position or speed.
    pub fn animate_to(
        &mut self,
        target: f32,
        spec: SpringSpec,
        continuing_velocity: Option<f32>,
    ) -> AnimationId {
        if let Some(velocity) = continuing_velocity.filter(|v| v.is_finite()) {
            self.velocity = velocity;
        }

        let id = AnimationId(self.next_id);
        self.next_id += 1;
        if let Some(previous) = self.active.replace(ActiveAnimation { id, target, spec }) {
            log::trace!(
                "settler: animation {:?} superseded by {:?} at value={:.2} velocity={:.2}",
                previous.id,
                id,
                self.value,
                self.velocity
            );
        }
        self.last_spec = spec;
        id
    }

    /// Retargets the running animation, keeping its spring and velocity.
    pub fn interrupt(&mut self, new_target: f32) -> AnimationId {
        let spec = self.active.map_or(self.last_spec, |anim| anim.spec);
        self.animate_to(new_target, spec, None)
    }

    /// Jumps to `value` and cancels any animation.
    pub fn snap_to(&mut self, value: f32) {
        self.value = value;
        self.velocity = 0.0;
        self.active = None;
    }

    /// Cancels any animation, leaving the value where it is.
    pub fn stop(&mut self) {
        self.velocity = 0.0;
        self.active = None;
    }

    /// Advances the simulation by `dt` seconds.
    pub fn step(&mut self, dt: f32) -> SettleStatus {
        let Some(anim) = self.active else {
            return SettleStatus::Idle;
        };
        if !dt.is_finite() || dt <= 0.0 {
            return SettleStatus::Running;
        }

        let (value, velocity) = anim
            .spec
            .integrate(self.value, self.velocity, anim.target, dt);
        self.value = value;
        self.velocity = velocity;

        if anim.spec.is_at_rest(self.value, self.velocity, anim.target) {
            self.value = anim.target;
            self.velocity = 0.0;
            self.active = None;
            SettleStatus::Completed(anim.id)
        } else {
            SettleStatus::Running
        }
    }
}

impl Default for MotionSettler {
    fn default() -> Self {
        Self::new(0.0)
    }
}

#[cfg(test)]
#[path = "tests/settler_tests.rs"]
mod tests;
