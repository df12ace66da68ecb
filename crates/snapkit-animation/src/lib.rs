//! Animation system for snapkit
//!
//! Spring physics with an explicit `step(dt)` driver. Nothing in this crate
//! schedules frames: the host calls [`MotionSettler::step`] from whatever
//! timer, frame callback or test loop it has.

pub mod settler;
pub mod spring;

pub use settler::{AnimationId, MotionSettler, SettleStatus};
pub use spring::SpringSpec;

pub mod prelude {
    pub use crate::settler::{AnimationId, MotionSettler, SettleStatus};
    pub use crate::spring::SpringSpec;
}
