//! Shared gesture constants for snap surfaces.
//!
//! All distances are logical pixels and all velocities px/s. Presenters copy
//! these into their configuration, so hosts can override any of them per
//! surface.

/// Movement, in logical pixels, after which a press stops counting as a tap.
///
/// A press on the scrim that is released within this distance dismisses the
/// surface; anything further is treated as an abandoned drag.
pub const TAP_SLOP: f32 = 8.0;

/// Release speed above which the flick direction decides the target snap.
pub const VELOCITY_THRESHOLD: f32 = 800.0;

/// Distance past the most-closed resting point that turns a slow release into
/// a dismiss.
pub const DISMISS_SLACK: f32 = 50.0;

/// Width of the band along the screen edge that can start dragging a closed
/// drawer.
pub const EDGE_ACTIVATION_WIDTH: f32 = 15.0;

/// Fraction of pointer movement applied when dragging past the most-open
/// resting point.
pub const ELASTIC_OPEN_END: f32 = 0.05;

/// Content scroll offsets at or below this count as "at the top".
pub const SCROLL_TOP_EPSILON: f32 = 0.5;

/// Maximum release velocity in logical pixels per second.
///
/// Matches Android's default maximum fling velocity (ViewConfiguration) on a
/// baseline density.
pub const MAX_FLING_VELOCITY: f32 = 8_000.0;
