//! Gesture recognisers built on raw [`PointerEvent`](super::PointerEvent)s.

pub mod drag;
pub mod tap;

pub use drag::{CaptureDecision, DragGestureTracker, DragOrigin, GestureSample, TravelBounds};
pub use tap::TapGesture;
