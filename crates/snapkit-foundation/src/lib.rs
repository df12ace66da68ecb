//! Foundation elements for snapkit: pointer input, gestures and snap decisions.
//!
//! Everything here is synchronous and single-threaded. A host feeds pointer
//! events in receipt order, the gesture layer turns them into offsets and
//! release samples, and [`snap::SnapSurfaceController`] resolves a release
//! into a discrete [`snap::SnapPoint`].

pub mod error;
pub mod event_clock;
pub mod gesture_constants;
pub mod nodes;
pub mod scrollable;
pub mod snap;
pub mod velocity_tracker;

pub use error::SurfaceError;
pub use event_clock::EventClock;
pub use nodes::input::gestures::{
    CaptureDecision, DragGestureTracker, DragOrigin, GestureSample, TapGesture, TravelBounds,
};
pub use nodes::input::{
    PointerDispatcher, PointerEvent, PointerEventKind, PointerId, PointerSource,
    PointerSubscription,
};
pub use scrollable::{ContentScroll, ScrollPosition};
pub use snap::{
    decide_target, ControllerPhase, ControllerState, DecisionConfig, DismissRule,
    ResolvedSnaps, SnapCommand, SnapFamily, SnapPoint, SnapSurfaceController, SnapTable,
};
pub use velocity_tracker::VelocityTracker1D;

pub mod prelude {
    pub use crate::error::SurfaceError;
    pub use crate::gesture_constants::*;
    pub use crate::nodes::input::gestures::{
        CaptureDecision, DragGestureTracker, GestureSample, TapGesture, TravelBounds,
    };
    pub use crate::nodes::input::prelude::*;
    pub use crate::scrollable::{ContentScroll, ScrollPosition};
    pub use crate::snap::{
        decide_target, DecisionConfig, DismissRule, SnapPoint, SnapSurfaceController, SnapTable,
    };
    pub use snapkit_ui_graphics::{Axis, Point};
}
