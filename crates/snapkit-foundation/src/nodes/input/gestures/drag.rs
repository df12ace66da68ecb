//! One-dimensional drag tracking for snap surfaces.
//!
//! [`DragGestureTracker`] turns pointer events into a live surface offset and,
//! on release, a [`GestureSample`]. It does no hit testing of its own: the
//! owner decides whether a press is captured and passes that in as a
//! [`CaptureDecision`].

use crate::gesture_constants::MAX_FLING_VELOCITY;
use crate::nodes::input::types::{PointerEvent, PointerId};
use crate::velocity_tracker::VelocityTracker1D;
use snapkit_ui_graphics::{Axis, Point};

/// What the owner of a surface decided to do with a pointer-down.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureDecision {
    /// Start a surface drag.
    Capture,
    /// Leave the gesture to scrollable content inside the surface.
    RouteToContent,
    /// Not ours (outside the surface or the edge band).
    Ignore,
}

/// Pointer position and surface offset at the moment a drag was captured.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragOrigin {
    pub position: Point,
    pub captured_offset: f32,
    pub pointer: PointerId,
}

/// Result of a completed drag, in closing-offset space.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct GestureSample {
    /// Pointer travel since capture, before elastic resistance.
    pub delta_from_origin: f32,
    /// Instantaneous release velocity in px/s; positive moves toward closed.
    pub velocity: f32,
    /// Surface offset at release, after elastic resistance.
    pub offset: f32,
}

/// Travel range of a drag with elastic resistance past the open end.
///
/// Inside `[min, max]` the surface follows the pointer 1:1. Past `min` (the
/// most open point) the overshoot is scaled by `elastic` and never goes below
/// `hard_min`. `max` is the terminal offset and a hard stop.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct TravelBounds {
    pub min: f32,
    pub max: f32,
    pub hard_min: f32,
    pub elastic: f32,
}

impl TravelBounds {
    /// Plain clamp to `[min, max]`.
    pub fn new(min: f32, max: f32) -> Self {
        Self {
            min,
            max,
            hard_min: min,
            elastic: 0.0,
        }
    }

    pub fn with_hard_min(mut self, hard_min: f32) -> Self {
        self.hard_min = hard_min.min(self.min);
        self
    }

    pub fn with_elastic(mut self, elastic: f32) -> Self {
        self.elastic = elastic.clamp(0.0, 1.0);
        self
    }

    pub fn apply(&self, proposed: f32) -> f32 {
        if !proposed.is_finite() {
            return self.min;
        }
        let resisted = if proposed < self.min {
            self.min - (self.min - proposed) * self.elastic
        } else {
            proposed
        };
        resisted.clamp(self.hard_min, self.max)
    }
}

/// Tracks a single captured pointer along one axis.
///
/// `direction` maps pointer movement into offset space: `1.0` when moving the
/// pointer along the axis closes the surface (a bottom sheet dragged down),
/// `-1.0` when it opens it (a left drawer dragged right).
#[derive(Debug)]
pub struct DragGestureTracker {
    axis: Axis,
    direction: f32,
    origin: Option<DragOrigin>,
    bounds: TravelBounds,
    velocity: VelocityTracker1D,
    live_offset: f32,
    last_position: Point,
}

impl DragGestureTracker {
    pub fn new(axis: Axis, direction: f32) -> Self {
        Self {
            axis,
            direction: if direction < 0.0 { -1.0 } else { 1.0 },
            origin: None,
            bounds: TravelBounds::new(0.0, 0.0),
            velocity: VelocityTracker1D::new(),
            live_offset: 0.0,
            last_position: Point::ZERO,
        }
    }

    /// Vertical tracker where dragging down closes.
    pub fn sheet() -> Self {
        Self::new(Axis::Vertical, 1.0)
    }

    /// Horizontal tracker where dragging right opens.
    pub fn drawer() -> Self {
        Self::new(Axis::Horizontal, -1.0)
    }

    pub fn axis(&self) -> Axis {
        self.axis
    }

    pub fn is_dragging(&self) -> bool {
        self.origin.is_some()
    }

    pub fn origin(&self) -> Option<DragOrigin> {
        self.origin
    }

    pub fn live_offset(&self) -> f32 {
        self.live_offset
    }

    /// Starts a drag when `decision` is [`CaptureDecision::Capture`].
    ///
    /// Returns `true` if the press was captured. A second press while a drag
    /// is in progress is ignored.
    pub fn on_pointer_down(
        &mut self,
        event: &PointerEvent,
        decision: CaptureDecision,
        captured_offset: f32,
        bounds: TravelBounds,
    ) -> bool {
        if let Some(origin) = self.origin {
            log::trace!(
                "pointer {} down ignored; pointer {} already captured",
                event.id,
                origin.pointer
            );
            return false;
        }
        match decision {
            CaptureDecision::Capture => {}
            CaptureDecision::RouteToContent => {
                log::trace!("pointer {} routed to content scroll", event.id);
                return false;
            }
            CaptureDecision::Ignore => {
                log::trace!("pointer {} down outside capture zone", event.id);
                return false;
            }
        }

        self.bounds = bounds;
        self.origin = Some(DragOrigin {
            position: event.position,
            captured_offset,
            pointer: event.id,
        });
        self.live_offset = captured_offset;
        self.last_position = event.position;
        self.velocity.reset();
        self.velocity
            .add_data_point(event.time_ms, event.position.along(self.axis));
        event.consume();
        log::trace!(
            "pointer {} captured at offset {:.1}",
            event.id,
            captured_offset
        );
        true
    }

    /// Applies a move of the captured pointer, returning the new live offset.
    pub fn on_pointer_move(&mut self, event: &PointerEvent) -> Option<f32> {
        let origin = self.captured(event)?;
        self.track(origin, event);
        event.consume();
        Some(self.live_offset)
    }

    /// Ends the drag and produces its release sample.
    ///
    /// A release with no captured drag (or from another pointer) is a stale
    /// gesture and yields `None`.
    pub fn on_pointer_up(&mut self, event: &PointerEvent) -> Option<GestureSample> {
        let Some(origin) = self.origin else {
            log::trace!("stale pointer {} up without capture", event.id);
            return None;
        };
        if origin.pointer != event.id {
            log::trace!(
                "pointer {} up ignored; pointer {} is captured",
                event.id,
                origin.pointer
            );
            return None;
        }
        if event.position != self.last_position {
            self.track(origin, event);
        }
        let velocity =
            self.velocity.velocity_at_with_max(event.time_ms, MAX_FLING_VELOCITY) * self.direction;
        let delta_from_origin = self.axis_delta(origin, event.position);
        self.origin = None;
        event.consume();

        Some(GestureSample {
            delta_from_origin,
            velocity,
            offset: self.live_offset,
        })
    }

    /// Abandons the drag without a release sample.
    pub fn cancel(&mut self) -> Option<DragOrigin> {
        self.velocity.reset();
        self.origin.take()
    }

    fn captured(&self, event: &PointerEvent) -> Option<DragOrigin> {
        self.origin.filter(|origin| origin.pointer == event.id)
    }

    fn axis_delta(&self, origin: DragOrigin, position: Point) -> f32 {
        (position.along(self.axis) - origin.position.along(self.axis)) * self.direction
    }

    fn track(&mut self, origin: DragOrigin, event: &PointerEvent) {
        let delta = self.axis_delta(origin, event.position);
        self.live_offset = self.bounds.apply(origin.captured_offset + delta);
        self.last_position = event.position;
        self.velocity
            .add_data_point(event.time_ms, event.position.along(self.axis));
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gesture_constants::ELASTIC_OPEN_END;

    fn sheet_bounds() -> TravelBounds {
        TravelBounds::new(100.0, 1000.0)
            .with_hard_min(0.0)
            .with_elastic(ELASTIC_OPEN_END)
    }

    #[test]
    fn bounds_follow_pointer_inside_range() {
        let bounds = sheet_bounds();
        assert_eq!(bounds.apply(400.0), 400.0);
        assert_eq!(bounds.apply(100.0), 100.0);
    }

    #[test]
    fn bounds_resist_past_open_end() {
        let bounds = sheet_bounds();
        // 100 px past the most open point moves the surface 5 px.
        assert!((bounds.apply(0.0) - 95.0).abs() < 1e-4);
    }

    #[test]
    fn closed_end_is_a_hard_stop() {
        let bounds = sheet_bounds();
        assert_eq!(bounds.apply(1500.0), 1000.0);
        assert!(bounds.apply(-100_000.0) >= 0.0);
        assert_eq!(TravelBounds::new(0.0, 300.0).apply(-20.0), 0.0);
        assert_eq!(TravelBounds::new(0.0, 300.0).apply(f32::NAN), 0.0);
    }

    #[test]
    fn sheet_drag_tracks_pointer_one_to_one() {
        let mut tracker = DragGestureTracker::sheet();
        let down = PointerEvent::down(50.0, 450.0, 0);
        assert!(tracker.on_pointer_down(&down, CaptureDecision::Capture, 400.0, sheet_bounds()));
        assert!(down.is_consumed());

        assert_eq!(
            tracker.on_pointer_move(&PointerEvent::moved(50.0, 500.0, 16)),
            Some(450.0)
        );
        assert_eq!(
            tracker.on_pointer_move(&PointerEvent::moved(80.0, 380.0, 32)),
            Some(330.0)
        );
    }

    #[test]
    fn drawer_drag_maps_rightward_motion_to_opening() {
        let mut tracker = DragGestureTracker::drawer();
        let bounds = TravelBounds::new(0.0, 300.0);
        assert!(tracker.on_pointer_down(
            &PointerEvent::down(5.0, 200.0, 0),
            CaptureDecision::Capture,
            300.0,
            bounds
        ));
        assert_eq!(
            tracker.on_pointer_move(&PointerEvent::moved(105.0, 200.0, 16)),
            Some(200.0)
        );
        let sample = tracker
            .on_pointer_up(&PointerEvent::up(205.0, 200.0, 32))
            .expect("captured release");
        assert_eq!(sample.offset, 100.0);
        assert_eq!(sample.delta_from_origin, -200.0);
        assert!(sample.velocity < 0.0, "opening flick is negative");
    }

    #[test]
    fn ignored_and_routed_presses_do_not_capture() {
        let mut tracker = DragGestureTracker::sheet();
        let down = PointerEvent::down(0.0, 0.0, 0);
        assert!(!tracker.on_pointer_down(&down, CaptureDecision::Ignore, 0.0, sheet_bounds()));
        assert!(!tracker.on_pointer_down(
            &down,
            CaptureDecision::RouteToContent,
            0.0,
            sheet_bounds()
        ));
        assert!(!tracker.is_dragging());
        assert!(!down.is_consumed());
        assert_eq!(tracker.on_pointer_move(&PointerEvent::moved(0.0, 50.0, 5)), None);
    }

    #[test]
    fn stale_release_is_a_noop() {
        let mut tracker = DragGestureTracker::sheet();
        assert_eq!(tracker.on_pointer_up(&PointerEvent::up(0.0, 0.0, 0)), None);
    }

    #[test]
    fn other_pointers_are_ignored() {
        let mut tracker = DragGestureTracker::sheet();
        tracker.on_pointer_down(
            &PointerEvent::down(0.0, 400.0, 0).with_id(1),
            CaptureDecision::Capture,
            400.0,
            sheet_bounds(),
        );
        let foreign = PointerEvent::moved(0.0, 600.0, 10).with_id(2);
        assert_eq!(tracker.on_pointer_move(&foreign), None);
        assert!(!foreign.is_consumed());
        assert_eq!(tracker.on_pointer_up(&PointerEvent::up(0.0, 600.0, 20).with_id(2)), None);
        assert!(tracker.is_dragging());
        assert!(!tracker.on_pointer_down(
            &PointerEvent::down(0.0, 0.0, 30).with_id(3),
            CaptureDecision::Capture,
            0.0,
            sheet_bounds()
        ));
    }

    #[test]
    fn release_velocity_is_instantaneous() {
        let mut tracker = DragGestureTracker::sheet();
        tracker.on_pointer_down(
            &PointerEvent::down(0.0, 400.0, 0),
            CaptureDecision::Capture,
            400.0,
            sheet_bounds(),
        );
        // Slow drift down, then a quick flick up.
        tracker.on_pointer_move(&PointerEvent::moved(0.0, 410.0, 100));
        tracker.on_pointer_move(&PointerEvent::moved(0.0, 420.0, 200));
        let sample = tracker
            .on_pointer_up(&PointerEvent::up(0.0, 400.0, 210))
            .expect("captured release");
        assert!(
            (sample.velocity + 2000.0).abs() < 1.0,
            "expected the final flick, got {}",
            sample.velocity
        );
        assert_eq!(sample.offset, 400.0);
        assert_eq!(sample.delta_from_origin, 0.0);
        assert!(!tracker.is_dragging());
    }

    #[test]
    fn release_after_pause_has_no_velocity() {
        let mut tracker = DragGestureTracker::sheet();
        tracker.on_pointer_down(
            &PointerEvent::down(0.0, 400.0, 0),
            CaptureDecision::Capture,
            400.0,
            sheet_bounds(),
        );
        tracker.on_pointer_move(&PointerEvent::moved(0.0, 500.0, 10));
        let sample = tracker
            .on_pointer_up(&PointerEvent::up(0.0, 500.0, 300))
            .expect("captured release");
        assert_eq!(sample.velocity, 0.0);
        assert_eq!(sample.offset, 500.0);
    }

    #[test]
    fn cancel_drops_origin() {
        let mut tracker = DragGestureTracker::sheet();
        tracker.on_pointer_down(
            &PointerEvent::down(0.0, 400.0, 0),
            CaptureDecision::Capture,
            400.0,
            sheet_bounds(),
        );
        assert!(tracker.cancel().is_some());
        assert!(!tracker.is_dragging());
        assert_eq!(tracker.on_pointer_up(&PointerEvent::up(0.0, 400.0, 10)), None);
    }
}
