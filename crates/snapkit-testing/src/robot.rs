//! Robot-style driver for snap surfaces.
//!
//! The robot owns a virtual clock and plays the host's role: presses go to
//! the presenter, moves and releases go through the presenter's
//! [`PointerDispatcher`], and frames are delivered through
//! [`SurfacePresenter::on_frame`]. Every delivered frame records the
//! surface offset so tests can assert on motion continuity.
//!
//! # Example
//!
//! ```
//! use snapkit_testing::SurfaceRobot;
//! use snapkit_ui::{mount_surface, SurfaceConfig, SurfaceKind, SnapPoint};
//!
//! let sheet = mount_surface(SurfaceKind::Sheet, SurfaceConfig::sheet().with_extent(1000.0))
//!     .expect("valid config");
//! let mut robot = SurfaceRobot::new(sheet);
//! robot.presenter().open(None).expect("valid snap");
//! robot.wait_for_idle();
//!
//! // Drag the sheet down from Half and let go slowly.
//! robot.drag((200.0, 520.0), (200.0, 900.0), 300, 20);
//! robot.wait_for_idle();
//! assert_eq!(robot.presenter().current_snap(), Some(SnapPoint::Collapsed));
//! ```

use snapkit_foundation::{PointerDispatcher, PointerEvent, PointerId, SnapPoint};
use snapkit_ui::{SurfacePhase, SurfacePresenter};
use snapkit_ui_graphics::Point;

/// Default frame interval: 16 ms, close to 60 Hz.
pub const FRAME_MILLIS: i64 = 16;

/// Frames delivered by [`SurfaceRobot::wait_for_idle`] before giving up.
const MAX_IDLE_FRAMES: usize = 1_000;

/// Drives one presenter through scripted pointer input and frames.
pub struct SurfaceRobot {
    presenter: SurfacePresenter,
    dispatcher: PointerDispatcher,
    now_ms: i64,
    frame_millis: i64,
    pointer: PointerId,
    cursor: Point,
    frames: Vec<f32>,
}

impl SurfaceRobot {
    pub fn new(presenter: SurfacePresenter) -> Self {
        let dispatcher = presenter.dispatcher();
        // Prime the frame clock so the first advance produces motion.
        presenter.on_frame(0);
        Self {
            presenter,
            dispatcher,
            now_ms: 0,
            frame_millis: FRAME_MILLIS,
            pointer: 0,
            cursor: Point::ZERO,
            frames: Vec::new(),
        }
    }

    pub fn with_frame_millis(mut self, frame_millis: i64) -> Self {
        self.frame_millis = frame_millis.max(1);
        self
    }

    /// Uses `pointer` as the id of subsequent events.
    pub fn with_pointer(mut self, pointer: PointerId) -> Self {
        self.pointer = pointer;
        self
    }

    pub fn presenter(&self) -> &SurfacePresenter {
        &self.presenter
    }

    pub fn dispatcher(&self) -> &PointerDispatcher {
        &self.dispatcher
    }

    /// Virtual time in milliseconds.
    pub fn now_ms(&self) -> i64 {
        self.now_ms
    }

    /// Offsets recorded after each delivered frame.
    pub fn frames(&self) -> &[f32] {
        &self.frames
    }

    pub fn clear_frames(&mut self) {
        self.frames.clear();
    }

    /// Largest offset change between consecutive recorded frames.
    pub fn max_frame_jump(&self) -> f32 {
        self.frames
            .windows(2)
            .map(|pair| (pair[1] - pair[0]).abs())
            .fold(0.0, f32::max)
    }

    /// Presses at `(x, y)`. Returns whether the surface took the press.
    pub fn press(&mut self, x: f32, y: f32) -> bool {
        self.cursor = Point::new(x, y);
        let event = PointerEvent::down(x, y, self.now_ms).with_id(self.pointer);
        let taken = self.presenter.pointer_down(&event);
        log::trace!("robot: press ({}, {}) taken={}", x, y, taken);
        taken
    }

    /// Moves the pointer. Returns the number of subscribers that saw it.
    pub fn move_to(&mut self, x: f32, y: f32) -> usize {
        self.cursor = Point::new(x, y);
        let event = PointerEvent::moved(x, y, self.now_ms).with_id(self.pointer);
        self.dispatcher.dispatch(&event)
    }

    /// Releases the pointer at `(x, y)`.
    pub fn release(&mut self, x: f32, y: f32) -> usize {
        self.cursor = Point::new(x, y);
        let event = PointerEvent::up(x, y, self.now_ms).with_id(self.pointer);
        self.dispatcher.dispatch(&event)
    }

    /// Cancels the pointer at its last position.
    pub fn cancel(&mut self) -> usize {
        let event =
            PointerEvent::cancel(self.cursor.x, self.cursor.y, self.now_ms).with_id(self.pointer);
        self.dispatcher.dispatch(&event)
    }

    /// Press, release in place.
    pub fn tap(&mut self, x: f32, y: f32) -> bool {
        let taken = self.press(x, y);
        self.release(x, y);
        taken
    }

    pub fn hover(&mut self, x: f32, y: f32) -> bool {
        self.cursor = Point::new(x, y);
        self.presenter.on_pointer_hover(self.cursor)
    }

    /// Drags from `from` to `to` over `duration_ms`, in `steps` evenly
    /// spaced moves, and releases at `to` together with the last move.
    ///
    /// Frames keep running during the drag.
    pub fn drag(&mut self, from: (f32, f32), to: (f32, f32), duration_ms: i64, steps: usize) {
        let steps = steps.max(1);
        self.press(from.0, from.1);
        let mut elapsed = 0;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let x = from.0 + (to.0 - from.0) * t;
            let y = from.1 + (to.1 - from.1) * t;
            let target = duration_ms * i as i64 / steps as i64;
            self.advance_time(target - elapsed);
            elapsed = target;
            self.move_to(x, y);
        }
        self.release(to.0, to.1);
    }

    /// Like [`drag`](Self::drag), but holds still for `pause_ms` before
    /// releasing so the release carries no velocity.
    pub fn drag_and_hold(
        &mut self,
        from: (f32, f32),
        to: (f32, f32),
        duration_ms: i64,
        steps: usize,
        pause_ms: i64,
    ) {
        let steps = steps.max(1);
        self.press(from.0, from.1);
        let mut elapsed = 0;
        for i in 1..=steps {
            let t = i as f32 / steps as f32;
            let target = duration_ms * i as i64 / steps as i64;
            self.advance_time(target - elapsed);
            elapsed = target;
            self.move_to(
                from.0 + (to.0 - from.0) * t,
                from.1 + (to.1 - from.1) * t,
            );
        }
        self.advance_time(pause_ms);
        self.release(to.0, to.1);
    }

    /// Advances virtual time, delivering a frame every frame interval (and
    /// one for any remainder).
    pub fn advance_time(&mut self, millis: i64) {
        let mut remaining = millis;
        while remaining > 0 {
            let step = remaining.min(self.frame_millis);
            self.now_ms += step;
            remaining -= step;
            self.deliver_frame();
        }
    }

    /// Delivers frames until the surface is at rest. Returns `false` if it
    /// never settled.
    pub fn wait_for_idle(&mut self) -> bool {
        for _ in 0..MAX_IDLE_FRAMES {
            if self.is_idle() {
                return true;
            }
            self.advance_time(self.frame_millis);
        }
        self.is_idle()
    }

    pub fn is_idle(&self) -> bool {
        matches!(
            self.presenter.phase(),
            SurfacePhase::Idle | SurfacePhase::Closed
        ) && !self.presenter.is_animating()
    }

    /// Asserts the surface rests at `snap`.
    pub fn assert_resting_at(&self, snap: SnapPoint) {
        assert_eq!(
            self.presenter.phase(),
            SurfacePhase::Idle,
            "surface is not resting"
        );
        assert_eq!(self.presenter.current_snap(), Some(snap));
    }

    fn deliver_frame(&mut self) {
        self.presenter
            .on_frame(self.now_ms.max(0) as u64 * 1_000_000);
        self.frames.push(self.presenter.offset());
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use snapkit_ui::{mount_surface, SurfaceConfig, SurfaceKind};

    fn sheet_robot() -> SurfaceRobot {
        let sheet = mount_surface(
            SurfaceKind::Sheet,
            SurfaceConfig::sheet().with_extent(1000.0),
        )
        .expect("valid config");
        SurfaceRobot::new(sheet)
    }

    #[test]
    fn advance_time_delivers_frames() {
        let mut robot = sheet_robot();
        robot.advance_time(40);
        assert_eq!(robot.now_ms(), 40);
        assert_eq!(robot.frames().len(), 3);
    }

    #[test]
    fn wait_for_idle_settles_open() {
        let mut robot = sheet_robot();
        robot.presenter().open(None).expect("valid snap");
        assert!(robot.wait_for_idle());
        robot.assert_resting_at(SnapPoint::Half);
        assert!(robot.frames().len() > 1);
    }

    #[test]
    fn presses_outside_closed_sheet_are_ignored() {
        let mut robot = sheet_robot();
        assert!(!robot.press(100.0, 900.0));
        assert_eq!(robot.release(100.0, 900.0), 0);
    }
}
