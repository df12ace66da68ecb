use crate::nodes::input::types::{PointerEvent, PointerId};
use snapkit_ui_graphics::Point;

/// Detects a press released close to where it started.
///
/// Used for scrim taps: the surface closes only when the press stays within
/// `slop` of its origin, so a drag that happens to start on the scrim does
/// not dismiss anything.
#[derive(Clone, Debug)]
pub struct TapGesture {
    slop: f32,
    down: Option<(PointerId, Point)>,
}

impl TapGesture {
    pub fn new(slop: f32) -> Self {
        Self { slop, down: None }
    }

    pub fn is_pending(&self) -> bool {
        self.down.is_some()
    }

    pub fn on_down(&mut self, event: &PointerEvent) {
        self.down = Some((event.id, event.position));
    }

    pub fn on_move(&mut self, event: &PointerEvent) {
        if let Some((id, origin)) = self.down {
            if id == event.id && origin.distance_to(event.position) > self.slop {
                self.down = None;
            }
        }
    }

    /// Returns `true` when this release completes a tap.
    pub fn on_up(&mut self, event: &PointerEvent) -> bool {
        match self.down {
            Some((id, origin)) if id == event.id => {
                self.down = None;
                origin.distance_to(event.position) <= self.slop
            }
            _ => false,
        }
    }

    pub fn reset(&mut self) {
        self.down = None;
    }
}
