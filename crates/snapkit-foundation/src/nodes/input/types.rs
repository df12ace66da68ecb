use snapkit_ui_graphics::Point;
use std::cell::Cell;
use std::rc::Rc;

pub type PointerId = u64;

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum PointerEventKind {
    Down,
    Move,
    Up,
    Cancel,
}

/// Device family an event came from. Mouse and touch are handled identically;
/// the source is kept for logging and host-side routing.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PointerSource {
    Mouse,
    Touch,
}

/// Pointer event in client coordinates with consumption tracking.
///
/// A surface that captures a drag consumes the events it handles. Hosts check
/// [`PointerEvent::is_consumed`] to decide whether inner content should scroll
/// (the equivalent of `preventDefault`).
#[derive(Clone, Debug)]
pub struct PointerEvent {
    pub id: PointerId,
    pub kind: PointerEventKind,
    pub source: PointerSource,
    pub position: Point,
    /// Event timestamp in milliseconds from any monotonic origin.
    pub time_ms: i64,
    /// Shared via Rc<Cell> so consumption can be tracked across copies.
    consumed: Rc<Cell<bool>>,
}

impl PointerEvent {
    pub fn new(kind: PointerEventKind, position: Point, time_ms: i64) -> Self {
        Self {
            id: 0,
            kind,
            source: PointerSource::Mouse,
            position,
            time_ms,
            consumed: Rc::new(Cell::new(false)),
        }
    }

    pub fn down(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Down, Point::new(x, y), time_ms)
    }

    pub fn moved(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Move, Point::new(x, y), time_ms)
    }

    pub fn up(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Up, Point::new(x, y), time_ms)
    }

    pub fn cancel(x: f32, y: f32, time_ms: i64) -> Self {
        Self::new(PointerEventKind::Cancel, Point::new(x, y), time_ms)
    }

    pub fn with_id(mut self, id: PointerId) -> Self {
        self.id = id;
        self
    }

    /// Marks the event as coming from a touch screen.
    pub fn touch(mut self) -> Self {
        self.source = PointerSource::Touch;
        self
    }

    /// Mark this event as consumed, preventing other handlers from processing it.
    pub fn consume(&self) {
        self.consumed.set(true);
    }

    /// Check if this event has been consumed by another handler.
    pub fn is_consumed(&self) -> bool {
        self.consumed.get()
    }

    pub fn is_release(&self) -> bool {
        matches!(self.kind, PointerEventKind::Up | PointerEventKind::Cancel)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn consumption_is_shared_between_copies() {
        let event = PointerEvent::moved(1.0, 2.0, 10).touch().with_id(3);
        let copy = event.clone();
        assert!(!copy.is_consumed());
        event.consume();
        assert!(copy.is_consumed());
        assert_eq!(copy.source, PointerSource::Touch);
        assert_eq!(copy.id, 3);
    }

    #[test]
    fn release_kinds() {
        assert!(PointerEvent::up(0.0, 0.0, 0).is_release());
        assert!(PointerEvent::cancel(0.0, 0.0, 0).is_release());
        assert!(!PointerEvent::down(0.0, 0.0, 0).is_release());
    }
}
