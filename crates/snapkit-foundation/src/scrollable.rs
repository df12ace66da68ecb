//! Scrollable content hosted inside a surface.
//!
//! A sheet that shows a scrolling list needs to know whether a vertical drag
//! belongs to the list or to the sheet. [`ContentScroll`] is the query the
//! presenter makes at pointer-down; [`ScrollPosition`] is a ready-made
//! implementation for hosts that don't have their own scroll state.

use crate::gesture_constants::SCROLL_TOP_EPSILON;
use std::cell::Cell;
use std::fmt;
use std::rc::Rc;

/// Scroll state of the content inside a surface.
pub trait ContentScroll {
    /// Current scroll offset in pixels, 0 at the top.
    fn scroll_offset(&self) -> f32;

    /// Whether the content is scrolled to (or within a hair of) its top.
    fn is_at_top(&self) -> bool {
        self.scroll_offset() <= SCROLL_TOP_EPSILON
    }
}

/// Shared scroll offset with a clamped range `[0, max_value]`.
///
/// Cloning yields another handle to the same position.
#[derive(Clone)]
pub struct ScrollPosition {
    inner: Rc<ScrollPositionInner>,
}

struct ScrollPositionInner {
    value: Cell<f32>,
    max_value: Cell<f32>,
}

impl ScrollPosition {
    /// Creates a position at `initial` with an unbounded maximum until
    /// [`set_max_value`](Self::set_max_value) is called.
    pub fn new(initial: f32) -> Self {
        let initial = if initial.is_finite() {
            initial.max(0.0)
        } else {
            0.0
        };
        Self {
            inner: Rc::new(ScrollPositionInner {
                value: Cell::new(initial),
                max_value: Cell::new(f32::MAX),
            }),
        }
    }

    pub fn value(&self) -> f32 {
        self.inner.value.get()
    }

    pub fn max_value(&self) -> f32 {
        self.inner.max_value.get()
    }

    /// Sets the maximum scroll value (content size minus viewport size).
    pub fn set_max_value(&self, max: f32) {
        let max = if max.is_finite() { max.max(0.0) } else { 0.0 };
        self.inner.max_value.set(max);
        if self.value() > max {
            self.inner.value.set(max);
        }
    }

    /// Scrolls by the given delta, clamping to `[0, max_value]`.
    /// Returns the actual amount scrolled.
    pub fn dispatch_raw_delta(&self, delta: f32) -> f32 {
        if !delta.is_finite() {
            return 0.0;
        }
        let current = self.value();
        let new_value = (current + delta).clamp(0.0, self.max_value());
        let actual_delta = new_value - current;
        if actual_delta.abs() > 0.001 {
            self.inner.value.set(new_value);
        }
        actual_delta
    }

    /// Scrolls to the given position immediately.
    pub fn scroll_to(&self, position: f32) {
        if !position.is_finite() {
            return;
        }
        self.inner
            .value
            .set(position.clamp(0.0, self.max_value()));
    }
}

impl ContentScroll for ScrollPosition {
    fn scroll_offset(&self) -> f32 {
        self.value()
    }
}

impl fmt::Debug for ScrollPosition {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScrollPosition")
            .field("value", &self.value())
            .field("max_value", &self.max_value())
            .finish()
    }
}

impl PartialEq for ScrollPosition {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}
