//! Pure geometry for snapkit.
//!
//! Points, sizes and rectangles in logical pixels, plus the [`Axis`] a
//! draggable surface travels along.

mod geometry;

pub use geometry::*;

pub mod prelude {
    pub use crate::geometry::{Axis, Point, Rect, Size};
}
