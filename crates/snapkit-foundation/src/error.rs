//! Errors reported to the host.
//!
//! Only configuration problems are errors. Stale or foreign pointer events
//! are absorbed where they arrive and never surface here.

use crate::snap::SnapPoint;

#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SurfaceError {
    #[error("snap point {point} has invalid position {value}")]
    InvalidFraction { point: SnapPoint, value: f32 },
    #[error("snap point {0} appears more than once")]
    DuplicateSnap(SnapPoint),
    #[error("snap table mixes sheet and drawer snap points")]
    MixedSnapFamilies,
    #[error("snap table has no terminal (dismissed/closed) point")]
    MissingTerminal,
    #[error("snap table has no resting point")]
    NoRestingPoint,
    #[error("snap positions must increase from {before} ({before_value}) to {after} ({after_value})")]
    NonMonotonic {
        before: SnapPoint,
        before_value: f32,
        after: SnapPoint,
        after_value: f32,
    },
    #[error("initial snap {0} is not in the snap table")]
    InitialSnapNotInTable(SnapPoint),
    #[error("axis extent {0} is not a positive finite length")]
    InvalidExtent(f32),
    #[error("cannot open to snap point {0}")]
    UnknownSnap(SnapPoint),
}
