//! Snap points and the decision core that maps a released drag onto them.

mod controller;
mod point;
mod table;

pub use controller::{
    decide_target, ControllerPhase, ControllerState, DecisionConfig, DismissRule, SnapCommand,
    SnapSurfaceController,
};
pub use point::{SnapFamily, SnapPoint};
pub use table::{ResolvedSnaps, SnapTable};
