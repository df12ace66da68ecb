//! Bottom sheet and edge drawer presenters.
//!
//! A presenter wires pointer input, the snap decision core and the motion
//! settler together and exposes the values a renderer needs each frame.
//! It draws nothing itself.

pub mod config;
pub mod events;
pub mod presenter;
pub mod scrim;

pub use config::{SheetChrome, SurfaceConfig, SurfaceKind};
pub use events::{ListenerId, SurfaceEvent};
pub use presenter::{mount_surface, mount_surface_with, SurfacePhase, SurfacePresenter};

pub use snapkit_animation::SpringSpec;
pub use snapkit_foundation::{
    ContentScroll, DismissRule, PointerDispatcher, PointerEvent, PointerEventKind, PointerId,
    PointerSource, ScrollPosition, SnapPoint, SnapTable, SurfaceError,
};
pub use snapkit_ui_graphics::{Point, Rect, Size};

pub mod prelude {
    pub use crate::config::{SheetChrome, SurfaceConfig, SurfaceKind};
    pub use crate::events::SurfaceEvent;
    pub use crate::presenter::{mount_surface, mount_surface_with, SurfacePhase, SurfacePresenter};
    pub use snapkit_foundation::prelude::*;
}
