pub mod dispatcher;
pub mod gestures;
pub mod types;

pub use dispatcher::{PointerDispatcher, PointerSubscription};
pub use types::{PointerEvent, PointerEventKind, PointerId, PointerSource};

pub mod prelude {
    pub use super::dispatcher::{PointerDispatcher, PointerSubscription};
    pub use super::types::{PointerEvent, PointerEventKind, PointerId, PointerSource};
}
