//! Testing utilities for snapkit surfaces.

pub mod robot;

pub use robot::*;

pub mod prelude {
    pub use crate::robot::*;
}
