use snapkit_foundation::SnapPoint;
use std::rc::Rc;

/// Notifications a presenter sends to its host.
#[derive(Clone, Debug, PartialEq)]
pub enum SurfaceEvent {
    /// The surface was asked to open (programmatically or by a drag).
    OpenRequested,
    /// The surface was asked to close. The exit animation is still running.
    CloseRequested,
    /// A settle animation came to rest at a resting point.
    Settled(SnapPoint),
    /// The exit animation finished; the surface is gone.
    Closed,
    /// A runtime configuration change was refused; the old one stays active.
    ConfigurationRejected(String),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct ListenerId(pub(crate) u64);

pub(crate) type Listener = Rc<dyn Fn(&SurfaceEvent)>;
