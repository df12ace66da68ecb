use std::fmt;

/// Which kind of surface a snap point belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapFamily {
    Sheet,
    Drawer,
}

impl SnapFamily {
    /// The removal point of this family.
    pub fn terminal(self) -> SnapPoint {
        match self {
            SnapFamily::Sheet => SnapPoint::Dismissed,
            SnapFamily::Drawer => SnapPoint::Closed,
        }
    }
}

/// A named discrete resting state of a surface.
///
/// Within a family, points are ordered from most open to most closed:
/// `Full < Half < Collapsed < Dismissed` and `Open < Closed`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SnapPoint {
    Full,
    Half,
    Collapsed,
    Dismissed,
    Open,
    Closed,
}

impl SnapPoint {
    pub fn family(self) -> SnapFamily {
        match self {
            SnapPoint::Full | SnapPoint::Half | SnapPoint::Collapsed | SnapPoint::Dismissed => {
                SnapFamily::Sheet
            }
            SnapPoint::Open | SnapPoint::Closed => SnapFamily::Drawer,
        }
    }

    /// Whether reaching this point removes the surface.
    pub fn is_terminal(self) -> bool {
        matches!(self, SnapPoint::Dismissed | SnapPoint::Closed)
    }

    pub fn is_resting(self) -> bool {
        !self.is_terminal()
    }

    /// Position in the open-to-closed ordering of this point's family.
    pub fn rank(self) -> u8 {
        match self {
            SnapPoint::Full | SnapPoint::Open => 0,
            SnapPoint::Half | SnapPoint::Closed => 1,
            SnapPoint::Collapsed => 2,
            SnapPoint::Dismissed => 3,
        }
    }

    pub fn name(self) -> &'static str {
        match self {
            SnapPoint::Full => "full",
            SnapPoint::Half => "half",
            SnapPoint::Collapsed => "collapsed",
            SnapPoint::Dismissed => "dismissed",
            SnapPoint::Open => "open",
            SnapPoint::Closed => "closed",
        }
    }
}

impl fmt::Display for SnapPoint {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}
