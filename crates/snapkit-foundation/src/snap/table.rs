//! Validated snap tables, as fractions of the axis extent and in pixels.

use super::point::{SnapFamily, SnapPoint};
use crate::error::SurfaceError;
use smallvec::SmallVec;

type Entries = SmallVec<[(SnapPoint, f32); 4]>;

/// Snap points mapped to fractions of the axis extent.
///
/// Entries are kept sorted from most open to most closed; the terminal point
/// is always last.
#[derive(Clone, Debug, PartialEq)]
pub struct SnapTable {
    family: SnapFamily,
    entries: Entries,
}

impl SnapTable {
    pub fn new(
        entries: impl IntoIterator<Item = (SnapPoint, f32)>,
    ) -> Result<Self, SurfaceError> {
        let (family, entries) = validate(entries, |fraction| {
            fraction.is_finite() && (0.0..=1.0).contains(&fraction)
        })?;
        Ok(Self { family, entries })
    }

    /// Bottom sheet: full 10%, half 50%, collapsed 85%.
    pub fn sheet_default() -> Self {
        Self::known(
            SnapFamily::Sheet,
            &[
                (SnapPoint::Full, 0.1),
                (SnapPoint::Half, 0.5),
                (SnapPoint::Collapsed, 0.85),
                (SnapPoint::Dismissed, 1.0),
            ],
        )
    }

    /// Share sheet: full 20%, half 50%, collapsed 60%.
    pub fn share_sheet() -> Self {
        Self::known(
            SnapFamily::Sheet,
            &[
                (SnapPoint::Full, 0.2),
                (SnapPoint::Half, 0.5),
                (SnapPoint::Collapsed, 0.6),
                (SnapPoint::Dismissed, 1.0),
            ],
        )
    }

    pub fn drawer() -> Self {
        Self::known(
            SnapFamily::Drawer,
            &[(SnapPoint::Open, 0.0), (SnapPoint::Closed, 1.0)],
        )
    }

    fn known(family: SnapFamily, entries: &[(SnapPoint, f32)]) -> Self {
        Self {
            family,
            entries: entries.iter().copied().collect(),
        }
    }

    pub fn family(&self) -> SnapFamily {
        self.family
    }

    pub fn entries(&self) -> &[(SnapPoint, f32)] {
        &self.entries
    }

    pub fn fraction(&self, point: SnapPoint) -> Option<f32> {
        lookup(&self.entries, point)
    }

    pub fn contains(&self, point: SnapPoint) -> bool {
        self.fraction(point).is_some()
    }

    pub fn terminal(&self) -> SnapPoint {
        self.family.terminal()
    }

    /// Converts fractions into pixel offsets for an axis of length `extent`.
    pub fn resolve(&self, extent: f32) -> Result<ResolvedSnaps, SurfaceError> {
        if !extent.is_finite() || extent <= 0.0 {
            return Err(SurfaceError::InvalidExtent(extent));
        }
        Ok(ResolvedSnaps {
            family: self.family,
            extent,
            entries: self
                .entries
                .iter()
                .map(|&(point, fraction)| (point, fraction * extent))
                .collect(),
        })
    }
}

/// Snap points mapped to pixel offsets in closing-offset space.
#[derive(Clone, Debug, PartialEq)]
pub struct ResolvedSnaps {
    family: SnapFamily,
    extent: f32,
    entries: Entries,
}

impl ResolvedSnaps {
    /// Builds a table directly from pixel offsets. The extent is taken to be
    /// the terminal offset.
    pub fn from_offsets(
        entries: impl IntoIterator<Item = (SnapPoint, f32)>,
    ) -> Result<Self, SurfaceError> {
        let (family, entries) =
            validate(entries, |offset| offset.is_finite() && offset >= 0.0)?;
        let extent = entries.last().map_or(0.0, |&(_, offset)| offset);
        if extent <= 0.0 {
            return Err(SurfaceError::InvalidExtent(extent));
        }
        Ok(Self {
            family,
            extent,
            entries,
        })
    }

    pub fn family(&self) -> SnapFamily {
        self.family
    }

    pub fn extent(&self) -> f32 {
        self.extent
    }

    pub fn entries(&self) -> &[(SnapPoint, f32)] {
        &self.entries
    }

    pub fn contains(&self, point: SnapPoint) -> bool {
        self.offset_of(point).is_some()
    }

    pub fn offset_of(&self, point: SnapPoint) -> Option<f32> {
        lookup(&self.entries, point)
    }

    /// Resting points, most open first.
    pub fn resting(&self) -> &[(SnapPoint, f32)] {
        &self.entries[..self.entries.len() - 1]
    }

    pub fn terminal(&self) -> (SnapPoint, f32) {
        self.entries[self.entries.len() - 1]
    }

    pub fn terminal_offset(&self) -> f32 {
        self.terminal().1
    }

    pub fn most_open(&self) -> (SnapPoint, f32) {
        self.entries[0]
    }

    pub fn most_open_offset(&self) -> f32 {
        self.most_open().1
    }

    pub fn last_resting(&self) -> (SnapPoint, f32) {
        self.entries[self.entries.len() - 2]
    }

    /// Clamps `offset` into `[most open, terminal]`.
    pub fn clamp(&self, offset: f32) -> f32 {
        offset.clamp(self.most_open_offset(), self.terminal_offset())
    }

    /// The next point toward closed. The terminal point stays put.
    pub fn step_toward_closed(&self, point: SnapPoint) -> SnapPoint {
        match self.index_of(point) {
            Some(index) => self.entries[(index + 1).min(self.entries.len() - 1)].0,
            None => point,
        }
    }

    /// The next point toward open. The most open point stays put.
    pub fn step_toward_open(&self, point: SnapPoint) -> SnapPoint {
        match self.index_of(point) {
            Some(index) => self.entries[index.saturating_sub(1)].0,
            None => point,
        }
    }

    /// The resting point whose offset is closest to `offset`.
    pub fn nearest_resting(&self, offset: f32) -> SnapPoint {
        let mut best = self.most_open();
        for &(point, value) in self.resting() {
            if (value - offset).abs() < (best.1 - offset).abs() {
                best = (point, value);
            }
        }
        best.0
    }

    fn index_of(&self, point: SnapPoint) -> Option<usize> {
        self.entries.iter().position(|&(p, _)| p == point)
    }
}

fn lookup(entries: &[(SnapPoint, f32)], point: SnapPoint) -> Option<f32> {
    entries
        .iter()
        .find(|&&(p, _)| p == point)
        .map(|&(_, value)| value)
}

/// Shared validation for fraction and pixel tables. Returns the entries
/// sorted by rank.
fn validate(
    entries: impl IntoIterator<Item = (SnapPoint, f32)>,
    value_ok: impl Fn(f32) -> bool,
) -> Result<(SnapFamily, Entries), SurfaceError> {
    let mut sorted = Entries::new();
    let mut family = None;
    for (point, value) in entries {
        if !value_ok(value) {
            return Err(SurfaceError::InvalidFraction { point, value });
        }
        if sorted.iter().any(|&(p, _)| p == point) {
            return Err(SurfaceError::DuplicateSnap(point));
        }
        match family {
            None => family = Some(point.family()),
            Some(f) if f != point.family() => return Err(SurfaceError::MixedSnapFamilies),
            Some(_) => {}
        }
        sorted.push((point, value));
    }

    let Some(family) = family else {
        return Err(SurfaceError::MissingTerminal);
    };
    sorted.sort_by_key(|&(point, _)| point.rank());

    if !sorted.iter().any(|&(point, _)| point.is_terminal()) {
        return Err(SurfaceError::MissingTerminal);
    }
    if sorted.len() < 2 {
        return Err(SurfaceError::NoRestingPoint);
    }
    for pair in sorted.windows(2) {
        let (before, before_value) = pair[0];
        let (after, after_value) = pair[1];
        if after_value <= before_value {
            return Err(SurfaceError::NonMonotonic {
                before,
                before_value,
                after,
                after_value,
            });
        }
    }
    Ok((family, sorted))
}
