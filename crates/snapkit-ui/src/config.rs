//! Typed configuration for a mounted surface.

use snapkit_animation::SpringSpec;
use snapkit_foundation::gesture_constants::{
    DISMISS_SLACK, EDGE_ACTIVATION_WIDTH, ELASTIC_OPEN_END, VELOCITY_THRESHOLD,
};
use snapkit_foundation::{DecisionConfig, DismissRule, SnapFamily, SnapPoint, SnapTable};
use snapkit_ui_graphics::Axis;

/// Which surface a presenter drives.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SurfaceKind {
    /// Slides up from the bottom edge; offset is the sheet's top edge.
    Sheet,
    /// Slides in from the left edge; offset is the hidden width.
    Drawer,
}

impl SurfaceKind {
    pub fn family(self) -> SnapFamily {
        match self {
            SurfaceKind::Sheet => SnapFamily::Sheet,
            SurfaceKind::Drawer => SnapFamily::Drawer,
        }
    }

    pub fn axis(self) -> Axis {
        match self {
            SurfaceKind::Sheet => Axis::Vertical,
            SurfaceKind::Drawer => Axis::Horizontal,
        }
    }
}

/// Measured heights of a sheet's pinned header and footer.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct SheetChrome {
    pub header_height: f32,
    pub footer_height: f32,
}

impl SheetChrome {
    pub fn new(header_height: f32, footer_height: f32) -> Self {
        Self {
            header_height: header_height.max(0.0),
            footer_height: footer_height.max(0.0),
        }
    }
}

#[derive(Clone, Debug, PartialEq)]
pub struct SurfaceConfig {
    pub snap_table: SnapTable,
    /// Snap point used by `open(None)`.
    pub initial_snap: SnapPoint,
    /// Viewport height (sheet) or drawer width. `None` defers positioning
    /// until the host reports it.
    pub extent: Option<f32>,
    pub open_on_mount: bool,
    pub respects_content_scroll: bool,
    pub velocity_threshold: f32,
    pub dismiss_rule: DismissRule,
    /// Width of the band that can start dragging a closed drawer.
    pub edge_band: f32,
    /// Fraction of pointer movement applied past the most open snap point.
    pub elastic_open_end: f32,
    pub scrim_max_opacity: f32,
    pub open_spring: SpringSpec,
    pub snap_spring: SpringSpec,
    pub dismiss_spring: SpringSpec,
    pub chrome: Option<SheetChrome>,
}

impl SurfaceConfig {
    pub fn sheet() -> Self {
        Self {
            snap_table: SnapTable::sheet_default(),
            initial_snap: SnapPoint::Half,
            extent: None,
            open_on_mount: false,
            respects_content_scroll: false,
            velocity_threshold: VELOCITY_THRESHOLD,
            dismiss_rule: DismissRule::Slack(DISMISS_SLACK),
            edge_band: 0.0,
            elastic_open_end: ELASTIC_OPEN_END,
            scrim_max_opacity: 0.8,
            open_spring: SpringSpec::open(),
            snap_spring: SpringSpec::snap(),
            dismiss_spring: SpringSpec::dismiss(),
            chrome: None,
        }
    }

    /// Share-style sheet that opens collapsed and lets its list scroll.
    pub fn share_sheet() -> Self {
        Self::sheet()
            .with_snap_table(SnapTable::share_sheet())
            .with_initial_snap(SnapPoint::Collapsed)
            .with_respects_content_scroll(true)
    }

    pub fn drawer(width: f32) -> Self {
        Self {
            snap_table: SnapTable::drawer(),
            initial_snap: SnapPoint::Open,
            extent: Some(width),
            open_on_mount: false,
            respects_content_scroll: false,
            velocity_threshold: VELOCITY_THRESHOLD,
            dismiss_rule: DismissRule::Midpoint,
            edge_band: EDGE_ACTIVATION_WIDTH,
            elastic_open_end: 0.0,
            scrim_max_opacity: 0.5,
            open_spring: SpringSpec::open(),
            snap_spring: SpringSpec::snap(),
            dismiss_spring: SpringSpec::dismiss(),
            chrome: None,
        }
    }

    pub fn with_snap_table(mut self, snap_table: SnapTable) -> Self {
        self.snap_table = snap_table;
        self
    }

    pub fn with_initial_snap(mut self, initial_snap: SnapPoint) -> Self {
        self.initial_snap = initial_snap;
        self
    }

    pub fn with_extent(mut self, extent: f32) -> Self {
        self.extent = Some(extent);
        self
    }

    pub fn with_open_on_mount(mut self, open_on_mount: bool) -> Self {
        self.open_on_mount = open_on_mount;
        self
    }

    pub fn with_respects_content_scroll(mut self, respects: bool) -> Self {
        self.respects_content_scroll = respects;
        self
    }

    pub fn with_velocity_threshold(mut self, threshold: f32) -> Self {
        self.velocity_threshold = threshold;
        self
    }

    pub fn with_dismiss_rule(mut self, rule: DismissRule) -> Self {
        self.dismiss_rule = rule;
        self
    }

    pub fn with_edge_band(mut self, edge_band: f32) -> Self {
        self.edge_band = edge_band;
        self
    }

    pub fn with_elastic(mut self, open_end: f32) -> Self {
        self.elastic_open_end = open_end;
        self
    }

    pub fn with_scrim_max_opacity(mut self, opacity: f32) -> Self {
        self.scrim_max_opacity = opacity.clamp(0.0, 1.0);
        self
    }

    pub fn with_springs(mut self, open: SpringSpec, snap: SpringSpec, dismiss: SpringSpec) -> Self {
        self.open_spring = open;
        self.snap_spring = snap;
        self.dismiss_spring = dismiss;
        self
    }

    pub fn with_chrome(mut self, chrome: SheetChrome) -> Self {
        self.chrome = Some(chrome);
        self
    }

    pub fn decision(&self) -> DecisionConfig {
        DecisionConfig {
            velocity_threshold: self.velocity_threshold,
            dismiss_rule: self.dismiss_rule,
        }
    }
}

impl Default for SurfaceConfig {
    fn default() -> Self {
        Self::sheet()
    }
}
