use super::point::SnapPoint;
use super::table::ResolvedSnaps;
use crate::error::SurfaceError;
use crate::gesture_constants::{DISMISS_SLACK, VELOCITY_THRESHOLD};
use crate::nodes::input::gestures::GestureSample;

/// How a slow release past the most closed resting point is resolved.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DismissRule {
    /// Dismiss once the offset is more than this many pixels past the last
    /// resting point.
    Slack(f32),
    /// Treat the terminal point as an ordinary neighbour and pick the nearer
    /// of the two.
    Midpoint,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DecisionConfig {
    /// Release speed (px/s) above which direction alone decides the target.
    pub velocity_threshold: f32,
    pub dismiss_rule: DismissRule,
}

impl DecisionConfig {
    pub fn sheet() -> Self {
        Self {
            velocity_threshold: VELOCITY_THRESHOLD,
            dismiss_rule: DismissRule::Slack(DISMISS_SLACK),
        }
    }

    pub fn drawer() -> Self {
        Self {
            velocity_threshold: VELOCITY_THRESHOLD,
            dismiss_rule: DismissRule::Midpoint,
        }
    }
}

impl Default for DecisionConfig {
    fn default() -> Self {
        Self::sheet()
    }
}

/// Resolves a released drag into a snap point.
///
/// A release faster than the threshold moves exactly one step in the flick
/// direction. Otherwise the offset picks the nearest resting point by
/// midpoint bracket; an offset exactly on a midpoint goes the way the drag
/// travelled relative to `current`.
pub fn decide_target(
    current: SnapPoint,
    live_offset: f32,
    velocity: f32,
    snaps: &ResolvedSnaps,
    config: &DecisionConfig,
) -> SnapPoint {
    let velocity = if velocity.is_finite() { velocity } else { 0.0 };
    if velocity.abs() > config.velocity_threshold {
        return if velocity > 0.0 {
            snaps.step_toward_closed(current)
        } else {
            snaps.step_toward_open(current)
        };
    }

    let current_offset = snaps.offset_of(current);
    let offset = if live_offset.is_finite() {
        live_offset
    } else {
        current_offset.unwrap_or_else(|| snaps.most_open_offset())
    };
    let toward_open = current_offset.is_some_and(|origin| offset < origin);

    let (last, last_offset) = snaps.last_resting();
    if offset > last_offset {
        let (terminal, terminal_offset) = snaps.terminal();
        return match config.dismiss_rule {
            DismissRule::Slack(slack) if offset >= last_offset + slack => terminal,
            DismissRule::Slack(_) => last,
            DismissRule::Midpoint => {
                let midpoint = (last_offset + terminal_offset) / 2.0;
                bracket(offset, midpoint, toward_open, last, terminal)
            }
        };
    }

    for pair in snaps.resting().windows(2) {
        let (more_open, open_offset) = pair[0];
        let (more_closed, closed_offset) = pair[1];
        if offset <= closed_offset {
            let midpoint = (open_offset + closed_offset) / 2.0;
            return bracket(offset, midpoint, toward_open, more_open, more_closed);
        }
    }
    last
}

fn bracket(
    offset: f32,
    midpoint: f32,
    toward_open: bool,
    more_open: SnapPoint,
    more_closed: SnapPoint,
) -> SnapPoint {
    if offset < midpoint || (offset == midpoint && toward_open) {
        more_open
    } else {
        more_closed
    }
}

/// Lifecycle of a controller between gestures.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ControllerPhase {
    Idle,
    Dragging,
    Settling,
}

#[derive(Clone, Copy, Debug, PartialEq)]
pub struct ControllerState {
    pub current_snap: SnapPoint,
    pub live_offset: f32,
    pub phase: ControllerPhase,
}

/// What the owner should do after a decision.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum SnapCommand {
    /// Settle at a resting point.
    AnimateTo { snap: SnapPoint, offset: f32 },
    /// Animate out to the terminal point and tear the surface down.
    Dismiss { snap: SnapPoint, offset: f32 },
}

impl SnapCommand {
    pub fn snap(&self) -> SnapPoint {
        match *self {
            SnapCommand::AnimateTo { snap, .. } | SnapCommand::Dismiss { snap, .. } => snap,
        }
    }

    pub fn offset(&self) -> f32 {
        match *self {
            SnapCommand::AnimateTo { offset, .. } | SnapCommand::Dismiss { offset, .. } => offset,
        }
    }

    pub fn is_dismiss(&self) -> bool {
        matches!(self, SnapCommand::Dismiss { .. })
    }
}

/// Pure state and decision core for one surface.
///
/// Knows nothing about rendering, events or time. The owner reports drag
/// progress and settle frames, and receives [`SnapCommand`]s back.
#[derive(Clone, Debug)]
pub struct SnapSurfaceController {
    snaps: ResolvedSnaps,
    config: DecisionConfig,
    state: ControllerState,
}

impl SnapSurfaceController {
    pub fn new(
        snaps: ResolvedSnaps,
        initial: SnapPoint,
        config: DecisionConfig,
    ) -> Result<Self, SurfaceError> {
        let live_offset = snaps
            .offset_of(initial)
            .ok_or(SurfaceError::InitialSnapNotInTable(initial))?;
        Ok(Self {
            snaps,
            config,
            state: ControllerState {
                current_snap: initial,
                live_offset,
                phase: ControllerPhase::Idle,
            },
        })
    }

    pub fn state(&self) -> ControllerState {
        self.state
    }

    pub fn current_snap(&self) -> SnapPoint {
        self.state.current_snap
    }

    pub fn live_offset(&self) -> f32 {
        self.state.live_offset
    }

    pub fn phase(&self) -> ControllerPhase {
        self.state.phase
    }

    pub fn snaps(&self) -> &ResolvedSnaps {
        &self.snaps
    }

    pub fn config(&self) -> &DecisionConfig {
        &self.config
    }

    /// Enters `Dragging` and returns the offset the drag is captured at.
    pub fn begin_drag(&mut self) -> f32 {
        self.state.phase = ControllerPhase::Dragging;
        self.state.live_offset
    }

    pub fn update_drag(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.live_offset = offset;
        }
    }

    /// Resolves a release into a command and enters `Settling`.
    pub fn on_drag_end(&mut self, sample: &GestureSample) -> SnapCommand {
        self.update_drag(sample.offset);
        let target = decide_target(
            self.state.current_snap,
            self.state.live_offset,
            sample.velocity,
            &self.snaps,
            &self.config,
        );
        log::debug!(
            "drag released at {:.1} ({:.0} px/s): {} -> {}",
            self.state.live_offset,
            sample.velocity,
            self.state.current_snap,
            target
        );
        self.command_for(target)
    }

    /// Abandons a drag and settles back at the current snap.
    pub fn cancel_drag(&mut self) -> SnapCommand {
        self.command_for(self.state.current_snap)
    }

    /// Programmatic move to a resting point, bypassing the decision rules.
    pub fn request_snap(&mut self, snap: SnapPoint) -> Result<SnapCommand, SurfaceError> {
        if snap.is_terminal() || !self.snaps.contains(snap) {
            return Err(SurfaceError::UnknownSnap(snap));
        }
        Ok(self.command_for(snap))
    }

    /// Programmatic close: always dismisses.
    pub fn request_close(&mut self) -> SnapCommand {
        self.command_for(self.snaps.terminal().0)
    }

    /// Records the animated offset during a settle.
    pub fn set_live_offset(&mut self, offset: f32) {
        if offset.is_finite() {
            self.state.live_offset = offset;
        }
    }

    /// Marks the settle as complete.
    pub fn finish_settle(&mut self) {
        self.state.phase = ControllerPhase::Idle;
        if let Some(offset) = self.snaps.offset_of(self.state.current_snap) {
            self.state.live_offset = offset;
        }
    }

    /// Swaps in a re-resolved table, keeping the current snap where possible.
    ///
    /// Returns the offset of the current snap in the new table.
    pub fn replace_snaps(&mut self, snaps: ResolvedSnaps) -> Result<f32, SurfaceError> {
        if snaps.family() != self.snaps.family() {
            return Err(SurfaceError::MixedSnapFamilies);
        }
        let current = if snaps.contains(self.state.current_snap) {
            self.state.current_snap
        } else {
            snaps.nearest_resting(self.state.live_offset)
        };
        self.snaps = snaps;
        self.state.current_snap = current;
        let offset = self
            .snaps
            .offset_of(current)
            .unwrap_or_else(|| self.snaps.most_open_offset());
        if self.state.phase == ControllerPhase::Idle {
            self.state.live_offset = offset;
        }
        Ok(offset)
    }

    fn command_for(&mut self, target: SnapPoint) -> SnapCommand {
        self.state.phase = ControllerPhase::Settling;
        let offset = self
            .snaps
            .offset_of(target)
            .unwrap_or_else(|| self.snaps.terminal_offset());
        if target.is_terminal() {
            SnapCommand::Dismiss {
                snap: target,
                offset,
            }
        } else {
            self.state.current_snap = target;
            SnapCommand::AnimateTo {
                snap: target,
                offset,
            }
        }
    }
}

#[cfg(test)]
#[path = "../tests/controller_tests.rs"]
mod tests;
