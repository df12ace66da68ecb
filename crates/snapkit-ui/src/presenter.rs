//! The external-facing shell that owns one controller and one settler.
//!
//! A [`SurfacePresenter`] is a cheap handle (`Rc<RefCell<..>>`) so the host,
//! its render loop and the scoped pointer subscription can all reach the
//! same surface. Listeners are always called after the internal borrow is
//! released, so they may call back into the presenter.

use crate::config::{SheetChrome, SurfaceConfig, SurfaceKind};
use crate::events::{Listener, ListenerId, SurfaceEvent};
use crate::scrim;
use smallvec::SmallVec;
use snapkit_animation::{AnimationId, MotionSettler, SettleStatus, SpringSpec};
use snapkit_foundation::gesture_constants::TAP_SLOP;
use snapkit_foundation::{
    CaptureDecision, ContentScroll, ControllerState, DragGestureTracker, GestureSample,
    PointerDispatcher, PointerEvent, PointerEventKind, PointerSubscription, ResolvedSnaps,
    SnapCommand, SnapPoint, SnapSurfaceController, SnapTable, SurfaceError, TapGesture,
    TravelBounds,
};
use snapkit_ui_graphics::{Point, Rect, Size};
use std::cell::RefCell;
use std::fmt;
use std::mem;
use std::rc::{Rc, Weak};

/// Lifecycle of a mounted surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SurfacePhase {
    /// Not on screen (or only the drawer's edge band is live).
    Closed,
    /// Animating in from the terminal offset.
    Opening,
    /// Resting at a snap point.
    Idle,
    /// Following a captured pointer.
    Dragging,
    /// Animating to a snap point, or out to the terminal offset.
    Settling,
}

/// Where a press lands relative to the surface.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum PressRoute {
    Drag(CaptureDecision),
    Scrim,
}

/// Mounts a surface with its own pointer dispatcher.
pub fn mount_surface(
    kind: SurfaceKind,
    config: SurfaceConfig,
) -> Result<SurfacePresenter, SurfaceError> {
    mount_surface_with(kind, config, &PointerDispatcher::new())
}

/// Mounts a surface that listens on a host-owned dispatcher.
///
/// Several surfaces may share one dispatcher; each only subscribes while it
/// has a pointer captured.
pub fn mount_surface_with(
    kind: SurfaceKind,
    config: SurfaceConfig,
    dispatcher: &PointerDispatcher,
) -> Result<SurfacePresenter, SurfaceError> {
    validate_table(kind, &config.snap_table, config.initial_snap)?;
    let snaps = config
        .extent
        .map(|extent| config.snap_table.resolve(extent))
        .transpose()?;
    let open_on_mount = config.open_on_mount;

    let inner = Rc::new_cyclic(|this| {
        RefCell::new(PresenterInner::new(
            kind,
            config,
            snaps,
            dispatcher.clone(),
            this.clone(),
        ))
    });
    let presenter = SurfacePresenter { inner };
    log::debug!("{:?} surface mounted", kind);

    if open_on_mount {
        presenter.open(None)?;
    }
    Ok(presenter)
}

fn validate_table(
    kind: SurfaceKind,
    table: &SnapTable,
    initial: SnapPoint,
) -> Result<(), SurfaceError> {
    if table.family() != kind.family() {
        return Err(SurfaceError::MixedSnapFamilies);
    }
    if !table.contains(initial) {
        return Err(SurfaceError::InitialSnapNotInTable(initial));
    }
    if initial.is_terminal() {
        return Err(SurfaceError::UnknownSnap(initial));
    }
    Ok(())
}

/// Handle to a mounted bottom sheet or edge drawer.
#[derive(Clone)]
pub struct SurfacePresenter {
    inner: Rc<RefCell<PresenterInner>>,
}

impl SurfacePresenter {
    pub fn kind(&self) -> SurfaceKind {
        self.inner.borrow().kind
    }

    /// The dispatcher the host forwards document-level move/up events to.
    pub fn dispatcher(&self) -> PointerDispatcher {
        self.inner.borrow().dispatcher.clone()
    }

    /// Opens to `snap`, or to the configured initial snap.
    ///
    /// Without a known extent the request is kept and carried out by
    /// [`set_extent`](Self::set_extent).
    pub fn open(&self, snap: Option<SnapPoint>) -> Result<(), SurfaceError> {
        self.update(|inner| inner.open(snap))
    }

    /// Closes the surface, aborting any drag in progress.
    pub fn close(&self) {
        self.update(PresenterInner::close);
    }

    pub fn toggle(&self) -> Result<(), SurfaceError> {
        self.update(|inner| {
            if inner.pending_open.is_some() || inner.is_open() {
                inner.close();
                Ok(())
            } else {
                inner.open(None)
            }
        })
    }

    /// Tears the surface down immediately, without an exit animation.
    pub fn unmount(&self) {
        self.update(PresenterInner::teardown);
    }

    /// Reports the viewport height (sheet) or drawer width.
    pub fn set_extent(&self, extent: f32) -> Result<(), SurfaceError> {
        self.update(|inner| inner.set_extent(extent))
    }

    /// Replaces the snap table. A rejected table leaves the old one active.
    pub fn set_snap_table(&self, table: SnapTable) -> Result<(), SurfaceError> {
        self.update(|inner| inner.set_snap_table(table))
    }

    pub fn set_chrome(&self, chrome: SheetChrome) {
        self.inner.borrow_mut().config.chrome = Some(chrome);
    }

    /// Connects the scrollable content used for scroll precedence.
    pub fn set_content_scroll(&self, content: Rc<dyn ContentScroll>) {
        self.inner.borrow_mut().content = Some(content);
    }

    pub fn clear_content_scroll(&self) {
        self.inner.borrow_mut().content = None;
    }

    /// Advances the settle animation by `dt` seconds.
    pub fn step(&self, dt: f32) {
        self.update(|inner| inner.step(dt));
    }

    /// Frame callback entry point. The first frame only records its time.
    pub fn on_frame(&self, frame_time_nanos: u64) {
        self.update(|inner| {
            let previous = inner.last_frame_nanos.replace(frame_time_nanos);
            if let Some(previous) = previous {
                if frame_time_nanos > previous {
                    inner.step((frame_time_nanos - previous) as f32 / 1_000_000_000.0);
                }
            }
        });
    }

    /// Offers a press on the surface (or its scrim / edge band).
    ///
    /// Returns `true` when the surface took the press. Subsequent moves and
    /// the release arrive through the [`PointerDispatcher`].
    pub fn pointer_down(&self, event: &PointerEvent) -> bool {
        self.update(|inner| inner.pointer_down(event))
    }

    /// Pointer hover without a press. Returns whether the drawer's edge
    /// preview is active.
    pub fn on_pointer_hover(&self, position: Point) -> bool {
        let mut inner = self.inner.borrow_mut();
        inner.edge_hover = inner.kind == SurfaceKind::Drawer
            && inner.phase == SurfacePhase::Closed
            && position.x >= 0.0
            && position.x <= inner.config.edge_band;
        inner.edge_hover
    }

    pub fn add_listener(&self, listener: impl Fn(&SurfaceEvent) + 'static) -> ListenerId {
        let mut inner = self.inner.borrow_mut();
        inner.next_listener_id += 1;
        let id = ListenerId(inner.next_listener_id);
        inner.listeners.push((id, Rc::new(listener)));
        id
    }

    pub fn remove_listener(&self, id: ListenerId) -> bool {
        let mut inner = self.inner.borrow_mut();
        let before = inner.listeners.len();
        inner.listeners.retain(|(listener_id, _)| *listener_id != id);
        inner.listeners.len() != before
    }

    /// Offset of the surface in closing-offset space.
    pub fn offset(&self) -> f32 {
        self.inner.borrow().offset()
    }

    /// Visible length along the axis (`extent - offset`).
    pub fn revealed(&self) -> f32 {
        let inner = self.inner.borrow();
        inner
            .snaps
            .as_ref()
            .map_or(0.0, |snaps| (snaps.extent() - inner.offset()).max(0.0))
    }

    pub fn phase(&self) -> SurfacePhase {
        self.inner.borrow().phase
    }

    /// On-screen bounds of the surface inside `viewport`, `None` while closed.
    pub fn surface_rect(&self, viewport: Size) -> Option<Rect> {
        let inner = self.inner.borrow();
        let snaps = inner.snaps.as_ref()?;
        if inner.phase == SurfacePhase::Closed {
            return None;
        }
        let offset = inner.offset();
        let extent = snaps.extent();
        Some(match inner.kind {
            SurfaceKind::Sheet => {
                Rect::new(0.0, offset, viewport.width, (extent - offset).max(0.0))
            }
            SurfaceKind::Drawer => Rect::new(-offset, 0.0, extent, viewport.height),
        })
    }

    pub fn extent(&self) -> Option<f32> {
        self.inner.borrow().snaps.as_ref().map(ResolvedSnaps::extent)
    }

    /// The committed snap point, `None` while closed.
    pub fn current_snap(&self) -> Option<SnapPoint> {
        let inner = self.inner.borrow();
        if inner.phase == SurfacePhase::Closed {
            return None;
        }
        inner.controller.as_ref().map(|c| c.current_snap())
    }

    /// Where the running animation is headed, or the current snap.
    pub fn target_snap(&self) -> Option<SnapPoint> {
        let inner = self.inner.borrow();
        match inner.in_flight {
            Some((_, command)) => Some(command.snap()),
            None if inner.phase == SurfacePhase::Closed => None,
            None => inner.controller.as_ref().map(|c| c.current_snap()),
        }
    }

    pub fn controller_state(&self) -> Option<ControllerState> {
        self.inner.borrow().controller.as_ref().map(|c| c.state())
    }

    pub fn scrim_opacity(&self) -> f32 {
        let inner = self.inner.borrow();
        match (&inner.snaps, inner.phase) {
            (None, _) | (_, SurfacePhase::Closed) => 0.0,
            (Some(snaps), _) => scrim::scrim_opacity(
                inner.offset(),
                snaps.terminal_offset(),
                inner.config.scrim_max_opacity,
            ),
        }
    }

    /// Downward shift of the sheet's pinned footer.
    pub fn footer_offset(&self) -> f32 {
        let inner = self.inner.borrow();
        match (&inner.snaps, inner.config.chrome) {
            (Some(snaps), Some(chrome)) => {
                scrim::footer_offset(inner.offset(), snaps.extent(), chrome)
            }
            _ => 0.0,
        }
    }

    pub fn is_edge_hover(&self) -> bool {
        let inner = self.inner.borrow();
        inner.edge_hover && inner.phase == SurfacePhase::Closed
    }

    pub fn is_dragging(&self) -> bool {
        self.inner.borrow().tracker.is_dragging()
    }

    pub fn is_animating(&self) -> bool {
        self.inner.borrow().settler.is_animating()
    }

    /// Whether the surface currently holds a document-level subscription.
    pub fn has_pointer_subscription(&self) -> bool {
        self.inner.borrow().subscription.is_some()
    }

    fn handle_tracked_event(&self, event: &PointerEvent) {
        self.update(|inner| inner.on_tracked_event(event));
    }

    /// Runs `f` against the inner state, then delivers queued events with the
    /// borrow released.
    fn update<R>(&self, f: impl FnOnce(&mut PresenterInner) -> R) -> R {
        let (result, events, listeners) = {
            let mut inner = self.inner.borrow_mut();
            let result = f(&mut inner);
            let events = mem::take(&mut inner.pending_events);
            let listeners: SmallVec<[Listener; 2]> = if events.is_empty() {
                SmallVec::new()
            } else {
                inner
                    .listeners
                    .iter()
                    .map(|(_, listener)| Rc::clone(listener))
                    .collect()
            };
            (result, events, listeners)
        };
        for event in &events {
            for listener in &listeners {
                listener(event);
            }
        }
        result
    }
}

impl fmt::Debug for SurfacePresenter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let inner = self.inner.borrow();
        f.debug_struct("SurfacePresenter")
            .field("kind", &inner.kind)
            .field("phase", &inner.phase)
            .field("offset", &inner.offset())
            .finish()
    }
}

struct PresenterInner {
    kind: SurfaceKind,
    config: SurfaceConfig,
    dispatcher: PointerDispatcher,
    this: Weak<RefCell<PresenterInner>>,
    phase: SurfacePhase,
    snaps: Option<ResolvedSnaps>,
    controller: Option<SnapSurfaceController>,
    settler: MotionSettler,
    in_flight: Option<(AnimationId, SnapCommand)>,
    tracker: DragGestureTracker,
    tap: TapGesture,
    subscription: Option<PointerSubscription>,
    pending_open: Option<SnapPoint>,
    content: Option<Rc<dyn ContentScroll>>,
    edge_hover: bool,
    last_frame_nanos: Option<u64>,
    /// Between `OpenRequested` and `CloseRequested`.
    announced_open: bool,
    /// Between the first `OpenRequested` and `Closed`.
    shown: bool,
    listeners: Vec<(ListenerId, Listener)>,
    next_listener_id: u64,
    pending_events: SmallVec<[SurfaceEvent; 2]>,
}

impl PresenterInner {
    fn new(
        kind: SurfaceKind,
        config: SurfaceConfig,
        snaps: Option<ResolvedSnaps>,
        dispatcher: PointerDispatcher,
        this: Weak<RefCell<PresenterInner>>,
    ) -> Self {
        let tracker = match kind {
            SurfaceKind::Sheet => DragGestureTracker::sheet(),
            SurfaceKind::Drawer => DragGestureTracker::drawer(),
        };
        let resting = snaps.as_ref().map_or(0.0, ResolvedSnaps::terminal_offset);
        Self {
            kind,
            config,
            dispatcher,
            this,
            phase: SurfacePhase::Closed,
            snaps,
            controller: None,
            settler: MotionSettler::new(resting),
            in_flight: None,
            tracker,
            tap: TapGesture::new(TAP_SLOP),
            subscription: None,
            pending_open: None,
            content: None,
            edge_hover: false,
            last_frame_nanos: None,
            announced_open: false,
            shown: false,
            listeners: Vec::new(),
            next_listener_id: 0,
            pending_events: SmallVec::new(),
        }
    }

    fn set_phase(&mut self, phase: SurfacePhase) {
        if self.phase != phase {
            log::debug!("{:?} surface: {:?} -> {:?}", self.kind, self.phase, phase);
            self.phase = phase;
        }
    }

    fn announce_open(&mut self) {
        if !self.announced_open {
            self.announced_open = true;
            self.shown = true;
            self.pending_events.push(SurfaceEvent::OpenRequested);
        }
    }

    fn announce_close(&mut self) {
        if self.announced_open {
            self.announced_open = false;
            self.pending_events.push(SurfaceEvent::CloseRequested);
        }
    }

    fn is_closing(&self) -> bool {
        matches!(self.in_flight, Some((_, SnapCommand::Dismiss { .. })))
    }

    fn is_open(&self) -> bool {
        self.phase != SurfacePhase::Closed && !self.is_closing()
    }

    fn offset(&self) -> f32 {
        let Some(snaps) = &self.snaps else {
            return 0.0;
        };
        match self.phase {
            SurfacePhase::Closed => snaps.terminal_offset(),
            SurfacePhase::Dragging => self.tracker.live_offset(),
            SurfacePhase::Opening | SurfacePhase::Settling => snaps.clamp(self.settler.value()),
            SurfacePhase::Idle => self.settler.value(),
        }
    }

    fn open(&mut self, snap: Option<SnapPoint>) -> Result<(), SurfaceError> {
        let target = snap.unwrap_or(self.config.initial_snap);
        if target.is_terminal() || !self.config.snap_table.contains(target) {
            return Err(SurfaceError::UnknownSnap(target));
        }
        if self.snaps.is_none() {
            log::warn!(
                "{:?} surface: extent unknown, deferring open to {}",
                self.kind,
                target
            );
            self.pending_open = Some(target);
            self.announce_open();
            return Ok(());
        }
        self.open_to(target)
    }

    fn open_to(&mut self, target: SnapPoint) -> Result<(), SurfaceError> {
        let Some(snaps) = self.snaps.clone() else {
            return Ok(());
        };
        if let Some(offset) = self.abort_drag() {
            self.settler.snap_to(offset);
        }
        let was_open = self.is_open();
        if self.phase == SurfacePhase::Closed {
            self.controller = None;
            self.settler.snap_to(snaps.terminal_offset());
        }
        if self.controller.is_none() {
            self.controller = Some(SnapSurfaceController::new(
                snaps,
                target,
                self.config.decision(),
            )?);
        }
        let Some(controller) = self.controller.as_mut() else {
            return Ok(());
        };
        let command = controller.request_snap(target)?;
        self.announce_open();

        if was_open {
            self.start_settle(command, self.config.snap_spring, None, SurfacePhase::Settling);
        } else {
            self.start_settle(command, self.config.open_spring, None, SurfacePhase::Opening);
        }
        Ok(())
    }

    fn close(&mut self) {
        if self.pending_open.take().is_some() {
            self.announce_close();
            self.teardown();
            return;
        }
        if self.phase == SurfacePhase::Closed || self.is_closing() {
            return;
        }
        if let Some(offset) = self.abort_drag() {
            self.settler.snap_to(offset);
        }
        let Some(controller) = self.controller.as_mut() else {
            self.teardown();
            return;
        };
        let command = controller.request_close();
        self.announce_close();
        self.start_settle(
            command,
            self.config.dismiss_spring,
            None,
            SurfacePhase::Settling,
        );
    }

    /// Drops any captured drag or pending tap. Returns the live offset of an
    /// aborted drag.
    fn abort_drag(&mut self) -> Option<f32> {
        self.tap.reset();
        self.subscription = None;
        self.tracker.cancel().map(|_| self.tracker.live_offset())
    }

    fn teardown(&mut self) {
        self.abort_drag();
        self.controller = None;
        self.in_flight = None;
        self.pending_open = None;
        match &self.snaps {
            Some(snaps) => self.settler.snap_to(snaps.terminal_offset()),
            None => self.settler.stop(),
        }
        self.set_phase(SurfacePhase::Closed);
        self.announced_open = false;
        if mem::take(&mut self.shown) {
            self.pending_events.push(SurfaceEvent::Closed);
        }
    }

    fn start_settle(
        &mut self,
        command: SnapCommand,
        spring: SpringSpec,
        velocity: Option<f32>,
        phase: SurfacePhase,
    ) {
        let id = self.settler.animate_to(command.offset(), spring, velocity);
        self.in_flight = Some((id, command));
        self.set_phase(phase);
    }

    fn step(&mut self, dt: f32) {
        if self.phase == SurfacePhase::Dragging {
            return;
        }
        let status = self.settler.step(dt);
        if let Some(controller) = self.controller.as_mut() {
            controller.set_live_offset(self.settler.value());
        }
        if let SettleStatus::Completed(id) = status {
            self.on_settled(id);
        }
    }

    fn on_settled(&mut self, id: AnimationId) {
        let Some((active, command)) = self.in_flight else {
            return;
        };
        if active != id {
            return;
        }
        self.in_flight = None;
        match command {
            SnapCommand::Dismiss { .. } => self.teardown(),
            SnapCommand::AnimateTo { snap, .. } => {
                if let Some(controller) = self.controller.as_mut() {
                    controller.finish_settle();
                }
                self.set_phase(SurfacePhase::Idle);
                self.pending_events.push(SurfaceEvent::Settled(snap));
            }
        }
    }

    fn set_extent(&mut self, extent: f32) -> Result<(), SurfaceError> {
        let snaps = self.config.snap_table.resolve(extent)?;
        self.config.extent = Some(extent);
        self.apply_snaps(snaps)?;
        if let Some(target) = self.pending_open.take() {
            log::debug!("{:?} surface: extent {} known, opening", self.kind, extent);
            self.open_to(target)?;
        }
        Ok(())
    }

    fn set_snap_table(&mut self, table: SnapTable) -> Result<(), SurfaceError> {
        let result = self.replace_snap_table(table);
        if let Err(err) = &result {
            log::warn!("{:?} surface: snap table rejected: {}", self.kind, err);
            self.pending_events
                .push(SurfaceEvent::ConfigurationRejected(err.to_string()));
        }
        result
    }

    fn replace_snap_table(&mut self, table: SnapTable) -> Result<(), SurfaceError> {
        validate_table(self.kind, &table, self.config.initial_snap)?;
        if let Some(extent) = self.config.extent {
            let snaps = table.resolve(extent)?;
            self.apply_snaps(snaps)?;
        }
        self.config.snap_table = table;
        Ok(())
    }

    fn apply_snaps(&mut self, snaps: ResolvedSnaps) -> Result<(), SurfaceError> {
        match self.controller.as_mut() {
            Some(controller) => {
                let offset = controller.replace_snaps(snaps.clone())?;
                match (self.phase, self.in_flight) {
                    (SurfacePhase::Idle, _) => self.settler.snap_to(offset),
                    (_, Some((_, command))) => {
                        let command = match command {
                            SnapCommand::AnimateTo { .. } => SnapCommand::AnimateTo {
                                snap: controller.current_snap(),
                                offset,
                            },
                            SnapCommand::Dismiss { snap, .. } => SnapCommand::Dismiss {
                                snap,
                                offset: snaps.terminal_offset(),
                            },
                        };
                        let id = self.settler.interrupt(command.offset());
                        self.in_flight = Some((id, command));
                    }
                    _ => {}
                }
            }
            None => self.settler.snap_to(snaps.terminal_offset()),
        }
        self.snaps = Some(snaps);
        Ok(())
    }

    fn pointer_down(&mut self, event: &PointerEvent) -> bool {
        if self.tracker.is_dragging() || self.tap.is_pending() {
            log::trace!(
                "{:?} surface: pointer {} down while busy",
                self.kind,
                event.id
            );
            return false;
        }
        match self.route_press(event.position) {
            PressRoute::Drag(CaptureDecision::Capture) => self.capture(event),
            PressRoute::Drag(decision) => {
                log::trace!(
                    "{:?} surface: pointer {} not captured ({:?})",
                    self.kind,
                    event.id,
                    decision
                );
                false
            }
            PressRoute::Scrim => {
                self.tap.on_down(event);
                self.subscribe();
                event.consume();
                true
            }
        }
    }

    fn route_press(&self, position: Point) -> PressRoute {
        let Some(snaps) = &self.snaps else {
            return PressRoute::Drag(CaptureDecision::Ignore);
        };
        let offset = self.offset();
        match self.kind {
            SurfaceKind::Drawer => {
                if self.phase == SurfacePhase::Closed {
                    if position.x >= 0.0 && position.x <= self.config.edge_band {
                        PressRoute::Drag(CaptureDecision::Capture)
                    } else {
                        PressRoute::Drag(CaptureDecision::Ignore)
                    }
                } else if position.x <= snaps.extent() - offset {
                    PressRoute::Drag(CaptureDecision::Capture)
                } else {
                    PressRoute::Scrim
                }
            }
            SurfaceKind::Sheet => {
                if self.phase == SurfacePhase::Closed {
                    PressRoute::Drag(CaptureDecision::Ignore)
                } else if position.y < offset {
                    PressRoute::Scrim
                } else if self.content_has_precedence(position, offset, snaps) {
                    PressRoute::Drag(CaptureDecision::RouteToContent)
                } else {
                    PressRoute::Drag(CaptureDecision::Capture)
                }
            }
        }
    }

    /// Scrolled content keeps vertical drags while the sheet rests fully open.
    fn content_has_precedence(&self, position: Point, offset: f32, snaps: &ResolvedSnaps) -> bool {
        if !self.config.respects_content_scroll || self.phase != SurfacePhase::Idle {
            return false;
        }
        let at_most_open = self
            .controller
            .as_ref()
            .is_some_and(|c| c.current_snap() == snaps.most_open().0);
        let header = self.config.chrome.map_or(0.0, |c| c.header_height);
        at_most_open
            && position.y >= offset + header
            && self.content.as_ref().is_some_and(|content| !content.is_at_top())
    }

    fn capture(&mut self, event: &PointerEvent) -> bool {
        let Some(snaps) = self.snaps.clone() else {
            return false;
        };
        let from_closed = self.phase == SurfacePhase::Closed;
        let offset = if from_closed {
            snaps.terminal_offset()
        } else {
            snaps.clamp(self.settler.value())
        };
        if from_closed || self.controller.is_none() {
            match SnapSurfaceController::new(
                snaps.clone(),
                snaps.terminal().0,
                self.config.decision(),
            ) {
                Ok(controller) => self.controller = Some(controller),
                Err(err) => {
                    log::warn!("{:?} surface: cannot start drag: {}", self.kind, err);
                    return false;
                }
            }
        }

        let bounds = TravelBounds::new(snaps.most_open_offset(), snaps.terminal_offset())
            .with_hard_min(0.0)
            .with_elastic(self.config.elastic_open_end);
        if !self
            .tracker
            .on_pointer_down(event, CaptureDecision::Capture, offset, bounds)
        {
            return false;
        }

        self.settler.snap_to(offset);
        self.in_flight = None;
        if let Some(controller) = self.controller.as_mut() {
            controller.set_live_offset(offset);
            controller.begin_drag();
        }
        self.edge_hover = false;
        self.subscribe();
        self.set_phase(SurfacePhase::Dragging);
        true
    }

    fn subscribe(&mut self) {
        if self.subscription.is_some() {
            return;
        }
        let this = self.this.clone();
        self.subscription = Some(self.dispatcher.subscribe(move |event| {
            if let Some(inner) = this.upgrade() {
                SurfacePresenter { inner }.handle_tracked_event(event);
            }
        }));
    }

    fn on_tracked_event(&mut self, event: &PointerEvent) {
        match event.kind {
            PointerEventKind::Down => {}
            PointerEventKind::Move => {
                if self.tracker.is_dragging() {
                    if let Some(offset) = self.tracker.on_pointer_move(event) {
                        if let Some(controller) = self.controller.as_mut() {
                            controller.update_drag(offset);
                        }
                    }
                } else if self.tap.is_pending() {
                    self.tap.on_move(event);
                    if !self.tap.is_pending() {
                        self.subscription = None;
                    }
                }
            }
            PointerEventKind::Up => {
                if self.tracker.is_dragging() {
                    if let Some(sample) = self.tracker.on_pointer_up(event) {
                        self.finish_drag(sample);
                    }
                } else if self.tap.is_pending() {
                    let tapped = self.tap.on_up(event);
                    if !self.tap.is_pending() {
                        self.subscription = None;
                    }
                    if tapped {
                        log::debug!("{:?} surface: scrim tapped", self.kind);
                        self.close();
                    }
                } else {
                    log::trace!(
                        "{:?} surface: stale pointer {} up ignored",
                        self.kind,
                        event.id
                    );
                }
            }
            PointerEventKind::Cancel => self.cancel_gesture(event),
        }
    }

    fn cancel_gesture(&mut self, event: &PointerEvent) {
        let captured = self
            .tracker
            .origin()
            .is_some_and(|origin| origin.pointer == event.id);
        if !captured {
            self.tap.reset();
            if !self.tracker.is_dragging() {
                self.subscription = None;
            }
            return;
        }
        let Some(offset) = self.abort_drag() else {
            return;
        };
        self.settler.snap_to(offset);
        if let Some(controller) = self.controller.as_mut() {
            let command = controller.cancel_drag();
            let spring = if command.is_dismiss() {
                self.config.dismiss_spring
            } else {
                self.config.snap_spring
            };
            self.start_settle(command, spring, None, SurfacePhase::Settling);
        }
    }

    fn finish_drag(&mut self, sample: GestureSample) {
        self.subscription = None;
        let Some(controller) = self.controller.as_mut() else {
            return;
        };
        let command = controller.on_drag_end(&sample);
        self.settler.snap_to(sample.offset);
        let spring = if command.is_dismiss() {
            self.announce_close();
            self.config.dismiss_spring
        } else {
            self.announce_open();
            self.config.snap_spring
        };
        self.start_settle(
            command,
            spring,
            Some(sample.velocity),
            SurfacePhase::Settling,
        );
    }
}

#[cfg(test)]
#[path = "tests/presenter_tests.rs"]
mod tests;
