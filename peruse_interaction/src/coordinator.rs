// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction coordinator: owns the modes and routes input to the active one.
//!
//! ## Usage
//!
//! 1) Build a [`Coordinator`] from an [`InteractionConfig`], optionally with
//!    custom bindings and gestures, and give it the current [`ViewLayout`].
//! 2) Feed every pointer, wheel and key event to
//!    [`Coordinator::handle_event`].
//! 3) When the press timer fires call [`Coordinator::on_timer`]; while the
//!    animator's frame client is subscribed call [`Coordinator::on_frame`].
//! 4) Render with [`Coordinator::transform`] and [`Coordinator::loupe`]; the
//!    host's [`InteractionHost`] notifications say when they changed.
//!
//! Mode handlers never touch the host. They queue requests which the
//! coordinator forwards once the handler and any transitions it asked for
//! have run. Pointer capture is updated last, after both the outgoing and
//! the incoming mode have been notified.

use core::time::Duration;

use hashbrown::HashMap;
use kurbo::{Point, Vec2};
use peruse_gesture::GestureTable;
use peruse_input::{ActionBindingTable, InputEvent};
use peruse_timing::{FrameClient, TimerId};
use peruse_view::{
    LoupeState, PositionAnimator, PositionTransition, Transform, TransformState, ViewLayout,
};

use crate::config::InteractionConfig;
use crate::drag::{NScrollDirection, ReadingDirection, n_scroll};
use crate::host::{HostRequest, InteractionHost};
use crate::modes::{
    DragMode, Entry, GestureMode, IdleMode, LoupeMode, Mode, ModeContext, ModeHandler,
    PointerTrack, Transition,
};

/// The timer the coordinator uses for long press and repeat.
pub const PRESS_TIMER: TimerId = TimerId::new(1);

/// The frame client of the position animator.
pub const ANIMATION_CLIENT: FrameClient = FrameClient::new(1);

/// Chained transitions requested from `on_opened` beyond this are dropped.
const MAX_CHAINED_TRANSITIONS: usize = 8;

/// Pointer interaction state machine.
///
/// Owns the transform, the loupe, the binding and gesture tables, and one
/// handler per [`Mode`]. Exactly one mode is active; it starts in
/// [`Mode::Idle`].
#[derive(Debug)]
pub struct Coordinator {
    config: InteractionConfig,
    bindings: ActionBindingTable,
    gestures: GestureTable,
    transform: TransformState,
    loupe: LoupeState,
    animator: PositionAnimator,
    layout: ViewLayout,
    mode: Mode,
    handlers: HashMap<Mode, Box<dyn ModeHandler>>,
    pointer: PointerTrack,
    outbox: Vec<HostRequest>,
    captured: bool,
    now: Duration,
}

impl Default for Coordinator {
    fn default() -> Self {
        Self::new(InteractionConfig::default())
    }
}

impl Coordinator {
    /// Creates a coordinator with every mode registered and default bindings.
    pub fn new(config: InteractionConfig) -> Self {
        let mut handlers: HashMap<Mode, Box<dyn ModeHandler>> = HashMap::new();
        handlers.insert(Mode::Idle, Box::new(IdleMode::default()));
        handlers.insert(Mode::Drag, Box::new(DragMode::default()));
        handlers.insert(Mode::Gesture, Box::new(GestureMode::default()));
        handlers.insert(Mode::Loupe, Box::new(LoupeMode::default()));
        Self {
            loupe: LoupeState::new(config.loupe),
            config,
            bindings: ActionBindingTable::new(),
            gestures: GestureTable::new(),
            transform: TransformState::new(),
            animator: PositionAnimator::new(ANIMATION_CLIENT, Point::ZERO),
            layout: ViewLayout::default(),
            mode: Mode::Idle,
            handlers,
            pointer: PointerTrack::default(),
            outbox: Vec::new(),
            captured: false,
            now: Duration::ZERO,
        }
    }

    /// Unregisters `mode`; requests to enter it fall back to Idle.
    ///
    /// Idle itself cannot be removed.
    #[must_use]
    pub fn without(mut self, mode: Mode) -> Self {
        if mode == Mode::Idle {
            tracing::warn!("the idle mode cannot be unregistered");
        } else {
            self.handlers.remove(&mode);
        }
        self
    }

    /// Replaces the chord bindings.
    #[must_use]
    pub fn with_bindings(mut self, bindings: ActionBindingTable) -> Self {
        self.bindings = bindings;
        self
    }

    /// Replaces the gesture table.
    #[must_use]
    pub fn with_gestures(mut self, gestures: GestureTable) -> Self {
        self.gestures = gestures;
        self
    }

    /// Sets the view and content sizes.
    #[must_use]
    pub fn with_layout(mut self, layout: ViewLayout) -> Self {
        self.layout = layout;
        self
    }

    /// The active mode.
    #[must_use]
    pub fn mode(&self) -> Mode {
        self.mode
    }

    /// Returns `true` if `mode` has a handler.
    #[must_use]
    pub fn is_registered(&self, mode: Mode) -> bool {
        self.handlers.contains_key(&mode)
    }

    /// The content transform.
    #[must_use]
    pub fn transform(&self) -> &TransformState {
        &self.transform
    }

    /// The magnifier.
    #[must_use]
    pub fn loupe(&self) -> &LoupeState {
        &self.loupe
    }

    /// Whether the coordinator currently holds pointer capture.
    #[must_use]
    pub fn is_captured(&self) -> bool {
        self.captured
    }

    /// View and content sizes.
    #[must_use]
    pub fn layout(&self) -> ViewLayout {
        self.layout
    }

    /// Updates view and content sizes, e.g. after a resize or page change.
    pub fn set_layout(&mut self, layout: ViewLayout) {
        self.layout = layout;
    }

    /// Current settings.
    #[must_use]
    pub fn config(&self) -> &InteractionConfig {
        &self.config
    }

    /// Replaces the settings.
    pub fn set_config(&mut self, config: InteractionConfig) {
        self.loupe.set_params(config.loupe);
        self.config = config;
    }

    /// Chord bindings.
    #[must_use]
    pub fn bindings(&self) -> &ActionBindingTable {
        &self.bindings
    }

    /// Chord bindings, for rebinding.
    pub fn bindings_mut(&mut self) -> &mut ActionBindingTable {
        &mut self.bindings
    }

    /// Gesture table.
    #[must_use]
    pub fn gestures(&self) -> &GestureTable {
        &self.gestures
    }

    /// Gesture table, for editing.
    pub fn gestures_mut(&mut self) -> &mut GestureTable {
        &mut self.gestures
    }

    /// Routes one input event to the active mode.
    pub fn handle_event<H: InteractionHost + ?Sized>(&mut self, host: &mut H, event: &InputEvent) {
        self.now = event.time();
        match *event {
            InputEvent::PointerDown(e) => {
                if self.pointer.press.is_none() || self.pointer.last.buttons.is_empty() {
                    self.pointer.press = Some(e);
                }
                self.pointer.last = e;
                self.dispatch(host, |h, cx| h.on_pointer_down(cx, &e));
            }
            InputEvent::PointerUp(e) => {
                self.pointer.last = e;
                self.dispatch(host, |h, cx| h.on_pointer_up(cx, &e));
                if e.buttons.is_empty() {
                    self.pointer.press = None;
                }
            }
            InputEvent::PointerMove(e) => {
                self.pointer.last = e;
                self.dispatch(host, |h, cx| h.on_pointer_move(cx, &e));
            }
            InputEvent::Wheel(w) => {
                self.pointer.last = w.pointer;
                self.dispatch(host, |h, cx| h.on_wheel(cx, &w));
            }
            InputEvent::Key(k) => {
                self.pointer.last.modifiers = k.modifiers;
                self.dispatch(host, |h, cx| h.on_key(cx, &k));
            }
        }
    }

    /// Call when a timer started through the host expires.
    pub fn on_timer<H: InteractionHost + ?Sized>(&mut self, host: &mut H, timer: TimerId, now: Duration) {
        self.now = now;
        if timer != PRESS_TIMER {
            tracing::trace!(timer = timer.get(), "ignoring unknown timer");
            return;
        }
        self.dispatch(host, |h, cx| h.on_timer(cx, timer));
    }

    /// Call once per frame while [`ANIMATION_CLIENT`] is subscribed.
    pub fn on_frame<H: InteractionHost + ?Sized>(&mut self, host: &mut H, now: Duration) {
        self.now = now;
        if !self.animator.is_animating() {
            return;
        }
        let position = self.animator.on_frame(now, host);
        self.transform.set_position(position);
        self.notify_transform(host);
    }

    /// Forces the Idle mode, e.g. when the content was replaced.
    ///
    /// Stops the press timer and finishes any position animation.
    pub fn cancel<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        tracing::debug!(mode = %self.mode, "cancel");
        host.stop_timer(PRESS_TIMER);
        let position = self.animator.stop(host);
        self.transform.set_position(position);
        self.transition(host, Transition::IDLE);
        self.flush(host);
    }

    /// Shows the magnifier without a held button; the next click closes it.
    pub fn open_loupe<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        if self.mode == Mode::Loupe {
            return;
        }
        self.transition(host, Transition::Enter(Mode::Loupe, Entry::Requested));
        self.flush(host);
    }

    /// Scrolls one step in reading order, easing toward the new position.
    ///
    /// Returns `false` if the content is already at that end.
    pub fn scroll_n<H: InteractionHost + ?Sized>(
        &mut self,
        host: &mut H,
        direction: NScrollDirection,
        reading: ReadingDirection,
        now: Duration,
    ) -> bool {
        self.now = now;
        let from = Transform {
            position: self.animator.target(),
            ..self.transform.get()
        };
        let delta = n_scroll(&from, &self.layout, direction, reading, &self.config.n_scroll);
        if delta == Vec2::ZERO {
            return false;
        }
        tracing::debug!(?direction, ?reading, dx = delta.x, dy = delta.y, "n-scroll");
        let transition = PositionTransition::eased(self.config.n_scroll.duration());
        let position = self
            .animator
            .set_target(from.position + delta, transition, now, host);
        self.transform.set_position(position);
        self.notify_transform(host);
        true
    }

    /// Replaces the transform outright, halting any position animation.
    pub fn set_transform<H: InteractionHost + ?Sized>(&mut self, host: &mut H, transform: Transform) {
        self.transform.apply(transform);
        self.animator.sync(self.transform.position(), host);
        self.notify_transform(host);
    }

    /// Returns the content to its untransformed state.
    pub fn reset_transform<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        self.set_transform(host, Transform::IDENTITY);
    }

    fn dispatch<H, F>(&mut self, host: &mut H, f: F)
    where
        H: InteractionHost + ?Sized,
        F: FnOnce(&mut dyn ModeHandler, &mut ModeContext<'_>) -> Transition,
    {
        let mode = self.mode;
        let next = self.run_handler(host, mode, f);
        self.transition(host, next);
        self.flush(host);
    }

    /// Where the content is heading, counting moves not yet forwarded.
    fn position_target(&self) -> Point {
        self.outbox
            .iter()
            .rev()
            .find_map(|request| match request {
                HostRequest::SetPosition { target, .. } => Some(*target),
                _ => None,
            })
            .unwrap_or_else(|| self.animator.target())
    }

    fn run_handler<H, F>(&mut self, host: &H, mode: Mode, f: F) -> Transition
    where
        H: InteractionHost + ?Sized,
        F: FnOnce(&mut dyn ModeHandler, &mut ModeContext<'_>) -> Transition,
    {
        let window_state = host.window_state();
        let window_position = host.window_position();
        let position_target = self.position_target();
        let Self {
            config,
            bindings,
            gestures,
            transform,
            loupe,
            layout,
            handlers,
            pointer,
            outbox,
            ..
        } = self;
        let Some(handler) = handlers.get_mut(&mode) else {
            return Transition::Stay;
        };
        let mut cx = ModeContext {
            config,
            bindings,
            gestures,
            transform,
            loupe,
            layout: *layout,
            pointer,
            window_state,
            window_position,
            position_target,
            outbox,
        };
        f(handler.as_mut(), &mut cx)
    }

    fn transition<H: InteractionHost + ?Sized>(&mut self, host: &mut H, mut next: Transition) {
        let from = self.mode;
        let mut chained = 0;
        while let Transition::Enter(requested, entry) = next {
            if chained == MAX_CHAINED_TRANSITIONS {
                tracing::warn!(mode = %self.mode, "too many chained mode transitions");
                break;
            }
            chained += 1;

            let mode = if self.handlers.contains_key(&requested) {
                requested
            } else {
                tracing::warn!(mode = %requested, "mode not registered; entering idle");
                Mode::Idle
            };
            let old = self.mode;
            self.run_handler(host, old, |h, cx| {
                h.on_closed(cx);
                Transition::Stay
            });
            self.mode = mode;
            tracing::debug!(from = %old, to = %mode, "mode transition");
            next = self.run_handler(host, mode, |h, cx| h.on_opened(cx, entry));
        }

        if self.mode != from {
            host.mode_changed(self.mode);
        }
        let capture = self.mode != Mode::Idle;
        if capture != self.captured {
            self.captured = capture;
            host.set_pointer_capture(capture);
        }
    }

    fn flush<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        let mut requests = core::mem::take(&mut self.outbox);
        for request in requests.drain(..) {
            match request {
                HostRequest::Execute(command) => host.execute(command),
                HostRequest::MoveWindow(position) => host.move_window(position),
                HostRequest::SetPosition { target, follow } => {
                    let transition = if follow {
                        PositionTransition::Follow
                    } else {
                        PositionTransition::Direct
                    };
                    let position = self.animator.set_target(target, transition, self.now, host);
                    self.transform.set_position(position);
                }
                HostRequest::StartPressTimer(delay) => host.start_timer(PRESS_TIMER, delay),
                HostRequest::StopPressTimer => host.stop_timer(PRESS_TIMER),
                HostRequest::GestureProgress(sequence, command) => {
                    host.gesture_progress(&sequence, command.as_ref());
                }
                HostRequest::LoupeChanged => host.loupe_changed(
                    self.loupe.is_enabled(),
                    self.loupe.position(),
                    self.loupe.scale(),
                ),
            }
        }
        self.outbox = requests;
        self.notify_transform(host);
    }

    fn notify_transform<H: InteractionHost + ?Sized>(&mut self, host: &mut H) {
        let changes = self.transform.take_changes();
        if !changes.is_empty() {
            host.transform_changed(changes);
        }
    }
}
