// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction modes and the handler interface they share.

mod drag;
mod gesture;
mod idle;
mod loupe;

pub(crate) use drag::DragMode;
pub(crate) use gesture::GestureMode;
pub(crate) use idle::IdleMode;
pub(crate) use loupe::LoupeMode;

use core::fmt;

use kurbo::Point;
use peruse_gesture::GestureTable;
use peruse_input::{ActionBindingTable, KeyEvent, PointerEvent, WheelEvent};
use peruse_timing::TimerId;
use peruse_view::{LoupeState, Transform, TransformState, ViewLayout};

use crate::config::InteractionConfig;
use crate::drag::DragContext;
use crate::host::{HostRequest, WindowState};

/// The active interaction mode.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Mode {
    /// Waiting for input; clicks, wheel, long press.
    Idle,
    /// A drag action is transforming the content or moving the window.
    Drag,
    /// A mouse gesture is being drawn.
    Gesture,
    /// The magnifier is shown.
    Loupe,
}

impl fmt::Display for Mode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Idle => "Idle",
            Self::Drag => "Drag",
            Self::Gesture => "Gesture",
            Self::Loupe => "Loupe",
        })
    }
}

/// How a mode was entered.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Entry {
    /// By pointer input.
    Pointer,
    /// By an explicit API call, with no button held.
    Requested,
}

/// What a handler wants after processing an input.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) enum Transition {
    Stay,
    Enter(Mode, Entry),
}

impl Transition {
    pub(crate) const IDLE: Self = Self::Enter(Mode::Idle, Entry::Pointer);

    pub(crate) fn to(mode: Mode) -> Self {
        Self::Enter(mode, Entry::Pointer)
    }
}

/// Pointer history the coordinator keeps for handlers.
#[derive(Clone, Copy, Debug)]
pub(crate) struct PointerTrack {
    /// The event that pressed the first of the currently held buttons.
    pub(crate) press: Option<PointerEvent>,
    /// Latest pointer state, with modifiers refreshed by key events.
    pub(crate) last: PointerEvent,
}

impl Default for PointerTrack {
    fn default() -> Self {
        Self {
            press: None,
            last: PointerEvent::new(Point::ZERO),
        }
    }
}

/// State a handler may read and the narrow set of things it may change.
///
/// Handlers never talk to the host directly: side effects go to `outbox`.
#[derive(Debug)]
pub(crate) struct ModeContext<'a> {
    pub(crate) config: &'a InteractionConfig,
    pub(crate) bindings: &'a ActionBindingTable,
    pub(crate) gestures: &'a GestureTable,
    pub(crate) transform: &'a mut TransformState,
    pub(crate) loupe: &'a mut LoupeState,
    pub(crate) layout: ViewLayout,
    pub(crate) pointer: &'a PointerTrack,
    pub(crate) window_state: WindowState,
    pub(crate) window_position: Point,
    /// Where the content position is heading, including requests queued in
    /// this dispatch.
    pub(crate) position_target: Point,
    pub(crate) outbox: &'a mut Vec<HostRequest>,
}

impl ModeContext<'_> {
    /// The transform with its position at the pending target.
    pub(crate) fn target_transform(&self) -> Transform {
        Transform {
            position: self.position_target,
            ..self.transform.get()
        }
    }

    pub(crate) fn drag_context(&self) -> DragContext<'_> {
        DragContext {
            transform: self.target_transform(),
            layout: self.layout,
            config: &self.config.drag,
            bindings: self.bindings,
            window_state: self.window_state,
            window_position: self.window_position,
        }
    }

    /// Applies `next`; its position is queued through the animator.
    pub(crate) fn set_transform(&mut self, next: Transform, follow: bool) {
        let position = self.transform.position();
        self.transform.apply(Transform { position, ..next });
        if next.position != self.position_target {
            self.position_target = next.position;
            self.outbox.push(HostRequest::SetPosition {
                target: next.position,
                follow,
            });
        }
    }

    pub(crate) fn push(&mut self, request: HostRequest) {
        self.outbox.push(request);
    }
}

/// Behavior of one mode.
///
/// Every callback returns the [`Transition`] the handler wants; the
/// coordinator performs it after the callback returns.
pub(crate) trait ModeHandler: fmt::Debug {
    /// The mode was entered. May request a further transition.
    fn on_opened(&mut self, cx: &mut ModeContext<'_>, entry: Entry) -> Transition {
        let _ = (cx, entry);
        Transition::Stay
    }

    /// The mode is being left.
    fn on_closed(&mut self, cx: &mut ModeContext<'_>) {
        let _ = cx;
    }

    fn on_pointer_down(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition;

    fn on_pointer_up(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition;

    fn on_pointer_move(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition;

    fn on_wheel(&mut self, cx: &mut ModeContext<'_>, event: &WheelEvent) -> Transition {
        let _ = (cx, event);
        Transition::Stay
    }

    fn on_key(&mut self, cx: &mut ModeContext<'_>, event: &KeyEvent) -> Transition {
        let _ = (cx, event);
        Transition::Stay
    }

    fn on_timer(&mut self, cx: &mut ModeContext<'_>, timer: TimerId) -> Transition {
        let _ = (cx, timer);
        Transition::Stay
    }
}
