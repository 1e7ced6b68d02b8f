// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! The boundary between the interaction core and the application.

use core::time::Duration;

use kurbo::{Point, Vec2};
use peruse_gesture::{CommandId, GestureSequence};
use peruse_input::{InputChord, Modifiers};
use peruse_timing::Scheduler;
use peruse_view::TransformChanges;

use crate::modes::Mode;

/// State of the host window.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum WindowState {
    /// Restored; the only state in which window moves apply.
    #[default]
    Normal,
    /// Minimized.
    Minimized,
    /// Maximized.
    Maximized,
    /// Full screen.
    FullScreen,
}

/// A command for the host's command catalog.
#[derive(Clone, Debug, PartialEq)]
pub enum CommandRequest {
    /// A press and release without dragging.
    Click(InputChord),
    /// One repetition while a button is held in repeat mode.
    RepeatClick(InputChord),
    /// The wheel turned while idle.
    Wheel {
        /// Wheel travel in notches; positive rolls away from the user.
        delta: f64,
        /// Modifiers held.
        modifiers: Modifiers,
    },
    /// A recognized gesture.
    Gesture {
        /// Bound command.
        command: CommandId,
        /// The sequence that matched.
        sequence: GestureSequence,
    },
}

/// Services the application provides to the coordinator.
///
/// Timers and frame callbacks come from the [`Scheduler`] supertrait: when a
/// timer started through it expires, the host calls
/// [`Coordinator::on_timer`](crate::Coordinator::on_timer); while a frame
/// client is subscribed, the host calls
/// [`Coordinator::on_frame`](crate::Coordinator::on_frame) once per frame.
pub trait InteractionHost: Scheduler {
    /// Captures (`true`) or releases (`false`) the pointer.
    fn set_pointer_capture(&mut self, capture: bool);

    /// Current window state.
    fn window_state(&self) -> WindowState;

    /// Current window position in screen coordinates.
    fn window_position(&self) -> Point;

    /// Moves the window.
    fn move_window(&mut self, position: Point);

    /// Runs a command.
    fn execute(&mut self, command: CommandRequest);

    /// The gesture in progress changed; `command` is what releasing now
    /// would run. An empty sequence clears any progress display.
    fn gesture_progress(&mut self, sequence: &GestureSequence, command: Option<&CommandId>) {
        let _ = (sequence, command);
    }

    /// The active mode changed.
    fn mode_changed(&mut self, mode: Mode) {
        let _ = mode;
    }

    /// The content transform changed.
    fn transform_changed(&mut self, changes: TransformChanges) {
        let _ = changes;
    }

    /// The loupe was shown, moved, zoomed, or hidden. `position` is zero and
    /// `scale` is ignored while hidden.
    fn loupe_changed(&mut self, visible: bool, position: Vec2, scale: f64) {
        let _ = (visible, position, scale);
    }
}

/// Side effects queued by mode handlers and forwarded by the coordinator.
#[derive(Clone, Debug, PartialEq)]
pub(crate) enum HostRequest {
    Execute(CommandRequest),
    MoveWindow(Point),
    /// Moves the content; `follow` trails the pointer instead of jumping.
    SetPosition {
        target: Point,
        follow: bool,
    },
    StartPressTimer(Duration),
    StopPressTimer,
    GestureProgress(GestureSequence, Option<CommandId>),
    LoupeChanged,
}
