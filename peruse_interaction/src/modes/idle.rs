// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peruse_input::{DragActionId, InputChord, Key, KeyEvent, MouseButtons, PointerEvent, WheelEvent};
use peruse_timing::TimerId;

use super::{Entry, Mode, ModeContext, ModeHandler, Transition};
use crate::config::LongPressMode;
use crate::host::{CommandRequest, HostRequest};

/// Press tracking while no other mode is active.
#[derive(Debug, Default)]
pub(crate) struct IdleMode {
    /// A button is held and its release may still become a click.
    armed: bool,
    /// The current press will not produce a click.
    suppressed: bool,
    /// The long press timer fired for the current press.
    long_pressed: bool,
    /// Every button pressed since the first one went down.
    buttons: MouseButtons,
}

impl IdleMode {
    fn reset(&mut self) {
        *self = Self::default();
    }

    fn suppress(&mut self, cx: &mut ModeContext<'_>) {
        self.suppressed = true;
        cx.push(HostRequest::StopPressTimer);
    }

    fn click_chord(&self, event: &PointerEvent) -> InputChord {
        InputChord::new(self.buttons, event.modifiers)
    }
}

impl ModeHandler for IdleMode {
    fn on_opened(&mut self, cx: &mut ModeContext<'_>, _entry: Entry) -> Transition {
        self.reset();
        let held = cx.pointer.last.buttons;
        if !held.is_empty() {
            // Left another mode with buttons still down: their release is not a click.
            self.armed = true;
            self.suppressed = true;
            self.buttons = held;
        }
        Transition::Stay
    }

    fn on_closed(&mut self, cx: &mut ModeContext<'_>) {
        if self.armed {
            cx.push(HostRequest::StopPressTimer);
        }
        self.reset();
    }

    fn on_pointer_down(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        if !self.armed {
            self.reset();
            self.armed = true;
            self.buttons = event.buttons;
            let long_press = cx.config.long_press;
            if long_press.mode != LongPressMode::None
                && event.buttons.intersects(long_press.buttons)
                && (event.buttons - long_press.buttons).is_empty()
            {
                cx.push(HostRequest::StartPressTimer(long_press.duration()));
            }
            return Transition::Stay;
        }

        self.buttons |= event.buttons;
        if self.long_pressed {
            // Another button ends a repeat.
            self.suppress(cx);
        } else {
            cx.push(HostRequest::StopPressTimer);
        }
        Transition::Stay
    }

    fn on_pointer_up(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        if !event.buttons.is_empty() {
            if self.armed {
                cx.push(HostRequest::StopPressTimer);
            }
            return Transition::Stay;
        }
        if self.armed {
            cx.push(HostRequest::StopPressTimer);
            if !self.suppressed && !self.long_pressed {
                let chord = self.click_chord(event);
                tracing::debug!(%chord, "click");
                cx.push(HostRequest::Execute(CommandRequest::Click(chord)));
            }
        }
        self.reset();
        Transition::Stay
    }

    fn on_pointer_move(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        if !self.armed || self.suppressed || self.long_pressed {
            return Transition::Stay;
        }
        let Some(press) = cx.pointer.press else {
            return Transition::Stay;
        };
        let travel = event.position - press.position;
        let threshold = cx.config.min_drag_distance;
        if travel.x.abs() < threshold && travel.y.abs() < threshold {
            return Transition::Stay;
        }

        cx.push(HostRequest::StopPressTimer);
        let chord = event.chord();
        match cx.bindings.resolve(chord).map(|a| a.id()) {
            Some(DragActionId::Gesture) if cx.config.gesture_enabled => Transition::to(Mode::Gesture),
            Some(id) if id != DragActionId::Gesture && cx.config.drag_enabled => {
                Transition::to(Mode::Drag)
            }
            action => {
                tracing::trace!(%chord, ?action, "press moved without an enabled action");
                self.suppressed = true;
                Transition::Stay
            }
        }
    }

    fn on_wheel(&mut self, cx: &mut ModeContext<'_>, event: &WheelEvent) -> Transition {
        if self.armed {
            // Wheel while a button is held replaces the click.
            self.suppress(cx);
        }
        cx.push(HostRequest::Execute(CommandRequest::Wheel {
            delta: event.delta,
            modifiers: event.pointer.modifiers,
        }));
        Transition::Stay
    }

    fn on_key(&mut self, cx: &mut ModeContext<'_>, event: &KeyEvent) -> Transition {
        if event.key == Key::Escape && event.pressed && self.armed {
            self.suppress(cx);
        }
        Transition::Stay
    }

    fn on_timer(&mut self, cx: &mut ModeContext<'_>, _timer: TimerId) -> Transition {
        if !self.armed || self.suppressed {
            return Transition::Stay;
        }
        let long_press = cx.config.long_press;
        let first = !self.long_pressed;
        self.long_pressed = true;
        match long_press.mode {
            LongPressMode::None => Transition::Stay,
            LongPressMode::Loupe if first => Transition::to(Mode::Loupe),
            LongPressMode::Loupe => Transition::Stay,
            LongPressMode::Repeat => {
                let chord = self.click_chord(&cx.pointer.last);
                tracing::trace!(%chord, "repeat click");
                cx.push(HostRequest::Execute(CommandRequest::RepeatClick(chord)));
                cx.push(HostRequest::StartPressTimer(long_press.repeat_interval()));
                Transition::Stay
            }
        }
    }
}
