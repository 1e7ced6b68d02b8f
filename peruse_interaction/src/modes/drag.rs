// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Point;
use peruse_input::{DragActionId, InputChord, Key, KeyEvent, PointerEvent};

use super::{Entry, ModeContext, ModeHandler, Transition};
use crate::drag::{DragEffect, DragEngine};
use crate::host::HostRequest;

/// Runs the drag engine while a bound chord is dragged.
#[derive(Debug, Default)]
pub(crate) struct DragMode {
    engine: DragEngine,
}

impl DragMode {
    fn update_chord(&mut self, cx: &ModeContext<'_>, chord: InputChord, event: &PointerEvent) {
        let dcx = cx.drag_context();
        self.engine
            .update_chord(&dcx, chord, event.position, event.screen_position);
    }

    fn drag_to(&mut self, cx: &mut ModeContext<'_>, position: Point, screen: Point) {
        let effect = {
            let dcx = cx.drag_context();
            self.engine.drag_to(&dcx, position, screen)
        };
        match effect {
            Some(DragEffect::Transform(next)) => {
                let follow = cx.config.drag.smooth_follow
                    && matches!(
                        self.engine.action(),
                        Some(DragActionId::Pan | DragActionId::ScaledPan)
                    );
                cx.set_transform(next, follow);
            }
            Some(DragEffect::MoveWindow(position)) => cx.push(HostRequest::MoveWindow(position)),
            None => {}
        }
    }
}

impl ModeHandler for DragMode {
    fn on_opened(&mut self, cx: &mut ModeContext<'_>, _entry: Entry) -> Transition {
        let Some(press) = cx.pointer.press else {
            return Transition::IDLE;
        };
        let last = cx.pointer.last;
        {
            let dcx = cx.drag_context();
            self.engine
                .begin(&dcx, press.position, press.screen_position, last.chord());
        }
        // The threshold travel already happened; apply it.
        self.drag_to(cx, last.position, last.screen_position);
        Transition::Stay
    }

    fn on_closed(&mut self, _cx: &mut ModeContext<'_>) {
        self.engine.end();
    }

    fn on_pointer_down(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        self.update_chord(cx, event.chord(), event);
        Transition::Stay
    }

    fn on_pointer_up(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        if event.buttons.is_empty() {
            return Transition::IDLE;
        }
        self.update_chord(cx, event.chord(), event);
        Transition::Stay
    }

    fn on_pointer_move(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        self.update_chord(cx, event.chord(), event);
        self.drag_to(cx, event.position, event.screen_position);
        Transition::Stay
    }

    fn on_key(&mut self, cx: &mut ModeContext<'_>, event: &KeyEvent) -> Transition {
        match event.key {
            Key::Escape if event.pressed => Transition::IDLE,
            Key::Modifier => {
                let last = cx.pointer.last;
                self.update_chord(cx, InputChord::new(last.buttons, event.modifiers), &last);
                Transition::Stay
            }
            _ => Transition::Stay,
        }
    }
}
