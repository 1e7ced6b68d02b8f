// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peruse_gesture::{Direction, GestureClassifier, GestureSequence};
use peruse_input::{InputChord, Key, KeyEvent, PointerEvent};

use super::{Entry, ModeContext, ModeHandler, Transition};
use crate::host::{CommandRequest, HostRequest};

/// Records a mouse gesture and runs its command on release.
#[derive(Debug, Default)]
pub(crate) struct GestureMode {
    classifier: GestureClassifier,
    chord: InputChord,
}

impl GestureMode {
    fn report_progress(&self, cx: &mut ModeContext<'_>) {
        let sequence = self.classifier.sequence().clone();
        let mut finished = sequence.clone();
        finished.push(Direction::Click);
        let command = cx.gestures.lookup(&finished).cloned();
        cx.push(HostRequest::GestureProgress(sequence, command));
    }
}

impl ModeHandler for GestureMode {
    fn on_opened(&mut self, cx: &mut ModeContext<'_>, _entry: Entry) -> Transition {
        let Some(press) = cx.pointer.press else {
            return Transition::IDLE;
        };
        let gesture = cx.config.gesture;
        self.classifier = GestureClassifier::new(gesture.min_distance_x, gesture.min_distance_y);
        self.classifier.reset(press.position);
        self.chord = cx.pointer.last.chord();
        if self.classifier.feed(cx.pointer.last.position).is_some() {
            self.report_progress(cx);
        }
        Transition::Stay
    }

    fn on_closed(&mut self, cx: &mut ModeContext<'_>) {
        self.classifier.reset(cx.pointer.last.position);
        cx.push(HostRequest::GestureProgress(GestureSequence::new(), None));
    }

    fn on_pointer_down(&mut self, _cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        self.chord = InputChord::new(self.chord.buttons() | event.buttons, event.modifiers);
        Transition::Stay
    }

    fn on_pointer_up(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        if !event.buttons.is_empty() {
            return Transition::Stay;
        }
        match self.classifier.finish() {
            Some(sequence) => match cx.gestures.lookup(&sequence).cloned() {
                Some(command) => {
                    tracing::debug!(gesture = %sequence, %command, "gesture matched");
                    cx.push(HostRequest::Execute(CommandRequest::Gesture { command, sequence }));
                }
                None => tracing::debug!(gesture = %sequence, "no command bound to gesture"),
            },
            // Nothing recognizable was drawn: treat the press as a click.
            None => cx.push(HostRequest::Execute(CommandRequest::Click(self.chord))),
        }
        Transition::IDLE
    }

    fn on_pointer_move(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        if self.classifier.feed(event.position).is_some() {
            self.report_progress(cx);
        }
        Transition::Stay
    }

    fn on_key(&mut self, _cx: &mut ModeContext<'_>, event: &KeyEvent) -> Transition {
        if event.key == Key::Escape && event.pressed {
            tracing::debug!("gesture cancelled");
            return Transition::IDLE;
        }
        Transition::Stay
    }
}
