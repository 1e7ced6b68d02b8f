// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use peruse_input::{Key, KeyEvent, PointerEvent, WheelEvent};

use super::{Entry, ModeContext, ModeHandler, Transition};
use crate::host::HostRequest;

/// Shows the magnifier and lets it follow the pointer.
#[derive(Debug, Default)]
pub(crate) struct LoupeMode {
    /// Opened without a held button; stays until the next click.
    sticky: bool,
    /// A button went down after a sticky open.
    pressed: bool,
}

impl LoupeMode {
    fn follow(cx: &mut ModeContext<'_>, event: &PointerEvent) {
        let offset = cx.layout.to_center_offset(event.position);
        cx.loupe.move_to(offset);
        cx.push(HostRequest::LoupeChanged);
    }
}

impl ModeHandler for LoupeMode {
    fn on_opened(&mut self, cx: &mut ModeContext<'_>, entry: Entry) -> Transition {
        self.sticky = entry == Entry::Requested;
        self.pressed = false;
        let offset = cx.layout.to_center_offset(cx.pointer.last.position);
        cx.loupe.activate(offset);
        cx.push(HostRequest::LoupeChanged);
        Transition::Stay
    }

    fn on_closed(&mut self, cx: &mut ModeContext<'_>) {
        cx.loupe.deactivate();
        cx.push(HostRequest::LoupeChanged);
        self.sticky = false;
        self.pressed = false;
    }

    fn on_pointer_down(&mut self, _cx: &mut ModeContext<'_>, _event: &PointerEvent) -> Transition {
        self.pressed = true;
        Transition::Stay
    }

    fn on_pointer_up(&mut self, _cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        if !event.buttons.is_empty() || (self.sticky && !self.pressed) {
            return Transition::Stay;
        }
        Transition::IDLE
    }

    fn on_pointer_move(&mut self, cx: &mut ModeContext<'_>, event: &PointerEvent) -> Transition {
        Self::follow(cx, event);
        Transition::Stay
    }

    fn on_wheel(&mut self, cx: &mut ModeContext<'_>, event: &WheelEvent) -> Transition {
        if !cx.loupe.params().wheel_zoom || event.delta == 0.0 {
            return Transition::Stay;
        }
        let changed = if event.delta > 0.0 {
            cx.loupe.zoom_in()
        } else {
            cx.loupe.zoom_out()
        };
        if changed {
            tracing::trace!(scale = cx.loupe.scale(), "loupe zoom");
            cx.push(HostRequest::LoupeChanged);
        }
        Transition::Stay
    }

    fn on_key(&mut self, cx: &mut ModeContext<'_>, event: &KeyEvent) -> Transition {
        if event.key == Key::Escape && event.pressed && cx.loupe.params().escape_closes {
            return Transition::IDLE;
        }
        Transition::Stay
    }
}
