// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peruse Interaction: the pointer state machine of an image or book viewer.
//!
//! Raw pointer, wheel and key events go in; content transforms, window
//! moves, magnifier updates and named commands come out.
//!
//! - [`Coordinator`]: owns the four [`Mode`]s (Idle, Drag, Gesture, Loupe)
//!   and routes each event to the active one.
//! - [`drag`]: the engine that turns pointer travel into pan, scale, rotate,
//!   flip and window moves, plus reading-order n-scroll.
//! - [`config`]: serde-ready tunables.
//! - [`InteractionHost`]: what the application provides (timers, frames,
//!   capture, window access, command execution).
//! - [`InteractionSettings`]: the persisted shape of config, bindings and
//!   gestures.
//!
//! Everything runs on the caller's thread; timers and frame callbacks are
//! requested through [`peruse_timing::Scheduler`] and delivered back through
//! [`Coordinator::on_timer`] and [`Coordinator::on_frame`].
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use peruse_input::{InputEvent, MouseButtons, PointerEvent};
//! use peruse_interaction::{CommandRequest, Coordinator, InteractionHost, Mode, WindowState};
//! use peruse_timing::{FrameClient, Scheduler, TimerId};
//! use peruse_view::ViewLayout;
//! use std::time::Duration;
//!
//! #[derive(Default)]
//! struct Host {
//!     commands: Vec<CommandRequest>,
//! }
//!
//! impl Scheduler for Host {
//!     fn start_timer(&mut self, _: TimerId, _: Duration) {}
//!     fn stop_timer(&mut self, _: TimerId) {}
//!     fn subscribe_frames(&mut self, _: FrameClient) {}
//!     fn unsubscribe_frames(&mut self, _: FrameClient) {}
//! }
//!
//! impl InteractionHost for Host {
//!     fn set_pointer_capture(&mut self, _: bool) {}
//!     fn window_state(&self) -> WindowState { WindowState::Normal }
//!     fn window_position(&self) -> Point { Point::ZERO }
//!     fn move_window(&mut self, _: Point) {}
//!     fn execute(&mut self, command: CommandRequest) { self.commands.push(command); }
//! }
//!
//! let layout = ViewLayout::new(Size::new(800.0, 600.0), Size::new(1600.0, 1200.0));
//! let mut viewer = Coordinator::default().with_layout(layout);
//! let mut host = Host::default();
//!
//! let left = MouseButtons::PRIMARY;
//! let at = |x: f64, y: f64| PointerEvent::new(Point::new(x, y));
//! viewer.handle_event(&mut host, &InputEvent::PointerDown(at(0.0, 0.0).with_buttons(left).with_changed(left)));
//! viewer.handle_event(&mut host, &InputEvent::PointerMove(at(50.0, 0.0).with_buttons(left)));
//! assert_eq!(viewer.mode(), Mode::Drag);
//! viewer.handle_event(&mut host, &InputEvent::PointerUp(at(50.0, 0.0).with_changed(left)));
//!
//! assert_eq!(viewer.mode(), Mode::Idle);
//! assert_eq!(viewer.transform().position(), Point::new(50.0, 0.0));
//! assert!(host.commands.is_empty());
//! ```

pub mod config;
mod coordinator;
pub mod drag;
mod host;
mod modes;
mod settings;

pub use coordinator::{ANIMATION_CLIENT, Coordinator, PRESS_TIMER};
pub use host::{CommandRequest, InteractionHost, WindowState};
pub use modes::Mode;
pub use settings::{InteractionSettings, SettingsError};
