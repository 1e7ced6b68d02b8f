// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peruse Timing: host-agnostic timer and frame scheduling primitives.
//!
//! The interaction core never owns a clock or an event loop. Whenever it needs
//! "call me back after a delay" (long press, command repeat) or "call me back
//! on every rendered frame" (position animation), it talks to a [`Scheduler`]
//! supplied by the host. The host is free to back it with dispatcher timers,
//! a winit event loop, `requestAnimationFrame`, or anything else.
//!
//! This crate provides:
//!
//! - [`Scheduler`]: the trait the core uses to start/stop timers and to
//!   subscribe/unsubscribe per-frame callbacks.
//! - [`TimerId`] / [`FrameClient`]: small copyable identifiers for those
//!   subscriptions.
//! - [`TimerQueue`]: a simple deterministic implementation useful for hosts
//!   that drive time themselves, and for tests.
//! - [`Easing`]: the easing curves used by animated transitions.
//!
//! ## Minimal example
//!
//! ```rust
//! use core::time::Duration;
//! use peruse_timing::{Scheduler, TimerId, TimerQueue};
//!
//! const LONG_PRESS: TimerId = TimerId::new(1);
//!
//! let mut queue = TimerQueue::new();
//! queue.start_timer(LONG_PRESS, Duration::from_millis(500));
//!
//! // Nothing fires before the deadline.
//! assert!(queue.advance_to(Duration::from_millis(499)).is_empty());
//! // The timer fires exactly once.
//! assert_eq!(queue.advance_to(Duration::from_millis(500)).as_slice(), &[LONG_PRESS]);
//! assert!(!queue.is_timer_active(LONG_PRESS));
//! ```
//!
//! Time is expressed as a [`Duration`](core::time::Duration) since an
//! arbitrary host epoch; only differences matter.

mod easing;
mod queue;
mod scheduler;

pub use easing::Easing;
pub use queue::TimerQueue;
pub use scheduler::{FrameClient, Scheduler, TimerId};
