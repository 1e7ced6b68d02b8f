// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

/// Identifier of a one-shot timer owned by a scheduler client.
///
/// Starting a timer with an id that is already active restarts it, so a
/// client that only ever uses one id can never have two timers in flight.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct TimerId(u32);

impl TimerId {
    /// Creates a timer id from a raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Identifier of a per-frame callback subscription.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct FrameClient(u32);

impl FrameClient {
    /// Creates a frame client id from a raw value.
    #[must_use]
    pub const fn new(raw: u32) -> Self {
        Self(raw)
    }

    /// Returns the raw value.
    #[must_use]
    pub const fn get(self) -> u32 {
        self.0
    }
}

/// Timer and frame scheduling provided by the host.
///
/// All callbacks are delivered on the UI thread by the host calling back into
/// the client (for example `Coordinator::on_timer` / `Coordinator::on_frame`).
/// Implementations must tolerate redundant calls: stopping an inactive timer
/// and unsubscribing an inactive client are no-ops.
pub trait Scheduler {
    /// Starts (or restarts) the one-shot timer `id`, firing after `delay`.
    fn start_timer(&mut self, id: TimerId, delay: Duration);

    /// Stops the timer `id` if it is active.
    fn stop_timer(&mut self, id: TimerId);

    /// Requests a callback on every rendered frame for `client`.
    fn subscribe_frames(&mut self, client: FrameClient);

    /// Cancels the per-frame callback for `client`.
    fn unsubscribe_frames(&mut self, client: FrameClient);
}
