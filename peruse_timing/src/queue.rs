// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Deterministic scheduler for hosts that drive time explicitly.

use core::time::Duration;

use smallvec::SmallVec;

use crate::scheduler::{FrameClient, Scheduler, TimerId};

/// A small deterministic [`Scheduler`].
///
/// `TimerQueue` keeps its own notion of "now", advanced by the host through
/// [`TimerQueue::advance_to`]. Timers are one-shot: once returned as expired
/// they are removed. Frame subscriptions are tracked as a set the host can
/// query each time it renders.
///
/// The number of timers and frame clients in an interaction core is tiny, so
/// both are kept in inline vectors and scanned linearly.
#[derive(Clone, Debug, Default)]
pub struct TimerQueue {
    now: Duration,
    timers: SmallVec<[(TimerId, Duration); 4]>,
    frames: SmallVec<[FrameClient; 4]>,
}

impl TimerQueue {
    /// Creates an empty queue at time zero.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the current time of the queue.
    #[must_use]
    pub fn now(&self) -> Duration {
        self.now
    }

    /// Advances the clock to `now` and returns the timers that expired, in
    /// deadline order.
    ///
    /// Moving the clock backwards is ignored; the queue's time never decreases.
    pub fn advance_to(&mut self, now: Duration) -> SmallVec<[TimerId; 4]> {
        if now > self.now {
            self.now = now;
        }
        let mut expired: SmallVec<[(TimerId, Duration); 4]> = SmallVec::new();
        self.timers.retain(|&mut (id, deadline)| {
            if deadline <= now {
                expired.push((id, deadline));
                false
            } else {
                true
            }
        });
        expired.sort_by_key(|&(_, deadline)| deadline);
        expired.into_iter().map(|(id, _)| id).collect()
    }

    /// Returns the deadline of `id` if it is active.
    #[must_use]
    pub fn deadline(&self, id: TimerId) -> Option<Duration> {
        self.timers
            .iter()
            .find(|(timer, _)| *timer == id)
            .map(|&(_, deadline)| deadline)
    }

    /// Returns `true` while `id` is pending.
    #[must_use]
    pub fn is_timer_active(&self, id: TimerId) -> bool {
        self.deadline(id).is_some()
    }

    /// Returns `true` while `client` is subscribed to frames.
    #[must_use]
    pub fn is_frame_subscribed(&self, client: FrameClient) -> bool {
        self.frames.contains(&client)
    }

    /// Returns the clients currently subscribed to frames.
    #[must_use]
    pub fn frame_clients(&self) -> &[FrameClient] {
        &self.frames
    }
}

impl Scheduler for TimerQueue {
    fn start_timer(&mut self, id: TimerId, delay: Duration) {
        self.stop_timer(id);
        self.timers.push((id, self.now + delay));
    }

    fn stop_timer(&mut self, id: TimerId) {
        self.timers.retain(|(timer, _)| *timer != id);
    }

    fn subscribe_frames(&mut self, client: FrameClient) {
        if !self.frames.contains(&client) {
            self.frames.push(client);
        }
    }

    fn unsubscribe_frames(&mut self, client: FrameClient) {
        self.frames.retain(|c| *c != client);
    }
}
