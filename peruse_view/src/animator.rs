// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use core::time::Duration;

use kurbo::{Point, Vec2};
use peruse_timing::{Easing, FrameClient, Scheduler};
use smallvec::SmallVec;

/// Fraction of the remaining distance covered per frame in follow mode.
const FOLLOW_RATE: f64 = 0.1;
/// Follow mode snaps to the target below this distance.
const FOLLOW_SNAP: f64 = 0.1;

/// How the displayed position reaches a new target.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum PositionTransition {
    /// Jump immediately.
    Direct,
    /// Ease over a fixed duration.
    Eased {
        /// Time to reach the target.
        duration: Duration,
        /// Curve applied to progress.
        easing: Easing,
    },
    /// Close a fixed fraction of the gap every frame.
    Follow,
}

impl PositionTransition {
    /// Eased transition with the default curve.
    #[must_use]
    pub fn eased(duration: Duration) -> Self {
        Self::Eased {
            duration,
            easing: Easing::default(),
        }
    }
}

#[derive(Clone, Copy, Debug)]
struct Segment {
    delta: Vec2,
    start: Duration,
    duration: Duration,
    easing: Easing,
}

impl Segment {
    /// Part of `delta` not yet shown at `now`.
    fn remaining(&self, now: Duration) -> Vec2 {
        let elapsed = now.saturating_sub(self.start).as_secs_f64();
        let t = elapsed / self.duration.as_secs_f64();
        self.delta * (1.0 - self.easing.apply(t))
    }

    fn is_done(&self, now: Duration) -> bool {
        now >= self.start + self.duration
    }
}

#[derive(Clone, Debug)]
enum Motion {
    Idle,
    Eased(SmallVec<[Segment; 4]>),
    Follow,
}

/// Animates a displayed position toward a target.
///
/// Eased requests issued while an eased animation is in flight are stacked
/// as additive segments: each segment eases its own delta from its own start
/// time, and the displayed position is the target minus what every segment
/// has not yet covered. The displayed position and its velocity stay
/// continuous when a new target arrives mid-flight.
///
/// The animator holds a frame subscription with the scheduler only while it
/// is moving.
#[derive(Clone, Debug)]
pub struct PositionAnimator {
    client: FrameClient,
    position: Point,
    target: Point,
    motion: Motion,
}

impl PositionAnimator {
    /// Creates an idle animator at `position` that subscribes as `client`.
    #[must_use]
    pub fn new(client: FrameClient, position: Point) -> Self {
        Self {
            client,
            position,
            target: position,
            motion: Motion::Idle,
        }
    }

    /// Frame client id used with the scheduler.
    #[must_use]
    pub fn client(&self) -> FrameClient {
        self.client
    }

    /// Last displayed position.
    #[must_use]
    pub fn position(&self) -> Point {
        self.position
    }

    /// Final position of the current animation.
    #[must_use]
    pub fn target(&self) -> Point {
        self.target
    }

    /// Returns `true` while frames are needed.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !matches!(self.motion, Motion::Idle)
    }

    /// Resynchronizes with a position changed elsewhere, halting any motion.
    pub fn sync<S: Scheduler + ?Sized>(&mut self, position: Point, scheduler: &mut S) {
        self.halt(scheduler);
        self.position = position;
        self.target = position;
    }

    /// Starts moving toward `target`.
    ///
    /// Returns the position to display right away (the target itself for
    /// [`PositionTransition::Direct`]).
    pub fn set_target<S: Scheduler + ?Sized>(
        &mut self,
        target: Point,
        transition: PositionTransition,
        now: Duration,
        scheduler: &mut S,
    ) -> Point {
        match transition {
            PositionTransition::Eased { duration, .. } if duration.is_zero() => {
                self.set_target(target, PositionTransition::Direct, now, scheduler)
            }
            PositionTransition::Direct => {
                self.halt(scheduler);
                self.position = target;
                self.target = target;
                self.position
            }
            PositionTransition::Eased { duration, easing } => {
                if !matches!(self.motion, Motion::Eased(_)) {
                    // Start from what is on screen.
                    self.halt(scheduler);
                    self.target = self.position;
                    self.motion = Motion::Eased(SmallVec::new());
                }
                let delta = target - self.target;
                if let Motion::Eased(segments) = &mut self.motion {
                    segments.push(Segment {
                        delta,
                        start: now,
                        duration,
                        easing,
                    });
                }
                self.target = target;
                scheduler.subscribe_frames(self.client);
                self.position
            }
            PositionTransition::Follow => {
                if !matches!(self.motion, Motion::Follow) {
                    self.halt(scheduler);
                    self.motion = Motion::Follow;
                }
                self.target = target;
                scheduler.subscribe_frames(self.client);
                self.position
            }
        }
    }

    /// Advances one frame and returns the position to display.
    pub fn on_frame<S: Scheduler + ?Sized>(&mut self, now: Duration, scheduler: &mut S) -> Point {
        let settled = match &mut self.motion {
            Motion::Idle => false,
            Motion::Eased(segments) => {
                let pending = segments
                    .iter()
                    .fold(Vec2::ZERO, |acc, s| acc + s.remaining(now));
                segments.retain(|s| !s.is_done(now));
                self.position = self.target - pending;
                segments.is_empty()
            }
            Motion::Follow => {
                let gap = self.target - self.position;
                self.position += gap * FOLLOW_RATE;
                gap.hypot() < FOLLOW_SNAP
            }
        };
        if settled {
            self.finish(scheduler);
        }
        self.position
    }

    /// Jumps to the target and stops.
    pub fn stop<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) -> Point {
        if self.is_animating() {
            self.finish(scheduler);
        }
        self.position
    }

    fn finish<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        self.position = self.target;
        self.halt(scheduler);
    }

    fn halt<S: Scheduler + ?Sized>(&mut self, scheduler: &mut S) {
        if self.is_animating() {
            scheduler.unsubscribe_frames(self.client);
        }
        self.motion = Motion::Idle;
    }
}
