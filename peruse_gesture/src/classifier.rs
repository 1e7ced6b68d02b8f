// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Turns a pointer path into a [`GestureSequence`].

use kurbo::{Point, Vec2};

use crate::sequence::{Direction, GestureSequence};

/// Half-angle of the cone around a cardinal that selects it.
const CAPTURE_DEGREES: f64 = 30.0;
/// Half-angle of the cone that keeps the previous direction.
const HOLD_DEGREES: f64 = 60.0;

/// Incremental gesture classifier.
///
/// Feed pointer positions while the gesture button is held. Each sample that
/// travels far enough from the running origin is classified against the four
/// cardinals; a direction is appended only when it differs from the previous
/// one, so a long stroke yields a single token no matter how many samples it
/// is split into.
#[derive(Clone, Debug)]
pub struct GestureClassifier {
    min_distance: Vec2,
    origin: Point,
    sequence: GestureSequence,
}

impl GestureClassifier {
    /// Creates a classifier with per-axis minimum travel.
    #[must_use]
    pub fn new(min_distance_x: f64, min_distance_y: f64) -> Self {
        Self {
            min_distance: Vec2::new(min_distance_x.abs(), min_distance_y.abs()),
            origin: Point::ZERO,
            sequence: GestureSequence::new(),
        }
    }

    /// Per-axis minimum travel.
    #[must_use]
    pub fn min_distance(&self) -> Vec2 {
        self.min_distance
    }

    /// Clears the sequence and starts tracking from `origin`.
    pub fn reset(&mut self, origin: Point) {
        self.origin = origin;
        self.sequence.clear();
    }

    /// Running origin of the current stroke.
    #[must_use]
    pub fn origin(&self) -> Point {
        self.origin
    }

    /// Tokens recognized so far.
    #[must_use]
    pub fn sequence(&self) -> &GestureSequence {
        &self.sequence
    }

    /// Classifies a sample.
    ///
    /// Returns the direction appended by this sample, if any.
    pub fn feed(&mut self, point: Point) -> Option<Direction> {
        let delta = point - self.origin;
        if delta.x.abs() < self.min_distance.x && delta.y.abs() < self.min_distance.y {
            return None;
        }
        self.origin = point;

        let previous = self.sequence.last().filter(|d| *d != Direction::Click);
        let direction = previous
            .filter(|d| within(delta, *d, HOLD_DEGREES))
            .or_else(|| {
                Direction::CARDINALS
                    .into_iter()
                    .find(|d| within(delta, *d, CAPTURE_DEGREES))
            })?;

        if previous == Some(direction) {
            return None;
        }
        tracing::trace!(%direction, "gesture token");
        self.sequence.push(direction);
        Some(direction)
    }

    /// Ends the gesture.
    ///
    /// A non-empty sequence gets a trailing [`Direction::Click`] and is
    /// returned; an empty one yields `None`, meaning the button was released
    /// without any recognized stroke.
    pub fn finish(&mut self) -> Option<GestureSequence> {
        if self.sequence.is_empty() {
            return None;
        }
        let mut sequence = core::mem::take(&mut self.sequence);
        sequence.push(Direction::Click);
        Some(sequence)
    }
}

impl Default for GestureClassifier {
    fn default() -> Self {
        Self::new(30.0, 30.0)
    }
}

fn within(delta: Vec2, direction: Direction, degrees: f64) -> bool {
    let (Some(unit), length) = (direction.unit(), delta.hypot()) else {
        return false;
    };
    if length == 0.0 {
        return false;
    }
    // Small epsilon so an exact boundary angle counts as inside.
    delta.dot(unit) / length >= degrees.to_radians().cos() - 1e-9
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn short_moves_are_ignored() {
        let mut c = GestureClassifier::new(30.0, 30.0);
        c.reset(Point::new(100.0, 100.0));
        assert_eq!(c.feed(Point::new(120.0, 110.0)), None);
        assert_eq!(c.origin(), Point::new(100.0, 100.0));
        assert!(c.sequence().is_empty());
    }

    #[test]
    fn diagonal_moves_reset_origin_without_a_token() {
        let mut c = GestureClassifier::new(10.0, 10.0);
        c.reset(Point::ZERO);
        assert_eq!(c.feed(Point::new(50.0, 50.0)), None);
        assert_eq!(c.origin(), Point::new(50.0, 50.0));
        assert!(c.sequence().is_empty());
    }

    #[test]
    fn previous_direction_is_held_within_sixty_degrees() {
        let mut c = GestureClassifier::new(10.0, 10.0);
        c.reset(Point::ZERO);
        assert_eq!(c.feed(Point::new(40.0, 0.0)), Some(Direction::Right));
        // 50 degrees off the x axis: outside the capture cone of Down but
        // still inside the hold cone of Right.
        let bend = Vec2::from_angle(50_f64.to_radians()) * 40.0;
        assert_eq!(c.feed(Point::new(40.0, 0.0) + bend), None);
        assert_eq!(c.sequence().to_string(), "R");
    }

    #[test]
    fn direction_change_appends() {
        let mut c = GestureClassifier::new(10.0, 10.0);
        c.reset(Point::ZERO);
        c.feed(Point::new(0.0, -40.0));
        c.feed(Point::new(40.0, -40.0));
        c.feed(Point::new(40.0, 0.0));
        assert_eq!(c.sequence().to_string(), "URD");
    }

    #[test]
    fn finish_appends_click_only_when_something_was_drawn() {
        let mut c = GestureClassifier::default();
        c.reset(Point::ZERO);
        assert_eq!(c.finish(), None);

        c.feed(Point::new(-60.0, 0.0));
        assert_eq!(c.finish().map(|s| s.to_string()), Some("LC".to_string()));
        assert!(c.sequence().is_empty());
    }
}
