// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Affine, Point, Vec2};

/// Smallest scale a transform accepts.
pub const MIN_SCALE: f64 = 1e-4;

bitflags::bitflags! {
    /// Which parts of a [`TransformState`] changed.
    #[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
    pub struct TransformChanges: u8 {
        /// Position changed.
        const POSITION = 0b0001;
        /// Angle changed.
        const ANGLE    = 0b0010;
        /// Scale changed.
        const SCALE    = 0b0100;
        /// A flip flag changed.
        const FLIP     = 0b1000;
    }
}

impl Default for TransformChanges {
    fn default() -> Self {
        Self::empty()
    }
}

/// Wraps an angle in degrees into `[-180, 180)`.
#[must_use]
pub fn normalize_angle(degrees: f64) -> f64 {
    (degrees + 180.0).rem_euclid(360.0) - 180.0
}

/// Plain transform value: where and how the content is drawn in the view.
///
/// `position` is the offset of the content center from the view center, in
/// view pixels (y down). `angle` is in degrees, positive clockwise on screen.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Transform {
    /// Content center relative to the view center.
    pub position: Point,
    /// Rotation in degrees, `[-180, 180)`.
    pub angle: f64,
    /// Uniform scale, always positive.
    pub scale: f64,
    /// Mirrored left to right.
    pub flip_horizontal: bool,
    /// Mirrored top to bottom.
    pub flip_vertical: bool,
}

impl Default for Transform {
    fn default() -> Self {
        Self::IDENTITY
    }
}

impl Transform {
    /// Centered, unrotated, unscaled, unflipped.
    pub const IDENTITY: Self = Self {
        position: Point::ZERO,
        angle: 0.0,
        scale: 1.0,
        flip_horizontal: false,
        flip_vertical: false,
    };

    /// Per-axis scale factors with flips applied as negation.
    #[must_use]
    pub fn signed_scale(&self) -> Vec2 {
        let sx = if self.flip_horizontal { -self.scale } else { self.scale };
        let sy = if self.flip_vertical { -self.scale } else { self.scale };
        Vec2::new(sx, sy)
    }

    /// Maps content-local coordinates (origin at the content center) to
    /// coordinates relative to the view center.
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        let s = self.signed_scale();
        Affine::translate(self.position.to_vec2())
            * Affine::rotate(self.angle.to_radians())
            * Affine::scale_non_uniform(s.x, s.y)
    }

    fn changes_to(&self, other: &Self) -> TransformChanges {
        let mut changes = TransformChanges::empty();
        if self.position != other.position {
            changes |= TransformChanges::POSITION;
        }
        if self.angle != other.angle {
            changes |= TransformChanges::ANGLE;
        }
        if self.scale != other.scale {
            changes |= TransformChanges::SCALE;
        }
        if self.flip_horizontal != other.flip_horizontal
            || self.flip_vertical != other.flip_vertical
        {
            changes |= TransformChanges::FLIP;
        }
        changes
    }
}

/// The content transform, with change tracking.
///
/// All mutation goes through validating setters. Each setter that actually
/// changes something records the change in a pending [`TransformChanges`]
/// set and bumps [`TransformState::revision`]; observers drain the pending
/// set with [`TransformState::take_changes`].
#[derive(Clone, Debug, Default)]
pub struct TransformState {
    current: Transform,
    pending: TransformChanges,
    revision: u64,
}

impl TransformState {
    /// Creates an identity transform.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the current value.
    #[must_use]
    pub fn get(&self) -> Transform {
        self.current
    }

    /// Content center relative to the view center.
    #[must_use]
    pub fn position(&self) -> Point {
        self.current.position
    }

    /// Angle in degrees.
    #[must_use]
    pub fn angle(&self) -> f64 {
        self.current.angle
    }

    /// Uniform scale.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.current.scale
    }

    /// Horizontal mirror flag.
    #[must_use]
    pub fn flip_horizontal(&self) -> bool {
        self.current.flip_horizontal
    }

    /// Vertical mirror flag.
    #[must_use]
    pub fn flip_vertical(&self) -> bool {
        self.current.flip_vertical
    }

    /// See [`Transform::to_affine`].
    #[must_use]
    pub fn to_affine(&self) -> Affine {
        self.current.to_affine()
    }

    /// Counter bumped on every effective change.
    #[must_use]
    pub fn revision(&self) -> u64 {
        self.revision
    }

    /// Changes recorded since the last call.
    pub fn take_changes(&mut self) -> TransformChanges {
        core::mem::take(&mut self.pending)
    }

    /// Changes recorded and not yet taken.
    #[must_use]
    pub fn pending_changes(&self) -> TransformChanges {
        self.pending
    }

    /// Moves the content.
    pub fn set_position(&mut self, position: Point) {
        self.apply(Transform {
            position,
            ..self.current
        });
    }

    /// Rotates the content; the angle is wrapped into `[-180, 180)`.
    pub fn set_angle(&mut self, degrees: f64) {
        self.apply(Transform {
            angle: degrees,
            ..self.current
        });
    }

    /// Scales the content; values below [`MIN_SCALE`] are raised to it.
    pub fn set_scale(&mut self, scale: f64) {
        self.apply(Transform {
            scale,
            ..self.current
        });
    }

    /// Sets the horizontal mirror flag.
    pub fn set_flip_horizontal(&mut self, flip: bool) {
        self.apply(Transform {
            flip_horizontal: flip,
            ..self.current
        });
    }

    /// Sets the vertical mirror flag.
    pub fn set_flip_vertical(&mut self, flip: bool) {
        self.apply(Transform {
            flip_vertical: flip,
            ..self.current
        });
    }

    /// Back to [`Transform::IDENTITY`].
    pub fn reset(&mut self) {
        self.apply(Transform::IDENTITY);
    }

    /// Replaces every field at once, after validation.
    ///
    /// Returns the changes this call made.
    pub fn apply(&mut self, next: Transform) -> TransformChanges {
        let mut next = next;
        next.angle = if next.angle.is_finite() {
            normalize_angle(next.angle)
        } else {
            self.current.angle
        };
        next.scale = if next.scale.is_finite() {
            next.scale.max(MIN_SCALE)
        } else {
            self.current.scale
        };
        if !next.position.is_finite() {
            next.position = self.current.position;
        }

        let changes = self.current.changes_to(&next);
        if !changes.is_empty() {
            self.current = next;
            self.pending |= changes;
            self.revision = self.revision.wrapping_add(1);
        }
        changes
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn angle_wraps_into_half_open_range() {
        assert_eq!(normalize_angle(180.0), -180.0);
        assert_eq!(normalize_angle(-180.0), -180.0);
        assert_eq!(normalize_angle(190.0), -170.0);
        assert_eq!(normalize_angle(-190.0), 170.0);
        assert_eq!(normalize_angle(720.0), 0.0);
    }

    #[test]
    fn setters_validate() {
        let mut t = TransformState::new();
        t.set_scale(-3.0);
        assert_eq!(t.scale(), MIN_SCALE);
        t.set_angle(270.0);
        assert_eq!(t.angle(), -90.0);
        t.set_scale(f64::NAN);
        assert_eq!(t.scale(), MIN_SCALE);
    }

    #[test]
    fn only_effective_changes_bump_revision() {
        let mut t = TransformState::new();
        t.set_position(Point::ZERO);
        t.set_angle(360.0);
        assert_eq!(t.revision(), 0);
        assert!(t.take_changes().is_empty());

        t.set_position(Point::new(5.0, 0.0));
        t.set_flip_vertical(true);
        assert_eq!(t.revision(), 2);
        assert_eq!(
            t.take_changes(),
            TransformChanges::POSITION | TransformChanges::FLIP
        );
        assert!(t.take_changes().is_empty());
    }

    #[test]
    fn affine_applies_flip_then_rotation_then_translation() {
        let t = Transform {
            position: Point::new(10.0, 20.0),
            angle: 90.0,
            scale: 2.0,
            flip_horizontal: true,
            flip_vertical: false,
        };
        // (1, 0) -> flip -> (-2, 0) -> rotate 90 (y down: x axis to y axis) -> (0, -2)
        let p = t.to_affine() * Point::new(1.0, 0.0);
        assert!((p.x - 10.0).abs() < 1e-9);
        assert!((p.y - 18.0).abs() < 1e-9);
    }

    #[test]
    fn reset_restores_identity() {
        let mut t = TransformState::new();
        t.set_scale(3.0);
        t.set_flip_horizontal(true);
        t.reset();
        assert_eq!(t.get(), Transform::IDENTITY);
    }
}
