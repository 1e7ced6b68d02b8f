// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::Vec2;
use serde::{Deserialize, Serialize};

/// Loupe behavior settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoupeParams {
    /// Magnification used when the loupe is first shown (and on every
    /// activation when `reset_on_activate` is set).
    pub default_scale: f64,
    /// Lower bound for zooming.
    pub min_scale: f64,
    /// Upper bound for zooming.
    pub max_scale: f64,
    /// Increment applied by one zoom step.
    pub scale_step: f64,
    /// Pointer travel multiplier while the loupe is open.
    pub speed: f64,
    /// Bring the content under the cursor to the view center instead of
    /// keeping it under the cursor.
    pub center_lock: bool,
    /// Restore `default_scale` on each activation.
    pub reset_on_activate: bool,
    /// Let the wheel zoom while the loupe is open.
    pub wheel_zoom: bool,
    /// Let Escape close the loupe.
    pub escape_closes: bool,
}

impl Default for LoupeParams {
    fn default() -> Self {
        Self {
            default_scale: 2.0,
            min_scale: 2.0,
            max_scale: 10.0,
            scale_step: 1.0,
            speed: 1.0,
            center_lock: false,
            reset_on_activate: false,
            wheel_zoom: true,
            escape_closes: true,
        }
    }
}

impl LoupeParams {
    fn clamp_scale(&self, scale: f64) -> f64 {
        let (lo, hi) = if self.min_scale <= self.max_scale {
            (self.min_scale, self.max_scale)
        } else {
            (self.max_scale, self.min_scale)
        };
        scale.clamp(lo.max(f64::MIN_POSITIVE), hi.max(f64::MIN_POSITIVE))
    }
}

/// Magnifier state.
///
/// `position` is the view-space offset (from the view center) of the point
/// shown magnified at the view center; the host renders the content as
/// `scale * (p - position)` around the view center while enabled.
///
/// `position` therefore has the same sign as the cursor offset: a cursor
/// right of center gives a positive x. The translation to draw with is
/// [`LoupeState::render_offset`], which already carries the negation.
#[derive(Clone, Debug)]
pub struct LoupeState {
    params: LoupeParams,
    enabled: bool,
    position: Vec2,
    scale: f64,
    origin: Vec2,
    base: Vec2,
}

impl Default for LoupeState {
    fn default() -> Self {
        Self::new(LoupeParams::default())
    }
}

impl LoupeState {
    /// Creates a hidden loupe.
    #[must_use]
    pub fn new(params: LoupeParams) -> Self {
        Self {
            scale: params.clamp_scale(params.default_scale),
            params,
            enabled: false,
            position: Vec2::ZERO,
            origin: Vec2::ZERO,
            base: Vec2::ZERO,
        }
    }

    /// Current settings.
    #[must_use]
    pub fn params(&self) -> &LoupeParams {
        &self.params
    }

    /// Replaces the settings; the current scale is re-clamped.
    pub fn set_params(&mut self, params: LoupeParams) {
        self.params = params;
        self.scale = params.clamp_scale(self.scale);
    }

    /// Returns `true` while the loupe is shown.
    #[must_use]
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Magnifier center offset; zero while hidden.
    #[must_use]
    pub fn position(&self) -> Vec2 {
        if self.enabled {
            self.position
        } else {
            Vec2::ZERO
        }
    }

    /// Translation from the view center at which the magnified content is
    /// drawn, `-scale * position`.
    #[must_use]
    pub fn render_offset(&self) -> Vec2 {
        -self.position() * self.scale
    }

    /// Magnification, kept across activations unless `reset_on_activate`.
    #[must_use]
    pub fn scale(&self) -> f64 {
        self.scale
    }

    /// Shows the loupe for a cursor at `offset` from the view center.
    pub fn activate(&mut self, offset: Vec2) {
        if self.params.reset_on_activate {
            self.scale = self.params.clamp_scale(self.params.default_scale);
        }
        self.position = if self.params.center_lock {
            offset
        } else {
            offset * (1.0 - 1.0 / self.scale)
        };
        self.origin = offset;
        self.base = self.position;
        self.enabled = true;
        tracing::debug!(scale = self.scale, "loupe activated");
    }

    /// Follows the cursor, now at `offset` from the view center.
    pub fn move_to(&mut self, offset: Vec2) {
        if !self.enabled {
            return;
        }
        self.position = self.base + (offset - self.origin) * self.params.speed;
    }

    /// One step more magnification. Returns `true` if the scale changed.
    pub fn zoom_in(&mut self) -> bool {
        self.set_scale(self.scale + self.params.scale_step)
    }

    /// One step less magnification. Returns `true` if the scale changed.
    pub fn zoom_out(&mut self) -> bool {
        self.set_scale(self.scale - self.params.scale_step)
    }

    fn set_scale(&mut self, scale: f64) -> bool {
        let scale = self.params.clamp_scale(scale);
        let changed = scale != self.scale;
        self.scale = scale;
        changed
    }

    /// Hides the loupe.
    pub fn deactivate(&mut self) {
        if self.enabled {
            tracing::debug!("loupe deactivated");
        }
        self.enabled = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_anchored_activation_keeps_content_under_cursor() {
        let mut loupe = LoupeState::default();
        let d = Vec2::new(100.0, -40.0);
        loupe.activate(d);
        // Content point at d is drawn at scale * (d - position).
        let shown = (d - loupe.position()) * loupe.scale();
        assert!((shown - d).hypot() < 1e-9);
    }

    #[test]
    fn position_follows_cursor_sign_and_render_offset_opposes_it() {
        let mut loupe = LoupeState::default();
        assert_eq!(loupe.render_offset(), Vec2::ZERO);
        loupe.activate(Vec2::new(100.0, -40.0));
        assert_eq!(loupe.position(), Vec2::new(50.0, -20.0));
        assert_eq!(loupe.render_offset(), Vec2::new(-100.0, 40.0));
        loupe.deactivate();
        assert_eq!(loupe.render_offset(), Vec2::ZERO);
    }

    #[test]
    fn center_lock_brings_cursor_content_to_center() {
        let mut loupe = LoupeState::new(LoupeParams {
            center_lock: true,
            ..LoupeParams::default()
        });
        loupe.activate(Vec2::new(30.0, 20.0));
        assert_eq!(loupe.position(), Vec2::new(30.0, 20.0));
    }

    #[test]
    fn move_scales_travel_by_speed() {
        let mut loupe = LoupeState::new(LoupeParams {
            speed: 2.0,
            center_lock: true,
            ..LoupeParams::default()
        });
        loupe.activate(Vec2::new(10.0, 10.0));
        loupe.move_to(Vec2::new(15.0, 5.0));
        assert_eq!(loupe.position(), Vec2::new(20.0, 0.0));
    }

    #[test]
    fn zoom_is_clamped() {
        let mut loupe = LoupeState::default();
        assert!(!loupe.zoom_out());
        for _ in 0..20 {
            loupe.zoom_in();
        }
        assert_eq!(loupe.scale(), 10.0);
        assert!(!loupe.zoom_in());
    }

    #[test]
    fn scale_persists_unless_reset_on_activate() {
        let mut loupe = LoupeState::default();
        loupe.activate(Vec2::ZERO);
        loupe.zoom_in();
        loupe.deactivate();
        assert_eq!(loupe.position(), Vec2::ZERO);
        loupe.activate(Vec2::ZERO);
        assert_eq!(loupe.scale(), 3.0);

        loupe.set_params(LoupeParams {
            reset_on_activate: true,
            ..LoupeParams::default()
        });
        loupe.activate(Vec2::ZERO);
        assert_eq!(loupe.scale(), 2.0);
    }
}
