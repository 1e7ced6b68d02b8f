// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Interaction settings.
//!
//! Every struct here is `#[serde(default)]`, so a stored document only needs
//! to mention what it changes. Durations are stored as milliseconds.

use core::time::Duration;

use peruse_input::MouseButtons;
use peruse_view::LoupeParams;
use serde::{Deserialize, Serialize};

/// What holding a button without moving does.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum LongPressMode {
    /// Nothing.
    None,
    /// Opens the loupe.
    #[default]
    Loupe,
    /// Repeats the click command while held.
    Repeat,
}

/// Long press timing and trigger buttons.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LongPressConfig {
    /// Behavior on long press.
    pub mode: LongPressMode,
    /// Hold time before the long press fires.
    pub duration_ms: u64,
    /// Interval between repeated clicks in [`LongPressMode::Repeat`].
    pub repeat_interval_ms: u64,
    /// Buttons that can start a long press.
    pub buttons: MouseButtons,
}

impl Default for LongPressConfig {
    fn default() -> Self {
        Self {
            mode: LongPressMode::default(),
            duration_ms: 1000,
            repeat_interval_ms: 100,
            buttons: MouseButtons::PRIMARY,
        }
    }
}

impl LongPressConfig {
    /// Hold time as a [`Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }

    /// Repeat interval as a [`Duration`]; never zero.
    #[must_use]
    pub fn repeat_interval(&self) -> Duration {
        Duration::from_millis(self.repeat_interval_ms.max(1))
    }
}

/// Gesture recognition distances.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GestureConfig {
    /// Horizontal travel needed before a sample is classified.
    pub min_distance_x: f64,
    /// Vertical travel needed before a sample is classified.
    pub min_distance_y: f64,
}

impl Default for GestureConfig {
    fn default() -> Self {
        Self {
            min_distance_x: 30.0,
            min_distance_y: 30.0,
        }
    }
}

/// Fixed point for rotation, scaling, and flipping.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum PivotMode {
    /// The center of the viewing area.
    #[default]
    View,
    /// The content center at drag start.
    Target,
    /// The pointer position where the drag started.
    Cursor,
}

/// Drag transform behavior.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DragConfig {
    /// Pivot for rotation.
    pub rotate_center: PivotMode,
    /// Pivot for scaling.
    pub scale_center: PivotMode,
    /// Mirror axis position for flips.
    pub flip_center: PivotMode,
    /// Rotation snap step in degrees; `0` disables snapping.
    pub angle_snap: f64,
    /// Scale snap step; `0` disables snapping.
    pub scale_snap: f64,
    /// Keep the content from being dragged out of reach. Off by default.
    pub limit_move: bool,
    /// Travel in pixels past which a flip drag toggles.
    pub flip_threshold: f64,
    /// Degrees of rotation per pixel of horizontal travel.
    pub rotate_slider_rate: f64,
    /// Scale exponent (base 2) per pixel of horizontal travel.
    pub scale_slider_rate: f64,
    /// Let panned content trail the pointer instead of jumping.
    pub smooth_follow: bool,
}

impl Default for DragConfig {
    fn default() -> Self {
        Self {
            rotate_center: PivotMode::View,
            scale_center: PivotMode::View,
            flip_center: PivotMode::View,
            angle_snap: 0.0,
            scale_snap: 0.0,
            limit_move: false,
            flip_threshold: 16.0,
            rotate_slider_rate: 0.5,
            scale_slider_rate: 0.01,
            smooth_follow: false,
        }
    }
}

/// Page-like scrolling through content larger than the view.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NScrollConfig {
    /// Fraction of the view extent moved per step.
    pub rate: f64,
    /// Remaining overflow at or below this counts as none.
    pub margin: f64,
    /// Length of the eased scroll animation.
    pub duration_ms: u64,
    /// Scroll vertically before moving across.
    pub allow_vertical: bool,
}

impl Default for NScrollConfig {
    fn default() -> Self {
        Self {
            rate: 1.0,
            margin: 1.0,
            duration_ms: 150,
            allow_vertical: true,
        }
    }
}

impl NScrollConfig {
    /// Animation length as a [`Duration`].
    #[must_use]
    pub fn duration(&self) -> Duration {
        Duration::from_millis(self.duration_ms)
    }
}

/// Top level interaction settings.
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct InteractionConfig {
    /// Per-axis pointer travel that turns a press into a drag or gesture.
    pub min_drag_distance: f64,
    /// Allow drag actions.
    pub drag_enabled: bool,
    /// Allow mouse gestures.
    pub gesture_enabled: bool,
    /// Long press behavior.
    pub long_press: LongPressConfig,
    /// Gesture recognition.
    pub gesture: GestureConfig,
    /// Drag transforms.
    pub drag: DragConfig,
    /// Loupe.
    pub loupe: LoupeParams,
    /// N-type scrolling.
    pub n_scroll: NScrollConfig,
}

impl Default for InteractionConfig {
    fn default() -> Self {
        Self {
            min_drag_distance: 4.0,
            drag_enabled: true,
            gesture_enabled: true,
            long_press: LongPressConfig::default(),
            gesture: GestureConfig::default(),
            drag: DragConfig::default(),
            loupe: LoupeParams::default(),
            n_scroll: NScrollConfig::default(),
        }
    }
}
