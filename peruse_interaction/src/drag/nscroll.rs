// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! N-type scrolling: down the column first, then across to the next column.

use kurbo::Vec2;
use peruse_view::{DragArea, Transform, ViewLayout};
use serde::{Deserialize, Serialize};

use crate::config::NScrollConfig;

/// Which way to step through the content.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NScrollDirection {
    /// Toward the end of the content.
    Forward,
    /// Toward the start of the content.
    Backward,
}

/// Horizontal reading order of the content.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum ReadingDirection {
    /// Columns advance to the right.
    #[default]
    LeftToRight,
    /// Columns advance to the left.
    RightToLeft,
}

/// Computes one N-type scroll step for `transform` under `layout`.
///
/// Vertical travel toward the trailing edge comes first (when allowed). Once
/// the remaining vertical overflow is within `params.margin`, the content
/// moves across by up to `rate` view widths in reading order, and the
/// vertical position snaps to the top (forward) or bottom (backward) edge.
///
/// Returns the position delta; a zero vector means the content is already at
/// its end in that direction and the caller should turn the page instead.
#[must_use]
pub fn n_scroll(
    transform: &Transform,
    layout: &ViewLayout,
    direction: NScrollDirection,
    reading: ReadingDirection,
    params: &NScrollConfig,
) -> Vec2 {
    let over = DragArea::new(layout, transform).overflow();
    let view = layout.view_size;
    let step = |remaining: f64, extent: f64| {
        if remaining > params.margin {
            remaining.min(params.rate * extent)
        } else {
            0.0
        }
    };

    let forward = direction == NScrollDirection::Forward;
    if params.allow_vertical {
        let dy = if forward {
            -step(over.bottom, view.height)
        } else {
            step(-over.top, view.height)
        };
        if dy != 0.0 {
            return Vec2::new(0.0, dy);
        }
    }

    // Moving forward in left-to-right order reveals the right overhang.
    let toward_right = forward == (reading == ReadingDirection::LeftToRight);
    let dx = if toward_right {
        -step(over.right, view.width)
    } else {
        step(-over.left, view.width)
    };
    if dx == 0.0 {
        return Vec2::ZERO;
    }

    let dy = match (params.allow_vertical, forward) {
        (false, _) => 0.0,
        (true, true) => -over.top,
        (true, false) => -over.bottom,
    };
    Vec2::new(dx, dy)
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::{Point, Size};

    fn layout(content: (f64, f64)) -> ViewLayout {
        ViewLayout::new(Size::new(800.0, 600.0), Size::new(content.0, content.1))
    }

    fn at(x: f64, y: f64) -> Transform {
        Transform {
            position: Point::new(x, y),
            ..Transform::IDENTITY
        }
    }

    #[test]
    fn vertical_first() {
        // 1600x1200 centered: overflow 300 top and bottom.
        let d = n_scroll(
            &at(0.0, 0.0),
            &layout((1600.0, 1200.0)),
            NScrollDirection::Forward,
            ReadingDirection::LeftToRight,
            &NScrollConfig::default(),
        );
        assert_eq!(d, Vec2::new(0.0, -300.0));
    }

    #[test]
    fn vertical_step_is_limited_by_rate() {
        let params = NScrollConfig {
            rate: 0.5,
            ..NScrollConfig::default()
        };
        let d = n_scroll(
            &at(0.0, 0.0),
            &layout((800.0, 3000.0)),
            NScrollDirection::Backward,
            ReadingDirection::LeftToRight,
            &params,
        );
        assert_eq!(d, Vec2::new(0.0, 300.0));
    }

    #[test]
    fn right_to_left_moves_across_to_the_left_column() {
        // Content bottom already aligned: y = -300 puts the bottom edge at 600.
        let d = n_scroll(
            &at(0.0, -300.0),
            &layout((1600.0, 1200.0)),
            NScrollDirection::Forward,
            ReadingDirection::RightToLeft,
            &NScrollConfig::default(),
        );
        // Left overhang is 400; snap the top edge back to the view top.
        assert_eq!(d, Vec2::new(400.0, 600.0));
    }

    #[test]
    fn overflow_inside_margin_counts_as_none() {
        let d = n_scroll(
            &at(0.0, 0.0),
            &layout((801.0, 600.5)),
            NScrollDirection::Forward,
            ReadingDirection::LeftToRight,
            &NScrollConfig::default(),
        );
        assert_eq!(d, Vec2::ZERO);
    }

    #[test]
    fn vertical_can_be_disabled() {
        let params = NScrollConfig {
            allow_vertical: false,
            ..NScrollConfig::default()
        };
        let d = n_scroll(
            &at(0.0, 0.0),
            &layout((1600.0, 1200.0)),
            NScrollDirection::Backward,
            ReadingDirection::LeftToRight,
            &params,
        );
        assert_eq!(d, Vec2::new(400.0, 0.0));
    }
}
