// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

use kurbo::{Point, Rect, Size, Vec2};

use crate::transform::Transform;

/// Sizes of the viewing area and of the untransformed content.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct ViewLayout {
    /// Size of the viewing area in view pixels.
    pub view_size: Size,
    /// Size of the content before scaling and rotation.
    pub content_size: Size,
}

impl ViewLayout {
    /// Creates a layout.
    #[must_use]
    pub fn new(view_size: Size, content_size: Size) -> Self {
        Self {
            view_size,
            content_size,
        }
    }

    /// Center of the viewing area in view-local coordinates.
    #[must_use]
    pub fn view_center(&self) -> Point {
        self.view_size.to_rect().center()
    }

    /// Converts a view-local point to an offset from the view center.
    #[must_use]
    pub fn to_center_offset(&self, point: Point) -> Vec2 {
        point - self.view_center()
    }
}

/// How far the content sticks out past each view edge.
///
/// `left` and `top` are zero or negative; `right` and `bottom` are zero or
/// positive.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Overflow {
    /// Overhang past the left edge (`<= 0`).
    pub left: f64,
    /// Overhang past the top edge (`<= 0`).
    pub top: f64,
    /// Overhang past the right edge (`>= 0`).
    pub right: f64,
    /// Overhang past the bottom edge (`>= 0`).
    pub bottom: f64,
}

impl Overflow {
    /// Returns `true` if the content overhangs horizontally by more than `tolerance`.
    #[must_use]
    pub fn overflows_x(&self, tolerance: f64) -> bool {
        self.left < -tolerance || self.right > tolerance
    }

    /// Returns `true` if the content overhangs vertically by more than `tolerance`.
    #[must_use]
    pub fn overflows_y(&self, tolerance: f64) -> bool {
        self.top < -tolerance || self.bottom > tolerance
    }
}

/// The transformed content bounds relative to the view.
///
/// Derived data: recompute it whenever the transform or layout changes.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DragArea {
    view_size: Size,
    target: Rect,
    overflow: Overflow,
}

impl DragArea {
    /// Computes the area for `transform` under `layout`.
    #[must_use]
    pub fn new(layout: &ViewLayout, transform: &Transform) -> Self {
        let content = Rect::from_center_size(Point::ZERO, layout.content_size);
        let target = transform.to_affine().transform_rect_bbox(content)
            + layout.view_center().to_vec2();
        let view = layout.view_size;
        let overflow = Overflow {
            left: target.x0.min(0.0),
            top: target.y0.min(0.0),
            right: (target.x1 - view.width).max(0.0),
            bottom: (target.y1 - view.height).max(0.0),
        };
        Self {
            view_size: view,
            target,
            overflow,
        }
    }

    /// Viewing area size.
    #[must_use]
    pub fn view_size(&self) -> Size {
        self.view_size
    }

    /// Content bounding box in view-local coordinates.
    #[must_use]
    pub fn target(&self) -> Rect {
        self.target
    }

    /// Overhang per edge.
    #[must_use]
    pub fn overflow(&self) -> Overflow {
        self.overflow
    }

    /// Range the content's leading edge may occupy on each axis.
    ///
    /// Larger content must cover the view (`[view - target, 0]`); smaller
    /// content must stay inside it (`[0, view - target]`).
    #[must_use]
    pub fn edge_range(&self) -> (Vec2, Vec2) {
        let slack = Vec2::new(
            self.view_size.width - self.target.width(),
            self.view_size.height - self.target.height(),
        );
        (
            Vec2::new(slack.x.min(0.0), slack.y.min(0.0)),
            Vec2::new(slack.x.max(0.0), slack.y.max(0.0)),
        )
    }

    /// Limits `delta` so the content edge stays within [`Self::edge_range`].
    ///
    /// An edge that is already out of range may move back toward the range
    /// but never further away from it.
    #[must_use]
    pub fn clamp_delta(&self, delta: Vec2) -> Vec2 {
        let (lo, hi) = self.edge_range();
        let edge = self.target.origin().to_vec2();
        Vec2::new(
            clamp_axis(edge.x, delta.x, lo.x, hi.x),
            clamp_axis(edge.y, delta.y, lo.y, hi.y),
        )
    }
}

fn clamp_axis(edge: f64, delta: f64, lo: f64, hi: f64) -> f64 {
    let lo = lo.min(edge);
    let hi = hi.max(edge);
    (edge + delta).clamp(lo, hi) - edge
}

#[cfg(test)]
mod tests {
    use super::*;

    fn layout(view: (f64, f64), content: (f64, f64)) -> ViewLayout {
        ViewLayout::new(Size::new(view.0, view.1), Size::new(content.0, content.1))
    }

    #[test]
    fn centered_content_smaller_than_view_has_no_overflow() {
        let area = DragArea::new(&layout((800.0, 600.0), (400.0, 300.0)), &Transform::IDENTITY);
        assert_eq!(area.target(), Rect::new(200.0, 150.0, 600.0, 450.0));
        assert_eq!(area.overflow(), Overflow::default());
    }

    #[test]
    fn scaled_and_moved_content_reports_each_edge() {
        let t = Transform {
            position: Point::new(100.0, 0.0),
            scale: 2.0,
            ..Transform::IDENTITY
        };
        let area = DragArea::new(&layout((800.0, 600.0), (500.0, 400.0)), &t);
        // 1000x800 centered at (500, 300).
        assert_eq!(area.target(), Rect::new(0.0, -100.0, 1000.0, 700.0));
        let o = area.overflow();
        assert_eq!((o.left, o.top, o.right, o.bottom), (0.0, -100.0, 200.0, 100.0));
        assert!(o.overflows_x(0.5));
        assert!(o.overflows_y(0.5));
    }

    #[test]
    fn rotation_uses_bounding_box() {
        let t = Transform {
            angle: 90.0,
            ..Transform::IDENTITY
        };
        let area = DragArea::new(&layout((800.0, 600.0), (400.0, 200.0)), &t);
        let size = area.target().size();
        assert!((size.width - 200.0).abs() < 1e-9);
        assert!((size.height - 400.0).abs() < 1e-9);
    }

    #[test]
    fn clamp_keeps_large_content_covering_the_view() {
        let area = DragArea::new(&layout((800.0, 600.0), (1600.0, 600.0)), &Transform::IDENTITY);
        // Left edge at -400; allowed range [-800, 0].
        assert_eq!(area.clamp_delta(Vec2::new(1000.0, 0.0)).x, 400.0);
        assert_eq!(area.clamp_delta(Vec2::new(-1000.0, 0.0)).x, -400.0);
        // Vertically it exactly fits, so it cannot move.
        assert_eq!(area.clamp_delta(Vec2::new(0.0, 50.0)).y, 0.0);
    }

    #[test]
    fn clamp_never_pushes_an_out_of_range_edge_further() {
        let t = Transform {
            position: Point::new(300.0, 0.0),
            ..Transform::IDENTITY
        };
        // Small content pushed partly out on the right: edge at 500, range [0, 400].
        let area = DragArea::new(&layout((800.0, 600.0), (400.0, 300.0)), &t);
        assert_eq!(area.clamp_delta(Vec2::new(50.0, 0.0)).x, 0.0);
        assert_eq!(area.clamp_delta(Vec2::new(-50.0, 0.0)).x, -50.0);
        assert_eq!(area.clamp_delta(Vec2::new(-600.0, 0.0)).x, -500.0);
    }
}
