// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Drag engine: turns pointer travel into content transforms.
//!
//! ## Usage
//!
//! 1) On drag start call [`DragEngine::begin`] with the press position and
//!    the chord held; the engine snapshots the transform and resolves the
//!    chord to a drag action.
//! 2) On every pointer sample call [`DragEngine::drag_to`] and apply the
//!    returned [`DragEffect`].
//! 3) When buttons or modifiers change mid-drag call
//!    [`DragEngine::update_chord`]; the engine switches action without
//!    moving the content.
//! 4) Call [`DragEngine::end`] when the drag is over.
//!
//! ## Minimal example
//!
//! ```
//! use kurbo::{Point, Size};
//! use peruse_input::{ActionBindingTable, InputChord, MouseButtons};
//! use peruse_interaction::config::DragConfig;
//! use peruse_interaction::drag::{DragContext, DragEffect, DragEngine};
//! use peruse_interaction::WindowState;
//! use peruse_view::{Transform, ViewLayout};
//!
//! let bindings = ActionBindingTable::new();
//! let config = DragConfig::default();
//! let cx = DragContext {
//!     transform: Transform::IDENTITY,
//!     layout: ViewLayout::new(Size::new(800.0, 600.0), Size::new(400.0, 300.0)),
//!     config: &config,
//!     bindings: &bindings,
//!     window_state: WindowState::Normal,
//!     window_position: Point::ZERO,
//! };
//!
//! let mut engine = DragEngine::new();
//! let left = InputChord::buttons_only(MouseButtons::PRIMARY);
//! engine.begin(&cx, Point::ZERO, Point::ZERO, left);
//! let Some(DragEffect::Transform(t)) = engine.drag_to(&cx, Point::new(50.0, 0.0), Point::ZERO)
//! else {
//!     panic!("pan should move the content");
//! };
//! assert_eq!(t.position, Point::new(50.0, 0.0));
//! ```

mod nscroll;

pub use nscroll::{NScrollDirection, ReadingDirection, n_scroll};

use kurbo::{Affine, Point, Vec2};
use peruse_input::{ActionBindingTable, DragAction, DragActionId, InputChord};
use peruse_view::{DragArea, MIN_SCALE, Transform, ViewLayout, normalize_angle};

use crate::config::{DragConfig, PivotMode};
use crate::host::WindowState;

/// Overflow below this many pixels does not unlock an axis.
const OVERFLOW_TOLERANCE: f64 = 0.5;
/// Pivot vectors shorter than this carry no usable direction.
const MIN_BASIS_LENGTH: f64 = 1.0;

/// Everything the engine reads from its surroundings for one call.
#[derive(Clone, Copy, Debug)]
pub struct DragContext<'a> {
    /// The transform as it will be once pending moves land.
    pub transform: Transform,
    /// View and content sizes.
    pub layout: ViewLayout,
    /// Drag settings.
    pub config: &'a DragConfig,
    /// Chord bindings.
    pub bindings: &'a ActionBindingTable,
    /// Host window state.
    pub window_state: WindowState,
    /// Host window position in screen coordinates.
    pub window_position: Point,
}

/// What a drag sample asks the caller to do.
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum DragEffect {
    /// Replace the content transform.
    Transform(Transform),
    /// Move the host window to this screen position.
    MoveWindow(Point),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
struct AxisLocks {
    x: bool,
    y: bool,
}

impl AxisLocks {
    fn for_area(area: &DragArea) -> Self {
        let over = area.overflow();
        Self {
            x: !over.overflows_x(OVERFLOW_TOLERANCE),
            y: !over.overflows_y(OVERFLOW_TOLERANCE),
        }
    }
}

#[derive(Clone, Debug)]
struct Session {
    chord: InputChord,
    action: Option<DragActionId>,
    /// Press position in view-local coordinates.
    origin: Point,
    screen_origin: Point,
    base: Transform,
    window_base: Point,
    /// Rotation, scale, or mirror center relative to the view center.
    pivot: Point,
    locks: AxisLocks,
    pan_speed: Vec2,
}

impl Session {
    fn snapshot(&mut self, cx: &DragContext<'_>, point: Point, screen: Point) {
        self.origin = point;
        self.screen_origin = screen;
        self.base = cx.transform;
        self.window_base = cx.window_position;
    }

    /// Per-action setup that does not survive a change of action group.
    fn restart_group(&mut self, cx: &DragContext<'_>) {
        let area = DragArea::new(&cx.layout, &cx.transform);
        self.locks = AxisLocks::for_area(&area);
        let view = area.view_size();
        let target = area.target().size();
        let ratio = |t: f64, v: f64| if v > 0.0 { (t / v).max(1.0) } else { 1.0 };
        self.pan_speed = Vec2::new(ratio(target.width, view.width), ratio(target.height, view.height));
    }

    fn resolve_pivot(&mut self, cx: &DragContext<'_>) {
        let mode = match self.action {
            Some(DragActionId::Rotate | DragActionId::RotateSlider) => cx.config.rotate_center,
            Some(DragActionId::Scale | DragActionId::ScaleSlider) => cx.config.scale_center,
            Some(DragActionId::FlipHorizontal | DragActionId::FlipVertical) => {
                cx.config.flip_center
            }
            _ => PivotMode::View,
        };
        self.pivot = match mode {
            PivotMode::View => Point::ZERO,
            PivotMode::Target => self.base.position,
            PivotMode::Cursor => cx.layout.to_center_offset(self.origin).to_point(),
        };
    }
}

/// Drag transform engine.
///
/// Idle until [`DragEngine::begin`]; active (possibly with no executable
/// action) until [`DragEngine::end`].
#[derive(Clone, Debug, Default)]
pub struct DragEngine {
    session: Option<Session>,
}

impl DragEngine {
    /// Creates an idle engine.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` between [`Self::begin`] and [`Self::end`].
    #[must_use]
    pub fn is_active(&self) -> bool {
        self.session.is_some()
    }

    /// The action driving the drag, if any.
    #[must_use]
    pub fn action(&self) -> Option<DragActionId> {
        self.session.as_ref().and_then(|s| s.action)
    }

    /// Starts a drag at `origin` (view-local) and `screen` (screen space).
    pub fn begin(&mut self, cx: &DragContext<'_>, origin: Point, screen: Point, chord: InputChord) {
        let mut session = Session {
            chord,
            action: resolve(cx.bindings, chord),
            origin,
            screen_origin: screen,
            base: cx.transform,
            window_base: cx.window_position,
            pivot: Point::ZERO,
            locks: AxisLocks { x: false, y: false },
            pan_speed: Vec2::new(1.0, 1.0),
        };
        session.restart_group(cx);
        session.resolve_pivot(cx);
        tracing::debug!(action = ?session.action, %chord, "drag started");
        self.session = Some(session);
    }

    /// Re-resolves the action after the held chord changed.
    ///
    /// Switching action re-snapshots the origin and base transform at
    /// `point`, so the content does not jump. A switch inside one action
    /// group keeps the session's axis locks and pan speed.
    pub fn update_chord(
        &mut self,
        cx: &DragContext<'_>,
        chord: InputChord,
        point: Point,
        screen: Point,
    ) {
        let Some(session) = self.session.as_mut() else {
            return;
        };
        if session.chord == chord {
            return;
        }
        session.chord = chord;
        let next = resolve(cx.bindings, chord);
        if next == session.action {
            return;
        }

        let same_group = match (session.action, next) {
            (Some(a), Some(b)) => cx.bindings.get(a).is_group_compatible(cx.bindings.get(b)),
            _ => false,
        };
        tracing::debug!(from = ?session.action, to = ?next, same_group, "drag action switched");

        session.action = next;
        session.snapshot(cx, point, screen);
        if !same_group {
            session.restart_group(cx);
        }
        session.resolve_pivot(cx);
    }

    /// Applies the active action to a new pointer sample.
    pub fn drag_to(
        &mut self,
        cx: &DragContext<'_>,
        point: Point,
        screen: Point,
    ) -> Option<DragEffect> {
        let session = self.session.as_mut()?;
        let action = session.action?;
        let start = cx.layout.to_center_offset(session.origin);
        let current = cx.layout.to_center_offset(point);
        let travel = point - session.origin;

        match action {
            DragActionId::Pan => Some(pan(session, cx, travel)),
            DragActionId::ScaledPan => {
                let speed = session.pan_speed;
                Some(pan(session, cx, Vec2::new(travel.x * speed.x, travel.y * speed.y)))
            }
            DragActionId::Rotate => {
                let pivot = session.pivot.to_vec2();
                let (v0, v1) = (start - pivot, current - pivot);
                if v0.hypot() < MIN_BASIS_LENGTH {
                    session.snapshot(cx, point, screen);
                    return None;
                }
                if v1.hypot() < MIN_BASIS_LENGTH {
                    return None;
                }
                let delta = v0.cross(v1).atan2(v0.dot(v1)).to_degrees();
                Some(rotate(session, cx, delta))
            }
            DragActionId::RotateSlider => {
                Some(rotate(session, cx, travel.x * cx.config.rotate_slider_rate))
            }
            DragActionId::Scale => {
                let pivot = session.pivot.to_vec2();
                let (v0, v1) = (start - pivot, current - pivot);
                if v0.hypot() < MIN_BASIS_LENGTH {
                    session.snapshot(cx, point, screen);
                    return None;
                }
                if v1.hypot() < MIN_BASIS_LENGTH {
                    return None;
                }
                Some(scale(session, cx, v1.hypot() / v0.hypot()))
            }
            DragActionId::ScaleSlider => {
                Some(scale(session, cx, (travel.x * cx.config.scale_slider_rate).exp2()))
            }
            DragActionId::FlipHorizontal => flip(session, cx, travel.x, Axis::Horizontal),
            DragActionId::FlipVertical => flip(session, cx, travel.y, Axis::Vertical),
            DragActionId::WindowMove => (cx.window_state == WindowState::Normal)
                .then(|| DragEffect::MoveWindow(session.window_base + (screen - session.screen_origin))),
            DragActionId::Gesture => None,
        }
    }

    /// Ends the drag.
    ///
    /// No action keeps state past the last sample, so ending only drops the
    /// session; the transform already holds the final result.
    pub fn end(&mut self) {
        if let Some(session) = self.session.take() {
            tracing::debug!(action = ?session.action, "drag ended");
        }
    }
}

fn resolve(bindings: &ActionBindingTable, chord: InputChord) -> Option<DragActionId> {
    bindings
        .resolve(chord)
        .map(DragAction::id)
        .filter(|id| *id != DragActionId::Gesture)
}

fn snap(value: f64, step: f64) -> f64 {
    if step > 0.0 {
        (value / step).round() * step
    } else {
        value
    }
}

fn pan(session: &mut Session, cx: &DragContext<'_>, travel: Vec2) -> DragEffect {
    let mut next = cx.transform;
    let wanted = session.base.position + travel;
    next.position = if cx.config.limit_move {
        limit_move(session, cx, wanted)
    } else {
        wanted
    };
    DragEffect::Transform(next)
}

/// Restricts a move of the content center to `wanted`.
///
/// The area is measured before the move. An axis that started without
/// overflow stays locked until the content first overflows on it.
fn limit_move(session: &mut Session, cx: &DragContext<'_>, wanted: Point) -> Point {
    let area = DragArea::new(&cx.layout, &cx.transform);
    let over = area.overflow();
    if session.locks.x && over.overflows_x(OVERFLOW_TOLERANCE) {
        session.locks.x = false;
    }
    if session.locks.y && over.overflows_y(OVERFLOW_TOLERANCE) {
        session.locks.y = false;
    }

    let current = cx.transform.position;
    let mut delta = wanted - current;
    if session.locks.x {
        delta.x = 0.0;
    }
    if session.locks.y {
        delta.y = 0.0;
    }
    current + area.clamp_delta(delta)
}

fn rotate(session: &Session, cx: &DragContext<'_>, delta: f64) -> DragEffect {
    let base = session.base;
    let angle = snap(base.angle + delta, cx.config.angle_snap);
    let applied = angle - base.angle;
    let mut next = cx.transform;
    next.angle = normalize_angle(angle);
    next.position = Affine::rotate_about(applied.to_radians(), session.pivot) * base.position;
    DragEffect::Transform(next)
}

fn scale(session: &Session, cx: &DragContext<'_>, ratio: f64) -> DragEffect {
    let base = session.base;
    let step = cx.config.scale_snap;
    // The snap grid never rounds the content away entirely.
    let floor = if step > 0.0 { step.max(MIN_SCALE) } else { MIN_SCALE };
    let scale = snap(base.scale * ratio, step).max(floor);
    let k = scale / base.scale;
    let mut next = cx.transform;
    next.scale = scale;
    next.position = Affine::scale_about(k, session.pivot) * base.position;
    DragEffect::Transform(next)
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Axis {
    Horizontal,
    Vertical,
}

fn flip(session: &Session, cx: &DragContext<'_>, travel: f64, axis: Axis) -> Option<DragEffect> {
    let threshold = cx.config.flip_threshold.abs();
    let (base_flag, flag) = match axis {
        Axis::Horizontal => (session.base.flip_horizontal, cx.transform.flip_horizontal),
        Axis::Vertical => (session.base.flip_vertical, cx.transform.flip_vertical),
    };
    let wanted = if travel < -threshold {
        !base_flag
    } else if travel > threshold {
        base_flag
    } else {
        flag
    };
    if wanted == flag {
        return None;
    }

    let mut next = cx.transform;
    next.angle = normalize_angle(-next.angle);
    match axis {
        Axis::Horizontal => {
            next.flip_horizontal = wanted;
            next.position.x = 2.0 * session.pivot.x - next.position.x;
        }
        Axis::Vertical => {
            next.flip_vertical = wanted;
            next.position.y = 2.0 * session.pivot.y - next.position.y;
        }
    }
    Some(DragEffect::Transform(next))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kurbo::Size;
    use peruse_input::{Modifiers, MouseButtons};

    struct Fixture {
        bindings: ActionBindingTable,
        config: DragConfig,
        transform: Transform,
        layout: ViewLayout,
        window_state: WindowState,
    }

    impl Fixture {
        fn new() -> Self {
            Self {
                bindings: ActionBindingTable::new(),
                config: DragConfig::default(),
                transform: Transform::IDENTITY,
                layout: ViewLayout::new(Size::new(800.0, 600.0), Size::new(400.0, 300.0)),
                window_state: WindowState::Normal,
            }
        }

        fn cx(&self) -> DragContext<'_> {
            DragContext {
                transform: self.transform,
                layout: self.layout,
                config: &self.config,
                bindings: &self.bindings,
                window_state: self.window_state,
                window_position: Point::new(100.0, 100.0),
            }
        }

        fn apply(&mut self, effect: Option<DragEffect>) {
            if let Some(DragEffect::Transform(t)) = effect {
                self.transform = t;
            }
        }
    }

    fn chord(modifiers: Modifiers) -> InputChord {
        InputChord::new(MouseButtons::PRIMARY, modifiers)
    }

    #[test]
    fn plain_pan_follows_pointer() {
        let mut f = Fixture::new();
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::ZERO, Point::ZERO, chord(Modifiers::empty()));
        let effect = e.drag_to(&f.cx(), Point::new(50.0, 0.0), Point::ZERO);
        assert_eq!(
            effect,
            Some(DragEffect::Transform(Transform {
                position: Point::new(50.0, 0.0),
                ..Transform::IDENTITY
            }))
        );
    }

    #[test]
    fn limited_pan_keeps_small_content_still() {
        let mut f = Fixture::new();
        f.config.limit_move = true;
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::ZERO, Point::ZERO, chord(Modifiers::empty()));
        let effect = e.drag_to(&f.cx(), Point::new(50.0, 30.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.position, Point::ZERO);
    }

    #[test]
    fn limited_pan_unlocks_once_content_overflows() {
        let mut f = Fixture::new();
        f.config.limit_move = true;
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::ZERO, Point::ZERO, chord(Modifiers::empty()));
        // Zoomed in by something else mid-drag: now 1200x900.
        f.transform.scale = 3.0;
        let effect = e.drag_to(&f.cx(), Point::new(150.0, 500.0), Point::ZERO);
        f.apply(effect);
        // Horizontal room is 200 each side, vertical 150.
        assert_eq!(f.transform.position, Point::new(150.0, 150.0));
    }

    #[test]
    fn scaled_pan_speed_tracks_content_ratio() {
        let mut f = Fixture::new();
        f.layout.content_size = Size::new(3200.0, 300.0);
        f.bindings
            .rebind(DragActionId::ScaledPan, chord(Modifiers::empty()).into())
            .unwrap();
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::ZERO, Point::ZERO, chord(Modifiers::empty()));
        let effect = e.drag_to(&f.cx(), Point::new(10.0, 10.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.position, Point::new(40.0, 10.0));
    }

    #[test]
    fn rotate_by_swept_angle_with_snap() {
        let mut f = Fixture::new();
        f.config.angle_snap = 45.0;
        let mut e = DragEngine::new();
        // View center is (400, 300).
        e.begin(&f.cx(), Point::new(500.0, 300.0), Point::ZERO, chord(Modifiers::SHIFT));
        let effect = e.drag_to(&f.cx(), Point::new(400.0, 390.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.angle, 90.0);
    }

    #[test]
    fn rotation_near_pivot_rebases_instead_of_spinning() {
        let mut f = Fixture::new();
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::new(400.2, 300.0), Point::ZERO, chord(Modifiers::SHIFT));
        assert_eq!(e.drag_to(&f.cx(), Point::new(500.0, 300.0), Point::ZERO), None);
        let effect = e.drag_to(&f.cx(), Point::new(400.0, 400.0), Point::ZERO);
        f.apply(effect);
        assert!((f.transform.angle - 90.0).abs() < 1e-9);
    }

    #[test]
    fn scale_by_distance_ratio() {
        let mut f = Fixture::new();
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::new(500.0, 300.0), Point::ZERO, chord(Modifiers::CONTROL));
        let effect = e.drag_to(&f.cx(), Point::new(550.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert!((f.transform.scale - 1.5).abs() < 1e-12);
    }

    #[test]
    fn scale_snaps_to_nearest_step() {
        let mut f = Fixture::new();
        f.config.scale_snap = 0.5;
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::new(500.0, 300.0), Point::ZERO, chord(Modifiers::CONTROL));
        for (x, expected) in [(530.0, 1.5), (520.0, 1.0), (580.0, 2.0)] {
            let effect = e.drag_to(&f.cx(), Point::new(x, 300.0), Point::ZERO);
            f.apply(effect);
            assert_eq!(f.transform.scale, expected, "at x = {x}");
        }
    }

    #[test]
    fn snapped_scale_stays_at_least_one_step() {
        let mut f = Fixture::new();
        f.config.scale_snap = 0.5;
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::new(500.0, 300.0), Point::ZERO, chord(Modifiers::CONTROL));
        let effect = e.drag_to(&f.cx(), Point::new(405.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.scale, 0.5);
        assert_eq!(f.transform.position, Point::ZERO);

        // Without snapping the ratio is applied as is.
        let mut f = Fixture::new();
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::new(500.0, 300.0), Point::ZERO, chord(Modifiers::CONTROL));
        let effect = e.drag_to(&f.cx(), Point::new(405.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert!((f.transform.scale - 0.05).abs() < 1e-12);
    }

    #[test]
    fn rotate_slider_turns_with_horizontal_travel() {
        let mut f = Fixture::new();
        f.bindings
            .rebind(DragActionId::RotateSlider, chord(Modifiers::empty()).into())
            .unwrap();
        f.transform.position = Point::new(100.0, 0.0);
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::new(400.0, 300.0), Point::ZERO, chord(Modifiers::empty()));
        assert_eq!(e.action(), Some(DragActionId::RotateSlider));

        // Vertical travel does nothing; 0.5 degrees per pixel across.
        let effect = e.drag_to(&f.cx(), Point::new(460.0, 250.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.angle, 30.0);

        f.config.angle_snap = 45.0;
        let effect = e.drag_to(&f.cx(), Point::new(570.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.angle, 90.0);
        // Turned about the view center.
        assert!((f.transform.position - Point::new(0.0, 100.0)).hypot() < 1e-9);
    }

    #[test]
    fn scale_slider_doubles_per_hundred_pixels() {
        let mut f = Fixture::new();
        f.config.scale_center = PivotMode::Cursor;
        f.bindings
            .rebind(DragActionId::ScaleSlider, chord(Modifiers::empty()).into())
            .unwrap();
        let mut e = DragEngine::new();
        // Pivot is 100 px right of the view center.
        e.begin(&f.cx(), Point::new(500.0, 300.0), Point::ZERO, chord(Modifiers::empty()));

        let effect = e.drag_to(&f.cx(), Point::new(600.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.scale, 2.0);
        assert_eq!(f.transform.position, Point::new(-100.0, 0.0));

        let effect = e.drag_to(&f.cx(), Point::new(400.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.scale, 0.5);
        assert_eq!(f.transform.position, Point::new(50.0, 0.0));
    }

    #[test]
    fn vertical_flip_mirrors_about_the_pivot() {
        let mut f = Fixture::new();
        f.config.flip_center = PivotMode::Cursor;
        f.bindings
            .rebind(DragActionId::FlipVertical, chord(Modifiers::empty()).into())
            .unwrap();
        f.transform.angle = 30.0;
        f.transform.position = Point::new(10.0, 20.0);
        let mut e = DragEngine::new();
        // Pivot is 50 px below the view center.
        e.begin(&f.cx(), Point::new(400.0, 350.0), Point::ZERO, chord(Modifiers::empty()));

        assert_eq!(e.drag_to(&f.cx(), Point::new(400.0, 340.0), Point::ZERO), None);
        let effect = e.drag_to(&f.cx(), Point::new(400.0, 330.0), Point::ZERO);
        f.apply(effect);
        assert!(f.transform.flip_vertical);
        assert!(!f.transform.flip_horizontal);
        assert_eq!(f.transform.angle, -30.0);
        assert_eq!(f.transform.position, Point::new(10.0, 80.0));

        assert_eq!(e.drag_to(&f.cx(), Point::new(400.0, 360.0), Point::ZERO), None);
        let effect = e.drag_to(&f.cx(), Point::new(400.0, 370.0), Point::ZERO);
        f.apply(effect);
        assert!(!f.transform.flip_vertical);
        assert_eq!(f.transform.angle, 30.0);
        assert_eq!(f.transform.position, Point::new(10.0, 20.0));
    }

    #[test]
    fn flip_toggles_past_threshold_and_returns() {
        let mut f = Fixture::new();
        f.transform.angle = 30.0;
        f.transform.position = Point::new(20.0, 0.0);
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::new(400.0, 300.0), Point::ZERO, chord(Modifiers::ALT));

        assert_eq!(e.drag_to(&f.cx(), Point::new(390.0, 300.0), Point::ZERO), None);
        let effect = e.drag_to(&f.cx(), Point::new(380.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert!(f.transform.flip_horizontal);
        assert_eq!(f.transform.angle, -30.0);
        assert_eq!(f.transform.position, Point::new(-20.0, 0.0));

        // Back inside the dead zone: nothing changes.
        assert_eq!(e.drag_to(&f.cx(), Point::new(410.0, 300.0), Point::ZERO), None);
        let effect = e.drag_to(&f.cx(), Point::new(420.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert!(!f.transform.flip_horizontal);
        assert_eq!(f.transform.angle, 30.0);
        assert_eq!(f.transform.position, Point::new(20.0, 0.0));
    }

    #[test]
    fn window_move_only_in_normal_state() {
        let mut f = Fixture::new();
        let mut e = DragEngine::new();
        let middle = InputChord::buttons_only(MouseButtons::MIDDLE);
        e.begin(&f.cx(), Point::ZERO, Point::new(1000.0, 1000.0), middle);
        assert_eq!(
            e.drag_to(&f.cx(), Point::ZERO, Point::new(1030.0, 990.0)),
            Some(DragEffect::MoveWindow(Point::new(130.0, 90.0)))
        );
        f.window_state = WindowState::Maximized;
        assert_eq!(e.drag_to(&f.cx(), Point::ZERO, Point::new(1060.0, 990.0)), None);
    }

    #[test]
    fn chord_switch_does_not_jump() {
        let mut f = Fixture::new();
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::new(400.0, 300.0), Point::ZERO, chord(Modifiers::empty()));
        let effect = e.drag_to(&f.cx(), Point::new(500.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.position, Point::new(100.0, 0.0));

        e.update_chord(&f.cx(), chord(Modifiers::CONTROL), Point::new(500.0, 300.0), Point::ZERO);
        assert_eq!(e.action(), Some(DragActionId::Scale));
        let effect = e.drag_to(&f.cx(), Point::new(500.0, 300.0), Point::ZERO);
        f.apply(effect);
        assert_eq!(f.transform.position, Point::new(100.0, 0.0));
        assert_eq!(f.transform.scale, 1.0);
    }

    #[test]
    fn unbound_chord_leaves_session_without_action() {
        let f = Fixture::new();
        let mut e = DragEngine::new();
        e.begin(&f.cx(), Point::ZERO, Point::ZERO, chord(Modifiers::empty()));
        e.update_chord(
            &f.cx(),
            InputChord::buttons_only(MouseButtons::EXTRA2),
            Point::ZERO,
            Point::ZERO,
        );
        assert!(e.is_active());
        assert_eq!(e.action(), None);
        assert_eq!(e.drag_to(&f.cx(), Point::new(40.0, 0.0), Point::ZERO), None);
        e.end();
        assert!(!e.is_active());
    }
}
