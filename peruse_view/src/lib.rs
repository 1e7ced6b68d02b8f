// Copyright 2025 the Peruse Authors
// SPDX-License-Identifier: Apache-2.0 OR MIT

//! Peruse View: the state an image viewer's pointer interactions act on.
//!
//! - [`TransformState`]: position, angle, scale and mirror flags of the
//!   displayed content, behind validating setters with change tracking.
//! - [`DragArea`]: the transformed content bounds relative to the view and
//!   how far they overhang each edge, used to clamp moves and to scroll.
//! - [`LoupeState`]: the magnifier shown on long press.
//! - [`PositionAnimator`]: direct, eased, and follow transitions for the
//!   content position, driven by a [`peruse_timing::Scheduler`].
//!
//! Coordinates are in view pixels with y pointing down. A transform's
//! position is the offset of the content center from the view center.
//!
//! ## Minimal example
//!
//! ```rust
//! use kurbo::{Point, Size};
//! use peruse_view::{DragArea, TransformChanges, TransformState, ViewLayout};
//!
//! let layout = ViewLayout::new(Size::new(800.0, 600.0), Size::new(1200.0, 600.0));
//! let mut transform = TransformState::new();
//!
//! let area = DragArea::new(&layout, &transform.get());
//! assert_eq!(area.overflow().right, 200.0);
//!
//! transform.set_position(Point::new(-200.0, 0.0));
//! assert_eq!(transform.take_changes(), TransformChanges::POSITION);
//! let area = DragArea::new(&layout, &transform.get());
//! assert_eq!(area.overflow().right, 0.0);
//! ```

mod animator;
mod area;
mod loupe;
mod transform;

pub use animator::{PositionAnimator, PositionTransition};
pub use area::{DragArea, Overflow, ViewLayout};
pub use loupe::{LoupeParams, LoupeState};
pub use transform::{MIN_SCALE, Transform, TransformChanges, TransformState, normalize_angle};
