/*! Geometry types for desktop coordinates. */

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Rectangle in desktop coordinates. `x`/`y` are the drag translation of the window.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Bounds {
  pub x: f64,
  pub y: f64,
  pub w: f64,
  pub h: f64,
}

impl Bounds {
  pub const fn new(x: f64, y: f64, w: f64, h: f64) -> Self {
    Self { x, y, w, h }
  }

  /// Bounds of a given size at origin (0,0).
  pub const fn sized(w: f64, h: f64) -> Self {
    Self::new(0.0, 0.0, w, h)
  }

  /// Check if a point is contained within these bounds.
  pub fn contains(&self, point: Point) -> bool {
    point.x >= self.x
      && point.x <= self.x + self.w
      && point.y >= self.y
      && point.y <= self.y + self.h
  }

  /// Move by a delta.
  #[must_use]
  pub fn translated(self, dx: f64, dy: f64) -> Self {
    Self {
      x: self.x + dx,
      y: self.y + dy,
      ..self
    }
  }

  /// Resize, never going below the given minimum size. Position is kept.
  #[must_use]
  pub fn resized(self, w: f64, h: f64, min_w: f64, min_h: f64) -> Self {
    Self {
      w: w.max(min_w),
      h: h.max(min_h),
      ..self
    }
  }

  /// Move these bounds so they lie inside `area`.
  ///
  /// When larger than `area`, the top-left corner is pinned to the area's origin.
  #[must_use]
  pub fn clamped_within(self, area: Bounds) -> Self {
    let max_x = (area.x + area.w - self.w).max(area.x);
    let max_y = (area.y + area.h - self.h).max(area.y);
    Self {
      x: self.x.clamp(area.x, max_x),
      y: self.y.clamp(area.y, max_y),
      ..self
    }
  }
}

/// A 2D point in desktop coordinates.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, TS)]
#[ts(export)]
pub struct Point {
  pub x: f64,
  pub y: f64,
}

impl Point {
  pub const fn new(x: f64, y: f64) -> Self {
    Self { x, y }
  }

  /// Check if this point moved more than threshold from another.
  pub fn moved_from(&self, other: Point, threshold: f64) -> bool {
    (self.x - other.x).abs() >= threshold || (self.y - other.y).abs() >= threshold
  }

  #[must_use]
  pub fn offset(self, dx: f64, dy: f64) -> Self {
    Self::new(self.x + dx, self.y + dy)
  }
}


#[cfg(test)]
mod proptests {
  use super::*;
  use proptest::prelude::*;

  /// Strategy for generating reasonable desktop coordinates
  fn coord() -> impl Strategy<Value = f64> {
    -10000.0..10000.0f64
  }

  /// Strategy for generating window dimensions
  fn dimension() -> impl Strategy<Value = f64> {
    1.0..2000.0f64
  }

  proptest! {
    /// A window that fits the area always ends up fully inside it
    #[test]
    fn clamped_fits_inside(x in coord(), y in coord(), w in dimension(), h in dimension()) {
      let area = Bounds::sized(4000.0, 3000.0);
      let b = Bounds { x, y, w, h }.clamped_within(area);
      prop_assert!(area.contains(Point::new(b.x, b.y)), "top-left inside");
      prop_assert!(b.x + b.w <= area.w + 1e-6, "right edge inside");
      prop_assert!(b.y + b.h <= area.h + 1e-6, "bottom edge inside");
    }

    /// Clamping never changes the size
    #[test]
    fn clamped_keeps_size(x in coord(), y in coord(), w in dimension(), h in dimension()) {
      let b = Bounds { x, y, w, h }.clamped_within(Bounds::sized(500.0, 500.0));
      prop_assert_eq!((b.w, b.h), (w, h));
    }

    /// Point::moved_from is symmetric
    #[test]
    fn moved_from_symmetric(x1 in coord(), y1 in coord(), x2 in coord(), y2 in coord(), threshold in 0.1..100.0f64) {
      let a = Point::new(x1, y1);
      let b = Point::new(x2, y2);
      prop_assert_eq!(a.moved_from(b, threshold), b.moved_from(a, threshold), "moved_from should be symmetric");
    }
  }
}
