//! Viewport geometry primitives.

use serde::{Deserialize, Serialize};

/// A point in CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// Horizontal coordinate
    pub x: f64,
    /// Vertical coordinate
    pub y: f64,
}

impl Point {
    /// Creates a new point.
    #[must_use]
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Moves this point a fraction of the way toward `target`.
    ///
    /// With `factor = 0.1` the point covers a tenth of the remaining
    /// distance on every call, which is the cursor light's easing curve.
    #[must_use]
    pub fn lerp_toward(self, target: Self, factor: f64) -> Self {
        Self {
            x: self.x + (target.x - self.x) * factor,
            y: self.y + (target.y - self.y) * factor,
        }
    }
}

/// An axis-aligned box: `top`/`left` corner plus size, in CSS pixels.
///
/// Whether the origin is the viewport or the document depends on who produced
/// it; [`crate::services::geometry::ViewportGeometry`] always hands out
/// viewport-relative boxes.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// Distance from the origin to the top edge
    pub top: f64,
    /// Distance from the origin to the left edge
    #[serde(default)]
    pub left: f64,
    /// Box width
    #[serde(default)]
    pub width: f64,
    /// Box height
    #[serde(default)]
    pub height: f64,
}

impl Rect {
    /// Creates a new rectangle.
    #[must_use]
    pub const fn new(top: f64, left: f64, width: f64, height: f64) -> Self {
        Self {
            top,
            left,
            width,
            height,
        }
    }

    /// Bottom edge (`top + height`).
    #[must_use]
    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Center of the box in the same coordinate space.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    /// The same box moved up by `dy` (document → viewport when `dy` is the scroll offset).
    #[must_use]
    pub fn shifted_up(&self, dy: f64) -> Self {
        Self {
            top: self.top - dy,
            ..*self
        }
    }

    /// Returns true when any part of the box lies inside `[0, viewport_height)` vertically.
    #[must_use]
    pub fn intersects_viewport(&self, viewport_height: f64) -> bool {
        self.top < viewport_height && self.bottom() > 0.0
    }
}

/// Document-relative offset of an element.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
pub struct PageOffset {
    /// Distance from the top of the document
    pub top: f64,
}
