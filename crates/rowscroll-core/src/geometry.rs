//! Geometric primitives: Point, Size, Rect, `CornerRadius`.
//!
//! Coordinates are CSS pixels with the origin at the top-left of the viewport.

use serde::{Deserialize, Serialize};
use std::ops::{Add, Sub};

/// A position in viewport space.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Point {
    /// X coordinate
    pub x: f32,
    /// Y coordinate
    pub y: f32,
}

impl Point {
    /// Origin point (0, 0)
    pub const ORIGIN: Self = Self { x: 0.0, y: 0.0 };

    /// Create a new point.
    #[must_use]
    pub const fn new(x: f32, y: f32) -> Self {
        Self { x, y }
    }

    /// Offset by `dx`, `dy`.
    #[must_use]
    pub fn offset(&self, dx: f32, dy: f32) -> Self {
        Self::new(self.x + dx, self.y + dy)
    }
}

impl Add for Point {
    type Output = Self;

    fn add(self, rhs: Self) -> Self::Output {
        Self::new(self.x + rhs.x, self.y + rhs.y)
    }
}

impl Sub for Point {
    type Output = Self;

    fn sub(self, rhs: Self) -> Self::Output {
        Self::new(self.x - rhs.x, self.y - rhs.y)
    }
}

/// A width/height pair.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Size {
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Size {
    /// Zero size
    pub const ZERO: Self = Self {
        width: 0.0,
        height: 0.0,
    };

    /// Create a new size.
    #[must_use]
    pub const fn new(width: f32, height: f32) -> Self {
        Self { width, height }
    }

    /// Whether either dimension is zero or negative.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// An axis-aligned rectangle.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct Rect {
    /// X position of top-left corner
    pub x: f32,
    /// Y position of top-left corner
    pub y: f32,
    /// Width
    pub width: f32,
    /// Height
    pub height: f32,
}

impl Rect {
    /// Create a new rectangle.
    #[must_use]
    pub const fn new(x: f32, y: f32, width: f32, height: f32) -> Self {
        Self {
            x,
            y,
            width,
            height,
        }
    }

    /// Rectangle at the origin with the given size.
    #[must_use]
    pub const fn from_size(size: Size) -> Self {
        Self::new(0.0, 0.0, size.width, size.height)
    }

    /// Top-left corner.
    #[must_use]
    pub const fn origin(&self) -> Point {
        Point::new(self.x, self.y)
    }

    /// Size of the rectangle.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Right edge.
    #[must_use]
    pub fn right(&self) -> f32 {
        self.x + self.width
    }

    /// Bottom edge.
    #[must_use]
    pub fn bottom(&self) -> f32 {
        self.y + self.height
    }

    /// Center point.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.x + self.width / 2.0, self.y + self.height / 2.0)
    }

    /// Hit test. The top and left edges are inside, the bottom and right
    /// edges are not, so stacked rows never both claim a point.
    #[must_use]
    pub fn contains_point(&self, point: &Point) -> bool {
        point.x >= self.x && point.x < self.right() && point.y >= self.y && point.y < self.bottom()
    }

    /// Shrink by `horizontal` on the left/right and `vertical` on top/bottom.
    #[must_use]
    pub fn inset(&self, horizontal: f32, vertical: f32) -> Self {
        Self::new(
            self.x + horizontal,
            self.y + vertical,
            horizontal.mul_add(-2.0, self.width).max(0.0),
            vertical.mul_add(-2.0, self.height).max(0.0),
        )
    }

    /// Same size, different height.
    #[must_use]
    pub const fn with_height(&self, height: f32) -> Self {
        Self::new(self.x, self.y, self.width, height)
    }

    /// Scale around the center.
    #[must_use]
    pub fn scale_about_center(&self, factor: f32) -> Self {
        let c = self.center();
        let w = self.width * factor;
        let h = self.height * factor;
        Self::new(c.x - w / 2.0, c.y - h / 2.0, w, h)
    }
}

/// Corner radii for rounded rectangles.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct CornerRadius {
    /// Top-left radius
    pub top_left: f32,
    /// Top-right radius
    pub top_right: f32,
    /// Bottom-right radius
    pub bottom_right: f32,
    /// Bottom-left radius
    pub bottom_left: f32,
}

impl CornerRadius {
    /// Square corners.
    pub const ZERO: Self = Self::uniform(0.0);

    /// Same radius on every corner.
    #[must_use]
    pub const fn uniform(radius: f32) -> Self {
        Self {
            top_left: radius,
            top_right: radius,
            bottom_right: radius,
            bottom_left: radius,
        }
    }

    /// Check if all corners are square.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.top_left == 0.0
            && self.top_right == 0.0
            && self.bottom_right == 0.0
            && self.bottom_left == 0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    #[test]
    fn test_point_arithmetic() {
        let p = Point::new(5.0, 7.0) - Point::new(2.0, 3.0);
        assert_eq!(p, Point::new(3.0, 4.0));
        assert_eq!(p + Point::new(1.0, 1.0), Point::new(4.0, 5.0));
        assert_eq!(p.offset(-3.0, -4.0), Point::ORIGIN);
    }

    #[test]
    fn test_rect_edges() {
        let r = Rect::new(10.0, 20.0, 100.0, 50.0);
        assert_eq!(r.right(), 110.0);
        assert_eq!(r.bottom(), 70.0);
        assert_eq!(r.center(), Point::new(60.0, 45.0));
    }

    #[test]
    fn test_rect_contains_point_half_open() {
        let r = Rect::new(0.0, 0.0, 100.0, 56.0);
        assert!(r.contains_point(&Point::new(0.0, 0.0)));
        assert!(r.contains_point(&Point::new(99.9, 55.9)));
        assert!(!r.contains_point(&Point::new(50.0, 56.0)));
        assert!(!r.contains_point(&Point::new(100.0, 10.0)));
    }

    #[test]
    fn test_stacked_rects_do_not_overlap() {
        let top = Rect::new(0.0, 0.0, 100.0, 56.0);
        let below = Rect::new(0.0, 56.0, 100.0, 56.0);
        let p = Point::new(10.0, 56.0);
        assert!(!top.contains_point(&p));
        assert!(below.contains_point(&p));
    }

    #[test]
    fn test_rect_inset_never_negative() {
        let r = Rect::new(0.0, 0.0, 10.0, 10.0).inset(8.0, 8.0);
        assert_eq!(r.width, 0.0);
        assert_eq!(r.height, 0.0);
    }

    #[test]
    fn test_scale_about_center() {
        let r = Rect::new(0.0, 0.0, 100.0, 100.0).scale_about_center(0.5);
        assert_eq!(r, Rect::new(25.0, 25.0, 50.0, 50.0));
    }

    #[test]
    fn test_corner_radius() {
        assert!(CornerRadius::ZERO.is_zero());
        assert!(!CornerRadius::uniform(6.0).is_zero());
        assert_eq!(CornerRadius::default(), CornerRadius::ZERO);
    }

    proptest! {
        #[test]
        fn prop_rect_contains_center(x in -1000.0f32..1000.0, y in -1000.0f32..1000.0, w in 1.0f32..1000.0, h in 1.0f32..1000.0) {
            let r = Rect::new(x, y, w, h);
            prop_assert!(r.contains_point(&r.center()));
        }

        #[test]
        fn prop_scale_preserves_center(w in 1.0f32..500.0, h in 1.0f32..500.0, f in 0.1f32..2.0) {
            let r = Rect::new(10.0, 10.0, w, h);
            let s = r.scale_about_center(f);
            prop_assert!((s.center().x - r.center().x).abs() < 0.01);
            prop_assert!((s.center().y - r.center().y).abs() < 0.01);
        }
    }
}
