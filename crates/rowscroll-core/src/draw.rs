//! Draw commands.
//!
//! Widgets paint into a [`Canvas`](crate::Canvas); the recording canvas turns
//! that into a tree of these primitives which a backend replays.

use crate::{Color, CornerRadius, Point, Rect};
use serde::{Deserialize, Serialize};

/// Stroke style for path rendering.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StrokeStyle {
    /// Stroke color
    pub color: Color,
    /// Stroke width in pixels
    pub width: f32,
}

impl Default for StrokeStyle {
    fn default() -> Self {
        Self {
            color: Color::BLACK,
            width: 1.0,
        }
    }
}

impl StrokeStyle {
    /// Create a stroke style.
    #[must_use]
    pub const fn new(color: Color, width: f32) -> Self {
        Self { color, width }
    }
}

/// Box style for rectangles.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BoxStyle {
    /// Fill color (None = no fill)
    pub fill: Option<Color>,
    /// Stroke style (None = no stroke)
    pub stroke: Option<StrokeStyle>,
    /// Shadow (None = no shadow)
    pub shadow: Option<Shadow>,
}

impl Default for BoxStyle {
    fn default() -> Self {
        Self {
            fill: Some(Color::WHITE),
            stroke: None,
            shadow: None,
        }
    }
}

impl BoxStyle {
    /// Create a box with only fill color.
    #[must_use]
    pub const fn fill(color: Color) -> Self {
        Self {
            fill: Some(color),
            stroke: None,
            shadow: None,
        }
    }

    /// Add a stroke to the box.
    #[must_use]
    pub fn with_stroke(mut self, stroke: StrokeStyle) -> Self {
        self.stroke = Some(stroke);
        self
    }

    /// Add a shadow to the box.
    #[must_use]
    pub fn with_shadow(mut self, shadow: Shadow) -> Self {
        self.shadow = Some(shadow);
        self
    }
}

/// Shadow configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Shadow {
    /// Shadow color
    pub color: Color,
    /// Horizontal offset
    pub offset_x: f32,
    /// Vertical offset
    pub offset_y: f32,
    /// Blur radius
    pub blur: f32,
}

impl Default for Shadow {
    fn default() -> Self {
        Self {
            color: Color::new(0.0, 0.0, 0.0, 0.35),
            offset_x: 0.0,
            offset_y: 8.0,
            blur: 24.0,
        }
    }
}

/// 2D affine transform.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Transform2D {
    /// Matrix elements [a, b, c, d, e, f]
    /// | a c e |
    /// | b d f |
    /// | 0 0 1 |
    pub matrix: [f32; 6],
}

impl Default for Transform2D {
    fn default() -> Self {
        Self::identity()
    }
}

impl Transform2D {
    /// Identity transformation.
    #[must_use]
    pub const fn identity() -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, 0.0, 0.0],
        }
    }

    /// Create a translation transform.
    #[must_use]
    pub const fn translate(x: f32, y: f32) -> Self {
        Self {
            matrix: [1.0, 0.0, 0.0, 1.0, x, y],
        }
    }

    /// Create a scale transform.
    #[must_use]
    pub const fn scale(sx: f32, sy: f32) -> Self {
        Self {
            matrix: [sx, 0.0, 0.0, sy, 0.0, 0.0],
        }
    }

    /// Uniform scale around `center`.
    #[must_use]
    pub fn scale_about(center: Point, factor: f32) -> Self {
        Self::translate(-center.x, -center.y)
            .then(&Self::scale(factor, factor))
            .then(&Self::translate(center.x, center.y))
    }

    /// Chain transforms: first apply self, then apply other.
    ///
    /// For point p: `a.then(b).apply(p)` == `b.apply(a.apply(p))`
    #[must_use]
    pub fn then(&self, other: &Self) -> Self {
        let a = other.matrix;
        let b = self.matrix;
        Self {
            matrix: [
                a[0].mul_add(b[0], a[2] * b[1]),
                a[1].mul_add(b[0], a[3] * b[1]),
                a[0].mul_add(b[2], a[2] * b[3]),
                a[1].mul_add(b[2], a[3] * b[3]),
                a[0].mul_add(b[4], a[2].mul_add(b[5], a[4])),
                a[1].mul_add(b[4], a[3].mul_add(b[5], a[5])),
            ],
        }
    }

    /// Transform a point.
    #[must_use]
    pub fn apply(&self, point: Point) -> Point {
        let m = self.matrix;
        Point::new(
            m[0].mul_add(point.x, m[2].mul_add(point.y, m[4])),
            m[1].mul_add(point.x, m[3].mul_add(point.y, m[5])),
        )
    }

    /// Whether this is the identity.
    #[must_use]
    pub fn is_identity(&self) -> bool {
        *self == Self::identity()
    }
}

/// Drawing primitive. All rendering reduces to these.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum DrawCommand {
    /// Draw a path (polyline or polygon)
    Path {
        /// Points defining the path
        points: Vec<Point>,
        /// Whether the path is closed
        closed: bool,
        /// Stroke style
        style: StrokeStyle,
    },

    /// Draw a rectangle
    Rect {
        /// Rectangle bounds
        bounds: Rect,
        /// Corner radius
        radius: CornerRadius,
        /// Box style
        style: BoxStyle,
    },

    /// Draw text; `position` is the top-left of the line box
    Text {
        /// Text content
        content: String,
        /// Position
        position: Point,
        /// Text style
        style: crate::widget::TextStyle,
    },

    /// Group of commands with transform
    Group {
        /// Child commands
        children: Vec<DrawCommand>,
        /// Transform to apply
        transform: Transform2D,
    },

    /// Clip children to bounds
    Clip {
        /// Clip bounds
        bounds: Rect,
        /// Child commands
        children: Vec<DrawCommand>,
    },

    /// Multiply children's alpha
    Opacity {
        /// Alpha value (0.0 - 1.0)
        alpha: f32,
        /// Child commands
        children: Vec<DrawCommand>,
    },
}

impl DrawCommand {
    /// Create a filled rectangle.
    #[must_use]
    pub const fn filled_rect(bounds: Rect, color: Color) -> Self {
        Self::Rect {
            bounds,
            radius: CornerRadius::ZERO,
            style: BoxStyle::fill(color),
        }
    }

    /// Create a line between two points.
    #[must_use]
    pub fn line(from: Point, to: Point, style: StrokeStyle) -> Self {
        Self::Path {
            points: vec![from, to],
            closed: false,
            style,
        }
    }

    /// Child commands of a container, empty for leaves.
    #[must_use]
    pub fn children(&self) -> &[Self] {
        match self {
            Self::Group { children, .. }
            | Self::Clip { children, .. }
            | Self::Opacity { children, .. } => children,
            Self::Path { .. } | Self::Rect { .. } | Self::Text { .. } => &[],
        }
    }

    /// Depth-first list of leaf commands.
    #[must_use]
    pub fn leaves(&self) -> Vec<&Self> {
        match self {
            Self::Path { .. } | Self::Rect { .. } | Self::Text { .. } => vec![self],
            _ => self.children().iter().flat_map(Self::leaves).collect(),
        }
    }

    /// Text content if this is a text command.
    #[must_use]
    pub fn text(&self) -> Option<&str> {
        match self {
            Self::Text { content, .. } => Some(content),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::widget::TextStyle;

    #[test]
    fn test_box_style_default() {
        let style = BoxStyle::default();
        assert_eq!(style.fill, Some(Color::WHITE));
        assert!(style.stroke.is_none());
        assert!(style.shadow.is_none());
    }

    #[test]
    fn test_box_style_builders() {
        let style = BoxStyle::fill(Color::BLACK)
            .with_stroke(StrokeStyle::new(Color::WHITE, 1.0))
            .with_shadow(Shadow::default());
        assert_eq!(style.fill, Some(Color::BLACK));
        assert_eq!(style.stroke.map(|s| s.width), Some(1.0));
        assert!(style.shadow.is_some());
    }

    #[test]
    fn test_transform_translate() {
        let t = Transform2D::translate(10.0, 20.0);
        assert_eq!(t.apply(Point::new(5.0, 5.0)), Point::new(15.0, 25.0));
    }

    #[test]
    fn test_transform_chain() {
        let t = Transform2D::scale(2.0, 2.0).then(&Transform2D::translate(10.0, 0.0));
        assert_eq!(t.apply(Point::new(1.0, 1.0)), Point::new(12.0, 2.0));
    }

    #[test]
    fn test_transform_scale_about_keeps_center() {
        let center = Point::new(160.0, 90.0);
        let t = Transform2D::scale_about(center, 0.9);
        let p = t.apply(center);
        assert!((p.x - center.x).abs() < 1e-4);
        assert!((p.y - center.y).abs() < 1e-4);
        let corner = t.apply(Point::ORIGIN);
        assert!((corner.x - 16.0).abs() < 1e-3);
        assert!((corner.y - 9.0).abs() < 1e-3);
    }

    #[test]
    fn test_identity() {
        assert!(Transform2D::default().is_identity());
        assert!(!Transform2D::translate(1.0, 0.0).is_identity());
    }

    #[test]
    fn test_leaves_walks_nested_containers() {
        let text = DrawCommand::Text {
            content: "KK–33".to_string(),
            position: Point::ORIGIN,
            style: TextStyle::default(),
        };
        let tree = DrawCommand::Opacity {
            alpha: 0.5,
            children: vec![
                DrawCommand::filled_rect(Rect::new(0.0, 0.0, 1.0, 1.0), Color::WHITE),
                DrawCommand::Clip {
                    bounds: Rect::new(0.0, 0.0, 10.0, 10.0),
                    children: vec![text],
                },
            ],
        };
        let leaves = tree.leaves();
        assert_eq!(leaves.len(), 2);
        assert_eq!(leaves[1].text(), Some("KK–33"));
        assert_eq!(tree.children().len(), 2);
    }

    #[test]
    fn test_line() {
        let line = DrawCommand::line(
            Point::ORIGIN,
            Point::new(10.0, 0.0),
            StrokeStyle::default(),
        );
        assert!(matches!(line, DrawCommand::Path { ref points, closed: false, .. } if points.len() == 2));
    }
}
