//! Widget trait and related types.
//!
//! Widgets follow a measure-layout-paint cycle:
//!
//! 1. **Measure**: Compute intrinsic size given constraints
//! 2. **Layout**: Position self and children within allocated bounds
//! 3. **Paint**: Emit draw calls into a [`Canvas`]
//!
//! # Examples
//!
//! ```
//! use rowscroll_core::{TextStyle, TypeId};
//!
//! assert_ne!(TypeId::of::<String>(), TypeId::of::<i32>());
//!
//! let style = TextStyle::default();
//! assert!(style.measure_width("KK–33") > 0.0);
//! ```

use crate::constraints::Constraints;
use crate::draw::{BoxStyle, Transform2D};
use crate::event::Event;
use crate::geometry::{CornerRadius, Point, Rect, Size};
use crate::Color;
use serde::{Deserialize, Serialize};
use std::any::Any;

/// Type identifier for widget types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TypeId(std::any::TypeId);

impl TypeId {
    /// Get the type ID for a type.
    #[must_use]
    pub fn of<T: 'static>() -> Self {
        Self(std::any::TypeId::of::<T>())
    }
}

/// Result of laying out a widget.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct LayoutResult {
    /// Computed size after layout
    pub size: Size,
}

/// Core widget trait that all UI elements implement.
pub trait Widget: Send + Sync {
    /// Get the type identifier for this widget type.
    fn type_id(&self) -> TypeId;

    /// Compute intrinsic size constraints.
    fn measure(&self, constraints: Constraints) -> Size;

    /// Position children within allocated bounds.
    fn layout(&mut self, bounds: Rect) -> LayoutResult;

    /// Emit draw calls.
    fn paint(&self, canvas: &mut dyn Canvas);

    /// Handle input events; returns a message for the owner, if any.
    fn event(&mut self, _event: &Event) -> Option<Box<dyn Any + Send>> {
        None
    }

    /// Check if this widget is interactive (can receive events).
    fn is_interactive(&self) -> bool {
        false
    }

    /// Get the accessible name for screen readers.
    fn accessible_name(&self) -> Option<&str> {
        None
    }

    /// Get the accessible role.
    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Generic
    }

    /// Get the test ID for this widget (if any).
    fn test_id(&self) -> Option<&str> {
        None
    }

    /// Get the current bounds of this widget.
    fn bounds(&self) -> Rect {
        Rect::default()
    }
}

/// Canvas trait for paint operations.
///
/// Clip, transform and opacity are stacks; every push must be matched by the
/// corresponding pop.
pub trait Canvas {
    /// Draw a filled rectangle.
    fn fill_rect(&mut self, rect: Rect, color: Color);

    /// Draw a rectangle with rounded corners, fill, border and shadow.
    fn draw_box(&mut self, rect: Rect, radius: CornerRadius, style: &BoxStyle);

    /// Draw text with its line box starting at `position`.
    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle);

    /// Draw a line between two points.
    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32);

    /// Push a clip region.
    fn push_clip(&mut self, rect: Rect);

    /// Pop the clip region.
    fn pop_clip(&mut self);

    /// Push a transform.
    fn push_transform(&mut self, transform: Transform2D);

    /// Pop the transform.
    fn pop_transform(&mut self);

    /// Push an opacity layer; nested layers multiply.
    fn push_opacity(&mut self, alpha: f32);

    /// Pop the opacity layer.
    fn pop_opacity(&mut self);
}

/// Text style for rendering.
///
/// ```
/// use rowscroll_core::{Color, FontStyle, FontWeight, TextStyle};
///
/// let quote = TextStyle {
///     size: 14.0,
///     color: Color::WHITE,
///     weight: FontWeight::Normal,
///     style: FontStyle::Italic,
/// };
/// assert!(quote.is_italic());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextStyle {
    /// Font size in pixels
    pub size: f32,
    /// Text color
    pub color: Color,
    /// Font weight
    pub weight: FontWeight,
    /// Font style
    pub style: FontStyle,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            size: 16.0,
            color: Color::BLACK,
            weight: FontWeight::Normal,
            style: FontStyle::Normal,
        }
    }
}

impl TextStyle {
    /// Style with the given size and color.
    #[must_use]
    pub fn new(size: f32, color: Color) -> Self {
        Self {
            size,
            color,
            ..Self::default()
        }
    }

    /// Same style, italic.
    #[must_use]
    pub const fn italic(mut self) -> Self {
        self.style = FontStyle::Italic;
        self
    }

    /// Same style, different weight.
    #[must_use]
    pub const fn with_weight(mut self, weight: FontWeight) -> Self {
        self.weight = weight;
        self
    }

    /// Whether the style is italic.
    #[must_use]
    pub const fn is_italic(&self) -> bool {
        matches!(self.style, FontStyle::Italic)
    }

    /// Line box height.
    #[must_use]
    pub fn line_height(&self) -> f32 {
        self.size * 1.2
    }

    /// Approximate advance width, used for layout without a font backend.
    #[must_use]
    pub fn measure_width(&self, text: &str) -> f32 {
        text.chars().count() as f32 * self.size * 0.6
    }

    /// Approximate size of a single line of `text`.
    #[must_use]
    pub fn measure(&self, text: &str) -> Size {
        Size::new(self.measure_width(text), self.line_height())
    }
}

/// Font weight.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontWeight {
    /// Light (300)
    Light,
    /// Normal (400)
    #[default]
    Normal,
    /// Medium (500)
    Medium,
    /// Bold (700)
    Bold,
}

impl FontWeight {
    /// CSS numeric weight.
    #[must_use]
    pub const fn css_value(self) -> u16 {
        match self {
            Self::Light => 300,
            Self::Normal => 400,
            Self::Medium => 500,
            Self::Bold => 700,
        }
    }
}

/// Font style.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum FontStyle {
    /// Normal style
    #[default]
    Normal,
    /// Italic style
    Italic,
}

/// Accessible role for screen readers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum AccessibleRole {
    /// Generic element
    #[default]
    Generic,
    /// Button
    Button,
    /// Link
    Link,
    /// Heading
    Heading,
    /// List
    List,
    /// List item
    ListItem,
    /// Region (expansion panel)
    Region,
    /// Media player
    Video,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_type_id() {
        assert_eq!(TypeId::of::<u32>(), TypeId::of::<u32>());
        assert_ne!(TypeId::of::<u32>(), TypeId::of::<String>());
    }

    #[test]
    fn test_text_style_default() {
        let style = TextStyle::default();
        assert_eq!(style.size, 16.0);
        assert_eq!(style.weight, FontWeight::Normal);
        assert!(!style.is_italic());
    }

    #[test]
    fn test_text_style_builders() {
        let style = TextStyle::new(14.0, Color::WHITE)
            .italic()
            .with_weight(FontWeight::Bold);
        assert!(style.is_italic());
        assert_eq!(style.weight.css_value(), 700);
    }

    #[test]
    fn test_measure_width_counts_chars_not_bytes() {
        let style = TextStyle::new(10.0, Color::WHITE);
        // en dash is three bytes but one char
        assert_eq!(style.measure_width("KK–33"), 30.0);
        assert_eq!(style.measure("").width, 0.0);
        assert_eq!(style.measure("a").height, 12.0);
    }
}
