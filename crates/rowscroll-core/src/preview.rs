//! Hover preview placement.

use crate::geometry::{Point, Rect, Size};
use serde::{Deserialize, Serialize};

/// Size and placement rules of the floating preview panel.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PreviewGeometry {
    /// Panel width
    pub width: f32,
    /// Panel height
    pub height: f32,
    /// Distance from the pointer, both axes
    pub offset: f32,
    /// Minimum gap to the right and bottom viewport edges
    pub margin: f32,
}

impl Default for PreviewGeometry {
    fn default() -> Self {
        Self {
            width: 320.0,
            height: 180.0,
            offset: 20.0,
            margin: 8.0,
        }
    }
}

impl PreviewGeometry {
    /// Panel size.
    #[must_use]
    pub const fn size(&self) -> Size {
        Size::new(self.width, self.height)
    }

    /// Panel bounds for a pointer position inside a viewport.
    ///
    /// The panel sits `offset` below and right of the pointer, pulled back
    /// so it stays `margin` inside the right and bottom edges. The left and
    /// top edges are not clamped.
    #[must_use]
    pub fn place(&self, pointer: Point, viewport: Size) -> Rect {
        let left = (pointer.x + self.offset).min(viewport.width - self.width - self.margin);
        let top = (pointer.y + self.offset).min(viewport.height - self.height - self.margin);
        Rect::new(left, top, self.width, self.height)
    }
}
