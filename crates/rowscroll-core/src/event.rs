//! Raw input events delivered by the host surface.
//!
//! Positions are viewport (client) coordinates. `MouseUp` is the
//! document-level release: the browser shell listens for it on the window so
//! it arrives even when the button is released outside the drawing surface.

use crate::geometry::Point;
use serde::{Deserialize, Serialize};

/// Input event types.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Event {
    /// Pointer moved over the surface
    MouseMove {
        /// New position
        position: Point,
    },
    /// Mouse button pressed over the surface
    MouseDown {
        /// Press position
        position: Point,
        /// Button pressed
        button: MouseButton,
    },
    /// Mouse button released anywhere in the document
    MouseUp {
        /// Release position
        position: Point,
        /// Button released
        button: MouseButton,
    },
    /// Click synthesized by the host after a press/release pair
    Click {
        /// Click position
        position: Point,
        /// Button clicked
        button: MouseButton,
    },
    /// Pointer left the surface
    MouseLeave,
    /// Wheel or trackpad scroll over the surface
    Wheel {
        /// Pointer position
        position: Point,
        /// Vertical scroll distance in pixels, positive scrolls down
        delta_y: f32,
    },
    /// Touch started
    TouchStart {
        /// Touch identifier
        id: TouchId,
        /// Touch position
        position: Point,
    },
    /// Touch ended
    TouchEnd {
        /// Touch identifier
        id: TouchId,
        /// Final position
        position: Point,
    },
    /// Touch cancelled by the host (e.g. palm rejection)
    TouchCancel {
        /// Touch identifier
        id: TouchId,
    },
    /// Viewport resized
    Resize {
        /// New width
        width: f32,
        /// New height
        height: f32,
    },
}

impl Event {
    /// Whether this is a mouse event.
    #[must_use]
    pub const fn is_mouse(&self) -> bool {
        matches!(
            self,
            Self::MouseMove { .. }
                | Self::MouseDown { .. }
                | Self::MouseUp { .. }
                | Self::Click { .. }
                | Self::MouseLeave
                | Self::Wheel { .. }
        )
    }

    /// Whether this is a touch event.
    #[must_use]
    pub const fn is_touch(&self) -> bool {
        matches!(
            self,
            Self::TouchStart { .. } | Self::TouchEnd { .. } | Self::TouchCancel { .. }
        )
    }

    /// Position carried by the event, if any.
    #[must_use]
    pub const fn position(&self) -> Option<Point> {
        match self {
            Self::MouseMove { position }
            | Self::MouseDown { position, .. }
            | Self::MouseUp { position, .. }
            | Self::Click { position, .. }
            | Self::TouchStart { position, .. }
            | Self::TouchEnd { position, .. }
            | Self::Wheel { position, .. } => Some(*position),
            Self::MouseLeave | Self::TouchCancel { .. } | Self::Resize { .. } => None,
        }
    }
}

/// Touch identifier for multi-touch tracking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub struct TouchId(pub i32);

/// Mouse button identifiers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum MouseButton {
    /// Left mouse button
    #[default]
    Left,
    /// Middle mouse button (wheel click)
    Middle,
    /// Right mouse button
    Right,
    /// Any other button
    Other(u16),
}

impl MouseButton {
    /// Map a DOM `MouseEvent.button` index.
    #[must_use]
    pub const fn from_dom(index: i16) -> Self {
        match index {
            0 => Self::Left,
            1 => Self::Middle,
            2 => Self::Right,
            n => Self::Other(n.unsigned_abs()),
        }
    }
}
