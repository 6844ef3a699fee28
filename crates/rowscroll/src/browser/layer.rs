//! Media layer planning.
//!
//! The preview's `<video>` or `<iframe>` lives in the DOM above the canvas.
//! [`MediaPlan`] turns the per-frame [`MediaSurface`] into the smallest DOM
//! change, so a playing element survives frames where nothing about it
//! changed.

use rowscroll_core::MediaElement;
use rowscroll_widgets::MediaSurface;
use serde::Serialize;

/// DOM change for the media element inside the preview container.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum MediaOp {
    /// Leave the element as it is
    Keep,
    /// Remove the element
    Clear,
    /// Replace whatever is mounted with a new element
    Mount(MediaElement),
    /// Update the `muted` property of the mounted video
    SetMuted(bool),
}

/// Tracks the mounted media element between frames.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MediaPlan {
    mounted: Option<MediaElement>,
}

impl MediaPlan {
    /// Empty plan.
    #[must_use]
    pub const fn new() -> Self {
        Self { mounted: None }
    }

    /// Currently mounted element.
    #[must_use]
    pub const fn mounted(&self) -> Option<&MediaElement> {
        self.mounted.as_ref()
    }

    /// Plan the change from the mounted element to `next`.
    pub fn next(&mut self, next: Option<&MediaElement>) -> MediaOp {
        let op = match (&self.mounted, next) {
            (None, None) => MediaOp::Keep,
            (Some(_), None) => MediaOp::Clear,
            (None, Some(next)) => MediaOp::Mount(next.clone()),
            (Some(current), Some(next)) if current.needs_remount(next) => {
                MediaOp::Mount(next.clone())
            }
            (Some(MediaElement::Video { muted: was, .. }), Some(MediaElement::Video { muted, .. }))
                if was != muted =>
            {
                MediaOp::SetMuted(*muted)
            }
            (Some(_), Some(_)) => MediaOp::Keep,
        };
        if op != MediaOp::Keep {
            tracing::debug!(op = ?op, "media layer");
        }
        self.mounted = next.cloned();
        op
    }
}

/// Inline CSS for the preview container.
///
/// `None` hides the container.
#[must_use]
pub fn surface_style(surface: Option<&MediaSurface>) -> String {
    let Some(surface) = surface else {
        return "display:none".to_string();
    };
    let b = surface.bounds;
    format!(
        "position:fixed;left:{}px;top:{}px;width:{}px;height:{}px;\
         opacity:{};transform:scale({});transform-origin:center;\
         border-radius:6px;overflow:hidden;pointer-events:none;z-index:50",
        b.x, b.y, b.width, b.height, surface.opacity, surface.scale
    )
}
