//! Floating media preview that follows the pointer.

use rowscroll_core::{
    widget::{AccessibleRole, LayoutResult},
    AnimatedValue, BoxStyle, Canvas, Color, Constraints, CornerRadius, Dataset, MediaElement,
    Point, Presence, PresencePhase, PreviewGeometry, Rect, Shadow, Size, Timing, Transform2D,
    Transitions, TypeId, ViewState, Widget,
};
use serde::Serialize;

/// Where and how the host should place the preview media element.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MediaSurface {
    /// Row whose media is shown
    pub row: usize,
    /// Panel bounds in viewport coordinates (before scaling)
    pub bounds: Rect,
    /// Panel opacity
    pub opacity: f32,
    /// Panel scale about its center
    pub scale: f32,
    /// Media to mount; `None` renders an empty panel
    pub element: Option<MediaElement>,
}

/// The preview panel.
///
/// While exiting, the panel keeps its last row, media and position so the
/// fade-out shows what was there; only opacity animates on exit.
#[derive(Debug, Clone)]
pub struct HoverPreview {
    geometry: PreviewGeometry,
    viewport: Size,
    presence: Presence,
    enter: Timing,
    scale: AnimatedValue,
    row: Option<usize>,
    element: Option<MediaElement>,
    pointer: Point,
    radius: CornerRadius,
    background: Color,
    bounds: Rect,
}

impl Default for HoverPreview {
    fn default() -> Self {
        Self::new(PreviewGeometry::default())
    }
}

impl HoverPreview {
    /// A hidden preview.
    #[must_use]
    pub fn new(geometry: PreviewGeometry) -> Self {
        let transitions = Transitions::default();
        Self {
            geometry,
            viewport: Size::ZERO,
            presence: Presence::new(transitions.preview_enter, transitions.preview_exit),
            enter: transitions.preview_enter,
            scale: AnimatedValue::at(f64::from(Transitions::PREVIEW_INITIAL_SCALE)),
            row: None,
            element: None,
            pointer: Point::ORIGIN,
            radius: CornerRadius::uniform(6.0),
            background: Color::BLACK,
            bounds: Rect::default(),
        }
    }

    /// Panel geometry.
    #[must_use]
    pub const fn geometry(&self) -> &PreviewGeometry {
        &self.geometry
    }

    /// Change the viewport used for edge clamping.
    pub fn set_viewport(&mut self, viewport: Size) {
        self.viewport = viewport;
        self.place();
    }

    /// Change enter and exit timings.
    pub fn set_timings(&mut self, enter: Timing, exit: Timing) {
        self.enter = enter;
        self.presence.set_timings(enter, exit);
    }

    /// Follow the view state.
    pub fn sync(&mut self, state: &ViewState, dataset: &Dataset) {
        if let Some(row) = state.preview_row(dataset) {
            if self.presence.phase() == PresencePhase::Absent {
                self.scale = AnimatedValue::at(f64::from(Transitions::PREVIEW_INITIAL_SCALE));
            }
            if self.row != Some(row.id) || !self.is_open() {
                tracing::debug!(row = row.id, playable = row.media.is_playable(), "preview shown");
            }
            self.presence.show();
            self.scale.animate_to(1.0, self.enter);
            self.row = Some(row.id);
            self.element = row.media.element(&row.title, state.is_muted());
            self.pointer = state.pointer();
        } else if self.is_open() {
            self.presence.hide();
            tracing::debug!(row = ?self.row, "preview hidden");
        }
        self.place();
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.presence.update(dt);
        self.scale.update(dt);
        if !self.presence.is_mounted() {
            self.row = None;
            self.element = None;
        }
    }

    /// Whether a transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.presence.is_animating() || !self.scale.is_complete()
    }

    /// Whether showing or fading in.
    #[must_use]
    pub const fn is_open(&self) -> bool {
        matches!(
            self.presence.phase(),
            PresencePhase::Entering | PresencePhase::Present
        )
    }

    /// Whether the panel is in the tree.
    #[must_use]
    pub const fn is_mounted(&self) -> bool {
        self.presence.is_mounted()
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.presence.progress()
    }

    /// Current scale.
    #[must_use]
    pub fn scale(&self) -> f32 {
        self.scale.value() as f32
    }

    /// Host-facing description of the mounted panel.
    #[must_use]
    pub fn surface(&self) -> Option<MediaSurface> {
        if !self.is_mounted() {
            return None;
        }
        self.row.map(|row| MediaSurface {
            row,
            bounds: self.bounds,
            opacity: self.opacity(),
            scale: self.scale(),
            element: self.element.clone(),
        })
    }

    fn place(&mut self) {
        self.bounds = self.geometry.place(self.pointer, self.viewport);
    }
}

impl Widget for HoverPreview {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(self.geometry.size())
    }

    /// `bounds` is the viewport; the panel places itself inside it.
    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.set_viewport(bounds.size());
        LayoutResult {
            size: self.bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.is_mounted() {
            return;
        }
        canvas.push_opacity(self.opacity());
        canvas.push_transform(Transform2D::scale_about(self.bounds.center(), self.scale()));
        canvas.draw_box(
            self.bounds,
            self.radius,
            &BoxStyle::fill(self.background).with_shadow(Shadow::default()),
        );
        canvas.pop_transform();
        canvas.pop_opacity();
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Video
    }

    fn test_id(&self) -> Option<&str> {
        Some("hover-preview")
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
