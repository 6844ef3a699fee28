//! Detail panel under the expanded row.

use rowscroll_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Color, Constraints, FontWeight, MediaSource, Point, Presence, PresencePhase, Rect, Row, Size,
    TextStyle, Theme, Timing, TypeId, Widget,
};

/// Outbound link label for embedded-player rows.
pub const EMBEDDED_LINK_LABEL: &str = "Watch on YouTube ↗";
/// Outbound link label for every other row.
pub const LINK_LABEL: &str = "Watch ↗";

/// Title, author, quote and outbound link for one row.
///
/// Mounted while open and during its exit transition; height and opacity
/// both follow the presence progress from 0 to the natural height.
#[derive(Debug, Clone)]
pub struct ExpansionPanel {
    title: String,
    author: String,
    quote: Option<String>,
    media_url: String,
    link_label: &'static str,
    background: Color,
    text_color: Color,
    padding: f32,
    presence: Presence,
    test_id_value: String,
    bounds: Rect,
    link: Rect,
}

impl ExpansionPanel {
    /// A closed panel for `row`.
    #[must_use]
    pub fn new(row: &Row, timing: Timing) -> Self {
        let theme = Theme::default();
        Self {
            title: row.title.clone(),
            author: row.author.clone(),
            quote: row.quote.clone(),
            media_url: row.media_url.clone(),
            link_label: match row.media {
                MediaSource::Embedded { .. } => EMBEDDED_LINK_LABEL,
                _ => LINK_LABEL,
            },
            background: theme.panel,
            text_color: theme.text,
            padding: 16.0,
            presence: Presence::new(timing, timing),
            test_id_value: format!("panel-{}", row.id),
            bounds: Rect::default(),
            link: Rect::default(),
        }
    }

    /// Apply theme colors.
    #[must_use]
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.background = theme.panel;
        self.text_color = theme.text;
        self
    }

    /// Open or close.
    pub fn set_open(&mut self, open: bool) {
        if open == self.is_open() {
            return;
        }
        if open {
            self.presence.show();
        } else {
            self.presence.hide();
        }
        tracing::debug!(panel = %self.test_id_value, open, "expansion panel");
    }

    /// Change the transition timing.
    pub fn set_timing(&mut self, timing: Timing) {
        self.presence.set_timings(timing, timing);
    }

    /// Advance by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.presence.update(dt);
    }

    /// Whether opening or open.
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

    /// Whether a transition is running.
    #[must_use]
    pub const fn is_animating(&self) -> bool {
        self.presence.is_animating()
    }

    /// Height when fully open.
    #[must_use]
    pub fn natural_height(&self) -> f32 {
        let lines: f32 = self
            .lines()
            .iter()
            .map(|(_, offset, style)| offset + style.line_height())
            .sum();
        self.padding.mul_add(2.0, lines)
    }

    /// Current animated height.
    #[must_use]
    pub fn height(&self) -> f32 {
        if self.is_mounted() {
            self.natural_height() * self.presence.progress()
        } else {
            0.0
        }
    }

    /// Current opacity.
    #[must_use]
    pub fn opacity(&self) -> f32 {
        self.presence.progress()
    }

    /// Link target under `p`, if the link is visible there.
    #[must_use]
    pub fn link_at(&self, p: Point) -> Option<&str> {
        (self.is_mounted() && self.bounds.contains_point(&p) && self.link.contains_point(&p))
            .then_some(self.media_url.as_str())
    }

    /// Bounds of the outbound link.
    #[must_use]
    pub const fn link_bounds(&self) -> Rect {
        self.link
    }

    /// Label of the outbound link.
    #[must_use]
    pub const fn link_label(&self) -> &'static str {
        self.link_label
    }

    /// Text lines with their top margin.
    fn lines(&self) -> Vec<(String, f32, TextStyle)> {
        let color = self.text_color.with_alpha(0.9);
        let mut lines = vec![
            (
                self.title.clone(),
                0.0,
                TextStyle::new(16.0, color).with_weight(FontWeight::Bold),
            ),
            (self.author.clone(), 0.0, TextStyle::new(14.0, color.with_alpha(0.81))),
        ];
        if let Some(quote) = &self.quote {
            lines.push((
                format!("“{quote}”"),
                4.0,
                TextStyle::new(14.0, color.with_alpha(0.72)).italic(),
            ));
        }
        lines.push((self.link_label.to_string(), 12.0, TextStyle::new(16.0, color)));
        lines
    }
}

impl Widget for ExpansionPanel {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(constraints.max_width, self.height()))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds.with_height(self.height());

        let mut y = self.bounds.y + self.padding;
        let x = self.bounds.x + self.padding;
        self.link = Rect::default();
        for (text, offset, style) in self.lines() {
            y += offset;
            if text == self.link_label {
                self.link = Rect::new(x, y, style.measure_width(&text), style.line_height());
            }
            y += style.line_height();
        }

        LayoutResult {
            size: self.bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        if !self.is_mounted() || self.bounds.height <= 0.0 {
            return;
        }

        canvas.push_clip(self.bounds);
        canvas.push_opacity(self.opacity());
        canvas.fill_rect(self.bounds, self.background);

        let x = self.bounds.x + self.padding;
        let mut y = self.bounds.y + self.padding;
        for (text, offset, style) in self.lines() {
            y += offset;
            canvas.draw_text(&text, Point::new(x, y), &style);
            y += style.line_height();
        }

        // underline-offset-2
        let underline_y = self.link.bottom() + 2.0;
        canvas.draw_line(
            Point::new(self.link.x, underline_y),
            Point::new(self.link.right(), underline_y),
            self.text_color.with_alpha(0.9),
            1.0,
        );

        canvas.pop_opacity();
        canvas.pop_clip();
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.title)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Region
    }

    fn test_id(&self) -> Option<&str> {
        Some(&self.test_id_value)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
