//! One film row: a compact line and a large hover overlay.
//!
//! The row's height springs between base, hover and expanded heights. The
//! compact layer fades out while the overlay fades in over it.

use rowscroll_core::{
    widget::{AccessibleRole, LayoutResult},
    AnimatedValue, Canvas, Color, Constraints, FontWeight, Point, Rect, Row, RowMetrics, Size,
    TextStyle, Theme, Transitions, TypeId, ViewState, Widget,
};

/// Minimum width at which the overlay shows the "by" between title and
/// author.
const WIDE_BREAKPOINT: f32 = 768.0;

/// Fixed column widths of the compact layer; the title column takes the
/// rest.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RowColumns {
    /// Code column
    pub code: f32,
    /// "by" column
    pub by: f32,
    /// Author column
    pub author: f32,
    /// Cell padding
    pub padding: f32,
}

impl Default for RowColumns {
    fn default() -> Self {
        Self {
            code: 192.0,
            by: 64.0,
            author: 384.0,
            padding: 8.0,
        }
    }
}

impl RowColumns {
    /// Split a row into code, title, by and author cells.
    #[must_use]
    pub fn split(&self, bounds: Rect) -> [Rect; 4] {
        let title = (bounds.width - self.code - self.by - self.author).max(0.0);
        let mut x = bounds.x;
        [self.code, title, self.by, self.author].map(|w| {
            let cell = Rect::new(x, bounds.y, w, bounds.height);
            x += w;
            cell
        })
    }
}

/// A film row widget.
#[derive(Debug, Clone)]
pub struct FilmRow {
    row: Row,
    columns: RowColumns,
    text_color: Color,
    border_color: Color,
    height: AnimatedValue,
    overlay: AnimatedValue,
    compact: AnimatedValue,
    overlay_active: bool,
    test_id_value: String,
    bounds: Rect,
    compact_link: Rect,
    overlay_link: Rect,
}

impl FilmRow {
    /// A resting row.
    #[must_use]
    pub fn new(row: Row, metrics: &RowMetrics) -> Self {
        let theme = Theme::default();
        let test_id_value = format!("row-{}", row.id);
        Self {
            row,
            columns: RowColumns::default(),
            text_color: theme.text,
            border_color: theme.border,
            height: AnimatedValue::at(f64::from(metrics.base)),
            overlay: AnimatedValue::at(0.0),
            compact: AnimatedValue::at(1.0),
            overlay_active: false,
            test_id_value,
            bounds: Rect::default(),
            compact_link: Rect::default(),
            overlay_link: Rect::default(),
        }
    }

    /// Apply theme colors.
    #[must_use]
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.text_color = theme.text;
        self.border_color = theme.border;
        self
    }

    /// Set column widths.
    #[must_use]
    pub const fn columns(mut self, columns: RowColumns) -> Self {
        self.columns = columns;
        self
    }

    /// The row record.
    #[must_use]
    pub const fn row(&self) -> &Row {
        &self.row
    }

    /// Retarget animations from the view state.
    pub fn sync(&mut self, state: &ViewState, metrics: &RowMetrics, transitions: &Transitions) {
        let i = self.row.id;
        self.overlay_active = state.show_overlay(i);
        self.height
            .animate_to(f64::from(state.row_height(i, metrics)), transitions.row_height);
        let (overlay, compact) = if self.overlay_active { (1.0, 0.0) } else { (0.0, 1.0) };
        self.overlay.animate_to(overlay, transitions.overlay_fade);
        self.compact.animate_to(compact, transitions.compact_fade);
    }

    /// Advance animations by `dt` seconds.
    pub fn tick(&mut self, dt: f64) {
        self.height.update(dt);
        self.overlay.update(dt);
        self.compact.update(dt);
    }

    /// Whether any animation is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        !(self.height.is_complete() && self.overlay.is_complete() && self.compact.is_complete())
    }

    /// Current animated height.
    #[must_use]
    pub fn height(&self) -> f32 {
        self.height.value().max(0.0) as f32
    }

    /// Current overlay opacity.
    #[must_use]
    pub fn overlay_opacity(&self) -> f32 {
        self.overlay.value().clamp(0.0, 1.0) as f32
    }

    /// Current compact layer opacity.
    #[must_use]
    pub fn compact_opacity(&self) -> f32 {
        self.compact.value().clamp(0.0, 1.0) as f32
    }

    /// Whether the overlay is (or is becoming) visible.
    #[must_use]
    pub const fn is_overlay_active(&self) -> bool {
        self.overlay_active
    }

    /// Overlay title link target under `p`. Only live while the overlay shows.
    #[must_use]
    pub fn overlay_link_at(&self, p: Point) -> Option<&str> {
        (self.overlay_active && self.visible_link(self.overlay_link, p))
            .then_some(self.row.media_url.as_str())
    }

    /// Compact title link target under `p`.
    #[must_use]
    pub fn compact_link_at(&self, p: Point) -> Option<&str> {
        self.visible_link(self.compact_link, p)
            .then_some(self.row.media_url.as_str())
    }

    /// Bounds of the title link currently on top.
    #[must_use]
    pub const fn link_bounds(&self) -> Rect {
        if self.overlay_active {
            self.overlay_link
        } else {
            self.compact_link
        }
    }

    /// Bounds of the compact title link, live even under the overlay.
    #[must_use]
    pub const fn compact_link_bounds(&self) -> Rect {
        self.compact_link
    }

    fn visible_link(&self, link: Rect, p: Point) -> bool {
        link.contains_point(&p) && self.bounds.contains_point(&p)
    }

    fn compact_style(&self, size: f32) -> TextStyle {
        TextStyle::new(size, self.text_color)
    }

    fn overlay_title_style(&self) -> TextStyle {
        // leading-none: the line box is the font size
        TextStyle::new(48.0, self.text_color).with_weight(FontWeight::Bold)
    }

    fn overlay_block_height(&self) -> f32 {
        let quote = if self.row.quote.is_some() {
            4.0 + self.compact_style(14.0).line_height()
        } else {
            0.0
        };
        48.0 + quote
    }

    fn overlay_cells(&self) -> (Rect, Rect, Rect) {
        let inner = self.bounds.inset(self.columns.padding, 0.0);
        let code = Rect::new(inner.x, inner.y, self.columns.code, inner.height);
        let author = Rect::new(
            inner.right() - self.columns.author,
            inner.y,
            self.columns.author,
            inner.height,
        );
        let middle = Rect::new(
            code.right(),
            inner.y,
            (author.x - code.right()).max(0.0),
            inner.height,
        );
        (code, middle, author)
    }

    fn centered_y(&self, content_height: f32) -> f32 {
        self.bounds.y + (self.bounds.height - content_height) / 2.0
    }

    fn paint_compact(&self, canvas: &mut dyn Canvas) {
        let pad = self.columns.padding;
        let [code, title, by, author] = self.columns.split(self.bounds);
        let top = self.bounds.y + pad;

        canvas.draw_text(&self.row.code, Point::new(code.x + pad, top), &self.compact_style(11.0));
        canvas.draw_text(
            &self.row.title,
            self.compact_link.origin(),
            &self.compact_style(12.0),
        );
        if let Some(quote) = &self.row.quote {
            let style = TextStyle::new(10.0, self.text_color.with_alpha(0.8)).italic();
            canvas.draw_text(
                &format!("“{quote}”"),
                Point::new(title.x + pad, self.compact_link.bottom()),
                &style,
            );
        }
        canvas.draw_text("by", Point::new(by.x + pad, top), &self.compact_style(12.0).italic());
        canvas.draw_text(
            &self.row.author,
            Point::new(author.x + pad, top),
            &self.compact_style(12.0),
        );
    }

    fn paint_overlay(&self, canvas: &mut dyn Canvas) {
        let (code, middle, author) = self.overlay_cells();

        let code_style = TextStyle::new(36.0, self.text_color).with_weight(FontWeight::Medium);
        canvas.draw_text(
            &self.row.code,
            Point::new(code.x, self.centered_y(code_style.line_height())),
            &code_style,
        );

        let title_style = self.overlay_title_style();
        canvas.draw_text(&self.row.title, self.overlay_link.origin(), &title_style);

        if self.bounds.width >= WIDE_BREAKPOINT {
            let by_style = TextStyle::new(20.0, self.text_color.with_alpha(0.9)).italic();
            // baseline-aligned with the title
            let y = self.overlay_link.bottom() - by_style.line_height();
            canvas.draw_text("by", Point::new(self.overlay_link.right() + 16.0, y), &by_style);
        }

        if let Some(quote) = &self.row.quote {
            let style = TextStyle::new(14.0, self.text_color.with_alpha(0.9)).italic();
            canvas.draw_text(
                &format!("“{quote}”"),
                Point::new(middle.x, self.overlay_link.bottom() + 4.0),
                &style,
            );
        }

        // leading-none
        let author_style = TextStyle::new(30.0, self.text_color).with_weight(FontWeight::Medium);
        let x = author.right() - author_style.measure_width(&self.row.author);
        canvas.draw_text(
            &self.row.author,
            Point::new(x.max(author.x + self.columns.padding), self.centered_y(30.0)),
            &author_style,
        );
    }
}

impl Widget for FilmRow {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(constraints.max_width, self.height()))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds.with_height(self.height());
        let pad = self.columns.padding;

        let [_, title, _, _] = self.columns.split(self.bounds);
        let style = self.compact_style(12.0);
        self.compact_link = Rect::new(
            title.x + pad,
            self.bounds.y + pad,
            style
                .measure_width(&self.row.title)
                .min((title.width - pad * 2.0).max(0.0)),
            style.line_height(),
        );

        let (_, middle, _) = self.overlay_cells();
        let title_style = self.overlay_title_style();
        self.overlay_link = Rect::new(
            middle.x,
            self.centered_y(self.overlay_block_height()),
            title_style.measure_width(&self.row.title).min(middle.width),
            48.0,
        );

        LayoutResult {
            size: self.bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.push_clip(self.bounds);

        let compact = self.compact_opacity();
        if compact > 0.0 {
            canvas.push_opacity(compact);
            self.paint_compact(canvas);
            canvas.pop_opacity();
        }

        let overlay = self.overlay_opacity();
        if overlay > 0.0 {
            canvas.push_opacity(overlay);
            self.paint_overlay(canvas);
            canvas.pop_opacity();
        }

        let b = self.bounds;
        canvas.fill_rect(Rect::new(b.x, b.bottom() - 1.0, b.width, 1.0), self.border_color);
        canvas.pop_clip();
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(&self.row.title)
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::ListItem
    }

    fn test_id(&self) -> Option<&str> {
        Some(&self.test_id_value)
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowscroll_core::{apply, Dataset, Interaction, MotionPreference, RecordingCanvas, RowRecord};

    fn row() -> Row {
        Dataset::new([RowRecord::new(
            "KK–33",
            "King Kong (1933)",
            "Merian C. Cooper & Ernest B. Schoedsack",
            "https://www.youtube.com/watch?v=MMNICLfHE3M",
        )
        .with_quote("It was beauty killed the beast.")])
        .unwrap()
        .rows()[0]
            .clone()
    }

    fn settle(film: &mut FilmRow) {
        for _ in 0..600 {
            film.tick(1.0 / 60.0);
        }
    }

    #[test]
    fn test_columns_split() {
        let cells = RowColumns::default().split(Rect::new(0.0, 0.0, 1280.0, 56.0));
        assert_eq!(cells[0], Rect::new(0.0, 0.0, 192.0, 56.0));
        assert_eq!(cells[1], Rect::new(192.0, 0.0, 640.0, 56.0));
        assert_eq!(cells[2].x, 832.0);
        assert_eq!(cells[3], Rect::new(896.0, 0.0, 384.0, 56.0));
    }

    #[test]
    fn test_columns_split_narrow_title_never_negative() {
        let cells = RowColumns::default().split(Rect::new(0.0, 0.0, 400.0, 56.0));
        assert_eq!(cells[1].width, 0.0);
    }

    #[test]
    fn test_resting_row() {
        let mut film = FilmRow::new(row(), &RowMetrics::default());
        film.layout(Rect::new(0.0, 0.0, 1280.0, 0.0));
        assert_eq!(film.height(), 56.0);
        assert_eq!(film.compact_opacity(), 1.0);
        assert_eq!(film.overlay_opacity(), 0.0);
        assert!(!film.is_animating());
    }

    #[test]
    fn test_hover_springs_to_hover_height() {
        let metrics = RowMetrics::default();
        let mut film = FilmRow::new(row(), &metrics);
        let state = apply(ViewState::default(), Interaction::Enter(0));
        film.sync(&state, &metrics, &Transitions::default());
        assert!(film.is_animating());
        assert!(film.is_overlay_active());
        film.tick(1.0 / 60.0);
        assert!(film.height() > 56.0 && film.height() < 112.0);
        settle(&mut film);
        assert_eq!(film.height(), 112.0);
        assert_eq!(film.overlay_opacity(), 1.0);
        assert_eq!(film.compact_opacity(), 0.0);
    }

    #[test]
    fn test_reduced_motion_jumps() {
        let metrics = RowMetrics::default();
        let mut film = FilmRow::new(row(), &metrics);
        let state = apply(ViewState::default(), Interaction::Click(0));
        let transitions = Transitions::default().for_motion(MotionPreference::Reduced);
        film.sync(&state, &metrics, &transitions);
        assert_eq!(film.height(), 72.0);
        assert!(!film.is_animating());
    }

    #[test]
    fn test_overlay_link_only_while_overlay_shows() {
        let metrics = RowMetrics::default();
        let transitions = Transitions::default().for_motion(MotionPreference::Reduced);
        let mut film = FilmRow::new(row(), &metrics);

        let hovered = apply(ViewState::default(), Interaction::Enter(0));
        film.sync(&hovered, &metrics, &transitions);
        film.layout(Rect::new(0.0, 0.0, 1280.0, 0.0));
        let p = film.overlay_link.center();
        assert_eq!(
            film.overlay_link_at(p),
            Some("https://www.youtube.com/watch?v=MMNICLfHE3M")
        );

        film.sync(&ViewState::default(), &metrics, &transitions);
        film.layout(Rect::new(0.0, 0.0, 1280.0, 0.0));
        assert_eq!(film.overlay_link_at(p), None);
    }

    #[test]
    fn test_compact_link_hit() {
        let mut film = FilmRow::new(row(), &RowMetrics::default());
        film.layout(Rect::new(0.0, 100.0, 1280.0, 0.0));
        let p = Point::new(192.0 + 8.0 + 2.0, 100.0 + 8.0 + 2.0);
        assert!(film.compact_link_at(p).is_some());
        assert!(film.compact_link_at(Point::new(10.0, 110.0)).is_none());
    }

    #[test]
    fn test_paint_compact_only_when_resting() {
        let mut film = FilmRow::new(row(), &RowMetrics::default());
        film.layout(Rect::new(0.0, 0.0, 1280.0, 0.0));
        let mut canvas = RecordingCanvas::new();
        film.paint(&mut canvas);
        let texts = canvas.texts();
        assert_eq!(
            texts,
            vec![
                "KK–33".to_string(),
                "King Kong (1933)".to_string(),
                "“It was beauty killed the beast.”".to_string(),
                "by".to_string(),
                "Merian C. Cooper & Ernest B. Schoedsack".to_string(),
            ]
        );
    }

    #[test]
    fn test_paint_overlay_when_hovered() {
        let metrics = RowMetrics::default();
        let transitions = Transitions::default().for_motion(MotionPreference::Reduced);
        let mut film = FilmRow::new(row(), &metrics);
        film.sync(
            &apply(ViewState::default(), Interaction::Enter(0)),
            &metrics,
            &transitions,
        );
        film.layout(Rect::new(0.0, 0.0, 1280.0, 0.0));
        let mut canvas = RecordingCanvas::new();
        film.paint(&mut canvas);
        // compact layer fully faded, overlay with "by" on a wide row
        let texts = canvas.texts();
        assert_eq!(texts.len(), 5);
        assert_eq!(texts[0], "KK–33");
        assert_eq!(texts[2], "by");
    }

    #[test]
    fn test_accessibility() {
        let film = FilmRow::new(row(), &RowMetrics::default());
        assert_eq!(film.accessible_role(), AccessibleRole::ListItem);
        assert_eq!(film.accessible_name(), Some("King Kong (1933)"));
        assert_eq!(film.test_id(), Some("row-0"));
    }
}
