//! Page header: title and the preview sound toggle.

use rowscroll_core::{
    widget::{AccessibleRole, LayoutResult},
    BoxStyle, Canvas, Color, Constraints, CornerRadius, Event, FontWeight, Interaction,
    MouseButton, Point, Rect, Size, TextStyle, Theme, TypeId, Widget,
};
use std::any::Any;

/// Label while preview sound is off; clicking turns it on.
pub const LABEL_MUTED: &str = "SOUND ON";
/// Label while preview sound is on.
pub const LABEL_UNMUTED: &str = "SOUND OFF";

/// Header with the page title and a mute toggle button.
///
/// The button emits [`Interaction::ToggleMute`]; the header does not flip
/// its own state, the owner pushes it back with [`Header::set_muted`].
#[derive(Debug, Clone)]
pub struct Header {
    title: String,
    muted: bool,
    title_size: f32,
    label_size: f32,
    padding: f32,
    button_padding: (f32, f32),
    text_color: Color,
    button_background: Color,
    button_text: Color,
    bounds: Rect,
    button: Rect,
}

impl Default for Header {
    fn default() -> Self {
        let theme = Theme::default();
        Self {
            title: "concept for scroll row".to_string(),
            muted: true,
            title_size: 60.0,
            label_size: 14.0,
            padding: 24.0,
            button_padding: (12.0, 4.0),
            text_color: theme.text,
            button_background: theme.button_background,
            button_text: theme.button_text,
            bounds: Rect::default(),
            button: Rect::default(),
        }
    }
}

impl Header {
    /// Create a header with the given title.
    #[must_use]
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            ..Self::default()
        }
    }

    /// Apply theme colors.
    #[must_use]
    pub fn theme(mut self, theme: &Theme) -> Self {
        self.text_color = theme.text;
        self.button_background = theme.button_background;
        self.button_text = theme.button_text;
        self
    }

    /// Title text.
    #[must_use]
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Mirror the mute flag.
    pub fn set_muted(&mut self, muted: bool) {
        self.muted = muted;
    }

    /// Current button label.
    #[must_use]
    pub const fn button_label(&self) -> &'static str {
        if self.muted {
            LABEL_MUTED
        } else {
            LABEL_UNMUTED
        }
    }

    /// `aria-pressed` of the button: sound is on.
    #[must_use]
    pub const fn is_pressed(&self) -> bool {
        !self.muted
    }

    /// Button bounds after layout.
    #[must_use]
    pub const fn button_bounds(&self) -> Rect {
        self.button
    }

    fn title_style(&self) -> TextStyle {
        TextStyle::new(self.title_size, self.text_color).with_weight(FontWeight::Bold)
    }

    fn label_style(&self) -> TextStyle {
        TextStyle::new(self.label_size, self.button_text)
    }

    fn height(&self) -> f32 {
        self.padding.mul_add(2.0, self.title_style().line_height())
    }
}

impl Widget for Header {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(constraints.max_width, self.height()))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds.with_height(self.height());

        // widest label, so the button does not jump when toggled
        let style = self.label_style();
        let label_w = style
            .measure_width(LABEL_MUTED)
            .max(style.measure_width(LABEL_UNMUTED));
        let (px, py) = self.button_padding;
        let w = px.mul_add(2.0, label_w);
        let h = py.mul_add(2.0, style.line_height());
        self.button = Rect::new(
            self.bounds.right() - self.padding - w,
            self.bounds.y + self.padding,
            w,
            h,
        );

        LayoutResult {
            size: self.bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.draw_text(
            &self.title,
            Point::new(self.bounds.x + self.padding, self.bounds.y + self.padding),
            &self.title_style(),
        );

        canvas.draw_box(
            self.button,
            CornerRadius::uniform(4.0),
            &BoxStyle::fill(self.button_background),
        );
        let style = self.label_style();
        let label = self.button_label();
        let x = self.button.center().x - style.measure_width(label) / 2.0;
        canvas.draw_text(
            label,
            Point::new(x, self.button.y + self.button_padding.1),
            &style,
        );
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if let Event::Click {
            position,
            button: MouseButton::Left,
        } = event
        {
            if self.button.contains_point(position) {
                return Some(Box::new(Interaction::ToggleMute));
            }
        }
        None
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(self.button_label())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Button
    }

    fn test_id(&self) -> Option<&str> {
        Some("header")
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowscroll_core::RecordingCanvas;

    fn laid_out(muted: bool) -> Header {
        let mut header = Header::new("concept for scroll row");
        header.set_muted(muted);
        header.layout(Rect::new(0.0, 0.0, 1280.0, 720.0));
        header
    }

    #[test]
    fn test_labels_follow_mute() {
        let header = laid_out(true);
        assert_eq!(header.button_label(), "SOUND ON");
        assert!(!header.is_pressed());

        let header = laid_out(false);
        assert_eq!(header.button_label(), "SOUND OFF");
        assert!(header.is_pressed());
    }

    #[test]
    fn test_layout_height_and_button_position() {
        let header = laid_out(true);
        assert_eq!(header.bounds().height, 24.0 * 2.0 + 72.0);
        let button = header.button_bounds();
        assert!((button.right() - (1280.0 - 24.0)).abs() < 1e-3);
        assert_eq!(button.y, 24.0);
    }

    #[test]
    fn test_click_on_button_emits_toggle() {
        let mut header = laid_out(true);
        let center = header.button_bounds().center();
        let msg = header
            .event(&Event::Click {
                position: center,
                button: MouseButton::Left,
            })
            .expect("message");
        assert_eq!(
            msg.downcast_ref::<Interaction>(),
            Some(&Interaction::ToggleMute)
        );
        // state is owned elsewhere
        assert!(!header.is_pressed());
    }

    #[test]
    fn test_click_elsewhere_is_ignored() {
        let mut header = laid_out(true);
        assert!(header
            .event(&Event::Click {
                position: Point::new(10.0, 10.0),
                button: MouseButton::Left,
            })
            .is_none());
        let center = header.button_bounds().center();
        assert!(header
            .event(&Event::Click {
                position: center,
                button: MouseButton::Right,
            })
            .is_none());
    }

    #[test]
    fn test_paint_draws_title_and_label() {
        let header = laid_out(false);
        let mut canvas = RecordingCanvas::new();
        header.paint(&mut canvas);
        assert_eq!(
            canvas.texts(),
            vec!["concept for scroll row".to_string(), "SOUND OFF".to_string()]
        );
    }
}
