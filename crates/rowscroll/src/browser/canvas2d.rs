//! Canvas2D renderer: draws [`DrawCommand`]s to an HTML5 canvas.

use rowscroll_core::draw::{BoxStyle, DrawCommand, Shadow, StrokeStyle};
use rowscroll_core::{CornerRadius, FontStyle, Point, Rect, TextStyle, Transform2D};
use wasm_bindgen::JsCast;
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement};

const FONT_FAMILY: &str = "ui-sans-serif, system-ui, sans-serif";

/// Renderer that draws to an HTML5 Canvas 2D context.
pub struct Canvas2DRenderer {
    canvas: HtmlCanvasElement,
    ctx: CanvasRenderingContext2d,
    pixel_ratio: f64,
}

impl Canvas2DRenderer {
    /// Create a new renderer for the given canvas element.
    pub fn new(canvas: HtmlCanvasElement) -> Result<Self, String> {
        let ctx = canvas
            .get_context("2d")
            .map_err(|e| format!("Failed to get 2d context: {e:?}"))?
            .ok_or("No 2d context available")?
            .dyn_into::<CanvasRenderingContext2d>()
            .map_err(|_| "Failed to cast to CanvasRenderingContext2d")?;

        Ok(Self {
            canvas,
            ctx,
            pixel_ratio: 1.0,
        })
    }

    /// Size the backing store for a CSS size and device pixel ratio.
    pub fn resize(&mut self, width: f32, height: f32, pixel_ratio: f64) {
        self.pixel_ratio = pixel_ratio.max(1.0);
        self.canvas
            .set_width((f64::from(width) * self.pixel_ratio).round() as u32);
        self.canvas
            .set_height((f64::from(height) * self.pixel_ratio).round() as u32);
        let style = self.canvas.style();
        style.set_property("width", &format!("{width}px")).ok();
        style.set_property("height", &format!("{height}px")).ok();
    }

    /// Backing store width in device pixels.
    pub fn width(&self) -> u32 {
        self.canvas.width()
    }

    /// Backing store height in device pixels.
    pub fn height(&self) -> u32 {
        self.canvas.height()
    }

    /// Clear and draw a full frame.
    pub fn render(&self, commands: &[DrawCommand]) {
        self.ctx.set_transform(1.0, 0.0, 0.0, 1.0, 0.0, 0.0).ok();
        self.ctx.set_global_alpha(1.0);
        self.ctx.clear_rect(
            0.0,
            0.0,
            f64::from(self.canvas.width()),
            f64::from(self.canvas.height()),
        );
        self.ctx
            .scale(self.pixel_ratio, self.pixel_ratio)
            .ok();
        self.ctx.set_text_baseline("top");

        for cmd in commands {
            self.render_command(cmd);
        }
    }

    fn render_command(&self, cmd: &DrawCommand) {
        match cmd {
            DrawCommand::Rect {
                bounds,
                radius,
                style,
            } => self.draw_rect(bounds, radius, style),
            DrawCommand::Text {
                content,
                position,
                style,
            } => self.draw_text(content, position, style),
            DrawCommand::Path {
                points,
                closed,
                style,
            } => self.draw_path(points, *closed, style),
            DrawCommand::Group {
                children,
                transform,
            } => {
                self.ctx.save();
                self.apply_transform(transform);
                self.render_all(children);
                self.ctx.restore();
            }
            DrawCommand::Clip { bounds, children } => {
                self.ctx.save();
                self.ctx.begin_path();
                self.rect_path(bounds);
                self.ctx.clip();
                self.render_all(children);
                self.ctx.restore();
            }
            DrawCommand::Opacity { alpha, children } => {
                self.ctx.save();
                // globalAlpha is absolute; nested layers multiply
                self.ctx
                    .set_global_alpha(self.ctx.global_alpha() * f64::from(*alpha));
                self.render_all(children);
                self.ctx.restore();
            }
        }
    }

    fn render_all(&self, commands: &[DrawCommand]) {
        for cmd in commands {
            self.render_command(cmd);
        }
    }

    fn apply_transform(&self, transform: &Transform2D) {
        let m = transform.matrix;
        self.ctx
            .transform(
                f64::from(m[0]),
                f64::from(m[1]),
                f64::from(m[2]),
                f64::from(m[3]),
                f64::from(m[4]),
                f64::from(m[5]),
            )
            .ok();
    }

    fn rect_path(&self, bounds: &Rect) {
        self.ctx.rect(
            f64::from(bounds.x),
            f64::from(bounds.y),
            f64::from(bounds.width),
            f64::from(bounds.height),
        );
    }

    fn draw_rect(&self, bounds: &Rect, radius: &CornerRadius, style: &BoxStyle) {
        self.ctx.save();
        if let Some(shadow) = &style.shadow {
            self.set_shadow(shadow);
        }

        self.ctx.begin_path();
        if radius.is_zero() {
            self.rect_path(bounds);
        } else {
            self.rounded_rect(bounds, radius);
        }

        if let Some(fill) = style.fill {
            self.ctx.set_fill_style_str(&fill.to_css());
            self.ctx.fill();
        }

        if let Some(stroke) = &style.stroke {
            self.ctx.set_stroke_style_str(&stroke.color.to_css());
            self.ctx.set_line_width(f64::from(stroke.width));
            self.ctx.stroke();
        }
        self.ctx.restore();
    }

    fn set_shadow(&self, shadow: &Shadow) {
        self.ctx.set_shadow_color(&shadow.color.to_css());
        self.ctx.set_shadow_blur(f64::from(shadow.blur));
        self.ctx.set_shadow_offset_x(f64::from(shadow.offset_x));
        self.ctx.set_shadow_offset_y(f64::from(shadow.offset_y));
    }

    fn rounded_rect(&self, bounds: &Rect, radius: &CornerRadius) {
        let x = f64::from(bounds.x);
        let y = f64::from(bounds.y);
        let w = f64::from(bounds.width);
        let h = f64::from(bounds.height);
        let tl = f64::from(radius.top_left);
        let tr = f64::from(radius.top_right);
        let br = f64::from(radius.bottom_right);
        let bl = f64::from(radius.bottom_left);

        self.ctx.move_to(x + tl, y);
        self.ctx.line_to(x + w - tr, y);
        self.ctx.arc_to(x + w, y, x + w, y + tr, tr).ok();
        self.ctx.line_to(x + w, y + h - br);
        self.ctx.arc_to(x + w, y + h, x + w - br, y + h, br).ok();
        self.ctx.line_to(x + bl, y + h);
        self.ctx.arc_to(x, y + h, x, y + h - bl, bl).ok();
        self.ctx.line_to(x, y + tl);
        self.ctx.arc_to(x, y, x + tl, y, tl).ok();
        self.ctx.close_path();
    }

    fn draw_text(&self, content: &str, position: &Point, style: &TextStyle) {
        let slant = match style.style {
            FontStyle::Italic => "italic ",
            FontStyle::Normal => "",
        };
        self.ctx.set_font(&format!(
            "{slant}{} {}px {FONT_FAMILY}",
            style.weight.css_value(),
            style.size
        ));
        self.ctx.set_fill_style_str(&style.color.to_css());
        // line box top; center the glyphs in the 1.2em line
        let y = position.y + (style.line_height() - style.size) / 2.0;
        self.ctx
            .fill_text(content, f64::from(position.x), f64::from(y))
            .ok();
    }

    fn draw_path(&self, points: &[Point], closed: bool, style: &StrokeStyle) {
        let Some((first, rest)) = points.split_first() else {
            return;
        };

        self.ctx.begin_path();
        self.ctx.move_to(f64::from(first.x), f64::from(first.y));
        for p in rest {
            self.ctx.line_to(f64::from(p.x), f64::from(p.y));
        }
        if closed {
            self.ctx.close_path();
        }

        self.ctx.set_stroke_style_str(&style.color.to_css());
        self.ctx.set_line_width(f64::from(style.width));
        self.ctx.stroke();
    }
}
