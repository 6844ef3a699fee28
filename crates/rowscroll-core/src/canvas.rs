//! Canvas implementations for rendering.

use crate::draw::{BoxStyle, DrawCommand, StrokeStyle, Transform2D};
use crate::widget::{Canvas, TextStyle};
use crate::{Color, CornerRadius, Point, Rect};

#[derive(Debug, Clone, Copy, PartialEq)]
enum Layer {
    Clip(Rect),
    Transform(Transform2D),
    Opacity(f32),
}

#[derive(Debug)]
struct Frame {
    layer: Layer,
    children: Vec<DrawCommand>,
}

/// A Canvas implementation that records draw operations as `DrawCommand`s.
///
/// Clip, transform and opacity pushes open a container; the matching pop
/// closes it, so the recording is a tree mirroring the paint structure.
/// Useful for tests (verify what was painted) and for replaying on a
/// backend.
#[derive(Debug, Default)]
pub struct RecordingCanvas {
    commands: Vec<DrawCommand>,
    open: Vec<Frame>,
}

impl RecordingCanvas {
    /// Create a new empty recording canvas.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Closed top-level commands. Containers still open are not included
    /// until popped (or [`finish`](Self::finish) is called).
    #[must_use]
    pub fn commands(&self) -> &[DrawCommand] {
        &self.commands
    }

    /// Close any open containers and take the recording.
    pub fn finish(&mut self) -> Vec<DrawCommand> {
        while !self.open.is_empty() {
            self.close();
        }
        std::mem::take(&mut self.commands)
    }

    /// Number of top-level commands.
    #[must_use]
    pub fn command_count(&self) -> usize {
        self.commands.len()
    }

    /// Check if no commands have been recorded.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.commands.is_empty() && self.open.is_empty()
    }

    /// Clear all recorded commands.
    pub fn clear(&mut self) {
        self.commands.clear();
        self.open.clear();
    }

    /// Number of containers currently open.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.open.len()
    }

    /// Product of the open opacity layers.
    #[must_use]
    pub fn current_opacity(&self) -> f32 {
        self.open
            .iter()
            .filter_map(|f| match f.layer {
                Layer::Opacity(a) => Some(a),
                _ => None,
            })
            .product()
    }

    /// Composition of the open transforms, outermost first.
    #[must_use]
    pub fn current_transform(&self) -> Transform2D {
        self.open
            .iter()
            .filter_map(|f| match f.layer {
                Layer::Transform(t) => Some(t),
                _ => None,
            })
            .rev()
            .fold(Transform2D::identity(), |acc, t| acc.then(&t))
    }

    /// All recorded text, depth-first, including open containers.
    #[must_use]
    pub fn texts(&self) -> Vec<String> {
        self.commands
            .iter()
            .chain(self.open.iter().flat_map(|f| f.children.iter()))
            .flat_map(DrawCommand::leaves)
            .filter_map(|c| c.text().map(str::to_string))
            .collect()
    }

    fn record(&mut self, command: DrawCommand) {
        match self.open.last_mut() {
            Some(frame) => frame.children.push(command),
            None => self.commands.push(command),
        }
    }

    fn open(&mut self, layer: Layer) {
        self.open.push(Frame {
            layer,
            children: Vec::new(),
        });
    }

    fn close(&mut self) {
        let Some(frame) = self.open.pop() else {
            return;
        };
        let command = match frame.layer {
            Layer::Clip(bounds) => DrawCommand::Clip {
                bounds,
                children: frame.children,
            },
            Layer::Transform(transform) => DrawCommand::Group {
                children: frame.children,
                transform,
            },
            Layer::Opacity(alpha) => DrawCommand::Opacity {
                alpha,
                children: frame.children,
            },
        };
        self.record(command);
    }
}

impl Canvas for RecordingCanvas {
    fn fill_rect(&mut self, rect: Rect, color: Color) {
        self.record(DrawCommand::filled_rect(rect, color));
    }

    fn draw_box(&mut self, rect: Rect, radius: CornerRadius, style: &BoxStyle) {
        self.record(DrawCommand::Rect {
            bounds: rect,
            radius,
            style: style.clone(),
        });
    }

    fn draw_text(&mut self, text: &str, position: Point, style: &TextStyle) {
        self.record(DrawCommand::Text {
            content: text.to_string(),
            position,
            style: style.clone(),
        });
    }

    fn draw_line(&mut self, from: Point, to: Point, color: Color, width: f32) {
        self.record(DrawCommand::line(from, to, StrokeStyle::new(color, width)));
    }

    fn push_clip(&mut self, rect: Rect) {
        self.open(Layer::Clip(rect));
    }

    fn pop_clip(&mut self) {
        self.close();
    }

    fn push_transform(&mut self, transform: Transform2D) {
        self.open(Layer::Transform(transform));
    }

    fn pop_transform(&mut self) {
        self.close();
    }

    fn push_opacity(&mut self, alpha: f32) {
        self.open(Layer::Opacity(alpha.clamp(0.0, 1.0)));
    }

    fn pop_opacity(&mut self) {
        self.close();
    }
}
