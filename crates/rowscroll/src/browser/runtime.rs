//! Host-independent frame loop.
//!
//! [`Runtime`] owns the [`RowList`] and decides, per animation frame,
//! whether anything needs drawing. The wasm [`App`](super::App) only feeds
//! it DOM events and timestamps and applies the resulting [`Frame`].

use rowscroll_core::{
    Command, DrawCommand, Event, MotionPreference, RecordingCanvas, Size, ViewState, Widget,
};
use rowscroll_widgets::{MediaSurface, RowList};
use rowscroll_yaml::{Config, Manifest};

use super::clock::FrameClock;
use super::layer::{MediaOp, MediaPlan};
use crate::AppError;

/// Output of one drawn frame.
#[derive(Debug, Clone, PartialEq)]
pub struct Frame {
    /// Canvas draw list
    pub commands: Vec<DrawCommand>,
    /// Preview placement, if mounted
    pub surface: Option<MediaSurface>,
    /// Change to the preview's media element
    pub media: MediaOp,
}

/// Row list plus frame bookkeeping.
#[derive(Debug)]
pub struct Runtime {
    list: RowList,
    clock: FrameClock,
    plan: MediaPlan,
    dirty: bool,
    frames: u64,
}

impl Runtime {
    /// Wrap an already configured list.
    #[must_use]
    pub fn new(list: RowList) -> Self {
        Self {
            list,
            clock: FrameClock::default(),
            plan: MediaPlan::new(),
            dirty: true,
            frames: 0,
        }
    }

    /// Build from validated configuration.
    #[must_use]
    pub fn from_config(config: Config, viewport: Size, motion: MotionPreference) -> Self {
        tracing::info!(
            rows = config.dataset.len(),
            title = %config.title,
            ?motion,
            "starting row list"
        );
        let mut list = RowList::from_config(config).with_motion(motion);
        list.handle(&Event::Resize {
            width: viewport.width,
            height: viewport.height,
        });
        Self::new(list)
    }

    /// Build from a YAML manifest.
    pub fn from_manifest(
        yaml: &str,
        viewport: Size,
        motion: MotionPreference,
    ) -> Result<Self, AppError> {
        Ok(Self::from_config(Manifest::load(yaml)?, viewport, motion))
    }

    /// Build from the built-in film list.
    pub fn builtin(viewport: Size, motion: MotionPreference) -> Result<Self, AppError> {
        let config = Manifest::builtin()?.into_config()?;
        Ok(Self::from_config(config, viewport, motion))
    }

    /// Feed one input event.
    pub fn handle(&mut self, event: &Event) -> Command {
        self.dirty = true;
        self.list.handle(event)
    }

    /// Change the motion preference.
    pub fn set_motion(&mut self, motion: MotionPreference) {
        self.list.set_motion(motion);
        self.dirty = true;
    }

    /// Whether the next animation frame would draw.
    #[must_use]
    pub fn needs_frame(&self) -> bool {
        self.dirty || self.list.is_animating()
    }

    /// Advance to `timestamp_ms` and draw, or `None` when idle.
    pub fn frame(&mut self, timestamp_ms: f64) -> Option<Frame> {
        if !self.needs_frame() {
            self.clock.reset();
            return None;
        }

        let dt = self.clock.step(timestamp_ms);
        self.list.tick(dt);
        self.dirty = false;
        self.frames += 1;

        let mut canvas = RecordingCanvas::new();
        self.list.paint(&mut canvas);
        let surface = self.list.media_surface();
        let media = self
            .plan
            .next(surface.as_ref().and_then(|s| s.element.as_ref()));

        Some(Frame {
            commands: canvas.finish(),
            surface,
            media,
        })
    }

    /// Frames drawn so far.
    #[must_use]
    pub const fn frames(&self) -> u64 {
        self.frames
    }

    /// The row list.
    #[must_use]
    pub const fn list(&self) -> &RowList {
        &self.list
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        self.list.state()
    }

    /// Current view state as JSON.
    pub fn state_json(&self) -> Result<String, AppError> {
        Ok(serde_json::to_string(self.list.state())?)
    }
}

/// URLs to open for `command`, in order.
#[must_use]
pub fn urls(command: &Command) -> Vec<&str> {
    match command {
        Command::None => Vec::new(),
        Command::OpenUrl { url } => vec![url.as_str()],
        Command::Batch(commands) => commands.iter().flat_map(urls).collect(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rowscroll_core::{MediaElement, MouseButton};

    const FRAME_MS: f64 = 1000.0 / 60.0;

    fn runtime(motion: MotionPreference) -> Runtime {
        Runtime::builtin(Size::new(1280.0, 720.0), motion).unwrap()
    }

    fn run_until_idle(runtime: &mut Runtime, start_ms: f64) -> (f64, Vec<Frame>) {
        let mut t = start_ms;
        let mut frames = Vec::new();
        while let Some(frame) = runtime.frame(t) {
            frames.push(frame);
            t += FRAME_MS;
            assert!(frames.len() < 1200, "runtime never went idle");
        }
        (t, frames)
    }

    #[test]
    fn test_idle_after_first_frame() {
        let mut rt = runtime(MotionPreference::Full);
        assert!(rt.frame(0.0).is_some());
        assert!(!rt.needs_frame());
        assert!(rt.frame(16.0).is_none());
        assert_eq!(rt.frames(), 1);
    }

    #[test]
    fn test_hover_mounts_media_once() {
        let mut rt = runtime(MotionPreference::Full);
        rt.frame(0.0);
        let p = rt.list().rows()[0].bounds().center();
        rt.handle(&Event::MouseMove { position: p });

        let (_, frames) = run_until_idle(&mut rt, 100.0);
        let mounts = frames
            .iter()
            .filter(|f| matches!(f.media, MediaOp::Mount(_)))
            .count();
        assert_eq!(mounts, 1);
        let last = frames.last().unwrap();
        let surface = last.surface.as_ref().unwrap();
        assert_eq!(surface.opacity, 1.0);
        assert!(matches!(
            surface.element,
            Some(MediaElement::Frame { ref key, .. }) if key == "yt-muted"
        ));
    }

    #[test]
    fn test_leave_clears_media_after_fade() {
        let mut rt = runtime(MotionPreference::Full);
        let p = rt.list().rows()[0].bounds().center();
        rt.handle(&Event::MouseMove { position: p });
        let (t, _) = run_until_idle(&mut rt, 0.0);

        rt.handle(&Event::MouseLeave);
        let (_, frames) = run_until_idle(&mut rt, t);
        assert!(frames.first().unwrap().surface.is_some());
        let last = frames.last().unwrap();
        assert!(last.surface.is_none());
        assert!(frames.iter().any(|f| f.media == MediaOp::Clear));
    }

    #[test]
    fn test_reduced_motion_settles_in_one_frame() {
        let mut rt = runtime(MotionPreference::Reduced);
        rt.frame(0.0);
        let p = rt.list().rows()[3].bounds().center();
        rt.handle(&Event::MouseMove { position: p });
        let (_, frames) = run_until_idle(&mut rt, 10.0);
        assert_eq!(frames.len(), 1);
    }

    #[test]
    fn test_link_click_yields_url() {
        let mut rt = runtime(MotionPreference::Reduced);
        let p = rt.list().rows()[0].bounds().center();
        rt.handle(&Event::MouseMove { position: p });
        let link = rt.list().rows()[0].link_bounds().center();
        rt.handle(&Event::MouseMove { position: link });
        let cmd = rt.handle(&Event::Click {
            position: link,
            button: MouseButton::Left,
        });
        let opened = urls(&cmd);
        assert_eq!(opened.len(), 1);
        assert!(opened[0].starts_with("https://"));
        assert_eq!(rt.state().expanded(), None);
    }

    #[test]
    fn test_urls_flattens_batches() {
        let cmd = Command::Batch(vec![
            Command::open_url("https://a.example"),
            Command::None,
            Command::Batch(vec![Command::open_url("https://b.example")]),
        ]);
        assert_eq!(urls(&cmd), vec!["https://a.example", "https://b.example"]);
    }

    #[test]
    fn test_state_json() {
        let mut rt = runtime(MotionPreference::Reduced);
        let p = rt.list().rows()[1].bounds().center();
        rt.handle(&Event::MouseMove { position: p });
        let json = rt.state_json().unwrap();
        let value: serde_json::Value = serde_json::from_str(&json).unwrap();
        assert_eq!(value["hovered"], 1);
        assert_eq!(value["muted"], true);
    }

    #[test]
    fn test_motion_change_marks_dirty() {
        let mut rt = runtime(MotionPreference::Full);
        rt.frame(0.0);
        rt.set_motion(MotionPreference::Reduced);
        assert!(rt.needs_frame());
        assert_eq!(rt.list().motion(), MotionPreference::Reduced);
    }
}
