//! Test harness for rowscroll row lists.

use crate::fixture;
use crate::selector::Selector;
use rowscroll_core::{
    Command, Event, MotionPreference, MouseButton, Point, RecordingCanvas, Rect, TouchId,
    ViewState, Widget,
};
use rowscroll_widgets::{MediaSurface, RowList};
use serde::Serialize;
use std::collections::VecDeque;

const FRAME: f64 = 1.0 / 60.0;
const MAX_SETTLE_FRAMES: usize = 1200;

/// Observable state of the list at one moment.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Snapshot {
    /// View state
    pub state: ViewState,
    /// Current row heights
    pub heights: Vec<f32>,
    /// Rows whose panel is mounted
    pub mounted_panels: Vec<usize>,
    /// Preview placement, if mounted
    pub surface: Option<MediaSurface>,
}

/// Test harness for interacting with a [`RowList`].
pub struct Harness {
    /// List under test
    list: RowList,
    /// Event queue for simulation
    event_queue: VecDeque<Event>,
    /// Commands returned by the list, oldest first
    commands: Vec<Command>,
    /// Last simulated pointer position
    pointer: Point,
}

impl Harness {
    /// Create a harness around `list` with a 1280x720 viewport.
    pub fn new(list: RowList) -> Self {
        let mut harness = Self {
            list,
            event_queue: VecDeque::new(),
            commands: Vec::new(),
            pointer: Point::ORIGIN,
        };
        harness.resize(1280.0, 720.0);
        harness
    }

    /// Harness over the built-in film manifest.
    pub fn builtin() -> Self {
        Self::new(RowList::from_config(fixture::builtin_config()))
    }

    /// Set the viewport size.
    #[must_use]
    pub fn viewport(mut self, width: f32, height: f32) -> Self {
        self.resize(width, height);
        self
    }

    /// Set the motion preference.
    #[must_use]
    pub fn motion(mut self, motion: MotionPreference) -> Self {
        self.list.set_motion(motion);
        self
    }

    /// The list under test.
    pub const fn list(&self) -> &RowList {
        &self.list
    }

    /// Current view state.
    pub const fn state(&self) -> &ViewState {
        self.list.state()
    }

    /// Commands returned so far.
    pub fn commands(&self) -> &[Command] {
        &self.commands
    }

    /// Take the commands returned so far.
    pub fn take_commands(&mut self) -> Vec<Command> {
        std::mem::take(&mut self.commands)
    }

    // === Event Simulation ===

    /// Move the pointer to `position`.
    pub fn move_to(&mut self, position: Point) -> &mut Self {
        self.pointer = position;
        self.event_queue.push_back(Event::MouseMove { position });
        self.process_events();
        self
    }

    /// Move the pointer to the center of the widget matching `selector`.
    pub fn hover(&mut self, selector: &str) -> &mut Self {
        if let Some(bounds) = self.query_bounds(selector) {
            self.move_to(bounds.center());
        }
        self
    }

    /// Move the pointer off the surface.
    pub fn leave(&mut self) -> &mut Self {
        self.event_queue.push_back(Event::MouseLeave);
        self.process_events();
        self
    }

    /// Press the left button over the widget matching `selector`.
    pub fn press(&mut self, selector: &str) -> &mut Self {
        if let Some(bounds) = self.query_bounds(selector) {
            self.pointer = bounds.center();
            self.event_queue.push_back(Event::MouseDown {
                position: self.pointer,
                button: MouseButton::Left,
            });
            self.process_events();
        }
        self
    }

    /// Release the left button at the current pointer position.
    pub fn release(&mut self) -> &mut Self {
        self.event_queue.push_back(Event::MouseUp {
            position: self.pointer,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Full click (move, press, release, click) on the widget matching
    /// `selector`.
    pub fn click(&mut self, selector: &str) -> &mut Self {
        if let Some(bounds) = self.query_bounds(selector) {
            self.click_at(bounds.center());
        }
        self
    }

    /// Full click at `position`.
    pub fn click_at(&mut self, position: Point) -> &mut Self {
        self.pointer = position;
        self.event_queue.push_back(Event::MouseMove { position });
        self.event_queue.push_back(Event::MouseDown {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::MouseUp {
            position,
            button: MouseButton::Left,
        });
        self.event_queue.push_back(Event::Click {
            position,
            button: MouseButton::Left,
        });
        self.process_events();
        self
    }

    /// Click the title or panel link of the row or panel matching
    /// `selector`.
    pub fn click_link(&mut self, selector: &str) -> &mut Self {
        if let Some(link) = self.link_bounds(selector) {
            self.click_at(link.center());
        }
        self
    }

    /// Click the mute toggle.
    pub fn toggle_mute(&mut self) -> &mut Self {
        let button = self.list.header().button_bounds();
        self.click_at(button.center())
    }

    /// Start touch `id` on the widget matching `selector`.
    pub fn touch(&mut self, selector: &str, id: i32) -> &mut Self {
        if let Some(bounds) = self.query_bounds(selector) {
            self.event_queue.push_back(Event::TouchStart {
                id: TouchId(id),
                position: bounds.center(),
            });
            self.process_events();
        }
        self
    }

    /// End touch `id`.
    pub fn end_touch(&mut self, id: i32) -> &mut Self {
        self.event_queue.push_back(Event::TouchEnd {
            id: TouchId(id),
            position: self.pointer,
        });
        self.process_events();
        self
    }

    /// Cancel touch `id`.
    pub fn cancel_touch(&mut self, id: i32) -> &mut Self {
        self.event_queue.push_back(Event::TouchCancel { id: TouchId(id) });
        self.process_events();
        self
    }

    /// Resize the viewport.
    pub fn resize(&mut self, width: f32, height: f32) -> &mut Self {
        self.event_queue.push_back(Event::Resize { width, height });
        self.process_events();
        self
    }

    /// Scroll the list by `delta_y` pixels with the pointer where it is.
    pub fn scroll(&mut self, delta_y: f32) -> &mut Self {
        self.event_queue.push_back(Event::Wheel {
            position: self.pointer,
            delta_y,
        });
        self.process_events();
        self
    }

    /// Advance simulated time by `seconds`, one frame at a time.
    pub fn advance(&mut self, seconds: f64) -> &mut Self {
        let frames = (seconds / FRAME).ceil() as usize;
        for _ in 0..frames {
            self.list.tick(FRAME);
        }
        self
    }

    /// Run frames until every animation has finished.
    ///
    /// # Panics
    ///
    /// Panics if animations are still running after 20 simulated seconds.
    pub fn settle(&mut self) -> &mut Self {
        for _ in 0..MAX_SETTLE_FRAMES {
            if !self.list.tick(FRAME) {
                return self;
            }
        }
        panic!("animations still running after {MAX_SETTLE_FRAMES} frames");
    }

    // === Queries ===

    /// Widgets currently in the tree: header, rows, mounted panels and the
    /// mounted preview.
    pub fn widgets(&self) -> Vec<&dyn Widget> {
        let mut out: Vec<&dyn Widget> = vec![&self.list, self.list.header()];
        for (row, panel) in self.list.rows().iter().zip(self.list.panels()) {
            out.push(row);
            if panel.is_mounted() {
                out.push(panel);
            }
        }
        if self.list.preview().is_mounted() {
            out.push(self.list.preview());
        }
        out
    }

    /// Query for a widget matching the selector.
    pub fn query(&self, selector: &str) -> Option<&dyn Widget> {
        let sel = Selector::parse(selector).ok()?;
        self.widgets().into_iter().find(|w| sel.matches(*w))
    }

    /// Query for all widgets matching the selector.
    pub fn query_all(&self, selector: &str) -> Vec<&dyn Widget> {
        let Ok(sel) = Selector::parse(selector) else {
            return Vec::new();
        };
        self.widgets()
            .into_iter()
            .filter(|w| sel.matches(*w))
            .collect()
    }

    /// Accessible name of the widget matching the selector.
    pub fn text(&self, selector: &str) -> String {
        self.query(selector)
            .and_then(Widget::accessible_name)
            .map(str::to_string)
            .unwrap_or_default()
    }

    /// Check if a widget exists.
    pub fn exists(&self, selector: &str) -> bool {
        self.query(selector).is_some()
    }

    /// Paint the list into a recording.
    pub fn paint(&self) -> RecordingCanvas {
        let mut canvas = RecordingCanvas::new();
        self.list.paint(&mut canvas);
        canvas
    }

    /// Observable state at this moment.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            state: self.state().clone(),
            heights: self.list.rows().iter().map(|r| r.height()).collect(),
            mounted_panels: self
                .list
                .panels()
                .iter()
                .enumerate()
                .filter(|(_, p)| p.is_mounted())
                .map(|(i, _)| i)
                .collect(),
            surface: self.list.media_surface(),
        }
    }

    /// [`Self::snapshot`] as pretty JSON.
    pub fn snapshot_json(&self) -> String {
        serde_json::to_string_pretty(&self.snapshot()).unwrap_or_default()
    }

    // === Assertions ===

    /// Assert that a widget exists.
    ///
    /// # Panics
    ///
    /// Panics if the widget does not exist.
    pub fn assert_exists(&self, selector: &str) -> &Self {
        assert!(
            self.exists(selector),
            "Expected widget matching '{selector}' to exist"
        );
        self
    }

    /// Assert that a widget does not exist.
    ///
    /// # Panics
    ///
    /// Panics if the widget exists.
    pub fn assert_not_exists(&self, selector: &str) -> &Self {
        assert!(
            !self.exists(selector),
            "Expected widget matching '{selector}' to not exist"
        );
        self
    }

    /// Assert the count of matching widgets.
    ///
    /// # Panics
    ///
    /// Panics if the count does not match.
    pub fn assert_count(&self, selector: &str, expected: usize) -> &Self {
        let actual = self.query_all(selector).len();
        assert_eq!(
            actual, expected,
            "Expected {expected} widgets matching '{selector}' but found {actual}"
        );
        self
    }

    /// Assert the accessible name of a widget.
    ///
    /// # Panics
    ///
    /// Panics if the text does not match.
    pub fn assert_text(&self, selector: &str, expected: &str) -> &Self {
        let actual = self.text(selector);
        assert_eq!(
            actual, expected,
            "Expected text '{expected}' but got '{actual}' for '{selector}'"
        );
        self
    }

    /// Assert the hovered row.
    pub fn assert_hovered(&self, expected: Option<usize>) -> &Self {
        assert_eq!(self.state().hovered(), expected, "hovered row");
        self
    }

    /// Assert the expanded row.
    pub fn assert_expanded(&self, expected: Option<usize>) -> &Self {
        assert_eq!(self.state().expanded(), expected, "expanded row");
        self
    }

    /// Assert the preview row.
    pub fn assert_preview(&self, expected: Option<usize>) -> &Self {
        assert_eq!(self.state().preview(), expected, "preview row");
        self
    }

    /// Assert the mute flag.
    pub fn assert_muted(&self, expected: bool) -> &Self {
        assert_eq!(self.state().is_muted(), expected, "muted");
        self
    }

    /// Assert the drag flag.
    pub fn assert_dragging(&self, expected: bool) -> &Self {
        assert_eq!(self.state().is_dragging(), expected, "dragging");
        self
    }

    /// Assert the current height of row `index`.
    pub fn assert_row_height(&self, index: usize, expected: f32) -> &Self {
        let actual = self.list.rows()[index].height();
        assert!(
            (actual - expected).abs() < 1e-3,
            "Expected row {index} to be {expected}px tall but it is {actual}px"
        );
        self
    }

    /// Assert that the last command opened `url`.
    pub fn assert_opened(&self, url: &str) -> &Self {
        assert_eq!(
            self.commands.last(),
            Some(&Command::open_url(url)),
            "Expected '{url}' to be opened"
        );
        self
    }

    // === Internal ===

    fn process_events(&mut self) {
        while let Some(event) = self.event_queue.pop_front() {
            let command = self.list.handle(&event);
            if !command.is_none() {
                self.commands.extend(command.into_vec());
            }
        }
    }

    fn query_bounds(&self, selector: &str) -> Option<Rect> {
        self.query(selector).map(Widget::bounds)
    }

    fn link_bounds(&self, selector: &str) -> Option<Rect> {
        let sel = Selector::parse(selector).ok()?;
        let rows = self
            .list
            .rows()
            .iter()
            .find(|r| sel.matches(*r))
            .map(|r| r.link_bounds());
        rows.or_else(|| {
            self.list
                .panels()
                .iter()
                .find(|p| p.is_mounted() && sel.matches(*p))
                .map(|p| p.link_bounds())
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn harness() -> Harness {
        Harness::new(RowList::new(fixture::three_films())).motion(MotionPreference::Reduced)
    }

    #[test]
    fn test_widgets_in_tree() {
        let h = harness();
        h.assert_exists("header")
            .assert_exists("row-list")
            .assert_count("[role='listitem']", 3)
            .assert_not_exists("panel-0")
            .assert_not_exists("hover-preview");
    }

    #[test]
    fn test_hover_and_leave() {
        let mut h = harness();
        h.hover("row-1");
        h.assert_hovered(Some(1))
            .assert_preview(Some(1))
            .assert_exists("hover-preview")
            .assert_row_height(1, 112.0);
        h.leave();
        h.assert_hovered(None)
            .assert_preview(None)
            .assert_not_exists("hover-preview");
    }

    #[test]
    fn test_click_toggles_row() {
        let mut h = harness();
        h.click("row-0");
        h.assert_expanded(Some(0))
            .assert_preview(None)
            .assert_exists("[data-testid='panel-0']")
            .assert_row_height(0, 72.0);
        h.click("row-0");
        h.assert_expanded(None).assert_not_exists("panel-0");
    }

    #[test]
    fn test_press_release_click_order() {
        let mut h = harness();
        h.press("row-2");
        h.assert_dragging(true);
        h.release();
        h.assert_dragging(false);
    }

    #[test]
    fn test_click_link_opens_without_toggle() {
        let mut h = harness();
        h.hover("row-0");
        h.click_link("row-0");
        h.assert_opened("https://www.youtube.com/watch?v=MMNICLfHE3M")
            .assert_expanded(None);
    }

    #[test]
    fn test_toggle_mute() {
        let mut h = harness();
        h.toggle_mute();
        h.assert_muted(false).assert_text("header", "SOUND OFF");
    }

    #[test]
    fn test_touch() {
        let mut h = harness();
        h.touch("row-2", 1);
        h.assert_hovered(Some(2)).assert_preview(None);
        h.cancel_touch(1);
        h.assert_hovered(None);
    }

    #[test]
    fn test_end_touch_releases_row() {
        let mut h = harness();
        h.touch("row-0", 4).touch("row-1", 5);
        h.assert_hovered(Some(1));
        h.end_touch(5);
        h.assert_hovered(None);
        // touch 4 already lost its hover to touch 5
        h.end_touch(4).assert_hovered(None);
    }

    #[test]
    fn test_scroll_clamps_to_content() {
        let mut h = harness().viewport(1280.0, 200.0);
        h.move_to(Point::new(640.0, -20.0));
        h.scroll(10_000.0);
        let list = h.list();
        assert_eq!(list.scroll_offset(), list.max_scroll());
        assert_eq!(list.content_height() - list.scroll_offset(), 200.0);
        h.scroll(-10_000.0);
        assert_eq!(h.list().scroll_offset(), 0.0);
    }

    #[test]
    fn test_settle_full_motion() {
        let mut h = Harness::new(RowList::new(fixture::three_films()));
        h.hover("row-0");
        h.settle();
        h.assert_row_height(0, 112.0);
        assert_eq!(h.snapshot().surface.unwrap().opacity, 1.0);
    }

    #[test]
    fn test_snapshot_json() {
        let mut h = harness();
        h.click("row-1");
        let snapshot = h.snapshot();
        assert_eq!(snapshot.mounted_panels, vec![1]);
        let json = h.snapshot_json();
        assert!(json.contains("\"mounted_panels\""));
        assert!(json.contains("\"expanded\": 1"));
    }

    #[test]
    fn test_unknown_selector_is_noop() {
        let mut h = harness();
        h.click("row-99").hover("[data-testid=").press("");
        h.assert_expanded(None).assert_hovered(None);
        assert!(h.commands().is_empty());
    }
}
