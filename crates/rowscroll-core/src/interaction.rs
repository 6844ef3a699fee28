//! View state and the interaction reducer.
//!
//! All hover, drag, expansion, preview and mute state lives in one
//! [`ViewState`], changed only by [`apply`] (or [`State::update`], which also
//! returns side effects). Rendering reads the derived functions
//! ([`ViewState::show_overlay`], [`ViewState::row_height`], ...).
//!
//! Invariants, upheld by every transition:
//!
//! - at most one row is expanded;
//! - a preview row is set only while that same row is hovered and not
//!   expanded.
//!
//! ```
//! use rowscroll_core::{apply, Interaction, ViewState};
//!
//! let state = apply(ViewState::default(), Interaction::Enter(1));
//! assert_eq!(state.preview(), Some(1));
//!
//! let state = apply(state, Interaction::Click(1));
//! assert_eq!(state.expanded(), Some(1));
//! assert_eq!(state.preview(), None);
//! ```

use crate::dataset::{Dataset, Row};
use crate::geometry::Point;
use crate::state::{Command, State};
use serde::{Deserialize, Serialize};

/// Interactions the view state reacts to. Row indices come from iterating
/// the dataset, so they are always in range.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Interaction {
    /// Pointer entered row `i`
    Enter(usize),
    /// Pointer moved (viewport coordinates)
    Move(Point),
    /// Pointer left row `i`
    Leave(usize),
    /// Button pressed over row `i`
    PointerDown(usize),
    /// Button released anywhere in the document
    PointerUpGlobal,
    /// Row `i` clicked
    Click(usize),
    /// Touch began on row `i`
    TouchStart(usize),
    /// Touch on row `i` ended
    TouchEnd(usize),
    /// Flip the preview sound
    ToggleMute,
    /// An outbound link was activated; never reaches the row toggle
    ActivateLink(String),
}

/// Interaction-derived UI state.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    hovered: Option<usize>,
    expanded: Option<usize>,
    preview: Option<usize>,
    pointer: Point,
    dragging: bool,
    muted: bool,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            hovered: None,
            expanded: None,
            preview: None,
            pointer: Point::ORIGIN,
            dragging: false,
            muted: true,
        }
    }
}

impl ViewState {
    /// Hovered row.
    #[must_use]
    pub const fn hovered(&self) -> Option<usize> {
        self.hovered
    }

    /// Expanded row.
    #[must_use]
    pub const fn expanded(&self) -> Option<usize> {
        self.expanded
    }

    /// Row shown in the hover preview.
    #[must_use]
    pub const fn preview(&self) -> Option<usize> {
        self.preview
    }

    /// Last known pointer position.
    #[must_use]
    pub const fn pointer(&self) -> Point {
        self.pointer
    }

    /// Whether a press is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        self.dragging
    }

    /// Whether preview media is muted.
    #[must_use]
    pub const fn is_muted(&self) -> bool {
        self.muted
    }

    /// Whether row `i` is the expanded row.
    #[must_use]
    pub fn is_expanded(&self, i: usize) -> bool {
        self.expanded == Some(i)
    }

    /// Whether row `i` is hovered.
    #[must_use]
    pub fn is_hovered(&self, i: usize) -> bool {
        self.hovered == Some(i)
    }

    /// Whether row `i` shows its large hover overlay.
    #[must_use]
    pub fn show_overlay(&self, i: usize) -> bool {
        self.is_hovered(i) && !self.is_expanded(i)
    }

    /// Target height of row `i` (excluding its expansion panel).
    #[must_use]
    pub fn row_height(&self, i: usize, metrics: &RowMetrics) -> f32 {
        if self.is_expanded(i) {
            metrics.expanded
        } else if self.is_hovered(i) {
            metrics.hover
        } else {
            metrics.base
        }
    }

    /// The preview row's record.
    #[must_use]
    pub fn preview_row<'a>(&self, dataset: &'a Dataset) -> Option<&'a Row> {
        self.preview.and_then(|i| dataset.get(i))
    }

    /// Whether the invariants hold.
    #[must_use]
    pub fn is_consistent(&self) -> bool {
        match self.preview {
            None => true,
            Some(p) => self.hovered == Some(p) && self.expanded != Some(p),
        }
    }
}

/// Apply one interaction. Total over the state space.
#[must_use]
pub fn apply(mut state: ViewState, interaction: Interaction) -> ViewState {
    match interaction {
        Interaction::Enter(i) => {
            state.hovered = Some(i);
            // no preview over an open panel
            state.preview = (!state.is_expanded(i)).then_some(i);
        }
        Interaction::Move(position) => state.pointer = position,
        Interaction::Leave(i) | Interaction::TouchEnd(i) => {
            if state.hovered == Some(i) {
                state.hovered = None;
                state.preview = None;
            }
        }
        Interaction::PointerDown(_) => state.dragging = true,
        Interaction::PointerUpGlobal => state.dragging = false,
        Interaction::Click(i) => {
            if !state.dragging {
                state.expanded = if state.is_expanded(i) { None } else { Some(i) };
                state.preview = None;
            }
        }
        Interaction::TouchStart(i) => {
            state.hovered = Some(i);
            state.preview = None;
        }
        Interaction::ToggleMute => state.muted = !state.muted,
        Interaction::ActivateLink(_) => {}
    }
    state
}

impl State for ViewState {
    type Message = Interaction;

    fn update(&mut self, msg: Interaction) -> Command {
        let command = match &msg {
            Interaction::ActivateLink(url) => Command::open_url(url.clone()),
            _ => Command::None,
        };
        if !matches!(msg, Interaction::Move(_)) {
            tracing::debug!(interaction = ?msg, "view state transition");
        }
        *self = apply(std::mem::take(self), msg);
        debug_assert!(self.is_consistent(), "view state invariant violated");
        command
    }
}

/// Row heights in CSS pixels. Expected order: base < expanded < hover.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RowMetrics {
    /// Resting height
    pub base: f32,
    /// Height while hovered
    pub hover: f32,
    /// Height while expanded (panel excluded)
    pub expanded: f32,
}

impl Default for RowMetrics {
    fn default() -> Self {
        Self {
            base: 56.0,
            hover: 112.0,
            expanded: 72.0,
        }
    }
}

impl RowMetrics {
    /// Whether `0 < base < expanded < hover`.
    #[must_use]
    pub fn is_ordered(&self) -> bool {
        0.0 < self.base && self.base < self.expanded && self.expanded < self.hover
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(interactions: impl IntoIterator<Item = Interaction>) -> ViewState {
        interactions.into_iter().fold(ViewState::default(), apply)
    }

    #[test]
    fn test_defaults() {
        let state = ViewState::default();
        assert_eq!(state.hovered(), None);
        assert_eq!(state.expanded(), None);
        assert_eq!(state.preview(), None);
        assert!(!state.is_dragging());
        assert!(state.is_muted());
    }

    #[test]
    fn test_enter_sets_hover_and_preview() {
        let state = run([Interaction::Enter(2)]);
        assert_eq!(state.hovered(), Some(2));
        assert_eq!(state.preview(), Some(2));
        assert!(state.show_overlay(2));
    }

    #[test]
    fn test_enter_leave_clears_preview() {
        let state = run([Interaction::Enter(1), Interaction::Leave(1)]);
        assert_eq!(state.hovered(), None);
        assert_eq!(state.preview(), None);
    }

    #[test]
    fn test_leave_of_other_row_is_ignored() {
        let state = run([Interaction::Enter(1), Interaction::Leave(0)]);
        assert_eq!(state.hovered(), Some(1));
        assert_eq!(state.preview(), Some(1));
    }

    #[test]
    fn test_move_only_updates_pointer() {
        let before = run([Interaction::Enter(1)]);
        let after = apply(before.clone(), Interaction::Move(Point::new(4.0, 5.0)));
        assert_eq!(after.pointer(), Point::new(4.0, 5.0));
        assert_eq!(after.hovered(), before.hovered());
        assert_eq!(after.preview(), before.preview());
    }

    #[test]
    fn test_click_toggles_and_clears_preview() {
        let state = run([Interaction::Enter(1), Interaction::Click(1)]);
        assert_eq!(state.expanded(), Some(1));
        assert_eq!(state.preview(), None);
        assert!(!state.show_overlay(1));

        let state = apply(state, Interaction::Click(1));
        assert_eq!(state.expanded(), None);
        assert_eq!(state.preview(), None);
        assert!(state.show_overlay(1));
    }

    #[test]
    fn test_single_expansion() {
        let state = run([Interaction::Click(3), Interaction::Click(5)]);
        assert_eq!(state.expanded(), Some(5));
        assert!(!state.is_expanded(3));
    }

    #[test]
    fn test_drag_guard_follows_event_order() {
        // release is delivered before the click, so the click still toggles
        let state = run([
            Interaction::PointerDown(2),
            Interaction::PointerUpGlobal,
            Interaction::Click(2),
        ]);
        assert!(!state.is_dragging());
        assert_eq!(state.expanded(), Some(2));
    }

    #[test]
    fn test_click_while_dragging_is_ignored() {
        let state = run([
            Interaction::Enter(2),
            Interaction::PointerDown(2),
            Interaction::Click(2),
        ]);
        assert!(state.is_dragging());
        assert_eq!(state.expanded(), None);
        assert_eq!(state.preview(), Some(2));
    }

    #[test]
    fn test_enter_expanded_row_has_no_preview() {
        let state = run([Interaction::Click(1), Interaction::Enter(1)]);
        assert_eq!(state.hovered(), Some(1));
        assert_eq!(state.preview(), None);
    }

    #[test]
    fn test_touch_sets_hover_without_preview() {
        let state = run([Interaction::Enter(0), Interaction::TouchStart(1)]);
        assert_eq!(state.hovered(), Some(1));
        assert_eq!(state.preview(), None);
        let state = apply(state, Interaction::TouchEnd(1));
        assert_eq!(state.hovered(), None);
    }

    #[test]
    fn test_toggle_mute() {
        let state = run([Interaction::ToggleMute]);
        assert!(!state.is_muted());
        assert!(apply(state, Interaction::ToggleMute).is_muted());
    }

    #[test]
    fn test_activate_link_is_isolated() {
        let mut state = run([Interaction::Enter(1)]);
        let before = state.clone();
        let cmd = state.update(Interaction::ActivateLink("https://youtu.be/x".into()));
        assert_eq!(cmd, Command::open_url("https://youtu.be/x"));
        assert_eq!(state, before);
    }

    #[test]
    fn test_row_height() {
        let metrics = RowMetrics::default();
        let state = run([Interaction::Enter(0), Interaction::Click(1)]);
        assert_eq!(state.row_height(0, &metrics), 112.0);
        assert_eq!(state.row_height(1, &metrics), 72.0);
        assert_eq!(state.row_height(2, &metrics), 56.0);
    }

    #[test]
    fn test_expanded_height_wins_over_hover() {
        let metrics = RowMetrics::default();
        let state = run([Interaction::Enter(1), Interaction::Click(1)]);
        assert_eq!(state.row_height(1, &metrics), 72.0);
    }

    #[test]
    fn test_row_metrics_order() {
        assert!(RowMetrics::default().is_ordered());
        let bad = RowMetrics {
            base: 80.0,
            ..RowMetrics::default()
        };
        assert!(!bad.is_ordered());
    }

    #[test]
    fn test_update_returns_none_for_state_changes() {
        let mut state = ViewState::default();
        assert!(state.update(Interaction::Enter(0)).is_none());
        assert_eq!(state.hovered(), Some(0));
    }
}
