//! The interactive film row list.
//!
//! [`RowList`] owns the [`ViewState`] store. Raw events go through
//! [`RowList::handle`], which maps them to [`Interaction`]s, dispatches them
//! and re-syncs every child widget. Animations advance in
//! [`RowList::tick`], which also re-lays out the column of rows since
//! heights change every frame while a transition runs.
//!
//! Header and rows scroll together under [`Event::Wheel`]; the offset stays
//! within `0..=content_height - viewport.height`. The preview is pinned to
//! the viewport and does not scroll.
//!
//! ```
//! use rowscroll_core::{Event, Widget};
//! use rowscroll_widgets::RowList;
//! use rowscroll_yaml::Manifest;
//!
//! let config = Manifest::builtin().unwrap().into_config().unwrap();
//! let mut list = RowList::from_config(config);
//! list.handle(&Event::Resize { width: 1280.0, height: 720.0 });
//!
//! let p = list.rows()[0].bounds().center();
//! list.handle(&Event::MouseMove { position: p });
//! assert_eq!(list.state().hovered(), Some(0));
//! assert!(list.media_surface().is_some());
//! ```

use crate::{ExpansionPanel, FilmRow, Header, HoverPreview, MediaSurface};
use rowscroll_core::{
    widget::{AccessibleRole, LayoutResult},
    Canvas, Command, Constraints, Dataset, Event, Interaction, MotionPreference, MouseButton,
    Point, PreviewGeometry, Rect, RowMetrics, Size, Store, Theme, TouchId, Transitions, TypeId,
    ViewState, Widget,
};
use rowscroll_yaml::Config;
use std::any::Any;
use std::collections::HashMap;

/// Header, rows with their expansion panels, and the hover preview.
#[derive(Debug)]
pub struct RowList {
    dataset: Dataset,
    store: Store<ViewState>,
    header: Header,
    rows: Vec<FilmRow>,
    panels: Vec<ExpansionPanel>,
    preview: HoverPreview,
    metrics: RowMetrics,
    motion: MotionPreference,
    transitions: Transitions,
    theme: Theme,
    viewport: Size,
    touches: HashMap<TouchId, usize>,
    content_height: f32,
    scroll: f32,
    bounds: Rect,
}

impl RowList {
    /// A list over `dataset` with default title, theme and geometry.
    #[must_use]
    pub fn new(dataset: Dataset) -> Self {
        let mut list = Self {
            dataset,
            store: Store::new(ViewState::default()),
            header: Header::default(),
            rows: Vec::new(),
            panels: Vec::new(),
            preview: HoverPreview::default(),
            metrics: RowMetrics::default(),
            motion: MotionPreference::Full,
            transitions: Transitions::default(),
            theme: Theme::default(),
            viewport: Size::ZERO,
            touches: HashMap::new(),
            content_height: 0.0,
            scroll: 0.0,
            bounds: Rect::default(),
        };
        list.rebuild();
        list
    }

    /// Build from a validated manifest.
    #[must_use]
    pub fn from_config(config: Config) -> Self {
        Self::new(config.dataset)
            .with_theme(config.theme)
            .with_title(config.title)
            .with_metrics(config.metrics)
            .with_preview_geometry(config.preview)
    }

    /// Set the header title.
    #[must_use]
    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.header = Header::new(title).theme(&self.theme);
        self.sync();
        self
    }

    /// Set the theme.
    #[must_use]
    pub fn with_theme(mut self, theme: Theme) -> Self {
        self.header = self.header.theme(&theme);
        self.theme = theme;
        self.rebuild();
        self
    }

    /// Set the row heights.
    #[must_use]
    pub fn with_metrics(mut self, metrics: RowMetrics) -> Self {
        self.metrics = metrics;
        self.rebuild();
        self
    }

    /// Set the preview panel geometry.
    #[must_use]
    pub fn with_preview_geometry(mut self, geometry: PreviewGeometry) -> Self {
        self.preview = HoverPreview::new(geometry);
        self.preview
            .set_timings(self.transitions.preview_enter, self.transitions.preview_exit);
        self.preview.set_viewport(self.viewport);
        self.sync();
        self
    }

    /// Set the motion preference.
    #[must_use]
    pub fn with_motion(mut self, motion: MotionPreference) -> Self {
        self.set_motion(motion);
        self
    }

    /// Change the motion preference; running transitions keep their timing.
    pub fn set_motion(&mut self, motion: MotionPreference) {
        self.motion = motion;
        self.transitions = Transitions::default().for_motion(motion);
        for panel in &mut self.panels {
            panel.set_timing(self.transitions.expansion);
        }
        self.preview
            .set_timings(self.transitions.preview_enter, self.transitions.preview_exit);
        tracing::debug!(?motion, "motion preference");
        self.sync();
    }

    /// Register a callback run after every state change.
    pub fn subscribe<F>(&mut self, callback: F)
    where
        F: Fn(&ViewState) + Send + Sync + 'static,
    {
        self.store.subscribe(callback);
    }

    /// Map a raw event to interactions and apply them.
    ///
    /// Returns the side effect the host must perform, if any.
    pub fn handle(&mut self, event: &Event) -> Command {
        let command = match event {
            Event::MouseMove { position } => {
                self.pointer_moved(*position);
                Command::None
            }
            Event::MouseLeave => {
                if let Some(i) = self.state().hovered() {
                    self.store.dispatch(Interaction::Leave(i));
                }
                Command::None
            }
            Event::MouseDown { position, .. } => {
                if let Some(i) = self.row_at(*position) {
                    self.store.dispatch(Interaction::PointerDown(i));
                }
                Command::None
            }
            Event::MouseUp { .. } => self.store.dispatch(Interaction::PointerUpGlobal),
            Event::Click {
                position,
                button: MouseButton::Left,
            } => self.click(*position),
            Event::Click { .. } => Command::None,
            Event::TouchStart { id, position } => {
                if let Some(i) = self.row_at(*position) {
                    self.touches.insert(*id, i);
                    self.store.dispatch(Interaction::TouchStart(i));
                }
                Command::None
            }
            Event::TouchEnd { id, .. } | Event::TouchCancel { id } => {
                if let Some(i) = self.touches.remove(id) {
                    self.store.dispatch(Interaction::TouchEnd(i));
                }
                Command::None
            }
            Event::Wheel { position, delta_y } => {
                self.scroll_by(*delta_y, *position);
                Command::None
            }
            Event::Resize { width, height } => {
                self.resize(Size::new(*width, *height));
                Command::None
            }
        };
        self.sync();
        command
    }

    /// Apply one interaction directly.
    pub fn dispatch(&mut self, interaction: Interaction) -> Command {
        let command = self.store.dispatch(interaction);
        self.sync();
        command
    }

    /// Advance animations by `dt` seconds. Returns whether another frame is
    /// needed.
    pub fn tick(&mut self, dt: f64) -> bool {
        for row in &mut self.rows {
            row.tick(dt);
        }
        for panel in &mut self.panels {
            panel.tick(dt);
        }
        self.preview.tick(dt);
        self.relayout();
        self.is_animating()
    }

    /// Whether any transition is running.
    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.rows.iter().any(FilmRow::is_animating)
            || self.panels.iter().any(ExpansionPanel::is_animating)
            || self.preview.is_animating()
    }

    /// Row whose hit area (row plus its open panel) contains `p`.
    #[must_use]
    pub fn row_at(&self, p: Point) -> Option<usize> {
        self.rows.iter().zip(&self.panels).position(|(row, panel)| {
            let b = row.bounds();
            Rect::new(b.x, b.y, b.width, b.height + panel.bounds().height).contains_point(&p)
        })
    }

    /// Outbound link under `p`: overlay title, compact title or panel link.
    #[must_use]
    pub fn link_at(&self, p: Point) -> Option<&str> {
        self.rows.iter().zip(&self.panels).find_map(|(row, panel)| {
            // the overlay does not take pointer events where its title misses
            row.overlay_link_at(p)
                .or_else(|| row.compact_link_at(p))
                .or_else(|| panel.link_at(p))
        })
    }

    /// Current view state.
    #[must_use]
    pub const fn state(&self) -> &ViewState {
        self.store.state()
    }

    /// Number of interactions applied so far.
    #[must_use]
    pub const fn dispatched(&self) -> u64 {
        self.store.dispatched()
    }

    /// The rows.
    #[must_use]
    pub const fn dataset(&self) -> &Dataset {
        &self.dataset
    }

    /// Header widget.
    #[must_use]
    pub const fn header(&self) -> &Header {
        &self.header
    }

    /// Row widgets, in dataset order.
    #[must_use]
    pub fn rows(&self) -> &[FilmRow] {
        &self.rows
    }

    /// Expansion panels, one per row.
    #[must_use]
    pub fn panels(&self) -> &[ExpansionPanel] {
        &self.panels
    }

    /// Preview widget.
    #[must_use]
    pub const fn preview(&self) -> &HoverPreview {
        &self.preview
    }

    /// Row heights.
    #[must_use]
    pub const fn metrics(&self) -> &RowMetrics {
        &self.metrics
    }

    /// Timings in effect.
    #[must_use]
    pub const fn transitions(&self) -> &Transitions {
        &self.transitions
    }

    /// Motion preference in effect.
    #[must_use]
    pub const fn motion(&self) -> MotionPreference {
        self.motion
    }

    /// Theme in effect.
    #[must_use]
    pub const fn theme(&self) -> &Theme {
        &self.theme
    }

    /// Viewport size.
    #[must_use]
    pub const fn viewport(&self) -> Size {
        self.viewport
    }

    /// Height of header, rows and open panels.
    #[must_use]
    pub const fn content_height(&self) -> f32 {
        self.content_height
    }

    /// How far the content is scrolled up, in pixels.
    #[must_use]
    pub const fn scroll_offset(&self) -> f32 {
        self.scroll
    }

    /// Largest scroll offset for the current content and viewport.
    #[must_use]
    pub fn max_scroll(&self) -> f32 {
        (self.content_height - self.bounds.height).max(0.0)
    }

    /// The preview panel's media placement, while mounted.
    #[must_use]
    pub fn media_surface(&self) -> Option<MediaSurface> {
        self.preview.surface()
    }

    fn rebuild(&mut self) {
        self.rows = self
            .dataset
            .iter()
            .map(|row| FilmRow::new(row.clone(), &self.metrics).theme(&self.theme))
            .collect();
        self.panels = self
            .dataset
            .iter()
            .map(|row| ExpansionPanel::new(row, self.transitions.expansion).theme(&self.theme))
            .collect();
        self.sync();
    }

    /// Push the view state into every child and lay out again.
    fn sync(&mut self) {
        let state = self.store.state();
        self.header.set_muted(state.is_muted());
        for row in &mut self.rows {
            row.sync(state, &self.metrics, &self.transitions);
        }
        for (i, panel) in self.panels.iter_mut().enumerate() {
            panel.set_open(state.is_expanded(i));
        }
        self.preview.sync(state, &self.dataset);
        self.relayout();
    }

    fn relayout(&mut self) {
        self.place();
        let clamped = self.scroll.clamp(0.0, self.max_scroll());
        if clamped != self.scroll {
            self.scroll = clamped;
            self.place();
        }
        self.preview.layout(Rect::from_size(self.viewport));
    }

    fn place(&mut self) {
        let Rect { x, y, width, .. } = self.bounds;
        let mut top = y - self.scroll;
        top += self.header.layout(Rect::new(x, top, width, 0.0)).size.height;
        for (row, panel) in self.rows.iter_mut().zip(&mut self.panels) {
            top += row.layout(Rect::new(x, top, width, 0.0)).size.height;
            top += panel.layout(Rect::new(x, top, width, 0.0)).size.height;
        }
        self.content_height = top - (y - self.scroll);
    }

    fn scroll_by(&mut self, delta_y: f32, pointer: Point) {
        let scroll = (self.scroll + delta_y).clamp(0.0, self.max_scroll());
        if scroll == self.scroll {
            return;
        }
        tracing::trace!(scroll, "scrolled");
        self.scroll = scroll;
        self.place();
        // rows moved under a still pointer
        self.pointer_moved(pointer);
    }

    fn resize(&mut self, viewport: Size) {
        tracing::debug!(width = viewport.width, height = viewport.height, "viewport resized");
        self.viewport = viewport;
        self.bounds = Rect::from_size(viewport);
    }

    fn pointer_moved(&mut self, position: Point) {
        let target = self.row_at(position);
        let hovered = self.state().hovered();
        if target != hovered {
            if let Some(old) = hovered {
                self.store.dispatch(Interaction::Leave(old));
            }
            if let Some(new) = target {
                self.store.dispatch(Interaction::Enter(new));
            }
        }
        self.store.dispatch(Interaction::Move(position));
    }

    fn click(&mut self, position: Point) -> Command {
        let click = Event::Click {
            position,
            button: MouseButton::Left,
        };
        if let Some(msg) = self.header.event(&click) {
            if let Ok(interaction) = msg.downcast::<Interaction>() {
                return self.store.dispatch(*interaction);
            }
        }
        if let Some(url) = self.link_at(position).map(str::to_string) {
            return self.store.dispatch(Interaction::ActivateLink(url));
        }
        match self.row_at(position) {
            Some(i) => self.store.dispatch(Interaction::Click(i)),
            None => Command::None,
        }
    }
}

impl Widget for RowList {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        constraints.constrain(Size::new(constraints.max_width, constraints.max_height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        self.viewport = bounds.size();
        self.relayout();
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.theme.background);
        canvas.push_clip(self.bounds);
        self.header.paint(canvas);
        for (row, panel) in self.rows.iter().zip(&self.panels) {
            row.paint(canvas);
            panel.paint(canvas);
        }
        self.preview.paint(canvas);
        canvas.pop_clip();
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        let command = self.handle(event);
        (!command.is_none()).then(|| Box::new(command) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        true
    }

    fn accessible_name(&self) -> Option<&str> {
        Some(self.header.title())
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::List
    }

    fn test_id(&self) -> Option<&str> {
        Some("row-list")
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}
