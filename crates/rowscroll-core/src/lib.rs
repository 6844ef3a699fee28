//! Core types for the rowscroll film list.
//!
//! This crate holds everything that does not need a rendering backend:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Colors: [`Color`]
//! - Input: [`Event`]
//! - The dataset: [`Dataset`], [`Row`], with media resolved to [`MediaSource`]
//! - View state: [`ViewState`] driven by [`Interaction`]s through [`apply`]
//! - Animation: [`Timing`], [`AnimatedValue`], [`Presence`], [`Transitions`]
//! - Painting: [`Widget`], [`Canvas`], [`RecordingCanvas`], [`DrawCommand`]

pub mod animation;
mod canvas;
mod color;
mod constraints;
pub mod dataset;
pub mod draw;
mod event;
mod geometry;
pub mod interaction;
pub mod media;
mod preview;
mod state;
mod theme;
pub mod widget;

pub use animation::{
    AnimatedValue, EasedValue, Easing, MotionPreference, Presence, PresencePhase, Spring,
    SpringConfig, Timing, TransitionSpec, Transitions,
};
pub use canvas::RecordingCanvas;
pub use color::{Color, ColorParseError};
pub use constraints::Constraints;
pub use dataset::{Dataset, DatasetError, Row, RowRecord};
pub use draw::{BoxStyle, DrawCommand, Shadow, StrokeStyle, Transform2D};
pub use event::{Event, MouseButton, TouchId};
pub use geometry::{CornerRadius, Point, Rect, Size};
pub use interaction::{apply, Interaction, RowMetrics, ViewState};
pub use media::{MediaElement, MediaError, MediaSource};
pub use preview::PreviewGeometry;
pub use state::{Command, State, Store};
pub use theme::Theme;
pub use widget::{
    AccessibleRole, Canvas, FontStyle, FontWeight, LayoutResult, TextStyle, TypeId, Widget,
};
