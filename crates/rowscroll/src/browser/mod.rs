//! Browser runtime for the rowscroll film list.
//!
//! Bridges the [`RowList`](rowscroll_widgets::RowList) to the DOM: a 2D
//! canvas for the list itself and a positioned element for preview media.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod app;
#[cfg(target_arch = "wasm32")]
pub mod canvas2d;
#[cfg(target_arch = "wasm32")]
pub mod events;
#[cfg(target_arch = "wasm32")]
pub mod media;

// Cross-platform modules
pub mod clock;
pub mod layer;
pub mod runtime;

#[cfg(target_arch = "wasm32")]
pub use app::App;
#[cfg(target_arch = "wasm32")]
pub use canvas2d::Canvas2DRenderer;
pub use clock::FrameClock;
pub use layer::{surface_style, MediaOp, MediaPlan};
pub use runtime::{Frame, Runtime};
