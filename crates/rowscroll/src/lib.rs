//! rowscroll: an interactive film row list for the browser.
//!
//! Rows grow on hover, a click expands a detail panel, and a floating
//! preview plays the hovered film's media next to the pointer.
//!
//! # Browser Usage (WASM)
//!
//! ```javascript
//! import init, { App } from './rowscroll.js';
//!
//! async function main() {
//!     await init();
//!     const app = new App('canvas');
//!     console.log(app.state_json());
//! }
//! ```
//!
//! The frame loop itself is host independent and can be driven natively:
//!
//! ```
//! use rowscroll::browser::Runtime;
//! use rowscroll::{Event, MotionPreference, Size};
//!
//! let mut runtime = Runtime::builtin(Size::new(1280.0, 720.0), MotionPreference::Reduced)?;
//! let frame = runtime.frame(0.0).expect("first frame is always drawn");
//! assert!(!frame.commands.is_empty());
//!
//! runtime.handle(&Event::MouseLeave);
//! assert!(runtime.needs_frame());
//! # Ok::<(), rowscroll::AppError>(())
//! ```

#![allow(
    clippy::module_name_repetitions,
    clippy::missing_errors_doc,
    clippy::cast_precision_loss,
    clippy::must_use_candidate
)]

pub use rowscroll_core::*;
pub use rowscroll_widgets as widgets;
pub use rowscroll_yaml as yaml;

pub mod browser;
mod error;
pub mod logging;

pub use error::AppError;

#[cfg(target_arch = "wasm32")]
pub use browser::{App, Canvas2DRenderer};

pub use browser::{FrameClock, MediaOp, MediaPlan, Runtime};
