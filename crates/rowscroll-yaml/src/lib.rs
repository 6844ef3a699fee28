//! YAML manifest for the rowscroll film list.
//!
//! The manifest carries the rows plus optional title, theme and layout
//! sections. A built-in manifest with the default film list ships with the
//! crate.

mod error;
mod manifest;

pub use error::ParseError;
pub use manifest::{Config, LayoutConfig, Manifest, ThemeConfig, SUPPORTED_VERSION};
