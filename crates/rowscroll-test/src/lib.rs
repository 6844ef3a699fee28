//! Test harness for rowscroll row lists.
//!
//! Drives a [`RowList`](rowscroll_widgets::RowList) with raw events the way
//! a browser would, settles animations, and asserts on the resulting view
//! state and paint output.
//!
//! ```
//! use rowscroll_test::Harness;
//!
//! let mut harness = Harness::builtin();
//! harness.hover("row-2");
//! harness.assert_hovered(Some(2)).assert_preview(Some(2));
//!
//! harness.click("row-2");
//! harness.assert_expanded(Some(2)).assert_preview(None);
//! harness.assert_exists("[data-testid='panel-2']");
//! ```

#![allow(clippy::missing_panics_doc)]
#![allow(clippy::must_use_candidate)]
#![allow(clippy::return_self_not_must_use)]
#![allow(clippy::float_cmp)]

pub mod fixture;
mod harness;
mod selector;

pub use harness::{Harness, Snapshot};
pub use selector::{Selector, SelectorError};
