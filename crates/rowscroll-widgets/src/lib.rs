//! Widgets for the rowscroll film list.
//!
//! [`RowList`] composes the [`Header`], one [`FilmRow`] and
//! [`ExpansionPanel`] per dataset row, and the floating [`HoverPreview`]. It
//! turns raw [`Event`](rowscroll_core::Event)s into interactions, keeps the
//! view state, and drives every animation from [`RowList::tick`].

pub mod expansion_panel;
pub mod film_row;
pub mod header;
pub mod hover_preview;
pub mod row_list;

pub use expansion_panel::ExpansionPanel;
pub use film_row::{FilmRow, RowColumns};
pub use header::Header;
pub use hover_preview::{HoverPreview, MediaSurface};
pub use row_list::RowList;
