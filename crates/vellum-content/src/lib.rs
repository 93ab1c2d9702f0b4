//! Content units and the module bundle that ships them.
//!
//! A content unit is a fixed markup tree exposed as a render function. The
//! [`site`] module registers every content unit, plus the layout and markup
//! helpers they depend on, in a [`ModuleRegistry`](vellum_modules::ModuleRegistry).

pub mod pages;
pub mod site;
pub mod unit;

pub use site::{bundle, load_page, Markup, INDEX_PAGE, LAYOUT, MARKUP};
pub use unit::{ContentError, ContentModule, ContentUnit, RenderProps};
