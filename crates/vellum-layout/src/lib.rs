//! Layout contract and host rendering for vellum pages.
//!
//! A [`Layout`] supplies page chrome and default tag bindings; [`Component`]s
//! override how individual tags render. The rest of the crate turns a finished
//! markup tree into an HTML document.

pub mod assets;
pub mod component;
pub mod document;
pub mod html;
pub mod layout;
pub mod templates;

pub use assets::AssetPipeline;
pub use component::{
    apply_components, Component, ComponentLibrary, ComponentMap, ComponentRef, ExternalLink,
    HighlightedCode, Passthrough,
};
pub use document::{render_document, DocumentOptions};
pub use html::to_html;
pub use layout::{DefaultLayout, Layout, LayoutProps, MDX_LAYOUT};
pub use templates::{Context, LayoutError, TemplateEngine};
