//! Bundled pages.

pub mod index;
