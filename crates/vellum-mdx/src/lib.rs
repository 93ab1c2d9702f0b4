//! Markup model for compiled MDX content.
//!
//! This crate provides the markup tree that content units produce, the
//! `compose` primitive that builds it, the shallow prop-merge utility shared by
//! every content unit, and page frontmatter.

pub mod codeblock;
pub mod frontmatter;
pub mod node;
pub mod props;
pub mod toc;

pub use codeblock::{CodeBlock, Language};
pub use frontmatter::{Frontmatter, FrontmatterError};
pub use node::{attrs, compose, text, Attributes, Element, MarkupNode};
pub use props::{merge_excluding, Props};
pub use toc::{collect_toc, slugify, TocEntry};
