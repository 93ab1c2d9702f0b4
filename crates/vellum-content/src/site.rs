//! The site bundle: every module a page needs, registered under fixed keys.

use std::rc::Rc;
use std::sync::Arc;

use serde_json::Value;
use vellum_layout::{DefaultLayout, Layout};
use vellum_mdx::{compose, merge_excluding, Attributes, MarkupNode};
use vellum_modules::{ModuleKey, ModuleRegistry, RegistryError};

use crate::pages::index;
use crate::unit::{ContentError, ContentModule, MergeFn};

/// Markup helpers shared by content units.
pub const MARKUP: &str = "runtime/markup";

/// Default page layout.
pub const LAYOUT: &str = "layouts/default";

/// Landing page.
pub const INDEX_PAGE: &str = "pages/index";

/// Builds a node from a tag, attributes and children.
pub type ComposeFn = fn(&str, Attributes, Vec<MarkupNode>) -> MarkupNode;

/// Export of the markup helper module.
#[derive(Debug, Clone, Copy)]
pub struct Markup {
    pub compose: ComposeFn,
    pub merge: MergeFn,
}

impl Default for Markup {
    fn default() -> Self {
        Self {
            compose,
            merge: merge_excluding::<Value>,
        }
    }
}

/// Build the registry holding every bundled module. Nothing is initialized yet.
pub fn bundle() -> Result<ModuleRegistry, RegistryError> {
    let mut registry = ModuleRegistry::new();

    registry.register(MARKUP, |_| Ok(Markup::default()))?;
    registry.register(LAYOUT, |_| Ok(Arc::new(DefaultLayout) as Arc<dyn Layout>))?;
    registry.register(INDEX_PAGE, index::module)?;

    tracing::debug!("Bundled {} modules", registry.len());
    Ok(registry)
}

/// Resolve a content module.
pub fn load_page(
    registry: &mut ModuleRegistry,
    key: impl Into<ModuleKey>,
) -> Result<Rc<ContentModule>, ContentError> {
    Ok(registry.resolve_as::<ContentModule>(key)?)
}
