//! Content units: fixed markup rendered through a layout.

use std::fmt;
use std::sync::Arc;

use serde_json::Value;
use vellum_layout::{
    apply_components, ComponentLibrary, ComponentMap, ComponentRef, Layout, LayoutProps,
    MDX_LAYOUT,
};
use vellum_mdx::{merge_excluding, Frontmatter, MarkupNode, Props};
use vellum_modules::{ModuleKey, RegistryError};

/// Prop holding tag bindings; merged separately from the other props.
const COMPONENTS: &str = "components";

/// Shallow prop merge with an exclusion list.
pub type MergeFn = fn(&Props, &Props, &[&str]) -> Props;

/// Props accepted by [`ContentUnit::render`].
#[derive(Debug, Clone, Default)]
pub struct RenderProps {
    /// Tag overrides, keyed by `tag` or `parent.tag`
    pub components: ComponentMap,

    /// Any other props; passed to the layout. `children` is accepted and ignored.
    pub props: Props,
}

impl RenderProps {
    /// Create empty props.
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the renderer for `tag`.
    pub fn with_component(mut self, tag: impl Into<String>, component: ComponentRef) -> Self {
        self.components.insert(tag.into(), component);
        self
    }

    /// Set a plain prop.
    pub fn with_prop(mut self, key: impl Into<String>, value: Value) -> Self {
        self.props.insert(key.into(), value);
        self
    }

    /// Read props from a JSON object.
    ///
    /// `components` maps tags to names in `library`. Anything that is not an
    /// object there, or names an unknown component, is rejected.
    pub fn from_value(value: &Value, library: &ComponentLibrary) -> Result<Self, ContentError> {
        let Value::Object(map) = value else {
            return Err(ContentError::InvalidConfiguration(
                "render props must be an object".to_string(),
            ));
        };

        let mut render_props = Self::new();
        for (key, value) in map {
            if key == COMPONENTS {
                render_props.components = components_from_value(value, library)?;
            } else {
                render_props.props.insert(key.clone(), value.clone());
            }
        }
        Ok(render_props)
    }
}

fn components_from_value(
    value: &Value,
    library: &ComponentLibrary,
) -> Result<ComponentMap, ContentError> {
    let entries = match value {
        Value::Null => return Ok(ComponentMap::new()),
        Value::Object(entries) => entries,
        _ => {
            return Err(ContentError::InvalidConfiguration(
                "`components` must be an object".to_string(),
            ))
        }
    };

    let mut components = ComponentMap::new();
    for (tag, name) in entries {
        let Some(name) = name.as_str() else {
            return Err(ContentError::InvalidConfiguration(format!(
                "component for `{}` must be a name",
                tag
            )));
        };
        let component = library.get(name).ok_or_else(|| {
            ContentError::InvalidConfiguration(format!(
                "unknown component `{}` for `{}` (available: {})",
                name,
                tag,
                library.names().join(", ")
            ))
        })?;
        components.insert(tag.clone(), component);
    }
    Ok(components)
}

/// A page exposed as a render function.
#[derive(Clone)]
pub struct ContentUnit {
    /// Key of the module that built this unit
    key: ModuleKey,

    /// Metadata exported as `_frontmatter`
    frontmatter: Frontmatter,

    /// Layout wrapping every render
    layout: Arc<dyn Layout>,

    /// Literal content, composed once
    nodes: Vec<MarkupNode>,

    /// Prop merge shared by all content units
    merge: MergeFn,
}

impl ContentUnit {
    /// Create a content unit.
    pub fn new(
        key: ModuleKey,
        frontmatter: Frontmatter,
        layout: Arc<dyn Layout>,
        nodes: Vec<MarkupNode>,
        merge: MergeFn,
    ) -> Self {
        Self {
            key,
            frontmatter,
            layout,
            nodes,
            merge,
        }
    }

    /// Module key this unit belongs to.
    pub fn key(&self) -> &ModuleKey {
        &self.key
    }

    /// Page frontmatter.
    pub fn frontmatter(&self) -> &Frontmatter {
        &self.frontmatter
    }

    /// Literal content before any component substitution.
    pub fn nodes(&self) -> &[MarkupNode] {
        &self.nodes
    }

    /// Props the layout receives for a render with `props`.
    pub fn layout_props(&self, props: &RenderProps) -> LayoutProps {
        let mut defaults = Props::new();
        defaults.insert("_frontmatter".to_string(), self.frontmatter.to_value());

        let merged = (self.merge)(&defaults, &props.props, &[COMPONENTS]);
        let components = merge_excluding(&self.layout.default_components(), &props.components, &[]);

        LayoutProps {
            props: merged,
            components,
            mdx_type: MDX_LAYOUT.to_string(),
        }
    }

    /// Render the page.
    pub fn render(&self, props: &RenderProps) -> MarkupNode {
        let layout_props = self.layout_props(props);

        let children = self
            .nodes
            .iter()
            .cloned()
            .map(|node| apply_components(node, &layout_props.components))
            .collect();

        self.layout.wrap(&layout_props, children)
    }

    /// Render the page from JSON props.
    pub fn render_value(
        &self,
        props: &Value,
        library: &ComponentLibrary,
    ) -> Result<MarkupNode, ContentError> {
        let props = RenderProps::from_value(props, library)?;
        Ok(self.render(&props))
    }
}

impl fmt::Debug for ContentUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ContentUnit")
            .field("key", &self.key)
            .field("frontmatter", &self.frontmatter)
            .field("layout", &self.layout.name())
            .field("nodes", &self.nodes.len())
            .finish_non_exhaustive()
    }
}

/// Export of a content module.
#[derive(Debug, Clone)]
pub struct ContentModule {
    /// Page metadata (`_frontmatter`)
    pub frontmatter: Frontmatter,

    /// The render function (`default`)
    pub unit: ContentUnit,

    /// Marks the export as a compiled MDX component
    pub is_mdx_component: bool,
}

impl ContentModule {
    /// Wrap a content unit as a module export.
    pub fn new(unit: ContentUnit) -> Self {
        Self {
            frontmatter: unit.frontmatter().clone(),
            unit,
            is_mdx_component: true,
        }
    }
}

/// Errors that can occur when loading or rendering content.
#[derive(Debug, thiserror::Error)]
pub enum ContentError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfiguration(String),

    #[error(transparent)]
    Module(#[from] RegistryError),
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;
    use vellum_layout::{DefaultLayout, HighlightedCode, Passthrough};
    use vellum_mdx::{attrs, compose, text, Attributes};

    fn unit() -> ContentUnit {
        ContentUnit::new(
            ModuleKey::from("test"),
            Frontmatter::default(),
            Arc::new(DefaultLayout),
            vec![
                compose("p", Attributes::new(), vec![text("intro")]),
                compose(
                    "pre",
                    Attributes::new(),
                    vec![compose(
                        "code",
                        attrs([("className", "language-xml")]),
                        vec![text("<a/>\n")],
                    )],
                ),
            ],
            merge_excluding::<Value>,
        )
    }

    #[test]
    fn parses_props_from_json() {
        let library = ComponentLibrary::with_builtins();

        let props = RenderProps::from_value(
            &json!({ "components": { "code": "highlight" }, "id": "main" }),
            &library,
        )
        .unwrap();

        assert_eq!(props.components["code"].name(), "highlight");
        assert_eq!(props.props["id"], json!("main"));
        assert!(!props.props.contains_key("components"));
    }

    #[test]
    fn rejects_non_object_props() {
        let library = ComponentLibrary::with_builtins();

        for value in [json!(null), json!("props"), json!([1, 2]), json!(3)] {
            let result = RenderProps::from_value(&value, &library);
            assert!(matches!(result, Err(ContentError::InvalidConfiguration(_))));
        }
    }

    #[test]
    fn rejects_malformed_components() {
        let library = ComponentLibrary::with_builtins();

        let not_object = RenderProps::from_value(&json!({ "components": ["code"] }), &library);
        let not_name = RenderProps::from_value(&json!({ "components": { "code": 1 } }), &library);
        let unknown =
            RenderProps::from_value(&json!({ "components": { "code": "fancy" } }), &library);

        assert!(matches!(not_object, Err(ContentError::InvalidConfiguration(_))));
        assert!(matches!(not_name, Err(ContentError::InvalidConfiguration(_))));
        let Err(ContentError::InvalidConfiguration(message)) = unknown else {
            panic!("expected invalid configuration");
        };
        assert!(message.contains("fancy"));
        assert!(message.contains("highlight"));
    }

    #[test]
    fn null_components_means_none() {
        let library = ComponentLibrary::with_builtins();

        let props = RenderProps::from_value(&json!({ "components": null }), &library).unwrap();

        assert!(props.components.is_empty());
    }

    #[test]
    fn caller_components_override_layout_defaults() {
        let props = RenderProps::new()
            .with_component("code", Arc::new(HighlightedCode))
            .with_component("a", Arc::new(Passthrough));

        let layout_props = unit().layout_props(&props);

        assert_eq!(layout_props.components.len(), 2);
        assert_eq!(layout_props.components["code"].name(), "highlight");
        assert_eq!(layout_props.components["a"].name(), "plain");
        assert_eq!(layout_props.mdx_type, "MDXLayout");
    }

    #[derive(Debug)]
    struct TwoBindingLayout;

    impl Layout for TwoBindingLayout {
        fn name(&self) -> &str {
            "two-binding"
        }

        fn default_components(&self) -> ComponentMap {
            let mut components = ComponentMap::new();
            components.insert("code".to_string(), Arc::new(Passthrough));
            components.insert("inlineCode".to_string(), Arc::new(Passthrough));
            components
        }

        fn wrap(&self, _props: &LayoutProps, children: Vec<MarkupNode>) -> MarkupNode {
            compose("main", Attributes::new(), children)
        }
    }

    #[test]
    fn layout_defaults_survive_unrelated_overrides() {
        let unit = ContentUnit::new(
            ModuleKey::from("two"),
            Frontmatter::default(),
            Arc::new(TwoBindingLayout),
            unit().nodes().to_vec(),
            merge_excluding::<Value>,
        );
        let props = RenderProps::new().with_component("code", Arc::new(HighlightedCode));

        let layout_props = unit.layout_props(&props);

        assert_eq!(layout_props.components.len(), 2);
        assert_eq!(layout_props.components["code"].name(), "highlight");
        assert_eq!(layout_props.components["inlineCode"].name(), "plain");
    }

    #[test]
    fn caller_props_merge_over_frontmatter() {
        let props = RenderProps::new()
            .with_prop("_frontmatter", json!({ "title": "Override" }))
            .with_prop("children", json!("ignored"));

        let layout_props = unit().layout_props(&props);

        assert_eq!(layout_props.props["_frontmatter"], json!({ "title": "Override" }));
        assert_eq!(
            layout_props.frontmatter().unwrap().title.as_deref(),
            Some("Override")
        );
    }

    #[test]
    fn frontmatter_defaults_to_empty_object() {
        let layout_props = unit().layout_props(&RenderProps::new());

        assert_eq!(layout_props.props["_frontmatter"], json!({}));
        assert!(!layout_props.props.contains_key(COMPONENTS));
    }

    #[test]
    fn render_value_matches_typed_render() {
        let library = ComponentLibrary::with_builtins();
        let unit = unit();

        let from_json = unit
            .render_value(&json!({ "components": { "code": "highlight" } }), &library)
            .unwrap();
        let typed = unit.render(&RenderProps::new().with_component("code", Arc::new(HighlightedCode)));

        assert_eq!(from_json, typed);
    }

    #[test]
    fn render_does_not_mutate_literal_content() {
        let unit = unit();
        let before = unit.nodes().to_vec();

        unit.render(&RenderProps::new().with_component("code", Arc::new(HighlightedCode)));

        assert_eq!(unit.nodes(), before.as_slice());
    }
}
