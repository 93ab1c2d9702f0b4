//! Full HTML documents from rendered markup trees.

use vellum_mdx::{collect_toc, MarkupNode};

use crate::assets::AssetPipeline;
use crate::html::to_html;
use crate::layout::LayoutProps;
use crate::templates::{Context, LayoutError, TemplateEngine};

/// Settings for the document shell.
#[derive(Debug, Clone)]
pub struct DocumentOptions {
    /// Site title
    pub site_title: String,

    /// Base URL for the site
    pub base_url: String,

    /// Minify the inline stylesheet
    pub minify: bool,
}

impl Default for DocumentOptions {
    fn default() -> Self {
        Self {
            site_title: "Documentation".to_string(),
            base_url: "/".to_string(),
            minify: true,
        }
    }
}

/// Render a page tree into a complete HTML document.
///
/// `props` are the props the layout received. The title comes from their
/// frontmatter, then the first heading, then the site title.
pub fn render_document(
    root: &MarkupNode,
    props: &LayoutProps,
    options: &DocumentOptions,
) -> Result<String, LayoutError> {
    let frontmatter = props.frontmatter()?;
    let toc = collect_toc(root);

    let title = frontmatter
        .title
        .or_else(|| toc.first().map(|entry| entry.title.clone()))
        .unwrap_or_else(|| options.site_title.clone());

    let context = Context {
        title,
        site_title: options.site_title.clone(),
        description: frontmatter.description,
        content: to_html(root),
        toc,
        base_url: options.base_url.clone(),
        css: AssetPipeline::stylesheet(options.minify),
    };

    tracing::debug!("Rendering document '{}'", context.title);

    TemplateEngine::new()?.render_page("page.html", &context)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};
    use vellum_mdx::{attrs, compose, text, Attributes};

    use crate::component::ComponentMap;
    use crate::layout::MDX_LAYOUT;

    fn page() -> MarkupNode {
        compose(
            "div",
            Attributes::new(),
            vec![
                compose("h2", attrs([("id", "first")]), vec![text("First Section")]),
                compose("p", Attributes::new(), vec![text("Body")]),
            ],
        )
    }

    fn layout_props(frontmatter: Value) -> LayoutProps {
        LayoutProps {
            props: [("_frontmatter".to_string(), frontmatter)].into(),
            components: ComponentMap::new(),
            mdx_type: MDX_LAYOUT.to_string(),
        }
    }

    #[test]
    fn title_falls_back_to_first_heading() {
        let html = render_document(&page(), &layout_props(json!({})), &DocumentOptions::default())
            .unwrap();

        assert!(html.contains("<title>First Section - Documentation</title>"));
        assert!(html.contains(r##"<a href="#first">First Section</a>"##));
        assert!(html.contains("<p>Body</p>"));
    }

    #[test]
    fn frontmatter_title_wins() {
        let props = layout_props(json!({ "title": "Home", "description": "Start here" }));
        let options = DocumentOptions {
            site_title: "Server Docs".to_string(),
            minify: false,
            ..Default::default()
        };

        let html = render_document(&page(), &props, &options).unwrap();

        assert!(html.contains("<title>Home - Server Docs</title>"));
        assert!(html.contains(r#"content="Start here""#));
        assert!(html.contains("/* vellum page theme */"));
    }

    #[test]
    fn title_falls_back_to_site_title() {
        let html = render_document(
            &text("no headings"),
            &layout_props(json!({})),
            &DocumentOptions::default(),
        )
        .unwrap();

        assert!(html.contains("<title>Documentation - Documentation</title>"));
    }

    #[test]
    fn malformed_frontmatter_fails() {
        let result = render_document(
            &page(),
            &layout_props(json!(["not", "an", "object"])),
            &DocumentOptions::default(),
        );

        assert!(matches!(result, Err(LayoutError::Frontmatter(_))));
    }
}
