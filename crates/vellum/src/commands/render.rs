//! Render the landing page.

use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use clap::ValueEnum;
use serde_json::{json, Map, Value};
use vellum_content::{bundle, load_page, RenderProps, INDEX_PAGE};
use vellum_layout::{render_document, to_html, ComponentLibrary, DocumentOptions};

use crate::config::{load_config, ConfigFile};

/// What `render` writes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Format {
    /// Complete HTML document
    Html,
    /// Page markup only
    Fragment,
    /// Markup tree as JSON
    Json,
}

/// Run the render command.
pub fn run(
    config_path: &Path,
    output: Option<PathBuf>,
    format: Format,
    overrides: &[String],
) -> Result<()> {
    let config = load_config(config_path)?;
    let props = render_props(&config.components, overrides)?;
    let rendered = render(&config, &props, format)?;

    match output {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("Failed to create {}", parent.display()))?;
            }
            fs::write(&path, &rendered)
                .with_context(|| format!("Failed to write {}", path.display()))?;
            tracing::info!("Wrote {} ({} bytes)", path.display(), rendered.len());
        }
        None => println!("{}", rendered),
    }

    Ok(())
}

/// Build render props from configured bindings, with CLI `TAG=NAME` entries on top.
fn render_props(configured: &BTreeMap<String, String>, overrides: &[String]) -> Result<Value> {
    let mut components = Map::new();

    for (tag, name) in configured {
        components.insert(tag.clone(), Value::String(name.clone()));
    }

    for entry in overrides {
        let (tag, name) = entry
            .split_once('=')
            .filter(|(tag, name)| !tag.is_empty() && !name.is_empty())
            .ok_or_else(|| anyhow!("Invalid --component '{}': expected TAG=NAME", entry))?;
        components.insert(tag.to_string(), Value::String(name.to_string()));
    }

    Ok(json!({ "components": components }))
}

/// Load the bundle and render the landing page in `format`.
fn render(config: &ConfigFile, props: &Value, format: Format) -> Result<String> {
    let mut registry = bundle()?;
    let page = load_page(&mut registry, INDEX_PAGE)?;

    let library = ComponentLibrary::with_builtins();
    let props = RenderProps::from_value(props, &library)?;
    for (tag, component) in &props.components {
        tracing::debug!("Rendering <{}> with '{}'", tag, component.name());
    }

    let root = page.unit.render(&props);

    let rendered = match format {
        Format::Html => {
            let layout_props = page.unit.layout_props(&props);
            let options = DocumentOptions {
                site_title: config.site.title.clone(),
                base_url: config.site.base_url.clone(),
                minify: config.build.minify,
            };
            render_document(&root, &layout_props, &options)?
        }
        Format::Fragment => to_html(&root),
        Format::Json => serde_json::to_string_pretty(&root)?,
    };

    Ok(rendered)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    fn no_overrides() -> Value {
        render_props(&BTreeMap::new(), &[]).unwrap()
    }

    #[test]
    fn cli_overrides_win_over_config() {
        let configured: BTreeMap<String, String> = [
            ("code".to_string(), "plain".to_string()),
            ("a".to_string(), "external-link".to_string()),
        ]
        .into();

        let props = render_props(&configured, &["code=highlight".to_string()]).unwrap();

        assert_eq!(
            props,
            json!({ "components": { "a": "external-link", "code": "highlight" } })
        );
    }

    #[test]
    fn rejects_malformed_override() {
        for bad in ["code", "=highlight", "code="] {
            assert!(render_props(&BTreeMap::new(), &[bad.to_string()]).is_err());
        }
    }

    #[test]
    fn renders_fragment() {
        let html = render(&ConfigFile::default(), &no_overrides(), Format::Fragment).unwrap();

        assert!(html.starts_with(r#"<div class="layout" data-layout="MDXLayout"><br>The server"#));
        assert!(html.contains(r#"<h2 id="running-the-ibm-fhir-server">"#));
        assert!(html.contains("<code>com.ibm.fhir</code>"));
        assert!(html.contains("&lt;artifactId&gt;fhir-model&lt;/artifactId&gt;"));
        assert!(html.ends_with("</div>"));
    }

    #[test]
    fn renders_document_with_site_title() {
        let mut config = ConfigFile::default();
        config.site.title = "IBM FHIR Server".to_string();

        let html = render(&config, &no_overrides(), Format::Html).unwrap();

        assert!(html.starts_with("<!DOCTYPE html>"));
        assert!(html.contains("<title>Running the IBM FHIR Server - IBM FHIR Server</title>"));
        assert!(html.contains("On this page"));
    }

    #[test]
    fn highlight_override_changes_code_block() {
        let props = render_props(&BTreeMap::new(), &["code=highlight".to_string()]).unwrap();

        let html = render(&ConfigFile::default(), &props, Format::Fragment).unwrap();

        assert!(html.contains(r#"<figure class="code-block" data-language="xml">"#));
    }

    #[test]
    fn renders_json_tree() {
        let json = render(&ConfigFile::default(), &no_overrides(), Format::Json).unwrap();
        let tree: Value = serde_json::from_str(&json).unwrap();

        assert_eq!(tree["kind"], "element");
        assert_eq!(tree["node"]["children"][0]["node"]["tag"], "br");
        assert_eq!(tree["node"]["children"][9]["kind"], "code_block");
        assert_eq!(tree["node"]["children"][9]["node"]["language"], "xml");
    }

    #[test]
    fn unknown_component_is_rejected() {
        let props = render_props(&BTreeMap::new(), &["code=fancy".to_string()]).unwrap();

        let err = render(&ConfigFile::default(), &props, Format::Html).unwrap_err();

        assert!(err.to_string().contains("unknown component `fancy`"));
    }

    #[test]
    fn malformed_frontmatter_prop_fails_document() {
        let props = json!({ "_frontmatter": "Home" });

        let err = render(&ConfigFile::default(), &props, Format::Html).unwrap_err();

        assert!(err.to_string().contains("Invalid frontmatter"));
    }

    #[test]
    fn writes_output_file() {
        let temp = tempdir().unwrap();
        let out = temp.path().join("dist").join("index.html");

        run(
            &temp.path().join("vellum.toml"),
            Some(out.clone()),
            Format::Html,
            &[],
        )
        .unwrap();

        let html = fs::read_to_string(out).unwrap();
        assert!(html.contains("Contributing to the IBM FHIR Server"));
    }
}
