//! Stylesheet for rendered pages.

/// Asset pipeline utilities.
pub struct AssetPipeline;

impl AssetPipeline {
    /// Generate the page stylesheet.
    pub fn generate_css() -> String {
        DEFAULT_CSS.to_string()
    }

    /// Page stylesheet, minified when requested.
    ///
    /// Falls back to the unminified sheet if minification fails.
    pub fn stylesheet(minify: bool) -> String {
        let css = Self::generate_css();
        if !minify {
            return css;
        }
        match Self::minify_css(&css) {
            Ok(minified) => minified,
            Err(e) => {
                tracing::warn!("Failed to minify stylesheet: {}", e);
                css
            }
        }
    }

    /// Minify CSS using lightningcss.
    pub fn minify_css(css: &str) -> Result<String, String> {
        use lightningcss::stylesheet::{ParserOptions, PrinterOptions, StyleSheet};

        let stylesheet = StyleSheet::parse(css, ParserOptions::default())
            .map_err(|e| format!("CSS parse error: {}", e))?;

        let minified = stylesheet
            .to_css(PrinterOptions {
                minify: true,
                ..Default::default()
            })
            .map_err(|e| format!("CSS minify error: {}", e))?;

        Ok(minified.code)
    }
}

const DEFAULT_CSS: &str = r#"/* vellum page theme */

:root {
  --content-max-width: 760px;
  --toc-width: 220px;
  --foreground: #161616;
  --background: #ffffff;
  --muted: #f4f4f4;
  --border: #e0e0e0;
  --accent: #0f62fe;
}

* {
  box-sizing: border-box;
}

body {
  margin: 0;
  font-family: system-ui, -apple-system, sans-serif;
  background: var(--background);
  color: var(--foreground);
  line-height: 1.6;
}

.site-header {
  padding: 1rem 2rem;
  border-bottom: 1px solid var(--border);
}

.site-title {
  font-weight: 600;
  color: inherit;
  text-decoration: none;
}

.main {
  display: grid;
  grid-template-columns: minmax(0, var(--content-max-width)) var(--toc-width);
  gap: 3rem;
  padding: 2rem;
}

.doc a {
  color: var(--accent);
}

.doc h2 {
  margin-top: 2.5rem;
  padding-bottom: 0.25rem;
  border-bottom: 1px solid var(--border);
}

.doc code {
  font-family: ui-monospace, SFMono-Regular, Menlo, monospace;
  font-size: 0.875em;
  background: var(--muted);
  padding: 0.1em 0.3em;
  border-radius: 3px;
}

.doc pre {
  background: var(--muted);
  padding: 1rem;
  overflow-x: auto;
  border-radius: 4px;
}

.doc pre code {
  background: none;
  padding: 0;
}

.code-block {
  margin: 1.5rem 0;
}

.code-language {
  font-size: 0.75rem;
  text-transform: uppercase;
  letter-spacing: 0.05em;
  color: #6f6f6f;
}

.toc {
  position: sticky;
  top: 2rem;
  align-self: start;
  font-size: 0.875rem;
}

.toc h2 {
  font-size: 0.75rem;
  text-transform: uppercase;
}

.toc ul {
  list-style: none;
  padding: 0;
}

.toc-level-3 {
  padding-left: 1rem;
}

@media (max-width: 900px) {
  .main {
    grid-template-columns: 1fr;
  }

  .toc {
    display: none;
  }
}
"#;
