//! Fenced code blocks and their languages.

use serde::{Serialize, Serializer};

/// Language of a fenced code block.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum Language {
    Xml,
    Html,
    Css,
    Json,
    Bash,
    JavaScript,
    TypeScript,
    Java,
    Rust,
    /// A language tag we do not classify, kept verbatim
    Other(String),
    /// No language given
    #[default]
    Unknown,
}

impl Language {
    /// Parse language from a code fence info string (`xml`, `sh title=x`).
    pub fn from_info(info: &str) -> Self {
        let lang = info.split_whitespace().next().unwrap_or("");
        match lang.to_lowercase().as_str() {
            "" => Self::Unknown,
            "xml" | "pom" => Self::Xml,
            "html" => Self::Html,
            "css" => Self::Css,
            "json" => Self::Json,
            "bash" | "sh" | "shell" => Self::Bash,
            "js" | "javascript" => Self::JavaScript,
            "ts" | "typescript" => Self::TypeScript,
            "java" => Self::Java,
            "rs" | "rust" => Self::Rust,
            other => Self::Other(other.to_string()),
        }
    }

    /// Parse language from a `className` attribute such as `language-xml`.
    ///
    /// Only the first `language-*` class counts; anything else is `Unknown`.
    pub fn from_class_name(class_name: &str) -> Self {
        class_name
            .split_whitespace()
            .find_map(|class| class.strip_prefix("language-"))
            .map(Self::from_info)
            .unwrap_or_default()
    }

    /// Canonical language tag, empty for `Unknown`.
    pub fn as_str(&self) -> &str {
        match self {
            Self::Xml => "xml",
            Self::Html => "html",
            Self::Css => "css",
            Self::Json => "json",
            Self::Bash => "bash",
            Self::JavaScript => "javascript",
            Self::TypeScript => "typescript",
            Self::Java => "java",
            Self::Rust => "rust",
            Self::Other(lang) => lang,
            Self::Unknown => "",
        }
    }

    /// The `language-*` class a renderer puts on the `code` element.
    pub fn class_name(&self) -> Option<String> {
        match self {
            Self::Unknown => None,
            lang => Some(format!("language-{}", lang.as_str())),
        }
    }
}

impl Serialize for Language {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

/// A fenced code block: `pre > code` holding only text.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CodeBlock {
    /// Language from the fence info string
    pub language: Language,

    /// Source text, including the trailing newline of the fence body
    pub text: String,
}

impl CodeBlock {
    /// Create a new code block.
    pub fn new(language: Language, text: impl Into<String>) -> Self {
        Self {
            language,
            text: text.into(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_language() {
        assert_eq!(Language::from_info("xml"), Language::Xml);
        assert_eq!(Language::from_info("sh title=run"), Language::Bash);
        assert_eq!(Language::from_info("JSON"), Language::Json);
        assert_eq!(Language::from_info(""), Language::Unknown);
        assert_eq!(
            Language::from_info("groovy"),
            Language::Other("groovy".to_string())
        );
    }

    #[test]
    fn parses_class_name() {
        assert_eq!(Language::from_class_name("language-xml"), Language::Xml);
        assert_eq!(
            Language::from_class_name("hljs language-java"),
            Language::Java
        );
        assert_eq!(Language::from_class_name("hljs"), Language::Unknown);
    }

    #[test]
    fn class_name_round_trips_for_known_languages() {
        assert_eq!(Language::Xml.class_name().as_deref(), Some("language-xml"));
        assert_eq!(Language::Unknown.class_name(), None);
    }
}
