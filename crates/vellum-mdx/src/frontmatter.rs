//! Page frontmatter exported by content modules as `_frontmatter`.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Metadata attached to a content unit by the build pipeline.
///
/// Every field is optional; a page that declares nothing serializes to `{}`.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq)]
pub struct Frontmatter {
    /// Page title
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,

    /// Page description for SEO
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,

    /// Order in navigation (lower = first)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order: Option<i32>,

    /// Custom slug override
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub slug: Option<String>,

    /// Keys we do not interpret, passed through untouched
    #[serde(flatten)]
    pub extra: BTreeMap<String, Value>,
}

impl Frontmatter {
    /// Read frontmatter from a props value.
    pub fn from_value(value: &Value) -> Result<Self, FrontmatterError> {
        if !value.is_object() {
            return Err(FrontmatterError::NotAnObject(type_name(value)));
        }
        serde_json::from_value(value.clone()).map_err(|e| FrontmatterError::Invalid(e.to_string()))
    }

    /// Frontmatter as a props value.
    pub fn to_value(&self) -> Value {
        serde_json::to_value(self).unwrap_or_else(|_| Value::Object(Default::default()))
    }

    /// Check if no metadata was declared.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.order.is_none()
            && self.slug.is_none()
            && self.extra.is_empty()
    }
}

fn type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

/// Errors that can occur when reading frontmatter.
#[derive(Debug, thiserror::Error)]
pub enum FrontmatterError {
    #[error("Frontmatter must be an object, got {0}")]
    NotAnObject(&'static str),

    #[error("Invalid frontmatter: {0}")]
    Invalid(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn empty_frontmatter_is_empty_object() {
        let fm = Frontmatter::default();

        assert!(fm.is_empty());
        assert_eq!(fm.to_value(), json!({}));
    }

    #[test]
    fn reads_known_and_extra_keys() {
        let fm = Frontmatter::from_value(&json!({
            "title": "Overview",
            "order": 2,
            "tabs": ["Overview", "Guides"]
        }))
        .unwrap();

        assert_eq!(fm.title.as_deref(), Some("Overview"));
        assert_eq!(fm.order, Some(2));
        assert_eq!(fm.extra["tabs"], json!(["Overview", "Guides"]));
    }

    #[test]
    fn rejects_non_object() {
        let result = Frontmatter::from_value(&json!("title"));

        assert!(matches!(result, Err(FrontmatterError::NotAnObject("string"))));
    }

    #[test]
    fn rejects_wrongly_typed_field() {
        let result = Frontmatter::from_value(&json!({ "order": "first" }));

        assert!(matches!(result, Err(FrontmatterError::Invalid(_))));
    }
}
