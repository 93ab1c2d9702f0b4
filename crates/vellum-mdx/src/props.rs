//! Props and the shallow merge shared by every content unit.

use std::collections::BTreeMap;

use serde_json::Value;

/// Props passed between a content unit and its layout.
pub type Props = BTreeMap<String, Value>;

/// Shallow-merge `overrides` over `base`, skipping keys in `excluded`.
///
/// Keys of `overrides` win on collision; keys only in `base` are kept as-is,
/// including excluded ones. Values are cloned, never merged recursively.
pub fn merge_excluding<V: Clone>(
    base: &BTreeMap<String, V>,
    overrides: &BTreeMap<String, V>,
    excluded: &[&str],
) -> BTreeMap<String, V> {
    let mut merged = base.clone();
    for (key, value) in overrides {
        if excluded.contains(&key.as_str()) {
            continue;
        }
        merged.insert(key.clone(), value.clone());
    }
    merged
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn props(value: Value) -> Props {
        serde_json::from_value(value).unwrap()
    }

    #[test]
    fn override_wins_on_collision() {
        let base = props(json!({ "a": 1, "b": 2 }));
        let overrides = props(json!({ "b": 3, "c": 4 }));

        let merged = merge_excluding(&base, &overrides, &[]);

        assert_eq!(merged, props(json!({ "a": 1, "b": 3, "c": 4 })));
    }

    #[test]
    fn skips_excluded_override_keys() {
        let base = props(json!({ "components": { "code": "plain" } }));
        let overrides = props(json!({ "components": { "code": "fancy" }, "x": true }));

        let merged = merge_excluding(&base, &overrides, &["components"]);

        assert_eq!(merged["components"], json!({ "code": "plain" }));
        assert_eq!(merged["x"], json!(true));
    }

    #[test]
    fn merge_is_shallow() {
        let base = props(json!({ "meta": { "title": "A", "order": 1 } }));
        let overrides = props(json!({ "meta": { "title": "B" } }));

        let merged = merge_excluding(&base, &overrides, &[]);

        assert_eq!(merged["meta"], json!({ "title": "B" }));
    }

    #[test]
    fn works_for_non_json_values() {
        let base: BTreeMap<String, &str> = [("code".to_string(), "X")].into();
        let overrides: BTreeMap<String, &str> = [
            ("code".to_string(), "Y"),
            ("a".to_string(), "Z"),
        ]
        .into();

        let merged = merge_excluding(&base, &overrides, &[]);

        assert_eq!(merged["code"], "Y");
        assert_eq!(merged["a"], "Z");
    }
}
