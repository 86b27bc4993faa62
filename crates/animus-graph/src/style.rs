//! Style maps as produced by the extractor.
//!
//! A [`StyleMap`] keeps declaration order. Keys are CSS properties, prop
//! aliases (`bg`, `px`), or selector strings (`&:hover`, `@media print`).
//! Only selector keys may hold a nested map; every other key holds a literal,
//! a breakpoint-keyed map or a positional array.

use std::fmt;

use indexmap::IndexMap;
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Leading characters that mark a key as a selector rather than a property.
const SELECTOR_PREFIXES: &[char] = &['&', ':', '>', '+', '~', '@', '[', '*', '.', '#'];

/// Whether a style key is a nested selector or at-rule.
///
/// Selector keys never become atomic classes and never hold plain values.
pub fn is_selector_key(key: &str) -> bool {
    key.trim_start()
        .chars()
        .next()
        .is_some_and(|c| SELECTOR_PREFIXES.contains(&c))
}

/// A single scalar style value.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum Literal {
    Number(f64),
    Text(String),
}

impl Literal {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Literal::Number(n) => Some(*n),
            Literal::Text(_) => None,
        }
    }

    pub fn as_text(&self) -> Option<&str> {
        match self {
            Literal::Text(s) => Some(s),
            Literal::Number(_) => None,
        }
    }

    fn from_json(value: &Value) -> Option<Self> {
        match value {
            Value::Number(n) => n.as_f64().map(Literal::Number),
            Value::String(s) => Some(Literal::Text(s.clone())),
            _ => None,
        }
    }
}

impl fmt::Display for Literal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Literal::Number(n) => f.write_str(&format_number(*n)),
            Literal::Text(s) => f.write_str(s),
        }
    }
}

impl From<&str> for Literal {
    fn from(value: &str) -> Self {
        Literal::Text(value.to_string())
    }
}

impl From<String> for Literal {
    fn from(value: String) -> Self {
        Literal::Text(value)
    }
}

impl From<f64> for Literal {
    fn from(value: f64) -> Self {
        Literal::Number(value)
    }
}

impl From<i32> for Literal {
    fn from(value: i32) -> Self {
        Literal::Number(f64::from(value))
    }
}

/// Render a number without a trailing `.0`.
pub fn format_number(n: f64) -> String {
    if n.fract() == 0.0 && n.abs() < 1e15 {
        format!("{}", n as i64)
    } else {
        format!("{n}")
    }
}

/// The value side of a style entry.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum StyleValue {
    Literal(Literal),
    /// Positional values: index 0 is the base, index `i` the `i`-th
    /// breakpoint. `None` is a hole and keeps every later index in place.
    Array(Vec<Option<Literal>>),
    /// Breakpoint label (`_`, `sm`, …) to value, in any key order.
    Breakpoints(IndexMap<String, Literal>),
    /// Body of a selector key.
    Nested(StyleMap),
}

impl StyleValue {
    pub fn is_responsive(&self) -> bool {
        matches!(self, StyleValue::Array(_) | StyleValue::Breakpoints(_))
    }

    fn from_json(key: &str, value: &Value) -> Result<Self, String> {
        if is_selector_key(key) {
            return match value {
                Value::Object(body) => StyleMap::from_json_map(body).map(StyleValue::Nested),
                _ => Err(format!("selector `{key}` must map to a style object")),
            };
        }

        match value {
            Value::Number(_) | Value::String(_) => Literal::from_json(value)
                .map(StyleValue::Literal)
                .ok_or_else(|| format!("`{key}` has an unrepresentable number")),
            Value::Array(items) => items
                .iter()
                .map(|item| match item {
                    Value::Null => Ok(None),
                    other => Literal::from_json(other).map(Some).ok_or_else(|| {
                        format!("`{key}` array entries must be strings, numbers or null")
                    }),
                })
                .collect::<Result<Vec<_>, _>>()
                .map(StyleValue::Array),
            Value::Object(map) => {
                let mut values = IndexMap::with_capacity(map.len());
                for (breakpoint, item) in map {
                    if item.is_null() {
                        continue;
                    }
                    let literal = Literal::from_json(item).ok_or_else(|| {
                        format!("`{key}.{breakpoint}` must be a string or a number")
                    })?;
                    values.insert(breakpoint.clone(), literal);
                }
                Ok(StyleValue::Breakpoints(values))
            }
            Value::Null | Value::Bool(_) => {
                Err(format!("`{key}` must be a string, number, array or object"))
            }
        }
    }
}

impl From<Literal> for StyleValue {
    fn from(value: Literal) -> Self {
        StyleValue::Literal(value)
    }
}

impl From<&str> for StyleValue {
    fn from(value: &str) -> Self {
        StyleValue::Literal(value.into())
    }
}

impl From<i32> for StyleValue {
    fn from(value: i32) -> Self {
        StyleValue::Literal(value.into())
    }
}

impl From<f64> for StyleValue {
    fn from(value: f64) -> Self {
        StyleValue::Literal(value.into())
    }
}

impl From<StyleMap> for StyleValue {
    fn from(value: StyleMap) -> Self {
        StyleValue::Nested(value)
    }
}

/// Ordered mapping from property/selector to value.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct StyleMap(IndexMap<String, StyleValue>);

impl StyleMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    pub fn with(mut self, key: impl Into<String>, value: impl Into<StyleValue>) -> Self {
        self.insert(key, value);
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<StyleValue>) {
        self.0.insert(key.into(), value.into());
    }

    pub fn get(&self, key: &str) -> Option<&StyleValue> {
        self.0.get(key)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &StyleValue)> {
        self.0.iter()
    }

    pub fn keys(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Overlay `child` on top of `self`.
    ///
    /// Top-level keys from `child` replace ours. When both sides hold a
    /// selector body the bodies are merged one level deep: the child's body
    /// keys replace ours and anything nested further is replaced wholesale.
    pub fn overlay(&self, child: &StyleMap) -> StyleMap {
        let mut merged = self.clone();
        for (key, value) in child.iter() {
            let next = match (merged.0.get(key), value) {
                (Some(StyleValue::Nested(ours)), StyleValue::Nested(theirs)) => {
                    let mut body = ours.0.clone();
                    for (inner_key, inner_value) in theirs.iter() {
                        body.insert(inner_key.clone(), inner_value.clone());
                    }
                    StyleValue::Nested(StyleMap(body))
                }
                _ => value.clone(),
            };
            merged.0.insert(key.clone(), next);
        }
        merged
    }

    /// Parse an extractor-produced JSON object.
    pub fn from_json(value: &Value) -> Result<Self, String> {
        match value {
            Value::Object(map) => Self::from_json_map(map),
            Value::Null => Ok(Self::default()),
            _ => Err("style map must be an object".to_string()),
        }
    }

    fn from_json_map(map: &serde_json::Map<String, Value>) -> Result<Self, String> {
        let mut styles = IndexMap::with_capacity(map.len());
        for (key, value) in map {
            styles.insert(key.clone(), StyleValue::from_json(key, value)?);
        }
        Ok(Self(styles))
    }
}

impl<'de> Deserialize<'de> for StyleMap {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        StyleMap::from_json(&value).map_err(de::Error::custom)
    }
}

impl FromIterator<(String, StyleValue)> for StyleMap {
    fn from_iter<T: IntoIterator<Item = (String, StyleValue)>>(iter: T) -> Self {
        Self(iter.into_iter().collect())
    }
}

impl<'a> IntoIterator for &'a StyleMap {
    type Item = (&'a String, &'a StyleValue);
    type IntoIter = indexmap::map::Iter<'a, String, StyleValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn selector_keys_are_detected() {
        assert!(is_selector_key("&:hover"));
        assert!(is_selector_key(":focus-visible"));
        assert!(is_selector_key("> span"));
        assert!(is_selector_key("@media print"));
        assert!(!is_selector_key("backgroundColor"));
        assert!(!is_selector_key("bg"));
    }

    #[test]
    fn parses_all_value_shapes() {
        let styles = StyleMap::from_json(&json!({
            "color": "red",
            "p": [1, null, 3],
            "m": { "sm": 2, "_": 1 },
            "&:hover": { "color": "blue" }
        }))
        .unwrap();

        assert_eq!(styles.get("color"), Some(&StyleValue::from("red")));
        assert_eq!(
            styles.get("p"),
            Some(&StyleValue::Array(vec![
                Some(Literal::Number(1.0)),
                None,
                Some(Literal::Number(3.0)),
            ]))
        );
        match styles.get("m") {
            Some(StyleValue::Breakpoints(map)) => {
                assert_eq!(map.keys().collect::<Vec<_>>(), vec!["sm", "_"]);
            }
            other => panic!("unexpected value: {other:?}"),
        }
        assert!(matches!(styles.get("&:hover"), Some(StyleValue::Nested(_))));
    }

    #[test]
    fn property_objects_are_breakpoint_maps_not_selectors() {
        let styles = StyleMap::from_json(&json!({ "color": { "_": "red" } })).unwrap();
        assert!(matches!(styles.get("color"), Some(StyleValue::Breakpoints(_))));
    }

    #[test]
    fn rejects_scalar_selector_body() {
        assert!(StyleMap::from_json(&json!({ "&:hover": "red" })).is_err());
        assert!(StyleMap::from_json(&json!({ "color": true })).is_err());
    }

    #[test]
    fn overlay_replaces_top_level_and_merges_selector_bodies() {
        let parent = StyleMap::new()
            .with("color", "red")
            .with("padding", 4)
            .with(
                "&:hover",
                StyleMap::new().with("color", "blue").with("opacity", "0.5"),
            );
        let child = StyleMap::new()
            .with("color", "green")
            .with("&:hover", StyleMap::new().with("color", "black"));

        let merged = parent.overlay(&child);
        assert_eq!(merged.get("color"), Some(&StyleValue::from("green")));
        assert_eq!(merged.get("padding"), Some(&StyleValue::from(4)));

        let Some(StyleValue::Nested(hover)) = merged.get("&:hover") else {
            panic!("hover body missing");
        };
        assert_eq!(hover.get("color"), Some(&StyleValue::from("black")));
        assert_eq!(hover.get("opacity"), Some(&StyleValue::from("0.5")));
    }

    #[test]
    fn numbers_render_without_trailing_zero() {
        assert_eq!(Literal::Number(8.0).to_string(), "8");
        assert_eq!(Literal::Number(0.5).to_string(), "0.5");
        assert_eq!(Literal::Number(-2.0).to_string(), "-2");
    }
}
