//! Atomic utility classes.
//!
//! One class per canonical `(declarations, breakpoint)` key across the
//! whole project, so two props that render the same CSS share a class and
//! two that render differently never do. Names are `{prefix}-{abbr}-{token}` with `-{breakpoint}`
//! appended off the base breakpoint, and a short key hash appended when two
//! different keys would otherwise share a name.

use animus_config::BASE_BREAKPOINT;
use animus_graph::is_selector_key;
use blake3::Hasher;
use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;

use crate::error::{CssError, Result};
use crate::render::Declaration;
use crate::values::kebab_case;

/// Short names for common CSS properties.
const ABBREVIATIONS: &[(&str, &str)] = &[
    ("align-items", "items"),
    ("align-self", "self"),
    ("background", "bg"),
    ("background-color", "bg"),
    ("border", "border"),
    ("border-color", "border-color"),
    ("border-radius", "rounded"),
    ("border-width", "border-w"),
    ("bottom", "bottom"),
    ("box-shadow", "shadow"),
    ("color", "color"),
    ("column-gap", "gap-x"),
    ("display", "d"),
    ("flex-direction", "flex-dir"),
    ("flex-wrap", "flex-wrap"),
    ("font-family", "font"),
    ("font-size", "text"),
    ("font-weight", "weight"),
    ("gap", "gap"),
    ("height", "h"),
    ("justify-content", "justify"),
    ("left", "left"),
    ("letter-spacing", "tracking"),
    ("line-height", "leading"),
    ("margin", "m"),
    ("margin-bottom", "mb"),
    ("margin-left", "ml"),
    ("margin-right", "mr"),
    ("margin-top", "mt"),
    ("max-height", "max-h"),
    ("max-width", "max-w"),
    ("min-height", "min-h"),
    ("min-width", "min-w"),
    ("opacity", "opacity"),
    ("overflow", "overflow"),
    ("padding", "p"),
    ("padding-bottom", "pb"),
    ("padding-left", "pl"),
    ("padding-right", "pr"),
    ("padding-top", "pt"),
    ("position", "pos"),
    ("right", "right"),
    ("row-gap", "gap-y"),
    ("text-align", "text-align"),
    ("top", "top"),
    ("width", "w"),
    ("z-index", "z"),
];

/// Value characters with a readable replacement; anything else that is not
/// alphanumeric, `-` or `_` is dropped.
fn substitute(c: char) -> Option<&'static str> {
    Some(match c {
        '.' => "_",
        '%' => "pct",
        '#' => "hex",
        '/' | ' ' | ',' | ':' => "-",
        '+' => "plus",
        '*' => "x",
        '=' => "eq",
        '!' => "important",
        _ => return None,
    })
}

/// A generated utility class and its rule body.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AtomicClass {
    pub class_name: String,
    pub css_properties: Vec<String>,
    /// Value as written at the usage site.
    pub value: String,
    pub breakpoint: String,
    /// Breakpoint slot, 0 for the base.
    #[serde(skip)]
    pub slot: usize,
    /// Rendered declarations.
    pub declarations: Vec<Declaration>,
    /// Prop or property that first requested the class.
    pub source_rule: String,
}

/// What a caller wants a class for.
#[derive(Debug, Clone)]
pub struct AtomicRequest<'r> {
    /// Prop alias (`bg`) when the request comes from a system prop.
    pub alias: Option<&'r str>,
    pub css_properties: Vec<String>,
    pub value: &'r str,
    pub slot: usize,
    pub breakpoint: &'r str,
    pub declarations: Vec<Declaration>,
}

/// Resolved declarations plus breakpoint; the usage-site spelling of the
/// value is not part of the key.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
struct CanonicalKey {
    declarations: Vec<Declaration>,
    breakpoint: String,
}

impl CanonicalKey {
    fn hash6(&self) -> String {
        let mut hasher = Hasher::new();
        for declaration in &self.declarations {
            hasher.update(declaration.property.as_bytes());
            hasher.update(b":");
            hasher.update(declaration.value.as_bytes());
            hasher.update(b";");
        }
        hasher.update(b"\0");
        hasher.update(self.breakpoint.as_bytes());
        hasher.finalize().to_hex()[..6].to_string()
    }
}

#[derive(Debug, Default)]
pub struct AtomicRegistry {
    prefix: String,
    classes: IndexMap<CanonicalKey, AtomicClass>,
    names: HashMap<String, CanonicalKey>,
}

impl AtomicRegistry {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
            ..Self::default()
        }
    }

    /// Class for a single CSS property and value at the base breakpoint.
    pub fn class_for(&mut self, property: &str, value: &str) -> Result<&AtomicClass> {
        let css_property = kebab_case(property);
        let declarations = vec![Declaration::new(css_property.clone(), value)];
        self.class_for_request(AtomicRequest {
            alias: None,
            css_properties: vec![css_property],
            value,
            slot: 0,
            breakpoint: BASE_BREAKPOINT,
            declarations,
        })
    }

    /// Class for a full request. Equal keys return the existing class.
    pub fn class_for_request(&mut self, request: AtomicRequest<'_>) -> Result<&AtomicClass> {
        let source = request
            .alias
            .or_else(|| request.css_properties.first().map(String::as_str))
            .unwrap_or_default()
            .to_string();
        if is_selector_key(&source) {
            return Err(CssError::SelectorNotAtomic { key: source });
        }

        let key = CanonicalKey {
            declarations: request.declarations.clone(),
            breakpoint: request.breakpoint.to_string(),
        };

        let index = match self.classes.get_index_of(&key) {
            Some(index) => index,
            None => {
                let class_name = self.unique_name(&request, &key);
                tracing::trace!(class = %class_name, "new atomic class");
                self.names.insert(class_name.clone(), key.clone());
                let class = AtomicClass {
                    class_name,
                    css_properties: request.css_properties,
                    value: request.value.to_string(),
                    breakpoint: request.breakpoint.to_string(),
                    slot: request.slot,
                    declarations: request.declarations,
                    source_rule: source,
                };
                self.classes.insert_full(key, class).0
            }
        };
        Ok(&self.classes[index])
    }

    /// Classes in creation order.
    pub fn classes(&self) -> impl Iterator<Item = &AtomicClass> {
        self.classes.values()
    }

    pub fn len(&self) -> usize {
        self.classes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.classes.is_empty()
    }

    fn unique_name(&self, request: &AtomicRequest<'_>, key: &CanonicalKey) -> String {
        let abbr = match request.alias {
            Some(alias) => kebab_case(alias),
            None => abbreviate(&request.css_properties),
        };
        let mut name = format!("{}-{}-{}", self.prefix, abbr, value_token(request.value));
        if request.breakpoint != BASE_BREAKPOINT {
            name.push('-');
            name.push_str(request.breakpoint);
        }

        match self.names.get(&name) {
            Some(existing) if existing != key => format!("{name}-{}", key.hash6()),
            _ => name,
        }
    }
}

fn abbreviate(properties: &[String]) -> String {
    let Some(first) = properties.first() else {
        return "x".to_string();
    };
    ABBREVIATIONS
        .binary_search_by_key(&first.as_str(), |(property, _)| *property)
        .map(|i| ABBREVIATIONS[i].1.to_string())
        .unwrap_or_else(|_| first.clone())
}

/// Sanitize a usage value into a class-name token.
pub fn value_token(value: &str) -> String {
    let mut token = String::with_capacity(value.len());
    for c in value.trim().chars() {
        if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
            token.push(c);
        } else if let Some(replacement) = substitute(c) {
            token.push_str(replacement);
        }
    }

    let mut collapsed = String::with_capacity(token.len());
    for c in token.chars() {
        if c == '-' && collapsed.ends_with('-') {
            continue;
        }
        collapsed.push(c);
    }
    let trimmed = collapsed.trim_end_matches('-');
    if trimmed.is_empty() {
        "empty".to_string()
    } else {
        trimmed.to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn abbreviation_table_is_sorted() {
        let keys: Vec<&str> = ABBREVIATIONS.iter().map(|(k, _)| *k).collect();
        let mut sorted = keys.clone();
        sorted.sort_unstable();
        assert_eq!(keys, sorted);
    }

    #[test]
    fn equal_pairs_share_one_class() {
        let mut registry = AtomicRegistry::new("animus");
        let first = registry.class_for("padding", "8px").unwrap().class_name.clone();
        let second = registry.class_for("padding", "8px").unwrap().class_name.clone();

        assert_eq!(first, second);
        assert_eq!(first, "animus-p-8px");
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn values_are_sanitized() {
        assert_eq!(value_token("0.5"), "0_5");
        assert_eq!(value_token("100%"), "100pct");
        assert_eq!(value_token("#fff"), "hexfff");
        assert_eq!(value_token("1px solid red"), "1px-solid-red");
        assert_eq!(value_token("calc(100% / 3)"), "calc100pct-3");
        assert_eq!(value_token("()"), "empty");
    }

    #[test]
    fn selector_keys_are_rejected() {
        let mut registry = AtomicRegistry::new("animus");
        assert!(matches!(
            registry.class_for("&:hover", "red"),
            Err(CssError::SelectorNotAtomic { .. })
        ));
        assert!(registry.is_empty());
    }

    #[test]
    fn colliding_names_get_a_hash_suffix() {
        let mut registry = AtomicRegistry::new("animus");
        let dotted = registry.class_for("opacity", "0.5").unwrap().class_name.clone();
        let underscored = registry.class_for("opacity", "0_5").unwrap().class_name.clone();

        assert_eq!(dotted, "animus-opacity-0_5");
        assert!(underscored.starts_with("animus-opacity-0_5-"));
        assert_eq!(underscored.len(), dotted.len() + 7);
    }

    #[test]
    fn same_spelling_with_different_output_gets_its_own_class() {
        let mut registry = AtomicRegistry::new("animus");
        let request = |declarations| AtomicRequest {
            alias: Some("p"),
            css_properties: vec!["padding".into()],
            value: "2",
            slot: 0,
            breakpoint: BASE_BREAKPOINT,
            declarations,
        };

        let scaled = registry
            .class_for_request(request(vec![Declaration::new("padding", "8px")]))
            .unwrap()
            .class_name
            .clone();
        let raw = registry
            .class_for_request(request(vec![Declaration::new("padding", "2px")]))
            .unwrap()
            .class_name
            .clone();

        assert_eq!(scaled, "animus-p-2");
        assert_ne!(scaled, raw);
        assert_eq!(registry.len(), 2);
    }

    #[test]
    fn different_spelling_with_same_output_shares_a_class() {
        let mut registry = AtomicRegistry::new("animus");
        let mut request = |value| {
            registry
                .class_for_request(AtomicRequest {
                    alias: Some("p"),
                    css_properties: vec!["padding".into()],
                    value,
                    slot: 0,
                    breakpoint: BASE_BREAKPOINT,
                    declarations: vec![Declaration::new("padding", "8px")],
                })
                .unwrap()
                .class_name
                .clone()
        };

        assert_eq!(request("2"), request("8px"));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn breakpoint_suffix_and_alias() {
        let mut registry = AtomicRegistry::new("animus");
        let class = registry
            .class_for_request(AtomicRequest {
                alias: Some("bg"),
                css_properties: vec!["background-color".into()],
                value: "primary",
                slot: 2,
                breakpoint: "sm",
                declarations: vec![Declaration::new("background-color", "blue")],
            })
            .unwrap();

        assert_eq!(class.class_name, "animus-bg-primary-sm");
        assert_eq!(class.source_rule, "bg");
    }
}
