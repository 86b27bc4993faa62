//! Theme token resolution.
//!
//! A [`ThemeResolver`] is built once per generation run. It turns scale
//! references (`primary` under the `colors` scale, or the dotted
//! `colors.text.primary`) into literal values or `var(--…)` references,
//! records every custom property it hands out, and reports misses and
//! variable-name collisions as diagnostics.

use animus_config::AnimusConfig;
use animus_graph::style::format_number;
use animus_graph::{Literal, StyleValue};
use indexmap::{IndexMap, IndexSet};
use serde_json::Value;

use crate::diagnostics::StyleDiagnostic;
use crate::responsive::{ResponsiveResolver, SlotValue};

/// Scales whose numbers are written without a unit.
const UNITLESS_SCALES: &[&str] = &["fontWeights", "lineHeights", "opacities", "zIndices"];

/// Result of resolving one value.
#[derive(Debug, Clone, PartialEq)]
pub enum Resolved {
    /// A literal theme value, or the input unchanged when nothing matched.
    Value(Literal),
    /// A responsive theme value written inline, one entry per slot.
    Responsive(Vec<SlotValue>),
    /// A `var(--…)` reference; the declaration is recorded on the resolver.
    Variable(String),
}

/// A custom property declared on `:root`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CustomProperty {
    pub name: String,
    /// Dotted theme path the variable was made from.
    pub token: String,
    /// Slot → value, ascending; slot 0 is the unconditional declaration.
    pub values: Vec<(usize, String)>,
}

pub struct ThemeResolver<'a> {
    theme: &'a Value,
    config: &'a AnimusConfig,
    responsive: ResponsiveResolver<'a>,
    variables: IndexMap<String, CustomProperty>,
    used: IndexSet<String>,
    diagnostics: Vec<StyleDiagnostic>,
}

impl<'a> ThemeResolver<'a> {
    pub fn new(theme: &'a Value, config: &'a AnimusConfig) -> Self {
        Self {
            theme,
            config,
            responsive: ResponsiveResolver::new(&config.breakpoints),
            variables: IndexMap::new(),
            used: IndexSet::new(),
            diagnostics: Vec::new(),
        }
    }

    /// Resolve `value` for `property`, looking it up under `scale` when the
    /// prop has one.
    ///
    /// A path already starting with the scale name is not prefixed again.
    /// Only a dotted path that matches nothing is reported; a bare word
    /// missing from its scale is an ordinary CSS value.
    pub fn resolve(&mut self, property: &str, scale: Option<&str>, value: &Literal) -> Resolved {
        let dotted = value.as_text().filter(|text| is_token_path(text));

        for path in candidate_paths(scale, value) {
            if let Some(resolved) = self.materialize(&path) {
                return resolved;
            }
        }

        if let Some(path) = dotted {
            tracing::warn!(token = path, property, "unresolved theme token");
            self.diagnostics.push(StyleDiagnostic::TokenUnresolved {
                path: path.to_string(),
                property: property.to_string(),
            });
        }
        Resolved::Value(value.clone())
    }

    /// Declare every token in the theme as a custom property.
    pub fn declare_theme(&mut self) {
        let Some(scales) = self.theme.as_object() else {
            return;
        };
        let mut leaves = Vec::new();
        for (scale, value) in scales {
            collect_leaves(&mut leaves, vec![scale.clone()], value, true, &self.responsive);
        }
        for path in leaves {
            if let Some(found) = lookup(self.theme, &path) {
                if let Some(values) = self.slot_values(&path, found) {
                    self.declare(&path, values);
                }
            }
        }
    }

    /// Custom properties in first-declaration order.
    pub fn variables(&self) -> impl Iterator<Item = &CustomProperty> {
        self.variables.values()
    }

    /// Names of variables referenced by resolved values, in first-use order.
    pub fn used_variables(&self) -> Vec<String> {
        self.used.iter().cloned().collect()
    }

    pub fn take_diagnostics(&mut self) -> Vec<StyleDiagnostic> {
        std::mem::take(&mut self.diagnostics)
    }

    /// `:root` blocks, base first, then ascending breakpoint slots.
    pub fn root_blocks(&self) -> Vec<(usize, Vec<(&str, &str)>)> {
        let mut blocks: Vec<(usize, Vec<(&str, &str)>)> = Vec::new();
        for variable in self.variables.values() {
            for (slot, value) in &variable.values {
                let index = match blocks.iter().position(|(s, _)| s == slot) {
                    Some(index) => index,
                    None => {
                        blocks.push((*slot, Vec::new()));
                        blocks.len() - 1
                    }
                };
                blocks[index]
                    .1
                    .push((variable.name.as_str(), value.as_str()));
            }
        }
        blocks.sort_by_key(|(slot, _)| *slot);
        blocks
    }

    pub fn responsive(&self) -> &ResponsiveResolver<'a> {
        &self.responsive
    }

    fn materialize(&mut self, path: &[String]) -> Option<Resolved> {
        let found = lookup(self.theme, path)?;
        let scale = path.first()?;

        if self.config.scale_uses_variables(scale) {
            let values = self.slot_values(path, found)?;
            let name = self.declare(path, values);
            self.used.insert(name.clone());
            return Some(Resolved::Variable(format!("var({name})")));
        }

        if let Some(literal) = literal_from_json(found) {
            return Some(Resolved::Value(literal));
        }
        let responsive = self.responsive_value(path, found)?;
        let mut sink = Vec::new();
        let values = self
            .responsive
            .expand(&path.join("."), &responsive, &mut sink);
        self.diagnostics.extend(sink);
        Some(Resolved::Responsive(values))
    }

    /// Rendered declaration values per slot for a theme leaf.
    fn slot_values(&mut self, path: &[String], found: &Value) -> Option<Vec<(usize, String)>> {
        let scale = path.first()?.as_str();
        if let Some(literal) = literal_from_json(found) {
            return Some(vec![(0, render_theme_value(scale, &literal))]);
        }
        let responsive = self.responsive_value(path, found)?;
        let mut sink = Vec::new();
        let values = self
            .responsive
            .expand(&path.join("."), &responsive, &mut sink)
            .into_iter()
            .map(|v| (v.slot, render_theme_value(scale, &v.value)))
            .collect();
        self.diagnostics.extend(sink);
        Some(values)
    }

    fn responsive_value(&self, path: &[String], found: &Value) -> Option<StyleValue> {
        if path.len() < 2 {
            return None;
        }
        match found {
            Value::Array(items) => Some(StyleValue::Array(
                items.iter().map(literal_from_json).collect(),
            )),
            Value::Object(map) if is_breakpoint_map(map, &self.responsive) => {
                let mut by_label = IndexMap::new();
                for (label, value) in map {
                    by_label.insert(label.clone(), literal_from_json(value)?);
                }
                Some(StyleValue::Breakpoints(by_label))
            }
            _ => None,
        }
    }

    /// Record a custom property and return its name. A different token that
    /// lands on the same name replaces the earlier declaration.
    fn declare(&mut self, path: &[String], values: Vec<(usize, String)>) -> String {
        let name = variable_name(&self.config.prefix, path);
        let token = path.join(".");

        if let Some(existing) = self.variables.get(&name) {
            if existing.token == token {
                return name;
            }
            tracing::warn!(
                variable = %name,
                previous = %existing.token,
                current = %token,
                "custom property collision"
            );
            self.diagnostics.push(StyleDiagnostic::VariableCollision {
                variable: name.clone(),
                previous: existing.token.clone(),
                current: token.clone(),
            });
        }

        self.variables.insert(
            name.clone(),
            CustomProperty {
                name: name.clone(),
                token,
                values,
            },
        );
        name
    }
}

/// `--{prefix}-{segments joined by '-'}`, other characters replaced by `-`.
pub fn variable_name(prefix: &str, path: &[String]) -> String {
    let raw = format!("{prefix}-{}", path.join("-"));
    let sanitized: String = raw
        .chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '-' || c == '_' {
                c
            } else {
                '-'
            }
        })
        .collect();
    format!("--{sanitized}")
}

/// `colors.text.primary`: a letter first, dot-separated word segments.
fn is_token_path(text: &str) -> bool {
    text.contains('.')
        && text.starts_with(|c: char| c.is_ascii_alphabetic())
        && text.split('.').all(|segment| {
            !segment.is_empty()
                && segment
                    .chars()
                    .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
        })
}

fn is_word(text: &str) -> bool {
    !text.is_empty()
        && text
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
}

fn candidate_paths(scale: Option<&str>, value: &Literal) -> Vec<Vec<String>> {
    let owned = |parts: &[&str]| parts.iter().map(|p| p.to_string()).collect::<Vec<_>>();

    match value {
        Literal::Text(text) if is_token_path(text) => {
            let segments: Vec<&str> = text.split('.').collect();
            match scale {
                Some(scale) if segments.first() != Some(&scale) => {
                    let mut scoped = vec![scale];
                    scoped.extend(&segments);
                    vec![owned(&scoped), owned(&segments)]
                }
                _ => vec![owned(&segments)],
            }
        }
        Literal::Text(text) => match scale {
            Some(scale) if is_word(text) => vec![owned(&[scale, text.as_str()])],
            _ => Vec::new(),
        },
        Literal::Number(n) => match scale {
            Some(scale) => vec![vec![scale.to_string(), format_number(*n)]],
            None => Vec::new(),
        },
    }
}

fn lookup<'v>(theme: &'v Value, path: &[String]) -> Option<&'v Value> {
    let mut current = theme;
    for segment in path {
        current = match current {
            Value::Object(map) => map.get(segment)?,
            Value::Array(items) => items.get(segment.parse::<usize>().ok()?)?,
            _ => return None,
        };
    }
    Some(current)
}

fn literal_from_json(value: &Value) -> Option<Literal> {
    match value {
        Value::String(s) => Some(Literal::Text(s.clone())),
        Value::Number(n) => n.as_f64().map(Literal::Number),
        _ => None,
    }
}

fn is_breakpoint_map(map: &serde_json::Map<String, Value>, responsive: &ResponsiveResolver<'_>) -> bool {
    !map.is_empty()
        && map
            .keys()
            .all(|label| responsive.slot_for_label(label).is_some())
        && map.values().all(|v| literal_from_json(v).is_some())
}

fn render_theme_value(scale: &str, value: &Literal) -> String {
    match value {
        Literal::Number(n) if *n != 0.0 && !UNITLESS_SCALES.contains(&scale) => {
            format!("{}px", format_number(*n))
        }
        other => other.to_string(),
    }
}

/// Paths of every declarable token under `value`.
fn collect_leaves(
    out: &mut Vec<Vec<String>>,
    path: Vec<String>,
    value: &Value,
    top_level: bool,
    responsive: &ResponsiveResolver<'_>,
) {
    match value {
        Value::String(_) | Value::Number(_) => {
            if !top_level {
                out.push(path);
            }
        }
        Value::Array(items) if top_level => {
            for (index, item) in items.iter().enumerate() {
                let mut child = path.clone();
                child.push(index.to_string());
                collect_leaves(out, child, item, false, responsive);
            }
        }
        Value::Array(_) => out.push(path),
        Value::Object(map) if !top_level && is_breakpoint_map(map, responsive) => out.push(path),
        Value::Object(map) => {
            for (key, child_value) in map {
                let mut child = path.clone();
                child.push(key.clone());
                collect_leaves(out, child, child_value, false, responsive);
            }
        }
        _ => {}
    }
}
