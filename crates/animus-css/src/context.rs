//! Per-run generation state and style-map compilation.
//!
//! A [`GenerationContext`] owns everything that accumulates while one
//! stylesheet is produced: the theme resolver, the atomic registry and the
//! diagnostics. Nothing is cached across runs.

use std::collections::BTreeMap;

use animus_config::AnimusConfig;
use animus_graph::{is_selector_key, Literal, PropSpec, StyleMap, StyleValue};
use serde_json::Value;

use crate::atomic::AtomicRegistry;
use crate::diagnostics::StyleDiagnostic;
use crate::groups::PropTable;
use crate::render::{Declaration, Rule};
use crate::theme::{Resolved, ThemeResolver};
use crate::values::{apply_transform, format_value, kebab_case};

pub struct GenerationContext<'a> {
    pub config: &'a AnimusConfig,
    pub theme: ThemeResolver<'a>,
    pub atomics: AtomicRegistry,
    pub diagnostics: Vec<StyleDiagnostic>,
}

/// Rules collected for one breakpoint slot, in first-seen order.
type SlotRules = BTreeMap<usize, Vec<Rule>>;

impl<'a> GenerationContext<'a> {
    pub fn new(config: &'a AnimusConfig, theme: &'a Value) -> Self {
        Self {
            config,
            theme: ThemeResolver::new(theme, config),
            atomics: AtomicRegistry::new(config.prefix.clone()),
            diagnostics: Vec::new(),
        }
    }

    pub fn push_diagnostic(&mut self, diagnostic: StyleDiagnostic) {
        self.diagnostics.push(diagnostic);
    }

    /// Compile a style map into rules for `selector`.
    ///
    /// Unconditional rules come first (the selector itself, then nested
    /// selectors and at-rules in declaration order), followed by each
    /// breakpoint's rules in ascending order.
    pub fn compile(&mut self, props: &PropTable, selector: &str, styles: &StyleMap) -> Vec<Rule> {
        let mut slots = SlotRules::new();
        slots.entry(0).or_default().push(Rule::new(selector));
        self.compile_into(props, selector, &[], styles, &mut slots);

        let mut rules = Vec::new();
        for (slot, slot_rules) in slots {
            let media = self.theme.responsive().media_query(slot);
            for rule in slot_rules.into_iter().filter(|rule| !rule.is_empty()) {
                rules.push(match &media {
                    Some(query) => rule.within(query.clone()),
                    None => rule,
                });
            }
        }
        rules
    }

    fn compile_into(
        &mut self,
        props: &PropTable,
        selector: &str,
        at_rules: &[String],
        styles: &StyleMap,
        slots: &mut SlotRules,
    ) {
        for (key, value) in styles {
            if is_selector_key(key) {
                let StyleValue::Nested(body) = value else {
                    continue;
                };
                if key.trim_start().starts_with('@') {
                    let mut nested_at = at_rules.to_vec();
                    nested_at.push(key.trim().to_string());
                    self.compile_into(props, selector, &nested_at, body, slots);
                } else {
                    let nested = nest_selector(selector, key);
                    self.compile_into(props, &nested, at_rules, body, slots);
                }
                continue;
            }

            let spec = props.spec_for(key);
            let mut expand_diagnostics = Vec::new();
            let expanded = self
                .theme
                .responsive()
                .expand(key, value, &mut expand_diagnostics);
            self.diagnostics.extend(expand_diagnostics);

            for entry in expanded {
                for (slot, css_value) in self.resolve_value(&spec, entry.slot, &entry.value) {
                    let rule = slot_rule(slots, slot, selector, at_rules);
                    for property in spec.css_properties() {
                        rule.push(Declaration::new(kebab_case(property), css_value.clone()));
                    }
                }
            }
        }
    }

    /// Resolve one value through scale lookup, transform and unit rules.
    ///
    /// Returns `(slot, css)` pairs. A responsive theme token only expands
    /// when used at the base slot; at a breakpoint its base value is used.
    pub fn resolve_value(&mut self, spec: &PropSpec, slot: usize, value: &Literal) -> Vec<(usize, String)> {
        let property = kebab_case(&spec.property);
        match self.theme.resolve(&property, spec.scale.as_deref(), value) {
            Resolved::Value(literal) => vec![(slot, finish(spec, &property, &literal))],
            Resolved::Variable(reference) => vec![(slot, reference)],
            Resolved::Responsive(values) if slot == 0 => values
                .into_iter()
                .map(|v| (v.slot, finish(spec, &property, &v.value)))
                .collect(),
            Resolved::Responsive(values) => values
                .into_iter()
                .find(|v| v.slot == 0)
                .map(|v| vec![(slot, finish(spec, &property, &v.value))])
                .unwrap_or_default(),
        }
    }

    pub fn take_diagnostics(&mut self) -> Vec<StyleDiagnostic> {
        let mut diagnostics = std::mem::take(&mut self.diagnostics);
        diagnostics.extend(self.theme.take_diagnostics());
        diagnostics
    }
}

fn finish(spec: &PropSpec, property: &str, value: &Literal) -> String {
    spec.transform
        .and_then(|transform| apply_transform(transform, value))
        .unwrap_or_else(|| format_value(property, value))
}

fn slot_rule<'s>(slots: &'s mut SlotRules, slot: usize, selector: &str, at_rules: &[String]) -> &'s mut Rule {
    let rules = slots.entry(slot).or_default();
    let index = match rules
        .iter()
        .position(|rule| rule.selector == selector && rule.at_rules == at_rules)
    {
        Some(index) => index,
        None => {
            let mut rule = Rule::new(selector);
            rule.at_rules = at_rules.to_vec();
            rules.push(rule);
            rules.len() - 1
        }
    };
    &mut rules[index]
}

/// Combine a parent selector with a nested key.
///
/// `&` is replaced by the parent; pseudo-classes and attribute selectors
/// attach to it; combinators and other selectors descend from it. Comma
/// lists on either side expand to every combination.
pub fn nest_selector(parent: &str, key: &str) -> String {
    let mut combined = Vec::new();
    for parent in parent.split(',').map(str::trim) {
        for part in key.split(',').map(str::trim).filter(|p| !p.is_empty()) {
            combined.push(if part.contains('&') {
                part.replace('&', parent)
            } else if part.starts_with(':') || part.starts_with('[') {
                format!("{parent}{part}")
            } else {
                format!("{parent} {part}")
            });
        }
    }
    combined.join(", ")
}
