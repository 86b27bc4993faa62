//! Observed usage-site prop values.
//!
//! Produced by the usage collector as `component → prop → ["value:bp"]`.
//! Only used to decide which atomic classes to emit.

use animus_config::BASE_BREAKPOINT;
use animus_graph::Literal;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct UsageMap(IndexMap<String, IndexMap<String, IndexSet<String>>>);

/// One parsed `value:breakpoint` entry.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UsageValue<'a> {
    pub value: &'a str,
    pub breakpoint: &'a str,
}

impl UsageValue<'_> {
    /// Numbers are recorded as text; read them back as numbers.
    pub fn literal(&self) -> Literal {
        match self.value.trim().parse::<f64>() {
            Ok(n) if n.is_finite() => Literal::Number(n),
            _ => Literal::Text(self.value.to_string()),
        }
    }
}

impl UsageMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record `value` for `component.prop` at `breakpoint`.
    pub fn record(
        &mut self,
        component: impl Into<String>,
        prop: impl Into<String>,
        value: impl std::fmt::Display,
        breakpoint: &str,
    ) {
        self.0
            .entry(component.into())
            .or_default()
            .entry(prop.into())
            .or_default()
            .insert(format!("{value}:{breakpoint}"));
    }

    pub fn with(mut self, component: &str, prop: &str, value: impl std::fmt::Display, breakpoint: &str) -> Self {
        self.record(component, prop, value, breakpoint);
        self
    }

    pub fn props(&self, component: &str) -> Option<&IndexMap<String, IndexSet<String>>> {
        self.0.get(component)
    }

    pub fn components(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// Split `value:bp` at the last colon. An entry without one is a base value.
pub fn parse_entry(entry: &str) -> UsageValue<'_> {
    match entry.rsplit_once(':') {
        Some((value, breakpoint)) if !breakpoint.is_empty() && !breakpoint.contains(' ') => {
            UsageValue { value, breakpoint }
        }
        _ => UsageValue {
            value: entry,
            breakpoint: BASE_BREAKPOINT,
        },
    }
}
