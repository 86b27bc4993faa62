//! Breakpoint expansion for responsive style values.
//!
//! Values come in three shapes: a literal, a breakpoint-keyed map
//! (`{ _: 1, sm: 2 }`) or a positional array (`[1, null, 3]`). All of them
//! expand into `(slot, value)` pairs in ascending slot order, where slot 0 is
//! the base and slot `i` is the `i`-th configured breakpoint.

use animus_config::{BASE_BREAKPOINT, Breakpoints};
use animus_graph::{Literal, StyleValue};

use crate::diagnostics::StyleDiagnostic;

/// One value pinned to a breakpoint slot.
#[derive(Debug, Clone, PartialEq)]
pub struct SlotValue {
    pub slot: usize,
    pub value: Literal,
}

impl SlotValue {
    pub fn base(value: Literal) -> Self {
        Self { slot: 0, value }
    }
}

pub struct ResponsiveResolver<'a> {
    breakpoints: &'a Breakpoints,
}

impl<'a> ResponsiveResolver<'a> {
    pub fn new(breakpoints: &'a Breakpoints) -> Self {
        Self { breakpoints }
    }

    pub fn breakpoints(&self) -> &'a Breakpoints {
        self.breakpoints
    }

    /// Expand a style value. Nested selector bodies yield nothing.
    ///
    /// Unknown breakpoint keys and array entries past the last breakpoint
    /// are dropped and reported against `property`.
    pub fn expand(
        &self,
        property: &str,
        value: &StyleValue,
        diagnostics: &mut Vec<StyleDiagnostic>,
    ) -> Vec<SlotValue> {
        let mut values = match value {
            StyleValue::Literal(literal) => vec![SlotValue::base(literal.clone())],
            StyleValue::Array(entries) => self.expand_array(property, entries, diagnostics),
            StyleValue::Breakpoints(map) => {
                let mut values = Vec::with_capacity(map.len());
                for (name, literal) in map {
                    match self.breakpoints.slot(name) {
                        Some(slot) => values.push(SlotValue {
                            slot,
                            value: literal.clone(),
                        }),
                        None => diagnostics.push(unknown(property, name)),
                    }
                }
                values
            }
            StyleValue::Nested(_) => Vec::new(),
        };
        values.sort_by_key(|v| v.slot);
        values
    }

    fn expand_array(
        &self,
        property: &str,
        entries: &[Option<Literal>],
        diagnostics: &mut Vec<StyleDiagnostic>,
    ) -> Vec<SlotValue> {
        let mut values = Vec::with_capacity(entries.len());
        for (slot, entry) in entries.iter().enumerate() {
            let Some(literal) = entry else {
                continue;
            };
            if slot > self.breakpoints.len() {
                diagnostics.push(unknown(property, &format!("[{slot}]")));
                continue;
            }
            values.push(SlotValue {
                slot,
                value: literal.clone(),
            });
        }
        values
    }

    /// Slot for a usage-site breakpoint label (`_`, `sm`, …).
    pub fn slot_for_label(&self, label: &str) -> Option<usize> {
        self.breakpoints.slot(label)
    }

    /// Label of a slot: `_` for the base, the breakpoint name otherwise.
    pub fn label(&self, slot: usize) -> &str {
        self.breakpoints
            .at_slot(slot)
            .map_or(BASE_BREAKPOINT, |bp| bp.name.as_str())
    }

    /// `@media` prelude for a slot; `None` for the base.
    pub fn media_query(&self, slot: usize) -> Option<String> {
        self.breakpoints.at_slot(slot).map(|bp| bp.media_query())
    }
}

fn unknown(property: &str, breakpoint: &str) -> StyleDiagnostic {
    tracing::warn!(property, breakpoint, "dropping value for unknown breakpoint");
    StyleDiagnostic::UnknownBreakpoint {
        property: property.to_string(),
        breakpoint: breakpoint.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use indexmap::IndexMap;

    fn slots(values: &[SlotValue]) -> Vec<(usize, String)> {
        values
            .iter()
            .map(|v| (v.slot, v.value.to_string()))
            .collect()
    }

    #[test]
    fn sparse_arrays_keep_positions() {
        let breakpoints = Breakpoints::default();
        let resolver = ResponsiveResolver::new(&breakpoints);
        let mut diagnostics = Vec::new();

        let value = StyleValue::Array(vec![
            Some(Literal::Number(1.0)),
            None,
            Some(Literal::Number(3.0)),
        ]);
        let expanded = resolver.expand("p", &value, &mut diagnostics);

        assert_eq!(slots(&expanded), vec![(0, "1".into()), (2, "3".into())]);
        assert_eq!(resolver.label(2), "sm");
        assert_eq!(
            resolver.media_query(2).as_deref(),
            Some("@media (min-width: 768px)")
        );
        assert!(diagnostics.is_empty());
    }

    #[test]
    fn breakpoint_maps_sort_by_slot() {
        let breakpoints = Breakpoints::default();
        let resolver = ResponsiveResolver::new(&breakpoints);
        let mut diagnostics = Vec::new();

        let mut map = IndexMap::new();
        map.insert("lg".to_string(), Literal::from("3"));
        map.insert("_".to_string(), Literal::from("1"));
        map.insert("sm".to_string(), Literal::from("2"));
        let expanded = resolver.expand("m", &StyleValue::Breakpoints(map), &mut diagnostics);

        assert_eq!(
            slots(&expanded),
            vec![(0, "1".into()), (2, "2".into()), (4, "3".into())]
        );
    }

    #[test]
    fn unknown_breakpoints_are_dropped_and_reported() {
        let breakpoints = Breakpoints::default();
        let resolver = ResponsiveResolver::new(&breakpoints);
        let mut diagnostics = Vec::new();

        let mut map = IndexMap::new();
        map.insert("_".to_string(), Literal::from("1"));
        map.insert("huge".to_string(), Literal::from("9"));
        let expanded = resolver.expand("m", &StyleValue::Breakpoints(map), &mut diagnostics);

        let too_long = StyleValue::Array((0..8).map(|i| Some(Literal::from(i))).collect());
        let long = resolver.expand("p", &too_long, &mut diagnostics);

        assert_eq!(expanded.len(), 1);
        assert_eq!(long.len(), 6);
        assert_eq!(diagnostics.len(), 3);
        assert!(matches!(
            &diagnostics[0],
            StyleDiagnostic::UnknownBreakpoint { breakpoint, .. } if breakpoint == "huge"
        ));
    }
}
