//! Ordered breakpoint scale.
//!
//! Breakpoints are stored narrowest first. The implicit base breakpoint `_`
//! is never listed; it always applies unconditionally.

use serde::{Deserialize, Serialize};

use crate::error::{ConfigError, Result};

/// Label used for the unconditional (base) breakpoint.
pub const BASE_BREAKPOINT: &str = "_";

/// A named viewport-width threshold.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoint {
    pub name: String,
    pub min_width: String,
}

impl Breakpoint {
    pub fn new(name: impl Into<String>, min_width: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            min_width: min_width.into(),
        }
    }

    /// The `@media` prelude for this breakpoint.
    pub fn media_query(&self) -> String {
        format!("@media (min-width: {})", self.min_width)
    }
}

/// Breakpoints in ascending width order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Breakpoints(Vec<Breakpoint>);

impl Default for Breakpoints {
    fn default() -> Self {
        Self(vec![
            Breakpoint::new("xs", "480px"),
            Breakpoint::new("sm", "768px"),
            Breakpoint::new("md", "1024px"),
            Breakpoint::new("lg", "1200px"),
            Breakpoint::new("xl", "1440px"),
        ])
    }
}

impl Breakpoints {
    pub fn new(breakpoints: Vec<Breakpoint>) -> Self {
        Self(breakpoints)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Breakpoint> {
        self.0.iter()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn get(&self, name: &str) -> Option<&Breakpoint> {
        self.0.iter().find(|bp| bp.name == name)
    }

    /// Position of a breakpoint label in cascade order.
    ///
    /// The base label `_` is slot 0; listed breakpoints follow from slot 1.
    pub fn slot(&self, name: &str) -> Option<usize> {
        if name == BASE_BREAKPOINT {
            return Some(0);
        }
        self.0.iter().position(|bp| bp.name == name).map(|i| i + 1)
    }

    /// Breakpoint occupying a cascade slot (slot 0 is the base and has none).
    pub fn at_slot(&self, slot: usize) -> Option<&Breakpoint> {
        slot.checked_sub(1).and_then(|i| self.0.get(i))
    }

    /// Check names are unique, widths parse, and widths strictly ascend.
    pub fn validate(&self) -> Result<()> {
        let mut previous: Option<(&Breakpoint, f64, &str)> = None;

        for bp in &self.0 {
            if bp.name.is_empty() || bp.name == BASE_BREAKPOINT {
                return Err(ConfigError::invalid_breakpoint(
                    &bp.name,
                    "breakpoint names must be non-empty and `_` is reserved for the base",
                ));
            }
            if !bp
                .name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_')
            {
                return Err(ConfigError::invalid_breakpoint(
                    &bp.name,
                    "names may only contain ASCII letters, digits, `-` and `_`",
                ));
            }
            if self.0.iter().filter(|other| other.name == bp.name).count() > 1 {
                return Err(ConfigError::invalid_breakpoint(&bp.name, "duplicate name"));
            }

            let (width, unit) = split_length(&bp.min_width).ok_or_else(|| {
                ConfigError::invalid_breakpoint(
                    &bp.name,
                    format!("`{}` is not a length", bp.min_width),
                )
            })?;

            if let Some((prev, prev_width, prev_unit)) = previous {
                if prev_unit == unit && width <= prev_width {
                    return Err(ConfigError::invalid_breakpoint(
                        &bp.name,
                        format!(
                            "min-width {} must be wider than `{}` ({})",
                            bp.min_width, prev.name, prev.min_width
                        ),
                    ));
                }
            }
            previous = Some((bp, width, unit));
        }

        Ok(())
    }
}

impl<'a> IntoIterator for &'a Breakpoints {
    type Item = &'a Breakpoint;
    type IntoIter = std::slice::Iter<'a, Breakpoint>;

    fn into_iter(self) -> Self::IntoIter {
        self.0.iter()
    }
}

/// Split `768px` into `(768.0, "px")`.
fn split_length(value: &str) -> Option<(f64, &str)> {
    let value = value.trim();
    let split = value
        .find(|c: char| !(c.is_ascii_digit() || c == '.'))
        .unwrap_or(value.len());
    let (number, unit) = value.split_at(split);
    let number: f64 = number.parse().ok()?;
    if number < 0.0 {
        return None;
    }
    Some((number, unit))
}
