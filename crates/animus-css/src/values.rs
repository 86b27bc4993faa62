//! CSS property names and value formatting.

use animus_graph::style::format_number;
use animus_graph::{Literal, Transform};

/// Properties whose bare numbers stay unitless.
const UNITLESS: &[&str] = &[
    "animation-iteration-count",
    "aspect-ratio",
    "border-image-outset",
    "border-image-slice",
    "border-image-width",
    "column-count",
    "columns",
    "fill-opacity",
    "flex",
    "flex-grow",
    "flex-shrink",
    "flood-opacity",
    "font-weight",
    "grid-area",
    "grid-column",
    "grid-column-end",
    "grid-column-start",
    "grid-row",
    "grid-row-end",
    "grid-row-start",
    "line-clamp",
    "line-height",
    "opacity",
    "order",
    "orphans",
    "scale",
    "stop-opacity",
    "stroke-dashoffset",
    "stroke-miterlimit",
    "stroke-opacity",
    "stroke-width",
    "tab-size",
    "widows",
    "z-index",
    "zoom",
];

/// `backgroundColor` → `background-color`, `WebkitBoxShadow` →
/// `-webkit-box-shadow`, `msFlex` → `-ms-flex`. Custom properties (`--x`) and
/// names that are already kebab-case pass through.
pub fn kebab_case(property: &str) -> String {
    if property.starts_with("--") {
        return property.to_string();
    }

    let mut out = String::with_capacity(property.len() + 4);
    if property
        .strip_prefix("ms")
        .is_some_and(|rest| rest.starts_with(|c: char| c.is_ascii_uppercase()))
    {
        out.push('-');
    }
    for c in property.chars() {
        if c.is_ascii_uppercase() {
            out.push('-');
            out.push(c.to_ascii_lowercase());
        } else {
            out.push(c);
        }
    }
    out
}

pub fn is_unitless(css_property: &str) -> bool {
    UNITLESS.binary_search(&css_property).is_ok()
}

/// Apply a prop transform to a number. Text passes through untouched.
pub fn apply_transform(transform: Transform, value: &Literal) -> Option<String> {
    let n = value.as_number()?;
    Some(match transform {
        Transform::Size => {
            if n != 0.0 && n.abs() <= 1.0 {
                format!("{}%", format_number(n * 100.0))
            } else {
                px(n)
            }
        }
        Transform::Px => px(n),
        Transform::BorderShorthand => format!("{} solid", px(n)),
    })
}

/// Render a resolved value for a property: numbers get `px` unless the
/// property is unitless or the number is zero.
pub fn format_value(css_property: &str, value: &Literal) -> String {
    match value {
        Literal::Number(n) if !is_unitless(css_property) => px(*n),
        other => other.to_string(),
    }
}

fn px(n: f64) -> String {
    if n == 0.0 {
        "0".to_string()
    } else {
        format!("{}px", format_number(n))
    }
}
