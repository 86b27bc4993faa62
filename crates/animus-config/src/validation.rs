//! Pluggable config validation strategies
//!
//! Everything here runs before any graph work begins, so a bad option stops
//! the pipeline before a partial stylesheet can be produced.

use serde_json::Value;

use crate::config::AnimusConfig;
use crate::error::{ConfigError, Result};

/// Trait for pluggable config validation strategies
pub trait ConfigValidator {
    fn validate(&self, config: &AnimusConfig) -> Result<()>;
}

/// Schema-only validation (no filesystem checks)
///
/// # Example
///
/// ```
/// use animus_config::{AnimusConfig, ConfigValidator, SchemaValidator};
///
/// SchemaValidator.validate(&AnimusConfig::default()).unwrap();
/// ```
pub struct SchemaValidator;

impl ConfigValidator for SchemaValidator {
    fn validate(&self, config: &AnimusConfig) -> Result<()> {
        if config.prefix.is_empty() {
            return Err(ConfigError::invalid_value("prefix", "prefix cannot be empty"));
        }

        let starts_with_letter = config
            .prefix
            .chars()
            .next()
            .is_some_and(|c| c.is_ascii_alphabetic());
        let identifier_chars = config
            .prefix
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
        if !starts_with_letter || !identifier_chars {
            return Err(ConfigError::invalid_value(
                "prefix",
                format!(
                    "`{}` is not a valid class/custom-property prefix (start with a letter, then letters, digits, `-` or `_`)",
                    config.prefix
                ),
            ));
        }

        for scale in &config.variable_scales {
            if scale.trim().is_empty() {
                return Err(ConfigError::invalid_value(
                    "variable_scales",
                    "scale names cannot be empty",
                ));
            }
        }

        config.breakpoints.validate()
    }
}

/// Convenience function for schema-only validation
pub fn validate_schema(config: &AnimusConfig) -> Result<()> {
    SchemaValidator.validate(config)
}

/// Check the theme object is usable as a token source.
///
/// The theme must be a JSON object. Each top-level entry is a scale and must
/// itself be an object or an array; nested values may be anything except
/// `null` at the scale level.
///
/// # Example
///
/// ```
/// use animus_config::validate_theme;
/// use serde_json::json;
///
/// validate_theme(&json!({ "colors": { "primary": "#007bff" } })).unwrap();
/// assert!(validate_theme(&json!(["not", "an", "object"])).is_err());
/// ```
pub fn validate_theme(theme: &Value) -> Result<()> {
    let Value::Object(scales) = theme else {
        return Err(ConfigError::malformed_theme(
            format!("expected an object at the theme root, found {}", kind_of(theme)),
            Some("wrap scales in an object, e.g. { \"colors\": { ... } }"),
        ));
    };

    for (scale, value) in scales {
        match value {
            Value::Object(_) | Value::Array(_) => {}
            other => {
                return Err(ConfigError::malformed_theme(
                    format!(
                        "scale `{scale}` must be an object or an array, found {}",
                        kind_of(other)
                    ),
                    None,
                ));
            }
        }
    }

    Ok(())
}

fn kind_of(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
