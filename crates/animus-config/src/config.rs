//! High-level configuration structure for Animus.
//!
//! This module provides the main `AnimusConfig` struct and the enums it is
//! built from. For file discovery, see the `discovery` module.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::breakpoints::Breakpoints;
use crate::error::{ConfigError, Result as ConfigResult};

/// How theme token references are written into the stylesheet.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum ThemeResolution {
    /// Substitute the literal theme value.
    Inline,
    /// Every token becomes a `var(--…)` reference with a `:root` declaration.
    CssVariable,
    /// Scales listed in `variable_scales` become variables, the rest inline.
    #[default]
    Hybrid,
}

impl ThemeResolution {
    pub fn as_str(&self) -> &'static str {
        match self {
            ThemeResolution::Inline => "inline",
            ThemeResolution::CssVariable => "css-variable",
            ThemeResolution::Hybrid => "hybrid",
        }
    }
}

impl FromStr for ThemeResolution {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "inline" => Ok(ThemeResolution::Inline),
            "css-variable" | "css-variables" | "css_variable" => Ok(ThemeResolution::CssVariable),
            "hybrid" => Ok(ThemeResolution::Hybrid),
            _ => Err(ConfigError::UnknownThemeResolution {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for ThemeResolution {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<ThemeResolution> for String {
    fn from(value: ThemeResolution) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for ThemeResolution {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Which stylesheet generator the pipeline selects.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub enum GeneratorMode {
    /// Component styles are extracted into the stylesheet at build time.
    #[default]
    Static,
    /// Component styles are computed at render time; only theme variables
    /// and runtime metadata are produced.
    Runtime,
}

impl GeneratorMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            GeneratorMode::Static => "static",
            GeneratorMode::Runtime => "runtime",
        }
    }
}

impl FromStr for GeneratorMode {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "static" => Ok(GeneratorMode::Static),
            "runtime" => Ok(GeneratorMode::Runtime),
            _ => Err(ConfigError::UnknownMode {
                value: s.to_string(),
            }),
        }
    }
}

impl TryFrom<String> for GeneratorMode {
    type Error = ConfigError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<GeneratorMode> for String {
    fn from(value: GeneratorMode) -> Self {
        value.as_str().to_string()
    }
}

impl fmt::Display for GeneratorMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

fn default_prefix() -> String {
    "animus".to_string()
}

fn default_variable_scales() -> Vec<String> {
    vec!["colors".to_string()]
}

fn default_true() -> bool {
    true
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AnimusConfig {
    /// Prefix for generated class names and custom properties.
    #[serde(default = "default_prefix")]
    pub prefix: String,

    #[serde(default)]
    pub theme_resolution: ThemeResolution,

    /// Scales emitted as custom properties in hybrid mode.
    #[serde(default = "default_variable_scales")]
    pub variable_scales: Vec<String>,

    #[serde(default)]
    pub breakpoints: Breakpoints,

    /// Emit atomic utility classes for usage-site prop overrides.
    #[serde(default = "default_true")]
    pub atomic: bool,

    /// Order component rules by cascade layer. `false` selects the legacy
    /// emission order, which does not guarantee child-over-parent overrides.
    #[serde(default = "default_true")]
    pub layered: bool,

    #[serde(default)]
    pub mode: GeneratorMode,

    #[serde(default)]
    pub minify: bool,
}

impl Default for AnimusConfig {
    fn default() -> Self {
        Self {
            prefix: default_prefix(),
            theme_resolution: ThemeResolution::default(),
            variable_scales: default_variable_scales(),
            breakpoints: Breakpoints::default(),
            atomic: true,
            layered: true,
            mode: GeneratorMode::default(),
            minify: false,
        }
    }
}

impl AnimusConfig {
    /// Create from serde_json::Value (for programmatic config)
    ///
    /// # Example
    ///
    /// ```
    /// use animus_config::{AnimusConfig, ThemeResolution};
    /// use serde_json::json;
    ///
    /// let config = AnimusConfig::from_value(json!({
    ///     "prefix": "ui",
    ///     "theme_resolution": "css-variable"
    /// }))
    /// .unwrap();
    ///
    /// assert_eq!(config.prefix, "ui");
    /// assert_eq!(config.theme_resolution, ThemeResolution::CssVariable);
    /// ```
    pub fn from_value(value: Value) -> ConfigResult<Self> {
        serde_json::from_value(value).map_err(|e| ConfigError::invalid_value("config", e.to_string()))
    }

    /// Convert to serde_json::Value
    pub fn to_value(&self) -> ConfigResult<Value> {
        serde_json::to_value(self).map_err(|e| ConfigError::invalid_value("config", e.to_string()))
    }

    /// Whether a scale is written as custom properties under this config.
    pub fn scale_uses_variables(&self, scale: &str) -> bool {
        match self.theme_resolution {
            ThemeResolution::Inline => false,
            ThemeResolution::CssVariable => true,
            ThemeResolution::Hybrid => self.variable_scales.iter().any(|s| s == scale),
        }
    }
}
