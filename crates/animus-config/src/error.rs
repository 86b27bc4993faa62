//! Error types for configuration loading and validation.
//!
//! Every variant here is fatal: the pipeline refuses to start graph work
//! while any of them is outstanding.

use std::path::PathBuf;

use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ConfigError>;

#[derive(Debug, Error, Diagnostic)]
pub enum ConfigError {
    #[error("unknown theme resolution mode `{value}`")]
    #[diagnostic(
        code(animus::config::theme_resolution),
        help("set `theme_resolution` to one of: inline, css-variable, hybrid")
    )]
    UnknownThemeResolution { value: String },

    #[error("unknown generator mode `{value}`")]
    #[diagnostic(
        code(animus::config::mode),
        help("set `mode` to one of: static, runtime")
    )]
    UnknownMode { value: String },

    #[error("malformed theme: {message}")]
    #[diagnostic(code(animus::config::theme))]
    MalformedTheme {
        message: String,
        #[help]
        hint: Option<String>,
    },

    #[error("invalid breakpoint `{name}`: {message}")]
    #[diagnostic(
        code(animus::config::breakpoints),
        help("breakpoints are listed narrowest first, e.g. {{ name = \"sm\", min_width = \"768px\" }}")
    )]
    InvalidBreakpoint { name: String, message: String },

    #[error("invalid config value for `{field}`: {message}")]
    #[diagnostic(code(animus::config::invalid_value))]
    InvalidValue { field: String, message: String },

    #[error("theme file not found: {path}")]
    #[diagnostic(code(animus::config::theme_not_found))]
    ThemeNotFound { path: PathBuf },

    #[error("I/O error: {0}")]
    #[diagnostic(code(animus::config::io))]
    Io(#[from] std::io::Error),
}

impl ConfigError {
    pub fn malformed_theme(message: impl Into<String>, hint: Option<&str>) -> Self {
        Self::MalformedTheme {
            message: message.into(),
            hint: hint.map(str::to_string),
        }
    }

    pub fn invalid_breakpoint(name: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidBreakpoint {
            name: name.into(),
            message: message.into(),
        }
    }

    pub fn invalid_value(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self::InvalidValue {
            field: field.into(),
            message: message.into(),
        }
    }
}

impl From<figment::Error> for ConfigError {
    fn from(err: figment::Error) -> Self {
        let field = if err.path.is_empty() {
            "configuration".to_string()
        } else {
            err.path.join(".")
        };
        Self::InvalidValue {
            field,
            message: err.to_string(),
        }
    }
}
