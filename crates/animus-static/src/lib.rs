//! # animus-static
//!
//! Build-time stylesheet generation for Animus components.
//!
//! Takes the extractor's component definitions, the usage collector's
//! usage map, a theme and an [`AnimusConfig`], and produces one
//! deterministic stylesheet whose rule order lets every child component
//! override its parents, plus the class metadata the runtime needs.
//!
//! ## Quick Start
//!
//! ```rust
//! use animus_static::{build_stylesheet, AnimusConfig, ComponentDefinition, StyleMap, UsageMap};
//! use serde_json::json;
//!
//! let theme = json!({ "colors": { "primary": "#007bff" }, "space": [0, 4, 8] });
//! let button = ComponentDefinition::new("Button", "src/Button.tsx", "Button")
//!     .with_styles(StyleMap::new().with("p", 2))
//!     .with_groups(["color"])
//!     .sealed();
//! let usage = UsageMap::new().with("Button", "bg", "primary", "_");
//!
//! let output = build_stylesheet(&AnimusConfig::default(), &theme, [button], &usage).unwrap();
//!
//! assert!(output.css.contains("padding: 8px;"));
//! assert!(output.css.contains(".animus-bg-primary {"));
//! assert!(output.diagnostics.is_empty());
//! ```
//!
//! ## Errors
//!
//! Only configuration, theme shape and malformed input JSON are fatal
//! ([`BuildError`]), and they are reported before any graph work. Cycles,
//! dangling parents, missing tokens and unknown usage come back as
//! [`Diagnostic`]s on the output.
//!
//! ## Logging
//!
//! The pipeline emits `tracing` events. Enable the `logging` feature for
//! `init_logging` / `init_logging_from_env` if you are not installing a
//! subscriber yourself.

pub mod diagnostics;
pub mod error;
pub mod output;
pub mod pipeline;

#[cfg(feature = "logging")]
pub mod logging;

pub use diagnostics::Diagnostic;
pub use error::{BuildError, Result};
pub use output::BuildOutput;
pub use pipeline::{build_stylesheet, Pipeline};

#[cfg(feature = "logging")]
pub use logging::{init_logging, init_logging_from_env, LogLevel};

pub use animus_config::{AnimusConfig, Breakpoint, Breakpoints, GeneratorMode, ThemeResolution};
pub use animus_css::{ComponentRuntimeMetadata, GroupDefs, StyleDiagnostic, UsageMap};
pub use animus_graph::{
    ComponentDefinition, ComponentGraph, ComponentIdentity, GraphDiagnostic, PropSpec, StyleMap,
    Transform, Variant,
};
