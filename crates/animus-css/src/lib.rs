//! # animus-css
//!
//! Theme resolution, atomic utility classes and cascade-ordered stylesheet
//! assembly on top of [`animus_graph`].
//!
//! ```text
//! ComponentRegistry + built ComponentGraph + theme + UsageMap
//!                          │
//!                          ▼
//!        GenerationContext (ThemeResolver, AtomicRegistry, diagnostics)
//!                          │
//!                          ▼
//!  :root ─► bases (layer, position) ─► variants ─► states ─► atomics
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use animus_config::AnimusConfig;
//! use animus_css::{generator_for, GenerationInput, GroupDefs, UsageMap};
//! use animus_graph::{ComponentDefinition, ComponentGraph, ComponentRegistry, StyleMap};
//! use serde_json::json;
//!
//! let config = AnimusConfig::default();
//! let theme = json!({ "colors": { "primary": "#007bff" } });
//! let button = ComponentDefinition::new("Button", "src/Button.tsx", "Button")
//!     .with_styles(StyleMap::new().with("bg", "primary"))
//!     .sealed();
//!
//! let registry = ComponentRegistry::from_definitions([button]);
//! let graph = ComponentGraph::from_registry(&registry);
//! let groups = GroupDefs::default();
//! let usage = UsageMap::new();
//!
//! let output = generator_for(config.mode)
//!     .generate(&GenerationInput {
//!         config: &config,
//!         theme: &theme,
//!         groups: &groups,
//!         registry: &registry,
//!         graph: &graph,
//!         usage: &usage,
//!     })
//!     .unwrap();
//!
//! assert!(output.css.starts_with(":root {\n  --animus-colors-primary: #007bff;\n}"));
//! assert!(output.css.contains("background-color: var(--animus-colors-primary);"));
//! ```
//!
//! Only [`CssError`] aborts generation. Everything else is reported as a
//! [`StyleDiagnostic`] on [`GeneratedCss::diagnostics`].

pub mod assembler;
pub mod atomic;
pub mod context;
pub mod diagnostics;
pub mod error;
pub mod generator;
pub mod groups;
pub mod metadata;
pub mod minify;
pub mod render;
pub mod responsive;
pub mod theme;
pub mod usage;
pub mod values;

pub use assembler::{generate_layered_css, generate_legacy_css, GeneratedCss, GenerationInput};
pub use atomic::{AtomicClass, AtomicRegistry, AtomicRequest};
pub use context::GenerationContext;
pub use diagnostics::StyleDiagnostic;
pub use error::{CssError, Result};
pub use generator::{generator_for, RuntimeGenerator, StaticGenerator, StyleGenerator};
pub use groups::{GroupDefs, PropTable};
pub use metadata::ComponentRuntimeMetadata;
pub use minify::minify_css;
pub use render::{CssWriter, Declaration, Rule};
pub use responsive::{ResponsiveResolver, SlotValue};
pub use theme::{CustomProperty, Resolved, ThemeResolver};
pub use usage::UsageMap;
