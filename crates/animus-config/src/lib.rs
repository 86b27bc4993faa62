//! # animus-config
//!
//! Configuration for the Animus static stylesheet generator: class/variable
//! prefix, theme resolution mode, breakpoint scale, atomic and layering
//! switches, and generator mode.
//!
//! Configuration problems are the only fatal errors in the pipeline. Load and
//! validate here before handing anything to the graph or CSS crates.

pub mod breakpoints;
pub mod config;
pub mod discovery;
pub mod error;
pub mod validation;

pub use breakpoints::{Breakpoint, Breakpoints, BASE_BREAKPOINT};
pub use config::{AnimusConfig, GeneratorMode, ThemeResolution};
pub use discovery::{load_theme, ConfigLoader};
pub use error::{ConfigError, Result};
pub use validation::{validate_schema, validate_theme, ConfigValidator, SchemaValidator};
