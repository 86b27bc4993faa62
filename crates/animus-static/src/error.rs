//! Fatal pipeline errors.

use animus_config::ConfigError;
use animus_css::CssError;
use animus_graph::GraphError;
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, BuildError>;

#[derive(Debug, Error, Diagnostic)]
pub enum BuildError {
    /// Raised before any graph work; no output is produced.
    #[error(transparent)]
    #[diagnostic(transparent)]
    Config(#[from] ConfigError),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Css(#[from] CssError),

    #[error(transparent)]
    #[diagnostic(code(animus::graph))]
    Graph(#[from] GraphError),

    #[error("invalid component definitions: {0}")]
    #[diagnostic(
        code(animus::definitions),
        help("definitions must be the extractor's JSON array of component objects")
    )]
    Definitions(#[source] serde_json::Error),

    #[error("invalid usage map: {0}")]
    #[diagnostic(
        code(animus::usage),
        help("usage is an object of component → prop → [\"value:breakpoint\"]")
    )]
    Usage(#[source] serde_json::Error),
}
