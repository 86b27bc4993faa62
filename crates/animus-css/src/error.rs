//! Fatal errors for stylesheet generation.
//!
//! Token misses, collisions and unknown breakpoints are not errors; they are
//! [`StyleDiagnostic`](crate::StyleDiagnostic)s collected next to the output.

use animus_graph::GraphError;
use miette::Diagnostic;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, CssError>;

#[derive(Debug, Error, Diagnostic)]
pub enum CssError {
    #[error(transparent)]
    #[diagnostic(code(animus::css::graph))]
    Graph(#[from] GraphError),

    #[error("graph node `{id}` has no registered component")]
    #[diagnostic(
        code(animus::css::unknown_component),
        help("build the graph from the same registry that is passed to the generator")
    )]
    UnknownComponent { id: String },

    #[error("`{key}` is a selector and cannot become an atomic class")]
    #[diagnostic(code(animus::css::selector_not_atomic))]
    SelectorNotAtomic { key: String },

    #[error("failed to serialize runtime metadata: {0}")]
    #[diagnostic(code(animus::css::serialization))]
    Serialization(#[from] serde_json::Error),
}
