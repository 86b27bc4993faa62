//! Recoverable graph problems.
//!
//! None of these abort a build. They are collected on the registry and the
//! graph and handed back next to the stylesheet.

use miette::Diagnostic;
use thiserror::Error;

use crate::graph::EdgeType;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum GraphDiagnostic {
    /// An extends cycle; the back edge was ignored for layering.
    #[error("extends cycle detected: {}", .path.join(" -> "))]
    #[diagnostic(
        code(animus::graph::cycle),
        severity(Warning),
        help("break the cycle by removing the `{break_from}` -> `{break_to}` extension")
    )]
    CycleDetected {
        path: Vec<String>,
        break_from: String,
        break_to: String,
    },

    /// An edge whose endpoint is not a node; it was dropped.
    #[error("dropped {edge_type} edge `{from}` -> `{to}`: {missing} is not a known component")]
    #[diagnostic(code(animus::graph::dangling_edge), severity(Warning))]
    DanglingEdge {
        from: String,
        to: String,
        edge_type: EdgeType,
        missing: String,
    },

    /// A component declared a parent the registry cannot find.
    #[error("`{component}` extends `{parent}` ({file_path}#{export_name}), which was not extracted")]
    #[diagnostic(
        code(animus::graph::parent_not_found),
        severity(Warning),
        help("the component is laid out as if it had no parent")
    )]
    ParentNotFound {
        component: String,
        parent: String,
        file_path: String,
        export_name: String,
    },

    /// A second registration for the same `file#export` replaced the first.
    #[error("`{file_path}#{export_name}` was registered again; the newer definition wins")]
    #[diagnostic(code(animus::graph::replaced), severity(Advice))]
    ComponentReplaced {
        file_path: String,
        export_name: String,
    },
}

impl GraphDiagnostic {
    pub fn is_warning(&self) -> bool {
        matches!(self.severity(), Some(miette::Severity::Warning))
    }
}
