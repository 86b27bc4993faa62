//! Recoverable problems from every stage, in pipeline order.

use animus_css::StyleDiagnostic;
use animus_graph::GraphDiagnostic;
use miette::{Diagnostic as _, Severity};
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, miette::Diagnostic)]
pub enum Diagnostic {
    #[error(transparent)]
    #[diagnostic(transparent)]
    Graph(#[from] GraphDiagnostic),

    #[error(transparent)]
    #[diagnostic(transparent)]
    Style(#[from] StyleDiagnostic),
}

impl Diagnostic {
    pub fn is_warning(&self) -> bool {
        matches!(self.severity(), Some(Severity::Warning))
    }

    /// Stable `animus::…` code.
    pub fn code_str(&self) -> Option<String> {
        self.code().map(|code| code.to_string())
    }
}
