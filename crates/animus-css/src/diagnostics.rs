//! Recoverable stylesheet problems.

use miette::Diagnostic;
use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error, Diagnostic)]
pub enum StyleDiagnostic {
    /// A dotted token path matched nothing in the theme.
    #[error("theme token `{path}` used by `{property}` was not found; the value is kept as written")]
    #[diagnostic(code(animus::css::token_unresolved), severity(Warning))]
    TokenUnresolved { path: String, property: String },

    /// Two token paths normalize to the same custom property.
    #[error("`{previous}` and `{current}` both map to `{variable}`; `{current}` wins")]
    #[diagnostic(
        code(animus::css::variable_collision),
        severity(Warning),
        help("rename one of the theme keys so their variable names differ")
    )]
    VariableCollision {
        variable: String,
        previous: String,
        current: String,
    },

    /// A responsive value addressed a breakpoint that is not configured.
    #[error("`{property}` uses unknown breakpoint `{breakpoint}`; that value was dropped")]
    #[diagnostic(code(animus::css::unknown_breakpoint), severity(Warning))]
    UnknownBreakpoint { property: String, breakpoint: String },

    /// A component enabled a prop group that does not exist.
    #[error("`{component}` enables unknown prop group `{group}`")]
    #[diagnostic(code(animus::css::unknown_group), severity(Warning))]
    UnknownGroup { component: String, group: String },

    /// Usage data named a component that was not extracted.
    #[error("usage data references unknown component `{component}`")]
    #[diagnostic(code(animus::css::unknown_usage_component), severity(Advice))]
    UnknownUsageComponent { component: String },

    /// Usage data passed a prop the component does not accept as a system prop.
    #[error("`{component}` received `{prop}`, which is not one of its system props")]
    #[diagnostic(code(animus::css::unknown_usage_prop), severity(Advice))]
    UnknownUsageProp { component: String, prop: String },

    /// lightningcss rejected the generated stylesheet.
    #[error("minification failed, emitting unminified CSS: {message}")]
    #[diagnostic(code(animus::css::minify_failed), severity(Warning))]
    MinifyFailed { message: String },
}

impl StyleDiagnostic {
    pub fn is_warning(&self) -> bool {
        matches!(self.severity(), Some(miette::Severity::Warning))
    }
}
