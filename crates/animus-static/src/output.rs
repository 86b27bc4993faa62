//! Pipeline output.

use animus_css::{AtomicClass, ComponentRuntimeMetadata};
use animus_graph::{ComponentGraph, ContentHash, GraphAnalysis};
use indexmap::IndexMap;

use crate::diagnostics::Diagnostic;
use crate::error::Result;

#[derive(Debug, Clone)]
pub struct BuildOutput {
    pub css: String,
    /// Custom properties referenced by component and atomic rules.
    pub used_variables: Vec<String>,
    pub metadata: IndexMap<ContentHash, ComponentRuntimeMetadata>,
    pub atomics: Vec<AtomicClass>,
    pub graph: ComponentGraph,
    pub analysis: GraphAnalysis,
    pub diagnostics: Vec<Diagnostic>,
}

impl BuildOutput {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_warning())
    }

    /// Runtime metadata as pretty JSON, keyed by content hash.
    pub fn metadata_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(&self.metadata).map_err(animus_css::CssError::from)?)
    }

    /// Metadata for the first component with this display name.
    pub fn metadata_for(&self, name: &str) -> Option<&ComponentRuntimeMetadata> {
        self.metadata.values().find(|m| m.name == name)
    }

    /// Graph document with nodes in cascade order and the analysis.
    pub fn graph_json(&self) -> Result<String> {
        Ok(self.graph.to_json()?)
    }
}
