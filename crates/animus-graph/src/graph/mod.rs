//! Component dependency graph.
//!
//! Storage is arena style: nodes live in one map keyed by content hash and
//! edges refer to ids, never to nodes. Cycles and dangling edges are therefore
//! representable, and `build()` turns them into diagnostics.
//!
//! Methods are split by concern across the submodules, each adding an
//! `impl ComponentGraph` block.

mod analysis;
mod construction;
mod layering;
mod mutations;
mod queries;
mod serialization;
mod statistics;

use std::collections::BTreeMap;
use std::fmt;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::component::ContentHash;
use crate::diagnostics::GraphDiagnostic;

pub use analysis::{CriticalPath, CycleReport, GraphAnalysis};
pub use statistics::GraphStatistics;

/// Graph node id: the component's content hash.
pub type NodeId = ContentHash;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum EdgeType {
    /// Child → parent inheritance. The only kind that drives layering.
    Extends,
    /// Component → component rendered inside it.
    Uses,
    Imports,
    ThemeReference,
}

impl EdgeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            EdgeType::Extends => "extends",
            EdgeType::Uses => "uses",
            EdgeType::Imports => "imports",
            EdgeType::ThemeReference => "theme-reference",
        }
    }
}

impl fmt::Display for EdgeType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GraphEdge {
    pub from: NodeId,
    pub to: NodeId,
    #[serde(rename = "type")]
    pub edge_type: EdgeType,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub metadata: BTreeMap<String, String>,
}

impl GraphEdge {
    pub fn new(from: NodeId, to: NodeId, edge_type: EdgeType) -> Self {
        Self {
            from,
            to,
            edge_type,
            metadata: BTreeMap::new(),
        }
    }

    pub fn extends(child: NodeId, parent: NodeId) -> Self {
        Self::new(child, parent, EdgeType::Extends)
    }

    pub fn uses(user: NodeId, used: NodeId) -> Self {
        Self::new(user, used, EdgeType::Uses)
    }

    pub fn with_metadata(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.metadata.insert(key.into(), value.into());
        self
    }

    fn same_link(&self, other: &GraphEdge) -> bool {
        self.from == other.from && self.to == other.to && self.edge_type == other.edge_type
    }
}

/// Where a node sits in the emitted stylesheet.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
pub struct CascadePosition {
    /// Longest extends distance to a root (0 = no parent).
    pub layer: u32,
    /// Stable emission order within the layer.
    pub position: u32,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NodeMetadata {
    pub variant_count: usize,
    pub state_count: usize,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub groups: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphNode {
    pub id: NodeId,
    pub name: String,
    pub file_path: String,
    pub export_name: String,
    pub cascade: CascadePosition,
    #[serde(default)]
    pub metadata: NodeMetadata,
}

impl GraphNode {
    pub fn new(
        id: NodeId,
        name: impl Into<String>,
        file_path: impl Into<String>,
        export_name: impl Into<String>,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            file_path: file_path.into(),
            export_name: export_name.into(),
            cascade: CascadePosition::default(),
            metadata: NodeMetadata::default(),
        }
    }

    /// Deterministic tie-break key, independent of insertion order.
    fn order_key(&self) -> (&str, &str, &str, &str) {
        (
            self.file_path.as_str(),
            self.export_name.as_str(),
            self.name.as_str(),
            self.id.as_str(),
        )
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphMetadata {
    /// Nodes with no parent.
    pub root_components: Vec<NodeId>,
    /// Nodes nothing extends.
    pub leaf_components: Vec<NodeId>,
    pub cycle_detected: bool,
    pub total_components: usize,
}

/// Arena-backed component graph.
#[derive(Debug, Clone, Default)]
pub struct ComponentGraph {
    nodes: IndexMap<NodeId, GraphNode>,
    edges: Vec<GraphEdge>,
    /// Extends back edges ignored for layering.
    dropped_edges: Vec<GraphEdge>,
    cycles: Vec<CycleReport>,
    metadata: GraphMetadata,
    /// Problems found while constructing from a registry.
    diagnostics: Vec<GraphDiagnostic>,
    /// Problems found by the last `build()`.
    build_diagnostics: Vec<GraphDiagnostic>,
    built: bool,
}
