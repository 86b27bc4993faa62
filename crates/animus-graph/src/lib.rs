//! # animus-graph
//!
//! Component model, registry and dependency graph for static style
//! extraction.
//!
//! ## Overview
//!
//! Extracted components arrive as [`ComponentDefinition`]s in any order. The
//! [`ComponentRegistry`] stores each one once, keyed by a content hash, and
//! composes inherited styles on demand. [`ComponentGraph`] turns `extends`
//! relations into cascade layers: a child always lands in a later layer than
//! its parent, so emitting rules by `(layer, position)` lets child rules win
//! over parent rules at equal specificity.
//!
//! ```text
//! ComponentDefinition* ──► ComponentRegistry ──► ComponentGraph::from_registry
//!                                                       │
//!                                                       ▼
//!                                   build(): layers, cycles, roots, leaves
//!                                                       │
//!                                                       ▼
//!                                    analyze() / to_json / to_dot / trees
//! ```
//!
//! ## Quick Start
//!
//! ```rust
//! use animus_graph::{ComponentDefinition, ComponentGraph, ComponentRegistry, StyleMap};
//!
//! let base = ComponentDefinition::new("Button", "src/Button.tsx", "Button")
//!     .with_styles(StyleMap::new().with("padding", 8))
//!     .sealed();
//! let primary = ComponentDefinition::new("PrimaryButton", "src/Button.tsx", "PrimaryButton")
//!     .with_styles(StyleMap::new().with("color", "white"))
//!     .extends(&base.identity)
//!     .sealed();
//!
//! let registry = ComponentRegistry::from_definitions([primary.clone(), base.clone()]);
//! let graph = ComponentGraph::from_registry(&registry);
//!
//! assert_eq!(graph.layer_of(base.id()), Some(0));
//! assert_eq!(graph.layer_of(primary.id()), Some(1));
//! ```
//!
//! Nothing here fails on malformed structure. Cycles, dangling edges and
//! missing parents become [`GraphDiagnostic`]s.

pub mod component;
pub mod diagnostics;
pub mod error;
pub mod graph;
pub mod registry;
pub mod style;

pub use component::{
    ComponentDefinition, ComponentIdentity, ContentHash, PropSpec, Transform, Variant,
};
pub use diagnostics::GraphDiagnostic;
pub use error::{GraphError, Result};
pub use graph::{
    CascadePosition, ComponentGraph, CriticalPath, CycleReport, EdgeType, GraphAnalysis,
    GraphEdge, GraphMetadata, GraphNode, GraphStatistics, NodeId, NodeMetadata,
};
pub use registry::{ComponentRegistry, EffectiveStyles, Lineage};
pub use style::{is_selector_key, Literal, StyleMap, StyleValue};

#[cfg(test)]
mod tests;
