//! Query methods for ComponentGraph.

use super::analysis::CycleReport;
use super::{ComponentGraph, EdgeType, GraphEdge, GraphMetadata, GraphNode, NodeId};
use crate::diagnostics::GraphDiagnostic;

impl ComponentGraph {
    pub fn node(&self, id: &NodeId) -> Option<&GraphNode> {
        self.nodes.get(id)
    }

    /// Nodes in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = &GraphNode> {
        self.nodes.values()
    }

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Edges kept by the last build (or everything added since).
    pub fn edges(&self) -> &[GraphEdge] {
        &self.edges
    }

    /// Extends edges set aside to break cycles.
    pub fn dropped_edges(&self) -> &[GraphEdge] {
        &self.dropped_edges
    }

    pub fn cycles(&self) -> &[CycleReport] {
        &self.cycles
    }

    pub fn metadata(&self) -> &GraphMetadata {
        &self.metadata
    }

    pub fn is_built(&self) -> bool {
        self.built
    }

    /// Construction diagnostics followed by those of the last build.
    pub fn diagnostics(&self) -> impl Iterator<Item = &GraphDiagnostic> {
        self.diagnostics.iter().chain(self.build_diagnostics.iter())
    }

    /// Direct extends parents of `id`, in tie-break order.
    pub fn parents(&self, id: &NodeId) -> Vec<&GraphNode> {
        self.linked(|edge| (&edge.from == id).then_some(&edge.to))
    }

    /// Components that directly extend `id`, in tie-break order.
    pub fn children(&self, id: &NodeId) -> Vec<&GraphNode> {
        self.linked(|edge| (&edge.to == id).then_some(&edge.from))
    }

    /// Components `id` renders, per its uses edges.
    pub fn used_by(&self, id: &NodeId) -> Vec<&GraphNode> {
        let mut used: Vec<&GraphNode> = self
            .edges
            .iter()
            .filter(|edge| edge.edge_type == EdgeType::Uses && &edge.from == id)
            .filter_map(|edge| self.nodes.get(&edge.to))
            .collect();
        used.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        used
    }

    pub fn layer_of(&self, id: &NodeId) -> Option<u32> {
        self.nodes.get(id).map(|node| node.cascade.layer)
    }

    /// Nodes sorted by `(layer, position)`: the order rules are emitted in.
    pub fn nodes_in_cascade_order(&self) -> Vec<&GraphNode> {
        let mut nodes: Vec<&GraphNode> = self.nodes.values().collect();
        nodes.sort_by_key(|node| node.cascade);
        nodes
    }

    fn linked<'a, F>(&'a self, select: F) -> Vec<&'a GraphNode>
    where
        F: Fn(&'a GraphEdge) -> Option<&'a NodeId>,
    {
        let mut linked: Vec<&GraphNode> = self
            .edges
            .iter()
            .filter(|edge| edge.edge_type == EdgeType::Extends)
            .filter_map(select)
            .filter_map(|id| self.nodes.get(id))
            .collect();
        linked.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        linked
    }
}
