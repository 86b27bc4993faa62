//! Mutation methods for ComponentGraph.
//!
//! Any mutation invalidates the layering; call `build()` again afterwards.

use super::{ComponentGraph, GraphEdge, GraphNode};

impl ComponentGraph {
    /// Add a node, replacing any node with the same id.
    pub fn add_node(&mut self, node: GraphNode) {
        self.built = false;
        self.nodes.insert(node.id.clone(), node);
    }

    /// Add an edge. Endpoints are not checked here; `build()` drops edges
    /// whose endpoints are missing. Exact duplicates are ignored.
    pub fn add_edge(&mut self, edge: GraphEdge) {
        let mut known = self.edges.iter().chain(&self.dropped_edges);
        if known.any(|existing| existing.same_link(&edge)) {
            return;
        }
        self.built = false;
        self.edges.push(edge);
    }

    /// Add several edges.
    pub fn add_edges<I>(&mut self, edges: I)
    where
        I: IntoIterator<Item = GraphEdge>,
    {
        for edge in edges {
            self.add_edge(edge);
        }
    }
}
