//! Statistics for ComponentGraph.

use std::collections::BTreeMap;

use serde::Serialize;

use super::{ComponentGraph, EdgeType};

/// Counts snapshot for reporting.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphStatistics {
    pub node_count: usize,
    pub edge_count: usize,
    pub edges_by_type: BTreeMap<EdgeType, usize>,
    pub layer_count: usize,
    /// Highest layer index; equals the longest extends chain.
    pub max_depth: u32,
    pub dropped_edge_count: usize,
    pub cycle_count: usize,
}

impl ComponentGraph {
    pub fn statistics(&self) -> GraphStatistics {
        let mut edges_by_type = BTreeMap::new();
        for edge in &self.edges {
            *edges_by_type.entry(edge.edge_type).or_insert(0) += 1;
        }

        let max_depth = self
            .nodes
            .values()
            .map(|node| node.cascade.layer)
            .max()
            .unwrap_or(0);
        let layer_count = if self.nodes.is_empty() {
            0
        } else {
            max_depth as usize + 1
        };

        GraphStatistics {
            node_count: self.nodes.len(),
            edge_count: self.edges.len(),
            edges_by_type,
            layer_count,
            max_depth,
            dropped_edge_count: self.dropped_edges.len(),
            cycle_count: self.cycles.len(),
        }
    }
}
