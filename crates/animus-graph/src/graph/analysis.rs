//! Structural analysis of a built ComponentGraph.

use std::collections::BTreeMap;

use serde::Serialize;

use super::statistics::GraphStatistics;
use super::{ComponentGraph, EdgeType, GraphEdge, NodeId};
use crate::error::{GraphError, Result};

/// An extends cycle and the edge that was set aside to break it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CycleReport {
    /// Node ids around the cycle; the first id repeats at the end.
    pub path: Vec<NodeId>,
    pub break_edge: GraphEdge,
}

/// Longest extends chain in the graph.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct CriticalPath {
    /// Root first.
    pub nodes: Vec<NodeId>,
    pub length: usize,
}

impl CriticalPath {
    fn new(nodes: Vec<NodeId>) -> Self {
        let length = nodes.len().saturating_sub(1);
        Self { nodes, length }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GraphAnalysis {
    /// Layer → members in position order.
    pub layers: BTreeMap<u32, Vec<NodeId>>,
    pub critical_path: CriticalPath,
    /// Nodes with no extends edge in either direction.
    pub orphans: Vec<NodeId>,
    pub cycles: Vec<CycleReport>,
    pub statistics: GraphStatistics,
}

impl ComponentGraph {
    /// Per-layer membership, critical path, orphans and cycles.
    pub fn analyze(&self) -> Result<GraphAnalysis> {
        if !self.built {
            return Err(GraphError::NotBuilt);
        }

        let mut layers: BTreeMap<u32, Vec<NodeId>> = BTreeMap::new();
        for node in self.nodes_in_cascade_order() {
            layers
                .entry(node.cascade.layer)
                .or_default()
                .push(node.id.clone());
        }

        Ok(GraphAnalysis {
            layers,
            critical_path: self.critical_path(),
            orphans: self.orphans(),
            cycles: self.cycles.clone(),
            statistics: self.statistics(),
        })
    }

    /// Walk back from the deepest node through parents one layer up.
    fn critical_path(&self) -> CriticalPath {
        let Some(deepest) = self
            .nodes_in_cascade_order()
            .into_iter()
            .max_by(|a, b| {
                a.cascade
                    .layer
                    .cmp(&b.cascade.layer)
                    .then(b.cascade.position.cmp(&a.cascade.position))
            })
        else {
            return CriticalPath::default();
        };

        let mut path = vec![deepest.id.clone()];
        let mut current = deepest;
        while current.cascade.layer > 0 {
            let Some(parent) = self
                .parents(&current.id)
                .into_iter()
                .find(|p| p.cascade.layer + 1 == current.cascade.layer)
            else {
                break;
            };
            path.push(parent.id.clone());
            current = parent;
        }

        path.reverse();
        CriticalPath::new(path)
    }

    fn orphans(&self) -> Vec<NodeId> {
        let linked: Vec<&NodeId> = self
            .edges
            .iter()
            .filter(|edge| edge.edge_type == EdgeType::Extends)
            .flat_map(|edge| [&edge.from, &edge.to])
            .collect();

        self.ordered_ids()
            .into_iter()
            .filter(|id| !linked.contains(&id))
            .collect()
    }
}
