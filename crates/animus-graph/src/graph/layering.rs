//! Cascade layering for ComponentGraph.
//!
//! `layer(n) = 1 + max(layer(parent))`, or 0 without parents, computed by a
//! memoized depth-first walk over extends edges. A parent met while still on
//! the walk stack closes a cycle: that edge is set aside and the graph is
//! layered as the DAG that remains.

use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};

use super::analysis::CycleReport;
use super::{ComponentGraph, EdgeType, GraphEdge, NodeId};
use crate::diagnostics::GraphDiagnostic;

enum Mark {
    OnStack,
    Done(u32),
}

struct Frame {
    id: NodeId,
    next_parent: usize,
    layer: u32,
}

impl Frame {
    fn new(id: NodeId) -> Self {
        Self {
            id,
            next_parent: 0,
            layer: 0,
        }
    }
}

impl ComponentGraph {
    /// Layer the graph: drop dangling edges, break cycles, assign
    /// `(layer, position)` to every node and refresh the metadata.
    ///
    /// Never fails. Everything recoverable lands in [`Self::diagnostics`].
    pub fn build(&mut self) {
        self.build_diagnostics.clear();
        self.cycles.clear();
        let set_aside = std::mem::take(&mut self.dropped_edges);
        self.edges.extend(set_aside);

        self.drop_dangling_edges();

        let order = self.ordered_ids();
        let parents = self.sorted_parent_lists();
        let layers = self.assign_layers(&order, &parents);

        for (id, layer) in &layers {
            if let Some(node) = self.nodes.get_mut(id) {
                node.cascade.layer = *layer;
            }
        }
        self.assign_positions(&order);
        self.refresh_metadata();
        self.built = true;

        tracing::debug!(
            components = self.nodes.len(),
            edges = self.edges.len(),
            cycles = self.cycles.len(),
            "component graph built"
        );
    }

    fn drop_dangling_edges(&mut self) {
        let nodes = &self.nodes;
        let mut dangling = Vec::new();
        self.edges.retain(|edge| {
            let missing = if !nodes.contains_key(&edge.from) {
                Some(edge.from.clone())
            } else if !nodes.contains_key(&edge.to) {
                Some(edge.to.clone())
            } else {
                None
            };
            match missing {
                Some(missing) => {
                    dangling.push((edge.clone(), missing));
                    false
                }
                None => true,
            }
        });

        for (edge, missing) in dangling {
            tracing::warn!(
                from = %edge.from,
                to = %edge.to,
                edge_type = %edge.edge_type,
                "dropping dangling edge"
            );
            self.build_diagnostics.push(GraphDiagnostic::DanglingEdge {
                from: self.label(&edge.from),
                to: self.label(&edge.to),
                edge_type: edge.edge_type,
                missing: missing.to_string(),
            });
        }
    }

    /// Node ids in deterministic tie-break order.
    pub(super) fn ordered_ids(&self) -> Vec<NodeId> {
        let mut nodes: Vec<_> = self.nodes.values().collect();
        nodes.sort_by(|a, b| a.order_key().cmp(&b.order_key()));
        nodes.into_iter().map(|node| node.id.clone()).collect()
    }

    /// Extends parents per node, in tie-break order.
    fn sorted_parent_lists(&self) -> HashMap<NodeId, Vec<NodeId>> {
        let mut parents: HashMap<NodeId, Vec<NodeId>> = HashMap::default();
        for edge in self.edges.iter().filter(|e| e.edge_type == EdgeType::Extends) {
            parents
                .entry(edge.from.clone())
                .or_default()
                .push(edge.to.clone());
        }
        for list in parents.values_mut() {
            list.sort_by(|a, b| {
                let key_a = self.nodes.get(a).map(|n| n.order_key());
                let key_b = self.nodes.get(b).map(|n| n.order_key());
                key_a.cmp(&key_b)
            });
            list.dedup();
        }
        parents
    }

    fn assign_layers(
        &mut self,
        order: &[NodeId],
        parents: &HashMap<NodeId, Vec<NodeId>>,
    ) -> HashMap<NodeId, u32> {
        let mut marks: HashMap<NodeId, Mark> = HashMap::default();
        let mut back_edges: Vec<(NodeId, NodeId, Vec<NodeId>)> = Vec::new();
        let no_parents = Vec::new();

        for start in order {
            if marks.contains_key(start) {
                continue;
            }

            marks.insert(start.clone(), Mark::OnStack);
            let mut stack = vec![Frame::new(start.clone())];

            while let Some(top) = stack.last() {
                let node_parents = parents.get(&top.id).unwrap_or(&no_parents);

                if top.next_parent < node_parents.len() {
                    let parent = node_parents[top.next_parent].clone();
                    let child = top.id.clone();
                    if let Some(frame) = stack.last_mut() {
                        frame.next_parent += 1;
                    }

                    match marks.get(&parent) {
                        Some(Mark::Done(parent_layer)) => {
                            let parent_layer = *parent_layer;
                            if let Some(frame) = stack.last_mut() {
                                frame.layer = frame.layer.max(parent_layer + 1);
                            }
                        }
                        Some(Mark::OnStack) => {
                            let start_at = stack
                                .iter()
                                .position(|frame| frame.id == parent)
                                .unwrap_or(0);
                            let mut path: Vec<NodeId> =
                                stack[start_at..].iter().map(|f| f.id.clone()).collect();
                            path.push(parent.clone());
                            back_edges.push((child, parent, path));
                        }
                        None => {
                            marks.insert(parent.clone(), Mark::OnStack);
                            stack.push(Frame::new(parent));
                        }
                    }
                } else if let Some(done) = stack.pop() {
                    if let Some(frame) = stack.last_mut() {
                        frame.layer = frame.layer.max(done.layer + 1);
                    }
                    marks.insert(done.id, Mark::Done(done.layer));
                }
            }
        }

        let mut seen_back_edges: HashSet<(NodeId, NodeId)> = HashSet::default();
        for (child, parent, path) in back_edges {
            if !seen_back_edges.insert((child.clone(), parent.clone())) {
                continue;
            }
            self.set_aside_back_edge(child, parent, path);
        }

        marks
            .into_iter()
            .map(|(id, mark)| match mark {
                Mark::Done(layer) => (id, layer),
                Mark::OnStack => (id, 0),
            })
            .collect()
    }

    fn set_aside_back_edge(&mut self, child: NodeId, parent: NodeId, path: Vec<NodeId>) {
        let names: Vec<String> = path.iter().map(|id| self.label(id)).collect();
        tracing::warn!(cycle = %names.join(" -> "), "extends cycle detected");

        self.build_diagnostics.push(GraphDiagnostic::CycleDetected {
            path: names,
            break_from: self.label(&child),
            break_to: self.label(&parent),
        });

        if let Some(index) = self.edges.iter().position(|edge| {
            edge.edge_type == EdgeType::Extends && edge.from == child && edge.to == parent
        }) {
            let edge = self.edges.remove(index);
            self.dropped_edges.push(edge);
        }

        self.cycles.push(CycleReport {
            path,
            break_edge: GraphEdge::extends(child, parent),
        });
    }

    fn assign_positions(&mut self, order: &[NodeId]) {
        let mut next_in_layer: HashMap<u32, u32> = HashMap::default();
        for id in order {
            if let Some(node) = self.nodes.get_mut(id) {
                let slot = next_in_layer.entry(node.cascade.layer).or_insert(0);
                node.cascade.position = *slot;
                *slot += 1;
            }
        }
    }

    fn refresh_metadata(&mut self) {
        let order = self.ordered_ids();
        let mut has_parent: HashSet<&NodeId> = HashSet::default();
        let mut has_child: HashSet<&NodeId> = HashSet::default();
        for edge in self.edges.iter().filter(|e| e.edge_type == EdgeType::Extends) {
            has_parent.insert(&edge.from);
            has_child.insert(&edge.to);
        }

        let root_components = order
            .iter()
            .filter(|id| !has_parent.contains(id))
            .cloned()
            .collect();
        let leaf_components = order
            .iter()
            .filter(|id| !has_child.contains(id))
            .cloned()
            .collect();

        self.metadata.root_components = root_components;
        self.metadata.leaf_components = leaf_components;
        self.metadata.cycle_detected = !self.cycles.is_empty();
        self.metadata.total_components = self.nodes.len();
    }

    /// Display name for known ids, the raw id otherwise.
    pub(super) fn label(&self, id: &NodeId) -> String {
        match self.nodes.get(id) {
            Some(node) => node.name.clone(),
            None => id.to_string(),
        }
    }
}
