mod layering_tests;
mod serialization_tests;

use crate::{ComponentGraph, ContentHash, GraphEdge, GraphNode};

/// Node whose id, name and export all derive from `name`.
pub(super) fn node(name: &str) -> GraphNode {
    GraphNode::new(id(name), name, format!("src/{name}.tsx"), name)
}

pub(super) fn id(name: &str) -> ContentHash {
    ContentHash::from_hex(format!("{name}-hash"))
}

/// Graph from `(child, parent)` extends pairs over the named nodes.
pub(super) fn graph(names: &[&str], extends: &[(&str, &str)]) -> ComponentGraph {
    let mut graph = ComponentGraph::new();
    for name in names {
        graph.add_node(node(name));
    }
    for (child, parent) in extends {
        graph.add_edge(GraphEdge::extends(id(child), id(parent)));
    }
    graph.build();
    graph
}
