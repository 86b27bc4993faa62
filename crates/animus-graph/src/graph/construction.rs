//! Construction methods for ComponentGraph.

use super::{ComponentGraph, GraphEdge, GraphNode, NodeMetadata};
use crate::component::{ComponentDefinition, ContentHash};
use crate::diagnostics::GraphDiagnostic;
use crate::registry::ComponentRegistry;

impl ComponentGraph {
    /// Create a new empty graph.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a graph over every registered component: one node per
    /// component, an extends edge per declared parent and a uses edge per
    /// `uses` entry. The returned graph is already built.
    pub fn from_registry(registry: &ComponentRegistry) -> Self {
        let mut graph = Self::new();

        for definition in registry.iter() {
            graph.add_node(node_for(definition));
        }

        for definition in registry.iter() {
            let child = definition.id().clone();

            if let Some(parent) = &definition.parent {
                match registry.resolve_ref(parent) {
                    Some(parent_id) => {
                        graph.add_edge(
                            GraphEdge::extends(child.clone(), parent_id.clone())
                                .with_metadata("declared", parent.name.clone()),
                        );
                    }
                    None => {
                        graph.diagnostics.push(GraphDiagnostic::ParentNotFound {
                            component: definition.identity.name.clone(),
                            parent: parent.name.clone(),
                            file_path: parent.file_path.clone(),
                            export_name: parent.export_name.clone(),
                        });
                    }
                }
            }

            for used in &definition.uses {
                let target = registry.resolve_ref(used).cloned().unwrap_or_else(|| {
                    ContentHash::unresolved(&used.file_path, &used.export_name)
                });
                graph.add_edge(GraphEdge::uses(child.clone(), target));
            }
        }

        graph.build();
        graph
    }
}

fn node_for(definition: &ComponentDefinition) -> GraphNode {
    let identity = &definition.identity;
    let mut node = GraphNode::new(
        identity.content_hash.clone(),
        &identity.name,
        &identity.file_path,
        &identity.export_name,
    );
    node.metadata = NodeMetadata {
        variant_count: definition.variants.len(),
        state_count: definition.states.len(),
        groups: definition.enabled_groups.iter().cloned().collect(),
    };
    node
}
