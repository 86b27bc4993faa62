//! Serialization methods for ComponentGraph.
//!
//! Every format is read-only. Trees descend from root components through
//! extends edges; an edge set aside to break a cycle is printed once under its
//! target with a `(cycle)` marker.

use std::fmt::Write as _;

use serde::Serialize;

use super::analysis::GraphAnalysis;
use super::{ComponentGraph, EdgeType, GraphEdge, GraphMetadata, GraphNode, NodeId};
use crate::error::Result;

/// Escape labels for DOT format.
fn escape_label(label: &str) -> String {
    label.replace('\\', "\\\\").replace('"', "\\\"")
}

/// Mermaid ids must be plain words.
fn mermaid_id(id: &NodeId) -> String {
    let short: String = id
        .as_str()
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("n_{short}")
}

fn node_label(node: &GraphNode) -> String {
    format!(
        "{} [{}:{}]",
        node.name, node.cascade.layer, node.cascade.position
    )
}

impl ComponentGraph {
    /// Nodes, edges, metadata and analysis as one JSON document.
    pub fn to_json(&self) -> Result<String> {
        #[derive(Serialize)]
        #[serde(rename_all = "camelCase")]
        struct GraphJson<'a> {
            nodes: Vec<&'a GraphNode>,
            edges: &'a [GraphEdge],
            dropped_edges: &'a [GraphEdge],
            metadata: &'a GraphMetadata,
            #[serde(skip_serializing_if = "Option::is_none")]
            analysis: Option<GraphAnalysis>,
        }

        let document = GraphJson {
            nodes: self.nodes_in_cascade_order(),
            edges: &self.edges,
            dropped_edges: &self.dropped_edges,
            metadata: &self.metadata,
            analysis: self.analyze().ok(),
        };

        Ok(serde_json::to_string_pretty(&document)?)
    }

    /// Export the graph as a DOT digraph, edges pointing child → parent.
    pub fn to_dot(&self) -> String {
        let mut output = String::from("digraph ComponentGraph {\n    rankdir=BT;\n");

        for node in self.nodes_in_cascade_order() {
            let _ = writeln!(
                output,
                "    \"{}\" [label=\"{}\"];",
                escape_label(node.id.as_str()),
                escape_label(&node_label(node))
            );
        }

        for edge in &self.edges {
            let style = match edge.edge_type {
                EdgeType::Extends => "solid",
                _ => "dashed",
            };
            let _ = writeln!(
                output,
                "    \"{}\" -> \"{}\" [label=\"{}\", style={}];",
                escape_label(edge.from.as_str()),
                escape_label(edge.to.as_str()),
                edge.edge_type,
                style
            );
        }

        for edge in &self.dropped_edges {
            let _ = writeln!(
                output,
                "    \"{}\" -> \"{}\" [label=\"cycle\", style=dotted, color=red];",
                escape_label(edge.from.as_str()),
                escape_label(edge.to.as_str())
            );
        }

        output.push_str("}\n");
        output
    }

    /// Export the graph as a Mermaid flowchart, parents on top.
    pub fn to_mermaid(&self) -> String {
        let mut output = String::from("flowchart TD\n");

        for node in self.nodes_in_cascade_order() {
            let _ = writeln!(
                output,
                "    {}[\"{}\"]",
                mermaid_id(&node.id),
                node_label(node).replace('"', "#quot;")
            );
        }

        for edge in &self.edges {
            let arrow = match edge.edge_type {
                EdgeType::Extends => "-->",
                _ => "-.->",
            };
            let _ = writeln!(
                output,
                "    {} {}|{}| {}",
                mermaid_id(&edge.to),
                arrow,
                edge.edge_type,
                mermaid_id(&edge.from)
            );
        }

        for edge in &self.dropped_edges {
            let _ = writeln!(
                output,
                "    {} -.-x|cycle| {}",
                mermaid_id(&edge.to),
                mermaid_id(&edge.from)
            );
        }

        output
    }

    /// Box-drawing tree of the extends hierarchy.
    pub fn to_box_tree(&self) -> String {
        let mut output = String::new();
        for root in self.tree_roots() {
            let _ = writeln!(output, "{}", node_label(root));
            self.write_box_children(&mut output, &root.id, "");
        }
        output
    }

    fn write_box_children(&self, output: &mut String, id: &NodeId, prefix: &str) {
        let entries = self.tree_entries(id);
        let count = entries.len();

        for (index, entry) in entries.into_iter().enumerate() {
            let last = index + 1 == count;
            let (branch, indent) = if last {
                ("└── ", "    ")
            } else {
                ("├── ", "│   ")
            };
            match entry {
                TreeEntry::Child(node) => {
                    let _ = writeln!(output, "{prefix}{branch}{}", node_label(node));
                    self.write_box_children(output, &node.id, &format!("{prefix}{indent}"));
                }
                TreeEntry::Cycle(name) => {
                    let _ = writeln!(output, "{prefix}{branch}{name} (cycle)");
                }
            }
        }
    }

    /// Indented text tree of the extends hierarchy.
    pub fn to_text_tree(&self) -> String {
        let mut output = String::new();
        for root in self.tree_roots() {
            self.write_text_node(&mut output, root, 0);
        }
        output
    }

    fn write_text_node(&self, output: &mut String, node: &GraphNode, depth: usize) {
        let indent = "  ".repeat(depth);
        let _ = writeln!(output, "{indent}{}", node_label(node));

        for entry in self.tree_entries(&node.id) {
            match entry {
                TreeEntry::Child(child) => self.write_text_node(output, child, depth + 1),
                TreeEntry::Cycle(name) => {
                    let _ = writeln!(output, "{indent}  {name} (cycle)");
                }
            }
        }
    }

    fn tree_roots(&self) -> Vec<&GraphNode> {
        self.metadata
            .root_components
            .iter()
            .filter_map(|id| self.nodes.get(id))
            .collect()
    }

    fn tree_entries(&self, id: &NodeId) -> Vec<TreeEntry<'_>> {
        let mut entries: Vec<TreeEntry<'_>> =
            self.children(id).into_iter().map(TreeEntry::Child).collect();

        for edge in self.dropped_edges.iter().filter(|edge| &edge.to == id) {
            entries.push(TreeEntry::Cycle(self.label(&edge.from)));
        }
        entries
    }
}

enum TreeEntry<'a> {
    Child(&'a GraphNode),
    Cycle(String),
}
