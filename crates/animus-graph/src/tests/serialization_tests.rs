use super::graph;

#[test]
fn box_tree_nests_children_under_parents() {
    let graph = graph(
        &["Base", "Primary", "Secondary", "PrimaryLarge"],
        &[
            ("Primary", "Base"),
            ("Secondary", "Base"),
            ("PrimaryLarge", "Primary"),
        ],
    );

    let expected = "\
Base [0:0]
├── Primary [1:0]
│   └── PrimaryLarge [2:0]
└── Secondary [1:1]
";
    assert_eq!(graph.to_box_tree(), expected);
}

#[test]
fn text_tree_marks_cycles_once() {
    let graph = graph(&["A", "B"], &[("A", "B"), ("B", "A")]);

    let expected = "\
B [0:0]
  A [1:0]
    B (cycle)
";
    assert_eq!(graph.to_text_tree(), expected);
}

#[test]
fn dot_output_lists_nodes_and_edges() {
    let graph = graph(&["Base", "Primary"], &[("Primary", "Base")]);
    let dot = graph.to_dot();

    assert!(dot.starts_with("digraph ComponentGraph {"));
    assert!(dot.contains("\"Base-hash\" [label=\"Base [0:0]\"];"));
    assert!(dot.contains("\"Primary-hash\" -> \"Base-hash\" [label=\"extends\", style=solid];"));
    assert!(dot.trim_end().ends_with('}'));
}

#[test]
fn mermaid_output_points_parent_to_child() {
    let graph = graph(&["Base", "Primary"], &[("Primary", "Base")]);
    let mermaid = graph.to_mermaid();

    assert!(mermaid.starts_with("flowchart TD\n"));
    assert!(mermaid.contains("n_Base_hash[\"Base [0:0]\"]"));
    assert!(mermaid.contains("n_Base_hash -->|extends| n_Primary_hash"));
}

#[test]
fn json_document_carries_analysis() {
    let graph = graph(&["Base", "Primary"], &[("Primary", "Base")]);
    let json: serde_json::Value = serde_json::from_str(&graph.to_json().unwrap()).unwrap();

    assert_eq!(json["nodes"][1]["name"], "Primary");
    assert_eq!(json["nodes"][1]["cascade"]["layer"], 1);
    assert_eq!(json["edges"][0]["type"], "extends");
    assert_eq!(json["metadata"]["rootComponents"][0], "Base-hash");
    assert_eq!(json["analysis"]["criticalPath"]["length"], 1);
    assert_eq!(json["analysis"]["statistics"]["edgesByType"]["extends"], 1);
}
