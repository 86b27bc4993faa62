use super::{graph, id, node};
use crate::{
    ComponentDefinition, ComponentGraph, ComponentIdentity, ComponentRegistry, EdgeType,
    GraphDiagnostic, GraphEdge, GraphError, StyleMap,
};

#[test]
fn layers_follow_extends_depth() {
    let graph = graph(
        &["Base", "Primary", "PrimaryLarge"],
        &[("Primary", "Base"), ("PrimaryLarge", "Primary")],
    );

    assert!(graph.is_built());
    assert_eq!(graph.layer_of(&id("Base")), Some(0));
    assert_eq!(graph.layer_of(&id("Primary")), Some(1));
    assert_eq!(graph.layer_of(&id("PrimaryLarge")), Some(2));
    assert!(!graph.metadata().cycle_detected);

    let order: Vec<&str> = graph
        .nodes_in_cascade_order()
        .into_iter()
        .map(|n| n.name.as_str())
        .collect();
    assert_eq!(order, vec!["Base", "Primary", "PrimaryLarge"]);
}

#[test]
fn layer_is_longest_path_to_a_root() {
    // D extends B and C; C extends A; B has no parent.
    let graph = graph(
        &["A", "B", "C", "D"],
        &[("C", "A"), ("D", "B"), ("D", "C")],
    );

    assert_eq!(graph.layer_of(&id("A")), Some(0));
    assert_eq!(graph.layer_of(&id("B")), Some(0));
    assert_eq!(graph.layer_of(&id("C")), Some(1));
    assert_eq!(graph.layer_of(&id("D")), Some(2));
}

#[test]
fn positions_are_dense_within_each_layer() {
    let graph = graph(&["A", "B", "C", "X"], &[("X", "A")]);

    let layer_zero: Vec<(&str, u32)> = graph
        .nodes_in_cascade_order()
        .into_iter()
        .filter(|n| n.cascade.layer == 0)
        .map(|n| (n.name.as_str(), n.cascade.position))
        .collect();
    assert_eq!(layer_zero, vec![("A", 0), ("B", 1), ("C", 2)]);
    assert_eq!(graph.node(&id("X")).map(|n| n.cascade.position), Some(0));
}

#[test]
fn insertion_order_does_not_change_layout() {
    let names = ["Card", "Base", "Primary", "Alert", "Danger"];
    let extends = [("Primary", "Base"), ("Danger", "Alert"), ("Card", "Base")];

    let forward = graph(&names, &extends);
    let mut reversed_names = names;
    reversed_names.reverse();
    let mut reversed_edges = extends;
    reversed_edges.reverse();
    let backward = graph(&reversed_names, &reversed_edges);

    for name in names {
        assert_eq!(
            forward.node(&id(name)).map(|n| n.cascade),
            backward.node(&id(name)).map(|n| n.cascade),
            "cascade position of {name} depends on insertion order"
        );
    }
}

#[test]
fn two_node_cycle_is_broken_and_reported() {
    let graph = graph(&["A", "B"], &[("A", "B"), ("B", "A")]);

    assert!(graph.metadata().cycle_detected);
    assert_eq!(graph.cycles().len(), 1);
    assert_eq!(graph.dropped_edges().len(), 1);

    let dropped = &graph.dropped_edges()[0];
    assert_eq!((&dropped.from, &dropped.to), (&id("B"), &id("A")));
    assert_eq!(graph.layer_of(&id("B")), Some(0));
    assert_eq!(graph.layer_of(&id("A")), Some(1));

    let cycle = &graph.cycles()[0];
    assert_eq!(cycle.path, vec![id("A"), id("B"), id("A")]);

    let reported: Vec<_> = graph
        .diagnostics()
        .filter(|d| matches!(d, GraphDiagnostic::CycleDetected { .. }))
        .collect();
    assert_eq!(reported.len(), 1);
    assert!(reported[0].is_warning());
    assert_eq!(reported[0].to_string(), "extends cycle detected: A -> B -> A");
}

#[test]
fn self_extension_stays_at_layer_zero() {
    let graph = graph(&["Loop"], &[("Loop", "Loop")]);

    assert_eq!(graph.layer_of(&id("Loop")), Some(0));
    assert!(graph.metadata().cycle_detected);
    assert_eq!(graph.cycles()[0].path, vec![id("Loop"), id("Loop")]);
    assert_eq!(graph.metadata().root_components, vec![id("Loop")]);
}

#[test]
fn rebuild_is_idempotent() {
    let mut graph = graph(&["A", "B", "C"], &[("A", "B"), ("B", "C"), ("C", "A")]);
    let first: Vec<_> = graph.nodes().map(|n| n.cascade).collect();
    let first_cycles = graph.cycles().len();

    graph.build();
    let second: Vec<_> = graph.nodes().map(|n| n.cascade).collect();

    assert_eq!(first, second);
    assert_eq!(graph.cycles().len(), first_cycles);
    assert_eq!(
        graph
            .diagnostics()
            .filter(|d| matches!(d, GraphDiagnostic::CycleDetected { .. }))
            .count(),
        1
    );
}

#[test]
fn dangling_edges_are_dropped_with_a_diagnostic() {
    let mut graph = ComponentGraph::new();
    graph.add_node(node("Button"));
    graph.add_edge(GraphEdge::extends(id("Button"), id("Ghost")));
    graph.build();

    assert!(graph.edges().is_empty());
    assert_eq!(graph.layer_of(&id("Button")), Some(0));
    let diagnostics: Vec<_> = graph.diagnostics().collect();
    assert!(matches!(
        diagnostics.as_slice(),
        [GraphDiagnostic::DanglingEdge { edge_type: EdgeType::Extends, missing, .. }]
            if missing == "Ghost-hash"
    ));
}

#[test]
fn duplicate_edges_are_ignored() {
    let graph = graph(&["A", "B"], &[("B", "A"), ("B", "A")]);
    assert_eq!(graph.edges().len(), 1);
}

#[test]
fn mutation_invalidates_layout() {
    let mut graph = graph(&["A"], &[]);
    graph.add_node(node("B"));

    assert!(!graph.is_built());
    assert!(matches!(graph.analyze(), Err(GraphError::NotBuilt)));
}

#[test]
fn roots_and_leaves_use_extends_edges_only() {
    let mut graph = ComponentGraph::new();
    for name in ["Base", "Child", "Icon"] {
        graph.add_node(node(name));
    }
    graph.add_edge(GraphEdge::extends(id("Child"), id("Base")));
    graph.add_edge(GraphEdge::uses(id("Child"), id("Icon")));
    graph.build();

    assert_eq!(graph.metadata().root_components, vec![id("Base"), id("Icon")]);
    assert_eq!(graph.metadata().leaf_components, vec![id("Child"), id("Icon")]);
    assert_eq!(graph.layer_of(&id("Icon")), Some(0));
    assert_eq!(graph.metadata().total_components, 3);
}

#[test]
fn analysis_reports_layers_critical_path_and_orphans() {
    let graph = graph(
        &["Base", "Primary", "PrimaryLarge", "Lonely"],
        &[("Primary", "Base"), ("PrimaryLarge", "Primary")],
    );
    let analysis = graph.analyze().unwrap();

    assert_eq!(analysis.layers[&0], vec![id("Base"), id("Lonely")]);
    assert_eq!(analysis.layers[&2], vec![id("PrimaryLarge")]);
    assert_eq!(
        analysis.critical_path.nodes,
        vec![id("Base"), id("Primary"), id("PrimaryLarge")]
    );
    assert_eq!(analysis.critical_path.length, 2);
    assert_eq!(analysis.orphans, vec![id("Lonely")]);
    assert!(analysis.cycles.is_empty());

    let stats = analysis.statistics;
    assert_eq!(stats.node_count, 4);
    assert_eq!(stats.edges_by_type.get(&EdgeType::Extends), Some(&2));
    assert_eq!(stats.layer_count, 3);
    assert_eq!(stats.max_depth, 2);
}

#[test]
fn from_registry_wires_extends_and_uses() {
    let base = ComponentDefinition::new("Base", "src/Base.tsx", "Base")
        .with_styles(StyleMap::new().with("padding", 4))
        .sealed();
    let icon = ComponentDefinition::new("Icon", "src/Icon.tsx", "Icon").sealed();
    let primary = ComponentDefinition::new("Primary", "src/Primary.tsx", "Primary")
        .with_styles(StyleMap::new().with("color", "blue"))
        .extends(&base.identity)
        .uses(&icon.identity)
        .sealed();

    let registry =
        ComponentRegistry::from_definitions([primary.clone(), icon.clone(), base.clone()]);
    let graph = ComponentGraph::from_registry(&registry);

    assert_eq!(graph.len(), 3);
    assert_eq!(graph.layer_of(primary.id()), Some(1));
    assert_eq!(
        graph.parents(primary.id()).iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
        vec!["Base"]
    );
    assert_eq!(
        graph.children(base.id()).iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
        vec!["Primary"]
    );
    assert_eq!(
        graph.used_by(primary.id()).iter().map(|n| n.name.as_str()).collect::<Vec<_>>(),
        vec!["Icon"]
    );
    assert_eq!(graph.diagnostics().count(), 0);
}

#[test]
fn missing_parent_is_reported_once() {
    let ghost = ComponentIdentity::new("Ghost", "src/Ghost.tsx", "Ghost");
    let child = ComponentDefinition::new("Child", "src/Child.tsx", "Child")
        .extends(&ghost)
        .sealed();

    let registry = ComponentRegistry::from_definitions([child.clone()]);
    let graph = ComponentGraph::from_registry(&registry);
    let diagnostics: Vec<_> = graph.diagnostics().collect();

    assert_eq!(graph.layer_of(child.id()), Some(0));
    assert!(matches!(
        diagnostics.as_slice(),
        [GraphDiagnostic::ParentNotFound { component, parent, .. }]
            if component == "Child" && parent == "Ghost"
    ));
}

#[test]
fn unresolved_uses_becomes_dangling_edge() {
    let missing = ComponentIdentity::new("Tooltip", "src/Tooltip.tsx", "Tooltip");
    let card = ComponentDefinition::new("Card", "src/Card.tsx", "Card")
        .uses(&missing)
        .sealed();

    let graph = ComponentGraph::from_registry(&ComponentRegistry::from_definitions([card]));

    assert!(graph.edges().is_empty());
    assert!(graph.diagnostics().any(|d| matches!(
        d,
        GraphDiagnostic::DanglingEdge { edge_type: EdgeType::Uses, missing, .. }
            if missing == "unresolved:src/Tooltip.tsx#Tooltip"
    )));
}
