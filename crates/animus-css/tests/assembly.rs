//! End-to-end stylesheet assembly.

use animus_config::{AnimusConfig, GeneratorMode, ThemeResolution};
use animus_css::{
    generate_layered_css, generator_for, CssError, GeneratedCss, GenerationInput, GroupDefs,
    StyleDiagnostic, UsageMap,
};
use animus_graph::{
    ComponentDefinition, ComponentGraph, ComponentRegistry, GraphDiagnostic, PropSpec, StyleMap,
    Variant,
};
use serde_json::{json, Value};

fn def(name: &str) -> ComponentDefinition {
    ComponentDefinition::new(name, format!("src/{name}.tsx"), name)
}

fn theme() -> Value {
    json!({
        "colors": { "primary": "#007bff", "secondary": "#6c757d" },
        "space": [0, 4, 8, 16]
    })
}

fn run(config: &AnimusConfig, definitions: Vec<ComponentDefinition>, usage: &UsageMap) -> GeneratedCss {
    let theme = theme();
    let groups = GroupDefs::default();
    let registry = ComponentRegistry::from_definitions(definitions);
    let graph = ComponentGraph::from_registry(&registry);

    generator_for(config.mode)
        .generate(&GenerationInput {
            config,
            theme: &theme,
            groups: &groups,
            registry: &registry,
            graph: &graph,
            usage,
        })
        .unwrap()
}

fn base_class<'o>(output: &'o GeneratedCss, name: &str) -> &'o str {
    output
        .metadata
        .values()
        .find(|m| m.name == name)
        .map(|m| m.base_class.as_str())
        .unwrap()
}

fn rule_offset(css: &str, class: &str) -> usize {
    css.find(&format!(".{class} {{"))
        .unwrap_or_else(|| panic!("no rule for .{class} in\n{css}"))
}

#[test]
fn hybrid_atomic_uses_theme_variable() {
    let button = def("Button").with_groups(["color"]).sealed();
    let usage = UsageMap::new().with("Button", "bg", "primary", "_");
    let output = run(&AnimusConfig::default(), vec![button], &usage);

    assert!(output.css.starts_with(":root {\n  --animus-colors-primary: #007bff;\n}\n"));
    assert!(output.css.contains(
        ".animus-bg-primary {\n  background-color: var(--animus-colors-primary);\n}\n"
    ));
    assert_eq!(output.used_variables, vec!["--animus-colors-primary"]);
    assert_eq!(output.atomics.len(), 1);
    assert_eq!(output.atomics[0].source_rule, "bg");
}

#[test]
fn children_follow_parents_regardless_of_registration_order() {
    let base = def("Base")
        .with_styles(StyleMap::new().with("color", "black").with("padding", 4))
        .sealed();
    let primary = def("Primary")
        .with_styles(StyleMap::new().with("color", "blue"))
        .extends(&base.identity)
        .sealed();
    let large = def("PrimaryLarge")
        .with_styles(StyleMap::new().with("padding", 16))
        .extends(&primary.identity)
        .sealed();

    let output = run(
        &AnimusConfig::default(),
        vec![large, primary, base],
        &UsageMap::new(),
    );

    let base_at = rule_offset(&output.css, base_class(&output, "Base"));
    let primary_at = rule_offset(&output.css, base_class(&output, "Primary"));
    let large_at = rule_offset(&output.css, base_class(&output, "PrimaryLarge"));
    assert!(base_at < primary_at && primary_at < large_at, "{}", output.css);

    let large_meta = output.metadata.values().find(|m| m.name == "PrimaryLarge").unwrap();
    assert_eq!(
        large_meta.lineage,
        vec![
            base_class(&output, "Base").to_string(),
            base_class(&output, "Primary").to_string()
        ]
    );
}

#[test]
fn legacy_mode_keeps_registration_order() {
    let base = def("Base").with_styles(StyleMap::new().with("color", "black")).sealed();
    let child = def("Child")
        .with_styles(StyleMap::new().with("color", "blue"))
        .extends(&base.identity)
        .sealed();

    let config = AnimusConfig {
        layered: false,
        ..AnimusConfig::default()
    };
    let output = run(&config, vec![child, base], &UsageMap::new());

    let child_at = rule_offset(&output.css, base_class(&output, "Child"));
    let base_at = rule_offset(&output.css, base_class(&output, "Base"));
    assert!(child_at < base_at);
}

#[test]
fn sections_are_emitted_in_fixed_order() {
    let button = def("Button")
        .with_styles(StyleMap::new().with("display", "inline-flex"))
        .with_variant(
            Variant::new("size")
                .case("sm", StyleMap::new().with("p", 1))
                .case("lg", StyleMap::new().with("p", 3)),
        )
        .with_state("disabled", StyleMap::new().with("opacity", 0.5))
        .with_groups(["space"])
        .sealed();
    let usage = UsageMap::new().with("Button", "p", 2, "_");
    let output = run(&AnimusConfig::default(), vec![button], &usage);

    let base = base_class(&output, "Button").to_string();
    let order = [
        rule_offset(&output.css, &base),
        rule_offset(&output.css, &format!("{base}--size-sm")),
        rule_offset(&output.css, &format!("{base}--size-lg")),
        rule_offset(&output.css, &format!("{base}--disabled")),
        rule_offset(&output.css, "animus-p-2"),
    ];
    assert!(order.windows(2).all(|w| w[0] < w[1]), "{}", output.css);
    assert!(output.css.contains(".animus-p-2 {\n  padding: 8px;\n}\n"));
}

#[test]
fn unused_atomics_are_shaken_but_variants_remain() {
    let button = def("Button")
        .with_variant(Variant::new("tone").case("loud", StyleMap::new().with("bg", "primary")))
        .with_groups(["space", "color"])
        .sealed();
    let output = run(&AnimusConfig::default(), vec![button], &UsageMap::new());

    assert!(output.atomics.is_empty());
    assert!(!output.css.contains(".animus-p-"));
    let meta = output.metadata.values().next().unwrap();
    let loud = &meta.variants["tone"]["loud"];
    assert_eq!(loud.len(), 1);
    rule_offset(&output.css, &loud[0]);
}

#[test]
fn responsive_atomics_follow_base_atomics() {
    let button = def("Button").with_groups(["color"]).sealed();
    let usage = UsageMap::new()
        .with("Button", "bg", "secondary", "sm")
        .with("Button", "bg", "primary", "_");
    let output = run(&AnimusConfig::default(), vec![button], &usage);

    assert!(output.css.ends_with(
        "\
.animus-bg-primary {
  background-color: var(--animus-colors-primary);
}
@media (min-width: 768px) {
  .animus-bg-secondary-sm {
    background-color: var(--animus-colors-secondary);
  }
}
"
    ));
    let classes: Vec<_> = output.atomics.iter().map(|a| a.class_name.as_str()).collect();
    assert_eq!(classes, vec!["animus-bg-primary", "animus-bg-secondary-sm"]);
}

#[test]
fn atomics_are_shared_by_rendered_css_not_by_spelling() {
    let boxed = def("Box").with_groups(["space"]).sealed();
    let card = def("Card").with_prop("pad", PropSpec::new("padding")).sealed();
    let inset = def("Inset").with_groups(["space"]).sealed();
    let usage = UsageMap::new()
        .with("Box", "p", 2, "_")
        .with("Card", "pad", 2, "_")
        .with("Inset", "p", "8px", "_");
    let output = run(&AnimusConfig::default(), vec![boxed, card, inset], &usage);

    let class = |name: &str, prop: &str, entry: &str| {
        output
            .metadata
            .values()
            .find(|m| m.name == name)
            .map(|m| m.atomics[prop][entry].clone())
            .unwrap()
    };
    let box_class = class("Box", "p", "2:_");
    let card_class = class("Card", "pad", "2:_");

    assert_ne!(box_class, card_class);
    assert_eq!(class("Inset", "p", "8px:_"), box_class);
    assert!(output.css.contains(&format!(".{box_class} {{\n  padding: 8px;\n}}")));
    assert!(output.css.contains(&format!(".{card_class} {{\n  padding: 2px;\n}}")));
    assert_eq!(output.atomics.len(), 2);
}

#[test]
fn metadata_classes_are_all_emitted() {
    let base = def("Base")
        .with_styles(StyleMap::new().with("p", 2))
        .with_state("active", StyleMap::new().with("color", "primary"))
        .with_groups(["space", "color"])
        .sealed();
    let child = def("Child")
        .with_variant(
            Variant::new("size")
                .case("lg", StyleMap::new().with("p", 3))
                .case("1.5", StyleMap::new().with("p", 1)),
        )
        .with_state("aria busy", StyleMap::new().with("opacity", 0.6))
        .extends(&base.identity)
        .sealed();
    let usage = UsageMap::new().with("Child", "mx", 1, "_");
    let output = run(&AnimusConfig::default(), vec![base, child], &usage);

    let child_meta = output.metadata.values().find(|m| m.name == "Child").unwrap();
    assert!(child_meta.system_props.contains(&"mx".to_string()));
    assert_eq!(child_meta.atomics["mx"]["1:_"], "animus-mx-1");
    assert!(child_meta.variants["size"]["1.5"][0].ends_with("--size-1-5"));
    assert!(child_meta.states["aria busy"][0].ends_with("--aria-busy"));

    for meta in output.metadata.values() {
        for class in meta.class_names().skip(1) {
            rule_offset(&output.css, class);
        }
    }
}

#[test]
fn unknown_usage_is_reported_not_fatal() {
    let button = def("Button").with_groups(["color", "missing"]).sealed();
    let usage = UsageMap::new()
        .with("Ghost", "bg", "primary", "_")
        .with("Button", "p", 2, "_")
        .with("Button", "bg", "primary", "huge");
    let output = run(&AnimusConfig::default(), vec![button], &usage);

    assert!(output.atomics.is_empty());
    let has = |wanted: fn(&StyleDiagnostic) -> bool| output.diagnostics.iter().any(wanted);
    assert!(has(|d| matches!(d, StyleDiagnostic::UnknownGroup { group, .. } if group == "missing")));
    assert!(has(|d| matches!(d, StyleDiagnostic::UnknownUsageComponent { component } if component == "Ghost")));
    assert!(has(|d| matches!(d, StyleDiagnostic::UnknownUsageProp { prop, .. } if prop == "p")));
    assert!(has(|d| matches!(d, StyleDiagnostic::UnknownBreakpoint { breakpoint, .. } if breakpoint == "huge")));
}

#[test]
fn cycles_still_produce_a_stylesheet() {
    let a_ident = def("A").with_styles(StyleMap::new().with("color", "red")).sealed().identity;
    let b = def("B")
        .with_styles(StyleMap::new().with("color", "blue"))
        .extends(&a_ident)
        .sealed();
    let a = def("A")
        .with_styles(StyleMap::new().with("color", "red"))
        .extends(&b.identity)
        .sealed();

    let theme = theme();
    let groups = GroupDefs::default();
    let usage = UsageMap::new();
    let config = AnimusConfig::default();
    let registry = ComponentRegistry::from_definitions([a, b]);
    let graph = ComponentGraph::from_registry(&registry);
    assert!(graph
        .diagnostics()
        .any(|d| matches!(d, GraphDiagnostic::CycleDetected { .. })));

    let output = generate_layered_css(&GenerationInput {
        config: &config,
        theme: &theme,
        groups: &groups,
        registry: &registry,
        graph: &graph,
        usage: &usage,
    })
    .unwrap();

    rule_offset(&output.css, base_class(&output, "A"));
    rule_offset(&output.css, base_class(&output, "B"));
}

#[test]
fn lineage_classes_precede_the_component_even_across_a_cycle() {
    let a_ident = def("A").sealed().identity;
    let b = def("B")
        .with_styles(StyleMap::new().with("color", "blue"))
        .with_groups(["color"])
        .extends(&a_ident)
        .sealed();
    let a = def("A")
        .with_styles(StyleMap::new().with("color", "red"))
        .with_groups(["space"])
        .extends(&b.identity)
        .sealed();
    let output = run(&AnimusConfig::default(), vec![a, b], &UsageMap::new());

    let mut roots = 0;
    for meta in output.metadata.values() {
        let own_at = rule_offset(&output.css, &meta.base_class);
        for ancestor in &meta.lineage {
            assert!(
                rule_offset(&output.css, ancestor) < own_at,
                "{} lists {ancestor} emitted after it\n{}",
                meta.name,
                output.css
            );
        }
        if meta.lineage.is_empty() {
            roots += 1;
            let inherited = if meta.name == "A" { "bg" } else { "p" };
            assert!(!meta.system_props.contains(&inherited.to_string()), "{meta:?}");
        }
    }
    assert_eq!(roots, 1);
}

#[test]
fn unbuilt_graph_is_an_error() {
    let theme = theme();
    let groups = GroupDefs::default();
    let usage = UsageMap::new();
    let config = AnimusConfig::default();
    let registry = ComponentRegistry::from_definitions([def("Box")]);
    let graph = ComponentGraph::new();

    let result = generate_layered_css(&GenerationInput {
        config: &config,
        theme: &theme,
        groups: &groups,
        registry: &registry,
        graph: &graph,
        usage: &usage,
    });
    assert!(matches!(result, Err(CssError::Graph(_))));
}

#[test]
fn css_variable_mode_writes_one_variable_per_token() {
    let card = def("Card")
        .with_styles(
            StyleMap::new()
                .with("color", "colors.primary")
                .with("&:hover", StyleMap::new().with("color", "colors.primary")),
        )
        .sealed();
    let config = AnimusConfig {
        theme_resolution: ThemeResolution::CssVariable,
        ..AnimusConfig::default()
    };
    let output = run(&config, vec![card], &UsageMap::new());

    assert_eq!(output.css.matches("--animus-colors-primary:").count(), 1);
    assert_eq!(output.used_variables, vec!["--animus-colors-primary"]);
}

#[test]
fn runtime_mode_emits_theme_and_metadata_only() {
    let button = def("Button")
        .with_styles(StyleMap::new().with("bg", "primary"))
        .with_groups(["color"])
        .sealed();
    let usage = UsageMap::new().with("Button", "bg", "secondary", "_");
    let config = AnimusConfig {
        mode: GeneratorMode::Runtime,
        ..AnimusConfig::default()
    };
    let output = run(&config, vec![button], &usage);

    assert!(output.css.contains("--animus-colors-secondary: #6c757d;"));
    assert!(output.css.contains("--animus-space-2: 8px;"));
    assert!(!output.css.contains(base_class(&output, "Button")));
    assert!(output.atomics.is_empty());
    assert_eq!(output.metadata.len(), 1);
}

#[test]
fn minify_flag_compacts_output() {
    let button = def("Button")
        .with_styles(StyleMap::new().with("color", "red"))
        .sealed();
    let config = AnimusConfig {
        minify: true,
        ..AnimusConfig::default()
    };
    let output = run(&config, vec![button], &UsageMap::new());

    assert!(!output.css.contains('\n'));
    assert!(output.diagnostics.is_empty());
}
