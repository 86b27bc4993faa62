//! Layered stylesheet assembly.
//!
//! ```text
//! :root custom properties         (base, then one block per breakpoint)
//! base rules      Base → Primary → PrimaryLarge   (layer, position)
//! variant rules   same component order
//! state rules     same component order
//! atomic rules    base breakpoint first, then ascending
//! ```
//!
//! Every rule is compiled before anything is written, so the `:root` block
//! can list each custom property the component rules referenced.

use animus_config::AnimusConfig;
use animus_graph::{ComponentDefinition, ComponentGraph, ComponentRegistry, ContentHash, GraphError};
use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, info, info_span};

use crate::atomic::{AtomicClass, AtomicRequest};
use crate::context::GenerationContext;
use crate::diagnostics::StyleDiagnostic;
use crate::error::{CssError, Result};
use crate::groups::{GroupDefs, PropTable};
use crate::metadata::{
    base_class_name, state_class_name, variant_class_name, ComponentRuntimeMetadata,
};
use crate::minify::minify_css;
use crate::render::{CssWriter, Declaration, Rule};
use crate::usage::{parse_entry, UsageMap};
use crate::values::kebab_case;

/// Everything one generation run reads.
#[derive(Debug, Clone, Copy)]
pub struct GenerationInput<'a> {
    pub config: &'a AnimusConfig,
    pub theme: &'a Value,
    pub groups: &'a GroupDefs,
    pub registry: &'a ComponentRegistry,
    /// Must be built from `registry`.
    pub graph: &'a ComponentGraph,
    pub usage: &'a UsageMap,
}

#[derive(Debug, Clone, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneratedCss {
    pub css: String,
    /// Custom properties referenced by emitted rules, in first-use order.
    pub used_variables: Vec<String>,
    /// Runtime metadata per component, keyed by content hash.
    pub metadata: IndexMap<ContentHash, ComponentRuntimeMetadata>,
    /// Atomic classes in emission order.
    pub atomics: Vec<AtomicClass>,
    #[serde(skip)]
    pub diagnostics: Vec<StyleDiagnostic>,
}

/// Order component rules are emitted in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(crate) enum Emission {
    /// All bases by `(layer, position)`, then all variants, then all states.
    Layered,
    /// Each component's rules together, in registration order.
    Legacy,
}

/// One component's rules and the classes that ended up with declarations.
struct CompiledComponent<'a> {
    definition: &'a ComponentDefinition,
    base_class: String,
    base: Vec<Rule>,
    variants: Vec<Rule>,
    states: Vec<Rule>,
    table: PropTable,
    own: OwnClasses,
}

/// Classes of one component that received at least one declaration.
#[derive(Debug, Default)]
struct OwnClasses {
    base: Option<String>,
    variants: Vec<(String, String, String)>,
    states: Vec<(String, String)>,
}

/// What [`assemble`] compiles.
#[derive(Debug, Clone, Copy)]
pub(crate) struct AssemblyOptions {
    pub emission: Emission,
    pub atomics: bool,
    /// Declare every theme token up front instead of only the referenced ones.
    pub declare_theme: bool,
}

/// Compiled run, before any text is written.
pub(crate) struct Assembly<'a> {
    pub ctx: GenerationContext<'a>,
    components: Vec<CompiledComponent<'a>>,
    pub metadata: IndexMap<ContentHash, ComponentRuntimeMetadata>,
    atomic_rules: Vec<Rule>,
}

/// Generate the stylesheet with cascade-layer ordering.
pub fn generate_layered_css(input: &GenerationInput<'_>) -> Result<GeneratedCss> {
    generate(input, Emission::Layered)
}

/// Generate the stylesheet in registration order.
///
/// Each component's base, variant and state rules stay together. A child
/// registered before its parent is emitted before it, so child-over-parent
/// overrides are not guaranteed.
pub fn generate_legacy_css(input: &GenerationInput<'_>) -> Result<GeneratedCss> {
    generate(input, Emission::Legacy)
}

fn generate(input: &GenerationInput<'_>, emission: Emission) -> Result<GeneratedCss> {
    let _span = info_span!("generate_css", layered = emission == Emission::Layered).entered();

    let options = AssemblyOptions {
        emission,
        atomics: input.config.atomic,
        declare_theme: false,
    };
    let mut assembly = assemble(input, options)?;
    let mut writer = CssWriter::new();
    writer.rules(&assembly.root_rules());
    assembly.write_components(&mut writer, emission);
    writer.rules(&assembly.atomic_rules);

    let mut css = writer.finish();
    let mut diagnostics = assembly.ctx.take_diagnostics();
    if input.config.minify {
        let (minified, failure) = minify_css(&css);
        css = minified;
        diagnostics.extend(failure);
    }

    let atomics: Vec<AtomicClass> = assembly.sorted_atomics().into_iter().cloned().collect();
    info!(
        components = assembly.components.len(),
        atomics = atomics.len(),
        variables = assembly.ctx.theme.used_variables().len(),
        diagnostics = diagnostics.len(),
        bytes = css.len(),
        "generated stylesheet"
    );

    Ok(GeneratedCss {
        css,
        used_variables: assembly.ctx.theme.used_variables(),
        metadata: assembly.metadata,
        atomics,
        diagnostics,
    })
}

/// Compile every component, its atomics and its metadata.
pub(crate) fn assemble<'a>(
    input: &GenerationInput<'a>,
    options: AssemblyOptions,
) -> Result<Assembly<'a>> {
    let definitions = ordered_definitions(input, options.emission)?;
    let mut ctx = GenerationContext::new(input.config, input.theme);
    if options.declare_theme {
        ctx.theme.declare_theme();
    }

    let mut components = Vec::with_capacity(definitions.len());
    for definition in definitions {
        components.push(compile_component(&mut ctx, input, definition)?);
    }

    let mut metadata = build_metadata(input, &components);

    let mut atomic_rules = Vec::new();
    if options.atomics {
        report_unknown_usage(&mut ctx, input);
        for component in &components {
            let entry = metadata.get_mut(component.definition.id());
            let atomics = collect_atomics(&mut ctx, input, component)?;
            if let Some(entry) = entry {
                entry.atomics = atomics;
            }
        }
        atomic_rules = atomic_rules_for(&ctx);
    }

    Ok(Assembly {
        ctx,
        components,
        metadata,
        atomic_rules,
    })
}

impl Assembly<'_> {
    /// `:root` rules for every declared custom property.
    pub(crate) fn root_rules(&self) -> Vec<Rule> {
        self.ctx
            .theme
            .root_blocks()
            .into_iter()
            .map(|(slot, declarations)| {
                let mut rule = Rule::new(":root");
                for (name, value) in declarations {
                    rule.push(Declaration::new(name, value));
                }
                match self.ctx.theme.responsive().media_query(slot) {
                    Some(query) => rule.within(query),
                    None => rule,
                }
            })
            .collect()
    }

    fn write_components(&self, writer: &mut CssWriter, emission: Emission) {
        match emission {
            Emission::Layered => {
                for component in &self.components {
                    writer.rules(&component.base);
                }
                for component in &self.components {
                    writer.rules(&component.variants);
                }
                for component in &self.components {
                    writer.rules(&component.states);
                }
            }
            Emission::Legacy => {
                for component in &self.components {
                    writer.rules(&component.base);
                    writer.rules(&component.variants);
                    writer.rules(&component.states);
                }
            }
        }
    }

    fn sorted_atomics(&self) -> Vec<&AtomicClass> {
        sorted_atomics(&self.ctx)
    }
}

fn ordered_definitions<'a>(
    input: &GenerationInput<'a>,
    emission: Emission,
) -> Result<Vec<&'a ComponentDefinition>> {
    match emission {
        Emission::Legacy => Ok(input.registry.iter().collect()),
        Emission::Layered => {
            if !input.graph.is_built() {
                return Err(GraphError::NotBuilt.into());
            }
            input
                .graph
                .nodes_in_cascade_order()
                .into_iter()
                .map(|node| {
                    input.registry.get(&node.id).ok_or_else(|| CssError::UnknownComponent {
                        id: node.id.to_string(),
                    })
                })
                .collect()
        }
    }
}

fn compile_component<'a>(
    ctx: &mut GenerationContext<'_>,
    input: &GenerationInput<'_>,
    definition: &'a ComponentDefinition,
) -> Result<CompiledComponent<'a>> {
    let id = definition.id();
    let effective = input
        .registry
        .resolve_layered_styles(id, input.graph)
        .ok_or_else(|| CssError::UnknownComponent { id: id.to_string() })?;

    let (table, unknown_groups) = PropTable::for_component(input.groups, &effective);
    for group in unknown_groups {
        if definition.enabled_groups.contains(&group) {
            tracing::warn!(component = %definition.name(), %group, "unknown prop group");
            ctx.push_diagnostic(StyleDiagnostic::UnknownGroup {
                component: definition.name().to_string(),
                group,
            });
        }
    }

    let mut own = OwnClasses::default();
    let base_class = base_class_name(&input.config.prefix, &definition.identity);
    let base = ctx.compile(&table, &format!(".{base_class}"), &definition.base_styles);
    if !base.is_empty() {
        own.base = Some(base_class.clone());
    }

    let mut variants = Vec::new();
    for variant in &definition.variants {
        for case in variant.cases.keys() {
            let Some(styles) = variant.resolved_case(case) else {
                continue;
            };
            let class = variant_class_name(&base_class, &variant.discriminator_prop, case);
            let rules = ctx.compile(&table, &format!(".{class}"), &styles);
            if !rules.is_empty() {
                own.variants
                    .push((variant.discriminator_prop.clone(), case.clone(), class));
                variants.extend(rules);
            }
        }
    }

    let mut states = Vec::new();
    for (state, styles) in &definition.states {
        let class = state_class_name(&base_class, state);
        let rules = ctx.compile(&table, &format!(".{class}"), styles);
        if !rules.is_empty() {
            own.states.push((state.clone(), class));
            states.extend(rules);
        }
    }

    debug!(
        component = %definition.name(),
        class = %base_class,
        rules = base.len() + variants.len() + states.len(),
        "compiled component"
    );

    Ok(CompiledComponent {
        definition,
        base_class,
        base,
        variants,
        states,
        table,
        own,
    })
}

fn build_metadata(
    input: &GenerationInput<'_>,
    components: &[CompiledComponent<'_>],
) -> IndexMap<ContentHash, ComponentRuntimeMetadata> {
    let own: HashMap<&ContentHash, &OwnClasses> = components
        .iter()
        .map(|component| (component.definition.id(), &component.own))
        .collect();

    let mut metadata = IndexMap::with_capacity(components.len());
    for component in components {
        let id = component.definition.id();
        let mut entry =
            ComponentRuntimeMetadata::new(&component.definition.identity, component.base_class.clone());
        entry.system_props = component.table.system_props().to_vec();

        let chain = input
            .registry
            .layered_lineage(id, input.graph)
            .map(|lineage| lineage.chain)
            .unwrap_or_else(|| vec![id.clone()]);

        for ancestor in &chain {
            let Some(classes) = own.get(ancestor) else {
                continue;
            };
            if ancestor != id {
                entry.lineage.extend(classes.base.iter().cloned());
            }
            for (prop, case, class) in &classes.variants {
                entry
                    .variants
                    .entry(prop.clone())
                    .or_default()
                    .entry(case.clone())
                    .or_default()
                    .push(class.clone());
            }
            for (state, class) in &classes.states {
                entry
                    .states
                    .entry(state.clone())
                    .or_default()
                    .push(class.clone());
            }
        }

        metadata.insert(id.clone(), entry);
    }
    metadata
}

fn report_unknown_usage(ctx: &mut GenerationContext<'_>, input: &GenerationInput<'_>) {
    for name in input.usage.components() {
        if input.registry.find_by_name(name).is_none() {
            tracing::warn!(component = %name, "usage data for unknown component");
            ctx.push_diagnostic(StyleDiagnostic::UnknownUsageComponent {
                component: name.clone(),
            });
        }
    }
}

/// Atomic classes for the usage recorded against one component.
fn collect_atomics(
    ctx: &mut GenerationContext<'_>,
    input: &GenerationInput<'_>,
    component: &CompiledComponent<'_>,
) -> Result<IndexMap<String, IndexMap<String, String>>> {
    let mut classes: IndexMap<String, IndexMap<String, String>> = IndexMap::new();
    let name = component.definition.name();
    let Some(props) = input.usage.props(name) else {
        return Ok(classes);
    };

    for (prop, entries) in props {
        let Some(spec) = component.table.system_prop(prop).cloned() else {
            debug!(component = %name, %prop, "prop is not a system prop");
            ctx.push_diagnostic(StyleDiagnostic::UnknownUsageProp {
                component: name.to_string(),
                prop: prop.clone(),
            });
            continue;
        };

        for entry in entries {
            let usage = parse_entry(entry);
            let Some(slot) = ctx.theme.responsive().slot_for_label(usage.breakpoint) else {
                ctx.push_diagnostic(StyleDiagnostic::UnknownBreakpoint {
                    property: prop.clone(),
                    breakpoint: usage.breakpoint.to_string(),
                });
                continue;
            };

            let resolved = ctx.resolve_value(&spec, slot, &usage.literal());
            let Some((_, css_value)) = resolved.into_iter().min_by_key(|(slot, _)| *slot) else {
                continue;
            };

            let css_properties: Vec<String> =
                spec.css_properties().into_iter().map(kebab_case).collect();
            let declarations = css_properties
                .iter()
                .map(|property| Declaration::new(property.clone(), css_value.clone()))
                .collect();
            let breakpoint = ctx.theme.responsive().label(slot).to_string();

            let class = ctx.atomics.class_for_request(AtomicRequest {
                alias: Some(prop.as_str()),
                css_properties,
                value: usage.value,
                slot,
                breakpoint: &breakpoint,
                declarations,
            })?;
            classes
                .entry(prop.clone())
                .or_default()
                .insert(entry.clone(), class.class_name.clone());
        }
    }
    Ok(classes)
}

/// Atomic classes ordered by breakpoint slot, creation order within a slot.
fn sorted_atomics<'c>(ctx: &'c GenerationContext<'_>) -> Vec<&'c AtomicClass> {
    let mut classes: Vec<&AtomicClass> = ctx.atomics.classes().collect();
    classes.sort_by_key(|class| class.slot);
    classes
}

fn atomic_rules_for(ctx: &GenerationContext<'_>) -> Vec<Rule> {
    sorted_atomics(ctx)
        .into_iter()
        .map(|class| {
            let mut rule = Rule::new(format!(".{}", class.class_name));
            for declaration in &class.declarations {
                rule.push(declaration.clone());
            }
            match ctx.theme.responsive().media_query(class.slot) {
                Some(query) => rule.within(query),
                None => rule,
            }
        })
        .collect()
}
