//! In-memory component store.
//!
//! Components are kept once, keyed by content hash, with a secondary index
//! on `(file_path, export_name)`. Inherited styles are never copied into a
//! child; [`ComponentRegistry::resolve_effective_styles`] composes them on
//! demand by walking parent ids, and
//! [`ComponentRegistry::resolve_layered_styles`] does the same over the
//! extends edges a built graph kept.

use indexmap::{IndexMap, IndexSet};
use rustc_hash::{FxHashMap as HashMap, FxHashSet as HashSet};
use serde::Serialize;

use crate::component::{ComponentDefinition, ComponentIdentity, ContentHash, PropSpec};
use crate::diagnostics::GraphDiagnostic;
use crate::graph::ComponentGraph;
use crate::style::StyleMap;

/// Ancestor chain of a component, root first, ending with the component.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Lineage {
    pub chain: Vec<ContentHash>,
    /// The walk stopped because an ancestor repeated.
    pub cycle: bool,
}

/// Styles of a component composed with everything it inherits.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EffectiveStyles {
    pub base: StyleMap,
    /// Discriminator prop → case → styles (variant base already folded in).
    pub variants: IndexMap<String, IndexMap<String, StyleMap>>,
    pub states: IndexMap<String, StyleMap>,
    pub enabled_groups: IndexSet<String>,
    pub custom_props: IndexMap<String, PropSpec>,
    pub lineage: Vec<ContentHash>,
}

#[derive(Debug, Default)]
pub struct ComponentRegistry {
    components: IndexMap<ContentHash, ComponentDefinition>,
    by_export: HashMap<(String, String), ContentHash>,
    diagnostics: Vec<GraphDiagnostic>,
}

impl ComponentRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a registry from extractor output, in any order.
    pub fn from_definitions<I>(definitions: I) -> Self
    where
        I: IntoIterator<Item = ComponentDefinition>,
    {
        let mut registry = Self::new();
        for definition in definitions {
            registry.register(definition);
        }
        registry
    }

    /// Store a component and index it. Returns its content hash.
    ///
    /// A missing hash is computed here. Registering the same
    /// `(file_path, export_name)` again replaces the earlier definition.
    pub fn register(&mut self, mut definition: ComponentDefinition) -> ContentHash {
        if definition.identity.content_hash.is_empty() {
            definition.identity.content_hash = definition.compute_hash();
        }
        let id = definition.identity.content_hash.clone();
        let export_key = definition.identity.export_key();

        if let Some(previous) = self.by_export.get(&export_key).cloned() {
            if previous != id {
                self.components.shift_remove(&previous);
                self.diagnostics.push(GraphDiagnostic::ComponentReplaced {
                    file_path: export_key.0.clone(),
                    export_name: export_key.1.clone(),
                });
            }
        }

        tracing::trace!(
            component = %definition.identity.name,
            id = %id.short(),
            "registered component"
        );

        self.by_export.insert(export_key, id.clone());
        self.components.insert(id.clone(), definition);
        id
    }

    pub fn get(&self, id: &ContentHash) -> Option<&ComponentDefinition> {
        self.components.get(id)
    }

    pub fn find(&self, file_path: &str, export_name: &str) -> Option<&ComponentDefinition> {
        self.by_export
            .get(&(file_path.to_string(), export_name.to_string()))
            .and_then(|id| self.components.get(id))
    }

    /// First component registered under a display name.
    pub fn find_by_name(&self, name: &str) -> Option<&ComponentDefinition> {
        self.components.values().find(|def| def.identity.name == name)
    }

    /// Resolve an identity reference: by hash first, then by `file#export`.
    pub fn resolve_ref(&self, reference: &ComponentIdentity) -> Option<&ContentHash> {
        if self.components.contains_key(&reference.content_hash) {
            return self
                .components
                .get_key_value(&reference.content_hash)
                .map(|(id, _)| id);
        }
        self.by_export.get(&reference.export_key())
    }

    /// Components in registration order.
    pub fn iter(&self) -> impl Iterator<Item = &ComponentDefinition> {
        self.components.values()
    }

    pub fn len(&self) -> usize {
        self.components.len()
    }

    pub fn is_empty(&self) -> bool {
        self.components.is_empty()
    }

    pub fn diagnostics(&self) -> &[GraphDiagnostic] {
        &self.diagnostics
    }

    /// Direct parent only; transitive closure is the graph's job.
    pub fn get_dependencies(&self, id: &ContentHash) -> Option<&ContentHash> {
        let definition = self.components.get(id)?;
        definition
            .parent
            .as_ref()
            .and_then(|parent| self.resolve_ref(parent))
    }

    /// Walk declared parents up to the root, stopping at the first repeat.
    pub fn lineage(&self, id: &ContentHash) -> Option<Lineage> {
        self.walk(id, |current| self.get_dependencies(current).cloned())
    }

    /// Walk only the extends edges `graph` kept. An edge set aside to break a
    /// cycle is treated as absent, so the chain agrees with the layering.
    pub fn layered_lineage(&self, id: &ContentHash, graph: &ComponentGraph) -> Option<Lineage> {
        self.walk(id, |current| {
            graph
                .parents(current)
                .first()
                .map(|parent| parent.id.clone())
        })
    }

    /// Compose base styles, variants, states, groups and props along the
    /// declared parent chain, child overriding parent key by key.
    pub fn resolve_effective_styles(&self, id: &ContentHash) -> Option<EffectiveStyles> {
        self.lineage(id).map(|lineage| self.compose(lineage))
    }

    /// [`resolve_effective_styles`](Self::resolve_effective_styles) over the
    /// chain from [`layered_lineage`](Self::layered_lineage).
    pub fn resolve_layered_styles(
        &self,
        id: &ContentHash,
        graph: &ComponentGraph,
    ) -> Option<EffectiveStyles> {
        self.layered_lineage(id, graph)
            .map(|lineage| self.compose(lineage))
    }

    fn walk<F>(&self, id: &ContentHash, parent_of: F) -> Option<Lineage>
    where
        F: Fn(&ContentHash) -> Option<ContentHash>,
    {
        self.components.get(id)?;

        let mut chain = vec![id.clone()];
        let mut seen: HashSet<ContentHash> = HashSet::default();
        seen.insert(id.clone());
        let mut cycle = false;
        let mut current = id.clone();

        while let Some(parent) = parent_of(&current) {
            if !self.components.contains_key(&parent) {
                break;
            }
            if !seen.insert(parent.clone()) {
                cycle = true;
                break;
            }
            chain.push(parent.clone());
            current = parent;
        }

        chain.reverse();
        Some(Lineage { chain, cycle })
    }

    fn compose(&self, lineage: Lineage) -> EffectiveStyles {
        let mut effective = EffectiveStyles {
            base: StyleMap::default(),
            variants: IndexMap::new(),
            states: IndexMap::new(),
            enabled_groups: IndexSet::new(),
            custom_props: IndexMap::new(),
            lineage: lineage.chain.clone(),
        };

        for ancestor in &lineage.chain {
            let Some(definition) = self.components.get(ancestor) else {
                continue;
            };

            effective.base = effective.base.overlay(&definition.base_styles);

            for variant in &definition.variants {
                let cases = effective
                    .variants
                    .entry(variant.discriminator_prop.clone())
                    .or_default();
                for case_name in variant.cases.keys() {
                    let Some(resolved) = variant.resolved_case(case_name) else {
                        continue;
                    };
                    let merged = match cases.get(case_name) {
                        Some(inherited) => inherited.overlay(&resolved),
                        None => resolved,
                    };
                    cases.insert(case_name.clone(), merged);
                }
            }

            for (state, styles) in &definition.states {
                let merged = match effective.states.get(state) {
                    Some(inherited) => inherited.overlay(styles),
                    None => styles.clone(),
                };
                effective.states.insert(state.clone(), merged);
            }

            effective
                .enabled_groups
                .extend(definition.enabled_groups.iter().cloned());
            for (prop, spec) in &definition.custom_props {
                effective.custom_props.insert(prop.clone(), spec.clone());
            }
        }

        effective
    }
}
