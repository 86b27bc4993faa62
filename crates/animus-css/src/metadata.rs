//! Class names handed to the runtime for each component.

use animus_graph::ComponentIdentity;
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentRuntimeMetadata {
    pub name: String,
    pub file_path: String,
    pub export_name: String,
    /// The component's own base class, listed even when it has no rule.
    pub base_class: String,
    /// Ancestor base classes with rules, root first.
    pub lineage: Vec<String>,
    /// Discriminator prop → case → classes to apply, ancestors first.
    pub variants: IndexMap<String, IndexMap<String, Vec<String>>>,
    /// State → classes to apply, ancestors first.
    pub states: IndexMap<String, Vec<String>>,
    pub system_props: Vec<String>,
    /// Prop → `value:bp` → atomic class.
    #[serde(default, skip_serializing_if = "IndexMap::is_empty")]
    pub atomics: IndexMap<String, IndexMap<String, String>>,
}

impl ComponentRuntimeMetadata {
    pub fn new(identity: &ComponentIdentity, base_class: String) -> Self {
        Self {
            name: identity.name.clone(),
            file_path: identity.file_path.clone(),
            export_name: identity.export_name.clone(),
            base_class,
            ..Self::default()
        }
    }

    /// Every class this entry names, base class first.
    pub fn class_names(&self) -> impl Iterator<Item = &str> {
        std::iter::once(self.base_class.as_str())
            .chain(self.lineage.iter().map(String::as_str))
            .chain(self.variants.values().flat_map(|cases| cases.values().flatten().map(String::as_str)))
            .chain(self.states.values().flatten().map(String::as_str))
            .chain(self.atomics.values().flat_map(|values| values.values().map(String::as_str)))
    }
}

/// `{prefix}-{Name}-{hash6}`.
pub fn base_class_name(prefix: &str, identity: &ComponentIdentity) -> String {
    format!(
        "{prefix}-{}-{}",
        class_segment(&identity.name),
        identity.content_hash.short()
    )
}

/// `{base}--{prop}-{case}`.
pub fn variant_class_name(base: &str, prop: &str, case: &str) -> String {
    format!("{base}--{}-{}", class_segment(prop), class_segment(case))
}

/// `{base}--{state}`.
pub fn state_class_name(base: &str, state: &str) -> String {
    format!("{base}--{}", class_segment(state))
}

/// Anything outside `[A-Za-z0-9_-]` becomes `-`, so the name can be used as
/// a class selector unescaped.
fn class_segment(raw: &str) -> String {
    raw.chars()
        .map(|c| if c.is_ascii_alphanumeric() || c == '_' || c == '-' { c } else { '-' })
        .collect()
}
