//! Component identities and definitions as handed over by the extractor.

use std::fmt;

use blake3::Hasher;
use indexmap::{IndexMap, IndexSet};
use serde::{Deserialize, Serialize};

use crate::style::StyleMap;

/// Content-addressed component id (BLAKE3, hex).
///
/// Also used as the graph node id.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ContentHash(String);

impl ContentHash {
    /// Create a content hash from a hex string.
    pub fn from_hex(hex: impl Into<String>) -> Self {
        Self(hex.into())
    }

    /// Placeholder id for a parent reference that names no registered
    /// component. Never collides with a real hash (contains `#`).
    pub fn unresolved(file_path: &str, export_name: &str) -> Self {
        Self(format!("unresolved:{file_path}#{export_name}"))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// First six characters, used as the class-name suffix.
    pub fn short(&self) -> &str {
        let end = self
            .0
            .char_indices()
            .nth(6)
            .map_or(self.0.len(), |(i, _)| i);
        &self.0[..end]
    }
}

impl fmt::Display for ContentHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Immutable key of an extracted component.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentIdentity {
    pub name: String,
    pub file_path: String,
    pub export_name: String,
    /// Empty when the extractor did not compute one; the registry fills it in.
    #[serde(default)]
    pub content_hash: ContentHash,
}

impl ComponentIdentity {
    pub fn new(
        name: impl Into<String>,
        file_path: impl Into<String>,
        export_name: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            file_path: file_path.into(),
            export_name: export_name.into(),
            content_hash: ContentHash::default(),
        }
    }

    /// `file#export`, the secondary registry key.
    pub fn export_key(&self) -> (String, String) {
        (self.file_path.clone(), self.export_name.clone())
    }
}

/// Value transform applied after scale lookup.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum Transform {
    /// Fractions (0 < |n| <= 1) become percentages, other numbers pixels.
    Size,
    /// Numbers become pixels.
    Px,
    /// Numbers become `{n}px solid`.
    BorderShorthand,
}

/// How a system/custom prop maps onto CSS.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PropSpec {
    /// Primary CSS property (kebab- or camel-case).
    pub property: String,
    /// Every property the prop writes; empty means just `property`.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub properties: Vec<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub transform: Option<Transform>,
}

impl PropSpec {
    pub fn new(property: impl Into<String>) -> Self {
        Self {
            property: property.into(),
            properties: Vec::new(),
            scale: None,
            transform: None,
        }
    }

    pub fn with_properties<I, S>(mut self, properties: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.properties = properties.into_iter().map(Into::into).collect();
        self
    }

    pub fn with_scale(mut self, scale: impl Into<String>) -> Self {
        self.scale = Some(scale.into());
        self
    }

    pub fn with_transform(mut self, transform: Transform) -> Self {
        self.transform = Some(transform);
        self
    }

    /// All CSS properties written by this prop.
    pub fn css_properties(&self) -> Vec<&str> {
        if self.properties.is_empty() {
            vec![self.property.as_str()]
        } else {
            self.properties.iter().map(String::as_str).collect()
        }
    }
}

/// A named variant: one discriminator prop selecting among cases.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Variant {
    #[serde(alias = "prop")]
    pub discriminator_prop: String,
    #[serde(default)]
    pub cases: IndexMap<String, StyleMap>,
    /// Applied beneath every case of this variant.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<StyleMap>,
}

impl Variant {
    pub fn new(discriminator_prop: impl Into<String>) -> Self {
        Self {
            discriminator_prop: discriminator_prop.into(),
            cases: IndexMap::new(),
            base: None,
        }
    }

    pub fn case(mut self, name: impl Into<String>, styles: StyleMap) -> Self {
        self.cases.insert(name.into(), styles);
        self
    }

    pub fn with_base(mut self, styles: StyleMap) -> Self {
        self.base = Some(styles);
        self
    }

    /// Case styles with the variant base folded underneath.
    pub fn resolved_case(&self, name: &str) -> Option<StyleMap> {
        let case = self.cases.get(name)?;
        Some(match &self.base {
            Some(base) => base.overlay(case),
            None => case.clone(),
        })
    }
}

/// One extracted component.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComponentDefinition {
    pub identity: ComponentIdentity,
    #[serde(default)]
    pub base_styles: StyleMap,
    #[serde(default)]
    pub variants: Vec<Variant>,
    #[serde(default)]
    pub states: IndexMap<String, StyleMap>,
    #[serde(default)]
    pub enabled_groups: IndexSet<String>,
    #[serde(default)]
    pub custom_props: IndexMap<String, PropSpec>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub parent: Option<ComponentIdentity>,
    /// Components rendered inside this one.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub uses: Vec<ComponentIdentity>,
}

/// The part of a definition that feeds its content hash.
#[derive(Serialize)]
struct OwnContribution<'a> {
    file_path: &'a str,
    export_name: &'a str,
    name: &'a str,
    base_styles: &'a StyleMap,
    variants: &'a [Variant],
    states: &'a IndexMap<String, StyleMap>,
    enabled_groups: &'a IndexSet<String>,
    custom_props: &'a IndexMap<String, PropSpec>,
}

impl ComponentDefinition {
    /// Start a definition; call [`ComponentDefinition::sealed`] once the
    /// styles are in place to stamp the content hash.
    pub fn new(
        name: impl Into<String>,
        file_path: impl Into<String>,
        export_name: impl Into<String>,
    ) -> Self {
        Self {
            identity: ComponentIdentity::new(name, file_path, export_name),
            base_styles: StyleMap::default(),
            variants: Vec::new(),
            states: IndexMap::new(),
            enabled_groups: IndexSet::new(),
            custom_props: IndexMap::new(),
            parent: None,
            uses: Vec::new(),
        }
    }

    pub fn with_styles(mut self, styles: StyleMap) -> Self {
        self.base_styles = styles;
        self
    }

    pub fn with_variant(mut self, variant: Variant) -> Self {
        self.variants.push(variant);
        self
    }

    pub fn with_state(mut self, name: impl Into<String>, styles: StyleMap) -> Self {
        self.states.insert(name.into(), styles);
        self
    }

    pub fn with_groups<I, S>(mut self, groups: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.enabled_groups.extend(groups.into_iter().map(Into::into));
        self
    }

    pub fn with_prop(mut self, name: impl Into<String>, spec: PropSpec) -> Self {
        self.custom_props.insert(name.into(), spec);
        self
    }

    pub fn extends(mut self, parent: &ComponentIdentity) -> Self {
        self.parent = Some(parent.clone());
        self
    }

    pub fn uses(mut self, other: &ComponentIdentity) -> Self {
        self.uses.push(other.clone());
        self
    }

    /// Stamp the content hash computed from the own style contribution.
    pub fn sealed(mut self) -> Self {
        self.identity.content_hash = self.compute_hash();
        self
    }

    pub fn id(&self) -> &ContentHash {
        &self.identity.content_hash
    }

    pub fn name(&self) -> &str {
        &self.identity.name
    }

    /// Hash of this definition's own (non-inherited) contribution.
    ///
    /// The file path and export name are part of the input so textually
    /// identical components in different modules stay distinct nodes. The
    /// parent reference is not: re-pointing `extends` keeps the node id.
    pub fn compute_hash(&self) -> ContentHash {
        let contribution = OwnContribution {
            file_path: &self.identity.file_path,
            export_name: &self.identity.export_name,
            name: &self.identity.name,
            base_styles: &self.base_styles,
            variants: &self.variants,
            states: &self.states,
            enabled_groups: &self.enabled_groups,
            custom_props: &self.custom_props,
        };

        let mut hasher = Hasher::new();
        // Serializing plain maps of strings and numbers cannot fail.
        let bytes = serde_json::to_vec(&contribution).unwrap_or_default();
        hasher.update(&bytes);
        ContentHash(hasher.finalize().to_hex().to_string())
    }
}
