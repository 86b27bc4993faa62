//! Prop groups: named bundles of system props a component can enable.
//!
//! A system prop is an alias (`bg`, `px`) that writes one or more CSS
//! properties, optionally through a theme scale and a value transform.

use animus_graph::{EffectiveStyles, PropSpec, Transform};
use indexmap::IndexMap;
use rustc_hash::FxHashMap as HashMap;
use serde::{Deserialize, Serialize};

use crate::values::kebab_case;

/// Group name → prop name → spec.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GroupDefs(IndexMap<String, IndexMap<String, PropSpec>>);

impl GroupDefs {
    /// No groups at all.
    pub fn empty() -> Self {
        Self(IndexMap::new())
    }

    pub fn insert(&mut self, group: impl Into<String>, props: IndexMap<String, PropSpec>) {
        self.0.insert(group.into(), props);
    }

    pub fn get(&self, group: &str) -> Option<&IndexMap<String, PropSpec>> {
        self.0.get(group)
    }

    pub fn contains(&self, group: &str) -> bool {
        self.0.contains_key(group)
    }

    pub fn names(&self) -> impl Iterator<Item = &String> {
        self.0.keys()
    }

    /// Every prop of every group, first definition winning.
    pub fn all_props(&self) -> IndexMap<&str, &PropSpec> {
        let mut props = IndexMap::new();
        for group in self.0.values() {
            for (name, spec) in group {
                props.entry(name.as_str()).or_insert(spec);
            }
        }
        props
    }
}

impl Default for GroupDefs {
    fn default() -> Self {
        let mut groups = Self::empty();
        groups.insert("space", space());
        groups.insert("color", color());
        groups.insert("typography", typography());
        groups.insert("layout", layout());
        groups.insert("flex", flex());
        groups.insert("grid", grid());
        groups.insert("positioning", positioning());
        groups.insert("borders", borders());
        groups.insert("shadows", shadows());
        groups.insert("background", background());
        groups
    }
}

/// Prop lookup for one component.
///
/// Style keys resolve against every known prop (so `bg` works in any style
/// block); only enabled groups and custom props count as system props that
/// usage sites may pass.
#[derive(Debug, Clone)]
pub struct PropTable {
    specs: HashMap<String, PropSpec>,
    /// Single-property specs indexed by their kebab-case CSS property.
    by_property: HashMap<String, PropSpec>,
    system_props: Vec<String>,
}

impl PropTable {
    /// Table for a component with its inherited groups and custom props.
    /// Returns the table and any enabled group names that do not exist.
    pub fn for_component(groups: &GroupDefs, effective: &EffectiveStyles) -> (Self, Vec<String>) {
        let mut specs: HashMap<String, PropSpec> = HashMap::default();
        let mut by_property: HashMap<String, PropSpec> = HashMap::default();

        for (name, spec) in groups.all_props() {
            specs.insert(name.to_string(), spec.clone());
            if spec.properties.is_empty() {
                by_property
                    .entry(kebab_case(&spec.property))
                    .or_insert_with(|| spec.clone());
            }
        }

        let mut system_props = Vec::new();
        let mut unknown_groups = Vec::new();
        for group in &effective.enabled_groups {
            match groups.get(group) {
                Some(props) => {
                    for name in props.keys() {
                        if !system_props.contains(name) {
                            system_props.push(name.clone());
                        }
                    }
                }
                None => unknown_groups.push(group.clone()),
            }
        }

        for (name, spec) in &effective.custom_props {
            specs.insert(name.clone(), spec.clone());
            if !system_props.contains(name) {
                system_props.push(name.clone());
            }
        }

        let table = Self {
            specs,
            by_property,
            system_props,
        };
        (table, unknown_groups)
    }

    /// Spec for a style key: a prop alias, a known CSS property, or a bare
    /// property with no scale.
    pub fn spec_for(&self, key: &str) -> PropSpec {
        if let Some(spec) = self.specs.get(key) {
            return spec.clone();
        }
        let property = kebab_case(key);
        match self.by_property.get(&property) {
            Some(spec) => spec.clone(),
            None => PropSpec::new(property),
        }
    }

    /// Spec for a prop passed at a usage site, if the component accepts it.
    pub fn system_prop(&self, name: &str) -> Option<&PropSpec> {
        if self.system_props.iter().any(|p| p == name) {
            self.specs.get(name)
        } else {
            None
        }
    }

    /// System prop names, groups first then custom props.
    pub fn system_props(&self) -> &[String] {
        &self.system_props
    }
}

fn props<const N: usize>(entries: [(&str, PropSpec); N]) -> IndexMap<String, PropSpec> {
    entries
        .into_iter()
        .map(|(name, spec)| (name.to_string(), spec))
        .collect()
}

fn scaled(property: &str, scale: &str) -> PropSpec {
    PropSpec::new(property).with_scale(scale)
}

fn multi(properties: &[&str], scale: &str) -> PropSpec {
    PropSpec::new(properties[0])
        .with_properties(properties.iter().copied())
        .with_scale(scale)
}

fn space() -> IndexMap<String, PropSpec> {
    props([
        ("m", scaled("margin", "space")),
        ("mt", scaled("margin-top", "space")),
        ("mr", scaled("margin-right", "space")),
        ("mb", scaled("margin-bottom", "space")),
        ("ml", scaled("margin-left", "space")),
        ("mx", multi(&["margin-left", "margin-right"], "space")),
        ("my", multi(&["margin-top", "margin-bottom"], "space")),
        ("p", scaled("padding", "space")),
        ("pt", scaled("padding-top", "space")),
        ("pr", scaled("padding-right", "space")),
        ("pb", scaled("padding-bottom", "space")),
        ("pl", scaled("padding-left", "space")),
        ("px", multi(&["padding-left", "padding-right"], "space")),
        ("py", multi(&["padding-top", "padding-bottom"], "space")),
        ("gap", scaled("gap", "space")),
        ("rowGap", scaled("row-gap", "space")),
        ("columnGap", scaled("column-gap", "space")),
    ])
}

fn color() -> IndexMap<String, PropSpec> {
    props([
        ("color", scaled("color", "colors")),
        ("bg", scaled("background-color", "colors")),
        ("borderColor", scaled("border-color", "colors")),
        ("fill", scaled("fill", "colors")),
        ("stroke", scaled("stroke", "colors")),
        ("opacity", PropSpec::new("opacity")),
    ])
}

fn typography() -> IndexMap<String, PropSpec> {
    props([
        ("fontFamily", scaled("font-family", "fonts")),
        ("fontSize", scaled("font-size", "fontSizes")),
        ("fontWeight", scaled("font-weight", "fontWeights")),
        ("lineHeight", scaled("line-height", "lineHeights")),
        ("letterSpacing", scaled("letter-spacing", "letterSpacings")),
        ("textAlign", PropSpec::new("text-align")),
        ("textTransform", PropSpec::new("text-transform")),
        ("fontStyle", PropSpec::new("font-style")),
    ])
}

fn sized(property: &str) -> PropSpec {
    scaled(property, "sizes").with_transform(Transform::Size)
}

fn layout() -> IndexMap<String, PropSpec> {
    props([
        ("width", sized("width")),
        ("height", sized("height")),
        ("minWidth", sized("min-width")),
        ("maxWidth", sized("max-width")),
        ("minHeight", sized("min-height")),
        ("maxHeight", sized("max-height")),
        (
            "size",
            multi(&["width", "height"], "sizes").with_transform(Transform::Size),
        ),
        ("display", PropSpec::new("display")),
        ("overflow", PropSpec::new("overflow")),
        ("overflowX", PropSpec::new("overflow-x")),
        ("overflowY", PropSpec::new("overflow-y")),
        ("verticalAlign", PropSpec::new("vertical-align")),
    ])
}

fn flex() -> IndexMap<String, PropSpec> {
    props([
        ("flex", PropSpec::new("flex")),
        ("flexDirection", PropSpec::new("flex-direction")),
        ("flexWrap", PropSpec::new("flex-wrap")),
        ("flexGrow", PropSpec::new("flex-grow")),
        ("flexShrink", PropSpec::new("flex-shrink")),
        ("flexBasis", sized("flex-basis")),
        ("alignItems", PropSpec::new("align-items")),
        ("alignContent", PropSpec::new("align-content")),
        ("alignSelf", PropSpec::new("align-self")),
        ("justifyContent", PropSpec::new("justify-content")),
        ("justifyItems", PropSpec::new("justify-items")),
        ("justifySelf", PropSpec::new("justify-self")),
        ("order", PropSpec::new("order")),
    ])
}

fn grid() -> IndexMap<String, PropSpec> {
    props([
        ("gridTemplateColumns", PropSpec::new("grid-template-columns")),
        ("gridTemplateRows", PropSpec::new("grid-template-rows")),
        ("gridTemplateAreas", PropSpec::new("grid-template-areas")),
        ("gridColumn", PropSpec::new("grid-column")),
        ("gridRow", PropSpec::new("grid-row")),
        ("gridArea", PropSpec::new("grid-area")),
        ("gridAutoFlow", PropSpec::new("grid-auto-flow")),
        ("gridAutoColumns", PropSpec::new("grid-auto-columns")),
        ("gridAutoRows", PropSpec::new("grid-auto-rows")),
    ])
}

fn positioning() -> IndexMap<String, PropSpec> {
    props([
        ("position", PropSpec::new("position")),
        ("top", scaled("top", "space")),
        ("right", scaled("right", "space")),
        ("bottom", scaled("bottom", "space")),
        ("left", scaled("left", "space")),
        ("inset", scaled("inset", "space")),
        ("zIndex", scaled("z-index", "zIndices")),
    ])
}

fn borders() -> IndexMap<String, PropSpec> {
    let border = |property: &str| {
        scaled(property, "borders").with_transform(Transform::BorderShorthand)
    };
    props([
        ("border", border("border")),
        ("borderTop", border("border-top")),
        ("borderRight", border("border-right")),
        ("borderBottom", border("border-bottom")),
        ("borderLeft", border("border-left")),
        (
            "borderWidth",
            scaled("border-width", "borderWidths").with_transform(Transform::Px),
        ),
        ("borderStyle", PropSpec::new("border-style")),
        ("borderRadius", scaled("border-radius", "radii")),
    ])
}

fn shadows() -> IndexMap<String, PropSpec> {
    props([
        ("boxShadow", scaled("box-shadow", "shadows")),
        ("textShadow", scaled("text-shadow", "shadows")),
    ])
}

fn background() -> IndexMap<String, PropSpec> {
    props([
        ("background", scaled("background", "colors")),
        ("backgroundImage", PropSpec::new("background-image")),
        ("backgroundSize", PropSpec::new("background-size")),
        ("backgroundPosition", PropSpec::new("background-position")),
        ("backgroundRepeat", PropSpec::new("background-repeat")),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use animus_graph::{ComponentDefinition, ComponentRegistry};

    fn effective(definition: ComponentDefinition) -> EffectiveStyles {
        let mut registry = ComponentRegistry::new();
        let id = registry.register(definition);
        registry.resolve_effective_styles(&id).unwrap()
    }

    #[test]
    fn aliases_and_css_properties_resolve_to_specs() {
        let (table, _) = PropTable::for_component(
            &GroupDefs::default(),
            &effective(ComponentDefinition::new("Box", "src/Box.tsx", "Box")),
        );

        let bg = table.spec_for("bg");
        assert_eq!(bg.property, "background-color");
        assert_eq!(bg.scale.as_deref(), Some("colors"));

        let camel = table.spec_for("backgroundColor");
        assert_eq!(camel.scale.as_deref(), Some("colors"));

        let mx = table.spec_for("mx");
        assert_eq!(mx.css_properties(), vec!["margin-left", "margin-right"]);

        let plain = table.spec_for("cursor");
        assert_eq!(plain, PropSpec::new("cursor"));
    }

    #[test]
    fn system_props_follow_enabled_groups_and_custom_props() {
        let definition = ComponentDefinition::new("Box", "src/Box.tsx", "Box")
            .with_groups(["color", "nope"])
            .with_prop("tone", PropSpec::new("color").with_scale("colors"));
        let (table, unknown) =
            PropTable::for_component(&GroupDefs::default(), &effective(definition));

        assert_eq!(unknown, vec!["nope".to_string()]);
        assert!(table.system_prop("bg").is_some());
        assert!(table.system_prop("tone").is_some());
        assert!(table.system_prop("p").is_none());
        assert_eq!(table.system_props().last().map(String::as_str), Some("tone"));
    }
}
