//! The build-time pipeline.
//!
//! ```text
//! validate config + theme ─► ComponentRegistry ─► ComponentGraph::build
//!                                                        │
//!                      generator_for(config.mode) ◄──────┘
//!                                │
//!                                ▼
//!                           BuildOutput
//! ```

use std::path::Path;

use animus_config::{load_theme, validate_schema, validate_theme, AnimusConfig, ConfigLoader};
use animus_css::{generator_for, GenerationInput, GroupDefs, UsageMap};
use animus_graph::{ComponentDefinition, ComponentGraph, ComponentRegistry};
use serde_json::Value;
use tracing::{debug, info, info_span, warn};

use crate::diagnostics::Diagnostic;
use crate::error::{BuildError, Result};
use crate::output::BuildOutput;

/// A configured pipeline. Holds everything except the components.
#[derive(Debug, Clone)]
pub struct Pipeline {
    config: AnimusConfig,
    theme: Value,
    groups: GroupDefs,
    usage: UsageMap,
}

impl Pipeline {
    pub fn new(config: AnimusConfig, theme: Value) -> Self {
        Self {
            config,
            theme,
            groups: GroupDefs::default(),
            usage: UsageMap::new(),
        }
    }

    /// Load `animus.toml` / `animus.config.json` and `ANIMUS_*` overrides
    /// from `root`, and the theme from `theme_path`.
    pub fn load(root: impl AsRef<Path>, theme_path: impl AsRef<Path>) -> Result<Self> {
        let config = ConfigLoader::new(root).load()?;
        let theme = load_theme(theme_path)?;
        Ok(Self::new(config, theme))
    }

    /// Replace the built-in prop groups.
    pub fn with_groups(mut self, groups: GroupDefs) -> Self {
        self.groups = groups;
        self
    }

    pub fn with_usage(mut self, usage: UsageMap) -> Self {
        self.usage = usage;
        self
    }

    /// Usage map from the usage collector's JSON.
    pub fn with_usage_json(self, usage: &str) -> Result<Self> {
        let usage = serde_json::from_str(usage).map_err(BuildError::Usage)?;
        Ok(self.with_usage(usage))
    }

    pub fn config(&self) -> &AnimusConfig {
        &self.config
    }

    /// Run over extractor output given as a JSON array of definitions.
    pub fn run_json(&self, definitions: &str) -> Result<BuildOutput> {
        let definitions: Vec<ComponentDefinition> =
            serde_json::from_str(definitions).map_err(BuildError::Definitions)?;
        self.run(definitions)
    }

    /// Generate the stylesheet for `definitions`, in any order.
    ///
    /// Configuration and theme problems fail here, before the registry is
    /// built. Everything after that is reported as diagnostics.
    pub fn run<I>(&self, definitions: I) -> Result<BuildOutput>
    where
        I: IntoIterator<Item = ComponentDefinition>,
    {
        let _span = info_span!("build_stylesheet", mode = %self.config.mode).entered();

        validate_schema(&self.config)?;
        validate_theme(&self.theme)?;

        let registry = ComponentRegistry::from_definitions(definitions);
        debug!(components = registry.len(), "registered components");

        let graph = ComponentGraph::from_registry(&registry);
        let analysis = graph.analyze()?;
        if graph.metadata().cycle_detected {
            warn!(cycles = analysis.cycles.len(), "extends cycles were broken for layering");
        }

        let generated = generator_for(self.config.mode).generate(&GenerationInput {
            config: &self.config,
            theme: &self.theme,
            groups: &self.groups,
            registry: &registry,
            graph: &graph,
            usage: &self.usage,
        })?;

        let diagnostics: Vec<Diagnostic> = registry
            .diagnostics()
            .iter()
            .cloned()
            .map(Diagnostic::from)
            .chain(graph.diagnostics().cloned().map(Diagnostic::from))
            .chain(generated.diagnostics.into_iter().map(Diagnostic::from))
            .collect();

        info!(
            components = registry.len(),
            layers = analysis.statistics.layer_count,
            warnings = diagnostics.iter().filter(|d| d.is_warning()).count(),
            bytes = generated.css.len(),
            "build complete"
        );

        Ok(BuildOutput {
            css: generated.css,
            used_variables: generated.used_variables,
            metadata: generated.metadata,
            atomics: generated.atomics,
            graph,
            analysis,
            diagnostics,
        })
    }
}

/// One-shot pipeline run with the built-in prop groups.
pub fn build_stylesheet<I>(
    config: &AnimusConfig,
    theme: &Value,
    definitions: I,
    usage: &UsageMap,
) -> Result<BuildOutput>
where
    I: IntoIterator<Item = ComponentDefinition>,
{
    Pipeline::new(config.clone(), theme.clone())
        .with_usage(usage.clone())
        .run(definitions)
}
