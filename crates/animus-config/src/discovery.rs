//! File-based config discovery
//!
//! Layers configuration the same way every run:
//! defaults → `animus.toml` / `animus.config.json` → `ANIMUS_*` environment.

use std::fs;
use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format as _, Json, Serialized, Toml},
    Figment,
};
use serde_json::Value;

use crate::config::AnimusConfig;
use crate::error::{ConfigError, Result};
use crate::validation::{validate_schema, validate_theme};

const TOML_CONFIG: &str = "animus.toml";
const JSON_CONFIG: &str = "animus.config.json";
const ENV_PREFIX: &str = "ANIMUS_";

/// Layered configuration loader rooted at a project directory.
///
/// # Example
///
/// ```no_run
/// use animus_config::ConfigLoader;
///
/// let config = ConfigLoader::new(".").load().unwrap();
/// println!("prefix = {}", config.prefix);
/// ```
pub struct ConfigLoader {
    root: PathBuf,
    env: bool,
}

impl ConfigLoader {
    pub fn new(root: impl AsRef<Path>) -> Self {
        Self {
            root: root.as_ref().to_path_buf(),
            env: true,
        }
    }

    /// Skip the `ANIMUS_*` environment layer.
    pub fn without_env(mut self) -> Self {
        self.env = false;
        self
    }

    /// Find a config file in the root directory
    ///
    /// Searches in this order:
    /// 1. animus.toml
    /// 2. animus.config.json
    pub fn find(&self) -> Option<PathBuf> {
        [TOML_CONFIG, JSON_CONFIG]
            .into_iter()
            .map(|name| self.root.join(name))
            .find(|path| path.exists())
    }

    /// The figment this loader extracts from, exposed for callers that want
    /// to merge their own providers (e.g. parsed CLI flags) on top.
    pub fn figment(&self) -> Figment {
        let mut figment = Figment::new().merge(Serialized::defaults(AnimusConfig::default()));

        if let Some(path) = self.find() {
            tracing::debug!("Loading Animus config from: {}", path.display());
            figment = if path.extension().is_some_and(|ext| ext == "json") {
                figment.merge(Json::file(path))
            } else {
                figment.merge(Toml::file(path))
            };
        }

        if self.env {
            figment = figment.merge(Env::prefixed(ENV_PREFIX));
        }

        figment
    }

    /// Extract and validate the configuration.
    pub fn load(&self) -> Result<AnimusConfig> {
        let config: AnimusConfig = self.figment().extract()?;
        validate_schema(&config)?;
        tracing::trace!(
            prefix = %config.prefix,
            theme_resolution = %config.theme_resolution,
            mode = %config.mode,
            "configuration loaded"
        );
        Ok(config)
    }
}

/// Read and validate a JSON theme file.
pub fn load_theme(path: impl AsRef<Path>) -> Result<Value> {
    let path = path.as_ref();
    if !path.exists() {
        return Err(ConfigError::ThemeNotFound {
            path: path.to_path_buf(),
        });
    }

    let content = fs::read_to_string(path)?;
    let theme: Value = serde_json::from_str(&content).map_err(|e| {
        ConfigError::malformed_theme(
            format!("{} is not valid JSON: {e}", path.display()),
            None,
        )
    })?;
    validate_theme(&theme)?;
    Ok(theme)
}
