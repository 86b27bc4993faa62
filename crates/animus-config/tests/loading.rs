//! Tests for layered config loading.

use animus_config::{
    load_theme, AnimusConfig, Breakpoint, ConfigError, ConfigLoader, GeneratorMode,
    ThemeResolution,
};
use std::fs;
use tempfile::TempDir;

#[test]
fn defaults_apply_without_config_file() {
    let dir = TempDir::new().unwrap();
    let config = ConfigLoader::new(dir.path()).without_env().load().unwrap();
    assert_eq!(config, AnimusConfig::default());
}

#[test]
fn toml_config_overrides_defaults() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("animus.toml"),
        r#"
prefix = "ui"
theme_resolution = "css-variable"
atomic = false
mode = "runtime"

[[breakpoints]]
name = "tablet"
min_width = "640px"

[[breakpoints]]
name = "desktop"
min_width = "1280px"
"#,
    )
    .unwrap();

    let config = ConfigLoader::new(dir.path()).without_env().load().unwrap();
    assert_eq!(config.prefix, "ui");
    assert_eq!(config.theme_resolution, ThemeResolution::CssVariable);
    assert_eq!(config.mode, GeneratorMode::Runtime);
    assert!(!config.atomic);
    assert!(config.layered);

    let names: Vec<&str> = config.breakpoints.iter().map(|bp| bp.name.as_str()).collect();
    assert_eq!(names, vec!["tablet", "desktop"]);
    assert_eq!(
        config.breakpoints.get("desktop"),
        Some(&Breakpoint::new("desktop", "1280px"))
    );
}

#[test]
fn json_config_is_discovered() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("animus.config.json"),
        r#"{ "theme_resolution": "inline", "minify": true }"#,
    )
    .unwrap();

    let config = ConfigLoader::new(dir.path()).without_env().load().unwrap();
    assert_eq!(config.theme_resolution, ThemeResolution::Inline);
    assert!(config.minify);
}

#[test]
fn unknown_theme_resolution_names_the_option() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("animus.toml"),
        r#"theme_resolution = "sometimes""#,
    )
    .unwrap();

    let err = ConfigLoader::new(dir.path()).without_env().load().unwrap_err();
    match err {
        ConfigError::InvalidValue { field, message } => {
            assert_eq!(field, "theme_resolution");
            assert!(message.contains("sometimes"), "{message}");
        }
        other => panic!("unexpected error: {other:?}"),
    }
}

#[test]
fn misordered_breakpoints_fail_validation() {
    let dir = TempDir::new().unwrap();
    fs::write(
        dir.path().join("animus.toml"),
        r#"
[[breakpoints]]
name = "lg"
min_width = "1200px"

[[breakpoints]]
name = "sm"
min_width = "768px"
"#,
    )
    .unwrap();

    let err = ConfigLoader::new(dir.path()).without_env().load().unwrap_err();
    assert!(matches!(err, ConfigError::InvalidBreakpoint { .. }));
}

#[test]
fn load_theme_validates_shape() {
    let dir = TempDir::new().unwrap();
    let good = dir.path().join("theme.json");
    fs::write(&good, r##"{ "colors": { "primary": "#007bff" }, "space": [0, 4, 8] }"##).unwrap();
    let theme = load_theme(&good).unwrap();
    assert_eq!(theme["colors"]["primary"], "#007bff");

    let bad = dir.path().join("bad.json");
    fs::write(&bad, r#"{ "colors": 12 }"#).unwrap();
    assert!(matches!(
        load_theme(&bad).unwrap_err(),
        ConfigError::MalformedTheme { .. }
    ));

    let broken = dir.path().join("broken.json");
    fs::write(&broken, "{ not json").unwrap();
    assert!(matches!(
        load_theme(&broken).unwrap_err(),
        ConfigError::MalformedTheme { .. }
    ));
}
