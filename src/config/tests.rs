//! Tests for the settings module

use super::loader::load_with_warnings;
use super::*;
use crate::domain::entities::ConfigValue;
use std::collections::HashMap;
use std::fs;
use std::path::PathBuf;
use tempfile::tempdir;

#[test]
fn test_settings_default() {
    let settings = Settings::default();

    assert!(settings.namespaces.known.is_empty());
    assert!(settings.catalog.path.is_none());
    assert!(settings.base.path.is_none());
    assert_eq!(settings.output.verbosity, Verbosity::Normal);
}

#[test]
fn test_verbosity_serde() {
    let verbosity: Verbosity = serde_yaml_ng::from_str("debug").unwrap();
    assert_eq!(verbosity, Verbosity::Debug);

    let verbosity: Verbosity = serde_yaml_ng::from_str("quiet").unwrap();
    assert_eq!(verbosity, Verbosity::Quiet);
}

#[test]
fn test_settings_parse_toml() {
    let toml = r#"
[namespaces]
known = ["vivarium_public_health", "vivarium_gates_nutrition"]

[catalog]
path = "catalog.yaml"

[output]
verbosity = "verbose"
"#;

    let settings: Settings = toml::from_str(toml).unwrap();

    assert_eq!(settings.namespaces.known.len(), 2);
    assert_eq!(settings.catalog.path, Some(PathBuf::from("catalog.yaml")));
    assert_eq!(settings.output.verbosity, Verbosity::Verbose);
    assert_eq!(settings.output.verbosity.as_count(), 1);
}

#[test]
fn test_settings_load_file() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[base]\npath = \"base.yaml\"\n").unwrap();

    let settings = Settings::load(&path).unwrap();
    assert_eq!(settings.base.path, Some(PathBuf::from("base.yaml")));
}

#[test]
fn test_settings_unknown_keys_warn_with_suggestion() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[namespaces]\nknwn = [\"a\"]\n\n[catalgo]\npath = \"x\"\n").unwrap();

    let (settings, warnings) = load_with_warnings(&path).unwrap();

    assert!(settings.namespaces.known.is_empty());
    assert_eq!(warnings.len(), 2);

    let knwn = warnings.iter().find(|w| w.key == "knwn").unwrap();
    assert_eq!(knwn.line, Some(2));
    assert_eq!(knwn.suggestion.as_deref(), Some("known"));

    let catalgo = warnings.iter().find(|w| w.key == "catalgo").unwrap();
    assert_eq!(catalgo.suggestion.as_deref(), Some("catalog"));
    assert!(catalgo.to_string().contains("did you mean 'catalog'?"));
}

#[test]
fn test_settings_invalid_toml_is_error() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("config.toml");
    fs::write(&path, "[output]\nverbosity = 3\n").unwrap();

    let err = Settings::load(&path).unwrap_err();
    assert!(err.to_string().contains("invalid settings"));
}

#[test]
fn test_load_or_default_prefers_explicit_then_project() {
    let dir = tempdir().unwrap();
    let project = dir.path().join(".simspec");
    fs::create_dir_all(&project).unwrap();
    fs::write(
        project.join("config.toml"),
        "[namespaces]\nknown = [\"from_project\"]\n",
    )
    .unwrap();
    let explicit = dir.path().join("explicit.toml");
    fs::write(&explicit, "[namespaces]\nknown = [\"from_explicit\"]\n").unwrap();

    let settings = Settings::load_or_default(Some(&explicit), Some(dir.path())).unwrap();
    assert_eq!(settings.namespaces.known, vec!["from_explicit".to_string()]);

    let settings = Settings::load_or_default(None, Some(dir.path())).unwrap();
    assert_eq!(settings.namespaces.known, vec!["from_project".to_string()]);
}

#[test]
fn test_load_or_default_missing_explicit_is_error() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("nope.toml");
    assert!(Settings::load_or_default(Some(&missing), None).is_err());
}

#[test]
fn test_overrides_from_lookup() {
    let vars: HashMap<&str, &str> = [
        ("SIMSPEC_CATALOG", "/tmp/catalog.yaml"),
        ("SIMSPEC_NAMESPACES", "vivarium_public_health, ,vivarium_gates_nutrition"),
        ("SIMSPEC_VERBOSITY", "DEBUG"),
    ]
    .into_iter()
    .collect();

    let settings = with_overrides_from(Settings::default(), |name| {
        vars.get(name).map(|v| v.to_string())
    });

    assert_eq!(settings.catalog.path, Some(PathBuf::from("/tmp/catalog.yaml")));
    assert_eq!(
        settings.namespaces.known,
        vec!["vivarium_public_health".to_string(), "vivarium_gates_nutrition".to_string()]
    );
    assert_eq!(settings.output.verbosity, Verbosity::Debug);
}

#[test]
fn test_overrides_from_empty_lookup_keeps_settings() {
    let mut settings = Settings::default();
    settings.namespaces.known = vec!["kept".to_string()];

    let settings = with_overrides_from(settings, |_| None);
    assert_eq!(settings.namespaces.known, vec!["kept".to_string()]);
}

#[test]
fn test_builtin_base_parses() {
    let base = builtin_base().unwrap();

    assert_eq!(
        base.get("randomness.map_size").and_then(ConfigValue::as_i64),
        Some(1_000_000)
    );
    assert_eq!(
        base.get("population.population_size").and_then(ConfigValue::as_i64),
        Some(100)
    );
    assert!(base.get("input_data.artifact_path").map(ConfigValue::is_null).unwrap_or(false));
    assert_eq!(
        base.get("stratification.excluded_categories")
            .and_then(ConfigValue::as_mapping)
            .map(|m| m.is_empty()),
        Some(true)
    );
}

#[test]
fn test_base_configuration_from_settings_path() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("base.yaml");
    fs::write(&path, "population:\n  population_size: 7\n").unwrap();

    let mut settings = Settings::default();
    settings.base.path = Some(path.clone());

    let (origin, tree) = base_configuration(&settings).unwrap();
    assert_eq!(origin, path.display().to_string());
    assert_eq!(
        tree.get("population.population_size").and_then(ConfigValue::as_i64),
        Some(7)
    );

    let (origin, _) = base_configuration(&Settings::default()).unwrap();
    assert_eq!(origin, BUILTIN_ORIGIN);
}
