//! Resolution contracts (RESOLVE-001 through RESOLVE-003)

use simspec::domain::services::{BASE_LAYER, COMPONENT_LAYER, MODEL_LAYER, OVERRIDE_LAYER};
use simspec::parser::parse_configuration;
use simspec::{parse_catalog, parse_override, ConfigValue, ModelSpecLoader, Settings, SpecPipeline};

use crate::common::*;

fn pipeline() -> SpecPipeline {
    SpecPipeline::from_settings(&Settings::default())
        .unwrap()
        .with_registry(parse_catalog(NUTRITION_CATALOG, "catalog.yaml").unwrap())
}

/// CONTRACT RESOLVE-001: Layer priority is base < component defaults < model < overrides
#[test]
fn contract_layer_priority() {
    let pipeline = pipeline()
        .with_override("mms.yaml", parse_configuration(MMS_SCENARIO, "mms.yaml").unwrap());
    let spec = ModelSpecLoader::new().parse_str(NUTRITION_SPEC, "model.yaml").unwrap();
    let run = pipeline.prepare(spec, "model.yaml").unwrap();
    let config = &run.configuration;

    assert_eq!(config.source_of("randomness.map_size").unwrap().layer, BASE_LAYER);
    assert_eq!(config.source_of("population.include_sex").unwrap().layer, COMPONENT_LAYER);
    assert_eq!(config.source_of("time.step_size").unwrap().layer, MODEL_LAYER);
    assert_eq!(config.source_of("intervention.scenario").unwrap().layer, OVERRIDE_LAYER);
    assert_eq!(
        config.tree.get("population.population_size").and_then(ConfigValue::as_i64),
        Some(10_000)
    );
}

/// CONTRACT RESOLVE-002: Artifact paths pass through unvalidated
#[test]
fn contract_artifact_path_passes_through() {
    let spec = ModelSpecLoader::new().parse_str(NUTRITION_SPEC, "model.yaml").unwrap();
    let run = pipeline().prepare(spec, "model.yaml").unwrap();
    assert_eq!(
        run.configuration
            .tree
            .get("input_data.artifact_path")
            .and_then(ConfigValue::as_str),
        Some("/mnt/artifacts/ethiopia.hdf")
    );
}

/// CONTRACT RESOLVE-003: Misspelled override keys warn but do not fail
#[test]
fn contract_misspelled_override_warns() {
    let pipeline = pipeline().with_override("--set", parse_override("population.population_sise=5").unwrap());
    let spec = ModelSpecLoader::new().parse_str(NUTRITION_SPEC, "model.yaml").unwrap();
    let run = pipeline.prepare(spec, "model.yaml").unwrap();

    assert_eq!(run.configuration.warnings.len(), 1);
    let warning = &run.configuration.warnings[0];
    assert_eq!(warning.path, "population.population_sise");
    assert_eq!(warning.suggestion.as_deref(), Some("population_size"));
}

/// CONTRACT RESOLVE-004: Open slots such as excluded_categories accept new keys silently
#[test]
fn contract_open_slots_do_not_warn() {
    let pipeline = pipeline().with_override(
        "--set",
        parse_override("stratification.excluded_categories.age_group=[early_neonatal]").unwrap(),
    );
    let spec = ModelSpecLoader::new().parse_str(NUTRITION_SPEC, "model.yaml").unwrap();
    let run = pipeline.prepare(spec, "model.yaml").unwrap();
    assert!(run.configuration.warnings.is_empty());
}
