//! Loader contracts (LOAD-001 through LOAD-003)

use simspec::{ModelSpecLoader, ParseError};

use crate::common::*;

/// CONTRACT LOAD-001: Components keep declaration order across namespaces and modules
#[test]
fn contract_declaration_order_is_preserved() {
    let spec = ModelSpecLoader::new()
        .parse_str("components:\n  pkg:\n    - A()\n    - B()\n", "model.yaml")
        .unwrap();
    let names: Vec<&str> = spec.components().iter().map(|c| c.name()).collect();
    assert_eq!(names, vec!["A", "B"]);

    let spec = ModelSpecLoader::new().parse_str(NUTRITION_SPEC, "model.yaml").unwrap();
    let names: Vec<&str> = spec.components().iter().map(|c| c.name()).collect();
    assert_eq!(
        names,
        vec!["BasePopulation", "Mortality", "DiseaseObserver", "MaternalInterventions"]
    );
}

/// CONTRACT LOAD-002: A commented-out entry yields no component and no error
#[test]
fn contract_commented_entry_is_ignored() {
    let yaml = "components:\n  pkg:\n    - A()\n    # - SomeComponent()\n";
    let spec = ModelSpecLoader::new().parse_str(yaml, "model.yaml").unwrap();
    assert_eq!(spec.components().len(), 1);
}

/// CONTRACT LOAD-003: Only `components` and `configuration` are accepted at the top level
#[test]
fn contract_unknown_top_level_key_is_rejected() {
    let err = ModelSpecLoader::new()
        .parse_str("components: {}\nplugins: {}\n", "model.yaml")
        .unwrap_err();
    assert!(matches!(err, ParseError::UnknownSection { .. }));
}

/// CONTRACT LOAD-004: Namespaces are checked against the known set when one is configured
#[test]
fn contract_unknown_namespace_is_rejected() {
    let loader = ModelSpecLoader::new().with_known_namespaces(["vivarium_public_health"]);
    let err = loader
        .parse_str(NUTRITION_SPEC, "model.yaml")
        .unwrap_err();
    assert!(matches!(err, ParseError::UnknownNamespace { ref key, .. } if key == "vivarium_gates_nutrition"));
}
