//! Dispatch contracts (DISPATCH-001 through DISPATCH-003)

use simspec::{
    parse_catalog, ComponentReference, ComponentRegistry, InstantiationError, ModelSpecLoader,
};

use crate::common::*;

/// CONTRACT DISPATCH-001: An unknown component names itself and every namespace searched
#[test]
fn contract_unresolved_component_reports_search() {
    let registry = parse_catalog(NUTRITION_CATALOG, "catalog.yaml").unwrap();
    let err = registry
        .instantiate(&ComponentReference::new("vivarium_public_health.population", "Foo", vec![]))
        .unwrap_err();

    match err {
        InstantiationError::Unresolved(unresolved) => {
            assert_eq!(unresolved.name, "Foo");
            assert_eq!(
                unresolved.searched,
                vec![
                    "vivarium_public_health.population",
                    "vivarium_public_health.results",
                    "vivarium_gates_nutrition.components",
                ]
            );
        }
        other => panic!("expected Unresolved, got {:?}", other),
    }
}

/// CONTRACT DISPATCH-002: The declared namespace wins over others offering the same name
#[test]
fn contract_declared_namespace_wins() {
    let catalog = r#"
first:
    Thing:
        name: first_thing
second:
    Thing:
        name: second_thing
"#;
    let registry = parse_catalog(catalog, "catalog.yaml").unwrap();
    let thing = registry
        .instantiate(&ComponentReference::new("second", "Thing", vec![]))
        .unwrap();
    assert_eq!(thing.name(), "second_thing");
}

/// CONTRACT DISPATCH-003: Every reference in a specification instantiates in order
#[test]
fn contract_all_references_instantiate_in_order() {
    let registry = parse_catalog(NUTRITION_CATALOG, "catalog.yaml").unwrap();
    let spec = ModelSpecLoader::new().parse_str(NUTRITION_SPEC, "model.yaml").unwrap();

    let names: Vec<String> = registry
        .instantiate_all(spec.components())
        .unwrap()
        .iter()
        .map(|c| c.name())
        .collect();
    assert_eq!(
        names,
        vec![
            "base_population",
            "mortality",
            "disease_observer.anemia",
            "maternal_interventions",
        ]
    );
}

/// CONTRACT DISPATCH-004: An empty registry resolves nothing
#[test]
fn contract_empty_registry_reports_no_namespaces() {
    let err = ComponentRegistry::new()
        .instantiate(&ComponentReference::new("", "Foo", vec![]))
        .unwrap_err();
    assert!(err.to_string().contains("<no namespaces registered>"));
}
