//! Merge contracts (MERGE-001 through MERGE-004)

use simspec::{merge, ConfigValue, ConfigurationError, ConfigurationTree};

fn tree(yaml: &str) -> ConfigurationTree {
    simspec::parser::parse_configuration(yaml, "test.yaml").unwrap()
}

/// CONTRACT MERGE-001: Scalar overrides replace the declared value
#[test]
fn contract_scalar_override_replaces() {
    let merged = merge(
        &tree("population:\n  population_size: 20_000\n"),
        &tree("population:\n  population_size: 10_000\n"),
    )
    .unwrap();
    assert_eq!(
        merged.get("population.population_size").and_then(ConfigValue::as_i64),
        Some(10_000)
    );
}

/// CONTRACT MERGE-002: Lists are replaced, never concatenated
#[test]
fn contract_list_override_replaces() {
    let merged = merge(
        &tree("stratification:\n  default: ['age_group']\n"),
        &tree("stratification:\n  default: ['age']\n"),
    )
    .unwrap();
    assert_eq!(
        merged.get("stratification.default"),
        Some(&ConfigValue::List(vec!["age".into()]))
    );
}

/// CONTRACT MERGE-003: Shape changes are rejected in both directions
#[test]
fn contract_shape_mismatch_is_rejected() {
    let cases = [
        ("a:\n  b: 1\n", "a: 1\n"),
        ("a: 1\n", "a:\n  b: 1\n"),
        ("a: [1]\n", "a: 1\n"),
        ("a: 1\n", "a: [1]\n"),
        ("a:\n  b: 1\n", "a: [1]\n"),
        ("a: [1]\n", "a:\n  b: 1\n"),
    ];
    for (base, over) in cases {
        let result = merge(&tree(base), &tree(over));
        assert!(
            matches!(result, Err(ConfigurationError::TypeMismatch { ref path, .. }) if path == "a"),
            "{:?} over {:?} gave {:?}",
            over,
            base,
            result
        );
    }
}

/// CONTRACT MERGE-004: Merging is idempotent and the empty override is the identity
#[test]
fn contract_merge_identity_and_idempotence() {
    let base = tree("population:\n  population_size: 100\ntime:\n  step_size: 1\n");
    let over = tree("population:\n  population_size: 5\n");

    assert_eq!(merge(&base, &ConfigurationTree::new()).unwrap(), base);
    let once = merge(&base, &over).unwrap();
    assert_eq!(merge(&once, &over).unwrap(), once);
}
