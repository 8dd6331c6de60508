use super::*;

fn tree_with(paths: &[(&str, ConfigValue)]) -> ConfigurationTree {
    let mut tree = ConfigurationTree::new();
    for (path, value) in paths {
        tree.set_path(path, value.clone()).unwrap();
    }
    tree
}

#[test]
fn get_walks_dotted_paths() {
    let tree = tree_with(&[
        ("time.start.year", 2025_i64.into()),
        ("time.step_size", 7_i64.into()),
    ]);

    assert_eq!(tree.get("time.start.year"), Some(&ConfigValue::from(2025_i64)));
    assert_eq!(tree.get("time.step_size"), Some(&ConfigValue::from(7_i64)));
    assert!(tree.get("time.start").unwrap().as_mapping().is_some());
    assert_eq!(tree.get("time.end.year"), None);
    assert_eq!(tree.get("time.step_size.days"), None);
}

#[test]
fn set_path_replaces_null_intermediate() {
    let mut tree = ConfigurationTree::new();
    tree.insert("input_data", Scalar::Null);

    tree.set_path("input_data.artifact_path", "/tmp/ethiopia.hdf")
        .unwrap();

    assert_eq!(
        tree.get("input_data.artifact_path").and_then(ConfigValue::as_str),
        Some("/tmp/ethiopia.hdf")
    );
}

#[test]
fn set_path_rejects_scalar_intermediate() {
    let mut tree = tree_with(&[("population", 100_i64.into())]);

    let err = tree
        .set_path("population.population_size", 10_i64)
        .unwrap_err();

    assert_eq!(
        err,
        ConfigurationError::TypeMismatch {
            path: "population".to_string(),
            expected: ValueShape::Scalar,
            found: ValueShape::Mapping,
        }
    );
}

#[test]
fn leaves_are_sorted_and_include_empty_mappings() {
    let mut tree = tree_with(&[
        ("stratification.default", vec![ConfigValue::from("age_group")].into()),
        ("population.population_size", 100_i64.into()),
    ]);
    tree.set_path("stratification.excluded_categories", ConfigurationTree::new())
        .unwrap();

    let paths: Vec<String> = tree.leaves().into_iter().map(|(p, _)| p).collect();
    assert_eq!(
        paths,
        vec![
            "population.population_size",
            "stratification.default",
            "stratification.excluded_categories",
        ]
    );
}

#[test]
fn inline_rendering() {
    let value = ConfigValue::List(vec!["age".into(), 3_i64.into()]);
    assert_eq!(value.to_inline_string(), "[age, 3]");
}
