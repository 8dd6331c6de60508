//! Property tests for configuration merging.

use proptest::prelude::*;

use simspec::{merge, ConfigValue, ConfigurationTree};

fn key() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[a-c]").unwrap()
}

fn leaf() -> impl Strategy<Value = ConfigValue> {
    prop_oneof![
        any::<i64>().prop_map(ConfigValue::from),
        any::<bool>().prop_map(ConfigValue::from),
        "[a-z]{0,6}".prop_map(|s| ConfigValue::from(s.as_str())),
    ]
}

/// Trees up to three levels deep over a tiny key alphabet, so merges collide often.
fn tree() -> impl Strategy<Value = ConfigurationTree> {
    let value = leaf().prop_recursive(3, 24, 3, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..3).prop_map(ConfigValue::List),
            proptest::collection::btree_map(key(), inner, 1..3)
                .prop_map(|m| ConfigValue::Mapping(m.into_iter().collect())),
        ]
    });
    proptest::collection::btree_map(key(), value, 0..3).prop_map(|m| m.into_iter().collect())
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: Merging the empty tree changes nothing.
    #[test]
    fn property_empty_override_is_identity(base in tree()) {
        prop_assert_eq!(merge(&base, &ConfigurationTree::new()).unwrap(), base.clone());
    }

    /// PROPERTY: Merging a tree onto itself changes nothing.
    #[test]
    fn property_self_merge_is_identity(base in tree()) {
        prop_assert_eq!(merge(&base, &base).unwrap(), base.clone());
    }

    /// PROPERTY: Applying the same override twice equals applying it once.
    #[test]
    fn property_merge_is_idempotent(base in tree(), over in tree()) {
        if let Ok(once) = merge(&base, &over) {
            prop_assert_eq!(merge(&once, &over).unwrap(), once);
        }
    }

    /// PROPERTY: Every leaf of a successful override is visible in the result.
    #[test]
    fn property_override_leaves_win(base in tree(), over in tree()) {
        if let Ok(merged) = merge(&base, &over) {
            for (path, value) in over.leaves() {
                prop_assert_eq!(merged.get(&path), Some(value));
            }
        }
    }
}
