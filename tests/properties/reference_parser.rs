//! Property tests for component reference parsing.

use proptest::prelude::*;

use simspec::{parse_component_reference, ComponentReference, Literal};

fn identifier() -> impl Strategy<Value = String> {
    proptest::string::string_regex("[A-Za-z_][A-Za-z0-9_]{0,12}").unwrap()
}

fn literal() -> impl Strategy<Value = Literal> {
    prop_oneof![
        proptest::string::string_regex("[a-z_ .]{0,16}")
            .unwrap()
            .prop_map(Literal::Str),
        any::<i64>().prop_map(Literal::Int),
        any::<bool>().prop_map(Literal::Bool),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 64,
        .. ProptestConfig::default()
    })]

    /// PROPERTY: A displayed reference parses back to itself.
    #[test]
    fn property_display_round_trip(
        namespace in proptest::collection::vec(identifier(), 0..=3),
        name in identifier(),
        args in proptest::collection::vec(literal(), 0..=4),
    ) {
        let reference = ComponentReference::new(namespace.join("."), name, args);
        let parsed = parse_component_reference(&reference.to_string(), "")
            .expect("displayed reference should parse");
        prop_assert_eq!(parsed, reference);
    }

    /// PROPERTY: The parser never panics on arbitrary input.
    #[test]
    fn property_parse_never_panics(text in "(?s).{0,128}") {
        let _ = parse_component_reference(&text, "pkg");
    }

    /// PROPERTY: Text without a parenthesis is never a reference.
    #[test]
    fn property_parens_are_required(text in "[A-Za-z0-9_. ]{0,32}") {
        prop_assert!(parse_component_reference(&text, "pkg").is_err());
    }
}
