//! Property-based tests for leaf and tree validation
//!
//! These check invariants over generated parameter trees rather than
//! hand-picked values: idempotence, the link between errors and the clean
//! tree, and inclusive length bounds.

use formcast_core::{LeafValidator, RequestValidator, Violation};
use formcast_schemas::{FieldNode, Fields, LeafSchema, MemoryStore, RequestSchema, ValueType};
use proptest::prelude::*;
use serde_json::{json, Map, Value};

fn store() -> MemoryStore {
    MemoryStore::new()
        .with_model("seq", LeafSchema::new(ValueType::Int).with_range(Some(0), Some(1000)))
        .with_model("name", LeafSchema::new(ValueType::String).with_length(Some(1), Some(8)))
        .with_model("flag", LeafSchema::new(ValueType::Boolean))
}

fn schema() -> RequestSchema {
    RequestSchema::new(
        Fields::new()
            .with("seq", FieldNode::item("SEQ", "seq"))
            .with("name", FieldNode::item("名前", "name").optional())
            .with(
                "friends",
                FieldNode::list(
                    "フレンド",
                    FieldNode::object(
                        "フレンド",
                        Fields::new()
                            .with("seq", FieldNode::item("フレンドSEQ", "seq"))
                            .with("flag", FieldNode::item("フラグ", "flag").optional()),
                    ),
                )
                .optional(),
            ),
    )
}

fn scalar() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::Null),
        any::<bool>().prop_map(Value::from),
        (-50i64..2000).prop_map(Value::from),
        (-50i64..2000).prop_map(|n| Value::from(n.to_string())),
        "[a-z]{0,12}".prop_map(Value::from),
    ]
}

fn friend() -> impl Strategy<Value = Value> {
    prop_oneof![
        (scalar(), scalar()).prop_map(|(seq, flag)| json!({"seq": seq, "flag": flag})),
        scalar(),
    ]
}

fn params() -> impl Strategy<Value = Map<String, Value>> {
    (
        scalar(),
        scalar(),
        prop::option::of(prop::collection::vec(friend(), 0..4)),
    )
        .prop_map(|(seq, name, friends)| {
            let mut map = Map::new();
            map.insert("seq".to_string(), seq);
            map.insert("name".to_string(), name);
            if let Some(friends) = friends {
                map.insert("friends".to_string(), Value::Array(friends));
            }
            map
        })
}

proptest! {
    #[test]
    fn prop_validation_is_idempotent(params in params()) {
        let validator = RequestValidator::new(store());
        let first = validator.validate(&schema(), &params).unwrap();
        let second = validator.validate(&schema(), &params).unwrap();
        prop_assert_eq!(first, second);
    }

    #[test]
    fn prop_clean_tree_iff_no_errors(params in params()) {
        let outcome = RequestValidator::new(store()).validate(&schema(), &params).unwrap();
        prop_assert_eq!(outcome.errors().is_empty(), outcome.clean_parameters().is_some());

        if let Some(clean) = outcome.clean_parameters() {
            for key in clean.keys() {
                prop_assert!(schema().fields().get(key).is_some(), "undeclared key {} in clean tree", key);
                prop_assert!(params.get(key).is_some_and(|v| !v.is_null()));
            }
        }
    }

    #[test]
    fn prop_length_bounds_are_inclusive(text in "\\PC{0,24}", min in 0u64..12, span in 0u64..12) {
        let max = min + span;
        let leaf = LeafValidator::from(LeafSchema::new(ValueType::String).with_length(Some(min), Some(max)));
        let length = text.chars().count() as u64;

        match leaf.validate(&Value::from(text.clone()), true) {
            Ok(()) => prop_assert!(min <= length && length <= max),
            Err(Violation::TooShort { .. }) => prop_assert!(length < min),
            Err(Violation::TooLong { .. }) => prop_assert!(length > max),
            Err(other) => prop_assert!(false, "unexpected violation {:?}", other),
        }
    }

    #[test]
    fn prop_valid_numbers_cast_to_floats(mantissa in -999i64..999, exponent in 0u32..1200) {
        let leaf = LeafValidator::from(LeafSchema::new(ValueType::Number));
        let raw = Value::from(format!("{mantissa}e{exponent}"));

        if leaf.validate(&raw, true).is_ok() {
            prop_assert!(leaf.cast(&raw).is_f64(), "{} cast to {}", raw, leaf.cast(&raw));
        } else {
            prop_assert!(mantissa != 0 && exponent > 300);
        }
    }
}
