//! Property-based tests for the value algebra.
//!
//! Generated values cover every kind (including typed nils and nested
//! lists/maps) and check the laws the evaluator relies on:
//! 1. Nil law: a nil equals exactly the nils of its own type
//! 2. Equality is reflexive and symmetric
//! 3. Integer comparison is antisymmetric
//! 4. Encoding round-trips

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "Tests can panic")]
#![allow(
    clippy::redundant_closure_for_method_calls,
    reason = "Proptest macros generate code with these patterns"
)]

use std::collections::BTreeMap;

use proptest::prelude::*;
use rel_value::{TypeSignature, Value};

// -- Strategies --

fn scalar_type() -> impl Strategy<Value = TypeSignature> {
    prop_oneof![
        Just(TypeSignature::Boolean),
        Just(TypeSignature::Integer),
        Just(TypeSignature::String),
        Just(TypeSignature::Regexp),
    ]
}

/// Values of a scalar type, nil included.
fn scalar_of(ty: &TypeSignature) -> BoxedStrategy<Value> {
    let nil = Just(Value::nil_of(ty));
    match ty {
        TypeSignature::Boolean => prop_oneof![nil, any::<bool>().prop_map(Value::boolean)].boxed(),
        TypeSignature::Integer => prop_oneof![nil, any::<i64>().prop_map(Value::integer)].boxed(),
        TypeSignature::Regexp => prop_oneof![
            nil,
            "[a-z]{1,6}".prop_map(|p| Value::new_regexp(&p).expect("literal pattern")),
        ]
        .boxed(),
        _ => prop_oneof![nil, "[a-z ]{0,8}".prop_map(Value::string)].boxed(),
    }
}

fn list_of(unit: TypeSignature) -> BoxedStrategy<Value> {
    prop::collection::vec(scalar_of(&unit), 0..6)
        .prop_map(move |items| Value::list(unit.clone(), items).unwrap())
        .boxed()
}

fn map_of(unit: TypeSignature) -> BoxedStrategy<Value> {
    prop::collection::btree_map("[a-z]{1,3}", prop::collection::vec(scalar_of(&unit), 1..3), 0..4)
        .prop_map(move |entries: BTreeMap<String, Vec<Value>>| {
            Value::map(unit.clone(), entries).unwrap()
        })
        .boxed()
}

fn value_strategy() -> impl Strategy<Value = Value> {
    prop_oneof![
        Just(Value::NIL),
        scalar_type().prop_flat_map(|ty| scalar_of(&ty)),
        scalar_type().prop_flat_map(list_of),
        scalar_type().prop_flat_map(map_of),
        scalar_type().prop_map(|ty| Value::nil_of(&TypeSignature::list(ty))),
    ]
}

proptest! {
    #![proptest_config(ProptestConfig {
        cases: 256,
        ..ProptestConfig::default()
    })]

    #[test]
    fn prop_nil_law(v in value_strategy()) {
        let nil = Value::nil_of(&v.signature());
        prop_assert!(nil.equal(&nil));
        prop_assert_eq!(nil.equal(&v), v.is_nil());
        prop_assert_eq!(v.equal(&nil), v.is_nil());
    }

    #[test]
    fn prop_equality_reflexive_and_symmetric(a in value_strategy(), b in value_strategy()) {
        prop_assert!(a.equal(&a.clone()));
        prop_assert_eq!(a.equal(&b), b.equal(&a));
    }

    #[test]
    fn prop_compare_antisymmetric(a in any::<i64>(), b in any::<i64>()) {
        let ab = Value::integer(a).compare(&Value::integer(b)).unwrap();
        let ba = Value::integer(b).compare(&Value::integer(a)).unwrap();
        let (Value::Integer(Some(ab)), Value::Integer(Some(ba))) = (ab, ba) else {
            return Err(TestCaseError::fail("compare returned a non-integer"));
        };
        prop_assert_eq!(ab, -ba);
        prop_assert_eq!(ab == 0, a == b);
    }

    #[test]
    fn prop_serde_round_trip(v in value_strategy()) {
        let text = serde_json::to_string(&v).unwrap();
        let back: Value = serde_json::from_str(&text).unwrap();
        prop_assert_eq!(text.contains("\"value\""), !v.is_nil());
        prop_assert_eq!(back, v);
    }

    #[test]
    fn prop_display_marks_nil(v in value_strategy()) {
        prop_assert_eq!(v.to_string() == "<<nil>>", v.is_nil());
    }

    #[test]
    fn prop_list_items_are_found(v in scalar_type().prop_flat_map(list_of)) {
        for item in v.to_list().unwrap().unwrap_or_default() {
            if !item.is_nil() {
                prop_assert!(!v.search_all(item).unwrap().is_empty());
            }
        }
    }
}
