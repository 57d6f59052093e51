use pretty_assertions::assert_eq;
use rel_value::{TypeSignature, Value};

use super::helpers::{constant, failing, heap, int, pos, string, string_list, TestContext};
use crate::errors::{BuildError, EvalErrorKind};
use crate::expr::{CompareOp, Expr};

const ORDERING: [CompareOp; 4] = [
    CompareOp::Less,
    CompareOp::LessEqual,
    CompareOp::Greater,
    CompareOp::GreaterEqual,
];

fn compare(op: CompareOp, left: Expr, right: Expr) -> Expr {
    Expr::compare(op, left, right, pos()).unwrap()
}

fn compare_values(op: CompareOp, left: &Value, right: &Value) -> Expr {
    compare(op, constant(left.clone()), constant(right.clone()))
}

#[test]
fn test_equal_nil_law() {
    let nils = [
        Value::NIL_BOOLEAN,
        Value::NIL_INTEGER,
        Value::NIL_STRING,
        Value::NIL_REGEXP,
        Value::nil_of(&TypeSignature::list(TypeSignature::String)),
    ];
    let values = [
        Value::TRUE,
        Value::integer(1),
        Value::string("a"),
        Value::new_regexp("a").unwrap(),
        string_list(&["a"]),
    ];
    let mut ctx = TestContext::new();
    let mut eval = |op, l: &Value, r: &Value| ctx.eval(compare_values(op, l, r)).unwrap();
    for (nil, value) in nils.iter().zip(&values) {
        assert_eq!(eval(CompareOp::Equal, nil, nil), Value::TRUE, "{nil} == {nil}");
        assert_eq!(eval(CompareOp::Equal, nil, value), Value::FALSE, "{nil} == {value}");
        assert_eq!(eval(CompareOp::Equal, value, nil), Value::FALSE, "{value} == {nil}");
        assert_eq!(eval(CompareOp::Equal, value, value), Value::TRUE, "{value} == {value}");
        assert_eq!(eval(CompareOp::NotEqual, nil, nil), Value::FALSE);
        assert_eq!(eval(CompareOp::NotEqual, nil, value), Value::TRUE);
    }
}

#[test]
fn test_equal_across_types_is_false() {
    let mut ctx = TestContext::new();
    let result = ctx.eval(compare(CompareOp::Equal, int(1), string("1"))).unwrap();
    assert_eq!(result, Value::FALSE);
}

#[test]
fn test_ordering_results() {
    let mut ctx = TestContext::new();
    let cases = [
        (CompareOp::Less, 1, 2, true),
        (CompareOp::Less, 2, 2, false),
        (CompareOp::LessEqual, 2, 2, true),
        (CompareOp::LessEqual, 3, 2, false),
        (CompareOp::Greater, 3, 2, true),
        (CompareOp::Greater, 2, 2, false),
        (CompareOp::GreaterEqual, 2, 2, true),
        (CompareOp::GreaterEqual, 1, 2, false),
    ];
    for (op, l, r, expected) in cases {
        let result = ctx.eval(compare(op, int(l), int(r))).unwrap();
        assert_eq!(result, Value::boolean(expected), "{l} {} {r}", op.as_str());
    }
}

#[test]
fn test_ordering_propagates_nil() {
    let mut ctx = TestContext::new();
    for op in ORDERING {
        for (l, r) in [
            (Value::NIL_INTEGER, Value::integer(1)),
            (Value::integer(1), Value::NIL_INTEGER),
            (Value::NIL_INTEGER, Value::NIL_INTEGER),
        ] {
            let result = ctx.eval(compare(op, constant(l), constant(r))).unwrap();
            assert_eq!(result, Value::NIL_BOOLEAN, "{}", op.as_str());
        }
    }
}

#[test]
fn test_match_propagates_nil() {
    let mut ctx = TestContext::new();
    let nil_text = compare(CompareOp::Match, constant(Value::NIL_STRING), string("a"));
    assert_eq!(ctx.eval(nil_text).unwrap(), Value::NIL_BOOLEAN);
    let nil_pattern = compare(CompareOp::Match, string("a"), constant(Value::NIL_STRING));
    assert_eq!(ctx.eval(nil_pattern).unwrap(), Value::NIL_BOOLEAN);
}

#[test]
fn test_match_precompiles_string_constant() {
    let expr = compare(CompareOp::Match, string("foobar"), string("^foo"));
    let crate::expr::ExprKind::Compare { right, .. } = expr.kind() else {
        panic!("expected compare node");
    };
    assert_eq!(right.result_type(), &TypeSignature::Regexp);

    let mut ctx = TestContext::new();
    assert_eq!(ctx.eval(expr).unwrap(), Value::TRUE);
    let miss = compare(CompareOp::Match, string("barfoo"), string("^foo"));
    assert_eq!(ctx.eval(miss).unwrap(), Value::FALSE);
}

#[test]
fn test_match_against_regexp_reference() {
    let mut ctx = TestContext::new().with("re", Value::new_regexp("[0-9]+").unwrap());
    let expr = compare(
        CompareOp::Match,
        string("abc123"),
        heap("re", TypeSignature::Regexp),
    );
    assert_eq!(ctx.eval(expr).unwrap(), Value::TRUE);
}

#[test]
fn test_match_invalid_pattern_is_build_error() {
    let err =
        Expr::compare(CompareOp::Match, string("a"), string("(unclosed"), pos()).unwrap_err();
    assert!(matches!(err, BuildError::Pattern(_)), "{err}");
}

#[test]
fn test_match_evaluates_each_operand_once() {
    let mut ctx = TestContext::new()
        .with("text", Value::string("rule-7"))
        .with("re", Value::new_regexp("-[0-9]$").unwrap());
    let expr = compare(
        CompareOp::Match,
        heap("text", TypeSignature::String),
        heap("re", TypeSignature::Regexp),
    );
    assert_eq!(ctx.eval(expr).unwrap(), Value::TRUE);
    assert_eq!(ctx.reads_of("text"), 1);
    assert_eq!(ctx.reads_of("re"), 1);
}

#[test]
fn test_compare_evaluates_both_operands_in_order() {
    let mut ctx = TestContext::new();
    let first_fails = compare(
        CompareOp::Equal,
        failing(TypeSignature::Integer),
        heap("x", TypeSignature::Integer),
    );
    let err = ctx.eval(first_fails).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Context(_)));
    assert_eq!(ctx.reads_of("x"), 0);

    let second_fails = compare(
        CompareOp::Less,
        heap("x", TypeSignature::Integer),
        failing(TypeSignature::Integer),
    );
    let err = ctx.eval(second_fails).unwrap_err();
    assert!(matches!(err.kind, EvalErrorKind::Context(_)));
    assert_eq!(ctx.reads_of("x"), 1);
}

#[test]
fn test_build_rejects_ill_typed_operands() {
    let err = Expr::compare(CompareOp::Less, string("a"), string("b"), pos()).unwrap_err();
    assert!(matches!(err, BuildError::MissingCapability { .. }), "{err}");
    assert_eq!(err.to_string(), "< requires a comparable operand, found {string}");

    let err = Expr::compare(CompareOp::Greater, int(1), string("1"), pos()).unwrap_err();
    assert!(matches!(err, BuildError::MismatchedOperands { .. }), "{err}");

    let err = Expr::compare(CompareOp::Match, int(1), string("1"), pos()).unwrap_err();
    assert!(matches!(err, BuildError::OperandType { .. }), "{err}");
}
