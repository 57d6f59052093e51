use pretty_assertions::assert_eq;
use rayon::prelude::*;
use rel_value::{TypeSignature, Value};

use super::helpers::{boolean, failing, heap, int, pos, TestContext};
use crate::context::HeapContext;
use crate::errors::EvalErrorKind;
use crate::expr::{CompareOp, Expr, Position};
use crate::expression::Expression;
use crate::interpreter::Interpreter;
use crate::options::EvalOptions;

fn nested_not(depth: usize) -> Expr {
    let mut expr = boolean(true);
    for _ in 0..depth {
        expr = Expr::not(expr, pos()).unwrap();
    }
    expr
}

#[test]
fn test_expression_is_send_and_sync() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<Expression>();
    assert_send_sync::<Value>();
}

#[test]
fn test_missing_context() {
    let expression = Expression::new(int(1));
    let err = expression.evaluate_optional(None).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::MissingContext);
    assert_eq!(err.position, None);
    assert_eq!(err.to_string(), "invalid null request context");

    let mut ctx = HeapContext::new();
    let result = expression.evaluate_optional(Some(&mut ctx)).unwrap();
    assert_eq!(result, Value::integer(1));
}

#[test]
fn test_error_carries_innermost_position() {
    let outer = Position::new(1, 1);
    let expr = Expr::compare(
        CompareOp::Equal,
        failing(TypeSignature::Integer),
        int(1),
        outer,
    )
    .unwrap();
    let mut ctx = TestContext::new();
    let err = ctx.eval(expr).unwrap_err();
    assert_eq!(err.position, Some(pos()));
    assert_eq!(err.to_string(), "request context: exprError at 5:10");
}

#[test]
fn test_result_type_and_nil_result() {
    let expression = Expression::from(heap("x", TypeSignature::list(TypeSignature::Integer)));
    assert_eq!(
        expression.result_type(),
        &TypeSignature::list(TypeSignature::Integer)
    );
    let nil = expression.nil_result();
    assert!(nil.is_nil());
    assert_eq!(nil.signature(), TypeSignature::list(TypeSignature::Integer));
}

#[test]
fn test_depth_limit() {
    let expression = Expression::new(nested_not(10));
    let mut ctx = HeapContext::new();

    let options = EvalOptions::default().with_max_depth(5);
    let err = expression.evaluate_with(&mut ctx, &options).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::DepthExceeded { limit: 5 });

    let options = EvalOptions::default().with_max_depth(11);
    let result = expression.evaluate_with(&mut ctx, &options).unwrap();
    assert_eq!(result, Value::TRUE);
}

#[test]
fn test_node_budget() {
    let exprs = (0..10).map(int).collect();
    let expression = Expression::new(Expr::sequence(exprs, pos()).unwrap());
    let mut ctx = HeapContext::new();

    let options = EvalOptions::default().with_node_budget(5);
    let err = expression.evaluate_with(&mut ctx, &options).unwrap_err();
    assert_eq!(err.kind, EvalErrorKind::BudgetExceeded { budget: 5 });

    let options = EvalOptions::default().with_node_budget(11);
    let result = expression.evaluate_with(&mut ctx, &options).unwrap();
    assert_eq!(result, Value::integer(9));
}

#[test]
fn test_interpreter_counts_nodes_without_limits() {
    let mut ctx = HeapContext::new();
    let mut interpreter = Interpreter::new(&mut ctx);
    assert_eq!(interpreter.eval(&nested_not(3)).unwrap(), Value::FALSE);
    assert_eq!(interpreter.nodes_evaluated(), 4);
}

#[test]
fn test_deep_tree_without_limits() {
    let expression = Expression::new(nested_not(2_000));
    let mut ctx = HeapContext::new();
    assert_eq!(expression.evaluate(&mut ctx).unwrap(), Value::TRUE);
}

#[test]
fn test_concurrent_evaluation_of_one_expression() {
    let expr = Expr::compare(
        CompareOp::Greater,
        heap("n", TypeSignature::Integer),
        int(31),
        pos(),
    )
    .unwrap();
    let record = Expr::heap_assign("seen", "seen", heap("n", TypeSignature::Integer), pos());
    let expression = Expression::new(Expr::sequence(vec![record, expr], pos()).unwrap());

    let results: Vec<(i64, Value, Option<Value>)> = (0..64_i64)
        .into_par_iter()
        .map(|n| {
            let mut ctx = HeapContext::new().with("n", Value::integer(n));
            let result = expression.evaluate(&mut ctx).unwrap();
            (n, result, ctx.get("seen").cloned())
        })
        .collect();

    for (n, result, seen) in results {
        assert_eq!(result, Value::boolean(n > 31), "n = {n}");
        assert_eq!(seen, Some(Value::integer(n)));
    }
}
