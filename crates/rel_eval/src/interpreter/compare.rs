use rel_value::Value;

use super::Interpreter;
use crate::errors::EvalResult;
use crate::expr::{CompareOp, Expr};

impl Interpreter<'_> {
    /// Both operands are always evaluated, left first, once each.
    ///
    /// Equality never propagates nil (nil equals only nil). Ordering and
    /// `Match` yield a nil boolean when either operand is nil.
    pub(super) fn eval_compare(
        &mut self,
        op: CompareOp,
        left: &Expr,
        right: &Expr,
    ) -> EvalResult {
        let left = self.eval(left)?;
        let right = self.eval(right)?;

        match op {
            CompareOp::Equal => Ok(Value::boolean(left.equal(&right))),
            CompareOp::NotEqual => Ok(Value::boolean(!left.equal(&right))),
            _ if left.is_nil() || right.is_nil() => Ok(Value::NIL_BOOLEAN),
            CompareOp::Match => Ok(match (left.to_str()?, right.to_matcher()?) {
                (Some(text), Some(matcher)) => Value::boolean(matcher.is_match(text)),
                _ => Value::NIL_BOOLEAN,
            }),
            CompareOp::Less => ordered(&left, &right, |order| order < 0),
            CompareOp::LessEqual => ordered(&left, &right, |order| order <= 0),
            CompareOp::Greater => ordered(&left, &right, |order| order > 0),
            CompareOp::GreaterEqual => ordered(&left, &right, |order| order >= 0),
        }
    }
}

/// Apply `holds` to the three-way comparison of two non-nil operands.
fn ordered(left: &Value, right: &Value, holds: fn(i64) -> bool) -> EvalResult {
    Ok(match left.compare(right)? {
        Value::Integer(Some(order)) => Value::boolean(holds(order)),
        _ => Value::NIL_BOOLEAN,
    })
}
