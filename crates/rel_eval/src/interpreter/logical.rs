use rel_value::Value;

use super::Interpreter;
use crate::errors::EvalResult;
use crate::expr::Logical;

impl Interpreter<'_> {
    /// Lazy `and`/`or` and `not`.
    ///
    /// A nil left operand yields nil without evaluating the right one. The
    /// right operand is evaluated only when the left does not decide the
    /// result, and a nil right operand yields nil.
    pub(super) fn eval_logical(&mut self, logical: &Logical) -> EvalResult {
        match logical {
            Logical::And(left, right) => match self.eval_bool(left)? {
                None => Ok(Value::NIL_BOOLEAN),
                Some(false) => Ok(Value::FALSE),
                Some(true) => Ok(self
                    .eval_bool(right)?
                    .map_or(Value::NIL_BOOLEAN, Value::boolean)),
            },
            Logical::Or(left, right) => match self.eval_bool(left)? {
                None => Ok(Value::NIL_BOOLEAN),
                Some(true) => Ok(Value::TRUE),
                Some(false) => Ok(self
                    .eval_bool(right)?
                    .map_or(Value::NIL_BOOLEAN, Value::boolean)),
            },
            Logical::Not(operand) => Ok(self
                .eval_bool(operand)?
                .map_or(Value::NIL_BOOLEAN, |b| Value::boolean(!b))),
        }
    }
}
