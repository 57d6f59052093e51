use rel_value::{TypeSignature, Value};

use super::Interpreter;
use crate::errors::EvalResult;
use crate::expr::{Expr, SearchOp};

impl Interpreter<'_> {
    /// Search `collection` for `key`.
    ///
    /// A nil key yields nil before the collection is evaluated; a nil
    /// collection yields nil. On a miss, `Find` and `FindAll` fall back to
    /// the default expression, or nil without one. A miss and a nil default
    /// are indistinguishable to the caller.
    pub(super) fn eval_search(
        &mut self,
        expr: &Expr,
        op: SearchOp,
        key: &Expr,
        collection: &Expr,
        default: Option<&Expr>,
    ) -> EvalResult {
        let key = self.eval(key)?;
        if key.is_nil() {
            return Ok(expr.nil_result());
        }
        let collection = self.eval(collection)?;
        if collection.is_nil() {
            return Ok(expr.nil_result());
        }

        let mut found = collection.search_all(&key)?;
        match op {
            SearchOp::Exist => Ok(Value::boolean(!found.is_empty())),
            SearchOp::Find if !found.is_empty() => Ok(found.swap_remove(0)),
            SearchOp::FindAll if !found.is_empty() => {
                let unit = collection.unit_type().cloned().unwrap_or(TypeSignature::DEFAULT);
                Ok(Value::list(unit, found)?)
            }
            SearchOp::Find | SearchOp::FindAll => {
                tracing::debug!(%key, op = op.as_str(), "search miss");
                match default {
                    Some(default) => self.eval(default),
                    None => Ok(expr.nil_result()),
                }
            }
        }
    }
}
