//! Conditionals, loops and sequences.

use rel_value::Key;

use super::Interpreter;
use crate::errors::EvalResult;
use crate::expr::Expr;

impl Interpreter<'_> {
    /// A nil check yields nil and evaluates neither branch.
    pub(super) fn eval_if(
        &mut self,
        expr: &Expr,
        check: &Expr,
        then: &Expr,
        otherwise: Option<&Expr>,
    ) -> EvalResult {
        match (self.eval_bool(check)?, otherwise) {
            (Some(true), _) => self.eval(then),
            (Some(false), Some(otherwise)) => self.eval(otherwise),
            (None, _) | (Some(false), None) => Ok(expr.nil_result()),
        }
    }

    /// Bind each element to `key` and evaluate `body`; the result is the
    /// last body result.
    ///
    /// A nil or empty list yields nil without evaluating `body` or `brk`.
    /// `brk` is evaluated once, before the first iteration; when non-nil,
    /// the loop stops at the first body result equal to it. Loop bindings
    /// are left in the context.
    pub(super) fn eval_for(
        &mut self,
        expr: &Expr,
        list: &Expr,
        body: &Expr,
        brk: Option<&Expr>,
        key: &Key,
    ) -> EvalResult {
        let list = self.eval(list)?;
        let items = match list.to_list()? {
            Some(items) if !items.is_empty() => items,
            _ => return Ok(expr.nil_result()),
        };
        let break_value = match brk {
            Some(brk) => self.eval(brk)?,
            None => expr.nil_result(),
        };

        let mut result = expr.nil_result();
        for (index, item) in items.iter().enumerate() {
            self.ctx.assign(key, item.clone())?;
            result = self.eval(body)?;
            if !break_value.is_nil() && result.equal(&break_value) {
                tracing::debug!(%key, index, "for loop break");
                break;
            }
        }
        Ok(result)
    }

    /// Construction guarantees at least one expression.
    pub(super) fn eval_sequence(&mut self, expr: &Expr, exprs: &[Expr]) -> EvalResult {
        let mut result = expr.nil_result();
        for expr in exprs {
            result = self.eval(expr)?;
        }
        Ok(result)
    }
}
