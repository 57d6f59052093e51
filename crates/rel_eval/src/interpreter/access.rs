//! Reference and assignment.
//!
//! Both address either a context slot (`Source::Heap`) or an entry of the
//! value produced by a source expression. A nil source short-circuits: the
//! reference yields nil and the assignment writes nothing.

use rel_value::Key;

use super::Interpreter;
use crate::errors::EvalResult;
use crate::expr::{Expr, Source};

impl Interpreter<'_> {
    pub(super) fn eval_reference(
        &mut self,
        expr: &Expr,
        key: &Key,
        source: &Source,
    ) -> EvalResult {
        match source {
            Source::Heap => Ok(self.ctx.reference(key, expr.result_type())?),
            Source::Value(source) => {
                let container = self.eval(source)?;
                if container.is_nil() {
                    return Ok(expr.nil_result());
                }
                Ok(container.reference(key)?)
            }
        }
    }

    /// Returns the assigned value, nil included.
    pub(super) fn eval_assign(
        &mut self,
        key: &Key,
        value: &Expr,
        target: &Source,
    ) -> EvalResult {
        let value = self.eval(value)?;
        match target {
            Source::Heap => self.ctx.assign(key, value.clone())?,
            Source::Value(target) => {
                let container = self.eval(target)?;
                if container.is_nil() {
                    tracing::debug!(%key, "assign into nil value skipped");
                } else {
                    container.assign(key, value.clone())?;
                }
            }
        }
        Ok(value)
    }
}
