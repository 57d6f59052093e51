//! Tree-walking evaluator.
//!
//! # Architecture
//!
//! `eval` is the single recursive entry point. It grows the stack if
//! needed, accounts the node against the [`EvalOptions`] limits, dispatches
//! on the node kind and tags any error with the node's position. The node
//! evaluators live in sibling modules as `impl Interpreter` blocks:
//!
//! - `access`: reference and assign
//! - `compare`: the seven comparison operators
//! - `logical`: and, or, not
//! - `control`: if, for, sequence
//! - `search`: exist, find, findAll
//!
//! Children are evaluated strictly left to right and each at most once.

mod access;
mod compare;
mod control;
mod logical;
mod search;

use rel_stack::ensure_sufficient_stack;

use crate::context::RequestContext;
use crate::errors::{EvalError, EvalResult};
use crate::expr::{Expr, ExprKind};
use crate::options::{EvalOptions, LimitState};

/// Evaluates operator trees against one request context.
pub struct Interpreter<'a> {
    ctx: &'a mut dyn RequestContext,
    limits: LimitState,
}

impl<'a> Interpreter<'a> {
    /// Interpreter without limits.
    pub fn new(ctx: &'a mut dyn RequestContext) -> Self {
        Self::with_options(ctx, EvalOptions::UNLIMITED)
    }

    pub fn with_options(ctx: &'a mut dyn RequestContext, options: EvalOptions) -> Self {
        Interpreter {
            ctx,
            limits: LimitState::new(options),
        }
    }

    /// Nodes evaluated so far.
    pub fn nodes_evaluated(&self) -> u64 {
        self.limits.nodes()
    }
}

impl Interpreter<'_> {
    /// Evaluate `expr` with stack safety.
    #[tracing::instrument(
        level = "trace",
        skip(self, expr),
        fields(node = expr.kind().name(), at = %expr.position())
    )]
    pub fn eval(&mut self, expr: &Expr) -> EvalResult {
        ensure_sufficient_stack(|| self.eval_counted(expr))
    }

    fn eval_counted(&mut self, expr: &Expr) -> EvalResult {
        self.limits.enter().map_err(|err| err.at(expr.position()))?;
        let result = self.eval_inner(expr);
        self.limits.exit();
        result.map_err(|err| err.at(expr.position()))
    }

    /// Dispatch on the node kind. Exhaustive, no catch-all.
    fn eval_inner(&mut self, expr: &Expr) -> EvalResult {
        match expr.kind() {
            ExprKind::Constant(value) => Ok(value.clone()),
            ExprKind::Reference { key, source, .. } => self.eval_reference(expr, key, source),
            ExprKind::Assign {
                key, value, target, ..
            } => self.eval_assign(key, value, target),
            ExprKind::Compare { op, left, right } => self.eval_compare(*op, left, right),
            ExprKind::Logical(logical) => self.eval_logical(logical),
            ExprKind::If {
                check,
                then,
                otherwise,
            } => self.eval_if(expr, check, then, otherwise.as_deref()),
            ExprKind::For {
                list,
                body,
                brk,
                key,
            } => self.eval_for(expr, list, body, brk.as_deref(), key),
            ExprKind::Search {
                op,
                key,
                collection,
                default,
            } => self.eval_search(expr, *op, key, collection, default.as_deref()),
            ExprKind::Sequence(exprs) => self.eval_sequence(expr, exprs),
        }
    }

    /// Evaluate a boolean operand; `None` is a nil boolean.
    fn eval_bool(&mut self, expr: &Expr) -> Result<Option<bool>, EvalError> {
        Ok(self.eval(expr)?.to_bool()?)
    }
}
