use rel_value::{TypeSignature, Value};

use crate::context::RequestContext;
use crate::errors::{missing_context, EvalResult};
use crate::expr::Expr;
use crate::interpreter::Interpreter;
use crate::options::EvalOptions;

/// A validated operator tree, ready to evaluate.
///
/// Immutable after construction; one expression may be evaluated from many
/// threads at once, each against its own context.
#[derive(Clone, Debug)]
pub struct Expression {
    root: Expr,
}

impl Expression {
    pub fn new(root: Expr) -> Self {
        Expression { root }
    }

    pub fn root(&self) -> &Expr {
        &self.root
    }

    pub fn result_type(&self) -> &TypeSignature {
        self.root.result_type()
    }

    /// The nil of the result type, for callers that need a placeholder
    /// alongside an error.
    pub fn nil_result(&self) -> Value {
        self.root.nil_result()
    }

    /// Evaluate without limits.
    pub fn evaluate(&self, ctx: &mut dyn RequestContext) -> EvalResult {
        self.evaluate_with(ctx, &EvalOptions::default())
    }

    #[tracing::instrument(
        level = "debug",
        skip_all,
        fields(result_type = %self.root.result_type(), at = %self.root.position())
    )]
    pub fn evaluate_with(&self, ctx: &mut dyn RequestContext, options: &EvalOptions) -> EvalResult {
        let mut interpreter = Interpreter::with_options(ctx, *options);
        let result = interpreter.eval(&self.root);
        match &result {
            Ok(value) => {
                tracing::debug!(nodes = interpreter.nodes_evaluated(), %value, "evaluated");
            }
            Err(err) => {
                tracing::debug!(nodes = interpreter.nodes_evaluated(), %err, "evaluation failed");
            }
        }
        result
    }

    /// Evaluate against a context the host may not have.
    ///
    /// A missing context fails with `MissingContext` before any node is
    /// evaluated.
    pub fn evaluate_optional(&self, ctx: Option<&mut dyn RequestContext>) -> EvalResult {
        let Some(ctx) = ctx else {
            return Err(missing_context());
        };
        self.evaluate(ctx)
    }
}

impl From<Expr> for Expression {
    fn from(root: Expr) -> Self {
        Expression::new(root)
    }
}
