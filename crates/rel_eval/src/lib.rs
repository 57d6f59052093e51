//! Operator tree evaluator for the REL expression language.
//!
//! An external producer builds a typed operator tree with the [`Expr`]
//! constructors; [`Expression`] wraps the root and evaluates it against a
//! host-supplied [`RequestContext`] (the store of named variables).
//!
//! ```text
//! let tree = Expr::compare(
//!     CompareOp::Equal,
//!     Expr::heap_reference("user", "user", TypeSignature::String, pos),
//!     Expr::constant(Value::string("admin"), pos),
//!     pos,
//! )?;
//! let expr = Expression::new(tree);
//! let mut ctx = HeapContext::new();
//! let result = expr.evaluate(&mut ctx)?; // Boolean, nil when `user` is unset
//! ```
//!
//! # Nil Propagation
//!
//! Operators return a typed nil instead of failing when an operand is
//! absent; see the node modules under `interpreter` for the exact rules.
//!
//! # Errors
//!
//! Evaluation stops at the first failing node. The error carries the
//! position of that node. Context failures and resource limits are
//! recoverable; [`EvalError::is_invariant_violation`] marks errors that a
//! well-formed tree can never raise.

mod context;
mod errors;
mod expr;
mod expression;
mod interpreter;
mod options;

use std::sync::Once;

pub use context::{ContextError, HeapContext, RequestContext};
pub use errors::{BuildError, EvalError, EvalErrorKind, EvalResult};
pub use expr::{CompareOp, Expr, ExprKind, Logical, Position, SearchOp, Source};
pub use expression::Expression;
pub use interpreter::Interpreter;
pub use options::EvalOptions;

pub use rel_value::{BaseType, Capabilities, Key, TypeSignature, Value};

static TRACING_INIT: Once = Once::new();

/// Initialize tracing for debug output.
///
/// Safe to call multiple times, and a no-op when the host already installed
/// a global subscriber. Enable with `RUST_LOG=rel_eval=debug` or
/// `RUST_LOG=rel_eval=trace`.
pub fn init_tracing() {
    TRACING_INIT.call_once(|| {
        use tracing_subscriber::{fmt, prelude::*, EnvFilter};

        // Only initialize if RUST_LOG is set
        if std::env::var("RUST_LOG").is_ok() {
            let filter = EnvFilter::from_default_env();
            let _ = tracing_subscriber::registry()
                .with(fmt::layer().with_target(true).with_level(true))
                .with(filter)
                .try_init();
        }
    });
}

#[cfg(test)]
mod tests;
