//! Stack safety for recursive tree walks.
//!
//! Operator trees handed to the evaluator are built by an external producer
//! and may nest arbitrarily deep (long `and` chains, nested `if` ladders,
//! generated sequences). Every recursive step of the interpreter goes through
//! [`ensure_sufficient_stack`], which grows the native stack on demand.
//!
//! # Platform Support
//!
//! - **Native targets**: `stacker` allocates a new stack segment when the
//!   remaining space drops below the red zone.
//! - **WASM targets**: passthrough.

/// Remaining stack below which a new segment is allocated (100KB).
const RED_ZONE: usize = 100 * 1024;

/// Size of each newly allocated stack segment (1MB).
const STACK_PER_RECURSION: usize = 1024 * 1024;

/// Run `f`, growing the stack first if less than the red zone remains.
///
/// ```text
/// fn eval(&mut self, expr: &Expr) -> EvalResult {
///     ensure_sufficient_stack(|| self.eval_inner(expr))
/// }
/// ```
#[inline]
#[cfg(not(target_arch = "wasm32"))]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    stacker::maybe_grow(RED_ZONE, STACK_PER_RECURSION, f)
}

/// WASM manages its own stack.
#[inline]
#[cfg(target_arch = "wasm32")]
pub fn ensure_sufficient_stack<R>(f: impl FnOnce() -> R) -> R {
    f()
}

#[cfg(test)]
mod tests;
