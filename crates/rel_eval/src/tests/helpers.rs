//! Shared fixtures for evaluator tests.

#![allow(clippy::unwrap_used)]

use std::cell::RefCell;

use rel_value::{Key, TypeSignature, Value};

use crate::context::{ContextError, HeapContext, RequestContext};
use crate::errors::EvalResult;
use crate::expr::{Expr, Position};
use crate::expression::Expression;

/// Slot that [`TestContext`] refuses to read.
pub const FAIL_SLOT: &str = "fail";

pub fn pos() -> Position {
    Position::new(5, 10)
}

pub fn constant(value: Value) -> Expr {
    Expr::constant(value, pos())
}

pub fn string(s: &str) -> Expr {
    constant(Value::string(s))
}

pub fn int(n: i64) -> Expr {
    constant(Value::integer(n))
}

pub fn boolean(b: bool) -> Expr {
    constant(Value::boolean(b))
}

pub fn heap(name: &str, ty: TypeSignature) -> Expr {
    Expr::heap_reference(name, name, ty, pos())
}

/// Node that fails with a context error when evaluated.
pub fn failing(ty: TypeSignature) -> Expr {
    heap(FAIL_SLOT, ty)
}

pub fn string_list(items: &[&str]) -> Value {
    Value::list(
        TypeSignature::String,
        items.iter().map(|s| Value::string(*s)).collect(),
    )
    .unwrap()
}

pub fn string_list_type() -> TypeSignature {
    TypeSignature::list(TypeSignature::String)
}

/// Heap context that records reads and fails on [`FAIL_SLOT`].
#[derive(Default)]
pub struct TestContext {
    pub heap: HeapContext,
    reads: RefCell<Vec<String>>,
}

impl TestContext {
    pub fn new() -> Self {
        crate::init_tracing();
        Self::default()
    }

    #[must_use]
    pub fn with(mut self, name: &str, value: Value) -> Self {
        self.heap = self.heap.with(name, value);
        self
    }

    /// How many times `name` was read.
    pub fn reads_of(&self, name: &str) -> usize {
        self.reads.borrow().iter().filter(|n| *n == name).count()
    }

    pub fn eval(&mut self, expr: Expr) -> EvalResult {
        Expression::new(expr).evaluate(self)
    }
}

impl RequestContext for TestContext {
    fn reference(&self, key: &Key, ty: &TypeSignature) -> Result<Value, ContextError> {
        if let Some(name) = key.as_name() {
            self.reads.borrow_mut().push(name.to_owned());
            if name == FAIL_SLOT {
                return Err(ContextError::store("exprError"));
            }
        }
        self.heap.reference(key, ty)
    }

    fn assign(&mut self, key: &Key, value: Value) -> Result<(), ContextError> {
        if key.as_name() == Some(FAIL_SLOT) {
            return Err(ContextError::store("exprError"));
        }
        self.heap.assign(key, value)
    }
}
