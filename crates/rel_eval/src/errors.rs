//! Evaluation and construction errors.
//!
//! [`EvalError`] pairs a structured [`EvalErrorKind`] with the position of
//! the node that failed. Factory functions are `#[cold]`; invariant
//! violations are logged at `error` level where they are raised.

use std::fmt;

use rel_value::{Capabilities, DecodeError, TypeSignature, Value, ValueError};

use crate::context::ContextError;
use crate::expr::Position;

/// Result of evaluating a node.
pub type EvalResult = Result<Value, EvalError>;

/// Structured error category.
#[derive(Clone, Debug, PartialEq, thiserror::Error)]
pub enum EvalErrorKind {
    #[error("invalid null request context")]
    MissingContext,

    #[error("request context: {0}")]
    Context(#[from] ContextError),

    /// An operation reached a value kind that does not support it.
    #[error("invariant violation: {0}")]
    Invariant(#[from] ValueError),

    #[error("maximum nesting depth of {limit} exceeded")]
    DepthExceeded { limit: usize },

    #[error("evaluation budget of {budget} nodes exceeded")]
    BudgetExceeded { budget: u64 },
}

/// Evaluation error.
#[derive(Clone, Debug, PartialEq)]
pub struct EvalError {
    pub kind: EvalErrorKind,
    /// Position of the innermost node that failed.
    pub position: Option<Position>,
}

impl EvalError {
    fn from_kind(kind: EvalErrorKind) -> Self {
        EvalError {
            kind,
            position: None,
        }
    }

    /// Attach the failing node's position, keeping an inner one if present.
    #[must_use]
    pub fn at(mut self, position: Position) -> Self {
        self.position.get_or_insert(position);
        self
    }

    /// Whether a well-formed tree could have raised this error.
    pub fn is_invariant_violation(&self) -> bool {
        matches!(self.kind, EvalErrorKind::Invariant(_))
    }
}

impl fmt::Display for EvalError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.kind)?;
        if let Some(position) = self.position {
            write!(f, " at {position}")?;
        }
        Ok(())
    }
}

impl std::error::Error for EvalError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match &self.kind {
            EvalErrorKind::Context(err) => Some(err),
            EvalErrorKind::Invariant(err) => Some(err),
            _ => None,
        }
    }
}

impl From<ContextError> for EvalError {
    #[cold]
    fn from(err: ContextError) -> Self {
        EvalError::from_kind(EvalErrorKind::Context(err))
    }
}

impl From<ValueError> for EvalError {
    #[cold]
    fn from(err: ValueError) -> Self {
        invariant(err)
    }
}

#[cold]
pub fn missing_context() -> EvalError {
    EvalError::from_kind(EvalErrorKind::MissingContext)
}

#[cold]
pub fn invariant(err: ValueError) -> EvalError {
    tracing::error!(error = %err, "invariant violation");
    EvalError::from_kind(EvalErrorKind::Invariant(err))
}

#[cold]
pub fn depth_exceeded(limit: usize) -> EvalError {
    EvalError::from_kind(EvalErrorKind::DepthExceeded { limit })
}

#[cold]
pub fn budget_exceeded(budget: u64) -> EvalError {
    EvalError::from_kind(EvalErrorKind::BudgetExceeded { budget })
}

/// Structurally invalid operator tree.
#[derive(Debug, thiserror::Error)]
pub enum BuildError {
    #[error("{operator} requires a {expected} operand, found {found}")]
    OperandType {
        operator: &'static str,
        expected: TypeSignature,
        found: TypeSignature,
    },

    #[error(
        "{operator} requires a {} operand, found {found}",
        .capability.names().join(" and ")
    )]
    MissingCapability {
        operator: &'static str,
        capability: Capabilities,
        found: TypeSignature,
    },

    #[error("{operator} operands have different types: {left} and {right}")]
    MismatchedOperands {
        operator: &'static str,
        left: TypeSignature,
        right: TypeSignature,
    },

    #[error("invalid match pattern: {0}")]
    Pattern(#[from] DecodeError),

    #[error("a sequence needs at least one expression")]
    EmptySequence,
}

impl BuildError {
    #[cold]
    pub(crate) fn operand_type(
        operator: &'static str,
        expected: &TypeSignature,
        found: &TypeSignature,
    ) -> Self {
        BuildError::OperandType {
            operator,
            expected: expected.clone(),
            found: found.clone(),
        }
    }

    #[cold]
    pub(crate) fn missing_capability(
        operator: &'static str,
        capability: Capabilities,
        found: &TypeSignature,
    ) -> Self {
        BuildError::MissingCapability {
            operator,
            capability,
            found: found.clone(),
        }
    }
}
