//! Errors raised by the value algebra and by value decoding.
//!
//! [`ValueError`] is an invariant violation: an operation was applied to a
//! kind that does not support it. A well-formed operator tree never raises
//! one. [`DecodeError`] is a format error in external input.

use crate::key::Key;
use crate::signature::{BaseType, TypeSignature};

/// Operation applied to a kind that does not support it.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ValueError {
    #[error("{operation} is not supported for {base_type} values")]
    Unsupported {
        operation: &'static str,
        base_type: BaseType,
    },

    #[error("incompatible types: {left} and {right}")]
    IncompatibleTypes {
        left: TypeSignature,
        right: TypeSignature,
    },

    #[error("invalid key {key} for map reference")]
    InvalidKey { key: Key },

    #[error("expected a {expected} value, found {found}")]
    TypeMismatch {
        expected: TypeSignature,
        found: TypeSignature,
    },
}

impl ValueError {
    #[cold]
    pub fn unsupported(operation: &'static str, base_type: BaseType) -> Self {
        ValueError::Unsupported {
            operation,
            base_type,
        }
    }

    #[cold]
    pub fn incompatible(left: &TypeSignature, right: &TypeSignature) -> Self {
        ValueError::IncompatibleTypes {
            left: left.clone(),
            right: right.clone(),
        }
    }

    #[cold]
    pub fn type_mismatch(expected: &TypeSignature, found: &TypeSignature) -> Self {
        ValueError::TypeMismatch {
            expected: expected.clone(),
            found: found.clone(),
        }
    }
}

/// Malformed external input.
#[derive(Debug, thiserror::Error)]
pub enum DecodeError {
    #[error("invalid regexp {pattern:?}")]
    InvalidRegexp {
        pattern: String,
        #[source]
        source: regex::Error,
    },

    #[error("invalid {base_type} payload: {found}")]
    InvalidPayload { base_type: BaseType, found: String },

    #[error("{base} type requires a unit type")]
    MissingUnitType { base: BaseType },

    #[error("{base} type does not take a unit type")]
    UnexpectedUnitType { base: BaseType },

    #[error("element type {found} does not match unit type {expected}")]
    ElementType {
        expected: TypeSignature,
        found: TypeSignature,
    },

    #[error("map entry {key:?} has no values")]
    EmptyMapEntry { key: String },

    #[error("mixed element types: {first} and {other}")]
    MixedTypes {
        first: TypeSignature,
        other: TypeSignature,
    },

    #[error("unsupported number {number}: only integers are supported")]
    UnsupportedNumber { number: String },

    #[error("cannot parse {text:?} as {target}")]
    Parse { target: TypeSignature, text: String },

    #[error("{0}")]
    Json(String),
}

impl DecodeError {
    #[cold]
    pub fn invalid_payload(base_type: BaseType, found: impl ToString) -> Self {
        DecodeError::InvalidPayload {
            base_type,
            found: found.to_string(),
        }
    }
}

impl From<serde_json::Error> for DecodeError {
    fn from(err: serde_json::Error) -> Self {
        DecodeError::Json(err.to_string())
    }
}
