//! Host variable store.
//!
//! The evaluator reads and writes named variables only through
//! [`RequestContext`]. Hosts implement it over their own storage;
//! [`HeapContext`] is an in-memory implementation keyed by name.

use rel_value::{Key, TypeSignature, Value};
use rustc_hash::FxHashMap;

/// Failure reported by a request context.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ContextError {
    #[error("unsupported key {key}")]
    UnsupportedKey { key: Key },

    #[error("slot {key} holds a {found} value, expected {expected}")]
    TypeMismatch {
        key: Key,
        expected: TypeSignature,
        found: TypeSignature,
    },

    #[error("{message}")]
    Store { message: String },
}

impl ContextError {
    #[cold]
    pub fn store(message: impl Into<String>) -> Self {
        ContextError::Store {
            message: message.into(),
        }
    }
}

/// Named-variable store consulted during evaluation.
pub trait RequestContext {
    /// Value stored under `key`, or the nil of `ty` when absent.
    fn reference(&self, key: &Key, ty: &TypeSignature) -> Result<Value, ContextError>;

    /// Store `value` under `key`. Nil values may be stored.
    fn assign(&mut self, key: &Key, value: Value) -> Result<(), ContextError>;
}

/// In-memory context keyed by name.
///
/// Index keys are rejected. A slot holding a value of another type than the
/// one requested is reported as [`ContextError::TypeMismatch`].
#[derive(Clone, Debug, Default)]
pub struct HeapContext {
    slots: FxHashMap<String, Value>,
}

impl HeapContext {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert.
    #[must_use]
    pub fn with(mut self, name: impl Into<String>, value: Value) -> Self {
        self.slots.insert(name.into(), value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&Value> {
        self.slots.get(name)
    }

    pub fn len(&self) -> usize {
        self.slots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.slots.is_empty()
    }

    fn slot_name(key: &Key) -> Result<&str, ContextError> {
        key.as_name()
            .ok_or_else(|| ContextError::UnsupportedKey { key: key.clone() })
    }
}

impl RequestContext for HeapContext {
    fn reference(&self, key: &Key, ty: &TypeSignature) -> Result<Value, ContextError> {
        let name = Self::slot_name(key)?;
        match self.slots.get(name) {
            None => Ok(Value::nil_of(ty)),
            Some(value) if value.has_signature(ty) => Ok(value.clone()),
            Some(value) => Err(ContextError::TypeMismatch {
                key: key.clone(),
                expected: ty.clone(),
                found: value.signature(),
            }),
        }
    }

    fn assign(&mut self, key: &Key, value: Value) -> Result<(), ContextError> {
        let name = Self::slot_name(key)?;
        tracing::trace!(slot = name, %value, "assign");
        self.slots.insert(name.to_owned(), value);
        Ok(())
    }
}
