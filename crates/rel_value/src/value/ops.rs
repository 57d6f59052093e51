//! Equality, ordering, search and navigation.
//!
//! Operations not supported by a kind return [`ValueError`]; the operator
//! tree constructors rule these out for well-formed trees.

use std::borrow::Cow;
use std::cmp::Ordering;

use super::Value;
use crate::errors::ValueError;
use crate::key::Key;
use crate::signature::TypeSignature;

impl Value {
    /// Structural equality.
    ///
    /// Values of different types are never equal. A nil equals only a nil
    /// of the same type.
    pub fn equal(&self, other: &Value) -> bool {
        match (self, other) {
            (Value::Nil, Value::Nil) => true,
            (Value::Boolean(a), Value::Boolean(b)) => a == b,
            (Value::Integer(a), Value::Integer(b)) => a == b,
            (Value::String(a), Value::String(b)) => a == b,
            (Value::Regexp(a), Value::Regexp(b)) => a == b,
            (
                Value::List {
                    unit: ua,
                    items: a,
                },
                Value::List {
                    unit: ub,
                    items: b,
                },
            ) => ua == ub && a == b,
            (
                Value::Map {
                    unit: ua,
                    entries: a,
                },
                Value::Map {
                    unit: ub,
                    entries: b,
                },
            ) => ua == ub && a == b,
            _ => false,
        }
    }

    /// Three-way comparison of two integers as an integer value -1, 0 or 1.
    ///
    /// A nil operand yields a nil integer.
    pub fn compare(&self, other: &Value) -> Result<Value, ValueError> {
        if !self.same_type(other) {
            return Err(ValueError::incompatible(&self.signature(), &other.signature()));
        }
        match (self, other) {
            (Value::Integer(Some(a)), Value::Integer(Some(b))) => {
                Ok(Value::integer(match a.cmp(b) {
                    Ordering::Less => -1,
                    Ordering::Equal => 0,
                    Ordering::Greater => 1,
                }))
            }
            (Value::Integer(_), Value::Integer(_)) => Ok(Value::NIL_INTEGER),
            _ => Err(ValueError::unsupported("compare", self.base_type())),
        }
    }

    /// Canonical string of a scalar, used for matching and searching.
    ///
    /// Nil has no natural string. Lists and maps are not scalars.
    pub fn natural_string(&self) -> Result<Option<Cow<'_, str>>, ValueError> {
        match self {
            Value::Nil => Ok(None),
            Value::Boolean(b) => Ok(b.map(|b| Cow::Borrowed(if b { "true" } else { "false" }))),
            Value::Integer(n) => Ok(n.map(|n| Cow::Owned(n.to_string()))),
            Value::String(s) => Ok(s.as_ref().map(|s| Cow::Borrowed(s.as_str()))),
            Value::Regexp(m) => Ok(m.as_ref().map(|m| Cow::Borrowed(m.as_str()))),
            Value::List { .. } | Value::Map { .. } => {
                Err(ValueError::unsupported("natural string", self.base_type()))
            }
        }
    }

    /// Every value related to `key`; the key was found iff the result is
    /// non-empty.
    ///
    /// - list: each item of the key's type whose natural string equals the
    ///   key's, in order (strings and regexps count as one type here)
    /// - map: the values stored under the key's natural string
    pub fn search_all(&self, key: &Value) -> Result<Vec<Value>, ValueError> {
        match self {
            Value::List { items, .. } => {
                let (Some(items), Some(needle)) = (items, key.natural_string()?) else {
                    return Ok(Vec::new());
                };
                let mut found = Vec::new();
                for item in items.iter() {
                    if !item.searchable_as(key) {
                        continue;
                    }
                    if item.natural_string()?.as_deref() == Some(needle.as_ref()) {
                        found.push(item.clone());
                    }
                }
                Ok(found)
            }
            Value::Map { entries, .. } => {
                let (Some(entries), Some(needle)) = (entries, key.natural_string()?) else {
                    return Ok(Vec::new());
                };
                Ok(entries.get(needle.as_ref()).cloned().unwrap_or_default())
            }
            _ => Err(ValueError::unsupported("search", self.base_type())),
        }
    }

    /// Whether a list item can match a search key: same type, or both
    /// textual.
    fn searchable_as(&self, key: &Value) -> bool {
        let textual = |v: &Value| matches!(v, Value::String(_) | Value::Regexp(_));
        self.same_type(key) || (textual(self) && textual(key))
    }

    /// The first value stored under `key` in a map.
    ///
    /// An absent key (or a nil map) yields the nil of the unit type.
    pub fn reference(&self, key: &Key) -> Result<Value, ValueError> {
        let Value::Map { unit, entries } = self else {
            return Err(ValueError::unsupported("reference", self.base_type()));
        };
        let Some(name) = key.as_name() else {
            return Err(ValueError::InvalidKey { key: key.clone() });
        };
        Ok(entries
            .as_ref()
            .and_then(|entries| entries.get(name))
            .and_then(|values| values.first())
            .cloned()
            .unwrap_or_else(|| Value::nil_of(unit)))
    }

    /// Values are immutable; assignment into a value is unsupported for
    /// every kind.
    pub fn assign(&self, _key: &Key, _value: Value) -> Result<(), ValueError> {
        Err(ValueError::unsupported("assign", self.base_type()))
    }
}

// Typed views used by the evaluator. Each fails on a value of the wrong
// kind and yields `None` for a nil of the right kind.
impl Value {
    pub fn to_bool(&self) -> Result<Option<bool>, ValueError> {
        match self {
            Value::Boolean(b) => Ok(*b),
            _ => Err(ValueError::type_mismatch(&TypeSignature::Boolean, &self.signature())),
        }
    }

    pub fn to_str(&self) -> Result<Option<&str>, ValueError> {
        match self {
            Value::String(s) => Ok(s.as_ref().map(|s| s.as_str())),
            _ => Err(ValueError::type_mismatch(&TypeSignature::String, &self.signature())),
        }
    }

    pub fn to_matcher(&self) -> Result<Option<&super::Matcher>, ValueError> {
        match self {
            Value::Regexp(m) => Ok(m.as_ref()),
            _ => Err(ValueError::type_mismatch(&TypeSignature::Regexp, &self.signature())),
        }
    }

    pub fn to_list(&self) -> Result<Option<&[Value]>, ValueError> {
        match self {
            Value::List { items, .. } => Ok(items.as_ref().map(|items| items.as_slice())),
            _ => Err(ValueError::unsupported("iterate", self.base_type())),
        }
    }
}
