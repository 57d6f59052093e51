//! Runtime values.
//!
//! # Nil Encoding
//!
//! Each kind carries an `Option` payload; `None` is the nil of that kind.
//! `Value::Nil` is the untyped nil (signature `{nil}`) produced from a host
//! `null`. Nil-ness is therefore independent of type:
//!
//! ```text
//! Value::NIL_INTEGER.is_nil()            // true, signature {integer}
//! Value::nil_of(&TypeSignature::list(TypeSignature::String))
//!                                        // nil list, signature {list {string}}
//! ```
//!
//! # Heap Payloads
//!
//! String, list and map payloads live behind [`Heap`], a private-constructor
//! `Arc` wrapper. They are created only through the factory methods here, so
//! a list or map can never hold an element whose signature differs from the
//! declared unit type.

mod codec;
mod convert;
mod heap;
mod matcher;
mod ops;

use std::collections::BTreeMap;
use std::fmt;

pub use heap::Heap;
pub use matcher::Matcher;

use crate::errors::{DecodeError, ValueError};
use crate::signature::{BaseType, TypeSignature};

/// Typed, possibly-absent unit of data.
#[derive(Clone, Debug)]
pub enum Value {
    /// Untyped absent value.
    Nil,
    Boolean(Option<bool>),
    Integer(Option<i64>),
    String(Option<Heap<String>>),
    Regexp(Option<Matcher>),
    /// Ordered list; every item has signature `unit`.
    List {
        unit: TypeSignature,
        items: Option<Heap<Vec<Value>>>,
    },
    /// Multi-valued map; every key holds a non-empty sequence of `unit` values.
    Map {
        unit: TypeSignature,
        entries: Option<Heap<BTreeMap<String, Vec<Value>>>>,
    },
}

impl Value {
    pub const TRUE: Value = Value::Boolean(Some(true));
    pub const FALSE: Value = Value::Boolean(Some(false));
    pub const NIL: Value = Value::Nil;
    pub const NIL_BOOLEAN: Value = Value::Boolean(None);
    pub const NIL_INTEGER: Value = Value::Integer(None);
    pub const NIL_STRING: Value = Value::String(None);
    pub const NIL_REGEXP: Value = Value::Regexp(None);
}

// Factory methods
impl Value {
    #[inline]
    pub fn boolean(b: bool) -> Self {
        Value::Boolean(Some(b))
    }

    #[inline]
    pub fn integer(n: i64) -> Self {
        Value::Integer(Some(n))
    }

    /// Create a string value.
    ///
    /// ```text
    /// let s = Value::string("foo");
    /// let s2 = Value::string(format!("user-{id}"));
    /// ```
    #[inline]
    pub fn string(s: impl Into<String>) -> Self {
        Value::String(Some(Heap::new(s.into())))
    }

    #[inline]
    pub fn empty_string() -> Self {
        Value::string(String::new())
    }

    /// Compile `pattern` into a regexp value.
    pub fn new_regexp(pattern: &str) -> Result<Self, DecodeError> {
        Matcher::new(pattern).map(Value::regexp)
    }

    #[inline]
    pub fn regexp(matcher: Matcher) -> Self {
        Value::Regexp(Some(matcher))
    }

    /// Create a list of `unit` values.
    ///
    /// Fails if any item has a different signature.
    pub fn list(unit: TypeSignature, items: Vec<Value>) -> Result<Self, ValueError> {
        if let Some(item) = items.iter().find(|item| !item.has_signature(&unit)) {
            return Err(ValueError::type_mismatch(&unit, &item.signature()));
        }
        Ok(Value::List {
            unit,
            items: Some(Heap::new(items)),
        })
    }

    /// Create a map with `unit` values.
    ///
    /// Keys with no values are dropped. Fails if any value has a different
    /// signature.
    pub fn map(
        unit: TypeSignature,
        mut entries: BTreeMap<String, Vec<Value>>,
    ) -> Result<Self, ValueError> {
        entries.retain(|_, values| !values.is_empty());
        for value in entries.values().flatten() {
            if !value.has_signature(&unit) {
                return Err(ValueError::type_mismatch(&unit, &value.signature()));
            }
        }
        Ok(Value::Map {
            unit,
            entries: Some(Heap::new(entries)),
        })
    }

    /// Nil of the given type.
    pub fn nil_of(ty: &TypeSignature) -> Self {
        match ty {
            TypeSignature::Nil => Value::Nil,
            TypeSignature::Boolean => Value::NIL_BOOLEAN,
            TypeSignature::Integer => Value::NIL_INTEGER,
            TypeSignature::String => Value::NIL_STRING,
            TypeSignature::Regexp => Value::NIL_REGEXP,
            TypeSignature::List(unit) => Value::List {
                unit: (**unit).clone(),
                items: None,
            },
            TypeSignature::Map(unit) => Value::Map {
                unit: (**unit).clone(),
                entries: None,
            },
        }
    }
}

// Type inspection
impl Value {
    pub fn base_type(&self) -> BaseType {
        match self {
            Value::Nil => BaseType::Nil,
            Value::Boolean(_) => BaseType::Boolean,
            Value::Integer(_) => BaseType::Integer,
            Value::String(_) => BaseType::String,
            Value::Regexp(_) => BaseType::Regexp,
            Value::List { .. } => BaseType::List,
            Value::Map { .. } => BaseType::Map,
        }
    }

    /// Element type of a list or value type of a map.
    pub fn unit_type(&self) -> Option<&TypeSignature> {
        match self {
            Value::List { unit, .. } | Value::Map { unit, .. } => Some(unit),
            _ => None,
        }
    }

    /// Full type of the value.
    pub fn signature(&self) -> TypeSignature {
        match self {
            Value::Nil => TypeSignature::Nil,
            Value::Boolean(_) => TypeSignature::Boolean,
            Value::Integer(_) => TypeSignature::Integer,
            Value::String(_) => TypeSignature::String,
            Value::Regexp(_) => TypeSignature::Regexp,
            Value::List { unit, .. } => TypeSignature::list(unit.clone()),
            Value::Map { unit, .. } => TypeSignature::map(unit.clone()),
        }
    }

    /// Whether the value's type is `ty`, without building a signature.
    pub fn has_signature(&self, ty: &TypeSignature) -> bool {
        self.base_type() == ty.base_type() && self.unit_type() == ty.unit_type()
    }

    /// Whether two values have the same type.
    #[inline]
    pub fn same_type(&self, other: &Value) -> bool {
        self.base_type() == other.base_type() && self.unit_type() == other.unit_type()
    }

    /// Payload absent.
    pub fn is_nil(&self) -> bool {
        match self {
            Value::Nil => true,
            Value::Boolean(b) => b.is_none(),
            Value::Integer(n) => n.is_none(),
            Value::String(s) => s.is_none(),
            Value::Regexp(m) => m.is_none(),
            Value::List { items, .. } => items.is_none(),
            Value::Map { entries, .. } => entries.is_none(),
        }
    }
}

impl PartialEq for Value {
    fn eq(&self, other: &Self) -> bool {
        self.equal(other)
    }
}

impl Eq for Value {}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Nil
            | Value::Boolean(None)
            | Value::Integer(None)
            | Value::String(None)
            | Value::Regexp(None)
            | Value::List { items: None, .. }
            | Value::Map { entries: None, .. } => f.write_str("<<nil>>"),
            Value::Boolean(Some(b)) => write!(f, "{b}"),
            Value::Integer(Some(n)) => write!(f, "{n}"),
            Value::String(Some(s)) => write!(f, "\"{}\"", s.as_str()),
            Value::Regexp(Some(m)) => write!(f, "\"{}\"", m.as_str()),
            Value::List {
                items: Some(items), ..
            } => {
                f.write_str("[")?;
                write_joined(f, items.iter())?;
                f.write_str("]")
            }
            Value::Map {
                entries: Some(entries),
                ..
            } => {
                f.write_str("{")?;
                for (i, (key, values)) in entries.iter().enumerate() {
                    if i > 0 {
                        f.write_str(",")?;
                    }
                    write!(f, "{key}:[")?;
                    write_joined(f, values.iter())?;
                    f.write_str("]")?;
                }
                f.write_str("}")
            }
        }
    }
}

fn write_joined<'a>(
    f: &mut fmt::Formatter<'_>,
    values: impl Iterator<Item = &'a Value>,
) -> fmt::Result {
    for (i, value) in values.enumerate() {
        if i > 0 {
            f.write_str(",")?;
        }
        write!(f, "{value}")?;
    }
    Ok(())
}
