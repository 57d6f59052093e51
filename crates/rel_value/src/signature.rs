//! Type signatures for typed values.
//!
//! A signature is a base kind plus, for the composite kinds, the signature of
//! the elements. The enum shape makes "a list without an element type" and
//! "a scalar with an element type" unrepresentable; the wire form
//! (`{base_type, unit_type?}`) is validated on decode.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::capability::Capabilities;
use crate::errors::DecodeError;
use crate::value::Value;

/// Base kind of a value.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BaseType {
    Boolean,
    Integer,
    List,
    Map,
    /// Type of the untyped absent value.
    Nil,
    Regexp,
    String,
}

impl BaseType {
    /// Wire/display name of the kind.
    pub fn as_str(self) -> &'static str {
        match self {
            BaseType::Boolean => "boolean",
            BaseType::Integer => "integer",
            BaseType::List => "list",
            BaseType::Map => "map",
            BaseType::Nil => "nil",
            BaseType::Regexp => "regexp",
            BaseType::String => "string",
        }
    }

    /// Whether signatures of this kind carry an element type.
    #[inline]
    pub fn is_composite(self) -> bool {
        matches!(self, BaseType::List | BaseType::Map)
    }

    /// Operations the kind supports.
    pub fn capabilities(self) -> Capabilities {
        let scalar = Capabilities::EQUALITY | Capabilities::ITERATION_VALUE | Capabilities::SCALAR;
        match self {
            BaseType::Boolean | BaseType::Regexp | BaseType::String => scalar,
            BaseType::Integer => scalar | Capabilities::COMPARABLE,
            BaseType::List => {
                Capabilities::EQUALITY | Capabilities::SEARCHABLE | Capabilities::ITERABLE
            }
            BaseType::Map => {
                Capabilities::EQUALITY | Capabilities::SEARCHABLE | Capabilities::REFERABLE
            }
            BaseType::Nil => Capabilities::empty(),
        }
    }

    /// Whether the kind supports every capability in `caps`.
    #[inline]
    pub fn supports(self, caps: Capabilities) -> bool {
        self.capabilities().contains(caps)
    }

    /// The zero value of the kind, for kinds that have one.
    pub fn default_value(self) -> Option<Value> {
        match self {
            BaseType::Boolean => Some(Value::FALSE),
            BaseType::Integer => Some(Value::Integer(Some(0))),
            BaseType::String => Some(Value::empty_string()),
            BaseType::List | BaseType::Map | BaseType::Nil | BaseType::Regexp => None,
        }
    }
}

impl fmt::Display for BaseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Type descriptor of a value.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(try_from = "SignatureRepr", into = "SignatureRepr")]
pub enum TypeSignature {
    Nil,
    Boolean,
    Integer,
    String,
    Regexp,
    List(Box<TypeSignature>),
    Map(Box<TypeSignature>),
}

impl TypeSignature {
    /// Assumed when no type information is available (e.g. an empty host list).
    pub const DEFAULT: TypeSignature = TypeSignature::String;

    /// Signature of a list of `unit`.
    #[inline]
    pub fn list(unit: TypeSignature) -> Self {
        TypeSignature::List(Box::new(unit))
    }

    /// Signature of a map with `unit` values.
    #[inline]
    pub fn map(unit: TypeSignature) -> Self {
        TypeSignature::Map(Box::new(unit))
    }

    /// Build a signature from its parts.
    ///
    /// Composite kinds require a unit type, scalar kinds reject one.
    pub fn from_parts(base: BaseType, unit: Option<TypeSignature>) -> Result<Self, DecodeError> {
        match (base, unit) {
            (BaseType::List, Some(unit)) => Ok(Self::list(unit)),
            (BaseType::Map, Some(unit)) => Ok(Self::map(unit)),
            (BaseType::List | BaseType::Map, None) => Err(DecodeError::MissingUnitType { base }),
            (_, Some(_)) => Err(DecodeError::UnexpectedUnitType { base }),
            (BaseType::Nil, None) => Ok(TypeSignature::Nil),
            (BaseType::Boolean, None) => Ok(TypeSignature::Boolean),
            (BaseType::Integer, None) => Ok(TypeSignature::Integer),
            (BaseType::String, None) => Ok(TypeSignature::String),
            (BaseType::Regexp, None) => Ok(TypeSignature::Regexp),
        }
    }

    /// Base kind of the signature.
    pub fn base_type(&self) -> BaseType {
        match self {
            TypeSignature::Nil => BaseType::Nil,
            TypeSignature::Boolean => BaseType::Boolean,
            TypeSignature::Integer => BaseType::Integer,
            TypeSignature::String => BaseType::String,
            TypeSignature::Regexp => BaseType::Regexp,
            TypeSignature::List(_) => BaseType::List,
            TypeSignature::Map(_) => BaseType::Map,
        }
    }

    /// Element type of a list or value type of a map.
    pub fn unit_type(&self) -> Option<&TypeSignature> {
        match self {
            TypeSignature::List(unit) | TypeSignature::Map(unit) => Some(unit),
            _ => None,
        }
    }

    #[inline]
    pub fn is_scalar(&self) -> bool {
        self.base_type().supports(Capabilities::SCALAR)
    }

    /// Operations values of this signature support.
    #[inline]
    pub fn capabilities(&self) -> Capabilities {
        self.base_type().capabilities()
    }
}

impl fmt::Display for TypeSignature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.unit_type() {
            None => write!(f, "{{{}}}", self.base_type()),
            Some(unit) => write!(f, "{{{} {unit}}}", self.base_type()),
        }
    }
}

/// Wire form: `{"base_type": "...", "unit_type": {...}}`.
#[derive(Clone, Debug, Serialize, Deserialize)]
struct SignatureRepr {
    base_type: BaseType,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    unit_type: Option<Box<SignatureRepr>>,
}

impl From<TypeSignature> for SignatureRepr {
    fn from(ts: TypeSignature) -> Self {
        let base_type = ts.base_type();
        let unit_type = match ts {
            TypeSignature::List(unit) | TypeSignature::Map(unit) => {
                Some(Box::new(SignatureRepr::from(*unit)))
            }
            _ => None,
        };
        SignatureRepr {
            base_type,
            unit_type,
        }
    }
}

impl TryFrom<SignatureRepr> for TypeSignature {
    type Error = DecodeError;

    fn try_from(repr: SignatureRepr) -> Result<Self, Self::Error> {
        let unit = match repr.unit_type {
            Some(unit) => Some(TypeSignature::try_from(*unit)?),
            None => None,
        };
        TypeSignature::from_parts(repr.base_type, unit)
    }
}
