//! Wire encoding.
//!
//! ```text
//! {"type": {"base_type": "list", "unit_type": {"base_type": "string"}},
//!  "value": [{"type": {"base_type": "string"}, "value": "foo"}]}
//! ```
//!
//! `value` is omitted for a nil. Regexps travel as their source pattern and
//! are recompiled on decode.

use std::collections::BTreeMap;

use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use super::Value;
use crate::errors::{DecodeError, ValueError};
use crate::signature::TypeSignature;

impl Serialize for Value {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let nil = self.is_nil();
        let mut state = serializer.serialize_struct("Value", if nil { 1 } else { 2 })?;
        state.serialize_field("type", &self.signature())?;
        if !nil {
            state.serialize_field("value", &Payload(self))?;
        }
        state.end()
    }
}

/// Payload half of an encoded value.
struct Payload<'a>(&'a Value);

impl Serialize for Payload<'_> {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self.0 {
            Value::Boolean(Some(b)) => serializer.serialize_bool(*b),
            Value::Integer(Some(n)) => serializer.serialize_i64(*n),
            Value::String(Some(s)) => serializer.serialize_str(s),
            Value::Regexp(Some(m)) => serializer.serialize_str(m.as_str()),
            Value::List {
                items: Some(items), ..
            } => items.as_slice().serialize(serializer),
            Value::Map {
                entries: Some(entries),
                ..
            } => entries.serialize(serializer),
            _ => serializer.serialize_none(),
        }
    }
}

#[derive(Deserialize)]
struct ValueRepr {
    #[serde(rename = "type")]
    ty: TypeSignature,
    #[serde(default)]
    value: Option<serde_json::Value>,
}

impl<'de> Deserialize<'de> for Value {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let repr = ValueRepr::deserialize(deserializer)?;
        Value::decode(&repr.ty, repr.value.unwrap_or_default()).map_err(D::Error::custom)
    }
}

impl Value {
    /// Build a value of type `ty` from its encoded payload.
    ///
    /// A `null` payload yields the nil of `ty`. Elements of lists and maps
    /// are full encoded values and must have the unit type.
    pub fn decode(ty: &TypeSignature, payload: serde_json::Value) -> Result<Self, DecodeError> {
        use serde_json::Value as Json;

        let base = ty.base_type();
        match (ty, payload) {
            (_, Json::Null) => Ok(Value::nil_of(ty)),
            (TypeSignature::Boolean, Json::Bool(b)) => Ok(Value::boolean(b)),
            (TypeSignature::Integer, Json::Number(n)) => n
                .as_i64()
                .map(Value::integer)
                .ok_or_else(|| DecodeError::UnsupportedNumber {
                    number: n.to_string(),
                }),
            (TypeSignature::String, Json::String(s)) => Ok(Value::string(s)),
            (TypeSignature::Regexp, Json::String(s)) => Value::new_regexp(&s),
            (TypeSignature::List(unit), Json::Array(elements)) => {
                let items = elements
                    .into_iter()
                    .map(decode_element)
                    .collect::<Result<Vec<_>, _>>()?;
                Value::list((**unit).clone(), items).map_err(element_error)
            }
            (TypeSignature::Map(unit), Json::Object(object)) => {
                let mut entries = BTreeMap::new();
                for (key, values) in object {
                    let values = match values {
                        Json::Array(values) => values,
                        other => return Err(DecodeError::invalid_payload(base, other)),
                    };
                    if values.is_empty() {
                        return Err(DecodeError::EmptyMapEntry { key });
                    }
                    let values = values
                        .into_iter()
                        .map(decode_element)
                        .collect::<Result<Vec<_>, _>>()?;
                    entries.insert(key, values);
                }
                Value::map((**unit).clone(), entries).map_err(element_error)
            }
            (_, payload) => Err(DecodeError::invalid_payload(base, payload)),
        }
    }
}

fn decode_element(element: serde_json::Value) -> Result<Value, DecodeError> {
    let repr: ValueRepr = serde_json::from_value(element)?;
    Value::decode(&repr.ty, repr.value.unwrap_or_default())
}

fn element_error(err: ValueError) -> DecodeError {
    match err {
        ValueError::TypeMismatch { expected, found } => {
            DecodeError::ElementType { expected, found }
        }
        other => DecodeError::Json(other.to_string()),
    }
}
