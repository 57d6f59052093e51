//! Conversions from host data.

use std::collections::BTreeMap;

use super::Value;
use crate::errors::DecodeError;
use crate::signature::TypeSignature;

impl Value {
    /// Convert an untyped host value.
    ///
    /// The type is inferred from the JSON kind:
    /// - `null` is the untyped [`Value::NIL`]
    /// - numbers must be integral
    /// - strings are always strings, never regexps
    /// - array items (and object values) must share one type; an empty
    ///   array or object is typed with [`TypeSignature::DEFAULT`]
    /// - object keys become single-valued map entries
    pub fn from_json(json: &serde_json::Value) -> Result<Self, DecodeError> {
        use serde_json::Value as Json;

        match json {
            Json::Null => Ok(Value::NIL),
            Json::Bool(b) => Ok(Value::boolean(*b)),
            Json::Number(n) => n
                .as_i64()
                .map(Value::integer)
                .ok_or_else(|| DecodeError::UnsupportedNumber {
                    number: n.to_string(),
                }),
            Json::String(s) => Ok(Value::string(s.as_str())),
            Json::Array(elements) => {
                let items = elements
                    .iter()
                    .map(Value::from_json)
                    .collect::<Result<Vec<_>, _>>()?;
                let unit = shared_type(&items)?;
                Value::list(unit, items).map_err(|err| DecodeError::Json(err.to_string()))
            }
            Json::Object(object) => {
                let mut entries = BTreeMap::new();
                for (key, value) in object {
                    entries.insert(key.clone(), vec![Value::from_json(value)?]);
                }
                let unit = shared_type(entries.values().flatten())?;
                Value::map(unit, entries).map_err(|err| DecodeError::Json(err.to_string()))
            }
        }
    }

    /// Parse a textual scalar as a value of type `ty`.
    ///
    /// Booleans accept `1 t T TRUE true True` and `0 f F FALSE false False`.
    pub fn parse(ty: &TypeSignature, text: &str) -> Result<Self, DecodeError> {
        let parse_error = || DecodeError::Parse {
            target: ty.clone(),
            text: text.to_owned(),
        };
        match ty {
            TypeSignature::Nil => Ok(Value::NIL),
            TypeSignature::Boolean => match text {
                "1" | "t" | "T" | "TRUE" | "true" | "True" => Ok(Value::TRUE),
                "0" | "f" | "F" | "FALSE" | "false" | "False" => Ok(Value::FALSE),
                _ => Err(parse_error()),
            },
            TypeSignature::Integer => text
                .parse::<i64>()
                .map(Value::integer)
                .map_err(|_| parse_error()),
            TypeSignature::String => Ok(Value::string(text)),
            TypeSignature::Regexp => Value::new_regexp(text),
            TypeSignature::List(_) | TypeSignature::Map(_) => Err(parse_error()),
        }
    }
}

/// The one type shared by all `values`, or the default type if there are none.
fn shared_type<'a>(
    values: impl IntoIterator<Item = &'a Value>,
) -> Result<TypeSignature, DecodeError> {
    let mut values = values.into_iter();
    let Some(first) = values.next() else {
        return Ok(TypeSignature::DEFAULT);
    };
    if let Some(other) = values.find(|v| !v.same_type(first)) {
        return Err(DecodeError::MixedTypes {
            first: first.signature(),
            other: other.signature(),
        });
    }
    Ok(first.signature())
}
