//! Typed value model for the REL expression evaluator.
//!
//! This crate is the leaf of the workspace. It defines:
//!
//! - [`TypeSignature`] / [`BaseType`]: the closed set of value kinds
//! - [`Capabilities`]: which operations a kind supports
//! - [`Value`]: a typed, possibly-absent unit of data, with equality,
//!   ordering, search and navigation
//! - [`Key`]: addresses for context slots and map entries
//! - serde encoding and host conversions (`from_json`, `parse`)
//!
//! # Nil
//!
//! Every kind has a nil: a value whose payload is absent. A nil keeps its
//! type, so `Value::NIL_INTEGER` and `Value::NIL_STRING` are different
//! values. `Value::NIL` is the untyped absent value produced from a host
//! `null`.

#![deny(clippy::arithmetic_side_effects)]

mod capability;
mod errors;
mod key;
mod signature;
mod value;

pub use capability::Capabilities;
pub use errors::{DecodeError, ValueError};
pub use key::Key;
pub use signature::{BaseType, TypeSignature};
pub use value::{Heap, Matcher, Value};
