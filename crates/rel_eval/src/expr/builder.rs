//! Validating constructors.
//!
//! Each constructor computes the node's result type and rejects operand
//! combinations that would reach an unsupported value operation during
//! evaluation. Assignment into a value source is the one exception: it is
//! accepted here and fails when evaluated.

use rel_value::{BaseType, Capabilities, Key, TypeSignature, Value};

use super::{CompareOp, Expr, ExprKind, Logical, Position, SearchOp, Source};
use crate::errors::BuildError;

fn expect_type(
    operator: &'static str,
    expected: &TypeSignature,
    expr: &Expr,
) -> Result<(), BuildError> {
    if expr.ty == *expected {
        Ok(())
    } else {
        Err(BuildError::operand_type(operator, expected, &expr.ty))
    }
}

fn expect_capability(
    operator: &'static str,
    capability: Capabilities,
    expr: &Expr,
) -> Result<(), BuildError> {
    if expr.ty.capabilities().contains(capability) {
        Ok(())
    } else {
        Err(BuildError::missing_capability(operator, capability, &expr.ty))
    }
}

fn expect_same(
    operator: &'static str,
    left: &TypeSignature,
    right: &TypeSignature,
) -> Result<(), BuildError> {
    if left == right {
        Ok(())
    } else {
        Err(BuildError::MismatchedOperands {
            operator,
            left: left.clone(),
            right: right.clone(),
        })
    }
}

impl Expr {
    fn new(kind: ExprKind, ty: TypeSignature, position: Position) -> Self {
        Expr { kind, ty, position }
    }

    /// The captured value, typed by its signature.
    pub fn constant(value: Value, position: Position) -> Self {
        let ty = value.signature();
        Expr::new(ExprKind::Constant(value), ty, position)
    }

    /// Read the context slot `key`, expecting a `ty` value.
    pub fn heap_reference(
        name: impl Into<String>,
        key: impl Into<Key>,
        ty: TypeSignature,
        position: Position,
    ) -> Self {
        let kind = ExprKind::Reference {
            name: name.into(),
            key: key.into(),
            source: Source::Heap,
        };
        Expr::new(kind, ty, position)
    }

    /// Read entry `key` of the map produced by `source`.
    pub fn value_reference(
        name: impl Into<String>,
        key: impl Into<Key>,
        source: Expr,
        position: Position,
    ) -> Result<Self, BuildError> {
        expect_capability("reference", Capabilities::REFERABLE, &source)?;
        let Some(ty) = source.ty.unit_type().cloned() else {
            return Err(BuildError::missing_capability(
                "reference",
                Capabilities::REFERABLE,
                &source.ty,
            ));
        };
        let kind = ExprKind::Reference {
            name: name.into(),
            key: key.into(),
            source: Source::Value(Box::new(source)),
        };
        Ok(Expr::new(kind, ty, position))
    }

    /// Write the result of `value` to the context slot `key`.
    pub fn heap_assign(
        name: impl Into<String>,
        key: impl Into<Key>,
        value: Expr,
        position: Position,
    ) -> Self {
        let ty = value.ty.clone();
        let kind = ExprKind::Assign {
            name: name.into(),
            key: key.into(),
            value: Box::new(value),
            target: Source::Heap,
        };
        Expr::new(kind, ty, position)
    }

    /// Write the result of `value` into entry `key` of the value produced by
    /// `target`.
    pub fn value_assign(
        name: impl Into<String>,
        key: impl Into<Key>,
        value: Expr,
        target: Expr,
        position: Position,
    ) -> Self {
        let ty = value.ty.clone();
        let kind = ExprKind::Assign {
            name: name.into(),
            key: key.into(),
            value: Box::new(value),
            target: Source::Value(Box::new(target)),
        };
        Expr::new(kind, ty, position)
    }

    /// Boolean comparison.
    ///
    /// A string constant on the right of `Match` is compiled here into a
    /// regexp constant, so an invalid pattern is a build error.
    pub fn compare(
        op: CompareOp,
        left: Expr,
        right: Expr,
        position: Position,
    ) -> Result<Self, BuildError> {
        let right = match op {
            CompareOp::Equal | CompareOp::NotEqual => right,
            CompareOp::Match => {
                expect_type("match", &TypeSignature::String, &left)?;
                let compiled = match &right.kind {
                    ExprKind::Constant(Value::String(Some(pattern))) => {
                        Some(Value::new_regexp(pattern)?)
                    }
                    ExprKind::Constant(Value::String(None)) => Some(Value::NIL_REGEXP),
                    _ => None,
                };
                let right = match compiled {
                    Some(regexp) => Expr::constant(regexp, right.position),
                    None => right,
                };
                expect_type("match", &TypeSignature::Regexp, &right)?;
                right
            }
            CompareOp::Less
            | CompareOp::LessEqual
            | CompareOp::Greater
            | CompareOp::GreaterEqual => {
                expect_same(op.as_str(), &left.ty, &right.ty)?;
                expect_capability(op.as_str(), Capabilities::COMPARABLE, &left)?;
                right
            }
        };
        let kind = ExprKind::Compare {
            op,
            left: Box::new(left),
            right: Box::new(right),
        };
        Ok(Expr::new(kind, TypeSignature::Boolean, position))
    }

    /// Lazy conjunction.
    pub fn and(left: Expr, right: Expr, position: Position) -> Result<Self, BuildError> {
        expect_type("and", &TypeSignature::Boolean, &left)?;
        expect_type("and", &TypeSignature::Boolean, &right)?;
        let kind = ExprKind::Logical(Logical::And(Box::new(left), Box::new(right)));
        Ok(Expr::new(kind, TypeSignature::Boolean, position))
    }

    /// Lazy disjunction.
    pub fn or(left: Expr, right: Expr, position: Position) -> Result<Self, BuildError> {
        expect_type("or", &TypeSignature::Boolean, &left)?;
        expect_type("or", &TypeSignature::Boolean, &right)?;
        let kind = ExprKind::Logical(Logical::Or(Box::new(left), Box::new(right)));
        Ok(Expr::new(kind, TypeSignature::Boolean, position))
    }

    pub fn not(operand: Expr, position: Position) -> Result<Self, BuildError> {
        expect_type("not", &TypeSignature::Boolean, &operand)?;
        let kind = ExprKind::Logical(Logical::Not(Box::new(operand)));
        Ok(Expr::new(kind, TypeSignature::Boolean, position))
    }

    /// `if check then ... [else ...]`; both branches must have one type.
    pub fn conditional(
        check: Expr,
        then: Expr,
        otherwise: Option<Expr>,
        position: Position,
    ) -> Result<Self, BuildError> {
        expect_type("if", &TypeSignature::Boolean, &check)?;
        if let Some(otherwise) = &otherwise {
            expect_same("if", &then.ty, &otherwise.ty)?;
        }
        let ty = then.ty.clone();
        let kind = ExprKind::If {
            check: Box::new(check),
            then: Box::new(then),
            otherwise: otherwise.map(Box::new),
        };
        Ok(Expr::new(kind, ty, position))
    }

    /// Evaluate `body` once per element of `list`, with the element bound to
    /// the context slot `key`.
    ///
    /// The result type is the element type; `body` and `brk` must have it.
    pub fn for_each(
        list: Expr,
        body: Expr,
        brk: Option<Expr>,
        key: impl Into<Key>,
        position: Position,
    ) -> Result<Self, BuildError> {
        expect_capability("for", Capabilities::ITERABLE, &list)?;
        let Some(unit) = list.ty.unit_type().cloned() else {
            return Err(BuildError::missing_capability("for", Capabilities::ITERABLE, &list.ty));
        };
        expect_type("for", &unit, &body)?;
        if let Some(brk) = &brk {
            expect_type("for", &unit, brk)?;
        }
        let kind = ExprKind::For {
            list: Box::new(list),
            body: Box::new(body),
            brk: brk.map(Box::new),
            key: key.into(),
        };
        Ok(Expr::new(kind, unit, position))
    }

    /// Search `collection` for `key`.
    ///
    /// The result is `Boolean` for `Exist`, the unit type for `Find` and a
    /// list of the unit type for `FindAll`. A default must have the result
    /// type.
    pub fn search(
        op: SearchOp,
        key: Expr,
        collection: Expr,
        default: Option<Expr>,
        position: Position,
    ) -> Result<Self, BuildError> {
        let operator = op.as_str();
        if key.ty != TypeSignature::Nil {
            expect_capability(operator, Capabilities::SCALAR, &key)?;
        }
        expect_capability(operator, Capabilities::SEARCHABLE, &collection)?;
        let Some(unit) = collection.ty.unit_type().cloned() else {
            return Err(BuildError::missing_capability(
                operator,
                Capabilities::SEARCHABLE,
                &collection.ty,
            ));
        };
        if collection.ty.base_type() == BaseType::List && !unit.is_scalar() {
            return Err(BuildError::missing_capability(operator, Capabilities::SCALAR, &unit));
        }
        let ty = match op {
            SearchOp::Exist => TypeSignature::Boolean,
            SearchOp::Find => unit,
            SearchOp::FindAll => TypeSignature::list(unit),
        };
        if let Some(default) = &default {
            expect_type(operator, &ty, default)?;
        }
        let kind = ExprKind::Search {
            op,
            key: Box::new(key),
            collection: Box::new(collection),
            default: default.map(Box::new),
        };
        Ok(Expr::new(kind, ty, position))
    }

    /// Evaluate `exprs` in order; the last one is the result.
    pub fn sequence(exprs: Vec<Expr>, position: Position) -> Result<Self, BuildError> {
        let Some(last) = exprs.last() else {
            return Err(BuildError::EmptySequence);
        };
        let ty = last.ty.clone();
        Ok(Expr::new(ExprKind::Sequence(exprs), ty, position))
    }
}
