//! Typed operator tree.
//!
//! An [`Expr`] owns its children, its result type and the source position
//! it was built from. Fields are private: trees are assembled only through
//! the validating constructors in `builder`, so the evaluator can rely on
//! operand types matching what each node expects.

mod builder;

use std::fmt;

use rel_value::{Key, TypeSignature, Value};

/// Source location of a node, for diagnostics.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub struct Position {
    pub line: u32,
    pub col: u32,
}

impl Position {
    pub const fn new(line: u32, col: u32) -> Self {
        Position { line, col }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.line, self.col)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum CompareOp {
    Equal,
    NotEqual,
    Less,
    LessEqual,
    Greater,
    GreaterEqual,
    /// String on the left matched against a regexp on the right.
    Match,
}

impl CompareOp {
    pub fn as_str(self) -> &'static str {
        match self {
            CompareOp::Equal => "==",
            CompareOp::NotEqual => "!=",
            CompareOp::Less => "<",
            CompareOp::LessEqual => "<=",
            CompareOp::Greater => ">",
            CompareOp::GreaterEqual => ">=",
            CompareOp::Match => "match",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum SearchOp {
    /// Whether the key is present.
    Exist,
    /// First match.
    Find,
    /// Every match, as a list.
    FindAll,
}

impl SearchOp {
    pub fn as_str(self) -> &'static str {
        match self {
            SearchOp::Exist => "exist",
            SearchOp::Find => "find",
            SearchOp::FindAll => "findAll",
        }
    }
}

/// Where a reference reads from or an assignment writes to.
#[derive(Clone, Debug)]
pub enum Source {
    /// A named slot in the request context.
    Heap,
    /// The value produced by an expression.
    Value(Box<Expr>),
}

#[derive(Clone, Debug)]
pub enum Logical {
    And(Box<Expr>, Box<Expr>),
    Or(Box<Expr>, Box<Expr>),
    Not(Box<Expr>),
}

/// Node kinds.
#[derive(Clone, Debug)]
pub enum ExprKind {
    Constant(Value),
    Reference {
        /// Name as written in the rule, for diagnostics.
        name: String,
        key: Key,
        source: Source,
    },
    Assign {
        name: String,
        key: Key,
        value: Box<Expr>,
        target: Source,
    },
    Compare {
        op: CompareOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    Logical(Logical),
    If {
        check: Box<Expr>,
        then: Box<Expr>,
        otherwise: Option<Box<Expr>>,
    },
    For {
        list: Box<Expr>,
        body: Box<Expr>,
        brk: Option<Box<Expr>>,
        /// Context slot the current element is bound to.
        key: Key,
    },
    Search {
        op: SearchOp,
        key: Box<Expr>,
        collection: Box<Expr>,
        default: Option<Box<Expr>>,
    },
    Sequence(Vec<Expr>),
}

impl ExprKind {
    /// Short node name for logs.
    pub fn name(&self) -> &'static str {
        match self {
            ExprKind::Constant(_) => "constant",
            ExprKind::Reference { .. } => "reference",
            ExprKind::Assign { .. } => "assign",
            ExprKind::Compare { .. } => "compare",
            ExprKind::Logical(_) => "logical",
            ExprKind::If { .. } => "if",
            ExprKind::For { .. } => "for",
            ExprKind::Search { .. } => "search",
            ExprKind::Sequence(_) => "sequence",
        }
    }
}

/// Operator tree node.
#[derive(Clone, Debug)]
pub struct Expr {
    kind: ExprKind,
    ty: TypeSignature,
    position: Position,
}

impl Expr {
    #[inline]
    pub fn kind(&self) -> &ExprKind {
        &self.kind
    }

    /// Type of every value this node evaluates to.
    #[inline]
    pub fn result_type(&self) -> &TypeSignature {
        &self.ty
    }

    #[inline]
    pub fn position(&self) -> Position {
        self.position
    }

    /// The nil of the result type.
    pub fn nil_result(&self) -> Value {
        Value::nil_of(&self.ty)
    }
}
