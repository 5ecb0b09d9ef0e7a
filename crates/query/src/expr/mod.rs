//! Closed expression algebra for compiled filters and sort keys.
//!
//! Every compiled stage is a tree over a small, closed set of variants, so
//! the composer's supported splice points are exhaustive and checked by the
//! type system rather than by inspecting a general-purpose AST. The same
//! tree is evaluated in memory ([`eval`]) and rendered to parameterized SQL
//! ([`sql`]); whatever the composer accepts stays translatable to the
//! store's native query form.

pub mod eval;
pub mod splice;
pub mod sql;

use serde::{Deserialize, Serialize};

use crate::types::{DataType, ScalarValue};

/// Comparison operators inside a compiled expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CmpOp {
    /// Equal.
    Eq,
    /// Less than.
    Lt,
    /// Less than or equal.
    Le,
    /// Greater than.
    Gt,
    /// Greater than or equal.
    Ge,
}

/// A compiled expression tree.
///
/// `Param` marks the single formal parameter of the enclosing [`Stage`];
/// composition replaces it structurally with another stage's body.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum Expr {
    /// The stage's input placeholder.
    Param,
    /// Member access on the base expression.
    Field {
        /// Expression producing the object being accessed.
        base: Box<Expr>,
        /// Canonical field name.
        name: String,
    },
    /// The store's native JSON-path-to-text extraction.
    JsonExtract {
        /// Expression producing the document column value.
        base: Box<Expr>,
        /// JSON pointer, e.g. `$.customer.name`.
        pointer: String,
    },
    /// Store-side cast of extracted text to a typed value.
    Cast {
        /// Expression producing the raw text.
        base: Box<Expr>,
        /// Target type.
        ty: DataType,
    },
    /// A literal value.
    Literal(ScalarValue),
    /// Binary comparison.
    Compare {
        /// Left operand.
        lhs: Box<Expr>,
        /// Operator.
        op: CmpOp,
        /// Right operand.
        rhs: Box<Expr>,
    },
    /// Logical conjunction.
    And(Box<Expr>, Box<Expr>),
    /// Logical disjunction.
    Or(Box<Expr>, Box<Expr>),
    /// Logical negation.
    Not(Box<Expr>),
    /// True if the operand is absent/null.
    IsNull(Box<Expr>),
    /// Membership in a literal set.
    InList {
        /// Expression producing the tested value.
        needle: Box<Expr>,
        /// The membership set.
        items: Vec<ScalarValue>,
    },
    /// Case-insensitive substring test.
    Contains {
        /// Expression producing the searched text.
        haystack: Box<Expr>,
        /// The substring looked for.
        needle: String,
    },
}

impl Expr {
    /// Member access helper.
    pub fn field(base: Expr, name: impl Into<String>) -> Expr {
        Expr::Field {
            base: Box::new(base),
            name: name.into(),
        }
    }

    /// JSON extraction helper.
    pub fn json_extract(base: Expr, pointer: impl Into<String>) -> Expr {
        Expr::JsonExtract {
            base: Box::new(base),
            pointer: pointer.into(),
        }
    }

    /// Cast helper.
    pub fn cast(base: Expr, ty: DataType) -> Expr {
        Expr::Cast {
            base: Box::new(base),
            ty,
        }
    }

    /// Literal helper.
    pub fn literal(value: impl Into<ScalarValue>) -> Expr {
        Expr::Literal(value.into())
    }

    /// Comparison helper.
    pub fn compare(lhs: Expr, op: CmpOp, rhs: Expr) -> Expr {
        Expr::Compare {
            lhs: Box::new(lhs),
            op,
            rhs: Box::new(rhs),
        }
    }

    /// Conjunction helper.
    pub fn and(a: Expr, b: Expr) -> Expr {
        Expr::And(Box::new(a), Box::new(b))
    }

    /// Disjunction helper.
    pub fn or(a: Expr, b: Expr) -> Expr {
        Expr::Or(Box::new(a), Box::new(b))
    }

    /// Negation helper.
    pub fn not(e: Expr) -> Expr {
        Expr::Not(Box::new(e))
    }

    /// Null test helper.
    pub fn is_null(e: Expr) -> Expr {
        Expr::IsNull(Box::new(e))
    }
}

/// A single-parameter function, represented as its body.
///
/// The formal parameter is implicit: every [`Expr::Param`] occurrence in the
/// body refers to it. Stages are built independently for each pipeline step
/// (field access, extraction, coercion, predicate) and fused by
/// [`Stage::compose`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Stage {
    body: Expr,
}

impl Stage {
    /// Wraps a body expression as a stage.
    pub fn new(body: Expr) -> Self {
        Self { body }
    }

    /// The identity stage: returns its input unchanged.
    pub fn identity() -> Self {
        Self { body: Expr::Param }
    }

    /// Borrows the body.
    pub fn body(&self) -> &Expr {
        &self.body
    }

    /// Unwraps the body.
    pub fn into_body(self) -> Expr {
        self.body
    }
}
