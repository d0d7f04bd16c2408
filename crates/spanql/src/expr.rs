//! Expression model for WHERE clauses, SET assignments and VALUES rows.
//!
//! [`Expr`] is a plain data tree: constructors never fail and never touch
//! the renderer. Problems that can only be detected with the full tree in
//! hand (an empty identifier, a value that could not be encoded) are carried
//! along and reported by `sql()`.

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::SqlError;
use crate::ident::Ident;

/// A boolean-valued expression used in WHERE clauses.
pub type Condition = Expr;

/// A SQL literal value.
#[derive(Debug, Clone, PartialEq)]
pub enum Literal {
    Bool(bool),
    Int(i64),
    Float(f64),
    String(String),
    Bytes(Vec<u8>),
    Date(NaiveDate),
    Timestamp(DateTime<Utc>),
    /// NUMERIC in its canonical decimal text form
    Numeric(String),
    Null,
}

/// Unary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnaryOp {
    Not,
}

/// Binary operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinaryOp {
    And,
    Or,
    Eq,
    Neq,
    Lt,
    Le,
    Gt,
    Ge,
    Like,
    NotLike,
}

impl BinaryOp {
    pub fn as_str(self) -> &'static str {
        match self {
            BinaryOp::And => "AND",
            BinaryOp::Or => "OR",
            BinaryOp::Eq => "=",
            BinaryOp::Neq => "!=",
            BinaryOp::Lt => "<",
            BinaryOp::Le => "<=",
            BinaryOp::Gt => ">",
            BinaryOp::Ge => ">=",
            BinaryOp::Like => "LIKE",
            BinaryOp::NotLike => "NOT LIKE",
        }
    }

    /// Binding strength (higher = binds tighter).
    pub fn precedence(self) -> u8 {
        match self {
            BinaryOp::Or => Precedence::OR,
            BinaryOp::And => Precedence::AND,
            _ => Precedence::COMPARISON,
        }
    }

    /// Whether `a op b op c` may be re-associated without changing meaning.
    pub fn is_associative(self) -> bool {
        matches!(self, BinaryOp::And | BinaryOp::Or)
    }
}

/// Operator precedence levels, lowest first.
pub(crate) struct Precedence;

impl Precedence {
    pub(crate) const OR: u8 = 1;
    pub(crate) const AND: u8 = 2;
    pub(crate) const NOT: u8 = 3;
    pub(crate) const COMPARISON: u8 = 4;
    pub(crate) const ATOM: u8 = u8::MAX;
}

/// A SQL expression.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    /// A column or path reference (`a`, `a.b`)
    Ident(Ident),
    /// A literal value
    Literal(Literal),
    /// A query parameter (`@name`)
    Param(String),
    /// A value explicitly supplied in a VALUES row
    Default(Box<Expr>),
    /// Prefix operator application
    Unary { op: UnaryOp, operand: Box<Expr> },
    /// Infix operator application
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
    /// `expr IS NULL` / `expr IS NOT NULL`
    IsNull { expr: Box<Expr>, negated: bool },
    /// `expr IN (...)` / `expr NOT IN (...)`
    InList {
        expr: Box<Expr>,
        list: Vec<Expr>,
        negated: bool,
    },
    /// `expr BETWEEN low AND high`
    Between {
        expr: Box<Expr>,
        low: Box<Expr>,
        high: Box<Expr>,
        negated: bool,
    },
    /// A value that failed to encode; rendering reports the error
    Invalid(SqlError),
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    /// Mark this expression as an explicit VALUES entry.
    pub fn into_default(self) -> Self {
        match self {
            Expr::Default(_) => self,
            other => Expr::Default(Box::new(other)),
        }
    }

    /// Binding strength of the outermost node.
    pub(crate) fn precedence(&self) -> u8 {
        match self {
            Expr::Unary {
                op: UnaryOp::Not, ..
            } => Precedence::NOT,
            Expr::Binary { op, .. } => op.precedence(),
            Expr::IsNull { .. } | Expr::InList { .. } | Expr::Between { .. } => {
                Precedence::COMPARISON
            }
            Expr::Default(inner) => inner.precedence(),
            _ => Precedence::ATOM,
        }
    }
}

impl From<Ident> for Expr {
    fn from(ident: Ident) -> Self {
        Expr::Ident(ident)
    }
}

impl From<Literal> for Expr {
    fn from(lit: Literal) -> Self {
        Expr::Literal(lit)
    }
}

/// `TRUE` / `FALSE`
pub fn bool_lit(b: bool) -> Expr {
    Expr::Literal(Literal::Bool(b))
}

/// An INT64 literal.
pub fn int_lit(n: i64) -> Expr {
    Expr::Literal(Literal::Int(n))
}

/// A FLOAT64 literal.
pub fn float_lit(f: f64) -> Expr {
    Expr::Literal(Literal::Float(f))
}

/// A STRING literal.
pub fn string_lit(s: impl Into<String>) -> Expr {
    Expr::Literal(Literal::String(s.into()))
}

/// A BYTES literal.
pub fn bytes_lit(b: impl Into<Vec<u8>>) -> Expr {
    Expr::Literal(Literal::Bytes(b.into()))
}

/// `NULL`
pub fn null() -> Expr {
    Expr::Literal(Literal::Null)
}

/// A query parameter, rendered as `@name`.
pub fn param(name: impl Into<String>) -> Expr {
    Expr::Param(name.into())
}
