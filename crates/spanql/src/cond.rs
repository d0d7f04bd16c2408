//! Condition combinators for WHERE clauses.
//!
//! Every function is pure and returns a new [`Condition`]. Operands accept
//! anything implementing [`ToExpr`]: built expressions, identifiers,
//! parameters or raw scalars. A scalar that cannot be encoded becomes an
//! [`Expr::Invalid`] node and is reported by `sql()`.
//!
//! ```ignore
//! use spanql::cond::{and, eq, gt, or};
//! use spanql::ident;
//!
//! let cond = and([
//!     eq(ident(["Status"]), "active"),
//!     or([gt(ident(["Age"]), 18), eq(ident(["Admin"]), true)]),
//! ]);
//! // Status = "active" AND (Age > 18 OR Admin = TRUE)
//! ```

use crate::encode::{ToExpr, encode_or_invalid};
use crate::expr::{BinaryOp, Condition, Expr, Literal, UnaryOp};

fn compare(op: BinaryOp, lhs: impl ToExpr, rhs: impl ToExpr) -> Condition {
    Expr::binary(op, encode_or_invalid(&lhs), encode_or_invalid(&rhs))
}

/// `lhs = rhs`
pub fn eq(lhs: impl ToExpr, rhs: impl ToExpr) -> Condition {
    compare(BinaryOp::Eq, lhs, rhs)
}

/// `lhs != rhs`
pub fn ne(lhs: impl ToExpr, rhs: impl ToExpr) -> Condition {
    compare(BinaryOp::Neq, lhs, rhs)
}

/// `lhs < rhs`
pub fn lt(lhs: impl ToExpr, rhs: impl ToExpr) -> Condition {
    compare(BinaryOp::Lt, lhs, rhs)
}

/// `lhs <= rhs`
pub fn le(lhs: impl ToExpr, rhs: impl ToExpr) -> Condition {
    compare(BinaryOp::Le, lhs, rhs)
}

/// `lhs > rhs`
pub fn gt(lhs: impl ToExpr, rhs: impl ToExpr) -> Condition {
    compare(BinaryOp::Gt, lhs, rhs)
}

/// `lhs >= rhs`
pub fn ge(lhs: impl ToExpr, rhs: impl ToExpr) -> Condition {
    compare(BinaryOp::Ge, lhs, rhs)
}

/// `lhs LIKE pattern`
pub fn like(lhs: impl ToExpr, pattern: impl ToExpr) -> Condition {
    compare(BinaryOp::Like, lhs, pattern)
}

/// `lhs NOT LIKE pattern`
pub fn not_like(lhs: impl ToExpr, pattern: impl ToExpr) -> Condition {
    compare(BinaryOp::NotLike, lhs, pattern)
}

fn fold(op: BinaryOp, neutral: bool, conds: impl IntoIterator<Item = Condition>) -> Condition {
    conds
        .into_iter()
        .reduce(|acc, cond| Expr::binary(op, acc, cond))
        .unwrap_or(Expr::Literal(Literal::Bool(neutral)))
}

/// Conjunction of all conditions, folded left to right.
///
/// An empty input yields `TRUE`; a single condition is returned as is.
pub fn and(conds: impl IntoIterator<Item = Condition>) -> Condition {
    fold(BinaryOp::And, true, conds)
}

/// Disjunction of all conditions, folded left to right.
///
/// An empty input yields `FALSE`; a single condition is returned as is.
pub fn or(conds: impl IntoIterator<Item = Condition>) -> Condition {
    fold(BinaryOp::Or, false, conds)
}

/// `NOT cond`
pub fn not(cond: Condition) -> Condition {
    Expr::unary(UnaryOp::Not, cond)
}

/// `expr IS NULL`
pub fn is_null(expr: impl ToExpr) -> Condition {
    Expr::IsNull {
        expr: Box::new(encode_or_invalid(&expr)),
        negated: false,
    }
}

/// `expr IS NOT NULL`
pub fn is_not_null(expr: impl ToExpr) -> Condition {
    Expr::IsNull {
        expr: Box::new(encode_or_invalid(&expr)),
        negated: true,
    }
}

fn list_predicate<T: ToExpr>(
    expr: impl ToExpr,
    values: impl IntoIterator<Item = T>,
    negated: bool,
) -> Condition {
    let expr = encode_or_invalid(&expr);
    let list: Vec<Expr> = values.into_iter().map(|v| encode_or_invalid(&v)).collect();
    if list.is_empty() {
        // `x IN ()` is not valid SQL; an unencodable operand still fails
        if matches!(expr, Expr::Invalid(_)) {
            return expr;
        }
        return Expr::Literal(Literal::Bool(negated));
    }
    Expr::InList {
        expr: Box::new(expr),
        list,
        negated,
    }
}

/// `expr IN (values...)`; an empty list yields `FALSE`.
pub fn in_list<T: ToExpr>(expr: impl ToExpr, values: impl IntoIterator<Item = T>) -> Condition {
    list_predicate(expr, values, false)
}

/// `expr NOT IN (values...)`; an empty list yields `TRUE`.
pub fn not_in<T: ToExpr>(expr: impl ToExpr, values: impl IntoIterator<Item = T>) -> Condition {
    list_predicate(expr, values, true)
}

/// `expr BETWEEN low AND high`
pub fn between(expr: impl ToExpr, low: impl ToExpr, high: impl ToExpr) -> Condition {
    Expr::Between {
        expr: Box::new(encode_or_invalid(&expr)),
        low: Box::new(encode_or_invalid(&low)),
        high: Box::new(encode_or_invalid(&high)),
        negated: false,
    }
}

/// `expr NOT BETWEEN low AND high`
pub fn not_between(expr: impl ToExpr, low: impl ToExpr, high: impl ToExpr) -> Condition {
    Expr::Between {
        expr: Box::new(encode_or_invalid(&expr)),
        low: Box::new(encode_or_invalid(&low)),
        high: Box::new(encode_or_invalid(&high)),
        negated: true,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::SqlError;
    use crate::expr::{bool_lit, int_lit, string_lit};
    use crate::ident::ident;
    use crate::render::expr_to_sql;

    #[test]
    fn scalars_are_encoded() {
        assert_eq!(
            eq(ident(["c"]), "bar"),
            Expr::binary(BinaryOp::Eq, ident(["c"]).into(), string_lit("bar"))
        );
    }

    #[test]
    fn empty_and_or_fold_to_neutral_literal() {
        assert_eq!(and(Vec::new()), bool_lit(true));
        assert_eq!(or(Vec::new()), bool_lit(false));
    }

    #[test]
    fn single_condition_is_unchanged() {
        let c = eq(ident(["a"]), 1);
        assert_eq!(and([c.clone()]), c);
        assert_eq!(or([c.clone()]), c);
    }

    #[test]
    fn and_folds_left() {
        let (a, b, c) = (int_lit(1), int_lit(2), int_lit(3));
        assert_eq!(
            and([a.clone(), b.clone(), c.clone()]),
            Expr::binary(BinaryOp::And, Expr::binary(BinaryOp::And, a, b), c)
        );
    }

    #[test]
    fn empty_in_lists() {
        assert_eq!(in_list::<i64>(ident(["a"]), []), bool_lit(false));
        assert_eq!(not_in::<i64>(ident(["a"]), []), bool_lit(true));
    }

    #[test]
    fn empty_in_list_keeps_operand_error() {
        let expected = Err(SqlError::IntegerOutOfRange(u64::MAX.to_string()));
        assert_eq!(expr_to_sql(&in_list::<i64>(u64::MAX, [])), expected);
        assert_eq!(expr_to_sql(&not_in::<i64>(u64::MAX, [])), expected);
    }

    #[test]
    fn encoding_failure_is_deferred() {
        let cond = eq(ident(["a"]), u64::MAX);
        assert_eq!(
            expr_to_sql(&cond),
            Err(SqlError::IntegerOutOfRange(u64::MAX.to_string()))
        );
    }

    #[test]
    fn like_and_between_render() {
        assert_eq!(
            expr_to_sql(&like(ident(["Name"]), "A%")).unwrap(),
            "Name LIKE \"A%\""
        );
        assert_eq!(
            expr_to_sql(&not_between(ident(["Age"]), 1, 9)).unwrap(),
            "Age NOT BETWEEN 1 AND 9"
        );
        assert_eq!(
            expr_to_sql(&is_not_null(ident(["a"]))).unwrap(),
            "a IS NOT NULL"
        );
    }
}
