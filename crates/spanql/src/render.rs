//! Render expression trees to Spanner SQL text.
//!
//! Parentheses are inserted by precedence only; combinators never add them.
//! Precedence, lowest first: `OR`, `AND`, `NOT`, comparisons
//! (`=`, `!=`, `<`, `<=`, `>`, `>=`, `LIKE`, `IN`, `BETWEEN`, `IS`).

use std::fmt::Write as _;

use chrono::SecondsFormat;

use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, Literal, Precedence, UnaryOp};

/// Reserved keywords of the GoogleSQL dialect. Identifiers matching one of
/// these (case-insensitively) must be quoted.
const RESERVED_KEYWORDS: &[&str] = &[
    "ALL",
    "AND",
    "ANY",
    "ARRAY",
    "AS",
    "ASC",
    "ASSERT_ROWS_MODIFIED",
    "AT",
    "BETWEEN",
    "BY",
    "CASE",
    "CAST",
    "COLLATE",
    "CONTAINS",
    "CREATE",
    "CROSS",
    "CUBE",
    "CURRENT",
    "DEFAULT",
    "DEFINE",
    "DESC",
    "DISTINCT",
    "ELSE",
    "END",
    "ENUM",
    "ESCAPE",
    "EXCEPT",
    "EXCLUDE",
    "EXISTS",
    "EXTRACT",
    "FALSE",
    "FETCH",
    "FOLLOWING",
    "FOR",
    "FROM",
    "FULL",
    "GROUP",
    "GROUPING",
    "GROUPS",
    "HASH",
    "HAVING",
    "IF",
    "IGNORE",
    "IN",
    "INNER",
    "INTERSECT",
    "INTERVAL",
    "INTO",
    "IS",
    "JOIN",
    "LATERAL",
    "LEFT",
    "LIKE",
    "LIMIT",
    "LOOKUP",
    "MERGE",
    "NATURAL",
    "NEW",
    "NO",
    "NOT",
    "NULL",
    "NULLS",
    "OF",
    "ON",
    "OR",
    "ORDER",
    "OUTER",
    "OVER",
    "PARTITION",
    "PRECEDING",
    "PROTO",
    "RANGE",
    "RECURSIVE",
    "RESPECT",
    "RIGHT",
    "ROLLUP",
    "ROWS",
    "SELECT",
    "SET",
    "SOME",
    "STRUCT",
    "TABLESAMPLE",
    "THEN",
    "TO",
    "TREAT",
    "TRUE",
    "UNBOUNDED",
    "UNION",
    "UNNEST",
    "USING",
    "WHEN",
    "WHERE",
    "WINDOW",
    "WITH",
    "WITHIN",
];

/// Check whether `name` is a reserved keyword.
pub fn is_reserved_keyword(name: &str) -> bool {
    RESERVED_KEYWORDS
        .iter()
        .any(|kw| kw.eq_ignore_ascii_case(name))
}

fn needs_quoting(name: &str) -> bool {
    let starts_with_digit = name.chars().next().is_some_and(|c| c.is_ascii_digit());
    starts_with_digit
        || !name.chars().all(|c| c == '_' || c.is_ascii_alphanumeric())
        || is_reserved_keyword(name)
}

/// Write a single identifier segment, quoting it with backticks if needed.
pub(crate) fn write_name(name: &str, out: &mut String) -> SqlResult<()> {
    if name.is_empty() {
        return Err(SqlError::EmptyIdentifier);
    }
    if name.contains('\0') {
        return Err(SqlError::InvalidIdentifier(name.to_string()));
    }
    if !needs_quoting(name) {
        out.push_str(name);
        return Ok(());
    }
    out.push('`');
    for ch in name.chars() {
        write_escaped_char(ch, '`', out);
    }
    out.push('`');
    Ok(())
}

/// Quote a string as a STRING literal: `"..."` with `"`, `\` and control
/// characters escaped.
pub fn quote_string(s: &str) -> String {
    let mut out = String::with_capacity(s.len() + 2);
    write_string(s, &mut out);
    out
}

fn write_string(s: &str, out: &mut String) {
    out.push('"');
    for ch in s.chars() {
        write_escaped_char(ch, '"', out);
    }
    out.push('"');
}

fn write_escaped_char(ch: char, quote: char, out: &mut String) {
    match ch {
        '\\' => out.push_str("\\\\"),
        '\n' => out.push_str("\\n"),
        '\r' => out.push_str("\\r"),
        '\t' => out.push_str("\\t"),
        c if c == quote => {
            out.push('\\');
            out.push(c);
        }
        c if c.is_control() && (c as u32) < 0x80 => {
            let _ = write!(out, "\\x{:02x}", c as u32);
        }
        c if c.is_control() => {
            let _ = write!(out, "\\u{:04x}", c as u32);
        }
        c => out.push(c),
    }
}

fn write_bytes(bytes: &[u8], out: &mut String) {
    out.push_str("B\"");
    for &b in bytes {
        match b {
            b'\\' => out.push_str("\\\\"),
            b'"' => out.push_str("\\\""),
            b'\n' => out.push_str("\\n"),
            b'\r' => out.push_str("\\r"),
            b'\t' => out.push_str("\\t"),
            0x20..=0x7e => out.push(b as char),
            _ => {
                let _ = write!(out, "\\x{:02x}", b);
            }
        }
    }
    out.push('"');
}

fn write_float(f: f64, out: &mut String) {
    if f.is_nan() {
        out.push_str("CAST(\"nan\" AS FLOAT64)");
    } else if f.is_infinite() {
        let text = if f > 0.0 { "inf" } else { "-inf" };
        let _ = write!(out, "CAST(\"{text}\" AS FLOAT64)");
    } else {
        // Debug formatting is the shortest round-trip form and always keeps
        // a fraction or exponent (`1.0`, `1e20`).
        let _ = write!(out, "{f:?}");
    }
}

pub(crate) fn write_literal(lit: &Literal, out: &mut String) {
    match lit {
        Literal::Bool(b) => out.push_str(if *b { "TRUE" } else { "FALSE" }),
        Literal::Int(n) => {
            let _ = write!(out, "{n}");
        }
        Literal::Float(f) => write_float(*f, out),
        Literal::String(s) => write_string(s, out),
        Literal::Bytes(b) => write_bytes(b, out),
        Literal::Date(d) => {
            out.push_str("DATE ");
            write_string(&d.format("%Y-%m-%d").to_string(), out);
        }
        Literal::Timestamp(ts) => {
            out.push_str("TIMESTAMP ");
            write_string(&ts.to_rfc3339_opts(SecondsFormat::AutoSi, true), out);
        }
        Literal::Numeric(n) => {
            out.push_str("NUMERIC ");
            write_string(n, out);
        }
        Literal::Null => out.push_str("NULL"),
    }
}

fn is_valid_param_name(name: &str) -> bool {
    let mut chars = name.chars();
    let Some(first) = chars.next() else {
        return false;
    };
    (first == '_' || first.is_ascii_alphabetic())
        && chars.all(|c| c == '_' || c.is_ascii_alphanumeric())
}

/// Render an expression into a fresh string.
pub fn expr_to_sql(expr: &Expr) -> SqlResult<String> {
    let mut out = String::new();
    write_expr(expr, &mut out)?;
    Ok(out)
}

pub(crate) fn write_expr(expr: &Expr, out: &mut String) -> SqlResult<()> {
    match expr {
        Expr::Ident(ident) => ident.write_sql(out),
        Expr::Literal(lit) => {
            write_literal(lit, out);
            Ok(())
        }
        Expr::Param(name) => {
            if !is_valid_param_name(name) {
                return Err(SqlError::InvalidParameterName(name.clone()));
            }
            out.push('@');
            out.push_str(name);
            Ok(())
        }
        Expr::Default(inner) => write_expr(inner, out),
        Expr::Unary {
            op: UnaryOp::Not,
            operand,
        } => {
            out.push_str("NOT ");
            write_operand(operand, operand.precedence() < Precedence::NOT, out)
        }
        Expr::Binary { op, left, right } => {
            let prec = op.precedence();
            let non_assoc = !op.is_associative();
            let left_prec = left.precedence();
            write_operand(left, left_prec < prec || (non_assoc && left_prec == prec), out)?;
            out.push(' ');
            out.push_str(op.as_str());
            out.push(' ');
            // `a AND (b AND c)` prints as `a AND b AND c`
            let same_assoc = op.is_associative()
                && matches!(right.as_ref(), Expr::Binary { op: r, .. } if r == op);
            write_operand(right, right.precedence() <= prec && !same_assoc, out)
        }
        Expr::IsNull { expr, negated } => {
            write_comparison_operand(expr, out)?;
            out.push_str(if *negated { " IS NOT NULL" } else { " IS NULL" });
            Ok(())
        }
        Expr::InList {
            expr,
            list,
            negated,
        } => {
            write_comparison_operand(expr, out)?;
            out.push_str(if *negated { " NOT IN (" } else { " IN (" });
            for (i, item) in list.iter().enumerate() {
                if i > 0 {
                    out.push_str(", ");
                }
                write_expr(item, out)?;
            }
            out.push(')');
            Ok(())
        }
        Expr::Between {
            expr,
            low,
            high,
            negated,
        } => {
            write_comparison_operand(expr, out)?;
            out.push_str(if *negated { " NOT BETWEEN " } else { " BETWEEN " });
            write_comparison_operand(low, out)?;
            out.push_str(" AND ");
            write_comparison_operand(high, out)
        }
        Expr::Invalid(err) => Err(err.clone()),
    }
}

pub(crate) fn write_comparison_operand(expr: &Expr, out: &mut String) -> SqlResult<()> {
    write_operand(expr, expr.precedence() <= Precedence::COMPARISON, out)
}

fn write_operand(expr: &Expr, parens: bool, out: &mut String) -> SqlResult<()> {
    if parens {
        out.push('(');
        write_expr(expr, out)?;
        out.push(')');
        Ok(())
    } else {
        write_expr(expr, out)
    }
}

/// Write a comma-separated list of expressions.
pub(crate) fn write_expr_list(exprs: &[Expr], out: &mut String) -> SqlResult<()> {
    for (i, expr) in exprs.iter().enumerate() {
        if i > 0 {
            out.push_str(", ");
        }
        write_expr(expr, out)?;
    }
    Ok(())
}
