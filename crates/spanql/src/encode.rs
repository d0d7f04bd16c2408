//! Value → expression encoding.
//!
//! - [`ToExpr`] turns one scalar value into an [`Expr`].
//! - [`IntoRow`] turns an ordered sequence or a keyed record into one VALUES
//!   row aligned to an INSERT column list.
//! - [`Record`] is the keyed-record capability, normally implemented with
//!   `#[derive(Record)]`.

use std::borrow::Cow;
use std::rc::Rc;
use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::error::{SqlError, SqlResult};
use crate::expr::{Expr, Literal};
use crate::ident::Ident;

/// One VALUES tuple, aligned to a statement's column list.
pub type Row = Vec<Expr>;

/// Convert a scalar value into an expression.
///
/// Already-built expressions pass through unchanged, so raw values,
/// identifiers and parameters can be mixed freely in one row.
pub trait ToExpr {
    fn to_expr(&self) -> SqlResult<Expr>;
}

impl ToExpr for Expr {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(self.clone())
    }
}

impl ToExpr for Ident {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Ident(self.clone()))
    }
}

impl ToExpr for Literal {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(self.clone()))
    }
}

impl<T: ToExpr + ?Sized> ToExpr for &T {
    fn to_expr(&self) -> SqlResult<Expr> {
        (**self).to_expr()
    }
}

impl<T: ToExpr + ?Sized> ToExpr for Box<T> {
    fn to_expr(&self) -> SqlResult<Expr> {
        (**self).to_expr()
    }
}

impl<T: ToExpr + ?Sized> ToExpr for Rc<T> {
    fn to_expr(&self) -> SqlResult<Expr> {
        (**self).to_expr()
    }
}

impl<T: ToExpr + ?Sized> ToExpr for Arc<T> {
    fn to_expr(&self) -> SqlResult<Expr> {
        (**self).to_expr()
    }
}

impl<T: ToExpr> ToExpr for Option<T> {
    fn to_expr(&self) -> SqlResult<Expr> {
        match self {
            Some(v) => v.to_expr(),
            None => Ok(Expr::Literal(Literal::Null)),
        }
    }
}

impl ToExpr for bool {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::Bool(*self)))
    }
}

macro_rules! impl_to_expr_int_lossless {
    ($($t:ty),*) => {
        $(
            impl ToExpr for $t {
                fn to_expr(&self) -> SqlResult<Expr> {
                    Ok(Expr::Literal(Literal::Int(i64::from(*self))))
                }
            }
        )*
    };
}

impl_to_expr_int_lossless!(i8, i16, i32, i64, u8, u16, u32);

macro_rules! impl_to_expr_int_checked {
    ($($t:ty),*) => {
        $(
            impl ToExpr for $t {
                fn to_expr(&self) -> SqlResult<Expr> {
                    i64::try_from(*self)
                        .map(|n| Expr::Literal(Literal::Int(n)))
                        .map_err(|_| SqlError::IntegerOutOfRange(self.to_string()))
                }
            }
        )*
    };
}

impl_to_expr_int_checked!(isize, usize, u64, i128, u128);

impl ToExpr for f32 {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::Float(f64::from(*self))))
    }
}

impl ToExpr for f64 {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::Float(*self)))
    }
}

impl ToExpr for str {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::String(self.to_string())))
    }
}

impl ToExpr for String {
    fn to_expr(&self) -> SqlResult<Expr> {
        self.as_str().to_expr()
    }
}

impl ToExpr for Cow<'_, str> {
    fn to_expr(&self) -> SqlResult<Expr> {
        self.as_ref().to_expr()
    }
}

impl ToExpr for char {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::String(self.to_string())))
    }
}

impl ToExpr for [u8] {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::Bytes(self.to_vec())))
    }
}

impl ToExpr for Vec<u8> {
    fn to_expr(&self) -> SqlResult<Expr> {
        self.as_slice().to_expr()
    }
}

impl<const N: usize> ToExpr for [u8; N] {
    fn to_expr(&self) -> SqlResult<Expr> {
        self.as_slice().to_expr()
    }
}

impl ToExpr for NaiveDate {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::Date(*self)))
    }
}

impl ToExpr for DateTime<Utc> {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::Timestamp(*self)))
    }
}

/// UUIDs are stored as STRING columns in Spanner.
impl ToExpr for uuid::Uuid {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::String(self.hyphenated().to_string())))
    }
}

#[cfg(feature = "rust_decimal")]
impl ToExpr for rust_decimal::Decimal {
    fn to_expr(&self) -> SqlResult<Expr> {
        Ok(Expr::Literal(Literal::Numeric(self.normalize().to_string())))
    }
}

/// Dynamic values: JSON scalars encode like their Rust counterparts, arrays
/// and objects are rejected.
impl ToExpr for serde_json::Value {
    fn to_expr(&self) -> SqlResult<Expr> {
        use serde_json::Value;

        match self {
            Value::Null => Ok(Expr::Literal(Literal::Null)),
            Value::Bool(b) => b.to_expr(),
            Value::Number(n) => {
                if let Some(i) = n.as_i64() {
                    Ok(Expr::Literal(Literal::Int(i)))
                } else if let Some(u) = n.as_u64() {
                    u.to_expr()
                } else {
                    n.as_f64()
                        .map(|f| Expr::Literal(Literal::Float(f)))
                        .ok_or_else(|| SqlError::unsupported("number"))
                }
            }
            Value::String(s) => s.to_expr(),
            Value::Array(_) => Err(SqlError::unsupported("array")),
            Value::Object(_) => Err(SqlError::unsupported("object")),
        }
    }
}

/// Encode a scalar value, turning failures into an [`Expr::Invalid`] node so
/// the error surfaces when the statement is rendered.
pub(crate) fn encode_or_invalid<T: ToExpr + ?Sized>(value: &T) -> Expr {
    value.to_expr().unwrap_or_else(Expr::Invalid)
}

/// A keyed record whose fields map onto columns.
///
/// Usually derived:
///
/// ```ignore
/// #[derive(spanql::Record)]
/// #[spanner(rename_all = "PascalCase")]
/// struct Singer {
///     singer_id: i64,
///     #[spanner(column = "FirstName")]
///     first: String,
///     #[spanner(skip)]
///     cached: Option<String>,
/// }
/// ```
pub trait Record {
    /// Type name reported in [`SqlError::ColumnNotFound`].
    const RECORD_TYPE: &'static str;

    /// Resolved column names of the non-excluded fields, in declaration order.
    fn columns() -> &'static [&'static str];

    /// Encode the field mapped to `column`, or `None` if no field maps to it.
    fn column_value(&self, column: &str) -> Option<SqlResult<Expr>>;
}

/// Encode a record as a row in column order.
pub fn encode_record<R: Record + ?Sized>(record: &R, columns: &[String]) -> SqlResult<Row> {
    columns
        .iter()
        .map(|column| match record.column_value(column) {
            Some(value) => value.map(Expr::into_default),
            None => Err(SqlError::column_not_found(column, R::RECORD_TYPE)),
        })
        .collect()
}

/// Encode each element of an ordered sequence. The length is not checked
/// against the column list here; `InsertStmt` checks it when rendering.
pub fn encode_sequence<'a, T, I>(items: I) -> SqlResult<Row>
where
    T: ToExpr + 'a,
    I: IntoIterator<Item = &'a T>,
{
    items
        .into_iter()
        .map(|item| item.to_expr().map(Expr::into_default))
        .collect()
}

/// A value that can become one VALUES row.
pub trait IntoRow {
    fn into_row(self, columns: &[String]) -> SqlResult<Row>;
}

/// Encode `source` as a row aligned to `columns`.
pub fn encode_row<R: IntoRow>(columns: &[String], source: R) -> SqlResult<Row> {
    source.into_row(columns)
}

impl<T: ToExpr> IntoRow for Vec<T> {
    fn into_row(self, _columns: &[String]) -> SqlResult<Row> {
        encode_sequence(&self)
    }
}

impl<T: ToExpr> IntoRow for &Vec<T> {
    fn into_row(self, _columns: &[String]) -> SqlResult<Row> {
        encode_sequence(self)
    }
}

impl<T: ToExpr> IntoRow for &[T] {
    fn into_row(self, _columns: &[String]) -> SqlResult<Row> {
        encode_sequence(self)
    }
}

impl<T: ToExpr, const N: usize> IntoRow for [T; N] {
    fn into_row(self, _columns: &[String]) -> SqlResult<Row> {
        encode_sequence(&self)
    }
}

macro_rules! impl_into_row_tuple {
    ($($name:ident),+) => {
        impl<$($name: ToExpr),+> IntoRow for ($($name,)+) {
            #[allow(non_snake_case)]
            fn into_row(self, _columns: &[String]) -> SqlResult<Row> {
                let ($($name,)+) = self;
                Ok(vec![$($name.to_expr()?.into_default()),+])
            }
        }
    };
}

impl_into_row_tuple!(A);
impl_into_row_tuple!(A, B);
impl_into_row_tuple!(A, B, C);
impl_into_row_tuple!(A, B, C, D);
impl_into_row_tuple!(A, B, C, D, E);
impl_into_row_tuple!(A, B, C, D, E, F);
impl_into_row_tuple!(A, B, C, D, E, F, G);
impl_into_row_tuple!(A, B, C, D, E, F, G, H);
impl_into_row_tuple!(A, B, C, D, E, F, G, H, I);
impl_into_row_tuple!(A, B, C, D, E, F, G, H, I, J);
impl_into_row_tuple!(A, B, C, D, E, F, G, H, I, J, K);
impl_into_row_tuple!(A, B, C, D, E, F, G, H, I, J, K, L);

/// JSON arrays are sequences, JSON objects are records keyed by column
/// name, anything else is not a row.
impl IntoRow for &serde_json::Value {
    fn into_row(self, columns: &[String]) -> SqlResult<Row> {
        use serde_json::Value;

        match self {
            Value::Array(items) => encode_sequence(items),
            Value::Object(map) => columns
                .iter()
                .map(|column| match map.get(column) {
                    Some(v) => v.to_expr().map(Expr::into_default),
                    None => Err(SqlError::column_not_found(column, "JSON object")),
                })
                .collect(),
            Value::Null => Err(SqlError::InvalidRowShape("null".to_string())),
            Value::Bool(_) => Err(SqlError::InvalidRowShape("bool".to_string())),
            Value::Number(_) => Err(SqlError::InvalidRowShape("number".to_string())),
            Value::String(_) => Err(SqlError::InvalidRowShape("string".to_string())),
        }
    }
}

impl IntoRow for serde_json::Value {
    fn into_row(self, columns: &[String]) -> SqlResult<Row> {
        (&self).into_row(columns)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::{int_lit, null, param, string_lit};
    use serde_json::json;

    fn cols(names: &[&str]) -> Vec<String> {
        names.iter().map(|s| s.to_string()).collect()
    }

    struct Pair {
        b: &'static str,
        a: i64,
    }

    impl Record for Pair {
        const RECORD_TYPE: &'static str = "Pair";

        fn columns() -> &'static [&'static str] {
            &["b", "a"]
        }

        fn column_value(&self, column: &str) -> Option<SqlResult<Expr>> {
            match column {
                "a" => Some(self.a.to_expr()),
                "b" => Some(self.b.to_expr()),
                _ => None,
            }
        }
    }

    #[test]
    fn scalars() {
        assert_eq!(1i32.to_expr().unwrap(), int_lit(1));
        assert_eq!("x".to_expr().unwrap(), string_lit("x"));
        assert_eq!(None::<i64>.to_expr().unwrap(), null());
        assert_eq!(Some(7u8).to_expr().unwrap(), int_lit(7));
        assert_eq!(param("p").to_expr().unwrap(), param("p"));
        assert_eq!(
            b"\x01".to_vec().to_expr().unwrap(),
            Expr::Literal(Literal::Bytes(vec![1]))
        );
    }

    #[test]
    fn unsigned_overflow_is_rejected() {
        assert_eq!(
            u64::MAX.to_expr(),
            Err(SqlError::IntegerOutOfRange(u64::MAX.to_string()))
        );
        assert_eq!((i64::MAX as u64).to_expr().unwrap(), int_lit(i64::MAX));
    }

    #[test]
    fn json_composites_are_unsupported() {
        assert_eq!(json!([1]).to_expr(), Err(SqlError::unsupported("array")));
        assert_eq!(json!({"a": 1}).to_expr(), Err(SqlError::unsupported("object")));
        assert_eq!(json!(1.5).to_expr().unwrap(), Expr::Literal(Literal::Float(1.5)));
    }

    #[test]
    fn record_row_follows_column_order() {
        let row = encode_record(&Pair { b: "x", a: 1 }, &cols(&["a", "b"])).unwrap();
        assert_eq!(
            row,
            vec![int_lit(1).into_default(), string_lit("x").into_default()]
        );
    }

    #[test]
    fn record_missing_column() {
        let err = encode_record(&Pair { b: "x", a: 1 }, &cols(&["a", "c"])).unwrap_err();
        assert_eq!(err, SqlError::column_not_found("c", "Pair"));
    }

    #[test]
    fn sequence_length_is_not_checked() {
        let row = encode_row(&cols(&["a"]), vec![1, 2, 3]).unwrap();
        assert_eq!(row.len(), 3);
        let row = encode_row(&cols(&["a", "b", "c"]), vec![1]).unwrap();
        assert_eq!(row.len(), 1);
    }

    #[test]
    fn tuple_rows_mix_types() {
        let row = encode_row(&cols(&["a", "b", "c"]), (1, "foo", param("p"))).unwrap();
        assert_eq!(
            row,
            vec![
                int_lit(1).into_default(),
                string_lit("foo").into_default(),
                param("p").into_default(),
            ]
        );
    }

    #[test]
    fn json_rows() {
        let columns = cols(&["a", "b"]);
        let row = encode_row(&columns, json!({"b": "x", "a": 1, "extra": true})).unwrap();
        assert_eq!(
            row,
            vec![int_lit(1).into_default(), string_lit("x").into_default()]
        );
        assert_eq!(
            encode_row(&columns, json!({"a": 1})),
            Err(SqlError::column_not_found("b", "JSON object"))
        );
        assert_eq!(
            encode_row(&columns, json!(1)),
            Err(SqlError::InvalidRowShape("number".into()))
        );
        assert_eq!(
            encode_row(&columns, json!([1, [2]])),
            Err(SqlError::unsupported("array"))
        );
    }
}
