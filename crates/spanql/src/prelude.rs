//! Convenient imports for typical `spanql` usage.
//!
//! ```ignore
//! use spanql::prelude::*;
//! ```

pub use crate::cond::{
    and, between, eq, ge, gt, in_list, is_not_null, is_null, le, like, lt, ne, not, not_between,
    not_in, not_like, or,
};
pub use crate::expr::{bool_lit, bytes_lit, float_lit, int_lit, null, param, string_lit};
pub use crate::{
    Condition, Direction, Expr, Ident, IntoRow, Record, RenderConfig, SqlError, SqlResult,
    Statement, ToExpr, ident,
};
