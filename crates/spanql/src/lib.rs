//! # spanql
//!
//! A SQL statement builder for the Spanner (GoogleSQL) dialect.
//!
//! ## Features
//!
//! - **Typed fragments**: identifiers, literals, parameters and conditions are
//!   values of [`Expr`]; conditions are built only through combinators
//! - **Value encoding**: Rust values become literals via [`ToExpr`]; rows come
//!   from tuples, sequences, JSON values or `#[derive(Record)]` structs
//! - **Owned builders**: every clause method returns a new statement, so a
//!   common prefix can be cloned and extended independently
//! - **Safe defaults**: UPDATE requires SET and WHERE, DELETE requires WHERE
//! - **Correct output**: identifiers are quoted only when needed, strings are
//!   escaped, and nested conditions are parenthesized by precedence
//! - **Logging**: rendered and rejected statements are reported as `tracing`
//!   events on target `spanql.sql`
//!
//! ## Statements
//!
//! ```ignore
//! use spanql::prelude::*;
//!
//! // SELECT
//! let sql = spanql::select("Singers", ["SingerId", "FirstName"])
//!     .and_where(eq(ident(["LastName"]), "Richards"))
//!     .order_by("FirstName", Direction::Asc)
//!     .limit(10)
//!     .sql()?;
//!
//! // INSERT
//! let sql = spanql::insert("Singers", ["SingerId", "FirstName"])
//!     .values([(1, "Marc"), (2, "Catalina")])
//!     .sql()?;
//!
//! // UPDATE
//! let sql = spanql::update("Singers")
//!     .set("FirstName", param("name"))
//!     .and_where(eq(ident(["SingerId"]), 1))
//!     .sql()?;
//!
//! // DELETE
//! let sql = spanql::delete("Singers")
//!     .and_where(in_list(ident(["SingerId"]), [1, 2]))
//!     .sql()?;
//! ```
//!
//! The produced text is handed to whatever executes it; this crate does not
//! talk to a database.

pub mod cond;
pub mod config;
pub mod encode;
pub mod error;
pub mod expr;
pub mod ident;
mod log;
pub mod prelude;
pub mod render;
pub mod stmt;

pub use config::RenderConfig;
pub use encode::{IntoRow, Record, Row, ToExpr, encode_record, encode_row};
pub use error::{SqlError, SqlResult};
pub use expr::{BinaryOp, Condition, Expr, Literal, UnaryOp};
pub use ident::{Ident, ident};
pub use render::expr_to_sql;
pub use stmt::{
    Assignment, DeleteStmt, Direction, InsertStmt, Ordering, SelectStmt, Statement,
    StatementKind, UpdateStmt, WhereClause, delete, insert, select, update,
};

#[cfg(feature = "derive")]
pub use spanql_derive::Record;
