//! Statement builders for SELECT, INSERT, UPDATE and DELETE.
//!
//! Builders are plain owned values. Every clause method consumes the builder
//! and returns the extended one; to branch from a common prefix, `clone()` it
//! (a deep copy, so the branches never observe each other's clauses).
//! Nothing is validated until [`Statement::sql`] is called, which checks the
//! required clauses, assembles the expression tree and renders it.
//!
//! # Safe defaults
//!
//! - UPDATE requires SET and WHERE
//! - DELETE requires WHERE
//!
//! # Usage
//!
//! ```ignore
//! use spanql::prelude::*;
//!
//! let sql = spanql::update("Singers")
//!     .set("FirstName", "Marc")
//!     .and_where(eq(ident(["SingerId"]), param("id")))
//!     .sql()?;
//! // UPDATE Singers SET FirstName = "Marc" WHERE SingerId = @id
//! ```

mod delete;
mod filter;
mod insert;
mod select;
mod traits;
mod update;

pub use delete::DeleteStmt;
pub use filter::WhereClause;
pub use insert::InsertStmt;
pub use select::{Direction, Ordering, SelectStmt};
pub use traits::{Statement, StatementKind};
pub use update::{Assignment, UpdateStmt};

/// Create a SELECT statement builder for the given table and columns.
///
/// # Example
/// ```ignore
/// let stmt = spanql::select("Singers", ["SingerId", "FirstName"]).limit(10);
/// ```
pub fn select<I, S>(table: &str, columns: I) -> SelectStmt
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    SelectStmt::new(table, columns)
}

/// Create an INSERT statement builder for the given table and columns.
///
/// # Example
/// ```ignore
/// let stmt = spanql::insert("Singers", ["SingerId", "FirstName"])
///     .values([(1, "Marc"), (2, "Catalina")]);
/// ```
pub fn insert<I, S>(table: &str, columns: I) -> InsertStmt
where
    I: IntoIterator<Item = S>,
    S: Into<String>,
{
    InsertStmt::new(table, columns)
}

/// Create an UPDATE statement builder for the given table.
///
/// # Example
/// ```ignore
/// let stmt = spanql::update("Singers")
///     .set("FirstName", "Marc")
///     .and_where(eq(ident(["SingerId"]), 1));
/// ```
pub fn update(table: &str) -> UpdateStmt {
    UpdateStmt::new(table)
}

/// Create a DELETE statement builder for the given table.
///
/// # Safety
/// Rendering a DELETE without WHERE conditions fails with
/// [`SqlError::NoWhereClause`](crate::SqlError::NoWhereClause).
///
/// # Example
/// ```ignore
/// let stmt = spanql::delete("Singers").and_where(eq(ident(["SingerId"]), 1));
/// ```
pub fn delete(table: &str) -> DeleteStmt {
    DeleteStmt::new(table)
}
