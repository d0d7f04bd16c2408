//! DELETE statement builder.

use crate::error::{SqlError, SqlResult};
use crate::expr::Condition;
use crate::render;
use crate::stmt::filter::WhereClause;
use crate::stmt::traits::{Statement, StatementKind};

/// DELETE statement builder.
///
/// A WHERE clause is required.
#[derive(Clone, Debug)]
pub struct DeleteStmt {
    table: String,
    where_clause: WhereClause,
}

impl DeleteStmt {
    /// Create a new DELETE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            where_clause: WhereClause::new(),
        }
    }

    /// Add a condition (ANDed with the existing ones).
    pub fn and_where(mut self, cond: Condition) -> Self {
        self.where_clause.push(cond);
        self
    }

    /// Add several conditions (ANDed with the existing ones).
    pub fn and_where_all(mut self, conds: impl IntoIterator<Item = Condition>) -> Self {
        self.where_clause.extend(conds);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn where_clause(&self) -> &WhereClause {
        &self.where_clause
    }
}

impl Statement for DeleteStmt {
    const KIND: StatementKind = StatementKind::Delete;

    fn validate(&self) -> SqlResult<()> {
        if self.where_clause.is_empty() {
            return Err(SqlError::NoWhereClause);
        }
        Ok(())
    }

    fn build_sql(&self) -> SqlResult<String> {
        let mut sql = String::from("DELETE FROM ");
        render::write_name(&self.table, &mut sql)?;
        self.where_clause.write_sql(&mut sql)?;
        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::cond::{eq, in_list};
    use crate::ident::ident;

    #[test]
    fn test_simple_delete() {
        let sql = DeleteStmt::new("Singers")
            .and_where(eq(ident(["SingerId"]), 1))
            .sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM Singers WHERE SingerId = 1");
    }

    #[test]
    fn test_delete_in_list() {
        let sql = DeleteStmt::new("Singers")
            .and_where(in_list(ident(["SingerId"]), [1, 2, 3]))
            .sql()
            .unwrap();
        assert_eq!(sql, "DELETE FROM Singers WHERE SingerId IN (1, 2, 3)");
    }

    #[test]
    fn test_delete_without_where() {
        let err = DeleteStmt::new("Singers").sql().unwrap_err();
        assert_eq!(err, SqlError::NoWhereClause);
    }
}
