//! UPDATE statement builder.

use crate::encode::{ToExpr, encode_or_invalid};
use crate::error::{SqlError, SqlResult};
use crate::expr::{Condition, Expr};
use crate::ident::Ident;
use crate::render;
use crate::stmt::filter::WhereClause;
use crate::stmt::traits::{Statement, StatementKind};

/// One `target = value` entry of the SET clause.
#[derive(Clone, Debug, PartialEq)]
pub struct Assignment {
    pub target: Ident,
    pub value: Expr,
}

/// UPDATE statement builder.
///
/// Both a SET and a WHERE clause are required. To update every row, say so
/// explicitly with `and_where(bool_lit(true))`.
#[derive(Clone, Debug)]
pub struct UpdateStmt {
    /// Table name
    table: String,
    /// SET clauses, in call order
    assignments: Vec<Assignment>,
    /// WHERE conditions
    where_clause: WhereClause,
}

impl UpdateStmt {
    /// Create a new UPDATE builder.
    pub fn new(table: &str) -> Self {
        Self {
            table: table.to_string(),
            assignments: Vec::new(),
            where_clause: WhereClause::new(),
        }
    }

    /// Append `target = value` to the SET clause.
    ///
    /// Assignments keep their call order; setting the same target twice
    /// renders two entries.
    pub fn set(mut self, target: impl Into<Ident>, value: impl ToExpr) -> Self {
        self.assignments.push(Assignment {
            target: target.into(),
            value: encode_or_invalid(&value),
        });
        self
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

    pub fn assignments(&self) -> &[Assignment] {
        &self.assignments
    }

    pub fn where_clause(&self) -> &WhereClause {
        &self.where_clause
    }
}

impl Statement for UpdateStmt {
    const KIND: StatementKind = StatementKind::Update;

    fn validate(&self) -> SqlResult<()> {
        if self.assignments.is_empty() {
            return Err(SqlError::NoSetClause);
        }
        if self.where_clause.is_empty() {
            return Err(SqlError::NoWhereClause);
        }
        Ok(())
    }

    fn build_sql(&self) -> SqlResult<String> {
        let mut sql = String::from("UPDATE ");
        render::write_name(&self.table, &mut sql)?;

        sql.push_str(" SET ");
        for (i, assignment) in self.assignments.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            assignment.target.write_sql(&mut sql)?;
            sql.push_str(" = ");
            render::write_comparison_operand(&assignment.value, &mut sql)?;
        }

        self.where_clause.write_sql(&mut sql)?;
        Ok(sql)
    }
}
