//! WHERE clause shared by SELECT, UPDATE and DELETE.

use crate::cond::and;
use crate::error::SqlResult;
use crate::expr::Condition;
use crate::render;

/// Conditions to be ANDed together, in the order they were added.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct WhereClause {
    conds: Vec<Condition>,
}

impl WhereClause {
    /// Create a new empty WHERE clause.
    pub fn new() -> Self {
        Self { conds: Vec::new() }
    }

    /// Check if no condition was added.
    pub fn is_empty(&self) -> bool {
        self.conds.is_empty()
    }

    /// Add a condition to be ANDed.
    pub fn push(&mut self, cond: Condition) {
        self.conds.push(cond);
    }

    /// Add several conditions to be ANDed.
    pub fn extend(&mut self, conds: impl IntoIterator<Item = Condition>) {
        self.conds.extend(conds);
    }

    /// Get all conditions.
    pub fn conditions(&self) -> &[Condition] {
        &self.conds
    }

    /// The combined condition, or `None` if the clause is empty.
    pub fn condition(&self) -> Option<Condition> {
        if self.conds.is_empty() {
            return None;
        }
        Some(and(self.conds.iter().cloned()))
    }

    /// Append ` WHERE <cond>` if any condition was added.
    pub(crate) fn write_sql(&self, out: &mut String) -> SqlResult<()> {
        if let Some(cond) = self.condition() {
            out.push_str(" WHERE ");
            render::write_expr(&cond, out)?;
        }
        Ok(())
    }
}
