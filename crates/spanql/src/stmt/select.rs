//! SELECT statement builder.

use std::fmt::Write as _;

use crate::error::{SqlError, SqlResult};
use crate::expr::Condition;
use crate::ident::Ident;
use crate::render;
use crate::stmt::filter::WhereClause;
use crate::stmt::traits::{Statement, StatementKind};

/// Sort direction of an ORDER BY item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Direction {
    #[default]
    Asc,
    Desc,
}

impl Direction {
    pub fn as_str(self) -> &'static str {
        match self {
            Direction::Asc => "ASC",
            Direction::Desc => "DESC",
        }
    }
}

/// One ORDER BY item.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Ordering {
    pub column: Ident,
    pub direction: Direction,
}

/// SELECT statement builder.
#[derive(Clone, Debug)]
pub struct SelectStmt {
    table: String,
    columns: Vec<String>,
    where_clause: WhereClause,
    orderings: Vec<Ordering>,
    limit: Option<u64>,
    offset: Option<u64>,
}

impl SelectStmt {
    /// Create a new SELECT builder for a table and its projected columns.
    pub fn new<I, S>(table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            where_clause: WhereClause::new(),
            orderings: Vec::new(),
            limit: None,
            offset: None,
        }
    }

    // ==================== WHERE ====================

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

    // ==================== ORDER BY ====================

    /// Append an ORDER BY item.
    pub fn order_by(mut self, column: impl Into<Ident>, direction: Direction) -> Self {
        self.orderings.push(Ordering {
            column: column.into(),
            direction,
        });
        self
    }

    pub fn order_by_asc(self, column: impl Into<Ident>) -> Self {
        self.order_by(column, Direction::Asc)
    }

    pub fn order_by_desc(self, column: impl Into<Ident>) -> Self {
        self.order_by(column, Direction::Desc)
    }

    // ==================== Pagination ====================

    /// Set LIMIT. A later call replaces an earlier one.
    pub fn limit(mut self, n: u64) -> Self {
        self.limit = Some(n);
        self
    }

    /// Set OFFSET. Rendering fails unless a LIMIT is also set.
    ///
    /// Both LIMIT and OFFSET are INT64 in Spanner; larger values fail with
    /// `IntegerOutOfRange` at render time.
    pub fn offset(mut self, n: u64) -> Self {
        self.offset = Some(n);
        self
    }

    /// Pagination helper.
    ///
    /// `page` is 1-based (clamped to >= 1).
    /// `per_page` is clamped to >= 1.
    /// An offset past `u64::MAX` saturates and is rejected at render time.
    pub fn paginate(mut self, page: u64, per_page: u64) -> Self {
        let p = page.max(1);
        let size = per_page.max(1);
        self.limit = Some(size);
        self.offset = Some((p - 1).saturating_mul(size));
        self
    }

    // ==================== Accessors ====================

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn where_clause(&self) -> &WhereClause {
        &self.where_clause
    }

    pub fn orderings(&self) -> &[Ordering] {
        &self.orderings
    }
}

impl Statement for SelectStmt {
    const KIND: StatementKind = StatementKind::Select;

    fn validate(&self) -> SqlResult<()> {
        if self.columns.is_empty() {
            return Err(SqlError::NoColumnsSpecified);
        }
        if self.offset.is_some() && self.limit.is_none() {
            return Err(SqlError::OffsetWithoutLimit);
        }
        for n in self.limit.iter().chain(self.offset.iter()) {
            i64::try_from(*n).map_err(|_| SqlError::IntegerOutOfRange(n.to_string()))?;
        }
        Ok(())
    }

    fn build_sql(&self) -> SqlResult<String> {
        let mut sql = String::from("SELECT ");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            render::write_name(column, &mut sql)?;
        }

        sql.push_str(" FROM ");
        render::write_name(&self.table, &mut sql)?;

        self.where_clause.write_sql(&mut sql)?;

        if !self.orderings.is_empty() {
            sql.push_str(" ORDER BY ");
            for (i, ordering) in self.orderings.iter().enumerate() {
                if i > 0 {
                    sql.push_str(", ");
                }
                ordering.column.write_sql(&mut sql)?;
                sql.push(' ');
                sql.push_str(ordering.direction.as_str());
            }
        }

        if let Some(limit) = self.limit {
            let _ = write!(sql, " LIMIT {limit}");
        }
        if let Some(offset) = self.offset {
            let _ = write!(sql, " OFFSET {offset}");
        }

        Ok(sql)
    }
}
