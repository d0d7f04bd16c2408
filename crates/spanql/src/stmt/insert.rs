//! INSERT statement builder.

use crate::encode::{IntoRow, Record, Row};
use crate::error::{SqlError, SqlResult};
use crate::render;
use crate::stmt::traits::{Statement, StatementKind};

/// INSERT statement builder.
///
/// Rows are encoded against the column list as soon as they are supplied;
/// the first encoding failure is kept and reported by `sql()`.
#[derive(Clone, Debug)]
pub struct InsertStmt {
    /// Table name
    table: String,
    /// Column names
    columns: Vec<String>,
    /// Encoded VALUES rows, `None` until `values` is called
    rows: Option<SqlResult<Vec<Row>>>,
}

impl InsertStmt {
    /// Create a new INSERT builder.
    pub fn new<I, S>(table: &str, columns: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            table: table.to_string(),
            columns: columns.into_iter().map(Into::into).collect(),
            rows: None,
        }
    }

    /// Create an INSERT builder whose columns are the mapped columns of `R`.
    pub fn for_record<R: Record>(table: &str) -> Self {
        Self::new(table, R::columns().iter().copied())
    }

    /// Supply the VALUES rows, replacing any previously supplied ones.
    ///
    /// Each source is encoded against the column list right away: records
    /// are looked up by column name, sequences and tuples are taken in order.
    pub fn values<R, I>(mut self, rows: I) -> Self
    where
        R: IntoRow,
        I: IntoIterator<Item = R>,
    {
        let encoded = rows
            .into_iter()
            .map(|row| row.into_row(&self.columns))
            .collect::<SqlResult<Vec<Row>>>();
        self.rows = Some(encoded);
        self
    }

    pub fn table(&self) -> &str {
        &self.table
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    /// Encoded rows, or `None` if no rows were supplied or encoding failed.
    pub fn rows(&self) -> Option<&[Row]> {
        match &self.rows {
            Some(Ok(rows)) => Some(rows),
            _ => None,
        }
    }
}

impl Statement for InsertStmt {
    const KIND: StatementKind = StatementKind::Insert;

    fn validate(&self) -> SqlResult<()> {
        if self.columns.is_empty() {
            return Err(SqlError::NoColumnsSpecified);
        }
        let rows = match &self.rows {
            None => return Err(SqlError::NoInputSpecified),
            Some(Err(err)) => return Err(err.clone()),
            Some(Ok(rows)) => rows,
        };
        if rows.is_empty() {
            return Err(SqlError::EmptyValues);
        }
        for (i, row) in rows.iter().enumerate() {
            if row.len() != self.columns.len() {
                return Err(SqlError::ColumnCountMismatch {
                    row: i,
                    expected: self.columns.len(),
                    actual: row.len(),
                });
            }
        }
        Ok(())
    }

    fn build_sql(&self) -> SqlResult<String> {
        let rows = match &self.rows {
            Some(Ok(rows)) => rows.as_slice(),
            Some(Err(err)) => return Err(err.clone()),
            None => return Err(SqlError::NoInputSpecified),
        };

        let mut sql = String::from("INSERT INTO ");
        render::write_name(&self.table, &mut sql)?;

        sql.push_str(" (");
        for (i, column) in self.columns.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            render::write_name(column, &mut sql)?;
        }
        sql.push_str(") VALUES ");

        for (i, row) in rows.iter().enumerate() {
            if i > 0 {
                sql.push_str(", ");
            }
            sql.push('(');
            render::write_expr_list(row, &mut sql)?;
            sql.push(')');
        }

        Ok(sql)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::param;

    #[test]
    fn test_simple_insert() {
        let sql = InsertStmt::new("Singers", ["SingerId", "FirstName"])
            .values([(1, "Marc"), (2, "Catalina")])
            .sql()
            .unwrap();
        assert_eq!(
            sql,
            r#"INSERT INTO Singers (SingerId, FirstName) VALUES (1, "Marc"), (2, "Catalina")"#
        );
    }

    #[test]
    fn test_insert_sequence_rows() {
        let sql = InsertStmt::new("t", ["a", "b"])
            .values([vec![param("a"), param("b")]])
            .sql()
            .unwrap();
        assert_eq!(sql, "INSERT INTO t (a, b) VALUES (@a, @b)");
    }

    #[test]
    fn test_values_replaces_previous_rows() {
        let sql = InsertStmt::new("t", ["a"])
            .values([(1,)])
            .values([(2,), (3,)])
            .sql()
            .unwrap();
        assert_eq!(sql, "INSERT INTO t (a) VALUES (2), (3)");
    }

    #[test]
    fn test_insert_without_values() {
        let err = InsertStmt::new("t", ["a"]).sql().unwrap_err();
        assert_eq!(err, SqlError::NoInputSpecified);
    }

    #[test]
    fn test_insert_with_empty_values() {
        let rows: Vec<(i64,)> = Vec::new();
        let err = InsertStmt::new("t", ["a"]).values(rows).sql().unwrap_err();
        assert_eq!(err, SqlError::EmptyValues);
    }

    #[test]
    fn test_insert_without_columns() {
        let columns: [&str; 0] = [];
        let err = InsertStmt::new("t", columns).values([(1,)]).sql().unwrap_err();
        assert_eq!(err, SqlError::NoColumnsSpecified);
    }

    #[test]
    fn test_row_length_checked_at_render() {
        let stmt = InsertStmt::new("t", ["a", "b"]).values([vec![1, 2], vec![3]]);
        assert!(stmt.rows().is_some());
        assert_eq!(
            stmt.sql().unwrap_err(),
            SqlError::ColumnCountMismatch {
                row: 1,
                expected: 2,
                actual: 1
            }
        );
    }

    #[test]
    fn test_encoding_error_is_deferred() {
        let stmt = InsertStmt::new("t", ["a"]).values([(u64::MAX,)]);
        assert!(stmt.rows().is_none());
        assert!(matches!(
            stmt.sql().unwrap_err(),
            SqlError::IntegerOutOfRange(_)
        ));
    }
}
