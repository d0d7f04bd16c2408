//! Error types for spanql

use thiserror::Error;

/// Result type alias for spanql operations
pub type SqlResult<T> = Result<T, SqlError>;

/// Errors raised while encoding values or rendering statements.
///
/// Every variant is a deterministic, local validation failure: fix the call
/// site and rebuild the statement.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SqlError {
    /// An identifier with zero segments, or an empty table/column name
    #[error("empty identifier")]
    EmptyIdentifier,

    /// An identifier segment that cannot be expressed even when quoted
    #[error("invalid identifier: {0:?}")]
    InvalidIdentifier(String),

    /// SELECT/INSERT without any column
    #[error("no columns specified")]
    NoColumnsSpecified,

    /// INSERT given an empty set of rows
    #[error("empty values")]
    EmptyValues,

    /// INSERT without any VALUES input
    #[error("neither VALUES nor SELECT specified")]
    NoInputSpecified,

    /// A value whose type has no SQL literal form
    #[error("unsupported type: {0}")]
    UnsupportedType(String),

    /// An integer that does not fit into INT64
    #[error("integer out of INT64 range: {0}")]
    IntegerOutOfRange(String),

    /// A row source that is neither an ordered sequence nor a keyed record
    #[error("{0} is neither a record nor a sequence")]
    InvalidRowShape(String),

    /// A record without a field mapped to the requested column
    #[error("type {record_type} does not have column {column}")]
    ColumnNotFound { column: String, record_type: String },

    /// A VALUES row whose length differs from the column list
    #[error("row {row} has {actual} values but {expected} columns were specified")]
    ColumnCountMismatch {
        row: usize,
        expected: usize,
        actual: usize,
    },

    /// A query parameter name that is not a valid identifier
    #[error("invalid parameter name: {0:?}")]
    InvalidParameterName(String),

    /// UPDATE without SET
    #[error("UPDATE without SET clause")]
    NoSetClause,

    /// UPDATE/DELETE without WHERE
    #[error("statement without WHERE clause")]
    NoWhereClause,

    /// OFFSET given without LIMIT
    #[error("OFFSET requires LIMIT")]
    OffsetWithoutLimit,
}

impl SqlError {
    /// Create an unsupported type error for the given type name
    pub fn unsupported(type_name: impl Into<String>) -> Self {
        Self::UnsupportedType(type_name.into())
    }

    /// Create a column-not-found error
    pub fn column_not_found(column: impl Into<String>, record_type: impl Into<String>) -> Self {
        Self::ColumnNotFound {
            column: column.into(),
            record_type: record_type.into(),
        }
    }

    /// Check if this error comes from encoding a value (as opposed to
    /// statement structure)
    pub fn is_encoding(&self) -> bool {
        matches!(
            self,
            Self::UnsupportedType(_)
                | Self::IntegerOutOfRange(_)
                | Self::InvalidRowShape(_)
                | Self::ColumnNotFound { .. }
        )
    }

    /// Check if this error is a missing-clause safety guard
    pub fn is_missing_clause(&self) -> bool {
        matches!(
            self,
            Self::NoColumnsSpecified
                | Self::NoInputSpecified
                | Self::EmptyValues
                | Self::NoSetClause
                | Self::NoWhereClause
        )
    }
}
