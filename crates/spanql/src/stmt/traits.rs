//! Trait definitions for statement builders.

use crate::config::RenderConfig;
use crate::error::SqlResult;
use crate::log;

/// The kind of statement being built.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StatementKind {
    Select,
    Insert,
    Update,
    Delete,
}

impl StatementKind {
    pub fn as_str(self) -> &'static str {
        match self {
            StatementKind::Select => "SELECT",
            StatementKind::Insert => "INSERT",
            StatementKind::Update => "UPDATE",
            StatementKind::Delete => "DELETE",
        }
    }
}

/// Base trait for all statement builders.
///
/// Rendering is idempotent and side-effect free apart from logging; a
/// statement can be rendered any number of times.
pub trait Statement {
    /// Which statement this builder produces.
    const KIND: StatementKind;

    /// Check that the required clauses are present.
    fn validate(&self) -> SqlResult<()>;

    /// Assemble and render the SQL text, assuming `validate` passed.
    fn build_sql(&self) -> SqlResult<String>;

    /// Validate and render with the default [`RenderConfig`].
    fn sql(&self) -> SqlResult<String> {
        self.sql_with(&RenderConfig::default())
    }

    /// Validate and render, logging the outcome as configured.
    fn sql_with(&self, config: &RenderConfig) -> SqlResult<String> {
        let result = self.validate().and_then(|()| self.build_sql());
        match &result {
            Ok(sql) => log::rendered(config, Self::KIND, sql),
            Err(err) => log::rejected(config, Self::KIND, err),
        }
        result
    }
}
