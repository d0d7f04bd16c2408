//! `tracing` events for rendered and rejected statements.

use tracing::Level;

use crate::config::RenderConfig;
use crate::error::SqlError;
use crate::stmt::StatementKind;

/// Dispatch a tracing event at a runtime-determined level.
macro_rules! emit_at_level {
    ($level:expr, $($field:tt)*) => {
        match $level {
            Level::ERROR => tracing::error!($($field)*),
            Level::WARN  => tracing::warn!($($field)*),
            Level::INFO  => tracing::info!($($field)*),
            Level::DEBUG => tracing::debug!($($field)*),
            Level::TRACE => tracing::trace!($($field)*),
        }
    };
}

pub(crate) fn truncate_sql_bytes(sql: &str, max_bytes: usize) -> &str {
    if sql.len() <= max_bytes {
        return sql;
    }
    let mut end = max_bytes;
    while end > 0 && !sql.is_char_boundary(end) {
        end -= 1;
    }
    &sql[..end]
}

fn truncate_sql(config: &RenderConfig, sql: &str) -> String {
    match config.max_sql_length {
        Some(max) if sql.len() > max => format!("{}...", truncate_sql_bytes(sql, max)),
        _ => sql.to_string(),
    }
}

pub(crate) fn rendered(config: &RenderConfig, kind: StatementKind, sql: &str) {
    if !config.logging_enabled {
        return;
    }
    let sql = truncate_sql(config, sql);
    emit_at_level!(
        config.log_level,
        target: "spanql.sql",
        kind = kind.as_str(),
        sql = %sql,
        "rendered statement"
    );
}

pub(crate) fn rejected(config: &RenderConfig, kind: StatementKind, err: &SqlError) {
    if !config.logging_enabled {
        return;
    }
    emit_at_level!(
        config.log_level,
        target: "spanql.sql",
        kind = kind.as_str(),
        error = %err,
        "statement rejected"
    );
}
