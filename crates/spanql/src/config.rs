use tracing::Level;

/// Configuration for rendering statements.
///
/// Rendering itself has no knobs; this only controls the `tracing` events
/// emitted by `sql()`.
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Whether rendered/rejected statements are logged.
    pub logging_enabled: bool,
    /// Tracing event level to emit at.
    pub log_level: Level,
    /// Truncate logged SQL (in bytes, on a char boundary). `None` means no truncation.
    pub max_sql_length: Option<usize>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            logging_enabled: true,
            log_level: Level::DEBUG,
            max_sql_length: Some(200),
        }
    }
}

impl RenderConfig {
    /// Create a new configuration with defaults (DEBUG, truncated at 200 bytes).
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the tracing event level.
    pub fn with_log_level(mut self, level: Level) -> Self {
        self.log_level = level;
        self
    }

    /// Set maximum SQL length to log.
    pub fn with_max_sql_length(mut self, len: usize) -> Self {
        self.max_sql_length = Some(len);
        self
    }

    /// Disable SQL truncation.
    pub fn no_truncate(mut self) -> Self {
        self.max_sql_length = None;
        self
    }

    /// Disable logging.
    pub fn disable_logging(mut self) -> Self {
        self.logging_enabled = false;
        self
    }
}
