use thiserror::Error;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read the benchmark tables: {0}")]
    LoadError(#[from] config::ConfigError),

    /// A loaded table holds a value the ROI engine cannot work with.
    #[error("Invalid value in table [{table}]: {reason}")]
    ValidationError { table: String, reason: String },
}

impl ConfigError {
    pub(crate) fn invalid(table: &str, reason: impl Into<String>) -> Self {
        ConfigError::ValidationError {
            table: table.to_string(),
            reason: reason.into(),
        }
    }
}
