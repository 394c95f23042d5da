use configuration::error::ConfigError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AnalyticsError {
    #[error("The benchmark tables cannot drive the ROI engine: {0}")]
    InvalidTables(#[from] ConfigError),
}
