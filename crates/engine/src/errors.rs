use crate::shared::datasource::DataSourceError;
use thiserror::Error;

/// Ошибки ядра дашборда
#[derive(Debug, Error)]
pub enum EngineError {
    /// Required filter fields missing before a write. Surfaced once to the
    /// caller, never retried.
    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Data source error: {0}")]
    DataSource(#[from] DataSourceError),
}
