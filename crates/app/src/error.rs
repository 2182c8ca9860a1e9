//! Application error types.

use domain::{DomainError, RepositoryError};
use event_dispatcher::InvalidDeliveryPolicy;
use thiserror::Error;

/// Errors that stop the shop binary.
#[derive(Debug, Error)]
pub enum AppError {
    /// The environment holds an invalid setting.
    #[error("Configuration error: {0}")]
    Config(#[from] InvalidDeliveryPolicy),

    /// Could not connect to the database.
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    /// The metrics recorder could not be installed.
    #[error("Metrics error: {0}")]
    Metrics(#[from] metrics_exporter_prometheus::BuildError),

    /// Migrations failed to run.
    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),

    /// A domain operation failed.
    #[error(transparent)]
    Domain(#[from] DomainError),
}

impl From<RepositoryError> for AppError {
    fn from(err: RepositoryError) -> Self {
        AppError::Domain(err.into())
    }
}

/// Result type for application operations.
pub type Result<T> = std::result::Result<T, AppError>;
