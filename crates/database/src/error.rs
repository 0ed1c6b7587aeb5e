use std::time::Duration;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum DbError {
    #[error("Database configuration is incomplete: {0}")]
    ConnectionConfigError(String),

    #[error("Failed to connect to the database: {0}")]
    ConnectionError(#[source] sqlx::Error),

    #[error("Timed out connecting to the database after {0:?}")]
    ConnectTimeout(Duration),

    #[error("Database query failed: {0}")]
    QueryError(#[from] sqlx::Error),

    #[error("Failed to record the transaction: {0}")]
    PersistenceError(#[source] sqlx::Error),

    #[error("Database migration failed: {0}")]
    MigrationError(#[from] sqlx::migrate::MigrateError),
}

impl DbError {
    /// True when the store could not be reached at all (missing settings,
    /// refused or timed-out connection), as opposed to a failing statement.
    pub fn is_unavailable(&self) -> bool {
        matches!(
            self,
            DbError::ConnectionConfigError(_) | DbError::ConnectionError(_) | DbError::ConnectTimeout(_)
        )
    }
}
