use crate::error::DbError;
use configuration::DatabaseSettings;
use sqlx::mysql::{MySqlConnectOptions, MySqlConnection, MySqlSslMode};
use sqlx::{ConnectOptions, Connection, Executor};
use std::fmt;
use std::ops::{Deref, DerefMut};
use std::time::Duration;

/// Upper bound on establishing a connection (TCP, TLS and authentication).
pub const CONNECT_TIMEOUT: Duration = Duration::from_secs(10);

/// Hands out one MySQL connection per unit of work.
///
/// The provider only holds settings. Nothing is opened until [`acquire`] is
/// called, and nothing is shared between callers.
///
/// [`acquire`]: ConnectionProvider::acquire
#[derive(Debug, Clone)]
pub struct ConnectionProvider {
    settings: DatabaseSettings,
}

impl ConnectionProvider {
    pub fn new(settings: DatabaseSettings) -> Self {
        Self { settings }
    }

    pub fn settings(&self) -> &DatabaseSettings {
        &self.settings
    }

    fn connect_options(&self) -> MySqlConnectOptions {
        MySqlConnectOptions::new()
            .host(&self.settings.host)
            .port(self.settings.port)
            .username(&self.settings.user)
            .password(&self.settings.password)
            .database(&self.settings.name)
            // Encrypted, with both the certificate chain and the host name checked.
            .ssl_mode(MySqlSslMode::VerifyIdentity)
    }

    /// Opens a new connection with auto-commit disabled.
    ///
    /// Fails without touching the network when any of host, user, password or
    /// database name is missing.
    pub async fn acquire(&self) -> Result<ScopedConnection, DbError> {
        if !self.settings.is_complete() {
            tracing::error!(settings = ?self.settings, "Database settings are incomplete.");
            return Err(DbError::ConnectionConfigError(
                "DB_HOST, DB_USER, DB_PASSWORD and DB_NAME must all be set".to_string(),
            ));
        }

        let options = self.connect_options();
        let mut conn = tokio::time::timeout(CONNECT_TIMEOUT, options.connect())
            .await
            .map_err(|_| {
                tracing::error!(host = %self.settings.host, "Database connection timed out.");
                DbError::ConnectTimeout(CONNECT_TIMEOUT)
            })?
            .map_err(|e| {
                tracing::error!(host = %self.settings.host, error = %e, "Database connection failed.");
                DbError::ConnectionError(e)
            })?;

        conn.execute("SET autocommit = 0")
            .await
            .map_err(DbError::ConnectionError)?;

        Ok(ScopedConnection { inner: conn })
    }
}

/// A connection owned by a single request.
///
/// Call [`release`](ScopedConnection::release) to close it gracefully. If the
/// value is dropped instead (early return, panic, cancelled future) the socket
/// is closed on drop and the server discards any uncommitted work.
pub struct ScopedConnection {
    inner: MySqlConnection,
}

impl fmt::Debug for ScopedConnection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ScopedConnection").finish_non_exhaustive()
    }
}

impl ScopedConnection {
    pub async fn release(self) {
        if let Err(e) = self.inner.close().await {
            tracing::warn!(error = %e, "Error while closing database connection.");
        }
    }
}

impl Deref for ScopedConnection {
    type Target = MySqlConnection;

    fn deref(&self) -> &Self::Target {
        &self.inner
    }
}

impl DerefMut for ScopedConnection {
    fn deref_mut(&mut self) -> &mut Self::Target {
        &mut self.inner
    }
}

/// Applies the schema migrations bundled with this crate.
///
/// Only run on demand; the catalog is managed outside this service.
pub async fn run_migrations(provider: &ConnectionProvider) -> Result<(), DbError> {
    let mut conn = provider.acquire().await?;
    let result = sqlx::migrate!("./migrations").run(&mut *conn).await;
    conn.release().await;
    result?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn settings(host: &str, port: u16) -> DatabaseSettings {
        DatabaseSettings {
            host: host.to_string(),
            user: "pos".to_string(),
            password: "secret".to_string(),
            name: "pos_db".to_string(),
            port,
        }
    }

    #[tokio::test]
    async fn incomplete_settings_fail_before_connecting() {
        let mut incomplete = settings("db.invalid", 3306);
        incomplete.password.clear();

        let err = ConnectionProvider::new(incomplete).acquire().await.unwrap_err();
        assert!(matches!(err, DbError::ConnectionConfigError(_)));
        assert!(err.is_unavailable());
    }

    #[tokio::test]
    async fn refused_connection_is_reported_as_unreachable() {
        // Nothing listens on port 1 locally, so the connect is refused at once.
        let err = ConnectionProvider::new(settings("127.0.0.1", 1))
            .acquire()
            .await
            .unwrap_err();

        assert!(matches!(err, DbError::ConnectionError(_)), "got {err:?}");
        assert!(err.is_unavailable());
    }

    #[test]
    fn statement_failures_are_not_unavailability() {
        assert!(!DbError::QueryError(sqlx::Error::RowNotFound).is_unavailable());
        assert!(!DbError::PersistenceError(sqlx::Error::RowNotFound).is_unavailable());
    }
}
