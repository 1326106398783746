//! Startup schema migration with connect retry.
//!
//! Migrations are embedded at build time and applied over a blocking
//! `PgConnection` on tokio's blocking pool. Connecting is retried with a
//! linearly growing delay so the service can start before the database is
//! ready to accept connections.

use std::time::Duration;

use diesel::Connection;
use diesel::pg::PgConnection;
use diesel_migrations::{EmbeddedMigrations, MigrationHarness, embed_migrations};
use tracing::{info, warn};

const MIGRATIONS: EmbeddedMigrations = embed_migrations!("migrations");

/// Errors raised while preparing the schema.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum MigrationError {
    /// Every connection attempt failed.
    #[error("failed to connect to database after {attempts} attempts: {message}")]
    Connect { attempts: u32, message: String },
    /// A migration failed to apply.
    #[error("failed to apply migrations: {message}")]
    Apply { message: String },
    /// The blocking task panicked or was cancelled.
    #[error("migration task failed: {message}")]
    Task { message: String },
}

/// How often and how patiently to retry the initial connection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ConnectRetry {
    attempts: u32,
    base_delay: Duration,
    step: Duration,
}

impl Default for ConnectRetry {
    fn default() -> Self {
        Self {
            attempts: 5,
            base_delay: Duration::from_secs(1),
            step: Duration::from_secs(1),
        }
    }
}

impl ConnectRetry {
    /// Retry policy with the default delays and the given attempt count.
    /// At least one attempt is always made.
    #[must_use]
    pub fn with_attempts(attempts: u32) -> Self {
        Self {
            attempts: attempts.max(1),
            ..Self::default()
        }
    }

    /// Override the delay schedule.
    #[must_use]
    pub fn with_delays(mut self, base_delay: Duration, step: Duration) -> Self {
        self.base_delay = base_delay;
        self.step = step;
        self
    }

    /// Total number of connection attempts.
    #[must_use]
    pub fn attempts(&self) -> u32 {
        self.attempts
    }

    /// Wait after the zero-based failed attempt `attempt`.
    #[must_use]
    pub fn delay_after(&self, attempt: u32) -> Duration {
        self.base_delay + self.step * attempt
    }
}

/// Connect with retry and apply every pending migration.
///
/// # Errors
///
/// [`MigrationError::Connect`] once every attempt has failed,
/// [`MigrationError::Apply`] when a migration fails.
pub async fn run_pending_migrations(
    database_url: &str,
    retry: ConnectRetry,
) -> Result<(), MigrationError> {
    let url = database_url.to_owned();
    tokio::task::spawn_blocking(move || migrate_blocking(&url, retry))
        .await
        .map_err(|err| MigrationError::Task {
            message: err.to_string(),
        })?
}

fn migrate_blocking(database_url: &str, retry: ConnectRetry) -> Result<(), MigrationError> {
    let mut conn = connect_with_retry(database_url, retry)?;
    let applied = conn
        .run_pending_migrations(MIGRATIONS)
        .map_err(|err| MigrationError::Apply {
            message: err.to_string(),
        })?;
    info!(applied = applied.len(), "database migrations applied");
    Ok(())
}

fn connect_with_retry(
    database_url: &str,
    retry: ConnectRetry,
) -> Result<PgConnection, MigrationError> {
    let mut attempt = 0;
    loop {
        match PgConnection::establish(database_url) {
            Ok(conn) => return Ok(conn),
            Err(err) if attempt + 1 >= retry.attempts() => {
                return Err(MigrationError::Connect {
                    attempts: retry.attempts(),
                    message: err.to_string(),
                });
            }
            Err(err) => {
                let delay = retry.delay_after(attempt);
                warn!(
                    error = %err,
                    attempt = attempt + 1,
                    retry_in_secs = delay.as_secs_f64(),
                    "failed to connect to database"
                );
                std::thread::sleep(delay);
                attempt += 1;
            }
        }
    }
}
