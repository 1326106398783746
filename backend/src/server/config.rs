//! Server settings and the resolved server configuration.

use std::ffi::OsString;

use ortho_config::OrthoConfig;
use postms::outbound::persistence::{ConnectRetry, DbPool, PoolConfig};
use serde::Deserialize;

const DEFAULT_HOST: &str = "0.0.0.0";

/// Settings read from `POSTMS_*` environment variables and the command line.
#[derive(Debug, Clone, Deserialize, OrthoConfig)]
#[ortho_config(prefix = "POSTMS")]
pub struct ServerSettings {
    /// Interface to bind.
    pub host: Option<String>,
    /// Port to bind.
    #[ortho_config(default = 8080)]
    pub port: u16,
    /// PostgreSQL URL. Without one the service keeps data in memory.
    pub database_url: Option<String>,
    /// Upper bound on pooled database connections.
    pub pool_max_size: Option<u32>,
    /// Startup connection attempts before giving up.
    pub connect_attempts: Option<u32>,
}

impl ServerSettings {
    /// Load settings from the process environment and arguments.
    pub fn from_env() -> std::io::Result<Self> {
        Self::load_with_args(std::env::args_os())
    }

    /// Load settings from explicit arguments plus the environment.
    pub fn load_with_args<I>(args: I) -> std::io::Result<Self>
    where
        I: IntoIterator<Item = OsString>,
    {
        <Self as OrthoConfig>::load_from_iter(args)
            .map_err(|err| std::io::Error::other(format!("invalid server settings: {err}")))
    }

    /// Host and port to bind.
    pub fn bind_addr(&self) -> (String, u16) {
        (
            self.host
                .clone()
                .filter(|host| !host.trim().is_empty())
                .unwrap_or_else(|| DEFAULT_HOST.to_owned()),
            self.port,
        )
    }

    /// Configured database URL, ignoring blank values.
    pub fn database_url(&self) -> Option<&str> {
        self.database_url
            .as_deref()
            .filter(|url| !url.trim().is_empty())
    }

    /// Pool settings for `database_url`.
    pub fn pool_config(&self, database_url: &str) -> PoolConfig {
        let config = PoolConfig::new(database_url);
        match self.pool_max_size {
            Some(max_size) => config.with_max_size(max_size),
            None => config,
        }
    }

    /// Startup connect retry policy.
    pub fn connect_retry(&self) -> ConnectRetry {
        self.connect_attempts
            .map_or_else(ConnectRetry::default, ConnectRetry::with_attempts)
    }
}

/// Resolved configuration for [`super::create_server`].
pub struct ServerConfig {
    pub(crate) bind_addr: (String, u16),
    pub(crate) db_pool: Option<DbPool>,
}

impl ServerConfig {
    /// Bind to `bind_addr` with in-memory storage.
    #[must_use]
    pub fn new(bind_addr: (String, u16)) -> Self {
        Self {
            bind_addr,
            db_pool: None,
        }
    }

    /// Use PostgreSQL through `pool`.
    #[must_use]
    pub fn with_db_pool(mut self, pool: DbPool) -> Self {
        self.db_pool = Some(pool);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use env_lock::lock_env;
    use rstest::rstest;

    const VARS: [&str; 5] = [
        "POSTMS_HOST",
        "POSTMS_PORT",
        "POSTMS_DATABASE_URL",
        "POSTMS_POOL_MAX_SIZE",
        "POSTMS_CONNECT_ATTEMPTS",
    ];

    fn load_from_empty_args() -> ServerSettings {
        ServerSettings::load_with_args([OsString::from("postms")]).expect("config should load")
    }

    #[rstest]
    fn defaults_apply_when_unset() {
        let _guard = lock_env(VARS.map(|name| (name, None::<String>)));

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), ("0.0.0.0".to_owned(), 8080));
        assert_eq!(settings.database_url(), None);
        assert_eq!(settings.connect_retry(), ConnectRetry::default());
        assert_eq!(settings.connect_retry().attempts(), 5);
    }

    #[rstest]
    fn environment_overrides_are_respected() {
        let _guard = lock_env([
            ("POSTMS_HOST", Some("127.0.0.1".to_owned())),
            ("POSTMS_PORT", Some("9000".to_owned())),
            (
                "POSTMS_DATABASE_URL",
                Some("postgres://postms@db/postms".to_owned()),
            ),
            ("POSTMS_POOL_MAX_SIZE", Some("4".to_owned())),
            ("POSTMS_CONNECT_ATTEMPTS", Some("2".to_owned())),
        ]);

        let settings = load_from_empty_args();
        assert_eq!(settings.bind_addr(), ("127.0.0.1".to_owned(), 9000));
        assert_eq!(settings.database_url(), Some("postgres://postms@db/postms"));
        assert_eq!(settings.pool_max_size, Some(4));
        assert_eq!(settings.connect_retry().attempts(), 2);
        assert_eq!(
            settings
                .pool_config("postgres://postms@db/postms")
                .database_url(),
            "postgres://postms@db/postms"
        );
    }

    #[rstest]
    fn host_override_keeps_default_port() {
        let _guard = lock_env([
            ("POSTMS_HOST", Some("127.0.0.1".to_owned())),
            ("POSTMS_PORT", None),
        ]);
        assert_eq!(
            load_from_empty_args().bind_addr(),
            ("127.0.0.1".to_owned(), 8080)
        );
    }

    #[rstest]
    fn blank_database_url_selects_memory_storage() {
        let _guard = lock_env([("POSTMS_DATABASE_URL", Some("  ".to_owned()))]);
        assert_eq!(load_from_empty_args().database_url(), None);
    }
}
