//! Service configuration loaded from environment variables.

use std::str::FromStr;
use std::time::Duration;

/// Default HTTP port.
pub const DEFAULT_PORT: u16 = 5000;
/// Default MySQL port.
pub const DEFAULT_DB_PORT: u16 = 3306;
/// Default connection pool size.
pub const DEFAULT_POOL_SIZE: u32 = 5;
/// Default bound on a single store call, in seconds.
pub const DEFAULT_TIMEOUT_SECS: u64 = 5;

/// Database connection settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DatabaseConfig {
    pub host: String,
    pub port: u16,
    pub user: String,
    pub password: String,
    pub name: String,
    pub pool_size: u32,
}

/// Runtime configuration for the service.
///
/// # Environment Variables
///
/// | Variable | Description | Default |
/// |----------|-------------|---------|
/// | `PORT` | HTTP server port | 5000 |
/// | `DB_HOST` | MySQL host; unset runs on an in-memory store | None |
/// | `DB_PORT` | MySQL port | 3306 |
/// | `DB_USER` | MySQL user | "root" |
/// | `DB_PASSWORD` | MySQL password | "" |
/// | `DB_NAME` | MySQL database | "schools" |
/// | `DB_POOL_SIZE` | Maximum pooled connections | 5 |
/// | `DB_TIMEOUT_SECS` | Bound on each store call | 5 |
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ServiceConfig {
    pub port: u16,
    pub database: Option<DatabaseConfig>,
    pub store_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        Self {
            port: DEFAULT_PORT,
            database: None,
            store_timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Build a configuration from the process environment.
    ///
    /// Unparsable numeric values fall back to their defaults, as does a zero
    /// timeout or pool size.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Build a configuration from an arbitrary key lookup.
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let port = parse_var(&lookup, "PORT").unwrap_or(DEFAULT_PORT);
        let timeout_secs = positive_var(&lookup, "DB_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS);

        let database = lookup("DB_HOST")
            .filter(|host| !host.trim().is_empty())
            .map(|host| DatabaseConfig {
                host,
                port: parse_var(&lookup, "DB_PORT").unwrap_or(DEFAULT_DB_PORT),
                user: lookup("DB_USER").unwrap_or_else(|| "root".to_string()),
                password: lookup("DB_PASSWORD").unwrap_or_default(),
                name: lookup("DB_NAME").unwrap_or_else(|| "schools".to_string()),
                pool_size: positive_var(&lookup, "DB_POOL_SIZE", DEFAULT_POOL_SIZE),
            });

        Self {
            port,
            database,
            store_timeout: Duration::from_secs(timeout_secs),
        }
    }

    /// Set the HTTP port.
    pub fn port(mut self, port: u16) -> Self {
        self.port = port;
        self
    }

    /// Set the bound on each store call.
    pub fn store_timeout(mut self, timeout: Duration) -> Self {
        self.store_timeout = timeout;
        self
    }
}

fn parse_var<T, F>(lookup: &F, key: &str) -> Option<T>
where
    T: FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(key).and_then(|s| s.trim().parse().ok())
}

/// Parse a count that must be non-zero, warning and using `default` otherwise.
fn positive_var<T, F>(lookup: &F, key: &str, default: T) -> T
where
    T: FromStr + PartialEq + Default + Copy + std::fmt::Display,
    F: Fn(&str) -> Option<String>,
{
    match parse_var::<T, F>(lookup, key) {
        Some(value) if value == T::default() => {
            tracing::warn!(
                variable = key,
                default = %default,
                "Zero is not allowed, using default"
            );
            default
        }
        Some(value) => value,
        None => default,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(vars: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn test_defaults_without_env() {
        let config = ServiceConfig::from_lookup(lookup(&[]));
        assert_eq!(config, ServiceConfig::default());
        assert_eq!(config.port, 5000);
        assert!(config.database.is_none());
    }

    #[test]
    fn test_full_database_config() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("PORT", "8080"),
            ("DB_HOST", "db.internal"),
            ("DB_PORT", "3307"),
            ("DB_USER", "app"),
            ("DB_PASSWORD", "secret"),
            ("DB_NAME", "school_db"),
            ("DB_POOL_SIZE", "12"),
            ("DB_TIMEOUT_SECS", "2"),
        ]));

        assert_eq!(config.port, 8080);
        assert_eq!(config.store_timeout, Duration::from_secs(2));
        let db = config.database.unwrap();
        assert_eq!(db.host, "db.internal");
        assert_eq!(db.port, 3307);
        assert_eq!(db.user, "app");
        assert_eq!(db.password, "secret");
        assert_eq!(db.name, "school_db");
        assert_eq!(db.pool_size, 12);
    }

    #[test]
    fn test_invalid_numbers_fall_back() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("PORT", "not-a-port"),
            ("DB_HOST", "localhost"),
            ("DB_PORT", "99999"),
        ]));
        assert_eq!(config.port, DEFAULT_PORT);
        assert_eq!(config.database.unwrap().port, DEFAULT_DB_PORT);
    }

    #[test]
    fn test_zero_timeout_and_pool_size_fall_back() {
        let config = ServiceConfig::from_lookup(lookup(&[
            ("DB_HOST", "localhost"),
            ("DB_POOL_SIZE", "0"),
            ("DB_TIMEOUT_SECS", "0"),
        ]));
        assert_eq!(
            config.store_timeout,
            Duration::from_secs(DEFAULT_TIMEOUT_SECS)
        );
        assert_eq!(config.database.unwrap().pool_size, DEFAULT_POOL_SIZE);
    }

    #[test]
    fn test_blank_host_means_no_database() {
        let config = ServiceConfig::from_lookup(lookup(&[("DB_HOST", "  ")]));
        assert!(config.database.is_none());
    }

    #[test]
    fn test_builder_overrides() {
        let config = ServiceConfig::default()
            .port(9000)
            .store_timeout(Duration::from_millis(250));
        assert_eq!(config.port, 9000);
        assert_eq!(config.store_timeout, Duration::from_millis(250));
    }
}
