//! Runtime configuration, loaded from the environment.

use std::time::Duration;

/// Top-level service configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// PostgreSQL connection string.
    pub database_url: String,

    /// Port the HTTP server binds to.
    pub port: u16,

    /// Connection pool tuning.
    pub pool: PoolConfig,
}

/// Tuning knobs for the bb8 connection pool.
#[derive(Debug, Clone)]
pub struct PoolConfig {
    pub max_size: u32,
    pub min_idle: u32,
    pub max_lifetime: Duration,
    pub idle_timeout: Duration,
    pub connection_timeout: Duration,
    /// How many times a handler retries acquiring a connection before giving up.
    pub acquire_retries: u32,
    pub retry_delay: Duration,
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self {
            max_size: 10,
            min_idle: 5,
            max_lifetime: Duration::from_secs(24 * 3600),
            idle_timeout: Duration::from_secs(120),
            connection_timeout: Duration::from_secs(30),
            acquire_retries: 3,
            retry_delay: Duration::from_millis(100),
        }
    }
}

/// Raised when an environment variable is missing or unparseable.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("missing required environment variable {0}")]
    Missing(&'static str),

    #[error("invalid value {value:?} for {name}: {reason}")]
    Invalid {
        name: &'static str,
        value: String,
        reason: String,
    },
}

impl Config {
    /// Read configuration from the environment.
    ///
    /// `DATABASE_URL` is required. `PORT` (default 8085) and the `POOL_*`
    /// variables (`POOL_MAX_SIZE`, `POOL_MIN_IDLE`, `POOL_ACQUIRE_RETRIES`,
    /// `POOL_TIMEOUT_SECS`) are optional.
    pub fn from_env() -> Result<Self, ConfigError> {
        let database_url =
            std::env::var("DATABASE_URL").map_err(|_| ConfigError::Missing("DATABASE_URL"))?;
        if database_url.is_empty() {
            return Err(ConfigError::Invalid {
                name: "DATABASE_URL",
                value: database_url,
                reason: "must not be empty".into(),
            });
        }

        let defaults = PoolConfig::default();
        let pool = PoolConfig {
            max_size: env_parse("POOL_MAX_SIZE", defaults.max_size)?,
            min_idle: env_parse("POOL_MIN_IDLE", defaults.min_idle)?,
            acquire_retries: env_parse("POOL_ACQUIRE_RETRIES", defaults.acquire_retries)?,
            connection_timeout: Duration::from_secs(env_parse("POOL_TIMEOUT_SECS", 30)?),
            ..defaults
        };

        if pool.max_size == 0 {
            return Err(ConfigError::Invalid {
                name: "POOL_MAX_SIZE",
                value: "0".into(),
                reason: "must be at least 1".into(),
            });
        }
        if pool.min_idle > pool.max_size {
            return Err(ConfigError::Invalid {
                name: "POOL_MIN_IDLE",
                value: pool.min_idle.to_string(),
                reason: "must not exceed POOL_MAX_SIZE".into(),
            });
        }

        Ok(Self {
            database_url,
            port: env_parse("PORT", 8085)?,
            pool,
        })
    }
}

fn env_parse<T: std::str::FromStr>(name: &'static str, default: T) -> Result<T, ConfigError> {
    let Ok(raw) = std::env::var(name) else {
        return Ok(default);
    };
    raw.parse().map_err(|_| ConfigError::Invalid {
        name,
        value: raw,
        reason: "expected a number".into(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pool_defaults() {
        let pool = PoolConfig::default();
        assert_eq!(pool.max_size, 10);
        assert_eq!(pool.min_idle, 5);
        assert_eq!(pool.acquire_retries, 3);
    }

    #[test]
    fn test_env_parse_falls_back_to_default() {
        assert_eq!(env_parse("NO_SUCH_VARIABLE_SET", 42u32).unwrap(), 42);
    }
}
