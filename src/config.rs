use std::{env, fmt::Display, str::FromStr};

use tracing::{info, warn};

#[derive(Debug, Clone)]
pub struct Config {
    pub database_url: String,
    pub host: String,
    pub port: u16,
    pub db_max_connections: u32,
    pub session_ttl_hours: i64,
}

impl Config {
    /// Reads the process environment (after `.env` has been loaded).
    /// Missing or unparsable values fall back to defaults with a log line.
    pub fn load() -> Self {
        Self {
            database_url: try_load("DATABASE_URL", "sqlite://sigea.db".to_string()),
            host: try_load("HOST", "127.0.0.1".to_string()),
            port: try_load("PORT", 3000),
            db_max_connections: try_load("DB_MAX_CONNECTIONS", 5),
            session_ttl_hours: try_load("SESSION_TTL_HOURS", 24),
        }
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            host: "127.0.0.1".to_string(),
            port: 3000,
            db_max_connections: 1,
            session_ttl_hours: 24,
        }
    }
}

fn try_load<T>(key: &str, default: T) -> T
where
    T: FromStr + Display,
    T::Err: Display,
{
    let Ok(raw) = env::var(key) else {
        info!("{key} not set, using default: {default}");
        return default;
    };
    match raw.trim().parse() {
        Ok(v) => v,
        Err(e) => {
            warn!("Invalid {key} value {raw:?}: {e}, using default: {default}");
            default
        }
    }
}
