use std::str::FromStr;

use sqlx::migrate::Migrator;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::SqlitePool;

use crate::config::Config;

pub mod activity_repo;
pub mod attendance_repo;
pub mod certificate_repo;
pub mod dashboard_repo;
pub mod inscription_repo;
pub mod payment_repo;
pub mod session_repo;
pub mod user_repo;

pub static MIGRATOR: Migrator = sqlx::migrate!();

/// Opens the pool with foreign keys enforced; the schema is left to
/// [`MIGRATOR`].
pub async fn connect(config: &Config) -> sqlx::Result<SqlitePool> {
    let options = SqliteConnectOptions::from_str(&config.database_url)?
        .create_if_missing(true)
        .foreign_keys(true);

    let mut pool_options = SqlitePoolOptions::new().max_connections(config.db_max_connections);
    if config.database_url.contains(":memory:") {
        // Every connection to :memory: is a separate database; keep the one
        // connection alive for the life of the pool.
        pool_options = pool_options
            .max_connections(1)
            .idle_timeout(None)
            .max_lifetime(None);
    }
    pool_options.connect_with(options).await
}
