pub mod models;

use crate::infrastructure::config::env_or;
use sqlx::postgres::PgPoolOptions;
use sqlx::{Pool, Postgres};
use std::time::Duration;

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(database_url: &str) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(env_or("DB_MAX_CONNECTIONS", 20))
        .min_connections(env_or("DB_MIN_CONNECTIONS", 5))
        .acquire_timeout(Duration::from_secs(env_or("DB_ACQUIRE_TIMEOUT_SECS", 3)))
        .idle_timeout(Duration::from_secs(env_or("DB_IDLE_TIMEOUT_SECS", 600)))
        .connect(database_url)
        .await
}

/// Apply the embedded migrations
pub async fn migrate(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!().run(pool).await
}
