use sqlx::postgres::{PgConnectOptions, PgPoolOptions};
use sqlx::{Pool, Postgres};
use std::sync::Arc;
use std::time::Duration;

use crate::domain::error_log::ErrorLogStore;
use crate::infrastructure::config::DatabaseSettings;
use crate::infrastructure::repositories::{ErrorLogRepository, InMemoryErrorLogRepository};

pub type DbPool = Pool<Postgres>;

pub async fn create_pool(options: PgConnectOptions) -> Result<DbPool, sqlx::Error> {
    PgPoolOptions::new()
        .max_connections(10)
        .acquire_timeout(Duration::from_secs(3))
        .connect_with(options)
        .await
}

pub async fn check_connection(pool: &DbPool) -> Result<bool, sqlx::Error> {
    sqlx::query("SELECT 1").fetch_one(pool).await.map(|_| true)
}

pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::migrate::MigrateError> {
    sqlx::migrate!("./migrations").run(pool).await
}

/// Build the error log store selected by the configuration
pub async fn connect_error_log_store(
    settings: &DatabaseSettings,
) -> Result<Arc<dyn ErrorLogStore>, Box<dyn std::error::Error>> {
    match settings {
        DatabaseSettings::InMemory => {
            tracing::info!("Using in-memory error log store");
            Ok(Arc::new(InMemoryErrorLogRepository::new()))
        }
        DatabaseSettings::Postgres(options) => {
            let pool = create_pool(options.clone()).await?;
            tracing::info!("Database connection pool created");

            check_connection(&pool).await?;
            tracing::info!("Database connection verified");

            run_migrations(&pool).await?;
            tracing::info!("Database migrations applied");

            Ok(Arc::new(ErrorLogRepository::new(Arc::new(pool))))
        }
    }
}
