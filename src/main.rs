use std::sync::Arc;
use std::time::Duration;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use student_admin_backend::controllers::{
    dashboard::DashboardController, error_log::ErrorLogController,
};
use student_admin_backend::domain::dashboard::DashboardService;
use student_admin_backend::domain::error_log::ErrorLogService;
use student_admin_backend::infrastructure::catalog::HttpCatalogClient;
use student_admin_backend::infrastructure::config::{Config, LogFormat};
use student_admin_backend::infrastructure::db::connect_error_log_store;
use student_admin_backend::infrastructure::http::{start_http_server, AppState};

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env()?;

    // Initialize logging
    init_logging(&config);

    tracing::info!(
        environment = ?config.environment,
        "Starting Student Admin Backend on {}:{}",
        config.host,
        config.port
    );

    // === DEPENDENCY INJECTION SETUP ===
    // 1. Error log store (in-memory for tests, Postgres otherwise)
    let error_log_store = connect_error_log_store(&config.database).await?;

    // 2. Upstream catalog client
    tracing::info!(url = %config.catalog_api_url, "Instantiating catalog client...");
    let catalog_client = Arc::new(HttpCatalogClient::new(
        config.catalog_api_url.clone(),
        Duration::from_secs(config.catalog_timeout_secs),
    )?);

    // 3. Services
    tracing::info!("Instantiating services...");
    let error_log_service = Arc::new(ErrorLogService::new(error_log_store));
    let dashboard_service = Arc::new(DashboardService::new(catalog_client));

    // 4. Controllers
    tracing::info!("Instantiating controllers...");
    let state = AppState {
        error_log_service: error_log_service.clone(),
        dashboard_controller: Arc::new(DashboardController::new(dashboard_service)),
        error_log_controller: Arc::new(ErrorLogController::new(error_log_service)),
    };

    start_http_server(Arc::new(config), state).await?;

    Ok(())
}

fn init_logging(config: &Config) {
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "student_admin_backend=debug,tower_http=debug".into());

    if config.log_format == LogFormat::Json {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().json())
            .init();
    } else {
        tracing_subscriber::registry()
            .with(filter)
            .with(tracing_subscriber::fmt::layer().pretty())
            .init();
    }
}
