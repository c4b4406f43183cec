use anyhow::Result;
use std::net::SocketAddr;
use std::sync::Arc;
use test_context::AsyncTestContext;
use tokio::net::TcpListener;

use student_admin_backend::controllers::{
    dashboard::DashboardController, error_log::ErrorLogController,
};
use student_admin_backend::domain::dashboard::DashboardService;
use student_admin_backend::domain::error_log::{ErrorLog, ErrorLogService};
use student_admin_backend::infrastructure::catalog::HttpCatalogClient;
use student_admin_backend::infrastructure::config::{Config, DatabaseSettings, Environment};
use student_admin_backend::infrastructure::http::{create_router, AppState};
use student_admin_backend::infrastructure::repositories::InMemoryErrorLogRepository;

pub mod api_client;
pub mod assertions;

use api_client::TestClient;
use fake_catalog::FakeCatalog;

pub struct TestContext {
    pub client: TestClient,
    pub catalog: FakeCatalog,
    pub store: Arc<InMemoryErrorLogRepository>,
    #[allow(dead_code)]
    pub config: Config,
}

impl TestContext {
    /// Spawn the app for a given environment against a fresh fake catalog
    pub async fn start(environment: Environment) -> Result<Self> {
        let catalog = FakeCatalog::start().await?;
        Self::start_with_catalog(environment, catalog).await
    }

    pub async fn start_with_catalog(
        environment: Environment,
        catalog: FakeCatalog,
    ) -> Result<Self> {
        let environment_name = match environment {
            Environment::Development => "development",
            Environment::Production => "production",
            Environment::Test => "test",
        };
        let catalog_url = catalog.base_url();

        let mut config = Config::from_lookup(|key| match key {
            "NODE_ENV" => Some(environment_name.to_string()),
            "HOST" => Some("127.0.0.1".to_string()),
            "PORT" => Some("0".to_string()),
            "CATALOG_API_URL" => Some(catalog_url.clone()),
            "CATALOG_TIMEOUT_SECS" => Some("2".to_string()),
            _ => None,
        })
        .map_err(|e| anyhow::anyhow!("invalid test config: {}", e))?;
        // Postgres is never reached from these tests
        config.database = DatabaseSettings::InMemory;

        let store = Arc::new(InMemoryErrorLogRepository::new());
        let error_log_service = Arc::new(ErrorLogService::new(store.clone()));
        let catalog_client = Arc::new(HttpCatalogClient::new(
            config.catalog_api_url.clone(),
            std::time::Duration::from_secs(config.catalog_timeout_secs),
        )?);
        let dashboard_service = Arc::new(DashboardService::new(catalog_client));

        let state = AppState {
            error_log_service: error_log_service.clone(),
            dashboard_controller: Arc::new(DashboardController::new(dashboard_service)),
            error_log_controller: Arc::new(ErrorLogController::new(error_log_service)),
        };
        let app = create_router(&config, state);

        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        tokio::spawn(async move {
            axum::serve(
                listener,
                app.into_make_service_with_connect_info::<SocketAddr>(),
            )
            .await
            .unwrap();
        });

        Ok(Self {
            client: TestClient::new(&format!("http://{}", addr)),
            catalog,
            store,
            config,
        })
    }
}

impl TestContext {
    /// Error logs are written in the background; wait until `expected` are stored
    pub async fn logged(&self, expected: usize) -> Vec<ErrorLog> {
        for _ in 0..100 {
            if self.store.len() >= expected {
                break;
            }
            tokio::time::sleep(std::time::Duration::from_millis(10)).await;
        }
        self.store.entries()
    }
}

impl AsyncTestContext for TestContext {
    fn setup() -> impl std::future::Future<Output = Self> + Send {
        async {
            TestContext::start(Environment::Development)
                .await
                .expect("Failed to start test app")
        }
    }

    fn teardown(self) -> impl std::future::Future<Output = ()> + Send {
        async {
            // Servers stop with the test runtime
        }
    }
}
