use axum::{
    http::{HeaderName, HeaderValue, Method},
    middleware,
    routing::get,
    Router,
};
use std::net::SocketAddr;
use std::sync::Arc;
use tower_http::{
    catch_panic::CatchPanicLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use crate::controllers::{dashboard::DashboardController, error_log::ErrorLogController, health};
use crate::domain::error_log::ErrorLogService;
use crate::infrastructure::config::Config;
use crate::infrastructure::middleware::{
    error_handler_middleware, handle_panic, not_found, request_id_middleware, validate,
    ErrorHandler, X_REQUEST_ID,
};

/// Controllers and services the router dispatches to
#[derive(Clone)]
pub struct AppState {
    pub error_log_service: Arc<ErrorLogService>,
    pub dashboard_controller: Arc<DashboardController>,
    pub error_log_controller: Arc<ErrorLogController>,
}

/// Build the application router with every route and the middleware stack
pub fn create_router(config: &Config, state: AppState) -> Router {
    let error_handler = Arc::new(ErrorHandler::new(
        state.error_log_service.clone(),
        config.environment,
    ));

    let health_routes = Router::new()
        .route("/health", get(health::health))
        .route("/health/ready", get(health::health_ready))
        .with_state(state.error_log_service.clone());

    let dashboard_routes = Router::new()
        .route("/api/dashboard/stats", get(DashboardController::get_stats))
        .merge(
            Router::new()
                .route(
                    "/api/dashboard/activities",
                    get(DashboardController::get_activities),
                )
                .route_layer(validate(DashboardController::activities_schema())),
        )
        .with_state(state.dashboard_controller.clone());

    let error_log_routes = Router::new()
        .merge(
            Router::new()
                .route("/api/error-logs", get(ErrorLogController::list_logs))
                .route_layer(validate(ErrorLogController::list_schema())),
        )
        .merge(
            Router::new()
                .route("/api/error-logs/:id", get(ErrorLogController::get_log))
                .route_layer(validate(ErrorLogController::get_schema())),
        )
        .with_state(state.error_log_controller.clone());

    Router::new()
        .merge(health_routes)
        .merge(dashboard_routes)
        .merge(error_log_routes)
        .fallback(not_found)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(
            error_handler,
            error_handler_middleware,
        ))
        .layer(middleware::from_fn(request_id_middleware))
        .layer(cors_layer(&config.cors_allowed_origins))
        .layer(TraceLayer::new_for_http())
}

fn cors_layer(allowed_origins: &[String]) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([
            Method::GET,
            Method::POST,
            Method::PUT,
            Method::PATCH,
            Method::DELETE,
            Method::OPTIONS,
        ])
        .allow_headers(Any)
        .expose_headers([HeaderName::from_static(X_REQUEST_ID)]);

    let origins: Vec<HeaderValue> = allowed_origins
        .iter()
        .filter_map(|origin| match HeaderValue::from_str(origin) {
            Ok(value) => Some(value),
            Err(_) => {
                tracing::warn!(origin = %origin, "Ignoring invalid CORS origin");
                None
            }
        })
        .collect();

    if origins.is_empty() {
        layer.allow_origin(Any)
    } else {
        layer.allow_origin(origins)
    }
}

/// Start the HTTP server with all routes configured
pub async fn start_http_server(
    config: Arc<Config>,
    state: AppState,
) -> Result<(), Box<dyn std::error::Error>> {
    let app = create_router(&config, state);

    let listener =
        tokio::net::TcpListener::bind(format!("{}:{}", config.host, config.port)).await?;

    tracing::info!("Server listening on {}", listener.local_addr()?);

    axum::serve(
        listener,
        app.into_make_service_with_connect_info::<SocketAddr>(),
    )
    .await?;

    Ok(())
}
