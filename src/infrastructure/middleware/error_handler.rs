use axum::{
    extract::{ConnectInfo, OriginalUri, Request, State},
    http::{header::USER_AGENT, StatusCode, Uri},
    middleware::Next,
    response::{IntoResponse, Response},
};
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;

use super::request_id::RequestId;
use crate::domain::error_log::{ErrorLogService, RequestContext};
use crate::domain::shared::api_response::{ApiResponse, ErrorExtra, INTERNAL_SERVER_ERROR_MESSAGE};
use crate::error::{AppError, BaseError, ErrorCode, ErrorKind, ErrorRecord, Severity};
use crate::infrastructure::config::Environment;

/// Turns every handled error into a logged, environment-appropriate envelope
pub struct ErrorHandler {
    log_service: Arc<ErrorLogService>,
    environment: Environment,
}

impl ErrorHandler {
    pub fn new(log_service: Arc<ErrorLogService>, environment: Environment) -> Self {
        Self {
            log_service,
            environment,
        }
    }

    /// Render the envelope and persist the record off the request path
    pub fn handle(&self, record: ErrorRecord, context: RequestContext) -> Response {
        let (message, extra) = self.select_message(&record);
        let status = record.status;

        let log_service = self.log_service.clone();
        tokio::spawn(async move {
            log_service.log_error(&record, &context).await;
        });

        ApiResponse::error(&message, status, extra)
    }

    /// Message and extra envelope fields exposed for a record
    pub fn select_message(&self, record: &ErrorRecord) -> (String, Option<ErrorExtra>) {
        if self.environment == Environment::Production {
            return (INTERNAL_SERVER_ERROR_MESSAGE.to_string(), None);
        }

        match record.kind {
            ErrorKind::Validation => (
                record.message.clone(),
                Some(ErrorExtra {
                    code: record.code,
                    details: record.details.clone(),
                }),
            ),
            ErrorKind::Security | ErrorKind::Base => (
                record.message.clone(),
                Some(ErrorExtra {
                    code: record.code,
                    details: None,
                }),
            ),
            ErrorKind::Unknown => (INTERNAL_SERVER_ERROR_MESSAGE.to_string(), None),
        }
    }
}

/// Terminal error middleware: picks up the record an `AppError` left in the
/// response extensions, logs it and re-renders the envelope.
///
/// A known path hit with an unsupported method is reported like an unknown route.
pub async fn error_handler_middleware(
    State(handler): State<Arc<ErrorHandler>>,
    request: Request,
    next: Next,
) -> Response {
    let context = request_context(&request);
    let path = original_uri(&request).path().to_string();

    let mut response = next.run(request).await;

    if response.status() == StatusCode::METHOD_NOT_ALLOWED
        && response.extensions().get::<ErrorRecord>().is_none()
    {
        response = route_not_found(&path).into_response();
    }

    match response.extensions_mut().remove::<ErrorRecord>() {
        Some(record) => handler.handle(record, context),
        None => response,
    }
}

/// Fallback for unmatched routes
pub async fn not_found(OriginalUri(uri): OriginalUri) -> AppError {
    route_not_found(uri.path())
}

fn route_not_found(path: &str) -> AppError {
    BaseError::new(
        ErrorCode::NotFound,
        format!("Route {} not found", path),
        Severity::Error,
        StatusCode::NOT_FOUND,
    )
    .into()
}

/// Panic hook for `CatchPanicLayer`
pub fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "handler panicked".to_string()
    };

    AppError::Internal(anyhow::anyhow!(detail)).into_response()
}

fn original_uri(request: &Request) -> Uri {
    request
        .extensions()
        .get::<OriginalUri>()
        .map(|original| original.0.clone())
        .unwrap_or_else(|| request.uri().clone())
}

fn request_context(request: &Request) -> RequestContext {
    let uri = original_uri(request);

    let url = uri
        .path_and_query()
        .map(|pq| pq.as_str().to_string())
        .unwrap_or_else(|| uri.path().to_string());

    let headers = request.headers();
    let forwarded_ip = headers
        .get("x-forwarded-for")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.split(',').next())
        .map(|ip| ip.trim().to_string())
        .filter(|ip| !ip.is_empty());
    let peer_ip = request
        .extensions()
        .get::<ConnectInfo<SocketAddr>>()
        .map(|ConnectInfo(addr)| addr.ip().to_string());

    RequestContext {
        url,
        method: request.method().to_string(),
        ip: forwarded_ip.or(peer_ip),
        user_agent: headers
            .get(USER_AGENT)
            .and_then(|v| v.to_str().ok())
            .map(str::to_string),
        request_id: request
            .extensions()
            .get::<RequestId>()
            .map(|RequestId(id)| id.clone()),
    }
}
