use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use std::fmt;

use crate::domain::shared::api_response::{ApiResponse, INTERNAL_SERVER_ERROR_MESSAGE};

/// Machine-readable error codes exposed in error envelopes and error logs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ErrorCode {
    ValidationError,
    BadRequest,
    Forbidden,
    NotFound,
    Conflict,
    InvalidPage,
    InternalServerError,
}

impl ErrorCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::Forbidden => "FORBIDDEN",
            Self::NotFound => "NOT_FOUND",
            Self::Conflict => "CONFLICT",
            Self::InvalidPage => "INVALID_PAGE",
            Self::InternalServerError => "INTERNAL_SERVER_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Informational classification of an error, independent of the HTTP status
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    Info,
    Warning,
    Error,
}

impl Severity {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Info => "info",
            Self::Warning => "warning",
            Self::Error => "error",
        }
    }
}

impl fmt::Display for Severity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Generic error carrying an explicit code, severity and status
#[derive(Debug, Clone, thiserror::Error)]
#[error("{message}")]
pub struct BaseError {
    pub code: ErrorCode,
    pub message: String,
    pub severity: Severity,
    pub status: StatusCode,
    pub metadata: Option<Map<String, Value>>,
}

impl BaseError {
    pub fn new(
        code: ErrorCode,
        message: impl Into<String>,
        severity: Severity,
        status: StatusCode,
    ) -> Self {
        Self {
            code,
            message: message.into(),
            severity,
            status,
            metadata: None,
        }
    }

    pub fn with_metadata(mut self, metadata: Map<String, Value>) -> Self {
        self.metadata = Some(metadata);
        self
    }
}

/// Main application error type
#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("{message}")]
    Validation {
        message: String,
        details: Vec<String>,
    },

    #[error("{message}")]
    Security {
        code: ErrorCode,
        message: String,
        status: StatusCode,
    },

    #[error(transparent)]
    Base(#[from] BaseError),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("External service error: {0}")]
    ExternalService(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl AppError {
    /// Ad hoc error with an explicit code and status
    pub fn new(code: ErrorCode, message: impl Into<String>, status: StatusCode) -> Self {
        Self::Base(BaseError::new(code, message, Severity::Error, status))
    }

    /// Build a validation error out of every collected violation
    pub fn validation(violations: Vec<String>) -> Self {
        Self::Validation {
            message: format!("Validation error: {}", violations.join(", ")),
            details: violations,
        }
    }

    pub fn security(code: ErrorCode, message: impl Into<String>, status: StatusCode) -> Self {
        Self::Security {
            code,
            message: message.into(),
            status,
        }
    }

    pub fn forbidden(message: impl Into<String>) -> Self {
        Self::security(ErrorCode::Forbidden, message, StatusCode::FORBIDDEN)
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::BadRequest, message, StatusCode::BAD_REQUEST)
    }

    pub fn not_found(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::NotFound, message, StatusCode::NOT_FOUND)
    }

    pub fn conflict(message: impl Into<String>) -> Self {
        Self::new(ErrorCode::Conflict, message, StatusCode::CONFLICT)
    }

    /// Get the HTTP status code for this error
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Validation { .. } => StatusCode::BAD_REQUEST,
            Self::Security { status, .. } => *status,
            Self::Base(base) => base.status,
            Self::Database(_) | Self::ExternalService(_) | Self::Internal(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

/// Which branch of the taxonomy an error came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Validation,
    Security,
    Base,
    Unknown,
}

/// Normalized, transient view of a handled error
#[derive(Debug, Clone)]
pub struct ErrorRecord {
    pub kind: ErrorKind,
    pub code: ErrorCode,
    pub message: String,
    pub severity: Severity,
    pub status: StatusCode,
    pub details: Option<Vec<String>>,
    pub metadata: Option<Map<String, Value>>,
    pub trace: String,
}

impl ErrorRecord {
    fn unknown(message: String, trace: String) -> Self {
        let message = if message.trim().is_empty() {
            INTERNAL_SERVER_ERROR_MESSAGE.to_string()
        } else {
            message
        };

        Self {
            kind: ErrorKind::Unknown,
            code: ErrorCode::InternalServerError,
            message,
            severity: Severity::Error,
            status: StatusCode::INTERNAL_SERVER_ERROR,
            details: None,
            metadata: None,
            trace,
        }
    }
}

impl From<&AppError> for ErrorRecord {
    fn from(err: &AppError) -> Self {
        let trace = source_chain(err);
        match err {
            AppError::Validation { message, details } => Self {
                kind: ErrorKind::Validation,
                code: ErrorCode::ValidationError,
                message: message.clone(),
                severity: Severity::Warning,
                status: StatusCode::BAD_REQUEST,
                details: Some(details.clone()),
                metadata: None,
                trace,
            },
            AppError::Security {
                code,
                message,
                status,
            } => Self {
                kind: ErrorKind::Security,
                code: *code,
                message: message.clone(),
                severity: Severity::Warning,
                status: *status,
                details: None,
                metadata: None,
                trace,
            },
            AppError::Base(base) => Self {
                kind: ErrorKind::Base,
                code: base.code,
                message: base.message.clone(),
                severity: base.severity,
                status: base.status,
                details: None,
                metadata: base.metadata.clone(),
                trace,
            },
            AppError::Database(e) => Self::unknown(e.to_string(), trace),
            AppError::ExternalService(msg) => Self::unknown(msg.clone(), trace),
            AppError::Internal(e) => Self::unknown(e.to_string(), trace),
        }
    }
}

fn source_chain(err: &dyn std::error::Error) -> String {
    let mut lines = Vec::new();
    let mut source = err.source();
    while let Some(cause) = source {
        lines.push(format!("caused by: {}", cause));
        source = cause.source();
    }
    lines.join("\n")
}

/// Implement IntoResponse for automatic conversion in handlers.
///
/// The body is always the redacted generic envelope; the normalized record
/// travels in the response extensions so the error handler middleware can
/// log it and render the environment-appropriate envelope.
impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let record = ErrorRecord::from(&self);

        match record.severity {
            Severity::Info => tracing::info!(
                error = %self,
                code = %record.code,
                status = %record.status.as_u16(),
                "Request failed"
            ),
            Severity::Warning => tracing::warn!(
                error = %self,
                code = %record.code,
                status = %record.status.as_u16(),
                "Request failed"
            ),
            Severity::Error => tracing::error!(
                error = %self,
                code = %record.code,
                status = %record.status.as_u16(),
                "Request failed"
            ),
        }

        let mut response = ApiResponse::error(INTERNAL_SERVER_ERROR_MESSAGE, record.status, None);
        response.extensions_mut().insert(record);
        response
    }
}

/// Custom result type for the application
pub type AppResult<T> = Result<T, AppError>;
