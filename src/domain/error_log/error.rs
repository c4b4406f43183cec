use crate::error::AppError;

#[derive(Debug, thiserror::Error)]
pub enum ErrorLogServiceError {
    #[error("dependency error: {0}")]
    Dependency(String),
    #[error("error log not found")]
    NotFound,
}

impl From<AppError> for ErrorLogServiceError {
    fn from(err: AppError) -> Self {
        match err {
            AppError::Base(base) if base.status == axum::http::StatusCode::NOT_FOUND => {
                ErrorLogServiceError::NotFound
            }
            _ => ErrorLogServiceError::Dependency(err.to_string()),
        }
    }
}

impl From<ErrorLogServiceError> for AppError {
    fn from(err: ErrorLogServiceError) -> Self {
        match err {
            ErrorLogServiceError::NotFound => AppError::not_found("Error log not found"),
            ErrorLogServiceError::Dependency(msg) => AppError::ExternalService(msg),
        }
    }
}
