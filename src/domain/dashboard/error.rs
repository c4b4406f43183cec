use crate::error::{AppError, ErrorCode};
use axum::http::StatusCode;

#[derive(Debug, thiserror::Error)]
pub enum DashboardServiceError {
    #[error("page {page} is out of range (1..={max})")]
    InvalidPage { page: u32, max: u32 },
    #[error("upstream error: {0}")]
    Upstream(String),
}

impl From<DashboardServiceError> for AppError {
    fn from(err: DashboardServiceError) -> Self {
        match err {
            DashboardServiceError::InvalidPage { page, max } => AppError::new(
                ErrorCode::InvalidPage,
                format!("Page must be between 1 and {}, got {}", max, page),
                StatusCode::BAD_REQUEST,
            ),
            DashboardServiceError::Upstream(msg) => AppError::ExternalService(msg),
        }
    }
}
