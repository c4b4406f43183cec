use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::error::ErrorCode;

pub const INTERNAL_SERVER_ERROR_MESSAGE: &str = "Internal Server Error";

/// Pagination block of a paginated success envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Pagination {
    pub page: u32,
    pub limit: u32,
    pub total: u64,
    pub total_pages: u64,
}

impl Pagination {
    pub fn new(page: u32, limit: u32, total: u64) -> Self {
        let total_pages = if limit == 0 {
            0
        } else {
            total.div_ceil(u64::from(limit))
        };

        Self {
            page,
            limit,
            total,
            total_pages,
        }
    }
}

/// `{ success: true, message?, data, pagination? }`
#[derive(Debug, Serialize, Deserialize)]
pub struct SuccessEnvelope<T> {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub pagination: Option<Pagination>,
}

/// Extra fields merged into an error envelope
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ErrorExtra {
    pub code: ErrorCode,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<Vec<String>>,
}

/// `{ success: false, message, ...extra }`
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorEnvelope {
    pub success: bool,
    pub message: String,
    #[serde(flatten)]
    pub extra: Option<ErrorExtra>,
}

/// Builds the uniform JSON envelope every endpoint answers with
pub struct ApiResponse;

impl ApiResponse {
    pub fn success<T: Serialize>(data: T, message: Option<&str>, status: StatusCode) -> Response {
        let envelope = SuccessEnvelope {
            success: true,
            message: message.map(str::to_string),
            data,
            pagination: None,
        };
        (status, Json(envelope)).into_response()
    }

    pub fn ok<T: Serialize>(data: T) -> Response {
        Self::success(data, None, StatusCode::OK)
    }

    pub fn pagination<T: Serialize>(data: Vec<T>, page: u32, limit: u32, total: u64) -> Response {
        let envelope = SuccessEnvelope {
            success: true,
            message: None,
            data,
            pagination: Some(Pagination::new(page, limit, total)),
        };
        (StatusCode::OK, Json(envelope)).into_response()
    }

    pub fn error(message: &str, status: StatusCode, extra: Option<ErrorExtra>) -> Response {
        let envelope = ErrorEnvelope {
            success: false,
            message: message.to_string(),
            extra,
        };
        (status, Json(envelope)).into_response()
    }
}
