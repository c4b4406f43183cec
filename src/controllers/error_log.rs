use axum::{extract::State, response::Response, Extension};
use std::sync::Arc;
use uuid::Uuid;

use crate::domain::error_log::{ErrorLogService, PaginationOptions};
use crate::domain::shared::ApiResponse;
use crate::domain::validation::{common_schemas, PartRules, ValidationSchema};
use crate::error::{AppError, AppResult};
use crate::infrastructure::middleware::ValidatedInput;

pub struct ErrorLogController {
    error_log_service: Arc<ErrorLogService>,
}

impl ErrorLogController {
    pub fn new(error_log_service: Arc<ErrorLogService>) -> Self {
        Self { error_log_service }
    }

    pub fn list_schema() -> ValidationSchema {
        ValidationSchema::new().query(common_schemas::pagination())
    }

    pub fn get_schema() -> ValidationSchema {
        ValidationSchema::new().params(PartRules::new().field("id", common_schemas::id()))
    }

    /// GET /api/error-logs?page&limit - newest first
    pub async fn list_logs(
        State(controller): State<Arc<ErrorLogController>>,
        Extension(input): Extension<ValidatedInput>,
    ) -> AppResult<Response> {
        // Defaults are filled in by the pagination schema
        let page = input.query_u32("page").unwrap_or(1);
        let limit = input.query_u32("limit").unwrap_or(10);

        let logs = controller
            .error_log_service
            .get_paginated_logs(PaginationOptions::from_page(page, limit))
            .await?;

        let total = u64::try_from(logs.count).unwrap_or_default();
        Ok(ApiResponse::pagination(logs.rows, page, limit, total))
    }

    /// GET /api/error-logs/:id
    pub async fn get_log(
        State(controller): State<Arc<ErrorLogController>>,
        Extension(input): Extension<ValidatedInput>,
    ) -> AppResult<Response> {
        let id = input
            .param_str("id")
            .and_then(|id| Uuid::parse_str(id).ok())
            .ok_or_else(|| AppError::bad_request("Invalid ID format. Must be a UUID."))?;

        let log = controller.error_log_service.find_log(id).await?;
        Ok(ApiResponse::ok(log))
    }
}
