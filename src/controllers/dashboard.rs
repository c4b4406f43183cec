use axum::{extract::State, response::Response, Extension};
use std::sync::Arc;

use crate::domain::dashboard::{DashboardService, MAX_PAGES};
use crate::domain::shared::ApiResponse;
use crate::domain::validation::{FieldRule, PartRules, RuleKey, ValidationSchema};
use crate::error::AppResult;
use crate::infrastructure::middleware::ValidatedInput;

pub struct DashboardController {
    dashboard_service: Arc<DashboardService>,
}

impl DashboardController {
    pub fn new(dashboard_service: Arc<DashboardService>) -> Self {
        Self { dashboard_service }
    }

    /// Query rules for the activity feed
    pub fn activities_schema() -> ValidationSchema {
        ValidationSchema::new().query(
            PartRules::new().field(
                "page",
                FieldRule::integer()
                    .min(1)
                    .max(i64::from(MAX_PAGES))
                    .default_value(1)
                    .message(RuleKey::Base, "Page must be a number.")
                    .message(RuleKey::Integer, "Page must be an integer.")
                    .message(RuleKey::Min, "Page must be at least 1.")
                    .message(RuleKey::Max, "Page must be at most 3."),
            ),
        )
    }

    /// GET /api/dashboard/stats
    pub async fn get_stats(State(controller): State<Arc<DashboardController>>) -> Response {
        let stats = controller.dashboard_service.get_dashboard_stats().await;
        ApiResponse::ok(stats)
    }

    /// GET /api/dashboard/activities?page=
    pub async fn get_activities(
        State(controller): State<Arc<DashboardController>>,
        Extension(input): Extension<ValidatedInput>,
    ) -> AppResult<Response> {
        let page = input.query_u32("page").unwrap_or(1);
        let activities = controller
            .dashboard_service
            .get_paginated_activities(page)
            .await?;
        Ok(ApiResponse::ok(activities))
    }
}
