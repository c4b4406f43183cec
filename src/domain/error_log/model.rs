use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use sqlx::FromRow;
use uuid::Uuid;

use crate::error::ErrorRecord;

/// Where a handled error came from
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RequestContext {
    pub url: String,
    pub method: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
    pub request_id: Option<String>,
}

/// Persisted error occurrence
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ErrorLog {
    pub id: Uuid,
    pub error_code: String,
    pub message: String,
    pub stack_trace: String,
    pub severity: String,
    pub metadata: Value,
    pub timestamp: DateTime<Utc>,
    pub url: String,
    pub method: String,
    pub ip: Option<String>,
    pub user_agent: Option<String>,
}

impl ErrorLog {
    pub fn from_record(record: &ErrorRecord, context: &RequestContext, now: DateTime<Utc>) -> Self {
        let mut metadata = record.metadata.clone().unwrap_or_else(Map::new);
        if let Some(request_id) = &context.request_id {
            metadata.insert("requestId".to_string(), Value::from(request_id.as_str()));
        }

        Self {
            id: Uuid::new_v4(),
            error_code: record.code.to_string(),
            message: record.message.clone(),
            stack_trace: record.trace.clone(),
            severity: record.severity.to_string(),
            metadata: Value::Object(metadata),
            timestamp: now,
            url: context.url.clone(),
            method: context.method.clone(),
            ip: context.ip.clone(),
            user_agent: context.user_agent.clone(),
        }
    }
}

/// Read-side paging window
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PaginationOptions {
    pub limit: i64,
    pub offset: i64,
}

impl PaginationOptions {
    pub fn from_page(page: u32, limit: u32) -> Self {
        let limit = i64::from(limit);
        Self {
            limit,
            offset: i64::from(page.saturating_sub(1)) * limit,
        }
    }
}

#[derive(Debug, Clone)]
pub struct PaginatedLogs {
    pub rows: Vec<ErrorLog>,
    pub count: i64,
}
