pub mod error;
pub mod model;
pub mod service;

pub use error::ErrorLogServiceError;
pub use model::{ErrorLog, PaginatedLogs, PaginationOptions, RequestContext};
pub use service::ErrorLogService;

use crate::error::AppResult;
use async_trait::async_trait;
use uuid::Uuid;

/// Durable storage for error log entries
#[async_trait]
pub trait ErrorLogStore: Send + Sync {
    async fn insert(&self, entry: &ErrorLog) -> AppResult<()>;

    /// Entries ordered by timestamp descending, plus the total count
    async fn find_paginated(&self, options: PaginationOptions) -> AppResult<PaginatedLogs>;

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ErrorLog>>;

    async fn ping(&self) -> AppResult<()>;

    /// Short backend name reported by the readiness check
    fn backend(&self) -> &'static str;
}
