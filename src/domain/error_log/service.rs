use super::error::ErrorLogServiceError;
use super::{ErrorLog, ErrorLogStore, PaginatedLogs, PaginationOptions, RequestContext};
use crate::error::ErrorRecord;
use chrono::Utc;
use std::sync::Arc;
use uuid::Uuid;

pub struct ErrorLogService {
    store: Arc<dyn ErrorLogStore>,
}

impl ErrorLogService {
    pub fn new(store: Arc<dyn ErrorLogStore>) -> Self {
        Self { store }
    }

    /// Persist one handled error. Never fails: a storage failure is reported
    /// through tracing and otherwise ignored.
    pub async fn log_error(&self, record: &ErrorRecord, context: &RequestContext) {
        let entry = ErrorLog::from_record(record, context, Utc::now());

        match self.record(&entry).await {
            Ok(()) => tracing::debug!(
                error_log_id = %entry.id,
                code = %entry.error_code,
                "Error logged"
            ),
            Err(e) => tracing::error!(
                error = %e,
                code = %entry.error_code,
                url = %entry.url,
                "Failed to persist error log"
            ),
        }
    }

    pub async fn record(&self, entry: &ErrorLog) -> Result<(), ErrorLogServiceError> {
        self.store.insert(entry).await.map_err(ErrorLogServiceError::from)
    }

    pub async fn get_paginated_logs(
        &self,
        options: PaginationOptions,
    ) -> Result<PaginatedLogs, ErrorLogServiceError> {
        self.store
            .find_paginated(options)
            .await
            .map_err(|e| ErrorLogServiceError::Dependency(e.to_string()))
    }

    pub async fn find_log(&self, id: Uuid) -> Result<ErrorLog, ErrorLogServiceError> {
        self.store
            .find_by_id(id)
            .await
            .map_err(|e| ErrorLogServiceError::Dependency(e.to_string()))?
            .ok_or(ErrorLogServiceError::NotFound)
    }

    pub async fn is_ready(&self) -> bool {
        self.store.ping().await.is_ok()
    }

    pub fn backend(&self) -> &'static str {
        self.store.backend()
    }
}
