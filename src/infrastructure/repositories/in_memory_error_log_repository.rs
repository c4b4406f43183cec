use crate::domain::error_log::{ErrorLog, ErrorLogStore, PaginatedLogs, PaginationOptions};
use crate::error::AppResult;
use async_trait::async_trait;
use parking_lot::RwLock;
use uuid::Uuid;

/// Error log storage kept in process memory, used by the test environment
#[derive(Default)]
pub struct InMemoryErrorLogRepository {
    entries: RwLock<Vec<ErrorLog>>,
}

impl InMemoryErrorLogRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.read().is_empty()
    }

    /// Snapshot of every stored entry in insertion order
    pub fn entries(&self) -> Vec<ErrorLog> {
        self.entries.read().clone()
    }
}

#[async_trait]
impl ErrorLogStore for InMemoryErrorLogRepository {
    async fn insert(&self, entry: &ErrorLog) -> AppResult<()> {
        self.entries.write().push(entry.clone());
        Ok(())
    }

    async fn find_paginated(&self, options: PaginationOptions) -> AppResult<PaginatedLogs> {
        let entries = self.entries.read();

        let mut rows: Vec<ErrorLog> = entries.iter().cloned().collect();
        // Stable sort on the reversed list keeps later inserts first on equal timestamps
        rows.reverse();
        rows.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let offset = usize::try_from(options.offset.max(0)).unwrap_or(usize::MAX);
        let limit = usize::try_from(options.limit.max(0)).unwrap_or(usize::MAX);
        let rows = rows.into_iter().skip(offset).take(limit).collect();

        Ok(PaginatedLogs {
            rows,
            count: entries.len() as i64,
        })
    }

    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ErrorLog>> {
        Ok(self.entries.read().iter().find(|e| e.id == id).cloned())
    }

    async fn ping(&self) -> AppResult<()> {
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "memory"
    }
}
