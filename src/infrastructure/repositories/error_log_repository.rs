use crate::domain::error_log::{ErrorLog, ErrorLogStore, PaginatedLogs, PaginationOptions};
use crate::error::AppResult;
use crate::infrastructure::db::{check_connection, DbPool};
use async_trait::async_trait;
use std::sync::Arc;
use uuid::Uuid;

pub struct ErrorLogRepository {
    pool: Arc<DbPool>,
}

impl ErrorLogRepository {
    pub fn new(pool: Arc<DbPool>) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl ErrorLogStore for ErrorLogRepository {
    /// Insert a new error log entry
    async fn insert(&self, entry: &ErrorLog) -> AppResult<()> {
        let pool = self.pool.as_ref();
        sqlx::query(
            r#"
            INSERT INTO error_logs (
                id, error_code, message, stack_trace, severity, metadata,
                timestamp, url, method, ip, user_agent
            )
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9, $10, $11)
            "#,
        )
        .bind(entry.id)
        .bind(&entry.error_code)
        .bind(&entry.message)
        .bind(&entry.stack_trace)
        .bind(&entry.severity)
        .bind(&entry.metadata)
        .bind(entry.timestamp)
        .bind(&entry.url)
        .bind(&entry.method)
        .bind(&entry.ip)
        .bind(&entry.user_agent)
        .execute(pool)
        .await?;

        Ok(())
    }

    /// Get a page of error logs, newest first, with the total count
    async fn find_paginated(&self, options: PaginationOptions) -> AppResult<PaginatedLogs> {
        let pool = self.pool.as_ref();
        let rows = sqlx::query_as::<_, ErrorLog>(
            r#"
            SELECT id, error_code, message, stack_trace, severity, metadata,
                   timestamp, url, method, ip, user_agent
            FROM error_logs
            ORDER BY timestamp DESC
            LIMIT $1 OFFSET $2
            "#,
        )
        .bind(options.limit)
        .bind(options.offset)
        .fetch_all(pool)
        .await?;

        let count = sqlx::query_scalar::<_, i64>(
            r#"
            SELECT COUNT(*)
            FROM error_logs
            "#,
        )
        .fetch_one(pool)
        .await?;

        Ok(PaginatedLogs { rows, count })
    }

    /// Get an error log by ID
    async fn find_by_id(&self, id: Uuid) -> AppResult<Option<ErrorLog>> {
        let pool = self.pool.as_ref();
        let entry = sqlx::query_as::<_, ErrorLog>(
            r#"
            SELECT id, error_code, message, stack_trace, severity, metadata,
                   timestamp, url, method, ip, user_agent
            FROM error_logs
            WHERE id = $1
            "#,
        )
        .bind(id)
        .fetch_optional(pool)
        .await?;

        Ok(entry)
    }

    async fn ping(&self) -> AppResult<()> {
        check_connection(&self.pool).await?;
        Ok(())
    }

    fn backend(&self) -> &'static str {
        "postgres"
    }
}
