//! PostgreSQL audit sink implementation.

use async_trait::async_trait;
use sqlx::PgPool;

use roadbook_core::error::{AppError, ErrorKind};
use roadbook_core::result::AppResult;
use roadbook_core::traits::audit::AuditSink;

/// Audit sink backed by the `audit_log` table.
#[derive(Debug, Clone)]
pub struct PgAuditSink {
    pool: PgPool,
}

impl PgAuditSink {
    /// Create a new audit sink.
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl AuditSink for PgAuditSink {
    async fn record(
        &self,
        principal_id: Option<i64>,
        action: &str,
        detail: &str,
        client_addr: &str,
    ) -> AppResult<()> {
        sqlx::query(
            "INSERT INTO audit_log (principal_id, action, detail, client_addr) \
             VALUES ($1, $2, $3, $4)",
        )
        .bind(principal_id)
        .bind(action)
        .bind(detail)
        .bind(client_addr)
        .execute(&self.pool)
        .await
        .map_err(|e| {
            AppError::with_source(ErrorKind::Database, "Failed to record audit entry", e)
        })?;
        Ok(())
    }
}
