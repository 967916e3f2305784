//! Audit sink trait.

use async_trait::async_trait;

use crate::result::AppResult;

/// Best-effort audit trail for authentication events.
///
/// Callers must not let a sink failure abort the operation being audited;
/// record errors are logged and swallowed at the call site.
#[async_trait]
pub trait AuditSink: Send + Sync + std::fmt::Debug + 'static {
    /// Record one event. `principal_id` is absent for events that could not
    /// be tied to a principal (for example a failed login for an unknown
    /// email).
    async fn record(
        &self,
        principal_id: Option<i64>,
        action: &str,
        detail: &str,
        client_addr: &str,
    ) -> AppResult<()>;
}
