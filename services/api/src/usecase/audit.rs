use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::AuditLogPort;
use crate::domain::types::{AuditAction, AuditEntry};
use crate::error::ApiError;

/// Write an audit entry, logging and swallowing any failure. The audit sink
/// must never fail or block the operation being recorded.
pub async fn record_best_effort<A: AuditLogPort>(
    audit: &A,
    user_id: Uuid,
    action: AuditAction,
    file_name: &str,
) {
    let entry = AuditEntry {
        id: Uuid::new_v4(),
        user_id,
        action,
        file_name: file_name.to_owned(),
        created_at: Utc::now(),
    };
    if let Err(e) = audit.record(&entry).await {
        tracing::warn!(
            error = %e,
            action = action.as_str(),
            %user_id,
            "failed to write audit entry"
        );
    }
}

// ── ListAuditLogs ────────────────────────────────────────────────────────────

pub struct ListAuditLogsUseCase<A: AuditLogPort> {
    pub audit: A,
}

impl<A: AuditLogPort> ListAuditLogsUseCase<A> {
    /// Entries for the resolved subject only, newest first.
    pub async fn execute(&self, user_id: Uuid) -> Result<Vec<AuditEntry>, ApiError> {
        self.audit.list_by_user(user_id).await
    }
}
