use axum::{Json, extract::State};
use serde::Serialize;

use crate::error::ApiError;
use crate::handlers::{BearerToken, require_subject};
use crate::state::AppState;
use crate::usecase::audit::ListAuditLogsUseCase;

#[derive(Serialize)]
pub struct AuditEntryResponse {
    pub id: String,
    pub action: &'static str,
    pub file_name: String,
    #[serde(serialize_with = "docvault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

// ── GET /audit-logs/@me ──────────────────────────────────────────────────────

pub async fn list_my_audit_logs(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> Result<Json<Vec<AuditEntryResponse>>, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = ListAuditLogsUseCase {
        audit: state.audit_log(),
    };
    let entries = usecase.execute(user.id).await?;
    Ok(Json(
        entries
            .into_iter()
            .map(|e| AuditEntryResponse {
                id: e.id.to_string(),
                action: e.action.as_str(),
                file_name: e.file_name,
                created_at: e.created_at,
            })
            .collect(),
    ))
}
