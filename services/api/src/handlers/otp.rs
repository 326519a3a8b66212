use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::error::ApiError;
use crate::handlers::{BearerToken, require_subject};
use crate::state::AppState;
use crate::usecase::otp::{IssueOtpUseCase, ValidateOtpUseCase};
use crate::usecase::post::GetPostUseCase;

// ── POST /posts/{post_id}/otp ────────────────────────────────────────────────

#[derive(Serialize)]
pub struct IssueOtpResponse {
    #[serde(serialize_with = "docvault_core::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
}

/// Issue an OTP for the caller's own post and email it to them. Any prior
/// live code for the pair is superseded. Non-owners get 403 before anything
/// is issued.
pub async fn request_otp(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(post_id): Path<Uuid>,
) -> Result<(StatusCode, Json<IssueOtpResponse>), ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let post = GetPostUseCase {
        posts: state.post_repo(),
    }
    .execute(&user, post_id)
    .await?;

    let usecase = IssueOtpUseCase {
        otps: state.otp_repo(),
        notifier: state.mailer(),
    };
    let otp = usecase.execute(&post, &user).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(IssueOtpResponse {
            expires_at: otp.expires_at,
        }),
    ))
}

// ── POST /posts/{post_id}/otp/validate ───────────────────────────────────────

#[derive(Deserialize)]
pub struct ValidateOtpRequest {
    pub code: String,
}

/// Consume a live code for the caller's own post. Consumption is permanent
/// even when the caller performs no follow-up action; non-owners get 403.
pub async fn validate_otp(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(post_id): Path<Uuid>,
    Json(body): Json<ValidateOtpRequest>,
) -> Result<StatusCode, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let post = GetPostUseCase {
        posts: state.post_repo(),
    }
    .execute(&user, post_id)
    .await?;

    let usecase = ValidateOtpUseCase {
        otps: state.otp_repo(),
    };
    usecase.execute(&body.code, &post, &user).await?;
    Ok(StatusCode::NO_CONTENT)
}
