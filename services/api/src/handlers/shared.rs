//! Anonymous share-link endpoints. No bearer token is required here; the
//! token in the path is the entire credential.

use axum::{
    Json,
    extract::{Path, Query, State},
    http::StatusCode,
    response::Redirect,
};
use serde::{Deserialize, Serialize};

use crate::domain::types::Post;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::access::{AccessSharedUseCase, RequestSharedOtpUseCase};
use crate::usecase::otp::IssueOtpUseCase;

#[derive(Deserialize)]
pub struct SharedQuery {
    pub otp: Option<String>,
}

/// Post metadata shown to anonymous visitors. Omits the owner's identity;
/// payload URLs are reachable through `/shared/{token}/view` only.
#[derive(Serialize)]
pub struct SharedPostResponse {
    pub id: String,
    pub captions: Option<String>,
    pub file_name: String,
    pub otp_protected: bool,
    #[serde(serialize_with = "docvault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Post> for SharedPostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            file_name: post.file_name().to_owned(),
            captions: post.captions,
            otp_protected: post.otp_protected,
            created_at: post.created_at,
        }
    }
}

// ── GET /shared/{token} ──────────────────────────────────────────────────────

/// Resolve a share link to its post. Counts as one use of the link.
pub async fn access_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<SharedQuery>,
) -> Result<Json<SharedPostResponse>, ApiError> {
    let usecase = AccessSharedUseCase {
        links: state.share_link_repo(),
        posts: state.post_repo(),
        otps: state.otp_repo(),
    };
    let post = usecase.execute(&token, query.otp.as_deref()).await?;
    Ok(Json(post.into()))
}

// ── GET /shared/{token}/view ─────────────────────────────────────────────────

/// Same gates as `access_shared`, then redirect to the post's payload URL.
pub async fn view_shared(
    State(state): State<AppState>,
    Path(token): Path<String>,
    Query(query): Query<SharedQuery>,
) -> Result<Redirect, ApiError> {
    let usecase = AccessSharedUseCase {
        links: state.share_link_repo(),
        posts: state.post_repo(),
        otps: state.otp_repo(),
    };
    let post = usecase.execute(&token, query.otp.as_deref()).await?;
    let url = post.file_url().ok_or(ApiError::FileUrlNotFound)?;
    Ok(Redirect::temporary(url))
}

// ── POST /shared/{token}/otp ─────────────────────────────────────────────────

#[derive(Serialize)]
pub struct SharedOtpResponse {
    /// False when the post is unprotected and no OTP is needed.
    pub otp_required: bool,
}

/// Ask for an OTP to be emailed to the post owner. The response never carries
/// the code itself.
pub async fn request_shared_otp(
    State(state): State<AppState>,
    Path(token): Path<String>,
) -> Result<(StatusCode, Json<SharedOtpResponse>), ApiError> {
    let usecase = RequestSharedOtpUseCase {
        links: state.share_link_repo(),
        posts: state.post_repo(),
        users: state.user_repo(),
        issue_otp: IssueOtpUseCase {
            otps: state.otp_repo(),
            notifier: state.mailer(),
        },
    };
    let issued = usecase.execute(&token).await?;
    Ok((
        StatusCode::ACCEPTED,
        Json(SharedOtpResponse {
            otp_required: issued.is_some(),
        }),
    ))
}
