use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::ShareLink;
use crate::error::ApiError;
use crate::handlers::{BearerToken, require_subject};
use crate::state::AppState;
use crate::usecase::share_link::{
    CreateShareLinkInput, CreateShareLinkUseCase, DeactivateShareLinkUseCase,
    ListShareLinksUseCase, share_url,
};

#[derive(Serialize)]
pub struct ShareLinkResponse {
    pub id: String,
    pub token: String,
    pub url: String,
    pub post_id: String,
    #[serde(serialize_with = "docvault_core::serde::to_rfc3339_ms")]
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub max_uses: Option<i32>,
    pub use_count: i32,
    pub active: bool,
    #[serde(serialize_with = "docvault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

fn link_response(link: ShareLink, base_url: &str) -> ShareLinkResponse {
    ShareLinkResponse {
        id: link.id.to_string(),
        url: share_url(base_url, &link.token),
        token: link.token,
        post_id: link.post_id.to_string(),
        expires_at: link.expires_at,
        max_uses: link.max_uses,
        use_count: link.use_count,
        active: link.active,
        created_at: link.created_at,
    }
}

// ── POST /posts/{post_id}/share-links ────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateShareLinkRequest {
    pub expires_at: chrono::DateTime<chrono::Utc>,
    pub max_uses: Option<i32>,
}

pub async fn create_share_link(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(post_id): Path<Uuid>,
    Json(body): Json<CreateShareLinkRequest>,
) -> Result<(StatusCode, Json<ShareLinkResponse>), ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = CreateShareLinkUseCase {
        posts: state.post_repo(),
        links: state.share_link_repo(),
    };
    let link = usecase
        .execute(
            &user,
            CreateShareLinkInput {
                post_id,
                expires_at: body.expires_at,
                max_uses: body.max_uses,
            },
        )
        .await?;
    Ok((
        StatusCode::CREATED,
        Json(link_response(link, &state.share_base_url)),
    ))
}

// ── GET /posts/{post_id}/share-links ─────────────────────────────────────────

pub async fn list_share_links(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(post_id): Path<Uuid>,
) -> Result<Json<Vec<ShareLinkResponse>>, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = ListShareLinksUseCase {
        posts: state.post_repo(),
        links: state.share_link_repo(),
    };
    let links = usecase.execute(&user, post_id).await?;
    Ok(Json(
        links
            .into_iter()
            .map(|l| link_response(l, &state.share_base_url))
            .collect(),
    ))
}

// ── DELETE /share-links/{link_id} ────────────────────────────────────────────

pub async fn deactivate_share_link(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(link_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = DeactivateShareLinkUseCase {
        posts: state.post_repo(),
        links: state.share_link_repo(),
    };
    usecase.execute(&user, link_id).await?;
    Ok(StatusCode::NO_CONTENT)
}
