use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::domain::types::Post;
use crate::error::ApiError;
use crate::handlers::{BearerToken, require_subject};
use crate::state::AppState;
use crate::usecase::post::{
    CreatePostInput, CreatePostUseCase, DeletePostUseCase, GetPostUseCase, ListMyPostsUseCase,
    ToggleProtectionUseCase,
};

#[derive(Serialize)]
pub struct PostResponse {
    pub id: String,
    pub user_id: String,
    pub captions: Option<String>,
    pub document: Option<String>,
    pub document_name: Option<String>,
    pub image: Option<String>,
    pub image_name: Option<String>,
    pub video: Option<String>,
    pub video_name: Option<String>,
    pub otp_protected: bool,
    #[serde(serialize_with = "docvault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Post> for PostResponse {
    fn from(post: Post) -> Self {
        Self {
            id: post.id.to_string(),
            user_id: post.user_id.to_string(),
            captions: post.captions,
            document: post.document,
            document_name: post.document_name,
            image: post.image,
            image_name: post.image_name,
            video: post.video,
            video_name: post.video_name,
            otp_protected: post.otp_protected,
            created_at: post.created_at,
        }
    }
}

// ── POST /posts ──────────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreatePostRequest {
    pub captions: Option<String>,
    pub document: Option<String>,
    pub document_name: Option<String>,
    pub image: Option<String>,
    pub image_name: Option<String>,
    pub video: Option<String>,
    pub video_name: Option<String>,
}

pub async fn create_post(
    State(state): State<AppState>,
    bearer: BearerToken,
    Json(body): Json<CreatePostRequest>,
) -> Result<(StatusCode, Json<PostResponse>), ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = CreatePostUseCase {
        posts: state.post_repo(),
        audit: state.audit_log(),
    };
    let post = usecase
        .execute(
            &user,
            CreatePostInput {
                captions: body.captions,
                document: body.document,
                document_name: body.document_name,
                image: body.image,
                image_name: body.image_name,
                video: body.video,
                video_name: body.video_name,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, Json(post.into())))
}

// ── GET /posts/@me ───────────────────────────────────────────────────────────

pub async fn list_my_posts(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> Result<Json<Vec<PostResponse>>, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = ListMyPostsUseCase {
        posts: state.post_repo(),
    };
    let posts = usecase.execute(&user).await?;
    Ok(Json(posts.into_iter().map(Into::into).collect()))
}

// ── GET /posts/{post_id} ─────────────────────────────────────────────────────

pub async fn get_post(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(post_id): Path<Uuid>,
) -> Result<Json<PostResponse>, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = GetPostUseCase {
        posts: state.post_repo(),
    };
    let post = usecase.execute(&user, post_id).await?;
    Ok(Json(post.into()))
}

// ── DELETE /posts/{post_id} ──────────────────────────────────────────────────

pub async fn delete_post(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(post_id): Path<Uuid>,
) -> Result<StatusCode, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = DeletePostUseCase {
        posts: state.post_repo(),
        otps: state.otp_repo(),
        links: state.share_link_repo(),
        audit: state.audit_log(),
    };
    usecase.execute(&user, post_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /posts/{post_id}/protection ─────────────────────────────────────────

#[derive(Deserialize)]
pub struct ToggleProtectionRequest {
    pub enable: bool,
    pub otp_code: String,
}

pub async fn toggle_protection(
    State(state): State<AppState>,
    bearer: BearerToken,
    Path(post_id): Path<Uuid>,
    Json(body): Json<ToggleProtectionRequest>,
) -> Result<Json<PostResponse>, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    let usecase = ToggleProtectionUseCase {
        posts: state.post_repo(),
        otps: state.otp_repo(),
        audit: state.audit_log(),
    };
    let post = usecase
        .execute(&user, post_id, body.enable, &body.otp_code)
        .await?;
    Ok(Json(post.into()))
}
