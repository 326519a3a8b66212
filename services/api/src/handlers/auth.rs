use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

use crate::error::ApiError;
use crate::handlers::{BearerToken, require_subject};
use crate::state::AppState;
use crate::usecase::identity::issue_token;
use crate::usecase::user::{LoginInput, LoginUseCase, RegisterInput, RegisterUseCase};

#[derive(Serialize)]
pub struct UserResponse {
    pub id: String,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    #[serde(serialize_with = "docvault_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<crate::domain::types::User> for UserResponse {
    fn from(user: crate::domain::types::User) -> Self {
        Self {
            id: user.id.to_string(),
            email: user.email,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

// ── POST /auth/register ──────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct RegisterRequest {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub async fn register(
    State(state): State<AppState>,
    Json(body): Json<RegisterRequest>,
) -> Result<(StatusCode, Json<UserResponse>), ApiError> {
    let usecase = RegisterUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(RegisterInput {
            email: body.email,
            first_name: body.first_name,
            last_name: body.last_name,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, Json(user.into())))
}

// ── POST /auth/login ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct LoginResponse {
    pub access_token: String,
    pub access_token_exp: u64,
}

pub async fn login(
    State(state): State<AppState>,
    Json(body): Json<LoginRequest>,
) -> Result<Json<LoginResponse>, ApiError> {
    let usecase = LoginUseCase {
        users: state.user_repo(),
    };
    let user = usecase
        .execute(LoginInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    let (access_token, access_token_exp) = issue_token(&user, &state.jwt_secret)?;
    Ok(Json(LoginResponse {
        access_token,
        access_token_exp,
    }))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    State(state): State<AppState>,
    bearer: BearerToken,
) -> Result<Json<UserResponse>, ApiError> {
    let user = require_subject(&state, &bearer).await?;
    Ok(Json(user.into()))
}
