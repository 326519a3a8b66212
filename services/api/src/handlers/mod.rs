pub mod audit;
pub mod auth;
pub mod otp;
pub mod post;
pub mod share;
pub mod shared;

use axum_extra::TypedHeader;
use axum_extra::headers::Authorization;
use axum_extra::headers::authorization::Bearer;

use crate::domain::types::User;
use crate::error::ApiError;
use crate::state::AppState;
use crate::usecase::identity::ResolveSubjectUseCase;

/// Shorthand for the bearer-token extractor used by every protected handler.
pub type BearerToken = TypedHeader<Authorization<Bearer>>;

/// Resolve the request's bearer token to a registered user.
pub(crate) async fn require_subject(
    state: &AppState,
    bearer: &BearerToken,
) -> Result<User, ApiError> {
    let usecase = ResolveSubjectUseCase {
        users: state.user_repo(),
        jwt_secret: state.jwt_secret.clone(),
    };
    usecase.execute(bearer.token()).await
}
