//! Bearer-credential validation and subject resolution.
//!
//! Handlers pass the raw bearer token here and receive a resolved [`User`];
//! nothing downstream of this module ever sees a credential.

use jsonwebtoken::{DecodingKey, EncodingKey, Header, Validation, decode, encode};
use serde::{Deserialize, Serialize};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::domain::repository::UserRepository;
use crate::domain::types::{ACCESS_TOKEN_TTL_SECS, User};
use crate::error::ApiError;

/// JWT claims for access tokens. `sub` carries the subject's email.
#[derive(Debug, Serialize, Deserialize)]
pub struct TokenClaims {
    pub sub: String,
    pub exp: u64,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

pub fn issue_token(user: &User, secret: &str) -> Result<(String, u64), ApiError> {
    let exp = now_secs() + ACCESS_TOKEN_TTL_SECS;
    let claims = TokenClaims {
        sub: user.email.clone(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| ApiError::Internal(e.into()))?;
    Ok((token, exp))
}

/// Validate a bearer token and return its email claim.
///
/// Any parse, signature, or expiry failure collapses into `InvalidCredential` —
/// a malformed credential is distinct from an unknown subject, which the
/// caller reports as `UserNotFound` after the email lookup.
pub fn validate_token(token: &str, secret: &str) -> Result<String, ApiError> {
    let mut validation = Validation::new(jsonwebtoken::Algorithm::HS256);
    validation.validate_exp = true;
    validation.required_spec_claims.clear();
    validation.set_required_spec_claims(&["exp", "sub"]);

    let data = decode::<TokenClaims>(
        token,
        &DecodingKey::from_secret(secret.as_bytes()),
        &validation,
    )
    .map_err(|_| ApiError::InvalidCredential)?;

    Ok(data.claims.sub)
}

pub struct ResolveSubjectUseCase<U: UserRepository> {
    pub users: U,
    pub jwt_secret: String,
}

impl<U: UserRepository> ResolveSubjectUseCase<U> {
    pub async fn execute(&self, bearer: &str) -> Result<User, ApiError> {
        let email = validate_token(bearer, &self.jwt_secret)?;
        self.users
            .find_by_email(&email)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}
