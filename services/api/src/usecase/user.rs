use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::SaltString;
use argon2::{Argon2, PasswordHash, PasswordHasher, PasswordVerifier};
use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::UserRepository;
use crate::domain::types::User;
use crate::error::ApiError;

fn hash_password(password: &str) -> Result<String, ApiError> {
    let salt = SaltString::generate(&mut OsRng);
    let hash = Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map_err(|e| ApiError::Internal(anyhow::anyhow!("hash password: {e}")))?;
    Ok(hash.to_string())
}

fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

// ── Register ─────────────────────────────────────────────────────────────────

pub struct RegisterInput {
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password: String,
}

pub struct RegisterUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> RegisterUseCase<U> {
    pub async fn execute(&self, input: RegisterInput) -> Result<User, ApiError> {
        if self.users.find_by_email(&input.email).await?.is_some() {
            return Err(ApiError::EmailTaken);
        }
        let user = User {
            id: Uuid::new_v4(),
            email: input.email,
            first_name: input.first_name,
            last_name: input.last_name,
            password_hash: hash_password(&input.password)?,
            created_at: Utc::now(),
        };
        self.users.create(&user).await?;
        Ok(user)
    }
}

// ── Login ────────────────────────────────────────────────────────────────────

pub struct LoginInput {
    pub email: String,
    pub password: String,
}

pub struct LoginUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> LoginUseCase<U> {
    pub async fn execute(&self, input: LoginInput) -> Result<User, ApiError> {
        // Unknown email and wrong password both report InvalidCredential so the
        // login surface does not confirm which addresses are registered.
        let user = self
            .users
            .find_by_email(&input.email)
            .await?
            .ok_or(ApiError::InvalidCredential)?;
        if !verify_password(&input.password, &user.password_hash) {
            return Err(ApiError::InvalidCredential);
        }
        Ok(user)
    }
}

// ── GetUser ──────────────────────────────────────────────────────────────────

pub struct GetUserUseCase<U: UserRepository> {
    pub users: U,
}

impl<U: UserRepository> GetUserUseCase<U> {
    pub async fn execute(&self, id: Uuid) -> Result<User, ApiError> {
        self.users
            .find_by_id(id)
            .await?
            .ok_or(ApiError::UserNotFound)
    }
}
