//! OTP issuance and validation.
//!
//! Invariant: at most one unused, unexpired code exists per (post, user) pair.
//! Issuing supersedes any prior live code; validation consumes atomically.

use chrono::{Duration, Utc};
use rand::RngExt;
use uuid::Uuid;

use crate::domain::repository::{Notifier, OtpRepository};
use crate::domain::types::{OTP_LENGTH, OTP_TTL_SECS, Otp, Post, User};
use crate::error::ApiError;

/// Zero-padded numeric code, uniform over the full 6-digit range.
fn generate_code() -> String {
    let mut rng = rand::rng();
    let n: u32 = rng.random_range(0..10u32.pow(OTP_LENGTH as u32));
    format!("{n:0width$}", width = OTP_LENGTH)
}

// ── IssueOtp ─────────────────────────────────────────────────────────────────

pub struct IssueOtpUseCase<O, N>
where
    O: OtpRepository,
    N: Notifier,
{
    pub otps: O,
    pub notifier: N,
}

impl<O, N> IssueOtpUseCase<O, N>
where
    O: OtpRepository,
    N: Notifier,
{
    /// Supersede any live code for (post, user), persist a fresh one, then
    /// email it to the user. A delivery failure surfaces as
    /// `NotificationFailed` but does not roll back the stored code — retrying
    /// goes through the supersede path again instead of erroring on a
    /// still-live duplicate.
    pub async fn execute(&self, post: &Post, user: &User) -> Result<Otp, ApiError> {
        let now = Utc::now();
        let otp = Otp {
            id: Uuid::new_v4(),
            code: generate_code(),
            email: user.email.clone(),
            post_id: post.id,
            user_id: user.id,
            expires_at: now + Duration::seconds(OTP_TTL_SECS),
            used: false,
            created_at: now,
        };

        self.otps.supersede_and_insert(&otp).await?;

        let subject = "Docvault OTP verification";
        let body = format!(
            "Your OTP for \"{}\" is: {}\nThis code expires in {} minutes.",
            post.file_name(),
            otp.code,
            OTP_TTL_SECS / 60,
        );
        // Sequenced after the commit; no transaction is held open across the
        // mail call.
        self.notifier.send(&otp.email, subject, &body).await?;

        Ok(otp)
    }
}

// ── ValidateOtp ──────────────────────────────────────────────────────────────

pub struct ValidateOtpUseCase<O: OtpRepository> {
    pub otps: O,
}

impl<O: OtpRepository> ValidateOtpUseCase<O> {
    /// Consume a live code matching (code, post, user). Codes are scoped to
    /// the pair, never globally unique, so all three filters always apply.
    pub async fn execute(&self, code: &str, post: &Post, user: &User) -> Result<(), ApiError> {
        let consumed = self
            .otps
            .consume(code.trim(), post.id, user.id, Utc::now())
            .await?;
        if !consumed {
            return Err(ApiError::InvalidOrExpiredOtp);
        }
        Ok(())
    }
}
