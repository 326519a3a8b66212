//! Public share access: the composition of the link-validity gate and the
//! OTP gate for anonymous visitors.
//!
//! For a protected post the OTP is always validated against the post OWNER,
//! not the visitor — codes are delivered to the owner's mailbox and shared
//! with the visitor out-of-band. This conflation is the existing contract;
//! changing it would change the security model.

use chrono::Utc;

use crate::domain::repository::{
    Notifier, OtpRepository, PostRepository, ShareLinkRepository, UserRepository,
};
use crate::domain::types::{Otp, Post, ShareLink};
use crate::error::ApiError;
use crate::usecase::otp::IssueOtpUseCase;

async fn resolve_valid_link<L: ShareLinkRepository>(
    links: &L,
    token: &str,
) -> Result<ShareLink, ApiError> {
    // LinkNotFound vs InvalidOrExpiredLink matters only for logging; both
    // serialize identically so the public surface leaks nothing about which
    // tokens exist.
    let link = links
        .find_by_token(token)
        .await?
        .ok_or(ApiError::LinkNotFound)?;
    if !link.is_valid(Utc::now()) {
        tracing::debug!(link_id = %link.id, "share link lapsed");
        return Err(ApiError::InvalidOrExpiredLink);
    }
    Ok(link)
}

// ── AccessShared ─────────────────────────────────────────────────────────────

pub struct AccessSharedUseCase<L, P, O>
where
    L: ShareLinkRepository,
    P: PostRepository,
    O: OtpRepository,
{
    pub links: L,
    pub posts: P,
    pub otps: O,
}

impl<L, P, O> AccessSharedUseCase<L, P, O>
where
    L: ShareLinkRepository,
    P: PostRepository,
    O: OtpRepository,
{
    /// Gate order: link validity → OTP (when the post is protected) → atomic
    /// use-count increment. The increment runs only after every gate passes,
    /// exactly once per successful access and never on a failed OTP attempt.
    pub async fn execute(&self, token: &str, otp_code: Option<&str>) -> Result<Post, ApiError> {
        let link = resolve_valid_link(&self.links, token).await?;
        let post = self
            .posts
            .find_by_id(link.post_id)
            .await?
            .ok_or(ApiError::PostNotFound)?;

        if post.otp_protected {
            let code = match otp_code.map(str::trim) {
                Some(c) if !c.is_empty() => c,
                // Missing code is a distinct, recoverable state: the visitor
                // is told to request an OTP, not that the link is bad.
                _ => return Err(ApiError::OtpRequired),
            };
            let consumed = self
                .otps
                .consume(code, post.id, post.user_id, Utc::now())
                .await?;
            if !consumed {
                return Err(ApiError::InvalidOrExpiredOtp);
            }
        }

        // "Increment iff still valid" — a concurrent access may have taken the
        // last use between the resolve above and here; losing that race means
        // this access fails like any lapsed link.
        let recorded = self.links.record_use(link.id, Utc::now()).await?;
        if !recorded {
            return Err(ApiError::InvalidOrExpiredLink);
        }

        Ok(post)
    }
}

// ── RequestSharedOtp ─────────────────────────────────────────────────────────

pub struct RequestSharedOtpUseCase<L, P, U, O, N>
where
    L: ShareLinkRepository,
    P: PostRepository,
    U: UserRepository,
    O: OtpRepository,
    N: Notifier,
{
    pub links: L,
    pub posts: P,
    pub users: U,
    pub issue_otp: IssueOtpUseCase<O, N>,
}

impl<L, P, U, O, N> RequestSharedOtpUseCase<L, P, U, O, N>
where
    L: ShareLinkRepository,
    P: PostRepository,
    U: UserRepository,
    O: OtpRepository,
    N: Notifier,
{
    /// Issue an OTP to the post owner for a valid link. Returns `None` when
    /// the post is not protected (nothing to send), `Some(otp)` otherwise.
    pub async fn execute(&self, token: &str) -> Result<Option<Otp>, ApiError> {
        let link = resolve_valid_link(&self.links, token).await?;
        let post = self
            .posts
            .find_by_id(link.post_id)
            .await?
            .ok_or(ApiError::PostNotFound)?;

        if !post.otp_protected {
            return Ok(None);
        }

        let owner = self
            .users
            .find_by_id(post.user_id)
            .await?
            .ok_or(ApiError::UserNotFound)?;

        let otp = self.issue_otp.execute(&post, &owner).await?;
        Ok(Some(otp))
    }
}
