use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::repository::{PostRepository, ShareLinkRepository};
use crate::domain::types::{Post, ShareLink, User};
use crate::error::ApiError;

/// Render the public URL for a link token.
pub fn share_url(base_url: &str, token: &str) -> String {
    format!("{}/shared/{}", base_url.trim_end_matches('/'), token)
}

async fn find_owned_post<P: PostRepository>(
    posts: &P,
    user: &User,
    post_id: Uuid,
) -> Result<Post, ApiError> {
    let post = posts
        .find_by_id(post_id)
        .await?
        .ok_or(ApiError::PostNotFound)?;
    if post.user_id != user.id {
        return Err(ApiError::Forbidden);
    }
    Ok(post)
}

// ── CreateShareLink ──────────────────────────────────────────────────────────

pub struct CreateShareLinkInput {
    pub post_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub max_uses: Option<i32>,
}

pub struct CreateShareLinkUseCase<P, L>
where
    P: PostRepository,
    L: ShareLinkRepository,
{
    pub posts: P,
    pub links: L,
}

impl<P, L> CreateShareLinkUseCase<P, L>
where
    P: PostRepository,
    L: ShareLinkRepository,
{
    pub async fn execute(&self, user: &User, input: CreateShareLinkInput) -> Result<ShareLink, ApiError> {
        find_owned_post(&self.posts, user, input.post_id).await?;

        let now = Utc::now();
        if input.expires_at <= now {
            return Err(ApiError::InvalidExpiry);
        }
        if input.max_uses.is_some_and(|max| max <= 0) {
            return Err(ApiError::InvalidExpiry);
        }

        let link = ShareLink {
            id: Uuid::new_v4(),
            // v4 UUID: 122 random bits, not derivable from any sequence.
            token: Uuid::new_v4().to_string(),
            post_id: input.post_id,
            expires_at: input.expires_at,
            max_uses: input.max_uses,
            use_count: 0,
            active: true,
            created_at: now,
        };
        self.links.create(&link).await?;
        Ok(link)
    }
}

// ── ListShareLinks ───────────────────────────────────────────────────────────

pub struct ListShareLinksUseCase<P, L>
where
    P: PostRepository,
    L: ShareLinkRepository,
{
    pub posts: P,
    pub links: L,
}

impl<P, L> ListShareLinksUseCase<P, L>
where
    P: PostRepository,
    L: ShareLinkRepository,
{
    pub async fn execute(&self, user: &User, post_id: Uuid) -> Result<Vec<ShareLink>, ApiError> {
        find_owned_post(&self.posts, user, post_id).await?;
        self.links.list_by_post(post_id).await
    }
}

// ── DeactivateShareLink ──────────────────────────────────────────────────────

pub struct DeactivateShareLinkUseCase<P, L>
where
    P: PostRepository,
    L: ShareLinkRepository,
{
    pub posts: P,
    pub links: L,
}

impl<P, L> DeactivateShareLinkUseCase<P, L>
where
    P: PostRepository,
    L: ShareLinkRepository,
{
    /// Owner-only, idempotent: deactivating an already-inactive link succeeds.
    pub async fn execute(&self, user: &User, link_id: Uuid) -> Result<(), ApiError> {
        let link = self
            .links
            .find_by_id(link_id)
            .await?
            .ok_or(ApiError::LinkNotFound)?;
        find_owned_post(&self.posts, user, link.post_id).await?;
        self.links.deactivate(link_id).await
    }
}
