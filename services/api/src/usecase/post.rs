use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::{AuditLogPort, OtpRepository, PostRepository, ShareLinkRepository};
use crate::domain::types::{AuditAction, Post, User};
use crate::error::ApiError;
use crate::usecase::audit::record_best_effort;

// ── CreatePost ───────────────────────────────────────────────────────────────

pub struct CreatePostInput {
    pub captions: Option<String>,
    pub document: Option<String>,
    pub document_name: Option<String>,
    pub image: Option<String>,
    pub image_name: Option<String>,
    pub video: Option<String>,
    pub video_name: Option<String>,
}

pub struct CreatePostUseCase<P, A>
where
    P: PostRepository,
    A: AuditLogPort,
{
    pub posts: P,
    pub audit: A,
}

impl<P, A> CreatePostUseCase<P, A>
where
    P: PostRepository,
    A: AuditLogPort,
{
    pub async fn execute(&self, user: &User, input: CreatePostInput) -> Result<Post, ApiError> {
        let post = Post {
            id: Uuid::new_v4(),
            user_id: user.id,
            captions: input.captions,
            document: input.document,
            document_name: input.document_name,
            image: input.image,
            image_name: input.image_name,
            video: input.video,
            video_name: input.video_name,
            otp_protected: false,
            created_at: Utc::now(),
        };
        self.posts.create(&post).await?;
        record_best_effort(&self.audit, user.id, AuditAction::Upload, post.file_name()).await;
        Ok(post)
    }
}

// ── GetPost / ListPosts ──────────────────────────────────────────────────────

pub struct GetPostUseCase<P: PostRepository> {
    pub posts: P,
}

impl<P: PostRepository> GetPostUseCase<P> {
    /// Owner-only. Post payload columns hold the raw blob URLs; anyone else
    /// reaches a post exclusively through the share-link surface and its
    /// gates.
    pub async fn execute(&self, user: &User, post_id: Uuid) -> Result<Post, ApiError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(ApiError::PostNotFound)?;
        if post.user_id != user.id {
            return Err(ApiError::Forbidden);
        }
        Ok(post)
    }
}

pub struct ListMyPostsUseCase<P: PostRepository> {
    pub posts: P,
}

impl<P: PostRepository> ListMyPostsUseCase<P> {
    pub async fn execute(&self, user: &User) -> Result<Vec<Post>, ApiError> {
        self.posts.list_by_owner(user.id).await
    }
}

// ── DeletePost ───────────────────────────────────────────────────────────────

pub struct DeletePostUseCase<P, O, L, A>
where
    P: PostRepository,
    O: OtpRepository,
    L: ShareLinkRepository,
    A: AuditLogPort,
{
    pub posts: P,
    pub otps: O,
    pub links: L,
    pub audit: A,
}

impl<P, O, L, A> DeletePostUseCase<P, O, L, A>
where
    P: PostRepository,
    O: OtpRepository,
    L: ShareLinkRepository,
    A: AuditLogPort,
{
    /// Owner-only. Deactivates every share link and purges every OTP for the
    /// post before the row goes away, so no dangling validation targets
    /// survive the delete.
    pub async fn execute(&self, user: &User, post_id: Uuid) -> Result<(), ApiError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(ApiError::PostNotFound)?;
        if post.user_id != user.id {
            return Err(ApiError::Forbidden);
        }

        self.links.deactivate_all_for_post(post_id).await?;
        self.otps.delete_all_for_post(post_id).await?;
        record_best_effort(&self.audit, user.id, AuditAction::Delete, post.file_name()).await;
        self.posts.delete(post_id).await
    }
}

// ── ToggleProtection ─────────────────────────────────────────────────────────

pub struct ToggleProtectionUseCase<P, O, A>
where
    P: PostRepository,
    O: OtpRepository,
    A: AuditLogPort,
{
    pub posts: P,
    pub otps: O,
    pub audit: A,
}

impl<P, O, A> ToggleProtectionUseCase<P, O, A>
where
    P: PostRepository,
    O: OtpRepository,
    A: AuditLogPort,
{
    /// Step-up mutation: ownership alone is not enough — the caller must also
    /// consume a live OTP in the same request. On a failed OTP the flag is
    /// untouched and no audit entry is written.
    pub async fn execute(
        &self,
        user: &User,
        post_id: Uuid,
        enable: bool,
        otp_code: &str,
    ) -> Result<Post, ApiError> {
        let post = self
            .posts
            .find_by_id(post_id)
            .await?
            .ok_or(ApiError::PostNotFound)?;
        if post.user_id != user.id {
            return Err(ApiError::Forbidden);
        }

        // Atomic consume — the same discipline as ValidateOtpUseCase, applied
        // before the flag mutation so a failed code changes nothing.
        let consumed = self
            .otps
            .consume(otp_code.trim(), post.id, user.id, Utc::now())
            .await?;
        if !consumed {
            return Err(ApiError::InvalidOrExpiredOtp);
        }

        self.posts.set_protection(post_id, enable).await?;

        let action = if enable {
            AuditAction::EnableOtp
        } else {
            AuditAction::DisableOtp
        };
        record_best_effort(&self.audit, user.id, action, post.file_name()).await;

        Ok(Post {
            otp_protected: enable,
            ..post
        })
    }
}
