#![allow(async_fn_in_trait)]

use chrono::{DateTime, Utc};
use uuid::Uuid;

use crate::domain::types::{AuditEntry, Otp, Post, ShareLink, User};
use crate::error::ApiError;

/// Repository for registered accounts.
pub trait UserRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError>;
    async fn create(&self, user: &User) -> Result<(), ApiError>;
}

/// Repository for shareable post entries.
pub trait PostRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError>;
    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Post>, ApiError>;
    async fn create(&self, post: &Post) -> Result<(), ApiError>;
    async fn set_protection(&self, post_id: Uuid, enabled: bool) -> Result<(), ApiError>;
    async fn delete(&self, post_id: Uuid) -> Result<(), ApiError>;
}

/// Repository for one-time passcodes.
pub trait OtpRepository: Send + Sync {
    /// Mark any unused, unexpired code for `(otp.post_id, otp.user_id)` as used
    /// and insert `otp`, in one transaction. Upholds the single-live-code
    /// invariant even when issue requests race.
    async fn supersede_and_insert(&self, otp: &Otp) -> Result<(), ApiError>;

    /// Atomically consume a live code matching (code, post, user): the lookup
    /// and the `used = true` write are one conditional update, so a code can
    /// never validate twice. Returns `false` when no live match exists.
    async fn consume(
        &self,
        code: &str,
        post_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError>;

    /// Purge every code for a post (post deletion cascade).
    async fn delete_all_for_post(&self, post_id: Uuid) -> Result<(), ApiError>;
}

/// Repository for share links.
pub trait ShareLinkRepository: Send + Sync {
    async fn create(&self, link: &ShareLink) -> Result<(), ApiError>;
    async fn find_by_token(&self, token: &str) -> Result<Option<ShareLink>, ApiError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShareLink>, ApiError>;
    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<ShareLink>, ApiError>;

    /// Conditional increment: bump `use_count` iff the link is still valid at
    /// `now` (active, unexpired, under quota). The validity check and the
    /// increment are one atomic statement — two racing calls against a link
    /// with one remaining use must produce exactly one `true`.
    async fn record_use(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, ApiError>;

    /// Idempotently set `active = false`.
    async fn deactivate(&self, id: Uuid) -> Result<(), ApiError>;

    /// Deactivate every link for a post (post deletion cascade).
    async fn deactivate_all_for_post(&self, post_id: Uuid) -> Result<(), ApiError>;
}

/// Best-effort audit sink. Callers log and swallow `record` failures — the
/// primary operation must never fail because of audit writes.
pub trait AuditLogPort: Send + Sync {
    async fn record(&self, entry: &AuditEntry) -> Result<(), ApiError>;
    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AuditEntry>, ApiError>;
}

/// Outbound mail delivery.
pub trait Notifier: Send + Sync {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError>;
}
