use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Registered account. Immutable identity; email is the identity-assertion key.
#[derive(Debug, Clone)]
pub struct User {
    pub id: Uuid,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
}

/// Shareable file entry, exclusively owned by one user for its whole lifetime.
/// Payload fields are external blob URLs paired with human-readable names.
#[derive(Debug, Clone)]
pub struct Post {
    pub id: Uuid,
    pub user_id: Uuid,
    pub captions: Option<String>,
    pub document: Option<String>,
    pub document_name: Option<String>,
    pub image: Option<String>,
    pub image_name: Option<String>,
    pub video: Option<String>,
    pub video_name: Option<String>,
    pub otp_protected: bool,
    pub created_at: DateTime<Utc>,
}

impl Post {
    /// Display label for audit entries and OTP emails: first payload name present.
    pub fn file_name(&self) -> &str {
        self.document_name
            .as_deref()
            .or(self.image_name.as_deref())
            .or(self.video_name.as_deref())
            .unwrap_or("unknown")
    }

    /// First http(s) payload URL, checked in document → image → video order.
    pub fn file_url(&self) -> Option<&str> {
        [&self.document, &self.image, &self.video]
            .into_iter()
            .filter_map(|u| u.as_deref())
            .find(|u| u.starts_with("http://") || u.starts_with("https://"))
    }
}

/// One-time passcode scoped to a (post, user) pair.
#[derive(Debug, Clone)]
pub struct Otp {
    pub id: Uuid,
    pub code: String,
    pub email: String,
    pub post_id: Uuid,
    pub user_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub used: bool,
    pub created_at: DateTime<Utc>,
}

impl Otp {
    /// Unconsumed and unexpired at `now`. Boundary `now == expires_at` is expired.
    pub fn is_live(&self, now: DateTime<Utc>) -> bool {
        !self.used && self.expires_at > now
    }
}

/// Unguessable token granting time/use-bounded access to a post.
#[derive(Debug, Clone)]
pub struct ShareLink {
    pub id: Uuid,
    pub token: String,
    pub post_id: Uuid,
    pub expires_at: DateTime<Utc>,
    pub max_uses: Option<i32>,
    pub use_count: i32,
    pub active: bool,
    pub created_at: DateTime<Utc>,
}

impl ShareLink {
    /// Validity is a pure predicate evaluated at access time — there is no
    /// background sweeper. Boundary `now == expires_at` is expired.
    pub fn is_valid(&self, now: DateTime<Utc>) -> bool {
        self.active
            && self.expires_at > now
            && self.max_uses.is_none_or(|max| self.use_count < max)
    }
}

/// Audit trail entry.
#[derive(Debug, Clone)]
pub struct AuditEntry {
    pub id: Uuid,
    pub user_id: Uuid,
    pub action: AuditAction,
    pub file_name: String,
    pub created_at: DateTime<Utc>,
}

/// Recorded owner-side actions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AuditAction {
    Upload,
    Delete,
    EnableOtp,
    DisableOtp,
}

impl AuditAction {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Upload => "UPLOAD",
            Self::Delete => "DELETE",
            Self::EnableOtp => "ENABLE_OTP",
            Self::DisableOtp => "DISABLE_OTP",
        }
    }

    /// Parse a stored action string. Unknown values are preserved rows from
    /// older deployments and have no enum counterpart.
    pub fn from_str(s: &str) -> Option<Self> {
        match s {
            "UPLOAD" => Some(Self::Upload),
            "DELETE" => Some(Self::Delete),
            "ENABLE_OTP" => Some(Self::EnableOtp),
            "DISABLE_OTP" => Some(Self::DisableOtp),
            _ => None,
        }
    }
}

/// OTP code length in digits.
pub const OTP_LENGTH: usize = 6;

/// OTP time-to-live in seconds.
pub const OTP_TTL_SECS: i64 = 300;

/// Access token time-to-live in seconds (24 hours).
pub const ACCESS_TOKEN_TTL_SECS: u64 = 86_400;
