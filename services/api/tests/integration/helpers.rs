use std::sync::{Arc, Mutex};

use chrono::{DateTime, Duration, Utc};
use uuid::Uuid;

use docvault_api::domain::repository::{
    AuditLogPort, Notifier, OtpRepository, PostRepository, ShareLinkRepository, UserRepository,
};
use docvault_api::domain::types::{AuditEntry, Otp, Post, ShareLink, User};
use docvault_api::error::ApiError;

// ── MockUserRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockUserRepo {
    pub users: Arc<Mutex<Vec<User>>>,
}

impl MockUserRepo {
    pub fn new(users: Vec<User>) -> Self {
        Self {
            users: Arc::new(Mutex::new(users)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl UserRepository for MockUserRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        self.users.lock().unwrap().push(user.clone());
        Ok(())
    }
}

// ── MockPostRepo ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockPostRepo {
    pub posts: Arc<Mutex<Vec<Post>>>,
}

impl MockPostRepo {
    pub fn new(posts: Vec<Post>) -> Self {
        Self {
            posts: Arc::new(Mutex::new(posts)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }
}

impl PostRepository for MockPostRepo {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .find(|p| p.id == id)
            .cloned())
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Post>, ApiError> {
        Ok(self
            .posts
            .lock()
            .unwrap()
            .iter()
            .filter(|p| p.user_id == user_id)
            .cloned()
            .collect())
    }

    async fn create(&self, post: &Post) -> Result<(), ApiError> {
        self.posts.lock().unwrap().push(post.clone());
        Ok(())
    }

    async fn set_protection(&self, post_id: Uuid, enabled: bool) -> Result<(), ApiError> {
        let mut posts = self.posts.lock().unwrap();
        if let Some(p) = posts.iter_mut().find(|p| p.id == post_id) {
            p.otp_protected = enabled;
        }
        Ok(())
    }

    async fn delete(&self, post_id: Uuid) -> Result<(), ApiError> {
        self.posts.lock().unwrap().retain(|p| p.id != post_id);
        Ok(())
    }
}

// ── MockOtpRepo ──────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockOtpRepo {
    pub otps: Arc<Mutex<Vec<Otp>>>,
}

impl MockOtpRepo {
    pub fn new(otps: Vec<Otp>) -> Self {
        Self {
            otps: Arc::new(Mutex::new(otps)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle for post-execution inspection.
    pub fn otps_handle(&self) -> Arc<Mutex<Vec<Otp>>> {
        Arc::clone(&self.otps)
    }
}

impl OtpRepository for MockOtpRepo {
    async fn supersede_and_insert(&self, otp: &Otp) -> Result<(), ApiError> {
        let mut otps = self.otps.lock().unwrap();
        for existing in otps.iter_mut() {
            if existing.post_id == otp.post_id
                && existing.user_id == otp.user_id
                && existing.is_live(otp.created_at)
            {
                existing.used = true;
            }
        }
        otps.push(otp.clone());
        Ok(())
    }

    async fn consume(
        &self,
        code: &str,
        post_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        // One critical section for lookup and mark, mirroring the single
        // conditional UPDATE in the real repository.
        let mut otps = self.otps.lock().unwrap();
        match otps.iter_mut().find(|o| {
            o.code == code && o.post_id == post_id && o.user_id == user_id && o.is_live(now)
        }) {
            Some(o) => {
                o.used = true;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn delete_all_for_post(&self, post_id: Uuid) -> Result<(), ApiError> {
        self.otps.lock().unwrap().retain(|o| o.post_id != post_id);
        Ok(())
    }
}

// ── MockShareLinkRepo ────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockShareLinkRepo {
    pub links: Arc<Mutex<Vec<ShareLink>>>,
}

impl MockShareLinkRepo {
    pub fn new(links: Vec<ShareLink>) -> Self {
        Self {
            links: Arc::new(Mutex::new(links)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn links_handle(&self) -> Arc<Mutex<Vec<ShareLink>>> {
        Arc::clone(&self.links)
    }
}

impl ShareLinkRepository for MockShareLinkRepo {
    async fn create(&self, link: &ShareLink) -> Result<(), ApiError> {
        self.links.lock().unwrap().push(link.clone());
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ShareLink>, ApiError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.token == token)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShareLink>, ApiError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .find(|l| l.id == id)
            .cloned())
    }

    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<ShareLink>, ApiError> {
        Ok(self
            .links
            .lock()
            .unwrap()
            .iter()
            .filter(|l| l.post_id == post_id)
            .cloned()
            .collect())
    }

    async fn record_use(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, ApiError> {
        // Check-and-increment under one lock, mirroring the atomic conditional
        // increment in the real repository.
        let mut links = self.links.lock().unwrap();
        match links.iter_mut().find(|l| l.id == id) {
            Some(l) if l.is_valid(now) => {
                l.use_count += 1;
                Ok(true)
            }
            _ => Ok(false),
        }
    }

    async fn deactivate(&self, id: Uuid) -> Result<(), ApiError> {
        let mut links = self.links.lock().unwrap();
        if let Some(l) = links.iter_mut().find(|l| l.id == id) {
            l.active = false;
        }
        Ok(())
    }

    async fn deactivate_all_for_post(&self, post_id: Uuid) -> Result<(), ApiError> {
        let mut links = self.links.lock().unwrap();
        for l in links.iter_mut().filter(|l| l.post_id == post_id) {
            l.active = false;
        }
        Ok(())
    }
}

// ── MockAuditLog ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockAuditLog {
    pub entries: Arc<Mutex<Vec<AuditEntry>>>,
    pub fail: bool,
}

impl MockAuditLog {
    pub fn empty() -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            entries: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    pub fn entries_handle(&self) -> Arc<Mutex<Vec<AuditEntry>>> {
        Arc::clone(&self.entries)
    }
}

impl AuditLogPort for MockAuditLog {
    async fn record(&self, entry: &AuditEntry) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::Internal(anyhow::anyhow!("audit sink down")));
        }
        self.entries.lock().unwrap().push(entry.clone());
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AuditEntry>, ApiError> {
        let mut entries: Vec<_> = self
            .entries
            .lock()
            .unwrap()
            .iter()
            .filter(|e| e.user_id == user_id)
            .cloned()
            .collect();
        entries.sort_by_key(|e| std::cmp::Reverse(e.created_at));
        Ok(entries)
    }
}

// ── MockNotifier ─────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct MockNotifier {
    pub sent: Arc<Mutex<Vec<(String, String, String)>>>,
    pub fail: bool,
}

impl MockNotifier {
    pub fn working() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: false,
        }
    }

    pub fn failing() -> Self {
        Self {
            sent: Arc::new(Mutex::new(vec![])),
            fail: true,
        }
    }

    pub fn sent_handle(&self) -> Arc<Mutex<Vec<(String, String, String)>>> {
        Arc::clone(&self.sent)
    }
}

impl Notifier for MockNotifier {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
        if self.fail {
            return Err(ApiError::NotificationFailed);
        }
        self.sent
            .lock()
            .unwrap()
            .push((to.to_owned(), subject.to_owned(), body.to_owned()));
        Ok(())
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub fn test_user() -> User {
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        email: "owner@example.com".to_owned(),
        first_name: "Ada".to_owned(),
        last_name: "Lovelace".to_owned(),
        password_hash: String::new(),
        created_at: Utc::now(),
    }
}

pub fn other_user() -> User {
    User {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000002").unwrap(),
        email: "intruder@example.com".to_owned(),
        first_name: "Eve".to_owned(),
        last_name: "Mallory".to_owned(),
        password_hash: String::new(),
        created_at: Utc::now(),
    }
}

pub fn test_post(user_id: Uuid) -> Post {
    Post {
        id: Uuid::new_v4(),
        user_id,
        captions: Some("quarterly report".to_owned()),
        document: Some("https://cdn.example.com/q3.pdf".to_owned()),
        document_name: Some("q3.pdf".to_owned()),
        image: None,
        image_name: None,
        video: None,
        video_name: None,
        otp_protected: false,
        created_at: Utc::now(),
    }
}

pub fn live_otp(post_id: Uuid, user_id: Uuid, code: &str) -> Otp {
    let now = Utc::now();
    Otp {
        id: Uuid::new_v4(),
        code: code.to_owned(),
        email: "owner@example.com".to_owned(),
        post_id,
        user_id,
        expires_at: now + Duration::minutes(5),
        used: false,
        created_at: now,
    }
}

pub fn live_link(post_id: Uuid, max_uses: Option<i32>) -> ShareLink {
    let now = Utc::now();
    ShareLink {
        id: Uuid::new_v4(),
        token: Uuid::new_v4().to_string(),
        post_id,
        expires_at: now + Duration::hours(1),
        max_uses,
        use_count: 0,
        active: true,
        created_at: now,
    }
}
