use sea_orm::DatabaseConnection;

use crate::infra::db::{
    DbAuditLogRepository, DbOtpRepository, DbPostRepository, DbShareLinkRepository,
    DbUserRepository,
};
use crate::infra::mailer::HttpMailer;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub http: reqwest::Client,
    pub jwt_secret: String,
    pub mail_relay_url: String,
    pub mail_from: String,
    pub share_base_url: String,
}

impl AppState {
    pub fn user_repo(&self) -> DbUserRepository {
        DbUserRepository {
            db: self.db.clone(),
        }
    }

    pub fn post_repo(&self) -> DbPostRepository {
        DbPostRepository {
            db: self.db.clone(),
        }
    }

    pub fn otp_repo(&self) -> DbOtpRepository {
        DbOtpRepository {
            db: self.db.clone(),
        }
    }

    pub fn share_link_repo(&self) -> DbShareLinkRepository {
        DbShareLinkRepository {
            db: self.db.clone(),
        }
    }

    pub fn audit_log(&self) -> DbAuditLogRepository {
        DbAuditLogRepository {
            db: self.db.clone(),
        }
    }

    pub fn mailer(&self) -> HttpMailer {
        HttpMailer {
            http: self.http.clone(),
            relay_url: self.mail_relay_url.clone(),
            from: self.mail_from.clone(),
        }
    }
}
