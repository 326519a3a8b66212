use anyhow::Context as _;
use chrono::{DateTime, Utc};
use sea_orm::sea_query::Expr;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, Condition, DatabaseConnection,
    DatabaseTransaction, EntityTrait, QueryFilter, QueryOrder, TransactionTrait,
};
use uuid::Uuid;

use docvault_api_schema::{audit_logs, otps, posts, share_links, users};

use crate::domain::repository::{
    AuditLogPort, OtpRepository, PostRepository, ShareLinkRepository, UserRepository,
};
use crate::domain::types::{AuditAction, AuditEntry, Otp, Post, ShareLink, User};
use crate::error::ApiError;

// ── User repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbUserRepository {
    pub db: DatabaseConnection,
}

impl UserRepository for DbUserRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find()
            .filter(users::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find user by email")?;
        Ok(model.map(user_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<User>, ApiError> {
        let model = users::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find user by id")?;
        Ok(model.map(user_from_model))
    }

    async fn create(&self, user: &User) -> Result<(), ApiError> {
        users::ActiveModel {
            id: Set(user.id),
            email: Set(user.email.clone()),
            first_name: Set(user.first_name.clone()),
            last_name: Set(user.last_name.clone()),
            password_hash: Set(user.password_hash.clone()),
            created_at: Set(user.created_at),
        }
        .insert(&self.db)
        .await
        .context("create user")?;
        Ok(())
    }
}

fn user_from_model(model: users::Model) -> User {
    User {
        id: model.id,
        email: model.email,
        first_name: model.first_name,
        last_name: model.last_name,
        password_hash: model.password_hash,
        created_at: model.created_at,
    }
}

// ── Post repository ───────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbPostRepository {
    pub db: DatabaseConnection,
}

impl PostRepository for DbPostRepository {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Post>, ApiError> {
        let model = posts::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find post by id")?;
        Ok(model.map(post_from_model))
    }

    async fn list_by_owner(&self, user_id: Uuid) -> Result<Vec<Post>, ApiError> {
        let models = posts::Entity::find()
            .filter(posts::Column::UserId.eq(user_id))
            .order_by_desc(posts::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list posts by owner")?;
        Ok(models.into_iter().map(post_from_model).collect())
    }

    async fn create(&self, post: &Post) -> Result<(), ApiError> {
        posts::ActiveModel {
            id: Set(post.id),
            user_id: Set(post.user_id),
            captions: Set(post.captions.clone()),
            document: Set(post.document.clone()),
            document_name: Set(post.document_name.clone()),
            image: Set(post.image.clone()),
            image_name: Set(post.image_name.clone()),
            video: Set(post.video.clone()),
            video_name: Set(post.video_name.clone()),
            otp_protected: Set(post.otp_protected),
            created_at: Set(post.created_at),
        }
        .insert(&self.db)
        .await
        .context("create post")?;
        Ok(())
    }

    async fn set_protection(&self, post_id: Uuid, enabled: bool) -> Result<(), ApiError> {
        posts::ActiveModel {
            id: Set(post_id),
            otp_protected: Set(enabled),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("set post protection")?;
        Ok(())
    }

    async fn delete(&self, post_id: Uuid) -> Result<(), ApiError> {
        posts::Entity::delete_by_id(post_id)
            .exec(&self.db)
            .await
            .context("delete post")?;
        Ok(())
    }
}

fn post_from_model(model: posts::Model) -> Post {
    Post {
        id: model.id,
        user_id: model.user_id,
        captions: model.captions,
        document: model.document,
        document_name: model.document_name,
        image: model.image,
        image_name: model.image_name,
        video: model.video,
        video_name: model.video_name,
        otp_protected: model.otp_protected,
        created_at: model.created_at,
    }
}

// ── OTP repository ────────────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbOtpRepository {
    pub db: DatabaseConnection,
}

impl OtpRepository for DbOtpRepository {
    async fn supersede_and_insert(&self, otp: &Otp) -> Result<(), ApiError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let otp = otp.clone();
                Box::pin(async move {
                    mark_live_otps_used(txn, otp.post_id, otp.user_id, otp.created_at).await?;
                    insert_otp(txn, &otp).await?;
                    Ok(())
                })
            })
            .await
            .context("supersede and insert otp")?;
        Ok(())
    }

    async fn consume(
        &self,
        code: &str,
        post_id: Uuid,
        user_id: Uuid,
        now: DateTime<Utc>,
    ) -> Result<bool, ApiError> {
        // Lookup and consumption in one conditional UPDATE: a second caller
        // racing on the same code sees used = true and affects zero rows.
        let result = otps::Entity::update_many()
            .col_expr(otps::Column::Used, Expr::value(true))
            .filter(otps::Column::Code.eq(code))
            .filter(otps::Column::PostId.eq(post_id))
            .filter(otps::Column::UserId.eq(user_id))
            .filter(otps::Column::Used.eq(false))
            .filter(otps::Column::ExpiresAt.gt(now))
            .exec(&self.db)
            .await
            .context("consume otp")?;
        Ok(result.rows_affected > 0)
    }

    async fn delete_all_for_post(&self, post_id: Uuid) -> Result<(), ApiError> {
        otps::Entity::delete_many()
            .filter(otps::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .context("delete otps for post")?;
        Ok(())
    }
}

async fn mark_live_otps_used(
    txn: &DatabaseTransaction,
    post_id: Uuid,
    user_id: Uuid,
    now: DateTime<Utc>,
) -> Result<(), sea_orm::DbErr> {
    otps::Entity::update_many()
        .col_expr(otps::Column::Used, Expr::value(true))
        .filter(otps::Column::PostId.eq(post_id))
        .filter(otps::Column::UserId.eq(user_id))
        .filter(otps::Column::Used.eq(false))
        .filter(otps::Column::ExpiresAt.gt(now))
        .exec(txn)
        .await?;
    Ok(())
}

async fn insert_otp(txn: &DatabaseTransaction, otp: &Otp) -> Result<(), sea_orm::DbErr> {
    otps::ActiveModel {
        id: Set(otp.id),
        code: Set(otp.code.clone()),
        email: Set(otp.email.clone()),
        post_id: Set(otp.post_id),
        user_id: Set(otp.user_id),
        expires_at: Set(otp.expires_at),
        used: Set(otp.used),
        created_at: Set(otp.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

// ── ShareLink repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbShareLinkRepository {
    pub db: DatabaseConnection,
}

impl ShareLinkRepository for DbShareLinkRepository {
    async fn create(&self, link: &ShareLink) -> Result<(), ApiError> {
        share_links::ActiveModel {
            id: Set(link.id),
            token: Set(link.token.clone()),
            post_id: Set(link.post_id),
            expires_at: Set(link.expires_at),
            max_uses: Set(link.max_uses),
            use_count: Set(link.use_count),
            active: Set(link.active),
            created_at: Set(link.created_at),
        }
        .insert(&self.db)
        .await
        .context("create share link")?;
        Ok(())
    }

    async fn find_by_token(&self, token: &str) -> Result<Option<ShareLink>, ApiError> {
        let model = share_links::Entity::find()
            .filter(share_links::Column::Token.eq(token))
            .one(&self.db)
            .await
            .context("find share link by token")?;
        Ok(model.map(link_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<ShareLink>, ApiError> {
        let model = share_links::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find share link by id")?;
        Ok(model.map(link_from_model))
    }

    async fn list_by_post(&self, post_id: Uuid) -> Result<Vec<ShareLink>, ApiError> {
        let models = share_links::Entity::find()
            .filter(share_links::Column::PostId.eq(post_id))
            .order_by_desc(share_links::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list share links by post")?;
        Ok(models.into_iter().map(link_from_model).collect())
    }

    async fn record_use(&self, id: Uuid, now: DateTime<Utc>) -> Result<bool, ApiError> {
        // "Increment iff still valid" as a single statement. Two concurrent
        // calls against one remaining use serialize at the row: the loser's
        // WHERE no longer matches and it affects zero rows.
        let still_valid = Condition::all()
            .add(share_links::Column::Id.eq(id))
            .add(share_links::Column::Active.eq(true))
            .add(share_links::Column::ExpiresAt.gt(now))
            .add(
                Condition::any()
                    .add(share_links::Column::MaxUses.is_null())
                    .add(
                        Expr::col(share_links::Column::UseCount)
                            .lt(Expr::col(share_links::Column::MaxUses)),
                    ),
            );
        let result = share_links::Entity::update_many()
            .col_expr(
                share_links::Column::UseCount,
                Expr::col(share_links::Column::UseCount).add(1),
            )
            .filter(still_valid)
            .exec(&self.db)
            .await
            .context("record share link use")?;
        Ok(result.rows_affected > 0)
    }

    async fn deactivate(&self, id: Uuid) -> Result<(), ApiError> {
        // update_many keeps this idempotent: zero affected rows is fine.
        share_links::Entity::update_many()
            .col_expr(share_links::Column::Active, Expr::value(false))
            .filter(share_links::Column::Id.eq(id))
            .exec(&self.db)
            .await
            .context("deactivate share link")?;
        Ok(())
    }

    async fn deactivate_all_for_post(&self, post_id: Uuid) -> Result<(), ApiError> {
        share_links::Entity::update_many()
            .col_expr(share_links::Column::Active, Expr::value(false))
            .filter(share_links::Column::PostId.eq(post_id))
            .exec(&self.db)
            .await
            .context("deactivate share links for post")?;
        Ok(())
    }
}

fn link_from_model(model: share_links::Model) -> ShareLink {
    ShareLink {
        id: model.id,
        token: model.token,
        post_id: model.post_id,
        expires_at: model.expires_at,
        max_uses: model.max_uses,
        use_count: model.use_count,
        active: model.active,
        created_at: model.created_at,
    }
}

// ── Audit log repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbAuditLogRepository {
    pub db: DatabaseConnection,
}

impl AuditLogPort for DbAuditLogRepository {
    async fn record(&self, entry: &AuditEntry) -> Result<(), ApiError> {
        audit_logs::ActiveModel {
            id: Set(entry.id),
            user_id: Set(entry.user_id),
            action: Set(entry.action.as_str().to_owned()),
            file_name: Set(entry.file_name.clone()),
            created_at: Set(entry.created_at),
        }
        .insert(&self.db)
        .await
        .context("record audit entry")?;
        Ok(())
    }

    async fn list_by_user(&self, user_id: Uuid) -> Result<Vec<AuditEntry>, ApiError> {
        let models = audit_logs::Entity::find()
            .filter(audit_logs::Column::UserId.eq(user_id))
            .order_by_desc(audit_logs::Column::CreatedAt)
            .all(&self.db)
            .await
            .context("list audit entries by user")?;
        Ok(models
            .into_iter()
            .filter_map(|m| {
                let action = AuditAction::from_str(&m.action)?;
                Some(AuditEntry {
                    id: m.id,
                    user_id: m.user_id,
                    action,
                    file_name: m.file_name,
                    created_at: m.created_at,
                })
            })
            .collect())
    }
}
