use sea_orm::entity::prelude::*;

/// Shareable file entry. Payload columns hold external blob URLs plus
/// human-readable names; exactly one owner, assigned at creation.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "posts")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
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
    pub created_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::UserId",
        to = "super::users::Column::Id"
    )]
    User,
    #[sea_orm(has_many = "super::share_links::Entity")]
    ShareLinks,
    #[sea_orm(has_many = "super::otps::Entity")]
    Otps,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::User.def()
    }
}

impl Related<super::share_links::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ShareLinks.def()
    }
}

impl Related<super::otps::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Otps.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
