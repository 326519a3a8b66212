use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Posts::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Posts::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Posts::UserId).uuid().not_null())
                    .col(ColumnDef::new(Posts::Captions).string())
                    .col(ColumnDef::new(Posts::Document).string())
                    .col(ColumnDef::new(Posts::DocumentName).string())
                    .col(ColumnDef::new(Posts::Image).string())
                    .col(ColumnDef::new(Posts::ImageName).string())
                    .col(ColumnDef::new(Posts::Video).string())
                    .col(ColumnDef::new(Posts::VideoName).string())
                    .col(
                        ColumnDef::new(Posts::OtpProtected)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Posts::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Posts::Table, Posts::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .table(Posts::Table)
                    .col(Posts::UserId)
                    .name("idx_posts_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Posts::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Posts {
    Table,
    Id,
    UserId,
    Captions,
    Document,
    DocumentName,
    Image,
    ImageName,
    Video,
    VideoName,
    OtpProtected,
    CreatedAt,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
