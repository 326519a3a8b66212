use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Otps::Table)
                    .if_not_exists()
                    .col(ColumnDef::new(Otps::Id).uuid().not_null().primary_key())
                    .col(ColumnDef::new(Otps::Code).string().not_null())
                    .col(ColumnDef::new(Otps::Email).string().not_null())
                    .col(ColumnDef::new(Otps::PostId).uuid().not_null())
                    .col(ColumnDef::new(Otps::UserId).uuid().not_null())
                    .col(
                        ColumnDef::new(Otps::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(
                        ColumnDef::new(Otps::Used)
                            .boolean()
                            .not_null()
                            .default(false),
                    )
                    .col(
                        ColumnDef::new(Otps::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Otps::Table, Otps::PostId)
                            .to(Posts::Table, Posts::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Otps::Table, Otps::UserId)
                            .to(Users::Table, Users::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Lookups always filter by the (post, user) pair.
        manager
            .create_index(
                Index::create()
                    .table(Otps::Table)
                    .col(Otps::PostId)
                    .col(Otps::UserId)
                    .name("idx_otps_post_id_user_id")
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Otps::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Otps {
    Table,
    Id,
    Code,
    Email,
    PostId,
    UserId,
    ExpiresAt,
    Used,
    CreatedAt,
}

#[derive(Iden)]
enum Posts {
    Table,
    Id,
}

#[derive(Iden)]
enum Users {
    Table,
    Id,
}
