use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Inquiries::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Inquiries::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Inquiries::ListingId).uuid().not_null())
                    .col(ColumnDef::new(Inquiries::SenderId).uuid().not_null())
                    .col(ColumnDef::new(Inquiries::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Inquiries::Message).string().not_null())
                    .col(
                        ColumnDef::new(Inquiries::IdempotencyKey)
                            .string()
                            .not_null()
                            .unique_key(),
                    )
                    .col(
                        ColumnDef::new(Inquiries::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Inquiries::Table, Inquiries::ListingId)
                            .to(Listings::Table, Listings::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_sender_id")
                    .table(Inquiries::Table)
                    .col(Inquiries::SenderId)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_inquiries_owner_id")
                    .table(Inquiries::Table)
                    .col(Inquiries::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Inquiries::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Inquiries {
    Table,
    Id,
    ListingId,
    SenderId,
    OwnerId,
    Message,
    IdempotencyKey,
    CreatedAt,
}

#[derive(Iden)]
enum Listings {
    Table,
    Id,
}
