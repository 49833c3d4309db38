use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(ResetCodes::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(ResetCodes::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(ResetCodes::CredentialId).uuid().not_null())
                    .col(ColumnDef::new(ResetCodes::Code).string().not_null())
                    .col(
                        ColumnDef::new(ResetCodes::ExpiresAt)
                            .timestamp_with_time_zone()
                            .not_null(),
                    )
                    .col(ColumnDef::new(ResetCodes::UsedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(ResetCodes::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(ResetCodes::Table, ResetCodes::CredentialId)
                            .to(Credentials::Table, Credentials::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_reset_codes_credential_id")
                    .table(ResetCodes::Table)
                    .col(ResetCodes::CredentialId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(ResetCodes::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum ResetCodes {
    Table,
    Id,
    CredentialId,
    Code,
    ExpiresAt,
    UsedAt,
    CreatedAt,
}

#[derive(Iden)]
enum Credentials {
    Table,
    Id,
}
