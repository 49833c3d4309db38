use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(UserProfiles::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(UserProfiles::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::Role)
                            .small_integer()
                            .not_null()
                            .default(0),
                    )
                    .col(ColumnDef::new(UserProfiles::SubRole).string())
                    .col(ColumnDef::new(UserProfiles::DisplayName).string().not_null())
                    .col(ColumnDef::new(UserProfiles::CompanyName).string())
                    .col(ColumnDef::new(UserProfiles::Phone).string())
                    .col(ColumnDef::new(UserProfiles::Bio).string())
                    .col(ColumnDef::new(UserProfiles::City).string())
                    .col(ColumnDef::new(UserProfiles::AvatarUrl).string())
                    .col(
                        ColumnDef::new(UserProfiles::IsActive)
                            .boolean()
                            .not_null()
                            .default(true),
                    )
                    .col(ColumnDef::new(UserProfiles::LastActiveAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(UserProfiles::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(UserProfiles::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_user_profiles_display_name")
                    .table(UserProfiles::Table)
                    .col(UserProfiles::DisplayName)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(UserProfiles::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum UserProfiles {
    Table,
    Id,
    Role,
    SubRole,
    DisplayName,
    CompanyName,
    Phone,
    Bio,
    City,
    AvatarUrl,
    IsActive,
    LastActiveAt,
    CreatedAt,
    UpdatedAt,
}
