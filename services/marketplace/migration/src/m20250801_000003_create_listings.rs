use sea_orm_migration::prelude::*;

#[derive(DeriveMigrationName)]
pub struct Migration;

#[async_trait::async_trait]
impl MigrationTrait for Migration {
    async fn up(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .create_table(
                Table::create()
                    .table(Listings::Table)
                    .if_not_exists()
                    .col(
                        ColumnDef::new(Listings::Id)
                            .uuid()
                            .not_null()
                            .primary_key(),
                    )
                    .col(ColumnDef::new(Listings::OwnerId).uuid().not_null())
                    .col(ColumnDef::new(Listings::Title).string().not_null())
                    .col(ColumnDef::new(Listings::Description).string().not_null())
                    .col(ColumnDef::new(Listings::SpaceType).string().not_null())
                    .col(ColumnDef::new(Listings::City).string().not_null())
                    .col(ColumnDef::new(Listings::Address).string())
                    .col(ColumnDef::new(Listings::WidthCm).integer().not_null())
                    .col(ColumnDef::new(Listings::HeightCm).integer().not_null())
                    .col(
                        ColumnDef::new(Listings::PricePerDayCents)
                            .big_integer()
                            .not_null(),
                    )
                    .col(ColumnDef::new(Listings::PricePerWeekCents).big_integer())
                    .col(ColumnDef::new(Listings::PricePerMonthCents).big_integer())
                    .col(ColumnDef::new(Listings::DailyTraffic).integer())
                    .col(ColumnDef::new(Listings::ImageUrls).json_binary().not_null())
                    .col(
                        ColumnDef::new(Listings::Status)
                            .string()
                            .not_null()
                            .default("draft"),
                    )
                    .col(ColumnDef::new(Listings::PublishedAt).timestamp_with_time_zone())
                    .col(
                        ColumnDef::new(Listings::CreatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .col(
                        ColumnDef::new(Listings::UpdatedAt)
                            .timestamp_with_time_zone()
                            .not_null()
                            .default(Expr::current_timestamp()),
                    )
                    .foreign_key(
                        ForeignKey::create()
                            .from(Listings::Table, Listings::OwnerId)
                            .to(UserProfiles::Table, UserProfiles::Id)
                            .on_delete(ForeignKeyAction::Cascade),
                    )
                    .to_owned(),
            )
            .await?;

        // Browse hits status + city + space_type; owner dashboards hit owner_id.
        manager
            .create_index(
                Index::create()
                    .name("idx_listings_status_city")
                    .table(Listings::Table)
                    .col(Listings::Status)
                    .col(Listings::City)
                    .to_owned(),
            )
            .await?;

        manager
            .create_index(
                Index::create()
                    .name("idx_listings_owner_id")
                    .table(Listings::Table)
                    .col(Listings::OwnerId)
                    .to_owned(),
            )
            .await
    }

    async fn down(&self, manager: &SchemaManager) -> Result<(), DbErr> {
        manager
            .drop_table(Table::drop().table(Listings::Table).to_owned())
            .await
    }
}

#[derive(Iden)]
enum Listings {
    Table,
    Id,
    OwnerId,
    Title,
    Description,
    SpaceType,
    City,
    Address,
    WidthCm,
    HeightCm,
    PricePerDayCents,
    PricePerWeekCents,
    PricePerMonthCents,
    DailyTraffic,
    ImageUrls,
    Status,
    PublishedAt,
    CreatedAt,
    UpdatedAt,
}

#[derive(Iden)]
enum UserProfiles {
    Table,
    Id,
}
