use sea_orm::entity::prelude::*;

/// Advertising-space listing. `space_type` and `status` are stored as their
/// snake_case wire strings; dimensions are centimeters, prices are cents.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "listings")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    pub owner_id: Uuid,
    pub title: String,
    pub description: String,
    pub space_type: String,
    pub city: String,
    pub address: Option<String>,
    pub width_cm: i32,
    pub height_cm: i32,
    pub price_per_day_cents: i64,
    pub price_per_week_cents: Option<i64>,
    pub price_per_month_cents: Option<i64>,
    pub daily_traffic: Option<i32>,
    pub image_urls: Json,
    pub status: String,
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::user_profiles::Entity",
        from = "Column::OwnerId",
        to = "super::user_profiles::Column::Id"
    )]
    UserProfiles,
    #[sea_orm(has_many = "super::inquiries::Entity")]
    Inquiries,
}

impl Related<super::user_profiles::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::UserProfiles.def()
    }
}

impl Related<super::inquiries::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Inquiries.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
