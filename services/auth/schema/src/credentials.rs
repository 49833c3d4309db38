use sea_orm::entity::prelude::*;

/// Login credential owned by the auth service.
/// The `id` doubles as the user id everywhere else in the system; profile
/// data lives in the marketplace service.
#[derive(Clone, Debug, PartialEq, Eq, DeriveEntityModel)]
#[sea_orm(table_name = "credentials")]
pub struct Model {
    #[sea_orm(primary_key, auto_increment = false)]
    pub id: Uuid,
    #[sea_orm(unique)]
    pub email: String,
    pub password_hash: String,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::reset_codes::Entity")]
    ResetCodes,
}

impl Related<super::reset_codes::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::ResetCodes.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}
