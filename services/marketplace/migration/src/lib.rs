use sea_orm_migration::prelude::*;

mod m20250801_000001_create_user_profiles;
mod m20250801_000002_create_user_preferences;
mod m20250801_000003_create_listings;
mod m20250801_000004_create_inquiries;
mod m20250801_000005_create_outbox_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_user_profiles::Migration),
            Box::new(m20250801_000002_create_user_preferences::Migration),
            Box::new(m20250801_000003_create_listings::Migration),
            Box::new(m20250801_000004_create_inquiries::Migration),
            Box::new(m20250801_000005_create_outbox_events::Migration),
        ]
    }
}
