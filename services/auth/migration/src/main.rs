use sea_orm_migration::prelude::*;

mod m20250801_000001_create_credentials;
mod m20250801_000002_create_reset_codes;
mod m20250801_000003_create_outbox_events;

pub struct Migrator;

#[async_trait::async_trait]
impl MigratorTrait for Migrator {
    fn migrations() -> Vec<Box<dyn MigrationTrait>> {
        vec![
            Box::new(m20250801_000001_create_credentials::Migration),
            Box::new(m20250801_000002_create_reset_codes::Migration),
            Box::new(m20250801_000003_create_outbox_events::Migration),
        ]
    }
}

#[tokio::main]
async fn main() {
    cli::run_cli(Migrator).await;
}
