use sea_orm_migration::prelude::*;

#[tokio::main]
async fn main() {
    cli::run_cli(elaview_marketplace_migration::Migrator).await;
}
