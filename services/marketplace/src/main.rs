use sea_orm::Database;
use tracing::info;

use elaview_marketplace::config::MarketplaceConfig;
use elaview_marketplace::grpc_server::MarketplaceGrpcServer;
use elaview_marketplace::router::build_router;
use elaview_marketplace::state::AppState;
use elaview_proto::profile::profile_service_server::ProfileServiceServer;

#[tokio::main]
async fn main() {
    elaview_core::tracing::init_tracing();

    let config = MarketplaceConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState { db };

    // Spawn gRPC server (profile lookups for the auth service)
    let grpc_state = state.clone();
    let grpc_addr = format!("0.0.0.0:{}", config.marketplace_grpc_port);
    tokio::spawn(async move {
        let server = MarketplaceGrpcServer { state: grpc_state };
        info!("marketplace gRPC server listening on {grpc_addr}");
        tonic::transport::Server::builder()
            .add_service(ProfileServiceServer::new(server))
            .serve(grpc_addr.parse().expect("invalid gRPC address"))
            .await
            .expect("gRPC server error");
    });

    // HTTP server
    let router = build_router(state);
    let http_addr = format!("0.0.0.0:{}", config.marketplace_port);
    let listener = tokio::net::TcpListener::bind(&http_addr)
        .await
        .expect("failed to bind");

    info!("marketplace service listening on {http_addr}");
    axum::serve(listener, router).await.expect("server error");
}
