use tracing::info;

use elaview_auth::config::AuthConfig;
use elaview_auth::infra::grpc::GrpcProfilePort;
use elaview_auth::router::build_router;
use elaview_auth::state::AppState;
use sea_orm::Database;

#[tokio::main]
async fn main() {
    elaview_core::tracing::init_tracing();

    let config = AuthConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let redis_cfg = deadpool_redis::Config::from_url(&config.redis_url);
    let redis = redis_cfg
        .create_pool(Some(deadpool_redis::Runtime::Tokio1))
        .expect("failed to create Redis pool");

    let marketplace_channel =
        tonic::transport::Channel::from_shared(config.marketplace_grpc_url.clone())
            .expect("invalid MARKETPLACE_GRPC_URL")
            .connect_lazy();

    let state = AppState {
        db,
        redis,
        jwt_secret: config.jwt_secret,
        cookie_domain: config.cookie_domain,
        profiles: GrpcProfilePort::new(marketplace_channel),
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.auth_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("auth service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
