use elaview_core::config::{parse_or, required};

/// Marketplace service configuration loaded from environment variables.
#[derive(Debug)]
pub struct MarketplaceConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// TCP port for the HTTP server (default 3302). Env var: `MARKETPLACE_PORT`.
    pub marketplace_port: u16,
    /// TCP port for the gRPC server (default 50051). Env var: `MARKETPLACE_GRPC_PORT`.
    pub marketplace_grpc_port: u16,
}

impl MarketplaceConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: required("DATABASE_URL"),
            marketplace_port: parse_or("MARKETPLACE_PORT", 3302),
            marketplace_grpc_port: parse_or("MARKETPLACE_GRPC_PORT", 50051),
        }
    }
}
