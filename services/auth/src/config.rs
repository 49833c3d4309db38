use elaview_core::config::{parse_or, required};

/// Auth service configuration loaded from environment variables.
#[derive(Debug)]
pub struct AuthConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// Redis connection URL (refresh-token revocation store).
    pub redis_url: String,
    /// HMAC secret for signing JWT access and refresh tokens.
    pub jwt_secret: String,
    /// Cookie domain attribute (root domain, e.g. "elaview.com").
    pub cookie_domain: String,
    /// TCP port to listen on (default 3301). Env var: `AUTH_PORT`.
    pub auth_port: u16,
    /// Marketplace service gRPC URL (e.g. "http://marketplace:50051").
    /// Env var: `MARKETPLACE_GRPC_URL`.
    pub marketplace_grpc_url: String,
}

impl AuthConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: required("DATABASE_URL"),
            redis_url: required("REDIS_URL"),
            jwt_secret: required("JWT_SECRET"),
            cookie_domain: required("COOKIE_DOMAIN"),
            auth_port: parse_or("AUTH_PORT", 3301),
            marketplace_grpc_url: required("MARKETPLACE_GRPC_URL"),
        }
    }
}
