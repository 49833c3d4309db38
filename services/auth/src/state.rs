use deadpool_redis::Pool as RedisPool;
use sea_orm::DatabaseConnection;

use crate::infra::cache::RedisSessionStore;
use crate::infra::db::{DbCredentialRepository, DbResetCodeRepository};
use crate::infra::grpc::GrpcProfilePort;

/// Shared application state passed to every handler via axum `State`.
#[derive(Clone)]
pub struct AppState {
    pub db: DatabaseConnection,
    pub redis: RedisPool,
    pub jwt_secret: String,
    pub cookie_domain: String,
    pub profiles: GrpcProfilePort,
}

impl AppState {
    pub fn credential_repo(&self) -> DbCredentialRepository {
        DbCredentialRepository {
            db: self.db.clone(),
        }
    }

    pub fn reset_code_repo(&self) -> DbResetCodeRepository {
        DbResetCodeRepository {
            db: self.db.clone(),
        }
    }

    pub fn session_store(&self) -> RedisSessionStore {
        RedisSessionStore {
            pool: self.redis.clone(),
        }
    }

    pub fn profile_port(&self) -> GrpcProfilePort {
        self.profiles.clone()
    }
}
