use deadpool_redis::Pool;
use deadpool_redis::redis::AsyncCommands;
use uuid::Uuid;

use crate::domain::repository::SessionStore;
use crate::error::AuthServiceError;

/// Redis-backed revocation store for refresh-token ids.
///
/// Keys carry a TTL equal to the remaining token lifetime, so revocations
/// expire exactly when the token itself would have.
#[derive(Clone)]
pub struct RedisSessionStore {
    pub pool: Pool,
}

fn revoked_key(jti: Uuid) -> String {
    format!("revoked_session:{jti}")
}

impl SessionStore for RedisSessionStore {
    async fn revoke(&self, jti: Uuid, ttl_secs: u64) -> Result<(), AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let (): () = conn
            .set_ex(revoked_key(jti), 1, ttl_secs.max(1))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AuthServiceError::Internal(e.into()))?;
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, AuthServiceError> {
        let mut conn = self
            .pool
            .get()
            .await
            .map_err(|e| AuthServiceError::Internal(e.into()))?;
        let exists: bool = conn
            .exists(revoked_key(jti))
            .await
            .map_err(|e: deadpool_redis::redis::RedisError| AuthServiceError::Internal(e.into()))?;
        Ok(exists)
    }
}
