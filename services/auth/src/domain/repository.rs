#![allow(async_fn_in_trait)]

use uuid::Uuid;

use crate::domain::types::{Credential, OutboxEvent, ProfileSnapshot, ResetCode};
use crate::error::AuthServiceError;

/// Repository for login credentials.
pub trait CredentialRepository: Send + Sync {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AuthServiceError>;
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, AuthServiceError>;
    async fn create(&self, credential: &Credential) -> Result<(), AuthServiceError>;

    /// Replace the stored password hash (also bumps `updated_at`).
    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AuthServiceError>;
}

/// Repository for one-time password-reset codes.
pub trait ResetCodeRepository: Send + Sync {
    /// Count active (unused and unexpired) codes for a credential.
    async fn count_active(&self, credential_id: Uuid) -> Result<u64, AuthServiceError>;

    /// Insert a new reset code and an outbox event atomically (same transaction).
    async fn create_with_outbox(
        &self,
        code: &ResetCode,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError>;

    /// Find a valid (unused, unexpired) code by credential + code string.
    async fn find_valid(
        &self,
        credential_id: Uuid,
        code: &str,
    ) -> Result<Option<ResetCode>, AuthServiceError>;

    /// Mark a code as used (sets used_at = now).
    async fn mark_used(&self, id: Uuid) -> Result<(), AuthServiceError>;
}

/// Store for revoked refresh-token ids (Redis, TTL = remaining token life).
pub trait SessionStore: Send + Sync {
    async fn revoke(&self, jti: Uuid, ttl_secs: u64) -> Result<(), AuthServiceError>;
    async fn is_revoked(&self, jti: Uuid) -> Result<bool, AuthServiceError>;
}

/// Port for reading profile data from the marketplace service.
pub trait ProfilePort: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileSnapshot>, AuthServiceError>;
}
