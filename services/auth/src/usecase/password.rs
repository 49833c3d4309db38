use argon2::password_hash::rand_core::OsRng;
use argon2::password_hash::{PasswordHash, PasswordHasher, PasswordVerifier, SaltString};
use argon2::Argon2;
use chrono::{Duration, Utc};
use rand::RngExt;
use serde_json::json;
use uuid::Uuid;

use crate::domain::repository::{CredentialRepository, ResetCodeRepository};
use crate::domain::types::{
    MAX_ACTIVE_RESET_CODES, OutboxEvent, RESET_CODE_LEN, RESET_CODE_TTL_SECS, ResetCode,
    validate_password,
};
use crate::error::AuthServiceError;

/// Hash a password with argon2id and a fresh random salt.
pub fn hash_password(password: &str) -> Result<String, AuthServiceError> {
    let salt = SaltString::generate(&mut OsRng);
    Argon2::default()
        .hash_password(password.as_bytes(), &salt)
        .map(|h| h.to_string())
        .map_err(|e| AuthServiceError::Internal(anyhow::anyhow!("hash password: {e}")))
}

/// Verify a password against a stored argon2id hash.
///
/// An unparseable stored hash counts as a mismatch rather than an error —
/// login must not distinguish corrupt rows from wrong passwords.
pub fn verify_password(password: &str, stored_hash: &str) -> bool {
    let Ok(parsed) = PasswordHash::new(stored_hash) else {
        return false;
    };
    Argon2::default()
        .verify_password(password.as_bytes(), &parsed)
        .is_ok()
}

/// Charset for generating reset codes (uppercase alphanumeric).
const CHARSET: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

fn generate_code() -> String {
    let mut rng = rand::rng();
    (0..RESET_CODE_LEN)
        .map(|_| CHARSET[rng.random_range(0..CHARSET.len())] as char)
        .collect()
}

// ── RequestPasswordReset ─────────────────────────────────────────────────────

pub struct RequestPasswordResetInput {
    pub email: String,
}

pub struct RequestPasswordResetUseCase<C, R>
where
    C: CredentialRepository,
    R: ResetCodeRepository,
{
    pub credentials: C,
    pub reset_codes: R,
}

impl<C, R> RequestPasswordResetUseCase<C, R>
where
    C: CredentialRepository,
    R: ResetCodeRepository,
{
    pub async fn execute(
        &self,
        input: RequestPasswordResetInput,
    ) -> Result<(), AuthServiceError> {
        // Unknown email succeeds silently — the endpoint must not reveal
        // which addresses have accounts.
        let Some(credential) = self.credentials.find_by_email(&input.email).await? else {
            return Ok(());
        };

        let active = self.reset_codes.count_active(credential.id).await?;
        if active >= MAX_ACTIVE_RESET_CODES {
            return Err(AuthServiceError::TooManyResetCodes);
        }

        let code_str = generate_code();
        let now = Utc::now();
        let code = ResetCode {
            id: Uuid::new_v4(),
            credential_id: credential.id,
            code: code_str.clone(),
            expires_at: now + Duration::seconds(RESET_CODE_TTL_SECS),
            used_at: None,
            created_at: now,
        };

        // Code + outbox event land in the same transaction so the email
        // cannot be sent for a code that was never stored (or vice versa).
        let event = OutboxEvent {
            id: Uuid::new_v4(),
            kind: "password_reset_requested".to_owned(),
            payload: json!({ "email": input.email, "code": code_str }),
            idempotency_key: format!("password_reset_requested:{}", code.id),
        };

        self.reset_codes.create_with_outbox(&code, &event).await?;
        Ok(())
    }
}

// ── ResetPassword ────────────────────────────────────────────────────────────

pub struct ResetPasswordInput {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub struct ResetPasswordUseCase<C, R>
where
    C: CredentialRepository,
    R: ResetCodeRepository,
{
    pub credentials: C,
    pub reset_codes: R,
}

impl<C, R> ResetPasswordUseCase<C, R>
where
    C: CredentialRepository,
    R: ResetCodeRepository,
{
    pub async fn execute(&self, input: ResetPasswordInput) -> Result<(), AuthServiceError> {
        if !validate_password(&input.new_password) {
            return Err(AuthServiceError::WeakPassword);
        }

        // Unknown email and unknown code produce the same error.
        let credential = self
            .credentials
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::InvalidResetCode)?;

        let code = self
            .reset_codes
            .find_valid(credential.id, &input.code)
            .await?
            .ok_or(AuthServiceError::InvalidResetCode)?;

        self.reset_codes.mark_used(code.id).await?;

        let hash = hash_password(&input.new_password)?;
        self.credentials.update_password(credential.id, &hash).await
    }
}
