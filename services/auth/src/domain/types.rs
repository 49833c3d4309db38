use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Login credential stored by the auth service. `id` is the user id
/// system-wide; everything beyond email + password hash lives in the
/// marketplace profile.
#[derive(Debug, Clone)]
pub struct Credential {
    pub id: Uuid,
    pub email: String,
    pub password_hash: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// One-time password-reset code delivered by email.
#[derive(Debug, Clone)]
pub struct ResetCode {
    pub id: Uuid,
    pub credential_id: Uuid,
    pub code: String,
    pub expires_at: DateTime<Utc>,
    pub used_at: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

impl ResetCode {
    pub fn is_valid(&self) -> bool {
        self.used_at.is_none() && self.expires_at > Utc::now()
    }
}

/// Profile data fetched from the marketplace service for token claims.
#[derive(Debug, Clone)]
pub struct ProfileSnapshot {
    pub id: Uuid,
    pub role: u8,
    pub is_active: bool,
}

/// Outbox event for async delivery (e.g. reset-code email).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OutboxEvent {
    pub id: Uuid,
    pub kind: String,
    pub payload: serde_json::Value,
    pub idempotency_key: String,
}

/// Maximum number of active (unused, unexpired) reset codes per credential.
pub const MAX_ACTIVE_RESET_CODES: u64 = 5;

/// Reset code length in characters.
pub const RESET_CODE_LEN: usize = 12;

/// Reset code time-to-live in seconds.
pub const RESET_CODE_TTL_SECS: i64 = 120;

/// Minimum accepted password length.
pub const MIN_PASSWORD_LEN: usize = 8;

/// Maximum accepted password length (argon2 input cap).
pub const MAX_PASSWORD_LEN: usize = 128;

/// Validate an email address: exactly one `@`, non-empty local part, and a
/// domain containing a dot. Intentionally loose — delivery is the real test.
pub fn validate_email(email: &str) -> bool {
    let mut parts = email.split('@');
    let (Some(local), Some(domain), None) = (parts.next(), parts.next(), parts.next()) else {
        return false;
    };
    if local.is_empty() || domain.len() < 3 {
        return false;
    }
    domain.contains('.') && !domain.starts_with('.') && !domain.ends_with('.')
}

/// Validate password strength: length bounds only, no composition rules.
pub fn validate_password(password: &str) -> bool {
    (MIN_PASSWORD_LEN..=MAX_PASSWORD_LEN).contains(&password.len())
}
