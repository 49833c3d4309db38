use std::collections::HashMap;
use std::sync::{Arc, Mutex};

use chrono::Utc;
use uuid::Uuid;

use elaview_auth::domain::repository::{
    CredentialRepository, ProfilePort, ResetCodeRepository, SessionStore,
};
use elaview_auth::domain::types::{Credential, OutboxEvent, ProfileSnapshot, ResetCode};
use elaview_auth::error::AuthServiceError;
use elaview_auth::usecase::password::hash_password;

// ── MockCredentialRepo ───────────────────────────────────────────────────────

pub struct MockCredentialRepo {
    pub credentials: Arc<Mutex<Vec<Credential>>>,
}

impl MockCredentialRepo {
    pub fn new(credentials: Vec<Credential>) -> Self {
        Self {
            credentials: Arc::new(Mutex::new(credentials)),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    /// Shared handle to the internal list for post-execution inspection.
    pub fn handle(&self) -> Arc<Mutex<Vec<Credential>>> {
        Arc::clone(&self.credentials)
    }
}

impl CredentialRepository for MockCredentialRepo {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AuthServiceError> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.email == email)
            .cloned())
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, AuthServiceError> {
        Ok(self
            .credentials
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.id == id)
            .cloned())
    }

    async fn create(&self, credential: &Credential) -> Result<(), AuthServiceError> {
        self.credentials.lock().unwrap().push(credential.clone());
        Ok(())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AuthServiceError> {
        let mut credentials = self.credentials.lock().unwrap();
        if let Some(c) = credentials.iter_mut().find(|c| c.id == id) {
            c.password_hash = password_hash.to_owned();
            c.updated_at = Utc::now();
        }
        Ok(())
    }
}

// ── MockResetCodeRepo ────────────────────────────────────────────────────────

pub struct MockResetCodeRepo {
    pub codes: Arc<Mutex<Vec<ResetCode>>>,
    pub events: Arc<Mutex<Vec<OutboxEvent>>>,
}

impl MockResetCodeRepo {
    pub fn new(codes: Vec<ResetCode>) -> Self {
        Self {
            codes: Arc::new(Mutex::new(codes)),
            events: Arc::new(Mutex::new(vec![])),
        }
    }

    pub fn empty() -> Self {
        Self::new(vec![])
    }

    pub fn codes_handle(&self) -> Arc<Mutex<Vec<ResetCode>>> {
        Arc::clone(&self.codes)
    }

    pub fn events_handle(&self) -> Arc<Mutex<Vec<OutboxEvent>>> {
        Arc::clone(&self.events)
    }
}

impl ResetCodeRepository for MockResetCodeRepo {
    async fn count_active(&self, credential_id: Uuid) -> Result<u64, AuthServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .filter(|c| c.credential_id == credential_id && c.is_valid())
            .count() as u64)
    }

    async fn create_with_outbox(
        &self,
        code: &ResetCode,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError> {
        self.codes.lock().unwrap().push(code.clone());
        self.events.lock().unwrap().push(event.clone());
        Ok(())
    }

    async fn find_valid(
        &self,
        credential_id: Uuid,
        code: &str,
    ) -> Result<Option<ResetCode>, AuthServiceError> {
        Ok(self
            .codes
            .lock()
            .unwrap()
            .iter()
            .find(|c| c.credential_id == credential_id && c.code == code && c.is_valid())
            .cloned())
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), AuthServiceError> {
        let mut codes = self.codes.lock().unwrap();
        if let Some(c) = codes.iter_mut().find(|c| c.id == id) {
            c.used_at = Some(Utc::now());
        }
        Ok(())
    }
}

// ── MockSessionStore ─────────────────────────────────────────────────────────

pub struct MockSessionStore {
    pub revoked: Arc<Mutex<HashMap<Uuid, u64>>>,
}

impl MockSessionStore {
    pub fn empty() -> Self {
        Self {
            revoked: Arc::new(Mutex::new(HashMap::new())),
        }
    }

    pub fn handle(&self) -> Arc<Mutex<HashMap<Uuid, u64>>> {
        Arc::clone(&self.revoked)
    }
}

impl SessionStore for MockSessionStore {
    async fn revoke(&self, jti: Uuid, ttl_secs: u64) -> Result<(), AuthServiceError> {
        self.revoked.lock().unwrap().insert(jti, ttl_secs);
        Ok(())
    }

    async fn is_revoked(&self, jti: Uuid) -> Result<bool, AuthServiceError> {
        Ok(self.revoked.lock().unwrap().contains_key(&jti))
    }
}

// ── MockProfilePort ──────────────────────────────────────────────────────────

pub struct MockProfilePort {
    pub profile: Option<ProfileSnapshot>,
}

impl MockProfilePort {
    pub fn with(profile: ProfileSnapshot) -> Self {
        Self {
            profile: Some(profile),
        }
    }

    pub fn empty() -> Self {
        Self { profile: None }
    }
}

impl ProfilePort for MockProfilePort {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<ProfileSnapshot>, AuthServiceError> {
        Ok(self.profile.clone().filter(|p| p.id == id))
    }
}

// ── Test fixture helpers ─────────────────────────────────────────────────────

pub const TEST_JWT_SECRET: &str = "test-jwt-secret-for-unit-tests-only";

pub const TEST_PASSWORD: &str = "correct horse battery staple";

pub fn test_credential() -> Credential {
    let now = Utc::now();
    Credential {
        id: Uuid::parse_str("00000000-0000-0000-0000-000000000001").unwrap(),
        email: "owner@example.com".to_owned(),
        password_hash: hash_password(TEST_PASSWORD).unwrap(),
        created_at: now,
        updated_at: now,
    }
}

pub fn test_profile(id: Uuid, role: u8) -> ProfileSnapshot {
    ProfileSnapshot {
        id,
        role,
        is_active: true,
    }
}

pub fn test_reset_code(credential_id: Uuid) -> ResetCode {
    ResetCode {
        id: Uuid::new_v4(),
        credential_id,
        code: "ABCDEF123456".to_owned(),
        expires_at: Utc::now() + chrono::Duration::seconds(120),
        used_at: None,
        created_at: Utc::now(),
    }
}
