use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::PreferencesRepository;
use crate::domain::types::UserPreferences;
use crate::error::MarketplaceError;

// ── GetPreferences ───────────────────────────────────────────────────────────

pub struct GetPreferencesUseCase<R: PreferencesRepository> {
    pub repo: R,
}

impl<R: PreferencesRepository> GetPreferencesUseCase<R> {
    /// Users who never saved preferences get the defaults.
    pub async fn execute(&self, user_id: Uuid) -> Result<UserPreferences, MarketplaceError> {
        Ok(self
            .repo
            .find_by_user(user_id)
            .await?
            .unwrap_or_else(|| UserPreferences::defaults(user_id)))
    }
}

// ── PutPreferences ───────────────────────────────────────────────────────────

pub struct PutPreferencesInput {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub newsletter: bool,
}

pub struct PutPreferencesUseCase<R: PreferencesRepository> {
    pub repo: R,
}

impl<R: PreferencesRepository> PutPreferencesUseCase<R> {
    pub async fn execute(
        &self,
        user_id: Uuid,
        input: PutPreferencesInput,
    ) -> Result<(), MarketplaceError> {
        let preferences = UserPreferences {
            user_id,
            email_notifications: input.email_notifications,
            sms_notifications: input.sms_notifications,
            newsletter: input.newsletter,
            updated_at: Utc::now(),
        };
        self.repo.upsert(&preferences).await
    }
}
