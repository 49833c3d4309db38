use chrono::Utc;
use uuid::Uuid;

use crate::domain::repository::CredentialRepository;
use crate::domain::types::{Credential, validate_email, validate_password};
use crate::error::AuthServiceError;
use crate::usecase::password::hash_password;

pub struct SignupInput {
    pub email: String,
    pub password: String,
}

pub struct SignupUseCase<C: CredentialRepository> {
    pub credentials: C,
}

impl<C: CredentialRepository> SignupUseCase<C> {
    /// Create a credential and return the new user id.
    ///
    /// The marketplace profile is created later via the complete-profile flow.
    pub async fn execute(&self, input: SignupInput) -> Result<Uuid, AuthServiceError> {
        if !validate_email(&input.email) {
            return Err(AuthServiceError::InvalidEmail);
        }
        if !validate_password(&input.password) {
            return Err(AuthServiceError::WeakPassword);
        }
        if self
            .credentials
            .find_by_email(&input.email)
            .await?
            .is_some()
        {
            return Err(AuthServiceError::EmailTaken);
        }

        let now = Utc::now();
        let credential = Credential {
            id: Uuid::now_v7(),
            email: input.email,
            password_hash: hash_password(&input.password)?,
            created_at: now,
            updated_at: now,
        };
        self.credentials.create(&credential).await?;
        Ok(credential.id)
    }
}
