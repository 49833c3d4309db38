use anyhow::Context as _;
use chrono::Utc;
use sea_orm::{
    ActiveModelTrait, ActiveValue::Set, ColumnTrait, DatabaseConnection, DatabaseTransaction,
    EntityTrait, QueryFilter, TransactionTrait,
};
use uuid::Uuid;

use elaview_auth_schema::{credentials, outbox_events, reset_codes};

use crate::domain::repository::{CredentialRepository, ResetCodeRepository};
use crate::domain::types::{Credential, OutboxEvent, ResetCode};
use crate::error::AuthServiceError;

// ── Credential repository ─────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbCredentialRepository {
    pub db: DatabaseConnection,
}

impl CredentialRepository for DbCredentialRepository {
    async fn find_by_email(&self, email: &str) -> Result<Option<Credential>, AuthServiceError> {
        let model = credentials::Entity::find()
            .filter(credentials::Column::Email.eq(email))
            .one(&self.db)
            .await
            .context("find credential by email")?;
        Ok(model.map(credential_from_model))
    }

    async fn find_by_id(&self, id: Uuid) -> Result<Option<Credential>, AuthServiceError> {
        let model = credentials::Entity::find_by_id(id)
            .one(&self.db)
            .await
            .context("find credential by id")?;
        Ok(model.map(credential_from_model))
    }

    async fn create(&self, credential: &Credential) -> Result<(), AuthServiceError> {
        credentials::ActiveModel {
            id: Set(credential.id),
            email: Set(credential.email.clone()),
            password_hash: Set(credential.password_hash.clone()),
            created_at: Set(credential.created_at),
            updated_at: Set(credential.updated_at),
        }
        .insert(&self.db)
        .await
        .context("create credential")?;
        Ok(())
    }

    async fn update_password(
        &self,
        id: Uuid,
        password_hash: &str,
    ) -> Result<(), AuthServiceError> {
        credentials::ActiveModel {
            id: Set(id),
            password_hash: Set(password_hash.to_owned()),
            updated_at: Set(Utc::now()),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("update credential password")?;
        Ok(())
    }
}

fn credential_from_model(model: credentials::Model) -> Credential {
    Credential {
        id: model.id,
        email: model.email,
        password_hash: model.password_hash,
        created_at: model.created_at,
        updated_at: model.updated_at,
    }
}

// ── ResetCode repository ──────────────────────────────────────────────────────

#[derive(Clone)]
pub struct DbResetCodeRepository {
    pub db: DatabaseConnection,
}

impl ResetCodeRepository for DbResetCodeRepository {
    async fn count_active(&self, credential_id: Uuid) -> Result<u64, AuthServiceError> {
        use sea_orm::PaginatorTrait;
        let now = Utc::now();
        let count = reset_codes::Entity::find()
            .filter(reset_codes::Column::CredentialId.eq(credential_id))
            .filter(reset_codes::Column::UsedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(now))
            .count(&self.db)
            .await
            .context("count active reset codes")?;
        Ok(count)
    }

    async fn create_with_outbox(
        &self,
        code: &ResetCode,
        event: &OutboxEvent,
    ) -> Result<(), AuthServiceError> {
        self.db
            .transaction::<_, (), sea_orm::DbErr>(|txn| {
                let code = code.clone();
                let event = event.clone();
                Box::pin(async move {
                    insert_reset_code(txn, &code).await?;
                    insert_outbox_event(txn, &event).await?;
                    Ok(())
                })
            })
            .await
            .context("create reset code with outbox")?;
        Ok(())
    }

    async fn find_valid(
        &self,
        credential_id: Uuid,
        code: &str,
    ) -> Result<Option<ResetCode>, AuthServiceError> {
        let now = Utc::now();
        let model = reset_codes::Entity::find()
            .filter(reset_codes::Column::CredentialId.eq(credential_id))
            .filter(reset_codes::Column::Code.eq(code))
            .filter(reset_codes::Column::UsedAt.is_null())
            .filter(reset_codes::Column::ExpiresAt.gt(now))
            .one(&self.db)
            .await
            .context("find valid reset code")?;
        Ok(model.map(reset_code_from_model))
    }

    async fn mark_used(&self, id: Uuid) -> Result<(), AuthServiceError> {
        let now = Utc::now();
        reset_codes::ActiveModel {
            id: Set(id),
            used_at: Set(Some(now)),
            ..Default::default()
        }
        .update(&self.db)
        .await
        .context("mark reset code used")?;
        Ok(())
    }
}

async fn insert_reset_code(
    txn: &DatabaseTransaction,
    code: &ResetCode,
) -> Result<(), sea_orm::DbErr> {
    reset_codes::ActiveModel {
        id: Set(code.id),
        credential_id: Set(code.credential_id),
        code: Set(code.code.clone()),
        expires_at: Set(code.expires_at),
        used_at: Set(None),
        created_at: Set(code.created_at),
    }
    .insert(txn)
    .await?;
    Ok(())
}

async fn insert_outbox_event(
    txn: &DatabaseTransaction,
    event: &OutboxEvent,
) -> Result<(), sea_orm::DbErr> {
    let now = Utc::now();
    outbox_events::ActiveModel {
        id: Set(event.id),
        kind: Set(event.kind.clone()),
        payload: Set(event.payload.clone()),
        idempotency_key: Set(event.idempotency_key.clone()),
        attempts: Set(0),
        last_error: Set(None),
        created_at: Set(now),
        next_attempt_at: Set(now),
        processed_at: Set(None),
        failed_at: Set(None),
    }
    .insert(txn)
    .await?;
    Ok(())
}

fn reset_code_from_model(model: reset_codes::Model) -> ResetCode {
    ResetCode {
        id: model.id,
        credential_id: model.credential_id,
        code: model.code,
        expires_at: model.expires_at,
        used_at: model.used_at,
        created_at: model.created_at,
    }
}
