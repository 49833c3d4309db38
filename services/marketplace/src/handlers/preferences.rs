use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use elaview_auth_types::identity::IdentityHeaders;
use elaview_core::envelope::success;

use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::preferences::{
    GetPreferencesUseCase, PutPreferencesInput, PutPreferencesUseCase,
};

// ── GET /users/@me/preferences ───────────────────────────────────────────────

#[derive(Serialize)]
pub struct PreferencesResponse {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub newsletter: bool,
}

pub async fn get_preferences(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = GetPreferencesUseCase {
        repo: state.preferences_repo(),
    };
    let preferences = usecase.execute(identity.user_id).await?;
    Ok(success(PreferencesResponse {
        email_notifications: preferences.email_notifications,
        sms_notifications: preferences.sms_notifications,
        newsletter: preferences.newsletter,
    }))
}

// ── PUT /users/@me/preferences ───────────────────────────────────────────────

#[derive(Deserialize)]
pub struct PutPreferencesRequest {
    pub email_notifications: bool,
    pub sms_notifications: bool,
    pub newsletter: bool,
}

pub async fn put_preferences(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<PutPreferencesRequest>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = PutPreferencesUseCase {
        repo: state.preferences_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            PutPreferencesInput {
                email_notifications: body.email_notifications,
                sms_notifications: body.sms_notifications,
                newsletter: body.newsletter,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
