use axum::{Json, extract::State, http::StatusCode, response::IntoResponse};
use serde::{Deserialize, Serialize};

use elaview_core::envelope::success;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::signup::{SignupInput, SignupUseCase};

// ── POST /auth/signup ────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SignupRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct SignupResponse {
    pub user_id: uuid::Uuid,
}

pub async fn signup(
    State(state): State<AppState>,
    Json(body): Json<SignupRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = SignupUseCase {
        credentials: state.credential_repo(),
    };
    let user_id = usecase
        .execute(SignupInput {
            email: body.email,
            password: body.password,
        })
        .await?;
    Ok((StatusCode::CREATED, success(SignupResponse { user_id })))
}
