use axum::{Json, extract::State, http::StatusCode};
use serde::Deserialize;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::password::{
    RequestPasswordResetInput, RequestPasswordResetUseCase, ResetPasswordInput,
    ResetPasswordUseCase,
};

// ── POST /auth/password (request reset code) ─────────────────────────────────

#[derive(Deserialize)]
pub struct RequestResetRequest {
    pub email: String,
}

pub async fn request_password_reset(
    State(state): State<AppState>,
    Json(body): Json<RequestResetRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = RequestPasswordResetUseCase {
        credentials: state.credential_repo(),
        reset_codes: state.reset_code_repo(),
    };
    usecase
        .execute(RequestPasswordResetInput { email: body.email })
        .await?;
    Ok(StatusCode::ACCEPTED)
}

// ── PUT /auth/password (consume reset code) ──────────────────────────────────

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub email: String,
    pub code: String,
    pub new_password: String,
}

pub async fn reset_password(
    State(state): State<AppState>,
    Json(body): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AuthServiceError> {
    let usecase = ResetPasswordUseCase {
        credentials: state.credential_repo(),
        reset_codes: state.reset_code_repo(),
    };
    usecase
        .execute(ResetPasswordInput {
            email: body.email,
            code: body.code,
            new_password: body.new_password,
        })
        .await?;
    Ok(StatusCode::NO_CONTENT)
}
