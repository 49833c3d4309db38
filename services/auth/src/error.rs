use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use elaview_core::envelope::error_body;

/// Auth service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum AuthServiceError {
    #[error("email already registered")]
    EmailTaken,
    #[error("invalid email address")]
    InvalidEmail,
    #[error("password does not meet requirements")]
    WeakPassword,
    #[error("invalid email or password")]
    InvalidCredentials,
    #[error("invalid token")]
    InvalidToken,
    #[error("invalid refresh token")]
    InvalidRefreshToken,
    #[error("session revoked")]
    SessionRevoked,
    #[error("invalid reset code")]
    InvalidResetCode,
    #[error("too many reset codes")]
    TooManyResetCodes,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl AuthServiceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidEmail => "INVALID_EMAIL",
            Self::WeakPassword => "WEAK_PASSWORD",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::InvalidToken => "INVALID_TOKEN",
            Self::InvalidRefreshToken => "INVALID_REFRESH_TOKEN",
            Self::SessionRevoked => "SESSION_REVOKED",
            Self::InvalidResetCode => "INVALID_RESET_CODE",
            Self::TooManyResetCodes => "TOO_MANY_RESET_CODES",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for AuthServiceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::InvalidEmail | Self::WeakPassword => StatusCode::BAD_REQUEST,
            Self::InvalidCredentials
            | Self::InvalidToken
            | Self::InvalidRefreshToken
            | Self::SessionRevoked
            | Self::InvalidResetCode => StatusCode::UNAUTHORIZED,
            Self::TooManyResetCodes => StatusCode::TOO_MANY_REQUESTS,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = error_body(self.kind(), &self.to_string());
        (status, axum::Json(body)).into_response()
    }
}
