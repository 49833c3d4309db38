use axum::{
    Json,
    extract::{Query, State},
    http::{HeaderMap, HeaderName, HeaderValue, StatusCode},
    response::IntoResponse,
};
use axum_extra::extract::CookieJar;
use serde::{Deserialize, Serialize};

use elaview_auth_types::{
    cookie::{
        ELAVIEW_ACCESS_TOKEN, ELAVIEW_REFRESH_TOKEN, clear_cookies, set_access_token_cookie,
        set_refresh_token_cookie,
    },
    token::validate_access_token,
};
use elaview_core::envelope::success;

use crate::error::AuthServiceError;
use crate::state::AppState;
use crate::usecase::token::{
    CreateTokenInput, CreateTokenUseCase, RefreshTokenUseCase, RevokeTokenUseCase,
};

const X_ELAVIEW_ACCESS_TOKEN_EXPIRES: &str = "x-elaview-access-token-expires";

fn token_expires_header(exp: u64) -> (HeaderName, HeaderValue) {
    (
        HeaderName::from_static(X_ELAVIEW_ACCESS_TOKEN_EXPIRES),
        HeaderValue::from_str(&exp.to_string()).unwrap(),
    )
}

// ── GET /auth/token (verify) ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CheckTokenQuery {
    pub role: Option<u8>,
}

#[derive(Serialize)]
pub struct CheckTokenResponse {
    pub user_id: uuid::Uuid,
    pub user_role: u8,
    pub access_token_exp: u64,
}

pub async fn check_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Query(query): Query<CheckTokenQuery>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let token_value = jar
        .get(ELAVIEW_ACCESS_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(AuthServiceError::InvalidToken)?;

    let info = validate_access_token(&token_value, &state.jwt_secret)
        .map_err(|_| AuthServiceError::InvalidToken)?;

    if let Some(min_role) = query.role {
        if info.user_role < min_role {
            return Err(AuthServiceError::InvalidToken);
        }
    }

    let body = CheckTokenResponse {
        user_id: info.user_id,
        user_role: info.user_role,
        access_token_exp: info.access_token_exp,
    };

    let mut headers = HeaderMap::new();
    let (name, value) = token_expires_header(info.access_token_exp);
    headers.insert(name, value);

    Ok((StatusCode::OK, headers, success(body)))
}

// ── POST /auth/token (login) ─────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateTokenRequest {
    pub email: String,
    pub password: String,
}

#[derive(Serialize)]
pub struct CreateTokenResponse {
    pub user_id: uuid::Uuid,
    pub user_role: u8,
    pub access_token_exp: u64,
}

pub async fn create_token(
    State(state): State<AppState>,
    jar: CookieJar,
    Json(body): Json<CreateTokenRequest>,
) -> Result<impl IntoResponse, AuthServiceError> {
    let usecase = CreateTokenUseCase {
        credentials: state.credential_repo(),
        profiles: state.profile_port(),
        jwt_secret: state.jwt_secret.clone(),
    };

    let out = usecase
        .execute(CreateTokenInput {
            email: body.email,
            password: body.password,
        })
        .await?;

    let jar = set_access_token_cookie(jar, out.access_token, state.cookie_domain.clone());
    let jar = set_refresh_token_cookie(jar, out.refresh_token, state.cookie_domain.clone());

    let mut headers = HeaderMap::new();
    let (name, value) = token_expires_header(out.access_token_exp);
    headers.insert(name, value);

    let body = CreateTokenResponse {
        user_id: out.user_id,
        user_role: out.user_role,
        access_token_exp: out.access_token_exp,
    };

    Ok((StatusCode::CREATED, jar, headers, success(body)))
}

// ── PATCH /auth/token (refresh) ──────────────────────────────────────────────

pub async fn refresh_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    let refresh_value = jar
        .get(ELAVIEW_REFRESH_TOKEN)
        .map(|c| c.value().to_owned())
        .ok_or(AuthServiceError::InvalidRefreshToken)?;

    let usecase = RefreshTokenUseCase {
        credentials: state.credential_repo(),
        profiles: state.profile_port(),
        sessions: state.session_store(),
        jwt_secret: state.jwt_secret.clone(),
    };

    let out = usecase.execute(&refresh_value).await?;

    let jar = set_access_token_cookie(jar, out.access_token, state.cookie_domain.clone());
    let jar = set_refresh_token_cookie(jar, out.refresh_token, state.cookie_domain.clone());

    let mut headers = HeaderMap::new();
    let (name, value) = token_expires_header(out.access_token_exp);
    headers.insert(name, value);

    let body = CreateTokenResponse {
        user_id: out.user_id,
        user_role: out.user_role,
        access_token_exp: out.access_token_exp,
    };

    Ok((StatusCode::CREATED, jar, headers, success(body)))
}

// ── DELETE /auth/token (sign out) ────────────────────────────────────────────

pub async fn revoke_token(
    State(state): State<AppState>,
    jar: CookieJar,
) -> Result<impl IntoResponse, AuthServiceError> {
    // Revoke the refresh token when one is presented; clear cookies regardless.
    if let Some(refresh_value) = jar.get(ELAVIEW_REFRESH_TOKEN).map(|c| c.value().to_owned()) {
        let usecase = RevokeTokenUseCase {
            sessions: state.session_store(),
            jwt_secret: state.jwt_secret.clone(),
        };
        usecase.execute(&refresh_value).await?;
    }

    let jar = clear_cookies(jar, state.cookie_domain.clone());
    Ok((StatusCode::NO_CONTENT, jar))
}
