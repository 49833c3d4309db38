use jsonwebtoken::{EncodingKey, Header, encode};
use std::time::{SystemTime, UNIX_EPOCH};
use uuid::Uuid;

use elaview_auth_types::cookie::{ACCESS_TOKEN_EXP, REFRESH_TOKEN_EXP};
use elaview_auth_types::token::{JwtClaims, validate_token};

use crate::domain::repository::{CredentialRepository, ProfilePort, SessionStore};
use crate::error::AuthServiceError;
use crate::usecase::password::verify_password;

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .expect("system clock before UNIX epoch")
        .as_secs()
}

fn issue(user_id: Uuid, role: u8, ttl: u64, secret: &str) -> Result<(String, u64), AuthServiceError> {
    let exp = now_secs() + ttl;
    let claims = JwtClaims {
        sub: user_id.to_string(),
        role,
        jti: Uuid::new_v4().to_string(),
        exp,
    };
    let token = encode(
        &Header::default(),
        &claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .map_err(|e| AuthServiceError::Internal(e.into()))?;
    Ok((token, exp))
}

pub fn issue_access_token(
    user_id: Uuid,
    role: u8,
    secret: &str,
) -> Result<(String, u64), AuthServiceError> {
    issue(user_id, role, ACCESS_TOKEN_EXP, secret)
}

pub fn issue_refresh_token(user_id: Uuid, role: u8, secret: &str) -> Result<String, AuthServiceError> {
    issue(user_id, role, REFRESH_TOKEN_EXP, secret).map(|(token, _)| token)
}

/// Validate a token and return its claims. Used for the refresh/revoke flows.
pub fn validate_refresh_token(token: &str, secret: &str) -> Result<JwtClaims, AuthServiceError> {
    validate_token(token, secret).map_err(|_| AuthServiceError::InvalidRefreshToken)
}

// ── CreateToken (login) ───────────────────────────────────────────────────────

pub struct CreateTokenInput {
    pub email: String,
    pub password: String,
}

#[derive(Debug)]
pub struct CreateTokenOutput {
    pub user_id: Uuid,
    pub user_role: u8,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct CreateTokenUseCase<C: CredentialRepository, P: ProfilePort> {
    pub credentials: C,
    pub profiles: P,
    pub jwt_secret: String,
}

impl<C: CredentialRepository, P: ProfilePort> CreateTokenUseCase<C, P> {
    pub async fn execute(
        &self,
        input: CreateTokenInput,
    ) -> Result<CreateTokenOutput, AuthServiceError> {
        // Unknown email and wrong password are indistinguishable to the caller.
        let credential = self
            .credentials
            .find_by_email(&input.email)
            .await?
            .ok_or(AuthServiceError::InvalidCredentials)?;

        if !verify_password(&input.password, &credential.password_hash) {
            return Err(AuthServiceError::InvalidCredentials);
        }

        // Role comes from the marketplace profile; a credential whose profile
        // has not been completed yet logs in as a renter. Deactivated profiles
        // may still log in so the user can reach the reactivate endpoint.
        let role = self
            .profiles
            .find_by_id(credential.id)
            .await?
            .map(|p| p.role)
            .unwrap_or(0);

        let (access_token, access_token_exp) =
            issue_access_token(credential.id, role, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(credential.id, role, &self.jwt_secret)?;

        Ok(CreateTokenOutput {
            user_id: credential.id,
            user_role: role,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── RefreshToken ─────────────────────────────────────────────────────────────

#[derive(Debug)]
pub struct RefreshTokenOutput {
    pub user_id: Uuid,
    pub user_role: u8,
    pub access_token: String,
    pub access_token_exp: u64,
    pub refresh_token: String,
}

pub struct RefreshTokenUseCase<C: CredentialRepository, P: ProfilePort, S: SessionStore> {
    pub credentials: C,
    pub profiles: P,
    pub sessions: S,
    pub jwt_secret: String,
}

impl<C: CredentialRepository, P: ProfilePort, S: SessionStore> RefreshTokenUseCase<C, P, S> {
    pub async fn execute(
        &self,
        refresh_token_value: &str,
    ) -> Result<RefreshTokenOutput, AuthServiceError> {
        // Validate refresh token (sig + exp); expired access token is irrelevant here.
        let claims = validate_refresh_token(refresh_token_value, &self.jwt_secret)?;

        let user_id = claims
            .sub
            .parse::<Uuid>()
            .map_err(|_| AuthServiceError::InvalidRefreshToken)?;
        let jti = claims
            .jti
            .parse::<Uuid>()
            .map_err(|_| AuthServiceError::InvalidRefreshToken)?;

        if self.sessions.is_revoked(jti).await? {
            return Err(AuthServiceError::SessionRevoked);
        }

        let credential = self
            .credentials
            .find_by_id(user_id)
            .await?
            .ok_or(AuthServiceError::InvalidRefreshToken)?;

        // Re-read the role — it may have changed since the token was minted.
        let role = self
            .profiles
            .find_by_id(credential.id)
            .await?
            .map(|p| p.role)
            .unwrap_or(0);

        let (access_token, access_token_exp) =
            issue_access_token(credential.id, role, &self.jwt_secret)?;
        let refresh_token = issue_refresh_token(credential.id, role, &self.jwt_secret)?;

        Ok(RefreshTokenOutput {
            user_id: credential.id,
            user_role: role,
            access_token,
            access_token_exp,
            refresh_token,
        })
    }
}

// ── RevokeToken (sign-out) ───────────────────────────────────────────────────

pub struct RevokeTokenUseCase<S: SessionStore> {
    pub sessions: S,
    pub jwt_secret: String,
}

impl<S: SessionStore> RevokeTokenUseCase<S> {
    /// Revoke the presented refresh token until its natural expiry.
    ///
    /// An unparseable token revokes nothing — the cookies get cleared either
    /// way, so sign-out never fails for the client.
    pub async fn execute(&self, refresh_token_value: &str) -> Result<(), AuthServiceError> {
        let Ok(claims) = validate_refresh_token(refresh_token_value, &self.jwt_secret) else {
            return Ok(());
        };
        let Ok(jti) = claims.jti.parse::<Uuid>() else {
            return Ok(());
        };
        let ttl = claims.exp.saturating_sub(now_secs()).max(1);
        self.sessions.revoke(jti, ttl).await
    }
}
