use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use elaview_auth_types::identity::IdentityHeaders;
use elaview_core::envelope::{paged, success};
use elaview_domain::pagination::PageRequest;

use crate::domain::types::{ProfileUpdate, UserProfile};
use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::profile::{
    CompleteProfileInput, CompleteProfileUseCase, GetProfileStatsUseCase, GetProfileUseCase,
    GetPublicProfileUseCase, SearchProfilesUseCase, SetAvatarUseCase, SetProfileActiveUseCase,
    TouchLastActiveUseCase, UpdateProfileUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

/// Full profile, visible to its owner only.
#[derive(Serialize)]
pub struct ProfileResponse {
    pub id: String,
    pub role: u8,
    pub sub_role: Option<String>,
    pub display_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    pub is_active: bool,
    #[serde(serialize_with = "elaview_core::serde::to_rfc3339_ms_opt")]
    pub last_active_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "elaview_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "elaview_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserProfile> for ProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            role: profile.role,
            sub_role: profile.sub_role,
            display_name: profile.display_name,
            company_name: profile.company_name,
            phone: profile.phone,
            bio: profile.bio,
            city: profile.city,
            avatar_url: profile.avatar_url,
            is_active: profile.is_active,
            last_active_at: profile.last_active_at,
            created_at: profile.created_at,
            updated_at: profile.updated_at,
        }
    }
}

/// Profile subset exposed to other users. Contact details stay private.
#[derive(Serialize)]
pub struct PublicProfileResponse {
    pub id: String,
    pub role: u8,
    pub sub_role: Option<String>,
    pub display_name: String,
    pub company_name: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
    pub avatar_url: Option<String>,
    #[serde(serialize_with = "elaview_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<UserProfile> for PublicProfileResponse {
    fn from(profile: UserProfile) -> Self {
        Self {
            id: profile.id.to_string(),
            role: profile.role,
            sub_role: profile.sub_role,
            display_name: profile.display_name,
            company_name: profile.company_name,
            bio: profile.bio,
            city: profile.city,
            avatar_url: profile.avatar_url,
            created_at: profile.created_at,
        }
    }
}

#[derive(Serialize)]
pub struct StatsResponse {
    pub profile_completion: u8,
    pub total_listings: u64,
    pub active_listings: u64,
    pub inquiries_received: u64,
}

// ── POST /users (complete profile) ───────────────────────────────────────────

#[derive(Deserialize)]
pub struct CompleteProfileRequest {
    pub role: u8,
    pub sub_role: Option<String>,
    pub display_name: String,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
}

pub async fn create_user(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CompleteProfileRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = CompleteProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase
        .execute(
            identity.user_id,
            CompleteProfileInput {
                role: body.role,
                sub_role: body.sub_role,
                display_name: body.display_name,
                company_name: body.company_name,
                phone: body.phone,
                bio: body.bio,
                city: body.city,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, success(ProfileResponse::from(profile))))
}

// ── GET /users/@me ───────────────────────────────────────────────────────────

pub async fn get_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = GetProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(identity.user_id).await?;
    Ok(success(ProfileResponse::from(profile)))
}

// ── PATCH /users/@me ─────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateMeRequest {
    pub display_name: Option<String>,
    pub sub_role: Option<String>,
    pub company_name: Option<String>,
    pub phone: Option<String>,
    pub bio: Option<String>,
    pub city: Option<String>,
}

pub async fn update_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<UpdateMeRequest>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = UpdateProfileUseCase {
        repo: state.profile_repo(),
    };
    usecase
        .execute(
            identity.user_id,
            ProfileUpdate {
                display_name: body.display_name,
                sub_role: body.sub_role,
                company_name: body.company_name,
                phone: body.phone,
                bio: body.bio,
                city: body.city,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /users/@me (deactivate) ───────────────────────────────────────────

pub async fn deactivate_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = SetProfileActiveUseCase {
        repo: state.profile_repo(),
    };
    usecase.execute(identity.user_id, false).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/@me/reactivate ───────────────────────────────────────────────

pub async fn reactivate_me(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = SetProfileActiveUseCase {
        repo: state.profile_repo(),
    };
    usecase.execute(identity.user_id, true).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /users/@me/last-active ──────────────────────────────────────────────

pub async fn touch_last_active(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = TouchLastActiveUseCase {
        repo: state.profile_repo(),
    };
    usecase.execute(identity.user_id).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── PUT /users/@me/avatar ────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SetAvatarRequest {
    pub url: String,
}

pub async fn set_avatar(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<SetAvatarRequest>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = SetAvatarUseCase {
        repo: state.profile_repo(),
    };
    usecase.execute(identity.user_id, &body.url).await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/@me/stats ─────────────────────────────────────────────────────

pub async fn get_stats(
    identity: IdentityHeaders,
    State(state): State<AppState>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = GetProfileStatsUseCase {
        profiles: state.profile_repo(),
        listings: state.listing_repo(),
        inquiries: state.inquiry_repo(),
    };
    let stats = usecase.execute(identity.user_id).await?;
    Ok(success(StatsResponse {
        profile_completion: stats.profile_completion,
        total_listings: stats.total_listings,
        active_listings: stats.active_listings,
        inquiries_received: stats.inquiries_received,
    }))
}

// ── GET /users/search ────────────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct SearchUsersQuery {
    pub q: Option<String>,
    pub role: Option<u8>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn search_users(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<impl IntoResponse, MarketplaceError> {
    let query: SearchUsersQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| MarketplaceError::MissingData)?
        .unwrap_or_default();

    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    }
    .clamped();

    let usecase = SearchProfilesUseCase {
        repo: state.profile_repo(),
    };
    let (profiles, total) = usecase
        .execute(query.q.as_deref(), query.role, page)
        .await?;

    let items: Vec<PublicProfileResponse> = profiles
        .into_iter()
        .map(PublicProfileResponse::from)
        .collect();
    Ok(paged(items, page.info(total)))
}

// ── GET /users/{id} ──────────────────────────────────────────────────────────

pub async fn get_user(
    State(state): State<AppState>,
    Path(user_id): Path<Uuid>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = GetPublicProfileUseCase {
        repo: state.profile_repo(),
    };
    let profile = usecase.execute(user_id).await?;
    Ok(success(PublicProfileResponse::from(profile)))
}
