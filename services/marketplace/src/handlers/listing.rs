use axum::{
    Json,
    extract::{Path, State},
    http::StatusCode,
    response::IntoResponse,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use elaview_auth_types::identity::{IdentityHeaders, OptionalIdentity};
use elaview_core::envelope::{paged, success};
use elaview_domain::listing::SpaceType;
use elaview_domain::pagination::PageRequest;
use elaview_domain::user::UserRole;

use crate::domain::types::{Listing, ListingFilter, ListingSortBy, ListingUpdate};
use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::listing::{
    ArchiveListingUseCase, BrowseListingsUseCase, CreateListingInput, CreateListingUseCase,
    GetListingUseCase, ListOwnListingsUseCase, PublishListingUseCase, UpdateListingUseCase,
};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct ListingResponse {
    pub id: String,
    pub owner_id: String,
    pub title: String,
    pub description: String,
    pub space_type: SpaceType,
    pub city: String,
    pub address: Option<String>,
    pub width_cm: i32,
    pub height_cm: i32,
    pub price_per_day_cents: i64,
    pub price_per_week_cents: Option<i64>,
    pub price_per_month_cents: Option<i64>,
    pub daily_traffic: Option<i32>,
    pub image_urls: Vec<String>,
    pub status: elaview_domain::listing::ListingStatus,
    #[serde(serialize_with = "elaview_core::serde::to_rfc3339_ms_opt")]
    pub published_at: Option<chrono::DateTime<chrono::Utc>>,
    #[serde(serialize_with = "elaview_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
    #[serde(serialize_with = "elaview_core::serde::to_rfc3339_ms")]
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl From<Listing> for ListingResponse {
    fn from(listing: Listing) -> Self {
        Self {
            id: listing.id.to_string(),
            owner_id: listing.owner_id.to_string(),
            title: listing.title,
            description: listing.description,
            space_type: listing.space_type,
            city: listing.city,
            address: listing.address,
            width_cm: listing.width_cm,
            height_cm: listing.height_cm,
            price_per_day_cents: listing.price_per_day_cents,
            price_per_week_cents: listing.price_per_week_cents,
            price_per_month_cents: listing.price_per_month_cents,
            daily_traffic: listing.daily_traffic,
            image_urls: listing.image_urls,
            status: listing.status,
            published_at: listing.published_at,
            created_at: listing.created_at,
            updated_at: listing.updated_at,
        }
    }
}

fn require_lister(identity: &IdentityHeaders) -> Result<(), MarketplaceError> {
    let can_list = UserRole::from_u8(identity.user_role).is_some_and(UserRole::can_list);
    if can_list {
        Ok(())
    } else {
        Err(MarketplaceError::Forbidden)
    }
}

// ── POST /listings ───────────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct CreateListingRequest {
    pub title: String,
    pub description: String,
    pub space_type: SpaceType,
    pub city: String,
    pub address: Option<String>,
    pub width_cm: i32,
    pub height_cm: i32,
    pub price_per_day_cents: i64,
    pub price_per_week_cents: Option<i64>,
    pub price_per_month_cents: Option<i64>,
    pub daily_traffic: Option<i32>,
    #[serde(default)]
    pub image_urls: Vec<String>,
}

pub async fn create_listing(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Json(body): Json<CreateListingRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    require_lister(&identity)?;

    let usecase = CreateListingUseCase {
        repo: state.listing_repo(),
    };
    let listing = usecase
        .execute(
            identity.user_id,
            CreateListingInput {
                title: body.title,
                description: body.description,
                space_type: body.space_type,
                city: body.city,
                address: body.address,
                width_cm: body.width_cm,
                height_cm: body.height_cm,
                price_per_day_cents: body.price_per_day_cents,
                price_per_week_cents: body.price_per_week_cents,
                price_per_month_cents: body.price_per_month_cents,
                daily_traffic: body.daily_traffic,
                image_urls: body.image_urls,
            },
        )
        .await?;
    Ok((StatusCode::CREATED, success(ListingResponse::from(listing))))
}

// ── GET /listings (browse) ───────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct BrowseListingsQuery {
    pub space_type: Option<String>,
    pub city: Option<String>,
    pub min_price: Option<i64>,
    pub max_price: Option<i64>,
    pub min_width: Option<i32>,
    pub min_height: Option<i32>,
    pub sort_by: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn browse_listings(
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<impl IntoResponse, MarketplaceError> {
    let query: BrowseListingsQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| MarketplaceError::MissingData)?
        .unwrap_or_default();

    let space_type = query
        .space_type
        .as_deref()
        .map(|s| SpaceType::from_str(s).ok_or(MarketplaceError::InvalidListingData))
        .transpose()?;
    let sort_by = query
        .sort_by
        .as_deref()
        .and_then(ListingSortBy::from_kebab_case)
        .unwrap_or_default();
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    }
    .clamped();

    let usecase = BrowseListingsUseCase {
        repo: state.listing_repo(),
    };
    let (listings, total) = usecase
        .execute(
            ListingFilter {
                space_type,
                city: query.city,
                min_price_cents: query.min_price,
                max_price_cents: query.max_price,
                min_width_cm: query.min_width,
                min_height_cm: query.min_height,
            },
            sort_by,
            page,
        )
        .await?;

    let items: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
    Ok(paged(items, page.info(total)))
}

// ── GET /listings/{id} ───────────────────────────────────────────────────────

pub async fn get_listing(
    identity: OptionalIdentity,
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = GetListingUseCase {
        repo: state.listing_repo(),
    };
    let listing = usecase
        .execute(listing_id, identity.user_id(), identity.user_role())
        .await?;
    Ok(success(ListingResponse::from(listing)))
}

// ── PATCH /listings/{id} ─────────────────────────────────────────────────────

#[derive(Deserialize)]
pub struct UpdateListingRequest {
    pub title: Option<String>,
    pub description: Option<String>,
    pub space_type: Option<SpaceType>,
    pub city: Option<String>,
    pub address: Option<String>,
    pub width_cm: Option<i32>,
    pub height_cm: Option<i32>,
    pub price_per_day_cents: Option<i64>,
    pub price_per_week_cents: Option<i64>,
    pub price_per_month_cents: Option<i64>,
    pub daily_traffic: Option<i32>,
    pub image_urls: Option<Vec<String>>,
}

pub async fn update_listing(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(body): Json<UpdateListingRequest>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = UpdateListingUseCase {
        repo: state.listing_repo(),
    };
    usecase
        .execute(
            listing_id,
            identity.user_id,
            identity.user_role,
            ListingUpdate {
                title: body.title,
                description: body.description,
                space_type: body.space_type,
                city: body.city,
                address: body.address,
                width_cm: body.width_cm,
                height_cm: body.height_cm,
                price_per_day_cents: body.price_per_day_cents,
                price_per_week_cents: body.price_per_week_cents,
                price_per_month_cents: body.price_per_month_cents,
                daily_traffic: body.daily_traffic,
                image_urls: body.image_urls,
            },
        )
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── POST /listings/{id}/publish ──────────────────────────────────────────────

pub async fn publish_listing(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = PublishListingUseCase {
        repo: state.listing_repo(),
    };
    usecase
        .execute(listing_id, identity.user_id, identity.user_role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── DELETE /listings/{id} (archive) ──────────────────────────────────────────

pub async fn archive_listing(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
) -> Result<StatusCode, MarketplaceError> {
    let usecase = ArchiveListingUseCase {
        repo: state.listing_repo(),
    };
    usecase
        .execute(listing_id, identity.user_id, identity.user_role)
        .await?;
    Ok(StatusCode::NO_CONTENT)
}

// ── GET /users/@me/listings ──────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct OwnListingsQuery {
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn my_listings(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<impl IntoResponse, MarketplaceError> {
    let query: OwnListingsQuery = raw_query
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

    let usecase = ListOwnListingsUseCase {
        repo: state.listing_repo(),
    };
    let (listings, total) = usecase.execute(identity.user_id, page).await?;

    let items: Vec<ListingResponse> = listings.into_iter().map(ListingResponse::from).collect();
    Ok(paged(items, page.info(total)))
}
