use chrono::Utc;
use uuid::Uuid;

use elaview_domain::listing::{ListingStatus, SpaceType};
use elaview_domain::pagination::PageRequest;

use crate::domain::repository::ListingRepository;
use crate::domain::types::{
    Listing, ListingFilter, ListingSortBy, ListingUpdate, MAX_DESCRIPTION_LEN, MAX_IMAGE_URLS,
    MAX_TITLE_LEN,
};
use crate::error::MarketplaceError;

fn validate_title(title: &str) -> bool {
    let trimmed = title.trim();
    !trimmed.is_empty() && trimmed.len() <= MAX_TITLE_LEN && title == trimmed
}

fn validate_image_urls(urls: &[String]) -> bool {
    urls.len() <= MAX_IMAGE_URLS
        && urls.iter().all(|u| {
            url::Url::parse(u).is_ok_and(|parsed| matches!(parsed.scheme(), "http" | "https"))
        })
}

// ── CreateListing ────────────────────────────────────────────────────────────

pub struct CreateListingInput {
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
}

pub struct CreateListingUseCase<R: ListingRepository> {
    pub repo: R,
}

impl<R: ListingRepository> CreateListingUseCase<R> {
    /// New listings always start as drafts; publishing is a separate step.
    pub async fn execute(
        &self,
        owner_id: Uuid,
        input: CreateListingInput,
    ) -> Result<Listing, MarketplaceError> {
        if !validate_title(&input.title)
            || input.description.len() > MAX_DESCRIPTION_LEN
            || input.city.trim().is_empty()
            || input.width_cm <= 0
            || input.height_cm <= 0
            || input.price_per_day_cents <= 0
            || input.price_per_week_cents.is_some_and(|p| p <= 0)
            || input.price_per_month_cents.is_some_and(|p| p <= 0)
            || input.daily_traffic.is_some_and(|t| t < 0)
            || !validate_image_urls(&input.image_urls)
        {
            return Err(MarketplaceError::InvalidListingData);
        }

        let now = Utc::now();
        let listing = Listing {
            id: Uuid::now_v7(),
            owner_id,
            title: input.title,
            description: input.description,
            space_type: input.space_type,
            city: input.city,
            address: input.address,
            width_cm: input.width_cm,
            height_cm: input.height_cm,
            price_per_day_cents: input.price_per_day_cents,
            price_per_week_cents: input.price_per_week_cents,
            price_per_month_cents: input.price_per_month_cents,
            daily_traffic: input.daily_traffic,
            image_urls: input.image_urls,
            status: ListingStatus::Draft,
            published_at: None,
            created_at: now,
            updated_at: now,
        };
        self.repo.create(&listing).await?;
        Ok(listing)
    }
}

// ── GetListing ───────────────────────────────────────────────────────────────

pub struct GetListingUseCase<R: ListingRepository> {
    pub repo: R,
}

impl<R: ListingRepository> GetListingUseCase<R> {
    /// Drafts and archived listings are indistinguishable from missing ones
    /// for everyone but the owner (or an admin).
    pub async fn execute(
        &self,
        listing_id: Uuid,
        viewer_id: Uuid,
        viewer_role: u8,
    ) -> Result<Listing, MarketplaceError> {
        self.repo
            .find_by_id(listing_id)
            .await?
            .filter(|l| l.visible_to(viewer_id, viewer_role))
            .ok_or(MarketplaceError::ListingNotFound)
    }
}

// ── BrowseListings ───────────────────────────────────────────────────────────

pub struct BrowseListingsUseCase<R: ListingRepository> {
    pub repo: R,
}

impl<R: ListingRepository> BrowseListingsUseCase<R> {
    pub async fn execute(
        &self,
        filter: ListingFilter,
        sort_by: ListingSortBy,
        page: PageRequest,
    ) -> Result<(Vec<Listing>, u64), MarketplaceError> {
        if let (Some(min), Some(max)) = (filter.min_price_cents, filter.max_price_cents) {
            if min > max {
                return Err(MarketplaceError::InvalidListingData);
            }
        }
        self.repo.browse(&filter, sort_by, page).await
    }
}

// ── UpdateListing ────────────────────────────────────────────────────────────

pub struct UpdateListingUseCase<R: ListingRepository> {
    pub repo: R,
}

impl<R: ListingRepository> UpdateListingUseCase<R> {
    pub async fn execute(
        &self,
        listing_id: Uuid,
        caller_id: Uuid,
        caller_role: u8,
        update: ListingUpdate,
    ) -> Result<(), MarketplaceError> {
        if update.is_empty() {
            return Err(MarketplaceError::MissingData);
        }
        if update.title.as_deref().is_some_and(|t| !validate_title(t))
            || update
                .description
                .as_deref()
                .is_some_and(|d| d.len() > MAX_DESCRIPTION_LEN)
            || update.city.as_deref().is_some_and(|c| c.trim().is_empty())
            || update.width_cm.is_some_and(|w| w <= 0)
            || update.height_cm.is_some_and(|h| h <= 0)
            || update.price_per_day_cents.is_some_and(|p| p <= 0)
            || update.price_per_week_cents.is_some_and(|p| p <= 0)
            || update.price_per_month_cents.is_some_and(|p| p <= 0)
            || update.daily_traffic.is_some_and(|t| t < 0)
            || update
                .image_urls
                .as_deref()
                .is_some_and(|u| !validate_image_urls(u))
        {
            return Err(MarketplaceError::InvalidListingData);
        }

        let listing = self
            .repo
            .find_by_id(listing_id)
            .await?
            .ok_or(MarketplaceError::ListingNotFound)?;
        if listing.owner_id != caller_id && caller_role < 2 {
            return Err(MarketplaceError::Forbidden);
        }

        self.repo.update_fields(listing_id, &update).await
    }
}

// ── PublishListing ───────────────────────────────────────────────────────────

pub struct PublishListingUseCase<R: ListingRepository> {
    pub repo: R,
}

impl<R: ListingRepository> PublishListingUseCase<R> {
    /// Only `draft → active` is a legal publish transition.
    pub async fn execute(
        &self,
        listing_id: Uuid,
        caller_id: Uuid,
        caller_role: u8,
    ) -> Result<(), MarketplaceError> {
        let listing = self
            .repo
            .find_by_id(listing_id)
            .await?
            .ok_or(MarketplaceError::ListingNotFound)?;
        if listing.owner_id != caller_id && caller_role < 2 {
            return Err(MarketplaceError::Forbidden);
        }
        if !listing.status.can_publish() {
            return Err(MarketplaceError::ListingNotPublishable);
        }

        self.repo
            .set_status(listing_id, ListingStatus::Active, Some(Utc::now()))
            .await
    }
}

// ── ArchiveListing ───────────────────────────────────────────────────────────

pub struct ArchiveListingUseCase<R: ListingRepository> {
    pub repo: R,
}

impl<R: ListingRepository> ArchiveListingUseCase<R> {
    /// Archiving is legal from any state and is how listings are "deleted".
    pub async fn execute(
        &self,
        listing_id: Uuid,
        caller_id: Uuid,
        caller_role: u8,
    ) -> Result<(), MarketplaceError> {
        let listing = self
            .repo
            .find_by_id(listing_id)
            .await?
            .ok_or(MarketplaceError::ListingNotFound)?;
        if listing.owner_id != caller_id && caller_role < 2 {
            return Err(MarketplaceError::Forbidden);
        }

        self.repo
            .set_status(listing_id, ListingStatus::Archived, listing.published_at)
            .await
    }
}

// ── ListOwnListings ──────────────────────────────────────────────────────────

pub struct ListOwnListingsUseCase<R: ListingRepository> {
    pub repo: R,
}

impl<R: ListingRepository> ListOwnListingsUseCase<R> {
    pub async fn execute(
        &self,
        owner_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Listing>, u64), MarketplaceError> {
        self.repo.list_by_owner(owner_id, page).await
    }
}
