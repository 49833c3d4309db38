#![allow(async_fn_in_trait)]

use uuid::Uuid;

use elaview_domain::listing::ListingStatus;
use elaview_domain::pagination::PageRequest;

use crate::domain::types::{
    Inquiry, InquiryBox, Listing, ListingFilter, ListingSortBy, ListingUpdate, OutboxEvent,
    ProfileUpdate, UserPreferences, UserProfile,
};
use crate::error::MarketplaceError;

/// Repository for user profiles.
pub trait ProfileRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<UserProfile>, MarketplaceError>;
    async fn create(&self, profile: &UserProfile) -> Result<(), MarketplaceError>;
    async fn update_fields(
        &self,
        id: Uuid,
        update: &ProfileUpdate,
    ) -> Result<(), MarketplaceError>;
    async fn set_active(&self, id: Uuid, is_active: bool) -> Result<(), MarketplaceError>;
    async fn set_avatar(&self, id: Uuid, avatar_url: &str) -> Result<(), MarketplaceError>;
    async fn touch_last_active(&self, id: Uuid) -> Result<(), MarketplaceError>;

    /// Search active profiles by display/company-name substring and optional
    /// role. Returns the page plus the total match count.
    async fn search(
        &self,
        query: Option<&str>,
        role: Option<u8>,
        page: PageRequest,
    ) -> Result<(Vec<UserProfile>, u64), MarketplaceError>;
}

/// Repository for notification preferences.
pub trait PreferencesRepository: Send + Sync {
    async fn find_by_user(
        &self,
        user_id: Uuid,
    ) -> Result<Option<UserPreferences>, MarketplaceError>;
    async fn upsert(&self, preferences: &UserPreferences) -> Result<(), MarketplaceError>;
}

/// Repository for advertising-space listings.
pub trait ListingRepository: Send + Sync {
    async fn find_by_id(&self, id: Uuid) -> Result<Option<Listing>, MarketplaceError>;
    async fn create(&self, listing: &Listing) -> Result<(), MarketplaceError>;
    async fn update_fields(
        &self,
        id: Uuid,
        update: &ListingUpdate,
    ) -> Result<(), MarketplaceError>;

    /// Set the lifecycle status; `published_at` is stamped on activation.
    async fn set_status(
        &self,
        id: Uuid,
        status: ListingStatus,
        published_at: Option<chrono::DateTime<chrono::Utc>>,
    ) -> Result<(), MarketplaceError>;

    /// Browse active listings. Returns the page plus the total match count.
    async fn browse(
        &self,
        filter: &ListingFilter,
        sort_by: ListingSortBy,
        page: PageRequest,
    ) -> Result<(Vec<Listing>, u64), MarketplaceError>;

    /// All of an owner's listings regardless of status, newest first.
    async fn list_by_owner(
        &self,
        owner_id: Uuid,
        page: PageRequest,
    ) -> Result<(Vec<Listing>, u64), MarketplaceError>;

    /// `(total, active)` listing counts for an owner's dashboard.
    async fn count_by_owner(&self, owner_id: Uuid) -> Result<(u64, u64), MarketplaceError>;
}

/// Repository for listing inquiries.
pub trait InquiryRepository: Send + Sync {
    async fn find_by_idempotency_key(
        &self,
        key: &str,
    ) -> Result<Option<Inquiry>, MarketplaceError>;

    /// Insert the inquiry and a notification outbox event atomically
    /// (same transaction).
    async fn create_with_outbox(
        &self,
        inquiry: &Inquiry,
        event: &OutboxEvent,
    ) -> Result<(), MarketplaceError>;

    /// Inquiries the user sent (`Sent`) or received against their listings
    /// (`Received`), newest first. Returns the page plus the total count.
    async fn list_for_user(
        &self,
        user_id: Uuid,
        inquiry_box: InquiryBox,
        page: PageRequest,
    ) -> Result<(Vec<Inquiry>, u64), MarketplaceError>;

    /// Total inquiries received against the user's listings.
    async fn count_received(&self, owner_id: Uuid) -> Result<u64, MarketplaceError>;
}
