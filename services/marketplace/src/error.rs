use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

use elaview_core::envelope::error_body;

/// Marketplace service domain error variants.
#[derive(Debug, thiserror::Error)]
pub enum MarketplaceError {
    #[error("profile not found")]
    ProfileNotFound,
    #[error("listing not found")]
    ListingNotFound,
    #[error("profile already exists")]
    ProfileAlreadyExists,
    #[error("listing is not publishable")]
    ListingNotPublishable,
    #[error("cannot inquire about your own listing")]
    OwnListingInquiry,
    #[error("idempotency key already used")]
    IdempotencyKeyReuse,
    #[error("invalid role")]
    InvalidRole,
    #[error("invalid profile data")]
    InvalidProfileData,
    #[error("invalid listing data")]
    InvalidListingData,
    #[error("invalid inquiry data")]
    InvalidInquiryData,
    #[error("invalid avatar url")]
    InvalidAvatarUrl,
    #[error("missing data")]
    MissingData,
    #[error("forbidden")]
    Forbidden,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl MarketplaceError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::ProfileNotFound => "PROFILE_NOT_FOUND",
            Self::ListingNotFound => "LISTING_NOT_FOUND",
            Self::ProfileAlreadyExists => "PROFILE_ALREADY_EXISTS",
            Self::ListingNotPublishable => "LISTING_NOT_PUBLISHABLE",
            Self::OwnListingInquiry => "OWN_LISTING_INQUIRY",
            Self::IdempotencyKeyReuse => "IDEMPOTENCY_KEY_REUSE",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidProfileData => "INVALID_PROFILE_DATA",
            Self::InvalidListingData => "INVALID_LISTING_DATA",
            Self::InvalidInquiryData => "INVALID_INQUIRY_DATA",
            Self::InvalidAvatarUrl => "INVALID_AVATAR_URL",
            Self::MissingData => "MISSING_DATA",
            Self::Forbidden => "FORBIDDEN",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for MarketplaceError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::ProfileNotFound | Self::ListingNotFound => StatusCode::NOT_FOUND,
            Self::ProfileAlreadyExists
            | Self::ListingNotPublishable
            | Self::OwnListingInquiry
            | Self::IdempotencyKeyReuse => StatusCode::CONFLICT,
            Self::InvalidRole
            | Self::InvalidProfileData
            | Self::InvalidListingData
            | Self::InvalidInquiryData
            | Self::InvalidAvatarUrl
            | Self::MissingData => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = error_body(self.kind(), &self.to_string());
        (status, axum::Json(body)).into_response()
    }
}
