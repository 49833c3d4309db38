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

use crate::domain::types::{Inquiry, InquiryBox};
use crate::error::MarketplaceError;
use crate::state::AppState;
use crate::usecase::inquiry::{ListInquiriesUseCase, SubmitInquiryInput, SubmitInquiryUseCase};

// ── Response types ───────────────────────────────────────────────────────────

#[derive(Serialize)]
pub struct InquiryResponse {
    pub id: String,
    pub listing_id: String,
    pub sender_id: String,
    pub owner_id: String,
    pub message: String,
    #[serde(serialize_with = "elaview_core::serde::to_rfc3339_ms")]
    pub created_at: chrono::DateTime<chrono::Utc>,
}

impl From<Inquiry> for InquiryResponse {
    fn from(inquiry: Inquiry) -> Self {
        Self {
            id: inquiry.id.to_string(),
            listing_id: inquiry.listing_id.to_string(),
            sender_id: inquiry.sender_id.to_string(),
            owner_id: inquiry.owner_id.to_string(),
            message: inquiry.message,
            created_at: inquiry.created_at,
        }
    }
}

// ── POST /listings/{id}/inquiries ────────────────────────────────────────────

#[derive(Deserialize)]
pub struct SubmitInquiryRequest {
    pub message: String,
    pub idempotency_key: String,
}

pub async fn submit_inquiry(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    Path(listing_id): Path<Uuid>,
    Json(body): Json<SubmitInquiryRequest>,
) -> Result<impl IntoResponse, MarketplaceError> {
    let usecase = SubmitInquiryUseCase {
        listings: state.listing_repo(),
        inquiries: state.inquiry_repo(),
    };
    let output = usecase
        .execute(
            identity.user_id,
            SubmitInquiryInput {
                listing_id,
                message: body.message,
                idempotency_key: body.idempotency_key,
            },
        )
        .await?;

    // Replays with the same idempotency key return the original with 200.
    let status = if output.created {
        StatusCode::CREATED
    } else {
        StatusCode::OK
    };
    Ok((status, success(InquiryResponse::from(output.inquiry))))
}

// ── GET /users/@me/inquiries ─────────────────────────────────────────────────

#[derive(Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub struct InquiriesQuery {
    #[serde(rename = "box")]
    pub inquiry_box: Option<String>,
    pub per_page: Option<u32>,
    pub page: Option<u32>,
}

pub async fn my_inquiries(
    identity: IdentityHeaders,
    State(state): State<AppState>,
    axum::extract::RawQuery(raw_query): axum::extract::RawQuery,
) -> Result<impl IntoResponse, MarketplaceError> {
    let query: InquiriesQuery = raw_query
        .as_deref()
        .map(serde_qs::from_str)
        .transpose()
        .map_err(|_| MarketplaceError::MissingData)?
        .unwrap_or_default();

    let inquiry_box = match query.inquiry_box.as_deref() {
        None => InquiryBox::Sent,
        Some(s) => InquiryBox::from_str(s).ok_or(MarketplaceError::MissingData)?,
    };
    let page = PageRequest {
        per_page: query.per_page.unwrap_or(25),
        page: query.page.unwrap_or(1),
    }
    .clamped();

    let usecase = ListInquiriesUseCase {
        repo: state.inquiry_repo(),
    };
    let (inquiries, total) = usecase
        .execute(identity.user_id, inquiry_box, page)
        .await?;

    let items: Vec<InquiryResponse> = inquiries.into_iter().map(InquiryResponse::from).collect();
    Ok(paged(items, page.info(total)))
}
