//! Response envelope shared by every Elaview HTTP endpoint.
//!
//! Success bodies are `{"success": true, "data": …}`; list endpoints add a
//! `pagination` object. Error bodies are
//! `{"success": false, "error": KIND, "message": …}` — services build them
//! from their own error enums via [`error_body`].

use axum::Json;
use serde::Serialize;

use elaview_domain::pagination::PageInfo;

/// Envelope for a single-object success response.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
}

/// Envelope for a paginated list response.
#[derive(Debug, Serialize)]
pub struct PagedResponse<T: Serialize> {
    pub success: bool,
    pub data: Vec<T>,
    pub pagination: PageInfo,
}

/// Wrap `data` in the standard success envelope.
pub fn success<T: Serialize>(data: T) -> Json<ApiResponse<T>> {
    Json(ApiResponse {
        success: true,
        data,
    })
}

/// Wrap a page of items plus pagination metadata in the success envelope.
pub fn paged<T: Serialize>(data: Vec<T>, pagination: PageInfo) -> Json<PagedResponse<T>> {
    Json(PagedResponse {
        success: true,
        data,
        pagination,
    })
}

/// Build the standard error body for a service error variant.
///
/// `kind` is the stable SCREAMING_SNAKE code clients dispatch on; `message`
/// is the human-readable description.
pub fn error_body(kind: &str, message: &str) -> serde_json::Value {
    serde_json::json!({
        "success": false,
        "error": kind,
        "message": message,
    })
}
