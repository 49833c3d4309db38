use axum::{
    Router,
    routing::{delete, get, patch, post, put},
};

use elaview_core::health::{healthz, readyz};
use elaview_core::middleware::{request_id_layer, trace_layer};

use crate::handlers::{
    inquiry::{my_inquiries, submit_inquiry},
    listing::{
        archive_listing, browse_listings, create_listing, get_listing, my_listings,
        publish_listing, update_listing,
    },
    preferences::{get_preferences, put_preferences},
    user::{
        create_user, deactivate_me, get_me, get_stats, get_user, reactivate_me, search_users,
        set_avatar, touch_last_active, update_me,
    },
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Profiles
        .route("/users", post(create_user))
        .route("/users/@me", get(get_me))
        .route("/users/@me", patch(update_me))
        .route("/users/@me", delete(deactivate_me))
        .route("/users/@me/reactivate", post(reactivate_me))
        .route("/users/@me/last-active", post(touch_last_active))
        .route("/users/@me/avatar", put(set_avatar))
        .route("/users/@me/stats", get(get_stats))
        .route("/users/@me/preferences", get(get_preferences))
        .route("/users/@me/preferences", put(put_preferences))
        .route("/users/@me/listings", get(my_listings))
        .route("/users/@me/inquiries", get(my_inquiries))
        .route("/users/search", get(search_users))
        .route("/users/{id}", get(get_user))
        // Listings
        .route("/listings", post(create_listing))
        .route("/listings", get(browse_listings))
        .route(
            "/listings/{id}",
            get(get_listing)
                .patch(update_listing)
                .delete(archive_listing),
        )
        .route("/listings/{id}/publish", post(publish_listing))
        // Inquiries
        .route("/listings/{id}/inquiries", post(submit_inquiry))
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
