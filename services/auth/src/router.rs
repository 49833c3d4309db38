use axum::{
    Router,
    routing::{get, post, put},
};

use elaview_core::health::{healthz, readyz};
use elaview_core::middleware::{request_id_layer, trace_layer};

use crate::handlers::{
    password::{request_password_reset, reset_password},
    signup::signup,
    token::{check_token, create_token, refresh_token, revoke_token},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Signup
        .route("/auth/signup", post(signup))
        // Token
        .route(
            "/auth/token",
            get(check_token)
                .post(create_token)
                .patch(refresh_token)
                .delete(revoke_token),
        )
        // Password reset
        .route("/auth/password", post(request_password_reset))
        .route("/auth/password", put(reset_password))
        .layer(trace_layer())
        .layer(request_id_layer())
        .with_state(state)
}
