use axum::{
    Router,
    routing::{delete, get, post},
};
use tower_http::trace::TraceLayer;

use docvault_core::health::{healthz, readyz};
use docvault_core::middleware::request_id_layer;

use crate::handlers::{
    audit::list_my_audit_logs,
    auth::{get_me, login, register},
    otp::{request_otp, validate_otp},
    post::{create_post, delete_post, get_post, list_my_posts, toggle_protection},
    share::{create_share_link, deactivate_share_link, list_share_links},
    shared::{access_shared, request_shared_otp, view_shared},
};
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        // Health
        .route("/healthz", get(healthz))
        .route("/readyz", get(readyz))
        // Auth
        .route("/auth/register", post(register))
        .route("/auth/login", post(login))
        .route("/users/@me", get(get_me))
        // Posts (owner-only reads; public access goes through /shared)
        .route("/posts", post(create_post))
        .route("/posts/@me", get(list_my_posts))
        .route("/posts/{post_id}", get(get_post))
        .route("/posts/{post_id}", delete(delete_post))
        .route("/posts/{post_id}/protection", post(toggle_protection))
        // OTP
        .route("/posts/{post_id}/otp", post(request_otp))
        .route("/posts/{post_id}/otp/validate", post(validate_otp))
        // Share links (owner side)
        .route("/posts/{post_id}/share-links", post(create_share_link))
        .route("/posts/{post_id}/share-links", get(list_share_links))
        .route("/share-links/{link_id}", delete(deactivate_share_link))
        // Shared access (anonymous)
        .route("/shared/{token}", get(access_shared))
        .route("/shared/{token}/view", get(view_shared))
        .route("/shared/{token}/otp", post(request_shared_otp))
        // Audit
        .route("/audit-logs/@me", get(list_my_audit_logs))
        .layer(TraceLayer::new_for_http())
        .layer(request_id_layer())
        .with_state(state)
}
