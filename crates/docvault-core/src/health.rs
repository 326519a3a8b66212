use axum::http::StatusCode;

/// `GET /healthz` — process is up.
pub async fn healthz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}

/// `GET /readyz` — process is ready for traffic. Services with external
/// dependencies can mount a richer readiness handler of their own instead.
pub async fn readyz() -> (StatusCode, &'static str) {
    (StatusCode::OK, "ok")
}
