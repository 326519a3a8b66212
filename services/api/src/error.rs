use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// API service domain error variants.
///
/// `LinkNotFound` and `InvalidOrExpiredLink` are distinct so call sites can
/// log which one happened, but they serialize to the identical public body —
/// an unknown token and a lapsed token must be indistinguishable to callers.
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("user not found")]
    UserNotFound,
    #[error("post not found")]
    PostNotFound,
    #[error("share link is invalid or has expired")]
    LinkNotFound,
    #[error("share link is invalid or has expired")]
    InvalidOrExpiredLink,
    #[error("invalid or expired otp")]
    InvalidOrExpiredOtp,
    #[error("otp required")]
    OtpRequired,
    #[error("forbidden")]
    Forbidden,
    #[error("invalid credential")]
    InvalidCredential,
    #[error("email already registered")]
    EmailTaken,
    #[error("expiry must be in the future")]
    InvalidExpiry,
    #[error("no file url for this post")]
    FileUrlNotFound,
    #[error("failed to deliver otp email")]
    NotificationFailed,
    #[error("internal error")]
    Internal(#[from] anyhow::Error),
}

impl ApiError {
    pub fn kind(&self) -> &'static str {
        match self {
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::PostNotFound => "POST_NOT_FOUND",
            Self::LinkNotFound | Self::InvalidOrExpiredLink => "INVALID_LINK",
            Self::InvalidOrExpiredOtp => "INVALID_OTP",
            Self::OtpRequired => "OTP_REQUIRED",
            Self::Forbidden => "FORBIDDEN",
            Self::InvalidCredential => "INVALID_CREDENTIAL",
            Self::EmailTaken => "EMAIL_TAKEN",
            Self::InvalidExpiry => "INVALID_EXPIRY",
            Self::FileUrlNotFound => "FILE_URL_NOT_FOUND",
            Self::NotificationFailed => "NOTIFICATION_FAILED",
            Self::Internal(_) => "INTERNAL",
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = match &self {
            Self::UserNotFound
            | Self::PostNotFound
            | Self::LinkNotFound
            | Self::InvalidOrExpiredLink
            | Self::FileUrlNotFound => StatusCode::NOT_FOUND,
            Self::InvalidOrExpiredOtp | Self::InvalidCredential => StatusCode::UNAUTHORIZED,
            Self::OtpRequired | Self::InvalidExpiry => StatusCode::BAD_REQUEST,
            Self::Forbidden => StatusCode::FORBIDDEN,
            Self::EmailTaken => StatusCode::CONFLICT,
            Self::NotificationFailed => StatusCode::BAD_GATEWAY,
            Self::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        // Log 500s only — tower-http TraceLayer already records method/uri/status for all
        // requests. 4xx are expected client errors; logging them here would be noise.
        // Internal errors need the anyhow chain logged so the root cause is traceable.
        if let Self::Internal(ref e) = self {
            tracing::error!(error = %e, kind = "INTERNAL", "internal error");
        }
        let body = serde_json::json!({
            "kind": self.kind(),
            "message": self.to_string(),
        });
        (status, axum::Json(body)).into_response()
    }
}
