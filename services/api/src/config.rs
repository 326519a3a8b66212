/// API service configuration loaded from environment variables.
#[derive(Debug)]
pub struct ApiConfig {
    /// PostgreSQL connection URL.
    pub database_url: String,
    /// HMAC secret for signing JWT access tokens.
    pub jwt_secret: String,
    /// TCP port to listen on (default 3114). Env var: `API_PORT`.
    pub api_port: u16,
    /// HTTP mail-relay endpoint OTP emails are POSTed to. Env var: `MAIL_RELAY_URL`.
    pub mail_relay_url: String,
    /// Sender address for OTP emails. Env var: `MAIL_FROM`.
    pub mail_from: String,
    /// Frontend base URL share links are rendered against. Env var: `SHARE_BASE_URL`.
    pub share_base_url: String,
}

impl ApiConfig {
    pub fn from_env() -> Self {
        Self {
            database_url: std::env::var("DATABASE_URL").expect("DATABASE_URL"),
            jwt_secret: std::env::var("JWT_SECRET").expect("JWT_SECRET"),
            api_port: std::env::var("API_PORT")
                .ok()
                .and_then(|v| v.parse().ok())
                .unwrap_or(3114),
            mail_relay_url: std::env::var("MAIL_RELAY_URL").expect("MAIL_RELAY_URL"),
            mail_from: std::env::var("MAIL_FROM").expect("MAIL_FROM"),
            share_base_url: std::env::var("SHARE_BASE_URL").expect("SHARE_BASE_URL"),
        }
    }
}
