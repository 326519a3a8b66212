use sea_orm::Database;
use tracing::info;

use docvault_api::config::ApiConfig;
use docvault_api::router::build_router;
use docvault_api::state::AppState;

#[tokio::main]
async fn main() {
    docvault_core::tracing::init_tracing();

    let config = ApiConfig::from_env();

    let db = Database::connect(&config.database_url)
        .await
        .expect("failed to connect to database");

    let state = AppState {
        db,
        http: reqwest::Client::new(),
        jwt_secret: config.jwt_secret,
        mail_relay_url: config.mail_relay_url,
        mail_from: config.mail_from,
        share_base_url: config.share_base_url,
    };

    let router = build_router(state);
    let addr = format!("0.0.0.0:{}", config.api_port);
    let listener = tokio::net::TcpListener::bind(&addr)
        .await
        .expect("failed to bind");

    info!("api service listening on {addr}");
    axum::serve(listener, router).await.expect("server error");
}
