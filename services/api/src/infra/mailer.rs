use serde::Serialize;

use crate::domain::repository::Notifier;
use crate::error::ApiError;

/// Mail delivery through the HTTP relay. The relay accepts a JSON message and
/// performs the actual SMTP hop.
#[derive(Clone)]
pub struct HttpMailer {
    pub http: reqwest::Client,
    pub relay_url: String,
    pub from: String,
}

#[derive(Serialize)]
struct RelayMessage<'a> {
    from: &'a str,
    to: &'a str,
    subject: &'a str,
    text: &'a str,
}

impl Notifier for HttpMailer {
    async fn send(&self, to: &str, subject: &str, body: &str) -> Result<(), ApiError> {
        let message = RelayMessage {
            from: &self.from,
            to,
            subject,
            text: body,
        };

        let response = self
            .http
            .post(&self.relay_url)
            .json(&message)
            .send()
            .await
            .map_err(|err| {
                tracing::warn!(%err, "mail relay unreachable");
                ApiError::NotificationFailed
            })?;

        if !response.status().is_success() {
            tracing::warn!(status = %response.status(), "mail relay rejected message");
            return Err(ApiError::NotificationFailed);
        }

        Ok(())
    }
}
