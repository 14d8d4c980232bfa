//! Email dispatch
//!
//! Hands a rendered notification to the delivery provider's HTTP send
//! API. No retry: a rejection propagates to the request boundary and
//! the completion fails as a whole.

use async_trait::async_trait;
use reqwest::header::AUTHORIZATION;

use crate::config::EmailConfig;
use crate::error::AppError;

use super::render::NotificationEnvelope;

/// Seam to the email delivery provider
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait Mailer: Send + Sync {
    /// Send one rendered notification
    async fn send(&self, message: &NotificationEnvelope) -> Result<(), AppError>;
}

/// Reqwest-backed client for a JSON send API (bearer-key auth)
pub struct HttpMailer {
    http: reqwest::Client,
    api_url: String,
    api_key: String,
}

impl HttpMailer {
    pub fn new(http: reqwest::Client, config: &EmailConfig) -> Self {
        Self {
            http,
            api_url: config.api_url.trim_end_matches('/').to_string(),
            api_key: config.api_key.clone(),
        }
    }
}

#[async_trait]
impl Mailer for HttpMailer {
    async fn send(&self, message: &NotificationEnvelope) -> Result<(), AppError> {
        let url = format!("{}/emails", self.api_url);

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, format!("Bearer {}", self.api_key))
            .json(&serde_json::json!({
                "from": message.from,
                "to": [message.to],
                "subject": message.subject,
                "html": message.html_body,
            }))
            .send()
            .await
            .map_err(|e| AppError::UpstreamEmail(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamEmail(format!(
                "send returned {}: {}",
                status, body
            )));
        }

        tracing::info!(to = %message.to, subject = %message.subject, "Notification sent");
        Ok(())
    }
}
