//! Storage provider client
//!
//! Speaks the provider's native two-step API: a basic-auth account
//! authorize call, then upload-URL issuance scoped to a bucket using
//! the returned account token. The trait seam lets tests substitute a
//! fake provider.

use async_trait::async_trait;
use base64::Engine as _;
use base64::engine::general_purpose::STANDARD as BASE64;
use reqwest::header::AUTHORIZATION;
use serde::Deserialize;

use crate::config::StorageConfig;
use crate::error::AppError;

/// Account-level authorization issued by the storage provider
///
/// Valid for roughly 24 hours; cached by [`super::AuthCache`] and never
/// reused past its recorded expiry. Provider-specific extra fields are
/// ignored on deserialization.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StorageAuthorization {
    /// Base URL for subsequent API calls
    pub api_url: String,
    /// Account-scoped bearer token
    pub authorization_token: String,
    /// Provider-reported public download base, informational only;
    /// download links use the configured `storage.download_url`
    #[serde(default)]
    pub download_url: Option<String>,
}

/// Single-use upload destination issued by the provider
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadTarget {
    pub upload_url: String,
    /// Token scoped to `upload_url`, distinct from the account token
    pub authorization_token: String,
}

/// Seam to the storage provider's control-plane API
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait StorageClient: Send + Sync {
    /// Perform the basic-auth account handshake
    async fn authorize(&self) -> Result<StorageAuthorization, AppError>;

    /// Request a single-use upload URL for the configured bucket
    async fn new_upload_target(
        &self,
        auth: &StorageAuthorization,
    ) -> Result<UploadTarget, AppError>;
}

/// Reqwest-backed client for the provider's HTTP API
pub struct HttpStorageClient {
    http: reqwest::Client,
    key_id: String,
    application_key: String,
    bucket_id: String,
    endpoint: String,
}

impl HttpStorageClient {
    pub fn new(http: reqwest::Client, config: &StorageConfig) -> Self {
        Self {
            http,
            key_id: config.key_id.clone(),
            application_key: config.application_key.clone(),
            bucket_id: config.bucket_id.clone(),
            endpoint: config.endpoint.trim_end_matches('/').to_string(),
        }
    }
}

#[async_trait]
impl StorageClient for HttpStorageClient {
    async fn authorize(&self) -> Result<StorageAuthorization, AppError> {
        let url = format!("{}/b2api/v2/b2_authorize_account", self.endpoint);
        let credentials = BASE64.encode(format!("{}:{}", self.key_id, self.application_key));

        let response = self
            .http
            .get(&url)
            .header(AUTHORIZATION, format!("Basic {}", credentials))
            .send()
            .await
            .map_err(|e| AppError::UpstreamAuth(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamAuth(format!(
                "authorize returned {}: {}",
                status, body
            )));
        }

        let auth: StorageAuthorization = response
            .json()
            .await
            .map_err(|e| AppError::UpstreamAuth(format!("malformed authorize response: {}", e)))?;

        tracing::debug!(api_url = %auth.api_url, "Storage account authorized");
        Ok(auth)
    }

    async fn new_upload_target(
        &self,
        auth: &StorageAuthorization,
    ) -> Result<UploadTarget, AppError> {
        let url = format!(
            "{}/b2api/v2/b2_get_upload_url",
            auth.api_url.trim_end_matches('/')
        );

        let response = self
            .http
            .post(&url)
            .header(AUTHORIZATION, &auth.authorization_token)
            .json(&serde_json::json!({ "bucketId": self.bucket_id }))
            .send()
            .await
            .map_err(|e| AppError::UpstreamStorage(e.to_string()))?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            return Err(AppError::UpstreamStorage(format!(
                "get_upload_url returned {}: {}",
                status, body
            )));
        }

        let target: UploadTarget = response.json().await.map_err(|e| {
            AppError::UpstreamStorage(format!("malformed upload-url response: {}", e))
        })?;

        Ok(target)
    }
}
