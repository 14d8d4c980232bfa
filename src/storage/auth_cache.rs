//! Account authorization cache
//!
//! The provider's account authorization is valid for about 24 hours.
//! One authorization is held per process and refreshed when its
//! recorded expiry passes; the expiry window is kept one hour short of
//! the provider's validity so a credential is never used right at the
//! boundary.

use chrono::{DateTime, Duration, Utc};
use tokio::sync::Mutex;

use crate::error::AppError;

use super::client::{StorageAuthorization, StorageClient};

/// Cached-authorization validity window, 1h inside the provider's 24h
const AUTH_TTL_HOURS: i64 = 23;

struct CachedAuthorization {
    auth: StorageAuthorization,
    expires_at: DateTime<Utc>,
}

/// Process-wide authorization cache
///
/// Owned by `AppState` and injected into the preparation flow. The
/// async mutex serializes refreshes, so at most one authorize call is
/// in flight per process.
pub struct AuthCache {
    inner: Mutex<Option<CachedAuthorization>>,
}

impl AuthCache {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(None),
        }
    }

    /// Return the cached authorization, refreshing it if absent or expired
    ///
    /// # Errors
    /// Returns `UpstreamAuth` if the provider rejects the credentials.
    pub async fn get_or_refresh(
        &self,
        client: &dyn StorageClient,
    ) -> Result<StorageAuthorization, AppError> {
        self.get_or_refresh_at(client, Utc::now()).await
    }

    async fn get_or_refresh_at(
        &self,
        client: &dyn StorageClient,
        now: DateTime<Utc>,
    ) -> Result<StorageAuthorization, AppError> {
        let mut guard = self.inner.lock().await;

        if let Some(cached) = guard.as_ref() {
            if now < cached.expires_at {
                return Ok(cached.auth.clone());
            }
            tracing::info!("Storage authorization expired, refreshing");
        }

        let auth = client.authorize().await?;
        *guard = Some(CachedAuthorization {
            auth: auth.clone(),
            expires_at: now + Duration::hours(AUTH_TTL_HOURS),
        });

        tracing::info!("Storage authorization cached for {}h", AUTH_TTL_HOURS);
        Ok(auth)
    }
}

impl Default for AuthCache {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::MockStorageClient;

    fn stub_authorization() -> StorageAuthorization {
        StorageAuthorization {
            api_url: "https://api000.example.com".to_string(),
            authorization_token: "account-token".to_string(),
            download_url: None,
        }
    }

    #[tokio::test]
    async fn second_call_within_window_reuses_cached_authorization() {
        let mut client = MockStorageClient::new();
        client
            .expect_authorize()
            .times(1)
            .returning(|| Ok(stub_authorization()));

        let cache = AuthCache::new();
        let first = cache.get_or_refresh(&client).await.unwrap();
        let second = cache.get_or_refresh(&client).await.unwrap();

        assert_eq!(first.authorization_token, second.authorization_token);
    }

    #[tokio::test]
    async fn expired_authorization_triggers_exactly_one_refresh() {
        let mut client = MockStorageClient::new();
        client
            .expect_authorize()
            .times(2)
            .returning(|| Ok(stub_authorization()));

        let cache = AuthCache::new();
        let start = Utc::now();
        cache.get_or_refresh_at(&client, start).await.unwrap();

        // Still inside the 23h window: no refresh.
        cache
            .get_or_refresh_at(&client, start + Duration::hours(22))
            .await
            .unwrap();

        // Past the window: one refresh.
        cache
            .get_or_refresh_at(&client, start + Duration::hours(24))
            .await
            .unwrap();
    }

    #[tokio::test]
    async fn provider_rejection_propagates_and_leaves_cache_empty() {
        let mut client = MockStorageClient::new();
        client
            .expect_authorize()
            .times(2)
            .returning(|| Err(AppError::UpstreamAuth("bad key".to_string())));

        let cache = AuthCache::new();
        assert!(cache.get_or_refresh(&client).await.is_err());
        // A failed handshake must not poison the cache with a phantom entry.
        assert!(cache.get_or_refresh(&client).await.is_err());
    }
}
