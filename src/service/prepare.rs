//! Upload preparation
//!
//! Produces a one-time upload destination for a client: reuse or
//! refresh the account authorization, ask the provider for an upload
//! URL scoped to the configured bucket, and plan the object key. The
//! file bytes themselves never pass through this service; the client
//! PUTs directly against the returned URL/token pair.

use std::sync::Arc;

use crate::api::dto::{PreparedUpload, UploadRequest};
use crate::error::AppError;
use crate::storage::{AuthCache, StorageClient};

use super::paths::plan_path;

/// Upload preparation service
pub struct UploadService {
    storage: Arc<dyn StorageClient>,
    auth_cache: Arc<AuthCache>,
}

impl UploadService {
    pub fn new(storage: Arc<dyn StorageClient>, auth_cache: Arc<AuthCache>) -> Self {
        Self {
            storage,
            auth_cache,
        }
    }

    /// Prepare a direct upload for the client
    ///
    /// # Errors
    /// - `Validation` on an empty file name
    /// - `UpstreamAuth` / `UpstreamStorage` when the provider refuses
    pub async fn prepare(&self, request: UploadRequest) -> Result<PreparedUpload, AppError> {
        if request.file_name.trim().is_empty() {
            return Err(AppError::Validation(
                "fileName must not be empty".to_string(),
            ));
        }

        let auth = self.auth_cache.get_or_refresh(self.storage.as_ref()).await?;
        let target = self.storage.new_upload_target(&auth).await?;
        let planned = plan_path(&request.file_name, &request.metadata);

        tracing::info!(
            file_id = %planned.file_id,
            file_path = %planned.file_path,
            size = ?request.file_size,
            "Upload prepared"
        );

        Ok(PreparedUpload {
            upload_url: target.upload_url,
            auth_token: target.authorization_token,
            file_id: planned.file_id,
            file_path: planned.file_path,
        })
    }
}
