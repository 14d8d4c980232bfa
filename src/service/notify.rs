//! Completion notification routing
//!
//! Routes an upload completion to the matching email flow. The match
//! on the metadata variant is exhaustive; unknown upload types never
//! reach this layer because deserialization already rejected them.
//! Exactly one email is sent per completion, or none on failure.

use std::sync::Arc;

use crate::api::dto::{CompleteRequest, UploadMetadata};
use crate::email::{Mailer, RenderContext, render_editor_email, render_review_email};
use crate::error::AppError;
use crate::review::ReviewStore;

/// Notification router
pub struct NotificationService {
    mailer: Arc<dyn Mailer>,
    reviews: Arc<ReviewStore>,
    render_ctx: RenderContext,
}

impl NotificationService {
    pub fn new(mailer: Arc<dyn Mailer>, reviews: Arc<ReviewStore>, render_ctx: RenderContext) -> Self {
        Self {
            mailer,
            reviews,
            render_ctx,
        }
    }

    /// Dispatch the notification for a completed upload
    ///
    /// # Errors
    /// Returns `UpstreamEmail` (or transport errors) from dispatch; no
    /// partial-success state exists.
    pub async fn complete(&self, request: CompleteRequest) -> Result<(), AppError> {
        match &request.metadata {
            UploadMetadata::Raw(raw) => {
                let email = render_editor_email(raw, &request.files, &self.render_ctx);
                tracing::info!(
                    editor = %raw.editor,
                    client = %raw.client_name,
                    files = request.files.len(),
                    "Dispatching editor assignment"
                );
                self.mailer.send(&email).await
            }
            UploadMetadata::Edited(edited) => {
                let submitted_at = chrono::Utc::now();
                let review_id =
                    self.reviews
                        .record(edited.clone(), request.files.clone(), submitted_at);
                let email = render_review_email(
                    edited,
                    &request.files,
                    &review_id,
                    submitted_at,
                    &self.render_ctx,
                );
                tracing::info!(
                    project = %edited.project_name,
                    review_id = %review_id,
                    files = request.files.len(),
                    "Dispatching review request"
                );
                self.mailer.send(&email).await
            }
        }
    }
}
