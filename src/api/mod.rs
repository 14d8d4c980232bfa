//! API layer
//!
//! One dispatch endpoint in the style of the original function
//! handler: the JSON body carries an `action` discriminator selecting
//! `prepare` or `complete`. Anything else is rejected before any
//! collaborator is touched.

pub mod dto;

use axum::extract::State;
use axum::response::{IntoResponse, Json, Response};
use axum::routing::post;

use crate::AppState;
use crate::email::RenderContext;
use crate::error::AppError;
use crate::service::{NotificationService, UploadService};

use dto::{CompleteRequest, UploadRequest};

/// Upload API routes
pub fn upload_router() -> axum::Router<AppState> {
    axum::Router::new().route("/uploads", post(handle_upload))
}

/// POST /api/uploads
///
/// Dispatches on the body's `action` field. The action is read before
/// the operation body is deserialized so an unknown action yields
/// `Invalid action` rather than a field-level validation error.
async fn handle_upload(
    State(state): State<AppState>,
    Json(body): Json<serde_json::Value>,
) -> Result<Response, AppError> {
    let action = body
        .get("action")
        .and_then(|value| value.as_str())
        .unwrap_or_default()
        .to_string();

    match action.as_str() {
        "prepare" => {
            let request: UploadRequest = serde_json::from_value(body)
                .map_err(|e| AppError::Validation(e.to_string()))?;

            let service = UploadService::new(state.storage.clone(), state.auth_cache.clone());
            let prepared = service.prepare(request).await?;

            Ok(Json(prepared).into_response())
        }
        "complete" => {
            let request: CompleteRequest = serde_json::from_value(body)
                .map_err(|e| AppError::Validation(e.to_string()))?;

            let service = NotificationService::new(
                state.mailer.clone(),
                state.reviews.clone(),
                RenderContext::from_config(&state.config),
            );
            service.complete(request).await?;

            Ok(Json(serde_json::json!({
                "success": true,
                "message": "Notifications sent",
            }))
            .into_response())
        }
        other => {
            tracing::warn!(action = %other, "Rejected unrecognized action");
            Err(AppError::InvalidAction)
        }
    }
}
