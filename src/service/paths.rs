//! Upload path planner
//!
//! Derives the storage object key and a trace id for an incoming file.
//! Keys embed the upload timestamp and sanitized business identifiers,
//! giving human-browsable, chronologically sortable paths without a
//! separate index.

use rand::Rng;

use crate::api::dto::UploadMetadata;

/// Planned destination for an incoming file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlannedPath {
    /// `<unix-millis>_<8 lowercase hex chars>`, traceability only;
    /// never a storage key component on its own
    pub file_id: String,
    /// Object key inside the bucket
    pub file_path: String,
}

/// Plan the storage path for an upload
///
/// Pure; assumes the metadata variant has already been validated.
pub fn plan_path(file_name: &str, metadata: &UploadMetadata) -> PlannedPath {
    let timestamp = chrono::Utc::now().timestamp_millis();
    plan_path_at(file_name, metadata, timestamp)
}

fn plan_path_at(file_name: &str, metadata: &UploadMetadata, timestamp: i64) -> PlannedPath {
    let file_id = format!("{}_{}", timestamp, random_suffix());

    let file_path = match metadata {
        UploadMetadata::Raw(raw) => format!(
            "raw_uploads/{}/{}_{}/{}",
            email_local_part(&raw.editor),
            timestamp,
            sanitize_segment(&raw.client_name),
            file_name
        ),
        UploadMetadata::Edited(edited) => format!(
            "edited_uploads/review/{}_{}/{}",
            timestamp,
            sanitize_segment(&edited.project_name),
            file_name
        ),
    };

    PlannedPath { file_id, file_path }
}

/// 8 lowercase hex characters; collision odds are accepted as negligible
fn random_suffix() -> String {
    let mut bytes = [0u8; 4];
    rand::thread_rng().fill(&mut bytes);
    hex::encode(bytes)
}

fn email_local_part(address: &str) -> &str {
    address.split('@').next().unwrap_or(address)
}

fn sanitize_segment(name: &str) -> String {
    name.chars()
        .map(|c| if c.is_whitespace() { '_' } else { c })
        .collect()
}
