//! Wire types for the upload API
//!
//! Request/response bodies use camelCase field names to match the
//! browser client. `UploadMetadata` is an internally tagged union on
//! `uploadType`; an unrecognized tag fails deserialization and surfaces
//! as a validation error rather than silently picking a flow.

use serde::{Deserialize, Serialize};

/// Upload metadata, discriminated by `uploadType`
///
/// The variant fully determines which notification flow runs on
/// completion; fields are never read across variants.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "uploadType")]
pub enum UploadMetadata {
    /// Raw client footage headed to an editor
    #[serde(rename = "raw")]
    Raw(RawUploadMetadata),
    /// An edited cut headed to the reviewer for approval
    #[serde(rename = "edited")]
    Edited(EditedUploadMetadata),
}

/// Metadata for a raw-footage upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawUploadMetadata {
    /// Email address of the assigned editor
    pub editor: String,
    pub client_name: String,
    pub shoot_date: String,
    pub footage_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub music_type: Option<String>,
    /// Free text from the shooter; may contain newlines
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub instructions: Option<String>,
}

/// Metadata for an edited-video upload
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EditedUploadMetadata {
    pub project_name: String,
    pub client_name: String,
    pub editor_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Body of the `prepare` operation
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadRequest {
    pub file_name: String,
    #[serde(default)]
    pub file_size: Option<u64>,
    pub metadata: UploadMetadata,
}

/// Response of the `prepare` operation
///
/// The URL/token pair is provider-issued and single-use; the client
/// consumes it directly for the byte transfer. `file_id` exists for
/// traceability only.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PreparedUpload {
    pub upload_url: String,
    pub auth_token: String,
    pub file_id: String,
    pub file_path: String,
}

/// A file the client reports as written to storage
///
/// Supplied on `complete`; not verified against the bucket.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedFileRef {
    pub file_name: String,
    pub file_path: String,
    #[serde(default)]
    pub size: Option<u64>,
}

/// Body of the `complete` operation
#[derive(Debug, Clone, Deserialize)]
pub struct CompleteRequest {
    pub metadata: UploadMetadata,
    pub files: Vec<UploadedFileRef>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn raw_metadata_deserializes_from_camel_case() {
        let metadata: UploadMetadata = serde_json::from_value(serde_json::json!({
            "uploadType": "raw",
            "editor": "jane@x.com",
            "clientName": "Acme Co",
            "shootDate": "2026-08-01",
            "footageType": "Wedding",
        }))
        .unwrap();

        match metadata {
            UploadMetadata::Raw(raw) => {
                assert_eq!(raw.editor, "jane@x.com");
                assert_eq!(raw.client_name, "Acme Co");
                assert!(raw.music_type.is_none());
                assert!(raw.instructions.is_none());
            }
            UploadMetadata::Edited(_) => panic!("expected raw variant"),
        }
    }

    #[test]
    fn edited_metadata_deserializes_with_optional_description() {
        let metadata: UploadMetadata = serde_json::from_value(serde_json::json!({
            "uploadType": "edited",
            "projectName": "Acme Wedding Final",
            "clientName": "Acme Co",
            "editorName": "Jane",
            "description": "Color graded, two cuts",
        }))
        .unwrap();

        assert!(matches!(
            metadata,
            UploadMetadata::Edited(edited) if edited.description.as_deref() == Some("Color graded, two cuts")
        ));
    }

    #[test]
    fn unknown_upload_type_is_rejected() {
        let result: Result<UploadMetadata, _> = serde_json::from_value(serde_json::json!({
            "uploadType": "director-cut",
            "projectName": "Acme",
        }));

        assert!(result.is_err());
    }

    #[test]
    fn missing_required_variant_field_is_rejected() {
        // raw variant without footageType
        let result: Result<UploadMetadata, _> = serde_json::from_value(serde_json::json!({
            "uploadType": "raw",
            "editor": "jane@x.com",
            "clientName": "Acme Co",
            "shootDate": "2026-08-01",
        }));

        assert!(result.is_err());
    }
}
