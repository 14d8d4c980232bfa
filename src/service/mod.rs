//! Service layer
//!
//! Business logic between the HTTP handlers and the provider clients:
//! - `paths`: deterministic storage-key planning
//! - `prepare`: upload-destination issuance
//! - `notify`: completion routing and notification dispatch

mod notify;
mod paths;
mod prepare;

pub use notify::NotificationService;
pub use paths::{PlannedPath, plan_path};
pub use prepare::UploadService;
