//! In-memory review state
//!
//! Review-request emails carry an opaque id in their approve/revise
//! links; the context behind that id lives here. This is a stand-in
//! for a durable key-value store: no eviction, nothing survives a
//! restart, and concurrent process instances do not share it. The
//! review-decision endpoint that consumes these records is a separate
//! service.

use std::collections::HashMap;
use std::sync::Mutex;

use chrono::{DateTime, Utc};
use rand::RngCore;

use crate::api::dto::{EditedUploadMetadata, UploadedFileRef};

/// Context recorded for one pending review
#[derive(Debug, Clone)]
pub struct PendingReview {
    pub metadata: EditedUploadMetadata,
    pub files: Vec<UploadedFileRef>,
    pub submitted_at: DateTime<Utc>,
}

/// Process-wide pending-review map, owned by `AppState`
///
/// The lock is held only for map operations, never across an await.
pub struct ReviewStore {
    inner: Mutex<HashMap<String, PendingReview>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self {
            inner: Mutex::new(HashMap::new()),
        }
    }

    /// Record a pending review and return its fresh id
    pub fn record(
        &self,
        metadata: EditedUploadMetadata,
        files: Vec<UploadedFileRef>,
        submitted_at: DateTime<Utc>,
    ) -> String {
        let id = new_review_id();
        let review = PendingReview {
            metadata,
            files,
            submitted_at,
        };

        let mut guard = self.inner.lock().expect("review store lock poisoned");
        guard.insert(id.clone(), review);
        id
    }

    /// Look up a pending review by id
    pub fn get(&self, id: &str) -> Option<PendingReview> {
        let guard = self.inner.lock().expect("review store lock poisoned");
        guard.get(id).cloned()
    }

    pub fn len(&self) -> usize {
        let guard = self.inner.lock().expect("review store lock poisoned");
        guard.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl Default for ReviewStore {
    fn default() -> Self {
        Self::new()
    }
}

/// 16 random bytes, hex-encoded
fn new_review_id() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}
