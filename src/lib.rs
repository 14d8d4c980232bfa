//! Footagedrop - upload broker and notification service
//!
//! Brokers direct-to-storage file uploads for a video production
//! workflow and dispatches the matching transactional email when an
//! upload completes.
//!
//! # Flow
//!
//! ```text
//! client ── prepare ──▶ API ──▶ auth cache ──▶ storage provider
//!        ◀─ upload URL + token ─┘
//! client ── bytes ──▶ storage provider (direct, outside this service)
//! client ── complete ──▶ API ──▶ renderer ──▶ email provider
//! ```
//!
//! # Modules
//!
//! - `api`: HTTP handlers and wire types
//! - `service`: path planning, upload preparation, notification routing
//! - `storage`: provider client + authorization cache
//! - `email`: renderers + dispatch client
//! - `review`: in-memory pending-review state
//! - `config`: configuration management
//! - `error`: error types

pub mod api;
pub mod config;
pub mod email;
pub mod error;
pub mod review;
pub mod service;
pub mod storage;

use std::sync::Arc;

/// Application state shared across all handlers
///
/// Cloned per request; every field is an `Arc`. The storage and email
/// collaborators sit behind trait objects so tests inject fakes, and
/// the two pieces of process-wide mutable state (authorization cache,
/// review store) are owned here rather than living as ambient globals.
#[derive(Clone)]
pub struct AppState {
    /// Application configuration
    pub config: Arc<config::AppConfig>,

    /// Storage provider control-plane client
    pub storage: Arc<dyn storage::StorageClient>,

    /// Account authorization cache (23h validity window)
    pub auth_cache: Arc<storage::AuthCache>,

    /// Email delivery client
    pub mailer: Arc<dyn email::Mailer>,

    /// Pending-review state (in-memory placeholder for a durable store)
    pub reviews: Arc<review::ReviewStore>,
}

impl AppState {
    /// Initialize application state with the real provider clients
    ///
    /// # Errors
    /// Returns error if the shared HTTP client cannot be built
    pub fn new(config: config::AppConfig) -> Result<Self, error::AppError> {
        let http_client = reqwest::Client::builder()
            .user_agent("Footagedrop/0.1.0")
            .timeout(std::time::Duration::from_secs(30))
            .build()
            .map_err(|e| error::AppError::Internal(e.into()))?;

        let storage_client = storage::HttpStorageClient::new(http_client.clone(), &config.storage);
        let mailer = email::HttpMailer::new(http_client, &config.email);

        tracing::info!(
            bucket = %config.storage.bucket_name,
            reviewer = %config.email.reviewer,
            "Application state initialized"
        );

        Ok(Self {
            config: Arc::new(config),
            storage: Arc::new(storage_client),
            auth_cache: Arc::new(storage::AuthCache::new()),
            mailer: Arc::new(mailer),
            reviews: Arc::new(review::ReviewStore::new()),
        })
    }

    /// State with injected collaborators, for tests
    pub fn with_collaborators(
        config: config::AppConfig,
        storage_client: Arc<dyn storage::StorageClient>,
        mailer: Arc<dyn email::Mailer>,
    ) -> Self {
        Self {
            config: Arc::new(config),
            storage: storage_client,
            auth_cache: Arc::new(storage::AuthCache::new()),
            mailer,
            reviews: Arc::new(review::ReviewStore::new()),
        }
    }
}

/// Build the Axum router with all routes.
///
/// Shared by the binary and integration tests to keep route
/// composition consistent across environments.
pub fn build_router(state: AppState) -> axum::Router {
    use axum::Router;
    use tower_http::cors::{Any, CorsLayer};
    use tower_http::trace::TraceLayer;

    // The browser client calls prepare/complete cross-origin around
    // its direct-to-storage PUT.
    let cors_layer = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", axum::routing::get(health_check))
        .nest("/api", api::upload_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors_layer)
        .with_state(state)
}

async fn health_check() -> &'static str {
    "OK"
}
