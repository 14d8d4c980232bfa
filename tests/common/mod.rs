//! Common test utilities for E2E tests

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use tokio::net::TcpListener;

use footagedrop::email::{Mailer, NotificationEnvelope};
use footagedrop::error::AppError;
use footagedrop::storage::{StorageAuthorization, StorageClient, UploadTarget};
use footagedrop::{AppState, config};

/// Fake storage provider that counts authorize calls
pub struct FakeStorage {
    pub authorize_calls: AtomicUsize,
    pub upload_url_calls: AtomicUsize,
    pub fail: AtomicBool,
}

impl FakeStorage {
    pub fn new() -> Self {
        Self {
            authorize_calls: AtomicUsize::new(0),
            upload_url_calls: AtomicUsize::new(0),
            fail: AtomicBool::new(false),
        }
    }
}

#[async_trait]
impl StorageClient for FakeStorage {
    async fn authorize(&self) -> Result<StorageAuthorization, AppError> {
        self.authorize_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::UpstreamAuth("test credentials refused".into()));
        }
        Ok(StorageAuthorization {
            api_url: "https://api000.test.example.com".to_string(),
            authorization_token: "test-account-token".to_string(),
            download_url: Some("https://files.test.example.com".to_string()),
        })
    }

    async fn new_upload_target(
        &self,
        _auth: &StorageAuthorization,
    ) -> Result<UploadTarget, AppError> {
        self.upload_url_calls.fetch_add(1, Ordering::SeqCst);
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::UpstreamStorage("test bucket unavailable".into()));
        }
        Ok(UploadTarget {
            upload_url: "https://pod-000.test.example.com/upload/abc".to_string(),
            authorization_token: "test-upload-token".to_string(),
        })
    }
}

/// Fake mailer that records every envelope it is asked to send
pub struct RecordingMailer {
    pub sent: Mutex<Vec<NotificationEnvelope>>,
    pub fail: AtomicBool,
}

impl RecordingMailer {
    pub fn new() -> Self {
        Self {
            sent: Mutex::new(Vec::new()),
            fail: AtomicBool::new(false),
        }
    }

    pub fn sent_count(&self) -> usize {
        self.sent.lock().unwrap().len()
    }

    pub fn last_sent(&self) -> NotificationEnvelope {
        self.sent
            .lock()
            .unwrap()
            .last()
            .cloned()
            .expect("at least one email should have been sent")
    }
}

#[async_trait]
impl Mailer for RecordingMailer {
    async fn send(&self, message: &NotificationEnvelope) -> Result<(), AppError> {
        if self.fail.load(Ordering::SeqCst) {
            return Err(AppError::UpstreamEmail("test provider rejection".into()));
        }
        self.sent.lock().unwrap().push(message.clone());
        Ok(())
    }
}

/// Test server instance
pub struct TestServer {
    pub addr: String,
    pub state: AppState,
    pub storage: Arc<FakeStorage>,
    pub mailer: Arc<RecordingMailer>,
    pub client: reqwest::Client,
}

impl TestServer {
    /// Create a new test server instance with fake collaborators
    pub async fn new() -> Self {
        let config = test_config();

        let storage = Arc::new(FakeStorage::new());
        let mailer = Arc::new(RecordingMailer::new());

        let state =
            AppState::with_collaborators(config, storage.clone(), mailer.clone());

        // Create HTTP client
        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(10))
            .build()
            .unwrap();

        // Bind to random port
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        let addr_str = format!("http://{}", addr);

        // Build router
        let app = footagedrop::build_router(state.clone());

        // Spawn server in background
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Wait a bit for server to start
        tokio::time::sleep(tokio::time::Duration::from_millis(100)).await;

        Self {
            addr: addr_str,
            state,
            storage,
            mailer,
            client,
        }
    }

    /// Get base URL for API requests
    pub fn url(&self, path: &str) -> String {
        format!("{}{}", self.addr, path)
    }

    /// POST a JSON body to the upload endpoint
    pub async fn post_uploads(&self, body: serde_json::Value) -> reqwest::Response {
        self.client
            .post(self.url("/api/uploads"))
            .json(&body)
            .send()
            .await
            .unwrap()
    }
}

fn test_config() -> config::AppConfig {
    config::AppConfig {
        server: config::ServerConfig {
            host: "127.0.0.1".to_string(),
            port: 0,
        },
        app: config::ApplicationConfig {
            base_url: "https://uploads.test.example.com".to_string(),
        },
        storage: config::StorageConfig {
            key_id: "test-key-id".to_string(),
            application_key: "test-app-key".to_string(),
            bucket_id: "test-bucket-id".to_string(),
            bucket_name: "test-footage".to_string(),
            endpoint: "https://api.storage.test.example.com".to_string(),
            download_url: "https://files.test.example.com".to_string(),
        },
        email: config::EmailConfig {
            api_url: "https://mail.test.example.com".to_string(),
            api_key: "test-mail-key".to_string(),
            sender: "uploads@test.example.com".to_string(),
            reviewer: "boss@test.example.com".to_string(),
        },
        logging: config::LoggingConfig {
            level: "info".to_string(),
            format: "pretty".to_string(),
        },
    }
}
