//! Object-storage provider integration
//!
//! - `client`: HTTP client for the provider's native authorize /
//!   upload-URL issuance API, behind the `StorageClient` trait
//! - `auth_cache`: process-wide cache for the account authorization

mod auth_cache;
mod client;

pub use auth_cache::AuthCache;
pub use client::{HttpStorageClient, StorageAuthorization, StorageClient, UploadTarget};

#[cfg(test)]
pub use client::MockStorageClient;
