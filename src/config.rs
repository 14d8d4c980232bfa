//! Configuration management
//!
//! Loads configuration from:
//! 1. Default values
//! 2. Configuration file (config/local.toml)
//! 3. Environment variables (override)
//!
//! Every required value is validated at startup so a missing credential
//! fails the boot, not the first request that needs it.

use serde::Deserialize;

/// Main application configuration
#[derive(Debug, Clone, Deserialize)]
pub struct AppConfig {
    pub server: ServerConfig,
    pub app: ApplicationConfig,
    pub storage: StorageConfig,
    pub email: EmailConfig,
    pub logging: LoggingConfig,
}

/// Server configuration
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Bind address (e.g., "0.0.0.0")
    pub host: String,
    /// Port number (e.g., 8080)
    pub port: u16,
}

/// Front-end application settings
#[derive(Debug, Clone, Deserialize)]
pub struct ApplicationConfig {
    /// Public base URL of the application UI, used for the
    /// call-to-action and review-decision links embedded in emails
    /// (e.g., "https://uploads.example.com")
    pub base_url: String,
}

/// Object-storage provider configuration (B2-native API)
#[derive(Debug, Clone, Deserialize)]
pub struct StorageConfig {
    /// Account key id for the authorize handshake
    pub key_id: String,
    /// Application key paired with `key_id`
    pub application_key: String,
    /// Bucket id passed to upload-URL issuance
    pub bucket_id: String,
    /// Bucket name as it appears in public file URLs
    pub bucket_name: String,
    /// Authorize endpoint base (e.g., "https://api.backblazeb2.com")
    pub endpoint: String,
    /// Public file-serving base; download links are
    /// `<download_url>/file/<bucket_name>/<key>`
    pub download_url: String,
}

/// Email provider configuration (HTTP send API)
#[derive(Debug, Clone, Deserialize)]
pub struct EmailConfig {
    /// Send endpoint base (e.g., "https://api.resend.com")
    pub api_url: String,
    /// Bearer API key
    pub api_key: String,
    /// Sender address for every notification
    pub sender: String,
    /// Fixed recipient for review-request notifications
    pub reviewer: String,
}

/// Logging configuration
#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error
    pub level: String,
    /// Log format: "pretty" or "json"
    pub format: String,
}

impl AppConfig {
    /// Load configuration from file and environment
    ///
    /// # Loading Order
    /// 1. Default values
    /// 2. config/default.toml (if exists)
    /// 3. config/local.toml (if exists)
    /// 4. Environment variables (FOOTAGEDROP_*)
    ///
    /// # Errors
    /// Returns error if configuration is missing required values or invalid
    pub fn load() -> Result<Self, crate::error::AppError> {
        use config::{Config, Environment, File};

        let config = Config::builder()
            // Start with default values
            .set_default("server.host", "127.0.0.1")?
            .set_default("server.port", 8080)?
            .set_default("storage.endpoint", "https://api.backblazeb2.com")?
            .set_default("email.api_url", "https://api.resend.com")?
            .set_default("logging.level", "info")?
            .set_default("logging.format", "pretty")?
            // Load from config/default.toml if it exists
            .add_source(File::with_name("config/default").required(false))
            // Load from config/local.toml if it exists (overrides default)
            .add_source(File::with_name("config/local").required(false))
            // Load from environment variables (FOOTAGEDROP_*)
            .add_source(
                Environment::with_prefix("FOOTAGEDROP")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;

        let app_config: Self = config
            .try_deserialize()
            .map_err(|e| crate::error::AppError::Config(e.to_string()))?;
        app_config.validate()?;
        Ok(app_config)
    }

    pub fn validate(&self) -> Result<(), crate::error::AppError> {
        require_non_empty("storage.key_id", &self.storage.key_id)?;
        require_non_empty("storage.application_key", &self.storage.application_key)?;
        require_non_empty("storage.bucket_id", &self.storage.bucket_id)?;
        require_non_empty("storage.bucket_name", &self.storage.bucket_name)?;
        require_non_empty("email.api_key", &self.email.api_key)?;
        require_non_empty("email.sender", &self.email.sender)?;
        require_non_empty("email.reviewer", &self.email.reviewer)?;

        require_absolute_url("app.base_url", &self.app.base_url)?;
        require_absolute_url("storage.endpoint", &self.storage.endpoint)?;
        require_absolute_url("storage.download_url", &self.storage.download_url)?;
        require_absolute_url("email.api_url", &self.email.api_url)?;

        Ok(())
    }
}

fn require_non_empty(key: &str, value: &str) -> Result<(), crate::error::AppError> {
    if value.trim().is_empty() {
        return Err(crate::error::AppError::Config(format!(
            "{} must not be empty",
            key
        )));
    }
    Ok(())
}

fn require_absolute_url(key: &str, value: &str) -> Result<(), crate::error::AppError> {
    let parsed = url::Url::parse(value)
        .map_err(|e| crate::error::AppError::Config(format!("{} is not a valid URL: {}", key, e)))?;
    if !matches!(parsed.scheme(), "http" | "https") {
        return Err(crate::error::AppError::Config(format!(
            "{} must be an http(s) URL",
            key
        )));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valid_config() -> AppConfig {
        AppConfig {
            server: ServerConfig {
                host: "127.0.0.1".to_string(),
                port: 8080,
            },
            app: ApplicationConfig {
                base_url: "https://uploads.example.com".to_string(),
            },
            storage: StorageConfig {
                key_id: "key-id".to_string(),
                application_key: "app-key".to_string(),
                bucket_id: "bucket-id".to_string(),
                bucket_name: "client-footage".to_string(),
                endpoint: "https://api.backblazeb2.com".to_string(),
                download_url: "https://f000.backblazeb2.com".to_string(),
            },
            email: EmailConfig {
                api_url: "https://api.resend.com".to_string(),
                api_key: "re_test_key".to_string(),
                sender: "uploads@example.com".to_string(),
                reviewer: "boss@example.com".to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
                format: "pretty".to_string(),
            },
        }
    }

    #[test]
    fn validate_accepts_complete_config() {
        assert!(valid_config().validate().is_ok());
    }

    #[test]
    fn validate_rejects_empty_storage_key() {
        let mut config = valid_config();
        config.storage.key_id = "  ".to_string();

        let error = config
            .validate()
            .expect_err("blank storage key id must fail validation");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message)
                if message.contains("storage.key_id")
        ));
    }

    #[test]
    fn validate_rejects_missing_email_key() {
        let mut config = valid_config();
        config.email.api_key = String::new();

        assert!(config.validate().is_err());
    }

    #[test]
    fn validate_rejects_malformed_base_url() {
        let mut config = valid_config();
        config.app.base_url = "not a url".to_string();

        let error = config
            .validate()
            .expect_err("unparseable app.base_url must fail validation");
        assert!(matches!(
            error,
            crate::error::AppError::Config(message)
                if message.contains("app.base_url")
        ));
    }

    #[test]
    fn validate_rejects_non_http_scheme() {
        let mut config = valid_config();
        config.email.api_url = "ftp://mail.example.com".to_string();

        assert!(config.validate().is_err());
    }
}
