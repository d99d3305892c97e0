//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! ## Required
//! - `TIFO_API_BASE` - Base URL of the store backend (e.g., `https://api.tifo.store/`)
//! - `TIFO_TELEGRAM_USER_ID` - Telegram user ID attached to every request
//!
//! ## Optional
//! - `TIFO_INIT_DATA` - Raw Mini App init data forwarded for host-side verification
//! - `TIFO_PAGE_LIMIT` - Product fetch limit (default: 300, clamped to 1..=500)
//! - `TIFO_SEARCH_DEBOUNCE_MS` - Search debounce interval (default: 450)

use std::time::Duration;

use secrecy::SecretString;
use thiserror::Error;
use tifo_core::TelegramUserId;
use url::Url;

/// Default product fetch limit, mirroring the backend default.
pub const DEFAULT_PAGE_LIMIT: u32 = 300;
/// Hard cap the backend clamps `limit` to; the client clamps too so the
/// request and the response agree.
pub const MAX_PAGE_LIMIT: u32 = 500;
/// Default debounce applied to non-empty search input.
pub const DEFAULT_SEARCH_DEBOUNCE_MS: u64 = 450;

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Storefront engine configuration.
///
/// Implements `Debug` manually to redact the init-data secret.
#[derive(Clone)]
pub struct StorefrontConfig {
    /// Base URL of the store backend.
    pub api_base: Url,
    /// Telegram user ID supplied by the platform host.
    pub telegram_user_id: TelegramUserId,
    /// Raw Mini App init data, forwarded when present.
    pub init_data: Option<SecretString>,
    /// Product fetch limit attached to every catalog request.
    pub page_limit: u32,
    /// Debounce interval for non-empty search input.
    pub search_debounce: Duration,
}

impl std::fmt::Debug for StorefrontConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("StorefrontConfig")
            .field("api_base", &self.api_base.as_str())
            .field("telegram_user_id", &self.telegram_user_id)
            .field("init_data", &self.init_data.as_ref().map(|_| "[REDACTED]"))
            .field("page_limit", &self.page_limit)
            .field("search_debounce", &self.search_debounce)
            .finish()
    }
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if required variables are missing or invalid.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let api_base = get_required_env("TIFO_API_BASE")?
            .parse::<Url>()
            .map_err(|e| ConfigError::InvalidEnvVar("TIFO_API_BASE".to_string(), e.to_string()))?;

        let telegram_user_id = get_required_env("TIFO_TELEGRAM_USER_ID")?
            .parse::<i64>()
            .map(TelegramUserId::new)
            .map_err(|e| {
                ConfigError::InvalidEnvVar("TIFO_TELEGRAM_USER_ID".to_string(), e.to_string())
            })?;

        let init_data = get_optional_env("TIFO_INIT_DATA").map(SecretString::from);

        let page_limit = match get_optional_env("TIFO_PAGE_LIMIT") {
            Some(raw) => raw.parse::<u32>().map(clamp_page_limit).map_err(|e| {
                ConfigError::InvalidEnvVar("TIFO_PAGE_LIMIT".to_string(), e.to_string())
            })?,
            None => DEFAULT_PAGE_LIMIT,
        };

        let search_debounce = match get_optional_env("TIFO_SEARCH_DEBOUNCE_MS") {
            Some(raw) => raw.parse::<u64>().map(Duration::from_millis).map_err(|e| {
                ConfigError::InvalidEnvVar("TIFO_SEARCH_DEBOUNCE_MS".to_string(), e.to_string())
            })?,
            None => Duration::from_millis(DEFAULT_SEARCH_DEBOUNCE_MS),
        };

        Ok(Self {
            api_base,
            telegram_user_id,
            init_data,
            page_limit,
            search_debounce,
        })
    }
}

/// Clamp a product fetch limit to the backend's accepted range.
#[must_use]
pub const fn clamp_page_limit(limit: u32) -> u32 {
    if limit < 1 {
        1
    } else if limit > MAX_PAGE_LIMIT {
        MAX_PAGE_LIMIT
    } else {
        limit
    }
}

/// Get a required environment variable.
fn get_required_env(key: &str) -> Result<String, ConfigError> {
    std::env::var(key).map_err(|_| ConfigError::MissingEnvVar(key.to_string()))
}

/// Get an optional environment variable.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}
