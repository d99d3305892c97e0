//! CLI subcommand implementations.

pub mod browse;
pub mod cart;
pub mod favorites;
pub mod orders;

use thiserror::Error;

use tifo_storefront::api::ApiError;
use tifo_storefront::config::ConfigError;

/// Errors surfaced to the terminal.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration could not be loaded.
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    /// A backend call failed.
    #[error("API error: {0}")]
    Api(#[from] ApiError),

    /// An engine operation reported failure (already logged in detail).
    #[error("{0}")]
    OperationFailed(String),
}
