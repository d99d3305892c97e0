//! Store backend API client.
//!
//! # Architecture
//!
//! - The backend is source of truth - NO local persistence, direct API calls
//! - Identity rides on every request as the `X-Telegram-User-Id` header
//!   (plus `X-Telegram-Init-Data` when configured)
//! - In-memory caching via `moka` for read-mostly catalog data (5 minute
//!   TTL); cart and favorites are never cached
//!
//! The [`ProductSource`] and [`StoreBackend`] traits are the seams the
//! query pipeline and the cart/favorites store consume, so both can be
//! exercised against in-process fakes. [`ApiClient`] implements both over
//! HTTP.
//!
//! # Example
//!
//! ```rust,ignore
//! use tifo_storefront::api::ApiClient;
//!
//! let client = ApiClient::new(&config);
//!
//! // Browse the catalog
//! let products = client.list_products(&ProductQuery::new(300)).await?;
//!
//! // Mutate the cart
//! let item = client
//!     .add_cart_item(&CartItemCreate::new(products[0].id))
//!     .await?;
//! ```

mod cache;
mod client;
pub mod types;

pub use client::ApiClient;
pub use types::*;

use std::future::Future;

use thiserror::Error;
use tifo_core::{CartItemId, OrderId, ProductId};

/// Errors that can occur when talking to the store backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connection refused, timeout, TLS, ...).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// Identity was rejected by the backend.
    #[error("unauthorized (HTTP {0})")]
    Unauthorized(u16),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Backend returned an unexpected status code.
    #[error("unexpected status {status} from {path}")]
    Status {
        /// HTTP status code.
        status: u16,
        /// Request path, for diagnostics.
        path: String,
    },

    /// JSON decoding failed.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),

    /// Request URL could not be built from the configured base.
    #[error("invalid request URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

/// Read access to the product catalog.
///
/// Split from [`StoreBackend`] so the query pipeline depends only on the
/// single operation it issues.
pub trait ProductSource: Send + Sync {
    /// List products matching `query`. The fetch limit is always attached.
    fn list_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send;
}

/// Remote operations the cart/favorites store performs.
pub trait StoreBackend: Send + Sync {
    /// Read the user's cart collection.
    fn fetch_cart(&self) -> impl Future<Output = Result<Vec<CartItem>, ApiError>> + Send;

    /// Create a cart item.
    fn add_cart_item(
        &self,
        item: &CartItemCreate,
    ) -> impl Future<Output = Result<CartItem, ApiError>> + Send;

    /// Delete a cart item by its server-assigned id (not product id).
    fn remove_cart_item(
        &self,
        item_id: CartItemId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Read the user's favorites collection.
    fn fetch_favorites(&self) -> impl Future<Output = Result<Vec<Favorite>, ApiError>> + Send;

    /// Create a favorite.
    fn add_favorite(
        &self,
        favorite: &FavoriteCreate,
    ) -> impl Future<Output = Result<Favorite, ApiError>> + Send;

    /// Delete a favorite by product id.
    fn remove_favorite(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send;

    /// Create an order from the server-side cart (checkout hand-off).
    fn create_order(&self) -> impl Future<Output = Result<Order, ApiError>> + Send;
}

/// Read/write access to the order timeline (admin console surface).
pub trait OrderTimeline: Send + Sync {
    /// List orders, newest first, optionally bounded by creation date.
    fn list_orders(
        &self,
        range: &OrderDateRange,
    ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send;

    /// Set an order's status.
    fn update_order_status(
        &self,
        order_id: OrderId,
        update: &OrderStatusUpdate,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send;
}
