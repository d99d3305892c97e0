//! Domain types for the store backend API.
//!
//! Field names and shapes mirror the backend's JSON exactly; these types
//! are the only decode layer between the wire and the rest of the engine.

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};
use tifo_core::{
    CartItemId, CategoryId, FavoriteId, OrderId, OrderItemId, OrderStatus, Price, ProductId,
};

// =============================================================================
// Catalog Types
// =============================================================================

/// A product category ("jerseys", "posters", ...).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Category ID.
    pub id: CategoryId,
    /// Display name.
    pub name: String,
    /// URL slug, used as the server-side catalog filter.
    pub slug: String,
}

/// A product in the store.
///
/// Immutable from the client's perspective - instances are only ever
/// replaced wholesale by a refetch, never patched in place.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    /// Product ID.
    pub id: ProductId,
    /// Display name.
    pub name: String,
    /// Plain text description.
    #[serde(default)]
    pub description: Option<String>,
    /// Unit price.
    pub price: Price,
    /// Link to the shop's Telegram channel post for this product.
    #[serde(default)]
    pub tg_post_url: Option<String>,
    /// Team/club the kit belongs to.
    #[serde(default)]
    pub team: Option<String>,
    /// Free-text size label ("M", " xl ", ...).
    #[serde(default)]
    pub size: Option<String>,
    /// Manufacturer brand.
    #[serde(default)]
    pub brand: Option<String>,
    /// League the team plays in.
    #[serde(default)]
    pub league: Option<String>,
    /// Season label (e.g., "2023/24").
    #[serde(default)]
    pub season: Option<String>,
    /// Kit type (home, away, third, ...).
    #[serde(default)]
    pub kit_type: Option<String>,
    /// Primary image reference.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Owning category id.
    #[serde(default)]
    pub category_id: Option<CategoryId>,
    /// Embedded category, when the backend expands it.
    #[serde(default)]
    pub category: Option<Category>,
    /// Ordered gallery of additional image references.
    #[serde(default)]
    pub gallery: Vec<String>,
}

impl Product {
    /// Slug of the owning category, when known.
    #[must_use]
    pub fn category_slug(&self) -> Option<&str> {
        self.category.as_ref().map(|c| c.slug.as_str())
    }
}

/// Query parameters for a product list fetch.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProductQuery {
    /// Free-text search, already trimmed; `None` when empty.
    pub search: Option<String>,
    /// Server-side category filter.
    pub category_slug: Option<String>,
    /// Result-count cap, always attached.
    pub limit: u32,
}

impl ProductQuery {
    /// A query with no search and no category filter.
    #[must_use]
    pub const fn new(limit: u32) -> Self {
        Self {
            search: None,
            category_slug: None,
            limit,
        }
    }
}

// =============================================================================
// Cart & Favorites Types
// =============================================================================

/// A line in the user's cart.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CartItem {
    /// Server-assigned cart item ID.
    pub id: CartItemId,
    /// Read-only product snapshot.
    pub product: Product,
    /// Quantity (collapsed to 1 client-side after dedup).
    pub quantity: u32,
}

/// Request body for creating a cart item.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct CartItemCreate {
    /// Product to add.
    pub product_id: ProductId,
    /// Requested quantity (the backend stores 1 regardless).
    pub quantity: u32,
}

impl CartItemCreate {
    /// A single-unit create request.
    #[must_use]
    pub const fn new(product_id: ProductId) -> Self {
        Self {
            product_id,
            quantity: 1,
        }
    }
}

/// A favorited product.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Favorite {
    /// Server-assigned favorite ID.
    pub id: FavoriteId,
    /// Read-only product snapshot.
    pub product: Product,
}

/// Request body for creating a favorite.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct FavoriteCreate {
    /// Product to favorite.
    pub product_id: ProductId,
}

// =============================================================================
// Order Types
// =============================================================================

/// A line item snapshot inside an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OrderItem {
    /// Order item ID.
    pub id: OrderItemId,
    /// Product reference; `None` if the product was deleted since.
    #[serde(default)]
    pub product_id: Option<ProductId>,
    /// Product name at order time.
    pub product_name: String,
    /// Unit price at order time.
    pub price: Price,
    /// Quantity ordered.
    pub quantity: u32,
}

/// An order created from a cart at checkout.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    /// Order ID.
    pub id: OrderId,
    /// Creation timestamp (naive UTC, as the backend emits it).
    pub created_at: NaiveDateTime,
    /// Total across all line items.
    pub total_price: Price,
    /// Lifecycle status.
    #[serde(default)]
    pub status: OrderStatus,
    /// Line item snapshots.
    pub items: Vec<OrderItem>,
}

/// Request body for the order status write path.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OrderStatusUpdate {
    /// New status.
    pub status: OrderStatus,
}

/// Creation-date bounds for the order timeline, ISO 8601.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OrderDateRange {
    /// Inclusive lower bound.
    pub start_date: Option<String>,
    /// Inclusive upper bound.
    pub end_date: Option<String>,
}
