//! HTTP implementation of the store backend API.
//!
//! Thin `reqwest` wrapper: attaches identity headers, maps status codes to
//! [`ApiError`], normalizes media URLs on everything that embeds a product,
//! and caches read-mostly catalog data with `moka` (5-minute TTL).

use std::sync::Arc;
use std::time::Duration;

use moka::future::Cache;
use reqwest::{Method, StatusCode};
use secrecy::{ExposeSecret, SecretString};
use serde::Serialize;
use serde::de::DeserializeOwned;
use tracing::{debug, instrument};
use url::Url;

use tifo_core::{CartItemId, OrderId, ProductId, TelegramUserId};

use crate::api::cache::CacheValue;
use crate::api::types::{
    CartItem, CartItemCreate, Category, Favorite, FavoriteCreate, Order, OrderDateRange,
    OrderStatusUpdate, Product, ProductQuery,
};
use crate::api::{ApiError, OrderTimeline, ProductSource, StoreBackend};
use crate::catalog::envelope::decode_product_list;
use crate::config::{StorefrontConfig, clamp_page_limit};
use crate::media::MediaResolver;

/// Header carrying the platform-host user identifier.
pub const USER_ID_HEADER: &str = "X-Telegram-User-Id";
/// Header carrying the raw Mini App init data, when configured.
pub const INIT_DATA_HEADER: &str = "X-Telegram-Init-Data";

// =============================================================================
// ApiClient
// =============================================================================

/// Client for the store backend REST API.
///
/// Cheaply cloneable via `Arc`; one instance is shared by the store, the
/// query pipeline, and the CLI.
#[derive(Clone)]
pub struct ApiClient {
    inner: Arc<ApiClientInner>,
}

struct ApiClientInner {
    http: reqwest::Client,
    base: Url,
    user_id: TelegramUserId,
    init_data: Option<SecretString>,
    media: MediaResolver,
    cache: Cache<String, CacheValue>,
}

impl ApiClient {
    /// Create a new backend API client.
    #[must_use]
    pub fn new(config: &StorefrontConfig) -> Self {
        let cache = Cache::builder()
            .max_capacity(1000)
            .time_to_live(Duration::from_secs(300)) // 5 minutes
            .build();

        let mut base = config.api_base.clone();
        // Relative joins below require a trailing slash on the base path
        if !base.path().ends_with('/') {
            let path = format!("{}/", base.path());
            base.set_path(&path);
        }

        let media = MediaResolver::new(base.clone());

        Self {
            inner: Arc::new(ApiClientInner {
                http: reqwest::Client::new(),
                base,
                user_id: config.telegram_user_id,
                init_data: config.init_data.clone(),
                media,
                cache,
            }),
        }
    }

    /// The media resolver bound to this backend's base URL.
    #[must_use]
    pub fn media(&self) -> &MediaResolver {
        &self.inner.media
    }

    /// Build a request with identity headers attached.
    fn request(&self, method: Method, path: &str) -> Result<reqwest::RequestBuilder, ApiError> {
        let url = self.inner.base.join(path)?;
        let mut builder = self
            .inner
            .http
            .request(method, url)
            .header(USER_ID_HEADER, self.inner.user_id.to_string());
        if let Some(init_data) = &self.inner.init_data {
            builder = builder.header(INIT_DATA_HEADER, init_data.expose_secret());
        }
        Ok(builder)
    }

    /// Map status codes to the error taxonomy; pass successes through.
    fn check(response: reqwest::Response) -> Result<reqwest::Response, ApiError> {
        let status = response.status();
        if status == StatusCode::UNAUTHORIZED || status == StatusCode::FORBIDDEN {
            return Err(ApiError::Unauthorized(status.as_u16()));
        }
        if status == StatusCode::NOT_FOUND {
            return Err(ApiError::NotFound(response.url().path().to_string()));
        }
        if !status.is_success() {
            return Err(ApiError::Status {
                status: status.as_u16(),
                path: response.url().path().to_string(),
            });
        }
        Ok(response)
    }

    /// GET `path` and decode the JSON body.
    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let response = self.request(Method::GET, path)?.send().await?;
        Ok(Self::check(response)?.json::<T>().await?)
    }

    /// POST `body` to `path` and decode the JSON response.
    async fn post_json<B: Serialize + Sync, T: DeserializeOwned>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let response = self.request(Method::POST, path)?.json(body).send().await?;
        Ok(Self::check(response)?.json::<T>().await?)
    }

    /// DELETE `path`, discarding the `{"status": "deleted"}` body.
    async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let response = self.request(Method::DELETE, path)?.send().await?;
        Self::check(response)?;
        Ok(())
    }

    // =========================================================================
    // Catalog Methods
    // =========================================================================

    /// List the store's categories.
    ///
    /// # Errors
    ///
    /// Returns an error if the API request fails.
    #[instrument(skip(self))]
    pub async fn list_categories(&self) -> Result<Vec<Category>, ApiError> {
        let cache_key = "categories".to_string();

        if let Some(CacheValue::Categories(categories)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for categories");
            return Ok(categories);
        }

        let categories: Vec<Category> = self.get_json("categories/").await?;

        self.inner
            .cache
            .insert(cache_key, CacheValue::Categories(categories.clone()))
            .await;

        Ok(categories)
    }

    /// Get a single product by id.
    ///
    /// # Errors
    ///
    /// Returns an error if the product is not found or the request fails.
    #[instrument(skip(self), fields(product_id = %product_id))]
    pub async fn get_product(&self, product_id: ProductId) -> Result<Product, ApiError> {
        let cache_key = format!("product:{product_id}");

        if let Some(CacheValue::Product(product)) = self.inner.cache.get(&cache_key).await {
            debug!("Cache hit for product");
            return Ok(*product);
        }

        let mut product: Product = self.get_json(&format!("products/{product_id}")).await?;
        self.inner.media.normalize_product(&mut product);

        self.inner
            .cache
            .insert(cache_key, CacheValue::Product(Box::new(product.clone())))
            .await;

        Ok(product)
    }

    // =========================================================================
    // Cache Management
    // =========================================================================

    /// Invalidate a cached product.
    pub async fn invalidate_product(&self, product_id: ProductId) {
        self.inner
            .cache
            .invalidate(&format!("product:{product_id}"))
            .await;
    }

    /// Invalidate all cached data.
    pub async fn invalidate_all(&self) {
        self.inner.cache.invalidate_all();
        self.inner.cache.run_pending_tasks().await;
    }
}

// =============================================================================
// Trait Implementations
// =============================================================================

impl ProductSource for ApiClient {
    /// List products. Never cached: the query pipeline owns list state and
    /// its race guarantees assume every submission reaches the backend.
    fn list_products(
        &self,
        query: &ProductQuery,
    ) -> impl Future<Output = Result<Vec<Product>, ApiError>> + Send {
        async move {
            let mut params: Vec<(&str, String)> =
                vec![("limit", clamp_page_limit(query.limit).to_string())];
            if let Some(search) = query.search.as_deref().filter(|s| !s.is_empty()) {
                params.push(("search", search.to_string()));
            }
            if let Some(slug) = query.category_slug.as_deref() {
                params.push(("category_slug", slug.to_string()));
            }

            let response = self
                .request(Method::GET, "products/")?
                .query(&params)
                .send()
                .await?;
            let payload: serde_json::Value = Self::check(response)?.json().await?;

            let mut products = decode_product_list(payload);
            for product in &mut products {
                self.inner.media.normalize_product(product);
            }
            Ok(products)
        }
    }
}

impl StoreBackend for ApiClient {
    fn fetch_cart(&self) -> impl Future<Output = Result<Vec<CartItem>, ApiError>> + Send {
        async move {
            let mut items: Vec<CartItem> = self.get_json("cart/").await?;
            for item in &mut items {
                self.inner.media.normalize_product(&mut item.product);
            }
            Ok(items)
        }
    }

    fn add_cart_item(
        &self,
        item: &CartItemCreate,
    ) -> impl Future<Output = Result<CartItem, ApiError>> + Send {
        async move {
            let mut created: CartItem = self.post_json("cart/", item).await?;
            self.inner.media.normalize_product(&mut created.product);
            Ok(created)
        }
    }

    fn remove_cart_item(
        &self,
        item_id: CartItemId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move { self.delete(&format!("cart/{item_id}")).await }
    }

    fn fetch_favorites(&self) -> impl Future<Output = Result<Vec<Favorite>, ApiError>> + Send {
        async move {
            let mut favorites: Vec<Favorite> = self.get_json("favorites/").await?;
            for favorite in &mut favorites {
                self.inner.media.normalize_product(&mut favorite.product);
            }
            Ok(favorites)
        }
    }

    fn add_favorite(
        &self,
        favorite: &FavoriteCreate,
    ) -> impl Future<Output = Result<Favorite, ApiError>> + Send {
        async move {
            let mut created: Favorite = self.post_json("favorites/", favorite).await?;
            self.inner.media.normalize_product(&mut created.product);
            Ok(created)
        }
    }

    fn remove_favorite(
        &self,
        product_id: ProductId,
    ) -> impl Future<Output = Result<(), ApiError>> + Send {
        async move { self.delete(&format!("favorites/{product_id}")).await }
    }

    fn create_order(&self) -> impl Future<Output = Result<Order, ApiError>> + Send {
        async move {
            let response = self.request(Method::POST, "orders/")?.send().await?;
            Ok(Self::check(response)?.json::<Order>().await?)
        }
    }
}

impl OrderTimeline for ApiClient {
    fn list_orders(
        &self,
        range: &OrderDateRange,
    ) -> impl Future<Output = Result<Vec<Order>, ApiError>> + Send {
        async move {
            let mut params: Vec<(&str, String)> = Vec::new();
            if let Some(start) = range.start_date.as_deref() {
                params.push(("start_date", start.to_string()));
            }
            if let Some(end) = range.end_date.as_deref() {
                params.push(("end_date", end.to_string()));
            }

            let response = self
                .request(Method::GET, "orders/")?
                .query(&params)
                .send()
                .await?;
            Ok(Self::check(response)?.json::<Vec<Order>>().await?)
        }
    }

    fn update_order_status(
        &self,
        order_id: OrderId,
        update: &OrderStatusUpdate,
    ) -> impl Future<Output = Result<Order, ApiError>> + Send {
        async move {
            let response = self
                .request(Method::PATCH, &format!("orders/{order_id}"))?
                .json(update)
                .send()
                .await?;
            Ok(Self::check(response)?.json::<Order>().await?)
        }
    }
}
