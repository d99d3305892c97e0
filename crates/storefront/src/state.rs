//! Application state shared across UI consumers.
//!
//! The original app kept cart/favorites in a module-level global store;
//! here the same single-source-of-truth lives in an explicitly
//! constructed container handed to whoever drives the engine, with its
//! lifecycle tied to application start/stop.

use std::sync::Arc;

use crate::api::ApiClient;
use crate::catalog::ProductFeed;
use crate::config::StorefrontConfig;
use crate::store::Store;

/// Application state shared across all consumers.
///
/// Cheaply cloneable via `Arc`; every accessor hands out a reference to
/// the single shared instance.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: StorefrontConfig,
    api: ApiClient,
    store: Store<ApiClient>,
    feed: ProductFeed<ApiClient>,
}

impl AppState {
    /// Create the application state from configuration.
    #[must_use]
    pub fn new(config: StorefrontConfig) -> Self {
        let api = ApiClient::new(&config);
        let store = Store::new(api.clone());
        let feed = ProductFeed::from_config(api.clone(), &config);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                api,
                store,
                feed,
            }),
        }
    }

    /// Get a reference to the configuration.
    #[must_use]
    pub fn config(&self) -> &StorefrontConfig {
        &self.inner.config
    }

    /// Get a reference to the backend API client.
    #[must_use]
    pub fn api(&self) -> &ApiClient {
        &self.inner.api
    }

    /// Get a reference to the cart/favorites store.
    #[must_use]
    pub fn store(&self) -> &Store<ApiClient> {
        &self.inner.store
    }

    /// Get a reference to the product feed.
    #[must_use]
    pub fn feed(&self) -> &ProductFeed<ApiClient> {
        &self.inner.feed
    }
}
