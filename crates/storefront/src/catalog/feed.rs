//! Product query pipeline.
//!
//! Translates search/category intent into a single authoritative product
//! list. Three mechanisms keep it race-free on one shared slot:
//!
//! - a monotonically increasing request sequence; a response only commits
//!   if its captured sequence is still the latest, so out-of-order network
//!   completions can never resurrect a superseded result;
//! - a single cancellation token, replaced (and the old one signalled) on
//!   every submission, aborting the previous request in whatever stage it
//!   is in;
//! - a debounce on non-empty search input. Clearing the search fires
//!   immediately so emptying the box feels instant.
//!
//! Cancellation is silent: an aborted request leaves the current list
//! untouched and logs nothing above debug. A failed (non-cancelled) fetch
//! clears the list to empty; there is no automatic retry.

use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use tokio::task::JoinHandle;
use tracing::{debug, error};

use crate::api::types::{Product, ProductQuery};
use crate::api::{ApiError, ProductSource};
use crate::catalog::cancel::{CancelHandle, CancelToken, cancel_pair};
use crate::config::StorefrontConfig;
use crate::sync::lock;

/// Race-safe product list fed by search and category intent.
pub struct ProductFeed<S> {
    inner: Arc<FeedInner<S>>,
}

impl<S> Clone for ProductFeed<S> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct FeedInner<S> {
    source: S,
    limit: u32,
    debounce: Duration,
    /// Monotonically increasing request sequence. The latest value is the
    /// only one allowed to commit.
    seq: AtomicU64,
    /// Abort handle for the in-flight request, replaced on every submit.
    cancel: Mutex<Option<CancelHandle>>,
    /// The committed product list.
    products: Mutex<Vec<Product>>,
}

impl<S> ProductFeed<S>
where
    S: ProductSource + 'static,
{
    /// Create a feed over a product source.
    #[must_use]
    pub fn new(source: S, limit: u32, debounce: Duration) -> Self {
        Self {
            inner: Arc::new(FeedInner {
                source,
                limit,
                debounce,
                seq: AtomicU64::new(0),
                cancel: Mutex::new(None),
                products: Mutex::new(Vec::new()),
            }),
        }
    }

    /// Create a feed using the configured limit and debounce interval.
    #[must_use]
    pub fn from_config(source: S, config: &StorefrontConfig) -> Self {
        Self::new(source, config.page_limit, config.search_debounce)
    }

    /// Submit new search/category intent.
    ///
    /// Supersedes any in-flight request immediately, then issues the fetch
    /// on a background task (debounced when the trimmed search is
    /// non-empty). The returned handle resolves when the request settles
    /// or is cancelled; callers driving a UI can drop it.
    pub fn submit(&self, search: &str, category_slug: Option<&str>) -> JoinHandle<()> {
        let seq = self.inner.seq.fetch_add(1, Ordering::SeqCst) + 1;

        let (handle, token) = cancel_pair();
        if let Some(previous) = lock(&self.inner.cancel).replace(handle) {
            previous.cancel();
        }

        let inner = Arc::clone(&self.inner);
        let search = search.trim().to_string();
        let category_slug = category_slug.map(str::to_string);
        tokio::spawn(inner.run(seq, search, category_slug, token))
    }

    /// Snapshot of the committed product list.
    #[must_use]
    pub fn products(&self) -> Vec<Product> {
        lock(&self.inner.products).clone()
    }
}

impl<S> FeedInner<S>
where
    S: ProductSource + 'static,
{
    async fn run(
        self: Arc<Self>,
        seq: u64,
        search: String,
        category_slug: Option<String>,
        token: CancelToken,
    ) {
        // Debounce only while the user is actually typing something
        if !search.is_empty() {
            tokio::select! {
                () = token.clone().cancelled() => {
                    debug!(seq, "superseded during debounce");
                    return;
                }
                () = tokio::time::sleep(self.debounce) => {}
            }
        }

        let query = ProductQuery {
            search: (!search.is_empty()).then_some(search),
            category_slug,
            limit: self.limit,
        };

        let result = tokio::select! {
            () = token.clone().cancelled() => {
                debug!(seq, "superseded in flight");
                return;
            }
            result = self.source.list_products(&query) => result,
        };

        self.commit(seq, result);
    }

    /// Commit a settled response, unless a newer request superseded it.
    fn commit(&self, seq: u64, result: Result<Vec<Product>, ApiError>) {
        let mut products = lock(&self.products);
        if self.seq.load(Ordering::SeqCst) != seq {
            debug!(seq, "discarding stale response");
            return;
        }
        match result {
            Ok(fetched) => *products = fetched,
            Err(e) => {
                error!(error = %e, seq, "product query failed");
                products.clear();
            }
        }
    }
}
