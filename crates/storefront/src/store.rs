//! Cart/favorites store.
//!
//! Single source of truth for the user's cart and favorites. Collections
//! are authoritative-from-server: every mutation is followed by a
//! reconciliation refetch, and a fetch replaces the local collection
//! wholesale (last response wins, no merging).
//!
//! Additions are optimistic: the product id enters a pending set
//! synchronously before the network call, so concurrent adds for the same
//! product are rejected immediately and the UI can show "in cart" before
//! the server confirms. The pending entry is removed unconditionally when
//! the call settles, success or failure. Removal and favorite toggling
//! are pessimistic - no pending set, no optimistic local change; a rapid
//! double-toggle of a favorite is a known race the backend tolerates.
//!
//! Remote failures never escape as errors: operations log and report
//! success/failure as a boolean (or `Option` for checkout), leaving prior
//! state intact.

use std::collections::HashSet;
use std::sync::{Arc, Mutex};

use tracing::{debug, warn};

use tifo_core::{CartItemId, Price, ProductId};

use crate::api::types::{CartItem, CartItemCreate, Favorite, FavoriteCreate, Order};
use crate::api::StoreBackend;
use crate::sync::lock;

/// Cart/favorites store over a remote backend.
pub struct Store<B> {
    inner: Arc<StoreInner<B>>,
}

impl<B> Clone for Store<B> {
    fn clone(&self) -> Self {
        Self {
            inner: Arc::clone(&self.inner),
        }
    }
}

struct StoreInner<B> {
    backend: B,
    state: Mutex<StoreState>,
}

#[derive(Default)]
struct StoreState {
    cart: Vec<CartItem>,
    favorites: Vec<Favorite>,
    /// Product ids with an add-to-cart request in flight.
    pending_cart: HashSet<ProductId>,
}

impl<B: StoreBackend> Store<B> {
    /// Create an empty store over a backend.
    #[must_use]
    pub fn new(backend: B) -> Self {
        Self {
            inner: Arc::new(StoreInner {
                backend,
                state: Mutex::new(StoreState::default()),
            }),
        }
    }

    // =========================================================================
    // Snapshots
    // =========================================================================

    /// Snapshot of the cart collection.
    #[must_use]
    pub fn cart(&self) -> Vec<CartItem> {
        lock(&self.inner.state).cart.clone()
    }

    /// Snapshot of the favorites collection.
    #[must_use]
    pub fn favorites(&self) -> Vec<Favorite> {
        lock(&self.inner.state).favorites.clone()
    }

    /// Whether a product reads as "in cart": a confirmed member or an add
    /// still in flight (the optimistic display state).
    #[must_use]
    pub fn is_in_cart(&self, product_id: ProductId) -> bool {
        let state = lock(&self.inner.state);
        state.pending_cart.contains(&product_id)
            || state.cart.iter().any(|item| item.product.id == product_id)
    }

    /// Whether a product is favorited.
    #[must_use]
    pub fn is_favorite(&self, product_id: ProductId) -> bool {
        lock(&self.inner.state)
            .favorites
            .iter()
            .any(|favorite| favorite.product.id == product_id)
    }

    /// Sum of unit price x quantity over the cart (checkout summary).
    #[must_use]
    pub fn cart_total(&self) -> Price {
        lock(&self.inner.state)
            .cart
            .iter()
            .fold(Price::ZERO, |total, item| {
                total.plus(item.product.price.times(item.quantity))
            })
    }

    // =========================================================================
    // Reads
    // =========================================================================

    /// Refetch the cart and replace the local collection.
    ///
    /// The server response is deduplicated by product id (first occurrence
    /// wins) and quantities are collapsed to 1, matching the backend's
    /// presence-not-quantity cart semantics. On failure the previous
    /// collection is left untouched.
    pub async fn refresh_cart(&self) -> bool {
        match self.inner.backend.fetch_cart().await {
            Ok(items) => {
                lock(&self.inner.state).cart = dedupe_cart(items);
                true
            }
            Err(e) => {
                warn!(error = %e, "cart refresh failed");
                false
            }
        }
    }

    /// Refetch favorites and replace the local collection. The server is
    /// trusted not to contain duplicates.
    pub async fn refresh_favorites(&self) -> bool {
        match self.inner.backend.fetch_favorites().await {
            Ok(favorites) => {
                lock(&self.inner.state).favorites = favorites;
                true
            }
            Err(e) => {
                warn!(error = %e, "favorites refresh failed");
                false
            }
        }
    }

    // =========================================================================
    // Mutations
    // =========================================================================

    /// Add a product to the cart.
    ///
    /// Returns `false` without touching the network when the product is
    /// already a member or an add is already in flight. Otherwise the
    /// product id enters the pending set before the call is issued, which
    /// is what makes concurrent duplicate adds impossible from this
    /// client; the entry is removed once the call settles either way.
    pub async fn add_to_cart(&self, product_id: ProductId) -> bool {
        {
            let mut state = lock(&self.inner.state);
            let already_member = state.cart.iter().any(|item| item.product.id == product_id);
            if already_member || state.pending_cart.contains(&product_id) {
                debug!(%product_id, "add skipped: already in cart or in flight");
                return false;
            }
            state.pending_cart.insert(product_id);
        }

        let added = match self
            .inner
            .backend
            .add_cart_item(&CartItemCreate::new(product_id))
            .await
        {
            Ok(_) => {
                self.refresh_cart().await;
                true
            }
            Err(e) => {
                warn!(error = %e, %product_id, "add to cart failed");
                false
            }
        };

        lock(&self.inner.state).pending_cart.remove(&product_id);
        added
    }

    /// Remove a cart item by its server-assigned id, then reconcile.
    ///
    /// Pessimistic by design: nothing changes locally until the server
    /// confirms, unlike the optimistic add path.
    pub async fn remove_from_cart(&self, item_id: CartItemId) -> bool {
        match self.inner.backend.remove_cart_item(item_id).await {
            Ok(()) => {
                self.refresh_cart().await;
                true
            }
            Err(e) => {
                warn!(error = %e, %item_id, "remove from cart failed");
                false
            }
        }
    }

    /// Toggle a product's favorite status, then reconcile.
    ///
    /// The direction is decided by a presence lookup at call time; there
    /// is no pending guard on this path.
    pub async fn toggle_favorite(&self, product_id: ProductId) -> bool {
        let favorited = self.is_favorite(product_id);

        let result = if favorited {
            self.inner.backend.remove_favorite(product_id).await
        } else {
            self.inner
                .backend
                .add_favorite(&FavoriteCreate { product_id })
                .await
                .map(|_| ())
        };

        match result {
            Ok(()) => {
                self.refresh_favorites().await;
                true
            }
            Err(e) => {
                warn!(error = %e, %product_id, favorited, "favorite toggle failed");
                false
            }
        }
    }

    /// Create an order from the server-side cart, then reconcile (the
    /// server drains the cart on success).
    pub async fn checkout(&self) -> Option<Order> {
        match self.inner.backend.create_order().await {
            Ok(order) => {
                self.refresh_cart().await;
                Some(order)
            }
            Err(e) => {
                warn!(error = %e, "checkout failed");
                None
            }
        }
    }
}

/// Dedup a server cart by product id, first occurrence wins, quantity
/// collapsed to 1.
fn dedupe_cart(items: Vec<CartItem>) -> Vec<CartItem> {
    let mut seen = HashSet::new();
    items
        .into_iter()
        .filter(|item| seen.insert(item.product.id))
        .map(|mut item| {
            item.quantity = 1;
            item
        })
        .collect()
}
