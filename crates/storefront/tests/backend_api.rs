//! Integration tests: the real `ApiClient` against an in-process mock
//! backend speaking the store's REST dialect over loopback HTTP.

#![allow(clippy::unwrap_used)]

use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::atomic::{AtomicI64, AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::routing::{delete, get, patch};
use axum::{Json, Router};
use serde_json::{Value, json};

use tifo_core::{CartItemId, OrderId, ProductId, TelegramUserId};
use tifo_storefront::api::types::{
    CartItemCreate, FavoriteCreate, OrderDateRange, OrderStatusUpdate, ProductQuery,
};
use tifo_storefront::api::{ApiClient, ApiError, OrderTimeline, ProductSource, StoreBackend};
use tifo_storefront::config::StorefrontConfig;
use tifo_storefront::store::Store;

const KNOWN_USER: &str = "12345";

// =============================================================================
// Mock backend
// =============================================================================

#[derive(Default)]
struct MockState {
    cart: Mutex<Vec<Value>>,
    favorites: Mutex<Vec<Value>>,
    orders: Mutex<Vec<Value>>,
    next_id: AtomicI64,
    category_hits: AtomicUsize,
    cart_posts: Mutex<Vec<Value>>,
    products_queries: Mutex<Vec<HashMap<String, String>>>,
    orders_queries: Mutex<Vec<HashMap<String, String>>>,
    seen_init_data: Mutex<Option<String>>,
}

impl MockState {
    fn alloc_id(&self) -> i64 {
        self.next_id.fetch_add(1, Ordering::SeqCst) + 1
    }
}

fn product_json(id: i64, name: &str, price: f64) -> Value {
    json!({
        "id": id,
        "name": name,
        "price": price,
        "team": "Arsenal",
        "size": "M",
        "brand": "adidas",
        "league": "Premier League",
        "image_url": "static/front.jpg",
        "gallery": ["static/back.jpg"],
        "category": {"id": 1, "name": "Jerseys", "slug": "jerseys"},
    })
}

fn auth(headers: &HeaderMap) -> Result<(), StatusCode> {
    let user = headers
        .get("x-telegram-user-id")
        .and_then(|v| v.to_str().ok());
    if user == Some(KNOWN_USER) {
        Ok(())
    } else {
        Err(StatusCode::UNAUTHORIZED)
    }
}

fn record_init_data(state: &MockState, headers: &HeaderMap) {
    if let Some(init) = headers
        .get("x-telegram-init-data")
        .and_then(|v| v.to_str().ok())
    {
        *state.seen_init_data.lock().unwrap() = Some(init.to_string());
    }
}

async fn list_categories(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    state.category_hits.fetch_add(1, Ordering::SeqCst);
    Ok(Json(json!([
        {"id": 1, "name": "Jerseys", "slug": "jerseys"},
        {"id": 2, "name": "Posters", "slug": "posters"},
    ])))
}

async fn list_products(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    record_init_data(&state, &headers);
    state.products_queries.lock().unwrap().push(params);
    // Enveloped on purpose: the client must unwrap it
    Ok(Json(json!({
        "results": [product_json(3, "Arsenal Home 2023/24", 5490.0)]
    })))
}

async fn get_cart(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    Ok(Json(Value::Array(state.cart.lock().unwrap().clone())))
}

async fn post_cart(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    state.cart_posts.lock().unwrap().push(body.clone());
    let product_id = body
        .get("product_id")
        .and_then(Value::as_i64)
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let item = json!({
        "id": state.alloc_id(),
        "product": product_json(product_id, "Arsenal Home 2023/24", 5490.0),
        "quantity": 1,
    });
    state.cart.lock().unwrap().push(item.clone());
    Ok(Json(item))
}

async fn delete_cart_item(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(item_id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    let mut cart = state.cart.lock().unwrap();
    let before = cart.len();
    cart.retain(|item| item.get("id").and_then(Value::as_i64) != Some(item_id));
    if cart.len() == before {
        return Err(StatusCode::NOT_FOUND);
    }
    Ok(Json(json!({"status": "deleted"})))
}

async fn get_favorites(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    Ok(Json(Value::Array(state.favorites.lock().unwrap().clone())))
}

async fn post_favorite(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    let product_id = body
        .get("product_id")
        .and_then(Value::as_i64)
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let favorite = json!({
        "id": state.alloc_id(),
        "product": product_json(product_id, "Arsenal Home 2023/24", 5490.0),
    });
    state.favorites.lock().unwrap().push(favorite.clone());
    Ok(Json(favorite))
}

async fn delete_favorite(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(product_id): Path<i64>,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    state.favorites.lock().unwrap().retain(|favorite| {
        favorite
            .pointer("/product/id")
            .and_then(Value::as_i64)
            != Some(product_id)
    });
    Ok(Json(json!({"status": "deleted"})))
}

async fn list_orders(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Query(params): Query<HashMap<String, String>>,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    state.orders_queries.lock().unwrap().push(params);
    Ok(Json(Value::Array(state.orders.lock().unwrap().clone())))
}

async fn post_order(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    let items: Vec<Value> = std::mem::take(&mut *state.cart.lock().unwrap());
    if items.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }
    let mut total = 0.0;
    let order_items: Vec<Value> = items
        .iter()
        .map(|item| {
            let product = item.get("product").cloned().unwrap_or_default();
            let price = product.get("price").and_then(Value::as_f64).unwrap_or(0.0);
            let quantity = item.get("quantity").and_then(Value::as_i64).unwrap_or(1);
            #[allow(clippy::cast_precision_loss)]
            {
                total += price * quantity as f64;
            }
            json!({
                "id": state.alloc_id(),
                "product_id": product.get("id"),
                "product_name": product.get("name"),
                "price": price,
                "quantity": quantity,
            })
        })
        .collect();
    let order = json!({
        "id": state.alloc_id(),
        "created_at": "2024-05-01T09:30:00",
        "total_price": total,
        "status": "received",
        "items": order_items,
    });
    state.orders.lock().unwrap().push(order.clone());
    Ok(Json(order))
}

async fn patch_order(
    State(state): State<Arc<MockState>>,
    headers: HeaderMap,
    Path(order_id): Path<i64>,
    Json(body): Json<Value>,
) -> Result<Json<Value>, StatusCode> {
    auth(&headers)?;
    let status = body
        .get("status")
        .cloned()
        .ok_or(StatusCode::UNPROCESSABLE_ENTITY)?;
    let mut orders = state.orders.lock().unwrap();
    let order = orders
        .iter_mut()
        .find(|order| order.get("id").and_then(Value::as_i64) == Some(order_id))
        .ok_or(StatusCode::NOT_FOUND)?;
    order["status"] = status;
    Ok(Json(order.clone()))
}

async fn spawn_backend(state: Arc<MockState>) -> SocketAddr {
    let app = Router::new()
        .route("/categories/", get(list_categories))
        .route("/products/", get(list_products))
        .route("/cart/", get(get_cart).post(post_cart))
        .route("/cart/{item_id}", delete(delete_cart_item))
        .route("/favorites/", get(get_favorites).post(post_favorite))
        .route("/favorites/{product_id}", delete(delete_favorite))
        .route("/orders/", get(list_orders).post(post_order))
        .route("/orders/{order_id}", patch(patch_order))
        .with_state(state);

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

fn client_for(addr: SocketAddr, user_id: i64) -> ApiClient {
    let config = StorefrontConfig {
        api_base: format!("http://{addr}/").parse().unwrap(),
        telegram_user_id: TelegramUserId::new(user_id),
        init_data: Some(secrecy::SecretString::from("query_id=test")),
        page_limit: 300,
        search_debounce: Duration::from_millis(450),
    };
    ApiClient::new(&config)
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn test_products_unwrap_envelope_and_resolve_media() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(Arc::clone(&state)).await;
    let client = client_for(addr, 12345);

    let query = ProductQuery {
        search: Some("arsenal".to_string()),
        category_slug: Some("jerseys".to_string()),
        limit: 300,
    };
    let products = client.list_products(&query).await.unwrap();

    assert_eq!(products.len(), 1);
    assert_eq!(products[0].id, ProductId::new(3));
    // Relative media was rewritten against the backend base
    assert_eq!(
        products[0].image_url.as_deref(),
        Some(format!("http://{addr}/static/front.jpg").as_str())
    );
    assert_eq!(
        products[0].gallery,
        vec![format!("http://{addr}/static/back.jpg")]
    );

    // The limit is always attached; search and category pass through
    let queries = state.products_queries.lock().unwrap();
    assert_eq!(queries.len(), 1);
    assert_eq!(queries[0].get("limit").map(String::as_str), Some("300"));
    assert_eq!(queries[0].get("search").map(String::as_str), Some("arsenal"));
    assert_eq!(
        queries[0].get("category_slug").map(String::as_str),
        Some("jerseys")
    );

    // Init data rode along
    assert_eq!(
        state.seen_init_data.lock().unwrap().as_deref(),
        Some("query_id=test")
    );
}

#[tokio::test]
async fn test_unknown_identity_maps_to_unauthorized() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(state).await;
    let client = client_for(addr, 99);

    let err = client.fetch_cart().await.unwrap_err();
    assert!(matches!(err, ApiError::Unauthorized(401)));
}

#[tokio::test]
async fn test_cart_roundtrip() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(Arc::clone(&state)).await;
    let client = client_for(addr, 12345);

    let created = client
        .add_cart_item(&CartItemCreate::new(ProductId::new(3)))
        .await
        .unwrap();
    assert_eq!(created.product.id, ProductId::new(3));
    assert_eq!(created.quantity, 1);

    // The POST body matched the wire contract
    let posts = state.cart_posts.lock().unwrap().clone();
    assert_eq!(posts, vec![json!({"product_id": 3, "quantity": 1})]);

    let cart = client.fetch_cart().await.unwrap();
    assert_eq!(cart.len(), 1);

    client.remove_cart_item(cart[0].id).await.unwrap();
    assert!(client.fetch_cart().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_remove_missing_cart_item_is_not_found() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(state).await;
    let client = client_for(addr, 12345);

    let err = client
        .remove_cart_item(CartItemId::new(777))
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_favorites_roundtrip() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(state).await;
    let client = client_for(addr, 12345);

    let favorite = client
        .add_favorite(&FavoriteCreate {
            product_id: ProductId::new(7),
        })
        .await
        .unwrap();
    assert_eq!(favorite.product.id, ProductId::new(7));
    assert_eq!(client.fetch_favorites().await.unwrap().len(), 1);

    client.remove_favorite(ProductId::new(7)).await.unwrap();
    assert!(client.fetch_favorites().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_checkout_and_timeline() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(Arc::clone(&state)).await;
    let client = client_for(addr, 12345);

    client
        .add_cart_item(&CartItemCreate::new(ProductId::new(3)))
        .await
        .unwrap();
    let order = client.create_order().await.unwrap();
    assert_eq!(order.status, tifo_core::OrderStatus::Received);
    assert_eq!(order.items.len(), 1);
    assert!(client.fetch_cart().await.unwrap().is_empty(), "server drained cart");

    // Timeline read path with date bounds
    let range = OrderDateRange {
        start_date: Some("2024-01-01T00:00:00Z".to_string()),
        end_date: None,
    };
    let orders = client.list_orders(&range).await.unwrap();
    assert_eq!(orders.len(), 1);
    let queries = state.orders_queries.lock().unwrap().clone();
    assert_eq!(
        queries[0].get("start_date").map(String::as_str),
        Some("2024-01-01T00:00:00Z")
    );
    assert!(!queries[0].contains_key("end_date"));

    // Forward-only advance through the write path
    let next = order.status.advance().unwrap();
    let updated = client
        .update_order_status(order.id, &OrderStatusUpdate { status: next })
        .await
        .unwrap();
    assert_eq!(updated.status, tifo_core::OrderStatus::Paid);
}

#[tokio::test]
async fn test_patch_unknown_order_is_not_found() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(state).await;
    let client = client_for(addr, 12345);

    let err = client
        .update_order_status(
            OrderId::new(404),
            &OrderStatusUpdate {
                status: tifo_core::OrderStatus::Paid,
            },
        )
        .await
        .unwrap_err();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[tokio::test]
async fn test_categories_are_cached() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(Arc::clone(&state)).await;
    let client = client_for(addr, 12345);

    let first = client.list_categories().await.unwrap();
    let second = client.list_categories().await.unwrap();
    assert_eq!(first, second);
    assert_eq!(
        state.category_hits.load(Ordering::SeqCst),
        1,
        "second read must come from cache"
    );

    client.invalidate_all().await;
    client.list_categories().await.unwrap();
    assert_eq!(state.category_hits.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn test_store_duplicate_guard_over_live_gateway() {
    let state = Arc::new(MockState::default());
    let addr = spawn_backend(Arc::clone(&state)).await;
    let store = Store::new(client_for(addr, 12345));

    assert!(store.add_to_cart(ProductId::new(3)).await);
    // Reconciled member now blocks a second add before any network call
    assert!(!store.add_to_cart(ProductId::new(3)).await);
    assert_eq!(state.cart_posts.lock().unwrap().len(), 1);
    assert!(store.is_in_cart(ProductId::new(3)));
}
