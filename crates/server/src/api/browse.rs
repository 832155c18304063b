//! Browse and cart API handlers.
//!
//! Product browsing is proxied to the catalog provider and the returned page
//! becomes the session's browse cache. The cart endpoints only touch the
//! session; saving goes through the selection store.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    Json,
};
use serde::{Deserialize, Serialize};
use tradeshelf_core::{
    save_cart, session::cart, BrowseParams, BrowseResult, CategoryRef, SaveSummary,
};

use super::error::{browse_error, provider_not_ready, selection_error, ApiError};
use super::middleware::{AuthTrader, SessionKey};
use crate::state::AppState;

// ============================================================================
// Request/Response types
// ============================================================================

#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartUpdateRequest {
    #[serde(default)]
    pub product_source_ids: Vec<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CartResponse {
    pub cart: Vec<i64>,
    pub count: usize,
}

impl From<Vec<i64>> for CartResponse {
    fn from(cart: Vec<i64>) -> Self {
        let count = cart.len();
        Self { cart, count }
    }
}

// ============================================================================
// Handlers
// ============================================================================

/// GET /api/v1/browse/products
pub async fn browse_products(
    State(state): State<Arc<AppState>>,
    SessionKey(key): SessionKey,
    Query(params): Query<BrowseParams>,
) -> Result<Json<BrowseResult>, ApiError> {
    let browse = state.browse().ok_or_else(provider_not_ready)?;
    let upstream = state.sessions().snapshot(&key).upstream;

    let result = browse
        .browse_products(upstream.as_ref(), &params)
        .await
        .map_err(browse_error)?;

    let products = result.products.clone();
    state
        .sessions()
        .update(&key, |s| s.browse_cache = products);

    Ok(Json(result))
}

/// GET /api/v1/browse/categories
pub async fn browse_categories(
    State(state): State<Arc<AppState>>,
    SessionKey(key): SessionKey,
) -> Result<Json<Vec<CategoryRef>>, ApiError> {
    let browse = state.browse().ok_or_else(provider_not_ready)?;
    let upstream = state.sessions().snapshot(&key).upstream;

    let categories = browse
        .browse_categories(upstream.as_ref())
        .await
        .map_err(browse_error)?;

    Ok(Json(categories))
}

/// GET /api/v1/browse/cart
pub async fn get_cart(
    State(state): State<Arc<AppState>>,
    SessionKey(key): SessionKey,
) -> Json<CartResponse> {
    Json(cart::get(&state.sessions().snapshot(&key)).into())
}

/// POST /api/v1/browse/cart/add
pub async fn add_to_cart(
    State(state): State<Arc<AppState>>,
    SessionKey(key): SessionKey,
    Json(request): Json<CartUpdateRequest>,
) -> Json<CartResponse> {
    let contents = state
        .sessions()
        .update(&key, |s| cart::add(s, &request.product_source_ids));
    Json(contents.into())
}

/// POST /api/v1/browse/cart/remove
pub async fn remove_from_cart(
    State(state): State<Arc<AppState>>,
    SessionKey(key): SessionKey,
    Json(request): Json<CartUpdateRequest>,
) -> Json<CartResponse> {
    let contents = state
        .sessions()
        .update(&key, |s| cart::remove(s, &request.product_source_ids));
    Json(contents.into())
}

/// POST /api/v1/browse/cart/clear
pub async fn clear_cart(
    State(state): State<Arc<AppState>>,
    SessionKey(key): SessionKey,
) -> Json<CartResponse> {
    state.sessions().update(&key, cart::clear);
    Json(Vec::new().into())
}

/// POST /api/v1/browse/cart/save
///
/// Persists the cart against the browse cache. The cart is emptied of the
/// saved ids only after the save commits.
pub async fn save(
    State(state): State<Arc<AppState>>,
    AuthTrader(trader_id): AuthTrader,
    SessionKey(key): SessionKey,
) -> Result<Json<SaveSummary>, ApiError> {
    let session = state.sessions().snapshot(&key);

    let summary =
        save_cart(state.selection_store(), &trader_id, &session).map_err(selection_error)?;

    let saved: Vec<i64> = session.cart.iter().copied().collect();
    state.sessions().update(&key, |s| cart::remove(s, &saved));

    Ok(Json(summary))
}
