//! Saved product API handlers.

use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::Serialize;
use tradeshelf_core::{TraderProductUpdate, TraderProductView};

use super::error::{error_response, selection_error, ApiError};
use super::middleware::AuthTrader;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct TraderProductListResponse {
    pub products: Vec<TraderProductView>,
    pub total: usize,
}

/// GET /api/v1/products
///
/// The trader's saved products.
pub async fn list_products(
    State(state): State<Arc<AppState>>,
    AuthTrader(trader_id): AuthTrader,
) -> Result<Json<TraderProductListResponse>, ApiError> {
    let products = state
        .selection_store()
        .list_trader_products(&trader_id)
        .map_err(selection_error)?;

    let total = products.len();
    Ok(Json(TraderProductListResponse { products, total }))
}

/// PATCH /api/v1/products/{id}
///
/// Change visibility or display order of a saved product (local id).
pub async fn update_product(
    State(state): State<Arc<AppState>>,
    AuthTrader(trader_id): AuthTrader,
    Path(product_id): Path<i64>,
    Json(update): Json<TraderProductUpdate>,
) -> Result<Json<TraderProductView>, ApiError> {
    if update.is_empty() {
        return Err(error_response(
            StatusCode::BAD_REQUEST,
            "Nothing to update: pass visibility and/or displayOrder",
        ));
    }

    let view = state
        .selection_store()
        .update_trader_product(&trader_id, product_id, &update)
        .map_err(selection_error)?;

    Ok(Json(view))
}
