use axum::{
    middleware,
    routing::{get, patch, post, put},
    Router,
};
use std::sync::Arc;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{auth_middleware, metrics_middleware};
use super::{audit, browse, handlers, products, session};
use crate::state::AppState;

pub fn create_router(state: Arc<AppState>) -> Router {
    // Open routes
    let public_routes = Router::new()
        .route("/health", get(handlers::health))
        .route("/config", get(handlers::get_config));

    // Trader routes (identity required)
    let trader_routes = Router::new()
        // Session
        .route(
            "/session",
            post(session::create_session).delete(session::end_session),
        )
        .route(
            "/session/upstream",
            put(session::set_upstream).delete(session::clear_upstream),
        )
        // Browse (proxied to the catalog provider)
        .route("/browse/products", get(browse::browse_products))
        .route("/browse/categories", get(browse::browse_categories))
        // Cart
        .route("/browse/cart", get(browse::get_cart))
        .route("/browse/cart/add", post(browse::add_to_cart))
        .route("/browse/cart/remove", post(browse::remove_from_cart))
        .route("/browse/cart/clear", post(browse::clear_cart))
        .route("/browse/cart/save", post(browse::save))
        // Saved products
        .route("/products", get(products::list_products))
        .route("/products/{id}", patch(products::update_product))
        // Audit
        .route("/audit", get(audit::query_audit))
        .layer(middleware::from_fn_with_state(
            state.clone(),
            auth_middleware,
        ));

    let api_routes = public_routes.merge(trader_routes).with_state(state.clone());

    Router::new()
        .route("/metrics", get(handlers::get_metrics))
        .with_state(state)
        .nest("/api/v1", api_routes)
        .layer(middleware::from_fn(metrics_middleware))
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
}
