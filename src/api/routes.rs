//! API Route Configuration

use axum::{
    http::{HeaderValue, Method},
    middleware,
    routing::{delete, get, patch, post},
    Router,
};
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use tracing::warn;

use super::handlers::{self, AppState};
use super::middleware::logging_middleware;

/// Create the API router with all routes and middleware
pub fn create_router(state: Arc<AppState>, cors_origin: &str) -> Router {
    Router::new()
        .route("/health", get(handlers::health_check))
        // Products
        .route("/products", get(handlers::list_products))
        .route("/search/:id", get(handlers::search_product))
        .route("/add", post(handlers::add_product))
        .route("/update/:id", patch(handlers::update_product))
        .route("/delete/:id", delete(handlers::delete_product))
        // Inventory
        .route(
            "/inventory/:name",
            get(handlers::check_stock).delete(handlers::remove_stock_item),
        )
        .route("/inventory/:name/increase", post(handlers::increase_stock))
        .route("/inventory/:name/decrease", post(handlers::decrease_stock))
        .with_state(state)
        // Outermost first
        .layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(logging_middleware))
                .layer(TraceLayer::new_for_http())
                .layer(cors_layer(cors_origin))
                .layer(CompressionLayer::new()),
        )
}

/// CORS for the storefront frontend only
fn cors_layer(origin: &str) -> CorsLayer {
    let layer = CorsLayer::new()
        .allow_methods([Method::GET, Method::POST, Method::PATCH, Method::DELETE])
        .allow_headers(Any);

    match origin.parse::<HeaderValue>() {
        Ok(value) => layer.allow_origin(value),
        Err(_) => {
            warn!(origin, "Invalid CORS origin, cross-origin requests will be refused");
            layer
        }
    }
}
