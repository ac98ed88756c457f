//! Storefront Catalog API Server
//!
//! Serves the products the storefront client fetches.
//!
//! Usage:
//!   cargo run --bin storefront_api
//!
//! Environment:
//!   PORT / STOREFRONT_PORT  - Server port (default: 5000)
//!   STOREFRONT_HOST         - Server host (default: 0.0.0.0)
//!   STOREFRONT_CORS_ORIGIN  - Allowed frontend origin (default: http://localhost:8000)
//!   STOREFRONT_SEED_DEMO    - Load demo products when "true" or "1"
//!   STOREFRONT_DATABASE_URL - SQLite catalog (default: sqlite://DatabaseDefault.db)
//!   STOREFRONT_IN_MEMORY    - Keep products in memory only when "true" or "1"
//!   RUST_LOG                - Log level (default: info)

use std::sync::Arc;
use storefront::api::{create_router, AppState};
use storefront::{init_logging, Catalog, ProductStore, ServerConfig, SqliteCatalog};
use tokio::net::TcpListener;
use tracing::{info, warn};

#[tokio::main]
async fn main() -> eyre::Result<()> {
    init_logging();

    let config = ServerConfig::default();

    let catalog: Catalog = match &config.database_url {
        Some(url) => {
            let db = SqliteCatalog::connect(url).await?;
            if config.seed_demo {
                db.seed_demo_products().await?;
            }
            db.into()
        }
        None if config.seed_demo => ProductStore::with_demo_products().into(),
        None => ProductStore::new().into(),
    };
    let state = Arc::new(AppState::new(catalog.clone()));
    let app = create_router(state, &config.cors_origin);

    let addr = config.socket_addr()?;

    info!("Catalog API starting on http://{}", addr);
    info!("Allowed origin: {}", config.cors_origin);
    info!("Catalog storage: {}", catalog.backend_name());
    info!("");
    info!("Endpoints:");
    info!("  GET    /products                   - List all products");
    info!("  GET    /search/:id                 - Product by id");
    info!("  POST   /add                        - Add a product");
    info!("  PATCH  /update/:id                 - Partial update");
    info!("  DELETE /delete/:id                 - Delete a product");
    info!("  GET    /inventory/:name            - Stock for a product");
    info!("  POST   /inventory/:name/increase   - Add stock");
    info!("  POST   /inventory/:name/decrease   - Remove stock");
    info!("  DELETE /inventory/:name            - Remove by name");
    info!("  GET    /health                     - Health check");
    info!("");
    info!("Press Ctrl+C for graceful shutdown");

    let listener = TcpListener::bind(addr).await?;

    let shutdown_signal = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!("Failed to listen for Ctrl+C: {}", e);
            std::future::pending::<()>().await;
        }
    };

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal)
        .await?;

    info!("Shutdown signal received, {} products in catalog", catalog.len().await?);
    catalog.close().await;
    info!("Catalog API shutdown complete");

    Ok(())
}
