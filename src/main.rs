//! Storefront - fetch the catalog and render it
//!
//! Usage:
//!   cargo run --bin storefront
//!
//! Environment:
//!   STOREFRONT_API_URL  - Catalog base URL (default: http://localhost:5000)
//!   STOREFRONT_APP_NAME - Name shown in the greeting (default: world)
//!   RUST_LOG            - Log level (default: info)

use storefront::{init_logging, App, AppConfig, ClientConfig, ProductFetcher};

use eyre::Result;
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    init_logging();

    let client_config = ClientConfig::default();
    let app_config = AppConfig::default();

    let fetcher = ProductFetcher::new(client_config);
    info!("Catalog endpoint: {}", fetcher.products_url());

    // The fetcher logs each product at debug; failures are logged there too
    // and render as an empty listing
    let products = fetcher.fetch_products().await;
    info!("Rendering {} products", products.len());

    let app = App::new(app_config);
    let stdout = std::io::stdout();
    app.mount(&mut stdout.lock(), &products)?;

    Ok(())
}
