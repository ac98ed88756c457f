//! Products API Client
//!
//! One GET against `{base_url}/products`. The body is handed back as-is:
//! products are opaque JSON, nothing is validated or mapped.
//!
//! Two entry points:
//! - `try_fetch_products` returns the failure so the caller can tell
//!   "no products" apart from "fetch failed".
//! - `fetch_products` logs the failure and degrades to an empty list.
//!
//! No timeout, retry, cache or cancellation is applied here.

use serde_json::Value;
use tracing::{debug, error, info};

use crate::models::config::ClientConfig;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::Product;

/// Path of the listing endpoint, relative to the base URL
pub const PRODUCTS_PATH: &str = "/products";

/// Products API client
#[derive(Debug, Clone)]
pub struct ProductFetcher {
    client: reqwest::Client,
    products_url: String,
}

impl Default for ProductFetcher {
    fn default() -> Self {
        Self::new(ClientConfig::default())
    }
}

impl ProductFetcher {
    pub fn new(config: ClientConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            products_url: format!("{}{}", config.api_base_url, PRODUCTS_PATH),
        }
    }

    pub fn products_url(&self) -> &str {
        &self.products_url
    }

    /// Fetch the product list, surfacing any failure as a `FETCH_*` error
    pub async fn try_fetch_products(&self) -> AppResult<Vec<Product>> {
        debug!(url = %self.products_url, "Fetching products");

        let response = self.client.get(&self.products_url).send().await?;

        let status = response.status();
        if !status.is_success() {
            return Err(AppError::bad_status(status.as_u16(), &self.products_url));
        }

        let body: Value = response.json().await?;
        let products = into_products(body);

        info!(count = products.len(), "Products fetched");
        for product in &products {
            debug!(%product, "Fetched product");
        }

        Ok(products)
    }

    /// Fetch the product list; any failure is logged and yields an empty list
    pub async fn fetch_products(&self) -> Vec<Product> {
        match self.try_fetch_products().await {
            Ok(products) => products,
            Err(e) => {
                error!(
                    code = e.code_str(),
                    url = %self.products_url,
                    "Failed to fetch products: {}",
                    e
                );
                Vec::new()
            }
        }
    }
}

/// Fetch from the configured catalog with the degrade-to-empty policy
pub async fn fetch_products() -> Vec<Product> {
    ProductFetcher::default().fetch_products().await
}

/// An array is the product list; any other JSON value is a single product
fn into_products(body: Value) -> Vec<Product> {
    match body {
        Value::Array(items) => items,
        other => vec![other],
    }
}
