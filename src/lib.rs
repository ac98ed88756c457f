//! Storefront Library
//!
//! Client side of a small product storefront:
//! - Product fetching from the catalog API, with a strict and a
//!   degrade-to-empty entry point
//! - Colombian Peso (COP, `es-CO`) price formatting
//! - The application that renders the listing
//!
//! Also ships the catalog API itself (`api`, `core`, in memory or SQLite) so
//! the client has a real counterpart.

pub mod api;
pub mod app;
pub mod core;
pub mod models;
pub mod providers;
pub mod utils;

pub use app::App;
pub use crate::core::{Catalog, ProductStore, SqliteCatalog};
pub use models::config::{AppConfig, ClientConfig, ServerConfig};
pub use models::errors::{AppError, AppResult, ErrorCode};
pub use models::types::{CatalogProduct, NewProduct, Product, ProductPatch, StockLevel};
pub use providers::products::{fetch_products, ProductFetcher};
pub use utils::currency::format_to_cop;
pub use utils::logging::init_logging;
