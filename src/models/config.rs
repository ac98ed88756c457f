//! Configuration module for the storefront
//!
//! Every value comes from the environment with a built-in default, so a bare
//! `cargo run` talks to a catalog on `localhost:5000`.

use std::net::SocketAddr;

use super::errors::{AppError, AppResult};

/// Default catalog base URL
pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000";
/// Default display name handed to the application
pub const DEFAULT_APP_NAME: &str = "world";
/// Default catalog bind host
pub const DEFAULT_HOST: &str = "0.0.0.0";
/// Default catalog port
pub const DEFAULT_PORT: u16 = 5000;
/// Frontend origin allowed by CORS
pub const DEFAULT_CORS_ORIGIN: &str = "http://localhost:8000";
/// Catalog database, created next to the binary on first run
pub const DEFAULT_DATABASE_URL: &str = "sqlite://DatabaseDefault.db";

/// Where the product fetcher points
#[derive(Debug, Clone)]
pub struct ClientConfig {
    /// Base URL of the catalog, without trailing slash
    pub api_base_url: String,
}

impl ClientConfig {
    pub fn new(api_base_url: impl Into<String>) -> Self {
        let url: String = api_base_url.into();
        Self {
            api_base_url: url.trim_end_matches('/').to_string(),
        }
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(
            std::env::var("STOREFRONT_API_URL").unwrap_or_else(|_| DEFAULT_API_BASE_URL.to_string()),
        )
    }
}

/// Options injected into the application at mount time
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Display name used in the greeting
    pub name: String,
}

impl AppConfig {
    pub fn new(name: impl Into<String>) -> Self {
        Self { name: name.into() }
    }
}

impl Default for AppConfig {
    fn default() -> Self {
        Self::new(std::env::var("STOREFRONT_APP_NAME").unwrap_or_else(|_| DEFAULT_APP_NAME.to_string()))
    }
}

/// Catalog API server settings
#[derive(Debug, Clone)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    /// Single origin allowed by CORS
    pub cors_origin: String,
    /// Start with the demo products loaded
    pub seed_demo: bool,
    /// SQLite URL for the catalog; `None` keeps products in memory only
    pub database_url: Option<String>,
}

impl Default for ServerConfig {
    fn default() -> Self {
        // Hosting platforms set PORT; STOREFRONT_PORT is for local runs
        let port = std::env::var("PORT")
            .or_else(|_| std::env::var("STOREFRONT_PORT"))
            .ok()
            .and_then(|p| p.parse().ok())
            .unwrap_or(DEFAULT_PORT);

        Self {
            host: std::env::var("STOREFRONT_HOST").unwrap_or_else(|_| DEFAULT_HOST.to_string()),
            port,
            cors_origin: std::env::var("STOREFRONT_CORS_ORIGIN")
                .unwrap_or_else(|_| DEFAULT_CORS_ORIGIN.to_string()),
            seed_demo: std::env::var("STOREFRONT_SEED_DEMO")
                .map(|v| parse_flag(&v))
                .unwrap_or(false),
            database_url: database_url_from_env(),
        }
    }
}

/// `STOREFRONT_IN_MEMORY` wins over `STOREFRONT_DATABASE_URL`
fn database_url_from_env() -> Option<String> {
    let in_memory = std::env::var("STOREFRONT_IN_MEMORY")
        .map(|v| parse_flag(&v))
        .unwrap_or(false);
    if in_memory {
        return None;
    }
    Some(std::env::var("STOREFRONT_DATABASE_URL").unwrap_or_else(|_| DEFAULT_DATABASE_URL.to_string()))
}

impl ServerConfig {
    /// Resolve host and port into a bindable address
    pub fn socket_addr(&self) -> AppResult<SocketAddr> {
        format!("{}:{}", self.host, self.port)
            .parse()
            .map_err(|_| {
                AppError::invalid_config(format!("Invalid listen address {}:{}", self.host, self.port))
            })
    }
}

fn parse_flag(value: &str) -> bool {
    matches!(value.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes" | "on")
}
