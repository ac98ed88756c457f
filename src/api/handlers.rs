//! API Request Handlers

use axum::{extract::State, http::StatusCode, Json};
use std::sync::Arc;
use std::time::Instant;
use tracing::info;

use super::types::*;
use crate::core::Catalog;
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{CatalogProduct, NewProduct, ProductPatch, StockChange, StockLevel};

/// Shared application state
pub struct AppState {
    pub catalog: Catalog,
    pub start_time: Instant,
}

impl AppState {
    pub fn new(catalog: impl Into<Catalog>) -> Self {
        Self {
            catalog: catalog.into(),
            start_time: Instant::now(),
        }
    }

    pub fn uptime_seconds(&self) -> u64 {
        self.start_time.elapsed().as_secs()
    }
}

// ============================================
// Health Check
// ============================================

pub async fn health_check(State(state): State<Arc<AppState>>) -> AppResult<Json<HealthData>> {
    Ok(Json(HealthData {
        status: "healthy".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
        uptime_seconds: state.uptime_seconds(),
        products: state.catalog.len().await?,
        storage: state.catalog.backend_name().to_string(),
        timestamp: chrono::Utc::now().timestamp(),
    }))
}

// ============================================
// Products
// ============================================

pub async fn list_products(
    State(state): State<Arc<AppState>>,
) -> AppResult<Json<Vec<CatalogProduct>>> {
    Ok(Json(state.catalog.list().await?))
}

pub async fn search_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<CatalogProduct>> {
    state
        .catalog
        .get(id)
        .await?
        .map(Json)
        .ok_or_else(|| AppError::not_found("Product not found"))
}

pub async fn add_product(
    State(state): State<Arc<AppState>>,
    ApiJson(req): ApiJson<NewProduct>,
) -> AppResult<(StatusCode, Json<CatalogProduct>)> {
    let product = state.catalog.create(req).await?;
    info!(id = product.id, product_name = %product.name, "Product added");
    Ok((StatusCode::CREATED, Json(product)))
}

pub async fn update_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
    ApiJson(patch): ApiJson<ProductPatch>,
) -> AppResult<Json<CatalogProduct>> {
    let product = state.catalog.update(id, patch).await?;
    Ok(Json(product))
}

pub async fn delete_product(
    State(state): State<Arc<AppState>>,
    ApiPath(id): ApiPath<i64>,
) -> AppResult<Json<Acknowledgement>> {
    let product = state.catalog.delete(id).await?;
    info!(id = product.id, product_name = %product.name, "Product deleted");
    Ok(Json(Acknowledgement::success()))
}

// ============================================
// Inventory
// ============================================

pub async fn check_stock(
    State(state): State<Arc<AppState>>,
    ApiPath(name): ApiPath<String>,
) -> AppResult<Json<StockLevel>> {
    let quantity = state
        .catalog
        .check_quantity(&name)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product '{}' is not in the inventory", name)))?;
    Ok(Json(StockLevel { name, quantity }))
}

pub async fn increase_stock(
    State(state): State<Arc<AppState>>,
    ApiPath(name): ApiPath<String>,
    ApiJson(req): ApiJson<StockChange>,
) -> AppResult<Json<StockLevel>> {
    let quantity = state.catalog.increase_quantity(&name, req.amount).await?;
    Ok(Json(StockLevel { name, quantity }))
}

pub async fn decrease_stock(
    State(state): State<Arc<AppState>>,
    ApiPath(name): ApiPath<String>,
    ApiJson(req): ApiJson<StockChange>,
) -> AppResult<Json<StockLevel>> {
    let quantity = state.catalog.decrease_quantity(&name, req.amount).await?;
    Ok(Json(StockLevel { name, quantity }))
}

pub async fn remove_stock_item(
    State(state): State<Arc<AppState>>,
    ApiPath(name): ApiPath<String>,
) -> AppResult<Json<Acknowledgement>> {
    if state.catalog.remove_by_name(&name).await? {
        info!(product_name = %name, "Product removed from inventory");
        Ok(Json(Acknowledgement::success()))
    } else {
        Err(AppError::not_found(format!("Product '{}' is not in the inventory", name)))
    }
}
