//! Core data types shared by the client and the catalog service

use serde::{Deserialize, Serialize};

/// A product as seen by the client: whatever JSON the catalog returned.
/// No fields are assumed.
pub type Product = serde_json::Value;

/// A product as stored by the catalog service
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
pub struct CatalogProduct {
    pub id: i64,
    pub name: String,
    /// Units in stock
    pub quantity: i64,
    /// Unit price in COP
    pub price: f64,
}

/// Body of `POST /add`
#[derive(Debug, Clone, Deserialize)]
pub struct NewProduct {
    pub name: String,
    #[serde(alias = "cantidad")]
    pub quantity: i64,
    #[serde(alias = "precio")]
    pub price: f64,
}

/// Body of `PATCH /update/{id}`; absent fields are left untouched
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ProductPatch {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default, alias = "cantidad")]
    pub quantity: Option<i64>,
    #[serde(default, alias = "precio")]
    pub price: Option<f64>,
}

impl ProductPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.quantity.is_none() && self.price.is_none()
    }
}

/// Body of the stock increase/decrease endpoints
#[derive(Debug, Clone, Deserialize)]
pub struct StockChange {
    pub amount: i64,
}

/// Stock reported for a single product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StockLevel {
    pub name: String,
    pub quantity: i64,
}
