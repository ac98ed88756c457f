//! Catalog backend selection
//!
//! The API talks to a `Catalog`, which is either the in-memory store or the
//! SQLite one. Both answer with the same error codes.

use super::catalog::ProductStore;
use super::sqlite::SqliteCatalog;
use crate::models::errors::AppResult;
use crate::models::types::{CatalogProduct, NewProduct, ProductPatch};

#[derive(Clone)]
pub enum Catalog {
    /// Lost on restart; used by tests and `STOREFRONT_IN_MEMORY`
    Memory(ProductStore),
    Sqlite(SqliteCatalog),
}

impl From<ProductStore> for Catalog {
    fn from(store: ProductStore) -> Self {
        Self::Memory(store)
    }
}

impl From<SqliteCatalog> for Catalog {
    fn from(catalog: SqliteCatalog) -> Self {
        Self::Sqlite(catalog)
    }
}

impl Catalog {
    pub fn backend_name(&self) -> &'static str {
        match self {
            Self::Memory(_) => "memory",
            Self::Sqlite(_) => "sqlite",
        }
    }

    pub async fn len(&self) -> AppResult<usize> {
        match self {
            Self::Memory(store) => Ok(store.len()),
            Self::Sqlite(db) => db.len().await,
        }
    }

    pub async fn list(&self) -> AppResult<Vec<CatalogProduct>> {
        match self {
            Self::Memory(store) => Ok(store.list()),
            Self::Sqlite(db) => db.list().await,
        }
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<CatalogProduct>> {
        match self {
            Self::Memory(store) => Ok(store.get(id)),
            Self::Sqlite(db) => db.get(id).await,
        }
    }

    pub async fn create(&self, new: NewProduct) -> AppResult<CatalogProduct> {
        match self {
            Self::Memory(store) => store.create(new),
            Self::Sqlite(db) => db.create(new).await,
        }
    }

    pub async fn update(&self, id: i64, patch: ProductPatch) -> AppResult<CatalogProduct> {
        match self {
            Self::Memory(store) => store.update(id, patch),
            Self::Sqlite(db) => db.update(id, patch).await,
        }
    }

    pub async fn delete(&self, id: i64) -> AppResult<CatalogProduct> {
        match self {
            Self::Memory(store) => store.delete(id),
            Self::Sqlite(db) => db.delete(id).await,
        }
    }

    pub async fn increase_quantity(&self, name: &str, amount: i64) -> AppResult<i64> {
        match self {
            Self::Memory(store) => store.increase_quantity(name, amount),
            Self::Sqlite(db) => db.increase_quantity(name, amount).await,
        }
    }

    pub async fn decrease_quantity(&self, name: &str, amount: i64) -> AppResult<i64> {
        match self {
            Self::Memory(store) => store.decrease_quantity(name, amount),
            Self::Sqlite(db) => db.decrease_quantity(name, amount).await,
        }
    }

    pub async fn check_quantity(&self, name: &str) -> AppResult<Option<i64>> {
        match self {
            Self::Memory(store) => Ok(store.check_quantity(name)),
            Self::Sqlite(db) => db.check_quantity(name).await,
        }
    }

    pub async fn remove_by_name(&self, name: &str) -> AppResult<bool> {
        match self {
            Self::Memory(store) => Ok(store.remove_by_name(name)),
            Self::Sqlite(db) => db.remove_by_name(name).await,
        }
    }

    /// Flush and close the database; a no-op in memory
    pub async fn close(&self) {
        if let Self::Sqlite(db) = self {
            db.close().await;
        }
    }
}
