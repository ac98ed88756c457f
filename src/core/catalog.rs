//! In-Memory Product Catalog
//!
//! Thread-safe store behind the catalog API.
//! DashMap for concurrent access, a second map as the unique name index.
//! Writes that touch both maps (create, rename, delete) hold `writer`, so
//! the index never drifts from the products it points at. Reads and stock
//! changes only lock a single entry.
//!
//! Invariants:
//! - ids are assigned by the store, starting at 1, never reused
//! - product names are unique (exact match)
//! - stock never goes negative

use dashmap::mapref::entry::Entry;
use dashmap::DashMap;
use std::sync::atomic::{AtomicI64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard};
use tracing::{debug, info, warn};

use crate::models::errors::{AppError, AppResult};
use crate::models::types::{CatalogProduct, NewProduct, ProductPatch};

/// Grocery items loaded by `STOREFRONT_SEED_DEMO` (name, quantity, price)
pub const DEMO_PRODUCTS: [(&str, i64, f64); 3] =
    [("banana", 1, 1500.0), ("onion", 3, 2000.0), ("tomato", 7, 500.0)];

/// Shared catalog state; clones see the same products
#[derive(Clone, Default)]
pub struct ProductStore {
    /// id -> product
    products: Arc<DashMap<i64, CatalogProduct>>,
    /// name -> id
    names: Arc<DashMap<String, i64>>,
    /// Last id handed out
    last_id: Arc<AtomicI64>,
    /// Serializes writes spanning `products` and `names`
    writer: Arc<Mutex<()>>,
}

impl ProductStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Store preloaded with a few grocery items for local runs
    pub fn with_demo_products() -> Self {
        let store = Self::new();
        for (name, quantity, price) in DEMO_PRODUCTS {
            let created = store.create(NewProduct {
                name: name.to_string(),
                quantity,
                price,
            });
            if let Err(e) = created {
                warn!("Demo product '{}' not loaded: {}", name, e);
            }
        }

        info!("Catalog seeded with {} demo products", store.len());
        store
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    /// All products ordered by id
    pub fn list(&self) -> Vec<CatalogProduct> {
        let mut products: Vec<CatalogProduct> =
            self.products.iter().map(|entry| entry.value().clone()).collect();
        products.sort_by_key(|p| p.id);
        products
    }

    pub fn get(&self, id: i64) -> Option<CatalogProduct> {
        self.products.get(&id).map(|entry| entry.value().clone())
    }

    /// Add a product under the next free id
    pub fn create(&self, new: NewProduct) -> AppResult<CatalogProduct> {
        validate_name(&new.name)?;
        validate_quantity(new.quantity)?;

        let _writer = self.lock_writer();
        let product = match self.names.entry(new.name.clone()) {
            Entry::Occupied(_) => {
                return Err(AppError::conflict(format!(
                    "Product '{}' already exists",
                    new.name
                )));
            }
            Entry::Vacant(slot) => {
                let id = self.last_id.fetch_add(1, Ordering::SeqCst) + 1;
                let product = CatalogProduct {
                    id,
                    name: new.name,
                    quantity: new.quantity,
                    price: new.price,
                };
                self.products.insert(id, product.clone());
                slot.insert(id);
                product
            }
        };

        debug!(id = product.id, product_name = %product.name, "Product created");
        Ok(product)
    }

    /// Apply the fields present in `patch`. Ids are store-assigned, so a
    /// patch id is ignored.
    pub fn update(&self, id: i64, patch: ProductPatch) -> AppResult<CatalogProduct> {
        if let Some(patch_id) = patch.id {
            if patch_id != id {
                debug!(id, patch_id, "Ignoring id in product patch");
            }
        }
        if let Some(quantity) = patch.quantity {
            validate_quantity(quantity)?;
        }
        if let Some(name) = patch.name.as_ref() {
            validate_name(name)?;
        }

        let _writer = self.lock_writer();
        let mut entry = self
            .products
            .get_mut(&id)
            .ok_or_else(|| AppError::not_found(format!("Product {} does not exist", id)))?;
        let product = entry.value_mut();

        if let Some(new_name) = patch.name.as_ref().filter(|n| **n != product.name) {
            match self.names.entry(new_name.clone()) {
                Entry::Occupied(_) => {
                    return Err(AppError::conflict(format!(
                        "Product '{}' already exists",
                        new_name
                    )));
                }
                Entry::Vacant(slot) => {
                    slot.insert(id);
                }
            }
            self.names.remove(&product.name);
        }

        if let Some(name) = patch.name {
            product.name = name;
        }
        if let Some(quantity) = patch.quantity {
            product.quantity = quantity;
        }
        if let Some(price) = patch.price {
            product.price = price;
        }

        debug!(id, "Product updated");
        Ok(product.clone())
    }

    pub fn delete(&self, id: i64) -> AppResult<CatalogProduct> {
        let _writer = self.lock_writer();
        let (_, product) = self
            .products
            .remove(&id)
            .ok_or_else(|| AppError::not_found(format!("Product {} does not exist", id)))?;
        self.names.remove(&product.name);

        debug!(id, product_name = %product.name, "Product deleted");
        Ok(product)
    }

    // ============================================
    // Inventory operations (by product name)
    // ============================================

    /// Add stock; returns the new quantity
    pub fn increase_quantity(&self, name: &str, amount: i64) -> AppResult<i64> {
        validate_amount(amount)?;
        let id = self.id_of(name)?;
        let mut entry = self
            .products
            .get_mut(&id)
            .ok_or_else(|| not_in_inventory(name))?;

        let product = entry.value_mut();
        product.quantity = product
            .quantity
            .checked_add(amount)
            .ok_or_else(|| AppError::bad_request("Quantity overflow"))?;
        Ok(product.quantity)
    }

    /// Remove stock; asking for more than is available leaves stock untouched
    pub fn decrease_quantity(&self, name: &str, amount: i64) -> AppResult<i64> {
        validate_amount(amount)?;
        let id = self.id_of(name)?;
        let mut entry = self
            .products
            .get_mut(&id)
            .ok_or_else(|| not_in_inventory(name))?;

        let product = entry.value_mut();
        if amount > product.quantity {
            warn!(
                product_name = name,
                available = product.quantity,
                requested = amount,
                "Not enough quantity to decrease"
            );
            return Err(AppError::insufficient_quantity(name, product.quantity, amount));
        }
        product.quantity -= amount;
        Ok(product.quantity)
    }

    pub fn check_quantity(&self, name: &str) -> Option<i64> {
        let id = *self.names.get(name)?;
        self.products.get(&id).map(|p| p.quantity)
    }

    /// Returns whether a product with that name existed
    pub fn remove_by_name(&self, name: &str) -> bool {
        let _writer = self.lock_writer();
        match self.names.remove(name) {
            Some((_, id)) => {
                self.products.remove(&id);
                debug!(id, product_name = name, "Product removed from inventory");
                true
            }
            None => false,
        }
    }

    /// Every write path leaves both maps consistent before releasing the
    /// guard, so a poisoned lock carries no torn state.
    fn lock_writer(&self) -> MutexGuard<'_, ()> {
        self.writer.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
    }

    fn id_of(&self, name: &str) -> AppResult<i64> {
        self.names
            .get(name)
            .map(|id| *id)
            .ok_or_else(|| not_in_inventory(name))
    }
}

pub(crate) fn not_in_inventory(name: &str) -> AppError {
    AppError::not_found(format!("Product '{}' is not in the inventory", name))
}

pub(crate) fn validate_name(name: &str) -> AppResult<()> {
    if name.trim().is_empty() {
        return Err(AppError::bad_request("Product name must not be empty"));
    }
    Ok(())
}

pub(crate) fn validate_quantity(quantity: i64) -> AppResult<()> {
    if quantity < 0 {
        return Err(AppError::bad_request("Quantity must not be negative"));
    }
    Ok(())
}

pub(crate) fn validate_amount(amount: i64) -> AppResult<()> {
    if amount < 0 {
        return Err(AppError::bad_request("Amount must not be negative"));
    }
    Ok(())
}
