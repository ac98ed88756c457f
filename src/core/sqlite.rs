//! SQLite-backed Product Catalog
//!
//! Same operations and error codes as the in-memory `ProductStore`, but the
//! products survive a restart. Uniqueness and non-negative stock are also
//! enforced by the schema, and every multi-step change is a single
//! statement, so concurrent requests cannot leave the table half-updated.

use sqlx::sqlite::{SqliteConnectOptions, SqlitePool, SqlitePoolOptions};
use std::str::FromStr;
use std::time::Duration;
use tracing::{debug, info, warn};

use super::catalog::{
    not_in_inventory, validate_amount, validate_name, validate_quantity, DEMO_PRODUCTS,
};
use crate::models::errors::{AppError, AppResult};
use crate::models::types::{CatalogProduct, NewProduct, ProductPatch};

const PRODUCT_COLUMNS: &str = "id, name, quantity, price";

#[derive(Clone, Debug)]
pub struct SqliteCatalog {
    pool: SqlitePool,
}

impl SqliteCatalog {
    /// Open (creating if needed) the database at `database_url` and make
    /// sure the products table exists
    pub async fn connect(database_url: &str) -> AppResult<Self> {
        let options = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| {
                AppError::invalid_config(format!("Invalid database URL {}: {}", database_url, e))
            })?
            .create_if_missing(true);

        // An in-memory database is gone once its last connection closes,
        // so it gets one connection that never expires
        let in_memory = database_url.contains(":memory:") || database_url.contains("mode=memory");
        let pool_options = SqlitePoolOptions::new().acquire_timeout(Duration::from_secs(8));
        let pool_options = if in_memory {
            pool_options
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            pool_options.max_connections(5)
        };

        let pool = pool_options.connect_with(options).await?;
        create_tables(&pool).await?;

        info!(url = database_url, "Catalog database ready");
        Ok(Self { pool })
    }

    /// Load the demo products into an empty catalog; returns how many were added
    pub async fn seed_demo_products(&self) -> AppResult<usize> {
        if self.len().await? > 0 {
            debug!("Catalog not empty, skipping demo products");
            return Ok(0);
        }

        let mut added = 0;
        for (name, quantity, price) in DEMO_PRODUCTS {
            let created = self
                .create(NewProduct {
                    name: name.to_string(),
                    quantity,
                    price,
                })
                .await;
            match created {
                Ok(_) => added += 1,
                Err(e) => warn!("Demo product '{}' not loaded: {}", name, e),
            }
        }

        info!("Catalog seeded with {} demo products", added);
        Ok(added)
    }

    /// Wait for in-flight queries and close every connection
    pub async fn close(&self) {
        self.pool.close().await;
    }

    pub async fn len(&self) -> AppResult<usize> {
        let count: i64 = sqlx::query_scalar("SELECT COUNT(*) FROM products")
            .fetch_one(&self.pool)
            .await?;
        Ok(usize::try_from(count).unwrap_or_default())
    }

    /// All products ordered by id
    pub async fn list(&self) -> AppResult<Vec<CatalogProduct>> {
        let products = sqlx::query_as::<_, CatalogProduct>(&format!(
            "SELECT {} FROM products ORDER BY id",
            PRODUCT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;
        Ok(products)
    }

    pub async fn get(&self, id: i64) -> AppResult<Option<CatalogProduct>> {
        let product = sqlx::query_as::<_, CatalogProduct>(&format!(
            "SELECT {} FROM products WHERE id = ?",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(product)
    }

    pub async fn create(&self, new: NewProduct) -> AppResult<CatalogProduct> {
        validate_name(&new.name)?;
        validate_quantity(new.quantity)?;

        let product = sqlx::query_as::<_, CatalogProduct>(&format!(
            "INSERT INTO products (name, quantity, price) VALUES (?, ?, ?) RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(&new.name)
        .bind(new.quantity)
        .bind(new.price)
        .fetch_one(&self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, &new.name))?;

        debug!(id = product.id, product_name = %product.name, "Product created");
        Ok(product)
    }

    /// Apply the fields present in `patch`; a patch id is ignored
    pub async fn update(&self, id: i64, patch: ProductPatch) -> AppResult<CatalogProduct> {
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

        let updated = sqlx::query_as::<_, CatalogProduct>(&format!(
            "UPDATE products SET \
                name = COALESCE(?, name), \
                quantity = COALESCE(?, quantity), \
                price = COALESCE(?, price) \
             WHERE id = ? RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(patch.name.as_deref())
        .bind(patch.quantity)
        .bind(patch.price)
        .bind(id)
        .fetch_optional(&self.pool)
        .await
        .map_err(|e| conflict_on_duplicate(e, patch.name.as_deref().unwrap_or_default()))?;

        let product =
            updated.ok_or_else(|| AppError::not_found(format!("Product {} does not exist", id)))?;
        debug!(id, "Product updated");
        Ok(product)
    }

    pub async fn delete(&self, id: i64) -> AppResult<CatalogProduct> {
        let product = sqlx::query_as::<_, CatalogProduct>(&format!(
            "DELETE FROM products WHERE id = ? RETURNING {}",
            PRODUCT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?
        .ok_or_else(|| AppError::not_found(format!("Product {} does not exist", id)))?;

        debug!(id, product_name = %product.name, "Product deleted");
        Ok(product)
    }

    // ============================================
    // Inventory operations (by product name)
    // ============================================

    /// Add stock; returns the new quantity
    pub async fn increase_quantity(&self, name: &str, amount: i64) -> AppResult<i64> {
        validate_amount(amount)?;

        // SQLite silently turns an overflowing sum into a REAL, so the
        // headroom is checked in the WHERE clause
        let quantity: Option<i64> = sqlx::query_scalar(
            "UPDATE products SET quantity = quantity + ?1 \
             WHERE name = ?2 AND quantity <= ?3 - ?1 RETURNING quantity",
        )
        .bind(amount)
        .bind(name)
        .bind(i64::MAX)
        .fetch_optional(&self.pool)
        .await?;

        match quantity {
            Some(quantity) => Ok(quantity),
            None => match self.check_quantity(name).await? {
                Some(_) => Err(AppError::bad_request("Quantity overflow")),
                None => Err(not_in_inventory(name)),
            },
        }
    }

    /// Remove stock; asking for more than is available leaves stock untouched
    pub async fn decrease_quantity(&self, name: &str, amount: i64) -> AppResult<i64> {
        validate_amount(amount)?;

        let quantity: Option<i64> = sqlx::query_scalar(
            "UPDATE products SET quantity = quantity - ?1 \
             WHERE name = ?2 AND quantity >= ?1 RETURNING quantity",
        )
        .bind(amount)
        .bind(name)
        .fetch_optional(&self.pool)
        .await?;

        if let Some(quantity) = quantity {
            return Ok(quantity);
        }

        match self.check_quantity(name).await? {
            Some(available) => {
                warn!(
                    product_name = name,
                    available,
                    requested = amount,
                    "Not enough quantity to decrease"
                );
                Err(AppError::insufficient_quantity(name, available, amount))
            }
            None => Err(not_in_inventory(name)),
        }
    }

    pub async fn check_quantity(&self, name: &str) -> AppResult<Option<i64>> {
        let quantity = sqlx::query_scalar("SELECT quantity FROM products WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(quantity)
    }

    /// Returns whether a product with that name existed
    pub async fn remove_by_name(&self, name: &str) -> AppResult<bool> {
        let result = sqlx::query("DELETE FROM products WHERE name = ?")
            .bind(name)
            .execute(&self.pool)
            .await?;

        let removed = result.rows_affected() > 0;
        if removed {
            debug!(product_name = name, "Product removed from inventory");
        }
        Ok(removed)
    }
}

/// AUTOINCREMENT keeps deleted ids from being handed out again
async fn create_tables(pool: &SqlitePool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL UNIQUE,
            quantity INTEGER NOT NULL CHECK (quantity >= 0),
            price REAL NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    Ok(())
}

fn conflict_on_duplicate(err: sqlx::Error, name: &str) -> AppError {
    match &err {
        sqlx::Error::Database(db) if db.is_unique_violation() => {
            AppError::conflict(format!("Product '{}' already exists", name))
        }
        _ => err.into(),
    }
}
