//! Core Module - Business Logic
//!
//! The product catalog and its stock bookkeeping, in memory or in SQLite.

pub mod backend;
pub mod catalog;
pub mod sqlite;

pub use backend::Catalog;
pub use catalog::*;
pub use sqlite::SqliteCatalog;
