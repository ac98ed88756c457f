//! Providers Module - External Data Sources
//!
//! Clients for the services the storefront reads from.

pub mod products;

pub use products::*;
