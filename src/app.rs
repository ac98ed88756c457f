//! Storefront application
//!
//! Built explicitly from `main` with an injected `AppConfig`, then mounted on
//! a presentation surface (any `io::Write`; stdout for the binary).

use serde_json::Value;
use std::io::{self, Write};

use crate::models::config::AppConfig;
use crate::models::types::Product;
use crate::utils::currency::{format_to_cop, COP_CODE};

pub struct App {
    config: AppConfig,
}

impl App {
    pub fn new(config: AppConfig) -> Self {
        Self { config }
    }

    pub fn name(&self) -> &str {
        &self.config.name
    }

    /// Render the greeting and the product listing onto `surface`
    pub fn mount<W: Write>(&self, surface: &mut W, products: &[Product]) -> io::Result<()> {
        writeln!(surface, "Hello {}!", self.config.name)?;

        if products.is_empty() {
            writeln!(surface, "No products available.")?;
            return surface.flush();
        }

        writeln!(surface, "Products (prices in {}):", COP_CODE)?;
        for product in products {
            writeln!(surface, "  {}", render_product(product))?;
        }
        surface.flush()
    }
}

/// One listing line; products are opaque, so every field is optional
fn render_product(product: &Product) -> String {
    let Value::Object(fields) = product else {
        return product.to_string();
    };

    let name = fields
        .get("name")
        .and_then(Value::as_str)
        .unwrap_or("(unnamed)");
    let price = fields
        .get("price")
        .or_else(|| fields.get("precio"))
        .and_then(Value::as_f64);

    match price {
        Some(amount) => format!("{} - {}", name, format_to_cop(amount)),
        None => name.to_string(),
    }
}
