// ── Product domain types ──

use chrono::{DateTime, Utc};
use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use strum::Display;

/// Stock-derived availability. Never taken from the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Display)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "snake_case")]
pub enum Availability {
    InStock,
    LowStock,
    OutOfStock,
    /// Part of the vocabulary but never derived from stock.
    PreOrder,
}

/// Stock above this is `InStock`; 1 up to and including it is `LowStock`.
pub const LOW_STOCK_THRESHOLD: i64 = 10;

impl Availability {
    pub fn from_stock(stock_quantity: i64) -> Self {
        if stock_quantity > LOW_STOCK_THRESHOLD {
            Self::InStock
        } else if stock_quantity > 0 {
            Self::LowStock
        } else {
            Self::OutOfStock
        }
    }
}

/// Enabled, non-empty supplementary text block.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InfoSection {
    pub title: String,
    pub content: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: Option<i64>,
    pub name: String,
    pub sku: String,
    /// Overrides the product price when set.
    pub price: Option<Decimal>,
    pub stock_quantity: i64,
    pub active: bool,
    pub default_variant: bool,
    pub position: Option<i64>,
    pub options: IndexMap<String, String>,
    pub image_url: Option<String>,
}

/// Catalog entity.
///
/// `slug` always equals `sku`: the detail endpoint is keyed by SKU, so a
/// distinct slug would 404 on navigation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,
    pub sku: String,
    pub slug: String,
    pub name: String,
    pub description: Option<String>,
    pub short_description: Option<String>,
    pub price: Option<Decimal>,
    pub compare_at_price: Option<Decimal>,
    pub currency: String,
    pub stock_quantity: i64,
    pub availability: Availability,
    /// Main image first, then by position. Empty means "no photo".
    pub images: Vec<String>,
    pub variants: Vec<ProductVariant>,
    pub info_sections: Vec<InfoSection>,
    pub category_id: Option<i64>,
    pub category_name: Option<String>,
    pub category_slug: Option<String>,
    pub brand: Option<String>,
    pub condition: Option<String>,
    /// Cannot be added to the cart; buyers request a quote instead.
    pub quote_only: bool,
    pub featured: bool,
    pub active: bool,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
    /// Vehicle, part, tool and custom-work attributes, as sent.
    pub attributes: Map<String, Value>,
}

impl Product {
    pub fn primary_image(&self) -> Option<&str> {
        self.images.first().map(String::as_str)
    }

    pub fn default_variant(&self) -> Option<&ProductVariant> {
        self.variants
            .iter()
            .find(|v| v.default_variant)
            .or_else(|| self.variants.first())
    }

    /// Whether the product can go straight into the cart.
    pub fn is_purchasable(&self) -> bool {
        self.active && !self.quote_only && self.availability != Availability::OutOfStock
    }

    /// Discount relative to `compare_at_price`, if the product is on sale.
    pub fn is_on_sale(&self) -> bool {
        matches!((self.price, self.compare_at_price), (Some(p), Some(c)) if c > p)
    }
}

/// One page of catalog results. `page` is 1-based.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductPage {
    pub products: Vec<Product>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

impl ProductPage {
    /// Well-formed page with no results.
    pub fn empty(page: u32, limit: u32) -> Self {
        Self {
            products: Vec::new(),
            total: 0,
            page,
            limit,
            total_pages: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn availability_thresholds() {
        assert_eq!(Availability::from_stock(-3), Availability::OutOfStock);
        assert_eq!(Availability::from_stock(0), Availability::OutOfStock);
        assert_eq!(Availability::from_stock(1), Availability::LowStock);
        assert_eq!(Availability::from_stock(5), Availability::LowStock);
        assert_eq!(Availability::from_stock(10), Availability::LowStock);
        assert_eq!(Availability::from_stock(11), Availability::InStock);
    }

    #[test]
    fn availability_wire_names() {
        assert_eq!(Availability::OutOfStock.to_string(), "out_of_stock");
        assert_eq!(
            serde_json::to_value(Availability::LowStock).ok(),
            Some(Value::from("low_stock"))
        );
    }

    #[test]
    fn empty_page_shape() {
        let page = ProductPage::empty(1, 20);
        assert!(page.is_empty());
        assert_eq!((page.total, page.total_pages), (0, 0));
        assert!(!page.has_next());
    }
}
