// Catalog wire types: products, images, variants, categories.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{
    lenient_bool, lenient_i64, lenient_optional_records, null_as_default,
};

// ── Product ──────────────────────────────────────────────────────────

/// Product record as returned by `/api/products`, `/api/products/sku/{sku}`
/// and the admin product endpoints.
///
/// The backend puts vehicle, part, tool and custom-work attributes at the
/// top level next to the commerce fields, along with up to ten
/// `infoSection{N}Title/Content/Enabled` trios. We model the commerce
/// fields explicitly; everything else lands in `extra`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sku: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub short_description: Option<String>,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub compare_at_price: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default)]
    pub category_id: Option<i64>,
    #[serde(default)]
    pub category_name: Option<String>,
    #[serde(default)]
    pub category_slug: Option<String>,
    #[serde(default)]
    pub brand: Option<String>,
    #[serde(default)]
    pub condition: Option<String>,
    #[serde(default)]
    pub quote_only: Option<bool>,
    #[serde(default)]
    pub featured: Option<bool>,
    /// Flat single-image field, used when `images` is absent or empty.
    #[serde(default)]
    pub image_url: Option<String>,
    /// Entries that match neither image shape are dropped.
    #[serde(default, deserialize_with = "lenient_optional_records")]
    pub images: Option<Vec<ImageRecord>>,
    #[serde(default, deserialize_with = "lenient_optional_records")]
    pub variants: Option<Vec<VariantRecord>>,
    /// Zone-less `LocalDateTime` text; parsed during normalization.
    #[serde(default, alias = "createdAt")]
    pub created_date: Option<String>,
    #[serde(default, alias = "updatedAt")]
    pub updated_date: Option<String>,
    /// Domain attributes and info-section keys.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── Images ───────────────────────────────────────────────────────────

/// One entry of a product's image collection.
///
/// List endpoints send bare URL strings, the detail and admin endpoints
/// send full records.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ImageRecord {
    Url(String),
    Detailed(ImageDetails),
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageDetails {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, alias = "imageUrl")]
    pub url: Option<String>,
    #[serde(default, alias = "main", deserialize_with = "lenient_bool")]
    pub is_main: Option<bool>,
    /// Usually a number; strings and nulls have been seen in the wild.
    #[serde(default)]
    pub position: Option<Value>,
    #[serde(default)]
    pub alt_text: Option<String>,
}

impl ImageRecord {
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Url(url) => Some(url.as_str()),
            Self::Detailed(details) => details.url.as_deref(),
        }
    }

    pub fn is_main(&self) -> bool {
        match self {
            Self::Url(_) => false,
            Self::Detailed(details) => details.is_main.unwrap_or(false),
        }
    }

    /// Numeric sort position. Missing, non-numeric and non-finite
    /// positions yield `None`.
    pub fn position(&self) -> Option<f64> {
        let Self::Detailed(details) = self else {
            return None;
        };
        match details.position.as_ref()? {
            Value::Number(n) => n.as_f64(),
            Value::String(s) => s.trim().parse::<f64>().ok(),
            _ => None,
        }
        .filter(|p| p.is_finite())
    }
}

// ── Variants ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub sku: String,
    #[serde(default)]
    pub price: Option<Decimal>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub stock_quantity: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
    #[serde(default, alias = "isDefault")]
    pub default_variant: Option<bool>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub position: Option<i64>,
    /// Either a JSON object or a string holding one.
    #[serde(default)]
    pub options: Option<Value>,
    #[serde(default)]
    pub image_url: Option<String>,
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryRecord {
    pub id: i64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub name: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub slug: String,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub image_url: Option<String>,
    #[serde(default, alias = "sortOrder", deserialize_with = "lenient_i64")]
    pub position: Option<i64>,
    #[serde(default)]
    pub active: Option<bool>,
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn product_keeps_domain_attributes_in_extra() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 12,
            "sku": "WHL-17",
            "name": "Alloy wheel",
            "price": 249.9,
            "stockQuantity": "4",
            "boltPattern": "5x112",
            "infoSection1Title": "Fitment",
            "images": ["https://cdn/a.jpg", { "url": "https://cdn/b.jpg", "isMain": true }]
        }))
        .unwrap();

        assert_eq!(record.stock_quantity, Some(4));
        assert_eq!(record.price, Some(Decimal::new(2499, 1)));
        assert_eq!(record.extra["boltPattern"], "5x112");
        assert!(record.extra.contains_key("infoSection1Title"));
        assert!(!record.extra.contains_key("sku"));

        let images = record.images.unwrap();
        assert_eq!(images[0].url(), Some("https://cdn/a.jpg"));
        assert!(!images[0].is_main());
        assert!(images[1].is_main());
    }

    #[test]
    fn product_tolerates_nulls() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 1,
            "sku": null,
            "name": null,
            "images": null,
            "variants": null
        }))
        .unwrap();
        assert!(record.sku.is_empty());
        assert!(record.images.is_none());
    }

    #[test]
    fn odd_image_entries_do_not_sink_the_product() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 5,
            "sku": "CAL-2",
            "images": [null, 42, { "url": "c.jpg" }, { "imageUrl": "d.jpg", "isMain": "true" }],
            "variants": [{ "name": "Red", "price": "n/a" }, { "name": "Blue" }]
        }))
        .unwrap();

        let images = record.images.unwrap();
        assert_eq!(images.len(), 2);
        assert_eq!(images[0].url(), Some("c.jpg"));
        assert!(!images[0].is_main());
        assert_eq!(images[1].url(), Some("d.jpg"));
        assert!(images[1].is_main());

        let variants = record.variants.unwrap();
        assert_eq!(variants.len(), 1);
        assert_eq!(variants[0].name, "Blue");
    }

    #[test]
    fn string_main_flag_is_read() {
        let details: ImageDetails =
            serde_json::from_value(json!({ "url": "a.jpg", "main": "false" })).unwrap();
        assert_eq!(details.is_main, Some(false));
        let details: ImageDetails =
            serde_json::from_value(json!({ "url": "a.jpg", "isMain": "yes please" })).unwrap();
        assert_eq!(details.is_main, None);
    }

    #[test]
    fn image_position_shapes() {
        let at = |p: Value| {
            ImageRecord::Detailed(ImageDetails {
                position: Some(p),
                ..ImageDetails::default()
            })
            .position()
        };
        assert_eq!(at(json!(3)), Some(3.0));
        assert_eq!(at(json!("2")), Some(2.0));
        assert_eq!(at(json!("first")), None);
        assert_eq!(at(json!(null)), None);
        assert_eq!(ImageRecord::Url("x".into()).position(), None);
    }

    #[test]
    fn image_aliases() {
        let image: ImageRecord =
            serde_json::from_value(json!({ "imageUrl": "https://cdn/c.jpg", "main": true }))
                .unwrap();
        assert_eq!(image.url(), Some("https://cdn/c.jpg"));
        assert!(image.is_main());
    }

    #[test]
    fn category_sort_order_alias() {
        let cat: CategoryRecord = serde_json::from_value(json!({
            "id": 3, "name": "Wheels", "slug": "wheels", "parentId": 2, "sortOrder": 4
        }))
        .unwrap();
        assert_eq!(cat.parent_id, Some(2));
        assert_eq!(cat.position, Some(4));
    }
}
