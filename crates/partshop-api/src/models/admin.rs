// Owner-only wire types (`/api/admin/*`).

use indexmap::IndexMap;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::{lenient_i64, null_as_default};

/// Number of info-section slots the backend stores per product.
pub const INFO_SECTION_SLOTS: u8 = 10;

// ── Products ─────────────────────────────────────────────────────────

/// Create/update payload for a product.
///
/// Domain attributes (vehicle, part, tool, custom-work fields) and the
/// flattened info-section keys travel in `attributes`, exactly as the
/// backend expects them at the top level.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProductInput {
    pub sku: String,
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub short_description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub compare_at_price: Option<Decimal>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub currency: Option<String>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub condition: Option<String>,
    #[serde(default)]
    pub quote_only: bool,
    #[serde(default)]
    pub featured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(flatten)]
    pub attributes: Map<String, Value>,
}

impl ProductInput {
    /// Write info-section slot `slot` (1-based). Out-of-range slots are ignored.
    pub fn set_info_section(&mut self, slot: u8, title: &str, content: &str, enabled: bool) {
        if !(1..=INFO_SECTION_SLOTS).contains(&slot) {
            return;
        }
        self.attributes
            .insert(format!("infoSection{slot}Title"), Value::from(title));
        self.attributes
            .insert(format!("infoSection{slot}Content"), Value::from(content));
        self.attributes
            .insert(format!("infoSection{slot}Enabled"), Value::from(enabled));
    }

    /// Non-blank string attribute, if set.
    pub fn attribute_str(&self, key: &str) -> Option<&str> {
        self.attributes
            .get(key)
            .and_then(Value::as_str)
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Whether attribute `key` holds a usable value (non-blank string,
    /// any number, or `true`).
    pub fn has_attribute(&self, key: &str) -> bool {
        match self.attributes.get(key) {
            Some(Value::String(s)) => !s.trim().is_empty(),
            Some(Value::Number(_)) => true,
            Some(Value::Bool(b)) => *b,
            _ => false,
        }
    }
}

// ── Variants ─────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct VariantInput {
    pub name: String,
    pub sku: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<Decimal>,
    #[serde(default)]
    pub stock_quantity: i64,
    #[serde(default)]
    pub active: bool,
    #[serde(default)]
    pub default_variant: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default)]
    pub options: IndexMap<String, String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
}

// ── Categories ───────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryInput {
    pub name: String,
    pub slug: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parent_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub position: Option<i64>,
    #[serde(default = "default_true")]
    pub active: bool,
}

fn default_true() -> bool {
    true
}

// ── Orders ───────────────────────────────────────────────────────────

/// `PATCH /api/admin/orders/{id}/status`. `status` is the backend enum name.
#[derive(Debug, Clone, Serialize)]
pub struct StatusUpdate {
    pub status: String,
}

// ── Dashboard ────────────────────────────────────────────────────────

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_products: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub active_products: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub total_orders: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub pending_orders: Option<i64>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub low_stock_products: Option<i64>,
    #[serde(default, alias = "revenue")]
    pub total_revenue: Option<Decimal>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

// ── CSV import ───────────────────────────────────────────────────────

/// Row-level outcome of `POST /api/admin/products/import`.
///
/// With `dryRun=true` the backend validates every row and reports what it
/// would do without writing anything; `created`/`updated` are then
/// projections.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportReport {
    #[serde(default)]
    pub total_rows: u64,
    #[serde(default)]
    pub created: u64,
    #[serde(default)]
    pub updated: u64,
    #[serde(default)]
    pub skipped: u64,
    #[serde(default)]
    pub dry_run: bool,
    #[serde(default, deserialize_with = "null_as_default")]
    pub errors: Vec<ImportRowError>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImportRowError {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub row: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub message: String,
    #[serde(default)]
    pub field: Option<String>,
}

impl ImportReport {
    pub fn has_errors(&self) -> bool {
        !self.errors.is_empty()
    }
}

// ── OCR prefill ──────────────────────────────────────────────────────

/// Fields extracted from a photographed label or spec sheet.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OcrPrefillResponse {
    #[serde(default, deserialize_with = "null_as_default")]
    pub fields: IndexMap<String, OcrField>,
    #[serde(default)]
    pub raw_text: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OcrField {
    #[serde(default)]
    pub value: Value,
    /// 0.0 to 1.0. Missing confidence counts as zero.
    #[serde(default)]
    pub confidence: f64,
}

impl OcrPrefillResponse {
    /// Fields whose confidence is at least `min_confidence` and whose value
    /// is not null or blank, in the order the backend sent them.
    ///
    /// Advisory only: the owner still reviews every prefilled value.
    pub fn trusted_fields(&self, min_confidence: f64) -> IndexMap<&str, &Value> {
        self.fields
            .iter()
            .filter(|(_, field)| field.confidence >= min_confidence)
            .filter(|(_, field)| match &field.value {
                Value::Null => false,
                Value::String(s) => !s.trim().is_empty(),
                _ => true,
            })
            .map(|(name, field)| (name.as_str(), &field.value))
            .collect()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;
    use serde_json::json;

    use super::*;

    #[test]
    fn product_input_flattens_attributes_and_sections() {
        let mut input = ProductInput {
            sku: "WHL-17".into(),
            name: "Alloy wheel".into(),
            active: true,
            condition: Some("NEW".into()),
            ..ProductInput::default()
        };
        input
            .attributes
            .insert("boltPattern".into(), json!("5x112"));
        input.set_info_section(2, "Fitment", "Fits most sedans", true);
        input.set_info_section(11, "ignored", "ignored", true);

        let body = serde_json::to_value(&input).unwrap();
        assert_eq!(body["boltPattern"], "5x112");
        assert_eq!(body["infoSection2Title"], "Fitment");
        assert_eq!(body["infoSection2Enabled"], true);
        assert!(body.get("infoSection11Title").is_none());
        assert!(body.get("price").is_none());
        assert_eq!(body["condition"], "NEW");
    }

    #[test]
    fn attribute_presence() {
        let mut input = ProductInput::default();
        input.attributes.insert("wheelOffset".into(), json!(35));
        input.attributes.insert("wheelWidth".into(), json!("  "));
        assert!(input.has_attribute("wheelOffset"));
        assert!(!input.has_attribute("wheelWidth"));
        assert!(!input.has_attribute("boltPattern"));
        assert_eq!(input.attribute_str("wheelWidth"), None);
    }

    #[test]
    fn trusted_fields_filters_and_keeps_order() {
        // Parsed from text: `json!` would sort the keys before they reach the map.
        let resp: OcrPrefillResponse = serde_json::from_str(
            r#"{
                "fields": {
                    "brand": { "value": "BBS", "confidence": 0.97 },
                    "wheelWidth": { "value": "8.5", "confidence": 0.42 },
                    "boltPattern": { "value": "5x120", "confidence": 0.9 },
                    "sku": { "value": "", "confidence": 0.99 }
                },
                "rawText": "BBS 8.5Jx18 5x120"
            }"#,
        )
        .unwrap();

        let trusted = resp.trusted_fields(0.8);
        let keys: Vec<_> = trusted.keys().copied().collect();
        assert_eq!(keys, vec!["brand", "boltPattern"]);
    }

    #[test]
    fn import_report_tolerates_sparse_body() {
        let report: ImportReport = serde_json::from_value(json!({
            "totalRows": 3,
            "dryRun": true,
            "errors": [{ "row": "2", "message": "price must be positive", "field": "price" }]
        }))
        .unwrap();
        assert!(report.dry_run);
        assert!(report.has_errors());
        assert_eq!(report.errors[0].row, Some(2));
        assert_eq!(report.created, 0);
    }
}
