// Backend wire types
//
// Request and response shapes exactly as the storefront backend speaks
// them (camelCase JSON, Spring-style pages). Fields use `#[serde(default)]`
// liberally: the backend omits or nulls fields freely, and product payloads
// vary between the list, detail and admin endpoints. Normalization into a
// stable domain model happens in `partshop-core`, not here.

mod account;
mod admin;
mod auth;
mod catalog;
mod orders;

pub use account::{AddressInput, AddressRecord, PasswordChange, ProfileUpdate};
pub use admin::{
    CategoryInput, DashboardStats, INFO_SECTION_SLOTS, ImportReport, ImportRowError, OcrField,
    OcrPrefillResponse, ProductInput, StatusUpdate, VariantInput,
};
pub use auth::{AuthResponse, ProfileResponse, RegisterRequest};
pub use catalog::{CategoryRecord, ImageDetails, ImageRecord, ProductRecord, VariantRecord};
pub use orders::{
    CartItemRequest, CheckoutSessionRequest, CheckoutSessionResponse, CreateOrderRequest,
    OrderItemRecord, OrderLine, OrderRecord,
};

use serde::de::DeserializeOwned;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use tracing::warn;

// ── Pagination ───────────────────────────────────────────────────────

/// Spring Data page envelope.
///
/// `number` is **0-based**. Frontend-facing page numbers are 1-based; the
/// translation lives in the catalog adapter.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SpringPage<T> {
    /// Records that fail to decode are logged and skipped.
    #[serde(
        default = "Vec::new",
        deserialize_with = "lenient_records",
        bound(deserialize = "T: DeserializeOwned")
    )]
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: i64,
    #[serde(default)]
    pub total_pages: i64,
    #[serde(default)]
    pub number: i64,
    #[serde(default)]
    pub size: i64,
}

// ── Lenient field decoders ───────────────────────────────────────────

/// Accept an integer given as a JSON number (integral or not), a numeric
/// string, or null. Anything else decodes as `None`.
pub(crate) fn lenient_i64<'de, D>(deserializer: D) -> Result<Option<i64>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(value.as_ref().and_then(value_as_i64))
}

fn value_as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(n) => n.as_i64().or_else(|| {
            n.as_f64()
                .filter(|f| f.is_finite())
                .map(|f| f.trunc())
                .and_then(|f| format!("{f:.0}").parse().ok())
        }),
        Value::String(s) => {
            let s = s.trim();
            s.parse::<i64>().ok().or_else(|| {
                s.parse::<f64>()
                    .ok()
                    .filter(|f| f.is_finite())
                    .and_then(|f| format!("{:.0}", f.trunc()).parse().ok())
            })
        }
        _ => None,
    }
}

/// Accept a boolean given as a JSON bool, a `"true"`/`"false"` string
/// (any case), or `0`/`1`. Anything else decodes as `None`.
pub(crate) fn lenient_bool<'de, D>(deserializer: D) -> Result<Option<bool>, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Option::<Value>::deserialize(deserializer)?;
    Ok(match value {
        Some(Value::Bool(b)) => Some(b),
        Some(Value::String(s)) => match s.trim().to_ascii_lowercase().as_str() {
            "true" => Some(true),
            "false" => Some(false),
            _ => None,
        },
        Some(Value::Number(n)) => match n.as_i64() {
            Some(0) => Some(false),
            Some(1) => Some(true),
            _ => None,
        },
        _ => None,
    })
}

/// Decode a JSON array record by record. A null array decodes as empty;
/// entries that do not fit `T` are dropped with a warning.
pub(crate) fn lenient_records<'de, D, T>(deserializer: D) -> Result<Vec<T>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(decode_each(values.unwrap_or_default()))
}

/// Like [`lenient_records`], but keeps a null or missing array as `None`.
pub(crate) fn lenient_optional_records<'de, D, T>(
    deserializer: D,
) -> Result<Option<Vec<T>>, D::Error>
where
    D: Deserializer<'de>,
    T: DeserializeOwned,
{
    let values = Option::<Vec<Value>>::deserialize(deserializer)?;
    Ok(values.map(decode_each))
}

fn decode_each<T: DeserializeOwned>(values: Vec<Value>) -> Vec<T> {
    values
        .into_iter()
        .enumerate()
        .filter_map(|(index, value)| match serde_json::from_value(value) {
            Ok(record) => Some(record),
            Err(e) => {
                warn!(
                    index,
                    error = %e,
                    record = std::any::type_name::<T>(),
                    "skipping undecodable record"
                );
                None
            }
        })
        .collect()
}

/// Treat an explicit `null` like an absent field.
pub(crate) fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use serde_json::json;

    use super::*;

    #[derive(Debug, Deserialize)]
    struct Probe {
        #[serde(default, deserialize_with = "lenient_i64")]
        n: Option<i64>,
    }

    fn probe(v: Value) -> Option<i64> {
        serde_json::from_value::<Probe>(json!({ "n": v })).unwrap().n
    }

    #[test]
    fn lenient_integer_shapes() {
        assert_eq!(probe(json!(7)), Some(7));
        assert_eq!(probe(json!(7.9)), Some(7));
        assert_eq!(probe(json!("12")), Some(12));
        assert_eq!(probe(json!(" 3.0 ")), Some(3));
        assert_eq!(probe(json!(null)), None);
        assert_eq!(probe(json!("lots")), None);
        assert_eq!(probe(json!(true)), None);
    }

    #[test]
    fn lenient_integer_missing_field() {
        let p: Probe = serde_json::from_value(json!({})).unwrap();
        assert_eq!(p.n, None);
    }

    #[test]
    fn lenient_boolean_shapes() {
        #[derive(Deserialize)]
        struct Flag {
            #[serde(default, deserialize_with = "lenient_bool")]
            on: Option<bool>,
        }
        let flag = |v: Value| serde_json::from_value::<Flag>(json!({ "on": v })).unwrap().on;
        assert_eq!(flag(json!(true)), Some(true));
        assert_eq!(flag(json!("true")), Some(true));
        assert_eq!(flag(json!(" FALSE ")), Some(false));
        assert_eq!(flag(json!(1)), Some(true));
        assert_eq!(flag(json!(0)), Some(false));
        assert_eq!(flag(json!("maybe")), None);
        assert_eq!(flag(json!(null)), None);
    }

    #[derive(Debug, Deserialize, PartialEq)]
    struct Row {
        id: i64,
    }

    #[test]
    fn spring_page_skips_records_that_do_not_decode() {
        let page: SpringPage<Row> = serde_json::from_value(json!({
            "content": [{ "id": 1 }, { "id": "two" }, null, { "id": 3 }],
            "totalElements": 4
        }))
        .unwrap();
        assert_eq!(page.content, vec![Row { id: 1 }, Row { id: 3 }]);
        assert_eq!(page.total_elements, 4);
    }

    #[test]
    fn spring_page_generic_over_owned_records() {
        let page: SpringPage<Row> = serde_json::from_str(r#"{"content":[{"id":9}]}"#).unwrap();
        assert_eq!(page.content, vec![Row { id: 9 }]);
        assert_eq!(page.number, 0);
    }

    #[test]
    fn spring_page_with_null_content() {
        let page: SpringPage<Value> =
            serde_json::from_value(json!({ "content": null, "totalElements": 0 })).unwrap();
        assert!(page.content.is_empty());
        assert_eq!(page.total_pages, 0);
    }
}
