// Order, checkout and cart wire types.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use super::account::{AddressInput, AddressRecord};
use super::{lenient_i64, null_as_default};

/// Order as returned by `/api/orders/*`, `/api/checkout/create-order` and
/// the admin order endpoints.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderRecord {
    pub id: i64,
    #[serde(default)]
    pub order_number: Option<String>,
    /// Backend enum name, e.g. `PENDING`, `CHECKOUT_CREATED`.
    #[serde(default, deserialize_with = "null_as_default")]
    pub status: String,
    #[serde(default, alias = "totalAmount")]
    pub total: Option<Decimal>,
    #[serde(default)]
    pub subtotal: Option<Decimal>,
    #[serde(default)]
    pub shipping_cost: Option<Decimal>,
    #[serde(default)]
    pub currency: Option<String>,
    #[serde(default)]
    pub customer_email: Option<String>,
    #[serde(default)]
    pub customer_name: Option<String>,
    #[serde(default)]
    pub user_id: Option<i64>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub items: Vec<OrderItemRecord>,
    #[serde(default)]
    pub shipping_address: Option<AddressRecord>,
    #[serde(default)]
    pub checkout_session_id: Option<String>,
    #[serde(default)]
    pub tracking_number: Option<String>,
    #[serde(default, alias = "createdAt")]
    pub created_date: Option<String>,
    #[serde(default, alias = "updatedAt")]
    pub updated_date: Option<String>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderItemRecord {
    #[serde(default)]
    pub id: Option<i64>,
    #[serde(default)]
    pub product_id: Option<i64>,
    #[serde(default)]
    pub variant_id: Option<i64>,
    #[serde(default)]
    pub sku: Option<String>,
    #[serde(default, alias = "name")]
    pub product_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub quantity: Option<i64>,
    #[serde(default, alias = "price")]
    pub unit_price: Option<Decimal>,
    #[serde(default)]
    pub total_price: Option<Decimal>,
}

/// One line of a new order.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderLine {
    pub product_id: i64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub variant_id: Option<i64>,
    pub quantity: u32,
}

/// `POST /api/checkout/create-order`
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CreateOrderRequest {
    pub items: Vec<OrderLine>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub customer_email: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shipping_address: Option<AddressInput>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// `POST /api/checkout/create-session`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionRequest<'a> {
    pub order_id: i64,
    pub success_url: &'a str,
    pub cancel_url: &'a str,
}

/// Hosted checkout session; the caller redirects the buyer to `url`.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSessionResponse {
    #[serde(default)]
    pub session_id: Option<String>,
    #[serde(alias = "checkoutUrl", alias = "sessionUrl")]
    pub url: String,
}

/// `POST /api/cart/items`
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItemRequest {
    pub product_id: i64,
    pub quantity: u32,
}
