// ── Order domain types ──

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use strum::{EnumIter, EnumString, IntoStaticStr};

/// Backend-reported order status.
///
/// The client only displays status and submits requested transitions; it
/// never computes one. Unrecognised backend values map to `Unknown` so a
/// single odd record does not break a listing.
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    EnumString,
    IntoStaticStr,
    EnumIter,
)]
#[serde(rename_all = "snake_case")]
#[strum(serialize_all = "SCREAMING_SNAKE_CASE", ascii_case_insensitive)]
pub enum OrderStatus {
    Pending,
    Confirmed,
    CheckoutCreated,
    Paid,
    Processing,
    Shipped,
    Delivered,
    Failed,
    Cancelled,
    Refunded,
    Unknown,
}

impl OrderStatus {
    /// Parse the backend enum name (`CHECKOUT_CREATED`, `paid`, ...).
    pub fn from_backend(raw: &str) -> Self {
        raw.trim().parse().unwrap_or(Self::Unknown)
    }

    /// Backend enum name, as sent in status update requests.
    pub fn as_backend(self) -> &'static str {
        self.into()
    }

    /// No further transitions are expected.
    pub fn is_terminal(self) -> bool {
        matches!(
            self,
            Self::Delivered | Self::Failed | Self::Cancelled | Self::Refunded
        )
    }
}

impl std::fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.as_backend().to_ascii_lowercase())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Address {
    pub id: i64,
    pub label: Option<String>,
    pub first_name: String,
    pub last_name: String,
    pub company: Option<String>,
    pub street: String,
    pub street2: Option<String>,
    pub city: String,
    pub postal_code: String,
    pub region: Option<String>,
    pub country: String,
    pub phone: Option<String>,
    pub is_default: bool,
}

impl Address {
    /// Single-line rendering for listings.
    pub fn one_line(&self) -> String {
        [
            Some(self.street.as_str()),
            self.street2.as_deref(),
            Some(self.postal_code.as_str()),
            Some(self.city.as_str()),
            Some(self.country.as_str()),
        ]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(", ")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderItem {
    pub product_id: Option<i64>,
    pub variant_id: Option<i64>,
    pub sku: Option<String>,
    pub name: String,
    pub quantity: i64,
    pub unit_price: Option<Decimal>,
    pub total_price: Option<Decimal>,
}

/// Order as seen from checkout and order lookup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_number: Option<String>,
    pub status: OrderStatus,
    pub items: Vec<OrderItem>,
    pub subtotal: Option<Decimal>,
    pub shipping_cost: Option<Decimal>,
    pub total: Option<Decimal>,
    pub currency: String,
    pub checkout_session_id: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

/// Entry of a customer's own order history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CustomerOrder {
    pub id: i64,
    pub order_number: Option<String>,
    pub status: OrderStatus,
    pub total: Option<Decimal>,
    pub currency: String,
    pub item_count: i64,
    pub tracking_number: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}

/// Order as the shop owner sees it, with buyer details.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AdminOrder {
    #[serde(flatten)]
    pub order: Order,
    pub customer_email: Option<String>,
    pub customer_name: Option<String>,
    pub user_id: Option<i64>,
    pub shipping_address: Option<Address>,
    pub tracking_number: Option<String>,
}
