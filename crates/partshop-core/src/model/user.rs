// ── User domain types ──

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use strum::{Display, EnumString};

/// Frontend role. The backend's `CUSTOMER`/`OWNER`/`ADMIN` collapse into
/// these two; admin-vs-owner is deliberately not exposed.
#[derive(
    Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize, Display, EnumString,
)]
#[serde(rename_all = "lowercase")]
#[strum(serialize_all = "lowercase")]
pub enum Role {
    #[default]
    Customer,
    Owner,
}

impl Role {
    pub fn is_owner(self) -> bool {
        matches!(self, Self::Owner)
    }
}

/// Normalized identity of the signed-in principal.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct User {
    pub id: Option<i64>,
    pub email: String,
    /// First and last name joined, or the raw username when both are blank.
    pub name: String,
    pub role: Role,
    pub avatar: Option<String>,
    pub phone: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
}
