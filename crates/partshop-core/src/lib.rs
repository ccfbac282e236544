//! Domain layer between `partshop-api` and storefront consumers (CLI, UI).
//!
//! - **[`Storefront`]**: cloneable facade over one backend. Groups the
//!   public catalog reads, the auth session, checkout, the customer account
//!   and the owner admin console. Catalog reads degrade to empty results;
//!   everything else propagates [`Error`].
//!
//! - **Domain model** ([`model`]): stable shapes (`Product`, `Category`,
//!   `User`, `Order`, ...) produced from backend wire records by
//!   [`convert`]. Derived values such as availability, image order and
//!   display names are computed here, never trusted from the wire.
//!
//! - **[`ProductFilter`]**: the catalog search surface and its translation
//!   into backend query parameters, including paging and the sort table.
//!
//! - **[`RequestSequencer`]**: per-slot stale-response guard for UIs that
//!   fire overlapping searches.
//!
//! - **[`validation`]**: advisory publish-readiness checks for owner edits.

pub mod config;
pub mod convert;
pub mod filter;
pub mod model;
pub mod sequence;
pub mod storefront;
pub mod validation;

// ── Primary re-exports ──────────────────────────────────────────────
pub use config::{DEFAULT_BASE_URL, StorefrontConfig};
pub use filter::ProductFilter;
pub use sequence::{RequestSequencer, Ticket};
pub use storefront::{AdminOrderPage, Paged, Storefront};
pub use validation::{PublishIssue, ensure_publishable, publish_issues};

pub use partshop_api::{Error, FieldErrors, Session, TlsMode, TransportConfig, Upload};

// Re-export model types at the crate root for ergonomics.
pub use model::{
    Address, AdminOrder, Availability, Category, CustomerOrder, InfoSection, Order, OrderItem,
    OrderStatus, Product, ProductPage, ProductVariant, Role, TopicRoot, User,
};
