// ── Storefront domain model ──
//
// Stable shapes that callers (CLI, UI layers) depend on. Every type here is
// produced from backend wire records in `crate::convert`; nothing in this
// module knows about HTTP or JSON field names.

pub mod category;
pub mod order;
pub mod product;
pub mod user;

pub use category::{Category, TopicRoot, topic_root_of};
pub use order::{Address, AdminOrder, CustomerOrder, Order, OrderItem, OrderStatus};
pub use product::{Availability, InfoSection, Product, ProductPage, ProductVariant};
pub use user::{Role, User};
