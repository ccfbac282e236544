// ── Wire-to-domain conversions ──
//
// Bridges raw `partshop_api::models` records into the canonical
// `crate::model` types. Each `From` impl normalizes field names, derives
// values the backend is not trusted to supply (availability, image order,
// display name) and fills defaults for missing optional data.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use indexmap::IndexMap;
use serde_json::{Map, Value};

use partshop_api::models::{
    AddressRecord, AuthResponse, CategoryRecord, INFO_SECTION_SLOTS, ImageRecord, OrderItemRecord,
    OrderRecord, ProductRecord, ProfileResponse, SpringPage, VariantRecord,
};

use crate::model::{
    Address, AdminOrder, Availability, Category, CustomerOrder, InfoSection, Order, OrderItem,
    OrderStatus, Product, ProductPage, ProductVariant, Role, User,
};

/// Currency assumed when the backend omits one.
pub const DEFAULT_CURRENCY: &str = "EUR";

// ── Helpers ────────────────────────────────────────────────────────

/// Map a backend role string onto the two frontend roles.
///
/// Case-insensitive: `OWNER` and `ADMIN` become [`Role::Owner`], anything
/// else (including a missing role) becomes [`Role::Customer`].
pub fn normalize_role(raw: Option<&str>) -> Role {
    match raw.map(str::trim) {
        Some(r) if r.eq_ignore_ascii_case("owner") || r.eq_ignore_ascii_case("admin") => {
            Role::Owner
        }
        _ => Role::Customer,
    }
}

/// Join first and last name with one space, dropping blank parts. Falls
/// back to `username` when both are blank.
pub fn display_name(first: Option<&str>, last: Option<&str>, username: Option<&str>) -> String {
    let joined = [first, last]
        .into_iter()
        .flatten()
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .collect::<Vec<_>>()
        .join(" ");
    if joined.is_empty() {
        username.unwrap_or_default().trim().to_owned()
    } else {
        joined
    }
}

/// Order an image collection into a list of URLs.
///
/// Main-flagged images come first, then ascending numeric position;
/// images without a usable position sort after all positioned ones. The
/// sort is stable, so ties keep their original order. Entries without a
/// URL are dropped. When nothing usable remains, `fallback` (the flat
/// `imageUrl`) is used; with no fallback the result is empty.
pub fn order_images(images: &[ImageRecord], fallback: Option<&str>) -> Vec<String> {
    let mut usable: Vec<&ImageRecord> = images
        .iter()
        .filter(|img| img.url().is_some_and(|u| !u.trim().is_empty()))
        .collect();

    usable.sort_by(|a, b| {
        b.is_main().cmp(&a.is_main()).then_with(|| {
            let pa = a.position().unwrap_or(f64::INFINITY);
            let pb = b.position().unwrap_or(f64::INFINITY);
            pa.total_cmp(&pb)
        })
    });

    let ordered: Vec<String> = usable
        .into_iter()
        .filter_map(ImageRecord::url)
        .map(|u| u.trim().to_owned())
        .collect();

    if ordered.is_empty() {
        fallback
            .map(str::trim)
            .filter(|u| !u.is_empty())
            .map(|u| vec![u.to_owned()])
            .unwrap_or_default()
    } else {
        ordered
    }
}

/// Pull the `infoSection{N}Title/Content/Enabled` keys out of `extra`.
///
/// All thirty possible keys are removed. Only sections explicitly enabled
/// (`true` or `"true"`) with a non-blank title and content are returned,
/// in slot order.
pub fn take_info_sections(extra: &mut Map<String, Value>) -> Vec<InfoSection> {
    let mut sections = Vec::new();
    for slot in 1..=INFO_SECTION_SLOTS {
        let title = extra.remove(&format!("infoSection{slot}Title"));
        let content = extra.remove(&format!("infoSection{slot}Content"));
        let enabled = extra.remove(&format!("infoSection{slot}Enabled"));

        let enabled = match enabled {
            Some(Value::Bool(b)) => b,
            Some(Value::String(s)) => s.trim().eq_ignore_ascii_case("true"),
            _ => false,
        };
        if !enabled {
            continue;
        }

        let text = |v: Option<Value>| match v {
            Some(Value::String(s)) if !s.trim().is_empty() => Some(s.trim().to_owned()),
            _ => None,
        };
        if let (Some(title), Some(content)) = (text(title), text(content)) {
            sections.push(InfoSection { title, content });
        }
    }
    sections
}

/// Parse a backend timestamp.
///
/// Accepts RFC 3339, zone-less `LocalDateTime` text (taken as UTC) and plain
/// dates. Unparseable values are dropped.
pub fn parse_timestamp(raw: Option<&str>) -> Option<DateTime<Utc>> {
    let raw = raw?.trim();
    if raw.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(raw, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .ok()
        .and_then(|d| d.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

/// Variant options arrive as an object or as a string holding one. Scalar
/// values are stringified; nested values and nulls are skipped.
fn variant_options(raw: Option<Value>) -> IndexMap<String, String> {
    let map = match raw {
        Some(Value::Object(map)) => map,
        Some(Value::String(s)) => match serde_json::from_str::<Value>(&s) {
            Ok(Value::Object(map)) => map,
            _ => return IndexMap::new(),
        },
        _ => return IndexMap::new(),
    };
    map.into_iter()
        .filter_map(|(k, v)| {
            let v = match v {
                Value::String(s) => s,
                Value::Number(n) => n.to_string(),
                Value::Bool(b) => b.to_string(),
                _ => return None,
            };
            Some((k, v))
        })
        .collect()
}

fn currency_or_default(raw: Option<String>) -> String {
    raw.map(|c| c.trim().to_ascii_uppercase())
        .filter(|c| !c.is_empty())
        .unwrap_or_else(|| DEFAULT_CURRENCY.to_owned())
}

fn non_blank(raw: Option<String>) -> Option<String> {
    raw.map(|s| s.trim().to_owned()).filter(|s| !s.is_empty())
}

pub(crate) fn saturating_u32(n: i64) -> u32 {
    u32::try_from(n.max(0)).unwrap_or(u32::MAX)
}

// ── Catalog ────────────────────────────────────────────────────────

impl From<VariantRecord> for ProductVariant {
    fn from(v: VariantRecord) -> Self {
        Self {
            id: v.id,
            name: v.name,
            sku: v.sku,
            price: v.price,
            stock_quantity: v.stock_quantity.unwrap_or(0),
            active: v.active.unwrap_or(true),
            default_variant: v.default_variant.unwrap_or(false),
            position: v.position,
            options: variant_options(v.options),
            image_url: non_blank(v.image_url),
        }
    }
}

impl From<ProductRecord> for Product {
    fn from(mut p: ProductRecord) -> Self {
        let stock_quantity = p.stock_quantity.unwrap_or(0);
        let images = order_images(p.images.as_deref().unwrap_or_default(), p.image_url.as_deref());
        let info_sections = take_info_sections(&mut p.extra);

        let mut variants: Vec<ProductVariant> = p
            .variants
            .unwrap_or_default()
            .into_iter()
            .map(ProductVariant::from)
            .collect();
        variants.sort_by_key(|v| (v.position.is_none(), v.position));

        Self {
            id: p.id,
            slug: p.sku.clone(),
            sku: p.sku,
            name: p.name,
            description: non_blank(p.description),
            short_description: non_blank(p.short_description),
            price: p.price,
            compare_at_price: p.compare_at_price,
            currency: currency_or_default(p.currency),
            stock_quantity,
            availability: Availability::from_stock(stock_quantity),
            images,
            variants,
            info_sections,
            category_id: p.category_id,
            category_name: non_blank(p.category_name),
            category_slug: non_blank(p.category_slug),
            brand: non_blank(p.brand),
            condition: non_blank(p.condition),
            quote_only: p.quote_only.unwrap_or(false),
            featured: p.featured.unwrap_or(false),
            active: p.active.unwrap_or(true),
            created_at: parse_timestamp(p.created_date.as_deref()),
            updated_at: parse_timestamp(p.updated_date.as_deref()),
            attributes: p.extra,
        }
    }
}

/// Build a 1-based [`ProductPage`] from a backend page.
///
/// `requested_page` and `limit` echo what the caller asked for, so an
/// out-of-range page still reports where the caller is.
pub fn product_page(raw: SpringPage<ProductRecord>, requested_page: u32, limit: u32) -> ProductPage {
    let products: Vec<Product> = raw.content.into_iter().map(Product::from).collect();
    let total = u64::try_from(raw.total_elements).unwrap_or(0);
    ProductPage {
        total,
        page: requested_page,
        limit,
        total_pages: saturating_u32(raw.total_pages),
        products,
    }
}

impl From<CategoryRecord> for Category {
    fn from(c: CategoryRecord) -> Self {
        Self {
            id: c.id,
            name: c.name,
            slug: c.slug,
            parent_id: c.parent_id,
            description: non_blank(c.description),
            image_url: non_blank(c.image_url),
            position: c.position,
            active: c.active.unwrap_or(true),
        }
    }
}

// ── Identity ───────────────────────────────────────────────────────

impl From<AuthResponse> for User {
    fn from(r: AuthResponse) -> Self {
        let email = r
            .email
            .as_deref()
            .or(r.username.as_deref())
            .unwrap_or_default()
            .trim()
            .to_owned();
        Self {
            id: r.id,
            name: display_name(
                r.first_name.as_deref(),
                r.last_name.as_deref(),
                r.username.as_deref(),
            ),
            email,
            role: normalize_role(r.role.as_deref()),
            avatar: None,
            phone: None,
            created_at: None,
        }
    }
}

impl From<ProfileResponse> for User {
    fn from(r: ProfileResponse) -> Self {
        let email = r
            .email
            .as_deref()
            .or(r.username.as_deref())
            .unwrap_or_default()
            .trim()
            .to_owned();
        Self {
            id: r.id,
            name: display_name(
                r.first_name.as_deref(),
                r.last_name.as_deref(),
                r.username.as_deref(),
            ),
            email,
            role: normalize_role(r.role.as_deref()),
            avatar: non_blank(r.avatar_url),
            phone: non_blank(r.phone),
            created_at: parse_timestamp(r.created_at.as_deref()),
        }
    }
}

// ── Orders ─────────────────────────────────────────────────────────

impl From<AddressRecord> for Address {
    fn from(a: AddressRecord) -> Self {
        Self {
            id: a.id,
            label: non_blank(a.label),
            first_name: a.first_name.unwrap_or_default(),
            last_name: a.last_name.unwrap_or_default(),
            company: non_blank(a.company),
            street: a.street.unwrap_or_default(),
            street2: non_blank(a.street2),
            city: a.city.unwrap_or_default(),
            postal_code: a.postal_code.unwrap_or_default(),
            region: non_blank(a.region),
            country: a.country.unwrap_or_default(),
            phone: non_blank(a.phone),
            is_default: a.is_default.unwrap_or(false),
        }
    }
}

impl From<OrderItemRecord> for OrderItem {
    fn from(i: OrderItemRecord) -> Self {
        Self {
            product_id: i.product_id,
            variant_id: i.variant_id,
            name: i
                .product_name
                .clone()
                .or_else(|| i.sku.clone())
                .unwrap_or_default(),
            sku: i.sku,
            quantity: i.quantity.unwrap_or(0),
            unit_price: i.unit_price,
            total_price: i.total_price,
        }
    }
}

impl From<OrderRecord> for Order {
    fn from(o: OrderRecord) -> Self {
        Self {
            id: o.id,
            order_number: non_blank(o.order_number),
            status: OrderStatus::from_backend(&o.status),
            items: o.items.into_iter().map(OrderItem::from).collect(),
            subtotal: o.subtotal,
            shipping_cost: o.shipping_cost,
            total: o.total,
            currency: currency_or_default(o.currency),
            checkout_session_id: non_blank(o.checkout_session_id),
            created_at: parse_timestamp(o.created_date.as_deref()),
            updated_at: parse_timestamp(o.updated_date.as_deref()),
        }
    }
}

impl From<OrderRecord> for CustomerOrder {
    fn from(o: OrderRecord) -> Self {
        Self {
            id: o.id,
            order_number: non_blank(o.order_number),
            status: OrderStatus::from_backend(&o.status),
            total: o.total,
            currency: currency_or_default(o.currency),
            item_count: o.items.iter().map(|i| i.quantity.unwrap_or(0)).sum(),
            tracking_number: non_blank(o.tracking_number),
            created_at: parse_timestamp(o.created_date.as_deref()),
        }
    }
}

impl From<OrderRecord> for AdminOrder {
    fn from(mut o: OrderRecord) -> Self {
        let customer_email = non_blank(o.customer_email.take());
        let customer_name = non_blank(o.customer_name.take());
        let user_id = o.user_id;
        let shipping_address = o.shipping_address.take().map(Address::from);
        let tracking_number = non_blank(o.tracking_number.take());
        Self {
            order: Order::from(o),
            customer_email,
            customer_name,
            user_id,
            shipping_address,
            tracking_number,
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use chrono::{Datelike, Timelike};
    use pretty_assertions::assert_eq;
    use rust_decimal::Decimal;
    use serde_json::json;

    use super::*;

    fn images(v: Value) -> Vec<ImageRecord> {
        serde_json::from_value(v).unwrap()
    }

    #[test]
    fn role_mapping() {
        assert_eq!(normalize_role(Some("CUSTOMER")), Role::Customer);
        assert_eq!(normalize_role(Some("OWNER")), Role::Owner);
        assert_eq!(normalize_role(Some("ADMIN")), Role::Owner);
        assert_eq!(normalize_role(Some("admin")), Role::Owner);
        assert_eq!(normalize_role(Some("Owner ")), Role::Owner);
        assert_eq!(normalize_role(Some("STAFF")), Role::Customer);
        assert_eq!(normalize_role(None), Role::Customer);
    }

    #[test]
    fn name_join_and_fallback() {
        assert_eq!(display_name(Some("Ada"), Some("Lovelace"), Some("ada")), "Ada Lovelace");
        assert_eq!(display_name(Some("Ada"), Some("  "), Some("ada")), "Ada");
        assert_eq!(display_name(None, Some("Lovelace"), None), "Lovelace");
        assert_eq!(display_name(Some(""), None, Some("ada@x.com")), "ada@x.com");
        assert_eq!(display_name(None, None, None), "");
    }

    #[test]
    fn main_image_wins_regardless_of_position() {
        let raw = images(json!([
            { "url": "b", "isMain": false, "position": 2 },
            { "url": "a", "isMain": true, "position": 5 }
        ]));
        assert_eq!(order_images(&raw, None), vec!["a", "b"]);
    }

    #[test]
    fn positioned_images_before_unpositioned_stable() {
        let raw = images(json!([
            { "url": "u1" },
            { "url": "p3", "position": 3 },
            { "url": "u2", "position": "n/a" },
            { "url": "p1", "position": 1 },
            { "url": "u3", "position": null },
            { "url": "p1b", "position": 1 }
        ]));
        assert_eq!(
            order_images(&raw, None),
            vec!["p1", "p1b", "p3", "u1", "u2", "u3"]
        );
    }

    #[test]
    fn bare_url_images_keep_order() {
        let raw = images(json!(["x.jpg", "y.jpg"]));
        assert_eq!(order_images(&raw, Some("flat.jpg")), vec!["x.jpg", "y.jpg"]);
    }

    #[test]
    fn image_fallbacks() {
        assert_eq!(order_images(&[], Some("flat.jpg")), vec!["flat.jpg"]);
        assert!(order_images(&[], None).is_empty());
        assert!(order_images(&[], Some("  ")).is_empty());
        let no_urls = images(json!([{ "isMain": true }]));
        assert_eq!(order_images(&no_urls, Some("flat.jpg")), vec!["flat.jpg"]);
    }

    #[test]
    fn info_sections_enabled_and_non_empty_only() {
        let mut extra = json!({
            "infoSection1Title": "Fitment",
            "infoSection1Content": "Fits E90",
            "infoSection1Enabled": true,
            "infoSection2Title": "Hidden",
            "infoSection2Content": "Disabled",
            "infoSection2Enabled": false,
            "infoSection3Title": "Blank",
            "infoSection3Content": "   ",
            "infoSection3Enabled": true,
            "infoSection4Title": "No flag",
            "infoSection4Content": "Missing enabled",
            "infoSection10Title": "Shipping",
            "infoSection10Content": "Freight only",
            "infoSection10Enabled": "true",
            "boltPattern": "5x120"
        })
        .as_object()
        .cloned()
        .unwrap();

        let sections = take_info_sections(&mut extra);
        let titles: Vec<_> = sections.iter().map(|s| s.title.as_str()).collect();
        assert_eq!(titles, vec!["Fitment", "Shipping"]);
        assert_eq!(extra.len(), 1);
        assert!(extra.contains_key("boltPattern"));
    }

    #[test]
    fn timestamps() {
        let utc = parse_timestamp(Some("2024-03-01T10:15:30Z")).unwrap();
        assert_eq!((utc.month(), utc.hour()), (3, 10));

        let local = parse_timestamp(Some("2024-03-01T10:15:30.123456")).unwrap();
        assert_eq!(local.minute(), 15);

        let date = parse_timestamp(Some("2024-03-01")).unwrap();
        assert_eq!((date.day(), date.hour()), (1, 0));

        assert!(parse_timestamp(Some("yesterday")).is_none());
        assert!(parse_timestamp(None).is_none());
    }

    #[test]
    fn product_normalization() {
        let record: ProductRecord = serde_json::from_value(json!({
            "id": 7,
            "sku": "WHL-17-5X112",
            "name": "Alloy wheel 17\"",
            "price": 249.90,
            "stockQuantity": 10,
            "availability": "IN_STOCK",
            "imageUrl": "flat.jpg",
            "images": [],
            "boltPattern": "5x112",
            "variants": [
                { "id": 2, "name": "Silver", "sku": "S", "position": 2, "options": { "color": "silver" } },
                { "id": 3, "name": "Any", "sku": "A" },
                { "id": 1, "name": "Black", "sku": "B", "position": 1, "options": "{\"color\":\"black\",\"et\":35}" }
            ],
            "infoSection1Title": "Fitment",
            "infoSection1Content": "VW group",
            "infoSection1Enabled": true,
            "createdDate": "2024-01-05T08:00:00"
        }))
        .unwrap();

        let product = Product::from(record);
        assert_eq!(product.slug, product.sku);
        assert_eq!(product.availability, Availability::LowStock);
        assert_eq!(product.currency, "EUR");
        assert_eq!(product.price, Some(Decimal::new(24990, 2)));
        assert_eq!(product.images, vec!["flat.jpg"]);
        assert_eq!(product.info_sections.len(), 1);
        assert!(product.active);
        assert!(product.created_at.is_some());

        let skus: Vec<_> = product.variants.iter().map(|v| v.sku.as_str()).collect();
        assert_eq!(skus, vec!["B", "S", "A"]);
        assert_eq!(product.variants[0].options["et"], "35");

        // The backend's own availability is not trusted and stays an attribute.
        assert_eq!(product.attributes["availability"], "IN_STOCK");
        assert_eq!(product.attributes["boltPattern"], "5x112");
        assert!(!product.attributes.contains_key("infoSection1Title"));
    }

    #[test]
    fn product_page_translation() {
        let raw: SpringPage<ProductRecord> = serde_json::from_value(json!({
            "content": [{ "id": 1, "sku": "A", "stockQuantity": 0 }],
            "totalElements": 41,
            "totalPages": 3,
            "number": 2,
            "size": 20
        }))
        .unwrap();
        let page = product_page(raw, 3, 20);
        assert_eq!((page.page, page.total, page.total_pages), (3, 41, 3));
        assert_eq!(page.products[0].availability, Availability::OutOfStock);
    }

    #[test]
    fn auth_response_to_user() {
        let resp: AuthResponse = serde_json::from_value(json!({
            "token": "t", "id": 4, "username": "boss@shop.test", "role": "ADMIN"
        }))
        .unwrap();
        let user = User::from(resp);
        assert_eq!(user.role, Role::Owner);
        assert_eq!(user.name, "boss@shop.test");
        assert_eq!(user.email, "boss@shop.test");
    }

    #[test]
    fn admin_order_keeps_buyer_details() {
        let record: OrderRecord = serde_json::from_value(json!({
            "id": 10,
            "status": "SHIPPED",
            "currency": "usd",
            "customerEmail": "ada@x.com",
            "trackingNumber": "1Z999",
            "items": [{ "productName": "Brake pad", "quantity": 2, "unitPrice": 19.5 }]
        }))
        .unwrap();
        let customer = CustomerOrder::from(record.clone());
        assert_eq!(customer.item_count, 2);
        assert_eq!(customer.currency, "USD");

        let admin = AdminOrder::from(record);
        assert_eq!(admin.order.status, OrderStatus::Shipped);
        assert_eq!(admin.customer_email.as_deref(), Some("ada@x.com"));
        assert_eq!(admin.tracking_number.as_deref(), Some("1Z999"));
        assert_eq!(admin.order.items[0].name, "Brake pad");
    }
}
