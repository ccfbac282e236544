#![allow(clippy::unwrap_used)]
// Integration tests for the `Storefront` facade using wiremock.

use pretty_assertions::assert_eq;
use secrecy::SecretString;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use partshop_api::models::ProductInput;
use partshop_core::{
    Availability, OrderStatus, ProductFilter, Role, Storefront, StorefrontConfig, TopicRoot,
};

// ── Helpers ─────────────────────────────────────────────────────────

async fn setup() -> (MockServer, Storefront) {
    let server = MockServer::start().await;
    let config = StorefrontConfig::single_host(Url::parse(&server.uri()).unwrap());
    let shop = Storefront::new(&config).unwrap();
    (server, shop)
}

fn secret(s: &str) -> SecretString {
    SecretString::from(s.to_owned())
}

fn filter(page: u32) -> ProductFilter {
    ProductFilter {
        page: Some(page),
        limit: Some(12),
        ..ProductFilter::default()
    }
}

fn product_page_body() -> serde_json::Value {
    json!({
        "content": [{
            "id": 7,
            "sku": "E46-RIM-17",
            "name": "Style 44 rim",
            "price": 149.5,
            "stockQuantity": 10,
            "images": [
                { "url": "/img/b.jpg", "position": 2 },
                { "url": "/img/a.jpg", "isMain": true, "position": 5 }
            ]
        }],
        "totalElements": 25,
        "totalPages": 3,
        "number": 2,
        "size": 12
    })
}

// ── Catalog ─────────────────────────────────────────────────────────

#[tokio::test]
async fn test_first_page_maps_to_backend_page_zero() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "0"))
        .and(query_param("size", "12"))
        .and(query_param("sortBy", "createdDate"))
        .and(query_param("sortDir", "asc"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "content": [] })))
        .expect(1)
        .mount(&server)
        .await;

    let page = shop.fetch_products(&filter(1)).await;
    assert!(page.is_empty());
    assert_eq!(page.page, 1);
}

#[tokio::test]
async fn test_third_page_is_normalized() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .and(query_param("page", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(product_page_body()))
        .expect(1)
        .mount(&server)
        .await;

    let page = shop.fetch_products(&filter(3)).await;
    assert_eq!((page.page, page.limit, page.total, page.total_pages), (3, 12, 25, 3));
    assert!(!page.has_next());

    let product = &page.products[0];
    assert_eq!(product.slug, "E46-RIM-17");
    assert_eq!(product.availability, Availability::LowStock);
    assert_eq!(product.images, vec!["/img/a.jpg", "/img/b.jpg"]);
    assert_eq!(product.currency, "EUR");
}

#[tokio::test]
async fn test_odd_records_do_not_empty_the_page() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [
                { "id": 1, "sku": "GOOD-1", "name": "Brake pad", "price": 40 },
                {
                    "id": 2,
                    "sku": "FLAG-2",
                    "name": "Caliper",
                    "images": [
                        { "url": "/img/x.jpg", "position": 1 },
                        { "url": "/img/m.jpg", "isMain": "true" }
                    ]
                },
                { "id": 3, "sku": "NULL-3", "name": "Rotor", "images": [null, { "url": "c.jpg" }] },
                { "id": "not-a-number", "sku": "BAD-4" }
            ],
            "totalElements": 4,
            "totalPages": 1,
            "number": 0,
            "size": 12
        })))
        .mount(&server)
        .await;

    let page = shop.fetch_products(&filter(1)).await;
    let skus: Vec<_> = page.products.iter().map(|p| p.sku.as_str()).collect();
    assert_eq!(skus, vec!["GOOD-1", "FLAG-2", "NULL-3"]);
    assert_eq!(page.total, 4);
    assert_eq!(page.products[1].images, vec!["/img/m.jpg", "/img/x.jpg"]);
    assert_eq!(page.products[2].images, vec!["c.jpg"]);
}

#[tokio::test]
async fn test_unauthorized_listing_degrades_to_empty_page() {
    let (server, shop) = setup().await;
    shop.session().set_token("stale");

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    let page = shop.fetch_products(&filter(2)).await;
    assert!(page.is_empty());
    assert_eq!((page.page, page.limit, page.total), (2, 12, 0));
    assert!(!shop.is_authenticated());
}

#[tokio::test]
async fn test_server_error_listing_degrades_to_empty_page() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    let page = shop.fetch_products(&ProductFilter::default()).await;
    assert!(page.is_empty());
    assert_eq!((page.page, page.limit), (1, 20));
}

#[tokio::test]
async fn test_missing_product_is_none() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/sku/NOPE-1"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(shop.fetch_product_by_slug("NOPE-1").await.unwrap().is_none());
}

#[tokio::test]
async fn test_product_lookup_server_error_propagates() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/sku/E46-RIM-17"))
        .respond_with(ResponseTemplate::new(503).set_body_json(json!({ "message": "down" })))
        .mount(&server)
        .await;

    let err = shop.fetch_product_by_slug("E46-RIM-17").await.unwrap_err();
    assert_eq!(err.status(), 503);
    assert_eq!(err.message(), "down");
}

#[tokio::test]
async fn test_brands_are_trimmed_and_blank_dropped() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/products/brands"))
        .and(query_param("rootCategoryId", "2"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([" BBS ", "", "OZ"])))
        .mount(&server)
        .await;

    assert_eq!(shop.fetch_brands(Some(2)).await, vec!["BBS", "OZ"]);
}

#[tokio::test]
async fn test_topic_root_resolved_from_category_tree() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/categories"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!([
            { "id": 1, "name": "Parts", "slug": "parts" },
            { "id": 5, "name": "Wheels", "slug": "wheels", "parentId": 1 },
            { "id": 9, "name": "Rims", "slug": "rims", "parentId": 5 }
        ])))
        .mount(&server)
        .await;

    assert_eq!(shop.fetch_topic_root("rims").await, Some(TopicRoot::Parts));
    assert_eq!(shop.fetch_topic_root("unknown").await, None);
}

// ── Auth ────────────────────────────────────────────────────────────

#[tokio::test]
async fn test_login_falls_back_to_owner_and_normalizes_role() {
    let (server, shop) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(ResponseTemplate::new(401))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/owner/login"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "token": "owner-tok",
            "email": "boss@shop.test",
            "firstName": "Ana",
            "lastName": "",
            "role": "ADMIN"
        })))
        .expect(1)
        .mount(&server)
        .await;

    let user = shop
        .login("boss@shop.test", &secret("pw"))
        .await
        .unwrap();

    assert_eq!(user.role, Role::Owner);
    assert_eq!(user.name, "Ana");
    assert!(shop.is_authenticated());
}

#[tokio::test]
async fn test_login_prefers_owner_error_when_both_fail() {
    let (server, shop) = setup().await;

    Mock::given(method("POST"))
        .and(path("/api/auth/login"))
        .respond_with(
            ResponseTemplate::new(401).set_body_json(json!({ "message": "customer says no" })),
        )
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/api/auth/owner/login"))
        .respond_with(
            ResponseTemplate::new(401)
                .set_body_json(json!({ "message": "Invalid email or password" })),
        )
        .mount(&server)
        .await;

    let err = shop.login("x@shop.test", &secret("bad")).await.unwrap_err();
    assert_eq!(err.status(), 401);
    assert_eq!(err.message(), "Invalid email or password");
    assert!(!shop.is_authenticated());
}

#[tokio::test]
async fn test_current_user_is_none_when_unauthorized() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(401))
        .mount(&server)
        .await;

    assert!(shop.current_user().await.unwrap().is_none());
}

#[tokio::test]
async fn test_current_user_other_errors_propagate() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/auth/profile"))
        .respond_with(ResponseTemplate::new(500))
        .mount(&server)
        .await;

    assert_eq!(shop.current_user().await.unwrap_err().status(), 500);
}

#[tokio::test]
async fn test_logout_clears_token_even_when_backend_fails() {
    let (server, shop) = setup().await;
    shop.session().set_token("tok");

    Mock::given(method("POST"))
        .and(path("/api/auth/logout"))
        .respond_with(ResponseTemplate::new(500))
        .expect(1)
        .mount(&server)
        .await;

    shop.logout().await;
    assert!(!shop.is_authenticated());
}

// ── Checkout ────────────────────────────────────────────────────────

#[tokio::test]
async fn test_latest_order_missing_is_none() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/me/latest"))
        .respond_with(ResponseTemplate::new(404))
        .mount(&server)
        .await;

    assert!(shop.latest_order().await.unwrap().is_none());
}

#[tokio::test]
async fn test_order_by_checkout_session_is_normalized() {
    let (server, shop) = setup().await;

    Mock::given(method("GET"))
        .and(path("/api/orders/checkout-session/cs_123"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 31,
            "status": "CHECKOUT_CREATED",
            "totalAmount": 99.9,
            "currency": "usd",
            "items": [{ "productId": 7, "name": "Style 44 rim", "quantity": 2 }]
        })))
        .mount(&server)
        .await;

    let order = shop.get_order_by_checkout_session("cs_123").await.unwrap();
    assert_eq!(order.id, 31);
    assert_eq!(order.status, OrderStatus::CheckoutCreated);
    assert_eq!(order.currency, "USD");
    assert_eq!(order.items.len(), 1);
}

// ── Admin ───────────────────────────────────────────────────────────

#[tokio::test]
async fn test_checked_create_rejects_before_sending() {
    let (server, shop) = setup().await;
    shop.session().set_token("owner");

    let input = ProductInput {
        sku: "RIM-1".into(),
        name: "Rim".into(),
        active: true,
        ..ProductInput::default()
    };

    let err = shop
        .create_product_checked(&input, Some("wheels"))
        .await
        .unwrap_err();

    assert_eq!(err.status(), 400);
    let fields = err.field_errors().unwrap();
    assert!(fields.contains_key("condition"));
    assert!(fields.contains_key("boltPattern"));
    assert!(server.received_requests().await.unwrap().is_empty());
}

#[tokio::test]
async fn test_admin_orders_translate_page_and_status() {
    let (server, shop) = setup().await;
    shop.session().set_token("owner");

    Mock::given(method("GET"))
        .and(path("/api/admin/orders"))
        .and(query_param("page", "1"))
        .and(query_param("size", "10"))
        .and(query_param("status", "PAID"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "content": [{
                "id": 3,
                "status": "PAID",
                "customerEmail": "buyer@shop.test",
                "total": 20
            }],
            "totalElements": 11,
            "totalPages": 2
        })))
        .expect(1)
        .mount(&server)
        .await;

    let page = shop
        .admin_orders(2, 10, Some(OrderStatus::Paid))
        .await
        .unwrap();

    assert_eq!((page.page, page.total, page.total_pages), (2, 11, 2));
    assert_eq!(page.items[0].customer_email.as_deref(), Some("buyer@shop.test"));
    assert_eq!(page.items[0].order.status, OrderStatus::Paid);
}
