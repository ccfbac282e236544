// Checkout, order lookup and server cart endpoints.
//
// Payment itself happens on the hosted checkout page; the backend only
// hands us the session and redirect URL.

use serde_json::Value;
use tracing::debug;

use crate::client::{ApiClient, segment};
use crate::error::Error;
use crate::models::{
    CartItemRequest, CheckoutSessionRequest, CheckoutSessionResponse, CreateOrderRequest,
    OrderRecord,
};

impl ApiClient {
    /// `POST /api/checkout/create-order`
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<OrderRecord, Error> {
        debug!(lines = req.items.len(), "creating order");
        self.post("/api/checkout/create-order", req).await
    }

    /// `POST /api/checkout/create-session`
    pub async fn create_checkout_session(
        &self,
        order_id: i64,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSessionResponse, Error> {
        debug!(order_id, "creating checkout session");
        let req = CheckoutSessionRequest {
            order_id,
            success_url,
            cancel_url,
        };
        self.post("/api/checkout/create-session", &req).await
    }

    /// `GET /api/orders/{id}`
    pub async fn order(&self, id: i64) -> Result<OrderRecord, Error> {
        self.get(&format!("/api/orders/{id}"), &[]).await
    }

    /// `GET /api/orders/checkout-session/{sessionId}`
    pub async fn order_by_checkout_session(&self, session_id: &str) -> Result<OrderRecord, Error> {
        self.get(
            &format!("/api/orders/checkout-session/{}", segment(session_id)),
            &[],
        )
        .await
    }

    /// Most recent order of the signed-in customer.
    ///
    /// `GET /api/orders/me/latest`
    pub async fn latest_order(&self) -> Result<OrderRecord, Error> {
        self.get("/api/orders/me/latest", &[]).await
    }

    /// `POST /api/orders/{id}/finalize`
    pub async fn finalize_order(&self, id: i64) -> Result<OrderRecord, Error> {
        debug!(order_id = id, "finalizing order");
        self.post_empty(&format!("/api/orders/{id}/finalize"))
            .await
    }

    /// `DELETE /api/cart`
    pub async fn clear_cart(&self) -> Result<(), Error> {
        debug!("clearing server cart");
        self.delete("/api/cart").await
    }

    /// `POST /api/cart/items`
    pub async fn add_cart_item(&self, product_id: i64, quantity: u32) -> Result<Value, Error> {
        debug!(product_id, quantity, "adding cart item");
        self.post(
            "/api/cart/items",
            &CartItemRequest {
                product_id,
                quantity,
            },
        )
        .await
    }
}
