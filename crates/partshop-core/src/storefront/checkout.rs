// ── Checkout, orders and server cart ──

use tracing::info;

use partshop_api::Error;
use partshop_api::models::{CheckoutSessionResponse, CreateOrderRequest};

use super::Storefront;
use crate::model::Order;

impl Storefront {
    pub async fn create_order(&self, req: &CreateOrderRequest) -> Result<Order, Error> {
        let order: Order = self.api().create_order(req).await?.into();
        info!(order_id = order.id, "order created");
        Ok(order)
    }

    /// Start hosted checkout for `order_id`. The caller redirects the buyer
    /// to the returned `url`.
    pub async fn create_checkout_session(
        &self,
        order_id: i64,
        success_url: &str,
        cancel_url: &str,
    ) -> Result<CheckoutSessionResponse, Error> {
        self.api()
            .create_checkout_session(order_id, success_url, cancel_url)
            .await
    }

    pub async fn get_order(&self, id: i64) -> Result<Order, Error> {
        Ok(self.api().order(id).await?.into())
    }

    /// Order behind a hosted checkout session (the return-URL lookup).
    pub async fn get_order_by_checkout_session(&self, session_id: &str) -> Result<Order, Error> {
        Ok(self
            .api()
            .order_by_checkout_session(session_id)
            .await?
            .into())
    }

    /// Most recent order of the signed-in customer; `None` if there is none.
    pub async fn latest_order(&self) -> Result<Option<Order>, Error> {
        match self.api().latest_order().await {
            Ok(record) => Ok(Some(record.into())),
            Err(err) if err.is_not_found() => Ok(None),
            Err(err) => Err(err),
        }
    }

    pub async fn finalize_order(&self, id: i64) -> Result<Order, Error> {
        Ok(self.api().finalize_order(id).await?.into())
    }

    pub async fn clear_cart(&self) -> Result<(), Error> {
        self.api().clear_cart().await
    }

    pub async fn add_cart_item(&self, product_id: i64, quantity: u32) -> Result<(), Error> {
        self.api().add_cart_item(product_id, quantity).await?;
        Ok(())
    }
}
