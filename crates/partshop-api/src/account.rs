// Customer account endpoints: address book and own orders.

use serde_json::Value;
use tracing::debug;

use crate::admin::PageRequest;
use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{AddressInput, AddressRecord, OrderRecord, SpringPage};

impl ApiClient {
    /// `GET /api/account/addresses`
    pub async fn addresses(&self) -> Result<Vec<AddressRecord>, Error> {
        self.get("/api/account/addresses", &[]).await
    }

    /// `POST /api/account/addresses`
    pub async fn create_address(&self, input: &AddressInput) -> Result<AddressRecord, Error> {
        debug!("creating address");
        self.post("/api/account/addresses", input).await
    }

    /// `PUT /api/account/addresses/{id}`
    pub async fn update_address(
        &self,
        id: i64,
        input: &AddressInput,
    ) -> Result<AddressRecord, Error> {
        debug!(address_id = id, "updating address");
        self.put(&format!("/api/account/addresses/{id}"), input)
            .await
    }

    /// `DELETE /api/account/addresses/{id}`
    pub async fn delete_address(&self, id: i64) -> Result<(), Error> {
        debug!(address_id = id, "deleting address");
        self.delete(&format!("/api/account/addresses/{id}")).await
    }

    /// `PUT /api/account/addresses/{id}/default`
    pub async fn set_default_address(&self, id: i64) -> Result<(), Error> {
        debug!(address_id = id, "setting default address");
        let _: Value = self
            .put(
                &format!("/api/account/addresses/{id}/default"),
                &serde_json::json!({}),
            )
            .await?;
        Ok(())
    }

    /// Orders of the signed-in customer, newest first.
    ///
    /// `GET /api/orders/me?page=&size=`
    pub async fn my_orders(&self, page: PageRequest) -> Result<SpringPage<OrderRecord>, Error> {
        self.get(
            "/api/orders/me",
            &[("page", page.page.to_string()), ("size", page.size.to_string())],
        )
        .await
    }
}
