// ── Customer account operations ──

use partshop_api::models::AddressInput;
use partshop_api::{Error, PageRequest};

use super::Storefront;
use super::admin::Paged;
use crate::model::{Address, CustomerOrder, Order};

impl Storefront {
    pub async fn addresses(&self) -> Result<Vec<Address>, Error> {
        let records = self.api().addresses().await?;
        Ok(records.into_iter().map(Address::from).collect())
    }

    pub async fn create_address(&self, input: &AddressInput) -> Result<Address, Error> {
        Ok(self.api().create_address(input).await?.into())
    }

    pub async fn update_address(&self, id: i64, input: &AddressInput) -> Result<Address, Error> {
        Ok(self.api().update_address(id, input).await?.into())
    }

    pub async fn delete_address(&self, id: i64) -> Result<(), Error> {
        self.api().delete_address(id).await
    }

    pub async fn set_default_address(&self, id: i64) -> Result<(), Error> {
        self.api().set_default_address(id).await
    }

    /// Own order history. `page` is 1-based.
    pub async fn my_orders(&self, page: u32, limit: u32) -> Result<Paged<CustomerOrder>, Error> {
        let raw = self.api().my_orders(PageRequest::from_one_based(page, limit)).await?;
        Ok(Paged::from_spring(raw, page, limit))
    }

    /// One of the customer's own orders.
    pub async fn my_order(&self, id: i64) -> Result<Order, Error> {
        self.get_order(id).await
    }
}
