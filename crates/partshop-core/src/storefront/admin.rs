// ── Owner admin operations ──
//
// Role-scoped pass-throughs over `/api/admin/*`. Errors always propagate;
// the owner console needs to see every failure. The `*_checked` variants run
// the publish-readiness guard first and never reach the backend when it
// fails.

use serde::{Deserialize, Serialize};
use tracing::info;

use partshop_api::models::{
    CategoryInput, DashboardStats, ImageDetails, ImportReport, OcrPrefillResponse, ProductInput,
    SpringPage, VariantInput,
};
use partshop_api::{Error, PageRequest, Upload};

use super::Storefront;
use crate::convert::saturating_u32;
use crate::model::{AdminOrder, Category, OrderStatus, Product, ProductVariant};
use crate::validation::ensure_publishable;

/// One 1-based page of an admin or account listing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Paged<T> {
    pub items: Vec<T>,
    pub total: u64,
    pub page: u32,
    pub limit: u32,
    pub total_pages: u32,
}

pub type AdminOrderPage = Paged<AdminOrder>;

impl<T> Paged<T> {
    /// Convert a backend page, echoing the caller's 1-based `page` and `limit`.
    pub fn from_spring<R: Into<T>>(raw: SpringPage<R>, page: u32, limit: u32) -> Self {
        Self {
            items: raw.content.into_iter().map(Into::into).collect(),
            total: u64::try_from(raw.total_elements).unwrap_or(0),
            page: page.max(1),
            limit,
            total_pages: saturating_u32(raw.total_pages),
        }
    }

    pub fn has_next(&self) -> bool {
        self.page < self.total_pages
    }
}

impl Storefront {
    // ── Products ─────────────────────────────────────────────────────

    /// All products including inactive ones. `page` is 1-based.
    pub async fn admin_products(
        &self,
        page: u32,
        limit: u32,
        search: Option<&str>,
    ) -> Result<Paged<Product>, Error> {
        let raw = self
            .api()
            .admin_list_products(PageRequest::from_one_based(page, limit), search)
            .await?;
        Ok(Paged::from_spring(raw, page, limit))
    }

    pub async fn admin_product(&self, id: i64) -> Result<Product, Error> {
        Ok(self.api().admin_product(id).await?.into())
    }

    pub async fn create_product(&self, input: &ProductInput) -> Result<Product, Error> {
        let product: Product = self.api().create_product(input).await?.into();
        info!(product_id = product.id, sku = %product.sku, "product created");
        Ok(product)
    }

    /// [`create_product`](Self::create_product) behind the publish guard.
    ///
    /// `category_slug` is the slug of `input.category_id`, used to spot
    /// wheel listings filed by category rather than by `partType`.
    pub async fn create_product_checked(
        &self,
        input: &ProductInput,
        category_slug: Option<&str>,
    ) -> Result<Product, Error> {
        ensure_publishable(input, category_slug)?;
        self.create_product(input).await
    }

    pub async fn update_product(&self, id: i64, input: &ProductInput) -> Result<Product, Error> {
        Ok(self.api().update_product(id, input).await?.into())
    }

    pub async fn update_product_checked(
        &self,
        id: i64,
        input: &ProductInput,
        category_slug: Option<&str>,
    ) -> Result<Product, Error> {
        ensure_publishable(input, category_slug)?;
        self.update_product(id, input).await
    }

    pub async fn delete_product(&self, id: i64) -> Result<(), Error> {
        self.api().delete_product(id).await?;
        info!(product_id = id, "product deleted");
        Ok(())
    }

    pub async fn set_product_active(&self, id: i64, active: bool) -> Result<Product, Error> {
        Ok(self.api().set_product_active(id, active).await?.into())
    }

    // ── Variants ─────────────────────────────────────────────────────

    pub async fn create_variant(
        &self,
        product_id: i64,
        input: &VariantInput,
    ) -> Result<ProductVariant, Error> {
        Ok(self.api().create_variant(product_id, input).await?.into())
    }

    pub async fn update_variant(
        &self,
        product_id: i64,
        variant_id: i64,
        input: &VariantInput,
    ) -> Result<ProductVariant, Error> {
        Ok(self
            .api()
            .update_variant(product_id, variant_id, input)
            .await?
            .into())
    }

    pub async fn delete_variant(&self, product_id: i64, variant_id: i64) -> Result<(), Error> {
        self.api().delete_variant(product_id, variant_id).await
    }

    // ── Images ───────────────────────────────────────────────────────

    pub async fn upload_product_image(
        &self,
        product_id: i64,
        image: Upload,
    ) -> Result<ImageDetails, Error> {
        self.api().upload_product_image(product_id, image).await
    }

    pub async fn delete_product_image(&self, product_id: i64, image_id: i64) -> Result<(), Error> {
        self.api().delete_product_image(product_id, image_id).await
    }

    pub async fn set_main_image(&self, product_id: i64, image_id: i64) -> Result<(), Error> {
        self.api().set_main_image(product_id, image_id).await
    }

    // ── Categories ───────────────────────────────────────────────────

    pub async fn create_category(&self, input: &CategoryInput) -> Result<Category, Error> {
        Ok(self.api().create_category(input).await?.into())
    }

    pub async fn update_category(&self, id: i64, input: &CategoryInput) -> Result<Category, Error> {
        Ok(self.api().update_category(id, input).await?.into())
    }

    pub async fn delete_category(&self, id: i64) -> Result<(), Error> {
        self.api().delete_category(id).await
    }

    // ── Orders ───────────────────────────────────────────────────────

    /// All orders, optionally narrowed to one status. `page` is 1-based.
    pub async fn admin_orders(
        &self,
        page: u32,
        limit: u32,
        status: Option<OrderStatus>,
    ) -> Result<AdminOrderPage, Error> {
        let raw = self
            .api()
            .admin_list_orders(
                PageRequest::from_one_based(page, limit),
                status.map(OrderStatus::as_backend),
            )
            .await?;
        Ok(Paged::from_spring(raw, page, limit))
    }

    pub async fn admin_order(&self, id: i64) -> Result<AdminOrder, Error> {
        Ok(self.api().admin_order(id).await?.into())
    }

    /// Request a status change. Transition rules are the backend's.
    pub async fn update_order_status(
        &self,
        id: i64,
        status: OrderStatus,
    ) -> Result<AdminOrder, Error> {
        let order: AdminOrder = self
            .api()
            .update_order_status(id, status.as_backend())
            .await?
            .into();
        info!(order_id = id, status = %order.order.status, "order status updated");
        Ok(order)
    }

    // ── Dashboard & tooling ──────────────────────────────────────────

    pub async fn dashboard(&self) -> Result<DashboardStats, Error> {
        self.api().dashboard().await
    }

    /// Bulk CSV import. With `dry_run` the backend validates and reports
    /// without writing anything.
    pub async fn import_products(&self, csv: Upload, dry_run: bool) -> Result<ImportReport, Error> {
        let report = self.api().import_products(csv, dry_run).await?;
        info!(
            dry_run,
            rows = report.total_rows,
            created = report.created,
            updated = report.updated,
            errors = report.errors.len(),
            "product import finished"
        );
        Ok(report)
    }

    /// Field suggestions read from a product photo. Advisory only; see
    /// [`OcrPrefillResponse::trusted_fields`].
    pub async fn ocr_prefill(&self, image: Upload) -> Result<OcrPrefillResponse, Error> {
        self.api().ocr_prefill(image).await
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use pretty_assertions::assert_eq;

    use super::*;
    use crate::model::CustomerOrder;

    #[test]
    fn paged_echoes_requested_page() {
        let raw: SpringPage<partshop_api::models::OrderRecord> = serde_json::from_value(
            serde_json::json!({
                "content": [{"id": 4, "status": "PAID", "totalAmount": 12.5}],
                "totalElements": 41,
                "totalPages": 3,
                "number": 1,
                "size": 20
            }),
        )
        .unwrap();
        let page: Paged<CustomerOrder> = Paged::from_spring(raw, 2, 20);
        assert_eq!(page.items.len(), 1);
        assert_eq!((page.total, page.page, page.total_pages), (41, 2, 3));
        assert!(page.has_next());
    }

    #[test]
    fn paged_handles_negative_totals() {
        let raw: SpringPage<partshop_api::models::OrderRecord> =
            serde_json::from_value(serde_json::json!({"totalElements": -1, "totalPages": -1}))
                .unwrap();
        let page: Paged<CustomerOrder> = Paged::from_spring(raw, 0, 20);
        assert_eq!((page.total, page.page, page.total_pages), (0, 1, 0));
        assert!(!page.has_next());
    }
}
