// Owner-only endpoints (`/api/admin/*`).
//
// Thin pass-throughs: payloads go out as given and errors propagate
// unchanged. Publish-readiness checks live one layer up.

use serde_json::{Value, json};
use tracing::debug;

use crate::client::ApiClient;
use crate::error::Error;
use crate::models::{
    CategoryInput, CategoryRecord, DashboardStats, ImportReport, ImageDetails, OcrPrefillResponse,
    OrderRecord, ProductInput, ProductRecord, SpringPage, StatusUpdate, VariantInput,
    VariantRecord,
};
use crate::upload::Upload;

/// 0-based page request for admin listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageRequest {
    pub page: u32,
    pub size: u32,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self { page: 0, size: 20 }
    }
}

impl PageRequest {
    /// From a 1-based page number as shown to users. Page 0 is treated as 1.
    pub fn from_one_based(page: u32, size: u32) -> Self {
        Self {
            page: page.saturating_sub(1),
            size: size.max(1),
        }
    }

    fn query(self) -> Vec<(&'static str, String)> {
        vec![("page", self.page.to_string()), ("size", self.size.to_string())]
    }
}

impl ApiClient {
    // ── Products ─────────────────────────────────────────────────────

    /// `GET /api/admin/products?page=&size=&search=`
    ///
    /// Unlike the public listing this includes inactive products.
    pub async fn admin_list_products(
        &self,
        page: PageRequest,
        search: Option<&str>,
    ) -> Result<SpringPage<ProductRecord>, Error> {
        let mut query = page.query();
        if let Some(search) = search.map(str::trim).filter(|s| !s.is_empty()) {
            query.push(("search", search.to_owned()));
        }
        self.get("/api/admin/products", &query).await
    }

    /// `GET /api/admin/products/{id}`
    pub async fn admin_product(&self, id: i64) -> Result<ProductRecord, Error> {
        self.get(&format!("/api/admin/products/{id}"), &[]).await
    }

    /// `POST /api/admin/products`
    pub async fn create_product(&self, input: &ProductInput) -> Result<ProductRecord, Error> {
        debug!(sku = %input.sku, "creating product");
        self.post("/api/admin/products", input).await
    }

    /// `PUT /api/admin/products/{id}`
    pub async fn update_product(
        &self,
        id: i64,
        input: &ProductInput,
    ) -> Result<ProductRecord, Error> {
        debug!(product_id = id, "updating product");
        self.put(&format!("/api/admin/products/{id}"), input).await
    }

    /// `DELETE /api/admin/products/{id}`
    pub async fn delete_product(&self, id: i64) -> Result<(), Error> {
        debug!(product_id = id, "deleting product");
        self.delete(&format!("/api/admin/products/{id}")).await
    }

    /// `PATCH /api/admin/products/{id}/active`
    pub async fn set_product_active(&self, id: i64, active: bool) -> Result<ProductRecord, Error> {
        debug!(product_id = id, active, "toggling product visibility");
        self.patch(
            &format!("/api/admin/products/{id}/active"),
            &json!({ "active": active }),
        )
        .await
    }

    // ── Variants ─────────────────────────────────────────────────────

    /// `POST /api/admin/products/{id}/variants`
    pub async fn create_variant(
        &self,
        product_id: i64,
        input: &VariantInput,
    ) -> Result<VariantRecord, Error> {
        debug!(product_id, sku = %input.sku, "creating variant");
        self.post(&format!("/api/admin/products/{product_id}/variants"), input)
            .await
    }

    /// `PUT /api/admin/products/{id}/variants/{variantId}`
    pub async fn update_variant(
        &self,
        product_id: i64,
        variant_id: i64,
        input: &VariantInput,
    ) -> Result<VariantRecord, Error> {
        debug!(product_id, variant_id, "updating variant");
        self.put(
            &format!("/api/admin/products/{product_id}/variants/{variant_id}"),
            input,
        )
        .await
    }

    /// `DELETE /api/admin/products/{id}/variants/{variantId}`
    pub async fn delete_variant(&self, product_id: i64, variant_id: i64) -> Result<(), Error> {
        debug!(product_id, variant_id, "deleting variant");
        self.delete(&format!(
            "/api/admin/products/{product_id}/variants/{variant_id}"
        ))
        .await
    }

    // ── Images ───────────────────────────────────────────────────────

    /// Upload one product image as multipart field `file`.
    ///
    /// `POST /api/admin/products/{id}/images`
    pub async fn upload_product_image(
        &self,
        product_id: i64,
        image: Upload,
    ) -> Result<ImageDetails, Error> {
        debug!(product_id, file = %image.file_name, "uploading product image");
        let form = image.into_form("file")?;
        self.post_multipart(&format!("/api/admin/products/{product_id}/images"), form, &[])
            .await
    }

    /// `DELETE /api/admin/products/{id}/images/{imageId}`
    pub async fn delete_product_image(&self, product_id: i64, image_id: i64) -> Result<(), Error> {
        debug!(product_id, image_id, "deleting product image");
        self.delete(&format!("/api/admin/products/{product_id}/images/{image_id}"))
            .await
    }

    /// `PUT /api/admin/products/{id}/images/{imageId}/main`
    pub async fn set_main_image(&self, product_id: i64, image_id: i64) -> Result<(), Error> {
        debug!(product_id, image_id, "marking main image");
        let _: Value = self
            .put(
                &format!("/api/admin/products/{product_id}/images/{image_id}/main"),
                &json!({}),
            )
            .await?;
        Ok(())
    }

    // ── Categories ───────────────────────────────────────────────────

    /// `POST /api/admin/categories`
    pub async fn create_category(&self, input: &CategoryInput) -> Result<CategoryRecord, Error> {
        debug!(slug = %input.slug, "creating category");
        self.post("/api/admin/categories", input).await
    }

    /// `PUT /api/admin/categories/{id}`
    pub async fn update_category(
        &self,
        id: i64,
        input: &CategoryInput,
    ) -> Result<CategoryRecord, Error> {
        debug!(category_id = id, "updating category");
        self.put(&format!("/api/admin/categories/{id}"), input).await
    }

    /// `DELETE /api/admin/categories/{id}`
    pub async fn delete_category(&self, id: i64) -> Result<(), Error> {
        debug!(category_id = id, "deleting category");
        self.delete(&format!("/api/admin/categories/{id}")).await
    }

    // ── Orders ───────────────────────────────────────────────────────

    /// `GET /api/admin/orders?page=&size=&status=`
    pub async fn admin_list_orders(
        &self,
        page: PageRequest,
        status: Option<&str>,
    ) -> Result<SpringPage<OrderRecord>, Error> {
        let mut query = page.query();
        if let Some(status) = status {
            query.push(("status", status.to_owned()));
        }
        self.get("/api/admin/orders", &query).await
    }

    /// `GET /api/admin/orders/{id}`
    pub async fn admin_order(&self, id: i64) -> Result<OrderRecord, Error> {
        self.get(&format!("/api/admin/orders/{id}"), &[]).await
    }

    /// Request a status transition. The backend decides whether it is allowed.
    ///
    /// `PATCH /api/admin/orders/{id}/status`
    pub async fn update_order_status(&self, id: i64, status: &str) -> Result<OrderRecord, Error> {
        debug!(order_id = id, status, "updating order status");
        self.patch(
            &format!("/api/admin/orders/{id}/status"),
            &StatusUpdate {
                status: status.to_owned(),
            },
        )
        .await
    }

    // ── Dashboard & tooling ──────────────────────────────────────────

    /// `GET /api/admin/dashboard`
    pub async fn dashboard(&self) -> Result<DashboardStats, Error> {
        self.get("/api/admin/dashboard", &[]).await
    }

    /// Bulk import products from CSV (multipart field `file`).
    ///
    /// `POST /api/admin/products/import?dryRun=`
    pub async fn import_products(&self, csv: Upload, dry_run: bool) -> Result<ImportReport, Error> {
        debug!(file = %csv.file_name, dry_run, "importing products");
        let form = csv.into_form("file")?;
        self.post_multipart(
            "/api/admin/products/import",
            form,
            &[("dryRun", dry_run.to_string())],
        )
        .await
    }

    /// Extract product fields from a photo (multipart field `image`).
    ///
    /// `POST /api/admin/products/ocr-prefill`
    pub async fn ocr_prefill(&self, image: Upload) -> Result<OcrPrefillResponse, Error> {
        debug!(file = %image.file_name, "requesting OCR prefill");
        let form = image.into_form("image")?;
        self.post_multipart("/api/admin/products/ocr-prefill", form, &[])
            .await
    }
}
