// Public catalog endpoints: products, brands, categories.

use reqwest::Method;
use tracing::debug;

use crate::client::{ApiClient, RequestBody, RequestOptions, segment};
use crate::error::Error;
use crate::models::{CategoryRecord, ProductRecord, SpringPage};

impl ApiClient {
    /// Search products.
    ///
    /// `GET /api/products?<filters>&page=&size=&sortBy=&sortDir=`. The query
    /// is passed through verbatim; building it is the caller's job.
    pub async fn list_products(
        &self,
        query: Vec<(String, String)>,
    ) -> Result<SpringPage<ProductRecord>, Error> {
        debug!(params = query.len(), "listing products");
        self.request(
            Method::GET,
            "/api/products",
            RequestBody::Empty,
            RequestOptions::new().query(query),
        )
        .await
    }

    /// `GET /api/products/sku/{sku}`
    pub async fn product_by_sku(&self, sku: &str) -> Result<ProductRecord, Error> {
        self.get(&format!("/api/products/sku/{}", segment(sku)), &[])
            .await
    }

    /// Distinct brand names, optionally scoped to one topic root.
    ///
    /// `GET /api/products/brands?rootCategoryId=`
    pub async fn brands(&self, root_category_id: Option<i64>) -> Result<Vec<String>, Error> {
        let query: Vec<(&str, String)> = root_category_id
            .map(|id| ("rootCategoryId", id.to_string()))
            .into_iter()
            .collect();
        self.get("/api/products/brands", &query).await
    }

    /// `GET /api/categories`
    pub async fn categories(&self) -> Result<Vec<CategoryRecord>, Error> {
        self.get("/api/categories", &[]).await
    }

    /// `GET /api/categories/root`
    pub async fn root_categories(&self) -> Result<Vec<CategoryRecord>, Error> {
        self.get("/api/categories/root", &[]).await
    }

    /// `GET /api/categories/slug/{slug}`
    pub async fn category_by_slug(&self, slug: &str) -> Result<CategoryRecord, Error> {
        self.get(&format!("/api/categories/slug/{}", segment(slug)), &[])
            .await
    }

    /// `GET /api/categories/{id}/children`
    pub async fn category_children(&self, id: i64) -> Result<Vec<CategoryRecord>, Error> {
        self.get(&format!("/api/categories/{id}/children"), &[])
            .await
    }
}
