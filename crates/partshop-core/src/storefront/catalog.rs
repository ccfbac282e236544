// ── Public catalog reads ──
//
// Browsing must never hard-fail a page. Every read here degrades to an
// empty result (or `None`) instead of propagating, with one exception:
// `fetch_product_by_slug` still reports failures other than 404/401/400 so
// a detail page can tell "gone" from "backend down".
//
// 401 and 400 are logged at debug level (a misconfigured public endpoint is
// noisy but expected); everything else is a warning.

use tracing::{debug, warn};

use partshop_api::Error;

use super::Storefront;
use crate::convert::product_page;
use crate::filter::ProductFilter;
use crate::model::{Category, Product, ProductPage, TopicRoot, topic_root_of};

/// Log a swallowed public-read failure.
fn log_degraded(what: &str, err: &Error) {
    match err.status() {
        400 | 401 => debug!(what, status = err.status(), error = %err, "public read degraded to empty"),
        _ => warn!(what, status = err.status(), error = %err, "public read degraded to empty"),
    }
}

fn categories_or_empty<T: Into<Category>>(what: &str, result: Result<Vec<T>, Error>) -> Vec<Category> {
    match result {
        Ok(records) => records.into_iter().map(Into::into).collect(),
        Err(err) => {
            log_degraded(what, &err);
            Vec::new()
        }
    }
}

impl Storefront {
    /// Search the catalog. Never fails: any error yields an empty page that
    /// still echoes the requested page and limit.
    pub async fn fetch_products(&self, filter: &ProductFilter) -> ProductPage {
        let (page, limit) = (filter.page(), filter.limit());
        match self.api().list_products(filter.to_query()).await {
            Ok(raw) => product_page(raw, page, limit),
            Err(err) => {
                log_degraded("products", &err);
                ProductPage::empty(page, limit)
            }
        }
    }

    /// [`fetch_products`](Self::fetch_products) under the stale-response
    /// guard: `None` if a newer search for `slot` was started meanwhile.
    pub async fn fetch_products_latest(
        &self,
        slot: &str,
        filter: &ProductFilter,
    ) -> Option<ProductPage> {
        self.sequencer()
            .track(slot, self.fetch_products(filter))
            .await
    }

    /// Product detail by slug (which is the SKU).
    ///
    /// 404, 401 and 400 yield `Ok(None)`; other failures propagate.
    pub async fn fetch_product_by_slug(&self, slug: &str) -> Result<Option<Product>, Error> {
        match self.api().product_by_sku(slug).await {
            Ok(record) => Ok(Some(record.into())),
            Err(err) if matches!(err.status(), 400 | 401 | 404) => {
                debug!(slug, status = err.status(), "product not available");
                Ok(None)
            }
            Err(err) => Err(err),
        }
    }

    pub async fn fetch_category_by_slug(&self, slug: &str) -> Option<Category> {
        match self.api().category_by_slug(slug).await {
            Ok(record) => Some(record.into()),
            Err(err) => {
                log_degraded("category", &err);
                None
            }
        }
    }

    pub async fn fetch_category_children(&self, id: i64) -> Vec<Category> {
        categories_or_empty("category children", self.api().category_children(id).await)
    }

    pub async fn fetch_categories(&self) -> Vec<Category> {
        categories_or_empty("categories", self.api().categories().await)
    }

    pub async fn fetch_root_categories(&self) -> Vec<Category> {
        categories_or_empty("root categories", self.api().root_categories().await)
    }

    /// Brand names, optionally scoped to one topic root. Blank names dropped.
    pub async fn fetch_brands(&self, root_category_id: Option<i64>) -> Vec<String> {
        match self.api().brands(root_category_id).await {
            Ok(brands) => brands
                .into_iter()
                .map(|b| b.trim().to_owned())
                .filter(|b| !b.is_empty())
                .collect(),
            Err(err) => {
                log_degraded("brands", &err);
                Vec::new()
            }
        }
    }

    /// Topic root that the category `slug` belongs to.
    ///
    /// Resolved from the full category list, so it costs one request.
    pub async fn fetch_topic_root(&self, slug: &str) -> Option<TopicRoot> {
        let categories = self.fetch_categories().await;
        let category = categories.iter().find(|c| c.slug == slug)?;
        topic_root_of(&categories, category.id)
    }
}
