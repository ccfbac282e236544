//! Owner admin handlers. The caller has already checked the owner role.

use serde::Serialize;
use serde_json::Value;
use tabled::Tabled;

use partshop_api::models::{CategoryInput, DashboardStats, ImportReport, ProductInput};
use partshop_core::{AdminOrder, Category, Error, OrderStatus, Product, Storefront};

use crate::cli::{
    AdminArgs, AdminCategoriesCommand, AdminCommand, AdminOrdersCommand, AdminProductsCommand,
    GlobalOpts,
};
use crate::error::CliError;
use crate::output;

use super::{orders, util};

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct AdminProductRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: i64,
    #[tabled(rename = "Active")]
    active: String,
}

impl From<&Product> for AdminProductRow {
    fn from(p: &Product) -> Self {
        Self {
            id: p.id,
            sku: p.sku.clone(),
            name: p.name.clone(),
            price: util::money(p.price, &p.currency),
            stock: p.stock_quantity,
            active: if p.active { "yes" } else { "draft" }.into(),
        }
    }
}

#[derive(Tabled)]
struct AdminOrderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Customer")]
    customer: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Total")]
    total: String,
}

impl From<&AdminOrder> for AdminOrderRow {
    fn from(o: &AdminOrder) -> Self {
        Self {
            id: o.order.id,
            number: o.order.order_number.clone().unwrap_or_default(),
            customer: o
                .customer_email
                .clone()
                .or_else(|| o.customer_name.clone())
                .unwrap_or_default(),
            status: o.order.status.to_string(),
            total: util::money(o.order.total, &o.order.currency),
        }
    }
}

#[derive(Tabled)]
struct ImportErrorRow {
    #[tabled(rename = "Row")]
    row: String,
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Error")]
    message: String,
}

#[derive(Tabled)]
struct OcrFieldRow {
    #[tabled(rename = "Field")]
    field: String,
    #[tabled(rename = "Suggested value")]
    value: String,
}

/// One OCR suggestion that cleared the confidence bar.
#[derive(Serialize)]
struct OcrSuggestion<'a> {
    field: &'a str,
    value: &'a Value,
}

// ── Detail views ─────────────────────────────────────────────────────

fn admin_product_detail(p: &Product) -> String {
    output::detail_lines(&[
        ("ID", p.id.to_string()),
        ("SKU", p.sku.clone()),
        ("Name", p.name.clone()),
        ("Category", p.category_name.clone().unwrap_or_default()),
        ("Condition", p.condition.clone().unwrap_or_default()),
        ("Price", util::money(p.price, &p.currency)),
        ("Stock", p.stock_quantity.to_string()),
        ("Active", p.active.to_string()),
        ("Featured", p.featured.to_string()),
        ("Quote only", p.quote_only.to_string()),
        ("Images", p.images.len().to_string()),
    ])
}

fn admin_order_detail(o: &AdminOrder) -> String {
    let mut out = output::detail_lines(&[
        ("Customer", o.customer_name.clone().unwrap_or_default()),
        ("Email", o.customer_email.clone().unwrap_or_default()),
        (
            "Ship to",
            o.shipping_address
                .as_ref()
                .map(partshop_core::Address::one_line)
                .unwrap_or_default(),
        ),
        ("Tracking", o.tracking_number.clone().unwrap_or_default()),
    ]);
    out.push('\n');
    out.push_str(&orders::order_detail(&o.order));
    out
}

fn dashboard_detail(d: &DashboardStats) -> String {
    output::detail_lines(&[
        ("Products", util::opt(d.total_products)),
        ("Active", util::opt(d.active_products)),
        ("Low stock", util::opt(d.low_stock_products)),
        ("Orders", util::opt(d.total_orders)),
        ("Pending", util::opt(d.pending_orders)),
        (
            "Revenue",
            d.total_revenue
                .map(|r| format!("{:.2}", r.round_dp(2)))
                .unwrap_or_default(),
        ),
    ])
}

fn import_summary(r: &ImportReport) -> String {
    let mode = if r.dry_run { " (dry run, nothing written)" } else { "" };
    let mut out = format!(
        "{} rows: {} created, {} updated, {} skipped{mode}",
        r.total_rows, r.created, r.updated, r.skipped
    );
    if r.has_errors() {
        let rows: Vec<ImportErrorRow> = r
            .errors
            .iter()
            .map(|e| ImportErrorRow {
                row: util::opt(e.row),
                field: e.field.clone().unwrap_or_default(),
                message: e.message.clone(),
            })
            .collect();
        out.push('\n');
        out.push_str(&tabled::Table::new(rows).to_string());
    }
    out
}

fn value_text(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Parse a status argument, refusing names the backend does not know.
fn parse_status(raw: &str) -> Result<OrderStatus, CliError> {
    match OrderStatus::from_backend(&raw.replace('-', "_")) {
        OrderStatus::Unknown => Err(CliError::Validation {
            field: "status".into(),
            reason: format!(
                "unknown order status '{raw}' (pending, confirmed, checkout_created, paid, \
                 processing, shipped, delivered, failed, cancelled, refunded)"
            ),
        }),
        status => Ok(status),
    }
}

fn product_not_found(id: i64) -> impl FnOnce(Error) -> CliError {
    move |e| CliError::not_found_or(e, "product", id, "admin products list")
}

fn done(global: &GlobalOpts, message: &str) {
    if !global.quiet {
        eprintln!("{message}");
    }
}

fn print_product(product: &Product, global: &GlobalOpts) {
    let out = output::render_single(&global.output, product, admin_product_detail, |p| {
        p.id.to_string()
    });
    output::print_output(&out, global.quiet);
}

// ── Dispatch ─────────────────────────────────────────────────────────

pub async fn handle(
    shop: &Storefront,
    args: AdminArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        AdminCommand::Products(p) => handle_products(shop, p.command, global).await,
        AdminCommand::Categories(c) => handle_categories(shop, c.command, global).await,
        AdminCommand::Orders(o) => handle_orders(shop, o.command, global).await,

        AdminCommand::Dashboard => {
            let stats = shop.dashboard().await?;
            let out = output::render_single(&global.output, &stats, dashboard_detail, |d| {
                util::opt(d.total_orders)
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::Import { file, dry_run } => {
            let csv = util::load_upload(&file)?;
            let report = shop.import_products(csv, dry_run).await?;
            let out = output::render_single(&global.output, &report, import_summary, |r| {
                r.total_rows.to_string()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminCommand::Ocr {
            image,
            min_confidence,
        } => {
            let upload = util::load_upload(&image)?;
            let response = shop.ocr_prefill(upload).await?;
            let suggestions: Vec<OcrSuggestion<'_>> = response
                .trusted_fields(min_confidence)
                .into_iter()
                .map(|(field, value)| OcrSuggestion { field, value })
                .collect();
            let out = output::render_list(
                &global.output,
                &suggestions,
                |s| OcrFieldRow {
                    field: s.field.to_owned(),
                    value: value_text(s.value),
                },
                |s| format!("{}={}", s.field, value_text(s.value)),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

async fn handle_products(
    shop: &Storefront,
    cmd: AdminProductsCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match cmd {
        AdminProductsCommand::List { paging, search } => {
            let page = shop
                .admin_products(paging.page, paging.limit, search.as_deref())
                .await?;
            let out = output::render_list(
                &global.output,
                &page.items,
                |r| AdminProductRow::from(r),
                |p| p.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminProductsCommand::Get { id } => {
            let product = shop.admin_product(id).await.map_err(product_not_found(id))?;
            print_product(&product, global);
            Ok(())
        }

        AdminProductsCommand::Create {
            from_file,
            category_slug,
            unchecked,
        } => {
            let input: ProductInput = util::read_json_file(&from_file)?;
            let product = if unchecked {
                shop.create_product(&input).await?
            } else {
                shop.create_product_checked(&input, category_slug.as_deref())
                    .await?
            };
            print_product(&product, global);
            Ok(())
        }

        AdminProductsCommand::Update {
            id,
            from_file,
            category_slug,
            unchecked,
        } => {
            let input: ProductInput = util::read_json_file(&from_file)?;
            let product = if unchecked {
                shop.update_product(id, &input).await
            } else {
                shop.update_product_checked(id, &input, category_slug.as_deref())
                    .await
            }
            .map_err(product_not_found(id))?;
            print_product(&product, global);
            Ok(())
        }

        AdminProductsCommand::Activate { id } => {
            shop.set_product_active(id, true)
                .await
                .map_err(product_not_found(id))?;
            done(global, "Product activated");
            Ok(())
        }

        AdminProductsCommand::Deactivate { id } => {
            shop.set_product_active(id, false)
                .await
                .map_err(product_not_found(id))?;
            done(global, "Product deactivated");
            Ok(())
        }

        AdminProductsCommand::Delete { id } => {
            if !util::confirm(&format!("Delete product {id}? This is permanent."), global.yes)? {
                return Ok(());
            }
            shop.delete_product(id).await.map_err(product_not_found(id))?;
            done(global, "Product deleted");
            Ok(())
        }

        AdminProductsCommand::UploadImage { id, image } => {
            let upload = util::load_upload(&image)?;
            let details = shop
                .upload_product_image(id, upload)
                .await
                .map_err(product_not_found(id))?;
            let out = output::render_single(
                &global.output,
                &details,
                |d| {
                    output::detail_lines(&[
                        ("Image ID", util::opt(d.id)),
                        ("URL", d.url.clone().unwrap_or_default()),
                    ])
                },
                |d| util::opt(d.id),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminProductsCommand::MainImage { id, image_id } => {
            shop.set_main_image(id, image_id)
                .await
                .map_err(product_not_found(id))?;
            done(global, "Main image set");
            Ok(())
        }

        AdminProductsCommand::DeleteImage { id, image_id } => {
            if !util::confirm(&format!("Delete image {image_id} of product {id}?"), global.yes)? {
                return Ok(());
            }
            shop.delete_product_image(id, image_id)
                .await
                .map_err(product_not_found(id))?;
            done(global, "Image deleted");
            Ok(())
        }
    }
}

async fn handle_categories(
    shop: &Storefront,
    cmd: AdminCategoriesCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let print = |c: &Category| {
        let out = output::render_single(
            &global.output,
            c,
            |c| format!("Category {} ({})", c.id, c.slug),
            |c| c.id.to_string(),
        );
        output::print_output(&out, global.quiet);
    };

    match cmd {
        AdminCategoriesCommand::Create { from_file } => {
            let input: CategoryInput = util::read_json_file(&from_file)?;
            let category = shop.create_category(&input).await?;
            print(&category);
            Ok(())
        }

        AdminCategoriesCommand::Update { id, from_file } => {
            let input: CategoryInput = util::read_json_file(&from_file)?;
            let category = shop
                .update_category(id, &input)
                .await
                .map_err(|e| CliError::not_found_or(e, "category", id, "categories list"))?;
            print(&category);
            Ok(())
        }

        AdminCategoriesCommand::Delete { id } => {
            if !util::confirm(&format!("Delete category {id}?"), global.yes)? {
                return Ok(());
            }
            shop.delete_category(id)
                .await
                .map_err(|e| CliError::not_found_or(e, "category", id, "categories list"))?;
            done(global, "Category deleted");
            Ok(())
        }
    }
}

async fn handle_orders(
    shop: &Storefront,
    cmd: AdminOrdersCommand,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let print = |o: &AdminOrder| {
        let out = output::render_single(&global.output, o, admin_order_detail, |o| {
            o.order.id.to_string()
        });
        output::print_output(&out, global.quiet);
    };

    match cmd {
        AdminOrdersCommand::List { paging, status } => {
            let status = status.as_deref().map(parse_status).transpose()?;
            let page = shop.admin_orders(paging.page, paging.limit, status).await?;
            let out = output::render_list(
                &global.output,
                &page.items,
                |r| AdminOrderRow::from(r),
                |o| o.order.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AdminOrdersCommand::Get { id } => {
            let order = shop
                .admin_order(id)
                .await
                .map_err(|e| CliError::not_found_or(e, "order", id, "admin orders list"))?;
            print(&order);
            Ok(())
        }

        AdminOrdersCommand::SetStatus { id, status } => {
            let status = parse_status(&status)?;
            let order = shop
                .update_order_status(id, status)
                .await
                .map_err(|e| CliError::not_found_or(e, "order", id, "admin orders list"))?;
            print(&order);
            Ok(())
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn status_argument_accepts_cli_spellings() {
        assert_eq!(parse_status("shipped").unwrap(), OrderStatus::Shipped);
        assert_eq!(
            parse_status("checkout-created").unwrap(),
            OrderStatus::CheckoutCreated
        );
        assert!(matches!(
            parse_status("lost"),
            Err(CliError::Validation { .. })
        ));
    }

    #[test]
    fn import_summary_marks_dry_runs_and_lists_errors() {
        let report: ImportReport = serde_json::from_value(serde_json::json!({
            "totalRows": 3,
            "created": 2,
            "dryRun": true,
            "errors": [{ "row": 3, "field": "price", "message": "not a number" }]
        }))
        .unwrap();
        let text = import_summary(&report);
        assert!(text.starts_with("3 rows: 2 created, 0 updated, 0 skipped (dry run"));
        assert!(text.contains("not a number"));
    }

    #[test]
    fn ocr_values_render_without_quotes() {
        assert_eq!(value_text(&Value::from("BBS")), "BBS");
        assert_eq!(value_text(&Value::from(18)), "18");
    }
}
