//! Public catalog command handlers (no sign-in).

use tabled::Tabled;

use partshop_core::{Category, Product, ProductFilter, Storefront};

use crate::cli::{
    CategoriesArgs, CategoriesCommand, GlobalOpts, ProductListArgs, ProductsArgs, ProductsCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table rows ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ProductRow {
    #[tabled(rename = "SKU")]
    sku: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Brand")]
    brand: String,
    #[tabled(rename = "Price")]
    price: String,
    #[tabled(rename = "Stock")]
    stock: i64,
    #[tabled(rename = "Availability")]
    availability: String,
}

impl From<&Product> for ProductRow {
    fn from(p: &Product) -> Self {
        Self {
            sku: p.sku.clone(),
            name: p.name.clone(),
            brand: p.brand.clone().unwrap_or_default(),
            price: price_label(p),
            stock: p.stock_quantity,
            availability: p.availability.to_string(),
        }
    }
}

#[derive(Tabled)]
struct CategoryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Slug")]
    slug: String,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Parent")]
    parent: String,
}

impl From<&Category> for CategoryRow {
    fn from(c: &Category) -> Self {
        Self {
            id: c.id,
            slug: c.slug.clone(),
            name: c.name.clone(),
            parent: util::opt(c.parent_id),
        }
    }
}

#[derive(Tabled)]
struct BrandRow {
    #[tabled(rename = "Brand")]
    name: String,
}

fn price_label(p: &Product) -> String {
    if p.quote_only {
        return "on request".into();
    }
    util::money(p.price, &p.currency)
}

fn product_detail(p: &Product) -> String {
    let mut lines = vec![
        ("SKU", p.sku.clone()),
        ("Name", p.name.clone()),
        ("Category", p.category_name.clone().unwrap_or_default()),
        ("Brand", p.brand.clone().unwrap_or_default()),
        ("Condition", p.condition.clone().unwrap_or_default()),
        ("Price", price_label(p)),
    ];
    if p.is_on_sale() {
        lines.push(("Was", util::money(p.compare_at_price, &p.currency)));
    }
    lines.extend([
        ("Stock", p.stock_quantity.to_string()),
        ("Availability", p.availability.to_string()),
        ("Image", p.primary_image().unwrap_or_default().to_owned()),
        ("Variants", variant_summary(p)),
    ]);
    let mut out = output::detail_lines(&lines);
    for section in &p.info_sections {
        out.push_str(&format!("\n\n{}\n{}", section.title, section.content));
    }
    out
}

fn variant_summary(p: &Product) -> String {
    p.variants
        .iter()
        .map(|v| v.name.as_str())
        .collect::<Vec<_>>()
        .join(", ")
}

// ── Products ─────────────────────────────────────────────────────────

/// Translate `products list` flags into a catalog filter.
fn build_filter(args: ProductListArgs) -> Result<ProductFilter, CliError> {
    let mut filter = ProductFilter {
        page: Some(args.paging.page),
        limit: Some(args.paging.limit),
        sort: args.sort,
        search: args.search,
        category_slug: args.category,
        brand: args.brand,
        ..ProductFilter::default()
    };
    for raw in &args.filter {
        let (name, value) = util::split_pair(raw)?;
        filter.set_param(name, value)?;
    }
    Ok(filter)
}

pub async fn handle_products(
    shop: &Storefront,
    args: ProductsArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        ProductsCommand::List(list) => {
            let filter = build_filter(list)?;
            let page = shop.fetch_products(&filter).await;
            let out = output::render_list(
                &global.output,
                &page.products,
                |r| ProductRow::from(r),
                |p| p.slug.clone(),
            );
            output::print_output(&out, global.quiet);
            if !global.quiet && matches!(global.output, crate::cli::OutputFormat::Table) {
                eprintln!(
                    "page {} of {} ({} products)",
                    page.page,
                    page.total_pages.max(1),
                    page.total
                );
            }
            Ok(())
        }

        ProductsCommand::Get { slug } => {
            let product = shop
                .fetch_product_by_slug(&slug)
                .await?
                .ok_or_else(|| CliError::NotFound {
                    resource_type: "product".into(),
                    identifier: slug.clone(),
                    list_command: "products list".into(),
                })?;
            let out = output::render_single(&global.output, &product, product_detail, |p| {
                p.slug.clone()
            });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

// ── Categories ───────────────────────────────────────────────────────

fn category_not_found(slug: String) -> CliError {
    CliError::NotFound {
        resource_type: "category".into(),
        identifier: slug,
        list_command: "categories list".into(),
    }
}

fn print_categories(categories: &[Category], global: &GlobalOpts) {
    let out = output::render_list(
        &global.output,
        categories,
        |r| CategoryRow::from(r),
        |c| c.slug.clone(),
    );
    output::print_output(&out, global.quiet);
}

pub async fn handle_categories(
    shop: &Storefront,
    args: CategoriesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        CategoriesCommand::List { roots } => {
            let categories = if roots {
                shop.fetch_root_categories().await
            } else {
                shop.fetch_categories().await
            };
            print_categories(&categories, global);
            Ok(())
        }

        CategoriesCommand::Get { slug } => {
            let category = shop
                .fetch_category_by_slug(&slug)
                .await
                .ok_or_else(|| category_not_found(slug))?;
            let out = output::render_single(
                &global.output,
                &category,
                |c| {
                    output::detail_lines(&[
                        ("ID", c.id.to_string()),
                        ("Name", c.name.clone()),
                        ("Slug", c.slug.clone()),
                        ("Parent", util::opt(c.parent_id)),
                        ("Description", c.description.clone().unwrap_or_default()),
                        ("Active", c.active.to_string()),
                    ])
                },
                |c| c.slug.clone(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        CategoriesCommand::Children { id } => {
            let children = shop.fetch_category_children(id).await;
            print_categories(&children, global);
            Ok(())
        }

        CategoriesCommand::Topic { slug } => {
            let topic = shop
                .fetch_topic_root(&slug)
                .await
                .ok_or_else(|| category_not_found(slug))?;
            let out =
                output::render_single(&global.output, &topic, |t| t.slug().to_owned(), |t| {
                    t.slug().to_owned()
                });
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}

// ── Brands ───────────────────────────────────────────────────────────

pub async fn handle_brands(
    shop: &Storefront,
    root_category: Option<i64>,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let brands = shop.fetch_brands(root_category).await;
    let out = output::render_list(
        &global.output,
        &brands,
        |b| BrandRow { name: b.clone() },
        Clone::clone,
    );
    output::print_output(&out, global.quiet);
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use clap::Parser;

    use super::*;
    use crate::cli::{Cli, Command};

    fn list_args(argv: &[&str]) -> ProductListArgs {
        let mut full = vec!["partshop", "products", "list"];
        full.extend_from_slice(argv);
        match Cli::try_parse_from(full).unwrap().command {
            Command::Products(ProductsArgs {
                command: ProductsCommand::List(args),
            }) => args,
            other => panic!("unexpected command: {other:?}"),
        }
    }

    #[test]
    fn flags_and_filters_land_in_the_filter() {
        let filter = build_filter(list_args(&[
            "--page",
            "2",
            "-c",
            "rims",
            "-f",
            "boltPattern=5x120",
            "-f",
            "wheelOffset=35",
        ]))
        .unwrap();
        assert_eq!(filter.page, Some(2));
        assert_eq!(filter.category_slug.as_deref(), Some("rims"));
        assert_eq!(filter.bolt_pattern.as_deref(), Some("5x120"));
        assert_eq!(filter.wheel_offset, Some(35));
    }

    #[test]
    fn bad_filter_is_a_usage_error() {
        let err = build_filter(list_args(&["-f", "yearFrom=soon"])).unwrap_err();
        assert_eq!(err.exit_code(), crate::error::exit_code::USAGE);

        let err = build_filter(list_args(&["-f", "colour=red"])).unwrap_err();
        assert!(err.to_string().contains("colour"));
    }
}
