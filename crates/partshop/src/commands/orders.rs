//! Customer order history handlers.

use tabled::Tabled;

use partshop_core::{CustomerOrder, Order, Storefront};

use crate::cli::{GlobalOpts, OrdersArgs, OrdersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct OrderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Number")]
    number: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Items")]
    items: i64,
    #[tabled(rename = "Total")]
    total: String,
    #[tabled(rename = "Placed")]
    placed: String,
}

impl From<&CustomerOrder> for OrderRow {
    fn from(o: &CustomerOrder) -> Self {
        Self {
            id: o.id,
            number: o.order_number.clone().unwrap_or_default(),
            status: o.status.to_string(),
            items: o.item_count,
            total: util::money(o.total, &o.currency),
            placed: o
                .created_at
                .map(|t| t.format("%Y-%m-%d").to_string())
                .unwrap_or_default(),
        }
    }
}

/// Detail view shared with the admin order view.
pub(super) fn order_detail(o: &Order) -> String {
    let mut out = output::detail_lines(&[
        ("ID", o.id.to_string()),
        ("Number", o.order_number.clone().unwrap_or_default()),
        ("Status", o.status.to_string()),
        ("Subtotal", util::money(o.subtotal, &o.currency)),
        ("Shipping", util::money(o.shipping_cost, &o.currency)),
        ("Total", util::money(o.total, &o.currency)),
        (
            "Placed",
            o.created_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
        ),
    ]);
    for item in &o.items {
        out.push_str(&format!(
            "\n  {} x {}  {}",
            item.quantity,
            item.name,
            util::money(item.total_price, &o.currency)
        ));
    }
    out
}

fn print_order(order: &Order, global: &GlobalOpts) {
    let out = output::render_single(&global.output, order, order_detail, |o| o.id.to_string());
    output::print_output(&out, global.quiet);
}

pub async fn handle(
    shop: &Storefront,
    args: OrdersArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    match args.command {
        OrdersCommand::List(paging) => {
            let page = shop.my_orders(paging.page, paging.limit).await?;
            let out = output::render_list(
                &global.output,
                &page.items,
                |r| OrderRow::from(r),
                |o| o.id.to_string(),
            );
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OrdersCommand::Get { id } => {
            let order = shop
                .my_order(id)
                .await
                .map_err(|e| CliError::not_found_or(e, "order", id, "orders list"))?;
            print_order(&order, global);
            Ok(())
        }

        OrdersCommand::Latest => {
            let Some(order) = shop.latest_order().await? else {
                if !global.quiet {
                    eprintln!("No orders yet");
                }
                return Ok(());
            };
            print_order(&order, global);
            Ok(())
        }

        OrdersCommand::Session { session_id } => {
            let order = shop
                .get_order_by_checkout_session(&session_id)
                .await
                .map_err(|e| {
                    CliError::not_found_or(e, "checkout session", &session_id, "orders list")
                })?;
            print_order(&order, global);
            Ok(())
        }
    }
}
