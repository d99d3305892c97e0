//! Order timeline commands (the admin console's read/write path).

use clap::Subcommand;

use tifo_core::OrderId;
use tifo_storefront::api::types::{Order, OrderDateRange, OrderStatusUpdate};
use tifo_storefront::api::OrderTimeline;
use tifo_storefront::state::AppState;

use super::CliError;

/// Actions for `tifo orders`.
#[derive(Debug, Subcommand)]
pub enum OrdersAction {
    /// List orders, newest first
    List {
        /// Inclusive ISO 8601 lower bound on creation date
        #[arg(long)]
        start_date: Option<String>,

        /// Inclusive ISO 8601 upper bound on creation date
        #[arg(long)]
        end_date: Option<String>,
    },
    /// Advance an order to the next lifecycle status
    Advance {
        /// Order ID
        order_id: i64,
    },
}

/// Run an orders action.
pub async fn run(state: &AppState, action: OrdersAction) -> Result<(), CliError> {
    let api = state.api();

    match action {
        OrdersAction::List {
            start_date,
            end_date,
        } => {
            let range = OrderDateRange {
                start_date,
                end_date,
            };
            let orders = api.list_orders(&range).await?;
            print_orders(&orders);
            Ok(())
        }
        OrdersAction::Advance { order_id } => {
            let order_id = OrderId::new(order_id);
            let range = OrderDateRange::default();
            let orders = api.list_orders(&range).await?;
            let order = orders
                .iter()
                .find(|order| order.id == order_id)
                .ok_or_else(|| CliError::OperationFailed(format!("order {order_id} not found")))?;

            let Some(next) = order.status.advance() else {
                return Err(CliError::OperationFailed(format!(
                    "order {order_id} is already {}, nothing to advance to",
                    order.status
                )));
            };

            let updated = api
                .update_order_status(order_id, &OrderStatusUpdate { status: next })
                .await?;
            print_orders(std::slice::from_ref(&updated));
            Ok(())
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_orders(orders: &[Order]) {
    if orders.is_empty() {
        println!("No orders.");
        return;
    }
    for order in orders {
        println!(
            "order #{:<6} {}  {:<10} {}",
            order.id,
            order.created_at.format("%Y-%m-%d %H:%M"),
            order.status,
            order.total_price
        );
        for item in &order.items {
            println!("  - {} x{} = {}", item.product_name, item.quantity, item.price.times(item.quantity));
        }
    }
}
