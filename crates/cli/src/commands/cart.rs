//! Cart management commands.

use clap::Subcommand;

use tifo_core::{CartItemId, ProductId};
use tifo_storefront::state::AppState;

use super::CliError;

/// Actions for `tifo cart`.
#[derive(Debug, Subcommand)]
pub enum CartAction {
    /// Show the current cart
    Show,
    /// Add a product to the cart
    Add {
        /// Product ID
        product_id: i64,
    },
    /// Remove a cart item (by cart item ID, not product ID)
    Remove {
        /// Cart item ID
        item_id: i64,
    },
    /// Create an order from the cart and hand off to chat
    Checkout,
}

/// Run a cart action.
pub async fn run(state: &AppState, action: CartAction) -> Result<(), CliError> {
    let store = state.store();

    match action {
        CartAction::Show => {
            store.refresh_cart().await;
            print_cart(state);
            Ok(())
        }
        CartAction::Add { product_id } => {
            store.refresh_cart().await;
            if store.add_to_cart(ProductId::new(product_id)).await {
                print_cart(state);
                Ok(())
            } else {
                Err(CliError::OperationFailed(format!(
                    "product {product_id} is already in the cart, in flight, or the add failed"
                )))
            }
        }
        CartAction::Remove { item_id } => {
            if store.remove_from_cart(CartItemId::new(item_id)).await {
                print_cart(state);
                Ok(())
            } else {
                Err(CliError::OperationFailed(format!(
                    "cart item {item_id} could not be removed"
                )))
            }
        }
        CartAction::Checkout => {
            store.refresh_cart().await;
            match store.checkout().await {
                Some(order) => {
                    print_order_confirmation(&order);
                    Ok(())
                }
                None => Err(CliError::OperationFailed(
                    "checkout failed (is the cart empty?)".to_string(),
                )),
            }
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_cart(state: &AppState) {
    let cart = state.store().cart();
    if cart.is_empty() {
        println!("Cart is empty.");
        return;
    }
    for item in &cart {
        println!(
            "item #{:<6} {:<40} {:>12}",
            item.id, item.product.name, item.product.price
        );
    }
    println!("Total: {}", state.store().cart_total());
}

#[allow(clippy::print_stdout)]
fn print_order_confirmation(order: &tifo_storefront::api::types::Order) {
    println!("Order #{} created ({})", order.id, order.status);
    for item in &order.items {
        println!("- {} x{} = {}", item.product_name, item.quantity, item.price.times(item.quantity));
    }
    println!("Total: {}", order.total_price);
    println!("The shop will contact you in Telegram to arrange payment.");
}
