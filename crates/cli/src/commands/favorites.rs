//! Favorites commands.

use clap::Subcommand;

use tifo_core::ProductId;
use tifo_storefront::state::AppState;

use super::CliError;

/// Actions for `tifo favorites`.
#[derive(Debug, Subcommand)]
pub enum FavoritesAction {
    /// Show favorited products
    Show,
    /// Toggle a product's favorite status
    Toggle {
        /// Product ID
        product_id: i64,
    },
}

/// Run a favorites action.
pub async fn run(state: &AppState, action: FavoritesAction) -> Result<(), CliError> {
    let store = state.store();

    match action {
        FavoritesAction::Show => {
            store.refresh_favorites().await;
            print_favorites(state);
            Ok(())
        }
        FavoritesAction::Toggle { product_id } => {
            let product_id = ProductId::new(product_id);
            store.refresh_favorites().await;
            if store.toggle_favorite(product_id).await {
                print_toggle_result(state, product_id);
                Ok(())
            } else {
                Err(CliError::OperationFailed(format!(
                    "favorite toggle for product {product_id} failed"
                )))
            }
        }
    }
}

#[allow(clippy::print_stdout)]
fn print_favorites(state: &AppState) {
    let favorites = state.store().favorites();
    if favorites.is_empty() {
        println!("No favorites yet.");
        return;
    }
    for favorite in &favorites {
        println!(
            "#{:<6} {:<40} {:>12}",
            favorite.product.id, favorite.product.name, favorite.product.price
        );
    }
}

#[allow(clippy::print_stdout)]
fn print_toggle_result(state: &AppState, product_id: ProductId) {
    if state.store().is_favorite(product_id) {
        println!("Product {product_id} added to favorites.");
    } else {
        println!("Product {product_id} removed from favorites.");
    }
}
