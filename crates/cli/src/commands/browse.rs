//! Catalog browsing command.

use clap::Args;

use tifo_storefront::catalog::{CatalogFilter, SortOrder, VisibleWindow};
use tifo_storefront::state::AppState;

use super::CliError;

/// Page size for terminal output.
const PAGE_CHUNK: usize = 20;

/// Arguments for `tifo browse`.
#[derive(Debug, Args)]
pub struct BrowseArgs {
    /// Free-text search (name, team, brand, league)
    #[arg(short, long)]
    pub search: Option<String>,

    /// Catalog mode ("jerseys" or "posters")
    #[arg(short, long)]
    pub category: Option<String>,

    /// Size filter (free text, normalized)
    #[arg(long)]
    pub size: Option<String>,

    /// Brand filter
    #[arg(long)]
    pub brand: Option<String>,

    /// League filter
    #[arg(long)]
    pub league: Option<String>,

    /// Club filter (matched against the team field)
    #[arg(long)]
    pub club: Option<String>,

    /// Season filter (e.g., "2023/24")
    #[arg(long)]
    pub season: Option<String>,

    /// Kit type filter (home, away, third, ...)
    #[arg(long)]
    pub kit_type: Option<String>,

    /// Sort order: default, price-asc, price-desc, name
    #[arg(long, default_value = "default")]
    pub sort: String,
}

fn parse_sort(raw: &str) -> Result<SortOrder, CliError> {
    match raw {
        "default" => Ok(SortOrder::Default),
        "price-asc" => Ok(SortOrder::PriceAsc),
        "price-desc" => Ok(SortOrder::PriceDesc),
        "name" => Ok(SortOrder::NameAsc),
        other => Err(CliError::OperationFailed(format!(
            "unknown sort order: {other} (expected default, price-asc, price-desc, name)"
        ))),
    }
}

/// Fetch, filter, and print the catalog.
pub async fn run(state: &AppState, args: BrowseArgs) -> Result<(), CliError> {
    let sort = parse_sort(&args.sort)?;

    let handle = state
        .feed()
        .submit(args.search.as_deref().unwrap_or(""), args.category.as_deref());
    handle
        .await
        .map_err(|e| CliError::OperationFailed(format!("catalog fetch task failed: {e}")))?;

    let filter = CatalogFilter {
        category_slug: args.category,
        size: args.size,
        brand: args.brand,
        league: args.league,
        club: args.club,
        season: args.season,
        kit_type: args.kit_type,
        sort,
    };

    let products = state.feed().products();
    let derived = filter.apply(&products);

    let mut window = VisibleWindow::new(PAGE_CHUNK);
    window.reset(derived.len());

    print_products(state, &derived, &window);
    Ok(())
}

#[allow(clippy::print_stdout)]
fn print_products(
    state: &AppState,
    products: &[tifo_storefront::api::types::Product],
    window: &VisibleWindow,
) {
    if products.is_empty() {
        println!("No products found.");
        return;
    }

    for product in products.iter().take(window.visible()) {
        let in_cart = if state.store().is_in_cart(product.id) {
            " [in cart]"
        } else {
            ""
        };
        let size = product.size.as_deref().unwrap_or("-");
        let team = product.team.as_deref().unwrap_or("-");
        println!(
            "#{:<6} {:<40} {:>12}  size {:<6} {}{}",
            product.id, product.name, product.price, size, team, in_cart
        );
    }

    if !window.is_exhausted() {
        println!(
            "... {} more (showing {} of {})",
            products.len() - window.visible(),
            window.visible(),
            products.len()
        );
    }
}
