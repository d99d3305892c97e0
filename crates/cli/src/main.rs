//! Tifo CLI - terminal storefront client.
//!
//! Drives the storefront engine against a live backend: browse the
//! catalog, manage the cart and favorites, check out, and inspect the
//! order timeline.
//!
//! # Usage
//!
//! ```bash
//! # Browse jerseys, searching and filtering locally
//! tifo browse --category jerseys --search arsenal --size M --sort price-asc
//!
//! # Cart operations
//! tifo cart show
//! tifo cart add 42
//! tifo cart remove 17
//! tifo cart checkout
//!
//! # Favorites
//! tifo favorites show
//! tifo favorites toggle 42
//!
//! # Order timeline (admin read/write path)
//! tifo orders list --start-date 2024-05-01T00:00:00Z
//! tifo orders advance 12
//! ```
//!
//! # Environment Variables
//!
//! - `TIFO_API_BASE` - Base URL of the store backend
//! - `TIFO_TELEGRAM_USER_ID` - Telegram user ID sent as identity

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};

use tifo_storefront::config::StorefrontConfig;
use tifo_storefront::state::AppState;

mod commands;

use commands::CliError;

#[derive(Parser)]
#[command(name = "tifo")]
#[command(author, version, about = "Tifo terminal storefront")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Browse the product catalog
    Browse(commands::browse::BrowseArgs),
    /// Manage the cart
    Cart {
        #[command(subcommand)]
        action: commands::cart::CartAction,
    },
    /// Manage favorites
    Favorites {
        #[command(subcommand)]
        action: commands::favorites::FavoritesAction,
    },
    /// Inspect and advance the order timeline
    Orders {
        #[command(subcommand)]
        action: commands::orders::OrdersAction,
    },
}

#[tokio::main]
async fn main() -> Result<(), CliError> {
    // Defaults to warnings only; RUST_LOG overrides
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "tifo_storefront=warn".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    let config = StorefrontConfig::from_env()?;
    let state = AppState::new(config);

    match cli.command {
        Commands::Browse(args) => commands::browse::run(&state, args).await,
        Commands::Cart { action } => commands::cart::run(&state, action).await,
        Commands::Favorites { action } => commands::favorites::run(&state, action).await,
        Commands::Orders { action } => commands::orders::run(&state, action).await,
    }
}
