//! Product Gallery CLI - catalog queries and cart management.
//!
//! # Usage
//!
//! ```bash
//! # List products, optionally filtered and sorted
//! gallery-cli catalog products --category electronics --sort price-low
//!
//! # List categories
//! gallery-cli catalog categories
//!
//! # Inspect and edit the saved cart
//! gallery-cli cart show
//! gallery-cli cart add 3
//! gallery-cli cart remove 0
//! gallery-cli cart clear
//! ```
//!
//! # Commands
//!
//! - `catalog` - Query the remote catalog API
//! - `cart` - Manage the cart file shared with the storefront

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use product_gallery_core::ProductId;
use product_gallery_storefront::config::{CatalogConfig, StorefrontConfig};

mod commands;

#[derive(Parser)]
#[command(name = "gallery-cli")]
#[command(author, version, about = "Product Gallery CLI tools")]
struct Cli {
    /// Catalog API base URL (overrides `CATALOG_API_URL`)
    #[arg(long, global = true)]
    api_url: Option<String>,

    /// Cart file path (overrides `GALLERY_CART_PATH`)
    #[arg(long, global = true)]
    cart_path: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the catalog API
    Catalog {
        #[command(subcommand)]
        action: CatalogAction,
    },
    /// Manage the saved cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
}

#[derive(Subcommand)]
enum CatalogAction {
    /// List products
    Products {
        /// Only products in this category
        #[arg(short, long)]
        category: Option<String>,

        /// Sort key (`price-low`, `price-high`, `rating-high`)
        #[arg(short, long, default_value = "")]
        sort: String,
    },
    /// List categories
    Categories,
}

#[derive(Subcommand)]
enum CartAction {
    /// Show cart entries and total
    Show,
    /// Add a product from the catalog
    Add {
        /// Catalog product ID
        id: ProductId,
    },
    /// Remove the entry at a position
    Remove {
        /// Zero-based position, as listed by `cart show`
        position: usize,
    },
    /// Remove every entry
    Clear,
}

#[tokio::main]
async fn main() {
    // Command output goes through tracing; show info unless RUST_LOG says otherwise
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let result: Result<(), Box<dyn std::error::Error>> = run(cli).await;

    if let Err(e) = result {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let config = load_config(cli.api_url.as_deref(), cli.cart_path)?;

    match cli.command {
        Commands::Catalog { action } => match action {
            CatalogAction::Products { category, sort } => {
                commands::catalog::products(&config, category.as_deref(), &sort).await?;
            }
            CatalogAction::Categories => commands::catalog::categories(&config).await?,
        },
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show(&config),
            CartAction::Add { id } => commands::cart::add(&config, id).await?,
            CartAction::Remove { position } => commands::cart::remove(&config, position)?,
            CartAction::Clear => commands::cart::clear(&config),
        },
    }
    Ok(())
}

/// Environment configuration with command-line overrides applied.
fn load_config(
    api_url: Option<&str>,
    cart_path: Option<PathBuf>,
) -> Result<StorefrontConfig, commands::CommandError> {
    let mut config = StorefrontConfig::from_env()?;
    if let Some(url) = api_url {
        config.catalog = CatalogConfig::parse(url)?;
    }
    if let Some(path) = cart_path {
        config.cart_path = path;
    }
    Ok(config)
}
