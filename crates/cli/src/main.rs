//! Rocketshoes CLI - cart inspection and management.
//!
//! Works on the same cart storage file and catalog as the storefront server,
//! configured through the same environment variables.
//!
//! # Usage
//!
//! ```bash
//! # Show the stored cart
//! rs-cli cart show
//!
//! # Add one unit of product 3
//! rs-cli cart add 3
//!
//! # Set product 3 to two units
//! rs-cli cart update 3 2
//!
//! # Remove product 3
//! rs-cli cart remove 3
//!
//! # List the catalog with stock levels
//! rs-cli products
//! ```
//!
//! # Commands
//!
//! - `cart` - Show and change the stored cart
//! - `products` - List catalog products

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use rocketshoes_core::ProductId;

mod commands;

#[derive(Parser)]
#[command(name = "rs-cli")]
#[command(author, version, about = "Rocketshoes CLI tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show and change the stored cart
    Cart {
        #[command(subcommand)]
        action: CartAction,
    },
    /// List catalog products with stock levels
    Products,
}

#[derive(Subcommand)]
enum CartAction {
    /// Print the cart
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        product_id: i32,
    },
    /// Remove a product
    Remove {
        /// Product id
        product_id: i32,
    },
    /// Set the amount of a product already in the cart
    Update {
        /// Product id
        product_id: i32,

        /// New amount (must be at least 1)
        #[arg(allow_negative_numbers = true)]
        amount: i64,
    },
}

#[tokio::main]
async fn main() {
    // Initialize tracing; cart notifications are logged at warn level
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "warn,rs_cli=info".into());
    tracing_subscriber::fmt().with_env_filter(env_filter).init();

    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<(), commands::CommandError> {
    match cli.command {
        Commands::Cart { action } => match action {
            CartAction::Show => commands::cart::show()?,
            CartAction::Add { product_id } => {
                commands::cart::add(ProductId::new(product_id)).await?;
            }
            CartAction::Remove { product_id } => {
                commands::cart::remove(ProductId::new(product_id))?;
            }
            CartAction::Update { product_id, amount } => {
                commands::cart::update(ProductId::new(product_id), amount).await?;
            }
        },
        Commands::Products => commands::products::list().await?,
    }
    Ok(())
}
