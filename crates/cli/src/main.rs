//! Shoe Shop CLI - manage the shopping cart from the terminal.
//!
//! # Usage
//!
//! ```bash
//! # Show the cart
//! shoe-cart show
//!
//! # Add product 1, then set it to three units
//! shoe-cart add 1
//! shoe-cart set 1 3
//!
//! # Step quantities up or down
//! shoe-cart increment 1
//! shoe-cart decrement 1
//!
//! # Remove product 1
//! shoe-cart remove 1
//! ```
//!
//! # Environment Variables
//!
//! See `shoe_shop_cart::config` for the full list. `RUST_LOG` controls log
//! output, which goes to stderr.

#![cfg_attr(not(test), forbid(unsafe_code))]

use clap::{Parser, Subcommand};
use shoe_shop_cart::CartConfig;
use shoe_shop_core::ProductId;

mod commands;

use commands::cart::{CartAction, CartApp, CommandError};

#[derive(Parser)]
#[command(name = "shoe-cart")]
#[command(author, version, about = "Shoe Shop cart tools")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart with subtotals and total
    Show,
    /// Add one unit of a product
    Add {
        /// Product ID
        product_id: ProductId,
    },
    /// Remove a product from the cart
    Remove {
        /// Product ID
        product_id: ProductId,
    },
    /// Set a product's quantity
    Set {
        /// Product ID
        product_id: ProductId,
        /// New quantity (at least 1, at most the available stock)
        amount: u32,
    },
    /// Add one unit to a product already in the cart
    Increment {
        /// Product ID
        product_id: ProductId,
    },
    /// Take one unit from a product already in the cart
    Decrement {
        /// Product ID
        product_id: ProductId,
    },
}

impl Commands {
    const fn action(&self) -> Option<CartAction> {
        match *self {
            Self::Show => None,
            Self::Add { product_id } => Some(CartAction::Add(product_id)),
            Self::Remove { product_id } => Some(CartAction::Remove(product_id)),
            Self::Set { product_id, amount } => Some(CartAction::Set(product_id, amount)),
            Self::Increment { product_id } => Some(CartAction::Increment(product_id)),
            Self::Decrement { product_id } => Some(CartAction::Decrement(product_id)),
        }
    }
}

#[tokio::main]
async fn main() {
    // Initialize tracing; logs go to stderr so stdout stays the cart table
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shoe_shop_cart=warn,shoe_shop_cli=info".into());
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match run(cli).await {
        Ok(output) => {
            #[allow(clippy::print_stdout)]
            {
                println!("{output}");
            }
        }
        Err(RunError::Command(CommandError::Cart(e))) => {
            #[allow(clippy::print_stderr)]
            {
                eprintln!("{}", e.notice());
            }
            std::process::exit(1);
        }
        Err(e) => {
            tracing::error!("Command failed: {e}");
            std::process::exit(1);
        }
    }
}

#[derive(Debug, thiserror::Error)]
enum RunError {
    #[error(transparent)]
    Config(#[from] shoe_shop_cart::ConfigError),
    #[error(transparent)]
    Command(#[from] CommandError),
}

async fn run(cli: Cli) -> Result<String, RunError> {
    let config = CartConfig::from_env()?;
    tracing::debug!(?config, "Configuration loaded");

    let app = CartApp::open(&config)?;
    let output = match cli.command.action() {
        Some(action) => app.apply(action).await?,
        None => app.show().await?,
    };
    Ok(output)
}
