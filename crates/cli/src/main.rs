//! Shopping Cart CLI - a terminal view over the persisted cart.
//!
//! # Usage
//!
//! ```bash
//! # Add one unit of product 5
//! cart add 5
//!
//! # Show the cart as text or as a JSON snapshot
//! cart show
//! cart show --json
//!
//! # Work interactively (open/close the panel, several edits per session)
//! cart shell
//!
//! # Use a different slot
//! cart --data-dir /tmp/carts --key guest-cart show
//! ```
//!
//! # Commands
//!
//! - `show` - Render the cart
//! - `qty` - Print one product's quantity
//! - `add` / `decrease` / `remove` / `clear` - Edit the cart
//! - `shell` - Interactive event loop on stdin

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use shopping_cart_cli::commands::{cart, shell};
use shopping_cart_cli::{CartConfig, CommandError};
use shopping_cart_core::{CartStore, JsonFileSlot, ProductId};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "cart")]
#[command(author, version, about = "Shopping cart CLI")]
struct Cli {
    /// Directory holding the cart slot (overrides `CART_DATA_DIR`)
    #[arg(long, global = true)]
    data_dir: Option<PathBuf>,

    /// Slot key the cart is stored under (overrides `CART_STORAGE_KEY`)
    #[arg(long, global = true)]
    key: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the cart
    Show {
        /// Print a JSON snapshot instead of text
        #[arg(long)]
        json: bool,
    },
    /// Print the quantity of a product
    Qty {
        /// Product ID
        id: ProductId,
    },
    /// Add one unit of a product
    Add {
        /// Product ID
        id: ProductId,
    },
    /// Remove one unit of a product
    Decrease {
        /// Product ID
        id: ProductId,
    },
    /// Remove a product entirely
    Remove {
        /// Product ID
        id: ProductId,
    },
    /// Empty the cart
    Clear,
    /// Start an interactive session
    Shell,
}

fn main() {
    // Logs go to stderr so stdout carries only command output
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "shopping_cart_cli=info,shopping_cart_core=info".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer().with_writer(io::stderr))
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), CommandError> {
    let config = CartConfig::from_env()?.with_overrides(cli.data_dir, cli.key)?;
    tracing::debug!(?config, "Configuration loaded");

    let slot = JsonFileSlot::new(&config.data_dir);
    let mut store = CartStore::load_with_key(slot, config.storage_key);

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Show { json } => cart::show(&store, json, &mut out),
        Commands::Qty { id } => cart::quantity(&store, id, &mut out),
        Commands::Add { id } => cart::add(&mut store, id, &mut out),
        Commands::Decrease { id } => cart::decrease(&mut store, id, &mut out),
        Commands::Remove { id } => cart::remove(&mut store, id, &mut out),
        Commands::Clear => cart::clear(&mut store, &mut out),
        Commands::Shell => shell::run(&mut store, io::stdin().lock(), &mut out),
    }?;

    out.flush()?;
    Ok(())
}
