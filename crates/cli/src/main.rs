//! Pantry CLI - Catalog queries and selection management.
//!
//! # Usage
//!
//! ```bash
//! # Query the catalog
//! pantry foods by-type 1
//! pantry foods by-ids 1 3
//!
//! # Manage the selected products
//! pantry selection add 3
//! pantry selection remove 3
//! pantry selection set 3 5
//! pantry selection show
//! pantry selection clear
//! ```
//!
//! # Environment Variables
//!
//! - `PANTRY_CATALOG_PATH` - Catalog JSON asset (or `--catalog`)
//! - `PANTRY_COOKIE_JAR` - Cookie jar file (or `--jar`)
//! - `RUST_LOG` - Log filter (default: `pantry=info`)

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::io::{self, Write};
use std::path::PathBuf;

use clap::{Parser, Subcommand};

use pantry_core::{ProductId, ProductType};
use pantry_storefront::AppError;
use pantry_storefront::assets::load_catalog;
use pantry_storefront::config::{Overrides, PantryConfig};
use pantry_storefront::cookies::system_clock;

mod commands;

#[derive(Parser)]
#[command(name = "pantry")]
#[command(author, version, about = "Pantry CLI tools")]
struct Cli {
    /// Catalog JSON asset (overrides `PANTRY_CATALOG_PATH`)
    #[arg(long, global = true)]
    catalog: Option<PathBuf>,

    /// Cookie jar file (overrides `PANTRY_COOKIE_JAR`)
    #[arg(long, global = true)]
    jar: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Query the product catalog
    Foods {
        #[command(subcommand)]
        query: FoodsQuery,
    },
    /// Manage the selected products
    Selection {
        #[command(subcommand)]
        action: SelectionAction,
    },
}

#[derive(Subcommand)]
enum FoodsQuery {
    /// List products of a category type
    ByType {
        /// Category type
        product_type: ProductType,
    },
    /// List products by id, in catalog order
    ByIds {
        /// Product ids
        #[arg(required = true)]
        ids: Vec<ProductId>,
    },
}

#[derive(Subcommand)]
enum SelectionAction {
    /// Show the selected products with their quantities
    Show,
    /// Add one unit of a product
    Add {
        /// Product id
        id: ProductId,
    },
    /// Remove one unit of a product
    Remove {
        /// Product id
        id: ProductId,
    },
    /// Set the quantity of a product (0 removes it)
    Set {
        /// Product id
        id: ProductId,
        /// Quantity
        #[arg(allow_negative_numbers = true)]
        cant: i32,
    },
    /// Forget the selection
    Clear,
    /// Print the raw cookie string
    Cookie,
}

fn main() {
    // Defaults to info level for our crates if RUST_LOG is not set
    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "pantry=info,pantry_storefront=info".into());

    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(io::stderr)
        .init();

    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        tracing::error!("Command failed: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), AppError> {
    let config = PantryConfig::from_env(Overrides {
        catalog_path: cli.catalog,
        cookie_jar: cli.jar,
    })?;

    let stdout = io::stdout();
    let mut out = stdout.lock();

    match cli.command {
        Commands::Foods { query } => {
            let catalog = load_catalog(&config.catalog_path)?;
            match query {
                FoodsQuery::ByType { product_type } => {
                    commands::foods::by_type(&catalog, product_type, &mut out)?;
                }
                FoodsQuery::ByIds { ids } => {
                    commands::foods::by_ids(&catalog, &ids, &mut out)?;
                }
            }
        }
        Commands::Selection { action } => {
            commands::selection::with_jar(&config.cookie_jar, system_clock(), |store| {
                match action {
                    SelectionAction::Show => {
                        let catalog = load_catalog(&config.catalog_path)?;
                        commands::selection::show(store, &catalog, &mut out)?;
                    }
                    SelectionAction::Add { id } => commands::selection::add(store, id, &mut out)?,
                    SelectionAction::Remove { id } => {
                        commands::selection::remove(store, id, &mut out)?;
                    }
                    SelectionAction::Set { id, cant } => {
                        commands::selection::set(store, id, cant, &mut out)?;
                    }
                    SelectionAction::Clear => commands::selection::clear(store),
                    SelectionAction::Cookie => commands::selection::cookie(store, &mut out)?,
                }
                Ok(())
            })?;
        }
    }

    out.flush()?;
    Ok(())
}
