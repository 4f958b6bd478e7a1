use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod cart;
mod filter;
mod products;

use cart::CartCommands;
use filter::FilterArgs;
use products::PageKind;

#[derive(Debug, Parser)]
#[command(name = "fdshop")]
#[command(about = "Product extraction, cart and filter tooling for fdshop pages")]
struct Cli {
    /// Storage file standing in for browser local storage
    #[arg(long, global = true)]
    storage: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List the products extracted from a page
    Products {
        page: PathBuf,
        #[arg(long, value_enum, default_value = "listing")]
        kind: PageKind,
        /// Page URL used to absolutize image sources
        #[arg(long)]
        base_url: Option<String>,
        #[arg(long)]
        json: bool,
    },
    /// Inspect or change the persisted cart
    Cart {
        #[command(subcommand)]
        command: CartCommands,
    },
    /// Filter a listing page
    Filter(FilterArgs),
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    let mut config = fdshop_core::load_app_config()?;
    if let Some(path) = cli.storage {
        config.storage_path = path;
    }

    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();
    tracing::debug!(env = %config.env, storage = %config.storage_path.display(), "config loaded");

    match cli.command {
        Commands::Products {
            page,
            kind,
            base_url,
            json,
        } => products::run_products(&page, kind, base_url.as_deref(), json)?,
        Commands::Cart { command } => cart::run_cart(&config, command)?,
        Commands::Filter(args) => filter::run_filter(&config, &args)?,
    }

    Ok(())
}
