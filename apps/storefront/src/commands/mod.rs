//! Command-line surface.
//!
//! ```text
//! wellness-storefront [--config PATH] <COMMAND>
//!
//!   catalog    [--search TEXT] [--category NAME]
//!   locations  --depth LEVEL [--path ID,ID,...]
//!   order      --token T --item ID[:QTY]... --name N --phone P
//!              [--email E] [--payment METHOD] [--address A]
//!   config     [--init]
//! ```

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use wellness_client::ClientConfig;

use crate::error::CliResult;

mod catalog;
mod config;
mod locations;
mod order;

#[derive(Debug, Parser)]
#[command(name = "wellness-storefront", about = "Wellness Pharmacy storefront", long_about = None)]
pub struct Cli {
    /// Path to storefront.toml (defaults to the platform config directory)
    #[arg(long, global = true, env = "WELLNESS_CONFIG")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// List sellable products
    Catalog(catalog::CatalogArgs),
    /// Resolve a location down the PROVINCE → VILLAGE hierarchy
    Locations(locations::LocationsArgs),
    /// Place an order for one or more products
    Order(order::OrderArgs),
    /// Show the effective configuration
    Config(config::ConfigArgs),
}

impl Cli {
    pub async fn execute(self, config: ClientConfig) -> CliResult<()> {
        match self.command {
            Commands::Catalog(args) => catalog::run(args, &config).await,
            Commands::Locations(args) => locations::run(args, &config).await,
            Commands::Order(args) => order::run(args, &config).await,
            Commands::Config(args) => config::run(args, config, self.config),
        }
    }
}
