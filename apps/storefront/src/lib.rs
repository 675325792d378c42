//! # Wellness Storefront CLI
//!
//! Command-line front door to the storefront engine.
//!
//! ## Module Organization
//! ```text
//! wellness_storefront/
//! ├── lib.rs            ◄─── You are here (logging, config, runtime)
//! ├── commands/
//! │   ├── mod.rs        ◄─── Cli / Commands (clap)
//! │   ├── catalog.rs    ◄─── Browse sellable products
//! │   ├── locations.rs  ◄─── Walk the location hierarchy
//! │   ├── order.rs      ◄─── Cart + checkout + submit in one go
//! │   └── config.rs     ◄─── Show or write storefront.toml
//! └── error.rs          ◄─── CliError (kind + message)
//! ```

pub mod commands;
pub mod error;

use std::process::ExitCode;

use clap::Parser;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;
use wellness_client::ClientConfig;

use commands::Cli;

/// Parses arguments and runs one command to completion.
///
/// ## Startup Sequence
/// ```text
/// ┌─────────────────────────────────────────────────────────────────────────┐
/// │  1. Initialize Logging ─── stderr, RUST_LOG overrides the default      │
/// │  2. Load Config ────────── --config, else platform config dir, + env   │
/// │  3. Build Runtime ──────── multi-threaded tokio                        │
/// │  4. Execute Command ────── errors printed as JSON, exit code 1         │
/// └─────────────────────────────────────────────────────────────────────────┘
/// ```
pub fn run() -> ExitCode {
    let cli = Cli::parse();
    init_tracing();

    info!("Starting Wellness Storefront");

    let config = ClientConfig::load_or_default(cli.config.clone());

    let runtime = match tokio::runtime::Builder::new_multi_thread()
        .enable_all()
        .build()
    {
        Ok(runtime) => runtime,
        Err(e) => {
            error!(error = %e, "Failed to start async runtime");
            return ExitCode::FAILURE;
        }
    };

    match runtime.block_on(cli.execute(config)) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.to_json());
            ExitCode::FAILURE
        }
    }
}

/// Initializes the tracing subscriber for structured logging.
///
/// ## Log Levels
/// - `RUST_LOG=debug` - Show debug messages
/// - `RUST_LOG=wellness_client=trace` - Trace the client crate only
/// - Default: INFO, DEBUG for the wellness crates
fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("info,wellness=debug,reqwest=warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}
