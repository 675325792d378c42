use std::path::PathBuf;

use clap::Args;
use tracing::info;
use wellness_client::ClientConfig;

use crate::error::CliResult;

#[derive(Debug, Args)]
pub(crate) struct ConfigArgs {
    /// Write the effective configuration to storefront.toml
    #[arg(long)]
    init: bool,
}

pub(crate) fn run(args: ConfigArgs, config: ClientConfig, path: Option<PathBuf>) -> CliResult<()> {
    if args.init {
        config.save(path.clone())?;
        info!(path = ?path.or_else(ClientConfig::default_config_path), "Configuration written");
    }

    println!("{}", serde_json::to_string_pretty(&config)?);
    Ok(())
}
