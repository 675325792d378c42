use clap::{Args, ValueEnum};
use wellness_client::{ClientConfig, HttpApi, LocationSelector};
use wellness_core::{LocationId, LocationLevel};

use crate::error::{CliError, CliResult};

#[derive(Debug, Clone, Copy, ValueEnum)]
pub(crate) enum Depth {
    Province,
    District,
    Sector,
    Cell,
    Village,
}

impl From<Depth> for LocationLevel {
    fn from(depth: Depth) -> Self {
        match depth {
            Depth::Province => LocationLevel::Province,
            Depth::District => LocationLevel::District,
            Depth::Sector => LocationLevel::Sector,
            Depth::Cell => LocationLevel::Cell,
            Depth::Village => LocationLevel::Village,
        }
    }
}

#[derive(Debug, Args)]
pub(crate) struct LocationsArgs {
    /// Deepest level to resolve (company: province, staff: village)
    #[arg(long, value_enum, default_value = "village")]
    depth: Depth,

    /// Ids to select from PROVINCE downward
    #[arg(long, value_delimiter = ',')]
    path: Vec<i64>,
}

pub(crate) async fn run(args: LocationsArgs, config: &ClientConfig) -> CliResult<()> {
    let target = LocationLevel::from(args.depth);
    if args.path.len() > target.index() + 1 {
        return Err(CliError::usage(format!(
            "--path has {} ids but {} is only {} levels deep",
            args.path.len(),
            target,
            target.index() + 1
        )));
    }

    let selector = LocationSelector::new(HttpApi::from_config(config)?, target);
    selector.initialize().await?;

    for (level, raw) in LocationLevel::ALL.into_iter().zip(&args.path) {
        selector.select(level, Some(LocationId::new(*raw))).await?;
    }

    // Every level that has options, up to the first one still waiting for a choice.
    let shown = (args.path.len() + 1).min(target.index() + 1);
    for level in &LocationLevel::ALL[..shown] {
        let selected = selector.selected(*level);
        println!("{}:", level);
        for node in selector.options(*level) {
            let marker = if Some(node.id) == selected { '*' } else { ' ' };
            println!(" {} {:>8}  {}", marker, node.id, node.name);
        }
    }

    match selector.resolved() {
        Some(resolved) => println!("resolved {}: {}", target, resolved),
        None => println!("unresolved: select down to {}", target),
    }

    Ok(())
}
