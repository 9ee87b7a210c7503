//! Command implementations

mod gemeinden;
mod geocode;
mod melt;
mod normalize;

use crate::cli::{Cli, Commands};
use crate::output::OutputWriter;
use anyhow::Result;

/// Execute a CLI command
pub async fn execute(cli: Cli) -> Result<()> {
    let output = OutputWriter::new(cli.json);

    match cli.command {
        Commands::Geocode(args) => geocode::execute(args, cli.config.as_deref(), &output).await,
        Commands::Normalize(args) => normalize::execute(args, &output),
        Commands::Melt(args) => melt::execute(args, &output),
        Commands::Gemeinden(args) => gemeinden::execute(args, &output),
    }
}
