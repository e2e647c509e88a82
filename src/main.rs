use anyhow::Result;
use clap::Parser;

use solarsite::cli::{Cli, Commands};
use solarsite::commands;

fn main() -> Result<()> {
    let cli = Cli::parse();
    match &cli.command {
        Commands::Profile(args) => commands::profile(&cli, args),
    }
}
