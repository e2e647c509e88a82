use clap::{Args, Parser, Subcommand, ValueHint};
use std::path::PathBuf;

/// Solar site suitability profiler (argument schema only)
#[derive(Parser, Debug)]
#[command(name = "solarsite", version, about, propagate_version = true)]
pub struct Cli {
    /// Increase output verbosity (-v, -vv)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Profile every site in an input feature collection
    Profile(ProfileArgs),
}

#[derive(Args, Debug)]
pub struct ProfileArgs {
    /// Job label stamped into every output row (SiteGroup)
    pub job: String,

    /// Input site polygons (.shp), projected CRS with meter units
    #[arg(value_hint = ValueHint::FilePath)]
    pub sites: PathBuf,

    /// Reference-dataset locations (JSON)
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub config: PathBuf,

    /// Output table (CSV), rewritten after every site
    #[arg(short, long, value_hint = ValueHint::FilePath)]
    pub output: PathBuf,

    /// Overwrite if the output file exists
    #[arg(long)]
    pub force: bool,
}
