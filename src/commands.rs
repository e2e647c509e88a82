use anyhow::{bail, Context, Result};

use crate::cli::{Cli, ProfileArgs};
use crate::common::{read_parcels, require_file_exists};
use crate::pipeline::Pipeline;
use crate::refdata::{ReferenceData, RunConfig};
use crate::sink::CsvSink;

pub fn profile(cli: &Cli, args: &ProfileArgs) -> Result<()> {
    if cli.verbose > 0 {
        eprintln!(
            "[profile] job={} sites={} -> {}",
            args.job,
            args.sites.display(),
            args.output.display()
        );
    }

    require_file_exists(&args.config)?;
    let config = RunConfig::read(&args.config)?;
    let refdata = ReferenceData::load(&config, cli.verbose).context("loading reference data")?;

    let parcels = read_parcels(&args.sites)
        .with_context(|| format!("reading sites from {}", args.sites.display()))?;
    if parcels.is_empty() {
        bail!("Input collection {} has no polygon features", args.sites.display());
    }
    if cli.verbose > 0 {
        eprintln!("[profile] {} sites to process", parcels.len());
    }

    let sink = CsvSink::create(&args.output, args.force)?;
    let summary = Pipeline::new(&refdata, args.job.as_str()).run(&parcels, &sink)?;

    println!(
        "Wrote {} rows to {} ({} sites unresolved)",
        summary.rows_written,
        sink.path().display(),
        summary.unresolved.len()
    );
    if !summary.unresolved.is_empty() {
        eprintln!("[profile] unresolved sites (no containing region): {:?}", summary.unresolved);
    }
    if !summary.ambiguous_counties.is_empty() {
        eprintln!("[profile] sites with ambiguous county: {:?}", summary.ambiguous_counties);
    }

    Ok(())
}
