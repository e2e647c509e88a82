use anyhow::Result;

use crate::record::{ResultTable, SuitabilityRecord};
use crate::refdata::{ReferenceData, Region};
use crate::sink::CsvSink;
use crate::types::Parcel;

use super::area::{tabulate_all_land, tabulate_good_land};
use super::county::lookup_county;
use super::mine::intersects_mine_permit;
use super::region::resolve_region;
use super::slope::classify_slope;
use super::transmission::estimate_distances;

/// Owner attribute is not yet available on the input features.
const OWNER_UNAVAILABLE: &str = "NA";

/// What a run did, beyond the rows on disk.
#[derive(Debug, Default)]
pub struct RunSummary {
    pub rows_written: usize,
    /// Parcels no region completely contains; skipped, no row emitted.
    pub unresolved: Vec<u64>,
    /// Parcels intersecting more than one county; row emitted, County empty.
    pub ambiguous_counties: Vec<u64>,
}

/// Drives the per-parcel pipeline: region resolution, slope classification,
/// the two area tabulations, transmission distances, the mine-permit test,
/// row assembly, and the per-parcel checkpoint. Strictly sequential, one
/// parcel at a time, in input order.
pub struct Pipeline<'a> {
    refdata: &'a ReferenceData,
    job: String,
}

impl<'a> Pipeline<'a> {
    pub fn new(refdata: &'a ReferenceData, job: impl Into<String>) -> Self {
        Self { refdata, job: job.into() }
    }

    /// Process every parcel, checkpointing the table after each one. Only
    /// conditions with no per-parcel fallback (e.g. a sink write failure)
    /// abort the run; rows already checkpointed stay valid on disk.
    pub fn run(&self, parcels: &[Parcel], sink: &CsvSink) -> Result<RunSummary> {
        let mut table = ResultTable::new();
        let mut summary = RunSummary::default();

        for parcel in parcels {
            println!("Working on feature {}", parcel.fid);

            let Some(region) = resolve_region(&self.refdata.regions, &parcel.geom) else {
                eprintln!(
                    "[profile] no region completely contains feature {}; skipping",
                    parcel.fid
                );
                summary.unresolved.push(parcel.fid);
                continue;
            };

            let row = self.profile(table.len() as u32, parcel, region, &mut summary);
            table.push(row);
            sink.checkpoint(&table)?;
            println!("feature {} complete", parcel.fid);
        }

        summary.rows_written = table.len();
        Ok(summary)
    }

    /// Assemble one parcel's row. Every accumulator here is stack-scoped
    /// and freshly built, so a partial failure cannot leak into the next
    /// parcel.
    fn profile(
        &self,
        index: u32,
        parcel: &Parcel,
        region: &Region,
        summary: &mut RunSummary,
    ) -> SuitabilityRecord {
        let county = lookup_county(&parcel.geom, &self.refdata.counties);
        if county.is_ambiguous() {
            eprintln!("[profile] feature {} intersects multiple counties: {county:?}", parcel.fid);
            summary.ambiguous_counties.push(parcel.fid);
        }

        let classed = classify_slope(&parcel.geom, &region.slope, &self.refdata.flood);
        let all_slope = tabulate_all_land(parcel, &classed);
        let good_slope = tabulate_good_land(&self.refdata.lulc_good, &classed);
        let transmission = estimate_distances(&parcel.geom, &self.refdata.transmission);
        let mine_permits = intersects_mine_permit(&parcel.geom, &self.refdata.mine_permits);

        SuitabilityRecord {
            index,
            site_group: self.job.clone(),
            source_fid: parcel.fid,
            area_acres: parcel.area_acres(),
            transmission,
            all_slope,
            good_slope,
            mine_permits,
            owner: OWNER_UNAVAILABLE.to_string(),
            county: county.column_value().to_string(),
        }
    }
}
