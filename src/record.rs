use anyhow::Result;
use polars::prelude::{Column, DataFrame};

use crate::pipeline::{SlopeAreas, SlopeBucket, TransmissionCategory, TransmissionDistances};

/// Fixed output schema, one record per parcel.
pub const COLUMNS: [&str; 24] = [
    "Index",
    "SiteGroup",
    "SourceFID",
    "Area",
    "FlatGoodLULC",
    "UnknownkV",
    "Under100kV",
    "100to161kV",
    "345kV",
    "500kV",
    "735kV",
    "AllSlope0to5",
    "AllSlope5to10",
    "AllSlope10to15",
    "AllSlope15to20",
    "AllSlopeOver20",
    "GoodLULC0to5",
    "GoodLULC5to10",
    "GoodLULC10to15",
    "GoodLULC15to20",
    "GoodLULCOver20",
    "MinePermits",
    "Owner",
    "County",
];

/// One assembled suitability row. Immutable once appended to the table.
#[derive(Debug, Clone)]
pub struct SuitabilityRecord {
    pub index: u32,
    pub site_group: String,
    pub source_fid: u64,
    pub area_acres: f64,
    pub transmission: TransmissionDistances,
    pub all_slope: SlopeAreas,
    pub good_slope: SlopeAreas,
    pub mine_permits: bool,
    pub owner: String,
    pub county: String,
}

impl SuitabilityRecord {
    /// Sum of the two lowest good-land buckets, reported as FlatGoodLULC.
    #[inline]
    pub fn flat_good_acres(&self) -> f64 {
        self.good_slope.flat_acres()
    }
}

/// Append-only result table, rebuilt fresh each run.
#[derive(Debug, Default)]
pub struct ResultTable {
    rows: Vec<SuitabilityRecord>,
}

impl ResultTable {
    pub fn new() -> Self {
        Self::default()
    }

    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn push(&mut self, row: SuitabilityRecord) {
        self.rows.push(row);
    }

    /// Materialize the fixed-schema DataFrame for the sink.
    pub fn to_dataframe(&self) -> Result<DataFrame> {
        let rows = &self.rows;
        let mut columns: Vec<Column> = Vec::with_capacity(COLUMNS.len());

        columns.push(Column::new("Index".into(), rows.iter().map(|r| r.index).collect::<Vec<_>>()));
        columns.push(Column::new(
            "SiteGroup".into(),
            rows.iter().map(|r| r.site_group.clone()).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "SourceFID".into(),
            rows.iter().map(|r| r.source_fid).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "Area".into(),
            rows.iter().map(|r| r.area_acres).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "FlatGoodLULC".into(),
            rows.iter().map(|r| r.flat_good_acres()).collect::<Vec<_>>(),
        ));
        for category in TransmissionCategory::ALL {
            columns.push(Column::new(
                category.column().into(),
                rows.iter().map(|r| r.transmission.get(category)).collect::<Vec<_>>(),
            ));
        }
        for bucket in SlopeBucket::ALL {
            columns.push(Column::new(
                all_slope_column(bucket).into(),
                rows.iter().map(|r| r.all_slope.get(bucket)).collect::<Vec<_>>(),
            ));
        }
        for bucket in SlopeBucket::ALL {
            columns.push(Column::new(
                good_slope_column(bucket).into(),
                rows.iter().map(|r| r.good_slope.get(bucket)).collect::<Vec<_>>(),
            ));
        }
        columns.push(Column::new(
            "MinePermits".into(),
            rows.iter().map(|r| if r.mine_permits { "yes" } else { "no" }).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "Owner".into(),
            rows.iter().map(|r| r.owner.clone()).collect::<Vec<_>>(),
        ));
        columns.push(Column::new(
            "County".into(),
            rows.iter().map(|r| r.county.clone()).collect::<Vec<_>>(),
        ));

        Ok(DataFrame::new(columns)?)
    }
}

fn all_slope_column(bucket: SlopeBucket) -> &'static str {
    match bucket {
        SlopeBucket::ZeroToFive => "AllSlope0to5",
        SlopeBucket::FiveToTen => "AllSlope5to10",
        SlopeBucket::TenToFifteen => "AllSlope10to15",
        SlopeBucket::FifteenToTwenty => "AllSlope15to20",
        SlopeBucket::OverTwenty => "AllSlopeOver20",
    }
}

fn good_slope_column(bucket: SlopeBucket) -> &'static str {
    match bucket {
        SlopeBucket::ZeroToFive => "GoodLULC0to5",
        SlopeBucket::FiveToTen => "GoodLULC5to10",
        SlopeBucket::TenToFifteen => "GoodLULC10to15",
        SlopeBucket::FifteenToTwenty => "GoodLULC15to20",
        SlopeBucket::OverTwenty => "GoodLULCOver20",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn sample_record(index: u32) -> SuitabilityRecord {
        SuitabilityRecord {
            index,
            site_group: "TestJob".to_string(),
            source_fid: index as u64 + 10,
            area_acres: 10.0,
            transmission: TransmissionDistances::from_raw([0.5, 1.0, 1.5, 2.0, 2.5, 3.0]),
            all_slope: SlopeAreas::from_raw([10.0, 0.0, 0.0, 0.0, 0.0]),
            good_slope: SlopeAreas::from_raw([7.5, 2.5, 0.0, 0.0, 0.0]),
            mine_permits: false,
            owner: "NA".to_string(),
            county: "Braxton".to_string(),
        }
    }

    #[test]
    fn dataframe_has_the_fixed_schema_in_order() {
        let mut table = ResultTable::new();
        table.push(sample_record(0));
        let df = table.to_dataframe().unwrap();
        let names: Vec<&str> = df.get_column_names().iter().map(|s| s.as_str()).collect();
        assert_eq!(names, COLUMNS.to_vec());
        assert_eq!(df.height(), 1);
    }

    #[test]
    fn flat_good_is_exactly_the_two_lowest_good_buckets() {
        let record = sample_record(0);
        assert_eq!(record.flat_good_acres(), 10.0);
    }

    #[test]
    fn mine_permits_serializes_as_yes_no() {
        let mut table = ResultTable::new();
        let mut with_permit = sample_record(0);
        with_permit.mine_permits = true;
        table.push(with_permit);
        table.push(sample_record(1));
        let df = table.to_dataframe().unwrap();
        let col = df.column("MinePermits").unwrap();
        let vals = col.as_materialized_series().str().unwrap();
        assert_eq!(vals.get(0), Some("yes"));
        assert_eq!(vals.get(1), Some("no"));
    }
}
