#![doc = "Solar site suitability profiling public API"]
pub mod cli;
pub mod commands;
mod common;
mod pipeline;
mod raster;
mod record;
mod refdata;
mod sink;
mod types;

#[doc(inline)]
pub use pipeline::{
    classify_slope, estimate_distances, intersects_mine_permit, lookup_county, resolve_region,
    tabulate_all_land, tabulate_good_land, CountyMatch, Pipeline, RunSummary, SlopeAreas,
    SlopeBucket, TransmissionCategory, TransmissionDistances,
};

#[doc(inline)]
pub use raster::{read_ascii_grid, ClassRaster, CrossTab, GeoTransform, Raster, ReclassRule};

#[doc(inline)]
pub use record::{ResultTable, SuitabilityRecord, COLUMNS};

#[doc(inline)]
pub use refdata::{
    CountyLayer, LineLayer, PolygonLayer, ReferenceData, Region, RegionConfig, RunConfig,
    TransmissionConfig, TransmissionLayers,
};

#[doc(inline)]
pub use sink::CsvSink;

#[doc(inline)]
pub use types::{Parcel, ACRES_PER_SQ_METER, MILES_PER_METER, SENTINEL};
