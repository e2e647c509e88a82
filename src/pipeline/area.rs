use crate::raster::{tabulate_area, ClassRaster, CrossTab, Raster};
use crate::types::{Parcel, ACRES_PER_SQ_METER, SENTINEL};

use super::slope::{SlopeBucket, SLOPE_CLASS_UNIVERSE};

/// Acres per slope bucket for one parcel. Built fresh per parcel so a
/// partial failure can never leak a stale value into the next parcel.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SlopeAreas {
    acres: [f64; 5],
}

impl SlopeAreas {
    #[inline]
    pub fn get(&self, bucket: SlopeBucket) -> f64 {
        self.acres[bucket as usize]
    }

    /// FlatGoodLULC-style sum of the two lowest buckets.
    pub fn flat_acres(&self) -> f64 {
        self.get(SlopeBucket::ZeroToFive) + self.get(SlopeBucket::FiveToTen)
    }

    /// Read one zone's bucket acreages off a cross-tabulation.
    ///
    /// Each bucket is read independently: a bucket whose class column is
    /// absent records the sentinel without disturbing its siblings, and an
    /// absent zone row reads as zero area.
    pub fn from_crosstab(tab: &CrossTab, zone: i64) -> Self {
        let mut acres = [0.0; 5];
        for bucket in SlopeBucket::ALL {
            acres[bucket as usize] = bucket_acres(tab, zone, bucket);
        }
        Self { acres }
    }

    #[cfg(test)]
    pub(crate) fn from_raw(acres: [f64; 5]) -> Self {
        Self { acres }
    }
}

fn bucket_acres(tab: &CrossTab, zone: i64, bucket: SlopeBucket) -> f64 {
    let mut square_meters = 0.0;
    for &class in bucket.classes() {
        match tab.area(zone, class) {
            Some(a) => square_meters += a,
            None => return SENTINEL,
        }
    }
    square_meters * ACRES_PER_SQ_METER
}

/// Run A: area per slope bucket over all land in the parcel. The classed
/// grid is already scoped to the parcel, so the parcel id is the one zone.
pub fn tabulate_all_land(parcel: &Parcel, classed: &ClassRaster) -> SlopeAreas {
    let zone = parcel.fid as i64;
    let tab = tabulate_area(classed, &SLOPE_CLASS_UNIVERSE, |_, _| Some(zone));
    SlopeAreas::from_crosstab(&tab, zone)
}

/// Run B: area per slope bucket restricted to good-for-solar land. Zones
/// come from the 0/1 good-LULC grid; only the "good" row is consulted and
/// area under "not good" is discarded.
pub fn tabulate_good_land(lulc_good: &Raster, classed: &ClassRaster) -> SlopeAreas {
    let tab = tabulate_area(classed, &SLOPE_CLASS_UNIVERSE, |x, y| {
        lulc_good.sample(x, y).map(|v| v.round() as i64)
    });
    SlopeAreas::from_crosstab(&tab, 1)
}
