use geo::MultiPolygon;

use crate::raster::{ClassRaster, Raster, ReclassRule};

/// Percent-grade reclassification: classes 1..=5 for the reporting ranges,
/// class 9 as the catch-all for extreme values (25% and up).
pub const SLOPE_RECLASS: [ReclassRule; 6] = [
    ReclassRule { min: 0.0, max: 5.0, class: 1 },
    ReclassRule { min: 5.0, max: 10.0, class: 2 },
    ReclassRule { min: 10.0, max: 15.0, class: 3 },
    ReclassRule { min: 15.0, max: 20.0, class: 4 },
    ReclassRule { min: 20.0, max: 25.0, class: 5 },
    ReclassRule { min: 25.0, max: 500000.0, class: 9 },
];

/// Every class value a slope tabulation can carry.
pub const SLOPE_CLASS_UNIVERSE: [u8; 6] = [1, 2, 3, 4, 5, 9];

/// The five percent-grade buckets reported per parcel. The raw catch-all
/// class 9 is folded into `OverTwenty` when reading a tabulation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlopeBucket {
    ZeroToFive,
    FiveToTen,
    TenToFifteen,
    FifteenToTwenty,
    OverTwenty,
}

impl SlopeBucket {
    pub const ALL: [SlopeBucket; 5] = [
        SlopeBucket::ZeroToFive,
        SlopeBucket::FiveToTen,
        SlopeBucket::TenToFifteen,
        SlopeBucket::FifteenToTwenty,
        SlopeBucket::OverTwenty,
    ];

    /// Raw reclass values contributing to this bucket.
    pub fn classes(self) -> &'static [u8] {
        match self {
            SlopeBucket::ZeroToFive => &[1],
            SlopeBucket::FiveToTen => &[2],
            SlopeBucket::TenToFifteen => &[3],
            SlopeBucket::FifteenToTwenty => &[4],
            SlopeBucket::OverTwenty => &[5, 9],
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            SlopeBucket::ZeroToFive => "0-5 percent",
            SlopeBucket::FiveToTen => "5-10 percent",
            SlopeBucket::TenToFifteen => "10-15 percent",
            SlopeBucket::FifteenToTwenty => "15-20 percent",
            SlopeBucket::OverTwenty => "Over 20 percent",
        }
    }
}

/// Clip the regional slope grid to the parcel, knock out flood-plain cells,
/// and reclassify into ordinal grade classes. The result is scoped to this
/// parcel and feeds both area tabulations.
pub fn classify_slope(parcel: &MultiPolygon<f64>, slope: &Raster, flood: &Raster) -> ClassRaster {
    slope.clip(parcel).mask(flood).reclassify(&SLOPE_RECLASS)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::raster::GeoTransform;
    use geo::polygon;

    fn flat_raster(value: f64, size: usize) -> Raster {
        Raster::filled(
            GeoTransform::new(0.0, size as f64, 1.0, -1.0),
            -9999.0,
            size,
            size,
            value,
        )
    }

    fn square(x0: f64, y0: f64, size: f64) -> MultiPolygon<f64> {
        MultiPolygon(vec![polygon![
            (x: x0, y: y0),
            (x: x0 + size, y: y0),
            (x: x0 + size, y: y0 + size),
            (x: x0, y: y0 + size),
        ]])
    }

    #[test]
    fn bin_edges_are_half_open() {
        let mut r = flat_raster(0.0, 8);
        for (col, v) in [0.0, 4.999, 5.0, 14.999, 20.0, 24.999, 25.0, 400.0].iter().enumerate() {
            r.data[[0, col]] = *v;
        }
        let classed = r.reclassify(&SLOPE_RECLASS);
        let got: Vec<_> = (0..8).map(|c| classed.get(0, c)).collect();
        assert_eq!(
            got,
            vec![Some(1), Some(1), Some(2), Some(3), Some(5), Some(5), Some(9), Some(9)]
        );
    }

    #[test]
    fn flood_cells_drop_out_of_classification() {
        let slope = flat_raster(3.0, 4);
        let mut flood = flat_raster(1.0, 4);
        flood.data[[2, 2]] = -9999.0;
        let classed = classify_slope(&square(0.0, 0.0, 4.0), &slope, &flood);
        assert_eq!(classed.get(0, 0), Some(1));
        assert_eq!(classed.get(2, 2), None);
    }

    #[test]
    fn buckets_cover_the_class_universe() {
        let mut all: Vec<u8> = SlopeBucket::ALL.iter().flat_map(|b| b.classes()).copied().collect();
        all.sort_unstable();
        assert_eq!(all, SLOPE_CLASS_UNIVERSE.to_vec());
    }
}
