use geo::MultiPolygon;

/// Square meters to acres, consistent with 1x1 meter raster cells.
pub const ACRES_PER_SQ_METER: f64 = 0.0002471052;

/// Meters to statute miles, for transmission-distance reporting.
pub const MILES_PER_METER: f64 = 0.0006213712;

/// Marker for "computation failed/unavailable", distinct from a true zero.
pub const SENTINEL: f64 = -9999.0;

/// One candidate site polygon under evaluation.
/// Geometry is in a projected coordinate system with meter units.
#[derive(Debug, Clone)]
pub struct Parcel {
    pub fid: u64, // Source feature id from the input collection
    pub geom: MultiPolygon<f64>,
}

impl Parcel {
    pub fn new(fid: u64, geom: MultiPolygon<f64>) -> Self {
        Self { fid, geom }
    }

    /// Parcel footprint in acres, computed from the geometry itself
    /// (independent of any raster-derived acreage).
    pub fn area_acres(&self) -> f64 {
        use geo::Area;
        self.geom.unsigned_area() * ACRES_PER_SQ_METER
    }
}
