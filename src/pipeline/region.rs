use geo::{MultiPolygon, Relate};

use crate::refdata::Region;

/// First region (enumeration order) whose boundary completely contains the
/// parcel. Regions are expected to be mutually exclusive, so at most one
/// should ever match; first match wins regardless. `None` means no region
/// contains the parcel and resolution has failed for it.
pub fn resolve_region<'a>(regions: &'a [Region], parcel: &MultiPolygon<f64>) -> Option<&'a Region> {
    regions.iter().find(|region| region.boundary.relate(parcel).is_contains())
}
